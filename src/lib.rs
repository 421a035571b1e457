//! Schema-driven hypermedia document encoding with media type negotiation.
//!
//! `nuages` turns graphs of plain Rust values into hypermedia documents:
//! each concrete type gets a [`ResourceSchema`] describing its type name,
//! identity, attributes and relationships; the [`Encoder`] walks the graph,
//! deduplicates resources by `(type, id)`, honors include paths and sparse
//! field sets and renders a `serde_json` tree. A separate negotiation layer
//! parses `Accept` / `Content-Type` style headers, orders their ranges
//! deterministically and selects codecs from a [`CodecRegistry`].
//!
//! # Examples
//!
//! ```
//! use std::any::Any;
//! use std::rc::Rc;
//! use indexmap::IndexMap;
//! use nuages::{Encoder, ResourceData, ResourceSchema, SchemaContainer};
//! use serde_json::json;
//!
//! struct Track {
//! 	id: u64,
//! 	title: String,
//! }
//!
//! struct TrackSchema;
//!
//! impl ResourceSchema for TrackSchema {
//! 	fn resource_type(&self) -> &str {
//! 		"tracks"
//! 	}
//!
//! 	fn id(&self, instance: &dyn Any) -> String {
//! 		let track = instance.downcast_ref::<Track>().unwrap();
//! 		track.id.to_string()
//! 	}
//!
//! 	fn attributes(&self, instance: &dyn Any) -> IndexMap<String, serde_json::Value> {
//! 		let track = instance.downcast_ref::<Track>().unwrap();
//! 		IndexMap::from([("title".to_owned(), json!(track.title))])
//! 	}
//!
//! 	fn self_sub_url(&self) -> String {
//! 		"http://example.com/tracks/".to_owned()
//! 	}
//! }
//!
//! let mut container = SchemaContainer::new();
//! container.register::<Track>(Rc::new(TrackSchema));
//! let encoder = Encoder::new(Rc::new(container));
//!
//! let track = Track { id: 7, title: "Nuages".to_owned() };
//! let document = encoder.encode(&ResourceData::one(track), None, None, None).unwrap();
//! assert_eq!(
//! 	document,
//! 	json!({
//! 		"data": {
//! 			"type": "tracks",
//! 			"id": "7",
//! 			"attributes": { "title": "Nuages" },
//! 			"links": { "self": "http://example.com/tracks/7" }
//! 		}
//! 	})
//! );
//! ```

pub mod codec;
pub mod document;
pub mod encoder;
pub mod error;
pub mod negotiation;
pub mod parameters;
pub mod schema;

pub use codec::{CodecMatch, CodecRegistry};
pub use document::{DocumentLinks, ErrorObject, PaginationLinks};
pub use encoder::Encoder;
pub use error::{EncodeError, EncodeResult, NegotiationError, NegotiationResult};
pub use negotiation::{AcceptHeader, Header, MediaType};
pub use parameters::EncodingParameters;
pub use schema::{
	RelationshipObject, ResourceData, ResourceObject, ResourceSchema, SchemaContainer,
};
