//! Document encoder facade.

use std::rc::Rc;

use serde_json::{Value, json};

use crate::document::builder::DocumentBuilder;
use crate::document::errors;
use crate::document::{DocumentLinks, ErrorObject};
use crate::error::EncodeResult;
use crate::parameters::EncodingParameters;
use crate::schema::{ResourceData, SchemaContainer};

/// Front door for producing documents from schema-registered data.
///
/// The encoder holds a shared [`SchemaContainer`] and creates fresh
/// traversal state per call, so a single instance can serve any number of
/// encode calls. Output is a generic [`Value`] tree; turning it into text
/// or bytes is left to `serde_json`.
///
/// # Examples
///
/// ```
/// use std::any::Any;
/// use std::rc::Rc;
/// use indexmap::IndexMap;
/// use nuages::{Encoder, ResourceData, ResourceSchema, SchemaContainer};
/// use serde_json::json;
///
/// struct Star { name: String }
/// struct StarSchema;
///
/// impl ResourceSchema for StarSchema {
/// 	fn resource_type(&self) -> &str {
/// 		"stars"
/// 	}
/// 	fn id(&self, instance: &dyn Any) -> String {
/// 		instance.downcast_ref::<Star>().map(|s| s.name.clone()).unwrap_or_default()
/// 	}
/// 	fn attributes(&self, _instance: &dyn Any) -> IndexMap<String, serde_json::Value> {
/// 		IndexMap::new()
/// 	}
/// 	fn show_self(&self) -> bool {
/// 		false
/// 	}
/// }
///
/// let mut container = SchemaContainer::new();
/// container.register::<Star>(Rc::new(StarSchema));
/// let encoder = Encoder::new(Rc::new(container));
///
/// let document = encoder
/// 	.encode(&ResourceData::one(Star { name: "vega".to_owned() }), None, None, None)
/// 	.unwrap();
/// assert_eq!(document, json!({"data": {"type": "stars", "id": "vega"}}));
/// ```
pub struct Encoder {
	container: Rc<SchemaContainer>,
}

impl Encoder {
	pub fn new(container: Rc<SchemaContainer>) -> Self {
		Self { container }
	}

	/// Encodes `data` into a full document.
	///
	/// `links` and `meta` become the document's top-level `links` and `meta`
	/// members; `parameters` control include paths and sparse field sets.
	pub fn encode(
		&self,
		data: &ResourceData,
		links: Option<&DocumentLinks>,
		meta: Option<&Value>,
		parameters: Option<&EncodingParameters>,
	) -> EncodeResult<Value> {
		DocumentBuilder::new(&self.container, parameters).build(data, links, meta)
	}

	/// Renders a meta-only document.
	pub fn meta(&self, meta: &Value) -> Value {
		json!({ "meta": meta })
	}

	/// Renders an error document with a single member.
	pub fn error(&self, error: &ErrorObject) -> Value {
		errors::error_document(error)
	}

	/// Renders an error document from a list of members.
	pub fn errors(&self, errors: &[ErrorObject]) -> Value {
		errors::errors_document(errors)
	}
}
