//! Schema contract and registry.
//!
//! A [`ResourceSchema`] describes how one concrete Rust type maps onto a
//! resource: its type name, identity, attributes, relationships and link
//! URLs. Schemas are registered in a [`SchemaContainer`] keyed by runtime
//! type and the encoder resolves instances through it during traversal.

pub mod container;
pub mod relationship;
pub mod resource;

use std::any::Any;

use indexmap::IndexMap;
use serde_json::Value;

pub use container::SchemaContainer;
pub use relationship::{RelationshipObject, ResourceData};
pub use resource::ResourceObject;

/// Mapping from one concrete instance type to its resource representation.
///
/// Implementations receive instances type-erased as `&dyn Any` and downcast
/// to their concrete type. All methods must be deterministic and free of
/// side effects; the encoder may call them once per distinct instance and
/// expects identical answers for identical input.
///
/// Only `resource_type`, `id` and `attributes` are mandatory. Everything
/// else defaults to the common case: a shown `self` link, no meta, no
/// relationships and no default include paths.
pub trait ResourceSchema {
	/// The resource type name, e.g. `"people"`. Must be non-empty and stable.
	fn resource_type(&self) -> &str;

	/// The identity of `instance`, always rendered as a JSON string.
	fn id(&self, instance: &dyn Any) -> String;

	/// The attribute map of `instance`, in output order.
	///
	/// `type` and `id` are reserved and rejected at encode time.
	fn attributes(&self, instance: &dyn Any) -> IndexMap<String, Value>;

	/// The relationships of `instance`, in output order.
	fn relationships(&self, instance: &dyn Any) -> Vec<RelationshipObject> {
		let _ = instance;
		Vec::new()
	}

	/// Base URL this resource kind lives under, ending with a slash.
	fn self_sub_url(&self) -> String {
		format!("/{}/", self.resource_type())
	}

	/// The `self` URL of `instance`: the sub-URL joined with the id.
	fn self_url(&self, instance: &dyn Any) -> String {
		let sub_url = self.self_sub_url();
		if sub_url.ends_with('/') {
			format!("{sub_url}{}", self.id(instance))
		} else {
			format!("{sub_url}/{}", self.id(instance))
		}
	}

	/// Include paths applied when the caller requests none.
	fn default_include_paths(&self) -> Vec<String> {
		Vec::new()
	}

	/// Resource meta for `instance`.
	fn meta(&self, instance: &dyn Any) -> Option<Value> {
		let _ = instance;
		None
	}

	/// Whether primary resources render their `self` link.
	fn show_self(&self) -> bool {
		true
	}

	/// Whether primary resources render their meta.
	fn show_meta(&self) -> bool {
		false
	}

	/// Whether included resources render their `self` link.
	fn show_self_in_included(&self) -> bool {
		false
	}

	/// Whether included resources render their relationships.
	fn show_relationships_in_included(&self) -> bool {
		true
	}

	/// Whether included resources render their meta.
	fn show_meta_in_included(&self) -> bool {
		false
	}

	/// Whether linkage records carry the target's meta.
	fn show_meta_in_linkage(&self) -> bool {
		false
	}
}
