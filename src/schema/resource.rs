//! Per-instance resource descriptors.

use std::any::Any;
use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{EncodeError, EncodeResult};
use crate::schema::ResourceSchema;

/// An immutable snapshot of one instance as seen through its schema.
///
/// Built once per resolved instance during traversal; it captures identity,
/// attributes, the self URL and the visibility flags so rendering never has
/// to go back to the schema.
#[derive(Debug, Clone)]
pub struct ResourceObject {
	resource_type: String,
	id: String,
	attributes: IndexMap<String, Value>,
	meta: Option<Value>,
	self_url: String,
	show_self: bool,
	show_meta: bool,
	show_self_in_included: bool,
	show_relationships_in_included: bool,
	show_meta_in_included: bool,
	show_meta_in_linkage: bool,
}

impl ResourceObject {
	/// Captures `instance` through `schema`.
	///
	/// Fails when the schema emits an attribute named `type` or `id`.
	pub(crate) fn from_schema(
		schema: &dyn ResourceSchema,
		instance: &dyn Any,
	) -> EncodeResult<Self> {
		let resource_type = schema.resource_type().to_owned();
		let attributes = schema.attributes(instance);
		for reserved in ["type", "id"] {
			if attributes.contains_key(reserved) {
				return Err(EncodeError::ReservedAttributeName {
					resource_type,
					name: reserved.to_owned(),
				});
			}
		}
		Ok(Self {
			resource_type,
			id: schema.id(instance),
			attributes,
			meta: schema.meta(instance),
			self_url: schema.self_url(instance),
			show_self: schema.show_self(),
			show_meta: schema.show_meta(),
			show_self_in_included: schema.show_self_in_included(),
			show_relationships_in_included: schema.show_relationships_in_included(),
			show_meta_in_included: schema.show_meta_in_included(),
			show_meta_in_linkage: schema.show_meta_in_linkage(),
		})
	}

	/// Drops every attribute not named in `fields`.
	pub(crate) fn retain_fields(&mut self, fields: &HashSet<String>) {
		self.attributes.retain(|name, _| fields.contains(name));
	}

	pub fn resource_type(&self) -> &str {
		&self.resource_type
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn attributes(&self) -> &IndexMap<String, Value> {
		&self.attributes
	}

	pub fn meta(&self) -> Option<&Value> {
		self.meta.as_ref()
	}

	pub fn self_url(&self) -> &str {
		&self.self_url
	}

	pub fn show_self(&self) -> bool {
		self.show_self
	}

	pub fn show_meta(&self) -> bool {
		self.show_meta
	}

	pub fn show_self_in_included(&self) -> bool {
		self.show_self_in_included
	}

	pub fn show_relationships_in_included(&self) -> bool {
		self.show_relationships_in_included
	}

	pub fn show_meta_in_included(&self) -> bool {
		self.show_meta_in_included
	}

	pub fn show_meta_in_linkage(&self) -> bool {
		self.show_meta_in_linkage
	}
}
