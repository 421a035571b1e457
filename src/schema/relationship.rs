//! Relationship descriptors emitted by schemas.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::document::links::PaginationLinks;

/// Resource data carried by a document root or a relationship.
///
/// Instances are type-erased and shared; the encoder resolves each one back
/// through its registered schema. `Null` and an empty `Many` are distinct:
/// the former renders as `null`, the latter as `[]`.
#[derive(Clone)]
pub enum ResourceData {
	Null,
	One(Rc<dyn Any>),
	Many(Vec<Rc<dyn Any>>),
}

impl ResourceData {
	/// Wraps a single owned instance.
	pub fn one<T: Any>(instance: T) -> Self {
		Self::One(Rc::new(instance))
	}

	/// Wraps a sequence of owned instances.
	pub fn many<T: Any>(instances: impl IntoIterator<Item = T>) -> Self {
		Self::Many(
			instances
				.into_iter()
				.map(|instance| Rc::new(instance) as Rc<dyn Any>)
				.collect(),
		)
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// The carried instances, in order. Empty for `Null`.
	pub(crate) fn instances(&self) -> Vec<Rc<dyn Any>> {
		match self {
			Self::Null => Vec::new(),
			Self::One(instance) => vec![instance.clone()],
			Self::Many(instances) => instances.clone(),
		}
	}
}

impl fmt::Debug for ResourceData {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("ResourceData::Null"),
			Self::One(_) => f.write_str("ResourceData::One(..)"),
			Self::Many(instances) => write!(f, "ResourceData::Many(len={})", instances.len()),
		}
	}
}

/// One named relationship of a resource, as described by its schema.
///
/// Constructed with [`RelationshipObject::new`] and refined through the
/// `with_*` builder methods. By default only the linkage (`data`) is shown;
/// enabling a link, meta or pagination is opt-in. Setting a sub-URL also
/// turns the corresponding link on.
///
/// # Examples
///
/// ```
/// use nuages::{RelationshipObject, ResourceData};
///
/// let comments = RelationshipObject::new("comments", ResourceData::Null)
///     .with_self_link()
///     .with_related_link();
/// assert!(comments.show_self());
/// assert!(comments.show_data());
/// ```
#[derive(Debug, Clone)]
pub struct RelationshipObject {
	name: String,
	data: ResourceData,
	self_sub_url: Option<String>,
	related_sub_url: Option<String>,
	meta: Option<Value>,
	pagination: Option<PaginationLinks>,
	show_as_reference: bool,
	show_self: bool,
	show_related: bool,
	show_data: bool,
	show_meta: bool,
	show_pagination: bool,
}

impl RelationshipObject {
	/// A data-only relationship; the linkage is shown, nothing else.
	pub fn new(name: &str, data: ResourceData) -> Self {
		Self {
			name: name.to_owned(),
			data,
			self_sub_url: None,
			related_sub_url: None,
			meta: None,
			pagination: None,
			show_as_reference: false,
			show_self: false,
			show_related: false,
			show_data: true,
			show_meta: false,
			show_pagination: false,
		}
	}

	/// Shows the `self` link under its default sub-URL
	/// (`/relationships/{name}`).
	pub fn with_self_link(mut self) -> Self {
		self.show_self = true;
		self
	}

	/// Shows the `self` link under an explicit sub-URL.
	pub fn with_self_sub_url(mut self, sub_url: &str) -> Self {
		self.self_sub_url = Some(sub_url.to_owned());
		self.show_self = true;
		self
	}

	/// Shows the `related` link under its default sub-URL (`/{name}`).
	pub fn with_related_link(mut self) -> Self {
		self.show_related = true;
		self
	}

	/// Shows the `related` link under an explicit sub-URL.
	pub fn with_related_sub_url(mut self, sub_url: &str) -> Self {
		self.related_sub_url = Some(sub_url.to_owned());
		self.show_related = true;
		self
	}

	/// Attaches relationship meta and shows it.
	pub fn with_meta(mut self, meta: Value) -> Self {
		self.meta = Some(meta);
		self.show_meta = true;
		self
	}

	/// Shows meta sourced from the resolved target resource.
	///
	/// The encoder renders the meta of the relationship's first target, as
	/// produced by that target's schema. An explicit
	/// [`with_meta`](Self::with_meta) value takes precedence.
	pub fn with_target_meta(mut self) -> Self {
		self.show_meta = true;
		self
	}

	/// Attaches pagination links and shows them.
	pub fn with_pagination(mut self, pagination: PaginationLinks) -> Self {
		self.pagination = Some(pagination);
		self.show_pagination = true;
		self
	}

	/// Hides the linkage.
	pub fn without_data(mut self) -> Self {
		self.show_data = false;
		self
	}

	/// Renders the whole relationship as a bare related URL string.
	pub fn as_reference(mut self) -> Self {
		self.show_as_reference = true;
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn data(&self) -> &ResourceData {
		&self.data
	}

	/// The `self` sub-URL, explicit or the `/relationships/{name}` default.
	pub fn self_sub_url(&self) -> String {
		match &self.self_sub_url {
			Some(sub_url) => sub_url.clone(),
			None => format!("/relationships/{}", self.name),
		}
	}

	/// The `related` sub-URL, explicit or the `/{name}` default.
	pub fn related_sub_url(&self) -> String {
		match &self.related_sub_url {
			Some(sub_url) => sub_url.clone(),
			None => format!("/{}", self.name),
		}
	}

	pub fn meta(&self) -> Option<&Value> {
		self.meta.as_ref()
	}

	pub fn pagination(&self) -> Option<&PaginationLinks> {
		self.pagination.as_ref()
	}

	pub fn show_as_reference(&self) -> bool {
		self.show_as_reference
	}

	pub fn show_self(&self) -> bool {
		self.show_self
	}

	pub fn show_related(&self) -> bool {
		self.show_related
	}

	pub fn show_data(&self) -> bool {
		self.show_data
	}

	pub fn show_meta(&self) -> bool {
		self.show_meta
	}

	pub fn show_pagination(&self) -> bool {
		self.show_pagination
	}
}
