//! Link records for documents and paginated relationships.

use serde_json::{Map, Value};

/// Pagination URLs for a collection.
///
/// Every field is optional; absent links are omitted from the rendered
/// output rather than emitted as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationLinks {
	pub first: Option<String>,
	pub last: Option<String>,
	pub prev: Option<String>,
	pub next: Option<String>,
}

impl PaginationLinks {
	pub fn new(
		first: Option<String>,
		last: Option<String>,
		prev: Option<String>,
		next: Option<String>,
	) -> Self {
		Self { first, last, prev, next }
	}

	pub fn is_empty(&self) -> bool {
		self.first.is_none() && self.last.is_none() && self.prev.is_none() && self.next.is_none()
	}

	/// Adds the present links to `target` without overwriting keys that are
	/// already set.
	pub(crate) fn render_into(&self, target: &mut Map<String, Value>) {
		let entries = [
			("first", &self.first),
			("last", &self.last),
			("prev", &self.prev),
			("next", &self.next),
		];
		for (key, link) in entries {
			if let Some(url) = link {
				if !target.contains_key(key) {
					target.insert(key.to_owned(), Value::String(url.clone()));
				}
			}
		}
	}
}

/// Top-level document links: a `self` URL plus optional pagination.
///
/// # Examples
///
/// ```
/// use nuages::DocumentLinks;
///
/// let links = DocumentLinks::self_only("http://example.com/people/9");
/// assert_eq!(links.self_url.as_deref(), Some("http://example.com/people/9"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentLinks {
	pub self_url: Option<String>,
	pub pagination: Option<PaginationLinks>,
}

impl DocumentLinks {
	pub fn new(self_url: Option<String>, pagination: Option<PaginationLinks>) -> Self {
		Self { self_url, pagination }
	}

	pub fn self_only(self_url: &str) -> Self {
		Self {
			self_url: Some(self_url.to_owned()),
			pagination: None,
		}
	}

	/// Renders the present links, or `None` when there is nothing to show.
	pub(crate) fn render(&self) -> Option<Value> {
		let mut target = Map::new();
		if let Some(url) = &self.self_url {
			target.insert("self".to_owned(), Value::String(url.clone()));
		}
		if let Some(pagination) = &self.pagination {
			pagination.render_into(&mut target);
		}
		if target.is_empty() {
			None
		} else {
			Some(Value::Object(target))
		}
	}
}
