//! Include paths and sparse field sets.

use std::collections::{HashMap, HashSet};

/// What to include and which fields to keep for one encode call.
///
/// Include paths are dot-separated relationship chains rooted at the
/// primary data, e.g. `"posts.comments"`. Field sets map a resource type
/// to the attribute and relationship names that survive filtering; a type
/// without an entry stays unfiltered. The value is immutable and can be
/// shared between calls.
///
/// # Examples
///
/// ```
/// use std::collections::{HashMap, HashSet};
/// use nuages::EncodingParameters;
///
/// let mut field_sets = HashMap::new();
/// field_sets.insert(
/// 	"people".to_owned(),
/// 	HashSet::from(["first_name".to_owned()]),
/// );
/// let params = EncodingParameters::new(
/// 	Some(vec!["posts.comments".to_owned()]),
/// 	Some(field_sets),
/// );
/// assert!(params.field_set("people").is_some());
/// assert!(params.field_set("sites").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodingParameters {
	include_paths: Option<Vec<String>>,
	field_sets: Option<HashMap<String, HashSet<String>>>,
}

impl EncodingParameters {
	pub fn new(
		include_paths: Option<Vec<String>>,
		field_sets: Option<HashMap<String, HashSet<String>>>,
	) -> Self {
		Self { include_paths, field_sets }
	}

	/// Parameters carrying only include paths.
	pub fn with_include_paths(paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
		Self {
			include_paths: Some(paths.into_iter().map(Into::into).collect()),
			field_sets: None,
		}
	}

	/// The requested include paths; `None` means schema defaults apply.
	pub fn include_paths(&self) -> Option<&[String]> {
		self.include_paths.as_deref()
	}

	/// The surviving field names for `resource_type`; `None` means the type
	/// is unfiltered.
	pub fn field_set(&self, resource_type: &str) -> Option<&HashSet<String>> {
		self.field_sets.as_ref()?.get(resource_type)
	}
}
