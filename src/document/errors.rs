//! Error objects for `{"errors": […]}` documents.

use serde::Serialize;
use serde_json::{Value, json};

/// One member of a document's `errors` array.
///
/// Every field is optional and absent fields are omitted from the output.
/// `id` accepts any JSON value so numeric and string identifiers both work.
///
/// # Examples
///
/// ```
/// use nuages::ErrorObject;
/// use serde_json::json;
///
/// let error = ErrorObject {
///     status: Some("404".to_owned()),
///     title: Some("Not Found".to_owned()),
///     ..ErrorObject::default()
/// };
/// assert_eq!(
///     serde_json::to_value(&error).unwrap(),
///     json!({"status": "404", "title": "Not Found"})
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorObject {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id: Option<Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub href: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub status: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub code: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub detail: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub source: Option<Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub meta: Option<Value>,
}

/// Renders an error document with a single member.
pub(crate) fn error_document(error: &ErrorObject) -> Value {
	json!({ "errors": [error] })
}

/// Renders an error document from a list of members.
pub(crate) fn errors_document(errors: &[ErrorObject]) -> Value {
	json!({ "errors": errors })
}
