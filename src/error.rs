//! Error types for document encoding and media type negotiation.
//!
//! Two independent taxonomies live here: [`EncodeError`] covers everything
//! that can go wrong while resolving an object graph into a document, and
//! [`NegotiationError`] covers rejected header input. A failed negotiation
//! match is *not* an error; matchers return `Option` instead.

use std::any::TypeId;
use thiserror::Error;

/// Result type for document encoding operations.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Result type for header and media type parsing.
pub type NegotiationResult<T> = Result<T, NegotiationError>;

/// Errors raised while encoding an object graph into a document.
///
/// `SchemaNotFound` is a configuration error; the remaining variants are
/// programmer-error defects in a schema's output and are validated
/// unconditionally on every encode call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EncodeError {
	/// No schema was registered for the runtime type of an instance.
	#[error("no schema registered for runtime type {0:?}")]
	SchemaNotFound(TypeId),

	/// A schema emitted an attribute named `type` or `id`.
	#[error("'{name}' is a reserved keyword and cannot be used as an attribute of resource '{resource_type}'")]
	ReservedAttributeName {
		/// Resource type whose schema produced the attribute.
		resource_type: String,
		/// The offending attribute name.
		name: String,
	},

	/// A schema emitted a relationship with a reserved or empty name.
	#[error("'{0}' is a reserved keyword and cannot be used as a relationship name")]
	ReservedRelationshipName(String),

	/// A relationship exposes none of self, related, data or meta.
	#[error("relationship '{0}' must show at least one of self, related, data or meta")]
	EmptyRelationshipContract(String),
}

/// Errors raised while parsing content negotiation headers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum NegotiationError {
	/// A media type range did not contain exactly one `/`, or a type or
	/// subtype was empty.
	#[error("malformed media type range: '{0}'")]
	MalformedMediaType(String),

	/// A parameter segment did not contain a `=`.
	#[error("malformed media type parameter: '{0}'")]
	MalformedParameter(String),

	/// A quality value could not be parsed or lies outside `[0, 1]`.
	#[error("invalid quality value: '{0}'")]
	InvalidQuality(String),

	/// A raw header line did not contain a `:` separator.
	#[error("malformed header line (missing ':'): '{0}'")]
	MalformedHeader(String),

	/// A header name was empty after trimming.
	#[error("header name must not be empty")]
	EmptyHeaderName,
}
