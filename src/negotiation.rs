//! RFC 2616 style media type negotiation.
//!
//! [`MediaType`] models one parsed range of a negotiation header;
//! [`Header`] and [`AcceptHeader`] parse full header values, keep their
//! ranges in a deterministic quality order and pick the best matching
//! candidate out of a server-supplied list.

pub mod header;
pub mod media_type;

pub use header::{AcceptHeader, Header};
pub use media_type::MediaType;
