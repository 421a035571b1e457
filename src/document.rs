//! Document model and rendering.
//!
//! [`DocumentLinks`] and [`ErrorObject`] are the user-facing value types;
//! the traversal engine in `builder` is internal and driven through
//! [`crate::Encoder`].

pub(crate) mod builder;
pub mod errors;
pub mod links;

pub use errors::ErrorObject;
pub use links::{DocumentLinks, PaginationLinks};
