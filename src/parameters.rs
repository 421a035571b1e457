//! Caller-supplied encoding parameters.

pub mod encoding;

pub use encoding::EncodingParameters;
