//! Codec registration and negotiation-driven selection.

use tracing::debug;

use crate::negotiation::{AcceptHeader, Header, MediaType};

/// A selected codec together with both sides of the match.
#[derive(Debug)]
pub struct CodecMatch<'r, 'h, H> {
	/// The registered handler.
	pub handler: &'r H,
	/// The media type the handler was registered under.
	pub registered_type: &'r MediaType,
	/// The header range that accepted it.
	pub header_type: &'h MediaType,
}

/// Encoder and decoder handlers keyed by media type.
///
/// Handlers are kept in registration order, which doubles as selection
/// priority among candidates accepted by the same header range: the header's
/// ranges are visited in sorted order and, per range, the registered types
/// in registration order; the first accepting pair wins. An absent match is
/// `None`, not an error.
///
/// `Enc` and `Dec` are caller-defined handler types (closures, factories or
/// plain markers).
///
/// # Examples
///
/// ```
/// use nuages::{AcceptHeader, CodecRegistry, MediaType};
///
/// let mut registry: CodecRegistry<&str, &str> = CodecRegistry::new();
/// registry.register_encoder(MediaType::parse("text/html").unwrap(), "html");
/// registry.register_encoder(MediaType::parse("application/json").unwrap(), "json");
///
/// let accept = AcceptHeader::parse("Accept", "application/*;q=0.9, text/html;q=0.2").unwrap();
/// let selected = registry.match_encoder(&accept).unwrap();
/// assert_eq!(*selected.handler, "json");
/// assert_eq!(selected.header_type.media_type(), "application/*");
/// ```
pub struct CodecRegistry<Enc, Dec> {
	encoders: Vec<(MediaType, Enc)>,
	decoders: Vec<(MediaType, Dec)>,
}

impl<Enc, Dec> CodecRegistry<Enc, Dec> {
	pub fn new() -> Self {
		Self {
			encoders: Vec::new(),
			decoders: Vec::new(),
		}
	}

	/// Registers an encoder handler for `media_type`.
	pub fn register_encoder(&mut self, media_type: MediaType, encoder: Enc) {
		self.encoders.push((media_type, encoder));
	}

	/// Registers a decoder handler for `media_type`.
	pub fn register_decoder(&mut self, media_type: MediaType, decoder: Dec) {
		self.decoders.push((media_type, decoder));
	}

	/// Selects the encoder for an `Accept` header.
	pub fn match_encoder<'r, 'h>(
		&'r self,
		accept: &'h AcceptHeader,
	) -> Option<CodecMatch<'r, 'h, Enc>> {
		find_match(accept.sorted_media_types(), &self.encoders)
	}

	/// Selects the decoder for a `Content-Type` style header.
	pub fn match_decoder<'r, 'h>(
		&'r self,
		header: &'h Header,
	) -> Option<CodecMatch<'r, 'h, Dec>> {
		find_match(header.sorted_media_types(), &self.decoders)
	}
}

impl<Enc, Dec> Default for CodecRegistry<Enc, Dec> {
	fn default() -> Self {
		Self::new()
	}
}

fn find_match<'r, 'h, H>(
	header_types: &'h [MediaType],
	registered: &'r [(MediaType, H)],
) -> Option<CodecMatch<'r, 'h, H>> {
	for header_type in header_types {
		for (registered_type, handler) in registered {
			if header_type.accepts(registered_type) {
				debug!(
					matched = %registered_type.media_type(),
					against = %header_type.media_type(),
					"codec selected"
				);
				return Some(CodecMatch {
					handler,
					registered_type,
					header_type,
				});
			}
		}
	}
	None
}
