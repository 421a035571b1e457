//! Media type value type and range parsing.

use indexmap::IndexMap;

use crate::error::{NegotiationError, NegotiationResult};

/// One parsed media type range of a content negotiation header.
///
/// A range is immutable once constructed, either directly or by parsing a
/// single header segment such as `text/html;level=1;q=0.4`. Parameter maps
/// keep insertion order and compare keys case-sensitively. The quality value
/// is truncated to three meaningful decimal digits (RFC 2616 §3.9) and must
/// lie in `[0, 1]`.
///
/// # Examples
///
/// ```
/// use nuages::MediaType;
///
/// let range = MediaType::parse("text/html; level=1; q=0.4").unwrap();
/// assert_eq!(range.media_type(), "text/html");
/// assert_eq!(range.quality(), 0.4);
/// assert_eq!(range.parameters().unwrap()["level"], "1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MediaType {
	main_type: String,
	sub_type: String,
	parameters: Option<IndexMap<String, String>>,
	quality: f64,
	extensions: Option<IndexMap<String, String>>,
}

impl MediaType {
	/// Builds a parameterless media type with quality `1.0`.
	///
	/// # Examples
	///
	/// ```
	/// use nuages::MediaType;
	///
	/// let json = MediaType::new("application", "vnd.api+json").unwrap();
	/// assert_eq!(json.media_type(), "application/vnd.api+json");
	/// assert_eq!(json.quality(), 1.0);
	/// ```
	pub fn new(main_type: &str, sub_type: &str) -> NegotiationResult<Self> {
		Self::full(main_type, sub_type, None, 1.0, None)
	}

	/// Builds a media type carrying media parameters.
	pub fn with_parameters(
		main_type: &str,
		sub_type: &str,
		parameters: IndexMap<String, String>,
	) -> NegotiationResult<Self> {
		Self::full(main_type, sub_type, Some(parameters), 1.0, None)
	}

	/// Builds a media type from all of its parts.
	///
	/// Type and subtype are trimmed and must be non-empty. The quality is
	/// truncated with `floor(q * 1000) / 1000` before range validation.
	pub fn full(
		main_type: &str,
		sub_type: &str,
		parameters: Option<IndexMap<String, String>>,
		quality: f64,
		extensions: Option<IndexMap<String, String>>,
	) -> NegotiationResult<Self> {
		let main_type = main_type.trim();
		let sub_type = sub_type.trim();
		if main_type.is_empty() || sub_type.is_empty() {
			return Err(NegotiationError::MalformedMediaType(format!(
				"{main_type}/{sub_type}"
			)));
		}

		// rfc2616 #3.9: only 3 digits are meaningful for quality values
		let quality = (quality * 1000.0).floor() / 1000.0;
		if !(0.0..=1.0).contains(&quality) {
			return Err(NegotiationError::InvalidQuality(quality.to_string()));
		}

		Ok(Self {
			main_type: main_type.to_owned(),
			sub_type: sub_type.to_owned(),
			parameters,
			quality,
			extensions,
		})
	}

	/// Parses one range of a header value.
	///
	/// The first `;`-separated segment must be `type/subtype` with exactly
	/// one `/`. Subsequent segments are `key=value` pairs, trimmed and
	/// unquoted. The first `q` pair separates media parameters from
	/// extension parameters; a `q` appearing again afterwards is kept as an
	/// ordinary extension parameter.
	///
	/// # Examples
	///
	/// ```
	/// use nuages::MediaType;
	///
	/// let range = MediaType::parse("foo/bar; media=param; q=0.5; ext=\"v1,v2\"").unwrap();
	/// assert_eq!(range.parameters().unwrap()["media"], "param");
	/// assert_eq!(range.extensions().unwrap()["ext"], "v1,v2");
	/// assert_eq!(range.quality(), 0.5);
	/// ```
	pub fn parse(range: &str) -> NegotiationResult<Self> {
		let mut segments = range.split(';');
		let first = segments.next().unwrap_or_default().trim();

		let parts: Vec<&str> = first.split('/').collect();
		let &[main_type, sub_type] = parts.as_slice() else {
			return Err(NegotiationError::MalformedMediaType(first.to_owned()));
		};

		let mut quality = 1.0;
		let mut quality_seen = false;
		let mut parameters: Option<IndexMap<String, String>> = None;
		let mut extensions: Option<IndexMap<String, String>> = None;

		for segment in segments {
			let (key, value) = segment
				.split_once('=')
				.ok_or_else(|| NegotiationError::MalformedParameter(segment.trim().to_owned()))?;
			let key = key.trim();
			let value = value.trim().trim_matches('"');

			// the first 'q' separates media parameters from extension parameters
			if key == "q" && !quality_seen {
				quality = value
					.parse::<f64>()
					.map_err(|_| NegotiationError::InvalidQuality(value.to_owned()))?;
				quality_seen = true;
				continue;
			}

			let target = if quality_seen { &mut extensions } else { &mut parameters };
			target
				.get_or_insert_with(IndexMap::new)
				.insert(key.to_owned(), value.to_owned());
		}

		Self::full(main_type, sub_type, parameters, quality, extensions)
	}

	/// Primary type, e.g. `text` in `text/html`.
	pub fn main_type(&self) -> &str {
		&self.main_type
	}

	/// Subtype, e.g. `html` in `text/html`.
	pub fn sub_type(&self) -> &str {
		&self.sub_type
	}

	/// The combined `type/subtype` form.
	pub fn media_type(&self) -> String {
		format!("{}/{}", self.main_type, self.sub_type)
	}

	/// Media parameters preceding the `q` parameter, if any.
	pub fn parameters(&self) -> Option<&IndexMap<String, String>> {
		self.parameters.as_ref()
	}

	/// Quality value in `[0, 1]`, truncated to 3 decimal digits.
	pub fn quality(&self) -> f64 {
		self.quality
	}

	/// Extension parameters following the `q` parameter, if any.
	pub fn extensions(&self) -> Option<&IndexMap<String, String>> {
		self.extensions.as_ref()
	}

	/// Whether this range, treated as a template, accepts `candidate`.
	///
	/// Type and subtype must match literally or via a `*` wildcard on the
	/// template side. Parameters match when both sides have none, or when
	/// every candidate `(key, value)` pair appears in the template's
	/// parameters; a parameter set on exactly one side never matches.
	///
	/// # Examples
	///
	/// ```
	/// use nuages::MediaType;
	///
	/// let template = MediaType::parse("text/*").unwrap();
	/// let html = MediaType::new("text", "html").unwrap();
	/// assert!(template.accepts(&html));
	/// assert!(!html.accepts(&template));
	/// ```
	pub fn accepts(&self, candidate: &MediaType) -> bool {
		let type_matches = self.main_type == "*" || self.main_type == candidate.main_type;
		let sub_type_matches = self.sub_type == "*" || self.sub_type == candidate.sub_type;
		type_matches && sub_type_matches && self.parameters_accept(candidate)
	}

	fn parameters_accept(&self, candidate: &MediaType) -> bool {
		match (&self.parameters, &candidate.parameters) {
			(None, None) => true,
			(Some(template), Some(candidate)) => candidate
				.iter()
				.all(|(key, value)| template.get(key) == Some(value)),
			_ => false,
		}
	}
}
