//! Header parsing, quality ordering and best-match selection.

use std::cmp::Ordering;

use crate::error::{NegotiationError, NegotiationResult};

use super::media_type::MediaType;

/// A parsed content negotiation header holding its ranges in quality order.
///
/// Sorting is stable and applies, in order until a non-zero result: quality
/// descending (two qualities closer than `0.001` are equal), literal type
/// before `*`, literal subtype before `*`. Ranges still equal after that
/// keep their relative order; see [`AcceptHeader`] for the extra Accept-only
/// tie-breaks.
///
/// # Examples
///
/// ```
/// use nuages::Header;
///
/// let header = Header::parse("Accept", "audio/*; q=0.2, audio/basic").unwrap();
/// assert_eq!(header.sorted_media_types()[0].media_type(), "audio/basic");
/// assert_eq!(header.sorted_media_types()[1].media_type(), "audio/*");
/// ```
#[derive(Debug, Clone)]
pub struct Header {
	name: String,
	media_types: Vec<MediaType>,
}

impl Header {
	/// Builds a header from unsorted ranges.
	pub fn new(name: &str, mut media_types: Vec<MediaType>) -> NegotiationResult<Self> {
		let name = trimmed_name(name)?;
		media_types.sort_by(compare_ranges);
		Ok(Self { name, media_types })
	}

	/// Parses a header value, splitting ranges on commas outside of double
	/// quotes.
	pub fn parse(name: &str, value: &str) -> NegotiationResult<Self> {
		Self::new(name, parse_ranges(value)?)
	}

	/// Parses a raw `Name: value` header line.
	///
	/// # Examples
	///
	/// ```
	/// use nuages::{Header, NegotiationError};
	///
	/// let header = Header::parse_line("Content-Type: application/vnd.api+json").unwrap();
	/// assert_eq!(header.name(), "Content-Type");
	///
	/// assert!(matches!(
	///     Header::parse_line("Content-Type"),
	///     Err(NegotiationError::MalformedHeader(_))
	/// ));
	/// ```
	pub fn parse_line(line: &str) -> NegotiationResult<Self> {
		let (name, value) = line
			.split_once(':')
			.ok_or_else(|| NegotiationError::MalformedHeader(line.to_owned()))?;
		Self::parse(name, value)
	}

	pub(crate) fn from_sorted(name: String, media_types: Vec<MediaType>) -> Self {
		Self { name, media_types }
	}

	/// Header name, trimmed.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The ranges of this header, sorted best-first.
	pub fn sorted_media_types(&self) -> &[MediaType] {
		&self.media_types
	}

	/// Picks the first candidate accepted by the best-sorted range.
	///
	/// Header ranges are visited in sorted order, candidates in the
	/// caller-supplied order; the first accepting pair wins. `None` means no
	/// range accepted any candidate, which is a normal outcome rather than
	/// an error.
	pub fn best_match<'a>(&self, candidates: &'a [MediaType]) -> Option<&'a MediaType> {
		for header_type in &self.media_types {
			for candidate in candidates {
				if header_type.accepts(candidate) {
					return Some(candidate);
				}
			}
		}
		None
	}
}

/// An `Accept` header with the full deterministic ordering.
///
/// On top of the [`Header`] comparator, ranges with media parameters sort
/// before ranges without, and a final tie-break on original input position
/// keeps otherwise-equal ranges deterministic.
///
/// # Examples
///
/// ```
/// use nuages::AcceptHeader;
///
/// let accept = AcceptHeader::parse(
///     "Accept",
///     "text/*;q=0.3, text/html;q=0.7, text/html;level=1, text/html;level=2;q=0.4, */*;q=0.5",
/// )
/// .unwrap();
/// let sorted: Vec<String> = accept
///     .sorted_media_types()
///     .iter()
///     .map(|m| m.media_type())
///     .collect();
/// assert_eq!(sorted, ["text/html", "text/html", "*/*", "text/html", "text/*"]);
/// ```
#[derive(Debug, Clone)]
pub struct AcceptHeader {
	inner: Header,
}

impl AcceptHeader {
	/// Builds an Accept header from unsorted ranges.
	pub fn new(name: &str, media_types: Vec<MediaType>) -> NegotiationResult<Self> {
		let name = trimmed_name(name)?;
		let mut indexed: Vec<(usize, MediaType)> = media_types.into_iter().enumerate().collect();
		indexed.sort_by(|(lhs_pos, lhs), (rhs_pos, rhs)| {
			compare_ranges(lhs, rhs)
				.then_with(|| compare_parameter_presence(lhs, rhs))
				.then_with(|| lhs_pos.cmp(rhs_pos))
		});
		let sorted = indexed.into_iter().map(|(_, media_type)| media_type).collect();
		Ok(Self {
			inner: Header::from_sorted(name, sorted),
		})
	}

	/// Parses an Accept header value.
	pub fn parse(name: &str, value: &str) -> NegotiationResult<Self> {
		Self::new(name, parse_ranges(value)?)
	}

	/// Header name, trimmed.
	pub fn name(&self) -> &str {
		self.inner.name()
	}

	/// The ranges of this header, sorted best-first.
	pub fn sorted_media_types(&self) -> &[MediaType] {
		self.inner.sorted_media_types()
	}

	/// See [`Header::best_match`].
	pub fn best_match<'a>(&self, candidates: &'a [MediaType]) -> Option<&'a MediaType> {
		self.inner.best_match(candidates)
	}
}

fn trimmed_name(name: &str) -> NegotiationResult<String> {
	let name = name.trim();
	if name.is_empty() {
		return Err(NegotiationError::EmptyHeaderName);
	}
	Ok(name.to_owned())
}

fn parse_ranges(value: &str) -> NegotiationResult<Vec<MediaType>> {
	split_outside_quotes(value)
		.into_iter()
		.map(MediaType::parse)
		.collect()
}

/// Splits on commas that are not inside a double-quoted parameter value.
fn split_outside_quotes(value: &str) -> Vec<&str> {
	let mut ranges = Vec::new();
	let mut start = 0;
	let mut in_quotes = false;
	for (idx, ch) in value.char_indices() {
		match ch {
			'"' => in_quotes = !in_quotes,
			',' if !in_quotes => {
				ranges.push(&value[start..idx]);
				start = idx + 1;
			}
			_ => {}
		}
	}
	ranges.push(&value[start..]);
	ranges
}

fn compare_ranges(lhs: &MediaType, rhs: &MediaType) -> Ordering {
	compare_quality(lhs.quality(), rhs.quality())
		.then_with(|| compare_specificity(lhs.main_type(), rhs.main_type()))
		.then_with(|| compare_specificity(lhs.sub_type(), rhs.sub_type()))
}

fn compare_quality(lhs: f64, rhs: f64) -> Ordering {
	// rfc2616 #3.9: only 3 digits are meaningful, closer counts as equal
	if (lhs - rhs).abs() < 0.001 {
		Ordering::Equal
	} else if lhs > rhs {
		Ordering::Less
	} else {
		Ordering::Greater
	}
}

fn compare_specificity(lhs: &str, rhs: &str) -> Ordering {
	// a literal sorts before the '*' wildcard
	(lhs == "*").cmp(&(rhs == "*"))
}

fn compare_parameter_presence(lhs: &MediaType, rhs: &MediaType) -> Ordering {
	lhs.parameters().is_none().cmp(&rhs.parameters().is_none())
}
