use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};

use crate::types::{Chunk, SinkError};

/// Largest unterminated chunk that still gets line framing. Anything bigger
/// with no newline in it is passed through verbatim as an opaque blob.
pub const FRAGMENT_THRESHOLD: usize = 1024;

pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One formatted record produced from a chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
	/// Oversized unterminated data, written verbatim with no framing and no
	/// added terminator.
	Passthrough(String),
	Line(Line),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
	pub timestamp: String,
	pub pid: u32,
	pub text: String,
}

impl Line {
	/// Rendered body without the trailing terminator; sinks add their own
	/// framing around it.
	pub fn body(&self) -> String {
		format!("{} [{}] | {}", self.timestamp, self.pid, self.text)
	}
}

/// Reject strftime patterns chrono cannot render. Rendering an invalid
/// pattern panics inside `Display`, so sinks validate at construction and a
/// bad pattern never reaches write time.
pub fn validate_time_format(pattern: &str) -> Result<(), SinkError> {
	if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
		return Err(SinkError::InvalidTimeFormat(pattern.to_string()));
	}
	Ok(())
}

/// Split one chunk into formatted records.
///
/// Pure function of its arguments; each call formats only the data it was
/// given. A logical line that arrives split across two chunks comes out as two
/// independently stamped records — no partial-line fragment is carried over to
/// a later call.
pub fn format_chunk(
	chunk: &Chunk,
	time_format: &str,
	threshold: usize,
	now: DateTime<Local>,
) -> Vec<Record> {
	if !chunk.data.contains('\n') && chunk.data.len() > threshold {
		return vec![Record::Passthrough(chunk.data.clone())];
	}

	let timestamp = now.format(time_format).to_string();

	let mut segments: Vec<&str> = chunk.data.split('\n').collect();
	if chunk.data.ends_with('\n') {
		// No phantom empty line from a trailing terminator.
		segments.pop();
	}

	segments
		.into_iter()
		.map(|text| {
			Record::Line(Line {
				timestamp: timestamp.clone(),
				pid: chunk.pid,
				text: text.to_string(),
			})
		})
		.collect()
}
