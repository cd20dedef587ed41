use std::io;

use serde::{Deserialize, Serialize};

/// One unit of text delivered from a supervised process's output pipe in a
/// single event-loop callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
	pub pid: u32,
	pub data: String,
}

/// Errors from sink construction, writes, and rotation.
#[derive(Debug)]
pub enum SinkError {
	/// Write attempted after the sink was closed.
	Closed,
	/// IO failure opening, writing, or rotating the destination.
	Io(io::Error),
	/// max_bytes/backup_count text that is not a non-negative integer.
	InvalidCount { field: &'static str, value: String },
	/// Time-format pattern that strftime parsing rejects.
	InvalidTimeFormat(String),
	/// Color name not in the palette.
	UnknownColor(String),
	/// File sink configured without a filename.
	MissingFilename,
}

impl std::fmt::Display for SinkError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			SinkError::Closed => write!(f, "sink is closed"),
			SinkError::Io(e) => write!(f, "io error: {}", e),
			SinkError::InvalidCount { field, value } => {
				write!(f, "invalid {}: {:?} is not a non-negative integer", field, value)
			}
			SinkError::InvalidTimeFormat(pattern) => {
				write!(f, "invalid time format: {:?}", pattern)
			}
			SinkError::UnknownColor(name) => write!(f, "unknown color: {}", name),
			SinkError::MissingFilename => write!(f, "file sink requires a filename"),
		}
	}
}

impl std::error::Error for SinkError {}

impl From<io::Error> for SinkError {
	fn from(e: io::Error) -> Self {
		SinkError::Io(e)
	}
}

/// A destination for a watcher's output chunks.
///
/// The supervisor constructs one sink per (watcher, stream-kind) pair, feeds
/// it chunks as the pipe becomes readable, and closes it when the watcher
/// stops. A restart gets a fresh sink; no state survives the boundary.
pub trait Sink {
	/// Format the chunk and persist/display every resulting record.
	/// Formatting never fails; only resource-level errors are reported.
	fn write(&mut self, chunk: &Chunk) -> Result<(), SinkError>;

	/// Flush and release the destination. Idempotent; any `write` afterwards
	/// fails with [`SinkError::Closed`].
	fn close(&mut self) -> Result<(), SinkError>;
}
