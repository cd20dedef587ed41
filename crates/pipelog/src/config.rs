use std::io;
use std::path::PathBuf;

use serde::Deserialize;

use crate::file::FileSink;
use crate::term::TermSink;
use crate::types::{Sink, SinkError};

/// Declarative sink configuration, as found in a supervisor's service file.
///
/// ```toml
/// kind = "file"
/// filename = "/var/log/web.log"
/// max_bytes = "1048576"   # integer or decimal text
/// backup_count = 5
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SinkConfig {
	pub kind: SinkKind,
	pub filename: Option<PathBuf>,
	pub time_format: Option<String>,
	#[serde(default)]
	pub max_bytes: Count,
	#[serde(default)]
	pub backup_count: Count,
	pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
	File,
	Terminal,
}

/// Integer accepted as a number or as decimal text. Coerced when the sink is
/// built; bad text is a construction error, never a write error.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Count {
	Int(u64),
	Text(String),
}

impl Default for Count {
	fn default() -> Self {
		Count::Int(0)
	}
}

impl Count {
	pub fn coerce(&self, field: &'static str) -> Result<u64, SinkError> {
		match self {
			Count::Int(n) => Ok(*n),
			Count::Text(s) => s.trim().parse().map_err(|_| SinkError::InvalidCount {
				field,
				value: s.clone(),
			}),
		}
	}
}

impl SinkConfig {
	/// Construct the configured sink. Terminal sinks write to stdout.
	pub fn build(&self) -> Result<Box<dyn Sink + Send>, SinkError> {
		let max_bytes = self.max_bytes.coerce("max_bytes")?;
		let backup_count = self.backup_count.coerce("backup_count")?;
		let backup_count: u32 = backup_count.try_into().map_err(|_| SinkError::InvalidCount {
			field: "backup_count",
			value: backup_count.to_string(),
		})?;

		match self.kind {
			SinkKind::File => {
				let path = self.filename.as_ref().ok_or(SinkError::MissingFilename)?;
				let sink = FileSink::new(path.clone(), self.time_format.as_deref(), max_bytes, backup_count)?;
				Ok(Box::new(sink))
			}
			SinkKind::Terminal => {
				let sink = TermSink::new(
					Box::new(io::stdout()),
					self.color.as_deref(),
					self.time_format.as_deref(),
				)?;
				Ok(Box::new(sink))
			}
		}
	}
}
