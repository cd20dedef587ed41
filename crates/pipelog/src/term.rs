use std::io::Write;

use chrono::{DateTime, Local};

use crate::format::{self, Record, DEFAULT_TIME_FORMAT, FRAGMENT_THRESHOLD};
use crate::palette;
use crate::types::{Chunk, Sink, SinkError};

pub const ANSI_RESET: &str = "\x1b[0m";

pub fn ansi_start(code: u8) -> String {
	format!("\x1b[0;3{};40m", code)
}

/// Colorized terminal stream for one watcher's output.
///
/// The color is fixed at construction — explicitly by name, or picked
/// pseudo-randomly from the palette — and frames every line this sink writes,
/// regardless of which pid the chunk carries. Passthrough blobs are written
/// raw, with no color framing.
pub struct TermSink {
	out: Option<Box<dyn Write + Send>>,
	color_code: u8,
	time_format: String,
	now: fn() -> DateTime<Local>,
}

impl TermSink {
	pub fn new(
		out: Box<dyn Write + Send>,
		color: Option<&str>,
		time_format: Option<&str>,
	) -> Result<Self, SinkError> {
		let time_format = time_format.unwrap_or(DEFAULT_TIME_FORMAT);
		format::validate_time_format(time_format)?;

		let color_code = match color {
			Some(name) => palette::color_code(name)
				.ok_or_else(|| SinkError::UnknownColor(name.to_string()))?,
			None => palette::random_code(),
		};

		Ok(Self {
			out: Some(out),
			color_code,
			time_format: time_format.to_string(),
			now: Local::now,
		})
	}

	/// Substitute the wall clock, for deterministic timestamps in tests.
	pub fn with_clock(mut self, now: fn() -> DateTime<Local>) -> Self {
		self.now = now;
		self
	}

	pub fn color_code(&self) -> u8 {
		self.color_code
	}
}

impl Sink for TermSink {
	fn write(&mut self, chunk: &Chunk) -> Result<(), SinkError> {
		let out = self.out.as_mut().ok_or(SinkError::Closed)?;

		for record in format::format_chunk(chunk, &self.time_format, FRAGMENT_THRESHOLD, (self.now)()) {
			match record {
				Record::Passthrough(data) => out.write_all(data.as_bytes())?,
				Record::Line(line) => {
					let rendered =
						format!("{}{}{}\n", ansi_start(self.color_code), line.body(), ANSI_RESET);
					out.write_all(rendered.as_bytes())?;
				}
			}
		}
		out.flush()?;
		Ok(())
	}

	fn close(&mut self) -> Result<(), SinkError> {
		if let Some(mut out) = self.out.take() {
			out.flush()?;
			tracing::debug!("closed terminal sink (color {})", self.color_code);
		}
		Ok(())
	}
}
