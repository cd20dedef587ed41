use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::format::{self, Record, DEFAULT_TIME_FORMAT, FRAGMENT_THRESHOLD};
use crate::types::{Chunk, Sink, SinkError};

/// Size-rotated log file fed by one watcher's stdout or stderr pipe.
///
/// Rotated backups live next to the file as `<path>.1` (newest) through
/// `<path>.<backup_count>` (oldest); anything older is discarded.
pub struct FileSink {
	file: Option<File>,
	path: PathBuf,
	bytes_written: u64,
	max_bytes: u64,
	backup_count: u32,
	time_format: String,
	now: fn() -> DateTime<Local>,
}

impl FileSink {
	/// Open (or create) the file in append mode. `max_bytes == 0` disables
	/// rotation.
	pub fn new(
		path: impl Into<PathBuf>,
		time_format: Option<&str>,
		max_bytes: u64,
		backup_count: u32,
	) -> Result<Self, SinkError> {
		let time_format = time_format.unwrap_or(DEFAULT_TIME_FORMAT);
		format::validate_time_format(time_format)?;

		let path = path.into();
		let file = open_append(&path)?;

		// Start the counter at the file's current size so rotation decisions
		// hold across supervisor restarts pointed at the same path.
		let bytes_written = file.metadata().map(|m| m.len()).unwrap_or(0);

		Ok(Self {
			file: Some(file),
			path,
			bytes_written,
			max_bytes,
			backup_count,
			time_format: time_format.to_string(),
			now: Local::now,
		})
	}

	/// Substitute the wall clock, for deterministic timestamps in tests.
	pub fn with_clock(mut self, now: fn() -> DateTime<Local>) -> Self {
		self.now = now;
		self
	}

	pub fn bytes_written(&self) -> u64 {
		self.bytes_written
	}

	fn backup_path(&self, i: u32) -> PathBuf {
		PathBuf::from(format!("{}.{}", self.path.display(), i))
	}

	fn append(&mut self, bytes: &[u8]) -> Result<(), SinkError> {
		let file = self.file.as_mut().ok_or(SinkError::Closed)?;
		file.write_all(bytes)?;
		self.bytes_written += bytes.len() as u64;

		if self.max_bytes > 0 && self.bytes_written > self.max_bytes {
			self.rotate()?;
		}
		Ok(())
	}

	fn rotate(&mut self) -> Result<(), SinkError> {
		if let Some(file) = self.file.take() {
			drop(file);
		}

		// Reopen the live path whether or not the shift succeeded, so a
		// transient rotation failure leaves a writable sink, not one that
		// reports Closed. The counter only resets on a completed rotation.
		let shifted = self.shift_backups();
		self.file = Some(open_append(&self.path)?);
		shifted?;

		tracing::info!("rotated {} at {} bytes", self.path.display(), self.bytes_written);
		self.bytes_written = 0;
		Ok(())
	}

	fn shift_backups(&self) -> Result<(), SinkError> {
		if self.backup_count > 0 {
			// Shift the chain up; renaming over <path>.backup_count discards
			// the oldest backup.
			for i in (1..self.backup_count).rev() {
				let src = self.backup_path(i);
				if src.exists() {
					fs::rename(&src, self.backup_path(i + 1))?;
				}
			}
			fs::rename(&self.path, self.backup_path(1))?;
		} else {
			fs::remove_file(&self.path)?;
		}
		Ok(())
	}
}

impl Sink for FileSink {
	fn write(&mut self, chunk: &Chunk) -> Result<(), SinkError> {
		if self.file.is_none() {
			return Err(SinkError::Closed);
		}

		for record in format::format_chunk(chunk, &self.time_format, FRAGMENT_THRESHOLD, (self.now)()) {
			match record {
				Record::Passthrough(data) => self.append(data.as_bytes())?,
				Record::Line(line) => {
					let rendered = format!("{}\n", line.body());
					self.append(rendered.as_bytes())?;
				}
			}
		}
		Ok(())
	}

	fn close(&mut self) -> Result<(), SinkError> {
		if let Some(mut file) = self.file.take() {
			file.flush()?;
			tracing::debug!("closed {}", self.path.display());
		}
		Ok(())
	}
}

fn open_append(path: &Path) -> Result<File, SinkError> {
	Ok(OpenOptions::new().create(true).append(true).open(path)?)
}
