//! # pipelog
//!
//! Output-capture sinks for process supervisors.
//!
//! A supervisor feeds each watcher's stdout/stderr pipe into a [`Sink`]:
//! either a size-rotated log file or a colorized terminal stream keyed by
//! originating pid. Chunks are framed into timestamped lines; oversized
//! unterminated chunks pass through verbatim.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use pipelog::{Chunk, FileSink, Sink};
//!
//! # fn main() -> Result<(), pipelog::SinkError> {
//! let mut sink = FileSink::new("/tmp/web.log", None, 1024 * 1024, 3)?;
//! sink.write(&Chunk { pid: 333, data: "listening on :8080\n".into() })?;
//! sink.close()?;
//! # Ok(())
//! # }
//! ```

pub mod types;
pub mod palette;
pub mod format;
pub mod file;
pub mod term;
pub mod config;

pub use types::{Chunk, Sink, SinkError};
pub use format::{format_chunk, Line, Record, DEFAULT_TIME_FORMAT, FRAGMENT_THRESHOLD};
pub use file::FileSink;
pub use term::TermSink;
pub use config::{Count, SinkConfig, SinkKind};
