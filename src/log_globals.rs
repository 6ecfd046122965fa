//! Global log stream instance.
//!
//! The bridge runs one cooperative loop, so a single ring is enough:
//! the loop pushes, its drain step empties it once per pass.

use crate::logging::LogStream;

/// Log stream shared by the engine and the firmware entry point.
pub static LOG_STREAM: LogStream = LogStream::new();
