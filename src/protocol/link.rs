//! Host link line assembly
//!
//! Byte-at-a-time state machine. The caller polls the UART without
//! blocking and feeds whatever arrived; a line is handed out once its `\n`
//! is seen.

use super::line_buffer::LineBuffer;

/// Outcome of feeding one byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    /// More input needed
    Pending,
    /// A complete line is available via [`LinkReader::line`]
    Line,
    /// A line ended but was longer than the buffer; it is discarded
    Overflow,
}

/// Line assembler for the host link
pub struct LinkReader {
    line: LineBuffer,
    /// Last feed completed a line; clear before accepting the next byte
    complete: bool,
}

impl LinkReader {
    /// Create new reader
    pub const fn new() -> Self {
        Self {
            line: LineBuffer::new(),
            complete: false,
        }
    }

    /// Process a single input byte
    ///
    /// `\n` ends a line, `\r` is dropped so CRLF hosts work unchanged.
    /// Control characters other than tab are ignored.
    pub fn feed(&mut self, byte: u8) -> Feed {
        if self.complete {
            self.line.clear();
            self.complete = false;
        }

        match byte {
            b'\n' => {
                self.complete = true;
                if self.line.overflowed() {
                    Feed::Overflow
                } else {
                    Feed::Line
                }
            }

            b'\r' => Feed::Pending,

            // Printable character or tab
            b'\t' | 0x20..=0x7E => {
                self.line.push(byte);
                Feed::Pending
            }

            _ => Feed::Pending,
        }
    }

    /// The line completed by the last [`Feed::Line`]
    ///
    /// Empty until a line is complete.
    pub fn line(&self) -> &str {
        if self.complete {
            self.line.as_str()
        } else {
            ""
        }
    }

    /// Bytes buffered for the line in progress
    pub fn pending_len(&self) -> usize {
        if self.complete {
            0
        } else {
            self.line.len()
        }
    }
}

impl Default for LinkReader {
    fn default() -> Self {
        Self::new()
    }
}
