//! Line buffer for host link input

/// Maximum command line length in bytes (terminator excluded)
pub const LINE_SIZE: usize = 256;

/// Fixed-capacity line buffer.
///
/// Bytes past capacity are not stored; the buffer remembers that the
/// line overflowed so the caller can discard it instead of acting on a
/// truncated command.
pub struct LineBuffer {
    buf: [u8; LINE_SIZE],
    len: usize,
    overflowed: bool,
}

impl LineBuffer {
    /// Create empty buffer
    pub const fn new() -> Self {
        Self {
            buf: [0u8; LINE_SIZE],
            len: 0,
            overflowed: false,
        }
    }

    /// Push a byte. Returns `false` if the buffer is full.
    pub fn push(&mut self, c: u8) -> bool {
        if self.len < LINE_SIZE {
            self.buf[self.len] = c;
            self.len += 1;
            true
        } else {
            self.overflowed = true;
            false
        }
    }

    /// Clear buffer and overflow flag
    pub fn clear(&mut self) {
        self.len = 0;
        self.overflowed = false;
    }

    /// Get buffer as string slice
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    /// Get buffer length
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if bytes were dropped since the last clear
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
