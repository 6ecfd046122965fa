//! Hardware Abstraction Layer for RustLogicBridge.
//!
//! The engine only sees [`InputPort`] and [`OutputPort`]; the loop driver
//! additionally reads the host link through [`LinkRx`].
//! Business logic stays in core modules, HAL is just I/O.

pub mod gpio;

#[cfg(target_os = "espidf")]
pub mod esp;

pub use gpio::{BoardProfile, PinId, PinMap};

/// Source of digital input readings.
///
/// Reads are synchronous and assumed to complete in bounded, negligible time.
pub trait InputPort {
    /// Read input line `index` (0-based, `0..INPUT_COUNT`).
    fn read(&mut self, index: usize) -> bool;
}

/// Sink for digital output levels.
pub trait OutputPort {
    /// Drive output line `index` (0-based, `0..OUTPUT_COUNT`).
    fn write(&mut self, index: usize, level: bool);

    /// Writes that failed since start, for ports that can fail.
    fn write_errors(&self) -> u32 {
        0
    }
}

/// Receive side of the host link.
pub trait LinkRx {
    /// Next received byte, `None` if nothing is waiting. Never blocks.
    fn read_byte(&mut self) -> Option<u8>;
}

/// [`LinkRx`] over an in-memory byte slice (simulator, tests).
pub struct BufferRx<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BufferRx<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bytes not yet read
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }
}

impl LinkRx for BufferRx<'_> {
    fn read_byte(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }
}

impl<T: InputPort + ?Sized> InputPort for &mut T {
    fn read(&mut self, index: usize) -> bool {
        (**self).read(index)
    }
}

impl<T: OutputPort + ?Sized> OutputPort for &mut T {
    fn write(&mut self, index: usize, level: bool) {
        (**self).write(index, level)
    }

    fn write_errors(&self) -> u32 {
        (**self).write_errors()
    }
}
