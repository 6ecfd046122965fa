//! Module: signals
//!
//! Purpose: Compact bit-set types for the digital lines the bridge sees.
//! [`InputVector`] holds one reading per input line (`I1`..`I8`),
//! [`OutputLevels`] the levels last driven on the output lines (`O1`..`O6`).
//!
//! Both are single bytes. Indices in this module are 0-based; the
//! 1-based user syntax is translated at the protocol/tokenizer boundary.
//!
//! Safety: Safe. No unsafe blocks. Copy types only.

use crate::hal::InputPort;

/// Number of digital input lines.
pub const INPUT_COUNT: usize = 8;

/// Number of digital output lines (and output slots).
pub const OUTPUT_COUNT: usize = 6;

/// Current boolean readings of all input lines
///
/// Bit layout:
/// - Bit 0: `I1`
/// - ...
/// - Bit 7: `I8`
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputVector(u8);

impl InputVector {
    /// All inputs low
    pub const LOW: Self = Self(0);

    /// All inputs high
    pub const HIGH: Self = Self(0xFF);

    /// Create input vector from raw byte (bit 0 = `I1`)
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Get raw bits value
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Reading of input `index` (0-based). Out-of-range reads are low.
    pub const fn get(&self, index: usize) -> bool {
        index < INPUT_COUNT && (self.0 >> index) & 1 != 0
    }

    /// Set reading of input `index` (0-based). Out-of-range writes are ignored.
    pub fn set(&mut self, index: usize, level: bool) {
        if index >= INPUT_COUNT {
            return;
        }
        if level {
            self.0 |= 1 << index;
        } else {
            self.0 &= !(1 << index);
        }
    }

    /// Builder-style [`InputVector::set`]
    pub fn with(mut self, index: usize, level: bool) -> Self {
        self.set(index, level);
        self
    }

    /// Read every input line from hardware, in index order.
    pub fn sample(port: &mut impl InputPort) -> Self {
        let mut inputs = Self::LOW;
        for index in 0..INPUT_COUNT {
            inputs.set(index, port.read(index));
        }
        inputs
    }

    /// Parse a bit string such as `"10100000"` (first char = `I1`).
    ///
    /// Returns `None` on any character other than `0`/`1` or more than
    /// [`INPUT_COUNT`] characters. Missing trailing inputs are low.
    pub fn parse(text: &str) -> Option<Self> {
        if text.len() > INPUT_COUNT {
            return None;
        }
        let mut inputs = Self::LOW;
        for (index, c) in text.bytes().enumerate() {
            match c {
                b'0' => {}
                b'1' => inputs.set(index, true),
                _ => return None,
            }
        }
        Some(inputs)
    }
}

/// Levels currently driven on the output lines
///
/// Bit 0 = `O1` ... bit 5 = `O6`. Bits 6-7 always zero.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutputLevels(u8);

impl OutputLevels {
    const MASK: u8 = (1 << OUTPUT_COUNT) - 1;

    /// All outputs low (power-on state)
    pub const LOW: Self = Self(0);

    /// Create from raw bits; bits above `O6` are discarded
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    /// Get raw bits value
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Level of output `index` (0-based)
    pub const fn get(&self, index: usize) -> bool {
        index < OUTPUT_COUNT && (self.0 >> index) & 1 != 0
    }

    /// Record level of output `index` (0-based)
    pub fn set(&mut self, index: usize, level: bool) {
        if index >= OUTPUT_COUNT {
            return;
        }
        if level {
            self.0 |= 1 << index;
        } else {
            self.0 &= !(1 << index);
        }
    }

    /// Check if every output is low
    pub const fn is_low(&self) -> bool {
        self.0 == 0
    }
}

impl core::fmt::Display for OutputLevels {
    /// `O1=0 O2=1 ...`
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for index in 0..OUTPUT_COUNT {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "O{}={}", index + 1, self.get(index) as u8)?;
        }
        Ok(())
    }
}
