//! Evaluation fault bookkeeping.
//!
//! A malformed expression never stops the loop: its output is driven low
//! and the failure is recorded here, per slot. The host is not told; the
//! counters exist for logs and diagnostics.

use crate::expr::EvalError;
use crate::signals::OUTPUT_COUNT;

/// Fault codes, one per [`EvalError`] kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum FaultCode {
    /// No fault (last evaluation succeeded or slot empty).
    None = 0,
    InvalidCharacter = 1,
    StackUnderflow = 2,
    StackOverflow = 3,
    UnbalancedParen = 4,
    MissingOperand = 5,
    MissingOperator = 6,
}

impl From<EvalError> for FaultCode {
    fn from(e: EvalError) -> Self {
        match e {
            EvalError::InvalidCharacter(_) => FaultCode::InvalidCharacter,
            EvalError::StackUnderflow => FaultCode::StackUnderflow,
            EvalError::StackOverflow => FaultCode::StackOverflow,
            EvalError::UnbalancedParen => FaultCode::UnbalancedParen,
            EvalError::MissingOperand => FaultCode::MissingOperand,
            EvalError::MissingOperator => FaultCode::MissingOperator,
        }
    }
}

/// Per-slot evaluation fault state.
#[derive(Clone, Debug)]
pub struct FaultState {
    /// Code of the most recent evaluation per slot.
    codes: [FaultCode; OUTPUT_COUNT],

    /// Total failed evaluations since boot (never cleared).
    count: u32,
}

impl FaultState {
    /// Create new fault state (no fault).
    pub const fn new() -> Self {
        Self {
            codes: [FaultCode::None; OUTPUT_COUNT],
            count: 0,
        }
    }

    /// Record the outcome of evaluating `slot`.
    ///
    /// Returns `true` when the slot's code changed, so callers can log
    /// transitions instead of every tick.
    pub fn record(&mut self, slot: usize, outcome: Result<bool, EvalError>) -> bool {
        let code = match outcome {
            Ok(_) => FaultCode::None,
            Err(e) => {
                self.count = self.count.wrapping_add(1);
                FaultCode::from(e)
            }
        };

        match self.codes.get_mut(slot) {
            Some(current) if *current != code => {
                *current = code;
                true
            }
            _ => false,
        }
    }

    /// Forget the per-slot codes (slots were reassigned).
    ///
    /// Note: This does NOT reset the counter.
    pub fn clear(&mut self) {
        self.codes = [FaultCode::None; OUTPUT_COUNT];
    }

    /// Current code of `slot`.
    pub fn code(&self, slot: usize) -> FaultCode {
        self.codes.get(slot).copied().unwrap_or(FaultCode::None)
    }

    /// Check if any slot is currently faulted.
    pub fn is_active(&self) -> bool {
        self.codes.iter().any(|c| *c != FaultCode::None)
    }

    /// Get total fault count since boot.
    pub fn count(&self) -> u32 {
        self.count
    }
}

impl Default for FaultState {
    fn default() -> Self {
        Self::new()
    }
}
