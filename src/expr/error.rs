//! Expression evaluation error types

/// Why an expression could not be evaluated.
///
/// Every variant maps to the default result `false` in the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    /// X01: Character outside the expression alphabet
    InvalidCharacter(u8),
    /// X02: Operator applied with too few values on the stack
    StackUnderflow,
    /// X03: Value or operator stack capacity exceeded
    StackOverflow,
    /// X04: `)` without `(`, or `(` never closed
    UnbalancedParen,
    /// X05: Expression produced no value
    MissingOperand,
    /// X06: Values left over with no operator between them
    MissingOperator,
}

impl EvalError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCharacter(_) => "X01",
            Self::StackUnderflow => "X02",
            Self::StackOverflow => "X03",
            Self::UnbalancedParen => "X04",
            Self::MissingOperand => "X05",
            Self::MissingOperator => "X06",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidCharacter(_) => "invalid character",
            Self::StackUnderflow => "stack underflow",
            Self::StackOverflow => "stack overflow",
            Self::UnbalancedParen => "unbalanced parenthesis",
            Self::MissingOperand => "missing operand",
            Self::MissingOperator => "missing operator",
        }
    }
}

impl core::fmt::Display for EvalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidCharacter(c) if c.is_ascii_graphic() => {
                write!(f, "{}: {} '{}'", self.code(), self.message(), *c as char)
            }
            Self::InvalidCharacter(c) => {
                write!(f, "{}: {} 0x{:02X}", self.code(), self.message(), c)
            }
            _ => write!(f, "{}: {}", self.code(), self.message()),
        }
    }
}
