//! Command protocol error types

/// Reason a sub-command was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// E01: No `=` in the sub-command
    MissingEquals,
    /// E02: Target does not start with the output prefix `O`
    BadPrefix,
    /// E03: Output index is empty or not a number
    BadIndex,
    /// E04: Output index outside 1..=6
    OutOfRange,
}

impl CommandError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingEquals => "E01",
            Self::BadPrefix => "E02",
            Self::BadIndex => "E03",
            Self::OutOfRange => "E04",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingEquals => "missing '='",
            Self::BadPrefix => "expected output 'O<n>'",
            Self::BadIndex => "invalid output index",
            Self::OutOfRange => "output out of range",
        }
    }
}

impl core::fmt::Display for CommandError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}
