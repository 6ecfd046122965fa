//! Boolean expression engine
//!
//! Zero heap allocation. Expressions are kept as text and re-scanned on
//! every evaluation; substitution bakes the current input readings into the
//! token stream.

pub mod error;
pub mod eval;
pub mod stack;
pub mod token;

pub use error::EvalError;
pub use eval::{evaluate, evaluate_or_low, evaluate_tokens};
pub use stack::{BoundedStack, STACK_CAPACITY};
pub use token::{Op, Token, Tokens};
