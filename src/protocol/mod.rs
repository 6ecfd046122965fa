//! Host link command protocol
//!
//! Newline-delimited text, `O<n>=<expr>` assignments separated by `;`.
//! Zero heap allocation - all static buffers.

pub mod error;
pub mod line_buffer;
pub mod link;
pub mod parser;

pub use error::CommandError;
pub use line_buffer::{LineBuffer, LINE_SIZE};
pub use link::{Feed, LinkReader};
pub use parser::{parse_assignment, parse_line, Assignment, SubCommand, SubCommands};
