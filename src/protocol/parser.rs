//! Command line parser
//!
//! A line is `assignment (';' assignment)*` with `assignment = O<n>=<expr>`.
//! Every sub-command parses independently; a bad one never affects the
//! others.

use super::CommandError;
use crate::signals::OUTPUT_COUNT;

/// Output prefix letter
pub const OUTPUT_PREFIX: char = 'O';

/// Sub-command separator
pub const SEPARATOR: char = ';';

/// One `O<n>=<expr>` assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment<'a> {
    /// Output slot (0-based)
    pub slot: usize,
    /// Expression text after `=`, verbatim
    pub expr: &'a str,
}

/// Parse a single sub-command (already split on `;`).
///
/// Surrounding whitespace is trimmed; the expression itself is kept
/// verbatim.
pub fn parse_assignment(sub: &str) -> Result<Assignment<'_>, CommandError> {
    let sub = sub.trim();
    let (target, expr) = sub.split_once('=').ok_or(CommandError::MissingEquals)?;

    let digits = target
        .strip_prefix(OUTPUT_PREFIX)
        .ok_or(CommandError::BadPrefix)?
        .trim();

    if digits.is_empty() || !digits.bytes().all(|c| c.is_ascii_digit()) {
        return Err(CommandError::BadIndex);
    }

    // Long digit strings overflow u16 and are out of range either way.
    let number: u16 = digits.parse().map_err(|_| CommandError::OutOfRange)?;
    if number == 0 || number as usize > OUTPUT_COUNT {
        return Err(CommandError::OutOfRange);
    }

    Ok(Assignment {
        slot: number as usize - 1,
        expr,
    })
}

/// Parsed sub-command: its source text and the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubCommand<'a> {
    pub text: &'a str,
    pub result: Result<Assignment<'a>, CommandError>,
}

/// Iterator over the sub-commands of a line. Blank sub-commands are skipped.
pub struct SubCommands<'a> {
    parts: core::str::Split<'a, char>,
}

impl<'a> Iterator for SubCommands<'a> {
    type Item = SubCommand<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = self.parts.next()?.trim();
            if text.is_empty() {
                continue;
            }
            return Some(SubCommand {
                text,
                result: parse_assignment(text),
            });
        }
    }
}

/// Split a command line into sub-commands
pub fn parse_line(line: &str) -> SubCommands<'_> {
    SubCommands {
        parts: line.split(SEPARATOR),
    }
}
