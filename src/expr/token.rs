//! Tokenizer with input substitution.
//!
//! Scans raw expression text and yields primitive tokens, replacing input
//! references by the current reading as it goes:
//!
//! ```text
//! "!I1 & (I2 | 0)"  with I1=0, I2=1
//!   → 1 & ( 1 | 0 )
//! ```
//!
//! Whitespace is ignored everywhere, also inside a reference (`! I 1`).
//! A reference consumes exactly one digit, so `I12` is `I1` followed by a
//! stray `2`.

use core::iter::{Filter, Peekable};
use core::str::Bytes;

use super::EvalError;
use crate::signals::{InputVector, INPUT_COUNT};

/// Boolean operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// `!` (unary)
    Not,
    /// `&`
    And,
    /// `^`
    Xor,
    /// `|`
    Or,
}

impl Op {
    /// Binding strength, higher binds tighter.
    #[inline]
    pub const fn precedence(self) -> u8 {
        match self {
            Op::Not => 4,
            Op::And => 3,
            Op::Xor => 2,
            Op::Or => 1,
        }
    }

    /// Operator for a source character
    pub const fn from_byte(c: u8) -> Option<Self> {
        match c {
            b'!' => Some(Op::Not),
            b'&' => Some(Op::And),
            b'^' => Some(Op::Xor),
            b'|' => Some(Op::Or),
            _ => None,
        }
    }

    /// Source character for this operator
    pub const fn as_char(self) -> char {
        match self {
            Op::Not => '!',
            Op::And => '&',
            Op::Xor => '^',
            Op::Or => '|',
        }
    }
}

/// Primitive token after substitution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// `0` / `1`, or a substituted input reading
    Literal(bool),
    /// `(`
    Open,
    /// `)`
    Close,
    Op(Op),
}

fn not_whitespace(c: &u8) -> bool {
    !c.is_ascii_whitespace()
}

type Chars<'a> = Peekable<Filter<Bytes<'a>, fn(&u8) -> bool>>;

/// Token stream over one expression.
///
/// Yields `Err` for a character outside the alphabet; callers stop there.
pub struct Tokens<'a> {
    chars: Chars<'a>,
    inputs: InputVector,
}

impl<'a> Tokens<'a> {
    /// Tokenize `expr`, substituting references from `inputs`
    pub fn new(expr: &'a str, inputs: InputVector) -> Self {
        let filter: fn(&u8) -> bool = not_whitespace;
        Self {
            chars: expr.bytes().filter(filter).peekable(),
            inputs,
        }
    }

    /// Consume the digit after `I` and look the reading up.
    fn reference(&mut self) -> Result<bool, EvalError> {
        match self.chars.peek().copied() {
            Some(d @ b'1'..=b'8') => {
                self.chars.next();
                let index = (d - b'1') as usize;
                debug_assert!(index < INPUT_COUNT);
                Ok(self.inputs.get(index))
            }
            _ => Err(EvalError::InvalidCharacter(b'I')),
        }
    }
}

impl Iterator for Tokens<'_> {
    type Item = Result<Token, EvalError>;

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.chars.next()?;

        let token = match c {
            b'0' => Token::Literal(false),
            b'1' => Token::Literal(true),
            b'(' => Token::Open,
            b')' => Token::Close,
            b'I' => return Some(self.reference().map(Token::Literal)),
            b'!' if self.chars.peek() == Some(&b'I') => {
                self.chars.next();
                return Some(self.reference().map(|v| Token::Literal(!v)));
            }
            _ => match Op::from_byte(c) {
                Some(op) => Token::Op(op),
                None => return Some(Err(EvalError::InvalidCharacter(c))),
            },
        };

        Some(Ok(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(expr: &str, inputs: InputVector) -> Vec<Result<Token, EvalError>> {
        Tokens::new(expr, inputs).collect()
    }

    #[test]
    fn test_precedence_order() {
        assert!(Op::Not.precedence() > Op::And.precedence());
        assert!(Op::And.precedence() > Op::Xor.precedence());
        assert!(Op::Xor.precedence() > Op::Or.precedence());
    }

    #[test]
    fn test_op_char_mapping() {
        for op in [Op::Not, Op::And, Op::Xor, Op::Or] {
            assert_eq!(Op::from_byte(op.as_char() as u8), Some(op));
        }
    }

    #[test]
    fn test_literals_and_brackets() {
        let tokens = collect("(1&0)", InputVector::LOW);
        assert_eq!(
            tokens,
            vec![
                Ok(Token::Open),
                Ok(Token::Literal(true)),
                Ok(Token::Op(Op::And)),
                Ok(Token::Literal(false)),
                Ok(Token::Close),
            ]
        );
    }

    #[test]
    fn test_whitespace_inside_reference() {
        let inputs = InputVector::LOW.with(0, true);
        assert_eq!(collect(" I 1 ", inputs), vec![Ok(Token::Literal(true))]);
        assert_eq!(collect("! I1", inputs), vec![Ok(Token::Literal(false))]);
    }

    #[test]
    fn test_multi_digit_reference_splits() {
        let inputs = InputVector::LOW.with(0, true);
        let tokens = collect("I12", inputs);
        assert_eq!(tokens[0], Ok(Token::Literal(true)));
        assert_eq!(tokens[1], Err(EvalError::InvalidCharacter(b'2')));
    }

    #[test]
    fn test_reference_out_of_range() {
        assert_eq!(
            collect("I9", InputVector::HIGH)[0],
            Err(EvalError::InvalidCharacter(b'I'))
        );
        assert_eq!(
            collect("I0", InputVector::HIGH)[0],
            Err(EvalError::InvalidCharacter(b'I'))
        );
    }

    #[test]
    fn test_negation_not_followed_by_reference() {
        let tokens = collect("!(1)", InputVector::LOW);
        assert_eq!(tokens[0], Ok(Token::Op(Op::Not)));
        assert_eq!(tokens[1], Ok(Token::Open));
    }
}
