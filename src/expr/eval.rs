//! Operator-precedence evaluator.
//!
//! Shunting-yard over a token stream with two bounded stacks: values and
//! pending operators. Operators are applied as soon as an incoming operator
//! does not bind tighter, so equal precedence resolves left to right.
//!
//! Pure logic, no hardware dependencies. Total: every input, well-formed or
//! not, ends in `Ok(bool)` or an [`EvalError`], never a panic.

use super::stack::BoundedStack;
use super::token::{Op, Token, Tokens};
use super::EvalError;
use crate::signals::InputVector;

/// Entry on the operator stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pending {
    Open,
    Op(Op),
}

/// Evaluation state for one expression.
struct Evaluator {
    values: BoundedStack<bool>,
    ops: BoundedStack<Pending>,
}

impl Evaluator {
    const fn new() -> Self {
        Self {
            values: BoundedStack::new(),
            ops: BoundedStack::new(),
        }
    }

    fn apply(&mut self, op: Op) -> Result<(), EvalError> {
        let b = self.values.pop()?;
        let result = match op {
            Op::Not => !b,
            Op::And => self.values.pop()? & b,
            Op::Xor => self.values.pop()? ^ b,
            Op::Or => self.values.pop()? | b,
        };
        self.values.push(result)
    }

    fn feed(&mut self, token: Token) -> Result<(), EvalError> {
        match token {
            Token::Literal(v) => self.values.push(v),
            Token::Open => self.ops.push(Pending::Open),
            Token::Close => loop {
                match self.ops.pop() {
                    Ok(Pending::Open) => return Ok(()),
                    Ok(Pending::Op(op)) => self.apply(op)?,
                    Err(_) => return Err(EvalError::UnbalancedParen),
                }
            },
            Token::Op(incoming) => {
                while let Some(Pending::Op(top)) = self.ops.peek() {
                    if top.precedence() < incoming.precedence() {
                        break;
                    }
                    self.ops.pop()?;
                    self.apply(top)?;
                }
                self.ops.push(Pending::Op(incoming))
            }
        }
    }

    fn finish(mut self) -> Result<bool, EvalError> {
        while let Ok(pending) = self.ops.pop() {
            match pending {
                Pending::Op(op) => self.apply(op)?,
                Pending::Open => return Err(EvalError::UnbalancedParen),
            }
        }

        match self.values.len() {
            0 => Err(EvalError::MissingOperand),
            1 => self.values.pop(),
            _ => Err(EvalError::MissingOperator),
        }
    }
}

/// Evaluate an already substituted token stream.
pub fn evaluate_tokens<I>(tokens: I) -> Result<bool, EvalError>
where
    I: IntoIterator<Item = Result<Token, EvalError>>,
{
    let mut eval = Evaluator::new();
    for token in tokens {
        eval.feed(token?)?;
    }
    eval.finish()
}

/// Tokenize `expr` against `inputs` and evaluate it.
///
/// # Example
///
/// ```
/// use rust_logic_bridge::expr::evaluate;
/// use rust_logic_bridge::signals::InputVector;
///
/// let inputs = InputVector::LOW.with(0, true);
/// assert_eq!(evaluate("I1 & !I2", inputs), Ok(true));
/// assert_eq!(evaluate("1|1&0", inputs), Ok(true));
/// ```
pub fn evaluate(expr: &str, inputs: InputVector) -> Result<bool, EvalError> {
    evaluate_tokens(Tokens::new(expr, inputs))
}

/// [`evaluate`] with malformed expressions mapped to `false`.
#[inline]
pub fn evaluate_or_low(expr: &str, inputs: InputVector) -> bool {
    evaluate(expr, inputs).unwrap_or(false)
}
