//! Expression evaluator tests: precedence, substitution, malformed input

use rust_logic_bridge::expr::{evaluate, evaluate_or_low, EvalError, STACK_CAPACITY};
use rust_logic_bridge::signals::InputVector;

fn eval(expr: &str) -> Result<bool, EvalError> {
    evaluate(expr, InputVector::LOW)
}

fn inputs(bits: &str) -> InputVector {
    InputVector::parse(bits).unwrap()
}

// ============================================================================
// Precedence and associativity
// ============================================================================

#[test]
fn test_and_binds_tighter_than_or() {
    assert_eq!(eval("1|1&0"), Ok(true));
    assert_eq!(eval("0&1|1"), Ok(true));
    assert_eq!(eval("0|1&0"), Ok(false));
}

#[test]
fn test_xor_between_and_and_or() {
    // 1 ^ (1 & 0) = 1
    assert_eq!(eval("1^1&0"), Ok(true));
    // (1 ^ 1) | 1 = 1
    assert_eq!(eval("1^1|1"), Ok(true));
    // 0 | (1 ^ 1) = 0
    assert_eq!(eval("0|1^1"), Ok(false));
}

#[test]
fn test_not_binds_tightest() {
    assert_eq!(eval("!1&0"), Ok(false));
    assert_eq!(eval("!0&1"), Ok(true));
    assert_eq!(eval("1&!0"), Ok(true));
    assert_eq!(eval("!0^1"), Ok(false));
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(eval("(1|0)&0"), Ok(false));
    assert_eq!(eval("1|(1&0)"), Ok(true));
    assert_eq!(eval("!(1&0)"), Ok(true));
    assert_eq!(eval("((((1))))"), Ok(true));
}

#[test]
fn test_equal_precedence_left_to_right() {
    // (1 ^ 1) ^ 1 = 1
    assert_eq!(eval("1^1^1"), Ok(true));
    assert_eq!(eval("1&1&0"), Ok(false));
}

#[test]
fn test_long_flat_chain_stays_within_stacks() {
    let mut expr = String::from("0");
    for _ in 0..(STACK_CAPACITY * 2) {
        expr.push_str("|0");
    }
    expr.push_str("|1");
    assert_eq!(eval(&expr), Ok(true));
}

// ============================================================================
// Input substitution
// ============================================================================

#[test]
fn test_input_references() {
    let v = inputs("10000001");
    assert_eq!(evaluate("I1", v), Ok(true));
    assert_eq!(evaluate("I2", v), Ok(false));
    assert_eq!(evaluate("I8", v), Ok(true));
    assert_eq!(evaluate("I1&I8", v), Ok(true));
    assert_eq!(evaluate("I1&I2", v), Ok(false));
}

#[test]
fn test_negated_reference() {
    assert_eq!(evaluate("!I1", inputs("0")), Ok(true));
    assert_eq!(evaluate("!I1", inputs("1")), Ok(false));
    assert_eq!(evaluate("!I2&I1", inputs("10")), Ok(true));
}

#[test]
fn test_whitespace_ignored() {
    let v = inputs("10");
    assert_eq!(evaluate(" I1 & ! I2 ", v), Ok(true));
    assert_eq!(evaluate("( 1 |\t0 )", v), Ok(true));
}

#[test]
fn test_reference_out_of_range() {
    assert_eq!(eval("I9"), Err(EvalError::InvalidCharacter(b'I')));
    assert_eq!(eval("I0"), Err(EvalError::InvalidCharacter(b'I')));
    assert_eq!(eval("I"), Err(EvalError::InvalidCharacter(b'I')));
}

#[test]
fn test_reference_takes_one_digit() {
    // I12 reads as I1 followed by a stray '2'
    assert_eq!(eval("I12"), Err(EvalError::InvalidCharacter(b'2')));
}

// ============================================================================
// Malformed expressions
// ============================================================================

#[test]
fn test_invalid_characters() {
    assert_eq!(eval("1+0"), Err(EvalError::InvalidCharacter(b'+')));
    assert_eq!(eval("i1"), Err(EvalError::InvalidCharacter(b'i')));
    assert_eq!(eval("1=1"), Err(EvalError::InvalidCharacter(b'=')));
}

#[test]
fn test_empty_expression() {
    assert_eq!(eval(""), Err(EvalError::MissingOperand));
    assert_eq!(eval("   "), Err(EvalError::MissingOperand));
    assert_eq!(eval("()"), Err(EvalError::MissingOperand));
}

#[test]
fn test_dangling_operators() {
    assert_eq!(eval("1&"), Err(EvalError::StackUnderflow));
    assert_eq!(eval("&1"), Err(EvalError::StackUnderflow));
    assert_eq!(eval("!"), Err(EvalError::StackUnderflow));
    assert_eq!(eval("!!1"), Err(EvalError::StackUnderflow));
}

#[test]
fn test_missing_operator() {
    assert_eq!(eval("10"), Err(EvalError::MissingOperator));
    assert_eq!(eval("(1)(0)"), Err(EvalError::MissingOperator));
}

#[test]
fn test_unbalanced_parentheses() {
    assert_eq!(eval("(1"), Err(EvalError::UnbalancedParen));
    assert_eq!(eval("1)"), Err(EvalError::UnbalancedParen));
    assert_eq!(eval("(1&(0)"), Err(EvalError::UnbalancedParen));
}

#[test]
fn test_nesting_beyond_capacity_overflows() {
    let expr = "(".repeat(STACK_CAPACITY + 1);
    assert_eq!(eval(&expr), Err(EvalError::StackOverflow));
}

#[test]
fn test_too_many_values_overflows() {
    let expr = "1".repeat(STACK_CAPACITY + 1);
    assert_eq!(eval(&expr), Err(EvalError::StackOverflow));
}

#[test]
fn test_malformed_evaluates_low() {
    for expr in ["", "1&", "(1", "1)", "x", "!!1", "I9"] {
        assert!(!evaluate_or_low(expr, inputs("11111111")), "{:?}", expr);
    }
    assert!(evaluate_or_low("I1", inputs("1")));
}

#[test]
fn test_error_display_has_code() {
    assert_eq!(EvalError::UnbalancedParen.to_string(), "X04: unbalanced parenthesis");
}
