//! Checked fixed-capacity stack.
//!
//! Thin wrapper over `heapless::Vec` that turns overflow and underflow into
//! [`EvalError`]s instead of panics.

use heapless::Vec;

use super::EvalError;

/// Capacity of each evaluation stack.
pub const STACK_CAPACITY: usize = 64;

/// Bounded stack, capacity `N`.
pub struct BoundedStack<T, const N: usize = STACK_CAPACITY> {
    items: Vec<T, N>,
}

impl<T: Copy, const N: usize> BoundedStack<T, N> {
    /// Create empty stack
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Push, or [`EvalError::StackOverflow`] when full
    #[inline]
    pub fn push(&mut self, item: T) -> Result<(), EvalError> {
        self.items.push(item).map_err(|_| EvalError::StackOverflow)
    }

    /// Pop, or [`EvalError::StackUnderflow`] when empty
    #[inline]
    pub fn pop(&mut self) -> Result<T, EvalError> {
        self.items.pop().ok_or(EvalError::StackUnderflow)
    }

    /// Top item without removing it
    #[inline]
    pub fn peek(&self) -> Option<T> {
        self.items.last().copied()
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Copy, const N: usize> Default for BoundedStack<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_order() {
        let mut stack = BoundedStack::<u8, 4>::new();
        stack.push(1).unwrap();
        stack.push(2).unwrap();

        assert_eq!(stack.peek(), Some(2));
        assert_eq!(stack.pop(), Ok(2));
        assert_eq!(stack.pop(), Ok(1));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_underflow() {
        let mut stack = BoundedStack::<bool, 4>::new();
        assert_eq!(stack.pop(), Err(EvalError::StackUnderflow));
    }

    #[test]
    fn test_overflow() {
        let mut stack = BoundedStack::<bool, 2>::new();
        stack.push(true).unwrap();
        stack.push(true).unwrap();

        assert_eq!(stack.push(false), Err(EvalError::StackOverflow));
        assert_eq!(stack.len(), 2);
    }
}
