//! Output slot table.
//!
//! Six slots, each empty or owning the raw text of one expression. Slot
//! capacity equals the link line capacity, so any expression that arrived in
//! a line fits.

use heapless::String;

use crate::protocol::LINE_SIZE;
use crate::signals::OUTPUT_COUNT;

/// Expression text owned by a slot
pub type ExprText = String<LINE_SIZE>;

/// Fixed table of output slots, indexed 0-based.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlotTable {
    slots: [Option<ExprText>; OUTPUT_COUNT],
}

impl SlotTable {
    /// Create table with every slot empty
    pub const fn new() -> Self {
        Self {
            slots: [None, None, None, None, None, None],
        }
    }

    /// Empty every slot
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
    }

    /// Store `expr` in slot `index`, replacing what was there.
    ///
    /// Returns `false` (slot untouched) if `index` is out of range or the
    /// text does not fit.
    pub fn assign(&mut self, index: usize, expr: &str) -> bool {
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        let mut text = ExprText::new();
        if text.push_str(expr).is_err() {
            return false;
        }
        *slot = Some(text);
        true
    }

    /// Expression in slot `index`, if any
    pub fn get(&self, index: usize) -> Option<&str> {
        self.slots.get(index)?.as_deref()
    }

    /// Check if slot `index` holds an expression
    pub fn is_assigned(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Number of non-empty slots
    pub fn assigned(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// `(index, expression)` for every slot
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<&str>)> + '_ {
        self.slots.iter().enumerate().map(|(i, s)| (i, s.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_is_empty() {
        let table = SlotTable::new();
        assert_eq!(table.assigned(), 0);
        assert!(table.iter().all(|(_, e)| e.is_none()));
    }

    #[test]
    fn test_assign_and_clear() {
        let mut table = SlotTable::new();
        assert!(table.assign(0, "I1&I2"));
        assert!(table.assign(5, "1"));

        assert_eq!(table.get(0), Some("I1&I2"));
        assert_eq!(table.get(5), Some("1"));
        assert_eq!(table.assigned(), 2);

        table.clear();
        assert_eq!(table.assigned(), 0);
    }

    #[test]
    fn test_assign_out_of_range() {
        let mut table = SlotTable::new();
        assert!(!table.assign(6, "1"));
        assert_eq!(table.assigned(), 0);
    }

    #[test]
    fn test_assign_too_long() {
        let mut table = SlotTable::new();
        let long = "1".repeat(LINE_SIZE + 1);
        assert!(!table.assign(0, &long));
        assert!(!table.is_assigned(0));
    }

    #[test]
    fn test_reassign_overwrites() {
        let mut table = SlotTable::new();
        table.assign(2, "1");
        table.assign(2, "0");
        assert_eq!(table.get(2), Some("0"));
    }
}
