//! Render-time list numbering
//!
//! Every list renders as decimal. Counters are keyed by Word list id and
//! nesting level and live for a single render pass.

use std::collections::HashMap;

/// Counters for each (list id, level) combination
pub(crate) type NumberingCounters = HashMap<(u32, u32), u32>;

#[derive(Debug, Default)]
pub struct ListCounters {
    counters: NumberingCounters,
}

impl ListCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the counter for `list_id` at `level` and return its new value
    pub fn next(&mut self, list_id: u32, level: u32) -> u32 {
        let value = {
            let counter = self.counters.entry((list_id, level)).or_insert(0);
            *counter += 1;
            *counter
        };

        // Going back up a level restarts every deeper level of the same list
        self.reset_deeper_levels(list_id, level);
        value
    }

    /// Forget every level of one list
    pub fn reset_list(&mut self, list_id: u32) {
        self.counters.retain(|&(id, _), _| id != list_id);
    }

    /// Forget every list
    pub fn clear(&mut self) {
        self.counters.clear();
    }

    fn reset_deeper_levels(&mut self, list_id: u32, current_level: u32) {
        self.counters
            .retain(|&(id, level), _| id != list_id || level <= current_level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_numbering() {
        let mut counters = ListCounters::new();
        let numbers: Vec<u32> = (0..5).map(|_| counters.next(5, 0)).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_lists_count_independently() {
        let mut counters = ListCounters::new();
        assert_eq!(counters.next(1, 0), 1);
        assert_eq!(counters.next(2, 0), 1);
        assert_eq!(counters.next(1, 0), 2);
        assert_eq!(counters.next(2, 0), 2);
    }

    #[test]
    fn test_shallower_level_resets_deeper_levels() {
        let mut counters = ListCounters::new();
        assert_eq!(counters.next(3, 0), 1);
        assert_eq!(counters.next(3, 1), 1);
        assert_eq!(counters.next(3, 1), 2);
        assert_eq!(counters.next(3, 2), 1);
        assert_eq!(counters.next(3, 0), 2);
        assert_eq!(counters.next(3, 1), 1);
        assert_eq!(counters.next(3, 2), 1);
    }

    #[test]
    fn test_deeper_level_keeps_shallower_counters() {
        let mut counters = ListCounters::new();
        counters.next(3, 0);
        counters.next(3, 1);
        assert_eq!(counters.next(3, 0), 2);
    }

    #[test]
    fn test_reset_list_only_touches_that_list() {
        let mut counters = ListCounters::new();
        counters.next(1, 0);
        counters.next(1, 1);
        counters.next(2, 0);

        counters.reset_list(1);
        assert_eq!(counters.next(2, 0), 2);
        assert_eq!(counters.next(1, 1), 1);
        assert_eq!(counters.next(1, 0), 1);

        counters.clear();
        assert_eq!(counters.next(2, 0), 1);
    }
}
