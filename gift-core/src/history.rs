use std::collections::VecDeque;

/// Number of snapshots an invoice session keeps for undo.
pub const HISTORY_CAPACITY: usize = 20;

/// Bounded undo stack. Pushing onto a full history drops the oldest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> History<T> {
    /// Creates an empty history. A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(
        &mut self,
        entry: T,
    ) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Removes and returns the most recent entry.
    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn pops_in_reverse_push_order() {
        let mut history = History::default();
        history.push(1);
        history.push(2);

        assert_eq!(history.pop(), Some(2));
        assert_eq!(history.pop(), Some(1));
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn full_history_drops_oldest() {
        let mut history = History::default();
        for i in 0..25 {
            history.push(i);
        }

        assert_eq!(history.len(), HISTORY_CAPACITY);

        let mut popped = Vec::new();
        while let Some(entry) = history.pop() {
            popped.push(entry);
        }
        assert_eq!(popped.first(), Some(&24));
        assert_eq!(popped.last(), Some(&5));
    }

    #[test]
    fn zero_capacity_keeps_one_entry() {
        let mut history = History::with_capacity(0);
        history.push("a");
        history.push("b");

        assert_eq!(history.capacity(), 1);
        assert_eq!(history.pop(), Some("b"));
        assert!(history.is_empty());
    }
}
