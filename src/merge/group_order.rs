//! Per-group member order and the relative-insertion cursor

use std::collections::HashMap;

/// Ordered list of entry keys belonging to one group.
///
/// `index` maps every member to its slot in `keys`, so membership and
/// position lookups are constant time; only insertions and removals shift.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupOrder {
    keys: Vec<String>,
    index: HashMap<String, usize>,
}

impl GroupOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Current position of a key
    pub fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Insert a key at `index`, shifting later members back
    pub fn insert_at(&mut self, index: usize, key: &str) {
        debug_assert!(!self.contains(key), "key already in group: {}", key);
        let index = index.min(self.keys.len());
        self.keys.insert(index, key.to_string());
        self.reindex_from(index);
    }

    /// Append a key at the end
    pub fn push(&mut self, key: &str) {
        if !self.contains(key) {
            self.index.insert(key.to_string(), self.keys.len());
            self.keys.push(key.to_string());
        }
    }

    /// Remove a key, returning whether it was present
    pub fn remove(&mut self, key: &str) -> bool {
        let Some(position) = self.index.remove(key) else {
            return false;
        };
        self.keys.remove(position);
        self.reindex_from(position);
        true
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Stable sort of the member keys
    pub fn sort_by_key<K, F>(&mut self, f: F)
    where
        K: Ord,
        F: FnMut(&String) -> K,
    {
        self.keys.sort_by_key(f);
        self.reindex_from(0);
    }

    fn reindex_from(&mut self, start: usize) {
        for (offset, key) in self.keys[start..].iter().enumerate() {
            match self.index.get_mut(key) {
                Some(slot) => *slot = start + offset,
                None => {
                    self.index.insert(key.clone(), start + offset);
                }
            }
        }
    }
}

/// Where a visited key ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Already a member at this position
    Existing(usize),

    /// Newly inserted at this position
    Inserted(usize),
}

/// Relative-insertion cursor for one group within one document.
///
/// Tracks the position of the last key from the current document that was
/// already a member. New keys go immediately after it, so entries a later
/// document introduces land next to their neighbours instead of at the end.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionCursor {
    last_known: Option<usize>,
}

impl InsertionCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visit the next key of the document in encounter order
    pub fn place(&mut self, order: &mut GroupOrder, key: &str) -> Placement {
        if let Some(position) = order.position(key) {
            self.last_known = Some(position);
            return Placement::Existing(position);
        }

        let index = self.last_known.map_or(0, |i| i + 1);
        order.insert_at(index, key);
        self.last_known = Some(index);
        Placement::Inserted(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_of(keys: &[&str]) -> GroupOrder {
        let mut order = GroupOrder::new();
        for key in keys {
            order.push(key);
        }
        order
    }

    #[test]
    fn test_relative_insertion() {
        let mut order = order_of(&["A", "B", "C"]);
        let mut cursor = InsertionCursor::new();

        assert_eq!(cursor.place(&mut order, "A"), Placement::Existing(0));
        assert_eq!(cursor.place(&mut order, "D"), Placement::Inserted(1));
        assert_eq!(cursor.place(&mut order, "B"), Placement::Existing(2));

        assert_eq!(order.keys(), ["A", "D", "B", "C"]);
    }

    #[test]
    fn test_new_keys_before_any_known_go_first() {
        let mut order = order_of(&["A", "B"]);
        let mut cursor = InsertionCursor::new();

        cursor.place(&mut order, "X");
        cursor.place(&mut order, "Y");
        cursor.place(&mut order, "B");
        cursor.place(&mut order, "Z");

        assert_eq!(order.keys(), ["X", "Y", "A", "B", "Z"]);
    }

    #[test]
    fn test_cursor_moves_backwards_to_existing() {
        let mut order = order_of(&["A", "B", "C"]);
        let mut cursor = InsertionCursor::new();

        cursor.place(&mut order, "C");
        cursor.place(&mut order, "A");
        cursor.place(&mut order, "N");

        assert_eq!(order.keys(), ["A", "N", "B", "C"]);
    }

    #[test]
    fn test_positions_track_inserts_removals_and_sorts() {
        let mut order = order_of(&["A", "B", "C"]);
        order.insert_at(1, "X");
        assert_eq!(order.position("X"), Some(1));
        assert_eq!(order.position("C"), Some(3));

        assert!(order.remove("A"));
        assert_eq!(order.position("X"), Some(0));
        assert_eq!(order.position("C"), Some(2));

        order.sort_by_key(|k| std::cmp::Reverse(k.clone()));
        assert_eq!(order.keys(), ["X", "C", "B"]);
        for (i, key) in order.keys().iter().enumerate() {
            assert_eq!(order.position(key), Some(i));
        }
    }

    #[test]
    fn test_remove_and_membership() {
        let mut order = order_of(&["A", "B"]);
        assert!(order.remove("A"));
        assert!(!order.remove("A"));
        assert!(!order.contains("A"));
        assert_eq!(order.position("B"), Some(0));
        assert_eq!(order.len(), 1);
    }
}
