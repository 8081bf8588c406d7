//! Addressable history.
//!
//! A list of fragments with a cursor, like a browser's session history. Pushing discards
//! any forward entries. The empty fragment addresses Home.

/// Session history of fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    /// Fragments in visit order. Never empty.
    entries: Vec<String>,
    /// Index of the current entry.
    cursor: usize,
}

impl Default for History {
    fn default() -> Self {
        Self {
            entries: vec![String::new()],
            cursor: 0,
        }
    }
}

impl History {
    /// Creates a history holding the single Home entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current fragment.
    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    /// Returns all entries.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Returns the cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Records a new entry after the current one, discarding forward entries.
    ///
    /// Returns false without changing anything if `fragment` is already current.
    pub fn push(&mut self, fragment: &str) -> bool {
        if self.current() == fragment {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(fragment.to_string());
        self.cursor += 1;
        true
    }

    /// Overwrites the current entry.
    ///
    /// If a neighbouring entry then holds the same fragment the two are merged, so replacing
    /// never leaves adjacent duplicates behind.
    pub fn replace(&mut self, fragment: &str) {
        fragment.clone_into(&mut self.entries[self.cursor]);
        if self.cursor + 1 < self.entries.len() && self.entries[self.cursor + 1] == fragment {
            self.entries.remove(self.cursor + 1);
        }
        if self.cursor > 0 && self.entries[self.cursor - 1] == fragment {
            self.entries.remove(self.cursor);
            self.cursor -= 1;
        }
    }

    /// Returns true if there is an entry before the current one.
    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    /// Returns true if there is an entry after the current one.
    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Moves one entry back and returns the new current fragment.
    pub fn back(&mut self) -> Option<&str> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Moves one entry forward and returns the new current fragment.
    pub fn forward(&mut self) -> Option<&str> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_home() {
        let history = History::new();
        assert_eq!(history.current(), "");
        assert_eq!(history.entries().len(), 1);
        assert!(!history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn push_skips_current_duplicate() {
        let mut history = History::new();
        assert!(history.push("ai/bar"));
        assert!(!history.push("ai/bar"));
        assert_eq!(history.entries(), ["", "ai/bar"]);
    }

    #[test]
    fn back_and_forward() {
        let mut history = History::new();
        history.push("a");
        history.push("b");

        assert_eq!(history.back(), Some("a"));
        assert_eq!(history.back(), Some(""));
        assert_eq!(history.back(), None);
        assert_eq!(history.forward(), Some("a"));
        assert_eq!(history.forward(), Some("b"));
        assert_eq!(history.forward(), None);
    }

    #[test]
    fn push_discards_forward_entries() {
        let mut history = History::new();
        history.push("a");
        history.push("b");
        history.back();
        history.push("c");

        assert_eq!(history.entries(), ["", "a", "c"]);
        assert!(!history.can_go_forward());
    }

    #[test]
    fn replace_overwrites_current() {
        let mut history = History::new();
        history.push("a");
        history.push("b");
        history.replace("");
        assert_eq!(history.entries(), ["", "a", ""]);
        assert_eq!(history.cursor(), 2);
    }

    #[test]
    fn replace_merges_with_previous_duplicate() {
        let mut history = History::new();
        history.push("a");
        history.push("b");
        history.back();
        history.replace("");

        assert_eq!(history.entries(), ["", "b"]);
        assert_eq!(history.current(), "");
        assert!(history.can_go_forward());
    }

    #[test]
    fn replace_merges_with_next_duplicate() {
        let mut history = History::new();
        history.push("a");
        history.push("");
        history.back();
        history.replace("");

        assert_eq!(history.entries(), [""]);
        assert_eq!(history.cursor(), 0);
        assert!(!history.can_go_forward());
    }

    #[test]
    fn replace_merges_both_neighbours() {
        let mut history = History::new();
        history.push("a");
        history.push("");
        history.back();
        history.replace("");
        history.push("b");
        history.push("");
        history.back();
        history.replace("");

        assert_eq!(history.entries(), [""]);
    }
}
