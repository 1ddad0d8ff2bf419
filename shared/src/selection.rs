/// Which marker's info window is open.
///
/// Closing keeps the index, so clicking the same marker again reopens it;
/// replacing the item list forgets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    index: Option<usize>,
    open: bool,
}

impl Selection {
    pub const fn new() -> Self {
        Self {
            index: None,
            open: false,
        }
    }

    /// Marker `index` was clicked: its popup opens, replacing any other.
    pub fn click(&mut self, index: usize) {
        self.index = Some(index);
        self.open = true;
    }

    /// The open popup was dismissed.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// The item list changed shape or content.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Clear the selection if `next` differs from the list it indexed into.
    /// Returns whether anything was cleared.
    pub fn follow_items<T: PartialEq>(&mut self, previous: &[T], next: &[T]) -> bool {
        if previous == next || *self == Self::new() {
            return false;
        }
        self.clear();
        true
    }

    /// Index whose popup is currently shown.
    pub fn open_index(&self) -> Option<usize> {
        self.index.filter(|_| self.open)
    }
}

#[cfg(test)]
mod tests {
    use super::Selection;

    #[test]
    fn starts_closed() {
        let sel = Selection::new();
        assert_eq!(sel.open_index(), None);
        assert_eq!(sel.index, None);
    }

    #[test]
    fn click_opens_exactly_that_marker() {
        let mut sel = Selection::new();
        sel.click(2);
        assert_eq!(sel.open_index(), Some(2));
    }

    #[test]
    fn clicking_another_marker_moves_the_popup() {
        let mut sel = Selection::new();
        sel.click(0);
        sel.click(3);
        assert_eq!(sel.open_index(), Some(3));
    }

    #[test]
    fn close_hides_but_remembers_index() {
        let mut sel = Selection::new();
        sel.click(1);
        sel.close();
        assert_eq!(sel.open_index(), None);
        assert_eq!(sel.index, Some(1));
    }

    #[test]
    fn reopening_after_close() {
        let mut sel = Selection::new();
        sel.click(1);
        sel.close();
        sel.click(1);
        assert_eq!(sel.open_index(), Some(1));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut sel = Selection::new();
        sel.click(4);
        sel.clear();
        assert_eq!(sel, Selection::new());
    }

    #[test]
    fn same_items_keep_the_popup() {
        let mut sel = Selection::new();
        sel.click(1);
        assert!(!sel.follow_items(&["a", "b"], &["a", "b"]));
        assert_eq!(sel.open_index(), Some(1));
    }

    #[test]
    fn changed_items_clear_the_popup() {
        let mut sel = Selection::new();
        sel.click(1);
        assert!(sel.follow_items(&["a", "b"], &["a", "c"]));
        assert_eq!(sel, Selection::new());
    }

    #[test]
    fn changed_items_forget_a_closed_index() {
        let mut sel = Selection::new();
        sel.click(0);
        sel.close();
        assert!(sel.follow_items(&["a"], &[]));
        assert_eq!(sel.index, None);
    }

    #[test]
    fn nothing_to_clear_without_a_click() {
        let mut sel = Selection::new();
        assert!(!sel.follow_items(&["a"], &["b"]));
    }
}
