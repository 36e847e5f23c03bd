/// The ordered set of switchable windows on one monitor, plus a cursor.
///
/// Windows keep the order in which they were first discovered. The
/// cursor points at the entry the user is currently looking at, or is
/// `None` when nothing on this monitor has been selected yet.
#[derive(Debug, Clone, Default)]
pub struct SwitchList {
    handles: Vec<usize>,
    cursor: Option<usize>,
}

impl SwitchList {
    /// Creates an empty list with an unset cursor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a window.
    ///
    /// Returns `false` if the window is already tracked.
    pub fn add(&mut self, hwnd: usize) -> bool {
        if self.handles.contains(&hwnd) {
            return false;
        }
        self.handles.push(hwnd);
        true
    }

    /// Removes the entry at `index`, keeping the cursor on the same window.
    ///
    /// Removing at or before the cursor shifts it down by one; removing
    /// the first entry while the cursor is on it unsets the cursor.
    pub fn remove_at(&mut self, index: usize) -> Option<usize> {
        if index >= self.handles.len() {
            return None;
        }
        let hwnd = self.handles.remove(index);
        if let Some(cursor) = self.cursor
            && index <= cursor
        {
            self.cursor = cursor.checked_sub(1);
        }
        Some(hwnd)
    }

    /// Removes a window by handle.
    ///
    /// Returns `true` if the window was found and removed.
    pub fn remove(&mut self, hwnd: usize) -> bool {
        match self.index_of(hwnd) {
            Some(index) => self.remove_at(index).is_some(),
            None => false,
        }
    }

    /// Drops every entry for which `keep` returns `false`.
    ///
    /// Walks from the back so each removal adjusts the cursor against
    /// indices that have not shifted yet. Returns the dropped handles.
    pub fn retain(&mut self, mut keep: impl FnMut(usize) -> bool) -> Vec<usize> {
        let mut dropped = Vec::new();
        for index in (0..self.handles.len()).rev() {
            let hwnd = self.handles[index];
            if !keep(hwnd) {
                self.remove_at(index);
                dropped.push(hwnd);
            }
        }
        dropped
    }

    /// Returns whether the list tracks the given window.
    pub fn contains(&self, hwnd: usize) -> bool {
        self.handles.contains(&hwnd)
    }

    /// Returns the index of the given window handle, if tracked.
    pub fn index_of(&self, hwnd: usize) -> Option<usize> {
        self.handles.iter().position(|&h| h == hwnd)
    }

    /// Returns the handle at `index`.
    pub fn get(&self, index: usize) -> Option<usize> {
        self.handles.get(index).copied()
    }

    /// Returns the number of tracked windows.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Returns the tracked handles in discovery order.
    pub fn handles(&self) -> &[usize] {
        &self.handles
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Moves the cursor. Out-of-range indices unset it.
    pub fn set_cursor(&mut self, index: Option<usize>) {
        self.cursor = index.filter(|&i| i < self.handles.len());
    }

    /// Window under the cursor.
    pub fn current(&self) -> Option<usize> {
        self.cursor.and_then(|i| self.get(i))
    }

    /// Points the cursor at `hwnd` if it is tracked.
    ///
    /// Returns the new cursor index, or `None` if the window is unknown
    /// (the cursor is then left as it was).
    pub fn sync_to(&mut self, hwnd: usize) -> Option<usize> {
        let index = self.index_of(hwnd)?;
        self.cursor = Some(index);
        Some(index)
    }

    /// Removes every entry and unsets the cursor.
    pub fn clear(&mut self) {
        self.handles.clear();
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(handles: &[usize], cursor: Option<usize>) -> SwitchList {
        let mut list = SwitchList::new();
        for &h in handles {
            list.add(h);
        }
        list.set_cursor(cursor);
        list
    }

    #[test]
    fn add_ignores_duplicates() {
        // Arrange
        let mut list = SwitchList::new();

        // Act
        assert!(list.add(1));
        assert!(list.add(2));
        assert!(!list.add(1));

        // Assert
        assert_eq!(list.handles(), &[1, 2]);
        assert_eq!(list.cursor(), None);
    }

    #[test]
    fn removing_before_cursor_keeps_same_window_selected() {
        // Arrange
        let mut list = list_of(&[10, 20, 30], Some(2));

        // Act
        list.remove(10);

        // Assert
        assert_eq!(list.cursor(), Some(1));
        assert_eq!(list.current(), Some(30));
    }

    #[test]
    fn removing_after_cursor_leaves_cursor_alone() {
        // Arrange
        let mut list = list_of(&[10, 20, 30], Some(0));

        // Act
        list.remove(30);

        // Assert
        assert_eq!(list.cursor(), Some(0));
    }

    #[test]
    fn removing_cursor_entry_steps_back() {
        // Arrange
        let mut list = list_of(&[10, 20, 30], Some(1));

        // Act
        list.remove(20);

        // Assert
        assert_eq!(list.cursor(), Some(0));
        assert_eq!(list.current(), Some(10));
    }

    #[test]
    fn removing_first_entry_under_cursor_unsets_cursor() {
        // Arrange
        let mut list = list_of(&[10, 20], Some(0));

        // Act
        list.remove_at(0);

        // Assert
        assert_eq!(list.cursor(), None);
        assert_eq!(list.handles(), &[20]);
    }

    #[test]
    fn retain_adjusts_cursor_for_every_removal() {
        // Arrange
        let mut list = list_of(&[1, 2, 3, 4, 5], Some(3));

        // Act
        let dropped = list.retain(|h| h != 1 && h != 3 && h != 5);

        // Assert
        assert_eq!(list.handles(), &[2, 4]);
        assert_eq!(list.current(), Some(4));
        assert_eq!(dropped, vec![5, 3, 1]);
    }

    #[test]
    fn sync_to_unknown_window_keeps_cursor() {
        // Arrange
        let mut list = list_of(&[1, 2, 3], Some(1));

        // Act / Assert
        assert_eq!(list.sync_to(99), None);
        assert_eq!(list.cursor(), Some(1));
        assert_eq!(list.sync_to(3), Some(2));
    }

    #[test]
    fn set_cursor_rejects_out_of_range() {
        let mut list = list_of(&[1], None);
        list.set_cursor(Some(4));
        assert_eq!(list.cursor(), None);
    }
}
