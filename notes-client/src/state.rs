//! Client-side view of the note store.
//!
//! `NotesView` is a disposable copy of the store's list plus the UI slots that
//! hang off it (search result, edit form, delete confirmation). It is only
//! changed through the methods below; the store stays authoritative.

use notes_types::Note;

#[derive(Debug, Clone, Default)]
pub struct NotesView {
    /// Insertion order, as returned by the store
    notes: Vec<Note>,
    search_result: Option<Note>,
    search_error: Option<String>,
    editing: Option<Note>,
    pending_delete: Option<i64>,
}

impl NotesView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Display order: most recently created first
    pub fn newest_first(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Discard the local list and take the store's
    pub fn replace_all(&mut self, notes: Vec<Note>) {
        self.notes = notes;
    }

    /// Add a newly created note at the end. A note whose id is already present
    /// replaces the existing entry instead, so ids stay unique.
    pub fn append(&mut self, note: Note) {
        if !self.replace_by_id(note.clone()) {
            self.notes.push(note);
        }
    }

    /// Replace the note with the same id in place. Also refreshes the search
    /// slot when it shows that note. Returns false if the id is not in the list.
    pub fn replace_by_id(&mut self, note: Note) -> bool {
        if let Some(slot) = self.search_result.as_mut().filter(|n| n.id == note.id) {
            *slot = note.clone();
        }

        match self.notes.iter_mut().find(|n| n.id == note.id) {
            Some(existing) => {
                *existing = note;
                true
            }
            None => false,
        }
    }

    /// Remove a note by id, clearing any UI slot that refers to it
    pub fn remove_by_id(&mut self, id: i64) -> Option<Note> {
        if self.search_result.as_ref().is_some_and(|n| n.id == id) {
            self.search_result = None;
        }
        if self.editing.as_ref().is_some_and(|n| n.id == id) {
            self.editing = None;
        }
        if self.pending_delete == Some(id) {
            self.pending_delete = None;
        }

        let index = self.notes.iter().position(|n| n.id == id)?;
        Some(self.notes.remove(index))
    }

    // --- Search slot ---

    pub fn search_result(&self) -> Option<&Note> {
        self.search_result.as_ref()
    }

    pub fn search_error(&self) -> Option<&str> {
        self.search_error.as_deref()
    }

    pub fn clear_search(&mut self) {
        self.search_result = None;
        self.search_error = None;
    }

    pub fn set_search_result(&mut self, note: Note) {
        self.search_result = Some(note);
        self.search_error = None;
    }

    pub fn set_search_error(&mut self, message: impl Into<String>) {
        self.search_result = None;
        self.search_error = Some(message.into());
    }

    // --- Edit form ---

    pub fn editing(&self) -> Option<&Note> {
        self.editing.as_ref()
    }

    pub fn set_editing(&mut self, note: Option<Note>) {
        self.editing = note;
    }

    /// Find a note in the list or the search slot
    pub fn find_visible(&self, id: i64) -> Option<&Note> {
        self.get(id)
            .or_else(|| self.search_result.as_ref().filter(|n| n.id == id))
    }

    // --- Delete confirmation ---

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    pub fn set_pending_delete(&mut self, id: Option<i64>) {
        self.pending_delete = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn note(id: i64, title: &str) -> Note {
        Note {
            id,
            title: title.to_string(),
            content: format!("content of {}", title),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_replace_by_id_keeps_position() {
        let mut view = NotesView::new();
        view.replace_all(vec![note(1, "a"), note(2, "b"), note(3, "c")]);

        let mut changed = note(2, "b2");
        changed.content = "new".to_string();
        assert!(view.replace_by_id(changed.clone()));

        let titles: Vec<&str> = view.notes().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b2", "c"]);
        assert_eq!(view.get(2), Some(&changed));
    }

    #[test]
    fn test_replace_unknown_id_is_noop() {
        let mut view = NotesView::new();
        view.replace_all(vec![note(1, "a")]);
        assert!(!view.replace_by_id(note(5, "x")));
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn test_append_never_duplicates_ids() {
        let mut view = NotesView::new();
        view.append(note(1, "a"));
        view.append(note(2, "b"));
        view.append(note(1, "a again"));

        assert_eq!(view.len(), 2);
        assert_eq!(view.get(1).unwrap().title, "a again");
    }

    #[test]
    fn test_newest_first_reverses_insertion_order() {
        let mut view = NotesView::new();
        view.replace_all(vec![note(1, "a"), note(2, "b")]);
        let ids: Vec<i64> = view.newest_first().map(|n| n.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_remove_clears_slots_for_that_note() {
        let mut view = NotesView::new();
        view.replace_all(vec![note(1, "a"), note(2, "b")]);
        view.set_search_result(note(1, "a"));
        view.set_editing(Some(note(1, "a")));
        view.set_pending_delete(Some(1));

        let removed = view.remove_by_id(1).unwrap();
        assert_eq!(removed.id, 1);
        assert!(view.search_result().is_none());
        assert!(view.editing().is_none());
        assert!(view.pending_delete().is_none());
        assert_eq!(view.len(), 1);

        assert!(view.remove_by_id(1).is_none());
    }

    #[test]
    fn test_search_slot_is_independent_of_list() {
        let mut view = NotesView::new();
        view.replace_all(vec![note(1, "a")]);

        view.set_search_result(note(7, "elsewhere"));
        assert_eq!(view.len(), 1);
        assert_eq!(view.find_visible(7).unwrap().title, "elsewhere");

        view.set_search_error("Note not found");
        assert!(view.search_result().is_none());
        assert_eq!(view.search_error(), Some("Note not found"));

        view.clear_search();
        assert!(view.search_error().is_none());
    }

    #[test]
    fn test_replace_refreshes_search_slot() {
        let mut view = NotesView::new();
        view.replace_all(vec![note(1, "a")]);
        view.set_search_result(note(1, "a"));

        view.replace_by_id(note(1, "renamed"));
        assert_eq!(view.search_result().unwrap().title, "renamed");
    }
}
