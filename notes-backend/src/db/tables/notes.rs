//! Database operations for the notes table

use chrono::{DateTime, Utc};
use notes_types::{Note, validate_note_fields};
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::db::{Database, NoteStoreError};

const NOTE_COLUMNS: &str = "id, title, content, created_at";

impl Database {
    /// Create a note. The store assigns `id` and `created_at`.
    pub fn create_note(
        &self,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Note, NoteStoreError> {
        let (title, content) =
            validate_note_fields(title, content).map_err(NoteStoreError::Validation)?;

        let conn = self.conn()?;
        let now = Utc::now();

        conn.execute(
            "INSERT INTO notes (title, content, created_at) VALUES (?1, ?2, ?3)",
            params![title, content, now.to_rfc3339()],
        )?;

        let id = conn.last_insert_rowid();

        Ok(Note {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: now,
        })
    }

    /// List notes in insertion order.
    ///
    /// With a filter, only notes whose title contains it (ASCII case-insensitive).
    /// A blank filter lists everything.
    pub fn list_notes(&self, title_filter: Option<&str>) -> Result<Vec<Note>, NoteStoreError> {
        let conn = self.conn()?;
        let filter = title_filter.filter(|f| !f.trim().is_empty());

        let notes = match filter {
            Some(filter) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {NOTE_COLUMNS} FROM notes
                     WHERE instr(lower(title), lower(?1)) > 0
                     ORDER BY id ASC"
                ))?;
                let rows = stmt.query_map(params![filter], Self::row_to_note)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
            None => {
                let mut stmt =
                    conn.prepare(&format!("SELECT {NOTE_COLUMNS} FROM notes ORDER BY id ASC"))?;
                let rows = stmt.query_map([], Self::row_to_note)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
        };

        Ok(notes)
    }

    /// Overwrite title and content of an existing note. `id` and `created_at` stay.
    pub fn update_note(
        &self,
        id: i64,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Note, NoteStoreError> {
        let (title, content) =
            validate_note_fields(title, content).map_err(NoteStoreError::Validation)?;

        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE notes SET title = ?1, content = ?2 WHERE id = ?3",
            params![title, content, id],
        )?;
        if updated == 0 {
            return Err(NoteStoreError::NotFound(id));
        }

        // Same connection: a deletion between the two statements reads as NotFound
        Self::find_note(&conn, id)
    }

    /// Permanently remove a note
    pub fn delete_note(&self, id: i64) -> Result<(), NoteStoreError> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM notes WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(NoteStoreError::NotFound(id));
        }
        Ok(())
    }

    pub fn count_notes(&self) -> Result<i64, NoteStoreError> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count)
    }

    fn find_note(conn: &Connection, id: i64) -> Result<Note, NoteStoreError> {
        conn.query_row(
            &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1"),
            params![id],
            Self::row_to_note,
        )
        .optional()?
        .ok_or(NoteStoreError::NotFound(id))
    }

    fn row_to_note(row: &Row<'_>) -> rusqlite::Result<Note> {
        let created_at_str: String = row.get(3)?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
            })?;

        Ok(Note {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::{TempDir, tempdir};

    fn get_note(db: &Database, id: i64) -> Result<Note, NoteStoreError> {
        Database::find_note(&db.conn().unwrap(), id)
    }

    fn open_db() -> (TempDir, Database) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.db");
        let db = Database::new(path.to_str().unwrap(), 2, Duration::from_secs(1))
            .expect("Failed to open database");
        (dir, db)
    }

    #[test]
    fn test_create_then_list_contains_new_note() {
        let (_dir, db) = open_db();

        let note = db
            .create_note(Some("Groceries"), Some("Milk, eggs"))
            .expect("Failed to create note");
        assert_eq!(note.id, 1);
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "Milk, eggs");

        let notes = db.list_notes(None).unwrap();
        assert_eq!(notes, vec![note]);
    }

    #[test]
    fn test_create_assigns_fresh_ids_in_insertion_order() {
        let (_dir, db) = open_db();

        let a = db.create_note(Some("a"), Some("first")).unwrap();
        let b = db.create_note(Some("b"), Some("second")).unwrap();
        assert_ne!(a.id, b.id);

        let ids: Vec<i64> = db.list_notes(None).unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[test]
    fn test_create_rejects_blank_fields_without_persisting() {
        let (_dir, db) = open_db();

        for (title, content) in [
            (Some(""), Some("body")),
            (Some("title"), Some("   ")),
            (None, Some("body")),
            (Some("title"), None),
        ] {
            match db.create_note(title, content) {
                Err(NoteStoreError::Validation(_)) => {}
                other => panic!("expected validation error, got {other:?}"),
            }
        }

        assert_eq!(db.count_notes().unwrap(), 0);
    }

    #[test]
    fn test_update_overwrites_title_and_content_only() {
        let (_dir, db) = open_db();
        let original = db.create_note(Some("Groceries"), Some("Milk, eggs")).unwrap();

        let updated = db
            .update_note(original.id, Some("Groceries"), Some("Milk, eggs, bread"))
            .unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.content, "Milk, eggs, bread");
        assert_eq!(updated.created_at, original.created_at);

        assert_eq!(get_note(&db, original.id).unwrap(), updated);
    }

    #[test]
    fn test_update_missing_id_is_not_found_and_count_unchanged() {
        let (_dir, db) = open_db();
        db.create_note(Some("keep"), Some("me")).unwrap();

        match db.update_note(42, Some("x"), Some("y")) {
            Err(NoteStoreError::NotFound(42)) => {}
            other => panic!("expected not found, got {other:?}"),
        }
        assert_eq!(db.count_notes().unwrap(), 1);
    }

    #[test]
    fn test_update_rejects_blank_fields_without_change() {
        let (_dir, db) = open_db();
        let note = db.create_note(Some("title"), Some("content")).unwrap();

        assert!(matches!(
            db.update_note(note.id, Some(" "), Some("new")),
            Err(NoteStoreError::Validation(_))
        ));
        assert_eq!(get_note(&db, note.id).unwrap(), note);
    }

    #[test]
    fn test_delete_then_repeat_is_not_found() {
        let (_dir, db) = open_db();
        let note = db.create_note(Some("Groceries"), Some("Milk, eggs")).unwrap();

        db.delete_note(note.id).unwrap();
        assert!(db.list_notes(None).unwrap().iter().all(|n| n.id != note.id));

        assert!(matches!(
            db.delete_note(note.id),
            Err(NoteStoreError::NotFound(id)) if id == note.id
        ));
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let (_dir, db) = open_db();
        let first = db.create_note(Some("one"), Some("1")).unwrap();
        db.delete_note(first.id).unwrap();

        let second = db.create_note(Some("two"), Some("2")).unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn test_title_filter_is_case_insensitive_substring() {
        let (_dir, db) = open_db();
        db.create_note(Some("Groceries"), Some("Milk")).unwrap();
        db.create_note(Some("Work todo"), Some("Ship it")).unwrap();
        db.create_note(Some("More groceries"), Some("Bread")).unwrap();

        let titles: Vec<String> = db
            .list_notes(Some("GROCER"))
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["Groceries", "More groceries"]);

        assert!(db.list_notes(Some("nothing")).unwrap().is_empty());
        assert_eq!(db.list_notes(Some("  ")).unwrap().len(), 3);
    }

    #[test]
    fn test_title_filter_treats_like_wildcards_literally() {
        let (_dir, db) = open_db();
        db.create_note(Some("100% done"), Some("yes")).unwrap();
        db.create_note(Some("1000 things"), Some("no")).unwrap();

        let notes = db.list_notes(Some("0%")).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "100% done");
    }

    #[test]
    fn test_get_missing_note() {
        let (_dir, db) = open_db();
        assert!(matches!(get_note(&db, 7), Err(NoteStoreError::NotFound(7))));
    }
}
