//! Drives the note store and keeps the local view in step with it.
//!
//! Every user action ends in at most one notification. Actions take `&self`
//! so independent requests can run concurrently; each form refuses a second
//! submit while its own request is in flight.

use notes_types::{Note, validate_note_fields};
use parking_lot::Mutex;
use std::time::{Duration, Instant};

use crate::api::NotesBackend;
use crate::error::{ClientError, ClientResult};
use crate::gate::SubmitGate;
use crate::notification::{Notification, NotificationKind, Notifier};
use crate::state::NotesView;

/// Forms that submit requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    Create,
    Edit,
    Search,
    Delete,
}

pub struct NotesController<B> {
    backend: B,
    view: Mutex<NotesView>,
    notifier: Mutex<Notifier>,
    create_gate: SubmitGate,
    edit_gate: SubmitGate,
    search_gate: SubmitGate,
    delete_gate: SubmitGate,
}

impl<B: NotesBackend> NotesController<B> {
    pub fn new(backend: B, notification_duration: Duration) -> Self {
        Self {
            backend,
            view: Mutex::new(NotesView::new()),
            notifier: Mutex::new(Notifier::new(notification_duration)),
            create_gate: SubmitGate::new(),
            edit_gate: SubmitGate::new(),
            search_gate: SubmitGate::new(),
            delete_gate: SubmitGate::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Snapshot of the current view
    pub fn view(&self) -> NotesView {
        self.view.lock().clone()
    }

    pub fn notification(&self) -> Option<Notification> {
        self.notifier.lock().current().cloned()
    }

    pub fn notification_at(&self, now: Instant) -> Option<Notification> {
        self.notifier.lock().visible_at(now).cloned()
    }

    /// Whether the form's submit should be shown as disabled
    pub fn is_submitting(&self, form: Form) -> bool {
        self.gate(form).is_busy()
    }

    fn gate(&self, form: Form) -> &SubmitGate {
        match form {
            Form::Create => &self.create_gate,
            Form::Edit => &self.edit_gate,
            Form::Search => &self.search_gate,
            Form::Delete => &self.delete_gate,
        }
    }

    fn notify(&self, kind: NotificationKind, text: impl Into<String>) {
        self.notifier.lock().show(kind, text);
    }

    fn notify_failure(&self, action: &str, err: &ClientError, fallback: &str) {
        log::warn!("[NOTES] {} failed: {}", action, err);
        self.notify(NotificationKind::Error, err.user_message(fallback));
    }

    /// Reject blank input before it reaches the network
    fn check_fields(&self, title: &str, content: &str) -> ClientResult<()> {
        validate_note_fields(Some(title), Some(content))
            .map(|_| ())
            .map_err(|message| {
                self.notify(NotificationKind::Error, message.clone());
                ClientError::Validation(Some(message))
            })
    }

    /// Fetch the full list and replace local state wholesale
    pub async fn load(&self) -> ClientResult<()> {
        match self.backend.list_notes(None).await {
            Ok(notes) => {
                log::debug!("[NOTES] Loaded {} notes", notes.len());
                self.view.lock().replace_all(notes);
                Ok(())
            }
            Err(e) => {
                self.notify_failure("load", &e, "Failed to load notes");
                Err(e)
            }
        }
    }

    /// Create a note and append the stored copy to the list. Both fields are
    /// sent trimmed; edits keep their input as typed.
    pub async fn create(&self, title: &str, content: &str) -> ClientResult<Note> {
        let Some(_ticket) = self.create_gate.try_begin() else {
            return Err(ClientError::Busy);
        };
        let (title, content) = (title.trim(), content.trim());
        self.check_fields(title, content)?;

        match self.backend.create_note(title, content).await {
            Ok(note) => {
                self.view.lock().append(note.clone());
                self.notify(NotificationKind::Success, "Note added");
                Ok(note)
            }
            Err(e) => {
                self.notify_failure("create", &e, "Failed to add note");
                Err(e)
            }
        }
    }

    /// Open the edit form for a note shown in the list or the search slot
    pub fn begin_edit(&self, id: i64) -> bool {
        let mut view = self.view.lock();
        match view.find_visible(id).cloned() {
            Some(note) => {
                view.set_editing(Some(note));
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&self) {
        self.view.lock().set_editing(None);
    }

    /// Update a note and replace the local copy with the stored one
    pub async fn update(&self, id: i64, title: &str, content: &str) -> ClientResult<Note> {
        let Some(_ticket) = self.edit_gate.try_begin() else {
            return Err(ClientError::Busy);
        };
        self.check_fields(title, content)?;

        match self.backend.update_note(id, title, content).await {
            Ok(note) => {
                let mut view = self.view.lock();
                view.replace_by_id(note.clone());
                if view.editing().is_some_and(|n| n.id == id) {
                    view.set_editing(None);
                }
                drop(view);

                self.notify(NotificationKind::Success, "Note updated");
                Ok(note)
            }
            Err(e) => {
                self.notify_failure("update", &e, "Failed to update note");
                Err(e)
            }
        }
    }

    /// Ask for confirmation before deleting
    pub fn request_delete(&self, id: i64) {
        self.view.lock().set_pending_delete(Some(id));
    }

    pub fn cancel_delete(&self) {
        self.view.lock().set_pending_delete(None);
    }

    /// Delete the note awaiting confirmation, if any
    pub async fn confirm_delete(&self) -> Option<ClientResult<()>> {
        let id = self.view.lock().pending_delete()?;
        Some(self.delete(id).await)
    }

    /// Remove the note locally right away, delete it in the store, then
    /// re-fetch the full list so the view matches the store either way.
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        let Some(_ticket) = self.delete_gate.try_begin() else {
            return Err(ClientError::Busy);
        };

        self.view.lock().remove_by_id(id);

        let outcome = self.backend.delete_note(id).await;
        match &outcome {
            Ok(()) => self.notify(NotificationKind::Success, "Note deleted"),
            Err(e) => self.notify_failure("delete", e, "Failed to delete note"),
        }

        // Reconcile; the delete outcome above is the only notification
        match self.backend.list_notes(None).await {
            Ok(notes) => self.view.lock().replace_all(notes),
            Err(e) => log::warn!("[NOTES] Re-fetch after delete failed: {}", e),
        }

        outcome
    }

    /// Look up a note by title into the search slot. The main list is untouched.
    ///
    /// `Ok(None)` means nothing matched.
    pub async fn search(&self, title: &str) -> ClientResult<Option<Note>> {
        let Some(_ticket) = self.search_gate.try_begin() else {
            return Err(ClientError::Busy);
        };

        self.view.lock().clear_search();

        let query = title.trim();
        if query.is_empty() {
            let message = "Enter a title to search";
            self.view.lock().set_search_error(message);
            self.notify(NotificationKind::Error, message);
            return Err(ClientError::Validation(Some(message.to_string())));
        }

        match self.backend.list_notes(Some(query)).await {
            Ok(notes) => match notes.into_iter().next() {
                Some(note) => {
                    self.view.lock().set_search_result(note.clone());
                    self.notify(NotificationKind::Info, format!("Found \"{}\"", note.title));
                    Ok(Some(note))
                }
                None => {
                    let message = "Note not found";
                    self.view.lock().set_search_error(message);
                    self.notify(NotificationKind::Error, message);
                    Ok(None)
                }
            },
            Err(e) => {
                self.notify_failure("search", &e, "Failed to search notes");
                Err(e)
            }
        }
    }
}
