//! Note use-case service.
//!
//! # Responsibility
//! - Create, edit in place and delete notes over the `notes` slot.
//! - Track the modal edit target between `start_edit` and submit/cancel.
//!
//! # Invariants
//! - Edits replace title and content only; id, author, timestamp and
//!   color are preserved.
//! - Cancelling an edit discards the draft without touching storage.

use crate::model::new_record_id;
use crate::model::note::{Note, NoteColor};
use crate::model::Record;
use crate::notify::{LogNotifier, Notice, Notifier};
use crate::repo::kv_store::{KeyValueStore, StorageKey};
use crate::repo::list_store::PersistedList;
use crate::service::{require_field, ServiceError, ServiceResult};
use chrono::Utc;
use log::{info, warn};

/// Form state for creating or editing a note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub user_name: String,
}

pub struct NoteService<S: KeyValueStore> {
    notes: PersistedList<Note, S>,
    editing: Option<String>,
    notifier: Box<dyn Notifier>,
}

impl<S: KeyValueStore> NoteService<S> {
    pub fn open(store: S) -> ServiceResult<Self> {
        Ok(Self {
            notes: PersistedList::open(store, StorageKey::Notes)?,
            editing: None,
            notifier: Box::new(LogNotifier),
        })
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn notes(&self) -> &[Note] {
        self.notes.items()
    }

    pub fn store(&self) -> &S {
        self.notes.store()
    }

    /// Id of the note currently open for editing.
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Opens the edit flow and returns a draft pre-filled from the note.
    ///
    /// The author field is left for the caller to fill, as on creation.
    pub fn start_edit(&mut self, id: &str) -> Option<NoteDraft> {
        let note = self.notes.find(id)?;
        let draft = NoteDraft {
            title: note.title.clone(),
            content: note.content.clone(),
            user_name: String::new(),
        };
        self.editing = Some(note.id.clone());
        Some(draft)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Saves the draft: in place when an edit is open, otherwise as a new
    /// note at the head of the list.
    pub fn add_or_update_note(&mut self, draft: NoteDraft) -> ServiceResult<Note> {
        require_field("title", &draft.title)?;
        require_field("content", &draft.content)?;
        require_field("userName", &draft.user_name)?;

        if let Some(target) = self.editing.clone() {
            return self.update_note(&target, draft);
        }

        let note = Note {
            id: new_record_id(),
            title: draft.title,
            content: draft.content,
            created_at: Utc::now(),
            user_name: draft.user_name,
            color: NoteColor::random(),
        };
        note.validate()?;
        self.notes.prepend(note.clone())?;

        info!(
            "event=note_add module=notes status=ok color={} count={}",
            note.color.as_str(),
            self.notes.items().len()
        );
        self.notifier.notify(Notice::info(
            "New Note Added",
            format!("Note \"{}\" created by {}", note.title, note.user_name),
        ));
        Ok(note)
    }

    /// Rewrites title and content of `target` and closes the edit.
    ///
    /// A target no longer in the list is reported without touching storage.
    fn update_note(&mut self, target: &str, draft: NoteDraft) -> ServiceResult<Note> {
        if self.notes.find(target).is_none() {
            self.editing = None;
            warn!("event=note_update module=notes status=missing");
            return Err(ServiceError::InvalidInput(format!(
                "note `{target}` no longer exists"
            )));
        }

        let updated = self.notes.update(|notes| {
            notes.iter_mut().find(|note| note.id == target).map(|note| {
                note.title = draft.title;
                note.content = draft.content;
                note.clone()
            })
        })?;
        self.editing = None;

        let note = updated.ok_or_else(|| {
            ServiceError::InvalidInput(format!("note `{target}` no longer exists"))
        })?;
        info!("event=note_update module=notes status=ok");
        self.notifier.notify(Notice::info(
            "Note Updated",
            format!("Note \"{}\" has been updated", note.title),
        ));
        Ok(note)
    }

    /// Removes a note by id; unknown ids are a no-op.
    pub fn delete_note(&mut self, id: &str) -> ServiceResult<bool> {
        let title = match self.notes.find(id) {
            Some(note) => note.title.clone(),
            None => return Ok(false),
        };
        let removed = self.notes.remove(id)?;
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }
        info!("event=note_delete module=notes status=ok");
        self.notifier.notify(Notice::info(
            "Note Deleted",
            format!("Note \"{title}\" has been deleted"),
        ));
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteDraft, NoteService};
    use crate::repo::kv_store::{KeyValueStore, MemoryKvStore};
    use crate::service::ServiceError;

    fn draft(title: &str) -> NoteDraft {
        NoteDraft {
            title: title.to_string(),
            content: "content".to_string(),
            user_name: "Noor".to_string(),
        }
    }

    #[test]
    fn start_edit_prefills_title_and_content() {
        let store = MemoryKvStore::new();
        let mut service = NoteService::open(&store).expect("open should succeed");
        let note = service.add_or_update_note(draft("groceries")).expect("add");

        let prefilled = service.start_edit(&note.id).expect("note should exist");
        assert_eq!(prefilled.title, "groceries");
        assert_eq!(prefilled.content, "content");
        assert_eq!(service.editing(), Some(note.id.as_str()));
        assert!(service.start_edit("missing").is_none());
    }

    #[test]
    fn deleting_edit_target_closes_edit() {
        let store = MemoryKvStore::new();
        let mut service = NoteService::open(&store).expect("open should succeed");
        let note = service.add_or_update_note(draft("a")).expect("add");
        service.start_edit(&note.id);
        assert!(service.delete_note(&note.id).expect("delete"));
        assert_eq!(service.editing(), None);
    }

    #[test]
    fn vanished_edit_target_is_rejected_without_writing() {
        let store = MemoryKvStore::new();
        let mut service = NoteService::open(&store).expect("open should succeed");
        service.add_or_update_note(draft("kept")).expect("add");
        let stored_before = store.get("notes").expect("read");

        service.editing = Some("gone".to_string());
        let err = service
            .add_or_update_note(draft("edited"))
            .expect_err("missing target must fail");

        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert_eq!(service.editing(), None);
        assert_eq!(service.notes().len(), 1);
        assert_eq!(service.notes()[0].title, "kept");
        assert_eq!(store.get("notes").expect("read"), stored_before);
    }

    #[test]
    fn submit_after_deleting_edit_target_creates_new_note() {
        let store = MemoryKvStore::new();
        let mut service = NoteService::open(&store).expect("open should succeed");
        let note = service.add_or_update_note(draft("a")).expect("add");
        service.start_edit(&note.id);
        service.delete_note(&note.id).expect("delete");

        let created = service.add_or_update_note(draft("b")).expect("create");
        assert_ne!(created.id, note.id);
        assert_eq!(service.notes().len(), 1);
    }
}
