//! To-do use-case service.
//!
//! # Responsibility
//! - Create, toggle and delete tasks over the `todos` slot.
//! - Derive the assignee filter, pending/completed grouping and assignee
//!   suggestions used by list views.
//!
//! # Invariants
//! - New tasks are prepended (most-recent-first).
//! - Task creation requires text, creator, assignee and due date.

use crate::model::new_record_id;
use crate::model::task::{Priority, Task};
use crate::model::Record;
use crate::notify::{LogNotifier, Notice, Notifier};
use crate::repo::kv_store::{KeyValueStore, StorageKey};
use crate::repo::list_store::PersistedList;
use crate::service::{require_field, ServiceError, ServiceResult};
use chrono::{DateTime, Utc};
use log::info;

/// Form state for a new task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoDraft {
    pub text: String,
    pub user_name: String,
    pub assigned_to: String,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Priority,
}

/// Filtered tasks split by completion, each in list order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoGroups {
    pub pending: Vec<Task>,
    pub completed: Vec<Task>,
}

pub struct TodoService<S: KeyValueStore> {
    todos: PersistedList<Task, S>,
    notifier: Box<dyn Notifier>,
}

impl<S: KeyValueStore> TodoService<S> {
    /// Loads persisted tasks; invalid or absent payloads start empty.
    pub fn open(store: S) -> ServiceResult<Self> {
        Ok(Self {
            todos: PersistedList::open(store, StorageKey::Todos)?,
            notifier: Box::new(LogNotifier),
        })
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn todos(&self) -> &[Task] {
        self.todos.items()
    }

    pub fn store(&self) -> &S {
        self.todos.store()
    }

    /// Creates a task at the head of the list.
    pub fn add_todo(&mut self, draft: TodoDraft) -> ServiceResult<Task> {
        require_field("text", &draft.text)?;
        require_field("userName", &draft.user_name)?;
        require_field("assignedTo", &draft.assigned_to)?;
        let due_date = draft.due_date.ok_or(ServiceError::MissingField("dueDate"))?;

        let task = Task {
            id: new_record_id(),
            text: draft.text,
            completed: false,
            created_at: Utc::now(),
            user_name: draft.user_name,
            assigned_to: draft.assigned_to,
            due_date,
            priority: draft.priority,
        };
        task.validate()?;

        self.todos.prepend(task.clone())?;
        info!(
            "event=todo_add module=todo status=ok priority={} count={}",
            task.priority.as_str(),
            self.todos.items().len()
        );
        self.notifier.notify(Notice::info(
            "New Task Added",
            format!(
                "Task \"{}\" has been assigned to {}",
                task.text, task.assigned_to
            ),
        ));
        Ok(task)
    }

    /// Sets the completion flag; returns the updated task, `None` if unknown.
    pub fn toggle_todo(&mut self, id: &str, completed: bool) -> ServiceResult<Option<Task>> {
        if self.todos.find(id).is_none() {
            return Ok(None);
        }

        let updated = self.todos.update(|tasks| {
            tasks.iter_mut().find(|task| task.id == id).map(|task| {
                task.completed = completed;
                task.clone()
            })
        })?;

        if let Some(task) = &updated {
            info!("event=todo_toggle module=todo status=ok completed={completed}");
            let (title, state) = if completed {
                ("Task Completed", "completed")
            } else {
                ("Task Uncompleted", "marked as pending")
            };
            self.notifier.notify(Notice::info(
                title,
                format!("Task \"{}\" has been {state}", task.text),
            ));
        }
        Ok(updated)
    }

    /// Removes a task by id; unknown ids are a no-op.
    pub fn delete_todo(&mut self, id: &str) -> ServiceResult<bool> {
        let removed = self.todos.remove(id)?;
        if removed {
            info!("event=todo_delete module=todo status=ok");
            self.notifier
                .notify(Notice::info("Task Deleted", "The task has been deleted"));
        }
        Ok(removed)
    }

    /// Tasks whose assignee contains `term`, case-insensitively.
    pub fn filtered(&self, term: &str) -> Vec<Task> {
        self.todos
            .items()
            .iter()
            .filter(|task| task.matches_assignee(term))
            .cloned()
            .collect()
    }

    /// Splits the filtered list into pending and completed buckets.
    pub fn grouped(&self, term: &str) -> TodoGroups {
        let (completed, pending): (Vec<Task>, Vec<Task>) = self
            .filtered(term)
            .into_iter()
            .partition(|task| task.completed);
        TodoGroups { pending, completed }
    }

    /// Distinct assignee names in order of first appearance.
    pub fn assignees(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for task in self.todos.items() {
            if !names.iter().any(|name| name == &task.assigned_to) {
                names.push(task.assigned_to.clone());
            }
        }
        names
    }
}
