use chrono::{Duration, Utc};
use smarthub_core::db::open_db_in_memory;
use smarthub_core::{
    KeyValueStore, MemoryKvStore, Priority, RecordingNotifier, ServiceError, SqliteKvStore, Task,
    TodoDraft, TodoService,
};

fn draft(text: &str, assignee: &str) -> TodoDraft {
    TodoDraft {
        text: text.to_string(),
        user_name: "Sam".to_string(),
        assigned_to: assignee.to_string(),
        due_date: Some(Utc::now() + Duration::days(2)),
        priority: Priority::High,
    }
}

fn stored_todos(store: &impl KeyValueStore) -> String {
    store.get("todos").unwrap().expect("todos slot should exist")
}

#[test]
fn new_tasks_are_prepended_and_mirrored_to_storage() {
    let store = MemoryKvStore::new();
    let mut service = TodoService::open(&store).unwrap();

    let first = service.add_todo(draft("book room", "Ada")).unwrap();
    let second = service.add_todo(draft("send invites", "Lin")).unwrap();

    assert_eq!(service.todos()[0].id, second.id);
    assert_eq!(service.todos()[1].id, first.id);
    assert_eq!(
        stored_todos(&store),
        serde_json::to_string(service.todos()).unwrap()
    );
}

#[test]
fn incomplete_drafts_are_rejected_without_writes() {
    let store = MemoryKvStore::new();
    let mut service = TodoService::open(&store).unwrap();

    let mut blank_text = draft("x", "Ada");
    blank_text.text = "  ".to_string();
    assert_missing(&mut service, blank_text, "text");

    let mut no_creator = draft("x", "Ada");
    no_creator.user_name.clear();
    assert_missing(&mut service, no_creator, "userName");

    let mut no_assignee = draft("x", "Ada");
    no_assignee.assigned_to.clear();
    assert_missing(&mut service, no_assignee, "assignedTo");

    let mut no_due_date = draft("x", "Ada");
    no_due_date.due_date = None;
    assert_missing(&mut service, no_due_date, "dueDate");

    assert!(service.todos().is_empty());
    assert!(store.is_empty());
}

fn assert_missing<S: KeyValueStore>(
    service: &mut TodoService<S>,
    incomplete: TodoDraft,
    field: &str,
) {
    let err = service.add_todo(incomplete).unwrap_err();
    assert!(
        matches!(err, ServiceError::MissingField(name) if name == field),
        "expected missing {field}, got {err}"
    );
}

#[test]
fn toggling_moves_task_between_groups() {
    let store = MemoryKvStore::new();
    let notifier = RecordingNotifier::new();
    let mut service = TodoService::open(&store)
        .unwrap()
        .with_notifier(notifier.clone());
    let task = service.add_todo(draft("review", "Ada")).unwrap();

    let groups = service.grouped("");
    assert_eq!(groups.pending.len(), 1);
    assert!(groups.completed.is_empty());

    let toggled = service.toggle_todo(&task.id, true).unwrap().unwrap();
    assert!(toggled.completed);
    let groups = service.grouped("");
    assert!(groups.pending.is_empty());
    assert_eq!(groups.completed[0].id, task.id);
    assert_eq!(notifier.last().unwrap().title, "Task Completed");

    service.toggle_todo(&task.id, false).unwrap();
    assert_eq!(service.grouped("").pending.len(), 1);
    assert_eq!(notifier.last().unwrap().title, "Task Uncompleted");
}

#[test]
fn grouping_applies_case_insensitive_assignee_filter() {
    let store = MemoryKvStore::new();
    let mut service = TodoService::open(&store).unwrap();
    service.add_todo(draft("a", "Ada Lovelace")).unwrap();
    service.add_todo(draft("b", "Linus")).unwrap();
    let done = service.add_todo(draft("c", "ada")).unwrap();
    service.toggle_todo(&done.id, true).unwrap();

    let groups = service.grouped("ADA");
    assert_eq!(groups.pending.len(), 1);
    assert_eq!(groups.pending[0].assigned_to, "Ada Lovelace");
    assert_eq!(groups.completed.len(), 1);
    assert!(service.grouped("zzz").pending.is_empty());
}

#[test]
fn delete_removes_exactly_one_task() {
    let store = MemoryKvStore::new();
    let mut service = TodoService::open(&store).unwrap();
    let keep = service.add_todo(draft("keep", "Ada")).unwrap();
    let removed = service.add_todo(draft("drop", "Ada")).unwrap();

    assert!(service.delete_todo(&removed.id).unwrap());
    assert!(!service.delete_todo("unknown").unwrap());
    assert_eq!(service.todos().len(), 1);
    assert_eq!(service.todos()[0].id, keep.id);
}

#[test]
fn tasks_survive_reopen_on_sqlite() {
    let conn = open_db_in_memory().unwrap();
    let id = {
        let mut service = TodoService::open(SqliteKvStore::new(&conn)).unwrap();
        service.add_todo(draft("persist me", "Ada")).unwrap().id
    };

    let reopened = TodoService::open(SqliteKvStore::new(&conn)).unwrap();
    assert_eq!(reopened.todos().len(), 1);
    assert_eq!(reopened.todos()[0].id, id);
    assert_eq!(reopened.todos()[0].priority, Priority::High);
}

#[test]
fn invalid_persisted_payload_falls_back_to_empty() {
    let store = MemoryKvStore::new();
    let mut valid = serde_json::to_value(vec![Task {
        id: "1".to_string(),
        text: "t".to_string(),
        completed: false,
        created_at: Utc::now(),
        user_name: "u".to_string(),
        assigned_to: "a".to_string(),
        due_date: Utc::now(),
        priority: Priority::Low,
    }])
    .unwrap();
    valid[0]["priority"] = serde_json::json!("critical");
    store.set("todos", &valid.to_string()).unwrap();

    let service = TodoService::open(&store).unwrap();
    assert!(service.todos().is_empty());
}
