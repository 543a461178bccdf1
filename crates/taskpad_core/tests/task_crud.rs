use chrono::{Duration, Utc};
use std::collections::HashSet;
use taskpad_core::{
    MemoryBackend, StoreError, TaskPatch, TaskService, TaskStore, TaskValidationError,
};
use uuid::Uuid;

fn service() -> TaskService<MemoryBackend> {
    TaskService::new(TaskStore::new(MemoryBackend::new()))
}

#[test]
fn create_and_list_roundtrip() {
    let service = service();
    let due = Utc::now() + Duration::days(3);

    let before = Utc::now();
    let created = service.create("Pay rent", Some(due)).unwrap();

    let tasks = service.list().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0], created);
    assert_eq!(tasks[0].name, "Pay rent");
    assert_eq!(tasks[0].due_date, Some(due));
    assert!(!tasks[0].completed);
    assert!(tasks[0].created_at >= before);
}

#[test]
fn create_preserves_insertion_order() {
    let service = service();

    let first = service.create("first", None).unwrap();
    let second = service.create("second", None).unwrap();
    let third = service.create("third", None).unwrap();

    let ids: Vec<_> = service.list().unwrap().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![first.id, second.id, third.id]);
}

#[test]
fn create_assigns_unique_ids() {
    let service = service();

    for n in 0..5 {
        service.create(format!("task {n}"), None).unwrap();
    }

    let ids: HashSet<_> = service.list().unwrap().into_iter().map(|t| t.id).collect();
    assert_eq!(ids.len(), 5);
}

#[test]
fn create_with_empty_name_fails_and_leaves_storage_unchanged() {
    let service = service();
    service.create("existing", None).unwrap();

    let err = service.create("", None).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(TaskValidationError::EmptyName)
    ));

    let tasks = service.list().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].name, "existing");
}

#[test]
fn update_sets_completed_and_nothing_else() {
    let service = service();
    let due = Utc::now() + Duration::days(1);
    let created = service.create("toggle me", Some(due)).unwrap();

    let updated = service
        .update(
            created.id,
            TaskPatch {
                completed: Some(true),
                ..TaskPatch::default()
            },
        )
        .unwrap();

    assert!(updated.completed);
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.due_date, created.due_date);
    assert_eq!(updated.created_at, created.created_at);

    assert_eq!(service.list().unwrap(), vec![updated]);
}

#[test]
fn update_can_uncomplete_a_task() {
    let service = service();
    let created = service.create("flip twice", None).unwrap();

    service.set_completed(created.id, true).unwrap();
    let reverted = service.set_completed(created.id, false).unwrap();

    assert!(!reverted.completed);
}

#[test]
fn update_can_set_and_clear_due_date() {
    let service = service();
    let created = service.create("reschedule me", None).unwrap();
    let due = Utc::now() + Duration::days(7);

    let updated = service
        .update(
            created.id,
            TaskPatch {
                due_date: Some(Some(due)),
                ..TaskPatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.due_date, Some(due));

    let cleared = service
        .update(
            created.id,
            TaskPatch {
                due_date: Some(None),
                ..TaskPatch::default()
            },
        )
        .unwrap();
    assert_eq!(cleared.due_date, None);
}

#[test]
fn update_with_empty_patch_is_a_noop() {
    let service = service();
    let created = service.create("unchanged", None).unwrap();

    let updated = service.update(created.id, TaskPatch::default()).unwrap();

    assert_eq!(updated, created);
    assert_eq!(service.list().unwrap(), vec![created]);
}

#[test]
fn update_not_found_leaves_storage_unchanged() {
    let service = service();
    let created = service.create("bystander", None).unwrap();

    let missing = Uuid::new_v4();
    let err = service
        .update(
            missing,
            TaskPatch {
                completed: Some(true),
                ..TaskPatch::default()
            },
        )
        .unwrap_err();

    assert!(matches!(err, StoreError::NotFound(id) if id == missing));
    assert_eq!(service.list().unwrap(), vec![created]);
}

#[test]
fn delete_removes_exactly_the_matching_task() {
    let service = service();
    let doomed = service.create("doomed", None).unwrap();
    let survivor = service.create("survivor", None).unwrap();

    service.delete(doomed.id).unwrap();

    let tasks = service.list().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, survivor.id);
}

#[test]
fn delete_not_found_changes_nothing() {
    let service = service();
    let created = service.create("bystander", None).unwrap();

    let missing = Uuid::new_v4();
    let err = service.delete(missing).unwrap_err();

    assert!(matches!(err, StoreError::NotFound(id) if id == missing));
    assert_eq!(service.list().unwrap(), vec![created]);
}

#[test]
fn callers_receive_snapshots_not_live_references() {
    let service = service();
    service.create("immutable from outside", None).unwrap();

    let mut snapshot = service.list().unwrap();
    snapshot[0].name = "mutated copy".to_string();

    assert_eq!(service.list().unwrap()[0].name, "immutable from outside");
}
