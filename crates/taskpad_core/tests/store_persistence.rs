use chrono::{Duration, Utc};
use taskpad_core::{
    FileBackend, MemoryBackend, SqliteBackend, StoreError, Task, TaskService, TaskStore,
    TaskValidationError,
};

#[test]
fn empty_backends_load_an_empty_collection() {
    let dir = tempfile::tempdir().unwrap();

    assert!(TaskStore::new(MemoryBackend::new()).load().unwrap().is_empty());
    assert!(TaskStore::new(FileBackend::new(dir.path()).unwrap())
        .load()
        .unwrap()
        .is_empty());
    assert!(TaskStore::new(SqliteBackend::open_in_memory().unwrap())
        .load()
        .unwrap()
        .is_empty());
}

#[test]
fn save_of_loaded_collection_is_a_noop_on_stored_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FileBackend::new(dir.path()).unwrap();
    let path = backend.path().to_path_buf();
    let store = TaskStore::new(backend);

    let tasks = vec![
        Task::new("with due date", Some(Utc::now() + Duration::days(2))).unwrap(),
        Task::new("without due date", None).unwrap(),
    ];
    store.save(&tasks).unwrap();
    let first_bytes = std::fs::read(&path).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded, tasks);

    store.save(&loaded).unwrap();
    let second_bytes = std::fs::read(&path).unwrap();
    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn malformed_blob_fails_with_invalid_data() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FileBackend::new(dir.path()).unwrap();
    std::fs::write(backend.path(), b"definitely not json").unwrap();

    let err = TaskStore::new(backend).load().unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(_)));
}

#[test]
fn stored_record_without_due_date_field_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FileBackend::new(dir.path()).unwrap();
    std::fs::write(
        backend.path(),
        br#"[{"id":"11111111-2222-4333-8444-555555555555","name":"carried over","completed":false,"createdAt":"2026-01-15T08:00:00Z"}]"#,
    )
    .unwrap();

    let tasks = TaskStore::new(backend).load().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].name, "carried over");
    assert_eq!(tasks[0].due_date, None);
}

#[test]
fn stored_record_with_null_due_date_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FileBackend::new(dir.path()).unwrap();
    std::fs::write(
        backend.path(),
        br#"[{"id":"11111111-2222-4333-8444-555555555555","name":"no deadline","dueDate":null,"completed":false,"createdAt":"2026-01-15T08:00:00Z"}]"#,
    )
    .unwrap();

    let tasks = TaskStore::new(backend).load().unwrap();
    assert_eq!(tasks[0].due_date, None);
}

#[test]
fn stored_record_failing_validation_is_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FileBackend::new(dir.path()).unwrap();
    std::fs::write(
        backend.path(),
        br#"[{"id":"11111111-2222-4333-8444-555555555555","name":"  ","dueDate":null,"completed":false,"createdAt":"2026-01-15T08:00:00Z"}]"#,
    )
    .unwrap();

    let err = TaskStore::new(backend).load().unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(TaskValidationError::EmptyName)
    ));
}

#[test]
fn collection_persists_across_service_instances() {
    let dir = tempfile::tempdir().unwrap();

    let first = TaskService::new(TaskStore::new(FileBackend::new(dir.path()).unwrap()));
    let created = first.create("survives restart", None).unwrap();
    drop(first);

    let second = TaskService::new(TaskStore::new(FileBackend::new(dir.path()).unwrap()));
    let tasks = second.list().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0], created);
}
