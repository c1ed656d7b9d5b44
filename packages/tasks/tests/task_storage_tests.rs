// ABOUTME: Storage-level tests for tasks
// ABOUTME: Covers creation defaults, normalization, toggle round-trips, and ownership scoping

use chrono::Utc;
use sqlx::SqlitePool;
use taskgen_tasks::{TaskCreateInput, TaskPriority, TaskStorage};

fn input(title: &str) -> TaskCreateInput {
    TaskCreateInput {
        title: title.to_string(),
        description: String::new(),
        category: None,
        priority: TaskPriority::Medium,
        category_id_int: None,
    }
}

#[sqlx::test(migrator = "taskgen_storage::MIGRATOR")]
async fn create_assigns_fresh_ids_and_defaults(pool: SqlitePool) {
    let storage = TaskStorage::new(pool);

    let first = storage.create_task("user-1", input("Write tests")).await.unwrap();
    let second = storage.create_task("user-1", input("Ship it")).await.unwrap();

    assert!(first.id > 0);
    assert_ne!(first.id, second.id);
    assert_eq!(first.priority, TaskPriority::Medium);
    assert!(!first.done);
    assert!(!first.completed);
    assert_eq!(first.description, "");
    assert_eq!(first.user_id, "user-1");
}

#[sqlx::test(migrator = "taskgen_storage::MIGRATOR")]
async fn list_normalizes_missing_optional_fields(pool: SqlitePool) {
    // Row written outside the storage API, with nothing in due/tags.
    sqlx::query(
        "INSERT INTO tasks (user_id, title, description, priority, done, completed)
         VALUES ('user-1', 'Legacy row', '', 'low', 1, 0)",
    )
    .execute(&pool)
    .await
    .unwrap();

    let before = Utc::now();
    let storage = TaskStorage::new(pool);
    let tasks = storage.list_tasks("user-1").await.unwrap();

    assert_eq!(tasks.len(), 1);
    let task = &tasks[0];
    assert_eq!(task.priority, TaskPriority::Low);
    assert!(task.tags.is_empty());
    assert!(task.due >= before);
    // done=1 dominates the exposed completed value.
    assert!(task.completed);
}

#[sqlx::test(migrator = "taskgen_storage::MIGRATOR")]
async fn list_parses_stored_tags(pool: SqlitePool) {
    sqlx::query(
        r#"INSERT INTO tasks (user_id, title, description, priority, tags)
           VALUES ('user-1', 'Tagged', '', 'medium', '["home","urgent"]')"#,
    )
    .execute(&pool)
    .await
    .unwrap();

    let storage = TaskStorage::new(pool);
    let tasks = storage.list_tasks("user-1").await.unwrap();
    assert_eq!(tasks[0].tags, vec!["home", "urgent"]);
}

#[sqlx::test(migrator = "taskgen_storage::MIGRATOR")]
async fn list_is_scoped_to_owner(pool: SqlitePool) {
    let storage = TaskStorage::new(pool);
    storage.create_task("user-1", input("Mine")).await.unwrap();
    storage.create_task("user-2", input("Theirs")).await.unwrap();

    let tasks = storage.list_tasks("user-1").await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Mine");
}

#[sqlx::test(migrator = "taskgen_storage::MIGRATOR")]
async fn double_toggle_restores_original_flags(pool: SqlitePool) {
    let storage = TaskStorage::new(pool);
    let task = storage.create_task("user-1", input("Toggle me")).await.unwrap();

    let toggled = storage.set_done("user-1", task.id, true).await.unwrap().unwrap();
    assert!(toggled.done);
    assert!(toggled.completed);

    let restored = storage.set_done("user-1", task.id, false).await.unwrap().unwrap();
    assert_eq!(restored.done, task.done);
    assert_eq!(restored.completed, task.completed);
}

#[sqlx::test(migrator = "taskgen_storage::MIGRATOR")]
async fn set_done_ignores_other_users_rows(pool: SqlitePool) {
    let storage = TaskStorage::new(pool);
    let task = storage.create_task("user-1", input("Protected")).await.unwrap();

    let result = storage.set_done("user-2", task.id, true).await.unwrap();
    assert!(result.is_none());

    let tasks = storage.list_tasks("user-1").await.unwrap();
    assert!(!tasks[0].done);
}

#[sqlx::test(migrator = "taskgen_storage::MIGRATOR")]
async fn delete_is_scoped_and_tolerates_missing_rows(pool: SqlitePool) {
    let storage = TaskStorage::new(pool);
    let task = storage.create_task("user-1", input("Keep me safe")).await.unwrap();

    // Another user deleting this id is a no-op.
    storage.delete_task("user-2", task.id).await.unwrap();
    assert_eq!(storage.list_tasks("user-1").await.unwrap().len(), 1);

    // Deleting a nonexistent id succeeds.
    storage.delete_task("user-1", 9999).await.unwrap();

    storage.delete_task("user-1", task.id).await.unwrap();
    assert!(storage.list_tasks("user-1").await.unwrap().is_empty());
}

#[sqlx::test(migrator = "taskgen_storage::MIGRATOR")]
async fn batch_insert_returns_all_rows_in_order(pool: SqlitePool) {
    let storage = TaskStorage::new(pool);

    let inputs: Vec<TaskCreateInput> = (1..=5)
        .map(|i| TaskCreateInput {
            title: format!("Generated task {}", i),
            description: "Generated from topic: React".to_string(),
            category: None,
            priority: TaskPriority::random(),
            category_id_int: Some(1),
        })
        .collect();

    let tasks = storage.create_tasks_batch("user-1", inputs).await.unwrap();

    assert_eq!(tasks.len(), 5);
    for (i, task) in tasks.iter().enumerate() {
        assert_eq!(task.title, format!("Generated task {}", i + 1));
        assert_eq!(task.description, "Generated from topic: React");
        assert_eq!(task.category_id_int, Some(1));
        assert!(!task.done);
    }
    assert!(tasks.windows(2).all(|w| w[0].id < w[1].id));
}
