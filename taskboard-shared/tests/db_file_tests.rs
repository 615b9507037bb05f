/// Integration tests for a file-backed database
///
/// Each test works on its own file under the system temp directory and
/// removes it afterwards.

use std::path::PathBuf;
use taskboard_shared::db::{
    migrations::{get_migration_status, run_migrations},
    pool::{close_pool, create_pool, get_pool_stats, DatabaseConfig},
};
use taskboard_shared::models::task::{CreateTask, Task, TaskStatus, UpdateTask};

/// Path of a database file unique to this test
fn temp_db_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "taskboard-{}-{}.db",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    path
}

fn file_config(path: &PathBuf) -> DatabaseConfig {
    DatabaseConfig {
        url: format!("sqlite://{}", path.display()),
        max_connections: 2,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_database_file_is_created_on_first_start() {
    let path = temp_db_path("create");
    assert!(!path.exists());

    let pool = create_pool(file_config(&path)).await.unwrap();
    assert!(path.exists());
    assert!(get_pool_stats(&pool).total_connections > 0);

    close_pool(pool).await;
    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_tasks_survive_restart() {
    let path = temp_db_path("restart");

    let pool = create_pool(file_config(&path)).await.unwrap();
    run_migrations(&pool).await.unwrap();
    let task = Task::create(&pool, CreateTask::new("Persist me")).await.unwrap();
    let patch = UpdateTask {
        status: Some(TaskStatus::Doing),
        ..Default::default()
    };
    Task::update(&pool, task.id, patch).await.unwrap();
    close_pool(pool).await;

    let pool = create_pool(file_config(&path)).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let status = get_migration_status(&pool).await.unwrap();
    assert!(status.is_up_to_date);
    assert_eq!(status.applied_migrations, 1);

    let tasks = Task::list(&pool).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Persist me");
    assert_eq!(tasks[0].status, TaskStatus::Doing);
    assert_eq!(tasks[0].created_at, task.created_at);

    close_pool(pool).await;
    let _ = std::fs::remove_file(&path);
}
