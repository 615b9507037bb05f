/// Database models for Taskboard
///
/// # Models
///
/// - `task`: The task entity shown on the board, with its create/list/update queries
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::task::{CreateTask, Task};
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::in_memory()).await?;
///
/// let task = Task::create(&pool, CreateTask::new("Write spec")).await?;
/// assert_eq!(task.status.as_str(), "todo");
/// # Ok(())
/// # }
/// ```

pub mod task;
