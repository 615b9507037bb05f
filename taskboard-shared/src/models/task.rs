/// Task model and database operations
///
/// This module provides the Task model: the one entity of the board. A task
/// sits in exactly one status column and carries priority, assignee and
/// optional planning dates.
///
/// # Lifecycle
///
/// ```text
/// todo → doing → done      (button advance)
/// any  → any               (drag-and-drop reassignment)
/// ```
///
/// Tasks are created once, patched by id, and never deleted.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     title TEXT NOT NULL CHECK (length(trim(title)) > 0),
///     description TEXT,
///     status TEXT NOT NULL DEFAULT 'todo'
///         CHECK (status IN ('todo', 'doing', 'done')),
///     priority TEXT NOT NULL DEFAULT 'medium'
///         CHECK (priority IN ('low', 'medium', 'high')),
///     assignee TEXT,
///     start_date TEXT,
///     end_date TEXT,
///     created_at TEXT NOT NULL
/// );
/// CREATE INDEX status_idx ON tasks (status);
/// CREATE INDEX priority_idx ON tasks (priority);
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::task::{CreateTask, Task, TaskPriority, TaskStatus, UpdateTask};
/// use taskboard_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::in_memory()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     priority: TaskPriority::High,
///     ..CreateTask::new("Write spec")
/// }).await?;
///
/// // Move it to the "doing" column
/// Task::update(&pool, task.id, UpdateTask {
///     status: Some(TaskStatus::Doing),
///     ..Default::default()
/// }).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::fmt;
use std::str::FromStr;

/// Columns selected for every task query, in `Task` field order
const TASK_COLUMNS: &str =
    "id, title, description, status, priority, assignee, start_date, end_date, created_at";

/// Error returned when a status or priority string is not one of the known values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} '{value}': expected one of {expected}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

/// Board column a task belongs to
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not started yet
    #[default]
    Todo,

    /// In progress
    Doing,

    /// Finished
    Done,
}

impl TaskStatus {
    /// All statuses in column order
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::Doing, TaskStatus::Done];

    /// Converts status to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::Doing => "doing",
            TaskStatus::Done => "done",
        }
    }

    /// Column heading shown on the board
    pub fn title(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::Doing => "Doing",
            TaskStatus::Done => "Done",
        }
    }

    /// Status reached by the advance button, `None` once done
    pub fn next(&self) -> Option<TaskStatus> {
        match self {
            TaskStatus::Todo => Some(TaskStatus::Doing),
            TaskStatus::Doing => Some(TaskStatus::Done),
            TaskStatus::Done => None,
        }
    }

    /// Label of the advance button for tasks in this column
    pub fn action_label(&self) -> Option<&'static str> {
        match self {
            TaskStatus::Todo => Some("Start"),
            TaskStatus::Doing => Some("Complete"),
            TaskStatus::Done => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "doing" => Ok(TaskStatus::Doing),
            "done" => Ok(TaskStatus::Done),
            other => Err(ParseEnumError {
                kind: "status",
                value: other.to_string(),
                expected: "todo, doing, done",
            }),
        }
    }
}

/// Task priority
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    /// Converts priority to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            other => Err(ParseEnumError {
                kind: "priority",
                value: other.to_string(),
                expected: "low, medium, high",
            }),
        }
    }
}

/// Task model representing one card on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID, assigned by the store
    pub id: i64,

    /// Short title shown on the card
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Column the task sits in
    pub status: TaskStatus,

    /// Priority badge
    pub priority: TaskPriority,

    /// Person working on the task
    pub assignee: Option<String>,

    /// Planned start date
    pub start_date: Option<NaiveDate>,

    /// Planned end date
    pub end_date: Option<NaiveDate>,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTask {
    /// Task title (must not be blank)
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Initial column (default todo)
    #[serde(default)]
    pub status: TaskStatus,

    /// Priority (default medium)
    #[serde(default)]
    pub priority: TaskPriority,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl CreateTask {
    /// A new task with only a title; every other field takes its default
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            assignee: None,
            start_date: None,
            end_date: None,
        }
    }
}

/// Partial update of a task
///
/// `None` leaves a column untouched. For nullable columns the inner option
/// is the new value, so `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assignee: Option<Option<String>>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
}

impl UpdateTask {
    /// Returns true when no column would change
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.assignee.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

impl Task {
    /// Creates a new task
    ///
    /// The store assigns the id; `created_at` is stamped here, once.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including when a CHECK
    /// constraint rejects a blank title.
    pub async fn create(pool: &SqlitePool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO tasks (title, description, status, priority, assignee, start_date, end_date, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {TASK_COLUMNS}
            "#
        );

        let task = sqlx::query_as::<_, Task>(&query)
            .bind(data.title)
            .bind(data.description)
            .bind(data.status)
            .bind(data.priority)
            .bind(data.assignee)
            .bind(data.start_date)
            .bind(data.end_date)
            .bind(Utc::now())
            .fetch_one(pool)
            .await?;

        Ok(task)
    }

    /// Lists every task in the store's natural order
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY id");

        let tasks = sqlx::query_as::<_, Task>(&query).fetch_all(pool).await?;

        Ok(tasks)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?");

        let task = sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(task)
    }

    /// Overwrites the given columns of one task
    ///
    /// Returns `None` when no task has this id; in that case no row is
    /// written. An empty patch returns the current row unchanged.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        if data.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        let mut assignments = Vec::new();
        if data.title.is_some() {
            assignments.push("title = ?");
        }
        if data.description.is_some() {
            assignments.push("description = ?");
        }
        if data.status.is_some() {
            assignments.push("status = ?");
        }
        if data.priority.is_some() {
            assignments.push("priority = ?");
        }
        if data.assignee.is_some() {
            assignments.push("assignee = ?");
        }
        if data.start_date.is_some() {
            assignments.push("start_date = ?");
        }
        if data.end_date.is_some() {
            assignments.push("end_date = ?");
        }

        let query = format!(
            "UPDATE tasks SET {} WHERE id = ? RETURNING {TASK_COLUMNS}",
            assignments.join(", ")
        );

        // Binds must follow the order of `assignments`
        let mut q = sqlx::query_as::<_, Task>(&query);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }
        if let Some(priority) = data.priority {
            q = q.bind(priority);
        }
        if let Some(assignee) = data.assignee {
            q = q.bind(assignee);
        }
        if let Some(start_date) = data.start_date {
            q = q.bind(start_date);
        }
        if let Some(end_date) = data.end_date {
            q = q.bind(end_date);
        }

        let task = q.bind(id).fetch_optional(pool).await?;

        Ok(task)
    }

    /// Counts all tasks
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{
        migrations::run_migrations,
        pool::{create_pool, DatabaseConfig},
    };
    use serde_json::json;

    async fn test_pool() -> SqlitePool {
        let pool = create_pool(DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    #[test]
    fn test_task_status_as_str() {
        assert_eq!(TaskStatus::Todo.as_str(), "todo");
        assert_eq!(TaskStatus::Doing.as_str(), "doing");
        assert_eq!(TaskStatus::Done.as_str(), "done");
    }

    #[test]
    fn test_task_status_next() {
        assert_eq!(TaskStatus::Todo.next(), Some(TaskStatus::Doing));
        assert_eq!(TaskStatus::Doing.next(), Some(TaskStatus::Done));
        assert_eq!(TaskStatus::Done.next(), None);
    }

    #[test]
    fn test_task_status_labels() {
        let titles: Vec<&str> = TaskStatus::ALL.iter().map(|s| s.title()).collect();
        assert_eq!(titles, vec!["To Do", "Doing", "Done"]);

        assert_eq!(TaskStatus::Todo.action_label(), Some("Start"));
        assert_eq!(TaskStatus::Doing.action_label(), Some("Complete"));
        assert_eq!(TaskStatus::Done.action_label(), None);
    }

    #[test]
    fn test_enum_defaults() {
        assert_eq!(TaskStatus::default(), TaskStatus::Todo);
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        assert_eq!("doing".parse::<TaskStatus>(), Ok(TaskStatus::Doing));
        assert_eq!("high".parse::<TaskPriority>(), Ok(TaskPriority::High));

        let err = "blocked".parse::<TaskStatus>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid status 'blocked': expected one of todo, doing, done"
        );
        assert!("urgent".parse::<TaskPriority>().is_err());
        assert!("Todo".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_serde_rejects_unknown_status() {
        let result: Result<CreateTask, _> =
            serde_json::from_value(json!({ "title": "x", "status": "blocked" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_create_task_defaults_from_json() {
        let data: CreateTask = serde_json::from_value(json!({ "title": "Write spec" })).unwrap();
        assert_eq!(data, CreateTask::new("Write spec"));
    }

    #[test]
    fn test_update_task_is_empty() {
        assert!(UpdateTask::default().is_empty());
        assert!(!UpdateTask {
            description: Some(None),
            ..Default::default()
        }
        .is_empty());
    }

    #[tokio::test]
    async fn test_create_with_title_only() {
        let pool = test_pool().await;

        let task = Task::create(&pool, CreateTask::new("Write spec")).await.unwrap();

        assert_eq!(task.id, 1);
        assert_eq!(task.title, "Write spec");
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.description, None);
        assert_eq!(task.assignee, None);
        assert!(task.created_at <= Utc::now());
    }

    #[tokio::test]
    async fn test_create_stores_dates() {
        let pool = test_pool().await;

        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let created = Task::create(
            &pool,
            CreateTask {
                start_date: Some(start),
                end_date: Some(end),
                assignee: Some("Atrias".to_string()),
                ..CreateTask::new("Plan sprint")
            },
        )
        .await
        .unwrap();

        let found = Task::find_by_id(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.start_date, Some(start));
        assert_eq!(found.end_date, Some(end));
    }

    #[tokio::test]
    async fn test_blank_title_rejected_by_store() {
        let pool = test_pool().await;

        let result = Task::create(&pool, CreateTask::new("   ")).await;
        assert!(result.is_err());
        assert_eq!(Task::count(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_returns_every_task_with_distinct_ids() {
        let pool = test_pool().await;

        for i in 0..5 {
            Task::create(&pool, CreateTask::new(format!("Task {i}")))
                .await
                .unwrap();
        }

        let tasks = Task::list(&pool).await.unwrap();
        assert_eq!(tasks.len(), 5);

        let mut ids: Vec<i64> = tasks.iter().map(|t| t.id).collect();
        ids.dedup();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_update_status_leaves_other_fields() {
        let pool = test_pool().await;

        let created = Task::create(
            &pool,
            CreateTask {
                description: Some("Draft the API section".to_string()),
                priority: TaskPriority::High,
                ..CreateTask::new("Write spec")
            },
        )
        .await
        .unwrap();

        let updated = Task::update(
            &pool,
            created.id,
            UpdateTask {
                status: Some(TaskStatus::Doing),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(
            updated,
            Task {
                status: TaskStatus::Doing,
                ..created
            }
        );
    }

    #[tokio::test]
    async fn test_update_can_clear_nullable_columns() {
        let pool = test_pool().await;

        let created = Task::create(
            &pool,
            CreateTask {
                description: Some("temporary".to_string()),
                assignee: Some("Correct".to_string()),
                ..CreateTask::new("Review")
            },
        )
        .await
        .unwrap();

        let updated = Task::update(
            &pool,
            created.id,
            UpdateTask {
                description: Some(None),
                assignee: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(updated.description, None);
        assert_eq!(updated.assignee, None);
        assert_eq!(updated.title, "Review");
    }

    #[tokio::test]
    async fn test_update_unknown_id_changes_nothing() {
        let pool = test_pool().await;

        let existing = Task::create(&pool, CreateTask::new("Keep me")).await.unwrap();

        let result = Task::update(
            &pool,
            999,
            UpdateTask {
                status: Some(TaskStatus::Done),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert!(result.is_none());
        assert_eq!(Task::count(&pool).await.unwrap(), 1);
        assert_eq!(
            Task::find_by_id(&pool, existing.id).await.unwrap().unwrap(),
            existing
        );
    }

    #[tokio::test]
    async fn test_empty_update_returns_current_row() {
        let pool = test_pool().await;

        let created = Task::create(&pool, CreateTask::new("Idle")).await.unwrap();

        let same = Task::update(&pool, created.id, UpdateTask::default())
            .await
            .unwrap();
        assert_eq!(same, Some(created));

        let missing = Task::update(&pool, 42, UpdateTask::default()).await.unwrap();
        assert!(missing.is_none());
    }
}
