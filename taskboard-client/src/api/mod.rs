/// Task API seam
///
/// The board talks to the server only through the `TaskApi` trait, so the
/// same sync rules run against the HTTP API and against the in-memory
/// double used in tests.
///
/// # Implementations
///
/// - `HttpTaskApi`: JSON over HTTP against `GET/POST/PUT /tasks`
/// - `InMemoryTaskApi`: A store kept in process, with write failures on demand

pub mod http;
pub mod memory;

pub use http::HttpTaskApi;
pub use memory::InMemoryTaskApi;

use crate::error::ClientResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use taskboard_shared::models::task::{CreateTask, Task, TaskPriority, TaskStatus};

/// Operations the board needs from the task store
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Fetches every task
    async fn list_tasks(&self) -> ClientResult<Vec<Task>>;

    /// Creates a task and returns it with its assigned id
    async fn create_task(&self, task: &CreateTask) -> ClientResult<Task>;

    /// Overwrites the fields present in `update` and returns the stored task
    async fn update_task(&self, update: &TaskUpdate) -> ClientResult<Task>;
}

/// Body of a `PUT /tasks` request
///
/// Only the fields that are `Some` are sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskUpdate {
    pub id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl TaskUpdate {
    /// A status-only change, as sent when a card is dropped on another column
    pub fn status(id: i64, status: TaskStatus) -> Self {
        Self {
            id,
            title: None,
            description: None,
            status: Some(status),
            priority: None,
            assignee: None,
            start_date: None,
            end_date: None,
        }
    }

    /// The whole cached record, as sent by the advance button
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            title: Some(task.title.clone()),
            description: task.description.clone(),
            status: Some(task.status),
            priority: Some(task.priority),
            assignee: task.assignee.clone(),
            start_date: task.start_date,
            end_date: task.end_date,
        }
    }
}
