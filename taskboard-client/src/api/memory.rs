/// In-memory task API
///
/// Keeps tasks in process and follows the server's rules: sequential ids,
/// defaults applied on create, 404 on update of an unknown id. Writes can
/// be made to fail on demand to exercise the board's divergence behavior.
///
/// # Example
///
/// ```
/// use taskboard_client::api::{InMemoryTaskApi, TaskApi};
/// use taskboard_shared::models::task::CreateTask;
///
/// # #[tokio::main]
/// # async fn main() {
/// let api = InMemoryTaskApi::new();
/// let task = api.create_task(&CreateTask::new("Write spec")).await.unwrap();
/// assert_eq!(task.id, 1);
/// # }
/// ```

use super::{TaskApi, TaskUpdate};
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard, PoisonError};
use taskboard_shared::models::task::{CreateTask, Task};

#[derive(Debug, Default)]
struct MemoryState {
    tasks: Vec<Task>,
    last_id: i64,
    fail_writes: bool,
    updates: Vec<TaskUpdate>,
}

/// Task API backed by a vector
#[derive(Debug, Default)]
pub struct InMemoryTaskApi {
    state: Mutex<MemoryState>,
}

impl InMemoryTaskApi {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, create and update calls fail with a 500 and change nothing
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Snapshot of the stored tasks
    pub fn stored(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    /// Every update body received so far, in order
    pub fn received_updates(&self) -> Vec<TaskUpdate> {
        self.lock().updates.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn write_failure() -> ClientError {
    ClientError::Api {
        status: 500,
        message: "An internal error occurred".to_string(),
    }
}

#[async_trait]
impl TaskApi for InMemoryTaskApi {
    async fn list_tasks(&self) -> ClientResult<Vec<Task>> {
        Ok(self.stored())
    }

    async fn create_task(&self, task: &CreateTask) -> ClientResult<Task> {
        let mut state = self.lock();
        if state.fail_writes {
            return Err(write_failure());
        }

        state.last_id += 1;
        let created = Task {
            id: state.last_id,
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            assignee: task.assignee.clone(),
            start_date: task.start_date,
            end_date: task.end_date,
            created_at: Utc::now(),
        };
        state.tasks.push(created.clone());

        Ok(created)
    }

    async fn update_task(&self, update: &TaskUpdate) -> ClientResult<Task> {
        let mut state = self.lock();
        state.updates.push(update.clone());
        if state.fail_writes {
            return Err(write_failure());
        }

        let Some(task) = state.tasks.iter_mut().find(|t| t.id == update.id) else {
            return Err(ClientError::Api {
                status: 404,
                message: format!("Task {} not found", update.id),
            });
        };

        if let Some(title) = &update.title {
            task.title = title.clone();
        }
        if let Some(description) = &update.description {
            task.description = Some(description.clone());
        }
        if let Some(status) = update.status {
            task.status = status;
        }
        if let Some(priority) = update.priority {
            task.priority = priority;
        }
        if let Some(assignee) = &update.assignee {
            task.assignee = Some(assignee.clone());
        }
        if let Some(start_date) = update.start_date {
            task.start_date = Some(start_date);
        }
        if let Some(end_date) = update.end_date {
            task.end_date = Some(end_date);
        }

        Ok(task.clone())
    }
}
