/// Task endpoints
///
/// The whole board is served by one resource:
///
/// - `GET /tasks` - List every task
/// - `POST /tasks` - Create a task
/// - `PUT /tasks` - Patch a task, identified by the `id` in the body
///
/// Requests are not authenticated; every request is applied as received.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use taskboard_shared::models::task::{CreateTask, Task, TaskPriority, TaskStatus, UpdateTask};
use tracing::{debug, info, warn};
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    pub description: Option<String>,

    /// Initial column (default: todo)
    pub status: Option<TaskStatus>,

    /// Priority (default: medium)
    pub priority: Option<TaskPriority>,

    pub assignee: Option<String>,

    /// Planned start date (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,

    /// Planned end date (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,
}

impl From<CreateTaskRequest> for CreateTask {
    fn from(req: CreateTaskRequest) -> Self {
        CreateTask {
            title: req.title,
            description: req.description,
            status: req.status.unwrap_or_default(),
            priority: req.priority.unwrap_or_default(),
            assignee: req.assignee,
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

/// Update task request
///
/// Absent fields are left alone. For the nullable fields an explicit `null`
/// clears the stored value. Fields the task does not accept from clients
/// (`created_at`, or anything unknown) are ignored, so a board may send
/// back a whole task record.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// ID of the task to update
    pub id: i64,

    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,

    pub status: Option<TaskStatus>,

    pub priority: Option<TaskPriority>,

    #[serde(default, deserialize_with = "nullable")]
    pub assignee: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    pub start_date: Option<Option<NaiveDate>>,

    #[serde(default, deserialize_with = "nullable")]
    pub end_date: Option<Option<NaiveDate>>,
}

impl UpdateTaskRequest {
    /// Splits the request into the target id and the column changes
    fn into_parts(self) -> (i64, UpdateTask) {
        (
            self.id,
            UpdateTask {
                title: self.title,
                description: self.description,
                status: self.status,
                priority: self.priority,
                assignee: self.assignee,
                start_date: self.start_date,
                end_date: self.end_date,
            },
        )
    }
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field (`None`)
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Titles are stored trimmed; a title of only whitespace counts as empty
fn normalize_title(title: &mut String) {
    let trimmed = title.trim();
    if trimmed.len() != title.len() {
        *title = trimmed.to_string();
    }
}

/// List tasks
///
/// # Endpoint
///
/// ```text
/// GET /tasks
/// ```
///
/// # Response
///
/// ```json
/// [
///   {
///     "id": 1,
///     "title": "Write spec",
///     "description": null,
///     "status": "todo",
///     "priority": "high",
///     "assignee": "Atrias",
///     "start_date": null,
///     "end_date": null,
///     "created_at": "2025-01-10T12:00:00Z"
///   }
/// ]
/// ```
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    let tasks = Task::list(&state.db).await?;

    debug!(count = tasks.len(), "Listed tasks");

    Ok(Json(tasks))
}

/// Create task
///
/// # Endpoint
///
/// ```text
/// POST /tasks
/// Content-Type: application/json
///
/// { "title": "Write spec", "priority": "high" }
/// ```
///
/// # Response
///
/// The created task, including its id and `created_at`.
///
/// # Errors
///
/// - `400 Bad Request`: Body is not JSON, title missing or empty, unknown
///   status/priority, malformed date
/// - `500 Internal Server Error`: Store failure
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let Json(mut req) = payload?;

    normalize_title(&mut req.title);
    req.validate()?;

    let task = Task::create(&state.db, req.into()).await?;

    info!(
        task_id = task.id,
        status = %task.status,
        priority = %task.priority,
        "Task created"
    );

    Ok(Json(task))
}

/// Update task
///
/// # Endpoint
///
/// ```text
/// PUT /tasks
/// Content-Type: application/json
///
/// { "id": 1, "status": "doing" }
/// ```
///
/// # Response
///
/// The task after the update.
///
/// # Errors
///
/// - `400 Bad Request`: Body is not JSON, missing id, empty title, unknown
///   status/priority, malformed date
/// - `404 Not Found`: No task has this id (nothing is written)
/// - `500 Internal Server Error`: Store failure
pub async fn update_task(
    State(state): State<AppState>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let Json(mut req) = payload?;

    if let Some(title) = req.title.as_mut() {
        normalize_title(title);
    }
    req.validate()?;

    let (id, changes) = req.into_parts();

    match Task::update(&state.db, id, changes).await? {
        Some(task) => {
            info!(task_id = task.id, status = %task.status, "Task updated");
            Ok(Json(task))
        }
        None => {
            warn!(task_id = id, "Update for unknown task");
            Err(ApiError::NotFound(format!("Task {} not found", id)))
        }
    }
}
