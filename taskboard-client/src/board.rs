/// Board state and sync rules
///
/// The board loads every task once, then works on its own copy. Creates are
/// appended only after the server answers, so the cached record carries the
/// server-assigned id. Status changes are applied to the copy whatever the
/// server says and are never rolled back: each one returns a `SyncOutcome`
/// and the caller decides whether a failed write is worth a `reload()`.
///
/// # Moving tasks
///
/// - **Button** (`advance`): moves a task one step along
///   `todo → doing → done`. The full cached record is sent and the copy is
///   updated once the call returns.
/// - **Drag and drop** (`begin_drag` / `end_drag`): moves a task to any
///   column. The copy is updated before the call is sent and only
///   `{id, status}` goes over the wire.
///
/// # Example
///
/// ```
/// use taskboard_client::api::InMemoryTaskApi;
/// use taskboard_client::board::Board;
/// use taskboard_shared::models::task::TaskStatus;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), taskboard_client::error::ClientError> {
/// let mut board = Board::new(InMemoryTaskApi::new());
/// board.load().await?;
///
/// board.draft_mut().title = "Write spec".to_string();
/// let task = board.submit_draft().await?;
///
/// board.begin_drag(task.id);
/// if let Some(outcome) = board.end_drag(Some(TaskStatus::Done)).await {
///     assert!(outcome.is_confirmed());
/// }
/// assert_eq!(board.bucket(TaskStatus::Done).len(), 1);
/// # Ok(())
/// # }
/// ```

use crate::api::{TaskApi, TaskUpdate};
use crate::error::{ClientError, ClientResult};
use taskboard_shared::models::task::{CreateTask, Task, TaskPriority, TaskStatus};
use tracing::{debug, info, warn};

/// Assignee prefilled in a fresh draft
pub const DEFAULT_ASSIGNEE: &str = "Atrias";

/// The add-task form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub assignee: String,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            priority: TaskPriority::Medium,
            assignee: DEFAULT_ASSIGNEE.to_string(),
        }
    }
}

impl Draft {
    /// Builds the create request; blank optional fields are left out
    fn to_create(&self) -> CreateTask {
        CreateTask {
            title: self.title.trim().to_string(),
            description: non_blank(&self.description),
            status: TaskStatus::Todo,
            priority: self.priority,
            assignee: non_blank(&self.assignee),
            start_date: None,
            end_date: None,
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// One status column as rendered
#[derive(Debug, Clone, PartialEq)]
pub struct Column<'a> {
    pub status: TaskStatus,
    pub tasks: Vec<&'a Task>,
}

impl Column<'_> {
    /// Column heading
    pub fn title(&self) -> &'static str {
        self.status.title()
    }

    /// Number of cards in the column
    pub fn count(&self) -> usize {
        self.tasks.len()
    }
}

/// Result of a status change
///
/// The local move has already happened when this is returned. A failed
/// `result` means the board and the store disagree until the next reload.
#[must_use = "a failed write leaves the board diverged until reload()"]
#[derive(Debug)]
pub struct SyncOutcome {
    /// Task that moved
    pub task_id: i64,

    /// Status now shown on the board
    pub status: TaskStatus,

    /// Server answer for the update call
    pub result: ClientResult<Task>,
}

impl SyncOutcome {
    /// The server accepted the change
    pub fn is_confirmed(&self) -> bool {
        self.result.is_ok()
    }

    /// The server did not accept the change, the board shows a status the
    /// store may not have
    pub fn is_diverged(&self) -> bool {
        self.result.is_err()
    }

    /// Converts into the server result
    pub fn into_result(self) -> ClientResult<Task> {
        self.result
    }
}

/// Kanban board over a task API
pub struct Board<A: TaskApi> {
    api: A,
    tasks: Vec<Task>,
    draft: Draft,
    active: Option<Task>,
}

impl<A: TaskApi> Board<A> {
    /// Creates an empty board; call `load` to fill it
    pub fn new(api: A) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            draft: Draft::default(),
            active: None,
        }
    }

    /// The underlying API
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetches every task and replaces the local copy
    ///
    /// On error the previous copy is kept.
    pub async fn load(&mut self) -> ClientResult<()> {
        let tasks = self.api.list_tasks().await?;
        debug!(count = tasks.len(), "Board loaded");
        self.tasks = tasks;
        Ok(())
    }

    /// Same as `load`; used to reconcile after a diverged write
    pub async fn reload(&mut self) -> ClientResult<()> {
        info!("Reloading board");
        self.load().await
    }

    /// Every cached task in load order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Cached task by id
    pub fn task(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Cached tasks with the given status, in load order
    pub fn bucket(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    /// The three columns in board order
    pub fn columns(&self) -> Vec<Column<'_>> {
        TaskStatus::ALL
            .iter()
            .map(|&status| Column {
                status,
                tasks: self.bucket(status),
            })
            .collect()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// Posts the draft as a new `todo` task
    ///
    /// On success the returned record is appended and the draft is reset.
    /// On error nothing is appended and the draft is kept for another try.
    ///
    /// # Errors
    ///
    /// `ClientError::EmptyTitle` without a request when the title is blank,
    /// otherwise whatever the API returns.
    pub async fn submit_draft(&mut self) -> ClientResult<Task> {
        if self.draft.title.trim().is_empty() {
            return Err(ClientError::EmptyTitle);
        }

        let task = self.api.create_task(&self.draft.to_create()).await?;
        info!(task_id = task.id, title = %task.title, "Task added");

        self.tasks.push(task.clone());
        self.draft = Draft::default();

        Ok(task)
    }

    /// Moves a task one step along `todo → doing → done`
    ///
    /// Returns `None` without a request when the task is not on the board or
    /// is already done.
    pub async fn advance(&mut self, id: i64) -> Option<SyncOutcome> {
        let task = self.task(id)?;
        let target = task.status.next()?;

        let mut body = TaskUpdate::from_task(task);
        body.status = Some(target);

        let result = self.api.update_task(&body).await;
        self.set_status(id, target);

        Some(self.outcome(id, target, result))
    }

    /// Picks up a card; `false` when the id is not on the board
    pub fn begin_drag(&mut self, id: i64) -> bool {
        self.active = self.task(id).cloned();
        self.active.is_some()
    }

    /// The card being dragged, for the floating preview
    pub fn active_drag(&self) -> Option<&Task> {
        self.active.as_ref()
    }

    /// Drops the card outside any column
    pub fn cancel_drag(&mut self) {
        self.active = None;
    }

    /// Drops the card on `target`
    ///
    /// Ends the drag in every case. Returns `None` without a request when
    /// no card was picked up, there is no target, or the card is dropped on
    /// its own column.
    pub async fn end_drag(&mut self, target: Option<TaskStatus>) -> Option<SyncOutcome> {
        let active = self.active.take()?;
        self.move_task(active.id, target?).await
    }

    /// Moves a task to `target` as a drop would
    pub async fn move_task(&mut self, id: i64, target: TaskStatus) -> Option<SyncOutcome> {
        if self.task(id)?.status == target {
            return None;
        }

        self.set_status(id, target);

        let result = self.api.update_task(&TaskUpdate::status(id, target)).await;
        Some(self.outcome(id, target, result))
    }

    fn set_status(&mut self, id: i64, status: TaskStatus) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.status = status;
        }
    }

    fn outcome(&self, task_id: i64, status: TaskStatus, result: ClientResult<Task>) -> SyncOutcome {
        match &result {
            Ok(_) => debug!(task_id, status = %status, "Status change stored"),
            Err(e) => warn!(task_id, status = %status, error = %e, "Status change not stored, board diverged"),
        }

        SyncOutcome {
            task_id,
            status,
            result,
        }
    }
}
