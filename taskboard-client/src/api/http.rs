/// HTTP implementation of the task API
///
/// # Example
///
/// ```no_run
/// use taskboard_client::api::{HttpTaskApi, TaskApi};
///
/// # async fn example() -> Result<(), taskboard_client::error::ClientError> {
/// let api = HttpTaskApi::new("http://127.0.0.1:8080")?;
/// let tasks = api.list_tasks().await?;
/// println!("{} tasks on the board", tasks.len());
/// # Ok(())
/// # }
/// ```

use super::{TaskApi, TaskUpdate};
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use std::time::Duration;
use taskboard_shared::models::task::{CreateTask, Task};
use tracing::debug;

/// Default request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Task API client over HTTP
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: Client,
    tasks_url: String,
}

/// Error body returned by the server
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl HttpTaskApi {
    /// Creates a client for the server at `base_url` (e.g. `http://127.0.0.1:8080`)
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            tasks_url: format!("{}/tasks", base_url.trim_end_matches('/')),
        })
    }

    /// URL of the tasks resource
    pub fn tasks_url(&self) -> &str {
        &self.tasks_url
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self) -> ClientResult<Vec<Task>> {
        debug!(url = %self.tasks_url, "Fetching tasks");

        let response = self.client.get(&self.tasks_url).send().await?;
        Self::decode(response).await
    }

    async fn create_task(&self, task: &CreateTask) -> ClientResult<Task> {
        debug!(title = %task.title, "Creating task");

        let response = self.client.post(&self.tasks_url).json(task).send().await?;
        Self::decode(response).await
    }

    async fn update_task(&self, update: &TaskUpdate) -> ClientResult<Task> {
        debug!(task_id = update.id, status = ?update.status, "Updating task");

        let response = self.client.put(&self.tasks_url).json(update).send().await?;
        Self::decode(response).await
    }
}
