//! # Taskboard Client Library
//!
//! The kanban side of the task board: an API client, the board's in-memory
//! state with its sync rules, and a plain-text renderer.
//!
//! ## Modules
//!
//! - `api`: The `TaskApi` seam, its HTTP implementation and an in-memory double
//! - `board`: Board state, columns, draft form, advance and drag-and-drop
//! - `error`: Client error type
//! - `render`: Plain-text rendering of the three columns
//!
//! ## Example
//!
//! ```no_run
//! use taskboard_client::{api::HttpTaskApi, board::Board};
//! use taskboard_shared::models::task::TaskStatus;
//!
//! # async fn example() -> Result<(), taskboard_client::error::ClientError> {
//! let mut board = Board::new(HttpTaskApi::new("http://127.0.0.1:8080")?);
//! board.load().await?;
//!
//! board.draft_mut().title = "Write spec".to_string();
//! let id = board.submit_draft().await?.id;
//!
//! let outcome = board.advance(id).await;
//! if outcome.map_or(false, |o| o.is_diverged()) {
//!     board.reload().await?;
//! }
//! println!("{} tasks in progress", board.bucket(TaskStatus::Doing).len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod board;
pub mod error;
pub mod render;
