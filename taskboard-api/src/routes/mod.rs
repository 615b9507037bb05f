/// API route handlers
///
/// - `health`: Health check endpoint
/// - `tasks`: List, create and update tasks

pub mod health;
pub mod tasks;
