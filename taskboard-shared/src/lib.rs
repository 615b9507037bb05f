//! # Taskboard Shared Library
//!
//! This crate contains the task model and store access used by both the
//! Taskboard API server and the board client.
//!
//! ## Module Organization
//!
//! - `models`: The task entity, its status/priority types and CRUD queries
//! - `db`: SQLite connection pool and embedded migrations

pub mod db;
pub mod models;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
