//! # Taskboard
//!
//! Terminal front-end for the task board.
//!
//! ## Usage
//!
//! ```bash
//! taskboard board
//! taskboard add "Write spec" --priority high
//! taskboard advance 1
//! taskboard move 1 done
//! ```
//!
//! The server defaults to `http://127.0.0.1:8080`; override it with
//! `--server` or `TASKBOARD_URL`.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use taskboard_client::{
    api::HttpTaskApi,
    board::{Board, SyncOutcome},
    render::{render_board, render_card},
};
use taskboard_shared::models::task::{TaskPriority, TaskStatus};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Kanban board for the taskboard API", long_about = None)]
#[command(version)]
struct Cli {
    /// Base URL of the taskboard API
    #[arg(long, env = "TASKBOARD_URL", default_value = "http://127.0.0.1:8080")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the three columns
    Board,

    /// Add a task to the To Do column
    Add {
        /// Task title
        title: String,

        /// Longer description
        #[arg(short, long)]
        description: Option<String>,

        /// low, medium or high
        #[arg(short, long, default_value = "medium")]
        priority: TaskPriority,

        /// Who works on it
        #[arg(short, long)]
        assignee: Option<String>,
    },

    /// Move a task one column to the right
    Advance {
        /// Task id
        id: i64,
    },

    /// Move a task to any column
    Move {
        /// Task id
        id: i64,

        /// todo, doing or done
        status: TaskStatus,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskboard=warn,taskboard_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let api = HttpTaskApi::new(&cli.server)?;
    let mut board = Board::new(api);
    board
        .load()
        .await
        .with_context(|| format!("Failed to load tasks from {}", cli.server))?;

    match cli.command {
        Commands::Board => {}
        Commands::Add {
            title,
            description,
            priority,
            assignee,
        } => {
            let draft = board.draft_mut();
            draft.title = title;
            draft.priority = priority;
            if let Some(description) = description {
                draft.description = description;
            }
            if let Some(assignee) = assignee {
                draft.assignee = assignee;
            }

            let task = board.submit_draft().await?;
            println!("Added {}", render_card(&task));
        }
        Commands::Advance { id } => {
            let Some(task) = board.task(id) else {
                bail!("Task {} is not on the board", id);
            };
            if task.status.next().is_none() {
                bail!("Task {} is already done", id);
            }

            if let Some(outcome) = board.advance(id).await {
                report(&mut board, outcome).await?;
            }
        }
        Commands::Move { id, status } => {
            if !board.begin_drag(id) {
                bail!("Task {} is not on the board", id);
            }

            match board.end_drag(Some(status)).await {
                Some(outcome) => report(&mut board, outcome).await?,
                None => println!("Task {} is already in {}", id, status.title()),
            }
        }
    }

    print!("{}", render_board(&board.columns()));

    Ok(())
}

/// Prints the outcome of a move and reconciles the board when it was not stored
async fn report(board: &mut Board<HttpTaskApi>, outcome: SyncOutcome) -> anyhow::Result<()> {
    let (task_id, status) = (outcome.task_id, outcome.status);

    match outcome.into_result() {
        Ok(_) => println!("Moved #{} to {}", task_id, status.title()),
        Err(e) => {
            eprintln!("Move of #{} was not saved: {}", task_id, e);
            board.reload().await?;
        }
    }

    Ok(())
}
