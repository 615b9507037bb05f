/// Plain-text board rendering
///
/// Each column is printed as a heading with its count followed by its
/// cards. A card is one line, plus its description underneath when it has
/// one:
///
/// ```text
/// To Do (1)
///   #1 Write spec [high] @Atrias  -> Start
///     Draft the API contract
/// Doing (0)
///   (empty)
/// Done (0)
///   (empty)
/// ```

use crate::board::Column;
use std::fmt::Write;
use taskboard_shared::models::task::Task;

/// Renders the columns in order
pub fn render_board(columns: &[Column<'_>]) -> String {
    let mut out = String::new();

    for column in columns {
        let _ = writeln!(out, "{} ({})", column.title(), column.count());

        if column.tasks.is_empty() {
            out.push_str("  (empty)\n");
            continue;
        }

        for task in &column.tasks {
            out.push_str("  ");
            out.push_str(&render_card(task));
            out.push('\n');
        }
    }

    out
}

/// One card: the summary line, then the description indented below it
pub fn render_card(task: &Task) -> String {
    let mut line = format!("#{} {} [{}]", task.id, task.title, task.priority);

    if let Some(assignee) = &task.assignee {
        let _ = write!(line, " @{}", assignee);
    }
    if let Some(label) = task.status.action_label() {
        let _ = write!(line, "  -> {}", label);
    }
    if let Some(description) = task.description.as_deref().filter(|d| !d.trim().is_empty()) {
        let _ = write!(line, "\n    {}", description.trim());
    }

    line
}
