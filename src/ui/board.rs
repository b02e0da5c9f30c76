//! Plain-text rendering of projects, the kanban board and task details.
//!
//! Everything here returns `String`s; callers decide where to print.

use console::{Alignment, pad_str, style};
use taskboard_common::{Comment, Priority, Project, Task, TaskStatus};

use crate::board::{BoardView, Column, ColumnView, button_transitions};
use crate::ui::icons::{COMMENT, DONE, FOLDER, IN_PROGRESS, TODO, USER};

const DEFAULT_WIDTH: usize = 100;
/// Below this the columns are stacked instead of placed side by side.
const MIN_SIDE_BY_SIDE: usize = 72;
const GAP: &str = " │ ";

pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w as usize)
        .unwrap_or(DEFAULT_WIDTH)
}

pub fn priority_badge(priority: Priority) -> String {
    let text = format!("[{}]", priority.as_str().to_uppercase());
    match priority {
        Priority::High => style(text).red().bold().to_string(),
        Priority::Medium => style(text).yellow().to_string(),
        Priority::Low => style(text).green().to_string(),
    }
}

fn column_icon(column: Column) -> String {
    match column {
        Column::ToDo => TODO.to_string(),
        Column::InProgress => IN_PROGRESS.to_string(),
        Column::Done => DONE.to_string(),
    }
}

/// Short hint for the action buttons a card offers.
pub fn button_hint(status: TaskStatus) -> Option<String> {
    let targets = button_transitions(status);
    if targets.is_empty() {
        return None;
    }
    let names: Vec<&str> = targets.iter().map(|s| s.as_str()).collect();
    Some(format!("→ {}", names.join(" | ")))
}

pub fn render_projects(projects: &[Project], selected: Option<i64>) -> String {
    if projects.is_empty() {
        return format!("{}", style("No projects yet.").dim());
    }
    let mut out = String::new();
    for project in projects {
        let marker = if Some(project.id) == selected { "*" } else { " " };
        out.push_str(&format!(
            "{} {}{:>4}  {}\n",
            marker,
            FOLDER,
            style(format!("#{}", project.id)).dim(),
            style(&project.title).bold()
        ));
        if let Some(desc) = project.description.as_deref().filter(|d| !d.is_empty()) {
            out.push_str(&format!("          {}\n", style(desc).dim()));
        }
    }
    out
}

/// Lines of a single card, each at most `width` columns wide.
fn card_lines(task: &Task, width: usize) -> Vec<String> {
    let width = width.max(8);
    let mut lines = Vec::new();

    let heading = format!("#{} {}", task.id, task.title);
    for (i, line) in textwrap::wrap(&heading, width).into_iter().enumerate() {
        if i == 0 {
            lines.push(style(line.into_owned()).bold().to_string());
        } else {
            lines.push(line.into_owned());
        }
    }

    let mut meta = priority_badge(task.priority);
    if let Some(assignee) = task.assignee_id {
        meta.push_str(&format!(" {}{}", USER, assignee));
    }
    lines.push(meta);

    if !task.description.trim().is_empty() {
        for line in textwrap::wrap(task.description.trim(), width) {
            lines.push(style(line.into_owned()).dim().to_string());
        }
    }
    if let Some(hint) = button_hint(task.status) {
        lines.push(style(hint).cyan().to_string());
    }
    lines
}

fn column_lines(view: &ColumnView, width: usize) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{}{} ({})",
            column_icon(view.column),
            style(view.column.title()).bold().underlined(),
            view.count()
        ),
        style(view.column.id()).dim().to_string(),
    ];
    if view.tasks.is_empty() {
        lines.push(String::new());
        lines.push(style("(empty)").dim().to_string());
    }
    for task in &view.tasks {
        lines.push(String::new());
        lines.extend(card_lines(task, width));
    }
    lines
}

/// Render the board in `width` terminal columns.
pub fn render_board(view: &BoardView, width: usize) -> String {
    if width < MIN_SIDE_BY_SIDE {
        return view
            .columns
            .iter()
            .map(|c| column_lines(c, width).join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n");
    }

    let gaps = GAP.chars().count() * (view.columns.len().saturating_sub(1));
    let col_width = (width.saturating_sub(gaps)) / view.columns.len().max(1);
    let columns: Vec<Vec<String>> = view
        .columns
        .iter()
        .map(|c| column_lines(c, col_width))
        .collect();
    let height = columns.iter().map(Vec::len).max().unwrap_or(0);

    let mut out = Vec::with_capacity(height);
    for row in 0..height {
        let cells: Vec<String> = columns
            .iter()
            .map(|lines| {
                let cell = lines.get(row).map(String::as_str).unwrap_or("");
                pad_str(cell, col_width, Alignment::Left, Some("…")).into_owned()
            })
            .collect();
        out.push(cells.join(GAP).trim_end().to_string());
    }
    out.join("\n")
}

pub fn render_task(task: &Task) -> String {
    let mut out = format!(
        "{} {}\n  status:   {}\n  priority: {}\n",
        style(format!("#{}", task.id)).dim(),
        style(&task.title).bold(),
        task.status.label(),
        priority_badge(task.priority)
    );
    if let Some(assignee) = task.assignee_id {
        out.push_str(&format!("  assignee: {}{}\n", USER, assignee));
    }
    if let Some(project) = task.project_id {
        out.push_str(&format!("  project:  #{}\n", project));
    }
    if !task.description.is_empty() {
        out.push('\n');
        for line in textwrap::wrap(&task.description, terminal_width().saturating_sub(4).max(20)) {
            out.push_str(&format!("  {}\n", line));
        }
    }
    out
}

pub fn render_comments(comments: &[Comment]) -> String {
    if comments.is_empty() {
        return style("No comments.").dim().to_string();
    }
    comments
        .iter()
        .map(|c| {
            format!(
                "{}{} {} {}\n   {}",
                COMMENT,
                style(format!("#{}", c.id)).dim(),
                style(format!("user {}", c.user_id)).cyan(),
                style(c.created_at.format("%Y-%m-%d %H:%M")).dim(),
                c.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
