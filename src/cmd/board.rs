//! `taskboard board <project>`: render the kanban columns.

use anyhow::Result;
use console::style;
use taskboard::ui::icons::FOLDER;
use taskboard::ui::{render_board, terminal_width, with_spinner};
use taskboard_common::{Priority, TaskFilter, TaskStatus};

use super::app::App;

pub struct BoardArgs {
    pub project: i64,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub assignee: Option<i64>,
    pub width: Option<usize>,
}

pub async fn cmd_board(app: &mut App, args: BoardArgs) -> Result<()> {
    let board = app.dashboard()?;

    let projects = with_spinner("Loading projects...", board.load_projects()).await?;
    let filter = TaskFilter {
        status: args.status,
        priority: args.priority,
        assignee_id: args.assignee,
    };
    with_spinner(
        "Loading tasks...",
        board.select_project_filtered(args.project, &filter),
    )
    .await?;

    let title = projects
        .iter()
        .find(|p| p.id == args.project)
        .map(|p| p.title.clone())
        .unwrap_or_else(|| format!("Project #{}", args.project));
    println!("{}{}", FOLDER, style(title).bold());
    if !filter.is_empty() {
        let pairs: Vec<String> = filter
            .query_pairs()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        println!("{}", style(format!("filter: {}", pairs.join(", "))).dim());
    }
    println!();

    let width = args.width.unwrap_or_else(terminal_width);
    println!("{}", render_board(&board.board(), width));
    Ok(())
}
