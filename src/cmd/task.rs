//! Task commands: `taskboard tasks ...`.
//!
//! `mark` follows the action-button rules (forward moves only); `move` is the
//! drag-and-drop path and accepts any column id.

use anyhow::{Context, Result};
use console::style;
use dialoguer::Confirm;
use futures::future::join_all;
use taskboard::board::{
    BoardController, Column, DragHandler, DropOutcome, TaskEdit, TransitionResult,
};
use taskboard::ui::icons::{CHECK, CROSS};
use taskboard::ui::{render_task, with_spinner};
use taskboard_common::{TaskFields, TaskFilter};

use super::super::TaskCommands;
use super::app::App;

async fn open_project(board: &BoardController, project: i64) -> Result<()> {
    with_spinner(
        "Loading tasks...",
        board.select_project_filtered(project, &TaskFilter::default()),
    )
    .await?;
    Ok(())
}

pub async fn cmd_tasks(app: &mut App, command: TaskCommands) -> Result<()> {
    let board = app.dashboard()?;

    match command {
        TaskCommands::Show { project, id } => {
            open_project(&board, project).await?;
            let task = board
                .task(id)
                .with_context(|| format!("Task {} is not in project #{}", id, project))?;
            print!("{}", render_task(&task));
        }
        TaskCommands::Create {
            project,
            title,
            description,
            priority,
        } => {
            open_project(&board, project).await?;
            let task = board
                .create_task(TaskFields::new(title, description, priority))
                .await?;
            println!(
                "{}Created task {} {}",
                CHECK,
                style(format!("#{}", task.id)).dim(),
                style(&task.title).bold()
            );
        }
        TaskCommands::Update {
            project,
            id,
            title,
            description,
            priority,
        } => {
            open_project(&board, project).await?;
            let Some(current) = board.task(id) else {
                anyhow::bail!("Task {} is not in project #{}", id, project);
            };
            // Unspecified fields keep their current values.
            let edit = TaskEdit {
                title: title.unwrap_or(current.title),
                description: description.unwrap_or(current.description),
                priority: priority.unwrap_or(current.priority),
            };
            let task = board.update_task(id, edit).await?;
            println!("{}Updated task #{}", CHECK, task.id);
        }
        TaskCommands::Delete { ids, force } => {
            if !force {
                let listed: Vec<String> = ids.iter().map(|id| format!("#{}", id)).collect();
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete task {}?", listed.join(", ")))
                    .default(false)
                    .interact()
                    .context("Failed to read confirmation")?;
                if !confirmed {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            let results = join_all(ids.iter().map(|&id| board.delete_task(id))).await;
            let mut failed = 0;
            for (id, result) in ids.iter().zip(results) {
                match result {
                    Ok(()) => println!("{}Deleted task #{}", CHECK, id),
                    Err(_) => {
                        failed += 1;
                        println!("{}Task #{} was not deleted", CROSS, id);
                    }
                }
            }
            if failed > 0 {
                anyhow::bail!("{} of {} deletions failed", failed, ids.len());
            }
        }
        TaskCommands::Mark {
            project,
            id,
            status,
        } => {
            open_project(&board, project).await?;
            match board.mark_via_button(id, status).await? {
                TransitionResult::Committed(task) => {
                    println!("{}Task #{} is now {}", CHECK, task.id, task.status.label())
                }
                TransitionResult::Unchanged => {
                    println!("Task #{} is already {}", id, status.label())
                }
            }
        }
        TaskCommands::Move {
            project,
            id,
            column,
        } => {
            open_project(&board, project).await?;
            board.on_drag_start(id);
            match board.on_drag_end(id, Some(&column)).await? {
                DropOutcome::Moved(task) => println!(
                    "{}Moved task #{} to {}",
                    CHECK,
                    task.id,
                    Column::for_status(task.status).title()
                ),
                DropOutcome::SameColumn => println!("Task #{} is already in {}", id, column),
                DropOutcome::UnknownTask => {
                    anyhow::bail!("Task {} is not in project #{}", id, project)
                }
                DropOutcome::UnknownSurface(surface) => {
                    let known: Vec<&str> = Column::ALL.iter().map(|c| c.id()).collect();
                    anyhow::bail!(
                        "'{}' is not a column (expected one of: {})",
                        surface,
                        known.join(", ")
                    )
                }
                DropOutcome::NoSurface => println!("Nothing to do."),
            }
        }
    }

    Ok(())
}
