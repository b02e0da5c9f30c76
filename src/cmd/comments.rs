//! `taskboard comments list | add`.

use anyhow::Result;
use taskboard::ui::icons::CHECK;
use taskboard::ui::{render_comments, with_spinner};

use super::super::CommentCommands;
use super::app::App;

pub async fn cmd_comments(app: &mut App, command: CommentCommands) -> Result<()> {
    let board = app.dashboard()?;

    match command {
        CommentCommands::List { task_id } => {
            let comments =
                with_spinner("Loading comments...", board.list_comments(task_id)).await?;
            println!("{}", render_comments(&comments));
        }
        CommentCommands::Add { task_id, content } => {
            let content = content.join(" ");
            let comment = board.add_comment(task_id, &content).await?;
            println!("{}Comment #{} added to task #{}", CHECK, comment.id, task_id);
        }
    }
    Ok(())
}
