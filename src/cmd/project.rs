//! Project commands: `taskboard projects ...`.

use anyhow::{Context, Result};
use console::style;
use dialoguer::Confirm;
use taskboard::api::BoardApi;
use taskboard::ui::icons::{CHECK, FOLDER};
use taskboard::ui::{render_projects, with_spinner};
use taskboard_common::ProjectFields;

use super::super::ProjectCommands;
use super::app::App;

pub async fn cmd_projects(app: &mut App, command: Option<ProjectCommands>) -> Result<()> {
    let board = app.dashboard()?;

    match command {
        None | Some(ProjectCommands::List) => {
            let projects = with_spinner("Loading projects...", board.load_projects()).await?;
            println!("{}", render_projects(&projects, None).trim_end());
        }
        Some(ProjectCommands::Show { id }) => {
            let project = with_spinner("Loading project...", app.api.get_project(id))
                .await
                .with_context(|| format!("Failed to load project {}", id))?;
            println!(
                "{}{} {}",
                FOLDER,
                style(format!("#{}", project.id)).dim(),
                style(&project.title).bold()
            );
            if let Some(desc) = project.description.as_deref().filter(|d| !d.is_empty()) {
                println!("  {}", desc);
            }
            if let Some(owner) = project.owner_id {
                println!("  owner: user {}", owner);
            }
        }
        Some(ProjectCommands::Create { title, description }) => {
            let project = board
                .create_project(ProjectFields { title, description })
                .await?;
            println!(
                "{}Created project {} {}",
                CHECK,
                style(format!("#{}", project.id)).dim(),
                style(&project.title).bold()
            );
        }
        Some(ProjectCommands::Update {
            id,
            title,
            description,
        }) => {
            let project = board
                .update_project(id, ProjectFields { title, description })
                .await?;
            println!(
                "{}Updated project {} {}",
                CHECK,
                style(format!("#{}", project.id)).dim(),
                style(&project.title).bold()
            );
        }
        Some(ProjectCommands::Delete { id, force }) => {
            if !force {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete project #{} and all its tasks?", id))
                    .default(false)
                    .interact()
                    .context("Failed to read confirmation")?;
                if !confirmed {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            board.delete_project(id).await?;
            println!("{}Deleted project #{}", CHECK, id);
        }
        Some(ProjectCommands::AddMember {
            project_id,
            user_id,
        }) => {
            let detail = board.add_member(project_id, user_id).await?;
            println!(
                "{}{}",
                CHECK,
                detail.unwrap_or_else(|| format!(
                    "Added user {} to project #{}",
                    user_id, project_id
                ))
            );
        }
    }

    Ok(())
}
