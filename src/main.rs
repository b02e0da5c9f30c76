use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use taskboard::config::ClientConfig;
use taskboard::errors::BoardError;
use taskboard_common::{Priority, TaskStatus};

mod cmd;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(version, about = "Terminal client for a project and task tracker")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config.toml (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the service, e.g. http://localhost:8000. Overrides config and env.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account
    Signup {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Clear the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List and manage projects
    Projects {
        #[command(subcommand)]
        command: Option<ProjectCommands>,
    },
    /// Show a project's kanban board
    Board {
        /// Project id
        project: i64,
        /// Only tasks with this status (to_do, in_progress, done)
        #[arg(long)]
        status: Option<TaskStatus>,
        /// Only tasks with this priority (low, medium, high)
        #[arg(long)]
        priority: Option<Priority>,
        /// Only tasks assigned to this user id
        #[arg(long)]
        assignee: Option<i64>,
        /// Render width in columns (defaults to the terminal width)
        #[arg(long)]
        width: Option<usize>,
    },
    /// Create, edit and move tasks
    Tasks {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Read and write task comments
    Comments {
        #[command(subcommand)]
        command: CommentCommands,
    },
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ProjectCommands {
    /// List your projects
    List,
    /// Show one project
    Show { id: i64 },
    /// Create a project
    Create {
        title: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Rename or re-describe a project
    Update {
        id: i64,
        title: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a project
    Delete {
        id: i64,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Add a user to a project
    AddMember { project_id: i64, user_id: i64 },
}

#[derive(Subcommand, Clone)]
pub enum TaskCommands {
    /// Show one task
    Show {
        #[arg(short, long)]
        project: i64,
        id: i64,
    },
    /// Create a task in the to-do column
    Create {
        #[arg(short, long)]
        project: i64,
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(long, default_value = "medium")]
        priority: Priority,
    },
    /// Edit a task's title, description or priority
    Update {
        #[arg(short, long)]
        project: i64,
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// Delete one or more tasks
    Delete {
        #[arg(required = true)]
        ids: Vec<i64>,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Advance a task (to_do -> in_progress -> done)
    Mark {
        #[arg(short, long)]
        project: i64,
        id: i64,
        status: TaskStatus,
    },
    /// Drop a task onto a column: todo-column, in-progress-column, done-column
    Move {
        #[arg(short, long)]
        project: i64,
        id: i64,
        column: String,
    },
}

#[derive(Subcommand, Clone)]
pub enum CommentCommands {
    /// List comments on a task
    List { task_id: i64 },
    /// Comment on a task
    Add {
        task_id: i64,
        #[arg(required = true)]
        content: Vec<String>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default config.toml file
    Init,
}

async fn run(cli: Cli) -> Result<()> {
    let config = ClientConfig::load(cli.config.clone(), cli.api_url.clone(), cli.verbose)
        .context("Failed to load configuration")?;
    let log_dir = config.log_to_file.then(|| config.log_dir());
    let _log_guard = taskboard::logging::init(config.verbose, log_dir.as_deref());

    if let Commands::Config { command } = &cli.command {
        return cmd::cmd_config(&config, command.clone());
    }

    let mut app = cmd::App::open(config)?;
    match cli.command {
        Commands::Login { email, password } => cmd::cmd_login(&mut app, email, password).await?,
        Commands::Signup {
            name,
            email,
            password,
        } => cmd::cmd_signup(&mut app, name, email, password).await?,
        Commands::Logout => cmd::cmd_logout(&mut app)?,
        Commands::Whoami => cmd::cmd_whoami(&app)?,
        Commands::Projects { command } => cmd::cmd_projects(&mut app, command).await?,
        Commands::Board {
            project,
            status,
            priority,
            assignee,
            width,
        } => {
            let args = cmd::BoardArgs {
                project,
                status,
                priority,
                assignee,
                width,
            };
            cmd::cmd_board(&mut app, args).await?
        }
        Commands::Tasks { command } => cmd::cmd_tasks(&mut app, command).await?,
        Commands::Comments { command } => cmd::cmd_comments(&mut app, command).await?,
        Commands::Config { .. } => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Board failures were already shown by the terminal notifier.
            if e.downcast_ref::<BoardError>().is_none() {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}
