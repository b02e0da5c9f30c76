//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module          | Commands handled                                   |
//! |-----------------|-----------------------------------------------------|
//! | `auth`          | `Login`, `Signup`, `Logout`, `Whoami`              |
//! | `project`       | `Projects`                                         |
//! | `board`         | `Board`                                            |
//! | `task`          | `Tasks`                                            |
//! | `comments`      | `Comments`                                         |
//! | `config`        | `Config`                                           |
//!
//! `app` holds the wiring they share. Every command except the account and
//! config ones passes the route guard before touching the network.

pub mod app;
pub mod auth;
pub mod board;
pub mod comments;
pub mod config;
pub mod project;
pub mod task;

pub use app::App;
pub use auth::{cmd_login, cmd_logout, cmd_signup, cmd_whoami};
pub use board::{BoardArgs, cmd_board};
pub use comments::cmd_comments;
pub use config::cmd_config;
pub use project::cmd_projects;
pub use task::cmd_tasks;
