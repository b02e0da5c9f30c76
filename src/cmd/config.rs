//! Configuration view and validation commands: `taskboard config`.

use anyhow::Result;
use taskboard::config::{ClientConfig, TaskboardToml};

use super::super::ConfigCommands;

pub fn cmd_config(config: &ClientConfig, command: Option<ConfigCommands>) -> Result<()> {
    let config_path = &config.config_path;

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Taskboard Configuration");
            println!("=======================");
            println!();

            if config_path.exists() {
                println!("Config file: {}", config_path.display());
            } else {
                println!("No config.toml found at {}", config_path.display());
                println!("Using default configuration.");
            }
            println!();

            let toml = &config.toml;
            println!("[api]");
            println!("  base_url = \"{}\"", toml.api.base_url);
            println!("  path_prefix = \"{}\"", toml.api.path_prefix);
            println!();
            println!("[session]");
            match &toml.session.store_path {
                Some(path) => println!("  store_path = \"{}\"", path.display()),
                None => println!("  store_path = (default)"),
            }
            println!();
            println!("[logging]");
            println!("  log_to_file = {}", toml.logging.log_to_file);
            println!();

            println!("Effective values (with env/CLI overrides):");
            println!("  api root = \"{}\"", config.api_root());
            println!("  session file = \"{}\"", config.session_path.display());
            if config.log_to_file {
                println!("  log dir = \"{}\"", config.log_dir().display());
            }
            println!();

            if !config_path.exists() {
                println!("Run 'taskboard config init' to create a config.toml file.");
                println!();
            }
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if !config_path.exists() {
                println!("No config.toml found. Using defaults (valid).");
                return Ok(());
            }

            let toml = TaskboardToml::load(config_path)?;
            let warnings = toml.validate();

            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("config.toml already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            TaskboardToml::default().save(config_path)?;

            println!("Created config.toml at {}", config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [api] base_url, path_prefix");
            println!("  - [session] store_path");
            println!("  - [logging] log_to_file");
            println!();
        }
    }

    Ok(())
}
