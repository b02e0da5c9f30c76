//! Integration tests for the taskboard binary.
//!
//! Each test runs in its own temp directory with its own config and session
//! file, against an in-process mock service where the network is needed.

mod common;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct Env {
    dir: TempDir,
    api_url: String,
}

impl Env {
    fn new(api_url: impl Into<String>) -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            api_url: api_url.into(),
        }
    }

    fn offline() -> Self {
        // Nothing listens on the discard port.
        Self::new("http://127.0.0.1:9")
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("config").join("config.toml")
    }

    fn session_path(&self) -> PathBuf {
        self.dir.path().join("session.json")
    }

    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("taskboard");
        cmd.current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("xdg-config"))
            .env("XDG_DATA_HOME", self.dir.path().join("xdg-data"))
            .env("TASKBOARD_SESSION_FILE", self.session_path())
            .env("TASKBOARD_API_URL", &self.api_url)
            .env_remove("TASKBOARD_API_PREFIX")
            .env_remove("TASKBOARD_LOG")
            .arg("--config")
            .arg(self.config_path());
        cmd
    }

    fn login(&self) {
        self.cmd()
            .args(["login", "--email", "ada@example.com", "--password"])
            .arg(common::PASSWORD)
            .assert()
            .success();
    }
}

// =============================================================================
// Basic CLI Tests
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_taskboard_help() {
        cargo_bin_cmd!("taskboard")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("board"));
    }

    #[test]
    fn test_taskboard_version() {
        cargo_bin_cmd!("taskboard").arg("--version").assert().success();
    }

    #[test]
    fn test_invalid_status_is_rejected_by_parser() {
        Env::offline()
            .cmd()
            .args(["tasks", "mark", "-p", "1", "7", "finished"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid status"));
    }
}

// =============================================================================
// Config Tests
// =============================================================================

mod config {
    use super::*;

    #[test]
    fn test_config_show_without_file_uses_defaults() {
        let env = Env::offline();
        env.cmd()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No config.toml found"))
            .stdout(predicate::str::contains("http://127.0.0.1:9/api"));
    }

    #[test]
    fn test_config_init_then_validate() {
        let env = Env::offline();
        env.cmd()
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Created config.toml"));
        assert!(env.config_path().exists());

        env.cmd()
            .args(["config", "validate"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration is valid."));

        // Second init leaves the file alone.
        env.cmd()
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already exists"));
    }

    #[test]
    fn test_config_validate_reports_warnings() {
        let env = Env::offline();
        fs::create_dir_all(env.config_path().parent().unwrap()).unwrap();
        fs::write(
            env.config_path(),
            "[api]\nbase_url = \"localhost:8000\"\npath_prefix = \"api\"\n",
        )
        .unwrap();

        env.cmd()
            .args(["config", "validate"])
            .assert()
            .success()
            .stdout(predicate::str::contains("base_url"))
            .stdout(predicate::str::contains("path_prefix"));
    }

    #[test]
    fn test_malformed_config_fails() {
        let env = Env::offline();
        fs::create_dir_all(env.config_path().parent().unwrap()).unwrap();
        fs::write(env.config_path(), "[api\n").unwrap();

        env.cmd()
            .arg("whoami")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to load configuration"));
    }
}

// =============================================================================
// Session / Route Guard Tests
// =============================================================================

mod session {
    use super::*;

    #[test]
    fn test_board_without_token_redirects_to_login() {
        let env = Env::offline();
        env.cmd()
            .args(["board", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("/login"));
    }

    #[test]
    fn test_protected_commands_all_guarded() {
        let env = Env::offline();
        for args in [
            vec!["projects", "list"],
            vec!["tasks", "delete", "7"],
            vec!["comments", "list", "7"],
        ] {
            env.cmd()
                .args(&args)
                .assert()
                .failure()
                .stderr(predicate::str::contains("Not logged in"));
        }
    }

    #[test]
    fn test_login_validation_happens_before_network() {
        let env = Env::offline();
        env.cmd()
            .args(["login", "--email", "not-an-email", "--password", "123"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Email is invalid"))
            .stderr(predicate::str::contains("at least 6 characters"));
        assert!(!env.session_path().exists());
    }

    #[test]
    fn test_login_whoami_logout() {
        let (url, _) = common::spawn_server_blocking();
        let env = Env::new(url);

        env.login();
        let saved = fs::read_to_string(env.session_path()).unwrap();
        assert!(saved.contains(common::TOKEN));

        env.cmd()
            .arg("whoami")
            .assert()
            .success()
            .stdout(predicate::str::contains("ada@example.com"));

        env.cmd()
            .arg("logout")
            .assert()
            .success()
            .stdout(predicate::str::contains("/login"));

        env.cmd().args(["board", "1"]).assert().failure();
    }

    #[test]
    fn test_wrong_password_keeps_session_empty() {
        let (url, _) = common::spawn_server_blocking();
        let env = Env::new(url);
        env.cmd()
            .args(["login", "--email", "ada@example.com", "--password", "wrong-pass"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid Credentials"));
        env.cmd()
            .arg("whoami")
            .assert()
            .success()
            .stdout(predicate::str::contains("Not logged in"));
    }
}

// =============================================================================
// Board Tests
// =============================================================================

mod board {
    use super::*;

    #[test]
    fn test_board_renders_three_columns() {
        let (url, _) = common::spawn_server_blocking();
        let env = Env::new(url);
        env.login();

        env.cmd()
            .args(["board", "1", "--width", "120"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Launch"))
            .stdout(predicate::str::contains("To-do (1)"))
            .stdout(predicate::str::contains("In progress (1)"))
            .stdout(predicate::str::contains("Done (1)"));
    }

    #[test]
    fn test_board_status_filter_reaches_server() {
        let (url, mock) = common::spawn_server_blocking();
        let env = Env::new(url);
        env.login();

        env.cmd()
            .args(["board", "1", "--status", "done", "--width", "120"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Done (1)"))
            .stdout(predicate::str::contains("To-do (0)"));
        assert_eq!(
            mock.last_query().get("status").map(String::as_str),
            Some("done")
        );
    }

    #[test]
    fn test_tasks_move_uses_dedicated_endpoint() {
        let (url, mock) = common::spawn_server_blocking();
        let env = Env::new(url);
        env.login();

        env.cmd()
            .args(["tasks", "move", "-p", "1", "7", "in-progress-column"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Moved task #7"));
        assert!(
            mock.requests()
                .contains(&"PATCH /tasks/7/mark-in-progress".to_string())
        );
    }

    #[test]
    fn test_tasks_move_to_unknown_column_sends_nothing() {
        let (url, mock) = common::spawn_server_blocking();
        let env = Env::new(url);
        env.login();

        env.cmd()
            .args(["tasks", "move", "-p", "1", "7", "trash"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not a column"));
        assert!(!mock.requests().iter().any(|r| r.starts_with("PATCH")));
    }

    #[test]
    fn test_failed_transition_reports_revert() {
        let (url, _) = common::spawn_server_blocking();
        let env = Env::new(url);
        env.login();

        env.cmd()
            .args(["tasks", "move", "-p", "1", "8", "done-column"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("changes reverted"));
    }

    #[test]
    fn test_backward_button_transition_is_refused() {
        let (url, mock) = common::spawn_server_blocking();
        let env = Env::new(url);
        env.login();

        env.cmd()
            .args(["tasks", "mark", "-p", "1", "9", "to_do"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("action button"));
        assert!(!mock.requests().iter().any(|r| r.starts_with("PATCH")));
    }

    #[test]
    fn test_create_task_with_blank_title_never_calls_create() {
        let (url, mock) = common::spawn_server_blocking();
        let env = Env::new(url);
        env.login();

        env.cmd()
            .args(["tasks", "create", "-p", "1", "   "])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Please enter a task title"));
        assert!(!mock.requests().iter().any(|r| r.starts_with("POST /tasks")));
    }

    #[test]
    fn test_delete_several_tasks_reports_each() {
        let (url, _) = common::spawn_server_blocking();
        let env = Env::new(url);
        env.login();

        env.cmd()
            .args(["tasks", "delete", "--force", "7", "404"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("Deleted task #7"))
            .stdout(predicate::str::contains("Task #404 was not deleted"));
    }

    #[test]
    fn test_delete_without_force_needs_confirmation() {
        let (url, mock) = common::spawn_server_blocking();
        let env = Env::new(url);
        env.login();

        // No terminal to confirm on, so nothing is deleted.
        env.cmd()
            .args(["tasks", "delete", "7"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to read confirmation"));
        assert!(!mock.requests().iter().any(|r| r.starts_with("DELETE")));
    }

    #[test]
    fn test_update_unknown_task_reports_missing_task() {
        let (url, mock) = common::spawn_server_blocking();
        let env = Env::new(url);
        env.login();

        env.cmd()
            .args(["tasks", "update", "-p", "1", "99", "--priority", "low"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Task 99 is not in project #1"))
            .stderr(predicate::str::contains("Please enter a task title").not());
        assert!(!mock.requests().iter().any(|r| r.starts_with("PUT")));
    }

    #[test]
    fn test_corrupt_session_file_does_not_block_login() {
        let (url, _) = common::spawn_server_blocking();
        let env = Env::new(url);
        fs::write(env.session_path(), "{\"token\": 1").unwrap();

        env.cmd()
            .args(["board", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("/login"));
        env.login();
        env.cmd()
            .arg("whoami")
            .assert()
            .success()
            .stdout(predicate::str::contains("ada@example.com"));
    }

    #[test]
    fn test_comments_add_and_list() {
        let (url, _) = common::spawn_server_blocking();
        let env = Env::new(url);
        env.login();

        env.cmd()
            .args(["comments", "add", "7", "Looks", "good"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Comment #3 added to task #7"));
        env.cmd()
            .args(["comments", "list", "7"])
            .assert()
            .success()
            .stdout(predicate::str::contains("First!"));
    }
}
