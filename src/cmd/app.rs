//! Shared wiring for every command: config, session, API client.

use std::sync::Arc;

use anyhow::{Context, Result};
use taskboard::api::ApiClient;
use taskboard::board::BoardController;
use taskboard::config::ClientConfig;
use taskboard::session::{FileStore, Route, Session};
use taskboard::ui::TerminalNotifier;
use taskboard::ui::icons::LOCK;

pub struct App {
    pub config: ClientConfig,
    pub session: Session,
    pub api: ApiClient,
}

impl App {
    /// Open the session file and hydrate it. Hydration must finish before the
    /// route guard is consulted.
    pub fn open(config: ClientConfig) -> Result<Self> {
        let store = Arc::new(FileStore::new(config.session_path.clone()));
        let mut session = Session::new(store);
        session.hydrate().with_context(|| {
            format!(
                "Failed to restore session from {}",
                config.session_path.display()
            )
        })?;
        let api = ApiClient::from_config(&config, session.store());
        Ok(Self {
            config,
            session,
            api,
        })
    }

    /// Navigate to the dashboard. Fails when the guard sends us to the login
    /// page instead.
    pub fn require_dashboard(&mut self) -> Result<()> {
        let route = self
            .session
            .navigate(Route::Dashboard.path())
            .context("Failed to read session")?;
        if *route != Route::Dashboard {
            anyhow::bail!(
                "{}Not logged in: redirected to {}. Run `taskboard login` first.",
                LOCK,
                route
            );
        }
        Ok(())
    }

    /// Board controller that prints notices to the terminal.
    pub fn board(&self) -> BoardController {
        BoardController::new(
            Arc::new(self.api.clone()),
            Arc::new(TerminalNotifier::new()),
        )
    }

    /// Guard, then build the board controller.
    pub fn dashboard(&mut self) -> Result<BoardController> {
        self.require_dashboard()?;
        Ok(self.board())
    }
}
