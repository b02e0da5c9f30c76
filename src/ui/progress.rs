use crate::ui::icons::{CHECK, CROSS};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;

/// Spinner shown while a request is in flight.
///
/// Hidden when stderr is not a terminal, so piped output stays clean.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn start(message: impl Into<String>) -> Self {
        let bar = if console::Term::stderr().is_term() {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        let spinner_style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("progress bar template is a valid static string");
        bar.set_style(spinner_style);
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    pub fn set_message(&self, message: impl Into<String>) {
        self.bar.set_message(message.into());
    }

    pub fn succeed(self, message: impl AsRef<str>) {
        self.bar
            .finish_with_message(format!("{}{}", CHECK, message.as_ref()));
    }

    pub fn fail(self, message: impl AsRef<str>) {
        self.bar.finish_with_message(format!(
            "{}{}",
            CROSS,
            style(message.as_ref()).red()
        ));
    }

    /// Clear the spinner without leaving a line behind.
    pub fn clear(self) {
        self.bar.finish_and_clear();
    }
}

/// Run `fut` behind a spinner, clearing it once the future resolves.
pub async fn with_spinner<F, T>(message: impl Into<String>, fut: F) -> T
where
    F: Future<Output = T>,
{
    let spinner = Spinner::start(message);
    let out = fut.await;
    spinner.clear();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_spinner_returns_future_output() {
        let value = with_spinner("Loading projects...", async { 41 + 1 }).await;
        assert_eq!(value, 42);
    }

    #[test]
    fn test_spinner_finishes_without_panic() {
        let spinner = Spinner::start("Saving task...");
        spinner.set_message("Still saving...");
        spinner.succeed("Saved");

        Spinner::start("Deleting...").fail("Delete failed");
    }
}
