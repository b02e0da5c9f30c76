use console::{Term, style};

use crate::board::{Notice, NoticeLevel, Notifier};
use crate::ui::icons::{CROSS, INFO, WARN};

/// Prints board notices to stderr.
pub struct TerminalNotifier {
    term: Term,
}

impl TerminalNotifier {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self::new()
    }
}

pub fn format_notice(notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Error => format!("{}{}", CROSS, style(&notice.message).red()),
        NoticeLevel::Warning => format!("{}{}", WARN, style(&notice.message).yellow()),
        NoticeLevel::Info => format!("{}{}", INFO, notice.message),
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        let line = format_notice(&notice);
        if self.term.write_line(&line).is_err() {
            eprintln!("{}", line);
        }
    }
}
