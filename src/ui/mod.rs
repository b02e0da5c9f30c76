pub mod board;
pub mod icons;
pub mod notifier;
pub mod progress;

pub use board::{render_board, render_comments, render_projects, render_task, terminal_width};
pub use notifier::TerminalNotifier;
pub use progress::{Spinner, with_spinner};
