//! Board state controller.
//!
//! | Module          | Purpose                                                |
//! |-----------------|--------------------------------------------------------|
//! | `controller`    | `BoardController`: projects, selection, task CRUD      |
//! | `transition`    | Button state machine, optimistic transition transaction|
//! | `dnd`           | Column table, drop resolution, `DragHandler`           |
//! | `view`          | Tasks grouped into kanban columns                      |
//! | `notify`        | `Notifier` sink for user-facing notices                |

pub mod controller;
pub mod dnd;
pub mod notify;
pub mod transition;
pub mod view;

pub use controller::{BoardController, TaskEdit, TransitionResult};
pub use dnd::{Column, DragHandler, DropOutcome};
pub use notify::{CollectingNotifier, Notice, NoticeLevel, Notifier};
pub use transition::{Transition, button_transitions, is_button_transition};
pub use view::{BoardView, ColumnView};
