//! Drag-and-drop surface: the fixed column table and the capability interface
//! any drag mechanism drives.

use async_trait::async_trait;
use taskboard_common::{Task, TaskStatus};

use crate::errors::BoardError;

/// Kanban columns. Each is a droppable surface with a fixed id and maps 1:1
/// to a task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    ToDo,
    InProgress,
    Done,
}

impl Column {
    pub const ALL: [Column; 3] = [Self::ToDo, Self::InProgress, Self::Done];

    pub fn id(&self) -> &'static str {
        match self {
            Self::ToDo => "todo-column",
            Self::InProgress => "in-progress-column",
            Self::Done => "done-column",
        }
    }

    /// Look up a drop surface. Anything outside the three column ids is not a
    /// column.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "todo-column" => Some(Self::ToDo),
            "in-progress-column" => Some(Self::InProgress),
            "done-column" => Some(Self::Done),
            _ => None,
        }
    }

    pub fn status(&self) -> TaskStatus {
        match self {
            Self::ToDo => TaskStatus::ToDo,
            Self::InProgress => TaskStatus::InProgress,
            Self::Done => TaskStatus::Done,
        }
    }

    pub fn for_status(status: TaskStatus) -> Self {
        match status {
            TaskStatus::ToDo => Self::ToDo,
            TaskStatus::InProgress => Self::InProgress,
            TaskStatus::Done => Self::Done,
        }
    }

    pub fn title(&self) -> &'static str {
        self.status().label()
    }
}

/// Result of a drop gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Released outside any droppable surface.
    NoSurface,
    /// Released over a surface that is not one of the three columns.
    UnknownSurface(String),
    /// The dragged id is not in the local task list.
    UnknownTask,
    /// Released over the column the task is already in.
    SameColumn,
    /// Server confirmed the move; this is its representation.
    Moved(Task),
}

/// Where a drop lands, decided before any state is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropResolution {
    Ignore(DropOutcome),
    Transition { task_id: i64, target: TaskStatus },
}

pub fn resolve_drop(tasks: &[Task], task_id: i64, drop_target: Option<&str>) -> DropResolution {
    let Some(surface) = drop_target else {
        return DropResolution::Ignore(DropOutcome::NoSurface);
    };
    let Some(column) = Column::from_id(surface) else {
        return DropResolution::Ignore(DropOutcome::UnknownSurface(surface.to_string()));
    };
    let Some(task) = tasks.iter().find(|t| t.id == task_id) else {
        return DropResolution::Ignore(DropOutcome::UnknownTask);
    };
    if task.status == column.status() {
        return DropResolution::Ignore(DropOutcome::SameColumn);
    }
    DropResolution::Transition {
        task_id,
        target: column.status(),
    }
}

/// Capability a drag mechanism needs from the board.
///
/// `on_drag_start` captures the card for a floating preview; `on_drag_end`
/// always releases that capture, whatever the drop did.
#[async_trait]
pub trait DragHandler: Send + Sync {
    fn on_drag_start(&self, task_id: i64);

    async fn on_drag_end(
        &self,
        task_id: i64,
        drop_target: Option<&str>,
    ) -> Result<DropOutcome, BoardError>;
}
