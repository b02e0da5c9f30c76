//! Status state machine and the optimistic transition transaction.
//!
//! A transition runs in three phases:
//!
//! 1. **snapshot**: `Transition::begin` captures the whole task as it was;
//! 2. **speculate**: the returned copy with the target status is written to
//!    local state before the request is sent;
//! 3. **settle**: `Transition::settle` yields the server's representation on
//!    success, or the untouched snapshot on failure.
//!
//! Nothing here touches the network or shared state.

use taskboard_common::{Task, TaskStatus};

/// Transitions exposed as action buttons on a card. There is no backward
/// button transition; only drag-and-drop can move a card back.
pub fn button_transitions(from: TaskStatus) -> &'static [TaskStatus] {
    match from {
        TaskStatus::ToDo => &[TaskStatus::InProgress, TaskStatus::Done],
        TaskStatus::InProgress => &[TaskStatus::Done],
        TaskStatus::Done => &[],
    }
}

pub fn is_button_transition(from: TaskStatus, to: TaskStatus) -> bool {
    button_transitions(from).contains(&to)
}

/// How the transition request settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Confirmed(Task),
    Failed,
}

/// An in-flight optimistic status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    snapshot: Task,
    target: TaskStatus,
}

impl Transition {
    /// Start a transition. Returns `None` when the task already has the target
    /// status; otherwise the transaction plus the speculative task to show.
    pub fn begin(prior: &Task, target: TaskStatus) -> Option<(Self, Task)> {
        if prior.status == target {
            return None;
        }
        let speculative = Task {
            status: target,
            ..prior.clone()
        };
        let transition = Self {
            snapshot: prior.clone(),
            target,
        };
        Some((transition, speculative))
    }

    pub fn task_id(&self) -> i64 {
        self.snapshot.id
    }

    pub fn target(&self) -> TaskStatus {
        self.target
    }

    pub fn snapshot(&self) -> &Task {
        &self.snapshot
    }

    /// The task to keep once the request has settled.
    pub fn settle(self, outcome: Outcome) -> Task {
        match outcome {
            Outcome::Confirmed(server) => server,
            Outcome::Failed => self.snapshot,
        }
    }
}

/// Replace the entry with the same id. Returns false when the task is no
/// longer in the list (deleted or selection changed), in which case nothing
/// is inserted.
pub fn replace_by_id(tasks: &mut [Task], replacement: Task) -> bool {
    match tasks.iter_mut().find(|t| t.id == replacement.id) {
        Some(slot) => {
            *slot = replacement;
            true
        }
        None => false,
    }
}
