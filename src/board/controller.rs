use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use taskboard_common::{
    Comment, Priority, Project, ProjectFields, Task, TaskFields, TaskFilter, TaskStatus,
};
use tracing::{debug, error, info, warn};

use super::dnd::{DragHandler, DropOutcome, DropResolution, resolve_drop};
use super::notify::{Notice, Notifier};
use super::transition::{Outcome, Transition, is_button_transition, replace_by_id};
use super::view::BoardView;
use crate::api::BoardApi;
use crate::errors::{ApiError, BoardError};

/// Editable fields of an existing task. Status and assignee are carried over
/// from the local copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

/// Result of `mark_status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionResult {
    /// The task already had the target status; nothing was sent.
    Unchanged,
    /// Server's representation after the transition.
    Committed(Task),
}

#[derive(Debug, Default)]
struct BoardState {
    projects: Vec<Project>,
    selected: Option<i64>,
    tasks: Vec<Task>,
    /// Bumped whenever the task list is discarded; responses carrying an
    /// older value are stale.
    generation: u64,
    dragging: Option<Task>,
}

/// In-memory board: projects, the selected project's tasks and the drag
/// preview.
///
/// State lives behind a `std::sync::Mutex` that is released before every
/// network call, so concurrent operations interleave only at await points.
pub struct BoardController {
    api: Arc<dyn BoardApi>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<BoardState>,
}

impl BoardController {
    pub fn new(api: Arc<dyn BoardApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            state: Mutex::new(BoardState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, BoardState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Log and surface a failure, then hand it back to the caller.
    fn fail(&self, headline: &str, err: BoardError) -> BoardError {
        if err.is_local() {
            warn!(error = %err, "{}", headline);
            self.notifier.notify(Notice::warning(err.to_string()));
        } else {
            error!(error = %err, "{}", headline);
            self.notifier
                .notify(Notice::error(format!("{}: {}", headline, err)));
        }
        err
    }

    fn require_title(title: &str, message: &str) -> Result<(), BoardError> {
        if title.trim().is_empty() {
            return Err(BoardError::Validation(message.to_string()));
        }
        Ok(())
    }

    // ── Snapshots ────────────────────────────────────────────────────

    pub fn projects(&self) -> Vec<Project> {
        self.state().projects.clone()
    }

    pub fn selected_project(&self) -> Option<i64> {
        self.state().selected
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.state().tasks.clone()
    }

    pub fn task(&self, id: i64) -> Option<Task> {
        self.state().tasks.iter().find(|t| t.id == id).cloned()
    }

    pub fn board(&self) -> BoardView {
        let state = self.state();
        BoardView::group(state.selected, &state.tasks)
    }

    /// Card captured by an in-progress drag, for the floating preview.
    pub fn dragging(&self) -> Option<Task> {
        self.state().dragging.clone()
    }

    // ── Projects ─────────────────────────────────────────────────────

    pub async fn load_projects(&self) -> Result<Vec<Project>, BoardError> {
        match self.api.list_projects().await {
            Ok(projects) => {
                debug!(count = projects.len(), "projects loaded");
                self.state().projects = projects.clone();
                Ok(projects)
            }
            Err(e) => Err(self.fail("Error fetching projects", e.into())),
        }
    }

    pub async fn create_project(&self, fields: ProjectFields) -> Result<Project, BoardError> {
        Self::require_title(&fields.title, "Please enter a project title")
            .map_err(|e| self.fail("Error creating project", e))?;

        match self.api.create_project(&fields).await {
            Ok(project) => {
                info!(project_id = project.id, "project created");
                self.state().projects.push(project.clone());
                Ok(project)
            }
            Err(e) => Err(self.fail("Error creating project", e.into())),
        }
    }

    pub async fn update_project(
        &self,
        id: i64,
        fields: ProjectFields,
    ) -> Result<Project, BoardError> {
        Self::require_title(&fields.title, "Please enter a project title")
            .map_err(|e| self.fail("Error updating project", e))?;

        match self.api.update_project(id, &fields).await {
            Ok(project) => {
                info!(project_id = id, "project updated");
                let mut state = self.state();
                if let Some(slot) = state.projects.iter_mut().find(|p| p.id == id) {
                    *slot = project.clone();
                }
                Ok(project)
            }
            Err(e) => Err(self.fail("Error updating project", e.into())),
        }
    }

    pub async fn delete_project(&self, id: i64) -> Result<(), BoardError> {
        match self.api.delete_project(id).await {
            Ok(()) => {
                info!(project_id = id, "project deleted");
                let mut state = self.state();
                state.projects.retain(|p| p.id != id);
                if state.selected == Some(id) {
                    state.selected = None;
                    state.tasks.clear();
                    state.dragging = None;
                    state.generation += 1;
                }
                Ok(())
            }
            Err(e) => Err(self.fail("Error deleting project", e.into())),
        }
    }

    /// Returns the server's acknowledgement message, if any.
    pub async fn add_member(
        &self,
        project_id: i64,
        user_id: i64,
    ) -> Result<Option<String>, BoardError> {
        match self.api.add_member(project_id, user_id).await {
            Ok(detail) => {
                info!(project_id, user_id, "member added");
                Ok(detail)
            }
            Err(e) => Err(self.fail("Error adding member", e.into())),
        }
    }

    // ── Selection ────────────────────────────────────────────────────

    pub async fn select_project(&self, id: i64) -> Result<Vec<Task>, BoardError> {
        self.select_project_filtered(id, &TaskFilter::default())
            .await
    }

    /// Make `id` the active project and fetch its tasks. The previous list is
    /// discarded before the request goes out; a response that arrives after a
    /// newer selection is dropped.
    pub async fn select_project_filtered(
        &self,
        id: i64,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, BoardError> {
        let generation = {
            let mut state = self.state();
            state.selected = Some(id);
            state.tasks.clear();
            state.dragging = None;
            state.generation += 1;
            state.generation
        };

        let result = self.api.list_tasks(id, filter).await;

        let mut state = self.state();
        if state.generation != generation {
            debug!(project_id = id, "discarding task list for superseded selection");
            return match result {
                Ok(_) => Ok(state.tasks.clone()),
                Err(e) => Err(e.into()),
            };
        }
        match result {
            Ok(tasks) => {
                debug!(project_id = id, count = tasks.len(), "tasks loaded");
                state.tasks = tasks.clone();
                Ok(tasks)
            }
            Err(e) => {
                drop(state);
                Err(self.fail("Error fetching tasks", e.into()))
            }
        }
    }

    // ── Tasks ────────────────────────────────────────────────────────

    pub async fn create_task(&self, fields: TaskFields) -> Result<Task, BoardError> {
        Self::require_title(&fields.title, "Please enter a task title")
            .map_err(|e| self.fail("Error creating task", e))?;

        let selection = {
            let state = self.state();
            state.selected.map(|id| (id, state.generation))
        };
        let Some((project_id, generation)) = selection else {
            return Err(self.fail("Error creating task", BoardError::NoProjectSelected));
        };

        match self.api.create_task(project_id, &fields).await {
            Ok(task) => {
                info!(task_id = task.id, project_id, "task created");
                let mut state = self.state();
                if state.generation == generation {
                    state.tasks.push(task.clone());
                }
                Ok(task)
            }
            Err(e) => Err(self.fail("Error creating task", e.into())),
        }
    }

    pub async fn update_task(&self, id: i64, edit: TaskEdit) -> Result<Task, BoardError> {
        Self::require_title(&edit.title, "Please enter a task title")
            .map_err(|e| self.fail("Error updating task", e))?;

        let current = {
            let state = self.state();
            state
                .tasks
                .iter()
                .find(|t| t.id == id)
                .map(|t| (t.status, t.assignee_id, state.generation))
        };
        let Some((status, assignee_id, generation)) = current else {
            return Err(self.fail("Error updating task", BoardError::TaskNotFound { id }));
        };
        let fields = TaskFields {
            title: edit.title,
            description: edit.description,
            status,
            priority: edit.priority,
            assignee_id,
        };

        match self.api.update_task(id, &fields).await {
            Ok(task) => {
                info!(task_id = id, "task updated");
                let mut state = self.state();
                if state.generation == generation {
                    replace_by_id(&mut state.tasks, task.clone());
                }
                Ok(task)
            }
            Err(e) => Err(self.fail("Error updating task", e.into())),
        }
    }

    pub async fn delete_task(&self, id: i64) -> Result<(), BoardError> {
        match self.api.delete_task(id).await {
            Ok(()) => {
                info!(task_id = id, "task deleted");
                let mut state = self.state();
                state.tasks.retain(|t| t.id != id);
                if state.dragging.as_ref().is_some_and(|t| t.id == id) {
                    state.dragging = None;
                }
                Ok(())
            }
            Err(e) => Err(self.fail("Error deleting task", e.into())),
        }
    }

    // ── Status transitions ───────────────────────────────────────────

    async fn send_transition(&self, id: i64, target: TaskStatus) -> Result<Task, ApiError> {
        match target {
            TaskStatus::ToDo => self.api.mark_todo(id).await,
            TaskStatus::InProgress => self.api.mark_in_progress(id).await,
            TaskStatus::Done => self.api.mark_done(id).await,
        }
    }

    /// Move a task to `target` optimistically.
    ///
    /// The local entry shows `target` before the request is sent. On success
    /// it is replaced by the server's task; on failure the full pre-change
    /// snapshot is restored and an error notice raised. Results for a task
    /// that has since left the list (deleted, or the selection changed) are
    /// not written back.
    pub async fn mark_status(
        &self,
        id: i64,
        target: TaskStatus,
    ) -> Result<TransitionResult, BoardError> {
        let (transition, generation) = {
            let mut state = self.state();
            let index = state.tasks.iter().position(|t| t.id == id);
            let Some(index) = index else {
                drop(state);
                return Err(self.fail(
                    "Error updating task status",
                    BoardError::TaskNotFound { id },
                ));
            };
            let begun = Transition::begin(&state.tasks[index], target);
            let Some((transition, speculative)) = begun else {
                debug!(task_id = id, status = %target, "task already has target status");
                return Ok(TransitionResult::Unchanged);
            };
            state.tasks[index] = speculative;
            (transition, state.generation)
        };
        debug!(task_id = id, from = %transition.snapshot().status, to = %target, "optimistic transition");

        let result = self.send_transition(id, target).await;

        let outcome = match &result {
            Ok(task) => Outcome::Confirmed(task.clone()),
            Err(_) => Outcome::Failed,
        };
        let next = transition.settle(outcome);
        {
            let mut state = self.state();
            if state.generation == generation {
                if !replace_by_id(&mut state.tasks, next) {
                    debug!(task_id = id, "task left the board before its transition settled");
                }
            } else {
                debug!(task_id = id, "discarding transition result for superseded selection");
            }
        }

        match result {
            Ok(task) => {
                info!(task_id = id, status = %task.status, "transition confirmed");
                Ok(TransitionResult::Committed(task))
            }
            Err(e) => Err(self.fail(
                "Error updating task status; changes reverted",
                e.into(),
            )),
        }
    }

    /// Transition through an action button. Only forward moves offered as
    /// buttons are accepted.
    pub async fn mark_via_button(
        &self,
        id: i64,
        target: TaskStatus,
    ) -> Result<TransitionResult, BoardError> {
        let Some(current) = self.task(id).map(|t| t.status) else {
            return Err(self.fail(
                "Error updating task status",
                BoardError::TaskNotFound { id },
            ));
        };
        if !is_button_transition(current, target) {
            return Err(self.fail(
                "Error updating task status",
                BoardError::TransitionNotAllowed {
                    id,
                    from: current,
                    to: target,
                },
            ));
        }
        self.mark_status(id, target).await
    }

    // ── Comments ─────────────────────────────────────────────────────

    pub async fn list_comments(&self, task_id: i64) -> Result<Vec<Comment>, BoardError> {
        self.api
            .list_comments(task_id)
            .await
            .map_err(|e| self.fail("Error fetching comments", e.into()))
    }

    pub async fn add_comment(&self, task_id: i64, content: &str) -> Result<Comment, BoardError> {
        if content.trim().is_empty() {
            return Err(self.fail(
                "Error adding comment",
                BoardError::Validation("Please enter a comment".to_string()),
            ));
        }
        match self.api.add_comment(task_id, content).await {
            Ok(comment) => {
                info!(task_id, comment_id = comment.id, "comment added");
                Ok(comment)
            }
            Err(e) => Err(self.fail("Error adding comment", e.into())),
        }
    }
}

#[async_trait]
impl DragHandler for BoardController {
    fn on_drag_start(&self, task_id: i64) {
        let mut state = self.state();
        state.dragging = state.tasks.iter().find(|t| t.id == task_id).cloned();
        debug!(task_id, captured = state.dragging.is_some(), "drag started");
    }

    async fn on_drag_end(
        &self,
        task_id: i64,
        drop_target: Option<&str>,
    ) -> Result<DropOutcome, BoardError> {
        let resolution = {
            let mut state = self.state();
            state.dragging = None;
            resolve_drop(&state.tasks, task_id, drop_target)
        };

        match resolution {
            DropResolution::Ignore(outcome) => {
                debug!(task_id, ?outcome, "drop ignored");
                Ok(outcome)
            }
            DropResolution::Transition { task_id, target } => {
                match self.mark_status(task_id, target).await? {
                    TransitionResult::Committed(task) => Ok(DropOutcome::Moved(task)),
                    TransitionResult::Unchanged => Ok(DropOutcome::SameColumn),
                }
            }
        }
    }
}
