//! Typed access to the task-tracker REST service.
//!
//! `BoardApi` is the seam the board controller depends on. `ApiClient` is the
//! real implementation; tests substitute scripted fakes.
//!
//! Every call is a single round trip: no retries, no caching, no request
//! deduplication and no client-side timeout.

pub mod client;
pub mod types;

use async_trait::async_trait;
use taskboard_common::{Comment, Project, ProjectFields, Task, TaskFields, TaskFilter};

use crate::errors::ApiError;
pub use client::ApiClient;
pub use types::{LoginResponse, detail_to_string};

#[async_trait]
pub trait BoardApi: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError>;
    async fn get_project(&self, id: i64) -> Result<Project, ApiError>;
    async fn create_project(&self, fields: &ProjectFields) -> Result<Project, ApiError>;
    async fn update_project(&self, id: i64, fields: &ProjectFields) -> Result<Project, ApiError>;
    async fn delete_project(&self, id: i64) -> Result<(), ApiError>;
    async fn add_member(&self, project_id: i64, user_id: i64) -> Result<Option<String>, ApiError>;

    async fn list_tasks(&self, project_id: i64, filter: &TaskFilter)
    -> Result<Vec<Task>, ApiError>;
    async fn create_task(&self, project_id: i64, fields: &TaskFields) -> Result<Task, ApiError>;
    async fn update_task(&self, id: i64, fields: &TaskFields) -> Result<Task, ApiError>;
    async fn delete_task(&self, id: i64) -> Result<(), ApiError>;

    async fn mark_done(&self, id: i64) -> Result<Task, ApiError>;
    async fn mark_in_progress(&self, id: i64) -> Result<Task, ApiError>;
    async fn mark_todo(&self, id: i64) -> Result<Task, ApiError>;

    async fn list_comments(&self, task_id: i64) -> Result<Vec<Comment>, ApiError>;
    async fn add_comment(&self, task_id: i64, content: &str) -> Result<Comment, ApiError>;
}
