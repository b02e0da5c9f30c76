use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use taskboard_common::{Comment, Project, ProjectFields, Task, TaskFields, TaskFilter};
use tracing::{debug, warn};

use super::BoardApi;
use super::types::{
    CommentRequest, DetailResponse, LoginRequest, LoginResponse, SignupRequest, detail_to_string,
};
use crate::config::ClientConfig;
use crate::errors::ApiError;
use crate::session::{KeyValueStore, MemoryStore, TOKEN_KEY};

/// HTTP client for the task-tracker service.
///
/// The bearer token is read from the session store on every request, so a
/// login or logout performed through the session is picked up immediately.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    root: String,
    tokens: Arc<dyn KeyValueStore>,
}

impl ApiClient {
    /// `root` is the base URL already joined with the API path segment,
    /// e.g. `http://localhost:8000/api`.
    pub fn new(root: impl Into<String>, tokens: Arc<dyn KeyValueStore>) -> Self {
        let root: String = root.into();
        Self {
            http: reqwest::Client::new(),
            root: root.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn from_config(config: &ClientConfig, tokens: Arc<dyn KeyValueStore>) -> Self {
        Self::new(config.api_root(), tokens)
    }

    /// Client with no session attached; requests go out without a token.
    pub fn anonymous(root: impl Into<String>) -> Self {
        Self::new(root, Arc::new(MemoryStore::new()))
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.root, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.tokens.get(TOKEN_KEY) {
            Ok(Some(token)) => builder.bearer_auth(token),
            Ok(None) => builder,
            Err(e) => {
                warn!(error = %e, "could not read session token; sending request without it");
                builder
            }
        }
    }

    async fn send(&self, builder: RequestBuilder, endpoint: &str) -> Result<Response, ApiError> {
        debug!(endpoint, "sending request");
        let resp = builder.send().await.map_err(ApiError::Transport)?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let detail = extract_detail(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
        debug!(endpoint, status = status.as_u16(), %detail, "request rejected");
        Err(ApiError::from_status(status.as_u16(), detail))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        endpoint: &str,
    ) -> Result<T, ApiError> {
        let resp = self.send(builder, endpoint).await?;
        let bytes = resp.bytes().await.map_err(ApiError::Transport)?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }

    /// Send and discard the body (delete endpoints answer with a detail
    /// message or nothing at all).
    async fn send_ack(&self, builder: RequestBuilder, endpoint: &str) -> Result<(), ApiError> {
        self.send(builder, endpoint).await?;
        Ok(())
    }

    // ── Auth ──────────────────────────────────────────────────────────

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let builder = self
            .request(Method::POST, "/auth/login")
            .json(&LoginRequest { email, password });
        self.send_json(builder, "POST /auth/login").await
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, "/auth/signup")
            .json(&SignupRequest {
                name,
                email,
                password,
            });
        self.send_ack(builder, "POST /auth/signup").await
    }
}

/// Pull a human-readable message out of an error body.
fn extract_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => match value.get("detail") {
            Some(detail) => Some(detail_to_string(detail)),
            None => Some(trimmed.to_string()),
        },
        Err(_) => Some(trimmed.to_string()),
    }
}

#[async_trait]
impl BoardApi for ApiClient {
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let builder = self.request(Method::GET, "/projects/");
        self.send_json(builder, "GET /projects").await
    }

    async fn get_project(&self, id: i64) -> Result<Project, ApiError> {
        let builder = self.request(Method::GET, &format!("/projects/{}", id));
        self.send_json(builder, "GET /projects/{id}").await
    }

    async fn create_project(&self, fields: &ProjectFields) -> Result<Project, ApiError> {
        let builder = self.request(Method::POST, "/projects/").json(fields);
        self.send_json(builder, "POST /projects").await
    }

    async fn update_project(&self, id: i64, fields: &ProjectFields) -> Result<Project, ApiError> {
        let builder = self
            .request(Method::PUT, &format!("/projects/{}", id))
            .json(fields);
        self.send_json(builder, "PUT /projects/{id}").await
    }

    async fn delete_project(&self, id: i64) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, &format!("/projects/{}", id));
        self.send_ack(builder, "DELETE /projects/{id}").await
    }

    async fn add_member(&self, project_id: i64, user_id: i64) -> Result<Option<String>, ApiError> {
        let builder = self.request(
            Method::POST,
            &format!("/projects/{}/add-member/{}", project_id, user_id),
        );
        let resp: DetailResponse = self
            .send_json(builder, "POST /projects/{id}/add-member/{user_id}")
            .await?;
        Ok(resp.message())
    }

    async fn list_tasks(
        &self,
        project_id: i64,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, ApiError> {
        let mut builder = self.request(Method::GET, &format!("/tasks/project/{}", project_id));
        if !filter.is_empty() {
            builder = builder.query(&filter.query_pairs());
        }
        self.send_json(builder, "GET /tasks/project/{id}").await
    }

    async fn create_task(&self, project_id: i64, fields: &TaskFields) -> Result<Task, ApiError> {
        let builder = self
            .request(Method::POST, &format!("/tasks/project/{}", project_id))
            .json(fields);
        self.send_json(builder, "POST /tasks/project/{id}").await
    }

    async fn update_task(&self, id: i64, fields: &TaskFields) -> Result<Task, ApiError> {
        let builder = self
            .request(Method::PUT, &format!("/tasks/{}", id))
            .json(fields);
        self.send_json(builder, "PUT /tasks/{id}").await
    }

    async fn delete_task(&self, id: i64) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, &format!("/tasks/{}", id));
        self.send_ack(builder, "DELETE /tasks/{id}").await
    }

    async fn mark_done(&self, id: i64) -> Result<Task, ApiError> {
        let builder = self.request(Method::PATCH, &format!("/tasks/{}/mark-done", id));
        self.send_json(builder, "PATCH /tasks/{id}/mark-done").await
    }

    async fn mark_in_progress(&self, id: i64) -> Result<Task, ApiError> {
        let builder = self.request(Method::PATCH, &format!("/tasks/{}/mark-in-progress", id));
        self.send_json(builder, "PATCH /tasks/{id}/mark-in-progress")
            .await
    }

    async fn mark_todo(&self, id: i64) -> Result<Task, ApiError> {
        let builder = self.request(Method::PATCH, &format!("/tasks/{}/mark-todo", id));
        self.send_json(builder, "PATCH /tasks/{id}/mark-todo").await
    }

    async fn list_comments(&self, task_id: i64) -> Result<Vec<Comment>, ApiError> {
        let builder = self.request(Method::GET, &format!("/comments/task/{}", task_id));
        self.send_json(builder, "GET /comments/task/{id}").await
    }

    async fn add_comment(&self, task_id: i64, content: &str) -> Result<Comment, ApiError> {
        let builder = self
            .request(Method::POST, &format!("/comments/task/{}", task_id))
            .json(&CommentRequest { content });
        self.send_json(builder, "POST /comments/task/{id}").await
    }
}
