//! In-process mock of the task-tracker REST service.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

pub const TOKEN: &str = "tok-1";
pub const PASSWORD: &str = "secret1";

#[derive(Default)]
pub struct Recorded {
    /// `METHOD path` of every request, in arrival order.
    pub requests: Vec<String>,
    /// Authorization header values, in arrival order (`None` when absent).
    pub auth: Vec<Option<String>>,
    pub last_query: HashMap<String, String>,
    pub bodies: Vec<Value>,
}

#[derive(Clone, Default)]
pub struct MockState {
    pub recorded: Arc<Mutex<Recorded>>,
}

impl MockState {
    pub fn requests(&self) -> Vec<String> {
        self.recorded.lock().unwrap().requests.clone()
    }

    pub fn auth(&self) -> Vec<Option<String>> {
        self.recorded.lock().unwrap().auth.clone()
    }

    pub fn last_query(&self) -> HashMap<String, String> {
        self.recorded.lock().unwrap().last_query.clone()
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.recorded.lock().unwrap().bodies.clone()
    }

    fn record(&self, line: String, headers: &HeaderMap) {
        let mut rec = self.recorded.lock().unwrap();
        rec.requests.push(line);
        rec.auth.push(
            headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        );
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == format!("Bearer {}", TOKEN))
    }
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn unauthorized() -> Response {
    detail(StatusCode::UNAUTHORIZED, "Not authenticated")
}

pub fn task_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Task {}", id),
        "description": null,
        "status": status,
        "priority": "high",
        "assignee_id": 2,
        "project_id": 1
    })
}

fn seeded_tasks() -> Vec<Value> {
    vec![
        task_json(7, "to_do"),
        task_json(8, "in_progress"),
        task_json(9, "done"),
    ]
}

async fn login(State(state): State<MockState>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    state.record("POST /auth/login".into(), &headers);
    state.recorded.lock().unwrap().bodies.push(body.clone());
    if body["password"] == PASSWORD {
        Json(json!({ "access_token": TOKEN, "token_type": "bearer" })).into_response()
    } else {
        detail(StatusCode::UNAUTHORIZED, "Invalid Credentials")
    }
}

async fn signup(State(state): State<MockState>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    state.record("POST /auth/signup".into(), &headers);
    state.recorded.lock().unwrap().bodies.push(body.clone());
    if body["email"] == "taken@example.com" {
        return detail(StatusCode::BAD_REQUEST, "Email already registered");
    }
    (StatusCode::CREATED, Json(json!({ "id": 3, "email": body["email"] }))).into_response()
}

async fn list_projects(State(state): State<MockState>, headers: HeaderMap) -> Response {
    state.record("GET /projects/".into(), &headers);
    if !state.authorized(&headers) {
        return unauthorized();
    }
    Json(json!([
        { "id": 1, "title": "Launch", "description": "Q3 launch", "owner_id": 1 },
        { "id": 2, "title": "Ops", "description": null, "owner_id": 1 }
    ]))
    .into_response()
}

async fn create_project(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("POST /projects/".into(), &headers);
    if !state.authorized(&headers) {
        return unauthorized();
    }
    Json(json!({ "id": 5, "title": body["title"], "description": body["description"], "owner_id": 1 }))
        .into_response()
}

async fn get_project(State(state): State<MockState>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    state.record(format!("GET /projects/{}", id), &headers);
    if id == 1 {
        Json(json!({ "id": 1, "title": "Launch", "description": "Q3 launch", "owner_id": 1 })).into_response()
    } else {
        detail(StatusCode::NOT_FOUND, "Project not found")
    }
}

async fn update_project(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    state.record(format!("PUT /projects/{}", id), &headers);
    Json(json!({ "id": id, "title": body["title"], "description": body["description"], "owner_id": 1 }))
        .into_response()
}

async fn delete_project(State(state): State<MockState>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    state.record(format!("DELETE /projects/{}", id), &headers);
    Json(json!({ "detail": "Project deleted successfully" })).into_response()
}

async fn add_member(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path((id, user_id)): Path<(i64, i64)>,
) -> Response {
    state.record(format!("POST /projects/{}/add-member/{}", id, user_id), &headers);
    Json(json!({ "detail": format!("User {} added to project", user_id) })).into_response()
}

async fn list_tasks(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(project_id): Path<i64>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.record(format!("GET /tasks/project/{}", project_id), &headers);
    state.recorded.lock().unwrap().last_query = query.clone();
    if !state.authorized(&headers) {
        return unauthorized();
    }
    let tasks: Vec<Value> = seeded_tasks()
        .into_iter()
        .filter(|t| query.get("status").is_none_or(|s| t["status"] == *s.as_str()))
        .collect();
    Json(Value::Array(tasks)).into_response()
}

async fn create_task(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(project_id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    state.record(format!("POST /tasks/project/{}", project_id), &headers);
    state.recorded.lock().unwrap().bodies.push(body.clone());
    let mut task = body.clone();
    task["id"] = json!(42);
    task["project_id"] = json!(project_id);
    Json(task).into_response()
}

async fn update_task(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    state.record(format!("PUT /tasks/{}", id), &headers);
    state.recorded.lock().unwrap().bodies.push(body.clone());
    let mut task = body.clone();
    task["id"] = json!(id);
    task["project_id"] = json!(1);
    Json(task).into_response()
}

async fn delete_task(State(state): State<MockState>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    state.record(format!("DELETE /tasks/{}", id), &headers);
    if id == 404 {
        return detail(StatusCode::NOT_FOUND, "Task not found");
    }
    Json(json!({ "detail": "Task deleted successfully" })).into_response()
}

async fn mark(state: MockState, headers: HeaderMap, id: i64, action: &str, status: &str) -> Response {
    state.record(format!("PATCH /tasks/{}/{}", id, action), &headers);
    if !state.authorized(&headers) {
        return unauthorized();
    }
    // Task 8 is locked server-side.
    if id == 8 {
        return detail(StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable");
    }
    let mut task = task_json(id, status);
    task["description"] = json!("updated by server");
    Json(task).into_response()
}

async fn mark_done(State(state): State<MockState>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    mark(state, headers, id, "mark-done", "done").await
}

async fn mark_in_progress(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    mark(state, headers, id, "mark-in-progress", "in_progress").await
}

async fn mark_todo(State(state): State<MockState>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    mark(state, headers, id, "mark-todo", "to_do").await
}

async fn list_comments(State(state): State<MockState>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    state.record(format!("GET /comments/task/{}", id), &headers);
    Json(json!([
        { "id": 1, "content": "First!", "task_id": id, "user_id": 2, "created_at": "2024-05-01T09:30:00" },
        { "id": 2, "content": "Done soon?", "task_id": id, "user_id": 3, "created_at": "2024-05-02T10:00:00Z" }
    ]))
    .into_response()
}

async fn add_comment(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    state.record(format!("POST /comments/task/{}", id), &headers);
    Json(json!({
        "id": 3,
        "content": body["content"],
        "task_id": id,
        "user_id": 1,
        "created_at": "2024-05-03T12:00:00.123456"
    }))
    .into_response()
}

pub fn router(state: MockState) -> Router {
    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        .route("/projects/", get(list_projects).post(create_project))
        .route(
            "/projects/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/projects/{id}/add-member/{user_id}", post(add_member))
        .route("/tasks/project/{id}", get(list_tasks).post(create_task))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
        .route("/tasks/{id}/mark-done", patch(mark_done))
        .route("/tasks/{id}/mark-in-progress", patch(mark_in_progress))
        .route("/tasks/{id}/mark-todo", patch(mark_todo))
        .route("/comments/task/{id}", get(list_comments).post(add_comment))
        .with_state(state);
    Router::new().nest("/api", api)
}

/// Serve on an ephemeral port from inside an existing runtime.
pub async fn spawn_server() -> (String, MockState) {
    let state = MockState::default();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), state)
}

/// Serve on an ephemeral port from a dedicated thread, for blocking tests.
pub fn spawn_server_blocking() -> (String, MockState) {
    let (tx, rx) = std::sync::mpsc::channel::<(SocketAddr, MockState)>();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async move {
            let state = MockState::default();
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send((listener.local_addr().unwrap(), state.clone())).unwrap();
            axum::serve(listener, router(state)).await.unwrap();
        });
    });
    let (addr, state) = rx.recv().unwrap();
    (format!("http://{}", addr), state)
}
