//! In-process mock of the dashboard REST API.
//!
//! Collections are plain JSON arrays keyed by name. Ids are assigned as
//! `<collection>-<n>`, PATCH merges fields, and list queries filter by field
//! equality (plus `search` and `recent`). Every request's method, path and
//! headers are recorded so tests can assert on what the client sent.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use taskdeck_client::{ApiClient, ClientConfig, Session};
use taskdeck_core::models::User;

pub const PASSWORD: &str = "secret";
pub const TOKEN: &str = "token-123";
pub const CREATED_AT: &str = "2024-01-01T00:00:00Z";

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
}

#[derive(Default)]
struct Inner {
    collections: HashMap<String, Vec<Value>>,
    next_id: u64,
    requests: Vec<RecordedRequest>,
}

#[derive(Clone, Default)]
pub struct MockState {
    inner: Arc<Mutex<Inner>>,
}

impl MockState {
    pub fn seed(&self, collection: &str, items: Value) {
        let items = match items {
            Value::Array(items) => items,
            other => vec![other],
        };
        self.inner
            .lock()
            .unwrap()
            .collections
            .entry(collection.to_string())
            .or_default()
            .extend(items);
    }

    pub fn items(&self, collection: &str) -> Vec<Value> {
        self.inner
            .lock()
            .unwrap()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.inner
            .lock()
            .unwrap()
            .requests
            .last()
            .cloned()
            .expect("no request recorded")
    }

    pub fn request_count(&self) -> usize {
        self.inner.lock().unwrap().requests.len()
    }
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

pub struct MockApi {
    pub base_url: String,
    pub state: MockState,
}

impl MockApi {
    /// Client with an empty in-memory session.
    pub fn client(&self) -> ApiClient {
        let config = ClientConfig {
            base_url: self.base_url.clone(),
        };
        ApiClient::new(&config, Session::in_memory()).unwrap()
    }

    /// Client whose session is already signed in as `user`.
    pub fn client_as(&self, user: &Value) -> ApiClient {
        let client = self.client();
        let user: User = serde_json::from_value(user.clone()).unwrap();
        client.session().establish(TOKEN, &user).unwrap();
        client
    }
}

pub async fn spawn() -> MockApi {
    spawn_with(MockState::default()).await
}

pub async fn spawn_with(state: MockState) -> MockApi {
    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/users", post(auth_users))
        .route("/auth/profile", post(auth_profile))
        .route("/notifications/unread-count", get(unread_count))
        .route("/notifications/mark-all-read", patch(mark_all_read))
        .route("/notifications/{id}/read", patch(mark_read))
        .route("/{collection}", get(list_items).post(create_item))
        .route(
            "/{collection}/{id}",
            get(get_item).patch(update_item).delete(delete_item),
        )
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockApi {
        base_url: format!("http://{addr}"),
        state,
    }
}

async fn record(State(state): State<MockState>, req: Request, next: Next) -> Response {
    let recorded = RecordedRequest {
        method: req.method().clone(),
        path: req.uri().path().to_string(),
        query: req.uri().query().map(str::to_string),
        headers: req.headers().clone(),
    };
    state.inner.lock().unwrap().requests.push(recorded);
    next.run(req).await
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn not_found(collection: &str) -> Response {
    let entity = match collection {
        "users" => "User",
        "projects" => "Project",
        "tasks" => "Task",
        "comments" => "Comment",
        "notifications" => "Notification",
        _ => "Resource",
    };
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("{entity} not found") })),
    )
        .into_response()
}

fn string_field(item: &Value, key: &str) -> Option<String> {
    match item.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

async fn list_items(
    State(state): State<MockState>,
    Path(collection): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if collection == "projects" && params.get("status").map(String::as_str) == Some("boom") {
        return (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response();
    }

    let mut items: Vec<Value> = state
        .items(&collection)
        .into_iter()
        .filter(|item| {
            params.iter().all(|(key, value)| match key.as_str() {
                "recent" => true,
                "search" => {
                    let term = value.to_lowercase();
                    ["title", "name", "description", "email"].iter().any(|field| {
                        string_field(item, field)
                            .is_some_and(|s| s.to_lowercase().contains(&term))
                    })
                }
                field => string_field(item, field).as_deref() == Some(value.as_str()),
            })
        })
        .collect();

    if let Some(limit) = params.get("recent").and_then(|l| l.parse::<usize>().ok()) {
        items.sort_by(|a, b| string_field(b, "createdAt").cmp(&string_field(a, "createdAt")));
        items.truncate(limit);
    }

    Json(Value::Array(items)).into_response()
}

async fn get_item(
    State(state): State<MockState>,
    Path((collection, id)): Path<(String, String)>,
) -> Response {
    match (collection.as_str(), id.as_str()) {
        ("projects", "boom") => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "<html>boom</html>").into_response();
        }
        ("tasks", "legacy") => {
            return (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "message": "Upstream answered 404" })),
            )
                .into_response();
        }
        _ => {}
    }

    state
        .items(&collection)
        .into_iter()
        .find(|item| item["id"] == id.as_str())
        .map(|item| Json(item).into_response())
        .unwrap_or_else(|| not_found(&collection))
}

async fn create_item(
    State(state): State<MockState>,
    Path(collection): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let Value::Object(mut fields) = body else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": ["body must be an object", "id must not be set"] })),
        )
            .into_response();
    };

    let mut inner = state.inner.lock().unwrap();
    inner.next_id += 1;
    let id = format!("{collection}-{}", inner.next_id);
    fields.insert("id".to_string(), json!(id));
    fields.insert("createdAt".to_string(), json!(CREATED_AT));
    if collection != "notifications" && collection != "users" {
        fields.insert("updatedAt".to_string(), json!(CREATED_AT));
    }

    let item = Value::Object(fields);
    inner
        .collections
        .entry(collection)
        .or_default()
        .push(item.clone());
    (StatusCode::CREATED, Json(item)).into_response()
}

async fn update_item(
    State(state): State<MockState>,
    Path((collection, id)): Path<(String, String)>,
    Json(changes): Json<Value>,
) -> Response {
    let mut inner = state.inner.lock().unwrap();
    let Some(item) = inner
        .collections
        .get_mut(&collection)
        .and_then(|items| items.iter_mut().find(|item| item["id"] == id.as_str()))
    else {
        return not_found(&collection);
    };

    if let (Value::Object(target), Value::Object(changes)) = (&mut *item, changes) {
        for (key, value) in changes {
            target.insert(key, value);
        }
    }
    Json(item.clone()).into_response()
}

async fn delete_item(
    State(state): State<MockState>,
    Path((collection, id)): Path<(String, String)>,
) -> Response {
    let mut inner = state.inner.lock().unwrap();
    let Some(items) = inner.collections.get_mut(&collection) else {
        return not_found(&collection);
    };
    let before = items.len();
    items.retain(|item| item["id"] != id.as_str());
    if items.len() == before {
        return not_found(&collection);
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn login(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    let user = state
        .items("users")
        .into_iter()
        .find(|user| user["email"] == body["email"]);

    match user {
        Some(user) if body["password"] == PASSWORD => Json(json!({
            "user": user,
            "access_token": TOKEN,
            "expires_in": 3600,
        }))
        .into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        )
            .into_response(),
    }
}

fn is_authorized(headers: &HeaderMap) -> bool {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(format!("Bearer {TOKEN}").as_str())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Unauthorized" })),
    )
        .into_response()
}

async fn auth_users(State(state): State<MockState>, headers: HeaderMap) -> Response {
    if !is_authorized(&headers) {
        return unauthorized();
    }
    Json(Value::Array(state.items("users"))).into_response()
}

async fn auth_profile(State(state): State<MockState>, headers: HeaderMap) -> Response {
    if !is_authorized(&headers) {
        return unauthorized();
    }
    match state.items("users").into_iter().next() {
        Some(user) => Json(json!({ "user": user })).into_response(),
        None => not_found("users"),
    }
}

async fn unread_count(State(state): State<MockState>) -> Response {
    let count = state
        .items("notifications")
        .iter()
        .filter(|n| n["read"] == false)
        .count();
    Json(json!(count)).into_response()
}

async fn mark_read(State(state): State<MockState>, Path(id): Path<String>) -> Response {
    let mut inner = state.inner.lock().unwrap();
    let Some(item) = inner
        .collections
        .get_mut("notifications")
        .and_then(|items| items.iter_mut().find(|item| item["id"] == id.as_str()))
    else {
        return not_found("notifications");
    };
    item["read"] = json!(true);
    StatusCode::OK.into_response()
}

async fn mark_all_read(State(state): State<MockState>) -> Response {
    let mut inner = state.inner.lock().unwrap();
    if let Some(items) = inner.collections.get_mut("notifications") {
        for item in items.iter_mut() {
            item["read"] = json!(true);
        }
    }
    StatusCode::OK.into_response()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn user_json(id: &str, name: &str, email: &str, role: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": email,
        "role": role,
        "createdAt": CREATED_AT,
    })
}

pub fn project_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{name} description"),
        "status": "active",
        "createdAt": CREATED_AT,
        "updatedAt": CREATED_AT,
    })
}

pub fn task_json(id: &str, title: &str, status: &str, project_id: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "",
        "status": status,
        "priority": "medium",
        "projectId": project_id,
        "createdAt": CREATED_AT,
        "updatedAt": CREATED_AT,
    })
}

pub fn comment_json(id: &str, task_id: &str, author_id: &str, content: &str) -> Value {
    json!({
        "id": id,
        "taskId": task_id,
        "authorId": author_id,
        "content": content,
        "createdAt": CREATED_AT,
        "updatedAt": CREATED_AT,
    })
}

pub fn notification_json(id: &str, title: &str, read: bool) -> Value {
    json!({
        "id": id,
        "title": title,
        "message": format!("{title} message"),
        "type": "info",
        "read": read,
        "createdAt": CREATED_AT,
    })
}

/// Merge extra fields into a fixture.
pub fn with(mut base: Value, extra: Value) -> Value {
    if let (Value::Object(target), Value::Object(extra)) = (&mut base, extra) {
        target.extend(extra);
    }
    base
}
