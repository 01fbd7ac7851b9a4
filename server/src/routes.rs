//! Request handlers for `/todos`.
//!
//! Each handler runs one full snapshot cycle: load the file, apply a single
//! collection operation, and save only when that operation succeeded. Bodies
//! are parsed before the store is touched, so bad JSON never causes a write.

use std::convert::Infallible;

use axum::{
    body::Bytes,
    extract::{FromRequestParts, Query, Request, State},
    http::{request::Parts, Method},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use todo_core::{id_segment, parse_id, Collection, Fields, Todo};

use crate::error::{ApiError, Mutation};
use crate::AppState;

const ITEM_PREFIX: &str = "/todos/";

/// Id taken from the segment after `/todos/`. `None` when that segment is
/// not a number, which then matches no todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub Option<i64>);

impl<S: Send + Sync> FromRequestParts<S> for PathId {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let rest = parts.uri.path().strip_prefix(ITEM_PREFIX).unwrap_or_default();
        Ok(PathId(parse_id(id_segment(rest))))
    }
}

/// Map the raw `completed` query pairs to a filter.
///
/// Absent means no filter, a single `true` means done, and anything else
/// (other values, an empty value, or the key repeated) means not done.
fn completed_filter(pairs: &[(String, String)]) -> Option<bool> {
    let mut values = pairs.iter().filter(|(k, _)| k == "completed").map(|(_, v)| v);
    let first = values.next()?;
    Some(values.next().is_none() && first == "true")
}

fn parse_draft(body: &[u8]) -> Result<Fields, ApiError> {
    match serde_json::from_slice(body).map_err(|_| ApiError::InvalidJson)? {
        Value::Object(fields) => Ok(fields),
        Value::Null => Err(ApiError::InvalidJson),
        _ => Err(ApiError::MissingTitle),
    }
}

/// Any JSON value is a valid patch. Objects merge key by key, arrays and
/// strings contribute their elements under index keys (`"0"`, `"1"`, ...),
/// and scalars merge nothing.
fn parse_patch(body: &[u8]) -> Result<Fields, ApiError> {
    let patch = match serde_json::from_slice(body).map_err(|_| ApiError::InvalidJson)? {
        Value::Object(fields) => fields,
        Value::Array(items) => indexed(items),
        Value::String(s) => indexed(s.chars().map(|c| Value::String(c.to_string()))),
        Value::Null | Value::Bool(_) | Value::Number(_) => Fields::new(),
    };
    Ok(patch)
}

fn indexed(items: impl IntoIterator<Item = Value>) -> Fields {
    items
        .into_iter()
        .enumerate()
        .map(|(i, v)| (i.to_string(), v))
        .collect()
}

pub async fn list_todos(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<Collection> {
    let todos = state.store.load().await;
    Json(todos.filter_by_completed(completed_filter(&pairs)))
}

pub async fn get_todo(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<Todo>, ApiError> {
    let id = id.ok_or(ApiError::NotFound)?;
    let todos = state.store.load().await;
    todos.find_by_id(id).cloned().map(Json).ok_or(ApiError::NotFound)
}

pub async fn create_todo(State(state): State<AppState>, body: Bytes) -> Result<Json<Todo>, ApiError> {
    let draft = parse_draft(&body)?;
    let (todos, todo) = state.store.load().await.insert(draft)?;
    state
        .store
        .save(&todos)
        .await
        .map_err(|source| ApiError::Persistence { action: Mutation::Create, source })?;
    tracing::info!(id = ?todo.id(), "todo created");
    Ok(Json(todo))
}

pub async fn update_todo(
    State(state): State<AppState>,
    PathId(id): PathId,
    body: Bytes,
) -> Result<Json<Todo>, ApiError> {
    let patch = parse_patch(&body)?;
    let id = id.ok_or(ApiError::NotFound)?;
    let (todos, todo) = state.store.load().await.update(id, patch)?;
    state
        .store
        .save(&todos)
        .await
        .map_err(|source| ApiError::Persistence { action: Mutation::Update, source })?;
    tracing::info!(id, "todo updated");
    Ok(Json(todo))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<&'static str, ApiError> {
    let id = id.ok_or(ApiError::NotFound)?;
    let todos = state.store.load().await.remove(id)?;
    state
        .store
        .save(&todos)
        .await
        .map_err(|source| ApiError::Persistence { action: Mutation::Delete, source })?;
    tracing::info!(id, "todo deleted");
    Ok("Todo deleted")
}

pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Answer HEAD with the unmatched-route response instead of axum's implicit
/// GET-without-body handling.
pub async fn reject_head(request: Request, next: Next) -> Response {
    if request.method() == Method::HEAD {
        return ApiError::RouteNotFound.into_response();
    }
    next.run(request).await
}

/// Record `<METHOD> <path>` for every request, routed or not.
pub async fn audit_request(State(state): State<AppState>, request: Request, next: Next) -> Response {
    state
        .audit
        .record(format!("{} {}", request.method(), request.uri().path()));
    next.run(request).await
}
