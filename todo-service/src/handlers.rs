use std::any::Any;

use axum::{
    extract::{FromRequest, FromRequestParts, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::{
    deployment::{Host, Instance, Release},
    error::TodoError,
    filter::TodoFilter,
    model::{CreateTodo, Todo, UpdateTodo},
    store::TodoStats,
    AppState,
};

/// `axum::Json` with rejections reported as [`TodoError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(TodoError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Query` with rejections reported as [`TodoError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(TodoError))]
pub struct QueryParams<T>(pub T);

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: String,
    service: String,
    version: String,
    environment: String,
    deployment: Host,
}

#[derive(Serialize)]
pub struct ListResponse {
    todos: Vec<Todo>,
    total: usize,
    filters: TodoFilter,
    deployment: Release,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    message: &'static str,
    todo: Todo,
}

#[derive(Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    stats: TodoStats,
    deployment: Instance,
}

/// Path ids that are not unsigned integers match no todo.
fn parse_id(raw: &str) -> Result<u64, TodoError> {
    raw.parse().map_err(|_| TodoError::NotFound)
}

#[tracing::instrument(skip(state))]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let deployment = &state.deployment;
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        service: deployment.service.clone(),
        version: deployment.version.clone(),
        environment: deployment.environment.clone(),
        deployment: deployment.host(),
    })
}

#[tracing::instrument(skip(state))]
pub async fn list_todos(
    State(state): State<AppState>,
    QueryParams(pairs): QueryParams<Vec<(String, String)>>,
) -> Json<ListResponse> {
    let filter: TodoFilter = pairs.into_iter().collect();
    let todos = state.db.read().await.list(&filter);
    Json(ListResponse {
        total: todos.len(),
        todos,
        filters: filter,
        deployment: state.deployment.release(),
    })
}

#[tracing::instrument(skip(state))]
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, TodoError> {
    let id = parse_id(&id)?;
    let todos = state.db.read().await;
    todos.get(id).cloned().map(Json).ok_or(TodoError::NotFound)
}

#[tracing::instrument(skip(state, input))]
pub async fn create_todo(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), TodoError> {
    let new_todo = input.validate()?;
    let todo = state.db.write().await.create(new_todo);
    tracing::info!(id = todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

#[tracing::instrument(skip(state, input))]
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<UpdateTodo>,
) -> Result<Json<Todo>, TodoError> {
    let patch = input.validate()?;
    let id = parse_id(&id)?;
    let todo = state
        .db
        .write()
        .await
        .update(id, patch)
        .ok_or(TodoError::NotFound)?;
    tracing::info!(id = todo.id, "todo updated");
    Ok(Json(todo))
}

#[tracing::instrument(skip(state))]
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, TodoError> {
    let id = parse_id(&id)?;
    let todo = state.db.write().await.delete(id).ok_or(TodoError::NotFound)?;
    tracing::info!(id = todo.id, "todo deleted");
    Ok(Json(DeleteResponse {
        message: "Todo deleted successfully",
        todo,
    }))
}

#[tracing::instrument(skip(state))]
pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.db.read().await.stats();
    Json(StatsResponse {
        stats,
        deployment: state.deployment.instance(),
    })
}

pub async fn route_not_found() -> TodoError {
    TodoError::RouteNotFound
}

/// Turns a handler panic into a plain 500 so no internals reach the client.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(panic = detail, "request handler panicked");
    TodoError::Internal.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_ids_are_not_found() {
        for raw in ["abc", "-1", "1.5", "12abc", ""] {
            assert!(matches!(parse_id(raw), Err(TodoError::NotFound)), "{raw}");
        }
        assert_eq!(parse_id("42").unwrap(), 42);
    }

    #[tokio::test]
    async fn panic_becomes_generic_internal_error() {
        let response = handle_panic(Box::new("index out of bounds: secret detail"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Something went wrong!");
    }
}
