//! HTTP service over a file-backed todo collection.
//!
//! # Overview
//! Every request reloads `todos.json`, runs one operation from `todo-core`,
//! and mutations write the whole array back. Each request is also appended to
//! an audit log as `<timestamp> - <METHOD> <path>`.
//!
//! # Design
//! - No in-memory cache: the file is the source of truth between requests.
//! - Mutations are not serialized. Concurrent writers race and the last save
//!   wins.
//! - The audit log is an explicit handle in `AppState`, written by a
//!   background task so requests never wait on it.

pub mod audit;
pub mod config;
pub mod error;
pub mod routes;
pub mod store;

use std::future::Future;

use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use audit::AuditLog;
pub use config::ServerConfig;
pub use error::ApiError;
pub use store::{Store, StoreError};

/// Shared per-process handles. Holds no todo data.
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: Store,
    pub audit: AuditLog,
}

impl AppState {
    pub fn new(store: Store, audit: AuditLog) -> Self {
        Self { store, audit }
    }

    /// Build state from `config`, starting the audit writer. Must be called
    /// inside a tokio runtime.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            Store::new(&config.todos_file),
            AuditLog::spawn(&config.log_file),
        )
    }
}

pub fn app(state: AppState) -> Router {
    use routes::*;

    Router::new()
        .route(
            "/todos",
            get(list_todos).post(create_todo).fallback(route_not_found),
        )
        .route(
            "/todos/",
            get(get_todo)
                .put(update_todo)
                .delete(delete_todo)
                .fallback(route_not_found),
        )
        .route(
            "/todos/{*rest}",
            get(get_todo)
                .put(update_todo)
                .delete(delete_todo)
                .fallback(route_not_found),
        )
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(middleware::from_fn(reject_head))
        .layer(middleware::from_fn_with_state(state.clone(), audit_request))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

/// Like [`run`], but stops accepting connections once `shutdown` resolves.
pub async fn run_until<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown)
        .await
}
