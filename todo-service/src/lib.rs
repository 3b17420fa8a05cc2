//! HTTP/JSON todo service backed by an in-memory store.
//!
//! Routes:
//! - `GET /health`
//! - `GET|POST /api/todos`
//! - `GET|PUT|DELETE /api/todos/{id}`
//! - `GET /api/stats`
//!
//! Anything else, including an unsupported method on a known path, gets
//! `404 {"error":"Route not found"}`.

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::{net::TcpListener, sync::RwLock};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod deployment;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod model;
pub mod store;

pub use config::Config;
pub use deployment::Deployment;
pub use error::TodoError;
pub use filter::TodoFilter;
pub use model::{Category, CreateTodo, Priority, Todo, UpdateTodo};
pub use store::{TodoStats, TodoStore};

/// The store shared by all handlers. Writers hold the lock for their whole
/// read-modify-write, so no request sees a half-applied change.
pub type Db = Arc<RwLock<TodoStore>>;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub deployment: Arc<Deployment>,
}

/// Router over the seeded store.
pub fn app(config: &Config) -> Router {
    router(TodoStore::seeded(), Deployment::from_config(config))
}

pub fn router(store: TodoStore, deployment: Deployment) -> Router {
    use handlers::*;

    let state = AppState {
        db: Arc::new(RwLock::new(store)),
        deployment: Arc::new(deployment),
    };

    let routes = Router::new()
        .route("/health", get(health).fallback(route_not_found))
        .route(
            "/api/todos",
            get(list_todos).post(create_todo).fallback(route_not_found),
        )
        .route(
            "/api/todos/{id}",
            get(get_todo)
                .put(update_todo)
                .delete(delete_todo)
                .fallback(route_not_found),
        )
        .route("/api/stats", get(stats).fallback(route_not_found))
        .fallback(route_not_found)
        .with_state(state);

    with_middleware(routes)
}

/// Wraps `routes` in request tracing, permissive CORS and the panic-to-500
/// handler.
pub fn with_middleware(routes: Router) -> Router {
    routes.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(CatchPanicLayer::custom(handlers::handle_panic)),
    )
}

pub async fn run(listener: TcpListener, config: Config) -> Result<(), std::io::Error> {
    axum::serve(listener, app(&config)).await
}
