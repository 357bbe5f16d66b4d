//! HTTP boundary: routing, bearer-token authentication, and error mapping.
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /health` | [`handlers::health`] |
//! | `POST /api/auth/register` | [`handlers::auth::register`] |
//! | `POST /api/auth/login` | [`handlers::auth::login`] |
//! | `GET, POST /api/tasks` | [`handlers::tasks::list`], [`handlers::tasks::create`] |
//! | `GET, PUT, DELETE /api/tasks/{id}` | [`handlers::tasks::fetch`], [`handlers::tasks::update`], [`handlers::tasks::remove`] |

mod error;
mod extract;
pub mod handlers;
mod state;

pub use error::{ApiError, INTERNAL_ERROR_MESSAGE};
pub use extract::Authenticated;
pub use state::AppState;

use crate::auth::ports::UserRepository;
use crate::task::ports::TaskRepository;
use axum::Router;
use axum::http::{Method, header};
use axum::routing::{get, post};
use mockable::Clock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builds the application router.
pub fn router<T, U, C>(state: AppState<T, U, C>) -> Router
where
    T: TaskRepository + 'static,
    U: UserRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/auth/register", post(handlers::auth::register::<T, U, C>))
        .route("/api/auth/login", post(handlers::auth::login::<T, U, C>))
        .route(
            "/api/tasks",
            get(handlers::tasks::list::<T, U, C>).post(handlers::tasks::create::<T, U, C>),
        )
        .route(
            "/api/tasks/{id}",
            get(handlers::tasks::fetch::<T, U, C>)
                .put(handlers::tasks::update::<T, U, C>)
                .delete(handlers::tasks::remove::<T, U, C>),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
