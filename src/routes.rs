use axum::{
    error_handling::HandleErrorLayer,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::handle_middleware_error;
use crate::handlers;
use crate::AppState;

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(handlers::home::index))
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    let api_routes = Router::new()
        // Users
        .route("/api/users", post(handlers::users::create_user))
        .route("/api/users", get(handlers::users::list_users))
        // Exercises
        .route(
            "/api/users/:id/exercises",
            post(handlers::exercises::add_exercise),
        )
        .route("/api/users/:id/logs", get(handlers::exercises::get_log));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .fallback_service(ServeDir::new(&state.config.static_dir));

    if let Some(timeout) = state.config.request_timeout {
        app = app.layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(timeout),
        );
    }

    app.layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
