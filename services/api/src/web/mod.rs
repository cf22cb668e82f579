pub mod auth;
pub mod docs;
pub mod employees;
pub mod food_categories;
pub mod rest;
pub mod schemas;
pub mod session;
pub mod state;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub use auth::{login_handler, logout_handler, session_handler};
pub use docs::{DOCS_PATH, OPENAPI_PATH};
pub use employees::{create_employee_handler, list_employees_handler};
pub use food_categories::list_food_categories_handler;
pub use session::session_layer;
pub use state::AppState;

/// Builds the complete application router.
pub fn router(state: Arc<AppState>) -> Router {
    // Every origin is allowed with credentials. The origin is mirrored rather
    // than sent as `*`, which browsers refuse for credentialed requests.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    let api_router = Router::new()
        .route("/api/login", post(login_handler))
        .route("/api/session", get(session_handler))
        .route("/api/logout", post(logout_handler))
        .route(
            "/employee",
            get(list_employees_handler).post(create_employee_handler),
        )
        .route("/food-categories", get(list_food_categories_handler))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            session_layer,
        ))
        .with_state(state.clone());

    let docs = docs::docs_router(rest::openapi_document(state.config.public_url.as_deref()));

    Router::new()
        .merge(api_router)
        .merge(docs)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
