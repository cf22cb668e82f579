//! services/api/src/web/docs.rs
//!
//! Serves the OpenAPI document and the Swagger UI viewer.
//!
//! The viewer page is answered directly on `/api-docs` rather than through a
//! redirect to `/api-docs/`. A `<base>` element keeps its relative asset links
//! pointing below `/api-docs/`, where the remaining Swagger UI files are served.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use std::sync::Arc;
use tracing::error;
use utoipa_swagger_ui::{Config, SwaggerFile};

/// Path of the interactive documentation viewer.
pub const DOCS_PATH: &str = "/api-docs";
/// Path of the machine-readable OpenAPI document.
pub const OPENAPI_PATH: &str = "/openapi.json";

const BASE_HREF: &str = "<base href=\"/api-docs/\">";

/// Routes for the OpenAPI document and the viewer.
pub fn docs_router(doc: utoipa::openapi::OpenApi) -> Router {
    let doc = Arc::new(doc);
    let config = Arc::new(Config::from(OPENAPI_PATH));

    Router::new()
        .route(
            OPENAPI_PATH,
            get(move || {
                let doc = doc.clone();
                async move { Json(doc.as_ref().clone()) }
            }),
        )
        .route(DOCS_PATH, get(viewer_page))
        .route(&format!("{DOCS_PATH}/"), get(viewer_page))
        .route(&format!("{DOCS_PATH}/{{*file}}"), get(viewer_file))
        .layer(Extension(config))
}

async fn viewer_page(Extension(config): Extension<Arc<Config<'static>>>) -> Response {
    match load(&config, "index.html") {
        Ok(file) => (
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            with_base_href(&String::from_utf8_lossy(&file.bytes)),
        )
            .into_response(),
        Err(status) => status.into_response(),
    }
}

async fn viewer_file(
    Path(file): Path<String>,
    Extension(config): Extension<Arc<Config<'static>>>,
) -> Response {
    if file == "index.html" {
        return viewer_page(Extension(config)).await;
    }
    match load(&config, &file) {
        Ok(file) => (
            [(header::CONTENT_TYPE, file.content_type)],
            file.bytes.into_owned(),
        )
            .into_response(),
        Err(status) => status.into_response(),
    }
}

fn load(config: &Arc<Config<'static>>, file: &str) -> Result<SwaggerFile<'static>, StatusCode> {
    match utoipa_swagger_ui::serve(file, config.clone()) {
        Ok(Some(file)) => Ok(file),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!("Failed to serve Swagger UI file {}: {}", file, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Inserts the `<base>` element at the start of the document head.
fn with_base_href(html: &str) -> String {
    if html.contains("<head>") {
        html.replacen("<head>", &format!("<head>{BASE_HREF}"), 1)
    } else {
        html.replacen("<html>", &format!("<html><head>{BASE_HREF}</head>"), 1)
    }
}
