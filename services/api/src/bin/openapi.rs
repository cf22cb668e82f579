//! services/api/src/bin/openapi.rs
//!
//! This binary generates the OpenAPI 3.0 specification for the REST API
//! and saves it to a file named `openapi.json`.

use api_lib::{error::ApiError, web::rest::openapi_document};

/// Generates the OpenAPI specification and writes it to a file.
fn generate_spec(api_doc: utoipa::openapi::OpenApi, path: &str) -> Result<(), ApiError> {
    let spec_json = api_doc.to_pretty_json()?;
    std::fs::write(path, spec_json)?;
    println!("OpenAPI specification generated at {}", path);
    Ok(())
}

fn main() -> Result<(), ApiError> {
    let public_url = std::env::var("PUBLIC_URL").ok();
    generate_spec(openapi_document(public_url.as_deref()), "openapi.json")?;
    Ok(())
}
