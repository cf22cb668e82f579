//! services/api/src/web/rest.rs
//!
//! The master definition for the OpenAPI specification. The document is built
//! from the `#[utoipa::path]` annotations on the handlers.

use utoipa::openapi::server::Server;
use utoipa::OpenApi;

use crate::web::auth::{MessageResponse, SessionStatus};
use crate::web::schemas::{
    AddressSchema, EmployeeSchema, FoodCategorySchema, LoginRequestSchema, NewEmployeeSchema,
};
use crate::web::{auth, employees, food_categories};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    info(title = "Food API", description = "Employees, food categories and session-based login."),
    paths(
        auth::login_handler,
        auth::session_handler,
        auth::logout_handler,
        employees::list_employees_handler,
        employees::create_employee_handler,
        food_categories::list_food_categories_handler,
    ),
    components(
        schemas(
            AddressSchema,
            EmployeeSchema,
            NewEmployeeSchema,
            FoodCategorySchema,
            LoginRequestSchema,
            MessageResponse,
            SessionStatus,
        )
    ),
    tags(
        (name = "Food API", description = "API endpoints over the employee, food category and user files.")
    )
)]
pub struct ApiDoc;

/// Builds the OpenAPI document, advertising `public_url` as the server when given.
pub fn openapi_document(public_url: Option<&str>) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    if let Some(url) = public_url {
        doc.servers = Some(vec![Server::new(url)]);
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for path in ["/api/login", "/api/session", "/api/logout", "/employee", "/food-categories"] {
            assert!(paths.contains(&path), "{path} is missing from {paths:?}");
        }

        let employee = &doc.paths.paths["/employee"];
        assert!(employee.get.is_some());
        assert!(employee.post.is_some());

        let schemas = doc.components.unwrap().schemas;
        for name in ["Address", "Employee", "NewEmployee", "FoodCategory", "LoginRequest"] {
            assert!(schemas.contains_key(name), "{name} schema is missing");
        }
    }

    #[test]
    fn public_url_becomes_the_server() {
        let doc = openapi_document(Some("https://food.example.com"));
        let servers = doc.servers.unwrap();
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].url, "https://food.example.com");

        assert!(openapi_document(None).servers.is_none());
    }
}
