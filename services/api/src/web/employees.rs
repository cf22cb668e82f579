//! services/api/src/web/employees.rs
//!
//! Handlers for the employee collection. Failures are answered with a plain
//! text message; the underlying error only goes to the log.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use food_api_core::domain::{Employee, NewEmployee};
use food_api_core::ports::PortError;
use std::sync::Arc;
use tracing::{error, info};

use crate::web::schemas::{EmployeeSchema, NewEmployeeSchema};
use crate::web::state::AppState;

const READ_FAILED: &str = "Error reading the file";
const SAVE_FAILED: &str = "Error saving the data";

/// GET /employee - Retrieve all employees
#[utoipa::path(
    get,
    path = "/employee",
    responses(
        (status = 200, description = "A list of employees", body = [EmployeeSchema]),
        (status = 500, description = "Error reading the file", body = String, content_type = "text/plain")
    )
)]
pub async fn list_employees_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Employee>>, (StatusCode, &'static str)> {
    let employees = state.store.list_employees().await.map_err(|e| {
        error!("Failed to list employees: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, READ_FAILED)
    })?;
    Ok(Json(employees))
}

/// POST /employee - Add a new employee
///
/// The id is assigned by the server as one more than the highest existing id.
/// Any JSON object is accepted and stored as sent; fields are not validated.
#[utoipa::path(
    post,
    path = "/employee",
    request_body(content = NewEmployeeSchema, description = "Employee data to add"),
    responses(
        (status = 201, description = "Employee created successfully", body = String, content_type = "text/plain"),
        (status = 400, description = "The body is not valid JSON"),
        (status = 422, description = "The body is not a JSON object"),
        (status = 500, description = "Error reading the file or saving the data", body = String, content_type = "text/plain")
    )
)]
pub async fn create_employee_handler(
    State(state): State<Arc<AppState>>,
    Json(employee): Json<NewEmployee>,
) -> Result<impl IntoResponse, (StatusCode, &'static str)> {
    let created = state.store.create_employee(employee).await.map_err(|e| {
        error!("Failed to create employee: {:?}", e);
        let message = match e {
            PortError::Write(_) => SAVE_FAILED,
            _ => READ_FAILED,
        };
        (StatusCode::INTERNAL_SERVER_ERROR, message)
    })?;

    info!(id = created.id, "Employee created");
    Ok((StatusCode::CREATED, "Employee created successfully"))
}
