//! crates/food_api_core/src/ports.rs
//!
//! Defines the service contracts (traits) that the web layer depends on.
//! The concrete file-backed and in-memory implementations live in the `api`
//! service, which keeps the handlers independent of how records are stored.

use async_trait::async_trait;

use crate::domain::{Employee, FoodCategory, NewEmployee, SessionData, User};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// A collection file could not be read.
    #[error("Read failure: {0}")]
    Read(String),
    /// A collection file could not be written.
    #[error("Write failure: {0}")]
    Write(String),
    /// A collection file does not hold a valid JSON array of records.
    #[error("Malformed data: {0}")]
    Parse(String),
    #[error("Session store failure: {0}")]
    Session(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait RecordStore: Send + Sync {
    // --- Employees ---
    async fn list_employees(&self) -> PortResult<Vec<Employee>>;

    /// Appends a new employee, assigning the next id, and returns the stored record.
    async fn create_employee(&self, employee: NewEmployee) -> PortResult<Employee>;

    // --- Food Categories ---
    async fn list_food_categories(&self) -> PortResult<Vec<FoodCategory>>;

    // --- Users ---
    async fn list_users(&self) -> PortResult<Vec<User>>;

    async fn find_user_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> PortResult<Option<User>> {
        let users = self.list_users().await?;
        Ok(users.into_iter().find(|u| u.matches(email, password)))
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the session payload, or `None` if the id is unknown or expired.
    async fn get(&self, session_id: &str) -> PortResult<Option<SessionData>>;

    /// Creates or replaces the payload for a session.
    async fn set(&self, session_id: &str, data: SessionData) -> PortResult<()>;

    async fn destroy(&self, session_id: &str) -> PortResult<()>;
}
