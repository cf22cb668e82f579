//! crates/food_api_core/src/domain.rs
//!
//! Defines the core records of the application. Each collection is persisted
//! as a JSON array, so the structs carry their own serde representation.
//!
//! Records keep every field they were stored or posted with. Only the fields
//! the service itself relies on are typed; the rest travel along untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The untyped remainder of a record, in its original key order.
pub type Fields = Map<String, Value>;

/// An employee record as stored on disk: its id plus whatever was posted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    #[serde(flatten)]
    pub fields: Fields,
}

/// The body of an employee creation request. Any JSON object is accepted;
/// nothing is validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewEmployee(pub Fields);

impl NewEmployee {
    /// Turns the request body into a stored record with the given id. A
    /// client-supplied `id` is replaced.
    pub fn with_id(mut self, id: i64) -> Employee {
        self.0.remove("id");
        Employee { id, fields: self.0 }
    }
}

/// Computes the id for the next employee: one past the current maximum, or 1
/// for an empty collection. Gaps left by missing ids are never reused.
pub fn next_employee_id(existing: &[Employee]) -> i64 {
    existing.iter().map(|e| e.id).max().map_or(1, |max| max + 1)
}

/// A food category with a few example foods, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodCategory {
    pub id: i64,
    pub category: String,
    pub examples: Vec<String>,
    #[serde(flatten)]
    pub extra: Fields,
}

// Seed data only. Passwords are stored and compared as plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password: String,
}

impl User {
    /// Exact, case-sensitive comparison of both credentials.
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

/// The payload kept server-side for one browser session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionData {
    pub user_id: Option<i64>,
}

impl SessionData {
    pub fn is_logged_in(&self) -> bool {
        self.user_id.is_some()
    }
}
