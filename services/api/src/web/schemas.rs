//! services/api/src/web/schemas.rs
//!
//! OpenAPI shapes of the request and response bodies. They describe the
//! fields clients usually send; the handlers themselves accept and return
//! any additional fields unchanged.

use utoipa::ToSchema;

#[derive(ToSchema)]
#[schema(as = Address)]
pub struct AddressSchema {
    #[schema(example = "321 Maple Drive")]
    pub street: Option<String>,
    #[schema(example = "Star City")]
    pub city: Option<String>,
    #[schema(example = "CA")]
    pub state: Option<String>,
    #[schema(example = "90001")]
    pub zip: Option<String>,
}

/// Employee data to add. Every field is optional and extra fields are stored as sent.
#[derive(ToSchema)]
#[schema(as = NewEmployee)]
pub struct NewEmployeeSchema {
    #[schema(example = "Diana Prince")]
    pub name: Option<String>,
    #[schema(example = "diana.prince@example.com")]
    pub email: Option<String>,
    #[schema(example = 28)]
    pub age: Option<i64>,
    pub address: Option<AddressSchema>,
}

/// A stored employee: the posted fields plus the id assigned by the server.
#[derive(ToSchema)]
#[schema(as = Employee)]
pub struct EmployeeSchema {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "John Doe")]
    pub name: Option<String>,
    #[schema(example = "john.doe@example.com")]
    pub email: Option<String>,
    #[schema(example = 30)]
    pub age: Option<i64>,
    pub address: Option<AddressSchema>,
}

#[derive(ToSchema)]
#[schema(as = FoodCategory)]
pub struct FoodCategorySchema {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Fruits")]
    pub category: String,
    #[schema(example = json!(["Apple", "Banana"]))]
    pub examples: Vec<String>,
}

/// Login credentials. A missing or non-string field never matches a user.
#[derive(ToSchema)]
#[schema(as = LoginRequest)]
pub struct LoginRequestSchema {
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "password123")]
    pub password: String,
}
