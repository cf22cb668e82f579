pub mod domain;
pub mod ports;

pub use domain::{next_employee_id, Employee, Fields, FoodCategory, NewEmployee, SessionData, User};
pub use ports::{PortError, PortResult, RecordStore, SessionStore};
