//! Employee module: repository abstraction plus the service enforcing
//! identifier validation, uniqueness and partial-update rules.

pub mod repository;
pub mod service;

pub use repository::RecordStore;
pub use service::{lookup_key, EmployeeService};
