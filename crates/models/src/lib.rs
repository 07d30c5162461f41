//! Domain types for the employee roster.
//!
//! - `cpf`: checksum validation and normalization of the national identifier.
//! - `employee`: the record, its embedded address, and the create/patch payloads.

pub mod cpf;
pub mod employee;
pub mod errors;

pub use employee::{Address, AddressPatch, Employee, EmployeePatch, NewEmployee};
