//! Service layer for the employee roster.
//! - `storage`: the pipe-delimited line format of the record file.
//! - `file`: the flat-file `RecordStore` built on that format.
//! - `employees`: CRUD rules (identifier validation, conflicts, partial updates).

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod file;
pub mod employees;
