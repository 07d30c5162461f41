//! File-backed stores.

pub mod employee_store;

pub use employee_store::FlatFileStore;
