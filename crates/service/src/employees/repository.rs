use async_trait::async_trait;
use models::Employee;

use crate::errors::ServiceError;

/// Whole-set persistence for the roster.
///
/// There is no per-record API: callers load everything, mutate, and save the
/// complete set back. Implementations must not cache between calls.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// An absent backing store is an empty roster, not an error.
    async fn load_all(&self) -> Result<Vec<Employee>, ServiceError>;
    /// Replace the stored set with `records`, in the given order.
    async fn save_all(&self, records: &[Employee]) -> Result<(), ServiceError>;
}

/// Simple in-memory store for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemoryStore {
        records: Mutex<Vec<Employee>>,
        saves: AtomicUsize,
        fail_saves: AtomicBool,
    }

    impl MemoryStore {
        pub fn with_records(records: Vec<Employee>) -> Self {
            Self { records: Mutex::new(records), ..Self::default() }
        }

        /// Make every subsequent `save_all` fail with a storage error.
        pub fn fail_saves(&self, fail: bool) { self.fail_saves.store(fail, Ordering::SeqCst); }

        pub fn save_count(&self) -> usize { self.saves.load(Ordering::SeqCst) }

        pub fn snapshot(&self) -> Vec<Employee> {
            self.records.lock().unwrap_or_else(|e| e.into_inner()).clone()
        }
    }

    #[async_trait]
    impl RecordStore for MemoryStore {
        async fn load_all(&self) -> Result<Vec<Employee>, ServiceError> {
            Ok(self.snapshot())
        }

        async fn save_all(&self, records: &[Employee]) -> Result<(), ServiceError> {
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(ServiceError::Storage("save disabled".into()));
            }
            *self.records.lock().unwrap_or_else(|e| e.into_inner()) = records.to_vec();
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }
}
