use std::sync::Arc;

use models::{cpf, Employee, EmployeePatch, NewEmployee};
use tokio::sync::Mutex;
use tracing::{info, instrument};

use super::repository::RecordStore;
use crate::errors::ServiceError;

/// CRUD rules for the roster on top of a whole-set `RecordStore`.
///
/// Every operation loads the full set, works on it in memory and, when it
/// mutates, saves the full set back. Mutations hold `write_lock` across
/// load, mutate and save. Lookups are linear scans, O(n) in the roster size.
pub struct EmployeeService<R: RecordStore> {
    repo: Arc<R>,
    write_lock: Mutex<()>,
}

/// Validate the checksum and return the digit-only key.
pub fn lookup_key(raw: &str) -> Result<String, ServiceError> {
    if !cpf::is_valid(raw) {
        return Err(ServiceError::InvalidIdentifier(format!("{raw:?} is not a valid CPF")));
    }
    Ok(cpf::normalize(raw))
}

/// Compares digit-only forms; stored identifiers may carry formatting.
fn position(records: &[Employee], key: &str) -> Option<usize> {
    records.iter().position(|e| cpf::normalize(&e.cpf) == key)
}

impl<R: RecordStore> EmployeeService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo, write_lock: Mutex::new(()) } }

    pub async fn list(&self) -> Result<Vec<Employee>, ServiceError> {
        self.repo.load_all().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Employee, ServiceError> {
        let key = lookup_key(id)?;
        let mut records = self.repo.load_all().await?;
        match position(&records, &key) {
            Some(idx) => Ok(records.swap_remove(idx)),
            None => Err(ServiceError::not_found("employee", &key)),
        }
    }

    /// Add a new employee under the normalized identifier.
    ///
    /// # Examples
    /// ```
    /// use service::employees::{repository::mock::MemoryStore, EmployeeService};
    /// use service::errors::ServiceError;
    /// use models::{Address, NewEmployee};
    /// use std::sync::Arc;
    /// let svc = EmployeeService::new(Arc::new(MemoryStore::default()));
    /// let input = NewEmployee {
    ///     name: "Ana".into(), cpf: "529.982.247-25".into(), work_card: "1".into(),
    ///     national_id: "2".into(), role: "Dev".into(), department: "IT".into(),
    ///     room: "1A".into(), phone: "5555".into(), address: Address::default(),
    /// };
    /// let created = tokio_test::block_on(svc.create(input.clone())).unwrap();
    /// assert_eq!(created.cpf, "52998224725");
    /// let again = tokio_test::block_on(svc.create(input));
    /// assert!(matches!(again, Err(ServiceError::Conflict(_))));
    /// ```
    #[instrument(skip(self, input), fields(cpf = %input.cpf))]
    pub async fn create(&self, input: NewEmployee) -> Result<Employee, ServiceError> {
        input.validate()?;
        let key = lookup_key(&input.cpf)?;

        let _guard = self.write_lock.lock().await;
        let mut records = self.repo.load_all().await?;
        if position(&records, &key).is_some() {
            let shown = cpf::format(&key).unwrap_or_else(|| key.clone());
            return Err(ServiceError::Conflict(format!("an employee with CPF {shown} already exists")));
        }
        let employee = input.into_employee(key);
        records.push(employee.clone());
        self.repo.save_all(&records).await?;
        info!(cpf = %employee.cpf, total = records.len(), "employee_created");
        Ok(employee)
    }

    /// Merge `patch` into the stored record; absent fields keep their value.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: &str, patch: EmployeePatch) -> Result<Employee, ServiceError> {
        let key = lookup_key(id)?;
        patch.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut records = self.repo.load_all().await?;
        let Some(employee) = records.iter_mut().find(|e| cpf::normalize(&e.cpf) == key) else {
            return Err(ServiceError::not_found("employee", &key));
        };
        employee.apply(patch);
        let updated = employee.clone();
        self.repo.save_all(&records).await?;
        info!(cpf = %key, "employee_updated");
        Ok(updated)
    }

    /// Remove the first record with the identifier and return it.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Employee, ServiceError> {
        let key = lookup_key(id)?;

        let _guard = self.write_lock.lock().await;
        let mut records = self.repo.load_all().await?;
        let idx = position(&records, &key).ok_or_else(|| ServiceError::not_found("employee", &key))?;
        let removed = records.remove(idx);
        self.repo.save_all(&records).await?;
        info!(cpf = %key, total = records.len(), "employee_deleted");
        Ok(removed)
    }
}
