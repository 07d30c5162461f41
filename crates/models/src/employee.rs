use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Postal address embedded in an employee record.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub uf: String,
    pub city: String,
    pub neighborhood: String,
    pub number: String,
    pub postal_code: String,
}

/// A stored employee. `cpf` is the unique key.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub name: String,
    pub cpf: String,
    pub work_card: String,
    pub national_id: String,
    pub role: String,
    pub department: String,
    pub room: String,
    pub phone: String,
    pub address: Address,
}

/// Create payload. Every field is required; the identifier is checked and
/// normalized by the service, so it is not part of `validate`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub name: String,
    pub cpf: String,
    pub work_card: String,
    pub national_id: String,
    pub role: String,
    pub department: String,
    pub room: String,
    pub phone: String,
    pub address: Address,
}

/// Partial update. `None` (absent or `null`) keeps the stored value;
/// `Some("")` clears it.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeePatch {
    pub name: Option<String>,
    pub work_card: Option<String>,
    pub national_id: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub room: Option<String>,
    pub phone: Option<String>,
    pub address: Option<AddressPatch>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressPatch {
    pub uf: Option<String>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub number: Option<String>,
    pub postal_code: Option<String>,
}

/// Values end up in a `|`-separated line; a separator or line break inside one
/// would shift every following field.
pub fn validate_field(field: &str, value: &str) -> Result<(), ModelError> {
    if value.contains(['|', '\n', '\r']) {
        return Err(ModelError::Validation(format!(
            "{field} must not contain '|' or line breaks"
        )));
    }
    Ok(())
}

impl Address {
    fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("address.uf", self.uf.as_str()),
            ("address.city", self.city.as_str()),
            ("address.neighborhood", self.neighborhood.as_str()),
            ("address.number", self.number.as_str()),
            ("address.postalCode", self.postal_code.as_str()),
        ]
    }

    pub fn apply(&mut self, patch: AddressPatch) {
        merge(&mut self.uf, patch.uf);
        merge(&mut self.city, patch.city);
        merge(&mut self.neighborhood, patch.neighborhood);
        merge(&mut self.number, patch.number);
        merge(&mut self.postal_code, patch.postal_code);
    }
}

impl NewEmployee {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::Validation("name must not be empty".into()));
        }
        let own = [
            ("name", self.name.as_str()),
            ("workCard", self.work_card.as_str()),
            ("nationalId", self.national_id.as_str()),
            ("role", self.role.as_str()),
            ("department", self.department.as_str()),
            ("room", self.room.as_str()),
            ("phone", self.phone.as_str()),
        ];
        own.into_iter()
            .chain(self.address.fields())
            .try_for_each(|(field, value)| validate_field(field, value))
    }

    /// Build the stored record under the given (normalized) identifier.
    pub fn into_employee(self, cpf: String) -> Employee {
        Employee {
            name: self.name,
            cpf,
            work_card: self.work_card,
            national_id: self.national_id,
            role: self.role,
            department: self.department,
            room: self.room,
            phone: self.phone,
            address: self.address,
        }
    }
}

impl EmployeePatch {
    pub fn validate(&self) -> Result<(), ModelError> {
        let own = [
            ("name", &self.name),
            ("workCard", &self.work_card),
            ("nationalId", &self.national_id),
            ("role", &self.role),
            ("department", &self.department),
            ("room", &self.room),
            ("phone", &self.phone),
        ];
        let addr = self.address.as_ref().map(|a| {
            [
                ("address.uf", &a.uf),
                ("address.city", &a.city),
                ("address.neighborhood", &a.neighborhood),
                ("address.number", &a.number),
                ("address.postalCode", &a.postal_code),
            ]
        });
        own.into_iter()
            .chain(addr.into_iter().flatten())
            .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
            .try_for_each(|(field, value)| validate_field(field, value))
    }
}

impl Employee {
    /// Field-level merge; the identifier is never touched.
    pub fn apply(&mut self, patch: EmployeePatch) {
        merge(&mut self.name, patch.name);
        merge(&mut self.work_card, patch.work_card);
        merge(&mut self.national_id, patch.national_id);
        merge(&mut self.role, patch.role);
        merge(&mut self.department, patch.department);
        merge(&mut self.room, patch.room);
        merge(&mut self.phone, patch.phone);
        if let Some(address) = patch.address {
            self.address.apply(address);
        }
    }
}

fn merge(slot: &mut String, value: Option<String>) {
    if let Some(v) = value {
        *slot = v;
    }
}
