//! OpenAPI document. The schemas mirror `models` types for documentation only.

use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressDoc {
    pub uf: String,
    pub city: String,
    pub neighborhood: String,
    pub number: String,
    pub postal_code: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDoc {
    pub name: String,
    /// 11 digits, stored without formatting
    pub cpf: String,
    pub work_card: String,
    pub national_id: String,
    pub role: String,
    pub department: String,
    pub room: String,
    pub phone: String,
    pub address: AddressDoc,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployeeDoc {
    pub name: String,
    /// Formatting such as `529.982.247-25` is accepted
    pub cpf: String,
    pub work_card: String,
    pub national_id: String,
    pub role: String,
    pub department: String,
    pub room: String,
    pub phone: String,
    pub address: AddressDoc,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressPatchDoc {
    pub uf: Option<String>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub number: Option<String>,
    pub postal_code: Option<String>,
}

/// Absent or null fields keep their stored value; an empty string clears it.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatchDoc {
    pub name: Option<String>,
    pub work_card: Option<String>,
    pub national_id: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub room: Option<String>,
    pub phone: Option<String>,
    pub address: Option<AddressPatchDoc>,
}

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub status: u16,
    pub error: String,
    pub detail: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::employees::list_employees,
        crate::routes::employees::get_employee,
        crate::routes::employees::create_employee,
        crate::routes::employees::update_employee,
        crate::routes::employees::delete_employee,
    ),
    components(
        schemas(
            HealthResponse,
            AddressDoc,
            EmployeeDoc,
            NewEmployeeDoc,
            AddressPatchDoc,
            EmployeePatchDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "employees")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_employee_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/employees"));
        assert!(doc.paths.paths.contains_key("/api/employees/{cpf}"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
