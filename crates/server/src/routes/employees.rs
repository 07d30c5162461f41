use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    Json,
};
use models::{Employee, EmployeePatch, NewEmployee};
use service::employees;
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[utoipa::path(
    get, path = "/api/employees", tag = "employees",
    responses((status = 200, description = "All records", body = [crate::openapi::EmployeeDoc]))
)]
pub async fn list_employees(State(state): State<ServerState>) -> Result<Json<Vec<Employee>>, JsonApiError> {
    let list = state.employees.list().await?;
    info!(count = list.len(), "list employees");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/api/employees/{cpf}", tag = "employees",
    params(("cpf" = String, Path, description = "CPF, formatted or digits only")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::EmployeeDoc),
        (status = 400, description = "Invalid Identifier", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get_employee(
    State(state): State<ServerState>,
    Path(cpf): Path<String>,
) -> Result<Json<Employee>, JsonApiError> {
    Ok(Json(state.employees.get(&cpf).await?))
}

#[utoipa::path(
    post, path = "/api/employees", tag = "employees",
    request_body = crate::openapi::NewEmployeeDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::EmployeeDoc),
        (status = 400, description = "Invalid Input or Identifier", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Conflict", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create_employee(
    State(state): State<ServerState>,
    payload: Result<Json<NewEmployee>, JsonRejection>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<Employee>), JsonApiError> {
    let Json(input) = payload?;
    let created = state.employees.create(input).await?;
    let location = format!("/api/employees/{}", created.cpf);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

#[utoipa::path(
    put, path = "/api/employees/{cpf}", tag = "employees",
    params(("cpf" = String, Path, description = "CPF, formatted or digits only")),
    request_body = crate::openapi::EmployeePatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::EmployeeDoc),
        (status = 400, description = "Invalid Identifier", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update_employee(
    State(state): State<ServerState>,
    Path(cpf): Path<String>,
    payload: Result<Json<EmployeePatch>, JsonRejection>,
) -> Result<Json<Employee>, JsonApiError> {
    // identifier errors take precedence over body errors
    let patch = match payload {
        Ok(Json(patch)) => patch,
        Err(rejection) => {
            employees::lookup_key(&cpf)?;
            return Err(rejection.into());
        }
    };
    Ok(Json(state.employees.update(&cpf, patch).await?))
}

#[utoipa::path(
    delete, path = "/api/employees/{cpf}", tag = "employees",
    params(("cpf" = String, Path, description = "CPF, formatted or digits only")),
    responses(
        (status = 200, description = "Removed record", body = crate::openapi::EmployeeDoc),
        (status = 400, description = "Invalid Identifier", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete_employee(
    State(state): State<ServerState>,
    Path(cpf): Path<String>,
) -> Result<Json<Employee>, JsonApiError> {
    Ok(Json(state.employees.delete(&cpf).await?))
}
