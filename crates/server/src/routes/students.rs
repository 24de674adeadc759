use axum::{
    async_trait,
    extract::{FromRequest, Path, Request, State},
    Json,
};
use common::observability;
use serde::Serialize;
use serde_json::Value;
use service::errors::ServiceError;
use service::roster::{DerivedScore, StudentInput, StudentRecord};
use tracing::{info, warn};

use crate::errors::JsonApiError;
use crate::routes::ServerState;

/// JSON body checked for presence and type of every field before it
/// reaches the roster; range checks happen in the service.
#[derive(Debug)]
pub struct StudentPayload(pub StudentInput);

#[async_trait]
impl<S> FromRequest<S> for StudentPayload
where
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // syntax and content type first; any JSON value gets through
        let body = match Json::<Value>::from_request(req, state).await {
            Ok(Json(body)) => body,
            Err(rejection) => {
                warn!(reason = %rejection.body_text(), "rejected student body");
                observability::record_error("validation");
                return Err(rejection.into());
            }
        };
        // then field presence and types, all fields reported together
        StudentInput::from_json(&body).map(StudentPayload).map_err(|e| {
            warn!(err = %e, "rejected student body");
            observability::record_error(e.kind());
            JsonApiError::from(e)
        })
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub deleted_student: StudentRecord,
}

fn reject(operation: &str, e: ServiceError) -> JsonApiError {
    warn!(operation, err = %e, "roster operation rejected");
    observability::record_error(e.kind());
    e.into()
}

#[utoipa::path(
    get, path = "/students", tag = "학생 관리",
    responses((status = 200, description = "All students in roster order", body = [crate::openapi::DerivedScoreDoc]))
)]
pub async fn list_students(State(state): State<ServerState>) -> Json<Vec<DerivedScore>> {
    observability::record_request("list");
    Json(state.roster.list().await)
}

#[utoipa::path(
    get, path = "/students/{name}", tag = "학생 관리",
    params(("name" = String, Path, description = "Exact student name")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::DerivedScoreDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get_student(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Result<Json<DerivedScore>, JsonApiError> {
    observability::record_request("get");
    state.roster.get(&name).await.map(Json).map_err(|e| reject("get", e))
}

#[utoipa::path(
    post, path = "/students", tag = "학생 관리",
    request_body = crate::openapi::StudentInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::DerivedScoreDoc),
        (status = 400, description = "Name already exists", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn create_student(
    State(state): State<ServerState>,
    StudentPayload(input): StudentPayload,
) -> Result<Json<DerivedScore>, JsonApiError> {
    observability::record_request("create");
    let created = state.roster.create(input).await.map_err(|e| reject("create", e))?;
    state.publish_size().await;
    info!(name = %created.name, total = created.total, "created student");
    Ok(Json(created))
}

#[utoipa::path(
    put, path = "/students/{name}", tag = "학생 관리",
    params(("name" = String, Path, description = "Name of the student to replace")),
    request_body = crate::openapi::StudentInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::DerivedScoreDoc),
        (status = 400, description = "New name belongs to another student", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn update_student(
    State(state): State<ServerState>,
    Path(name): Path<String>,
    StudentPayload(input): StudentPayload,
) -> Result<Json<DerivedScore>, JsonApiError> {
    observability::record_request("update");
    let updated = state.roster.update(&name, input).await.map_err(|e| reject("update", e))?;
    info!(name = %name, new_name = %updated.name, "updated student");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/students/{name}", tag = "학생 관리",
    params(("name" = String, Path, description = "Name of the student to delete")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::DeleteResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete_student(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Result<Json<DeleteResponse>, JsonApiError> {
    observability::record_request("delete");
    let removed = state.roster.delete(&name).await.map_err(|e| reject("delete", e))?;
    // keep /metrics in step with the roster size
    state.publish_size().await;
    info!(name = %name, "deleted student");
    Ok(Json(DeleteResponse {
        message: format!("학생 '{name}'이(가) 삭제되었습니다."),
        deleted_student: removed,
    }))
}
