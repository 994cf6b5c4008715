//! Entity handlers: one create and one list endpoint per record type.

use crate::error::AppError;
use crate::extractors::{ListParams, ListQuery, StudentListParams, ValidRecord};
use crate::response::{self, CreatedId, Items};
use crate::schema::{Company, PlacedStudent, Record, TeamMember};
use crate::service::CrudService;
use crate::state::AppState;
use crate::store::Filter;
use axum::{extract::State, response::IntoResponse};

async fn create_record<R: Record>(state: &AppState, record: &R) -> Result<impl IntoResponse, AppError> {
    let id = CrudService::create(state.store.as_ref(), R::COLLECTION, record).await?;
    Ok(response::created_id(id))
}

async fn list_records<R: Record>(state: &AppState, filter: Filter, limit: u64) -> Result<impl IntoResponse, AppError> {
    let items = CrudService::list_normalized(state.store.as_ref(), R::COLLECTION, &filter, limit).await?;
    Ok(response::items(items))
}

#[utoipa::path(
    post, path = "/api/students-placed", tag = "students",
    request_body = PlacedStudent,
    responses(
        (status = 200, description = "Created", body = CreatedId),
        (status = 422, description = "Validation error"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn create_student(
    State(state): State<AppState>,
    ValidRecord(student): ValidRecord<PlacedStudent>,
) -> Result<impl IntoResponse, AppError> {
    create_record(&state, &student).await
}

#[utoipa::path(
    get, path = "/api/students-placed", tag = "students",
    params(StudentListParams),
    responses(
        (status = 200, description = "Placed students", body = Items),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list_students(
    State(state): State<AppState>,
    query: ListQuery<StudentListParams>,
) -> Result<impl IntoResponse, AppError> {
    let filter = match query.params.year {
        Some(year) => Filter::new().eq("year", year),
        None => Filter::new(),
    };
    list_records::<PlacedStudent>(&state, filter, query.limit).await
}

#[utoipa::path(
    post, path = "/api/companies", tag = "companies",
    request_body = Company,
    responses(
        (status = 200, description = "Created", body = CreatedId),
        (status = 422, description = "Validation error"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn create_company(
    State(state): State<AppState>,
    ValidRecord(company): ValidRecord<Company>,
) -> Result<impl IntoResponse, AppError> {
    create_record(&state, &company).await
}

#[utoipa::path(
    get, path = "/api/companies", tag = "companies",
    params(ListParams),
    responses(
        (status = 200, description = "Companies", body = Items),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list_companies(
    State(state): State<AppState>,
    query: ListQuery<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    list_records::<Company>(&state, Filter::new(), query.limit).await
}

#[utoipa::path(
    post, path = "/api/team", tag = "team",
    request_body = TeamMember,
    responses(
        (status = 200, description = "Created", body = CreatedId),
        (status = 422, description = "Validation error"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn create_team_member(
    State(state): State<AppState>,
    ValidRecord(member): ValidRecord<TeamMember>,
) -> Result<impl IntoResponse, AppError> {
    create_record(&state, &member).await
}

#[utoipa::path(
    get, path = "/api/team", tag = "team",
    params(ListParams),
    responses(
        (status = 200, description = "Team members", body = Items),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list_team(
    State(state): State<AppState>,
    query: ListQuery<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    list_records::<TeamMember>(&state, Filter::new(), query.limit).await
}
