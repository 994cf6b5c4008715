//! Entity routes, mounted under `/api` by [`crate::routes::app_router`].

use crate::handlers::entity::{
    create_company, create_student, create_team_member, list_companies, list_students, list_team,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .route("/students-placed", get(list_students).post(create_student))
        .route("/companies", get(list_companies).post(create_company))
        .route("/team", get(list_team).post(create_team_member))
        .with_state(state)
}
