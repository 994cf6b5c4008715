use crate::response::{CreatedId, Items};
use crate::schema::{Company, PlacedStudent, TeamMember};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "TPO Portal API"),
    paths(
        crate::handlers::entity::create_student,
        crate::handlers::entity::list_students,
        crate::handlers::entity::create_company,
        crate::handlers::entity::list_companies,
        crate::handlers::entity::create_team_member,
        crate::handlers::entity::list_team,
    ),
    components(schemas(PlacedStudent, Company, TeamMember, CreatedId, Items)),
    tags(
        (name = "students"),
        (name = "companies"),
        (name = "team")
    )
)]
pub struct ApiDoc;
