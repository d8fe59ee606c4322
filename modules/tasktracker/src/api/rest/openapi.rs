use modkit::api::problem::{Problem, ValidationError};
use utoipa::OpenApi;

use crate::api::rest::dto::{
    AnalyticsItemDto, AnalyticsSummaryDto, ProjectDetailsDto, ProjectDto, ProjectReq,
    TaskDetailsDto, TaskDto, TaskPriorityDto, TaskReq, TaskStatusDto, UserDto, UserReq,
};
use crate::api::rest::handlers;

#[derive(OpenApi)]
#[openapi(
    info(title = "TaskTracker API", description = "Users, projects, tasks and workload analytics"),
    paths(
        handlers::list_users,
        handlers::get_user,
        handlers::create_user,
        handlers::update_user,
        handlers::delete_user,
        handlers::list_projects,
        handlers::get_project,
        handlers::create_project,
        handlers::update_project,
        handlers::delete_project,
        handlers::list_tasks,
        handlers::get_task,
        handlers::create_task,
        handlers::update_task,
        handlers::delete_task,
        handlers::analytics_summary,
    ),
    components(schemas(
        UserDto,
        UserReq,
        ProjectDto,
        ProjectDetailsDto,
        ProjectReq,
        TaskDto,
        TaskDetailsDto,
        TaskReq,
        TaskStatusDto,
        TaskPriorityDto,
        AnalyticsItemDto,
        AnalyticsSummaryDto,
        Problem,
        ValidationError,
    )),
    tags(
        (name = "users"),
        (name = "projects"),
        (name = "tasks"),
        (name = "analytics"),
    )
)]
pub struct ApiDoc;

pub fn document() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = document();
        for path in [
            "/api/users",
            "/api/users/{id}",
            "/api/projects",
            "/api/projects/{id}",
            "/api/tasks",
            "/api/tasks/{id}",
            "/api/analytics/summary",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        let schemas = doc.components.as_ref().map(|c| &c.schemas).unwrap();
        assert!(schemas.contains_key("TaskDetailsDto"));
        assert!(schemas.contains_key("Problem"));
    }
}
