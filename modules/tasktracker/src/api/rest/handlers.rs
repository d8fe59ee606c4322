use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query,
    },
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use chrono::{DateTime, Utc};
use modkit::api::problem::{Problem, ProblemResponse};
use tracing::{error, info};

use crate::api::rest::dto::{
    AnalyticsSummaryDto, ListTasksQuery, ProjectDetailsDto, ProjectDto, ProjectReq,
    TaskDetailsDto, TaskDto, TaskReq, UserDto, UserReq,
};
use crate::api::rest::error::{invalid_query, map_domain_error, map_json_rejection};
use crate::contract::model::TaskFilter;
use crate::domain::error::DomainError;
use crate::domain::service::Service;

type ApiResult<T> = Result<T, ProblemResponse>;

fn parse_body<T>(body: Result<Json<T>, JsonRejection>, uri: &Uri) -> ApiResult<T> {
    match body {
        Ok(Json(v)) => Ok(v),
        Err(rejection) => {
            info!("Rejected request body: {}", rejection.body_text());
            Err(map_json_rejection(&rejection, uri.path()))
        }
    }
}

/// Body of a PUT. When the body is rejected, a missing target still wins
/// and answers 404.
async fn parse_update_body<T, V>(
    body: Result<Json<T>, JsonRejection>,
    uri: &Uri,
    target: impl Future<Output = Result<V, DomainError>>,
) -> ApiResult<T> {
    if body.is_err() {
        if let Err(e) = target.await {
            info!("Update target is missing: {}", e);
            return Err(map_domain_error(&e, uri.path()));
        }
    }
    parse_body(body, uri)
}

/// `?status=` means no status filter.
fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.is_empty())
}

fn parse_instant(
    param: &str,
    raw: Option<String>,
    uri: &Uri,
) -> ApiResult<Option<DateTime<Utc>>> {
    non_empty(raw).map(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|d| d.with_timezone(&Utc))
            .map_err(|e| {
                invalid_query(
                    param,
                    format!("'{s}' is not an RFC 3339 timestamp ({e})"),
                    uri.path(),
                )
            })
    })
    .transpose()
}

// ---- users ----

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "All users", body = [UserDto]),
        (status = 500, description = "Internal Server Error", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn list_users(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
) -> ApiResult<Json<Vec<UserDto>>> {
    match svc.list_users().await {
        Ok(users) => Ok(Json(users.into_iter().map(UserDto::from).collect())),
        Err(e) => {
            error!("Failed to list users: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Get a specific user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    uri: Uri,
) -> ApiResult<Json<UserDto>> {
    info!("Getting user with id: {}", id);

    match svc.get_user(&id).await {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => {
            error!("Failed to get user {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = UserReq,
    responses(
        (status = 201, description = "Created user", body = UserDto),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 409, description = "Email already in use", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn create_user(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    body: Result<Json<UserReq>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UserDto>)> {
    let req = parse_body(body, &uri)?;
    info!("Creating user: {:?}", req);

    match svc.create_user(req.into()).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(UserDto::from(user)))),
        Err(e) => {
            error!("Failed to create user: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Replace a user's name and email
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    request_body = UserReq,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
        (status = 409, description = "Email already in use", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn update_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    uri: Uri,
    body: Result<Json<UserReq>, JsonRejection>,
) -> ApiResult<Json<UserDto>> {
    let req = parse_update_body(body, &uri, svc.get_user(&id)).await?;
    info!("Updating user {} with: {:?}", id, req);

    match svc.update_user(&id, req.into()).await {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => {
            error!("Failed to update user {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Delete a user; succeeds whether or not it existed
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses((status = 204, description = "User absent"))
)]
pub async fn delete_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    uri: Uri,
) -> ApiResult<StatusCode> {
    info!("Deleting user: {}", id);

    match svc.delete_user(&id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete user {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

// ---- projects ----

/// List projects with owners and tasks
#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "projects",
    responses(
        (status = 200, description = "All projects", body = [ProjectDetailsDto]),
        (status = 500, description = "Internal Server Error", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn list_projects(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
) -> ApiResult<Json<Vec<ProjectDetailsDto>>> {
    match svc.list_projects().await {
        Ok(projects) => Ok(Json(
            projects.into_iter().map(ProjectDetailsDto::from).collect(),
        )),
        Err(e) => {
            error!("Failed to list projects: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Get a project with its owner and tasks
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    tag = "projects",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project found", body = ProjectDetailsDto),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_project(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    uri: Uri,
) -> ApiResult<Json<ProjectDetailsDto>> {
    info!("Getting project with id: {}", id);

    match svc.get_project(&id).await {
        Ok(project) => Ok(Json(ProjectDetailsDto::from(project))),
        Err(e) => {
            error!("Failed to get project {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/projects",
    tag = "projects",
    request_body = ProjectReq,
    responses(
        (status = 201, description = "Created project", body = ProjectDto),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn create_project(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    body: Result<Json<ProjectReq>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ProjectDto>)> {
    let req = parse_body(body, &uri)?;
    info!("Creating project: {:?}", req);

    match svc.create_project(req.into()).await {
        Ok(project) => Ok((StatusCode::CREATED, Json(ProjectDto::from(project)))),
        Err(e) => {
            error!("Failed to create project: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    tag = "projects",
    params(("id" = String, Path, description = "Project id")),
    request_body = ProjectReq,
    responses(
        (status = 200, description = "Updated project", body = ProjectDto),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn update_project(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    uri: Uri,
    body: Result<Json<ProjectReq>, JsonRejection>,
) -> ApiResult<Json<ProjectDto>> {
    let req = parse_update_body(body, &uri, svc.get_project(&id)).await?;
    info!("Updating project {} with: {:?}", id, req);

    match svc.update_project(&id, req.into()).await {
        Ok(project) => Ok(Json(ProjectDto::from(project))),
        Err(e) => {
            error!("Failed to update project {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Delete a project and its tasks
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    tag = "projects",
    params(("id" = String, Path, description = "Project id")),
    responses((status = 204, description = "Project absent"))
)]
pub async fn delete_project(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    uri: Uri,
) -> ApiResult<StatusCode> {
    info!("Deleting project: {}", id);

    match svc.delete_project(&id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete project {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

// ---- tasks ----

/// List tasks, optionally filtered, with project and assignee
#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = "tasks",
    params(ListTasksQuery),
    responses(
        (status = 200, description = "Matching tasks", body = [TaskDetailsDto]),
        (status = 400, description = "Bad query parameter", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn list_tasks(
    Extension(svc): Extension<Arc<Service>>,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
    uri: Uri,
) -> ApiResult<Json<Vec<TaskDetailsDto>>> {
    let Query(query) = query.map_err(|rejection| {
        info!("Rejected query string: {}", rejection.body_text());
        invalid_query("query", rejection.body_text(), uri.path())
    })?;
    info!("Listing tasks with query: {:?}", query);

    let filter = TaskFilter {
        due_before: parse_instant("dueBefore", query.due_before, &uri)?,
        due_after: parse_instant("dueAfter", query.due_after, &uri)?,
        status: non_empty(query.status),
        priority: non_empty(query.priority),
        project_id: non_empty(query.project_id),
        assigned_to_id: non_empty(query.assigned_to_id),
    };

    match svc.list_tasks(filter).await {
        Ok(tasks) => Ok(Json(tasks.into_iter().map(TaskDetailsDto::from).collect())),
        Err(e) => {
            error!("Failed to list tasks: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task found", body = TaskDetailsDto),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_task(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    uri: Uri,
) -> ApiResult<Json<TaskDetailsDto>> {
    info!("Getting task with id: {}", id);

    match svc.get_task(&id).await {
        Ok(task) => Ok(Json(TaskDetailsDto::from(task))),
        Err(e) => {
            error!("Failed to get task {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Create a task; the project and assignee ids are not checked
#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = "tasks",
    request_body = TaskReq,
    responses(
        (status = 201, description = "Created task", body = TaskDto),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn create_task(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
    body: Result<Json<TaskReq>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TaskDto>)> {
    let req = parse_body(body, &uri)?;
    info!("Creating task: {:?}", req);

    match svc.create_task(req.into()).await {
        Ok(task) => Ok((StatusCode::CREATED, Json(TaskDto::from(task)))),
        Err(e) => {
            error!("Failed to create task: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "Task id")),
    request_body = TaskReq,
    responses(
        (status = 200, description = "Updated task", body = TaskDto),
        (status = 400, description = "Bad Request", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "Not Found", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn update_task(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    uri: Uri,
    body: Result<Json<TaskReq>, JsonRejection>,
) -> ApiResult<Json<TaskDto>> {
    let req = parse_update_body(body, &uri, svc.get_task(&id)).await?;
    info!("Updating task {} with: {:?}", id, req);

    match svc.update_task(&id, req.into()).await {
        Ok(task) => Ok(Json(TaskDto::from(task))),
        Err(e) => {
            error!("Failed to update task {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "Task id")),
    responses((status = 204, description = "Task absent"))
)]
pub async fn delete_task(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    uri: Uri,
) -> ApiResult<StatusCode> {
    info!("Deleting task: {}", id);

    match svc.delete_task(&id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => {
            error!("Failed to delete task {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

// ---- analytics ----

/// Per-user workload summary
#[utoipa::path(
    get,
    path = "/api/analytics/summary",
    tag = "analytics",
    responses(
        (status = 200, description = "Workload per user, then unassigned", body = AnalyticsSummaryDto),
        (status = 500, description = "Internal Server Error", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn analytics_summary(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
) -> ApiResult<Json<AnalyticsSummaryDto>> {
    match svc.analytics_summary().await {
        Ok(summary) => Ok(Json(AnalyticsSummaryDto::from(summary))),
        Err(e) => {
            error!("Failed to compute analytics: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
