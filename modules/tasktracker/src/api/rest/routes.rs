use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Json, Router};

use crate::api::rest::{handlers, openapi};
use crate::domain::service::Service;

/// REST routes of the module, with the service attached as an extension.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        .route(
            "/api/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/api/users/{id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route(
            "/api/projects",
            get(handlers::list_projects).post(handlers::create_project),
        )
        .route(
            "/api/projects/{id}",
            get(handlers::get_project)
                .put(handlers::update_project)
                .delete(handlers::delete_project),
        )
        .route(
            "/api/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route(
            "/api/tasks/{id}",
            get(handlers::get_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .route("/api/analytics/summary", get(handlers::analytics_summary))
        .route(
            "/api/openapi.json",
            get(|| async { Json(openapi::document()) }),
        )
        .layer(Extension(service))
}
