#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{Database, DatabaseConnection};

use tasktracker::{
    contract::model::{NewProject, NewTask, NewUser, Project, Task, TaskPriority, TaskStatus, User},
    domain::service::{Service, ServiceConfig},
    infra::storage::SeaOrmRepository,
    module::migrate,
};

/// Create a fresh test database for each test (in-memory SQLite) and run migrations.
pub async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");
    migrate(&db).await.expect("Failed to run migrations");
    db
}

/// Build the domain Service with a SeaORM-backed repository.
pub async fn create_test_service() -> Arc<Service> {
    let db = create_test_db().await;
    let repo = SeaOrmRepository::new(db);
    Arc::new(Service::new(Arc::new(repo), ServiceConfig::default()))
}

pub async fn add_user(svc: &Service, name: &str, email: &str) -> User {
    svc.create_user(NewUser {
        name: name.to_string(),
        email: email.to_string(),
    })
    .await
    .expect("create user")
}

pub async fn add_project(svc: &Service, name: &str, owner: Option<&User>) -> Project {
    svc.create_project(NewProject {
        name: name.to_string(),
        description: format!("{name} description"),
        start_date: Utc::now(),
        end_date: None,
        owner_id: owner.map(|u| u.id.clone()),
    })
    .await
    .expect("create project")
}

pub fn new_task(title: &str, project_id: &str) -> NewTask {
    NewTask {
        title: title.to_string(),
        description: String::new(),
        due_date: None,
        status: TaskStatus::New,
        priority: TaskPriority::Medium,
        project_id: project_id.to_string(),
        assigned_to_id: None,
    }
}

pub async fn add_task(
    svc: &Service,
    title: &str,
    project: &Project,
    assignee: Option<&User>,
    status: TaskStatus,
    due: Option<DateTime<Utc>>,
) -> Task {
    svc.create_task(NewTask {
        due_date: due,
        status,
        assigned_to_id: assignee.map(|u| u.id.clone()),
        ..new_task(title, &project.id)
    })
    .await
    .expect("create task")
}
