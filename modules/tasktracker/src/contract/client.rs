use async_trait::async_trait;

use crate::contract::error::TaskTrackerError;
use crate::contract::model::{
    AnalyticsSummary, NewProject, NewTask, NewUser, Project, ProjectUpdate, ProjectWithRelations,
    Task, TaskFilter, TaskUpdate, TaskWithRelations, User, UserUpdate,
};

/// Public API of the tasktracker module for in-process consumers.
#[async_trait]
pub trait TaskTrackerApi: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, TaskTrackerError>;
    async fn get_user(&self, id: &str) -> Result<User, TaskTrackerError>;
    async fn create_user(&self, new_user: NewUser) -> Result<User, TaskTrackerError>;
    async fn update_user(&self, id: &str, update: UserUpdate) -> Result<User, TaskTrackerError>;
    /// Succeeds whether or not the user existed.
    async fn delete_user(&self, id: &str) -> Result<(), TaskTrackerError>;

    async fn list_projects(&self) -> Result<Vec<ProjectWithRelations>, TaskTrackerError>;
    async fn get_project(&self, id: &str) -> Result<ProjectWithRelations, TaskTrackerError>;
    async fn create_project(&self, new_project: NewProject) -> Result<Project, TaskTrackerError>;
    async fn update_project(
        &self,
        id: &str,
        update: ProjectUpdate,
    ) -> Result<Project, TaskTrackerError>;
    async fn delete_project(&self, id: &str) -> Result<(), TaskTrackerError>;

    async fn list_tasks(
        &self,
        filter: TaskFilter,
    ) -> Result<Vec<TaskWithRelations>, TaskTrackerError>;
    async fn get_task(&self, id: &str) -> Result<TaskWithRelations, TaskTrackerError>;
    async fn create_task(&self, new_task: NewTask) -> Result<Task, TaskTrackerError>;
    async fn update_task(&self, id: &str, update: TaskUpdate) -> Result<Task, TaskTrackerError>;
    async fn delete_task(&self, id: &str) -> Result<(), TaskTrackerError>;

    async fn analytics_summary(&self) -> Result<AnalyticsSummary, TaskTrackerError>;
}
