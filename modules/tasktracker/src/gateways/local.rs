use std::sync::Arc;

use async_trait::async_trait;

use crate::contract::{
    client::TaskTrackerApi,
    error::TaskTrackerError,
    model::{
        AnalyticsSummary, NewProject, NewTask, NewUser, Project, ProjectUpdate,
        ProjectWithRelations, Task, TaskFilter, TaskUpdate, TaskWithRelations, User, UserUpdate,
    },
};
use crate::domain::service::Service;

/// Local implementation of the TaskTrackerApi trait that delegates to the domain service
pub struct TaskTrackerLocalClient {
    service: Arc<Service>,
}

impl TaskTrackerLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl TaskTrackerApi for TaskTrackerLocalClient {
    async fn list_users(&self) -> Result<Vec<User>, TaskTrackerError> {
        Ok(self.service.list_users().await?)
    }

    async fn get_user(&self, id: &str) -> Result<User, TaskTrackerError> {
        Ok(self.service.get_user(id).await?)
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, TaskTrackerError> {
        Ok(self.service.create_user(new_user).await?)
    }

    async fn update_user(&self, id: &str, update: UserUpdate) -> Result<User, TaskTrackerError> {
        Ok(self.service.update_user(id, update).await?)
    }

    async fn delete_user(&self, id: &str) -> Result<(), TaskTrackerError> {
        Ok(self.service.delete_user(id).await?)
    }

    async fn list_projects(&self) -> Result<Vec<ProjectWithRelations>, TaskTrackerError> {
        Ok(self.service.list_projects().await?)
    }

    async fn get_project(&self, id: &str) -> Result<ProjectWithRelations, TaskTrackerError> {
        Ok(self.service.get_project(id).await?)
    }

    async fn create_project(&self, new_project: NewProject) -> Result<Project, TaskTrackerError> {
        Ok(self.service.create_project(new_project).await?)
    }

    async fn update_project(
        &self,
        id: &str,
        update: ProjectUpdate,
    ) -> Result<Project, TaskTrackerError> {
        Ok(self.service.update_project(id, update).await?)
    }

    async fn delete_project(&self, id: &str) -> Result<(), TaskTrackerError> {
        Ok(self.service.delete_project(id).await?)
    }

    async fn list_tasks(
        &self,
        filter: TaskFilter,
    ) -> Result<Vec<TaskWithRelations>, TaskTrackerError> {
        Ok(self.service.list_tasks(filter).await?)
    }

    async fn get_task(&self, id: &str) -> Result<TaskWithRelations, TaskTrackerError> {
        Ok(self.service.get_task(id).await?)
    }

    async fn create_task(&self, new_task: NewTask) -> Result<Task, TaskTrackerError> {
        Ok(self.service.create_task(new_task).await?)
    }

    async fn update_task(&self, id: &str, update: TaskUpdate) -> Result<Task, TaskTrackerError> {
        Ok(self.service.update_task(id, update).await?)
    }

    async fn delete_task(&self, id: &str) -> Result<(), TaskTrackerError> {
        Ok(self.service.delete_task(id).await?)
    }

    async fn analytics_summary(&self) -> Result<AnalyticsSummary, TaskTrackerError> {
        Ok(self.service.analytics_summary().await?)
    }
}
