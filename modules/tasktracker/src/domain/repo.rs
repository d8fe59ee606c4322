use async_trait::async_trait;

use crate::contract::model::{Project, Task, User};

/// Entity store port used by the domain service.
///
/// Implementations return rows in a stable enumeration order; list operations
/// never filter beyond what their name says.
#[async_trait]
pub trait TaskTrackerRepository: Send + Sync {
    async fn find_user(&self, id: &str) -> anyhow::Result<Option<User>>;
    async fn list_users(&self) -> anyhow::Result<Vec<User>>;
    /// Users with any of the given ids, in enumeration order.
    async fn find_users(&self, ids: &[String]) -> anyhow::Result<Vec<User>>;
    async fn email_exists(&self, email: &str) -> anyhow::Result<bool>;
    async fn insert_user(&self, user: User) -> anyhow::Result<()>;
    async fn update_user(&self, user: User) -> anyhow::Result<()>;
    /// Removes the user and detaches it from projects and tasks in one
    /// transaction. Returns whether a user row was removed.
    async fn delete_user_detaching(&self, id: &str) -> anyhow::Result<bool>;

    async fn find_project(&self, id: &str) -> anyhow::Result<Option<Project>>;
    async fn list_projects(&self) -> anyhow::Result<Vec<Project>>;
    async fn find_projects(&self, ids: &[String]) -> anyhow::Result<Vec<Project>>;
    async fn count_projects(&self) -> anyhow::Result<u64>;
    async fn insert_project(&self, project: Project) -> anyhow::Result<()>;
    async fn update_project(&self, project: Project) -> anyhow::Result<()>;
    /// Removes the project together with its tasks in one transaction.
    async fn delete_project_cascading(&self, id: &str) -> anyhow::Result<bool>;

    async fn find_task(&self, id: &str) -> anyhow::Result<Option<Task>>;
    async fn list_tasks(&self) -> anyhow::Result<Vec<Task>>;
    async fn list_tasks_for_projects(&self, project_ids: &[String]) -> anyhow::Result<Vec<Task>>;
    async fn insert_task(&self, task: Task) -> anyhow::Result<()>;
    async fn update_task(&self, task: Task) -> anyhow::Result<()>;
    async fn delete_task(&self, id: &str) -> anyhow::Result<bool>;

    /// Inserts all rows in one transaction; nothing is kept when any insert fails.
    async fn insert_batch(
        &self,
        users: Vec<User>,
        projects: Vec<Project>,
        tasks: Vec<Task>,
    ) -> anyhow::Result<()>;
}
