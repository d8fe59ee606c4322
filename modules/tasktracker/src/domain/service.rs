use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::contract::model::{
    AnalyticsSummary, NewProject, NewTask, NewUser, Project, ProjectUpdate, ProjectWithRelations,
    Task, TaskFilter, TaskUpdate, TaskWithRelations, User, UserUpdate,
};
use crate::domain::analytics;
use crate::domain::error::DomainError;
use crate::domain::repo::TaskTrackerRepository;

/// Domain service with business rules for users, projects and tasks.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn TaskTrackerRepository>,
    config: ServiceConfig,
}

/// Field length limits, in characters.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_user_name_length: usize,
    pub max_email_length: usize,
    pub max_project_name_length: usize,
    pub max_project_description_length: usize,
    pub max_task_title_length: usize,
    pub max_task_description_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_user_name_length: 120,
            max_email_length: 200,
            max_project_name_length: 160,
            max_project_description_length: 1000,
            max_task_title_length: 160,
            max_task_description_length: 2000,
        }
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Distinct values in first-seen order.
fn distinct<'a>(ids: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.filter(|&id| seen.insert(id.as_str())).cloned().collect()
}

impl Service {
    pub fn new(repo: Arc<dyn TaskTrackerRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    // ---- users ----

    #[instrument(name = "tasktracker.service.list_users", skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let users = self.repo.list_users().await?;
        debug!("Listed {} users", users.len());
        Ok(users)
    }

    #[instrument(name = "tasktracker.service.get_user", skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: &str) -> Result<User, DomainError> {
        debug!("Getting user by id");
        self.repo
            .find_user(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    #[instrument(
        name = "tasktracker.service.create_user",
        skip(self),
        fields(email = %new_user.email)
    )]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");
        self.validate_user(&new_user.name, &new_user.email)?;

        if self.repo.email_exists(&new_user.email).await? {
            return Err(DomainError::email_already_exists(new_user.email));
        }

        let user = User {
            id: new_id(),
            name: new_user.name,
            email: new_user.email,
        };
        self.repo.insert_user(user.clone()).await?;

        info!("Successfully created user with id={}", user.id);
        Ok(user)
    }

    #[instrument(name = "tasktracker.service.update_user", skip(self, update), fields(user_id = %id))]
    pub async fn update_user(&self, id: &str, update: UserUpdate) -> Result<User, DomainError> {
        info!("Updating user");
        let mut current = self.get_user(id).await?;
        self.validate_user(&update.name, &update.email)?;

        if update.email != current.email && self.repo.email_exists(&update.email).await? {
            return Err(DomainError::email_already_exists(update.email));
        }

        current.name = update.name;
        current.email = update.email;
        self.repo.update_user(current.clone()).await?;

        info!("Successfully updated user");
        Ok(current)
    }

    /// Owned projects and assigned tasks are detached, not removed.
    #[instrument(name = "tasktracker.service.delete_user", skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: &str) -> Result<(), DomainError> {
        info!("Deleting user");
        if self.repo.delete_user_detaching(id).await? {
            info!("Successfully deleted user");
        } else {
            debug!("User was already absent");
        }
        Ok(())
    }

    // ---- projects ----

    #[instrument(name = "tasktracker.service.list_projects", skip(self))]
    pub async fn list_projects(&self) -> Result<Vec<ProjectWithRelations>, DomainError> {
        let projects = self.repo.list_projects().await?;
        debug!("Listed {} projects", projects.len());
        self.resolve_projects(projects).await
    }

    #[instrument(name = "tasktracker.service.get_project", skip(self), fields(project_id = %id))]
    pub async fn get_project(&self, id: &str) -> Result<ProjectWithRelations, DomainError> {
        let project = self
            .repo
            .find_project(id)
            .await?
            .ok_or_else(|| DomainError::project_not_found(id))?;
        self.resolve_project(project).await
    }

    #[instrument(
        name = "tasktracker.service.create_project",
        skip(self, new_project),
        fields(name = %new_project.name)
    )]
    pub async fn create_project(&self, new_project: NewProject) -> Result<Project, DomainError> {
        info!("Creating new project");
        self.validate_project(&new_project.name, &new_project.description)?;

        let project = Project {
            id: new_id(),
            name: new_project.name,
            description: new_project.description,
            start_date: new_project.start_date,
            end_date: new_project.end_date,
            owner_id: new_project.owner_id,
        };
        self.repo.insert_project(project.clone()).await?;

        info!("Successfully created project with id={}", project.id);
        Ok(project)
    }

    #[instrument(
        name = "tasktracker.service.update_project",
        skip(self, update),
        fields(project_id = %id)
    )]
    pub async fn update_project(
        &self,
        id: &str,
        update: ProjectUpdate,
    ) -> Result<Project, DomainError> {
        info!("Updating project");
        let mut current = self
            .repo
            .find_project(id)
            .await?
            .ok_or_else(|| DomainError::project_not_found(id))?;
        self.validate_project(&update.name, &update.description)?;

        current.name = update.name;
        current.description = update.description;
        current.start_date = update.start_date;
        current.end_date = update.end_date;
        current.owner_id = update.owner_id;
        self.repo.update_project(current.clone()).await?;

        info!("Successfully updated project");
        Ok(current)
    }

    /// Child tasks go with the project.
    #[instrument(name = "tasktracker.service.delete_project", skip(self), fields(project_id = %id))]
    pub async fn delete_project(&self, id: &str) -> Result<(), DomainError> {
        info!("Deleting project");
        if self.repo.delete_project_cascading(id).await? {
            info!("Successfully deleted project");
        } else {
            debug!("Project was already absent");
        }
        Ok(())
    }

    // ---- tasks ----

    #[instrument(name = "tasktracker.service.list_tasks", skip(self))]
    pub async fn list_tasks(
        &self,
        filter: TaskFilter,
    ) -> Result<Vec<TaskWithRelations>, DomainError> {
        let tasks = filter.apply(self.repo.list_tasks().await?);
        debug!("Listed {} tasks after filtering", tasks.len());
        self.resolve_tasks(tasks).await
    }

    #[instrument(name = "tasktracker.service.get_task", skip(self), fields(task_id = %id))]
    pub async fn get_task(&self, id: &str) -> Result<TaskWithRelations, DomainError> {
        let task = self
            .repo
            .find_task(id)
            .await?
            .ok_or_else(|| DomainError::task_not_found(id))?;
        self.resolve_task(task).await
    }

    #[instrument(
        name = "tasktracker.service.create_task",
        skip(self, new_task),
        fields(project_id = %new_task.project_id)
    )]
    pub async fn create_task(&self, new_task: NewTask) -> Result<Task, DomainError> {
        info!("Creating new task");
        self.validate_task(&new_task.title, &new_task.description, &new_task.project_id)?;

        let task = Task {
            id: new_id(),
            title: new_task.title,
            description: new_task.description,
            due_date: new_task.due_date,
            status: new_task.status,
            priority: new_task.priority,
            project_id: new_task.project_id,
            assigned_to_id: new_task.assigned_to_id,
        };
        self.repo.insert_task(task.clone()).await?;

        info!("Successfully created task with id={}", task.id);
        Ok(task)
    }

    #[instrument(name = "tasktracker.service.update_task", skip(self, update), fields(task_id = %id))]
    pub async fn update_task(&self, id: &str, update: TaskUpdate) -> Result<Task, DomainError> {
        info!("Updating task");
        let mut current = self
            .repo
            .find_task(id)
            .await?
            .ok_or_else(|| DomainError::task_not_found(id))?;
        self.validate_task(&update.title, &update.description, &update.project_id)?;

        current.title = update.title;
        current.description = update.description;
        current.due_date = update.due_date;
        current.status = update.status;
        current.priority = update.priority;
        current.project_id = update.project_id;
        current.assigned_to_id = update.assigned_to_id;
        self.repo.update_task(current.clone()).await?;

        info!("Successfully updated task");
        Ok(current)
    }

    #[instrument(name = "tasktracker.service.delete_task", skip(self), fields(task_id = %id))]
    pub async fn delete_task(&self, id: &str) -> Result<(), DomainError> {
        info!("Deleting task");
        if self.repo.delete_task(id).await? {
            info!("Successfully deleted task");
        } else {
            debug!("Task was already absent");
        }
        Ok(())
    }

    // ---- analytics ----

    /// Fetches users, tasks and the project count, then aggregates against
    /// one captured instant.
    #[instrument(name = "tasktracker.service.analytics_summary", skip(self))]
    pub async fn analytics_summary(&self) -> Result<AnalyticsSummary, DomainError> {
        let users = self.repo.list_users().await?;
        let tasks = self.repo.list_tasks().await?;
        let total_projects = self.repo.count_projects().await?;

        let now = Utc::now();
        let summary = analytics::summarize(&users, &tasks, total_projects as usize, now);
        debug!(
            items = summary.per_user.len(),
            total_tasks = summary.total_tasks,
            "Computed analytics summary"
        );
        Ok(summary)
    }

    // ---- relationship resolution ----

    async fn resolve_project(
        &self,
        project: Project,
    ) -> Result<ProjectWithRelations, DomainError> {
        let mut resolved = self.resolve_projects(vec![project]).await?;
        resolved
            .pop()
            .ok_or_else(|| DomainError::database("project vanished during resolution"))
    }

    /// Owners and child tasks for every project, fetched in two batched lookups.
    async fn resolve_projects(
        &self,
        projects: Vec<Project>,
    ) -> Result<Vec<ProjectWithRelations>, DomainError> {
        if projects.is_empty() {
            return Ok(Vec::new());
        }

        let owner_ids = distinct(projects.iter().filter_map(|p| p.owner_id.as_ref()));
        let owners: HashMap<String, User> = self
            .repo
            .find_users(&owner_ids)
            .await?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();

        let project_ids = distinct(projects.iter().map(|p| &p.id));
        let mut tasks_by_project: HashMap<String, Vec<Task>> = HashMap::new();
        for task in self.repo.list_tasks_for_projects(&project_ids).await? {
            tasks_by_project
                .entry(task.project_id.clone())
                .or_default()
                .push(task);
        }

        Ok(projects
            .into_iter()
            .map(|project| {
                let owner = project
                    .owner_id
                    .as_ref()
                    .and_then(|id| owners.get(id))
                    .cloned();
                let tasks = tasks_by_project
                    .get(&project.id)
                    .cloned()
                    .unwrap_or_default();
                ProjectWithRelations {
                    project,
                    owner,
                    tasks,
                }
            })
            .collect())
    }

    async fn resolve_task(&self, task: Task) -> Result<TaskWithRelations, DomainError> {
        let mut resolved = self.resolve_tasks(vec![task]).await?;
        resolved
            .pop()
            .ok_or_else(|| DomainError::database("task vanished during resolution"))
    }

    /// A dangling project or assignee id resolves to an absent field.
    async fn resolve_tasks(
        &self,
        tasks: Vec<Task>,
    ) -> Result<Vec<TaskWithRelations>, DomainError> {
        if tasks.is_empty() {
            return Ok(Vec::new());
        }

        let project_ids = distinct(tasks.iter().map(|t| &t.project_id));
        let projects: HashMap<String, Project> = self
            .repo
            .find_projects(&project_ids)
            .await?
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();

        let assignee_ids = distinct(tasks.iter().filter_map(|t| t.assigned_to_id.as_ref()));
        let assignees: HashMap<String, User> = self
            .repo
            .find_users(&assignee_ids)
            .await?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();

        Ok(tasks
            .into_iter()
            .map(|task| {
                let project = projects.get(&task.project_id).cloned();
                let assigned_to = task
                    .assigned_to_id
                    .as_ref()
                    .and_then(|id| assignees.get(id))
                    .cloned();
                TaskWithRelations {
                    task,
                    project,
                    assigned_to,
                }
            })
            .collect())
    }

    // ---- validation ----

    fn validate_user(&self, name: &str, email: &str) -> Result<(), DomainError> {
        require("name", name)?;
        max_len("name", name, self.config.max_user_name_length)?;
        require("email", email)?;
        max_len("email", email, self.config.max_email_length)?;
        if !looks_like_email(email) {
            return Err(DomainError::validation(
                "email",
                format!("'{email}' is not a valid email address"),
            ));
        }
        Ok(())
    }

    fn validate_project(&self, name: &str, description: &str) -> Result<(), DomainError> {
        require("name", name)?;
        max_len("name", name, self.config.max_project_name_length)?;
        max_len(
            "description",
            description,
            self.config.max_project_description_length,
        )
    }

    fn validate_task(
        &self,
        title: &str,
        description: &str,
        project_id: &str,
    ) -> Result<(), DomainError> {
        require("title", title)?;
        max_len("title", title, self.config.max_task_title_length)?;
        max_len(
            "description",
            description,
            self.config.max_task_description_length,
        )?;
        require("projectId", project_id)
    }
}

fn require(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    Ok(())
}

fn max_len(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    let len = value.chars().count();
    if len > max {
        return Err(DomainError::validation(
            field,
            format!("too long: {len} characters (max: {max})"),
        ));
    }
    Ok(())
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !domain.contains('@')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(looks_like_email("alice@example.com"));
        assert!(looks_like_email("a.b+c@mail.example.org"));
        assert!(!looks_like_email("alice"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("alice@localhost"));
        assert!(!looks_like_email("alice@example.com."));
        assert!(!looks_like_email("al ice@example.com"));
        assert!(!looks_like_email("a@b@example.com"));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(max_len("name", "ÄÖÜ", 3).is_ok());
        assert!(max_len("name", "ÄÖÜx", 3).is_err());
    }

    #[test]
    fn blank_is_rejected() {
        let err = require("title", "   ").unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: title: must not be empty");
    }

    #[test]
    fn distinct_keeps_first_seen_order() {
        let ids = ["b".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(distinct(ids.iter()), vec!["b".to_string(), "a".to_string()]);
    }
}
