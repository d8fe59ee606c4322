use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::contract::model::{
    AnalyticsItem, AnalyticsSummary, NewProject, NewTask, NewUser, Project, ProjectUpdate,
    ProjectWithRelations, Task, TaskPriority, TaskStatus, TaskUpdate, TaskWithRelations, User,
    UserUpdate,
};

/// REST DTO for user representation with serde/utoipa
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Body of POST and PUT /api/users
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserReq {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
pub enum TaskStatusDto {
    #[default]
    New,
    InProgress,
    Blocked,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
pub enum TaskPriorityDto {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

/// Project with its owner (when resolvable) and child tasks
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetailsDto {
    #[serde(flatten)]
    pub project: ProjectDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserDto>,
    #[serde(default)]
    pub tasks: Vec<TaskDto>,
}

/// Body of POST and PUT /api/projects. On PUT an omitted optional field is cleared.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReq {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub owner_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub status: TaskStatusDto,
    pub priority: TaskPriorityDto,
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<String>,
}

/// Task with its project and assignee, each omitted when it does not resolve
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetailsDto {
    #[serde(flatten)]
    pub task: TaskDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserDto>,
}

/// Body of POST and PUT /api/tasks. Status defaults to New, priority to Medium.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskReq {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: TaskStatusDto,
    #[serde(default)]
    pub priority: TaskPriorityDto,
    pub project_id: String,
    #[serde(default)]
    pub assigned_to_id: Option<String>,
}

/// Query string of GET /api/tasks
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListTasksQuery {
    /// Exact status name, e.g. `Blocked`; unknown names match nothing
    pub status: Option<String>,
    /// Exact priority name, e.g. `Critical`
    pub priority: Option<String>,
    pub project_id: Option<String>,
    pub assigned_to_id: Option<String>,
    /// RFC 3339 timestamp, inclusive
    pub due_before: Option<String>,
    /// RFC 3339 timestamp, inclusive
    pub due_after: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsItemDto {
    /// Absent for the "Unassigned" bucket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub user_name: String,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub overdue_tasks: usize,
    pub active_tasks: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummaryDto {
    pub per_user: Vec<AnalyticsItemDto>,
    pub total_projects: usize,
    pub total_users: usize,
    pub total_tasks: usize,
}

// Conversion implementations between REST DTOs and contract models

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
        }
    }
}

impl From<UserReq> for NewUser {
    fn from(r: UserReq) -> Self {
        Self {
            name: r.name,
            email: r.email,
        }
    }
}

impl From<UserReq> for UserUpdate {
    fn from(r: UserReq) -> Self {
        Self {
            name: r.name,
            email: r.email,
        }
    }
}

impl From<TaskStatus> for TaskStatusDto {
    fn from(s: TaskStatus) -> Self {
        match s {
            TaskStatus::New => Self::New,
            TaskStatus::InProgress => Self::InProgress,
            TaskStatus::Blocked => Self::Blocked,
            TaskStatus::Completed => Self::Completed,
            TaskStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<TaskStatusDto> for TaskStatus {
    fn from(s: TaskStatusDto) -> Self {
        match s {
            TaskStatusDto::New => Self::New,
            TaskStatusDto::InProgress => Self::InProgress,
            TaskStatusDto::Blocked => Self::Blocked,
            TaskStatusDto::Completed => Self::Completed,
            TaskStatusDto::Cancelled => Self::Cancelled,
        }
    }
}

impl From<TaskPriority> for TaskPriorityDto {
    fn from(p: TaskPriority) -> Self {
        match p {
            TaskPriority::Low => Self::Low,
            TaskPriority::Medium => Self::Medium,
            TaskPriority::High => Self::High,
            TaskPriority::Critical => Self::Critical,
        }
    }
}

impl From<TaskPriorityDto> for TaskPriority {
    fn from(p: TaskPriorityDto) -> Self {
        match p {
            TaskPriorityDto::Low => Self::Low,
            TaskPriorityDto::Medium => Self::Medium,
            TaskPriorityDto::High => Self::High,
            TaskPriorityDto::Critical => Self::Critical,
        }
    }
}

impl From<Project> for ProjectDto {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            start_date: p.start_date,
            end_date: p.end_date,
            owner_id: p.owner_id,
        }
    }
}

impl From<ProjectWithRelations> for ProjectDetailsDto {
    fn from(p: ProjectWithRelations) -> Self {
        Self {
            project: p.project.into(),
            owner: p.owner.map(Into::into),
            tasks: p.tasks.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ProjectReq> for NewProject {
    fn from(r: ProjectReq) -> Self {
        Self {
            name: r.name,
            description: r.description,
            start_date: r.start_date,
            end_date: r.end_date,
            owner_id: r.owner_id,
        }
    }
}

impl From<ProjectReq> for ProjectUpdate {
    fn from(r: ProjectReq) -> Self {
        Self {
            name: r.name,
            description: r.description,
            start_date: r.start_date,
            end_date: r.end_date,
            owner_id: r.owner_id,
        }
    }
}

impl From<Task> for TaskDto {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            due_date: t.due_date,
            status: t.status.into(),
            priority: t.priority.into(),
            project_id: t.project_id,
            assigned_to_id: t.assigned_to_id,
        }
    }
}

impl From<TaskWithRelations> for TaskDetailsDto {
    fn from(t: TaskWithRelations) -> Self {
        Self {
            task: t.task.into(),
            project: t.project.map(Into::into),
            assigned_to: t.assigned_to.map(Into::into),
        }
    }
}

impl From<TaskReq> for NewTask {
    fn from(r: TaskReq) -> Self {
        Self {
            title: r.title,
            description: r.description,
            due_date: r.due_date,
            status: r.status.into(),
            priority: r.priority.into(),
            project_id: r.project_id,
            assigned_to_id: r.assigned_to_id,
        }
    }
}

impl From<TaskReq> for TaskUpdate {
    fn from(r: TaskReq) -> Self {
        Self {
            title: r.title,
            description: r.description,
            due_date: r.due_date,
            status: r.status.into(),
            priority: r.priority.into(),
            project_id: r.project_id,
            assigned_to_id: r.assigned_to_id,
        }
    }
}

impl From<AnalyticsItem> for AnalyticsItemDto {
    fn from(i: AnalyticsItem) -> Self {
        Self {
            user_id: i.user_id,
            user_name: i.user_name,
            total_tasks: i.total_tasks,
            completed_tasks: i.completed_tasks,
            overdue_tasks: i.overdue_tasks,
            active_tasks: i.active_tasks,
        }
    }
}

impl From<AnalyticsSummary> for AnalyticsSummaryDto {
    fn from(s: AnalyticsSummary) -> Self {
        Self {
            per_user: s.per_user.into_iter().map(Into::into).collect(),
            total_projects: s.total_projects,
            total_users: s.total_users,
            total_tasks: s.total_tasks,
        }
    }
}
