pub mod client;
pub mod error;
pub mod model;

pub use client::TaskTrackerApi;
pub use error::TaskTrackerError;
pub use model::{
    AnalyticsItem, AnalyticsSummary, NewProject, NewTask, NewUser, Project, ProjectUpdate,
    ProjectWithRelations, Task, TaskFilter, TaskPriority, TaskStatus, TaskUpdate,
    TaskWithRelations, User, UserUpdate,
};
