//! Demo data for a fresh store.

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use tracing::info;
use uuid::Uuid;

use crate::contract::model::{Project, Task, TaskPriority, TaskStatus, User};
use crate::domain::repo::TaskTrackerRepository;

fn id() -> String {
    Uuid::new_v4().to_string()
}

fn user(name: &str, email: &str) -> User {
    User {
        id: id(),
        name: name.to_owned(),
        email: email.to_owned(),
    }
}

struct TaskSeed<'a> {
    title: &'a str,
    project: &'a Project,
    priority: TaskPriority,
    status: TaskStatus,
    due_in_days: i64,
    assignee: &'a User,
}

impl TaskSeed<'_> {
    fn build(self, now: DateTime<Utc>) -> Task {
        Task {
            id: id(),
            title: self.title.to_owned(),
            description: String::new(),
            due_date: Some(now + Duration::days(self.due_in_days)),
            status: self.status,
            priority: self.priority,
            project_id: self.project.id.clone(),
            assigned_to_id: Some(self.assignee.id.clone()),
        }
    }
}

/// Inserts three users, two projects and five tasks with dates relative to
/// `now`, all or nothing. Does nothing and returns `false` when any user
/// already exists.
pub async fn seed_demo_data(
    repo: &dyn TaskTrackerRepository,
    now: DateTime<Utc>,
) -> anyhow::Result<bool> {
    if !repo.list_users().await?.is_empty() {
        return Ok(false);
    }

    let alice = user("Alice Ahmed", "alice@example.com");
    let ben = user("Ben Brown", "ben@example.com");
    let chloe = user("Chloe Chen", "chloe@example.com");

    let portal = Project {
        id: id(),
        name: "Customer Portal".to_owned(),
        description: "Self-service portal for customers".to_owned(),
        start_date: now - Duration::days(21),
        end_date: None,
        owner_id: Some(alice.id.clone()),
    };
    let mobile = Project {
        id: id(),
        name: "Mobile App Rewrite".to_owned(),
        description: "Rebuild the mobile client".to_owned(),
        start_date: now - Duration::days(35),
        end_date: Some(now + Duration::days(30)),
        owner_id: Some(ben.id.clone()),
    };

    let tasks = vec![
        TaskSeed {
            title: "Design auth flow",
            project: &portal,
            priority: TaskPriority::High,
            status: TaskStatus::InProgress,
            due_in_days: 7,
            assignee: &alice,
        }
        .build(now),
        TaskSeed {
            title: "Implement login API",
            project: &portal,
            priority: TaskPriority::Critical,
            status: TaskStatus::Blocked,
            due_in_days: 3,
            assignee: &ben,
        }
        .build(now),
        TaskSeed {
            title: "Telemetry baseline",
            project: &portal,
            priority: TaskPriority::Medium,
            status: TaskStatus::Completed,
            due_in_days: -2,
            assignee: &chloe,
        }
        .build(now),
        TaskSeed {
            title: "Create app shell",
            project: &mobile,
            priority: TaskPriority::Medium,
            status: TaskStatus::New,
            due_in_days: 10,
            assignee: &chloe,
        }
        .build(now),
        TaskSeed {
            title: "Migrate settings store",
            project: &mobile,
            priority: TaskPriority::High,
            status: TaskStatus::InProgress,
            due_in_days: -1,
            assignee: &ben,
        }
        .build(now),
    ];

    let count = tasks.len();
    repo.insert_batch(vec![alice, ben, chloe], vec![portal, mobile], tasks)
        .await
        .context("failed to insert demo data")?;

    info!(users = 3, projects = 2, tasks = count, "Seeded demo data");
    Ok(true)
}
