use anyhow::Context;
use sea_orm::Set;

use crate::contract::model::{Project, Task, TaskPriority, TaskStatus, User};
use crate::infra::storage::entity::{project, task, user};

pub fn user_to_contract(m: user::Model) -> User {
    User {
        id: m.id,
        name: m.name,
        email: m.email,
    }
}

pub fn user_to_active(u: User) -> user::ActiveModel {
    user::ActiveModel {
        id: Set(u.id),
        name: Set(u.name),
        email: Set(u.email),
    }
}

pub fn project_to_contract(m: project::Model) -> Project {
    Project {
        id: m.id,
        name: m.name,
        description: m.description,
        start_date: m.start_date,
        end_date: m.end_date,
        owner_id: m.owner_id,
    }
}

pub fn project_to_active(p: Project) -> project::ActiveModel {
    project::ActiveModel {
        id: Set(p.id),
        name: Set(p.name),
        description: Set(p.description),
        start_date: Set(p.start_date),
        end_date: Set(p.end_date),
        owner_id: Set(p.owner_id),
    }
}

/// Fails when the row carries a status or priority this build does not know.
pub fn task_to_contract(m: task::Model) -> anyhow::Result<Task> {
    let status: TaskStatus = m
        .status
        .parse()
        .with_context(|| format!("task {} has a corrupt status", m.id))?;
    let priority: TaskPriority = m
        .priority
        .parse()
        .with_context(|| format!("task {} has a corrupt priority", m.id))?;
    Ok(Task {
        id: m.id,
        title: m.title,
        description: m.description,
        due_date: m.due_date,
        status,
        priority,
        project_id: m.project_id,
        assigned_to_id: m.assigned_to_id,
    })
}

pub fn task_to_active(t: Task) -> task::ActiveModel {
    task::ActiveModel {
        id: Set(t.id),
        title: Set(t.title),
        description: Set(t.description),
        due_date: Set(t.due_date),
        status: Set(t.status.as_str().to_owned()),
        priority: Set(t.priority.as_str().to_owned()),
        project_id: Set(t.project_id),
        assigned_to_id: Set(t.assigned_to_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str, priority: &str) -> task::Model {
        task::Model {
            id: "t1".into(),
            title: "Title".into(),
            description: String::new(),
            due_date: None,
            status: status.into(),
            priority: priority.into(),
            project_id: "p1".into(),
            assigned_to_id: None,
        }
    }

    #[test]
    fn task_row_maps_literal_names() {
        let t = task_to_contract(row("InProgress", "Critical")).unwrap();
        assert_eq!(t.status, TaskStatus::InProgress);
        assert_eq!(t.priority, TaskPriority::Critical);
    }

    #[test]
    fn corrupt_row_is_an_error() {
        let err = task_to_contract(row("Done", "Low")).unwrap_err();
        assert!(format!("{err:#}").contains("corrupt status"));
        assert!(task_to_contract(row("New", "Urgent")).is_err());
    }
}
