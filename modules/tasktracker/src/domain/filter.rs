use crate::contract::model::{Task, TaskFilter};

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        *self == TaskFilter::default()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(status) = &self.status {
            if task.status.as_str() != status {
                return false;
            }
        }
        if let Some(priority) = &self.priority {
            if task.priority.as_str() != priority {
                return false;
            }
        }
        if let Some(project_id) = &self.project_id {
            if &task.project_id != project_id {
                return false;
            }
        }
        if let Some(assigned_to_id) = &self.assigned_to_id {
            if task.assigned_to_id.as_ref() != Some(assigned_to_id) {
                return false;
            }
        }
        if let Some(before) = self.due_before {
            if !task.due_date.is_some_and(|d| d <= before) {
                return false;
            }
        }
        if let Some(after) = self.due_after {
            if !task.due_date.is_some_and(|d| d >= after) {
                return false;
            }
        }
        true
    }

    /// Keeps matching tasks in their original order.
    pub fn apply(&self, tasks: Vec<Task>) -> Vec<Task> {
        if self.is_empty() {
            return tasks;
        }
        tasks.into_iter().filter(|t| self.matches(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::model::{TaskPriority, TaskStatus};
    use chrono::{DateTime, Duration, Utc};

    fn task(id: &str, status: TaskStatus, priority: TaskPriority) -> Task {
        Task {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            due_date: None,
            status,
            priority,
            project_id: "p1".into(),
            assigned_to_id: None,
        }
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    fn sample() -> Vec<Task> {
        vec![
            task("a", TaskStatus::Blocked, TaskPriority::Critical),
            task("b", TaskStatus::Blocked, TaskPriority::Low),
            task("c", TaskStatus::New, TaskPriority::Critical),
            task("d", TaskStatus::Blocked, TaskPriority::Critical),
        ]
    }

    #[test]
    fn empty_filter_keeps_everything() {
        assert_eq!(ids(&TaskFilter::default().apply(sample())), ["a", "b", "c", "d"]);
    }

    #[test]
    fn status_and_priority_combine_with_and() {
        let f = TaskFilter {
            status: Some("Blocked".into()),
            priority: Some("Critical".into()),
            ..Default::default()
        };
        assert_eq!(ids(&f.apply(sample())), ["a", "d"]);
    }

    #[test]
    fn unknown_values_match_nothing() {
        let f = TaskFilter {
            status: Some("blocked".into()),
            ..Default::default()
        };
        assert!(f.apply(sample()).is_empty());

        let f = TaskFilter {
            priority: Some("Urgent".into()),
            ..Default::default()
        };
        assert!(f.apply(sample()).is_empty());
    }

    #[test]
    fn reference_filters() {
        let mut tasks = sample();
        tasks[1].project_id = "p2".into();
        tasks[2].assigned_to_id = Some("u1".into());

        let f = TaskFilter {
            project_id: Some("p2".into()),
            ..Default::default()
        };
        assert_eq!(ids(&f.apply(tasks.clone())), ["b"]);

        let f = TaskFilter {
            assigned_to_id: Some("u1".into()),
            ..Default::default()
        };
        assert_eq!(ids(&f.apply(tasks)), ["c"]);
    }

    #[test]
    fn due_range_is_inclusive_and_skips_undated() {
        let base: DateTime<Utc> = Utc::now();
        let mut tasks = sample();
        tasks[0].due_date = Some(base);
        tasks[1].due_date = Some(base + Duration::days(1));
        tasks[2].due_date = Some(base + Duration::days(2));

        let f = TaskFilter {
            due_after: Some(base),
            due_before: Some(base + Duration::days(1)),
            ..Default::default()
        };
        assert_eq!(ids(&f.apply(tasks)), ["a", "b"]);
    }
}
