//! Per-user workload aggregation.
//!
//! Everything here is a pure function of the fetched collections and a single
//! aggregation instant, so a whole summary is classified against one "now".

use chrono::{DateTime, Utc};

use crate::contract::model::{AnalyticsItem, AnalyticsSummary, Task, TaskStatus, User};

pub const UNASSIGNED_NAME: &str = "Unassigned";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub total: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl Tally {
    /// Cancelled tasks are not completed, so they count as active.
    pub fn active(&self) -> usize {
        self.total - self.completed
    }
}

pub fn is_completed(task: &Task) -> bool {
    task.status == TaskStatus::Completed
}

/// Due strictly before `now` and neither completed nor cancelled.
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    match task.due_date {
        Some(due) => {
            due < now && !matches!(task.status, TaskStatus::Completed | TaskStatus::Cancelled)
        }
        None => false,
    }
}

pub fn tally<'a, I>(tasks: I, now: DateTime<Utc>) -> Tally
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks.into_iter().fold(Tally::default(), |mut t, task| {
        t.total += 1;
        if is_completed(task) {
            t.completed += 1;
        }
        if is_overdue(task, now) {
            t.overdue += 1;
        }
        t
    })
}

fn item(user_id: Option<String>, user_name: String, t: Tally) -> AnalyticsItem {
    AnalyticsItem {
        user_id,
        user_name,
        total_tasks: t.total,
        completed_tasks: t.completed,
        overdue_tasks: t.overdue,
        active_tasks: t.active(),
    }
}

/// One item per user in the given order, then an "Unassigned" item when at
/// least one task has no assignee.
pub fn summarize(
    users: &[User],
    tasks: &[Task],
    total_projects: usize,
    now: DateTime<Utc>,
) -> AnalyticsSummary {
    let mut per_user: Vec<AnalyticsItem> = users
        .iter()
        .map(|u| {
            let assigned = tasks
                .iter()
                .filter(|t| t.assigned_to_id.as_deref() == Some(u.id.as_str()));
            item(Some(u.id.clone()), u.name.clone(), tally(assigned, now))
        })
        .collect();

    let unassigned = tally(tasks.iter().filter(|t| t.assigned_to_id.is_none()), now);
    if unassigned.total > 0 {
        per_user.push(item(None, UNASSIGNED_NAME.to_string(), unassigned));
    }

    AnalyticsSummary {
        per_user,
        total_projects,
        total_users: users.len(),
        total_tasks: tasks.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::model::TaskPriority;
    use chrono::Duration;

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.into(),
            name: name.into(),
            email: format!("{id}@example.com"),
        }
    }

    fn task(
        id: &str,
        assignee: Option<&str>,
        status: TaskStatus,
        due: Option<DateTime<Utc>>,
    ) -> Task {
        Task {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            due_date: due,
            status,
            priority: TaskPriority::Medium,
            project_id: "p1".into(),
            assigned_to_id: assignee.map(str::to_owned),
        }
    }

    #[test]
    fn alice_ben_and_unassigned() {
        let now = Utc::now();
        let users = vec![user("alice", "Alice"), user("ben", "Ben")];
        let tasks = vec![
            task("t1", Some("alice"), TaskStatus::Completed, None),
            task(
                "t2",
                Some("alice"),
                TaskStatus::InProgress,
                Some(now - Duration::days(1)),
            ),
            task("t3", None, TaskStatus::New, None),
        ];

        let s = summarize(&users, &tasks, 1, now);

        assert_eq!(s.per_user.len(), 3);
        let alice = &s.per_user[0];
        assert_eq!(alice.user_id.as_deref(), Some("alice"));
        assert_eq!(
            (alice.total_tasks, alice.completed_tasks, alice.active_tasks, alice.overdue_tasks),
            (2, 1, 1, 1)
        );
        let ben = &s.per_user[1];
        assert_eq!((ben.total_tasks, ben.active_tasks), (0, 0));
        let unassigned = &s.per_user[2];
        assert_eq!(unassigned.user_id, None);
        assert_eq!(unassigned.user_name, "Unassigned");
        assert_eq!(
            (
                unassigned.total_tasks,
                unassigned.completed_tasks,
                unassigned.active_tasks,
                unassigned.overdue_tasks
            ),
            (1, 0, 1, 0)
        );
        assert_eq!(s.total_tasks, 3);
        assert_eq!(s.total_users, 2);
        assert_eq!(s.total_projects, 1);
    }

    #[test]
    fn no_unassigned_bucket_without_unassigned_tasks() {
        let now = Utc::now();
        let users = vec![user("a", "A")];
        let tasks = vec![task("t1", Some("a"), TaskStatus::New, None)];
        let s = summarize(&users, &tasks, 0, now);
        assert_eq!(s.per_user.len(), 1);
        assert!(s.per_user.iter().all(|i| i.user_id.is_some()));
    }

    #[test]
    fn cancelled_is_active_but_never_overdue() {
        let now = Utc::now();
        let past = Some(now - Duration::hours(3));
        let tasks = vec![
            task("c", Some("a"), TaskStatus::Cancelled, past),
            task("d", Some("a"), TaskStatus::Completed, past),
            task("b", Some("a"), TaskStatus::Blocked, past),
        ];
        let t = tally(&tasks, now);
        assert_eq!(t.total, 3);
        assert_eq!(t.completed, 1);
        assert_eq!(t.overdue, 1);
        assert_eq!(t.active(), 2);
    }

    #[test]
    fn due_exactly_now_is_not_overdue() {
        let now = Utc::now();
        assert!(!is_overdue(&task("x", None, TaskStatus::New, Some(now)), now));
        assert!(is_overdue(
            &task("x", None, TaskStatus::New, Some(now - Duration::seconds(1))),
            now
        ));
        assert!(!is_overdue(&task("x", None, TaskStatus::New, None), now));
    }

    #[test]
    fn per_user_totals_add_up_to_global_total() {
        let now = Utc::now();
        let users = vec![user("a", "A"), user("b", "B")];
        let tasks = vec![
            task("1", Some("a"), TaskStatus::New, None),
            task("2", Some("b"), TaskStatus::Completed, None),
            task("3", None, TaskStatus::Blocked, Some(now - Duration::days(2))),
            // dangling assignee counts toward the global total only
            task("4", Some("ghost"), TaskStatus::New, None),
        ];
        let s = summarize(&users, &tasks, 0, now);
        let sum: usize = s.per_user.iter().map(|i| i.total_tasks).sum();
        assert_eq!(sum, 3);
        assert_eq!(s.total_tasks, 4);
        for i in &s.per_user {
            assert_eq!(i.active_tasks, i.total_tasks - i.completed_tasks);
            assert!(i.completed_tasks <= i.total_tasks);
            assert!(i.overdue_tasks <= i.total_tasks);
        }
    }
}
