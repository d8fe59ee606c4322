use serde::{Deserialize, Serialize};

use crate::domain::service::ServiceConfig;

/// Configuration for the tasktracker module (`modules.tasktracker`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskTrackerConfig {
    /// Populate an empty store with demo users, projects and tasks at startup.
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Maximum field lengths in characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LimitsConfig {
    pub user_name: usize,
    pub email: usize,
    pub project_name: usize,
    pub project_description: usize,
    pub task_title: usize,
    pub task_description: usize,
}

impl Default for TaskTrackerConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
            limits: LimitsConfig::default(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        let d = ServiceConfig::default();
        Self {
            user_name: d.max_user_name_length,
            email: d.max_email_length,
            project_name: d.max_project_name_length,
            project_description: d.max_project_description_length,
            task_title: d.max_task_title_length,
            task_description: d.max_task_description_length,
        }
    }
}

impl From<&LimitsConfig> for ServiceConfig {
    fn from(l: &LimitsConfig) -> Self {
        Self {
            max_user_name_length: l.user_name,
            max_email_length: l.email,
            max_project_name_length: l.project_name,
            max_project_description_length: l.project_description,
            max_task_title_length: l.task_title,
            max_task_description_length: l.task_description,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_section_uses_defaults() {
        let cfg: TaskTrackerConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(cfg.seed_demo_data);
        assert_eq!(cfg.limits.user_name, 120);
        assert_eq!(cfg.limits.task_description, 2000);
    }

    #[test]
    fn partial_limits_override() {
        let cfg: TaskTrackerConfig = serde_json::from_value(serde_json::json!({
            "seed_demo_data": false,
            "limits": { "email": 64 }
        }))
        .unwrap();
        assert!(!cfg.seed_demo_data);
        let svc = ServiceConfig::from(&cfg.limits);
        assert_eq!(svc.max_email_length, 64);
        assert_eq!(svc.max_project_name_length, 160);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let res: Result<TaskTrackerConfig, _> =
            serde_json::from_value(serde_json::json!({ "page_size": 10 }));
        assert!(res.is_err());
    }
}
