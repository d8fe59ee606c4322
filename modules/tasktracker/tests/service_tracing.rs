//! The service layer emits named spans and events.

mod common;

use tracing_test::traced_test;

use common::{add_user, create_test_service};
use tasktracker::contract::model::TaskFilter;

#[traced_test]
#[tokio::test]
async fn create_user_emits_span_and_events() {
    let svc = create_test_service().await;

    add_user(&svc, "Alice", "alice@example.com").await;

    assert!(logs_contain("tasktracker.service.create_user"));
    assert!(logs_contain("Successfully created user"));
}

#[traced_test]
#[tokio::test]
async fn missing_delete_is_logged_not_failed() {
    let svc = create_test_service().await;

    svc.delete_task("ghost").await.unwrap();

    assert!(logs_contain("tasktracker.service.delete_task"));
    assert!(logs_contain("Task was already absent"));
}

#[traced_test]
#[tokio::test]
async fn list_and_analytics_are_instrumented() {
    let svc = create_test_service().await;

    svc.list_tasks(TaskFilter::default()).await.unwrap();
    svc.analytics_summary().await.unwrap();

    assert!(logs_contain("tasktracker.service.list_tasks"));
    assert!(logs_contain("Computed analytics summary"));
}
