use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use modkit::api::problem::{Problem, ProblemResponse, ValidationError};

use crate::domain::error::DomainError;

/// Helper to create a ProblemResponse with less boilerplate
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    let problem = Problem::new(status, title, detail)
        .with_type(format!("https://errors.tasktracker.local/{code}"))
        .with_code(code)
        .with_instance(instance);

    // Correlate with the request span when there is one
    let problem = if let Some(id) = tracing::Span::current().id() {
        problem.with_trace_id(id.into_u64().to_string())
    } else {
        problem
    };

    ProblemResponse(problem)
}

/// Map domain error to RFC9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::UserNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "USER_NOT_FOUND",
            "User not found",
            format!("User with id {id} was not found"),
            instance,
        ),
        DomainError::ProjectNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "PROJECT_NOT_FOUND",
            "Project not found",
            format!("Project with id {id} was not found"),
            instance,
        ),
        DomainError::TaskNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "TASK_NOT_FOUND",
            "Task not found",
            format!("Task with id {id} was not found"),
            instance,
        ),
        DomainError::EmailAlreadyExists { email } => from_parts(
            StatusCode::CONFLICT,
            "EMAIL_CONFLICT",
            "Email already exists",
            format!("Email '{email}' is already in use"),
            instance,
        ),
        DomainError::Validation { field, message } => {
            let ProblemResponse(problem) = from_parts(
                StatusCode::BAD_REQUEST,
                "VALIDATION",
                "Validation error",
                e.to_string(),
                instance,
            );
            ProblemResponse(problem.with_errors(vec![ValidationError {
                detail: message.clone(),
                pointer: format!("/{field}"),
            }]))
        }
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_DB",
                "Internal error",
                "An internal database error occurred",
                instance,
            )
        }
    }
}

/// Any body axum's `Json` extractor rejects (syntax, shape, content type) is a 400.
pub fn map_json_rejection(rejection: &JsonRejection, instance: &str) -> ProblemResponse {
    from_parts(
        StatusCode::BAD_REQUEST,
        "INVALID_BODY",
        "Invalid request body",
        rejection.body_text(),
        instance,
    )
}

/// Query parameter that failed to parse.
pub fn invalid_query(param: &str, detail: impl Into<String>, instance: &str) -> ProblemResponse {
    from_parts(
        StatusCode::BAD_REQUEST,
        "INVALID_QUERY",
        "Invalid query parameter",
        format!("{param}: {}", detail.into()),
        instance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let p = map_domain_error(&DomainError::task_not_found("t9"), "/api/tasks/t9").0;
        assert_eq!(p.status, 404);
        assert_eq!(p.code, "TASK_NOT_FOUND");
        assert_eq!(p.instance, "/api/tasks/t9");
        assert!(p.detail.contains("t9"));
    }

    #[test]
    fn conflict_and_validation() {
        let p = map_domain_error(
            &DomainError::email_already_exists("a@b.io".into()),
            "/api/users",
        )
        .0;
        assert_eq!(p.status, 409);

        let p = map_domain_error(
            &DomainError::validation("name", "must not be empty"),
            "/api/users",
        )
        .0;
        assert_eq!(p.status, 400);
        assert_eq!(p.detail, "Validation failed: name: must not be empty");
        let errors = p.errors.expect("field errors");
        assert_eq!(errors[0].pointer, "/name");
    }

    #[test]
    fn database_detail_is_not_leaked() {
        let p = map_domain_error(&DomainError::database("disk I/O error"), "/api/tasks").0;
        assert_eq!(p.status, 500);
        assert!(!p.detail.contains("disk"));
    }
}
