use crate::model::{FollowUpExchange, ValidationResult};
use crate::request::ValidationRequest;

/// Messages from background tasks to the main UI thread.
pub enum BackgroundMessage {
    ValidationReady {
        request: ValidationRequest,
        result: ValidationResult,
    },
    ValidationFailed(String),
    FollowUpReady(FollowUpExchange),
    FollowUpFailed(String),
    HealthChecked(bool),
}
