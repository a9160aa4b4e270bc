//! Error types for scheduling operations

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::db::repository::RepositoryError;
use crate::models::{AppointmentId, AppointmentStatus, ProviderId};

/// Result type for scheduling operations
pub type SchedulingResult<T> = std::result::Result<T, SchedulingError>;

/// Errors that can occur while scheduling appointments.
///
/// Every rule violation the engine can detect maps to exactly one variant,
/// so callers can match on the failure instead of parsing messages. None of
/// these are retried internally; conflict resolution is the caller's call.
#[derive(Error, Debug)]
pub enum SchedulingError {
    /// Malformed or missing input, recoverable by correcting the request
    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// Booking date lies before the current date
    #[error("Date {date} is in the past (today is {today})")]
    PastDate { date: NaiveDate, today: NaiveDate },

    /// Requested start time is not a bookable slot for that provider/date
    #[error("{start} on {date} is not a bookable slot for provider {provider_id}")]
    InvalidSlot {
        provider_id: ProviderId,
        date: NaiveDate,
        start: NaiveTime,
    },

    /// Another non-cancelled appointment already holds the slot
    #[error("Slot {start} on {date} is already taken for provider {provider_id}")]
    SlotTaken {
        provider_id: ProviderId,
        date: NaiveDate,
        start: NaiveTime,
    },

    /// Requested status change is not in the transition table
    #[error("Illegal status transition: {from} -> {to}")]
    IllegalTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    /// Appointment already reached Completed or Cancelled
    #[error("Appointment is already terminal ({0})")]
    AlreadyTerminal(AppointmentStatus),

    /// Acting party or role is not permitted to perform the operation
    #[error("Not authorized: {0}")]
    Authorization(String),

    /// Unknown appointment id
    #[error("Appointment {0} not found")]
    NotFound(AppointmentId),

    /// Availability window with start at or after end
    #[error("Invalid availability window: start {start} must be before end {end}")]
    InvalidWindow { start: NaiveTime, end: NaiveTime },

    /// Storage-level failure unrelated to scheduling rules
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl SchedulingError {
    /// Shorthand for a field-level validation failure.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        SchedulingError::Validation {
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentStatus;

    #[test]
    fn test_validation_message_includes_field() {
        let err = SchedulingError::validation("duration_minutes", "must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid duration_minutes: must be positive"
        );
    }

    #[test]
    fn test_repository_error_converts() {
        let repo_err = RepositoryError::ConnectionError("refused".to_string());
        let err: SchedulingError = repo_err.into();
        assert!(matches!(err, SchedulingError::Repository(_)));
    }

    #[test]
    fn test_terminal_error_display() {
        let err = SchedulingError::AlreadyTerminal(AppointmentStatus::Cancelled);
        assert_eq!(err.to_string(), "Appointment is already terminal (cancelled)");
    }
}
