use chrono::NaiveDate;

use crate::model::AppointmentId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Date token that is not `YYYY-MM-DD`.
    InvalidDate(String),
    /// `start:end` token with a bad endpoint or the wrong number of parts.
    InvalidRange(String),
    RangeTooWide {
        token: String,
        days: i64,
    },
    /// No appointment with this id and email. Deliberately does not say which.
    NotFound(AppointmentId),
    /// Target date has no capacity configured or is fully booked.
    DateUnavailable(NaiveDate),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidDate(token) => write!(f, "invalid date: {token}"),
            EngineError::InvalidRange(token) => write!(f, "invalid range: {token}"),
            EngineError::RangeTooWide { token, days } => {
                write!(f, "range too wide: {token} ({days} days)")
            }
            EngineError::NotFound(id) => write!(f, "no appointment {id} for that email"),
            EngineError::DateUnavailable(date) => {
                write!(f, "{date} has no limit set or is fully booked")
            }
        }
    }
}

impl std::error::Error for EngineError {}
