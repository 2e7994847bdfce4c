use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Appointment ids are assigned by the store, starting at 1, never reused.
pub type AppointmentId = u64;

/// One booked slot on a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    id: AppointmentId,
    pub name: String,
    pub email: String,
    pub date: NaiveDate,
}

impl Appointment {
    pub fn new(id: AppointmentId, name: String, email: String, date: NaiveDate) -> Self {
        Self { id, name, email, date }
    }

    pub fn id(&self) -> AppointmentId {
        self.id
    }

    /// Case-insensitive email comparison used as the ownership check.
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ID:{}] {} → {} ({})", self.id, self.name, self.date, self.email)
    }
}

/// Partial update for an existing appointment. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub date: Option<NaiveDate>,
}

impl AppointmentUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.date.is_none()
    }
}

/// Every state change the store can make. Mutations build one of these and
/// hand it to a single apply path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    CapacitySet {
        date: NaiveDate,
        capacity: u32,
    },
    AppointmentBooked {
        appointment: Appointment,
    },
    AppointmentUpdated {
        id: AppointmentId,
        name: String,
        email: String,
        date: NaiveDate,
    },
    AppointmentCancelled {
        id: AppointmentId,
    },
}

// ── Query result types ───────────────────────────────────────────

/// Per-date line of the schedule overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSummary {
    pub date: NaiveDate,
    pub capacity: u32,
    pub booked: usize,
    /// Negative when the capacity was lowered below existing bookings.
    pub remaining: i64,
}

impl DateSummary {
    pub fn is_full(&self) -> bool {
        self.remaining <= 0
    }
}

/// Point-in-time copy of the whole store, used for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub schedule: Vec<DateSummary>,
    pub appointments: Vec<Appointment>,
}
