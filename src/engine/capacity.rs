use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::*;

/// Why a date cannot take one more appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No capacity configured. Never retried by auto-shift.
    Unconfigured,
    Full,
}

impl Rejection {
    pub fn label(self) -> &'static str {
        match self {
            Rejection::Unconfigured => "unconfigured",
            Rejection::Full => "full",
        }
    }
}

/// Count appointments holding `date`, optionally ignoring one id.
pub(crate) fn occupancy(
    appointments: &BTreeMap<AppointmentId, Appointment>,
    date: NaiveDate,
    excluding: Option<AppointmentId>,
) -> usize {
    appointments
        .values()
        .filter(|a| a.date == date && Some(a.id()) != excluding)
        .count()
}

/// Gate for booking and moving. Occupancy is always recounted, never cached.
pub(crate) fn check_room(
    capacities: &BTreeMap<NaiveDate, u32>,
    appointments: &BTreeMap<AppointmentId, Appointment>,
    date: NaiveDate,
    excluding: Option<AppointmentId>,
) -> Result<(), Rejection> {
    let capacity = *capacities.get(&date).ok_or(Rejection::Unconfigured)?;
    if occupancy(appointments, date, excluding) < capacity as usize {
        Ok(())
    } else {
        Err(Rejection::Full)
    }
}
