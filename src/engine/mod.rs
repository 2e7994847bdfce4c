mod capacity;
mod date_spec;
mod error;
mod mutations;
mod queries;
mod shared;
mod shift;

pub use capacity::Rejection;
pub use date_spec::{parse_date, parse_date_spec, parse_token, DateToken};
pub use error::EngineError;
pub use shared::SharedBookingStore;
pub use shift::{ShiftDecision, ShiftLimit};

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::*;

/// Outcome of a `set_capacity` call: every date that was written, and one
/// error per token that could not be parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapacityReport {
    pub applied: Vec<NaiveDate>,
    pub rejected: Vec<EngineError>,
}

impl CapacityReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Owns all appointments and the per-date capacity table.
///
/// Appointments are keyed by id, so iteration order is booking order.
/// Capacities are keyed by date, so iteration order is ascending.
#[derive(Debug)]
pub struct BookingStore {
    appointments: BTreeMap<AppointmentId, Appointment>,
    capacities: BTreeMap<NaiveDate, u32>,
    next_id: AppointmentId,
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingStore {
    pub fn new() -> Self {
        Self {
            appointments: BTreeMap::new(),
            capacities: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// The only place state changes. Callers have already validated the event.
    fn apply(&mut self, event: &Event) {
        match event {
            Event::CapacitySet { date, capacity } => {
                self.capacities.insert(*date, *capacity);
            }
            Event::AppointmentBooked { appointment } => {
                self.next_id = self.next_id.max(appointment.id() + 1);
                self.appointments.insert(appointment.id(), appointment.clone());
            }
            Event::AppointmentUpdated {
                id,
                name,
                email,
                date,
            } => {
                if let Some(a) = self.appointments.get_mut(id) {
                    a.name = name.clone();
                    a.email = email.clone();
                    a.date = *date;
                }
            }
            Event::AppointmentCancelled { id } => {
                self.appointments.remove(id);
            }
        }
        metrics::gauge!(crate::observability::APPOINTMENTS_ACTIVE)
            .set(self.appointments.len() as f64);
    }

    /// Capacity gate against current state.
    fn check_room(
        &self,
        date: NaiveDate,
        excluding: Option<AppointmentId>,
    ) -> Result<(), Rejection> {
        capacity::check_room(&self.capacities, &self.appointments, date, excluding)
    }
}
