use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::model::*;

use super::capacity::occupancy;
use super::BookingStore;

// All reads hand out owned copies; nothing here borrows store internals
// past the call.

impl BookingStore {
    pub fn find_by_id_and_email(&self, id: AppointmentId, email: &str) -> Option<Appointment> {
        self.appointments
            .get(&id)
            .filter(|a| a.email_matches(email))
            .cloned()
    }

    /// True iff `date` has a capacity and, not counting `excluding`, still
    /// has room for one more appointment.
    pub fn can_move_to(&self, date: NaiveDate, excluding: AppointmentId) -> bool {
        self.check_room(date, Some(excluding)).is_ok()
    }

    /// Capacity minus bookings, or `None` when no capacity is configured.
    /// Negative when the capacity was lowered below existing bookings.
    pub fn remaining_slots(&self, date: NaiveDate) -> Option<i64> {
        let capacity = *self.capacities.get(&date)?;
        Some(i64::from(capacity) - occupancy(&self.appointments, date, None) as i64)
    }

    pub fn capacity_of(&self, date: NaiveDate) -> Option<u32> {
        self.capacities.get(&date).copied()
    }

    /// Appointments on `date`, in booking order.
    pub fn appointments_on(&self, date: NaiveDate) -> Vec<Appointment> {
        self.appointments
            .values()
            .filter(|a| a.date == date)
            .cloned()
            .collect()
    }

    /// Every appointment, in booking order.
    pub fn appointments(&self) -> Vec<Appointment> {
        self.appointments.values().cloned().collect()
    }

    pub fn appointment_count(&self) -> usize {
        self.appointments.len()
    }

    pub fn all_configured_dates(&self) -> BTreeSet<NaiveDate> {
        self.capacities.keys().copied().collect()
    }

    /// One line per configured date, ascending.
    pub fn schedule(&self) -> Vec<DateSummary> {
        self.capacities
            .iter()
            .map(|(&date, &capacity)| {
                let booked = occupancy(&self.appointments, date, None);
                DateSummary {
                    date,
                    capacity,
                    booked,
                    remaining: i64::from(capacity) - booked as i64,
                }
            })
            .collect()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            schedule: self.schedule(),
            appointments: self.appointments(),
        }
    }
}
