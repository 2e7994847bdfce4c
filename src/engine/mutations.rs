use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::model::*;
use crate::observability::*;

use super::date_spec::parse_date_spec;
use super::shift::record_shift;
use super::{BookingStore, CapacityReport, EngineError, Rejection, ShiftDecision};

impl BookingStore {
    /// Set `capacity` on every date named by `spec` (single dates, `start:end`
    /// ranges, comma-separated). Existing values are overwritten. Bad tokens
    /// are reported and skipped; good tokens in the same call still apply.
    pub fn set_capacity(&mut self, spec: &str, capacity: u32) -> CapacityReport {
        let mut report = CapacityReport::default();
        for token in parse_date_spec(spec) {
            match token {
                Ok(token) => {
                    for date in token.dates() {
                        self.apply(&Event::CapacitySet { date, capacity });
                        report.applied.push(date);
                    }
                }
                Err(e) => {
                    warn!("capacity token skipped: {e}");
                    metrics::counter!(CAPACITY_TOKENS_REJECTED_TOTAL).increment(1);
                    report.rejected.push(e);
                }
            }
        }
        info!(
            "capacity {capacity} set on {} date(s), {} token(s) rejected",
            report.applied.len(),
            report.rejected.len()
        );
        report
    }

    /// Book one slot on `date` if it has a configured capacity with room left.
    pub fn try_book(&mut self, name: &str, email: &str, date: NaiveDate) -> bool {
        self.book(name, email, date).is_ok()
    }

    /// Check-then-insert. The new appointment gets the next id.
    pub(crate) fn book(
        &mut self,
        name: &str,
        email: &str,
        date: NaiveDate,
    ) -> Result<Appointment, Rejection> {
        if let Err(reason) = self.check_room(date, None) {
            debug!("booking on {date} rejected: {}", reason.label());
            metrics::counter!(BOOKING_REJECTIONS_TOTAL, "reason" => reason.label()).increment(1);
            return Err(reason);
        }

        let appointment = Appointment::new(self.next_id, name.to_string(), email.to_string(), date);
        self.apply(&Event::AppointmentBooked {
            appointment: appointment.clone(),
        });
        info!("booked {appointment}");
        metrics::counter!(BOOKINGS_TOTAL).increment(1);
        Ok(appointment)
    }

    /// Try `date`; while it is full, ask `decision` whether to try the next
    /// day. Stops on success, on a declined shift, or on a date without any
    /// configured capacity (auto-shift never invents capacity).
    pub fn book_with_auto_shift<D>(
        &mut self,
        name: &str,
        email: &str,
        date: NaiveDate,
        decision: &mut D,
    ) -> Option<Appointment>
    where
        D: ShiftDecision + ?Sized,
    {
        let mut date = date;
        loop {
            match self.book(name, email, date) {
                Ok(appointment) => return Some(appointment),
                Err(Rejection::Unconfigured) => return None,
                Err(Rejection::Full) => {}
            }
            if !decision.shift(date) {
                return None;
            }
            let next = date.succ_opt()?;
            record_shift(date, next);
            date = next;
        }
    }

    /// Remove an appointment by id alone. Operator path.
    pub fn cancel_by_id(&mut self, id: AppointmentId) -> bool {
        if !self.appointments.contains_key(&id) {
            return false;
        }
        self.cancel(id);
        true
    }

    /// Remove an appointment only if the email matches (case-insensitive).
    pub fn cancel_by_id_and_email(&mut self, id: AppointmentId, email: &str) -> bool {
        if self.find_by_id_and_email(id, email).is_none() {
            return false;
        }
        self.cancel(id);
        true
    }

    fn cancel(&mut self, id: AppointmentId) {
        self.apply(&Event::AppointmentCancelled { id });
        info!("cancelled appointment {id}");
        metrics::counter!(CANCELLATIONS_TOTAL).increment(1);
    }

    /// Change name, email and/or date of an appointment owned by `email`.
    ///
    /// A date change must pass `can_move_to` for the target date. Keeping
    /// the current date is not a move and is never refused. Nothing is
    /// changed when any part is refused. An empty update returns the
    /// current appointment without applying an event.
    pub fn modify_appointment(
        &mut self,
        id: AppointmentId,
        email: &str,
        update: AppointmentUpdate,
    ) -> Result<Appointment, EngineError> {
        let current = self
            .find_by_id_and_email(id, email)
            .ok_or(EngineError::NotFound(id))?;

        if update.is_empty() {
            debug!("empty update for appointment {id}");
            return Ok(current);
        }

        if let Some(date) = update.date
            && date != current.date
            && !self.can_move_to(date, id)
        {
            debug!("move of appointment {id} to {date} refused");
            return Err(EngineError::DateUnavailable(date));
        }

        let event = Event::AppointmentUpdated {
            id,
            name: update.name.unwrap_or(current.name),
            email: update.email.unwrap_or(current.email),
            date: update.date.unwrap_or(current.date),
        };
        self.apply(&event);

        let updated = self
            .appointments
            .get(&id)
            .cloned()
            .ok_or(EngineError::NotFound(id))?;
        if updated.date != current.date {
            info!("moved appointment {id} from {} to {}", current.date, updated.date);
        } else {
            info!("updated appointment {id}");
        }
        Ok(updated)
    }
}
