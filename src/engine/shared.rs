use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;

use crate::model::*;

use super::shift::record_shift;
use super::{BookingStore, CapacityReport, EngineError, Rejection, ShiftDecision};

/// Cloneable handle for callers on different tasks.
///
/// One mutex covers both the appointments and the capacity table, so every
/// capacity check and the write it gates happen under the same guard.
#[derive(Clone, Default)]
pub struct SharedBookingStore {
    inner: Arc<Mutex<BookingStore>>,
}

impl SharedBookingStore {
    pub fn new(store: BookingStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Run several operations as one atomic step.
    pub async fn with_store<T>(&self, f: impl FnOnce(&mut BookingStore) -> T) -> T {
        let mut guard = self.inner.lock().await;
        f(&mut guard)
    }

    pub async fn set_capacity(&self, spec: &str, capacity: u32) -> CapacityReport {
        self.inner.lock().await.set_capacity(spec, capacity)
    }

    pub async fn try_book(&self, name: &str, email: &str, date: NaiveDate) -> bool {
        self.inner.lock().await.try_book(name, email, date)
    }

    /// Same search as [`BookingStore::book_with_auto_shift`], but the lock is
    /// released while `decision` runs. Each attempt re-checks capacity from
    /// scratch, so a slot freed by another caller in between is picked up.
    pub async fn book_with_auto_shift<D>(
        &self,
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
            let attempt = self.inner.lock().await.book(name, email, date);
            match attempt {
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

    pub async fn cancel_by_id(&self, id: AppointmentId) -> bool {
        self.inner.lock().await.cancel_by_id(id)
    }

    pub async fn cancel_by_id_and_email(&self, id: AppointmentId, email: &str) -> bool {
        self.inner.lock().await.cancel_by_id_and_email(id, email)
    }

    pub async fn modify_appointment(
        &self,
        id: AppointmentId,
        email: &str,
        update: AppointmentUpdate,
    ) -> Result<Appointment, EngineError> {
        self.inner.lock().await.modify_appointment(id, email, update)
    }

    pub async fn find_by_id_and_email(&self, id: AppointmentId, email: &str) -> Option<Appointment> {
        self.inner.lock().await.find_by_id_and_email(id, email)
    }

    pub async fn can_move_to(&self, date: NaiveDate, excluding: AppointmentId) -> bool {
        self.inner.lock().await.can_move_to(date, excluding)
    }

    pub async fn remaining_slots(&self, date: NaiveDate) -> Option<i64> {
        self.inner.lock().await.remaining_slots(date)
    }

    pub async fn appointments_on(&self, date: NaiveDate) -> Vec<Appointment> {
        self.inner.lock().await.appointments_on(date)
    }

    pub async fn all_configured_dates(&self) -> BTreeSet<NaiveDate> {
        self.inner.lock().await.all_configured_dates()
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        self.inner.lock().await.snapshot()
    }
}
