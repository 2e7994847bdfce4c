//! Plain-text views of the store for the interactive shell.

use std::fmt;

use crate::engine::BookingStore;

const RULE: &str = "------------------------------------------------------------------";

/// Remaining slots for every configured date.
pub fn render_available(store: &BookingStore) -> String {
    AvailableView(store).to_string()
}

/// Operator table: one row per appointment, grouped by date ascending.
/// Dates without bookings still get a placeholder row.
pub fn render_appointments(store: &BookingStore) -> String {
    AppointmentsView(store).to_string()
}

pub struct AvailableView<'a>(pub &'a BookingStore);

impl fmt::Display for AvailableView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n========= AVAILABLE SCHEDULES =========")?;
        let schedule = self.0.schedule();
        if schedule.is_empty() {
            return writeln!(f, "No schedules set.");
        }
        for day in &schedule {
            writeln!(f, "{:<12} — {} slot(s) available", day.date.to_string(), day.remaining)?;
        }
        writeln!(f, "=======================================")
    }
}

pub struct AppointmentsView<'a>(pub &'a BookingStore);

impl fmt::Display for AppointmentsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.0;
        let schedule = store.schedule();
        if schedule.is_empty() {
            return writeln!(f, "\n No scheduled dates available.");
        }

        writeln!(f, "\n====================== APPOINTMENTS ======================")?;
        writeln!(f, "{:<12} | {:<18} | {:<25} | {:<16}", "DATE", "NAME", "EMAIL", "STATUS")?;
        writeln!(f, "{RULE}")?;

        for day in &schedule {
            let status = if day.is_full() {
                "FULL".to_string()
            } else {
                format!("{} slots left", day.remaining)
            };
            let date = day.date.to_string();
            let booked = store.appointments_on(day.date);
            if booked.is_empty() {
                writeln!(f, "{date:<12} | {:<18} | {:<25} | {status:<16}", "-", "-")?;
                continue;
            }
            for (i, a) in booked.iter().enumerate() {
                let (date_col, status_col) = if i == 0 { (date.as_str(), status.as_str()) } else { ("", "") };
                writeln!(f, "{date_col:<12} | {:<18} | {:<25} | {status_col:<16}", a.name, a.email)?;
            }
        }
        writeln!(f, "{RULE}")
    }
}
