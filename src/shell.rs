//! Interactive operator/client sessions over any line-based reader/writer.
//!
//! The shell only collects input and prints results; every rule lives in
//! [`BookingStore`].

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;

use crate::config::Config;
use crate::engine::{parse_date, BookingStore, EngineError, ShiftDecision, ShiftLimit};
use crate::limits::MAX_RANGE_DAYS;
use crate::model::{AppointmentId, AppointmentUpdate};
use crate::report;

pub struct Shell<'a, R, W> {
    store: &'a mut BookingStore,
    input: R,
    output: W,
    max_auto_shifts: Option<usize>,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(store: &'a mut BookingStore, input: R, output: W, config: &Config) -> Self {
        Self {
            store,
            input,
            output,
            max_auto_shifts: config.max_auto_shifts,
        }
    }

    /// Run until the user exits. Closed input ends the session cleanly.
    pub fn run(&mut self) -> io::Result<()> {
        match self.session() {
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                tracing::debug!("input closed, ending session");
                self.output.flush()
            }
            other => other,
        }
    }

    fn session(&mut self) -> io::Result<()> {
        writeln!(self.output, "=====================================")?;
        writeln!(self.output, "      WELCOME TO AppPoint System     ")?;
        writeln!(self.output, "=====================================")?;
        if !self.read_line("Proceed? (Y/N): ")?.eq_ignore_ascii_case("y") {
            writeln!(self.output, "Program ended.")?;
            return Ok(());
        }

        loop {
            writeln!(self.output, "\n-------------------------------------")?;
            writeln!(self.output, "Select Account Type")?;
            writeln!(self.output, "[A] Admin")?;
            writeln!(self.output, "[U] User")?;
            writeln!(self.output, "[X] Exit")?;
            writeln!(self.output, "-------------------------------------")?;
            let role = self.read_line("> ")?.to_ascii_uppercase();
            match role.as_str() {
                "X" => {
                    writeln!(self.output, "Program ended.")?;
                    return Ok(());
                }
                "A" => self.operator_session()?,
                _ => self.client_session()?,
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        read_line(&mut self.input, &mut self.output, prompt)
    }

    // ── Operator ─────────────────────────────────────────────

    fn operator_session(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "\n========== MENU ==========")?;
            writeln!(self.output, "1) Scheduling Limits")?;
            writeln!(self.output, "2) View All Appointments")?;
            writeln!(self.output, "3) Terminate Appointment")?;
            writeln!(self.output, "4) Export Snapshot (JSON)")?;
            writeln!(self.output, "0) Logout")?;
            match self.read_line("> ")?.as_str() {
                "1" => self.manage_limits()?,
                "2" => write!(self.output, "{}", report::render_appointments(self.store))?,
                "3" => self.terminate_appointment()?,
                "4" => self.export_snapshot()?,
                "0" => return Ok(()),
                _ => writeln!(self.output, "Invalid.")?,
            }
        }
    }

    fn manage_limits(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "\n--- LIMIT SETTINGS ---")?;
            writeln!(self.output, "1) Set Limit")?;
            writeln!(self.output, "2) Edit Limit")?;
            writeln!(self.output, "0) Back")?;
            let choice = self.read_line("> ")?;
            let verb = match choice.as_str() {
                "0" => return Ok(()),
                "1" => "created",
                "2" => "updated",
                _ => {
                    writeln!(self.output, "Invalid.")?;
                    continue;
                }
            };

            writeln!(self.output, "\nAccepted Date Formats:")?;
            writeln!(self.output, "Single: YYYY-MM-DD")?;
            writeln!(self.output, "Range: YYYY-MM-DD:YYYY-MM-DD (at most {MAX_RANGE_DAYS} days)")?;
            writeln!(self.output, "Multiple: YYYY-MM-DD, YYYY-MM-DD")?;

            let spec = self.read_line("\nEnter date/s: ")?;
            let Ok(limit) = self.read_line("Limit value: ")?.parse::<u32>() else {
                writeln!(self.output, "Invalid limit.")?;
                continue;
            };

            let report = self.store.set_capacity(&spec, limit);
            for rejected in &report.rejected {
                writeln!(self.output, "✘ {rejected}")?;
            }
            if report.applied.is_empty() {
                writeln!(self.output, "✘ No dates changed.")?;
            } else {
                writeln!(self.output, " Limit {verb} for {} date(s).", report.applied.len())?;
            }
        }
    }

    fn terminate_appointment(&mut self) -> io::Result<()> {
        let Some(id) = parse_id(&self.read_line("Appointment ID: ")?) else {
            return writeln!(self.output, "Invalid ID.");
        };
        if self.store.cancel_by_id(id) {
            writeln!(self.output, " Removed.")
        } else {
            writeln!(self.output, "✘ ID not found.")
        }
    }

    fn export_snapshot(&mut self) -> io::Result<()> {
        match serde_json::to_string_pretty(&self.store.snapshot()) {
            Ok(json) => writeln!(self.output, "{json}"),
            Err(e) => writeln!(self.output, "✘ Export failed: {e}"),
        }
    }

    // ── Client ───────────────────────────────────────────────

    fn client_session(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "\n========== MENU ==========")?;
            writeln!(self.output, "1) Book Appointment")?;
            writeln!(self.output, "2) Cancel My Appointment")?;
            writeln!(self.output, "3) Modify My Appointment")?;
            writeln!(self.output, "0) Logout")?;
            match self.read_line("> ")?.as_str() {
                "1" => self.booking_menu()?,
                "2" => self.cancel_my_appointment()?,
                "3" => self.modify_my_appointment()?,
                "0" => return Ok(()),
                _ => writeln!(self.output, "Invalid.")?,
            }
        }
    }

    fn booking_menu(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "\n--- BOOKING MENU ---")?;
            writeln!(self.output, "1) Book Now")?;
            writeln!(self.output, "2) View Available Schedules")?;
            writeln!(self.output, "0) Back")?;
            match self.read_line("> ")?.as_str() {
                "1" => self.book_now()?,
                "2" => write!(self.output, "{}", report::render_available(self.store))?,
                "0" => return Ok(()),
                _ => writeln!(self.output, "Invalid.")?,
            }
        }
    }

    fn book_now(&mut self) -> io::Result<()> {
        let Some(date) = parse_date(&self.read_line("Preferred date (YYYY-MM-DD): ")?) else {
            return writeln!(self.output, "Invalid date.");
        };
        let name = self.read_line("Name: ")?;
        let email = self.read_line("Email: ")?;

        let prompt = PromptShift {
            input: &mut self.input,
            output: &mut self.output,
            error: None,
        };
        let mut decision = ShiftLimit::new(prompt, self.max_auto_shifts);
        let booked = self
            .store
            .book_with_auto_shift(&name, &email, date, &mut decision);
        if let Some(e) = decision.into_inner().error {
            return Err(e);
        }

        match booked {
            Some(appointment) => writeln!(self.output, "\n BOOKED → {appointment}"),
            None => writeln!(self.output, "Invalid date or booking cancelled."),
        }
    }

    fn cancel_my_appointment(&mut self) -> io::Result<()> {
        let Some(id) = parse_id(&self.read_line("Appointment ID: ")?) else {
            return writeln!(self.output, "Invalid input.");
        };
        let email = self.read_line("Email: ")?;
        if self.store.cancel_by_id_and_email(id, &email) {
            writeln!(self.output, " Cancelled.")
        } else {
            writeln!(self.output, "✘ Failed — ID/Email mismatch")
        }
    }

    fn modify_my_appointment(&mut self) -> io::Result<()> {
        let Some(id) = parse_id(&self.read_line("Appointment ID: ")?) else {
            return writeln!(self.output, "Invalid input.");
        };
        let email = self.read_line("Current Email: ")?;
        let Some(current) = self.store.find_by_id_and_email(id, &email) else {
            return writeln!(self.output, "✘ Failed — ID/Email mismatch or not found.");
        };
        writeln!(self.output, "\nCurrent: {current}")?;

        let name = self.read_line("New name (leave blank to keep): ")?;
        let new_email = self.read_line("New email (leave blank to keep): ")?;
        let date_text = self.read_line("New date YYYY-MM-DD (leave blank to keep): ")?;
        let date = if date_text.is_empty() {
            None
        } else {
            match parse_date(&date_text) {
                Some(date) => Some(date),
                None => return writeln!(self.output, "Invalid date format."),
            }
        };

        let update = AppointmentUpdate {
            name: non_empty(name),
            email: non_empty(new_email),
            date,
        };
        match self.store.modify_appointment(id, &email, update) {
            Ok(updated) => writeln!(self.output, "✔ Appointment updated: {updated}"),
            Err(EngineError::DateUnavailable(_)) => writeln!(
                self.output,
                "✘ Cannot move — either no limit or target date is fully booked."
            ),
            Err(e) => writeln!(self.output, "✘ Failed — {e}"),
        }
    }
}

/// Asks the user at the terminal whether to try the following day.
struct PromptShift<'s, R, W> {
    input: &'s mut R,
    output: &'s mut W,
    /// First I/O failure; surfaced by the caller once the search stops.
    error: Option<io::Error>,
}

impl<R: BufRead, W: Write> ShiftDecision for PromptShift<'_, R, W> {
    fn shift(&mut self, full: NaiveDate) -> bool {
        let Some(next) = full.succ_opt() else {
            return false;
        };
        let answer = writeln!(self.output, "\n {full} is FULLY BOOKED.").and_then(|()| {
            read_line(
                &mut *self.input,
                &mut *self.output,
                &format!("Try next day ({next})? (Y/N): "),
            )
        });
        match answer {
            Ok(answer) => answer.eq_ignore_ascii_case("y"),
            Err(e) => {
                self.error = Some(e);
                false
            }
        }
    }
}

/// Print `prompt`, read one line, trim it. EOF is `UnexpectedEof`.
fn read_line<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> io::Result<String> {
    write!(output, "{prompt}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim().to_string())
}

fn parse_id(text: &str) -> Option<AppointmentId> {
    text.trim().parse().ok()
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}
