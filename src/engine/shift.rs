use chrono::NaiveDate;

/// Decides, for a fully booked date, whether auto-shift moves on to the next day.
///
/// Called once per full date encountered. Returning `false` aborts the search.
pub trait ShiftDecision {
    fn shift(&mut self, full: NaiveDate) -> bool;
}

impl<F> ShiftDecision for F
where
    F: FnMut(NaiveDate) -> bool,
{
    fn shift(&mut self, full: NaiveDate) -> bool {
        self(full)
    }
}

/// Caps how many times an inner decision may advance.
///
/// Once the budget is spent the inner decision is no longer consulted.
pub struct ShiftLimit<D> {
    inner: D,
    remaining: Option<usize>,
}

impl<D: ShiftDecision> ShiftLimit<D> {
    /// `None` means no cap.
    pub fn new(inner: D, max_shifts: Option<usize>) -> Self {
        Self {
            inner,
            remaining: max_shifts,
        }
    }

    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: ShiftDecision> ShiftDecision for ShiftLimit<D> {
    fn shift(&mut self, full: NaiveDate) -> bool {
        match self.remaining {
            Some(0) => false,
            Some(ref mut n) => {
                let go = self.inner.shift(full);
                if go {
                    *n -= 1;
                }
                go
            }
            None => self.inner.shift(full),
        }
    }
}

pub(crate) fn record_shift(from: NaiveDate, to: NaiveDate) {
    tracing::debug!("auto-shift: {from} is full, trying {to}");
    metrics::counter!(crate::observability::AUTO_SHIFTS_TOTAL).increment(1);
}
