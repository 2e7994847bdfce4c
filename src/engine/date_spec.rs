use chrono::NaiveDate;

use crate::limits::MAX_RANGE_DAYS;

use super::EngineError;

// ── Date spec grammar ────────────────────────────────────────────
//
//   spec  := token ("," token)*
//   token := date | date ":" date
//   date  := YYYY-MM-DD

/// One resolved token of a date spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateToken {
    Single(NaiveDate),
    /// Inclusive on both ends. `start > end` resolves to no dates.
    Range { start: NaiveDate, end: NaiveDate },
}

impl DateToken {
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let (start, end) = match *self {
            DateToken::Single(d) => (d, d),
            DateToken::Range { start, end } => (start, end),
        };
        std::iter::successors(Some(start), |d| d.succ_opt()).take_while(move |d| *d <= end)
    }

    pub fn len(&self) -> i64 {
        match *self {
            DateToken::Single(_) => 1,
            DateToken::Range { start, end } if start <= end => (end - start).num_days() + 1,
            DateToken::Range { .. } => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Strict `YYYY-MM-DD`: four-digit year, zero-padded month and day, no sign.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let shape_ok = s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse a single non-empty token (already trimmed).
pub fn parse_token(token: &str) -> Result<DateToken, EngineError> {
    if !token.contains(':') {
        return parse_date(token)
            .map(DateToken::Single)
            .ok_or_else(|| EngineError::InvalidDate(token.to_string()));
    }

    let parts: Vec<&str> = token.split(':').collect();
    let [start, end] = parts.as_slice() else {
        return Err(EngineError::InvalidRange(token.to_string()));
    };
    let (Some(start), Some(end)) = (parse_date(start), parse_date(end)) else {
        return Err(EngineError::InvalidRange(token.to_string()));
    };

    let range = DateToken::Range { start, end };
    let days = range.len();
    if days > MAX_RANGE_DAYS {
        return Err(EngineError::RangeTooWide {
            token: token.to_string(),
            days,
        });
    }
    Ok(range)
}

/// Split a comma-separated spec and parse each token independently.
/// Blank tokens are skipped; a bad token never affects its neighbours.
pub fn parse_date_spec(spec: &str) -> Vec<Result<DateToken, EngineError>> {
    spec.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(parse_token)
        .collect()
}
