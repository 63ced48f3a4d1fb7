//! Day seed: every viewer on the same calendar day gets the same layout.
//!
//! The date is the viewer's *local* calendar date. Two viewers on either side of
//! midnight in different time zones will see different trees for a few hours.

use {
  crate::error::{Error, Result},
  chrono::{Datelike, Local, NaiveDate}
};


pub type Seed = u32;

/// `YYYYMMDD` read as a decimal integer.
pub fn seed_for_date(date: NaiveDate) -> Seed {
  date.year().max(0) as u32 * 10_000 + date.month() * 100 + date.day()
}

pub fn today_seed() -> Seed {
  seed_for_date(Local::now().date_naive())
}

/// Parse `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
    .map_err(|e| Error::invalid_input(format!("date {s:?}: {e}")))
}
