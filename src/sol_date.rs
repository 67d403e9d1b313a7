use chrono::{Duration, NaiveDate};

use crate::error::{RoverError, RoverResult};

/// Earth days per sol
pub const SOL_RATIO: f64 = 1.02749125170;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Earth date (`YYYY-MM-DD`) of `sol`, counted from the rover's landing date.
pub fn sol_to_earth_date(sol: u32, landing_date: &str) -> RoverResult<String> {
    let landing = NaiveDate::parse_from_str(landing_date, DATE_FORMAT)?;
    let earth_date = landing
        .checked_add_signed(Duration::days(day_offset(sol)))
        .ok_or_else(|| RoverError::InvalidArgument(format!("sol {} is out of date range", sol)))?;
    Ok(earth_date.format(DATE_FORMAT).to_string())
}

/// Whole Earth days elapsed after `sol` sols, rounded half to even.
pub fn day_offset(sol: u32) -> i64 {
    round_half_even(f64::from(sol) * SOL_RATIO)
}

fn round_half_even(value: f64) -> i64 {
    value.round_ties_even() as i64
}
