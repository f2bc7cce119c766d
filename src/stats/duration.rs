use std::fmt;

use serde::Serialize;

use crate::data::model::TripTable;
use crate::error::StatsError;

/// A span of whole seconds split into hours, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hms {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Hms {
    pub fn from_secs(total: u64) -> Self {
        let (minutes, seconds) = (total / 60, total % 60);
        let (hours, minutes) = (minutes / 60, minutes % 60);
        Hms {
            hours,
            minutes,
            seconds,
        }
    }
}

impl fmt::Display for Hms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} hours, {:02} minutes and {:02} seconds",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// Total and mean trip duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationStats {
    pub total_seconds: u64,
    /// Integer mean; the fractional part is truncated.
    pub mean_seconds: u64,
    pub total: Hms,
    pub mean: Hms,
}

pub fn duration_stats(table: &TripTable) -> Result<DurationStats, StatsError> {
    if table.is_empty() {
        return Err(StatsError::empty("mean trip duration"));
    }

    // Sum the raw seconds first; truncate only the final figures.
    let total: f64 = table.records().map(|r| r.trip_duration).sum();
    let total_seconds = total.trunc() as u64;
    let mean_seconds = (total / table.len() as f64).trunc() as u64;

    Ok(DurationStats {
        total_seconds,
        mean_seconds,
        total: Hms::from_secs(total_seconds),
        mean: Hms::from_secs(mean_seconds),
    })
}
