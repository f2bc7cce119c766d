use chrono::Timelike;
use serde::Serialize;

use super::mode;
use crate::data::model::{month_name, weekday_name, TripTable, WEEKDAYS};
use crate::error::StatsError;

/// Most common times of travel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    /// Month number, 1–12.
    pub month: u32,
    pub month_name: &'static str,
    pub weekday: &'static str,
    /// Start hour, 0–23.
    pub hour: u32,
}

/// Mode of the derived month, the derived weekday and the start hour.
///
/// Ties resolve to the earliest month, the earliest day in a Monday-first
/// week, and the earliest hour.
pub fn time_stats(table: &TripTable) -> Result<TimeStats, StatsError> {
    let rows = table.rows();

    let (month, _) =
        mode(rows.iter().map(|r| r.month())).ok_or(StatsError::empty("most common month"))?;
    let (day, _) = mode(rows.iter().map(|r| r.weekday().num_days_from_monday()))
        .ok_or(StatsError::empty("most common weekday"))?;
    let (hour, _) = mode(rows.iter().map(|r| r.record.start_time.hour()))
        .ok_or(StatsError::empty("most common hour"))?;

    Ok(TimeStats {
        month,
        month_name: month_name(month).unwrap_or_default(),
        weekday: weekday_name(WEEKDAYS[day as usize]),
        hour,
    })
}
