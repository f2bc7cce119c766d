use serde::Serialize;

use super::mode;
use super::users::{counts, Count};
use crate::data::model::TripTable;
use crate::error::StatsError;

/// Earliest, most recent and most common year of birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

/// Trips per gender, most frequent first. Missing genders are skipped.
///
/// Fails when the source had no demographic columns at all.
pub fn gender_stats(table: &TripTable) -> Result<Vec<Count>, StatsError> {
    if !table.has_demographics {
        return Err(StatsError::empty("gender counts"));
    }
    Ok(counts(table.records().filter_map(|r| r.gender.as_deref())))
}

/// Birth-year extremes and mode over the trips that have a birth year.
///
/// The mode breaks ties towards the earlier year.
pub fn birth_year_stats(table: &TripTable) -> Result<BirthYearStats, StatsError> {
    let years: Vec<i32> = table.records().filter_map(|r| r.birth_year).collect();

    let earliest = years.iter().copied().min();
    let most_recent = years.iter().copied().max();
    let most_common = mode(years.iter().copied()).map(|(year, _)| year);

    match (earliest, most_recent, most_common) {
        (Some(earliest), Some(most_recent), Some(most_common)) => Ok(BirthYearStats {
            earliest,
            most_recent,
            most_common,
        }),
        _ => Err(StatsError::empty("birth year statistics")),
    }
}
