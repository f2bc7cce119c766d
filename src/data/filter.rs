use chrono::{Month, Weekday};
use log::debug;

use super::model::{weekday_name, City, TripTable};

// ---------------------------------------------------------------------------
// Filter predicate: the user's month / weekday choice
// ---------------------------------------------------------------------------

/// Either no constraint, or exactly one accepted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice<T> {
    All,
    Only(T),
}

impl Choice<Month> {
    fn admits(&self, month: u32) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(m) => m.number_from_month() == month,
        }
    }

    /// `"All"` or the month's name.
    pub fn label(&self) -> &'static str {
        match self {
            Choice::All => "All",
            Choice::Only(m) => m.name(),
        }
    }
}

impl Choice<Weekday> {
    fn admits(&self, day: Weekday) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(d) => *d == day,
        }
    }

    /// `"All"` or the day's name.
    pub fn label(&self) -> &'static str {
        match self {
            Choice::All => "All",
            Choice::Only(d) => weekday_name(*d),
        }
    }
}

/// A fully validated city / month / weekday selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: City,
    pub month: Choice<Month>,
    pub weekday: Choice<Weekday>,
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Narrow `table` to the trips matching `month` and `weekday`.
///
/// Row order is preserved. The result is rebuilt from the kept records, so
/// its derived columns are recomputed rather than copied. No match yields an
/// empty table, not an error.
pub fn filter(table: &TripTable, month: Choice<Month>, weekday: Choice<Weekday>) -> TripTable {
    let records = table
        .rows()
        .iter()
        .filter(|row| month.admits(row.month()) && weekday.admits(row.weekday()))
        .map(|row| row.record.clone())
        .collect::<Vec<_>>();

    debug!(
        "filter month={} weekday={}: kept {} of {} trips",
        month.label(),
        weekday.label(),
        records.len(),
        table.len()
    );
    TripTable::from_records(records, table.has_demographics)
}

/// [`filter`] driven by a whole selection.
pub fn apply(table: &TripTable, selection: &FilterSelection) -> TripTable {
    filter(table, selection.month, selection.weekday)
}
