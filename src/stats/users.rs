use serde::Serialize;

use super::value_counts;
use crate::data::model::TripTable;

/// One line of a frequency breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Count {
    pub value: String,
    pub count: usize,
}

/// Collect `(value, count)` pairs into [`Count`]s.
pub(crate) fn counts<'a, I>(values: I) -> Vec<Count>
where
    I: IntoIterator<Item = &'a str>,
{
    value_counts(values)
        .into_iter()
        .map(|(value, count)| Count {
            value: value.to_string(),
            count,
        })
        .collect()
}

/// Trips per user type, most frequent first. Blank user types are skipped.
pub fn user_type_stats(table: &TripTable) -> Vec<Count> {
    counts(table.records().filter_map(|r| r.user_type.as_deref()))
}
