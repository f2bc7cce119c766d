use serde::Serialize;

use super::mode;
use crate::data::model::{TripRecord, TripTable};
use crate::error::StatsError;

/// Separator between the two halves of a trip key.
pub const TRIP_SEPARATOR: &str = " to ";

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub start_station: String,
    pub end_station: String,
    /// `"<start> to <end>"`.
    pub trip: String,
}

/// Text key identifying a start/end combination.
pub fn trip_key(record: &TripRecord) -> String {
    format!(
        "{}{TRIP_SEPARATOR}{}",
        record.start_station, record.end_station
    )
}

/// Station names are compared as exact, case-sensitive text. Ties go to the
/// lexicographically smallest name.
pub fn station_stats(table: &TripTable) -> Result<StationStats, StatsError> {
    let (start_station, _) = mode(table.records().map(|r| r.start_station.as_str()))
        .ok_or(StatsError::empty("most common start station"))?;
    let (end_station, _) = mode(table.records().map(|r| r.end_station.as_str()))
        .ok_or(StatsError::empty("most common end station"))?;
    let (trip, _) =
        mode(table.records().map(trip_key)).ok_or(StatsError::empty("most common trip"))?;

    Ok(StationStats {
        start_station: start_station.to_string(),
        end_station: end_station.to_string(),
        trip,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::trip;

    fn leg(start: &str, end: &str) -> TripRecord {
        TripRecord {
            start_station: start.to_string(),
            end_station: end.to_string(),
            ..trip(2017, 1, 2, 8, 60)
        }
    }

    #[test]
    fn trip_key_joins_with_to() {
        assert_eq!(trip_key(&leg("A", "B")), "A to B");
    }

    #[test]
    fn most_popular_stations_and_trip() {
        let table = TripTable::from_records(
            vec![
                leg("Canal St", "Clark St"),
                leg("Canal St", "State St"),
                leg("Lake St", "State St"),
                leg("Lake St", "State St"),
                leg("Canal St", "Wells St"),
            ],
            false,
        );
        let stats = station_stats(&table).unwrap();
        assert_eq!(stats.start_station, "Canal St");
        assert_eq!(stats.end_station, "State St");
        assert_eq!(stats.trip, "Lake St to State St");
    }

    #[test]
    fn names_are_case_sensitive() {
        let table = TripTable::from_records(
            vec![leg("b", "x"), leg("B", "x"), leg("b", "x")],
            false,
        );
        assert_eq!(station_stats(&table).unwrap().start_station, "b");
    }

    #[test]
    fn empty_table_is_an_error() {
        let table = TripTable::from_records(Vec::new(), true);
        assert!(matches!(
            station_stats(&table),
            Err(StatsError::EmptyAggregationInput { .. })
        ));
    }
}
