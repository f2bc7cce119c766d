use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use log::{debug, info};

use super::model::{City, TripRecord, TripTable};
use crate::error::StatsError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load every trip of `city` from its export under `data_dir`.
pub fn load_city(data_dir: &Path, city: City) -> Result<TripTable, StatsError> {
    let path = data_dir.join(city.file_name());
    info!("loading {city} trips from {}", path.display());

    let file = File::open(&path).map_err(|e| StatsError::DataSourceNotFound {
        city: city.to_string(),
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let table = load_reader(file).map_err(|e| match e {
        StatsError::DataSourceNotFound { reason, .. } => StatsError::DataSourceNotFound {
            city: city.to_string(),
            path: path.clone(),
            reason,
        },
        other => other,
    })?;

    info!("loaded {} {city} trips", table.len());
    Ok(table)
}

/// Parse a trip export from any reader.
///
/// CSV layout: header row, then one trip per line. Required columns:
/// `Start Time`, `End Time`, `Trip Duration`, `Start Station`, `End Station`,
/// `User Type`. `Gender` and `Birth Year` are picked up when present. A leading
/// column with an empty header is read as the row index.
///
/// The first row that fails to parse aborts the load.
pub fn load_reader<R: Read>(reader: R) -> Result<TripTable, StatsError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader
        .headers()
        .map_err(|e| unreadable(e.to_string()))?
        .clone();

    let columns = Columns::locate(&headers)?;
    debug!("column layout: {columns:?}");

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.map_err(|e| StatsError::malformed(row_no, "<record>", &e.to_string()))?;
        records.push(columns.parse_row(&row, row_no)?);
    }

    Ok(TripTable::from_records(records, columns.has_demographics()))
}

fn unreadable(reason: String) -> StatsError {
    StatsError::DataSourceNotFound {
        city: "<reader>".to_string(),
        path: Default::default(),
        reason,
    }
}

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

const START_TIME: &str = "Start Time";
const END_TIME: &str = "End Time";
const TRIP_DURATION: &str = "Trip Duration";
const START_STATION: &str = "Start Station";
const END_STATION: &str = "End Station";
const USER_TYPE: &str = "User Type";
const GENDER: &str = "Gender";
const BIRTH_YEAR: &str = "Birth Year";

#[derive(Debug)]
struct Columns {
    index: Option<usize>,
    start_time: usize,
    end_time: usize,
    trip_duration: usize,
    start_station: usize,
    end_station: usize,
    user_type: usize,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self, StatsError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &'static str| {
            find(name).ok_or(StatsError::MissingColumn { column: name })
        };

        Ok(Columns {
            index: headers
                .get(0)
                .filter(|h| h.trim().is_empty())
                .map(|_| 0),
            start_time: require(START_TIME)?,
            end_time: require(END_TIME)?,
            trip_duration: require(TRIP_DURATION)?,
            start_station: require(START_STATION)?,
            end_station: require(END_STATION)?,
            user_type: require(USER_TYPE)?,
            gender: find(GENDER),
            birth_year: find(BIRTH_YEAR),
        })
    }

    fn has_demographics(&self) -> bool {
        self.gender.is_some() && self.birth_year.is_some()
    }

    fn parse_row(&self, row: &csv::StringRecord, row_no: usize) -> Result<TripRecord, StatsError> {
        let cell = |idx: usize| row.get(idx).unwrap_or("");
        let optional = |idx: Option<usize>| idx.map(cell).and_then(non_blank);

        Ok(TripRecord {
            index: self.index.and_then(|i| cell(i).trim().parse().ok()),
            start_time: parse_timestamp(cell(self.start_time))
                .ok_or_else(|| StatsError::malformed(row_no, START_TIME, cell(self.start_time)))?,
            start_time_text: cell(self.start_time).to_string(),
            end_time: cell(self.end_time).to_string(),
            trip_duration: parse_duration(cell(self.trip_duration)).ok_or_else(|| {
                StatsError::malformed(row_no, TRIP_DURATION, cell(self.trip_duration))
            })?,
            start_station: cell(self.start_station).to_string(),
            end_station: cell(self.end_station).to_string(),
            user_type: non_blank(cell(self.user_type)),
            gender: optional(self.gender),
            birth_year: match optional(self.birth_year) {
                Some(raw) => Some(
                    parse_birth_year(&raw)
                        .ok_or_else(|| StatsError::malformed(row_no, BIRTH_YEAR, &raw))?,
                ),
                None => None,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Cell coercion
// ---------------------------------------------------------------------------

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Seconds as written, fractions kept (`"1321.229"`). Negative, NaN and
/// infinite values are rejected.
fn parse_duration(s: &str) -> Option<f64> {
    match s.trim().parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 => Some(f),
        _ => None,
    }
}

/// Accepts `1992` and the float form `1992.0`.
fn parse_birth_year(s: &str) -> Option<i32> {
    if let Ok(year) = s.parse::<i32>() {
        return Some(year);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 => i32::try_from(f as i64).ok(),
        _ => None,
    }
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use chrono::{Datelike, Timelike};

    use super::*;

    const CHICAGO_SAMPLE: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0
9031,2017-01-04 08:27:49,2017-01-04 08:34:45,416,May St & Taylor St,Wood St & Taylor St,Customer,,
";

    const WASHINGTON_SAMPLE: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
482740,2017-03-11 10:40:00,2017-03-11 10:46:00,402.549,Yuma St & Tenley Circle NW,Connecticut Ave & Yuma St NW,
";

    #[test]
    fn loads_demographic_export() {
        let table = load_reader(CHICAGO_SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert!(table.has_demographics);

        let first = &table.rows()[0];
        assert_eq!(first.record.index, Some(1423854));
        assert_eq!(first.record.start_time.hour(), 15);
        assert_eq!(first.month(), 6);
        assert_eq!(first.weekday(), chrono::Weekday::Fri);
        assert_eq!(first.record.birth_year, Some(1992));
        assert_eq!(first.record.gender.as_deref(), Some("Male"));

        let last = &table.rows()[2];
        assert_eq!(last.record.gender, None);
        assert_eq!(last.record.birth_year, None);
        assert_eq!(last.record.user_type.as_deref(), Some("Customer"));
    }

    #[test]
    fn loads_export_without_demographics() {
        let table = load_reader(WASHINGTON_SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert!(!table.has_demographics);
        assert_eq!(table.rows()[0].record.trip_duration, 489.066);
        assert_eq!(table.rows()[0].record.start_time_text, "2017-06-21 08:36:34");
        assert_eq!(table.rows()[1].record.user_type, None);
        assert_eq!(table.rows()[1].record.start_time.day(), 11);
    }

    #[test]
    fn bad_timestamp_aborts_load() {
        let csv = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-01-02 08:00:00,x,60,A,B,Subscriber
not a date,x,60,A,B,Subscriber
2017-01-02 09:00:00,x,60,A,B,Subscriber
";
        match load_reader(csv.as_bytes()) {
            Err(StatsError::MalformedRecord { row, column, value }) => {
                assert_eq!(row, 1);
                assert_eq!(column, START_TIME);
                assert_eq!(value, "not a date");
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn bad_duration_is_malformed() {
        let csv = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-01-02 08:00:00,x,-5,A,B,Subscriber
";
        assert!(matches!(
            load_reader(csv.as_bytes()),
            Err(StatsError::MalformedRecord { column, .. }) if column == TRIP_DURATION
        ));
    }

    #[test]
    fn non_finite_duration_is_malformed() {
        let csv = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-01-02 08:00:00,x,inf,A,B,Subscriber
";
        assert!(matches!(
            load_reader(csv.as_bytes()),
            Err(StatsError::MalformedRecord { column, .. }) if column == TRIP_DURATION
        ));
    }

    #[test]
    fn fractional_durations_are_summed_before_truncation() {
        let csv = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-01-02 08:00:00,x,100.5,A,B,Subscriber
2017-01-02 09:00:00,x,100.5,A,B,Subscriber
2017-01-02 10:00:00,x,100.9,A,B,Subscriber
";
        let table = load_reader(csv.as_bytes()).unwrap();
        let stats = crate::stats::duration::duration_stats(&table).unwrap();
        assert_eq!(stats.total_seconds, 301);
        assert_eq!(stats.mean_seconds, 100);
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "Start Time,End Time,Trip Duration\n";
        assert!(matches!(
            load_reader(csv.as_bytes()),
            Err(StatsError::MissingColumn { column: START_STATION })
        ));
    }

    #[test]
    fn iso_timestamps_with_fractions_parse() {
        let ts = parse_timestamp("2017-03-05T07:08:09.500").unwrap();
        assert_eq!((ts.month(), ts.hour(), ts.second()), (3, 7, 9));
        assert!(parse_timestamp("2017-03-05 07:08:09").is_some());
        assert!(parse_timestamp("05/03/2017").is_none());
    }

    #[test]
    fn load_city_reads_from_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = File::create(dir.path().join("washington.csv")).unwrap();
        file.write_all(WASHINGTON_SAMPLE.as_bytes()).unwrap();

        let table = load_city(dir.path(), City::Washington).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn missing_city_file_is_data_source_not_found() {
        let dir = tempfile::tempdir().unwrap();
        match load_city(dir.path(), City::Chicago) {
            Err(StatsError::DataSourceNotFound { city, path, .. }) => {
                assert_eq!(city, "Chicago");
                assert_eq!(path, dir.path().join("chicago.csv"));
            }
            other => panic!("expected DataSourceNotFound, got {other:?}"),
        }
    }
}
