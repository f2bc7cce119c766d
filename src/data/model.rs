use std::fmt;

use chrono::{Datelike, NaiveDateTime, Weekday};

// ---------------------------------------------------------------------------
// City – the three supported data sources
// ---------------------------------------------------------------------------

/// A city with a bike-share trip export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// Match a lower-cased city name (`"new york city"`, …).
    pub fn from_name(name: &str) -> Option<City> {
        match name {
            "chicago" => Some(City::Chicago),
            "new york city" => Some(City::NewYorkCity),
            "washington" => Some(City::Washington),
            _ => None,
        }
    }

    /// Source file name inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Whether the export carries `Gender` and `Birth Year` columns.
    pub fn has_demographics(self) -> bool {
        !matches!(self, City::Washington)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Calendar helpers
// ---------------------------------------------------------------------------

/// Months covered by the exports, in calendar order.
pub const MONTH_NAMES: [&str; 6] = ["January", "February", "March", "April", "May", "June"];

/// Weekdays in Monday-first order.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name of a weekday (`"Monday"`, …).
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Full English name of a month number, if it is in 1..=12.
pub fn month_name(month: u32) -> Option<&'static str> {
    u8::try_from(month)
        .ok()
        .and_then(|m| chrono::Month::try_from(m).ok())
        .map(|m| m.name())
}

// ---------------------------------------------------------------------------
// TripRecord – one row of a city export
// ---------------------------------------------------------------------------

/// A single trip as read from the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    /// Unlabeled leading index column, when the export has one.
    pub index: Option<u64>,
    pub start_time: NaiveDateTime,
    /// `Start Time` exactly as written in the source, for the raw-row view.
    pub start_time_text: String,
    /// Kept as text; no statistic reads it.
    pub end_time: String,
    /// Seconds, possibly fractional. Never negative.
    pub trip_duration: f64,
    pub start_station: String,
    pub end_station: String,
    /// `None` when the cell is blank.
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
}

// ---------------------------------------------------------------------------
// TripRow – a record plus its derived calendar columns
// ---------------------------------------------------------------------------

/// A record together with the calendar columns derived from its start time.
///
/// The derived fields are private and only ever set by [`TripRow::new`], so
/// they cannot drift from `record.start_time`.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRow {
    pub record: TripRecord,
    month: u32,
    weekday: Weekday,
}

impl TripRow {
    pub fn new(record: TripRecord) -> Self {
        let month = record.start_time.month();
        let weekday = record.start_time.weekday();
        TripRow {
            record,
            month,
            weekday,
        }
    }

    /// Month number (1–12) of the start time.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }
}

// ---------------------------------------------------------------------------
// TripTable – the loaded dataset
// ---------------------------------------------------------------------------

/// An ordered set of trips with derived columns populated for every row.
#[derive(Debug, Clone, PartialEq)]
pub struct TripTable {
    rows: Vec<TripRow>,
    /// Whether the source had `Gender` / `Birth Year` columns.
    pub has_demographics: bool,
}

impl TripTable {
    /// Build a table, deriving `month` and `weekday` for each record.
    pub fn from_records(records: Vec<TripRecord>, has_demographics: bool) -> Self {
        TripTable {
            rows: records.into_iter().map(TripRow::new).collect(),
            has_demographics,
        }
    }

    pub fn rows(&self) -> &[TripRow] {
        &self.rows
    }

    pub fn records(&self) -> impl Iterator<Item = &TripRecord> {
        self.rows.iter().map(|r| &r.record)
    }

    /// Number of trips.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
