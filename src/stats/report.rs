use std::io::{self, Write};
use std::time::{Duration, Instant};

use comfy_table::{presets, Cell, CellAlignment, Table};
use log::warn;
use serde::Serialize;

use super::demographics::{birth_year_stats, gender_stats, BirthYearStats};
use super::duration::{duration_stats, DurationStats};
use super::stations::{station_stats, StationStats};
use super::time::{time_stats, TimeStats};
use super::users::{user_type_stats, Count};
use crate::data::filter::FilterSelection;
use crate::data::model::TripTable;
use crate::error::StatsError;

const RULE: &str = "----------------------------------------";

// ---------------------------------------------------------------------------
// Section – one statistic group and how long it took
// ---------------------------------------------------------------------------

/// Outcome of one aggregator. A failure only affects its own section.
#[derive(Debug, Clone, Serialize)]
pub struct Section<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl<T> Section<T> {
    fn run(name: &str, f: impl FnOnce() -> Result<T, StatsError>) -> Self {
        let started = Instant::now();
        let result = f();
        let elapsed = started.elapsed();
        match result {
            Ok(value) => Section {
                value: Some(value),
                error: None,
                elapsed,
            },
            Err(e) => {
                warn!("{name}: {e}");
                Section {
                    value: None,
                    error: Some(e.to_string()),
                    elapsed,
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// StatsReport – everything printed for one cycle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Demographics {
    pub genders: Section<Vec<Count>>,
    pub birth_years: Section<BirthYearStats>,
}

/// The five statistic groups for one filtered table.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub city: String,
    pub month: &'static str,
    pub weekday: &'static str,
    pub trips: usize,
    pub times: Section<TimeStats>,
    pub stations: Section<StationStats>,
    pub durations: Section<DurationStats>,
    pub user_types: Section<Vec<Count>>,
    /// `None` for cities whose exports have no gender / birth year columns.
    pub demographics: Option<Demographics>,
}

impl StatsReport {
    /// Run the aggregators in order over `table`.
    pub fn build(selection: &FilterSelection, table: &TripTable) -> Self {
        let times = Section::run("time stats", || time_stats(table));
        let stations = Section::run("station stats", || station_stats(table));
        let durations = Section::run("duration stats", || duration_stats(table));
        let user_types = Section::run("user type stats", || Ok(user_type_stats(table)));
        let demographics = (selection.city.has_demographics() && table.has_demographics).then(|| {
            Demographics {
                genders: Section::run("gender stats", || gender_stats(table)),
                birth_years: Section::run("birth year stats", || birth_year_stats(table)),
            }
        });

        StatsReport {
            city: selection.city.to_string(),
            month: selection.month.label(),
            weekday: selection.weekday.label(),
            trips: table.len(),
            times,
            stations,
            durations,
            user_types,
            demographics,
        }
    }

    /// Human-readable rendering, one block per statistic group.
    pub fn render_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\nCalculating the most common times of travel...\n")?;
        match (&self.times.value, &self.times.error) {
            (Some(t), _) => {
                writeln!(out, "The most common...\n...month is {}.", t.month_name)?;
                writeln!(out, "...weekday is {}.", t.weekday)?;
                writeln!(out, "...hour is {} o'clock.", t.hour)?;
            }
            (None, err) => unavailable(out, err)?,
        }
        footer(out, self.times.elapsed)?;

        writeln!(out, "\nCalculating the most common stations and trip...\n")?;
        match (&self.stations.value, &self.stations.error) {
            (Some(s), _) => {
                writeln!(out, "The most common...\n...start station is {}.", s.start_station)?;
                writeln!(out, "...end station is {}.", s.end_station)?;
                writeln!(out, "...trip is from {}.", s.trip)?;
            }
            (None, err) => unavailable(out, err)?,
        }
        footer(out, self.stations.elapsed)?;

        writeln!(out, "\nCalculating total and mean trip duration...\n")?;
        match (&self.durations.value, &self.durations.error) {
            (Some(d), _) => {
                writeln!(out, "The total trip duration is {}.", d.total)?;
                writeln!(out, "The mean trip duration is {}.", d.mean)?;
            }
            (None, err) => unavailable(out, err)?,
        }
        footer(out, self.durations.elapsed)?;

        writeln!(out, "\nCalculating user stats...\n")?;
        match (&self.user_types.value, &self.user_types.error) {
            (Some(counts), _) => {
                writeln!(out, "The split between subscribers and customers is:\n")?;
                write_counts(out, counts)?;
            }
            (None, err) => unavailable(out, err)?,
        }
        footer(out, self.user_types.elapsed)?;

        match &self.demographics {
            Some(demo) => {
                match (&demo.genders.value, &demo.genders.error) {
                    (Some(counts), _) => {
                        writeln!(out, "\nThe split between females and males is:\n")?;
                        write_counts(out, counts)?;
                    }
                    (None, err) => unavailable(out, err)?,
                }
                match (&demo.birth_years.value, &demo.birth_years.error) {
                    (Some(b), _) => {
                        writeln!(out, "\nThe earliest year of birth is {}", b.earliest)?;
                        writeln!(out, "\nThe most recent year of birth is {}", b.most_recent)?;
                        writeln!(out, "\nThe most common year of birth is {}", b.most_common)?;
                    }
                    (None, err) => unavailable(out, err)?,
                }
                footer(out, demo.genders.elapsed + demo.birth_years.elapsed)?;
            }
            None => writeln!(
                out,
                "\nNo birth and gender statistics available for {}!",
                self.city
            )?,
        }
        Ok(())
    }
}

fn unavailable<W: Write>(out: &mut W, err: &Option<String>) -> io::Result<()> {
    writeln!(
        out,
        "Statistic unavailable: {}.",
        err.as_deref().unwrap_or("no data")
    )
}

fn footer<W: Write>(out: &mut W, elapsed: Duration) -> io::Result<()> {
    writeln!(out, "\nThis took {} seconds.", elapsed.as_secs_f64())?;
    writeln!(out, "{RULE}")
}

/// Two-column listing without borders: values, then right-aligned counts.
fn write_counts<W: Write>(out: &mut W, counts: &[Count]) -> io::Result<()> {
    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    for c in counts {
        table.add_row(vec![Cell::new(&c.value), Cell::new(c.count)]);
    }
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    writeln!(out, "{table}")
}

#[cfg(test)]
mod tests {
    use chrono::Month;

    use super::*;
    use crate::data::filter::Choice;
    use crate::data::model::tests::trip;
    use crate::data::model::{City, TripRecord};

    fn render(report: &StatsReport) -> String {
        let mut buf = Vec::new();
        report.render_text(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn has_count_line(text: &str, value: &str, count: usize) -> bool {
        let expected = [value.to_string(), count.to_string()];
        text.lines()
            .any(|l| l.split_whitespace().map(str::to_string).eq(expected.iter().cloned()))
    }

    fn selection(city: City) -> FilterSelection {
        FilterSelection {
            city,
            month: Choice::Only(Month::January),
            weekday: Choice::All,
        }
    }

    #[test]
    fn renders_every_group() {
        let records = vec![
            TripRecord {
                gender: Some("Female".into()),
                birth_year: Some(1990),
                ..trip(2017, 1, 2, 8, 60)
            },
            TripRecord {
                gender: Some("Male".into()),
                birth_year: Some(1980),
                ..trip(2017, 1, 9, 8, 120)
            },
            trip(2017, 1, 16, 8, 180),
        ];
        let table = TripTable::from_records(records, true);
        let report = StatsReport::build(&selection(City::Chicago), &table);
        let text = render(&report);

        assert!(text.contains("...month is January."));
        assert!(text.contains("...weekday is Monday."));
        assert!(text.contains("...hour is 8 o'clock."));
        assert!(text.contains("...trip is from A to B."));
        assert!(text.contains("The total trip duration is 0 hours, 06 minutes and 00 seconds."));
        assert!(text.contains("The mean trip duration is 0 hours, 02 minutes and 00 seconds."));
        assert!(has_count_line(&text, "Subscriber", 3));
        assert!(has_count_line(&text, "Female", 1));
        assert!(text.contains("The earliest year of birth is 1980"));
        assert!(text.contains("The most common year of birth is 1980"));
        assert_eq!(report.month, "January");
        assert_eq!(report.weekday, "All");
    }

    #[test]
    fn counts_are_listed_most_frequent_first() {
        let mut buf = Vec::new();
        let counts = vec![
            Count { value: "Subscriber".into(), count: 238_889 },
            Count { value: "Customer".into(), count: 61_110 },
        ];
        write_counts(&mut buf, &counts).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Subscriber") && lines[0].trim_end().ends_with("238889"));
        assert!(lines[1].contains("Customer") && lines[1].trim_end().ends_with("61110"));
        assert!(!text.contains('|') && !text.contains('+'));
    }

    #[test]
    fn washington_has_no_demographics() {
        let table = TripTable::from_records(vec![trip(2017, 1, 2, 8, 60)], false);
        let report = StatsReport::build(&selection(City::Washington), &table);
        assert!(report.demographics.is_none());
        assert!(render(&report).contains("No birth and gender statistics available for Washington!"));
    }

    #[test]
    fn empty_table_degrades_per_section() {
        let table = TripTable::from_records(Vec::new(), true);
        let report = StatsReport::build(&selection(City::NewYorkCity), &table);

        assert!(report.times.value.is_none());
        assert!(report.times.error.is_some());
        assert!(report.durations.error.is_some());
        assert_eq!(report.user_types.value.as_deref(), Some(&[][..]));
        let demo = report.demographics.as_ref().unwrap();
        assert_eq!(demo.genders.value.as_deref(), Some(&[][..]));
        assert!(demo.birth_years.error.is_some());
        assert!(render(&report).contains("Statistic unavailable: no data available to compute"));
    }

    #[test]
    fn serializes_without_timings() {
        let table = TripTable::from_records(vec![trip(2017, 1, 2, 8, 60)], false);
        let report = StatsReport::build(&selection(City::Washington), &table);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["city"], "Washington");
        assert_eq!(json["trips"], 1);
        assert_eq!(json["times"]["value"]["hour"], 8);
        assert_eq!(json["stations"]["value"]["trip"], "A to B");
        assert!(json["times"].get("elapsed").is_none());
        assert!(json["demographics"].is_null());
    }
}
