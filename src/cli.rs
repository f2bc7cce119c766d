//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::{Month, Weekday};
use clap::Parser;

use crate::data::filter::{Choice, FilterSelection};
use crate::data::model::City;
use crate::shell::validate::{validate_city, validate_month, validate_weekday};

/// Explore US bike-share trip data for Chicago, New York City and Washington.
///
/// Without `--city` an interactive session is started.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory containing chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Run a single non-interactive cycle for this city
    #[arg(long, value_parser = validate_city)]
    pub city: Option<City>,

    /// Month filter (january–june or 'all')
    #[arg(long, value_parser = validate_month, default_value = "all", requires = "city")]
    pub month: Choice<Month>,

    /// Weekday filter (monday–sunday or 'all')
    #[arg(long, value_parser = validate_weekday, default_value = "all", requires = "city")]
    pub day: Choice<Weekday>,

    /// Print the statistics as JSON
    #[arg(long, requires = "city")]
    pub json: bool,
}

impl Args {
    /// The selection for a non-interactive run, if `--city` was given.
    pub fn selection(&self) -> Option<FilterSelection> {
        self.city.map(|city| FilterSelection {
            city,
            month: self.month,
            weekday: self.day,
        })
    }
}
