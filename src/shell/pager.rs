use std::io::{self, Write};

use comfy_table::{Cell, Table};

use crate::data::model::TripRow;

const BASE_HEADERS: [&str; 7] = [
    "",
    "Start Time",
    "End Time",
    "Trip Duration",
    "Start Station",
    "End Station",
    "User Type",
];
const DEMOGRAPHIC_HEADERS: [&str; 2] = ["Gender", "Birth Year"];

/// Source columns of one row. The derived month / weekday are left out.
fn cells(row: &TripRow, demographics: bool) -> Vec<String> {
    let r = &row.record;
    let mut cells = vec![
        r.index.map(|i| i.to_string()).unwrap_or_default(),
        r.start_time_text.clone(),
        r.end_time.clone(),
        r.trip_duration.to_string(),
        r.start_station.clone(),
        r.end_station.clone(),
        r.user_type.clone().unwrap_or_else(|| "NaN".to_string()),
    ];
    if demographics {
        cells.push(r.gender.clone().unwrap_or_else(|| "NaN".to_string()));
        cells.push(
            r.birth_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "NaN".to_string()),
        );
    }
    cells
}

/// Print a page of raw rows as a table with a header row.
pub fn write_page<W: Write>(out: &mut W, rows: &[TripRow], demographics: bool) -> io::Result<()> {
    let mut table = Table::new();

    let mut headers: Vec<Cell> = BASE_HEADERS.iter().map(Cell::new).collect();
    if demographics {
        headers.extend(DEMOGRAPHIC_HEADERS.iter().map(Cell::new));
    }
    table.set_header(headers);

    for row in rows {
        table.add_row(cells(row, demographics));
    }

    writeln!(out, "{table}")
}
