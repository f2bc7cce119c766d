use std::path::Path;

use log::info;

use crate::data::filter::{self, FilterSelection};
use crate::data::loader::load_city;
use crate::data::model::{TripRow, TripTable};
use crate::error::StatsError;
use crate::stats::report::StatsReport;

/// Rows shown per page of raw data.
pub const PAGE_SIZE: usize = 5;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// One statistics cycle: the selection, its filtered table and the raw-data
/// page position. Dropped when the user restarts.
pub struct Session {
    pub selection: FilterSelection,

    /// Trips passing the selection's month / weekday filter.
    pub table: TripTable,

    /// Offset of the next raw-data page.
    page_offset: usize,
}

impl Session {
    /// Load the selected city and apply the month / weekday filter.
    pub fn load(data_dir: &Path, selection: FilterSelection) -> Result<Self, StatsError> {
        let loaded = load_city(data_dir, selection.city)?;
        let table = filter::apply(&loaded, &selection);
        info!(
            "{} of {} {} trips match month={} weekday={}",
            table.len(),
            loaded.len(),
            selection.city,
            selection.month.label(),
            selection.weekday.label()
        );
        Ok(Self::new(selection, table))
    }

    pub fn new(selection: FilterSelection, table: TripTable) -> Self {
        Self {
            selection,
            table,
            page_offset: 0,
        }
    }

    pub fn report(&self) -> StatsReport {
        StatsReport::build(&self.selection, &self.table)
    }

    /// Return the next [`PAGE_SIZE`] rows and advance. Empty once the table
    /// is exhausted.
    pub fn next_page(&mut self) -> &[TripRow] {
        let rows = self.table.rows();
        let start = self.page_offset.min(rows.len());
        let end = (start + PAGE_SIZE).min(rows.len());
        self.page_offset = start + PAGE_SIZE;
        &rows[start..end]
    }
}
