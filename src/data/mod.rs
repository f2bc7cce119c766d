/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  chicago.csv / new_york_city.csv / washington.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → TripTable (+ month, weekday)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  month / weekday predicate → TripTable
///   └──────────┘
///        │
///        ▼
///     stats::*   read-only aggregations
/// ```

pub mod filter;
pub mod loader;
pub mod model;
