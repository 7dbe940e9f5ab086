/// Data layer: core types, loading, filtering and derived views.
///
/// Architecture:
/// ```text
///  bundled penguins.csv / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → PenguinDataset (immutable, Arc-shared)
///   └──────────┘
///        │
///        ├──────────────► table      full dataset, click-to-sort
///        ▼
///   ┌──────────┐
///   │  filter   │  species selection → FilteredView (memoised)
///   └──────────┘
///        │
///        ├──────────────► histogram  per-species bins for both histograms
///        └──────────────► export     filtered rows → CSV
/// ```

pub mod export;
pub mod filter;
pub mod histogram;
pub mod loader;
pub mod model;
pub mod table;
