/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate file → RentalDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ RentalDataset  │  Vec<RentalRecord>, date span
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply date range → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ aggregate   │  group-and-sum → summary tables
///   └────────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
