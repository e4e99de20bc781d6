/// Data layer: core types, loading, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset  │  Vec<LaunchRecord>, site catalog, payload bounds
///   └───────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  site share / outcome share / payload points
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod loader;
pub mod model;
