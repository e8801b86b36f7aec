/// Data layer: loading, filtering, aggregation and export.
///
/// Architecture:
/// ```text
///   경제활동_통합.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV, drop '계' rows, derive rate → Dataset
///   └──────────┘
///        │  (memoized per path in `registry`)
///        ▼
///   ┌──────────┐
///   │  filter   │  Selection (years × regions) → working subset
///   └──────────┘
///        │
///        ├──────────────────┐
///        ▼                  ▼
///   ┌───────────┐     ┌──────────┐
///   │ aggregate  │     │  export   │  subset → BOM-prefixed CSV bytes
///   └───────────┘     └──────────┘
///        │
///        ▼
///     Summary  (metrics + pivots, assembled by `pipeline`)
/// ```

pub mod aggregate;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod registry;
