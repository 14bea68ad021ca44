/// Data layer: reading logs, classifying columns, extracting samples.
///
/// Architecture:
/// ```text
///  vmstat / jstat log
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  whitespace CSV → RawTable (header + string rows)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ category  │  allow-lists + labels → selected / capacity / counter
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ extract   │  string column → Vec<f64>, rejects text columns
///   └──────────┘
/// ```

pub mod category;
pub mod extract;
pub mod loader;
pub mod model;
