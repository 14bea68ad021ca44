//! Turn `vmstat` / `jstat` monitoring logs into PDF chart reports.
//!
//! The pipeline for one input file:
//!
//! ```text
//!  log file ─► data::loader ─► report::assemble ─► render::write_report ─► PDF (+ PNG)
//!                                   │
//!                                   ├─ data::category     (select / capacity / counter / label)
//!                                   ├─ data::extract      (string column → Vec<f64>)
//!                                   ├─ processing::series (running average, first difference)
//!                                   └─ processing::statistics ─► stats file
//! ```

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod processing;
pub mod render;
pub mod report;
