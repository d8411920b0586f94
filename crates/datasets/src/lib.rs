//! # Macrolab Datasets
//!
//! Tabular economic data for the analytics layer: CSV loading and the bundled
//! textbook samples.
//!
//! ## Public API
//!
//! - `Dataset` / `Column`: named numeric columns with optional cells.
//! - `load_csv` / `from_reader`: build a `Dataset` from CSV input.
//! - `samples`: the canned datasets used by the worked examples.

pub mod csv_loader;
pub mod dataset;
pub mod error;
pub mod samples;

pub use csv_loader::{from_reader, load_csv};
pub use dataset::{Column, Dataset};
pub use error::DatasetError;
