//! # Macrolab Analytics
//!
//! Descriptive statistics over economic time series: linear trends, average
//! growth, correlation between indicators (pairwise or as a full matrix) and an empirical Okun's law fit.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It knows nothing about where
//!   the series come from (CSV upload, bundled sample or HTTP body).
//! - **Stateless Calculation:** The `AnalyticsEngine` is a stateless calculator.
//!   It takes plain decimal slices and returns a report struct.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: The main struct that contains the calculation logic.
//! - `report`: The serializable report structs returned by each calculation.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use report::{
    Correlation, CorrelationDirection, CorrelationMatrix, CorrelationStrength, OkunEstimate, Regression, Summary,
    TrendReport,
};
