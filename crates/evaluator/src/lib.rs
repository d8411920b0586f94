//! # Macrolab Formula Evaluator
//!
//! This crate maps an economic concept and a set of named numeric inputs to a
//! set of named numeric outputs. It is the computational core of the system.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of the
//!   CLI, the web server or where its inputs come from.
//! - **Stateless Calculation:** `FormulaEvaluator` holds no state. Every call to
//!   `evaluate` reads a caller-owned `FormulaInput` and builds a fresh
//!   `FormulaResult`, so evaluations never depend on one another.
//! - **Typed Core, Named Edge:** Each formula is a plain typed function in its own
//!   module (`gdp`, `prices`, `labor`, `relations`, `simulation`). The engine only
//!   translates named inputs into those calls.
//!
//! ## Public API
//!
//! - `FormulaEvaluator`: dispatches a `Concept` to its formula.
//! - `DisplayClamps`: non-canonical post-processing for presentation layers.
//! - `POLICY_TABLE`: the constant policy-effect table.

// Declare the modules that constitute this crate.
pub mod display;
pub mod engine;
pub mod gdp;
pub mod labor;
mod math;
pub mod policy;
pub mod prices;
pub mod relations;
pub mod simulation;

// Re-export the key components to create a clean, public-facing API.
pub use core_types::{Concept, FormulaError, FormulaInput, FormulaResult};
pub use display::DisplayClamps;
pub use engine::FormulaEvaluator;
pub use math::MAX_PERIODS;
pub use policy::{POLICY_TABLE, PolicyEffect};
