pub mod enums;
pub mod error;
pub mod input;
pub mod result;

// Re-export the core types to provide a clean public API.
pub use enums::{BusinessCycle, Classification, Concept, Direction, InflationBand, Outlook, PolicyKind};
pub use error::FormulaError;
pub use input::FormulaInput;
pub use result::FormulaResult;
