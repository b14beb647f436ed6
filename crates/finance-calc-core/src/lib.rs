pub mod error;
pub mod forms;
pub mod presentation;
pub mod time_value;
pub mod types;

#[cfg(feature = "savings")]
pub mod savings;

#[cfg(feature = "lending")]
pub mod lending;

#[cfg(feature = "retirement")]
pub mod retirement;

pub use error::FinanceError;
pub use types::*;

/// Standard result type for all finance-calc operations
pub type FinanceResult<T> = Result<T, FinanceError>;
