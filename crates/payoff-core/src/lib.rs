pub mod amortization;
pub mod error;
pub mod types;

#[cfg(feature = "scenarios")]
pub mod scenarios;

#[cfg(feature = "planning")]
pub mod planning;

pub use error::PayoffError;
pub use types::*;

/// Standard result type for the envelope-producing payoff analyses
pub type PayoffResult<T> = Result<T, PayoffError>;
