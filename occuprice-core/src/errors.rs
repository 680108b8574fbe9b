//! Error Types for Rejected Pricing Inputs
//!
//! ## Design Philosophy
//!
//! The engine is a pure in-memory computation, so nothing it reports can be
//! fixed by trying again. Every error is an input problem and terminal for the
//! invocation that produced it:
//!
//! 1. **Fail Fast**: The first offending record or parameter stops the run.
//!    No partial rate column or price history is ever returned.
//!
//! 2. **Name the Culprit**: Each variant carries the record id, field name or
//!    value that was rejected, so callers can report it without re-scanning.
//!
//! 3. **Copy Semantics**: Variants hold only scalars and `&'static str`, which
//!    keeps the enum small and `Copy` on `no_std` targets.
//!
//! ## Error Categories
//!
//! ### Dataset Problems
//! - `ZeroCapacity`: A record has no slots, so its rate is undefined
//! - `DuplicateId`: Two records share an identifier
//! - `ZeroId`: A record uses the reserved identifier 0
//! - `EmptyDataset`: A mean was requested over zero records
//!
//! ### Numeric Problems
//! - `NonFiniteRate`: The aggregate rate is NaN or infinite
//! - `NonFiniteParameter`: `alpha` or `base_price` is NaN or infinite
//! - `NegativePeriods`: A signed period count below zero
//! - `TooManyPeriods`: More periods than `MAX_PERIODS`
//! - `PriceOverflow`: A step pushed the price past `f64::MAX`
//! - `InvalidHistory`: A deserialized price track breaks its own floor
//!
//! ## Handling
//!
//! ```rust
//! use occuprice_core::{occupancy, Observation, PricingError};
//!
//! let records = [Observation::new(7, "BHMBCCMKT01", 0, 5)];
//! match occupancy::occupancy_rates(&records) {
//!     Ok(_) => {}
//!     Err(PricingError::ZeroCapacity { record_id }) => {
//!         assert_eq!(record_id, 7);
//!     }
//!     Err(_) => {}
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for pricing operations
pub type PricingResult<T> = Result<T, PricingError>;

/// Coarse classification of a [`PricingError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied data or parameters the engine cannot price
    InvalidInput,
}

/// Pricing errors - all of them reject the caller's input
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PricingError {
    /// Record capacity is zero, the occupancy rate would divide by zero
    #[error("Record {record_id} has zero capacity")]
    ZeroCapacity {
        /// Identifier of the offending record
        record_id: u32,
    },

    /// Two records in the same dataset share an identifier
    #[error("Duplicate record id {id}")]
    DuplicateId {
        /// The repeated identifier
        id: u32,
    },

    /// Identifiers are positive, 0 is reserved
    #[error("Record id 0 is not a valid identifier")]
    ZeroId,

    /// A mean was requested over an empty dataset
    #[error("Dataset is empty, aggregate rate is undefined")]
    EmptyDataset,

    /// Aggregate occupancy rate is NaN or infinite
    #[error("Aggregate rate {value} is not a finite number")]
    NonFiniteRate {
        /// The rejected rate
        value: f64,
    },

    /// A simulation parameter is NaN or infinite
    #[error("Parameter {field} = {value} is not a finite number")]
    NonFiniteParameter {
        /// Name of the configuration field
        field: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Period count below zero
    #[error("Period count {periods} is negative")]
    NegativePeriods {
        /// The rejected count
        periods: i64,
    },

    /// Period count above the supported maximum
    #[error("Period count {periods} exceeds maximum {max}")]
    TooManyPeriods {
        /// The rejected count
        periods: u64,
        /// Largest accepted count
        max: u64,
    },

    /// Finite parameters produced a price that no longer fits in an `f64`
    #[error("Price overflowed at period {period}")]
    PriceOverflow {
        /// Period whose step overflowed, 1-based
        period: u64,
    },

    /// Serialized price track is not a valid history
    #[error("Invalid price history: {reason}")]
    InvalidHistory {
        /// Which invariant was broken
        reason: &'static str,
    },
}

impl PricingError {
    /// Every pricing error is an input error
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }

    /// Pure computation, retrying with the same input fails the same way
    pub const fn is_retryable(&self) -> bool {
        false
    }

    /// Name of the field or concept that was rejected
    pub const fn field(&self) -> &'static str {
        match self {
            Self::ZeroCapacity { .. } => "capacity",
            Self::DuplicateId { .. } | Self::ZeroId => "id",
            Self::EmptyDataset => "dataset",
            Self::NonFiniteRate { .. } => "aggregate_rate",
            Self::NonFiniteParameter { field, .. } => *field,
            Self::NegativePeriods { .. } | Self::TooManyPeriods { .. } => "periods",
            Self::PriceOverflow { .. } => "price",
            Self::InvalidHistory { .. } => "history",
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PricingError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ZeroCapacity { record_id } =>
                defmt::write!(fmt, "Record {} has zero capacity", record_id),
            Self::DuplicateId { id } =>
                defmt::write!(fmt, "Duplicate record id {}", id),
            Self::ZeroId =>
                defmt::write!(fmt, "Record id 0"),
            Self::EmptyDataset =>
                defmt::write!(fmt, "Empty dataset"),
            Self::NonFiniteRate { value } =>
                defmt::write!(fmt, "Non-finite rate {}", value),
            Self::NonFiniteParameter { field, value } =>
                defmt::write!(fmt, "Non-finite {} = {}", field, value),
            Self::NegativePeriods { periods } =>
                defmt::write!(fmt, "Negative periods {}", periods),
            Self::TooManyPeriods { periods, max } =>
                defmt::write!(fmt, "Periods {} exceed {}", periods, max),
            Self::PriceOverflow { period } =>
                defmt::write!(fmt, "Price overflow at period {}", period),
            Self::InvalidHistory { reason } =>
                defmt::write!(fmt, "Invalid history: {}", reason),
        }
    }
}
