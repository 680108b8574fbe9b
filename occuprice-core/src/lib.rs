//! Core pricing engine for Occuprice
//!
//! Turns parking/traffic sensor readings into a dynamic price track.
//! Two pure stages, run strictly in order:
//!
//! 1. **Occupancy rates**: `occupancy / capacity` for every record
//! 2. **Price simulation**: `P[i+1] = max(P[i] + alpha * r̄, base_price)`
//!    driven by the mean rate `r̄`
//!
//! Nothing is cached between calls and nothing feeds back from price to
//! occupancy. Invalid input (zero capacity, empty dataset, non-finite numbers)
//! is reported as a [`PricingError`] instead of leaking `inf`/`NaN`.
//!
//! ```
//! use occuprice_core::{occupancy, Observation, PriceSimulator, SimulationConfig};
//!
//! let records = [
//!     Observation::new(1, "BHMBCCMKT01", 100, 50),
//!     Observation::new(2, "BHMBCCTHL01", 200, 100),
//! ];
//!
//! let rates = occupancy::occupancy_rates(&records)?;
//! let simulator = PriceSimulator::new(SimulationConfig::default());
//! let history = simulator.simulate(rates.mean()?, 3)?;
//!
//! assert_eq!(history.len(), 4);
//! # Ok::<(), occuprice_core::PricingError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod api;
#[cfg(feature = "std")]
pub mod config;
pub mod dataset;
pub mod errors;
pub mod observation;
pub mod occupancy;
pub mod simulator;

// Public API
pub use api::{handle, PricingRequest, PricingResponse};
#[cfg(feature = "std")]
pub use config::ConfigError;
pub use dataset::Dataset;
pub use errors::{ErrorKind, PricingError, PricingResult};
pub use observation::{Observation, TrafficCondition, VehicleCategory};
pub use occupancy::{OccupancyRates, OccupancySummary, RecordRate};
pub use simulator::{PriceHistory, PriceSimulator, SimulationConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
