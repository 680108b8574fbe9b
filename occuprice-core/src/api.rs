//! Request/response boundary for host programs
//!
//! A dashboard or reporting layer hands over a dataset and parameters and gets
//! back the two things it renders: the per-record rate column and the price
//! track. The whole pipeline runs inside [`handle`]:
//!
//! ```text
//! PricingRequest
//!   ├── dataset.validate()          ids positive and unique, capacity > 0
//!   ├── occupancy_rates(dataset)    one rate per record
//!   ├── rates.mean()                aggregate r̄
//!   └── simulate(r̄, periods)        N + 1 price points
//! PricingResponse
//! ```
//!
//! Any failure aborts the request; no partial response is produced.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dataset::Dataset,
    errors::PricingResult,
    occupancy::{self, OccupancyRates},
    simulator::{periods_from_signed, PriceHistory, PriceSimulator, SimulationConfig},
};

/// Input to one pricing run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PricingRequest {
    /// Recurrence parameters
    #[cfg_attr(feature = "serde", serde(default))]
    pub config: SimulationConfig,

    /// Readings to price
    pub dataset: Dataset,

    /// Number of periods to simulate, signed so external callers can be checked
    pub periods: i64,
}

/// Output of one pricing run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PricingResponse {
    /// Per-record occupancy rates in dataset order
    pub rates: OccupancyRates,

    /// Mean of `rates`, the value that drove the simulation
    pub aggregate_rate: f64,

    /// Seed price followed by one price per period
    pub history: PriceHistory,
}

impl PricingRequest {
    /// Bundle parameters, dataset and period count
    pub fn new(config: SimulationConfig, dataset: Dataset, periods: i64) -> Self {
        Self { config, dataset, periods }
    }
}

/// Run the full pipeline for a request
pub fn handle(request: &PricingRequest) -> PricingResult<PricingResponse> {
    let result = run(request);

    if let Err(ref _error) = result {
        log_warn!("Pricing request rejected: {}", _error);
    }

    result
}

fn run(request: &PricingRequest) -> PricingResult<PricingResponse> {
    // Cheap argument checks first, then the dataset scan
    let periods = periods_from_signed(request.periods)?;
    request.config.validate()?;
    request.dataset.validate()?;

    let rates = occupancy::occupancy_rates(&request.dataset)?;
    let aggregate_rate = rates.mean()?;
    let history = PriceSimulator::new(request.config).simulate(aggregate_rate, periods)?;

    Ok(PricingResponse {
        rates,
        aggregate_rate,
        history,
    })
}

#[cfg(feature = "std")]
pub use self::json::{handle_json, ApiError};

#[cfg(feature = "std")]
mod json {
    use thiserror_no_std::Error;

    use super::{handle, PricingRequest};
    use crate::errors::PricingError;

    /// Errors raised at the serialized boundary
    #[derive(Error, Debug)]
    pub enum ApiError {
        /// Request body is not a valid pricing request
        #[error("Malformed request: {0}")]
        Malformed(#[from] serde_json::Error),

        /// Request was well formed but rejected by the engine
        #[error("Rejected request: {0}")]
        Rejected(#[from] PricingError),
    }

    /// Run a JSON-encoded request and return the JSON-encoded response
    pub fn handle_json(request: &str) -> Result<String, ApiError> {
        let request: PricingRequest = serde_json::from_str(request)?;
        let response = handle(&request)?;
        Ok(serde_json::to_string(&response)?)
    }
}
