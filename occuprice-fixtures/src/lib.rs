//! Seeded sample datasets for demos, benchmarks and tests
//!
//! ## Overview
//!
//! Dashboards and tests need plausible sensor data without a live feed. This
//! crate produces it, deliberately kept apart from the pricing engine: the
//! engine never draws random numbers, and nothing here computes prices.
//!
//! ## Determinism
//!
//! Every dataset comes from an explicitly seeded generator. The same
//! [`SampleConfig`] always yields the same records, so a failing test or a
//! surprising chart can be reproduced from the seed alone.
//!
//! ## Record Model
//!
//! For each record `i` in `1..=records`:
//! - `site_code` picked uniformly from `sites`
//! - `capacity` drawn from `min_capacity..=max_capacity`
//! - `occupancy` drawn from `0..=capacity`, or pushed above capacity with
//!   probability `over_capacity_probability` to mimic a miscounting sensor
//! - vehicle category and traffic condition drawn uniformly
//!
//! ```rust
//! use occuprice_fixtures::{SampleConfig, SampleGenerator};
//!
//! let dataset = SampleGenerator::new(SampleConfig::default())?.generate();
//! assert_eq!(dataset.len(), 100);
//! assert!(dataset.validate().is_ok());
//! # Ok::<(), occuprice_fixtures::FixtureError>(())
//! ```

use occuprice_core::{Dataset, Observation, TrafficCondition, VehicleCategory};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use thiserror::Error;

/// Site codes used when no list is supplied
pub const DEFAULT_SITES: [&str; 8] = [
    "BHMBCCMKT01",
    "BHMBCCPST01",
    "BHMBCCTHL01",
    "BHMEURBRD01",
    "BHMMBMMBX01",
    "BHMNCPHST01",
    "BHMNCPNST01",
    "Broad Street",
];

/// Errors raised for unusable generator settings
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FixtureError {
    /// Records with zero capacity would be rejected by the engine
    #[error("Minimum capacity must be at least 1")]
    ZeroCapacity,

    /// Capacity bounds are inverted
    #[error("Capacity range [{min}, {max}] is empty")]
    EmptyCapacityRange {
        /// Configured lower bound
        min: u32,
        /// Configured upper bound
        max: u32,
    },

    /// No site codes to draw from
    #[error("At least one site code is required")]
    NoSites,

    /// Probability outside [0, 1]
    #[error("Over-capacity probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    /// More records than there are `u32` identifiers
    #[error("{records} records exceed the identifier range")]
    TooManyRecords {
        /// Configured record count
        records: usize,
    },
}

/// Settings for one generated dataset
#[derive(Debug, Clone)]
pub struct SampleConfig {
    /// Number of records to generate
    pub records: usize,
    /// Random seed
    pub seed: u64,
    /// Smallest site capacity
    pub min_capacity: u32,
    /// Largest site capacity
    pub max_capacity: u32,
    /// Site codes to draw from
    pub sites: Vec<String>,
    /// Chance a record reports more vehicles than slots
    pub over_capacity_probability: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            records: 100,
            seed: 42,
            min_capacity: 50,
            max_capacity: 500,
            sites: DEFAULT_SITES.iter().map(|s| s.to_string()).collect(),
            over_capacity_probability: 0.0,
        }
    }
}

impl SampleConfig {
    /// Small dataset for unit tests
    pub fn small(seed: u64) -> Self {
        Self {
            records: 10,
            seed,
            ..Self::default()
        }
    }

    /// Dataset with a few miscounting sensors mixed in
    pub fn noisy(seed: u64) -> Self {
        Self {
            seed,
            over_capacity_probability: 0.05,
            ..Self::default()
        }
    }

    /// Check the settings can produce a dataset the engine accepts
    pub fn validate(&self) -> Result<(), FixtureError> {
        if u32::try_from(self.records).is_err() {
            return Err(FixtureError::TooManyRecords { records: self.records });
        }
        if self.min_capacity == 0 {
            return Err(FixtureError::ZeroCapacity);
        }
        if self.min_capacity > self.max_capacity {
            return Err(FixtureError::EmptyCapacityRange {
                min: self.min_capacity,
                max: self.max_capacity,
            });
        }
        if self.sites.is_empty() {
            return Err(FixtureError::NoSites);
        }
        if !(0.0..=1.0).contains(&self.over_capacity_probability) {
            return Err(FixtureError::InvalidProbability(self.over_capacity_probability));
        }
        Ok(())
    }
}

/// Seeded dataset generator
pub struct SampleGenerator {
    config: SampleConfig,
    rng: StdRng,
}

impl SampleGenerator {
    /// Create a generator, rejecting unusable settings
    pub fn new(config: SampleConfig) -> Result<Self, FixtureError> {
        config.validate()?;
        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self { config, rng })
    }

    /// Settings this generator was built with
    pub fn config(&self) -> &SampleConfig {
        &self.config
    }

    /// Generate a full dataset
    ///
    /// Successive calls continue the same random stream, so they return
    /// different datasets. Build a new generator to start over.
    pub fn generate(&mut self) -> Dataset {
        // Bounded by `SampleConfig::validate`
        let records = u32::try_from(self.config.records).unwrap_or(u32::MAX);
        let dataset: Dataset = (1..=records)
            .map(|id| self.observation(id))
            .collect();

        log::debug!(
            "Generated {} sample records (seed={})",
            dataset.len(), self.config.seed
        );

        dataset
    }

    fn observation(&mut self, id: u32) -> Observation {
        let site = self
            .config
            .sites
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default();

        let capacity = self
            .rng
            .gen_range(self.config.min_capacity..=self.config.max_capacity);

        let occupancy = if self.rng.gen_bool(self.config.over_capacity_probability) {
            // Miscount by up to a fifth of the site, at least one vehicle
            capacity.saturating_add(self.rng.gen_range(1..=(capacity / 5).max(1)))
        } else {
            self.rng.gen_range(0..=capacity)
        };

        let vehicle = *VehicleCategory::ALL
            .choose(&mut self.rng)
            .unwrap_or(&VehicleCategory::Car);
        let traffic = *TrafficCondition::ALL
            .choose(&mut self.rng)
            .unwrap_or(&TrafficCondition::Low);

        Observation::new(id, site, capacity, occupancy)
            .with_vehicle(vehicle)
            .with_traffic(traffic)
    }
}

/// Generate a dataset from settings in one call
pub fn sample_dataset(config: SampleConfig) -> Result<Dataset, FixtureError> {
    Ok(SampleGenerator::new(config)?.generate())
}
