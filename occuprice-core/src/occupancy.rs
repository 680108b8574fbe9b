//! Occupancy Rate Calculator
//!
//! ## Overview
//!
//! Derives `rate = occupancy / capacity` for each record and reduces the
//! column to the single aggregate the price simulator runs on:
//!
//! ```text
//! records → [rate per record] → mean rate r̄ → simulator
//! ```
//!
//! ## Division Guard
//!
//! A record with zero capacity has no meaningful rate. Instead of letting the
//! float division produce `inf` or `NaN` and leak into the price track, the
//! calculator stops with [`PricingError::ZeroCapacity`] naming the record.
//! Nothing is returned for the records that came before it.
//!
//! ## Over-Full Records
//!
//! `occupancy > capacity` is accepted and gives a rate above 1.0. It is
//! logged as a warning because it usually points at a miscounting sensor.

use alloc::vec::Vec;
use core::slice;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    errors::{PricingError, PricingResult},
    observation::Observation,
};

/// Occupancy rate attached to the record it was derived from
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecordRate {
    /// Identifier of the source record
    pub record_id: u32,
    /// `occupancy / capacity`
    pub rate: f64,
}

/// Rate column for a dataset, in record order
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct OccupancyRates {
    rates: Vec<RecordRate>,
}

/// Descriptive statistics over a rate column
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OccupancySummary {
    /// Number of records
    pub count: usize,
    /// Arithmetic mean of the rates
    pub mean: f64,
    /// Lowest rate
    pub min: f64,
    /// Highest rate
    pub max: f64,
    /// Records whose rate exceeds 1.0
    pub over_capacity: usize,
}

/// Derive the occupancy rate of a single record
pub fn occupancy_rate(record: &Observation) -> PricingResult<f64> {
    if record.capacity == 0 {
        return Err(PricingError::ZeroCapacity { record_id: record.id });
    }

    if record.is_over_capacity() {
        log_warn!(
            "Record {} at {}: occupancy {} exceeds capacity {}",
            record.id, record.site_code, record.occupancy, record.capacity
        );
    }

    Ok(f64::from(record.occupancy) / f64::from(record.capacity))
}

/// Derive one rate per record, preserving order
///
/// Fails on the first record with zero capacity.
pub fn occupancy_rates<'a, I>(records: I) -> PricingResult<OccupancyRates>
where
    I: IntoIterator<Item = &'a Observation>,
{
    let rates = records
        .into_iter()
        .map(|record| {
            occupancy_rate(record).map(|rate| RecordRate { record_id: record.id, rate })
        })
        .collect::<PricingResult<Vec<_>>>()?;

    log_debug!("Derived {} occupancy rates", rates.len());

    Ok(OccupancyRates { rates })
}

impl OccupancyRates {
    /// Number of rates
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// No rates at all
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Rates with their record ids, in record order
    pub fn as_slice(&self) -> &[RecordRate] {
        &self.rates
    }

    /// Iterate rates in record order
    pub fn iter(&self) -> slice::Iter<'_, RecordRate> {
        self.rates.iter()
    }

    /// Bare rate values in record order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.rates.iter().map(|r| r.rate)
    }

    /// Rate for a given record id
    pub fn rate_for(&self, record_id: u32) -> Option<f64> {
        self.rates
            .iter()
            .find(|r| r.record_id == record_id)
            .map(|r| r.rate)
    }

    /// Aggregate rate `r̄` driving the price recurrence
    pub fn mean(&self) -> PricingResult<f64> {
        if self.rates.is_empty() {
            return Err(PricingError::EmptyDataset);
        }

        let sum: f64 = self.values().sum();
        let mean = sum / self.rates.len() as f64;

        if !mean.is_finite() {
            return Err(PricingError::NonFiniteRate { value: mean });
        }
        Ok(mean)
    }

    /// Count, mean and extremes of the column
    pub fn summary(&self) -> PricingResult<OccupancySummary> {
        let mean = self.mean()?;

        let (min, max) = self
            .values()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), rate| {
                (lo.min(rate), hi.max(rate))
            });

        Ok(OccupancySummary {
            count: self.rates.len(),
            mean,
            min,
            max,
            over_capacity: self.values().filter(|rate| *rate > 1.0).count(),
        })
    }
}

impl<'a> IntoIterator for &'a OccupancyRates {
    type Item = &'a RecordRate;
    type IntoIter = slice::Iter<'a, RecordRate>;

    fn into_iter(self) -> Self::IntoIter {
        self.rates.iter()
    }
}
