//! Price Simulator
//!
//! ## Overview
//!
//! Turns an aggregate occupancy rate into a price track by iterating
//!
//! ```text
//! P[0]   = base_price
//! P[i+1] = max(P[i] + alpha * r̄, base_price)      for i in 0..N
//! ```
//!
//! The result always holds `N + 1` points, the seed included.
//!
//! ## The Floor
//!
//! `base_price` is both the starting value and a hard minimum. The clamp is
//! applied after every step, not only at the end, so no intermediate point can
//! dip below it even when `alpha * r̄` is negative. With `alpha >= 0` and a
//! non-negative rate the track is non-decreasing; with negative `alpha` it is
//! non-increasing and pinned to the floor.
//!
//! ## Single Global Track
//!
//! [`PriceSimulator::simulate`] uses one aggregate for every period, so each
//! step adds the same increment. [`PriceSimulator::simulate_series`] takes one
//! aggregate per period for callers that recompute occupancy as they go.
//!
//! ## Example
//!
//! ```rust
//! use occuprice_core::{PriceSimulator, SimulationConfig};
//!
//! let simulator = PriceSimulator::new(SimulationConfig::default());
//! let history = simulator.simulate(0.5, 3).unwrap();
//!
//! assert_eq!(history.len(), 4);
//! assert!(history.iter().all(|p| *p >= 10.0));
//! ```

use alloc::vec::Vec;
use core::slice;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{PricingError, PricingResult};

/// Sensitivity applied when no configuration is supplied
pub const DEFAULT_ALPHA: f64 = 0.1;

/// Floor and seed price applied when no configuration is supplied
pub const DEFAULT_BASE_PRICE: f64 = 10.0;

/// Parameters of the price recurrence, fixed for the duration of a run
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Price change per unit of aggregate occupancy rate per period
    pub alpha: f64,

    /// Starting price and minimum price
    pub base_price: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            base_price: DEFAULT_BASE_PRICE,
        }
    }
}

impl SimulationConfig {
    /// Create a validated configuration
    ///
    /// Any finite `alpha` is accepted, negative values included.
    pub fn new(alpha: f64, base_price: f64) -> PricingResult<Self> {
        let config = Self { alpha, base_price };
        config.validate()?;
        Ok(config)
    }

    /// Slow-moving prices for sites where demand swings are noisy
    pub fn conservative() -> Self {
        Self {
            alpha: 0.05,
            base_price: DEFAULT_BASE_PRICE,
        }
    }

    /// Fast-moving prices for congested city-centre sites
    pub fn aggressive() -> Self {
        Self {
            alpha: 0.5,
            base_price: DEFAULT_BASE_PRICE,
        }
    }

    /// Reject NaN and infinite parameters
    pub fn validate(&self) -> PricingResult<()> {
        check_finite("alpha", self.alpha)?;
        check_finite("base_price", self.base_price)?;
        Ok(())
    }
}

fn check_finite(field: &'static str, value: f64) -> PricingResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::NonFiniteParameter { field, value })
    }
}

fn check_rate(value: f64) -> PricingResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::NonFiniteRate { value })
    }
}

/// Largest period count a single run accepts
///
/// Bounds the history allocation to a few megabytes.
pub const MAX_PERIODS: usize = 1_000_000;

fn check_periods(periods: usize) -> PricingResult<()> {
    if periods > MAX_PERIODS {
        return Err(PricingError::TooManyPeriods {
            periods: periods as u64,
            max: MAX_PERIODS as u64,
        });
    }
    Ok(())
}

/// Convert a signed period count from an external caller
pub fn periods_from_signed(periods: i64) -> PricingResult<usize> {
    if periods < 0 {
        return Err(PricingError::NegativePeriods { periods });
    }
    let periods = usize::try_from(periods).map_err(|_| PricingError::TooManyPeriods {
        periods: periods as u64,
        max: MAX_PERIODS as u64,
    })?;
    check_periods(periods)?;
    Ok(periods)
}

/// Ordered price points produced by one simulation run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPriceHistory"))]
pub struct PriceHistory {
    /// Seed followed by one point per period
    points: Vec<f64>,

    /// Floor the points were clamped to
    floor: f64,
}

/// Unchecked wire form of [`PriceHistory`]
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawPriceHistory {
    points: Vec<f64>,
    floor: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPriceHistory> for PriceHistory {
    type Error = PricingError;

    fn try_from(raw: RawPriceHistory) -> PricingResult<Self> {
        Self::from_parts(raw.points, raw.floor)
    }
}

impl PriceHistory {
    /// Rebuild a history from stored points, checking its invariants
    ///
    /// The seed must equal the floor and every point must be finite and at or
    /// above it.
    pub fn from_parts(points: Vec<f64>, floor: f64) -> PricingResult<Self> {
        let invalid = |reason: &'static str| -> PricingResult<Self> {
            Err(PricingError::InvalidHistory { reason })
        };

        if !floor.is_finite() {
            return invalid("floor is not finite");
        }
        match points.first() {
            None => return invalid("missing seed point"),
            Some(seed) if *seed != floor => return invalid("seed differs from floor"),
            Some(_) => {}
        }
        if points.len() > MAX_PERIODS + 1 {
            return invalid("too many points");
        }
        if points.iter().any(|p| !p.is_finite() || *p < floor) {
            return invalid("point below floor or not finite");
        }

        Ok(Self { points, floor })
    }

    /// All points, seed first
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Iterate points in period order
    pub fn iter(&self) -> slice::Iter<'_, f64> {
        self.points.iter()
    }

    /// Number of points, `periods() + 1`
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Never true, the seed is always present
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of simulated periods
    pub fn periods(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Starting price
    pub fn seed(&self) -> f64 {
        self.floor
    }

    /// Minimum price, equal to the configured `base_price`
    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Price after the last period
    pub fn final_price(&self) -> f64 {
        self.points.last().copied().unwrap_or(self.floor)
    }

    /// No point is lower than the one before it
    pub fn is_non_decreasing(&self) -> bool {
        self.points.windows(2).all(|pair| pair[1] >= pair[0])
    }

    /// Take the points, seed first
    pub fn into_points(self) -> Vec<f64> {
        self.points
    }
}

impl<'a> IntoIterator for &'a PriceHistory {
    type Item = &'a f64;
    type IntoIter = slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Runs the floor-clamped price recurrence
///
/// Holds no state between calls; each run returns a fresh history.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceSimulator {
    config: SimulationConfig,
}

impl PriceSimulator {
    /// Create a simulator; parameters are checked on every run
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Parameters this simulator runs with
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// One period of the recurrence
    pub fn step(&self, price: f64, aggregate_rate: f64) -> f64 {
        (price + self.config.alpha * aggregate_rate).max(self.config.base_price)
    }

    /// Iterate the recurrence for `periods` steps with a single aggregate rate
    ///
    /// `periods` may not exceed [`MAX_PERIODS`].
    pub fn simulate(&self, aggregate_rate: f64, periods: usize) -> PricingResult<PriceHistory> {
        self.config.validate()?;
        check_rate(aggregate_rate)?;
        check_periods(periods)?;

        log_debug!(
            "Simulating {} periods: alpha={}, base_price={}, rate={}",
            periods, self.config.alpha, self.config.base_price, aggregate_rate
        );

        self.run(core::iter::repeat(aggregate_rate).take(periods), periods)
    }

    /// Iterate the recurrence with a fresh aggregate for every period
    ///
    /// `rates.len()` is the period count. All rates are checked before the
    /// first step runs.
    pub fn simulate_series(&self, rates: &[f64]) -> PricingResult<PriceHistory> {
        self.config.validate()?;
        check_periods(rates.len())?;
        for rate in rates {
            check_rate(*rate)?;
        }

        log_debug!(
            "Simulating {} periods with per-period rates: alpha={}, base_price={}",
            rates.len(), self.config.alpha, self.config.base_price
        );

        self.run(rates.iter().copied(), rates.len())
    }

    fn run<I>(&self, rates: I, periods: usize) -> PricingResult<PriceHistory>
    where
        I: Iterator<Item = f64>,
    {
        let floor = self.config.base_price;
        let mut points = Vec::with_capacity(periods + 1);
        let mut price = floor;
        points.push(price);

        let mut clamped = false;
        for (period, rate) in rates.enumerate() {
            let next = self.step(price, rate);
            if !next.is_finite() {
                return Err(PricingError::PriceOverflow { period: period as u64 + 1 });
            }
            if !clamped && price + self.config.alpha * rate < floor {
                clamped = true;
                log_warn!(
                    "Price clamped to floor {} at period {} (rate={})",
                    floor, period + 1, rate
                );
            }
            price = next;
            points.push(price);
        }

        Ok(PriceHistory { points, floor })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const EPSILON: f64 = 1e-9;

    fn assert_points(history: &PriceHistory, expected: &[f64]) {
        assert_eq!(history.len(), expected.len());
        for (actual, expected) in history.iter().zip(expected) {
            assert!(
                (actual - expected).abs() < EPSILON,
                "expected {expected}, got {actual}"
            );
        }
    }

    #[test]
    fn increments_by_alpha_times_rate() {
        let simulator = PriceSimulator::new(SimulationConfig::new(0.1, 10.0).unwrap());
        let history = simulator.simulate(0.5, 3).unwrap();

        assert_points(&history, &[10.0, 10.05, 10.1, 10.15]);
        assert_eq!(history.periods(), 3);
        assert!((history.final_price() - 10.15).abs() < EPSILON);
    }

    #[test]
    fn zero_periods_yields_seed_only() {
        let simulator = PriceSimulator::new(SimulationConfig::new(3.0, 7.5).unwrap());
        let history = simulator.simulate(0.8, 0).unwrap();

        assert_eq!(history.points(), &[7.5]);
        assert_eq!(history.final_price(), 7.5);
        assert!(!history.is_empty());
    }

    #[test]
    fn negative_alpha_is_clamped_to_floor() {
        let simulator = PriceSimulator::new(SimulationConfig::new(-1.0, 10.0).unwrap());
        let history = simulator.simulate(0.9, 2).unwrap();

        assert_eq!(history.points(), &[10.0, 10.0, 10.0]);
    }

    #[test]
    fn negative_rate_never_breaks_floor() {
        let simulator = PriceSimulator::new(SimulationConfig::default());
        let history = simulator.simulate(-4.0, 5).unwrap();

        assert!(history.iter().all(|p| *p >= history.floor()));
    }

    #[test]
    fn non_finite_rate_is_rejected() {
        let simulator = PriceSimulator::default();

        assert!(matches!(
            simulator.simulate(f64::NAN, 3),
            Err(PricingError::NonFiniteRate { .. })
        ));
        assert!(matches!(
            simulator.simulate(f64::INFINITY, 3),
            Err(PricingError::NonFiniteRate { .. })
        ));
    }

    #[test]
    fn non_finite_config_is_rejected() {
        assert!(matches!(
            SimulationConfig::new(f64::NAN, 10.0),
            Err(PricingError::NonFiniteParameter { field: "alpha", .. })
        ));
        assert!(matches!(
            SimulationConfig::new(0.1, f64::NEG_INFINITY),
            Err(PricingError::NonFiniteParameter { field: "base_price", .. })
        ));

        // Fields are public, so the simulator re-checks before running
        let simulator = PriceSimulator::new(SimulationConfig { alpha: f64::INFINITY, base_price: 1.0 });
        assert!(simulator.simulate(0.5, 1).is_err());
    }

    #[test]
    fn repeated_runs_are_identical() {
        let simulator = PriceSimulator::new(SimulationConfig::aggressive());
        let first = simulator.simulate(0.73, 12).unwrap();
        let second = simulator.simulate(0.73, 12).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn series_uses_one_rate_per_period() {
        let simulator = PriceSimulator::new(SimulationConfig::new(1.0, 10.0).unwrap());
        let history = simulator.simulate_series(&[0.5, -2.0, 0.25]).unwrap();

        // 10 → 10.5 → max(8.5, 10) → 10.25
        assert_points(&history, &[10.0, 10.5, 10.0, 10.25]);
    }

    #[test]
    fn series_with_constant_rates_matches_simulate() {
        let simulator = PriceSimulator::new(SimulationConfig::default());
        let series = simulator.simulate_series(&[0.4; 6]).unwrap();
        let single = simulator.simulate(0.4, 6).unwrap();
        assert_eq!(series, single);
    }

    #[test]
    fn series_rejects_bad_rate_before_running() {
        let simulator = PriceSimulator::default();
        assert!(matches!(
            simulator.simulate_series(&[0.1, f64::NAN]),
            Err(PricingError::NonFiniteRate { .. })
        ));
    }

    #[test]
    fn signed_periods_are_checked() {
        assert_eq!(
            periods_from_signed(i64::MIN),
            Err(PricingError::NegativePeriods { periods: i64::MIN })
        );
        assert_eq!(periods_from_signed(4), Ok(4));
        assert_eq!(periods_from_signed(0), Ok(0));
        assert_eq!(
            periods_from_signed(-1),
            Err(PricingError::NegativePeriods { periods: -1 })
        );
    }

    #[test]
    fn period_count_is_bounded() {
        let simulator = PriceSimulator::default();

        assert_eq!(simulator.simulate(0.5, MAX_PERIODS).unwrap().len(), MAX_PERIODS + 1);
        assert_eq!(
            simulator.simulate(0.5, usize::MAX),
            Err(PricingError::TooManyPeriods {
                periods: usize::MAX as u64,
                max: MAX_PERIODS as u64,
            })
        );
        assert_eq!(
            periods_from_signed(i64::MAX),
            Err(PricingError::TooManyPeriods {
                periods: i64::MAX as u64,
                max: MAX_PERIODS as u64,
            })
        );
        assert_eq!(periods_from_signed(MAX_PERIODS as i64), Ok(MAX_PERIODS));
    }

    #[test]
    fn series_length_is_bounded() {
        let rates = vec![0.1; MAX_PERIODS + 1];
        assert!(matches!(
            PriceSimulator::default().simulate_series(&rates),
            Err(PricingError::TooManyPeriods { .. })
        ));
    }

    #[test]
    fn extreme_parameters_report_overflow() {
        let simulator = PriceSimulator::new(SimulationConfig::new(1e308, 1e308).unwrap());
        assert_eq!(
            simulator.simulate(1.0, 3),
            Err(PricingError::PriceOverflow { period: 1 })
        );

        // Huge negative steps clamp to the floor instead
        let simulator = PriceSimulator::new(SimulationConfig::new(-1e308, 1.0).unwrap());
        assert_eq!(simulator.simulate(10.0, 2).unwrap().points(), &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn from_parts_checks_invariants() {
        let history = PriceHistory::from_parts(vec![10.0, 10.5, 11.0], 10.0).unwrap();
        assert_eq!(history.periods(), 2);

        let cases: [(Vec<f64>, f64); 5] = [
            (vec![], 10.0),
            (vec![9.0, 10.0], 10.0),
            (vec![10.0, 9.5], 10.0),
            (vec![10.0, f64::INFINITY], 10.0),
            (vec![f64::NAN], f64::NAN),
        ];
        for (points, floor) in cases {
            assert!(matches!(
                PriceHistory::from_parts(points, floor),
                Err(PricingError::InvalidHistory { .. })
            ));
        }
    }

    #[cfg(feature = "std")]
    #[test]
    fn deserialized_history_is_checked() {
        let valid: PriceHistory =
            serde_json::from_str(r#"{"points": [10.0, 10.05], "floor": 10.0}"#).unwrap();
        assert_eq!(valid.len(), 2);

        let below_floor = serde_json::from_str::<PriceHistory>(r#"{"points": [10.0, 3.0], "floor": 10.0}"#);
        assert!(below_floor.is_err());

        let empty = serde_json::from_str::<PriceHistory>(r#"{"points": [], "floor": 10.0}"#);
        assert!(empty.is_err());
    }

    #[test]
    fn presets_are_valid() {
        for config in [
            SimulationConfig::default(),
            SimulationConfig::conservative(),
            SimulationConfig::aggressive(),
        ] {
            assert!(config.validate().is_ok());
            assert_eq!(config.base_price, DEFAULT_BASE_PRICE);
        }
    }
}
