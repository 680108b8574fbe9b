//! Shared fixtures for integration tests
//!
//! Small hand-built datasets with known rates, so assertions can use exact
//! expected values instead of recomputing them.

#![allow(dead_code)]

use occuprice_core::{Dataset, Observation, TrafficCondition, VehicleCategory};

/// Comparison tolerance for accumulated float sums
pub const EPSILON: f64 = 1e-9;

/// Four city-centre sites with a mean rate of exactly 0.5
pub fn city_centre() -> Dataset {
    Dataset::from(vec![
        Observation::new(1, "BHMBCCMKT01", 100, 75)
            .with_vehicle(VehicleCategory::Car)
            .with_traffic(TrafficCondition::High),
        Observation::new(2, "BHMBCCTHL01", 200, 50)
            .with_vehicle(VehicleCategory::Bike)
            .with_traffic(TrafficCondition::Low),
        Observation::new(3, "BHMEURBRD01", 40, 30)
            .with_vehicle(VehicleCategory::Truck)
            .with_traffic(TrafficCondition::Medium),
        Observation::new(4, "BHMNCPHST01", 80, 20)
            .with_vehicle(VehicleCategory::Cycle)
            .with_traffic(TrafficCondition::Low),
    ])
}

/// Dataset whose second record has no capacity
pub fn with_dead_sensor() -> Dataset {
    Dataset::from(vec![
        Observation::new(1, "BHMBCCMKT01", 100, 50),
        Observation::new(2, "BHMBCCTHL01", 0, 5),
    ])
}

/// Assert two price tracks agree within [`EPSILON`]
pub fn assert_prices(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "length mismatch: {actual:?} vs {expected:?}");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() < EPSILON, "point {i}: expected {e}, got {a}");
    }
}
