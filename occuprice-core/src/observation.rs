//! Sensor Observation Records
//!
//! One [`Observation`] is one reading from a parking or traffic sensor: how
//! many slots a site has, how many are taken, what kind of vehicle dominates
//! and how busy the surrounding roads are.
//!
//! Records are created in bulk before a run and are not mutated once their
//! occupancy rate has been derived. The engine does not require
//! `occupancy <= capacity`; an over-full record simply yields a rate above 1.

use alloc::string::String;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dominant vehicle category at the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum VehicleCategory {
    /// Passenger car
    #[default]
    Car = 0,
    /// Motorbike
    Bike = 1,
    /// Goods vehicle
    Truck = 2,
    /// Bicycle
    Cycle = 3,
}

impl VehicleCategory {
    /// All categories in declaration order
    pub const ALL: [VehicleCategory; 4] = [
        VehicleCategory::Car,
        VehicleCategory::Bike,
        VehicleCategory::Truck,
        VehicleCategory::Cycle,
    ];

    /// Get human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            VehicleCategory::Car => "car",
            VehicleCategory::Bike => "bike",
            VehicleCategory::Truck => "truck",
            VehicleCategory::Cycle => "cycle",
        }
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Traffic level on the roads next to the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum TrafficCondition {
    /// Free-flowing
    #[default]
    Low = 0,
    /// Slowing
    Medium = 1,
    /// Congested
    High = 2,
}

impl TrafficCondition {
    /// All conditions from quietest to busiest
    pub const ALL: [TrafficCondition; 3] = [
        TrafficCondition::Low,
        TrafficCondition::Medium,
        TrafficCondition::High,
    ];

    /// Get human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            TrafficCondition::Low => "low",
            TrafficCondition::Medium => "medium",
            TrafficCondition::High => "high",
        }
    }
}

impl fmt::Display for TrafficCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Single sensor reading
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observation {
    /// Unique positive identifier within a dataset
    pub id: u32,

    /// Short site label, e.g. `BHMBCCMKT01`
    pub site_code: String,

    /// Number of slots at the site
    pub capacity: u32,

    /// Number of slots taken when the reading was made
    pub occupancy: u32,

    /// Dominant vehicle category
    #[cfg_attr(feature = "serde", serde(default))]
    pub vehicle: VehicleCategory,

    /// Nearby traffic level
    #[cfg_attr(feature = "serde", serde(default))]
    pub traffic: TrafficCondition,
}

impl Observation {
    /// Create a reading with default vehicle category and traffic level
    pub fn new(id: u32, site_code: impl Into<String>, capacity: u32, occupancy: u32) -> Self {
        Self {
            id,
            site_code: site_code.into(),
            capacity,
            occupancy,
            vehicle: VehicleCategory::default(),
            traffic: TrafficCondition::default(),
        }
    }

    /// Set the vehicle category
    pub fn with_vehicle(mut self, vehicle: VehicleCategory) -> Self {
        self.vehicle = vehicle;
        self
    }

    /// Set the traffic condition
    pub fn with_traffic(mut self, traffic: TrafficCondition) -> Self {
        self.traffic = traffic;
        self
    }

    /// More vehicles than slots - legal input, but usually a sensor fault
    pub fn is_over_capacity(&self) -> bool {
        self.occupancy > self.capacity
    }
}
