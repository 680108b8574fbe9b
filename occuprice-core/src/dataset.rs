//! Owned collection of observations for a single run

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::slice;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    errors::{PricingError, PricingResult},
    observation::Observation,
};

/// Ordered set of readings priced together
///
/// Insertion order is preserved and is the order of the derived rate column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Dataset {
    records: Vec<Observation>,
}

impl Dataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing records, keeping their order
    pub fn from_records(records: Vec<Observation>) -> Self {
        Self { records }
    }

    /// Append a record
    pub fn push(&mut self, record: Observation) {
        self.records.push(record);
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// No records at all
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order
    pub fn records(&self) -> &[Observation] {
        &self.records
    }

    /// Iterate records in insertion order
    pub fn iter(&self) -> slice::Iter<'_, Observation> {
        self.records.iter()
    }

    /// Look up a record by identifier
    pub fn get(&self, id: u32) -> Option<&Observation> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Check the invariants rate derivation relies on
    ///
    /// Stops at the first record with id 0, a repeated id or zero capacity.
    pub fn validate(&self) -> PricingResult<()> {
        let mut seen = BTreeSet::new();
        for record in &self.records {
            if record.id == 0 {
                return Err(PricingError::ZeroId);
            }
            if !seen.insert(record.id) {
                return Err(PricingError::DuplicateId { id: record.id });
            }
            if record.capacity == 0 {
                return Err(PricingError::ZeroCapacity { record_id: record.id });
            }
        }
        Ok(())
    }
}

impl From<Vec<Observation>> for Dataset {
    fn from(records: Vec<Observation>) -> Self {
        Self::from_records(records)
    }
}

impl FromIterator<Observation> for Dataset {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self { records: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Observation;
    type IntoIter = slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
