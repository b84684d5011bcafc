use crate::error::{PackError, Result};
use binpacker_structs::core::{BinReport, WeightedUnit};
use binpacker_utils::percentage;
use std::{cmp::Reverse, collections::BinaryHeap};

/// Field-based selection of units inside a [`Container`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitFilter<'a> {
    All,
    Id(&'a str),
    Weight(u32),
}

impl UnitFilter<'_> {
    pub fn matches(&self, unit: &WeightedUnit) -> bool {
        match self {
            UnitFilter::All => true,
            UnitFilter::Id(id) => unit.id() == *id,
            UnitFilter::Weight(weight) => unit.weight() == *weight,
        }
    }
}

/// A capacity-bounded bin whose units are kept in a min-heap by weight.
///
/// The total weight never exceeds the capacity: [`Container::push`] refuses a
/// unit that does not fit.
#[derive(Debug, Clone)]
pub struct Container {
    capacity: u32,
    label: Option<String>,
    units: BinaryHeap<Reverse<WeightedUnit>>,
}

impl Container {
    pub fn new(capacity: u32) -> Result<Self> {
        if capacity == 0 {
            return Err(PackError::InvalidCapacity);
        }
        Ok(Self {
            capacity,
            label: None,
            units: BinaryHeap::new(),
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn total_weight(&self) -> u64 {
        self.units.iter().map(|Reverse(u)| u.weight() as u64).sum()
    }

    pub fn remaining(&self) -> u64 {
        (self.capacity as u64).saturating_sub(self.total_weight())
    }

    /// Occupied share of the capacity in percent, rounded to two decimals.
    pub fn utilization(&self) -> f64 {
        percentage(self.total_weight(), self.capacity as u64)
    }

    pub fn is_full(&self) -> bool {
        self.remaining() == 0
    }

    pub fn push(&mut self, unit: WeightedUnit) -> Result<()> {
        let remaining = self.remaining();
        if unit.weight() as u64 > remaining {
            return Err(PackError::CapacityOverflow {
                id: unit.id().to_string(),
                weight: unit.weight(),
                remaining,
                capacity: self.capacity,
            });
        }
        self.units.push(Reverse(unit));
        Ok(())
    }

    /// Removes and returns the lightest unit.
    pub fn pop(&mut self) -> Result<WeightedUnit> {
        self.units
            .pop()
            .map(|Reverse(unit)| unit)
            .ok_or(PackError::EmptyContainer)
    }

    pub fn peek(&self) -> Option<&WeightedUnit> {
        self.units.peek().map(|Reverse(unit)| unit)
    }

    /// Removes the first unit with the given id and restores heap order.
    pub fn remove(&mut self, id: &str) -> Result<WeightedUnit> {
        let mut units = std::mem::take(&mut self.units).into_vec();
        let position = units.iter().position(|Reverse(u)| u.id() == id);
        let removed = position.map(|i| units.swap_remove(i).0);
        self.units = BinaryHeap::from(units);
        removed.ok_or_else(|| PackError::UnitNotFound { id: id.to_string() })
    }

    /// Units in heap storage order.
    pub fn units(&self) -> impl Iterator<Item = &WeightedUnit> {
        self.units.iter().map(|Reverse(unit)| unit)
    }

    /// Units lightest first, ties broken by id.
    pub fn sorted_units(&self) -> Vec<&WeightedUnit> {
        let mut units: Vec<&WeightedUnit> = self.units().collect();
        units.sort_by(|a, b| a.cmp(b).then_with(|| a.id().cmp(b.id())));
        units
    }

    pub fn query(&self, filter: UnitFilter<'_>) -> Vec<&WeightedUnit> {
        self.units().filter(|unit| filter.matches(unit)).collect()
    }

    pub fn to_report(&self) -> BinReport {
        BinReport {
            label: self.label.clone(),
            capacity: self.capacity,
            total_weight: self.total_weight(),
            utilization: self.utilization(),
            units: self.sorted_units().into_iter().cloned().collect(),
        }
    }
}
