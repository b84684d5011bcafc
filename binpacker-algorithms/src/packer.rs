use crate::{
    container::Container,
    error::{PackError, Result},
    selector::select_best_subset,
    truth_table::TruthTable,
};
use binpacker_structs::{
    config::PackerConfig,
    core::{PackingReport, WeightedUnit},
};
use log::{debug, warn};
use logging_timer::time;

/// Greedy best-fit bin packer with incremental refill.
///
/// Units are admitted into a pending pool and placed by [`Binpacker::pack_items`].
/// Existing bins are refilled first; new bins are opened at the nominal
/// capacity only once the existing ones can take nothing more.
#[derive(Debug, Clone)]
pub struct Binpacker {
    capacity: u32,
    label_prefix: Option<String>,
    bins: Vec<Container>,
    pending: Vec<WeightedUnit>,
}

impl Binpacker {
    pub fn new(capacity: u32) -> Result<Self> {
        if capacity == 0 {
            return Err(PackError::InvalidCapacity);
        }
        Ok(Self {
            capacity,
            label_prefix: None,
            bins: Vec::new(),
            pending: Vec::new(),
        })
    }

    pub fn from_config(config: &PackerConfig) -> Result<Self> {
        let mut packer = Self::new(config.capacity)?;
        packer.label_prefix = config.label_prefix.clone();
        Ok(packer)
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn pending(&self) -> &[WeightedUnit] {
        &self.pending
    }

    /// Replaces the pending pool. Nothing changes if any unit is too heavy.
    pub fn set_pending(&mut self, units: Vec<WeightedUnit>) -> Result<()> {
        self.check_admissible(&units)?;
        self.pending = units;
        Ok(())
    }

    pub fn push_pending(&mut self, unit: WeightedUnit) -> Result<()> {
        self.check_admissible(std::slice::from_ref(&unit))?;
        self.pending.push(unit);
        Ok(())
    }

    /// Appends all of `units` or, if any is too heavy, none of them.
    pub fn extend_pending<I>(&mut self, units: I) -> Result<()>
    where
        I: IntoIterator<Item = WeightedUnit>,
    {
        let units: Vec<WeightedUnit> = units.into_iter().collect();
        self.check_admissible(&units)?;
        self.pending.extend(units);
        Ok(())
    }

    pub fn bins(&self) -> &[Container] {
        &self.bins
    }

    pub fn set_bins(&mut self, bins: Vec<Container>) {
        self.bins = bins;
    }

    /// Places every pending unit.
    ///
    /// Phase one refills bins that still have room, in creation order, with
    /// the best-fitting subset of the pending pool. Phase two opens new bins
    /// until the pool is empty. Calling it again with nothing new pending is a
    /// no-op.
    #[time]
    pub fn pack_items(&mut self) -> Result<()> {
        self.pending.sort();

        for bin_index in 0..self.bins.len() {
            if self.pending.is_empty() {
                break;
            }
            let bin = &self.bins[bin_index];
            if bin.is_full() {
                continue;
            }
            // remaining never exceeds the bin's u32 capacity
            let remaining = bin.remaining() as u32;
            let table = TruthTable::build(remaining, &self.pending);
            let picked = self.with_zero_weight(select_best_subset(&table));
            if picked.is_empty() {
                continue;
            }
            let moved = self.move_units(&picked, bin_index)?;
            debug!(
                "Refilled bin {} with {} units ({} of {} was free)",
                bin_index,
                moved,
                remaining,
                self.bins[bin_index].capacity()
            );
        }

        while !self.pending.is_empty() {
            let table = TruthTable::build(self.capacity, &self.pending);
            let picked = self.with_zero_weight(select_best_subset(&table));
            if picked.is_empty() {
                return Err(PackError::Stalled {
                    pending: self.pending.len(),
                });
            }

            let mut bin = Container::new(self.capacity)?;
            if let Some(prefix) = &self.label_prefix {
                bin.set_label(format!("{}{}", prefix, self.bins.len()));
            }
            self.bins.push(bin);
            let bin_index = self.bins.len() - 1;
            let moved = self.move_units(&picked, bin_index)?;
            debug!(
                "Opened bin {} with {} units at {}% utilization",
                bin_index,
                moved,
                self.bins[bin_index].utilization()
            );
        }
        Ok(())
    }

    pub fn report(&self) -> PackingReport {
        PackingReport {
            capacity: self.capacity,
            bins: self.bins.iter().map(|bin| bin.to_report()).collect(),
            pending: self.pending.clone(),
        }
    }

    fn check_admissible(&self, units: &[WeightedUnit]) -> Result<()> {
        match units.iter().find(|unit| unit.weight() > self.capacity) {
            Some(unit) => {
                warn!(
                    "Rejecting unit \"{}\" with weight {} (capacity {})",
                    unit.id(),
                    unit.weight(),
                    self.capacity
                );
                Err(PackError::CapacityExceeded {
                    id: unit.id().to_string(),
                    weight: unit.weight(),
                    capacity: self.capacity,
                })
            }
            None => Ok(()),
        }
    }

    /// Zero-weight units never change a reachable sum, so backtracking never
    /// picks them. They join whichever bin is being filled.
    fn with_zero_weight(&self, mut picked: Vec<usize>) -> Vec<usize> {
        picked.extend(
            self.pending
                .iter()
                .enumerate()
                .filter(|(_, unit)| unit.weight() == 0)
                .map(|(i, _)| i),
        );
        picked
    }

    /// Moves the pending units at `picked` into bin `bin_index`, keeping the
    /// rest of the pool in its current order.
    fn move_units(&mut self, picked: &[usize], bin_index: usize) -> Result<usize> {
        let mut selected = vec![false; self.pending.len()];
        for &i in picked {
            selected[i] = true;
        }

        let load: u64 = self
            .pending
            .iter()
            .zip(&selected)
            .filter(|(_, &take)| take)
            .map(|(unit, _)| unit.weight() as u64)
            .sum();
        let bin = &mut self.bins[bin_index];
        if load > bin.remaining() {
            return Err(PackError::CapacityOverflow {
                id: format!("{} selected units", picked.len()),
                weight: load as u32,
                remaining: bin.remaining(),
                capacity: bin.capacity(),
            });
        }

        let (moving, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .zip(selected)
            .partition(|(_, take)| *take);
        self.pending = kept.into_iter().map(|(unit, _)| unit).collect();

        let moved = moving.len();
        for (unit, _) in moving {
            bin.push(unit)?;
        }
        Ok(moved)
    }
}
