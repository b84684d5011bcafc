use crate::QUALITY_PRECISION;
mod baselines;
use anyhow::{anyhow, Result};
use binpacker_structs::{
    config::GenerateSettings,
    core::{PackingReport, WeightedUnit},
};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Challenge {
    pub seed: [u8; 32],
    pub settings: GenerateSettings,
    pub units: Vec<WeightedUnit>,
}

impl Challenge {
    pub fn generate_instance(seed: &[u8; 32], settings: &GenerateSettings) -> Result<Self> {
        if settings.capacity == 0 {
            return Err(anyhow!("Capacity must be greater than zero"));
        }
        if settings.min_weight > settings.max_weight {
            return Err(anyhow!(
                "Min weight ({}) is greater than max weight ({})",
                settings.min_weight,
                settings.max_weight
            ));
        }
        // Every generated unit must fit into an empty bin
        let max_weight = settings.max_weight.min(settings.capacity);
        let min_weight = settings.min_weight.min(max_weight);

        let mut rng = SmallRng::from_seed(*seed);
        let units = (0..settings.num_units)
            .map(|i| WeightedUnit::new(format!("U{}", i), rng.gen_range(min_weight..=max_weight)))
            .collect();

        Ok(Challenge {
            seed: *seed,
            settings: settings.clone(),
            units,
        })
    }

    pub fn capacity(&self) -> u32 {
        self.settings.capacity
    }

    pub fn total_weight(&self) -> u64 {
        self.units.iter().map(|u| u.weight() as u64).sum()
    }

    /// No packing can use fewer bins than `ceil(total_weight / capacity)`.
    pub fn lower_bound(&self) -> usize {
        self.total_weight().div_ceil(self.capacity() as u64) as usize
    }

    pub fn verify_solution(&self, report: &PackingReport) -> Result<()> {
        if report.capacity != self.capacity() {
            return Err(anyhow!(
                "Report capacity ({}) does not match instance capacity ({})",
                report.capacity,
                self.capacity()
            ));
        }
        if !report.pending.is_empty() {
            return Err(anyhow!("{} units were left pending", report.pending.len()));
        }

        let weights: HashMap<&str, u32> =
            self.units.iter().map(|u| (u.id(), u.weight())).collect();
        let mut placed: HashSet<&str> = HashSet::new();

        for (i, bin) in report.bins.iter().enumerate() {
            if bin.capacity != self.capacity() {
                return Err(anyhow!(
                    "Bin {}: capacity ({}) does not match instance capacity ({})",
                    i,
                    bin.capacity,
                    self.capacity()
                ));
            }
            if bin.units.is_empty() {
                return Err(anyhow!("Bin {} is empty", i));
            }
            let total_weight = bin
                .units
                .iter()
                .map(|unit| {
                    let weight = *weights
                        .get(unit.id())
                        .ok_or_else(|| anyhow!("Unit ({}) is not part of the instance", unit.id()))?;
                    if weight != unit.weight() {
                        return Err(anyhow!(
                            "Unit ({}) has weight ({}), expected ({})",
                            unit.id(),
                            unit.weight(),
                            weight
                        ));
                    }
                    if !placed.insert(unit.id()) {
                        return Err(anyhow!("Unit ({}) is placed more than once", unit.id()));
                    }
                    Ok(weight as u64)
                })
                .sum::<Result<u64>>()?;

            if total_weight != bin.total_weight {
                return Err(anyhow!(
                    "Bin {}: reported total weight ({}) does not match its units ({})",
                    i,
                    bin.total_weight,
                    total_weight
                ));
            }
            if total_weight > bin.capacity as u64 {
                return Err(anyhow!(
                    "Bin {}: total weight ({}) exceeded capacity ({})",
                    i,
                    total_weight,
                    bin.capacity
                ));
            }
        }

        if placed.len() != weights.len() {
            return Err(anyhow!(
                "{} of {} units were not placed",
                weights.len() - placed.len(),
                weights.len()
            ));
        }
        Ok(())
    }

    pub fn compute_baseline(&self) -> PackingReport {
        baselines::first_fit_decreasing::solve_challenge(self)
    }

    /// Relative bin saving over the first-fit-decreasing baseline, scaled by
    /// [`QUALITY_PRECISION`]. Positive means fewer bins than the baseline.
    pub fn evaluate_solution(&self, report: &PackingReport) -> Result<i32> {
        self.verify_solution(report)?;
        let baseline_bins = self.compute_baseline().num_bins();
        if baseline_bins == 0 {
            return Ok(0);
        }
        let quality =
            (baseline_bins as f64 - report.num_bins() as f64) / baseline_bins as f64;
        let quality = quality.clamp(-10.0, 10.0) * QUALITY_PRECISION as f64;
        Ok(quality.round() as i32)
    }
}
