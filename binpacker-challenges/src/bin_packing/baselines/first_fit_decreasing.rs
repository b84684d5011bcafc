use crate::bin_packing::Challenge;
use binpacker_structs::core::{BinReport, PackingReport, WeightedUnit};
use binpacker_utils::percentage;

/// Places units heaviest first into the first bin with room for them.
pub fn solve_challenge(challenge: &Challenge) -> PackingReport {
    let capacity = challenge.capacity() as u64;

    let mut sorted_units: Vec<&WeightedUnit> = challenge.units.iter().collect();
    sorted_units.sort_by(|a, b| b.cmp(a));

    let mut bins: Vec<(u64, Vec<WeightedUnit>)> = Vec::new();
    for unit in sorted_units {
        let weight = unit.weight() as u64;
        match bins.iter_mut().find(|(load, _)| load + weight <= capacity) {
            Some((load, units)) => {
                *load += weight;
                units.push(unit.clone());
            }
            None => bins.push((weight, vec![unit.clone()])),
        }
    }

    PackingReport {
        capacity: challenge.capacity(),
        bins: bins
            .into_iter()
            .map(|(load, mut units)| {
                units.sort();
                BinReport {
                    label: None,
                    capacity: challenge.capacity(),
                    total_weight: load,
                    utilization: percentage(load, capacity),
                    units,
                }
            })
            .collect(),
        pending: Vec::new(),
    }
}
