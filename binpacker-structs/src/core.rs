use crate::serializable_struct_with_getters;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

/// An immutable item with an identifier and a weight.
///
/// Ordering and equality look at the weight only: two units of equal weight
/// compare equal even when their ids differ. Use [`WeightedUnit::is_same_unit`]
/// when identity matters.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WeightedUnit {
    id: String,
    weight: u32,
}

impl WeightedUnit {
    pub fn new(id: impl Into<String>, weight: u32) -> Self {
        Self {
            id: id.into(),
            weight,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn is_same_unit(&self, other: &WeightedUnit) -> bool {
        self.id == other.id && self.weight == other.weight
    }
}

impl PartialEq for WeightedUnit {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight
    }
}

impl Eq for WeightedUnit {}

impl PartialOrd for WeightedUnit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WeightedUnit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight.cmp(&other.weight)
    }
}

impl fmt::Display for WeightedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.id, self.weight)
    }
}

serializable_struct_with_getters! {
    BinReport {
        label: Option<String>,
        capacity: u32,
        total_weight: u64,
        utilization: f64,
        units: Vec<WeightedUnit>,
    }
}

impl BinReport {
    pub fn unit_ids(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.id()).collect()
    }

    /// Renders as `Bin (<utilization>%) <index>: [<ids>]`.
    pub fn render(&self, index: usize) -> String {
        let ids: Vec<String> = self.units.iter().map(|u| format!("'{}'", u.id())).collect();
        match &self.label {
            Some(label) => format!(
                "Bin ({:?}%) {} {}: [{}]",
                self.utilization,
                index,
                label,
                ids.join(", ")
            ),
            None => format!(
                "Bin ({:?}%) {}: [{}]",
                self.utilization,
                index,
                ids.join(", ")
            ),
        }
    }
}

serializable_struct_with_getters! {
    PackingReport {
        capacity: u32,
        bins: Vec<BinReport>,
        pending: Vec<WeightedUnit>,
    }
}

impl PackingReport {
    pub fn num_bins(&self) -> usize {
        self.bins.len()
    }

    pub fn num_placed_units(&self) -> usize {
        self.bins.iter().map(|b| b.units.len()).sum()
    }
}
