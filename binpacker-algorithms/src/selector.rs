use crate::truth_table::TruthTable;

/// Recovers the units that realize the table's best reachable weight.
///
/// Walks the rows from last to first: a row's unit is taken when the rows
/// before it cannot reach the current target on their own. Indices come out
/// in descending order.
pub fn select_best_subset(table: &TruthTable) -> Vec<usize> {
    let mut picked = Vec::new();
    let Some(mut target) = table.best_reachable() else {
        return picked;
    };

    for i in (0..table.num_rows()).rev() {
        if i == 0 {
            if target > 0 {
                picked.push(0);
            }
        } else if !table.get(i - 1, target as usize) {
            picked.push(i);
            target -= table.weight(i);
        }
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use binpacker_structs::core::WeightedUnit;

    fn table(capacity: u32, weights: &[u32]) -> TruthTable {
        let units: Vec<WeightedUnit> = weights
            .iter()
            .enumerate()
            .map(|(i, &w)| WeightedUnit::new(format!("U{}", i), w))
            .collect();
        TruthTable::build(capacity, &units)
    }

    #[test]
    fn empty_table_selects_nothing() {
        assert!(select_best_subset(&table(9, &[])).is_empty());
    }

    #[test]
    fn zero_capacity_selects_nothing() {
        assert!(select_best_subset(&table(0, &[1, 2, 3])).is_empty());
    }

    #[test]
    fn single_fitting_unit_is_selected() {
        assert_eq!(select_best_subset(&table(9, &[4])), vec![0]);
    }

    #[test]
    fn picks_descending_indices() {
        // sorted 1, 2, 3, 4, 6, 9 over capacity 9
        assert_eq!(
            select_best_subset(&table(9, &[1, 2, 3, 4, 6, 9])),
            vec![3, 2, 1]
        );
    }
}
