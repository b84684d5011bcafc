use binpacker_structs::{
    config::{GenerateSettings, PackerConfig},
    core::{BinReport, PackingReport, WeightedUnit},
};
use binpacker_utils::dejsonify;

#[test]
fn test_weighted_unit() {
    let unit = WeightedUnit::new("A", 10);
    assert_eq!(unit.id(), "A");
    assert_eq!(unit.weight(), 10);
    assert_eq!(unit.to_string(), "A(10)");
}

#[test]
fn test_weighted_unit_ordering() {
    assert!(WeightedUnit::new("A", 10) > WeightedUnit::new("B", 4));
    assert!(WeightedUnit::new("E", 6) < WeightedUnit::new("F", 10));
    // Equal weight compares equal regardless of id
    assert_eq!(WeightedUnit::new("C", 5), WeightedUnit::new("D", 5));
    assert!(!WeightedUnit::new("C", 5).is_same_unit(&WeightedUnit::new("D", 5)));
    assert!(WeightedUnit::new("C", 5).is_same_unit(&WeightedUnit::new("C", 5)));
}

#[test]
fn test_sort_is_stable_for_equal_weights() {
    let mut units = vec![
        WeightedUnit::new("X", 3),
        WeightedUnit::new("Y", 1),
        WeightedUnit::new("Z", 3),
        WeightedUnit::new("W", 1),
    ];
    units.sort();
    let ids: Vec<&str> = units.iter().map(|u| u.id()).collect();
    assert_eq!(ids, vec!["Y", "W", "X", "Z"]);
}

#[test]
fn test_weighted_unit_json_shape() {
    let unit: WeightedUnit = dejsonify(r#"{"id":"G","weight":7}"#).unwrap();
    assert!(unit.is_same_unit(&WeightedUnit::new("G", 7)));
    assert!(dejsonify::<WeightedUnit>(r#"{"id":"G","weight":-1}"#).is_err());
}

#[test]
fn test_bin_report_render() {
    let report = BinReport {
        label: None,
        capacity: 11,
        total_weight: 10,
        utilization: 90.91,
        units: vec![WeightedUnit::new("B", 1), WeightedUnit::new("E", 9)],
    };
    assert_eq!(report.render(2), "Bin (90.91%) 2: ['B', 'E']");
    assert_eq!(report.unit_ids(), vec!["B", "E"]);

    let full = BinReport {
        label: Some("dock-0".to_string()),
        capacity: 9,
        total_weight: 9,
        utilization: 100.0,
        units: vec![WeightedUnit::new("E", 9)],
    };
    assert_eq!(full.render(0), "Bin (100.0%) 0 dock-0: ['E']");
    assert_eq!(full.label(), Some(&"dock-0".to_string()));
}

#[test]
fn test_packing_report_counts() {
    let report = PackingReport {
        capacity: 9,
        bins: vec![
            BinReport {
                label: None,
                capacity: 9,
                total_weight: 9,
                utilization: 100.0,
                units: vec![WeightedUnit::new("E", 9)],
            },
            BinReport {
                label: None,
                capacity: 9,
                total_weight: 7,
                utilization: 77.78,
                units: vec![WeightedUnit::new("B", 1), WeightedUnit::new("D", 6)],
            },
        ],
        pending: vec![],
    };
    assert_eq!(report.num_bins(), 2);
    assert_eq!(report.num_placed_units(), 3);
}

#[test]
fn test_packer_config() {
    let config: PackerConfig = dejsonify(r#"{"capacity":11}"#).unwrap();
    assert_eq!(config, PackerConfig::new(11));
    assert_eq!(config.label_prefix(), None);

    let config: PackerConfig = dejsonify(r#"{"capacity":11,"label_prefix":"truck-"}"#).unwrap();
    assert_eq!(config.label_prefix(), Some(&"truck-".to_string()));
}

#[test]
fn test_calc_seed() {
    let settings = GenerateSettings {
        num_units: 20,
        capacity: 50,
        min_weight: 1,
        max_weight: 30,
    };
    let seed = settings.calc_seed("random_hash", 1337).unwrap();
    assert_eq!(seed, settings.calc_seed("random_hash", 1337).unwrap());
    assert_ne!(seed, settings.calc_seed("random_hash", 1338).unwrap());
    assert_ne!(seed, settings.calc_seed("other_hash", 1337).unwrap());

    let other = GenerateSettings {
        num_units: 21,
        ..settings.clone()
    };
    assert_ne!(seed, other.calc_seed("random_hash", 1337).unwrap());
}
