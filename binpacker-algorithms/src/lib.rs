//! Greedy best-fit bin packing driven by a subset-sum truth table.
//!
//! ```
//! use binpacker_algorithms::Binpacker;
//! use binpacker_structs::core::WeightedUnit;
//!
//! let mut packer = Binpacker::new(9).unwrap();
//! packer
//!     .set_pending(vec![
//!         WeightedUnit::new("A", 4),
//!         WeightedUnit::new("B", 1),
//!         WeightedUnit::new("C", 2),
//!     ])
//!     .unwrap();
//! packer.pack_items().unwrap();
//! assert_eq!(packer.bins().len(), 1);
//! assert_eq!(packer.bins()[0].total_weight(), 7);
//! ```

pub mod container;
pub mod error;
pub mod packer;
pub mod selector;
pub mod truth_table;

pub use container::{Container, UnitFilter};
pub use error::{PackError, Result};
pub use packer::Binpacker;
pub use selector::select_best_subset;
pub use truth_table::TruthTable;
