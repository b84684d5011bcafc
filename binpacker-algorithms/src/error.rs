//! Error types for packing operations.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PackError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PackError {
    /// Nominal bin capacity must be positive.
    #[error("Bin capacity must be greater than zero")]
    InvalidCapacity,

    /// A unit can never be placed because it is heavier than a whole bin.
    #[error("Weight of unit \"{id}\" ({weight}) exceeds the maximum bin capacity: {capacity}")]
    CapacityExceeded {
        id: String,
        weight: u32,
        capacity: u32,
    },

    /// Pushing the unit would take the container over its capacity.
    #[error("Unit \"{id}\" ({weight}) does not fit: {remaining} of {capacity} remaining")]
    CapacityOverflow {
        id: String,
        weight: u32,
        remaining: u64,
        capacity: u32,
    },

    #[error("Cannot pop from an empty container")]
    EmptyContainer,

    #[error("Unit \"{id}\" not found in container")]
    UnitNotFound { id: String },

    /// Selection made no progress while units were still pending.
    #[error("Packing stalled with {pending} units pending")]
    Stalled { pending: usize },
}
