pub const QUALITY_PRECISION: i32 = 1_000_000;

pub mod bin_packing;
