use crate::serializable_struct_with_getters;
use binpacker_utils::{jsonify, u8s_from_str};
use serde::{Deserialize, Serialize};

serializable_struct_with_getters! {
    PackerConfig {
        capacity: u32,
        /// Bins opened by the packer are labelled `<label_prefix><index>`.
        label_prefix: Option<String>,
    }
}

impl PackerConfig {
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            label_prefix: None,
        }
    }
}

serializable_struct_with_getters! {
    GenerateSettings {
        num_units: usize,
        capacity: u32,
        min_weight: u32,
        max_weight: u32,
    }
}

impl GenerateSettings {
    /// Derives the instance seed from these settings, a random hash and a nonce.
    pub fn calc_seed(&self, rand_hash: &str, nonce: u64) -> serde_json::Result<[u8; 32]> {
        Ok(u8s_from_str(&format!(
            "{}_{}_{}",
            jsonify(self)?,
            rand_hash,
            nonce
        )))
    }
}
