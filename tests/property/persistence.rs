//! Property-based tests for baseline save/load

use fim::baseline;
use fim::types::{FingerprintMapping, FingerprintRecord};
use proptest::prelude::*;
use tempfile::TempDir;

fn mapping_strategy() -> impl Strategy<Value = FingerprintMapping> {
    let record = (any::<[u8; 32]>(), any::<u64>(), -1.0e10f64..1.0e10)
        .prop_map(|(digest, size, modified)| FingerprintRecord::new(hex::encode(digest), size, modified));
    prop::collection::btree_map("[a-zA-Z0-9 ._é\"\\\\-]{1,8}(/[a-z0-9_]{1,6}){0,3}", record, 0..16)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Saving then loading reproduces the mapping exactly
    #[test]
    fn save_then_load_is_identity(mapping in mapping_strategy()) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("baseline.json");

        baseline::save(&mapping, &path).unwrap();
        let reloaded = baseline::load(&path).unwrap();

        prop_assert_eq!(reloaded, mapping);
    }
}
