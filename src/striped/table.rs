//! Rule table generation for B3/S23.

use super::key::{KEY_COUNT, NeighborKey};
use crate::sequential::is_alive;

/// Precomputed next-state for every 9-bit neighborhood key. Built once per
/// invocation, read-only afterwards, shared across all workers.
pub(crate) struct RuleTable {
    table: [u8; KEY_COUNT],
}

impl RuleTable {
    pub fn new() -> Self {
        let mut table = [0u8; KEY_COUNT];
        for (index, entry) in table.iter_mut().enumerate() {
            let key = NeighborKey::from_index(index as u16);
            *entry = is_alive(key.neighbor_count(), key.self_alive()) as u8;
        }
        Self { table }
    }

    #[inline(always)]
    pub fn lookup(&self, key: NeighborKey) -> u8 {
        self.table[key.index()]
    }
}
