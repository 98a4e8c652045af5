use serde::{Deserialize, Serialize};

use crate::host::SpawnStore;

/// Spawn flag kept in memory for the lifetime of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySpawnStore {
    arrived_via_bonus: bool,
}

impl MemorySpawnStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpawnStore for MemorySpawnStore {
    fn arrived_via_bonus(&self) -> bool {
        self.arrived_via_bonus
    }

    fn set_arrived_via_bonus(&mut self) {
        self.arrived_via_bonus = true;
    }

    fn clear_arrived_via_bonus(&mut self) {
        self.arrived_via_bonus = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_set_then_cleared() {
        let mut store = MemorySpawnStore::new();
        assert!(!store.arrived_via_bonus());
        store.set_arrived_via_bonus();
        assert!(store.arrived_via_bonus());
        store.clear_arrived_via_bonus();
        assert!(!store.arrived_via_bonus());
    }
}
