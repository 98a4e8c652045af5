use serde::{Deserialize, Serialize};

/// Tag carried by power-up pickups.
pub const POWER_UP_TAG: &str = "PowerUp";

/// A trigger volume the entity can collect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pickup {
    pub tag: String,
    active: bool,
}

impl Pickup {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            active: true,
        }
    }

    pub fn power_up() -> Self {
        Self::new(POWER_UP_TAG)
    }

    pub fn is_power_up(&self) -> bool {
        self.tag == POWER_UP_TAG
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Deactivate the pickup. Returns false if it was already consumed.
    pub fn consume(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }
}
