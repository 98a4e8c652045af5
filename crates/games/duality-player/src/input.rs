use serde::{Deserialize, Serialize};

/// Input sampled once per physics tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Whether the form-toggle key is held this tick.
    pub toggle_held: bool,
}

impl TickInput {
    pub fn toggle() -> Self {
        Self { toggle_held: true }
    }
}

/// Turns a held key into one press per discrete push.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleLatch {
    held: bool,
}

impl ToggleLatch {
    /// Feed this tick's sample. Returns true only on the rising edge.
    pub fn sample(&mut self, held: bool) -> bool {
        let pressed = held && !self.held;
        self.held = held;
        pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_key_fires_once() {
        let mut latch = ToggleLatch::default();
        assert!(latch.sample(true));
        assert!(!latch.sample(true));
        assert!(!latch.sample(true));
        assert!(!latch.sample(false));
        assert!(latch.sample(true), "new press fires again");
    }

    #[test]
    fn idle_never_fires() {
        let mut latch = ToggleLatch::default();
        for _ in 0..5 {
            assert!(!latch.sample(false));
        }
    }
}
