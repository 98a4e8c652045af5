use serde::{Deserialize, Serialize};

/// The shared simulation clock. Pausing halts the whole world, not a single
/// entity, so every caller goes through this service.
pub trait SimClock {
    fn time_scale(&self) -> f32;
    fn set_time_scale(&mut self, scale: f32);

    /// Halt simulation time. Returns `false` if the clock was already halted.
    fn pause(&mut self) -> bool;

    /// Restore normal time. Returns `false` if the clock was already running.
    fn resume(&mut self) -> bool;

    fn is_paused(&self) -> bool {
        self.time_scale() == 0.0
    }
}

/// In-process clock driven by a time scale, 1.0 being normal speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldClock {
    time_scale: f32,
    /// Scale to restore on `resume()`.
    resume_scale: f32,
}

impl WorldClock {
    pub fn new() -> Self {
        Self {
            time_scale: 1.0,
            resume_scale: 1.0,
        }
    }
}

impl Default for WorldClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SimClock for WorldClock {
    fn time_scale(&self) -> f32 {
        self.time_scale
    }

    fn set_time_scale(&mut self, scale: f32) {
        let scale = if scale.is_finite() { scale.max(0.0) } else { 1.0 };
        if scale > 0.0 {
            self.resume_scale = scale;
        }
        self.time_scale = scale;
    }

    fn pause(&mut self) -> bool {
        if self.is_paused() {
            return false;
        }
        self.resume_scale = self.time_scale;
        self.time_scale = 0.0;
        tracing::debug!("simulation clock paused");
        true
    }

    fn resume(&mut self) -> bool {
        if !self.is_paused() {
            return false;
        }
        self.time_scale = self.resume_scale;
        tracing::debug!(scale = self.time_scale, "simulation clock resumed");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clock_runs_at_normal_speed() {
        let clock = WorldClock::new();
        assert_eq!(clock.time_scale(), 1.0);
        assert!(!clock.is_paused());
    }

    #[test]
    fn pause_is_idempotent() {
        let mut clock = WorldClock::new();
        assert!(clock.pause());
        assert!(!clock.pause(), "second pause must report no change");
        assert!(clock.is_paused());
        assert_eq!(clock.time_scale(), 0.0);
    }

    #[test]
    fn resume_restores_previous_scale() {
        let mut clock = WorldClock::new();
        clock.set_time_scale(0.5);
        clock.pause();
        assert!(clock.resume());
        assert_eq!(clock.time_scale(), 0.5);
        assert!(!clock.resume());
    }

    #[test]
    fn non_finite_scale_falls_back_to_normal() {
        let mut clock = WorldClock::new();
        clock.set_time_scale(f32::NAN);
        assert_eq!(clock.time_scale(), 1.0);
        clock.set_time_scale(-3.0);
        assert!(clock.is_paused());
    }
}
