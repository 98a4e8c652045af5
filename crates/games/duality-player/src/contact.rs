use serde::{Deserialize, Serialize};

use duality_core::host::Host;

use crate::form::RollDirection;
use crate::pickup::Pickup;
use crate::surface::{ContactedBody, Reaction, SurfaceKind};
use crate::{Player, PlayerEvent};

/// How overlapping contacts of the same kind clear their flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContactTracking {
    /// Count active contacts per kind; the flag drops when the last one ends.
    #[default]
    Counted,
    /// Any single exit clears the flag, even with another contact active.
    LastExitClears,
}

/// Contact flags derived from collision begin/end events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactFlags {
    tracking: ContactTracking,
    ice: u32,
    hot: u32,
    moving: u32,
}

impl ContactFlags {
    pub fn new(tracking: ContactTracking) -> Self {
        Self {
            tracking,
            ..Default::default()
        }
    }

    fn slot(&mut self, kind: SurfaceKind) -> Option<&mut u32> {
        match kind {
            SurfaceKind::Ice => Some(&mut self.ice),
            SurfaceKind::Hot => Some(&mut self.hot),
            SurfaceKind::Moving => Some(&mut self.moving),
            _ => None,
        }
    }

    /// Record a contact of `kind`. Returns true if its flag was just raised.
    pub fn begin(&mut self, kind: SurfaceKind) -> bool {
        match self.slot(kind) {
            Some(count) => {
                *count = count.saturating_add(1);
                *count == 1
            },
            None => false,
        }
    }

    /// Release a contact of `kind`. Returns true if its flag was just
    /// cleared. Releasing a kind with no active contact does nothing.
    pub fn end(&mut self, kind: SurfaceKind) -> bool {
        let tracking = self.tracking;
        match self.slot(kind) {
            Some(count) if *count > 0 => {
                *count = match tracking {
                    ContactTracking::Counted => *count - 1,
                    ContactTracking::LastExitClears => 0,
                };
                *count == 0
            },
            _ => false,
        }
    }

    pub fn on_ice(&self) -> bool {
        self.ice > 0
    }

    pub fn on_hot(&self) -> bool {
        self.hot > 0
    }

    pub fn on_moving(&self) -> bool {
        self.moving > 0
    }

    pub fn active(&self, kind: SurfaceKind) -> u32 {
        match kind {
            SurfaceKind::Ice => self.ice,
            SurfaceKind::Hot => self.hot,
            SurfaceKind::Moving => self.moving,
            _ => 0,
        }
    }
}

impl Player {
    /// Collision began against `other`. Ignored once the entity is dead.
    pub fn on_contact_begin<H: Host>(&mut self, other: &mut ContactedBody, host: &mut H) {
        if self.is_dead() {
            return;
        }
        if let Some(dir) = RollDirection::from_surface_rotation(other.rotation_degrees) {
            self.state.roll = dir;
        }

        let Some(surface) = other.surface.as_mut() else {
            return;
        };
        tracing::trace!(kind = ?surface.kind(), "contact begin");
        let reaction = surface.on_contact_begin(&mut self.state, host);
        self.apply_reaction(reaction, host);
    }

    /// Collision with `other` persisted through a physics step.
    pub fn on_contact_persist<H: Host>(&mut self, other: &mut ContactedBody, host: &mut H) {
        if self.is_dead() {
            return;
        }
        let rate = self.config.melt_speed(self.state.powered_up);
        if let Some(surface) = other.surface.as_mut() {
            let reaction = surface.on_contact_persist(&self.state, rate);
            self.apply_reaction(reaction, host);
        }
    }

    /// Collision with `other` ended.
    pub fn on_contact_end(&mut self, other: &mut ContactedBody) {
        if let Some(surface) = other.surface.as_mut() {
            tracing::trace!(kind = ?surface.kind(), "contact end");
            surface.on_contact_end(&mut self.state);
        }
    }

    /// Trigger overlap began; only power-up pickups react.
    pub fn on_trigger_begin(&mut self, pickup: &mut Pickup) {
        if self.is_dead() || !pickup.is_power_up() || !pickup.consume() {
            return;
        }
        self.state.powered_up = true;
        tracing::debug!("power-up collected");
        self.events.push(PlayerEvent::PoweredUp);
    }

    fn apply_reaction<H: Host>(&mut self, reaction: Reaction, host: &mut H) {
        match reaction {
            Reaction::None => {},
            Reaction::Die => {
                self.die(host);
            },
            Reaction::EnteredBonus => {
                tracing::info!("entering bonus level");
                self.events.push(PlayerEvent::EnteredBonus);
            },
            Reaction::Won => {
                tracing::info!("level complete");
                self.events.push(PlayerEvent::Won);
            },
            Reaction::IceMelted => {
                tracing::debug!("ice platform melted away");
                self.events.push(PlayerEvent::IceMelted);
            },
        }
    }
}
