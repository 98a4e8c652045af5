use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clock::SimClock;

/// Which of the two collision shapes a body carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColliderShape {
    Circle,
    Box,
}

/// Positional constraints applied to a rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Constraints {
    #[default]
    Free,
    FreezeHorizontal,
}

/// Bitmask of physics layers, used to filter ray casts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Mask with a single layer set. Layers past 31 yield an empty mask.
    pub fn layer(index: u32) -> Self {
        Self(1u32.checked_shl(index).unwrap_or(0))
    }

    pub fn contains(self, index: u32) -> bool {
        self.0 & Self::layer(index).0 != 0
    }

    pub fn union(self, other: LayerMask) -> Self {
        Self(self.0 | other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// The physics body the controller drives. Integration and collision
/// detection belong to the host engine; this is only the handle.
pub trait RigidBody {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);

    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);

    /// Apply a one-off force, integrated by the host on its next step.
    fn add_force(&mut self, force: Vec2);

    fn constraints(&self) -> Constraints;
    fn set_constraints(&mut self, constraints: Constraints);

    /// Visual rotation about the z axis, in degrees.
    fn set_rotation_degrees(&mut self, degrees: f32);

    /// Whether the shape exists on the body at all (enabled or not).
    fn has_collider(&self, shape: ColliderShape) -> bool;
    fn collider_enabled(&self, shape: ColliderShape) -> bool;
    fn set_collider_enabled(&mut self, shape: ColliderShape, enabled: bool);
    fn collider_half_extents(&self, shape: ColliderShape) -> Vec2;

    /// Whether a sprite renderer is attached to the owning entity.
    fn has_renderer(&self) -> bool;

    fn set_active(&mut self, active: bool);
}

/// Ray queries against the host's collision world.
pub trait GroundRay {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layers: LayerMask,
    ) -> bool;
}

/// End-of-level presentation (lose panel and the like).
pub trait Presentation {
    fn show_end_state(&mut self);
    fn hide_end_state(&mut self);
}

/// Persisted "arrived via bonus" flag consulted at spawn.
pub trait SpawnStore {
    fn arrived_via_bonus(&self) -> bool;
    fn set_arrived_via_bonus(&mut self);
    fn clear_arrived_via_bonus(&mut self);
}

/// Level transitions owned by the host's scene manager.
pub trait LevelFlow {
    fn load_bonus_level(&mut self);
    fn end_level(&mut self);
}

/// Everything the controller needs from its host, in one bound.
pub trait Host: RigidBody + GroundRay + SimClock + Presentation + SpawnStore + LevelFlow {}

impl<T> Host for T where
    T: RigidBody + GroundRay + SimClock + Presentation + SpawnStore + LevelFlow
{
}
