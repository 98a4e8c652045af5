pub mod clock;
pub mod host;
pub mod spawn;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::cell::Cell;

    use glam::Vec2;

    use crate::clock::{SimClock, WorldClock};
    use crate::host::{
        ColliderShape, Constraints, GroundRay, LayerMask, LevelFlow, Presentation, RigidBody,
        SpawnStore,
    };
    use crate::spawn::MemorySpawnStore;

    /// Last ray passed to [`FakeHost::raycast`].
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct RayCall {
        pub origin: Vec2,
        pub direction: Vec2,
        pub max_distance: f32,
        pub layers: LayerMask,
    }

    /// Recording stand-in for every host collaborator.
    ///
    /// Fields are public so tests can arrange state directly and assert on
    /// what the controller did to the world.
    #[derive(Debug)]
    pub struct FakeHost {
        pub position: Vec2,
        pub velocity: Vec2,
        pub forces: Vec<Vec2>,
        pub constraints: Constraints,
        pub rotation_degrees: f32,
        pub circle_enabled: bool,
        pub box_enabled: bool,
        pub has_circle: bool,
        pub has_box: bool,
        pub has_renderer: bool,
        pub active: bool,
        pub circle_radius: f32,
        pub box_half_extents: Vec2,
        /// Result returned by every raycast.
        pub ground_hit: bool,
        pub last_ray: Cell<Option<RayCall>>,
        pub clock: WorldClock,
        pub end_state_visible: bool,
        pub end_state_shows: u32,
        pub spawn: MemorySpawnStore,
        pub bonus_loads: u32,
        pub level_ends: u32,
    }

    impl FakeHost {
        pub fn new() -> Self {
            Self {
                position: Vec2::ZERO,
                velocity: Vec2::ZERO,
                forces: Vec::new(),
                constraints: Constraints::Free,
                rotation_degrees: 0.0,
                circle_enabled: false,
                box_enabled: false,
                has_circle: true,
                has_box: true,
                has_renderer: true,
                active: false,
                circle_radius: 0.5,
                box_half_extents: Vec2::splat(0.5),
                ground_hit: false,
                last_ray: Cell::new(None),
                clock: WorldClock::new(),
                end_state_visible: true,
                end_state_shows: 0,
                spawn: MemorySpawnStore::new(),
                bonus_loads: 0,
                level_ends: 0,
            }
        }

        /// A host whose rays always hit ground.
        pub fn grounded() -> Self {
            Self {
                ground_hit: true,
                ..Self::new()
            }
        }

        /// Number of collision shapes currently enabled.
        pub fn enabled_collider_count(&self) -> usize {
            usize::from(self.circle_enabled) + usize::from(self.box_enabled)
        }
    }

    impl Default for FakeHost {
        fn default() -> Self {
            Self::new()
        }
    }

    impl RigidBody for FakeHost {
        fn position(&self) -> Vec2 {
            self.position
        }

        fn set_position(&mut self, position: Vec2) {
            self.position = position;
        }

        fn velocity(&self) -> Vec2 {
            self.velocity
        }

        fn set_velocity(&mut self, velocity: Vec2) {
            self.velocity = velocity;
        }

        fn add_force(&mut self, force: Vec2) {
            self.forces.push(force);
        }

        fn constraints(&self) -> Constraints {
            self.constraints
        }

        fn set_constraints(&mut self, constraints: Constraints) {
            self.constraints = constraints;
        }

        fn set_rotation_degrees(&mut self, degrees: f32) {
            self.rotation_degrees = degrees;
        }

        fn has_collider(&self, shape: ColliderShape) -> bool {
            match shape {
                ColliderShape::Circle => self.has_circle,
                ColliderShape::Box => self.has_box,
            }
        }

        fn collider_enabled(&self, shape: ColliderShape) -> bool {
            match shape {
                ColliderShape::Circle => self.circle_enabled,
                ColliderShape::Box => self.box_enabled,
            }
        }

        fn set_collider_enabled(&mut self, shape: ColliderShape, enabled: bool) {
            match shape {
                ColliderShape::Circle => self.circle_enabled = enabled,
                ColliderShape::Box => self.box_enabled = enabled,
            }
        }

        fn collider_half_extents(&self, shape: ColliderShape) -> Vec2 {
            match shape {
                ColliderShape::Circle => Vec2::splat(self.circle_radius),
                ColliderShape::Box => self.box_half_extents,
            }
        }

        fn has_renderer(&self) -> bool {
            self.has_renderer
        }

        fn set_active(&mut self, active: bool) {
            self.active = active;
        }
    }

    impl GroundRay for FakeHost {
        fn raycast(
            &self,
            origin: Vec2,
            direction: Vec2,
            max_distance: f32,
            layers: LayerMask,
        ) -> bool {
            self.last_ray.set(Some(RayCall {
                origin,
                direction,
                max_distance,
                layers,
            }));
            self.ground_hit && !layers.is_empty()
        }
    }

    impl SimClock for FakeHost {
        fn time_scale(&self) -> f32 {
            self.clock.time_scale()
        }

        fn set_time_scale(&mut self, scale: f32) {
            self.clock.set_time_scale(scale);
        }

        fn pause(&mut self) -> bool {
            self.clock.pause()
        }

        fn resume(&mut self) -> bool {
            self.clock.resume()
        }
    }

    impl Presentation for FakeHost {
        fn show_end_state(&mut self) {
            self.end_state_visible = true;
            self.end_state_shows += 1;
        }

        fn hide_end_state(&mut self) {
            self.end_state_visible = false;
        }
    }

    impl SpawnStore for FakeHost {
        fn arrived_via_bonus(&self) -> bool {
            self.spawn.arrived_via_bonus()
        }

        fn set_arrived_via_bonus(&mut self) {
            self.spawn.set_arrived_via_bonus();
        }

        fn clear_arrived_via_bonus(&mut self) {
            self.spawn.clear_arrived_via_bonus();
        }
    }

    impl LevelFlow for FakeHost {
        fn load_bonus_level(&mut self) {
            self.bonus_loads += 1;
        }

        fn end_level(&mut self) {
            self.level_ends += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::host::Host;
    use super::test_helpers::FakeHost;

    fn assert_host<H: Host>(_: &H) {}

    #[test]
    fn fake_host_satisfies_host_bound() {
        let host = FakeHost::new();
        assert_host(&host);
        assert_eq!(host.enabled_collider_count(), 0);
    }
}
