use glam::Vec2;
use serde::{Deserialize, Serialize};

use duality_core::clock::SimClock;
use duality_core::host::{ColliderShape, Host, Presentation, RigidBody, SpawnStore};

use crate::error::ControllerError;
use crate::{Player, PlayerEvent, PlayerState};

/// Whether the entity is still in play for this level instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LifeState {
    #[default]
    Alive,
    /// Terminal until the level is reloaded.
    Dead,
}

/// Which configured spawn point the entity started at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnPoint {
    Start,
    Bonus,
}

impl Player {
    /// Prepare the entity for a fresh level instance: unpause the world,
    /// hide end-state UI, place the entity at its spawn point and put it in
    /// the configured starting form.
    ///
    /// Fails without touching the host if the config is invalid or the
    /// entity lacks a collider or renderer.
    pub fn initialize<H: Host>(&mut self, host: &mut H) -> Result<SpawnPoint, ControllerError> {
        self.config.validate()?;
        for shape in [ColliderShape::Circle, ColliderShape::Box] {
            if !host.has_collider(shape) {
                return Err(ControllerError::MissingCollider(shape));
            }
        }
        if !host.has_renderer() {
            return Err(ControllerError::MissingRenderer);
        }

        host.set_time_scale(1.0);
        host.hide_end_state();

        let (spawn, position) = self.resolve_spawn(host);
        host.set_position(position);

        self.state = PlayerState::with_tracking(
            self.config.start_form,
            self.config.contact_tracking,
        );
        self.toggle = Default::default();
        self.events.clear();

        let force = self.config.roll_force(self.state.powered_up);
        self.state
            .form
            .set_form(self.config.start_form, host, self.state.roll, force);
        host.set_active(true);

        tracing::info!(?spawn, x = position.x, y = position.y, form = ?self.config.start_form, "player spawned");
        Ok(spawn)
    }

    /// Read and consume the bonus-arrival flag.
    fn resolve_spawn<H: Host>(&self, host: &mut H) -> (SpawnPoint, Vec2) {
        if host.arrived_via_bonus() {
            host.clear_arrived_via_bonus();
            (SpawnPoint::Bonus, self.config.bonus_start_position)
        } else {
            (SpawnPoint::Start, self.config.start_position)
        }
    }

    /// Kill the entity: drop the power-up, halt world time and show the
    /// end state. Returns false when already dead; repeated calls within a
    /// tick are absorbed.
    pub fn die<H: Host>(&mut self, host: &mut H) -> bool {
        if self.state.life == LifeState::Dead {
            return false;
        }
        self.state.life = LifeState::Dead;
        self.state.powered_up = false;
        host.pause();
        host.show_end_state();
        tracing::info!(form = ?self.state.form.form(), alpha = self.state.alpha, "player died");
        self.events.push(PlayerEvent::Died);
        true
    }

    pub fn is_dead(&self) -> bool {
        self.state.life == LifeState::Dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerConfig;
    use crate::form::Form;
    use duality_core::host::Constraints;
    use duality_core::test_helpers::FakeHost;

    fn config() -> PlayerConfig {
        PlayerConfig {
            start_position: Vec2::new(1.0, 2.0),
            bonus_start_position: Vec2::new(30.0, 5.0),
            ..Default::default()
        }
    }

    #[test]
    fn spawns_at_start_without_bonus_flag() {
        let mut player = Player::new(config());
        let mut host = FakeHost::new();
        host.clock.pause();

        let spawn = player.initialize(&mut host).unwrap();

        assert_eq!(spawn, SpawnPoint::Start);
        assert_eq!(host.position, Vec2::new(1.0, 2.0));
        assert!(!host.clock.is_paused(), "time scale reset to normal");
        assert_eq!(host.clock.time_scale(), 1.0);
        assert!(!host.end_state_visible);
        assert!(host.active);
        assert_eq!(player.state().form.form(), Form::Circle);
        assert!(host.circle_enabled && !host.box_enabled);
    }

    #[test]
    fn bonus_arrival_spawns_at_bonus_and_clears_flag() {
        let mut player = Player::new(config());
        let mut host = FakeHost::new();
        host.spawn.set_arrived_via_bonus();

        assert_eq!(player.initialize(&mut host).unwrap(), SpawnPoint::Bonus);
        assert_eq!(host.position, Vec2::new(30.0, 5.0));
        assert!(!host.spawn.arrived_via_bonus());
    }

    #[test]
    fn square_start_enables_box_only() {
        let mut player = Player::new(PlayerConfig {
            start_form: Form::Square,
            ..config()
        });
        let mut host = FakeHost::new();
        player.initialize(&mut host).unwrap();
        assert!(host.box_enabled && !host.circle_enabled);
        assert_eq!(host.constraints, Constraints::Free);
    }

    #[test]
    fn missing_collider_aborts_initialization() {
        let mut player = Player::new(config());
        let mut host = FakeHost::new();
        host.has_box = false;
        host.spawn.set_arrived_via_bonus();

        let err = player.initialize(&mut host).unwrap_err();
        assert_eq!(err, ControllerError::MissingCollider(ColliderShape::Box));
        assert!(!host.active);
        assert!(host.spawn.arrived_via_bonus(), "flag not consumed on failure");
    }

    #[test]
    fn missing_renderer_aborts_initialization() {
        let mut player = Player::new(config());
        let mut host = FakeHost::new();
        host.has_renderer = false;
        assert_eq!(
            player.initialize(&mut host).unwrap_err(),
            ControllerError::MissingRenderer
        );
    }

    #[test]
    fn invalid_config_aborts_initialization() {
        let mut player = Player::new(PlayerConfig {
            melt_speed: f32::NAN,
            ..config()
        });
        let mut host = FakeHost::new();
        assert!(matches!(
            player.initialize(&mut host),
            Err(ControllerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn die_is_idempotent() {
        let mut player = Player::new(config());
        let mut host = FakeHost::new();
        player.initialize(&mut host).unwrap();
        player.state.powered_up = true;

        assert!(player.die(&mut host));
        assert!(!player.die(&mut host));

        assert!(player.is_dead());
        assert!(!player.state().powered_up);
        assert!(host.clock.is_paused());
        assert_eq!(host.end_state_shows, 1);
        assert_eq!(player.drain_events(), vec![PlayerEvent::Died]);
    }

    #[test]
    fn reinitialize_revives() {
        let mut player = Player::new(config());
        let mut host = FakeHost::new();
        player.initialize(&mut host).unwrap();
        player.die(&mut host);

        player.initialize(&mut host).unwrap();
        assert!(!player.is_dead());
        assert!(!host.clock.is_paused());
        assert!(!host.end_state_visible);
        assert_eq!(player.state().alpha, 1.0);
    }
}
