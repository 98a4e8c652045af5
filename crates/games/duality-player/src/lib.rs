pub mod config;
pub mod contact;
pub mod error;
pub mod form;
pub mod input;
pub mod lifecycle;
pub mod motion;
pub mod pickup;
pub mod surface;

use serde::{Deserialize, Serialize};

use duality_core::clock::SimClock;
use duality_core::host::Host;

use config::PlayerConfig;
use contact::{ContactFlags, ContactTracking};
use error::ControllerError;
use form::{Form, FormState, RollDirection};
use input::{TickInput, ToggleLatch};
use lifecycle::LifeState;
use motion::tick_motion;

/// All mutable player state. The tick and the collision callbacks both work
/// on this one value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub form: FormState,
    pub grounded: bool,
    pub powered_up: bool,
    pub roll: RollDirection,
    /// Survival fade in [0, 1]; melts on hot surfaces.
    pub alpha: f32,
    pub contacts: ContactFlags,
    pub life: LifeState,
}

impl PlayerState {
    pub fn new(form: Form) -> Self {
        Self::with_tracking(form, ContactTracking::default())
    }

    pub fn with_tracking(form: Form, tracking: ContactTracking) -> Self {
        Self {
            form: FormState::new(form),
            grounded: false,
            powered_up: false,
            roll: RollDirection::Right,
            alpha: 1.0,
            contacts: ContactFlags::new(tracking),
            life: LifeState::Alive,
        }
    }
}

/// Notable things that happened to the player, drained by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerEvent {
    FormChanged(Form),
    PoweredUp,
    Died,
    EnteredBonus,
    Won,
    IceMelted,
}

/// The dual-form player controller.
pub struct Player {
    config: PlayerConfig,
    state: PlayerState,
    toggle: ToggleLatch,
    events: Vec<PlayerEvent>,
}

impl Player {
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            state: PlayerState::with_tracking(config.start_form, config.contact_tracking),
            config,
            toggle: ToggleLatch::default(),
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn form(&self) -> Form {
        self.state.form.form()
    }

    /// One fixed physics step of `dt` seconds, as stepped by the host.
    /// Returns the events raised since the previous tick, including those
    /// from collision callbacks in between.
    ///
    /// Does nothing while the entity is dead or world time is halted.
    pub fn tick<H: Host>(&mut self, host: &mut H, input: TickInput, dt: f32) -> Vec<PlayerEvent> {
        if self.state.life == LifeState::Dead || host.is_paused() {
            return self.drain_events();
        }

        if self.toggle.sample(input.toggle_held) {
            self.toggle_form(host);
        }

        let outcome = tick_motion(&mut self.state, &self.config, host, dt);
        if outcome.melted_out {
            self.die(host);
        }

        self.drain_events()
    }

    /// Flip between Circle and Square.
    pub fn toggle_form<H: Host>(&mut self, host: &mut H) {
        let force = self.config.roll_force(self.state.powered_up);
        self.state.form.toggle(host, self.state.roll, force);
        self.events.push(PlayerEvent::FormChanged(self.state.form.form()));
    }

    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Encode the player state for host-side mirroring and debug overlays.
    pub fn serialize_state(&self) -> Result<Vec<u8>, ControllerError> {
        rmp_serde::to_vec(&self.state).map_err(|e| ControllerError::StateEncoding(e.to_string()))
    }

    pub fn apply_state(&mut self, data: &[u8]) -> Result<(), ControllerError> {
        self.state = rmp_serde::from_slice::<PlayerState>(data)
            .map_err(|e| ControllerError::StateEncoding(e.to_string()))?;
        Ok(())
    }
}
