use glam::Vec2;

use duality_core::host::{Constraints, GroundRay, RigidBody};

use crate::PlayerState;
use crate::config::PlayerConfig;
use crate::form::{Form, RollDirection};

/// Result of one motion step the caller has to act on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionOutcome {
    /// Alpha reached zero on a hot surface this step.
    pub melted_out: bool,
}

/// Cast a ray straight down from the body for ground within the active
/// collider's half height plus the skin margin.
pub fn sense_ground<H>(state: &PlayerState, config: &PlayerConfig, host: &H) -> bool
where
    H: RigidBody + GroundRay + ?Sized,
{
    let half_height = host.collider_half_extents(state.form.active_collider()).y;
    host.raycast(
        host.position(),
        Vec2::NEG_Y,
        half_height + config.ground_skin,
        config.ground_layers,
    )
}

/// Advance the motion policy by one fixed step.
pub fn tick_motion<H>(
    state: &mut PlayerState,
    config: &PlayerConfig,
    host: &mut H,
    dt: f32,
) -> MotionOutcome
where
    H: RigidBody + GroundRay + ?Sized,
{
    state.grounded = sense_ground(state, config, host);

    match state.form.form() {
        Form::Circle => {
            circle_step(state, host);
            MotionOutcome::default()
        },
        Form::Square => square_step(state, config, host, dt),
    }
}

/// Circles roll freely; only the roll direction is tracked.
fn circle_step<H>(state: &mut PlayerState, host: &H)
where
    H: RigidBody + ?Sized,
{
    state.roll = RollDirection::from_velocity_x(host.velocity().x);
}

fn square_step<H>(
    state: &mut PlayerState,
    config: &PlayerConfig,
    host: &mut H,
    dt: f32,
) -> MotionOutcome
where
    H: RigidBody + ?Sized,
{
    // A moving platform carries the square; leave its velocity alone.
    if state.contacts.on_moving() {
        tracing::trace!("square riding moving platform");
        return MotionOutcome::default();
    }

    let mut outcome = MotionOutcome::default();

    if state.contacts.on_ice() {
        host.set_velocity(state.roll.unit() * config.slide_speed(state.powered_up));
    }

    if state.contacts.on_hot() && state.alpha > 0.0 {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        state.alpha = (state.alpha - config.melt_speed(state.powered_up) * dt).max(0.0);
        if state.alpha <= 0.0 {
            outcome.melted_out = true;
        }
    }

    host.set_rotation_degrees(state.roll.tilt(config.tilt_degrees));

    let constraints = if state.grounded && config.slide_on_ground {
        Constraints::Free
    } else {
        Constraints::FreezeHorizontal
    };
    host.set_constraints(constraints);

    outcome
}
