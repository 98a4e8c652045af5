use glam::Vec2;
use serde::{Deserialize, Serialize};

use duality_core::host::{ColliderShape, Constraints, RigidBody};

/// The entity's physical mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Form {
    #[default]
    Circle,
    Square,
}

impl Form {
    pub fn other(self) -> Self {
        match self {
            Form::Circle => Form::Square,
            Form::Square => Form::Circle,
        }
    }

    pub fn collider(self) -> ColliderShape {
        match self {
            Form::Circle => ColliderShape::Circle,
            Form::Square => ColliderShape::Box,
        }
    }

    pub fn base_sprite(self) -> Sprite {
        match self {
            Form::Circle => Sprite::Circle,
            Form::Square => Sprite::Square,
        }
    }
}

/// Horizontal direction the entity rolls or slides in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RollDirection {
    Left,
    #[default]
    Right,
}

impl RollDirection {
    pub fn unit(self) -> Vec2 {
        match self {
            RollDirection::Left => Vec2::NEG_X,
            RollDirection::Right => Vec2::X,
        }
    }

    /// Direction implied by horizontal velocity. Zero counts as left.
    pub fn from_velocity_x(vx: f32) -> Self {
        if vx > 0.0 {
            RollDirection::Right
        } else {
            RollDirection::Left
        }
    }

    /// Direction a tilted surface pushes the entity. Positive rotation
    /// (counter-clockwise) slopes down to the left. Level or non-finite
    /// surfaces give no direction.
    pub fn from_surface_rotation(degrees: f32) -> Option<Self> {
        if degrees > 0.0 {
            Some(RollDirection::Left)
        } else if degrees < 0.0 {
            Some(RollDirection::Right)
        } else {
            None
        }
    }

    /// Square lean for this direction: clockwise when heading right.
    pub fn tilt(self, magnitude: f32) -> f32 {
        match self {
            RollDirection::Right => -magnitude,
            RollDirection::Left => magnitude,
        }
    }
}

/// Sprites the renderer can show for the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sprite {
    Circle,
    Square,
    /// Circle resting on ice.
    ColdCircle,
    /// Square resting on a hot surface.
    HotSquare,
}

/// Current form plus any transient sprite layered on by contacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    form: Form,
    sprite_override: Option<Sprite>,
}

impl FormState {
    pub fn new(form: Form) -> Self {
        Self {
            form,
            sprite_override: None,
        }
    }

    pub fn form(&self) -> Form {
        self.form
    }

    pub fn is_circle(&self) -> bool {
        self.form == Form::Circle
    }

    pub fn is_square(&self) -> bool {
        self.form == Form::Square
    }

    /// The collider that should be the only enabled one.
    pub fn active_collider(&self) -> ColliderShape {
        self.form.collider()
    }

    pub fn base_sprite(&self) -> Sprite {
        self.form.base_sprite()
    }

    /// Sprite to render: the contact override if any, else the form's own.
    pub fn sprite(&self) -> Sprite {
        self.sprite_override.unwrap_or_else(|| self.base_sprite())
    }

    pub fn sprite_override(&self) -> Option<Sprite> {
        self.sprite_override
    }

    pub fn set_sprite_override(&mut self, sprite: Sprite) {
        self.sprite_override = Some(sprite);
    }

    pub fn restore_base_sprite(&mut self) {
        self.sprite_override = None;
    }

    /// Flip to the other form.
    pub fn toggle(&mut self, body: &mut dyn RigidBody, roll: RollDirection, roll_force: f32) {
        self.set_form(self.form.other(), body, roll, roll_force);
    }

    /// Switch to `form`, swapping colliders and resetting the sprite.
    ///
    /// Entering Circle releases all constraints, pushes the body along `roll`
    /// with `roll_force` and sets its velocity to the unit roll vector.
    /// Entering Square only swaps the collider; its constraints are decided
    /// each tick by the motion policy.
    pub fn set_form(
        &mut self,
        form: Form,
        body: &mut dyn RigidBody,
        roll: RollDirection,
        roll_force: f32,
    ) {
        self.form = form;
        self.sprite_override = None;

        match form {
            Form::Circle => {
                body.set_constraints(Constraints::Free);
                body.add_force(roll.unit() * roll_force);
                body.set_collider_enabled(ColliderShape::Circle, true);
                body.set_collider_enabled(ColliderShape::Box, false);
                body.set_velocity(roll.unit());
            },
            Form::Square => {
                body.set_collider_enabled(ColliderShape::Box, true);
                body.set_collider_enabled(ColliderShape::Circle, false);
            },
        }
        tracing::debug!(?form, ?roll, "form changed");
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(Form::Circle)
    }
}
