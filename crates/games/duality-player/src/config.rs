use glam::Vec2;
use serde::{Deserialize, Serialize};

use duality_core::host::LayerMask;

use crate::contact::ContactTracking;
use crate::error::ControllerError;
use crate::form::Form;

/// Extra ray length past the collider's bottom edge.
pub const GROUND_SKIN: f32 = 0.1;
/// Square tilt magnitude in degrees; the sign follows roll direction.
pub const TILT_DEGREES: f32 = 10.0;

/// Tunable player parameters, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Form the entity takes on spawn.
    pub start_form: Form,
    pub start_position: Vec2,
    /// Spawn used when the entity arrives back from the bonus level.
    pub bonus_start_position: Vec2,
    /// Rolling impulse applied when switching into Circle.
    pub roll_force: f32,
    pub powered_roll_force: f32,
    /// Leave a grounded Square free to slide instead of pinning it.
    pub slide_on_ground: bool,
    /// Constant Square speed while on ice.
    pub ice_slide_speed: f32,
    pub powered_slide_speed: f32,
    /// Alpha lost per second while a Square sits on a hot surface. Also the
    /// melt applied to an ice platform per contact step while a Circle rolls
    /// on it.
    pub melt_speed: f32,
    pub powered_melt_speed: f32,
    pub tilt_degrees: f32,
    pub ground_skin: f32,
    pub ground_layers: LayerMask,
    pub contact_tracking: ContactTracking,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start_form: Form::Circle,
            start_position: Vec2::ZERO,
            bonus_start_position: Vec2::ZERO,
            roll_force: 1.0,
            powered_roll_force: 1.5,
            slide_on_ground: false,
            ice_slide_speed: 3.0,
            powered_slide_speed: 4.5,
            melt_speed: 0.2,
            powered_melt_speed: 0.1,
            tilt_degrees: TILT_DEGREES,
            ground_skin: GROUND_SKIN,
            ground_layers: LayerMask::layer(0),
            contact_tracking: ContactTracking::Counted,
        }
    }
}

impl PlayerConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is missing
    /// or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("DUALITY_PLAYER_CONFIG")
            .unwrap_or_else(|_| "config/player.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to load {path}: {e}, using defaults");
                    PlayerConfig::default()
                },
            },
            Err(_) => PlayerConfig::default(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ControllerError> {
        let cfg = toml::from_str::<PlayerConfig>(content)
            .map_err(|e| ControllerError::ConfigParse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ControllerError> {
        let rates = [
            ("roll_force", self.roll_force),
            ("powered_roll_force", self.powered_roll_force),
            ("ice_slide_speed", self.ice_slide_speed),
            ("powered_slide_speed", self.powered_slide_speed),
            ("melt_speed", self.melt_speed),
            ("powered_melt_speed", self.powered_melt_speed),
            ("ground_skin", self.ground_skin),
        ];
        for (name, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(ControllerError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !self.tilt_degrees.is_finite() {
            return Err(ControllerError::InvalidConfig(
                "tilt_degrees must be finite".to_string(),
            ));
        }
        if !self.start_position.is_finite() || !self.bonus_start_position.is_finite() {
            return Err(ControllerError::InvalidConfig(
                "spawn positions must be finite".to_string(),
            ));
        }
        Ok(())
    }

    pub fn roll_force(&self, powered_up: bool) -> f32 {
        if powered_up {
            self.powered_roll_force
        } else {
            self.roll_force
        }
    }

    pub fn slide_speed(&self, powered_up: bool) -> f32 {
        if powered_up {
            self.powered_slide_speed
        } else {
            self.ice_slide_speed
        }
    }

    pub fn melt_speed(&self, powered_up: bool) -> f32 {
        if powered_up {
            self.powered_melt_speed
        } else {
            self.melt_speed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(PlayerConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = PlayerConfig::from_toml_str(
            r#"
            start_form = "Square"
            melt_speed = 0.5
            start_position = [2.0, 3.0]
            contact_tracking = "LastExitClears"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.start_form, Form::Square);
        assert_eq!(cfg.melt_speed, 0.5);
        assert_eq!(cfg.start_position, Vec2::new(2.0, 3.0));
        assert_eq!(cfg.contact_tracking, ContactTracking::LastExitClears);
        assert_eq!(cfg.ice_slide_speed, PlayerConfig::default().ice_slide_speed);
    }

    #[test]
    fn shipped_config_parses() {
        let cfg = PlayerConfig::from_toml_str(include_str!("../../../../config/player.toml"))
            .expect("config/player.toml must stay valid");
        assert_eq!(cfg.ground_layers, LayerMask::layer(0));
        assert_eq!(cfg.bonus_start_position, Vec2::new(64.0, 1.0));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = PlayerConfig::from_toml_str("melt_speed = \"fast\"").unwrap_err();
        assert!(matches!(err, ControllerError::ConfigParse(_)));
    }

    #[test]
    fn negative_speed_rejected() {
        let err = PlayerConfig::from_toml_str("ice_slide_speed = -1.0").unwrap_err();
        assert!(matches!(err, ControllerError::InvalidConfig(_)));
    }

    #[test]
    fn non_finite_tilt_rejected() {
        let cfg = PlayerConfig {
            tilt_degrees: f32::NAN,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn powered_values_selected_when_powered() {
        let cfg = PlayerConfig::default();
        assert_eq!(cfg.slide_speed(true), cfg.powered_slide_speed);
        assert_eq!(cfg.slide_speed(false), cfg.ice_slide_speed);
        assert_eq!(cfg.melt_speed(true), cfg.powered_melt_speed);
        assert_eq!(cfg.roll_force(false), cfg.roll_force);
        assert_eq!(cfg.melt_speed(false), cfg.melt_speed);
    }
}
