use duality_core::host::ColliderShape;

/// Fatal setup problems. Gameplay outcomes (death, level exits) are never
/// reported through this type.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerError {
    /// The entity is missing one of its two form colliders.
    MissingCollider(ColliderShape),
    /// The entity has no sprite renderer to select form sprites on.
    MissingRenderer,
    InvalidConfig(String),
    ConfigParse(String),
    /// Player state could not be encoded or decoded.
    StateEncoding(String),
}

impl std::fmt::Display for ControllerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCollider(shape) => write!(f, "entity has no {shape:?} collider"),
            Self::MissingRenderer => write!(f, "entity has no sprite renderer"),
            Self::InvalidConfig(m) => write!(f, "invalid player config: {m}"),
            Self::ConfigParse(m) => write!(f, "failed to parse player config: {m}"),
            Self::StateEncoding(m) => write!(f, "player state encoding failed: {m}"),
        }
    }
}

impl std::error::Error for ControllerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_missing_shape() {
        let err = ControllerError::MissingCollider(ColliderShape::Box);
        assert_eq!(err.to_string(), "entity has no Box collider");
    }
}
