use serde::{Deserialize, Serialize};

use duality_core::host::{LevelFlow, SpawnStore};

use crate::PlayerState;
use crate::form::Sprite;

/// Default melt an ice platform absorbs before it is gone.
pub const ICE_CAPACITY: f32 = 1.0;

/// Closed set of surface kinds a contacted body can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceKind {
    Ice,
    Hot,
    Moving,
    Spike,
    Bonus,
    Win,
    Death,
    Normal,
}

/// What the contact tracker must do after a surface has reacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    None,
    Die,
    EnteredBonus,
    Won,
    IceMelted,
}

/// Melt accumulator owned by an ice platform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IcePlatform {
    progress: f32,
    capacity: f32,
}

impl IcePlatform {
    pub fn new(capacity: f32) -> Self {
        Self {
            progress: 0.0,
            capacity: capacity.max(0.0),
        }
    }

    /// Add `rate` to the melt progress. Returns true on the call that melts
    /// the platform away; later calls do nothing.
    pub fn melt(&mut self, rate: f32) -> bool {
        if self.is_melted() || !rate.is_finite() || rate <= 0.0 {
            return false;
        }
        self.progress = (self.progress + rate).min(self.capacity);
        self.is_melted()
    }

    pub fn is_melted(&self) -> bool {
        self.progress >= self.capacity
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }
}

impl Default for IcePlatform {
    fn default() -> Self {
        Self::new(ICE_CAPACITY)
    }
}

/// One-shot level transition (bonus entrance or goal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LevelTrigger {
    fired: bool,
}

impl LevelTrigger {
    /// Returns true the first time only.
    pub fn fire(&mut self) -> bool {
        !std::mem::replace(&mut self.fired, true)
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// A contacted surface together with any state its kind owns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Surface {
    Ice(IcePlatform),
    Hot,
    Moving,
    Spike,
    Bonus(LevelTrigger),
    Win(LevelTrigger),
    Death,
    Normal,
}

impl Surface {
    pub fn ice() -> Self {
        Surface::Ice(IcePlatform::default())
    }

    pub fn bonus() -> Self {
        Surface::Bonus(LevelTrigger::default())
    }

    pub fn win() -> Self {
        Surface::Win(LevelTrigger::default())
    }

    pub fn from_kind(kind: SurfaceKind) -> Self {
        match kind {
            SurfaceKind::Ice => Surface::ice(),
            SurfaceKind::Hot => Surface::Hot,
            SurfaceKind::Moving => Surface::Moving,
            SurfaceKind::Spike => Surface::Spike,
            SurfaceKind::Bonus => Surface::bonus(),
            SurfaceKind::Win => Surface::win(),
            SurfaceKind::Death => Surface::Death,
            SurfaceKind::Normal => Surface::Normal,
        }
    }

    pub fn kind(&self) -> SurfaceKind {
        match self {
            Surface::Ice(_) => SurfaceKind::Ice,
            Surface::Hot => SurfaceKind::Hot,
            Surface::Moving => SurfaceKind::Moving,
            Surface::Spike => SurfaceKind::Spike,
            Surface::Bonus(_) => SurfaceKind::Bonus,
            Surface::Win(_) => SurfaceKind::Win,
            Surface::Death => SurfaceKind::Death,
            Surface::Normal => SurfaceKind::Normal,
        }
    }

    /// Mark the contact flag for this kind and apply the entry reaction.
    pub fn on_contact_begin<H>(&mut self, state: &mut PlayerState, host: &mut H) -> Reaction
    where
        H: SpawnStore + LevelFlow + ?Sized,
    {
        match self {
            Surface::Ice(_) => {
                state.contacts.begin(SurfaceKind::Ice);
                if state.form.is_circle() {
                    state.form.set_sprite_override(Sprite::ColdCircle);
                } else {
                    state.form.restore_base_sprite();
                }
                Reaction::None
            },
            Surface::Hot => {
                state.contacts.begin(SurfaceKind::Hot);
                if state.form.is_square() {
                    state.form.set_sprite_override(Sprite::HotSquare);
                } else {
                    state.form.restore_base_sprite();
                }
                Reaction::None
            },
            Surface::Moving => {
                state.contacts.begin(SurfaceKind::Moving);
                Reaction::None
            },
            Surface::Spike | Surface::Death => Reaction::Die,
            Surface::Bonus(trigger) => {
                if !trigger.fire() {
                    return Reaction::None;
                }
                host.set_arrived_via_bonus();
                host.load_bonus_level();
                Reaction::EnteredBonus
            },
            Surface::Win(trigger) => {
                if !trigger.fire() {
                    return Reaction::None;
                }
                host.end_level();
                Reaction::Won
            },
            Surface::Normal => Reaction::None,
        }
    }

    /// Ongoing contact. Only ice reacts, and only to a rolling Circle.
    pub fn on_contact_persist(&mut self, state: &PlayerState, melt_rate: f32) -> Reaction {
        match self {
            Surface::Ice(ice) if state.form.is_circle() => {
                if ice.melt(melt_rate) {
                    Reaction::IceMelted
                } else {
                    Reaction::None
                }
            },
            _ => Reaction::None,
        }
    }

    /// Release the contact flag; the base sprite returns once the last
    /// contact of an ice or hot kind is gone.
    pub fn on_contact_end(&mut self, state: &mut PlayerState) {
        let kind = self.kind();
        match kind {
            SurfaceKind::Ice | SurfaceKind::Hot => {
                if state.contacts.end(kind) {
                    state.form.restore_base_sprite();
                }
            },
            SurfaceKind::Moving => {
                state.contacts.end(kind);
            },
            _ => {},
        }
    }
}

impl From<SurfaceKind> for Surface {
    fn from(kind: SurfaceKind) -> Self {
        Surface::from_kind(kind)
    }
}

/// The other body in a collision, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactedBody {
    /// Rotation about z in degrees; sloped platforms redirect rolling.
    pub rotation_degrees: f32,
    /// `None` for bodies without a surface component.
    pub surface: Option<Surface>,
}

impl ContactedBody {
    pub fn new(surface: Surface) -> Self {
        Self {
            rotation_degrees: 0.0,
            surface: Some(surface),
        }
    }

    pub fn plain() -> Self {
        Self {
            rotation_degrees: 0.0,
            surface: None,
        }
    }

    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation_degrees = degrees;
        self
    }

    pub fn kind(&self) -> Option<SurfaceKind> {
        self.surface.as_ref().map(Surface::kind)
    }
}
