use crate::element::ElementType;
use crate::field_kinds::{Hazard, Room, Screen, SideFlag, Terrain, Weather};
use crate::stats::Stat;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// Damage category of a move.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveCategory {
    Physical,
    Special,
    /// No damage; the move only carries effects.
    Status,
}

/// Persistent status kinds as declared by move data. The runtime
/// representation (with sleep/toxic counters) lives in the engine.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    Burn,
    Poison,
    BadlyPoison,
    Paralysis,
    Sleep,
    Freeze,
}

/// Which combatant an effect applies to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTarget {
    User,
    Opponent,
}

/// Declarative effect attached to a move. The engine has exactly one
/// processor per variant; adding a variant here is a compile error until
/// every match in the engine handles it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum MoveEffect {
    Status {
        status: StatusKind,
        chance: u8,
        target: EffectTarget,
    },
    StatChange {
        stat: Stat,
        delta: i8,
        chance: u8,
        target: EffectTarget,
    },
    /// Heal the user by a percentage of its max HP.
    Heal { percent_max_hp: u8 },
    /// Heal the user by a percentage of the damage just dealt.
    Drain { percent_of_damage: u8 },
    /// Damage the user by a percentage of the damage just dealt.
    Recoil { percent_of_damage: u8 },
    Flinch { chance: u8 },
    /// Shields the user this turn; success halves per consecutive use.
    Protect,
    /// Returns double the physical damage the user took this turn.
    Counter,
    /// Returns double the special damage the user took this turn.
    MirrorCoat,
    /// The move strikes min..=max times, each hit rolled independently.
    MultiHit { min_hits: u8, max_hits: u8 },
    /// Damage ignores the pipeline entirely.
    FixedDamage { amount: u16 },
    SetWeather { weather: Weather },
    SetTerrain { terrain: Terrain },
    SetRoom { room: Room },
    SetScreen { screen: Screen },
    SetHazard { hazard: Hazard },
    SetSideFlag { flag: SideFlag },
}

/// Static definition of a move, looked up from the catalog by `MoveId`.
/// Catalog entries never cross the persistence boundary; only `MoveId` does.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MoveData {
    pub name: &'static str,
    pub element: ElementType,
    pub category: MoveCategory,
    /// 0 for status moves and fixed-damage moves.
    pub power: u16,
    /// None never misses.
    pub accuracy: Option<u8>,
    pub pp: u8,
    pub priority: i8,
    pub makes_contact: bool,
    pub effects: Vec<MoveEffect>,
}

impl MoveData {
    pub fn is_damaging(&self) -> bool {
        self.power > 0
            || self
                .effects
                .iter()
                .any(|e| matches!(e, MoveEffect::FixedDamage { .. }))
    }

    /// Protect-class moves share the consecutive-use counter.
    pub fn is_protect_class(&self) -> bool {
        self.effects.iter().any(|e| matches!(e, MoveEffect::Protect))
    }
}

/// Identifier for every move the built-in catalog knows about.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum MoveId {
    // Physical
    Tackle,
    QuickAttack,
    BodySlam,
    DoubleEdge,
    TakeDown,
    DoubleKick,
    FurySwipes,
    RockSlide,
    IronHead,
    Earthquake,
    Bite,
    Counter,
    // Special
    ThunderShock,
    Thunderbolt,
    WaterGun,
    Surf,
    Ember,
    Flamethrower,
    RazorLeaf,
    GigaDrain,
    IceBeam,
    Psybeam,
    DragonRage,
    SonicBoom,
    MirrorCoat,
    // Status
    Growl,
    TailWhip,
    StringShot,
    SwordsDance,
    Agility,
    ThunderWave,
    Toxic,
    WillOWisp,
    Hypnosis,
    Recover,
    Protect,
    Reflect,
    LightScreen,
    AuroraVeil,
    Tailwind,
    Safeguard,
    Mist,
    Spikes,
    ToxicSpikes,
    StealthRock,
    StickyWeb,
    RainDance,
    SunnyDay,
    Sandstorm,
    Hail,
    ElectricTerrain,
    GrassyTerrain,
    TrickRoom,
}

impl fmt::Display for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // CamelCase variant names become Title Case with spaces.
        let debug = format!("{:?}", self);
        let mut out = String::with_capacity(debug.len() + 4);
        for (i, c) in debug.chars().enumerate() {
            if i > 0 && c.is_uppercase() {
                out.push(' ');
            }
            out.push(c);
        }
        write!(f, "{}", out)
    }
}
