use serde::{Deserialize, Serialize};
use std::fmt;

/// Global weather states. At most one is active at a time.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weather {
    Sun,
    Rain,
    Sandstorm,
    Hail,
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weather::Sun => "harsh sunlight",
            Weather::Rain => "rain",
            Weather::Sandstorm => "sandstorm",
            Weather::Hail => "hail",
        };
        write!(f, "{}", name)
    }
}

/// Global terrain states. At most one is active at a time; terrain only
/// affects grounded combatants.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terrain {
    Electric,
    Grassy,
    Psychic,
    Misty,
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Terrain::Electric => "Electric Terrain",
            Terrain::Grassy => "Grassy Terrain",
            Terrain::Psychic => "Psychic Terrain",
            Terrain::Misty => "Misty Terrain",
        };
        write!(f, "{}", name)
    }
}

/// Room effects: field-wide toggles with a duration. Setting an already
/// active room clears it instead.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Room {
    /// Inverts all speed comparisons in turn ordering while active.
    TrickRoom,
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Room::TrickRoom => write!(f, "Trick Room"),
        }
    }
}

/// Damage-reducing screens owned by one side.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Reduces physical damage.
    Reflect,
    /// Reduces special damage.
    LightScreen,
    /// Reduces both categories.
    AuroraVeil,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Reflect => "Reflect",
            Screen::LightScreen => "Light Screen",
            Screen::AuroraVeil => "Aurora Veil",
        };
        write!(f, "{}", name)
    }
}

/// Entry hazards laid on one side. Spikes stack to three layers and
/// Toxic Spikes to two; the others are single-layer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hazard {
    Spikes,
    ToxicSpikes,
    StealthRock,
    StickyWeb,
}

impl Hazard {
    pub fn max_layers(self) -> u8 {
        match self {
            Hazard::Spikes => 3,
            Hazard::ToxicSpikes => 2,
            Hazard::StealthRock | Hazard::StickyWeb => 1,
        }
    }
}

impl fmt::Display for Hazard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Hazard::Spikes => "Spikes",
            Hazard::ToxicSpikes => "Toxic Spikes",
            Hazard::StealthRock => "Stealth Rock",
            Hazard::StickyWeb => "Sticky Web",
        };
        write!(f, "{}", name)
    }
}

/// Other side-wide conditions.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideFlag {
    /// Doubles effective Speed of the side's combatants while active.
    Tailwind,
    /// Blocks new persistent status on the side's combatants.
    Safeguard,
    /// Blocks stat-stage reductions inflicted by opponents.
    Mist,
}

impl fmt::Display for SideFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SideFlag::Tailwind => "Tailwind",
            SideFlag::Safeguard => "Safeguard",
            SideFlag::Mist => "Mist",
        };
        write!(f, "{}", name)
    }
}
