use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// Passive abilities. All behavior lives in the engine's handler registry;
/// the schema only names them.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Ability {
    /// Lowers the Attack of each opposing combatant on switch-in.
    Intimidate,
    /// 1.5x Fire damage at or below 1/3 HP.
    Blaze,
    /// 1.5x Water damage at or below 1/3 HP.
    Torrent,
    /// 1.5x Grass damage at or below 1/3 HP.
    Overgrow,
    /// 30% to paralyze attackers that make contact.
    Static,
    /// Attackers that make contact lose 1/8 of their max HP.
    RoughSkin,
    /// +1 Attack whenever this combatant's move faints an opponent.
    Moxie,
    /// +1 Speed at the end of every turn.
    SpeedBoost,
    /// Immune to Ground-type moves.
    Levitate,
    /// Physical damage is not halved by burn.
    Guts,
    /// +1 Defense whenever this combatant takes move damage.
    Stamina,
    /// Skips its move every second turn on the field.
    Truant,
    /// Reacts to weather changes.
    Forecast,
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Ability::Intimidate => "Intimidate",
            Ability::Blaze => "Blaze",
            Ability::Torrent => "Torrent",
            Ability::Overgrow => "Overgrow",
            Ability::Static => "Static",
            Ability::RoughSkin => "Rough Skin",
            Ability::Moxie => "Moxie",
            Ability::SpeedBoost => "Speed Boost",
            Ability::Levitate => "Levitate",
            Ability::Guts => "Guts",
            Ability::Stamina => "Stamina",
            Ability::Truant => "Truant",
            Ability::Forecast => "Forecast",
        };
        write!(f, "{}", name)
    }
}
