use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// Held items. All behavior lives in the engine's handler registry and
/// damage pipeline; the schema only names them.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Item {
    /// 1.3x damage on every damaging move.
    LifeOrb,
    /// 1.5x Attack when using physical moves.
    ChoiceBand,
    /// 1.5x Special Attack when using special moves.
    ChoiceSpecs,
    /// Restores 1/16 max HP at the end of every turn.
    Leftovers,
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Item::LifeOrb => "Life Orb",
            Item::ChoiceBand => "Choice Band",
            Item::ChoiceSpecs => "Choice Specs",
            Item::Leftovers => "Leftovers",
        };
        write!(f, "{}", name)
    }
}
