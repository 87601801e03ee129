use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum ElementType {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Steel,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
    Fairy,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl ElementType {
    /// Calculate the type effectiveness multiplier for one attacking type
    /// against one defending type.
    /// Returns: 2.0 = Super Effective, 1.0 = Normal, 0.5 = Not Very Effective,
    /// 0.0 = No Effect. Dual-typed defenders multiply the two lookups.
    pub fn type_effectiveness(attacking: ElementType, defending: ElementType) -> f64 {
        use ElementType::*;

        match (attacking, defending) {
            // Normal
            (Normal, Ghost) => 0.0,
            (Normal, Rock) | (Normal, Steel) => 0.5,
            (Normal, _) => 1.0,

            // Fighting
            (Fighting, Ghost) => 0.0,
            (Fighting, Normal) | (Fighting, Rock) | (Fighting, Steel) | (Fighting, Ice)
            | (Fighting, Dark) => 2.0,
            (Fighting, Flying) | (Fighting, Poison) | (Fighting, Bug) | (Fighting, Psychic)
            | (Fighting, Fairy) => 0.5,
            (Fighting, _) => 1.0,

            // Flying
            (Flying, Fighting) | (Flying, Bug) | (Flying, Grass) => 2.0,
            (Flying, Rock) | (Flying, Steel) | (Flying, Electric) => 0.5,
            (Flying, _) => 1.0,

            // Poison
            (Poison, Steel) => 0.0,
            (Poison, Grass) | (Poison, Fairy) => 2.0,
            (Poison, Poison) | (Poison, Ground) | (Poison, Rock) | (Poison, Ghost) => 0.5,
            (Poison, _) => 1.0,

            // Ground
            (Ground, Flying) => 0.0,
            (Ground, Poison) | (Ground, Rock) | (Ground, Steel) | (Ground, Fire)
            | (Ground, Electric) => 2.0,
            (Ground, Bug) | (Ground, Grass) => 0.5,
            (Ground, _) => 1.0,

            // Rock
            (Rock, Flying) | (Rock, Bug) | (Rock, Fire) | (Rock, Ice) => 2.0,
            (Rock, Fighting) | (Rock, Ground) | (Rock, Steel) => 0.5,
            (Rock, _) => 1.0,

            // Bug
            (Bug, Grass) | (Bug, Psychic) | (Bug, Dark) => 2.0,
            (Bug, Fighting) | (Bug, Flying) | (Bug, Poison) | (Bug, Ghost) | (Bug, Steel)
            | (Bug, Fire) | (Bug, Fairy) => 0.5,
            (Bug, _) => 1.0,

            // Ghost
            (Ghost, Normal) => 0.0,
            (Ghost, Ghost) | (Ghost, Psychic) => 2.0,
            (Ghost, Dark) => 0.5,
            (Ghost, _) => 1.0,

            // Steel
            (Steel, Rock) | (Steel, Ice) | (Steel, Fairy) => 2.0,
            (Steel, Steel) | (Steel, Fire) | (Steel, Water) | (Steel, Electric) => 0.5,
            (Steel, _) => 1.0,

            // Fire
            (Fire, Bug) | (Fire, Steel) | (Fire, Grass) | (Fire, Ice) => 2.0,
            (Fire, Rock) | (Fire, Fire) | (Fire, Water) | (Fire, Dragon) => 0.5,
            (Fire, _) => 1.0,

            // Water
            (Water, Ground) | (Water, Rock) | (Water, Fire) => 2.0,
            (Water, Water) | (Water, Grass) | (Water, Dragon) => 0.5,
            (Water, _) => 1.0,

            // Grass
            (Grass, Ground) | (Grass, Rock) | (Grass, Water) => 2.0,
            (Grass, Flying) | (Grass, Poison) | (Grass, Bug) | (Grass, Steel) | (Grass, Fire)
            | (Grass, Grass) | (Grass, Dragon) => 0.5,
            (Grass, _) => 1.0,

            // Electric
            (Electric, Ground) => 0.0,
            (Electric, Flying) | (Electric, Water) => 2.0,
            (Electric, Grass) | (Electric, Electric) | (Electric, Dragon) => 0.5,
            (Electric, _) => 1.0,

            // Psychic
            (Psychic, Dark) => 0.0,
            (Psychic, Fighting) | (Psychic, Poison) => 2.0,
            (Psychic, Steel) | (Psychic, Psychic) => 0.5,
            (Psychic, _) => 1.0,

            // Ice
            (Ice, Flying) | (Ice, Ground) | (Ice, Grass) | (Ice, Dragon) => 2.0,
            (Ice, Steel) | (Ice, Fire) | (Ice, Water) | (Ice, Ice) => 0.5,
            (Ice, _) => 1.0,

            // Dragon
            (Dragon, Fairy) => 0.0,
            (Dragon, Dragon) => 2.0,
            (Dragon, Steel) => 0.5,
            (Dragon, _) => 1.0,

            // Dark
            (Dark, Ghost) | (Dark, Psychic) => 2.0,
            (Dark, Fighting) | (Dark, Dark) | (Dark, Fairy) => 0.5,
            (Dark, _) => 1.0,

            // Fairy
            (Fairy, Fighting) | (Fairy, Dragon) | (Fairy, Dark) => 2.0,
            (Fairy, Poison) | (Fairy, Steel) | (Fairy, Fire) => 0.5,
            (Fairy, _) => 1.0,
        }
    }

    /// Combined effectiveness against a (possibly dual-typed) defender.
    pub fn effectiveness_against(attacking: ElementType, defender_types: &[ElementType]) -> f64 {
        defender_types
            .iter()
            .map(|defending| Self::type_effectiveness(attacking, *defending))
            .product()
    }
}
