use crate::element::ElementType;
use crate::stats::BaseStats;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// Identifier for every species the built-in catalog knows about.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Species {
    Pikachu,
    Squirtle,
    Charmander,
    Bulbasaur,
    Snorlax,
    Chansey,
    Geodude,
    Gengar,
    Gyarados,
    Machamp,
    Alakazam,
    Dragonite,
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Static definition of a species, looked up from the catalog.
/// Catalog entries never cross the persistence boundary; only `Species` does.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SpeciesData {
    pub name: &'static str,
    pub primary_type: ElementType,
    pub secondary_type: Option<ElementType>,
    pub base_stats: BaseStats,
}

impl SpeciesData {
    /// The species' types as a slice-friendly vector (one or two entries).
    pub fn types(&self) -> Vec<ElementType> {
        match self.secondary_type {
            Some(secondary) => vec![self.primary_type, secondary],
            None => vec![self.primary_type],
        }
    }
}
