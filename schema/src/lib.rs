// Creature Battle Schema - Shared type definitions
// This crate contains the core enums and data structs shared between the
// battle engine and anything that feeds content into it. The engine treats
// everything in here as an immutable catalog surface: it reads these types,
// it never mutates them.

pub use abilities::*;
pub use element::*;
pub use field_kinds::*;
pub use items::*;
pub use moves::*;
pub use species::*;
pub use stats::*;

pub mod abilities;
pub mod element;
pub mod field_kinds;
pub mod items;
pub mod moves;
pub mod species;
pub mod stats;
