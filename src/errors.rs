use crate::battle::field::SlotRef;
use schema::{MoveId, Species};
use std::fmt;

/// Errors related to content catalog lookups. A missing catalog entry is a
/// programming contract violation, never silently defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The specified species was not found in the catalog
    SpeciesNotFound(Species),
    /// The specified move was not found in the catalog
    MoveNotFound(MoveId),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::SpeciesNotFound(species) => {
                write!(f, "Species not found in catalog: {:?}", species)
            }
            CatalogError::MoveNotFound(move_id) => {
                write!(f, "Move not found in catalog: {:?}", move_id)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Errors raised while applying a single action to the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The referenced slot does not exist on the field
    InvalidSlot(SlotRef),
    /// The referenced slot has no bound combatant
    EmptySlot(SlotRef),
    /// The referenced party index does not exist
    InvalidPartyIndex(usize),
    /// The referenced move slot is empty or out of bounds
    InvalidMoveSlot(usize),
    /// A catalog lookup failed mid-execution
    Catalog(CatalogError),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::InvalidSlot(slot) => write!(f, "Invalid slot reference: {:?}", slot),
            ActionError::EmptySlot(slot) => write!(f, "No combatant bound to slot: {:?}", slot),
            ActionError::InvalidPartyIndex(index) => write!(f, "Invalid party index: {}", index),
            ActionError::InvalidMoveSlot(index) => write!(f, "Invalid move slot: {}", index),
            ActionError::Catalog(err) => write!(f, "Catalog error: {}", err),
        }
    }
}

impl std::error::Error for ActionError {}

impl From<CatalogError> for ActionError {
    fn from(err: CatalogError) -> Self {
        ActionError::Catalog(err)
    }
}

/// Errors raised by the battle flow state machine when it is driven out of
/// order or constructed without a required collaborator.
#[derive(Debug)]
pub enum FlowError {
    /// A flow method was called in the wrong phase
    InvalidPhase {
        expected: &'static str,
        actual: String,
    },
    /// A party was empty or otherwise unusable at field creation
    InvalidParty(String),
    /// The state validator reported violations at battle start
    Validation(Vec<crate::battle::validation::Violation>),
    /// An action failed to apply during turn execution
    Action(ActionError),
    /// A catalog lookup failed during setup
    Catalog(CatalogError),
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowError::InvalidPhase { expected, actual } => {
                write!(f, "Flow is in phase {}, expected {}", actual, expected)
            }
            FlowError::InvalidParty(details) => write!(f, "Invalid party: {}", details),
            FlowError::Validation(violations) => write!(
                f,
                "Field validation failed with {} violation(s)",
                violations.len()
            ),
            FlowError::Action(err) => write!(f, "Action execution error: {}", err),
            FlowError::Catalog(err) => write!(f, "Catalog error: {}", err),
        }
    }
}

impl std::error::Error for FlowError {}

impl From<ActionError> for FlowError {
    fn from(err: ActionError) -> Self {
        FlowError::Action(err)
    }
}

impl From<CatalogError> for FlowError {
    fn from(err: CatalogError) -> Self {
        FlowError::Catalog(err)
    }
}
