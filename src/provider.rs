use crate::battle::actions::ChosenAction;
use crate::battle::field::{Field, SideId, SlotRef};
use std::collections::VecDeque;

/// Supplies decisions for one side. The flow calls `choose_action` once
/// per occupied slot at the start of a turn, and `choose_replacement`
/// whenever a slot must be refilled after a faint.
pub trait ActionProvider {
    /// `None` is a pass: the slot does nothing this turn. The engine
    /// tolerates it and never asks again.
    fn choose_action(&mut self, field: &Field, slot: SlotRef) -> Option<ChosenAction>;

    /// Pick a reserve to send out. The default takes the first healthy
    /// one; `None` is only legal when no reserve remains.
    fn choose_replacement(&mut self, field: &Field, side: SideId) -> Option<usize> {
        field.side(side).first_healthy_reserve()
    }
}

/// Always attacks with the first move that still has PP, aimed at the
/// first opposing combatant. The simplest legal opponent.
#[derive(Debug, Default)]
pub struct FirstMoveProvider;

impl ActionProvider for FirstMoveProvider {
    fn choose_action(&mut self, field: &Field, slot: SlotRef) -> Option<ChosenAction> {
        let target = field
            .opposing_refs(slot)
            .first()
            .copied()
            .unwrap_or(SlotRef::new(slot.side.opponent(), 0));

        let move_index = field
            .creature_at(slot)
            .ok()
            .and_then(|c| {
                c.moves
                    .iter()
                    .position(|m| m.map(|m| m.pp > 0).unwrap_or(false))
            })
            .unwrap_or(0);

        Some(ChosenAction::Move { move_index, target })
    }
}

/// Plays back a fixed list of choices, then falls through to
/// `FirstMoveProvider`. Used by tests to script exact turns.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    choices: VecDeque<ChosenAction>,
    fallback: FirstMoveProvider,
}

impl ScriptedProvider {
    pub fn new(choices: Vec<ChosenAction>) -> Self {
        Self {
            choices: choices.into(),
            fallback: FirstMoveProvider,
        }
    }
}

impl ActionProvider for ScriptedProvider {
    fn choose_action(&mut self, field: &Field, slot: SlotRef) -> Option<ChosenAction> {
        match self.choices.pop_front() {
            Some(choice) => Some(choice),
            None => self.fallback.choose_action(field, slot),
        }
    }
}
