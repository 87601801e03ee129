use crate::battle::field::{SideId, SlotRef};
use crate::battle::slot::VolatileStatus;
use schema::{Hazard, MoveCategory, MoveId, Room, Screen, SideFlag, Stat, StatusKind, Terrain, Weather};
use serde::{Deserialize, Serialize};

/// A condition applied to one whole side.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideCondition {
    Screen(Screen),
    Hazard(Hazard),
    Flag(SideFlag),
}

/// One unit of work on the action queue. Applying an action is the only
/// way battle state changes during a turn; everything a move, ability, or
/// item does is expressed as more actions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Action {
    /// Execute a selected move. Expands into damage, effect, and message
    /// actions which are spliced ahead of the remaining queue.
    UseMove {
        user: SlotRef,
        target: SlotRef,
        move_index: usize,
    },
    /// Swap the bound combatant for a party reserve.
    Switch {
        slot: SlotRef,
        party_index: usize,
    },
    /// HP loss. `category` is set for direct move damage, which feeds the
    /// Counter and Mirror Coat ledgers; indirect damage leaves it `None`.
    Damage {
        target: SlotRef,
        amount: u16,
        category: Option<MoveCategory>,
        source: Option<SlotRef>,
    },
    Heal {
        target: SlotRef,
        amount: u16,
    },
    StatChange {
        target: SlotRef,
        stat: Stat,
        delta: i8,
    },
    /// Inflict a persistent status. `sleep_turns` is pre-rolled so the
    /// application itself is deterministic.
    ApplyStatus {
        target: SlotRef,
        kind: StatusKind,
        sleep_turns: u8,
    },
    /// Raise a volatile flag on a slot (flinch, protection).
    SetVolatile {
        target: SlotRef,
        volatile: VolatileStatus,
    },
    /// Removal of a fainted combatant from its slot. `caused_by` names the
    /// attacker whose move did it, when there is one.
    Faint {
        target: SlotRef,
        caused_by: Option<SlotRef>,
    },
    SetWeather {
        weather: Weather,
        turns: u8,
    },
    SetTerrain {
        terrain: Terrain,
        turns: u8,
    },
    SetRoom {
        room: Room,
        turns: u8,
    },
    SetSideCondition {
        side: SideId,
        condition: SideCondition,
    },
    /// Narration only; applying it changes nothing.
    Message(String),
}

impl Action {
    /// Direct move damage, as opposed to chip or reactive damage.
    pub fn is_move_damage(&self) -> bool {
        matches!(
            self,
            Action::Damage {
                category: Some(_),
                ..
            }
        )
    }
}

/// What a provider picked for one slot at the start of a turn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChosenAction {
    Move {
        move_index: usize,
        target: SlotRef,
    },
    Switch {
        party_index: usize,
    },
}

impl ChosenAction {
    /// The ordering bracket: switches resolve before any move.
    pub fn priority(self, move_priority: i8) -> i8 {
        match self {
            ChosenAction::Switch { .. } => 6,
            ChosenAction::Move { .. } => move_priority,
        }
    }

    pub fn move_id_at(self, field: &crate::battle::field::Field, user: SlotRef) -> Option<MoveId> {
        match self {
            ChosenAction::Move { move_index, .. } => field
                .creature_at(user)
                .ok()?
                .moves
                .get(move_index)?
                .map(|m| m.move_id),
            ChosenAction::Switch { .. } => None,
        }
    }
}
