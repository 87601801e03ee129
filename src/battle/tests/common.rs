//! Shared helpers for the battle tests: quick creature construction,
//! pre-bound singles fields, and flows wired to scripted decisions.

use crate::battle::actions::ChosenAction;
use crate::battle::field::{Field, SideId, SlotRef};
use crate::battle::flow::BattleFlow;
use crate::battle::side::Side;
use crate::config::BattleConfig;
use crate::creature::CreatureInst;
use crate::provider::ScriptedProvider;
use crate::rng::{RandomSource, ScriptedRandom};
use schema::{MoveId, Species};

pub const PLAYER: SlotRef = SlotRef {
    side: SideId::Player,
    slot: 0,
};
pub const ENEMY: SlotRef = SlotRef {
    side: SideId::Enemy,
    slot: 0,
};

pub fn creature(species: Species, level: u8, moves: Vec<MoveId>) -> CreatureInst {
    CreatureInst::new(species, level, moves).expect("catalog entry")
}

/// A creature with its HP forced to a round number, for arithmetic that
/// should be readable in the test.
pub fn creature_with_hp(species: Species, level: u8, moves: Vec<MoveId>, hp: u16) -> CreatureInst {
    let mut c = creature(species, level, moves);
    assert!(c.max_hp <= hp, "pick a species/level combo below {} HP", hp);
    c.max_hp = hp;
    c.heal(hp);
    c
}

/// A singles field with one combatant per side, already bound.
pub fn singles_field(player: CreatureInst, enemy: CreatureInst) -> Field {
    let mut field = Field::new(Side::new(vec![player], 1), Side::new(vec![enemy], 1));
    field.side_mut(SideId::Player).slots[0].bind(0);
    field.side_mut(SideId::Enemy).slots[0].bind(0);
    field
}

/// A singles flow with scripted choices per side and the given random
/// source. Empty choice lists fall back to the first usable move.
pub fn scripted_flow(
    player_party: Vec<CreatureInst>,
    enemy_party: Vec<CreatureInst>,
    player_choices: Vec<ChosenAction>,
    enemy_choices: Vec<ChosenAction>,
    rng: Box<dyn RandomSource>,
) -> BattleFlow {
    BattleFlow::new(
        player_party,
        enemy_party,
        BattleConfig::default(),
        Box::new(ScriptedProvider::new(player_choices)),
        Box::new(ScriptedProvider::new(enemy_choices)),
        rng,
    )
    .expect("valid flow setup")
}

/// Choose move 0 at the usual opposite slot.
pub fn attack(target: SlotRef) -> ChosenAction {
    ChosenAction::Move {
        move_index: 0,
        target,
    }
}

/// A long midline script: percent rolls land at 50, crit rolls miss,
/// damage variance sits mid-range.
pub fn midline_rng() -> Box<ScriptedRandom> {
    Box::new(ScriptedRandom::midline(256))
}
