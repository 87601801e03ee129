use crate::battle::actions::Action;
use crate::battle::executor::Executor;
use crate::battle::field::Field;
use crate::battle::queue::ActionQueue;
use crate::battle::slot::VolatileStatus;
use crate::battle::tests::common::*;
use crate::observer::BattleObserver;
use crate::rng::{RandomSource, ScriptedRandom};
use pretty_assertions::assert_eq;
use rstest::rstest;
use schema::{MoveId, Species};

fn run_actions(field: &mut Field, actions: Vec<Action>, rng: &mut dyn RandomSource) {
    let mut queue = ActionQueue::new();
    for action in actions {
        queue.push_back(action);
    }
    let mut observers: Vec<Box<dyn BattleObserver>> = Vec::new();
    Executor::new()
        .run(&mut queue, field, rng, &mut observers)
        .unwrap();
}

fn protect_field() -> Field {
    singles_field(
        creature(Species::Chansey, 50, vec![MoveId::Protect, MoveId::Tackle]),
        creature(Species::Machamp, 50, vec![MoveId::Tackle]),
    )
}

fn use_protect() -> Action {
    Action::UseMove {
        user: PLAYER,
        target: ENEMY,
        move_index: 0,
    }
}

#[rstest]
#[case(0, 1000)]
#[case(1, 500)]
#[case(2, 250)]
#[case(3, 125)]
fn test_success_odds_halve_per_consecutive_use(#[case] streak: u8, #[case] threshold: u32) {
    // Last roll under the threshold succeeds, and the streak advances.
    let mut field = protect_field();
    field.slot_mut(PLAYER).unwrap().protect_count = streak;
    let mut rng = ScriptedRandom::new(vec![threshold - 1]);
    run_actions(&mut field, vec![use_protect()], &mut rng);
    let slot = field.slot(PLAYER).unwrap();
    assert!(slot.volatiles.contains(VolatileStatus::PROTECTED));
    assert_eq!(slot.protect_count, streak + 1);

    // A fresh use cannot fail; a failing roll only exists once the odds
    // have halved at least once.
    if streak == 0 {
        return;
    }

    // First roll at the threshold fails, but the streak still advanced.
    let mut field = protect_field();
    field.slot_mut(PLAYER).unwrap().protect_count = streak;
    let mut rng = ScriptedRandom::new(vec![threshold]);
    run_actions(&mut field, vec![use_protect()], &mut rng);
    let slot = field.slot(PLAYER).unwrap();
    assert!(!slot.volatiles.contains(VolatileStatus::PROTECTED));
    assert_eq!(slot.protect_count, streak + 1);
}

#[test]
fn test_protection_blocks_an_incoming_move() {
    let mut field = protect_field();
    let hp = field.creature_at(PLAYER).unwrap().current_hp();

    // Protect first (priority would sort it first in a real turn), then
    // the opposing Tackle bounces off.
    let mut rng = ScriptedRandom::midline(64);
    run_actions(
        &mut field,
        vec![
            use_protect(),
            Action::UseMove {
                user: ENEMY,
                target: PLAYER,
                move_index: 0,
            },
        ],
        &mut rng,
    );
    assert_eq!(field.creature_at(PLAYER).unwrap().current_hp(), hp);
}

#[test]
fn test_streak_resets_after_a_turn_without_protecting() {
    let mut field = protect_field();
    let mut rng = ScriptedRandom::midline(64);
    run_actions(&mut field, vec![use_protect()], &mut rng);
    assert_eq!(field.slot(PLAYER).unwrap().protect_count, 1);

    // End-of-turn housekeeping with the protect-class flag set keeps the
    // streak; a turn without it clears the counter.
    field.slot_mut(PLAYER).unwrap().end_of_turn_reset();
    assert_eq!(field.slot(PLAYER).unwrap().protect_count, 1);

    field.slot_mut(PLAYER).unwrap().end_of_turn_reset();
    assert_eq!(field.slot(PLAYER).unwrap().protect_count, 0);
}
