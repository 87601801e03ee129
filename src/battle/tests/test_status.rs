use crate::battle::actions::Action;
use crate::battle::end_of_turn::run_end_of_turn;
use crate::battle::executor::Executor;
use crate::battle::field::Field;
use crate::battle::queue::ActionQueue;
use crate::battle::tests::common::*;
use crate::creature::StatusCondition;
use crate::observer::BattleObserver;
use crate::rng::{RandomSource, ScriptedRandom};
use pretty_assertions::assert_eq;
use schema::{MoveId, Species, Weather};

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

fn upkeep(field: &mut Field, rng: &mut dyn RandomSource) {
    let mut observers: Vec<Box<dyn BattleObserver>> = Vec::new();
    run_end_of_turn(&Executor::new(), field, rng, &mut observers).unwrap();
}

#[test]
fn test_toxic_damage_escalates() {
    // 100 max HP makes the escalation legible: 6, then 12, then 18.
    let mut field = singles_field(
        creature_with_hp(Species::Pikachu, 50, vec![MoveId::Tackle], 100),
        creature(Species::Snorlax, 50, vec![MoveId::Tackle]),
    );
    field.creature_at_mut(PLAYER).unwrap().status =
        Some(StatusCondition::BadlyPoisoned { counter: 1 });

    let mut rng = ScriptedRandom::midline(64);
    upkeep(&mut field, &mut rng);
    assert_eq!(field.creature_at(PLAYER).unwrap().current_hp(), 94);

    upkeep(&mut field, &mut rng);
    assert_eq!(field.creature_at(PLAYER).unwrap().current_hp(), 82);

    upkeep(&mut field, &mut rng);
    assert_eq!(field.creature_at(PLAYER).unwrap().current_hp(), 64);
}

#[test]
fn test_burn_ticks_a_sixteenth() {
    let mut field = singles_field(
        creature_with_hp(Species::Pikachu, 50, vec![MoveId::Tackle], 96),
        creature(Species::Snorlax, 50, vec![MoveId::Tackle]),
    );
    field.creature_at_mut(PLAYER).unwrap().status = Some(StatusCondition::Burn);

    let mut rng = ScriptedRandom::midline(64);
    upkeep(&mut field, &mut rng);
    assert_eq!(field.creature_at(PLAYER).unwrap().current_hp(), 90);
}

#[test]
fn test_sleep_counts_down_then_wakes() {
    let mut field = singles_field(
        creature(Species::Snorlax, 50, vec![MoveId::Tackle]),
        creature(Species::Squirtle, 50, vec![MoveId::WaterGun]),
    );
    field.creature_at_mut(PLAYER).unwrap().status =
        Some(StatusCondition::Sleep { turns_remaining: 2 });
    let enemy_hp = field.creature_at(ENEMY).unwrap().current_hp();

    let use_move = Action::UseMove {
        user: PLAYER,
        target: ENEMY,
        move_index: 0,
    };

    // First attempt: still asleep, no damage dealt.
    let mut rng = ScriptedRandom::midline(64);
    run_actions(&mut field, vec![use_move.clone()], &mut rng);
    assert_eq!(field.creature_at(ENEMY).unwrap().current_hp(), enemy_hp);
    assert_eq!(
        field.creature_at(PLAYER).unwrap().status,
        Some(StatusCondition::Sleep { turns_remaining: 1 })
    );

    // Second attempt: wakes up, but the turn is spent waking.
    run_actions(&mut field, vec![use_move], &mut rng);
    assert_eq!(field.creature_at(PLAYER).unwrap().status, None);
}

#[test]
fn test_freeze_thaws_on_a_one_in_five() {
    let mut field = singles_field(
        creature(Species::Snorlax, 50, vec![MoveId::Tackle]),
        creature(Species::Squirtle, 50, vec![MoveId::WaterGun]),
    );
    field.creature_at_mut(PLAYER).unwrap().status = Some(StatusCondition::Freeze);
    let enemy_hp = field.creature_at(ENEMY).unwrap().current_hp();

    let use_move = Action::UseMove {
        user: PLAYER,
        target: ENEMY,
        move_index: 0,
    };

    // Thaw roll fails (20 >= 20): stays frozen, move lost.
    let mut frozen = ScriptedRandom::new(vec![20]);
    run_actions(&mut field, vec![use_move.clone()], &mut frozen);
    assert_eq!(
        field.creature_at(PLAYER).unwrap().status,
        Some(StatusCondition::Freeze)
    );
    assert_eq!(field.creature_at(ENEMY).unwrap().current_hp(), enemy_hp);

    // Thaw roll succeeds (19 < 20): the move goes through this turn.
    let mut script = vec![19];
    script.extend(std::iter::repeat(50).take(16));
    let mut thawed_rng = ScriptedRandom::new(script);
    run_actions(&mut field, vec![use_move], &mut thawed_rng);
    assert_eq!(field.creature_at(PLAYER).unwrap().status, None);
    assert!(field.creature_at(ENEMY).unwrap().current_hp() < enemy_hp);
}

#[test]
fn test_paralysis_full_stop_at_one_in_four() {
    let mut field = singles_field(
        creature(Species::Snorlax, 50, vec![MoveId::Tackle]),
        creature(Species::Squirtle, 50, vec![MoveId::WaterGun]),
    );
    field.creature_at_mut(PLAYER).unwrap().status = Some(StatusCondition::Paralysis);
    let enemy_hp = field.creature_at(ENEMY).unwrap().current_hp();

    let use_move = Action::UseMove {
        user: PLAYER,
        target: ENEMY,
        move_index: 0,
    };

    let mut stuck = ScriptedRandom::new(vec![24]);
    run_actions(&mut field, vec![use_move.clone()], &mut stuck);
    assert_eq!(field.creature_at(ENEMY).unwrap().current_hp(), enemy_hp);

    let mut script = vec![25];
    script.extend(std::iter::repeat(50).take(16));
    let mut free = ScriptedRandom::new(script);
    run_actions(&mut field, vec![use_move], &mut free);
    assert!(field.creature_at(ENEMY).unwrap().current_hp() < enemy_hp);
}

#[test]
fn test_weather_chip_respects_immunity() {
    let mut field = singles_field(
        creature_with_hp(Species::Pikachu, 50, vec![MoveId::Tackle], 96),
        creature(Species::Geodude, 50, vec![MoveId::Tackle]),
    );
    field.set_weather(Weather::Sandstorm, 5);
    let geodude_hp = field.creature_at(ENEMY).unwrap().current_hp();

    let mut rng = ScriptedRandom::midline(64);
    upkeep(&mut field, &mut rng);

    assert_eq!(field.creature_at(PLAYER).unwrap().current_hp(), 90);
    assert_eq!(field.creature_at(ENEMY).unwrap().current_hp(), geodude_hp);
}
