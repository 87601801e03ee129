use crate::battle::actions::ChosenAction;
use crate::battle::field::{Field, SlotRef};
use crate::battle::stats::effective_speed;
use crate::catalog::get_move_data;
use crate::errors::ActionError;
use crate::rng::RandomSource;
use schema::Room;

#[derive(Debug, Clone, Copy)]
struct OrderKey {
    priority: i8,
    speed: u16,
}

/// Sort the turn's selections into execution order.
///
/// Switches form the highest priority bracket, then moves by declared
/// priority. Within a bracket, higher effective speed goes first (lower
/// speed while Trick Room is up). Exact ties are broken by a random
/// draw, so the ordering is a pure function of state plus the random
/// stream.
pub fn resolve_order(
    field: &Field,
    chosen: &[(SlotRef, ChosenAction)],
    rng: &mut dyn RandomSource,
) -> Result<Vec<(SlotRef, ChosenAction)>, ActionError> {
    let mut keyed: Vec<(SlotRef, ChosenAction, OrderKey)> = Vec::with_capacity(chosen.len());
    for &(slot_ref, action) in chosen {
        let move_priority = match action.move_id_at(field, slot_ref) {
            Some(move_id) => get_move_data(move_id)?.priority,
            None => 0,
        };
        keyed.push((
            slot_ref,
            action,
            OrderKey {
                priority: action.priority(move_priority),
                speed: effective_speed(field, slot_ref)?,
            },
        ));
    }

    let inverted = field.room_active(Room::TrickRoom);
    keyed.sort_by(|a, b| {
        b.2.priority.cmp(&a.2.priority).then_with(|| {
            if inverted {
                a.2.speed.cmp(&b.2.speed)
            } else {
                b.2.speed.cmp(&a.2.speed)
            }
        })
    });

    // Shuffle each run of exact ties with the random stream.
    let mut start = 0;
    while start < keyed.len() {
        let mut end = start + 1;
        while end < keyed.len()
            && keyed[end].2.priority == keyed[start].2.priority
            && keyed[end].2.speed == keyed[start].2.speed
        {
            end += 1;
        }
        for i in start..end.saturating_sub(1) {
            let j = i + rng.next_bounded((end - i) as u32) as usize;
            keyed.swap(i, j);
        }
        start = end;
    }

    Ok(keyed.into_iter().map(|(r, a, _)| (r, a)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::field::SideId;
    use crate::battle::side::Side;
    use crate::creature::CreatureInst;
    use crate::rng::ScriptedRandom;
    use schema::{MoveId, Species};

    const PLAYER: SlotRef = SlotRef {
        side: SideId::Player,
        slot: 0,
    };
    const ENEMY: SlotRef = SlotRef {
        side: SideId::Enemy,
        slot: 0,
    };

    fn field_with(player: CreatureInst, enemy: CreatureInst) -> Field {
        let mut field = Field::new(Side::new(vec![player], 1), Side::new(vec![enemy], 1));
        field.side_mut(SideId::Player).slots[0].bind(0);
        field.side_mut(SideId::Enemy).slots[0].bind(0);
        field
    }

    fn move_choice(move_index: usize, target: SlotRef) -> ChosenAction {
        ChosenAction::Move { move_index, target }
    }

    #[test]
    fn test_faster_combatant_moves_first() {
        // Alakazam (speed 135) vs Snorlax (speed 30).
        let field = field_with(
            CreatureInst::new(Species::Snorlax, 50, vec![MoveId::Tackle]).unwrap(),
            CreatureInst::new(Species::Alakazam, 50, vec![MoveId::Psybeam]).unwrap(),
        );
        let chosen = [
            (PLAYER, move_choice(0, ENEMY)),
            (ENEMY, move_choice(0, PLAYER)),
        ];
        let mut rng = ScriptedRandom::new(vec![]);
        let order = resolve_order(&field, &chosen, &mut rng).unwrap();
        assert_eq!(order[0].0, ENEMY);
    }

    #[test]
    fn test_priority_beats_speed() {
        // Snorlax's Quick Attack outruns Alakazam's Psybeam.
        let field = field_with(
            CreatureInst::new(Species::Snorlax, 50, vec![MoveId::QuickAttack]).unwrap(),
            CreatureInst::new(Species::Alakazam, 50, vec![MoveId::Psybeam]).unwrap(),
        );
        let chosen = [
            (PLAYER, move_choice(0, ENEMY)),
            (ENEMY, move_choice(0, PLAYER)),
        ];
        let mut rng = ScriptedRandom::new(vec![]);
        let order = resolve_order(&field, &chosen, &mut rng).unwrap();
        assert_eq!(order[0].0, PLAYER);
    }

    #[test]
    fn test_switch_outranks_any_move() {
        let field = field_with(
            CreatureInst::new(Species::Snorlax, 50, vec![MoveId::Tackle]).unwrap(),
            CreatureInst::new(Species::Pikachu, 50, vec![MoveId::QuickAttack]).unwrap(),
        );
        let chosen = [
            (PLAYER, ChosenAction::Switch { party_index: 1 }),
            (ENEMY, move_choice(0, PLAYER)),
        ];
        let mut rng = ScriptedRandom::new(vec![]);
        let order = resolve_order(&field, &chosen, &mut rng).unwrap();
        assert!(matches!(order[0].1, ChosenAction::Switch { .. }));
    }

    #[test]
    fn test_trick_room_inverts_speed_within_bracket() {
        let mut field = field_with(
            CreatureInst::new(Species::Snorlax, 50, vec![MoveId::Tackle]).unwrap(),
            CreatureInst::new(Species::Alakazam, 50, vec![MoveId::Psybeam]).unwrap(),
        );
        field.set_room(Room::TrickRoom, 5);
        let chosen = [
            (PLAYER, move_choice(0, ENEMY)),
            (ENEMY, move_choice(0, PLAYER)),
        ];
        let mut rng = ScriptedRandom::new(vec![]);
        let order = resolve_order(&field, &chosen, &mut rng).unwrap();
        assert_eq!(order[0].0, PLAYER);
    }

    #[test]
    fn test_speed_ties_follow_the_random_stream() {
        // Two Pikachu at identical speed; the scripted draw decides.
        let field = field_with(
            CreatureInst::new(Species::Pikachu, 50, vec![MoveId::Tackle]).unwrap(),
            CreatureInst::new(Species::Pikachu, 50, vec![MoveId::Tackle]).unwrap(),
        );
        let chosen = [
            (PLAYER, move_choice(0, ENEMY)),
            (ENEMY, move_choice(0, PLAYER)),
        ];

        let mut keep = ScriptedRandom::new(vec![0]);
        let order = resolve_order(&field, &chosen, &mut keep).unwrap();
        assert_eq!(order[0].0, PLAYER);

        let mut swap = ScriptedRandom::new(vec![1]);
        let order = resolve_order(&field, &chosen, &mut swap).unwrap();
        assert_eq!(order[0].0, ENEMY);
    }
}
