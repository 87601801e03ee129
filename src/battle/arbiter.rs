use crate::battle::field::{Field, SideId};
use crate::config::BattleConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal result of a battle, or the lack of one.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Victory(SideId),
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ongoing => write!(f, "ongoing"),
            Outcome::Victory(side) => write!(f, "{} victory", side),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// Judge the field. This is a pure function of the arguments: calling it
/// again on the same state returns the same outcome.
///
/// Mutual defeat is a draw, not a victory for either side, and the turn
/// and stagnation ceilings also end the battle in a draw.
pub fn judge(
    field: &Field,
    config: &BattleConfig,
    stagnant_turns: u32,
) -> Outcome {
    let player_defeated = field.side(SideId::Player).is_defeated();
    let enemy_defeated = field.side(SideId::Enemy).is_defeated();

    match (player_defeated, enemy_defeated) {
        (true, true) => Outcome::Draw,
        (true, false) => Outcome::Victory(SideId::Enemy),
        (false, true) => Outcome::Victory(SideId::Player),
        (false, false) => {
            if field.turn_number >= config.turn_limit
                || stagnant_turns >= config.stagnation_turn_limit
            {
                Outcome::Draw
            } else {
                Outcome::Ongoing
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::side::Side;
    use crate::creature::CreatureInst;
    use schema::{MoveId, Species};

    fn one_each() -> Field {
        let player = Side::new(
            vec![CreatureInst::new(Species::Pikachu, 50, vec![MoveId::Tackle]).unwrap()],
            1,
        );
        let enemy = Side::new(
            vec![CreatureInst::new(Species::Squirtle, 50, vec![MoveId::Tackle]).unwrap()],
            1,
        );
        Field::new(player, enemy)
    }

    #[test]
    fn test_victory_defeat_and_mutual_draw() {
        let config = BattleConfig::default();

        let mut field = one_each();
        field.sides[1].party[0].take_damage(9999);
        assert_eq!(judge(&field, &config, 0), Outcome::Victory(SideId::Player));

        let mut field = one_each();
        field.sides[0].party[0].take_damage(9999);
        assert_eq!(judge(&field, &config, 0), Outcome::Victory(SideId::Enemy));

        let mut field = one_each();
        field.sides[0].party[0].take_damage(9999);
        field.sides[1].party[0].take_damage(9999);
        assert_eq!(judge(&field, &config, 0), Outcome::Draw);
    }

    #[test]
    fn test_ceilings_force_a_draw() {
        let config = BattleConfig::default().with_turn_limit(10).with_stagnation_limit(5);
        let mut field = one_each();
        assert_eq!(judge(&field, &config, 0), Outcome::Ongoing);

        field.turn_number = 10;
        assert_eq!(judge(&field, &config, 0), Outcome::Draw);

        field.turn_number = 3;
        assert_eq!(judge(&field, &config, 5), Outcome::Draw);
    }

    #[test]
    fn test_judgement_is_idempotent() {
        let config = BattleConfig::default();
        let mut field = one_each();
        field.sides[1].party[0].take_damage(9999);
        let first = judge(&field, &config, 0);
        assert_eq!(judge(&field, &config, 0), first);
        assert_eq!(judge(&field, &config, 0), first);
    }
}
