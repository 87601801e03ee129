use crate::battle::actions::Action;
use crate::battle::field::{Field, SlotRef};
use crate::errors::ActionError;
use crate::rng::{roll_percent, RandomSource};
use schema::{SideFlag, Stat};

/// Try to shift a stat stage. Mist blocks reductions coming from the
/// other side; self-inflicted drops go through it.
pub fn change_stat(
    stat: Stat,
    delta: i8,
    chance: u8,
    target: SlotRef,
    user: SlotRef,
    field: &Field,
    rng: &mut dyn RandomSource,
) -> Result<Vec<Action>, ActionError> {
    let Ok(creature) = field.creature_at(target) else {
        return Ok(Vec::new());
    };
    if creature.is_fainted() {
        return Ok(Vec::new());
    }
    if !roll_percent(rng, chance) {
        return Ok(Vec::new());
    }
    if delta < 0 && target.side != user.side && field.side(target.side).has_flag(SideFlag::Mist) {
        return Ok(vec![Action::Message(format!(
            "{} is protected by Mist!",
            creature.name
        ))]);
    }
    Ok(vec![Action::StatChange {
        target,
        stat,
        delta,
    }])
}
