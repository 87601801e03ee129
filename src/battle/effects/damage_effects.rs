use crate::battle::actions::Action;
use crate::battle::field::{Field, SlotRef};
use crate::errors::ActionError;

/// Heal the user by a percentage of its max HP.
pub fn heal_user(
    percent_max_hp: u8,
    user: SlotRef,
    field: &Field,
) -> Result<Vec<Action>, ActionError> {
    let creature = field.creature_at(user)?;
    let amount = (creature.max_hp as u32 * percent_max_hp as u32 / 100) as u16;
    Ok(vec![Action::Heal {
        target: user,
        amount,
    }])
}

/// Drain healing: a percentage of the damage dealt, at least one point
/// whenever any damage landed.
pub fn drain(percent_of_damage: u8, user: SlotRef, damage_dealt: u16) -> Vec<Action> {
    if damage_dealt == 0 {
        return Vec::new();
    }
    let amount = ((damage_dealt as u32 * percent_of_damage as u32 / 100) as u16).max(1);
    vec![Action::Heal {
        target: user,
        amount,
    }]
}

/// Recoil: the user takes a percentage of the damage it dealt, at least
/// one point. Indirect, so it is not counterable.
pub fn recoil(percent_of_damage: u8, user: SlotRef, damage_dealt: u16) -> Vec<Action> {
    if damage_dealt == 0 {
        return Vec::new();
    }
    let amount = ((damage_dealt as u32 * percent_of_damage as u32 / 100) as u16).max(1);
    vec![Action::Damage {
        target: user,
        amount,
        category: None,
        source: None,
    }]
}
