use crate::battle::field::{Field, SlotRef};
use crate::errors::ActionError;
use crate::rng::RandomSource;
use schema::{Ability, Item, MoveCategory, SideFlag, Stat, StatusKind};

/// Stage multiplier for the five combat stats: (2+s)/2 when raised,
/// 2/(2+|s|) when lowered.
pub fn stage_multiplier(stage: i8) -> f64 {
    if stage >= 0 {
        (2 + stage as i32) as f64 / 2.0
    } else {
        2.0 / (2 + stage.unsigned_abs() as i32) as f64
    }
}

/// Stage multiplier for accuracy and evasion, on the 3-denominator curve.
pub fn accuracy_stage_multiplier(stage: i8) -> f64 {
    if stage >= 0 {
        (3 + stage as i32) as f64 / 3.0
    } else {
        3.0 / (3 + stage.unsigned_abs() as i32) as f64
    }
}

/// Effective attacking stat for a move of the given category.
///
/// Critical hits ignore the attacker's negative stages. Choice items boost
/// their matching category, and Guts boosts physical attack while the
/// holder carries any status (its burn exemption is applied where burn is).
pub fn effective_attack(
    field: &Field,
    attacker: SlotRef,
    category: MoveCategory,
    is_crit: bool,
) -> Result<u16, ActionError> {
    let creature = field.creature_at(attacker)?;
    let slot = field.slot(attacker)?;

    let (base, stat, choice_item) = match category {
        MoveCategory::Physical => (creature.stats.attack, Stat::Attack, Item::ChoiceBand),
        MoveCategory::Special => (creature.stats.sp_attack, Stat::SpecialAttack, Item::ChoiceSpecs),
        MoveCategory::Status => return Ok(0),
    };

    let mut stage = slot.stage(stat);
    if is_crit && stage < 0 {
        stage = 0;
    }

    let mut value = base as f64 * stage_multiplier(stage);
    if creature.has_item(choice_item) {
        value *= 1.5;
    }
    if category == MoveCategory::Physical
        && creature.has_ability(Ability::Guts)
        && creature.status.is_some()
    {
        value *= 1.5;
    }
    Ok(value as u16)
}

/// Effective defending stat against a move of the given category.
/// Critical hits ignore the defender's positive stages.
pub fn effective_defense(
    field: &Field,
    defender: SlotRef,
    category: MoveCategory,
    is_crit: bool,
) -> Result<u16, ActionError> {
    let creature = field.creature_at(defender)?;
    let slot = field.slot(defender)?;

    let (base, stat) = match category {
        MoveCategory::Physical => (creature.stats.defense, Stat::Defense),
        MoveCategory::Special => (creature.stats.sp_defense, Stat::SpecialDefense),
        MoveCategory::Status => return Ok(0),
    };

    let mut stage = slot.stage(stat);
    if is_crit && stage > 0 {
        stage = 0;
    }

    Ok(((base as f64) * stage_multiplier(stage)).max(1.0) as u16)
}

/// Effective speed for turn ordering: stage multiplier, paralysis quarter,
/// and the Tailwind doubling.
pub fn effective_speed(field: &Field, slot_ref: SlotRef) -> Result<u16, ActionError> {
    let creature = field.creature_at(slot_ref)?;
    let slot = field.slot(slot_ref)?;

    let mut value = creature.stats.speed as f64 * stage_multiplier(slot.stage(Stat::Speed));
    if creature.has_status(StatusKind::Paralysis) {
        value /= 4.0;
    }
    if field.side(slot_ref.side).has_flag(SideFlag::Tailwind) {
        value *= 2.0;
    }
    Ok(value as u16)
}

/// Accuracy check for a move. `None` accuracy never misses. The user's
/// accuracy stage and the target's evasion stage combine into one clamped
/// stage before the roll.
pub fn move_hits(
    field: &Field,
    user: SlotRef,
    target: SlotRef,
    accuracy: Option<u8>,
    rng: &mut dyn RandomSource,
) -> Result<bool, ActionError> {
    let Some(accuracy) = accuracy else {
        return Ok(true);
    };

    let user_stage = field.slot(user)?.stage(Stat::Accuracy);
    let target_stage = field.slot(target)?.stage(Stat::Evasion);
    let combined = (user_stage - target_stage).clamp(-6, 6);

    let chance = (accuracy as f64 * accuracy_stage_multiplier(combined)).min(100.0) as u32;
    Ok(rng.next_bounded(100) < chance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::field::SideId;
    use crate::battle::side::Side;
    use crate::creature::{CreatureInst, StatusCondition};
    use crate::rng::ScriptedRandom;
    use schema::{MoveId, Species};

    fn field_with(player: CreatureInst, enemy: CreatureInst) -> Field {
        let mut field = Field::new(Side::new(vec![player], 1), Side::new(vec![enemy], 1));
        field.side_mut(SideId::Player).slots[0].bind(0);
        field.side_mut(SideId::Enemy).slots[0].bind(0);
        field
    }

    fn plain(species: Species) -> CreatureInst {
        CreatureInst::new(species, 50, vec![MoveId::Tackle]).unwrap()
    }

    const PLAYER: SlotRef = SlotRef {
        side: SideId::Player,
        slot: 0,
    };

    #[test]
    fn test_stage_multiplier_curve() {
        assert_eq!(stage_multiplier(0), 1.0);
        assert_eq!(stage_multiplier(2), 2.0);
        assert_eq!(stage_multiplier(6), 4.0);
        assert_eq!(stage_multiplier(-2), 0.5);
        assert_eq!(stage_multiplier(-6), 0.25);
    }

    #[test]
    fn test_crit_ignores_attacker_drops() {
        let mut field = field_with(plain(Species::Machamp), plain(Species::Snorlax));
        field.slot_mut(PLAYER).unwrap().apply_stat_change(Stat::Attack, -2);

        let normal = effective_attack(&field, PLAYER, MoveCategory::Physical, false).unwrap();
        let crit = effective_attack(&field, PLAYER, MoveCategory::Physical, true).unwrap();
        assert!(crit > normal);
        assert_eq!(crit, plain(Species::Machamp).stats.attack);
    }

    #[test]
    fn test_choice_band_boosts_physical_only() {
        let banded = plain(Species::Machamp).with_item(schema::Item::ChoiceBand);
        let field = field_with(banded, plain(Species::Snorlax));
        let physical = effective_attack(&field, PLAYER, MoveCategory::Physical, false).unwrap();
        let special = effective_attack(&field, PLAYER, MoveCategory::Special, false).unwrap();
        assert_eq!(physical, (plain(Species::Machamp).stats.attack as f64 * 1.5) as u16);
        assert_eq!(special, plain(Species::Machamp).stats.sp_attack);
    }

    #[test]
    fn test_paralysis_quarters_speed_and_tailwind_doubles() {
        let mut paralyzed = plain(Species::Pikachu);
        paralyzed.status = Some(StatusCondition::Paralysis);
        let base_speed = paralyzed.stats.speed;
        let mut field = field_with(paralyzed, plain(Species::Snorlax));

        assert_eq!(effective_speed(&field, PLAYER).unwrap(), base_speed / 4);
        field.side_mut(SideId::Player).set_flag(SideFlag::Tailwind);
        assert_eq!(effective_speed(&field, PLAYER).unwrap(), base_speed / 2);
    }

    #[test]
    fn test_accuracy_none_always_hits() {
        let field = field_with(plain(Species::Pikachu), plain(Species::Snorlax));
        let target = SlotRef::new(SideId::Enemy, 0);
        let mut rng = ScriptedRandom::new(vec![]);
        assert!(move_hits(&field, PLAYER, target, None, &mut rng).unwrap());
    }

    #[test]
    fn test_evasion_stage_lowers_hit_chance() {
        let mut field = field_with(plain(Species::Pikachu), plain(Species::Snorlax));
        let target = SlotRef::new(SideId::Enemy, 0);
        field
            .slot_mut(target)
            .unwrap()
            .apply_stat_change(Stat::Evasion, 6);
        // 100 accuracy at -6 combined stage is 100 * 3/9 = 33.
        let mut rng = ScriptedRandom::new(vec![33, 32]);
        assert!(!move_hits(&field, PLAYER, target, Some(100), &mut rng).unwrap());
        assert!(move_hits(&field, PLAYER, target, Some(100), &mut rng).unwrap());
    }
}
