use crate::battle::actions::Action;
use crate::battle::field::{Field, SlotRef};
use crate::battle::slot::VolatileStatus;
use crate::creature::CreatureInst;
use crate::errors::ActionError;
use crate::rng::{roll_percent, RandomSource};
use schema::{ElementType, SideFlag, StatusKind};

/// Element-based status immunities.
fn immune_by_type(creature: &CreatureInst, kind: StatusKind) -> Result<bool, ActionError> {
    let types = creature.types().map_err(ActionError::from)?;
    let immune = match kind {
        StatusKind::Burn => types.contains(&ElementType::Fire),
        StatusKind::Poison | StatusKind::BadlyPoison => {
            types.contains(&ElementType::Poison) || types.contains(&ElementType::Steel)
        }
        StatusKind::Paralysis => types.contains(&ElementType::Electric),
        StatusKind::Freeze => types.contains(&ElementType::Ice),
        StatusKind::Sleep => false,
    };
    Ok(immune)
}

/// Try to inflict a persistent status. No-ops (producing no actions or a
/// message) when the target already carries a status, is type-immune, or
/// stands behind Safeguard against an opposing inflictor.
pub fn inflict_status(
    kind: StatusKind,
    chance: u8,
    target: SlotRef,
    user: SlotRef,
    field: &Field,
    rng: &mut dyn RandomSource,
) -> Result<Vec<Action>, ActionError> {
    let Ok(creature) = field.creature_at(target) else {
        return Ok(Vec::new());
    };
    if creature.is_fainted() || creature.status.is_some() {
        return Ok(Vec::new());
    }
    if immune_by_type(creature, kind)? {
        return Ok(Vec::new());
    }
    if target.side != user.side && field.side(target.side).has_flag(SideFlag::Safeguard) {
        return Ok(vec![Action::Message(format!(
            "{} is protected by Safeguard!",
            creature.name
        ))]);
    }
    if !roll_percent(rng, chance) {
        return Ok(Vec::new());
    }

    // Sleep lasts one to three turns, rolled here so application of the
    // resulting action is deterministic.
    let sleep_turns = if kind == StatusKind::Sleep {
        1 + rng.next_bounded(3) as u8
    } else {
        0
    };

    Ok(vec![Action::ApplyStatus {
        target,
        kind,
        sleep_turns,
    }])
}

/// Roll a flinch. The flag only matters if the target has not acted yet;
/// it clears at end of turn either way.
pub fn flinch(chance: u8, target: SlotRef, rng: &mut dyn RandomSource) -> Vec<Action> {
    if roll_percent(rng, chance) {
        vec![Action::SetVolatile {
            target,
            volatile: VolatileStatus::FLINCHED,
        }]
    } else {
        Vec::new()
    }
}
