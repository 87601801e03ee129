//! Effect processors: pure functions from a declared move effect to the
//! actions it produces. One processor per `MoveEffect` variant; the match
//! below is exhaustive on purpose so a new variant cannot ship without a
//! processor.

pub mod damage_effects;
pub mod field_effects;
pub mod stat_effects;
pub mod status_effects;

use crate::battle::actions::Action;
use crate::battle::field::{Field, SlotRef};
use crate::errors::ActionError;
use crate::rng::RandomSource;
use schema::{EffectTarget, MoveEffect};

/// Resolve an effect's declared target to a field position.
fn resolve_target(target: EffectTarget, user: SlotRef, move_target: SlotRef) -> SlotRef {
    match target {
        EffectTarget::User => user,
        EffectTarget::Opponent => move_target,
    }
}

/// Run the processor for one effect of a move that just resolved.
/// `damage_dealt` is the total HP the move took from its target, which
/// drain and recoil are computed from.
///
/// Protect, Counter, Mirror Coat, multi-hit, and fixed damage shape move
/// execution itself and are consumed there; they produce nothing here.
pub fn process_effect(
    effect: &MoveEffect,
    user: SlotRef,
    move_target: SlotRef,
    damage_dealt: u16,
    field: &Field,
    rng: &mut dyn RandomSource,
) -> Result<Vec<Action>, ActionError> {
    match effect {
        MoveEffect::Status {
            status,
            chance,
            target,
        } => status_effects::inflict_status(
            *status,
            *chance,
            resolve_target(*target, user, move_target),
            user,
            field,
            rng,
        ),
        MoveEffect::StatChange {
            stat,
            delta,
            chance,
            target,
        } => stat_effects::change_stat(
            *stat,
            *delta,
            *chance,
            resolve_target(*target, user, move_target),
            user,
            field,
            rng,
        ),
        MoveEffect::Heal { percent_max_hp } => {
            damage_effects::heal_user(*percent_max_hp, user, field)
        }
        MoveEffect::Drain { percent_of_damage } => {
            Ok(damage_effects::drain(*percent_of_damage, user, damage_dealt))
        }
        MoveEffect::Recoil { percent_of_damage } => {
            Ok(damage_effects::recoil(*percent_of_damage, user, damage_dealt))
        }
        MoveEffect::Flinch { chance } => {
            Ok(status_effects::flinch(*chance, move_target, rng))
        }
        MoveEffect::SetWeather { weather } => Ok(field_effects::set_weather(*weather)),
        MoveEffect::SetTerrain { terrain } => Ok(field_effects::set_terrain(*terrain)),
        MoveEffect::SetRoom { room } => Ok(field_effects::set_room(*room)),
        MoveEffect::SetScreen { screen } => Ok(field_effects::set_screen(*screen, user)),
        MoveEffect::SetHazard { hazard } => Ok(field_effects::set_hazard(*hazard, user)),
        MoveEffect::SetSideFlag { flag } => Ok(field_effects::set_side_flag(*flag, user)),
        MoveEffect::Protect
        | MoveEffect::Counter
        | MoveEffect::MirrorCoat
        | MoveEffect::MultiHit { .. }
        | MoveEffect::FixedDamage { .. } => Ok(Vec::new()),
    }
}
