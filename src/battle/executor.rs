//! The action executor: pops actions off the queue, applies them to the
//! field, and splices whatever they trigger back onto the front.
//!
//! Applying an action is the only place battle state mutates. Every
//! apply returns the reactions it caused as plain actions, so resolution
//! stays a loop over a work list instead of a call tree.

use crate::battle::actions::{Action, SideCondition};
use crate::battle::damage::{DamageContext, DamagePipeline};
use crate::battle::effects::process_effect;
use crate::battle::field::{Field, SlotRef};
use crate::battle::handlers::{run_handlers, Trigger};
use crate::battle::queue::ActionQueue;
use crate::battle::slot::VolatileStatus;
use crate::catalog::get_move_data;
use crate::creature::StatusCondition;
use crate::errors::ActionError;
use crate::observer::BattleObserver;
use crate::rng::{roll_percent, RandomSource};
use schema::{
    Ability, ElementType, Hazard, Item, MoveCategory, MoveData, MoveEffect, MoveId, StatusKind,
};
use tracing::trace;

pub struct Executor {
    pipeline: DamagePipeline,
}

impl Executor {
    pub fn new() -> Self {
        Self {
            pipeline: DamagePipeline::standard(),
        }
    }

    pub fn with_pipeline(pipeline: DamagePipeline) -> Self {
        Self { pipeline }
    }

    pub fn pipeline_mut(&mut self) -> &mut DamagePipeline {
        &mut self.pipeline
    }

    /// Drain the queue, applying each action and splicing its reactions
    /// ahead of the remaining work.
    pub fn run(
        &self,
        queue: &mut ActionQueue,
        field: &mut Field,
        rng: &mut dyn RandomSource,
        observers: &mut [Box<dyn BattleObserver>],
    ) -> Result<(), ActionError> {
        while let Some(action) = queue.pop_front() {
            trace!(?action, "applying");
            let reactions = self.apply(&action, field, rng)?;
            for observer in observers.iter_mut() {
                observer.on_action(field, &action, &reactions);
            }
            queue.push_front_batch(reactions);
        }
        Ok(())
    }

    fn apply(
        &self,
        action: &Action,
        field: &mut Field,
        rng: &mut dyn RandomSource,
    ) -> Result<Vec<Action>, ActionError> {
        match action {
            Action::UseMove {
                user,
                target,
                move_index,
            } => self.execute_use_move(*user, *target, *move_index, field, rng),
            Action::Switch { slot, party_index } => {
                apply_switch(*slot, *party_index, field, rng)
            }
            Action::Damage {
                target,
                amount,
                category,
                source,
            } => apply_damage(*target, *amount, *category, *source, field, rng),
            Action::Heal { target, amount } => apply_heal(*target, *amount, field),
            Action::StatChange {
                target,
                stat,
                delta,
            } => apply_stat_change(*target, *stat, *delta, field),
            Action::ApplyStatus {
                target,
                kind,
                sleep_turns,
            } => apply_status(*target, *kind, *sleep_turns, field),
            Action::SetVolatile { target, volatile } => {
                if let Ok(slot) = field.slot_mut(*target) {
                    slot.volatiles.insert(*volatile);
                }
                Ok(Vec::new())
            }
            Action::Faint { target, caused_by } => apply_faint(*target, *caused_by, field, rng),
            Action::SetWeather { weather, turns } => {
                if field.set_weather(*weather, *turns) {
                    let mut reactions = vec![Action::Message(format!("The {} began!", weather))];
                    for subject in field.occupied_refs() {
                        reactions.extend(run_handlers(
                            Trigger::WeatherChanged {
                                weather: Some(*weather),
                            },
                            subject,
                            field,
                            rng,
                        )?);
                    }
                    Ok(reactions)
                } else {
                    Ok(vec![Action::Message("But it failed!".to_string())])
                }
            }
            Action::SetTerrain { terrain, turns } => {
                if field.set_terrain(*terrain, *turns) {
                    Ok(vec![Action::Message(format!("{} covers the field!", terrain))])
                } else {
                    Ok(vec![Action::Message("But it failed!".to_string())])
                }
            }
            Action::SetRoom { room, turns } => {
                let message = if field.set_room(*room, *turns) {
                    format!("{} warps the field!", room)
                } else {
                    format!("The {} wore off.", room)
                };
                Ok(vec![Action::Message(message)])
            }
            Action::SetSideCondition { side, condition } => {
                let side_state = field.side_mut(*side);
                let (raised, name) = match condition {
                    SideCondition::Screen(screen) => {
                        (side_state.set_screen(*screen), screen.to_string())
                    }
                    SideCondition::Hazard(hazard) => {
                        (side_state.add_hazard(*hazard), hazard.to_string())
                    }
                    SideCondition::Flag(flag) => (side_state.set_flag(*flag), flag.to_string()),
                };
                let message = if raised {
                    format!("{} went up on the {} side!", name, side)
                } else {
                    "But it failed!".to_string()
                };
                Ok(vec![Action::Message(message)])
            }
            Action::Message(_) => Ok(Vec::new()),
        }
    }

    /// The full life of one selected move, from readiness checks to the
    /// reactions it leaves on the queue.
    fn execute_use_move(
        &self,
        user: SlotRef,
        target: SlotRef,
        move_index: usize,
        field: &mut Field,
        rng: &mut dyn RandomSource,
    ) -> Result<Vec<Action>, ActionError> {
        // A user that fainted earlier in the turn simply loses its move.
        let Ok(creature) = field.creature_at(user) else {
            return Ok(Vec::new());
        };
        if creature.is_fainted() {
            return Ok(Vec::new());
        }
        let user_name = creature.name.clone();

        if field
            .slot(user)?
            .volatiles
            .contains(VolatileStatus::FLINCHED)
        {
            return Ok(vec![Action::Message(format!("{} flinched!", user_name))]);
        }

        if let Some(prevented) = check_status_prevention(user, &user_name, field, rng)? {
            return Ok(prevented);
        }

        // Truant loafs on every other active turn.
        if field.creature_at(user)?.has_ability(Ability::Truant)
            && field.slot(user)?.turns_active % 2 == 1
        {
            return Ok(vec![Action::Message(format!(
                "{} is loafing around!",
                user_name
            ))]);
        }

        let mut reactions = run_handlers(Trigger::BeforeMove, user, field, rng)?;

        let Some(instance) = field
            .creature_at(user)?
            .moves
            .get(move_index)
            .copied()
            .flatten()
        else {
            return Err(ActionError::InvalidMoveSlot(move_index));
        };
        let data = get_move_data(instance.move_id)?;

        if !field.creature_at_mut(user)?.moves[move_index]
            .as_mut()
            .map(|m| m.use_move())
            .unwrap_or(false)
        {
            reactions.push(Action::Message(format!(
                "{} has no PP left for {}!",
                user_name, data.name
            )));
            return Ok(reactions);
        }

        reactions.push(Action::Message(format!(
            "{} used {}!",
            user_name, data.name
        )));

        if data.is_protect_class() {
            reactions.extend(execute_protect(user, &user_name, field, rng)?);
            return Ok(reactions);
        }

        let targets_opponent = target.side != user.side;
        if targets_opponent {
            let target_alive = field
                .creature_at(target)
                .map(|c| !c.is_fainted())
                .unwrap_or(false);
            if !target_alive && data.is_damaging() {
                reactions.push(Action::Message("But there was no target...".to_string()));
                return Ok(reactions);
            }
            if target_alive
                && field
                    .slot(target)?
                    .volatiles
                    .contains(VolatileStatus::PROTECTED)
            {
                reactions.push(Action::Message(format!(
                    "{} protected itself!",
                    field.creature_at(target)?.name
                )));
                return Ok(reactions);
            }
            if !crate::battle::stats::move_hits(field, user, target, data.accuracy, rng)? {
                reactions.push(Action::Message(format!("{}'s attack missed!", user_name)));
                return Ok(reactions);
            }
        }

        // Counter and Mirror Coat return from the damage ledgers and
        // ignore the pipeline entirely.
        if let Some(category) = counter_category(data) {
            reactions.extend(execute_counter(user, category, field)?);
            return Ok(reactions);
        }

        let mut damage_dealt = 0u16;
        if data.is_damaging() && targets_opponent {
            let (hit_actions, total) =
                self.roll_damage(user, target, instance.move_id, data, field, rng)?;
            reactions.extend(hit_actions);
            damage_dealt = total;

            if damage_dealt > 0 && data.makes_contact {
                reactions.extend(run_handlers(
                    Trigger::ContactReceived { attacker: user },
                    target,
                    field,
                    rng,
                )?);
            }
            if damage_dealt > 0 && field.creature_at(user)?.has_item(Item::LifeOrb) {
                let user_max = field.creature_at(user)?.max_hp;
                reactions.push(Action::Message(format!(
                    "{} is hurt by its Life Orb!",
                    user_name
                )));
                reactions.push(Action::Damage {
                    target: user,
                    amount: (user_max / 10).max(1),
                    category: None,
                    source: None,
                });
            }
        }

        for effect in &data.effects {
            reactions.extend(process_effect(effect, user, target, damage_dealt, field, rng)?);
        }

        Ok(reactions)
    }

    /// Roll the move's hits through the pipeline. Returns the actions to
    /// splice plus the damage total the secondary effects are based on.
    fn roll_damage(
        &self,
        user: SlotRef,
        target: SlotRef,
        move_id: MoveId,
        data: &MoveData,
        field: &Field,
        rng: &mut dyn RandomSource,
    ) -> Result<(Vec<Action>, u16), ActionError> {
        let mut actions = Vec::new();
        let target_name = field.creature_at(target)?.name.clone();
        let target_hp = field.creature_at(target)?.current_hp();

        // Fixed damage skips the pipeline but still respects immunity.
        if let Some(amount) = fixed_damage_amount(data) {
            let types = field.creature_at(target)?.types().map_err(ActionError::from)?;
            if ElementType::effectiveness_against(data.element, &types) == 0.0 {
                actions.push(Action::Message(format!(
                    "It doesn't affect {}...",
                    target_name
                )));
                return Ok((actions, 0));
            }
            actions.push(Action::Damage {
                target,
                amount,
                category: Some(data.category),
                source: Some(user),
            });
            return Ok((actions, amount.min(target_hp)));
        }

        let hits = match multi_hit_range(data) {
            Some((min, max)) if max > min => min + rng.next_bounded((max - min + 1) as u32) as u8,
            Some((min, _)) => min,
            None => 1,
        };

        let mut total = 0u32;
        let mut landed = 0u8;
        for hit_number in 1..=hits {
            // Stop early once the target would already be down.
            if total >= target_hp as u32 {
                break;
            }
            let mut ctx = DamageContext::new(user, target, move_id, data);
            ctx.hit_number = hit_number;
            self.pipeline.run(&mut ctx, field, rng)?;

            if ctx.type_effectiveness == 0.0 {
                actions.push(Action::Message(format!(
                    "It doesn't affect {}...",
                    target_name
                )));
                return Ok((actions, 0));
            }

            let amount = ctx.final_damage();
            if ctx.is_crit {
                actions.push(Action::Message("A critical hit!".to_string()));
            }
            actions.push(Action::Damage {
                target,
                amount,
                category: Some(data.category),
                source: Some(user),
            });
            total += amount as u32;
            landed += 1;

            if hit_number == 1 {
                if ctx.type_effectiveness > 1.0 {
                    actions.push(Action::Message("It's super effective!".to_string()));
                } else if ctx.type_effectiveness < 1.0 {
                    actions.push(Action::Message("It's not very effective...".to_string()));
                }
            }
        }

        if multi_hit_range(data).is_some() && landed > 0 {
            actions.push(Action::Message(format!("Hit {} time(s)!", landed)));
        }

        let dealt = (total.min(target_hp as u32)) as u16;
        Ok((actions, dealt))
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

/// Sleep, freeze, and paralysis gates, in that order. Returns the
/// replacement actions when the move is prevented.
fn check_status_prevention(
    user: SlotRef,
    user_name: &str,
    field: &mut Field,
    rng: &mut dyn RandomSource,
) -> Result<Option<Vec<Action>>, ActionError> {
    let status = field.creature_at(user)?.status;
    match status {
        Some(StatusCondition::Sleep { turns_remaining }) => {
            if turns_remaining <= 1 {
                field.creature_at_mut(user)?.status = None;
                Ok(Some(vec![Action::Message(format!(
                    "{} woke up!",
                    user_name
                ))]))
            } else {
                field.creature_at_mut(user)?.status = Some(StatusCondition::Sleep {
                    turns_remaining: turns_remaining - 1,
                });
                Ok(Some(vec![Action::Message(format!(
                    "{} is fast asleep.",
                    user_name
                ))]))
            }
        }
        Some(StatusCondition::Freeze) => {
            if roll_percent(rng, 20) {
                field.creature_at_mut(user)?.status = None;
                // Thawing frees the move this same turn.
                Ok(None)
            } else {
                Ok(Some(vec![Action::Message(format!(
                    "{} is frozen solid!",
                    user_name
                ))]))
            }
        }
        Some(StatusCondition::Paralysis) => {
            if roll_percent(rng, 25) {
                Ok(Some(vec![Action::Message(format!(
                    "{} is paralyzed! It can't move!",
                    user_name
                ))]))
            } else {
                Ok(None)
            }
        }
        _ => Ok(None),
    }
}

/// Protection succeeds at 100/50/25/12.5...% by consecutive use. The
/// streak counter advances before the roll, whatever the outcome.
fn execute_protect(
    user: SlotRef,
    user_name: &str,
    field: &mut Field,
    rng: &mut dyn RandomSource,
) -> Result<Vec<Action>, ActionError> {
    let slot = field.slot_mut(user)?;
    let streak = slot.protect_count;
    slot.protect_count = slot.protect_count.saturating_add(1);
    slot.volatiles.insert(VolatileStatus::USED_PROTECT_CLASS);

    let threshold = 1000u32 >> streak.min(31);
    if rng.next_bounded(1000) < threshold {
        slot.volatiles.insert(VolatileStatus::PROTECTED);
        Ok(vec![Action::Message(format!(
            "{} protected itself!",
            user_name
        ))])
    } else {
        Ok(vec![Action::Message("But it failed!".to_string())])
    }
}

fn counter_category(data: &MoveData) -> Option<MoveCategory> {
    data.effects.iter().find_map(|e| match e {
        MoveEffect::Counter => Some(MoveCategory::Physical),
        MoveEffect::MirrorCoat => Some(MoveCategory::Special),
        _ => None,
    })
}

/// Return double the recorded damage of the countered category to the
/// last attacker. Fails quietly when nothing qualifying landed.
fn execute_counter(
    user: SlotRef,
    category: MoveCategory,
    field: &Field,
) -> Result<Vec<Action>, ActionError> {
    let slot = field.slot(user)?;
    let taken = match category {
        MoveCategory::Physical => slot.physical_damage_taken,
        MoveCategory::Special => slot.special_damage_taken,
        MoveCategory::Status => 0,
    };
    let attacker = slot.last_attacker.filter(|a| {
        field
            .creature_at(*a)
            .map(|c| !c.is_fainted())
            .unwrap_or(false)
    });

    match (taken, attacker) {
        (0, _) | (_, None) => Ok(vec![Action::Message("But it failed!".to_string())]),
        (taken, Some(attacker)) => Ok(vec![Action::Damage {
            target: attacker,
            amount: taken.saturating_mul(2),
            category: Some(category),
            source: Some(user),
        }]),
    }
}

fn fixed_damage_amount(data: &MoveData) -> Option<u16> {
    data.effects.iter().find_map(|e| match e {
        MoveEffect::FixedDamage { amount } => Some(*amount),
        _ => None,
    })
}

fn multi_hit_range(data: &MoveData) -> Option<(u8, u8)> {
    data.effects.iter().find_map(|e| match e {
        MoveEffect::MultiHit { min_hits, max_hits } => Some((*min_hits, *max_hits)),
        _ => None,
    })
}

fn apply_damage(
    target: SlotRef,
    amount: u16,
    category: Option<MoveCategory>,
    source: Option<SlotRef>,
    field: &mut Field,
    rng: &mut dyn RandomSource,
) -> Result<Vec<Action>, ActionError> {
    let Ok(creature) = field.creature_at_mut(target) else {
        return Ok(Vec::new());
    };
    if creature.is_fainted() {
        return Ok(Vec::new());
    }
    let fainted = creature.take_damage(amount);

    // Direct move damage feeds the Counter and Mirror Coat ledgers.
    if let Some(category) = category {
        let slot = field.slot_mut(target)?;
        match category {
            MoveCategory::Physical => {
                slot.physical_damage_taken = slot.physical_damage_taken.saturating_add(amount)
            }
            MoveCategory::Special => {
                slot.special_damage_taken = slot.special_damage_taken.saturating_add(amount)
            }
            MoveCategory::Status => {}
        }
        if let Some(source) = source {
            slot.last_attacker = Some(source);
        }
    }

    let mut reactions = Vec::new();
    if fainted {
        reactions.push(Action::Faint {
            target,
            caused_by: category.and(source),
        });
    } else {
        reactions.extend(run_handlers(
            Trigger::DamageTaken { amount },
            target,
            field,
            rng,
        )?);
    }
    Ok(reactions)
}

fn apply_heal(target: SlotRef, amount: u16, field: &mut Field) -> Result<Vec<Action>, ActionError> {
    if let Ok(creature) = field.creature_at_mut(target) {
        if !creature.is_fainted() {
            creature.heal(amount);
        }
    }
    Ok(Vec::new())
}

fn apply_stat_change(
    target: SlotRef,
    stat: schema::Stat,
    delta: i8,
    field: &mut Field,
) -> Result<Vec<Action>, ActionError> {
    let Ok(creature) = field.creature_at(target) else {
        return Ok(Vec::new());
    };
    if creature.is_fainted() {
        return Ok(Vec::new());
    }
    let name = creature.name.clone();
    let applied = field.slot_mut(target)?.apply_stat_change(stat, delta);

    let message = if applied == 0 {
        if delta > 0 {
            format!("{}'s {} won't go any higher!", name, stat)
        } else {
            format!("{}'s {} won't go any lower!", name, stat)
        }
    } else {
        let verb = match applied {
            i8::MIN..=-2 => "harshly fell",
            -1 => "fell",
            1 => "rose",
            _ => "rose sharply",
        };
        format!("{}'s {} {}!", name, stat, verb)
    };
    Ok(vec![Action::Message(message)])
}

fn apply_status(
    target: SlotRef,
    kind: StatusKind,
    sleep_turns: u8,
    field: &mut Field,
) -> Result<Vec<Action>, ActionError> {
    let Ok(creature) = field.creature_at_mut(target) else {
        return Ok(Vec::new());
    };
    if creature.is_fainted() || creature.status.is_some() {
        return Ok(Vec::new());
    }
    creature.status = Some(StatusCondition::from_kind(kind, sleep_turns));
    let description = match kind {
        StatusKind::Burn => "was burned",
        StatusKind::Poison => "was poisoned",
        StatusKind::BadlyPoison => "was badly poisoned",
        StatusKind::Paralysis => "is paralyzed",
        StatusKind::Sleep => "fell asleep",
        StatusKind::Freeze => "was frozen solid",
    };
    Ok(vec![Action::Message(format!(
        "{} {}!",
        creature.name, description
    ))])
}

fn apply_faint(
    target: SlotRef,
    caused_by: Option<SlotRef>,
    field: &mut Field,
    rng: &mut dyn RandomSource,
) -> Result<Vec<Action>, ActionError> {
    let Ok(creature) = field.creature_at(target) else {
        return Ok(Vec::new());
    };
    let name = creature.name.clone();
    field.slot_mut(target)?.unbind();

    let mut reactions = vec![Action::Message(format!("{} fainted!", name))];
    if let Some(attacker) = caused_by {
        reactions.extend(run_handlers(Trigger::FoeFainted, attacker, field, rng)?);
    }
    Ok(reactions)
}

/// Swap the slot's occupant and pay the entry costs: hazards first, then
/// switch-in abilities.
fn apply_switch(
    slot_ref: SlotRef,
    party_index: usize,
    field: &mut Field,
    rng: &mut dyn RandomSource,
) -> Result<Vec<Action>, ActionError> {
    field.slot(slot_ref)?;
    let side = field.side(slot_ref.side);
    let incoming = side
        .party
        .get(party_index)
        .ok_or(ActionError::InvalidPartyIndex(party_index))?;
    if incoming.is_fainted() {
        return Err(ActionError::InvalidPartyIndex(party_index));
    }
    let incoming_name = incoming.name.clone();

    field.slot_mut(slot_ref)?.bind(party_index);

    let mut reactions = vec![Action::Message(format!("Go, {}!", incoming_name))];
    reactions.extend(entry_hazard_actions(slot_ref, field)?);
    reactions.extend(run_handlers(Trigger::SwitchIn, slot_ref, field, rng)?);
    Ok(reactions)
}

/// Entry hazard costs for a combatant that just switched in.
fn entry_hazard_actions(
    slot_ref: SlotRef,
    field: &mut Field,
) -> Result<Vec<Action>, ActionError> {
    let creature = field.creature_at(slot_ref)?;
    let name = creature.name.clone();
    let max_hp = creature.max_hp;
    let types = creature.types().map_err(ActionError::from)?;
    let grounded = field.is_grounded(slot_ref)?;
    let side = field.side(slot_ref.side);

    let mut actions = Vec::new();

    let rock_layers = side.hazard_layers(Hazard::StealthRock);
    if rock_layers > 0 {
        let effectiveness = ElementType::effectiveness_against(ElementType::Rock, &types);
        let amount = ((max_hp as f64 / 8.0) * effectiveness) as u16;
        if amount > 0 {
            actions.push(Action::Message(format!(
                "Pointed stones dug into {}!",
                name
            )));
            actions.push(Action::Damage {
                target: slot_ref,
                amount,
                category: None,
                source: None,
            });
        }
    }

    if grounded {
        let spike_layers = side.hazard_layers(Hazard::Spikes);
        if spike_layers > 0 {
            let divisor = match spike_layers {
                1 => 8,
                2 => 6,
                _ => 4,
            };
            actions.push(Action::Message(format!("{} is hurt by the spikes!", name)));
            actions.push(Action::Damage {
                target: slot_ref,
                amount: (max_hp / divisor).max(1),
                category: None,
                source: None,
            });
        }

        let toxic_layers = side.hazard_layers(Hazard::ToxicSpikes);
        if toxic_layers > 0 {
            if types.contains(&ElementType::Poison) {
                // Grounded Poison types soak the spikes up.
                field
                    .side_mut(slot_ref.side)
                    .hazards
                    .remove(&Hazard::ToxicSpikes);
                actions.push(Action::Message(format!(
                    "{} absorbed the Toxic Spikes!",
                    name
                )));
            } else {
                let kind = if toxic_layers >= 2 {
                    StatusKind::BadlyPoison
                } else {
                    StatusKind::Poison
                };
                actions.push(Action::ApplyStatus {
                    target: slot_ref,
                    kind,
                    sleep_turns: 0,
                });
            }
        }

        if field.side(slot_ref.side).hazard_layers(Hazard::StickyWeb) > 0 {
            actions.push(Action::Message(format!(
                "{} was caught in a sticky web!",
                name
            )));
            actions.push(Action::StatChange {
                target: slot_ref,
                stat: schema::Stat::Speed,
                delta: -1,
            });
        }
    }

    Ok(actions)
}
