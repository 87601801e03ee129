//! Ability and item handlers, keyed by trigger point.
//!
//! A handler is a pure function from the current field to reaction
//! actions; it never mutates state itself. Dispatch is an exhaustive
//! match on (trigger, ability/item), so the compiler tracks coverage when
//! either enum grows.

use crate::battle::actions::Action;
use crate::battle::field::{Field, SlotRef};
use crate::errors::ActionError;
use crate::rng::{roll_percent, RandomSource};
use schema::{Ability, Item, Stat, StatusKind, Weather};
use tracing::trace;

/// The points in turn resolution where passive behavior can react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A combatant just entered a slot.
    SwitchIn,
    /// A combatant is about to execute its selected move.
    BeforeMove,
    /// A contact move just landed on this combatant.
    ContactReceived { attacker: SlotRef },
    /// This combatant just took damage (any kind).
    DamageTaken { amount: u16 },
    /// This combatant's move just fainted an opponent.
    FoeFainted,
    /// End-of-turn upkeep.
    TurnEnd,
    /// The weather just changed.
    WeatherChanged { weather: Option<Weather> },
}

/// Run every handler the combatant at `subject` carries for a trigger.
/// Ability reactions come before item reactions for the same subject.
pub fn run_handlers(
    trigger: Trigger,
    subject: SlotRef,
    field: &Field,
    rng: &mut dyn RandomSource,
) -> Result<Vec<Action>, ActionError> {
    let Ok(creature) = field.creature_at(subject) else {
        return Ok(Vec::new());
    };
    if creature.is_fainted() {
        return Ok(Vec::new());
    }

    let mut actions = Vec::new();
    if let Some(ability) = creature.ability {
        let reactions = ability_handler(ability, trigger, subject, field, rng)?;
        if !reactions.is_empty() {
            trace!(?ability, ?trigger, subject = %subject, "ability triggered");
        }
        actions.extend(reactions);
    }
    if let Some(item) = creature.held_item {
        let reactions = item_handler(item, trigger, subject, field)?;
        if !reactions.is_empty() {
            trace!(?item, ?trigger, subject = %subject, "item triggered");
        }
        actions.extend(reactions);
    }
    Ok(actions)
}

fn ability_handler(
    ability: Ability,
    trigger: Trigger,
    subject: SlotRef,
    field: &Field,
    rng: &mut dyn RandomSource,
) -> Result<Vec<Action>, ActionError> {
    let subject_creature = field.creature_at(subject)?;
    let actions = match (ability, trigger) {
        // Intimidate lowers Attack of every opposing active on entry.
        (Ability::Intimidate, Trigger::SwitchIn) => {
            let mut actions = vec![Action::Message(format!(
                "{}'s Intimidate cuts the foe's Attack!",
                subject_creature.name
            ))];
            for target in field.opposing_refs(subject) {
                actions.push(Action::StatChange {
                    target,
                    stat: Stat::Attack,
                    delta: -1,
                });
            }
            actions
        }
        // Static has a 30% chance to paralyze on contact.
        (Ability::Static, Trigger::ContactReceived { attacker }) => {
            let target = field.creature_at(attacker)?;
            if target.status.is_none() && roll_percent(rng, 30) {
                vec![
                    Action::Message(format!(
                        "{}'s Static paralyzes {}!",
                        subject_creature.name, target.name
                    )),
                    Action::ApplyStatus {
                        target: attacker,
                        kind: StatusKind::Paralysis,
                        sleep_turns: 0,
                    },
                ]
            } else {
                Vec::new()
            }
        }
        // Rough Skin chips attackers for an eighth of their max HP.
        (Ability::RoughSkin, Trigger::ContactReceived { attacker }) => {
            let target = field.creature_at(attacker)?;
            vec![
                Action::Message(format!("{} is hurt by Rough Skin!", target.name)),
                Action::Damage {
                    target: attacker,
                    amount: (target.max_hp / 8).max(1),
                    category: None,
                    source: Some(subject),
                },
            ]
        }
        (Ability::Moxie, Trigger::FoeFainted) => vec![
            Action::Message(format!(
                "{}'s Moxie boosts its Attack!",
                subject_creature.name
            )),
            Action::StatChange {
                target: subject,
                stat: Stat::Attack,
                delta: 1,
            },
        ],
        (Ability::SpeedBoost, Trigger::TurnEnd) => vec![Action::StatChange {
            target: subject,
            stat: Stat::Speed,
            delta: 1,
        }],
        (Ability::Stamina, Trigger::DamageTaken { amount }) if amount > 0 => {
            vec![Action::StatChange {
                target: subject,
                stat: Stat::Defense,
                delta: 1,
            }]
        }
        (Ability::Forecast, Trigger::WeatherChanged { weather }) => {
            let description = match weather {
                Some(w) => format!("{} transforms with the {}!", subject_creature.name, w),
                None => format!("{} returns to normal.", subject_creature.name),
            };
            vec![Action::Message(description)]
        }
        // Truant's loaf check happens in move execution, where the skip
        // has to happen; Blaze, Torrent, Overgrow, Guts, and Levitate
        // live in the damage pipeline and stat lookups.
        _ => Vec::new(),
    };
    Ok(actions)
}

fn item_handler(
    item: Item,
    trigger: Trigger,
    subject: SlotRef,
    field: &Field,
) -> Result<Vec<Action>, ActionError> {
    let creature = field.creature_at(subject)?;
    let actions = match (item, trigger) {
        (Item::Leftovers, Trigger::TurnEnd) => {
            if creature.current_hp() < creature.max_hp {
                vec![
                    Action::Message(format!(
                        "{} restores a little HP with its Leftovers.",
                        creature.name
                    )),
                    Action::Heal {
                        target: subject,
                        amount: (creature.max_hp / 16).max(1),
                    },
                ]
            } else {
                Vec::new()
            }
        }
        // Life Orb and the Choice items modify damage and stats directly.
        _ => Vec::new(),
    };
    Ok(actions)
}
