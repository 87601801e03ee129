//! End-of-turn upkeep: residual status damage, weather chip, turn-end
//! handlers, then duration bookkeeping. Everything that costs or restores
//! HP goes through the queue like any other action.

use crate::battle::actions::Action;
use crate::battle::executor::Executor;
use crate::battle::field::{Field, SlotRef};
use crate::battle::handlers::{run_handlers, Trigger};
use crate::battle::queue::ActionQueue;
use crate::creature::StatusCondition;
use crate::errors::ActionError;
use crate::observer::BattleObserver;
use crate::rng::RandomSource;
use schema::{ElementType, Weather};

pub fn run_end_of_turn(
    executor: &Executor,
    field: &mut Field,
    rng: &mut dyn RandomSource,
    observers: &mut [Box<dyn BattleObserver>],
) -> Result<(), ActionError> {
    let mut queue = ActionQueue::new();

    // Residual status damage, in canonical slot order.
    for slot_ref in field.occupied_refs() {
        for action in status_damage(slot_ref, field)? {
            queue.push_back(action);
        }
    }

    // Weather chip.
    if let Some(weather) = field.weather_kind() {
        for slot_ref in field.occupied_refs() {
            for action in weather_chip(weather, slot_ref, field)? {
                queue.push_back(action);
            }
        }
    }

    // Turn-end abilities and items.
    for slot_ref in field.occupied_refs() {
        for action in run_handlers(Trigger::TurnEnd, slot_ref, field, rng)? {
            queue.push_back(action);
        }
    }

    executor.run(&mut queue, field, rng, observers)?;

    // Durations tick after the upkeep they governed.
    let weather_before = field.weather_kind();
    field.tick_conditions();
    if let (Some(expired), None) = (weather_before, field.weather_kind()) {
        let mut expiry = ActionQueue::new();
        expiry.push_back(Action::Message(format!("The {} subsided.", expired)));
        for slot_ref in field.occupied_refs() {
            for action in
                run_handlers(Trigger::WeatherChanged { weather: None }, slot_ref, field, rng)?
            {
                expiry.push_back(action);
            }
        }
        executor.run(&mut expiry, field, rng, observers)?;
    }

    for side in &mut field.sides {
        for slot in &mut side.slots {
            slot.end_of_turn_reset();
        }
    }
    Ok(())
}

/// Burn ticks a sixteenth, poison an eighth, and bad poison an escalating
/// sixteenth per counter. The toxic counter advances here, after its
/// damage for the turn is computed.
fn status_damage(slot_ref: SlotRef, field: &mut Field) -> Result<Vec<Action>, ActionError> {
    let creature = field.creature_at(slot_ref)?;
    let name = creature.name.clone();
    let max_hp = creature.max_hp;

    let (amount, description) = match creature.status {
        Some(StatusCondition::Burn) => ((max_hp / 16).max(1), "hurt by its burn"),
        Some(StatusCondition::Poison) => ((max_hp / 8).max(1), "hurt by poison"),
        Some(StatusCondition::BadlyPoisoned { counter }) => {
            let amount = ((counter as u32 * max_hp as u32) / 16).max(1) as u16;
            field.creature_at_mut(slot_ref)?.status = Some(StatusCondition::BadlyPoisoned {
                counter: counter.saturating_add(1),
            });
            (amount, "hurt by poison")
        }
        _ => return Ok(Vec::new()),
    };

    Ok(vec![
        Action::Message(format!("{} is {}!", name, description)),
        Action::Damage {
            target: slot_ref,
            amount,
            category: None,
            source: None,
        },
    ])
}

/// Sandstorm wears down everything that is not Rock, Ground, or Steel;
/// hail everything that is not Ice. A sixteenth of max HP per turn.
fn weather_chip(
    weather: Weather,
    slot_ref: SlotRef,
    field: &Field,
) -> Result<Vec<Action>, ActionError> {
    let creature = field.creature_at(slot_ref)?;
    let types = creature.types().map_err(ActionError::from)?;

    let immune = match weather {
        Weather::Sandstorm => [ElementType::Rock, ElementType::Ground, ElementType::Steel]
            .iter()
            .any(|t| types.contains(t)),
        Weather::Hail => types.contains(&ElementType::Ice),
        Weather::Sun | Weather::Rain => true,
    };
    if immune {
        return Ok(Vec::new());
    }

    Ok(vec![
        Action::Message(format!("{} is buffeted by the {}!", creature.name, weather)),
        Action::Damage {
            target: slot_ref,
            amount: (creature.max_hp / 16).max(1),
            category: None,
            source: None,
        },
    ])
}
