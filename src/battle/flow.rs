//! The battle flow state machine. A flow owns the field, the per-side
//! decision providers, the executor, and the random stream, and drives
//! whole turns: selection, ordering, resolution, upkeep, replacements,
//! judgement.

use crate::battle::actions::{Action, ChosenAction};
use crate::battle::arbiter::{judge, Outcome};
use crate::battle::end_of_turn::run_end_of_turn;
use crate::battle::executor::Executor;
use crate::battle::field::{Field, SideId, SlotRef};
use crate::battle::handlers::{run_handlers, Trigger};
use crate::battle::order::resolve_order;
use crate::battle::queue::ActionQueue;
use crate::battle::side::Side;
use crate::battle::validation::validate_field;
use crate::config::BattleConfig;
use crate::creature::CreatureInst;
use crate::errors::FlowError;
use crate::observer::BattleObserver;
use crate::provider::ActionProvider;
use crate::rng::RandomSource;
use tracing::{debug, info};

/// Where the flow stands in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    /// Constructed; `start` has not run yet.
    Created,
    /// Turns can be run.
    InProgress,
    /// A terminal outcome was reached; nothing further runs.
    Ended,
}

impl BattlePhase {
    fn name(self) -> &'static str {
        match self {
            BattlePhase::Created => "Created",
            BattlePhase::InProgress => "InProgress",
            BattlePhase::Ended => "Ended",
        }
    }
}

pub struct BattleFlow {
    config: BattleConfig,
    field: Field,
    providers: [Box<dyn ActionProvider>; 2],
    observers: Vec<Box<dyn BattleObserver>>,
    executor: Executor,
    rng: Box<dyn RandomSource>,
    phase: BattlePhase,
    outcome: Outcome,
    stagnant_turns: u32,
    last_total_hp: u32,
}

impl BattleFlow {
    /// Build a flow over two parties. Each side's leading party members
    /// are bound to its slots; a party smaller than the slot count is
    /// rejected.
    pub fn new(
        player_party: Vec<CreatureInst>,
        enemy_party: Vec<CreatureInst>,
        config: BattleConfig,
        player_provider: Box<dyn ActionProvider>,
        enemy_provider: Box<dyn ActionProvider>,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, FlowError> {
        for (name, party) in [("player", &player_party), ("enemy", &enemy_party)] {
            if party.len() < config.slots_per_side {
                return Err(FlowError::InvalidParty(format!(
                    "{} party has {} member(s), needs at least {}",
                    name,
                    party.len(),
                    config.slots_per_side
                )));
            }
        }

        let mut field = Field::new(
            Side::new(player_party, config.slots_per_side),
            Side::new(enemy_party, config.slots_per_side),
        );
        for side_id in SideId::both() {
            for slot_index in 0..config.slots_per_side {
                field.side_mut(side_id).slots[slot_index].bind(slot_index);
            }
        }

        let violations = validate_field(&field);
        if !violations.is_empty() {
            return Err(FlowError::Validation(violations));
        }

        let last_total_hp = field.total_hp();
        Ok(Self {
            config,
            field,
            providers: [player_provider, enemy_provider],
            observers: Vec::new(),
            executor: Executor::new(),
            rng,
            phase: BattlePhase::Created,
            outcome: Outcome::Ongoing,
            stagnant_turns: 0,
            last_total_hp,
        })
    }

    pub fn add_observer(&mut self, observer: Box<dyn BattleObserver>) {
        self.observers.push(observer);
    }

    /// Swap the executor, e.g. for a customized damage pipeline.
    pub fn set_executor(&mut self, executor: Executor) {
        self.executor = executor;
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn turn_number(&self) -> u32 {
        self.field.turn_number
    }

    /// Observers are owned by the flow; this releases them for
    /// inspection once the battle is over.
    pub fn into_observers(self) -> Vec<Box<dyn BattleObserver>> {
        self.observers
    }

    fn require_phase(&self, expected: BattlePhase) -> Result<(), FlowError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(FlowError::InvalidPhase {
                expected: expected.name(),
                actual: self.phase.name().to_string(),
            })
        }
    }

    /// Open the battle: entry abilities of the leading combatants fire
    /// in canonical order.
    pub fn start(&mut self) -> Result<(), FlowError> {
        self.require_phase(BattlePhase::Created)?;

        for observer in &mut self.observers {
            observer.on_battle_start(&self.field);
        }

        let mut queue = ActionQueue::new();
        for slot_ref in self.field.occupied_refs() {
            let reactions = run_handlers(
                Trigger::SwitchIn,
                slot_ref,
                &self.field,
                self.rng.as_mut(),
            )?;
            for action in reactions {
                queue.push_back(action);
            }
        }
        self.executor.run(
            &mut queue,
            &mut self.field,
            self.rng.as_mut(),
            &mut self.observers,
        )?;

        self.phase = BattlePhase::InProgress;
        info!("battle started");
        Ok(())
    }

    /// Run one full turn. Returns the outcome as of its end.
    pub fn run_turn(&mut self) -> Result<Outcome, FlowError> {
        self.require_phase(BattlePhase::InProgress)?;

        self.field.turn_number += 1;
        debug!(turn = self.field.turn_number, "turn begins");
        for observer in &mut self.observers {
            observer.on_turn_start(&self.field);
        }

        // Selection. A provider returning `None` passes for that slot.
        let mut chosen: Vec<(SlotRef, ChosenAction)> = Vec::new();
        for slot_ref in self.field.occupied_refs() {
            let provider = &mut self.providers[slot_ref.side.index()];
            if let Some(choice) = provider.choose_action(&self.field, slot_ref) {
                chosen.push((slot_ref, choice));
            }
        }

        // Ordering.
        let ordered = resolve_order(&self.field, &chosen, self.rng.as_mut())?;

        // Resolution.
        let mut queue = ActionQueue::new();
        for (slot_ref, choice) in ordered {
            match choice {
                ChosenAction::Move { move_index, target } => queue.push_back(Action::UseMove {
                    user: slot_ref,
                    target,
                    move_index,
                }),
                ChosenAction::Switch { party_index } => queue.push_back(Action::Switch {
                    slot: slot_ref,
                    party_index,
                }),
            }
        }
        self.executor.run(
            &mut queue,
            &mut self.field,
            self.rng.as_mut(),
            &mut self.observers,
        )?;

        // Upkeep.
        run_end_of_turn(
            &self.executor,
            &mut self.field,
            self.rng.as_mut(),
            &mut self.observers,
        )?;

        // Forced replacements for emptied slots, while reserves remain.
        self.fill_empty_slots()?;

        // Stagnation tracking and judgement.
        let total_hp = self.field.total_hp();
        if total_hp == self.last_total_hp {
            self.stagnant_turns += 1;
        } else {
            self.stagnant_turns = 0;
            self.last_total_hp = total_hp;
        }

        for observer in &mut self.observers {
            observer.on_turn_end(&self.field);
        }

        self.outcome = judge(&self.field, &self.config, self.stagnant_turns);
        if self.outcome.is_terminal() {
            self.phase = BattlePhase::Ended;
            info!(turn = self.field.turn_number, outcome = %self.outcome, "battle ended");
            for observer in &mut self.observers {
                observer.on_outcome(&self.field, self.outcome);
            }
        }
        Ok(self.outcome)
    }

    /// Run turns until a terminal outcome. The turn ceiling in the
    /// config bounds this loop.
    pub fn run_to_completion(&mut self) -> Result<Outcome, FlowError> {
        if self.phase == BattlePhase::Created {
            self.start()?;
        }
        while self.phase == BattlePhase::InProgress {
            self.run_turn()?;
        }
        Ok(self.outcome)
    }

    fn fill_empty_slots(&mut self) -> Result<(), FlowError> {
        let mut queue = ActionQueue::new();
        for side_id in SideId::both() {
            for slot_index in 0..self.field.side(side_id).slots.len() {
                if self.field.side(side_id).slots[slot_index].bound.is_some() {
                    continue;
                }
                let provider = &mut self.providers[side_id.index()];
                let Some(party_index) = provider.choose_replacement(&self.field, side_id) else {
                    continue;
                };
                queue.push_back(Action::Switch {
                    slot: SlotRef::new(side_id, slot_index),
                    party_index,
                });
            }
        }
        if !queue.is_empty() {
            self.executor.run(
                &mut queue,
                &mut self.field,
                self.rng.as_mut(),
                &mut self.observers,
            )?;
        }
        Ok(())
    }
}
