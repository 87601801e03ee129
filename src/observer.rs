use crate::battle::actions::Action;
use crate::battle::arbiter::Outcome;
use crate::battle::field::Field;
use tracing::debug;

/// Read-only tap on turn resolution. Observers see every applied action
/// in order; they cannot influence resolution.
pub trait BattleObserver {
    fn on_battle_start(&mut self, _field: &Field) {}
    fn on_turn_start(&mut self, _field: &Field) {}
    /// Called after `action` has been applied to `field`, with the
    /// reactions it spawned (in the order they will execute).
    fn on_action(&mut self, _field: &Field, _action: &Action, _reactions: &[Action]) {}
    fn on_turn_end(&mut self, _field: &Field) {}
    fn on_outcome(&mut self, _field: &Field, _outcome: Outcome) {}
}

/// Collects every applied action, mainly for tests and replays.
#[derive(Debug, Default)]
pub struct ActionLog {
    pub actions: Vec<Action>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The narration lines, in order.
    pub fn messages(&self) -> Vec<&str> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                Action::Message(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl BattleObserver for ActionLog {
    // Reactions are executed in turn and logged on their own, so only the
    // applied action is recorded here.
    fn on_action(&mut self, _field: &Field, action: &Action, _reactions: &[Action]) {
        self.actions.push(action.clone());
    }
}

/// Emits each applied action on the `tracing` debug channel.
#[derive(Debug, Default)]
pub struct TraceObserver;

impl BattleObserver for TraceObserver {
    fn on_battle_start(&mut self, field: &Field) {
        debug!(turn = field.turn_number, "battle start");
    }

    fn on_turn_start(&mut self, field: &Field) {
        debug!(turn = field.turn_number, "turn start");
    }

    fn on_action(&mut self, _field: &Field, action: &Action, reactions: &[Action]) {
        debug!(?action, reactions = reactions.len(), "applied");
    }

    fn on_outcome(&mut self, field: &Field, outcome: Outcome) {
        debug!(turn = field.turn_number, %outcome, "battle over");
    }
}
