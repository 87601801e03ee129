use serde::{Deserialize, Serialize};

/// Battle-level configuration. All fields have documented defaults; hosts
/// override what they need and pass the config to `BattleFlow::new`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleConfig {
    /// Active positions per side: 1 for singles, 2+ for doubles formats.
    pub slots_per_side: usize,
    /// Hard ceiling on turn count; reaching it ends the battle in a Draw.
    pub turn_limit: u32,
    /// Consecutive turns with no net HP change before the battle is called
    /// as a Draw (anti-stall safeguard).
    pub stagnation_turn_limit: u32,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            slots_per_side: 1,
            turn_limit: 1000,
            stagnation_turn_limit: 100,
        }
    }
}

impl BattleConfig {
    pub fn singles() -> Self {
        Self::default()
    }

    pub fn doubles() -> Self {
        Self {
            slots_per_side: 2,
            ..Self::default()
        }
    }

    pub fn with_turn_limit(mut self, limit: u32) -> Self {
        self.turn_limit = limit;
        self
    }

    pub fn with_stagnation_limit(mut self, limit: u32) -> Self {
        self.stagnation_turn_limit = limit;
        self
    }
}
