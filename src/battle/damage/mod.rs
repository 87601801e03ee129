//! The damage pipeline: an ordered list of steps, each reading battle
//! state and folding its contribution into an explicit accumulator.
//!
//! Steps are addressed by name, so hosts can insert, replace, or remove
//! them without forking the standard ordering.

pub mod steps;

use crate::battle::field::{Field, SlotRef};
use crate::errors::ActionError;
use crate::rng::RandomSource;
use schema::{ElementType, MoveCategory, MoveData, MoveId};

/// Working state for one damage computation. `base_damage` is set by the
/// base formula; every later step multiplies into `multiplier` so the
/// contribution of each step stays inspectable.
#[derive(Debug, Clone)]
pub struct DamageContext {
    pub attacker: SlotRef,
    pub defender: SlotRef,
    pub move_id: MoveId,
    pub element: ElementType,
    pub category: MoveCategory,
    pub power: u16,
    /// 1-based hit counter for multi-hit moves.
    pub hit_number: u8,
    /// Pin the critical outcome instead of rolling for it.
    pub force_critical: Option<bool>,
    /// Pin the random damage factor instead of drawing it.
    pub fixed_random: Option<f64>,
    pub is_crit: bool,
    pub is_stab: bool,
    /// Combined type matchup; zero means immune and forces zero damage.
    pub type_effectiveness: f64,
    pub base_damage: u32,
    pub multiplier: f64,
}

impl DamageContext {
    pub fn new(attacker: SlotRef, defender: SlotRef, move_id: MoveId, data: &MoveData) -> Self {
        Self {
            attacker,
            defender,
            move_id,
            element: data.element,
            category: data.category,
            power: data.power,
            hit_number: 1,
            force_critical: None,
            fixed_random: None,
            is_crit: false,
            is_stab: false,
            type_effectiveness: 1.0,
            base_damage: 0,
            multiplier: 1.0,
        }
    }

    pub fn with_forced_critical(mut self, forced: bool) -> Self {
        self.force_critical = Some(forced);
        self
    }

    pub fn with_fixed_random(mut self, factor: f64) -> Self {
        self.fixed_random = Some(factor);
        self
    }

    /// Collapse the accumulator into the final HP amount. Immunity wins
    /// over everything; any other damaging hit deals at least one point.
    pub fn final_damage(&self) -> u16 {
        if self.power == 0 || self.type_effectiveness == 0.0 {
            return 0;
        }
        let raw = (self.base_damage as f64 * self.multiplier) as u32;
        raw.max(1).min(u16::MAX as u32) as u16
    }
}

/// One stage of the pipeline.
pub trait DamageStep {
    /// Stable identifier used to address this step in the pipeline.
    fn name(&self) -> &'static str;

    fn apply(
        &self,
        ctx: &mut DamageContext,
        field: &Field,
        rng: &mut dyn RandomSource,
    ) -> Result<(), ActionError>;
}

/// The ordered step list. Construction is explicit so the order is
/// visible in one place.
pub struct DamagePipeline {
    steps: Vec<Box<dyn DamageStep>>,
}

impl DamagePipeline {
    /// The standard eleven-step pipeline, in resolution order. The crit
    /// roll leads because its flag changes which stat stages the base
    /// formula counts; attacker-side modifiers (ability, item) run before
    /// the field modifiers and the type matchup.
    pub fn standard() -> Self {
        use steps::*;
        Self {
            steps: vec![
                Box::new(CriticalStep),
                Box::new(BaseDamageStep),
                Box::new(RandomFactorStep),
                Box::new(StabStep),
                Box::new(PinchAbilityStep),
                Box::new(ItemStep),
                Box::new(WeatherStep),
                Box::new(TerrainStep),
                Box::new(ScreenStep),
                Box::new(TypeEffectivenessStep),
                Box::new(BurnStep),
            ],
        }
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.name() == name)
    }

    /// Insert a custom step directly after the named one. Returns false if
    /// the anchor does not exist.
    pub fn insert_after(&mut self, anchor: &str, step: Box<dyn DamageStep>) -> bool {
        match self.position(anchor) {
            Some(index) => {
                self.steps.insert(index + 1, step);
                true
            }
            None => false,
        }
    }

    /// Swap the named step for a replacement. Returns false if absent.
    pub fn replace(&mut self, name: &str, step: Box<dyn DamageStep>) -> bool {
        match self.position(name) {
            Some(index) => {
                self.steps[index] = step;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                self.steps.remove(index);
                true
            }
            None => false,
        }
    }

    /// Run every step over the context in order.
    pub fn run(
        &self,
        ctx: &mut DamageContext,
        field: &Field,
        rng: &mut dyn RandomSource,
    ) -> Result<(), ActionError> {
        for step in &self.steps {
            step.apply(ctx, field, rng)?;
        }
        Ok(())
    }
}

impl Default for DamagePipeline {
    fn default() -> Self {
        Self::standard()
    }
}
