use crate::battle::field::SlotRef;
use bitflags::bitflags;
use schema::Stat;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

bitflags! {
    /// Volatile conditions tied to a field position. They clear on switch,
    /// unlike the non-volatile status stored on the combatant itself.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct VolatileStatus: u8 {
        const FLINCHED = 1 << 0;
        const PROTECTED = 1 << 1;
        /// Set when the occupant selects a protect-class move this turn;
        /// used to decide whether the protect streak resets at end of turn.
        const USED_PROTECT_CLASS = 1 << 2;
    }
}

// bitflags types serialize through their raw bits.
impl Serialize for VolatileStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for VolatileStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(VolatileStatus::from_bits_truncate(u8::deserialize(
            deserializer,
        )?))
    }
}

/// One active position on a side. Everything here is positional state:
/// it belongs to the slot, not the combatant, and resets when the
/// occupant changes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Slot {
    /// Party index of the bound combatant, if any.
    pub bound: Option<usize>,
    pub volatiles: VolatileStatus,
    /// Stat stages, each clamped to [-6, 6]. Absent key means stage 0.
    pub stat_stages: HashMap<Stat, i8>,
    /// Consecutive successful protect-class uses; drives the halving odds.
    pub protect_count: u8,
    /// Physical move damage received this turn, for Counter.
    pub physical_damage_taken: u16,
    /// Special move damage received this turn, for Mirror Coat.
    pub special_damage_taken: u16,
    /// Whoever last dealt move damage to this slot this turn.
    pub last_attacker: Option<SlotRef>,
    /// Full turns the occupant has been active. Parity drives Truant.
    pub turns_active: u32,
}

impl Slot {
    pub fn new() -> Self {
        Self {
            bound: None,
            volatiles: VolatileStatus::empty(),
            stat_stages: HashMap::new(),
            protect_count: 0,
            physical_damage_taken: 0,
            special_damage_taken: 0,
            last_attacker: None,
            turns_active: 0,
        }
    }

    pub fn stage(&self, stat: Stat) -> i8 {
        self.stat_stages.get(&stat).copied().unwrap_or(0)
    }

    /// Shift a stage, clamping to [-6, 6]. Returns the applied delta,
    /// which is zero when the stage was already at its limit.
    pub fn apply_stat_change(&mut self, stat: Stat, delta: i8) -> i8 {
        let current = self.stage(stat);
        let next = (current + delta).clamp(-6, 6);
        if next == current {
            return 0;
        }
        self.stat_stages.insert(stat, next);
        next - current
    }

    /// Reset all positional state when a new occupant is bound.
    pub fn bind(&mut self, party_index: usize) {
        self.bound = Some(party_index);
        self.volatiles = VolatileStatus::empty();
        self.stat_stages.clear();
        self.protect_count = 0;
        self.physical_damage_taken = 0;
        self.special_damage_taken = 0;
        self.last_attacker = None;
        self.turns_active = 0;
    }

    pub fn unbind(&mut self) {
        self.bound = None;
        self.volatiles = VolatileStatus::empty();
        self.stat_stages.clear();
        self.protect_count = 0;
        self.physical_damage_taken = 0;
        self.special_damage_taken = 0;
        self.last_attacker = None;
        self.turns_active = 0;
    }

    /// Per-turn housekeeping at end of turn: clear flinch and protection,
    /// clear the damage counters, and advance the activity counter. The
    /// protect streak survives only if a protect-class move was used.
    pub fn end_of_turn_reset(&mut self) {
        self.volatiles.remove(VolatileStatus::FLINCHED);
        self.volatiles.remove(VolatileStatus::PROTECTED);
        if !self.volatiles.contains(VolatileStatus::USED_PROTECT_CLASS) {
            self.protect_count = 0;
        }
        self.volatiles.remove(VolatileStatus::USED_PROTECT_CLASS);
        self.physical_damage_taken = 0;
        self.special_damage_taken = 0;
        self.last_attacker = None;
        if self.bound.is_some() {
            self.turns_active += 1;
        }
    }
}

impl Default for Slot {
    fn default() -> Self {
        Self::new()
    }
}
