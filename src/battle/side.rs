use crate::battle::slot::Slot;
use crate::creature::CreatureInst;
use schema::{Hazard, Screen, SideFlag};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default duration, in turns, for screens and timed side flags.
pub const SIDE_CONDITION_TURNS: u8 = 5;

/// One team: its full party, its active slots, and the conditions that
/// apply to the whole side of the field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Side {
    pub party: Vec<CreatureInst>,
    pub slots: Vec<Slot>,
    /// Screen -> remaining turns.
    pub screens: HashMap<Screen, u8>,
    /// Hazard -> layer count, capped at `Hazard::max_layers`.
    pub hazards: HashMap<Hazard, u8>,
    /// Side flag -> remaining turns.
    pub flags: HashMap<SideFlag, u8>,
}

impl Side {
    pub fn new(party: Vec<CreatureInst>, slots_per_side: usize) -> Self {
        Self {
            party,
            slots: vec![Slot::new(); slots_per_side],
            screens: HashMap::new(),
            hazards: HashMap::new(),
            flags: HashMap::new(),
        }
    }

    /// The combatant bound to the given slot, if the slot is occupied.
    pub fn active(&self, slot_index: usize) -> Option<&CreatureInst> {
        let party_index = self.slots.get(slot_index)?.bound?;
        self.party.get(party_index)
    }

    pub fn active_mut(&mut self, slot_index: usize) -> Option<&mut CreatureInst> {
        let party_index = self.slots.get(slot_index)?.bound?;
        self.party.get_mut(party_index)
    }

    pub fn has_screen(&self, screen: Screen) -> bool {
        self.screens.contains_key(&screen)
    }

    /// Raise a screen. Returns false if it was already up.
    pub fn set_screen(&mut self, screen: Screen) -> bool {
        if self.has_screen(screen) {
            return false;
        }
        self.screens.insert(screen, SIDE_CONDITION_TURNS);
        true
    }

    pub fn hazard_layers(&self, hazard: Hazard) -> u8 {
        self.hazards.get(&hazard).copied().unwrap_or(0)
    }

    /// Add one hazard layer. Returns false when already at the cap.
    pub fn add_hazard(&mut self, hazard: Hazard) -> bool {
        let layers = self.hazard_layers(hazard);
        if layers >= hazard.max_layers() {
            return false;
        }
        self.hazards.insert(hazard, layers + 1);
        true
    }

    pub fn has_flag(&self, flag: SideFlag) -> bool {
        self.flags.contains_key(&flag)
    }

    /// Raise a timed side flag. Returns false if it was already up.
    pub fn set_flag(&mut self, flag: SideFlag) -> bool {
        if self.has_flag(flag) {
            return false;
        }
        self.flags.insert(flag, SIDE_CONDITION_TURNS);
        true
    }

    /// Decrement screen and flag timers, dropping expired entries.
    /// Hazards persist until removed.
    pub fn tick_conditions(&mut self) {
        fn tick<K: std::hash::Hash + Eq>(map: &mut HashMap<K, u8>) {
            map.retain(|_, turns| {
                *turns = turns.saturating_sub(1);
                *turns > 0
            });
        }
        tick(&mut self.screens);
        tick(&mut self.flags);
    }

    /// Whether every party member has fainted.
    pub fn is_defeated(&self) -> bool {
        self.party.iter().all(|c| c.is_fainted())
    }

    /// First healthy party member not currently bound to any slot.
    pub fn first_healthy_reserve(&self) -> Option<usize> {
        let bound: Vec<usize> = self.slots.iter().filter_map(|s| s.bound).collect();
        self.party
            .iter()
            .enumerate()
            .find(|(i, c)| !c.is_fainted() && !bound.contains(i))
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{MoveId, Species};

    fn test_party() -> Vec<CreatureInst> {
        vec![
            CreatureInst::new(Species::Pikachu, 50, vec![MoveId::ThunderShock]).unwrap(),
            CreatureInst::new(Species::Squirtle, 50, vec![MoveId::WaterGun]).unwrap(),
        ]
    }

    #[test]
    fn test_hazard_layer_cap() {
        let mut side = Side::new(test_party(), 1);
        assert!(side.add_hazard(Hazard::Spikes));
        assert!(side.add_hazard(Hazard::Spikes));
        assert!(side.add_hazard(Hazard::Spikes));
        assert!(!side.add_hazard(Hazard::Spikes));
        assert_eq!(side.hazard_layers(Hazard::Spikes), 3);

        assert!(side.add_hazard(Hazard::StealthRock));
        assert!(!side.add_hazard(Hazard::StealthRock));
    }

    #[test]
    fn test_screen_expires_after_ticks() {
        let mut side = Side::new(test_party(), 1);
        assert!(side.set_screen(Screen::Reflect));
        assert!(!side.set_screen(Screen::Reflect));
        for _ in 0..SIDE_CONDITION_TURNS {
            side.tick_conditions();
        }
        assert!(!side.has_screen(Screen::Reflect));
    }

    #[test]
    fn test_flags_tick_down_alongside_screens() {
        let mut side = Side::new(test_party(), 1);
        assert!(side.set_screen(Screen::Reflect));
        assert!(side.set_flag(SideFlag::Tailwind));
        side.tick_conditions();
        assert!(side.has_screen(Screen::Reflect));
        assert!(side.has_flag(SideFlag::Tailwind));
        for _ in 1..SIDE_CONDITION_TURNS {
            side.tick_conditions();
        }
        assert!(!side.has_screen(Screen::Reflect));
        assert!(!side.has_flag(SideFlag::Tailwind));
    }

    #[test]
    fn test_first_healthy_reserve_skips_bound_and_fainted() {
        let mut side = Side::new(test_party(), 1);
        side.slots[0].bind(0);
        assert_eq!(side.first_healthy_reserve(), Some(1));
        side.party[1].take_damage(9999);
        assert_eq!(side.first_healthy_reserve(), None);
        assert!(!side.is_defeated());
    }
}
