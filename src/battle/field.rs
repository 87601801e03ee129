use crate::battle::side::Side;
use crate::battle::slot::Slot;
use crate::creature::CreatureInst;
use crate::errors::ActionError;
use schema::{Ability, ElementType, Room, Terrain, Weather};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default duration, in turns, for weather, terrain, and rooms.
pub const FIELD_CONDITION_TURNS: u8 = 5;

/// The two sides of a battle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SideId {
    Player,
    Enemy,
}

impl SideId {
    pub fn opponent(self) -> SideId {
        match self {
            SideId::Player => SideId::Enemy,
            SideId::Enemy => SideId::Player,
        }
    }

    pub fn index(self) -> usize {
        match self {
            SideId::Player => 0,
            SideId::Enemy => 1,
        }
    }

    pub fn both() -> [SideId; 2] {
        [SideId::Player, SideId::Enemy]
    }
}

impl fmt::Display for SideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SideId::Player => write!(f, "player"),
            SideId::Enemy => write!(f, "enemy"),
        }
    }
}

/// Address of one active position on the field.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotRef {
    pub side: SideId,
    pub slot: usize,
}

impl SlotRef {
    pub fn new(side: SideId, slot: usize) -> Self {
        Self { side, slot }
    }
}

impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} slot {}", self.side, self.slot)
    }
}

/// A field-wide condition and its remaining duration.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timed<T> {
    pub kind: T,
    pub turns_remaining: u8,
}

/// Complete battle state: both sides plus the global conditions. All
/// mutation during a turn goes through applied actions; the methods here
/// are invariant-preserving primitives those applications use.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Field {
    pub sides: [Side; 2],
    pub weather: Option<Timed<Weather>>,
    pub terrain: Option<Timed<Terrain>>,
    pub room: Option<Timed<Room>>,
    pub turn_number: u32,
}

impl Field {
    pub fn new(player: Side, enemy: Side) -> Self {
        Self {
            sides: [player, enemy],
            weather: None,
            terrain: None,
            room: None,
            turn_number: 0,
        }
    }

    pub fn side(&self, id: SideId) -> &Side {
        &self.sides[id.index()]
    }

    pub fn side_mut(&mut self, id: SideId) -> &mut Side {
        &mut self.sides[id.index()]
    }

    pub fn slot(&self, slot_ref: SlotRef) -> Result<&Slot, ActionError> {
        self.side(slot_ref.side)
            .slots
            .get(slot_ref.slot)
            .ok_or(ActionError::InvalidSlot(slot_ref))
    }

    pub fn slot_mut(&mut self, slot_ref: SlotRef) -> Result<&mut Slot, ActionError> {
        self.side_mut(slot_ref.side)
            .slots
            .get_mut(slot_ref.slot)
            .ok_or(ActionError::InvalidSlot(slot_ref))
    }

    /// The combatant bound at a position, or `EmptySlot` if nothing is.
    pub fn creature_at(&self, slot_ref: SlotRef) -> Result<&CreatureInst, ActionError> {
        self.slot(slot_ref)?;
        self.side(slot_ref.side)
            .active(slot_ref.slot)
            .ok_or(ActionError::EmptySlot(slot_ref))
    }

    pub fn creature_at_mut(&mut self, slot_ref: SlotRef) -> Result<&mut CreatureInst, ActionError> {
        self.slot(slot_ref)?;
        self.side_mut(slot_ref.side)
            .active_mut(slot_ref.slot)
            .ok_or(ActionError::EmptySlot(slot_ref))
    }

    /// All positions with a living occupant, in the canonical order
    /// (player side first, then by slot index). This ordering is the
    /// tie-break of last resort everywhere iteration order matters.
    pub fn occupied_refs(&self) -> Vec<SlotRef> {
        let mut refs = Vec::new();
        for side_id in SideId::both() {
            for slot_index in 0..self.side(side_id).slots.len() {
                let slot_ref = SlotRef::new(side_id, slot_index);
                if let Ok(creature) = self.creature_at(slot_ref) {
                    if !creature.is_fainted() {
                        refs.push(slot_ref);
                    }
                }
            }
        }
        refs
    }

    /// Occupied opposing positions, for move targeting and Intimidate.
    pub fn opposing_refs(&self, slot_ref: SlotRef) -> Vec<SlotRef> {
        self.occupied_refs()
            .into_iter()
            .filter(|r| r.side == slot_ref.side.opponent())
            .collect()
    }

    pub fn weather_kind(&self) -> Option<Weather> {
        self.weather.map(|w| w.kind)
    }

    pub fn terrain_kind(&self) -> Option<Terrain> {
        self.terrain.map(|t| t.kind)
    }

    pub fn room_active(&self, room: Room) -> bool {
        self.room.map(|r| r.kind) == Some(room)
    }

    /// Replace the weather. Returns false when that weather was already
    /// active (the set is a no-op, duration is not refreshed).
    pub fn set_weather(&mut self, weather: Weather, turns: u8) -> bool {
        if self.weather_kind() == Some(weather) {
            return false;
        }
        self.weather = Some(Timed {
            kind: weather,
            turns_remaining: turns,
        });
        true
    }

    pub fn set_terrain(&mut self, terrain: Terrain, turns: u8) -> bool {
        if self.terrain_kind() == Some(terrain) {
            return false;
        }
        self.terrain = Some(Timed {
            kind: terrain,
            turns_remaining: turns,
        });
        true
    }

    /// Set a room, or clear it when the same room is already active.
    /// Returns true when the room was raised, false when it was cleared.
    pub fn set_room(&mut self, room: Room, turns: u8) -> bool {
        if self.room_active(room) {
            self.room = None;
            return false;
        }
        self.room = Some(Timed {
            kind: room,
            turns_remaining: turns,
        });
        true
    }

    /// A combatant is grounded unless it is Flying-typed or has Levitate.
    /// Terrain only touches grounded combatants.
    pub fn is_grounded(&self, slot_ref: SlotRef) -> Result<bool, ActionError> {
        let creature = self.creature_at(slot_ref)?;
        if creature.has_ability(Ability::Levitate) {
            return Ok(false);
        }
        Ok(!creature
            .types()
            .map_err(ActionError::from)?
            .contains(&ElementType::Flying))
    }

    /// Decrement global and side condition timers, dropping what expires.
    pub fn tick_conditions(&mut self) {
        fn tick<T>(timed: &mut Option<Timed<T>>) {
            if let Some(t) = timed {
                t.turns_remaining = t.turns_remaining.saturating_sub(1);
                if t.turns_remaining == 0 {
                    *timed = None;
                }
            }
        }
        tick(&mut self.weather);
        tick(&mut self.terrain);
        tick(&mut self.room);
        for side in &mut self.sides {
            side.tick_conditions();
        }
    }

    /// Total remaining HP across both parties, for stagnation tracking.
    pub fn total_hp(&self) -> u32 {
        self.sides
            .iter()
            .flat_map(|s| s.party.iter())
            .map(|c| c.current_hp() as u32)
            .sum()
    }
}
