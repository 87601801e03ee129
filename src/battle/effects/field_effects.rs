use crate::battle::actions::{Action, SideCondition};
use crate::battle::field::{SlotRef, FIELD_CONDITION_TURNS};
use schema::{Hazard, Room, Screen, SideFlag, Terrain, Weather};

/// Weather replaces whatever was active. Re-setting the same weather
/// fails at application and produces a failure message there.
pub fn set_weather(weather: Weather) -> Vec<Action> {
    vec![Action::SetWeather {
        weather,
        turns: FIELD_CONDITION_TURNS,
    }]
}

pub fn set_terrain(terrain: Terrain) -> Vec<Action> {
    vec![Action::SetTerrain {
        terrain,
        turns: FIELD_CONDITION_TURNS,
    }]
}

pub fn set_room(room: Room) -> Vec<Action> {
    vec![Action::SetRoom {
        room,
        turns: FIELD_CONDITION_TURNS,
    }]
}

/// Screens go up on the user's own side.
pub fn set_screen(screen: Screen, user: SlotRef) -> Vec<Action> {
    vec![Action::SetSideCondition {
        side: user.side,
        condition: SideCondition::Screen(screen),
    }]
}

/// Hazards land on the opposing side.
pub fn set_hazard(hazard: Hazard, user: SlotRef) -> Vec<Action> {
    vec![Action::SetSideCondition {
        side: user.side.opponent(),
        condition: SideCondition::Hazard(hazard),
    }]
}

/// Timed flags go up on the user's own side.
pub fn set_side_flag(flag: SideFlag, user: SlotRef) -> Vec<Action> {
    vec![Action::SetSideCondition {
        side: user.side,
        condition: SideCondition::Flag(flag),
    }]
}
