//! Built-in content catalog.
//!
//! The engine only ever reads catalog data through `get_species_data` and
//! `get_move_data`; hosts with their own content replace this module behind
//! the same two functions. Unknown ids are contract violations and surface
//! as `CatalogError`, never as silent defaults.

use crate::errors::CatalogError;
use schema::EffectTarget::{Opponent, User};
use schema::{
    BaseStats, MoveEffect, ElementType, Hazard, MoveCategory, MoveData, MoveId, Room, Screen, SideFlag,
    SpeciesData, Stat, StatusKind, Terrain, Weather,
};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Look up static species data.
pub fn get_species_data(species: schema::Species) -> Result<&'static SpeciesData, CatalogError> {
    SPECIES
        .get(&species)
        .ok_or(CatalogError::SpeciesNotFound(species))
}

/// Look up static move data.
pub fn get_move_data(move_id: MoveId) -> Result<&'static MoveData, CatalogError> {
    MOVES.get(&move_id).ok_or(CatalogError::MoveNotFound(move_id))
}

static SPECIES: LazyLock<HashMap<schema::Species, SpeciesData>> = LazyLock::new(|| {
    use schema::Species::*;

    let mut map = HashMap::new();
    let mut add = |species, name, primary, secondary, stats: [u16; 6]| {
        map.insert(
            species,
            SpeciesData {
                name,
                primary_type: primary,
                secondary_type: secondary,
                base_stats: BaseStats {
                    hp: stats[0],
                    attack: stats[1],
                    defense: stats[2],
                    sp_attack: stats[3],
                    sp_defense: stats[4],
                    speed: stats[5],
                },
            },
        );
    };

    use ElementType::*;
    add(Pikachu, "Pikachu", Electric, None, [35, 55, 40, 50, 50, 90]);
    add(Squirtle, "Squirtle", Water, None, [44, 48, 65, 50, 64, 43]);
    add(Charmander, "Charmander", Fire, None, [39, 52, 43, 60, 50, 65]);
    add(
        Bulbasaur,
        "Bulbasaur",
        Grass,
        Some(Poison),
        [45, 49, 49, 65, 65, 45],
    );
    add(Snorlax, "Snorlax", Normal, None, [160, 110, 65, 65, 110, 30]);
    add(Chansey, "Chansey", Normal, None, [250, 5, 5, 35, 105, 50]);
    add(
        Geodude,
        "Geodude",
        Rock,
        Some(Ground),
        [40, 80, 100, 30, 30, 20],
    );
    add(
        Gengar,
        "Gengar",
        Ghost,
        Some(Poison),
        [60, 65, 60, 130, 75, 110],
    );
    add(
        Gyarados,
        "Gyarados",
        Water,
        Some(Flying),
        [95, 125, 79, 60, 100, 81],
    );
    add(Machamp, "Machamp", Fighting, None, [90, 130, 80, 65, 85, 55]);
    add(Alakazam, "Alakazam", Psychic, None, [55, 50, 45, 135, 95, 120]);
    add(
        Dragonite,
        "Dragonite",
        Dragon,
        Some(Flying),
        [91, 134, 95, 100, 100, 80],
    );
    map
});

static MOVES: LazyLock<HashMap<MoveId, MoveData>> = LazyLock::new(|| {
    use ElementType::*;
    use MoveCategory::*;
    use MoveId::*;

    let mut map = HashMap::new();
    let mut add = |id,
                   name,
                   element,
                   category,
                   power: u16,
                   accuracy: Option<u8>,
                   pp: u8,
                   priority: i8,
                   makes_contact: bool,
                   effects: Vec<schema::MoveEffect>| {
        map.insert(
            id,
            MoveData {
                name,
                element,
                category,
                power,
                accuracy,
                pp,
                priority,
                makes_contact,
                effects,
            },
        );
    };

    // --- Physical ---
    add(Tackle, "Tackle", Normal, Physical, 40, Some(100), 35, 0, true, vec![]);
    add(QuickAttack, "Quick Attack", Normal, Physical, 40, Some(100), 30, 1, true, vec![]);
    add(
        BodySlam,
        "Body Slam",
        Normal,
        Physical,
        85,
        Some(100),
        15,
        0,
        true,
        vec![MoveEffect::Status { status: StatusKind::Paralysis, chance: 30, target: Opponent }],
    );
    add(
        DoubleEdge,
        "Double-Edge",
        Normal,
        Physical,
        120,
        Some(100),
        15,
        0,
        true,
        vec![MoveEffect::Recoil { percent_of_damage: 33 }],
    );
    add(
        TakeDown,
        "Take Down",
        Normal,
        Physical,
        90,
        Some(85),
        20,
        0,
        true,
        vec![MoveEffect::Recoil { percent_of_damage: 25 }],
    );
    add(
        DoubleKick,
        "Double Kick",
        Fighting,
        Physical,
        30,
        Some(100),
        30,
        0,
        true,
        vec![MoveEffect::MultiHit { min_hits: 2, max_hits: 2 }],
    );
    add(
        FurySwipes,
        "Fury Swipes",
        Normal,
        Physical,
        18,
        Some(80),
        15,
        0,
        true,
        vec![MoveEffect::MultiHit { min_hits: 2, max_hits: 5 }],
    );
    add(
        RockSlide,
        "Rock Slide",
        Rock,
        Physical,
        75,
        Some(90),
        10,
        0,
        false,
        vec![MoveEffect::Flinch { chance: 30 }],
    );
    add(
        IronHead,
        "Iron Head",
        Steel,
        Physical,
        80,
        Some(100),
        15,
        0,
        true,
        vec![MoveEffect::Flinch { chance: 30 }],
    );
    add(Earthquake, "Earthquake", Ground, Physical, 100, Some(100), 10, 0, false, vec![]);
    add(
        Bite,
        "Bite",
        Dark,
        Physical,
        60,
        Some(100),
        25,
        0,
        true,
        vec![MoveEffect::Flinch { chance: 30 }],
    );
    add(Counter, "Counter", Fighting, Physical, 0, Some(100), 20, -5, false, vec![MoveEffect::Counter]);

    // --- Special ---
    add(ThunderShock, "Thunder Shock", Electric, Special, 40, Some(100), 30, 0, false, vec![
        MoveEffect::Status { status: StatusKind::Paralysis, chance: 10, target: Opponent },
    ]);
    add(Thunderbolt, "Thunderbolt", Electric, Special, 90, Some(100), 15, 0, false, vec![
        MoveEffect::Status { status: StatusKind::Paralysis, chance: 10, target: Opponent },
    ]);
    add(WaterGun, "Water Gun", Water, Special, 40, Some(100), 25, 0, false, vec![]);
    add(Surf, "Surf", Water, Special, 90, Some(100), 15, 0, false, vec![]);
    add(Ember, "Ember", Fire, Special, 40, Some(100), 25, 0, false, vec![
        MoveEffect::Status { status: StatusKind::Burn, chance: 10, target: Opponent },
    ]);
    add(Flamethrower, "Flamethrower", Fire, Special, 90, Some(100), 15, 0, false, vec![
        MoveEffect::Status { status: StatusKind::Burn, chance: 10, target: Opponent },
    ]);
    add(RazorLeaf, "Razor Leaf", Grass, Special, 55, Some(95), 25, 0, false, vec![]);
    add(GigaDrain, "Giga Drain", Grass, Special, 75, Some(100), 10, 0, false, vec![
        MoveEffect::Drain { percent_of_damage: 50 },
    ]);
    add(IceBeam, "Ice Beam", Ice, Special, 90, Some(100), 10, 0, false, vec![
        MoveEffect::Status { status: StatusKind::Freeze, chance: 10, target: Opponent },
    ]);
    add(Psybeam, "Psybeam", Psychic, Special, 65, Some(100), 20, 0, false, vec![
        MoveEffect::StatChange { stat: Stat::SpecialDefense, delta: -1, chance: 10, target: Opponent },
    ]);
    add(DragonRage, "Dragon Rage", Dragon, Special, 0, Some(100), 10, 0, false, vec![
        MoveEffect::FixedDamage { amount: 40 },
    ]);
    add(SonicBoom, "Sonic Boom", Normal, Special, 0, Some(90), 20, 0, false, vec![
        MoveEffect::FixedDamage { amount: 20 },
    ]);
    add(MirrorCoat, "Mirror Coat", Psychic, Special, 0, Some(100), 20, -5, false, vec![
        MoveEffect::MirrorCoat,
    ]);

    // --- Status ---
    add(Growl, "Growl", Normal, Status, 0, Some(100), 40, 0, false, vec![
        MoveEffect::StatChange { stat: Stat::Attack, delta: -1, chance: 100, target: Opponent },
    ]);
    add(TailWhip, "Tail Whip", Normal, Status, 0, Some(100), 30, 0, false, vec![
        MoveEffect::StatChange { stat: Stat::Defense, delta: -1, chance: 100, target: Opponent },
    ]);
    add(StringShot, "String Shot", Bug, Status, 0, Some(95), 40, 0, false, vec![
        MoveEffect::StatChange { stat: Stat::Speed, delta: -1, chance: 100, target: Opponent },
    ]);
    add(SwordsDance, "Swords Dance", Normal, Status, 0, None, 20, 0, false, vec![
        MoveEffect::StatChange { stat: Stat::Attack, delta: 2, chance: 100, target: User },
    ]);
    add(Agility, "Agility", Psychic, Status, 0, None, 30, 0, false, vec![
        MoveEffect::StatChange { stat: Stat::Speed, delta: 2, chance: 100, target: User },
    ]);
    add(ThunderWave, "Thunder Wave", Electric, Status, 0, Some(90), 20, 0, false, vec![
        MoveEffect::Status { status: StatusKind::Paralysis, chance: 100, target: Opponent },
    ]);
    add(Toxic, "Toxic", Poison, Status, 0, Some(90), 10, 0, false, vec![
        MoveEffect::Status { status: StatusKind::BadlyPoison, chance: 100, target: Opponent },
    ]);
    add(WillOWisp, "Will-O-Wisp", Fire, Status, 0, Some(85), 15, 0, false, vec![
        MoveEffect::Status { status: StatusKind::Burn, chance: 100, target: Opponent },
    ]);
    add(Hypnosis, "Hypnosis", Psychic, Status, 0, Some(60), 20, 0, false, vec![
        MoveEffect::Status { status: StatusKind::Sleep, chance: 100, target: Opponent },
    ]);
    add(Recover, "Recover", Normal, Status, 0, None, 10, 0, false, vec![
        MoveEffect::Heal { percent_max_hp: 50 },
    ]);
    add(Protect, "Protect", Normal, Status, 0, None, 10, 4, false, vec![MoveEffect::Protect]);
    add(Reflect, "Reflect", Psychic, Status, 0, None, 20, 0, false, vec![
        MoveEffect::SetScreen { screen: Screen::Reflect },
    ]);
    add(LightScreen, "Light Screen", Psychic, Status, 0, None, 30, 0, false, vec![
        MoveEffect::SetScreen { screen: Screen::LightScreen },
    ]);
    add(AuroraVeil, "Aurora Veil", Ice, Status, 0, None, 20, 0, false, vec![
        MoveEffect::SetScreen { screen: Screen::AuroraVeil },
    ]);
    add(Tailwind, "Tailwind", Flying, Status, 0, None, 15, 0, false, vec![
        MoveEffect::SetSideFlag { flag: SideFlag::Tailwind },
    ]);
    add(Safeguard, "Safeguard", Normal, Status, 0, None, 25, 0, false, vec![
        MoveEffect::SetSideFlag { flag: SideFlag::Safeguard },
    ]);
    add(Mist, "Mist", Ice, Status, 0, None, 30, 0, false, vec![
        MoveEffect::SetSideFlag { flag: SideFlag::Mist },
    ]);
    add(Spikes, "Spikes", Ground, Status, 0, None, 20, 0, false, vec![
        MoveEffect::SetHazard { hazard: Hazard::Spikes },
    ]);
    add(ToxicSpikes, "Toxic Spikes", Poison, Status, 0, None, 20, 0, false, vec![
        MoveEffect::SetHazard { hazard: Hazard::ToxicSpikes },
    ]);
    add(StealthRock, "Stealth Rock", Rock, Status, 0, None, 20, 0, false, vec![
        MoveEffect::SetHazard { hazard: Hazard::StealthRock },
    ]);
    add(StickyWeb, "Sticky Web", Bug, Status, 0, None, 20, 0, false, vec![
        MoveEffect::SetHazard { hazard: Hazard::StickyWeb },
    ]);
    add(RainDance, "Rain Dance", Water, Status, 0, None, 5, 0, false, vec![
        MoveEffect::SetWeather { weather: Weather::Rain },
    ]);
    add(SunnyDay, "Sunny Day", Fire, Status, 0, None, 5, 0, false, vec![
        MoveEffect::SetWeather { weather: Weather::Sun },
    ]);
    add(Sandstorm, "Sandstorm", Rock, Status, 0, None, 10, 0, false, vec![
        MoveEffect::SetWeather { weather: Weather::Sandstorm },
    ]);
    add(Hail, "Hail", Ice, Status, 0, None, 10, 0, false, vec![
        MoveEffect::SetWeather { weather: Weather::Hail },
    ]);
    add(ElectricTerrain, "Electric Terrain", Electric, Status, 0, None, 10, 0, false, vec![
        MoveEffect::SetTerrain { terrain: Terrain::Electric },
    ]);
    add(GrassyTerrain, "Grassy Terrain", Grass, Status, 0, None, 10, 0, false, vec![
        MoveEffect::SetTerrain { terrain: Terrain::Grassy },
    ]);
    add(TrickRoom, "Trick Room", Psychic, Status, 0, None, 5, -7, false, vec![
        MoveEffect::SetRoom { room: Room::TrickRoom },
    ]);

    map
});

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_species_has_data() {
        for species in schema::Species::iter() {
            let data = get_species_data(species).expect("species missing from catalog");
            assert!(data.base_stats.hp > 0);
            assert!(!data.name.is_empty());
        }
    }

    #[test]
    fn test_every_move_has_data() {
        for move_id in MoveId::iter() {
            let data = get_move_data(move_id).expect("move missing from catalog");
            assert!(data.pp > 0, "{} has zero PP", data.name);
            if data.category == MoveCategory::Status {
                assert_eq!(data.power, 0, "{} is a status move with power", data.name);
            }
        }
    }

    #[test]
    fn test_damaging_classification() {
        assert!(get_move_data(MoveId::Tackle).unwrap().is_damaging());
        assert!(get_move_data(MoveId::DragonRage).unwrap().is_damaging());
        assert!(!get_move_data(MoveId::Growl).unwrap().is_damaging());
        assert!(get_move_data(MoveId::Protect).unwrap().is_protect_class());
    }
}
