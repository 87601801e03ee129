use crate::battle::damage::{DamageContext, DamagePipeline, DamageStep};
use crate::battle::field::Field;
use crate::battle::tests::common::*;
use crate::catalog::get_move_data;
use crate::creature::StatusCondition;
use crate::errors::ActionError;
use crate::rng::{RandomSource, ScriptedRandom};
use pretty_assertions::assert_eq;
use schema::{Ability, Item, MoveId, Screen, Species, Weather};

/// Run the standard pipeline for one hit of `move_id`.
fn run_pipeline(field: &Field, move_id: MoveId, rng: &mut ScriptedRandom) -> DamageContext {
    let data = get_move_data(move_id).unwrap();
    let mut ctx = DamageContext::new(PLAYER, ENEMY, move_id, data);
    DamagePipeline::standard()
        .run(&mut ctx, field, rng)
        .unwrap();
    ctx
}

// Crit roll misses (1), random factor maxes out (15 -> x1.00).
fn flat_rolls() -> ScriptedRandom {
    ScriptedRandom::new(vec![1, 15])
}

#[test]
fn test_thunder_shock_against_water_type() {
    let field = singles_field(
        creature(Species::Pikachu, 50, vec![MoveId::ThunderShock]),
        creature(Species::Squirtle, 50, vec![MoveId::WaterGun]),
    );
    let ctx = run_pipeline(&field, MoveId::ThunderShock, &mut flat_rolls());

    assert_eq!(ctx.type_effectiveness, 2.0);
    assert!(ctx.is_stab);
    // Base 16 from the level-50 formula, then STAB 1.5 and matchup 2.0.
    assert_eq!(ctx.base_damage, 16);
    assert_eq!(ctx.final_damage(), 48);
}

#[test]
fn test_super_effective_beats_neutral_at_equal_stats() {
    let pikachu = creature(Species::Pikachu, 50, vec![MoveId::ThunderShock]);
    let squirtle = creature(Species::Squirtle, 50, vec![MoveId::WaterGun]);
    // A Normal-type defender with Squirtle's exact stat line, so only the
    // matchup differs.
    let mut snorlax = creature(Species::Snorlax, 50, vec![MoveId::Tackle]);
    snorlax.stats = squirtle.stats;

    let vs_water = run_pipeline(
        &singles_field(pikachu.clone(), squirtle),
        MoveId::ThunderShock,
        &mut flat_rolls(),
    );
    let vs_normal = run_pipeline(
        &singles_field(pikachu, snorlax),
        MoveId::ThunderShock,
        &mut flat_rolls(),
    );
    assert_eq!(vs_water.type_effectiveness, 2.0);
    assert_eq!(vs_normal.type_effectiveness, 1.0);
    assert!(vs_water.final_damage() > vs_normal.final_damage());
}

#[test]
fn test_forced_critical_and_fixed_random_draw_nothing() {
    let field = singles_field(
        creature(Species::Pikachu, 50, vec![MoveId::ThunderShock]),
        creature(Species::Squirtle, 50, vec![MoveId::WaterGun]),
    );
    let data = get_move_data(MoveId::ThunderShock).unwrap();

    // Both overrides pinned, so the pipeline consumes no rolls at all.
    let mut rng = ScriptedRandom::new(vec![]);
    let mut ctx = DamageContext::new(PLAYER, ENEMY, MoveId::ThunderShock, data)
        .with_forced_critical(true)
        .with_fixed_random(1.0);
    DamagePipeline::standard()
        .run(&mut ctx, &field, &mut rng)
        .unwrap();
    assert!(ctx.is_crit);
    // 16 base, crit 1.5, STAB 1.5, matchup 2.0.
    assert_eq!(ctx.final_damage(), 72);

    let mut ctx = DamageContext::new(PLAYER, ENEMY, MoveId::ThunderShock, data)
        .with_forced_critical(false)
        .with_fixed_random(0.85);
    DamagePipeline::standard()
        .run(&mut ctx, &field, &mut rng)
        .unwrap();
    assert!(!ctx.is_crit);
    assert_eq!(ctx.final_damage(), (48.0f64 * 0.85) as u16);
}

#[test]
fn test_random_factor_spread() {
    let field = singles_field(
        creature(Species::Pikachu, 50, vec![MoveId::ThunderShock]),
        creature(Species::Squirtle, 50, vec![MoveId::WaterGun]),
    );
    let min = run_pipeline(
        &field,
        MoveId::ThunderShock,
        &mut ScriptedRandom::new(vec![1, 0]),
    );
    let max = run_pipeline(&field, MoveId::ThunderShock, &mut flat_rolls());
    assert_eq!(min.final_damage(), (48.0f64 * 0.85) as u16);
    assert!(min.final_damage() < max.final_damage());
}

#[test]
fn test_ground_immunity_zeroes_damage() {
    let field = singles_field(
        creature(Species::Pikachu, 50, vec![MoveId::ThunderShock]),
        creature(Species::Geodude, 50, vec![MoveId::Tackle]),
    );
    let ctx = run_pipeline(&field, MoveId::ThunderShock, &mut flat_rolls());
    assert_eq!(ctx.type_effectiveness, 0.0);
    assert_eq!(ctx.final_damage(), 0);
}

#[test]
fn test_levitate_blanks_ground_moves() {
    let field = singles_field(
        creature(Species::Machamp, 50, vec![MoveId::Earthquake]),
        creature(Species::Alakazam, 50, vec![MoveId::Psybeam]).with_ability(Ability::Levitate),
    );
    let ctx = run_pipeline(&field, MoveId::Earthquake, &mut flat_rolls());
    assert_eq!(ctx.final_damage(), 0);
}

#[test]
fn test_minimum_damage_is_one() {
    // Chansey's 5 base Attack against Geodude's heavy Defense.
    let field = singles_field(
        creature(Species::Chansey, 5, vec![MoveId::Tackle]),
        creature(Species::Geodude, 50, vec![MoveId::Tackle]),
    );
    let ctx = run_pipeline(&field, MoveId::Tackle, &mut ScriptedRandom::new(vec![1, 0]));
    assert!(ctx.type_effectiveness > 0.0);
    assert_eq!(ctx.final_damage(), 1);
}

#[test]
fn test_critical_hits_bypass_screens() {
    let mut field = singles_field(
        creature(Species::Pikachu, 50, vec![MoveId::ThunderShock]),
        creature(Species::Squirtle, 50, vec![MoveId::WaterGun]),
    );
    field
        .side_mut(ENEMY.side)
        .set_screen(Screen::LightScreen);

    let screened = run_pipeline(&field, MoveId::ThunderShock, &mut flat_rolls());
    assert_eq!(screened.final_damage(), 24);

    let crit = run_pipeline(
        &field,
        MoveId::ThunderShock,
        &mut ScriptedRandom::new(vec![0, 15]),
    );
    assert!(crit.is_crit);
    assert_eq!(crit.final_damage(), 72);
}

#[test]
fn test_weather_swings_fire_damage() {
    let mut field = singles_field(
        creature(Species::Charmander, 50, vec![MoveId::Ember]),
        creature(Species::Bulbasaur, 50, vec![MoveId::RazorLeaf]),
    );
    let neutral = run_pipeline(&field, MoveId::Ember, &mut flat_rolls()).final_damage();

    field.set_weather(Weather::Sun, 5);
    let sunny = run_pipeline(&field, MoveId::Ember, &mut flat_rolls()).final_damage();

    field.set_weather(Weather::Rain, 5);
    let rainy = run_pipeline(&field, MoveId::Ember, &mut flat_rolls()).final_damage();

    assert!(sunny > neutral);
    assert!(rainy < neutral);
    assert_eq!(sunny, (neutral as f64 * 1.5) as u16);
}

#[test]
fn test_burn_halves_physical_unless_guts() {
    let mut field = singles_field(
        creature(Species::Machamp, 50, vec![MoveId::Tackle]),
        creature(Species::Snorlax, 50, vec![MoveId::Tackle]),
    );
    let healthy = run_pipeline(&field, MoveId::Tackle, &mut flat_rolls()).final_damage();

    field.creature_at_mut(PLAYER).unwrap().status = Some(StatusCondition::Burn);
    let burned = run_pipeline(&field, MoveId::Tackle, &mut flat_rolls()).final_damage();
    assert_eq!(burned, healthy / 2);

    field.creature_at_mut(PLAYER).unwrap().ability = Some(Ability::Guts);
    let guts = run_pipeline(&field, MoveId::Tackle, &mut flat_rolls()).final_damage();
    // Guts skips the burn halving and boosts Attack on top.
    assert!(guts > healthy);
}

#[test]
fn test_life_orb_multiplier() {
    let mut field = singles_field(
        creature(Species::Pikachu, 50, vec![MoveId::ThunderShock]),
        creature(Species::Squirtle, 50, vec![MoveId::WaterGun]),
    );
    field.creature_at_mut(PLAYER).unwrap().held_item = Some(Item::LifeOrb);
    let ctx = run_pipeline(&field, MoveId::ThunderShock, &mut flat_rolls());
    assert_eq!(ctx.final_damage(), (48.0f64 * 1.3) as u16);
}

#[test]
fn test_pinch_ability_kicks_in_below_a_third() {
    let mut field = singles_field(
        creature(Species::Charmander, 50, vec![MoveId::Ember]).with_ability(Ability::Blaze),
        creature(Species::Bulbasaur, 50, vec![MoveId::RazorLeaf]),
    );
    let healthy = run_pipeline(&field, MoveId::Ember, &mut flat_rolls()).final_damage();

    let attacker = field.creature_at_mut(PLAYER).unwrap();
    let drop = attacker.max_hp - attacker.max_hp / 4;
    attacker.take_damage(drop);
    let pinch = run_pipeline(&field, MoveId::Ember, &mut flat_rolls()).final_damage();
    assert_eq!(pinch, (healthy as f64 * 1.5) as u16);
}

#[test]
fn test_standard_step_order() {
    // Attacker-side modifiers run before the field modifiers and the
    // matchup; the matchup precedes only the burn penalty.
    assert_eq!(
        DamagePipeline::standard().step_names(),
        vec![
            "critical",
            "base_damage",
            "random_factor",
            "stab",
            "ability",
            "item",
            "weather",
            "terrain",
            "screens",
            "type_effectiveness",
            "burn",
        ]
    );
}

#[test]
fn test_pipeline_extension_points() {
    struct Doubler;
    impl DamageStep for Doubler {
        fn name(&self) -> &'static str {
            "doubler"
        }
        fn apply(
            &self,
            ctx: &mut DamageContext,
            _field: &Field,
            _rng: &mut dyn RandomSource,
        ) -> Result<(), ActionError> {
            ctx.multiplier *= 2.0;
            Ok(())
        }
    }

    let mut pipeline = DamagePipeline::standard();
    assert_eq!(pipeline.step_names().first(), Some(&"critical"));
    assert!(pipeline.insert_after("stab", Box::new(Doubler)));
    assert!(!pipeline.insert_after("missing", Box::new(Doubler)));
    assert!(pipeline.remove("random_factor"));
    assert!(pipeline.replace("item", Box::new(Doubler)));

    let field = singles_field(
        creature(Species::Pikachu, 50, vec![MoveId::ThunderShock]),
        creature(Species::Squirtle, 50, vec![MoveId::WaterGun]),
    );
    let data = get_move_data(MoveId::ThunderShock).unwrap();
    let mut ctx = DamageContext::new(PLAYER, ENEMY, MoveId::ThunderShock, data);
    // Only the crit roll draws now that the random factor is gone.
    let mut rng = ScriptedRandom::new(vec![1]);
    pipeline.run(&mut ctx, &field, &mut rng).unwrap();
    // 16 base, STAB 1.5, matchup 2.0, two doublers.
    assert_eq!(ctx.final_damage(), 192);
}
