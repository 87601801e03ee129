use crate::battle::damage::{DamageContext, DamageStep};
use crate::battle::field::Field;
use crate::battle::stats::{effective_attack, effective_defense};
use crate::errors::ActionError;
use crate::rng::RandomSource;
use schema::{Ability, ElementType, Item, MoveCategory, Screen, StatusKind, Terrain, Weather};

/// Critical hit roll: 1 in 16, dealing 1.5x. The flag is set before the
/// base formula runs because a crit also changes which stat stages count.
pub struct CriticalStep;

impl DamageStep for CriticalStep {
    fn name(&self) -> &'static str {
        "critical"
    }

    fn apply(
        &self,
        ctx: &mut DamageContext,
        _field: &Field,
        rng: &mut dyn RandomSource,
    ) -> Result<(), ActionError> {
        if ctx.power == 0 {
            return Ok(());
        }
        let crit = match ctx.force_critical {
            Some(forced) => forced,
            None => rng.next_bounded(16) == 0,
        };
        if crit {
            ctx.is_crit = true;
            ctx.multiplier *= 1.5;
        }
        Ok(())
    }
}

/// The core level/power/attack/defense formula:
/// `floor(floor(floor(2 * Level / 5 + 2) * Power * Atk / Def) / 50) + 2`
pub struct BaseDamageStep;

impl DamageStep for BaseDamageStep {
    fn name(&self) -> &'static str {
        "base_damage"
    }

    fn apply(
        &self,
        ctx: &mut DamageContext,
        field: &Field,
        _rng: &mut dyn RandomSource,
    ) -> Result<(), ActionError> {
        if ctx.power == 0 {
            return Ok(());
        }
        let level = field.creature_at(ctx.attacker)?.level as u32;
        let attack = effective_attack(field, ctx.attacker, ctx.category, ctx.is_crit)? as u32;
        let defense =
            effective_defense(field, ctx.defender, ctx.category, ctx.is_crit)?.max(1) as u32;

        let level_factor = 2 * level / 5 + 2;
        ctx.base_damage = (level_factor * ctx.power as u32 * attack / defense) / 50 + 2;
        Ok(())
    }
}

/// Uniform spread over [0.85, 1.00] in whole percent steps.
pub struct RandomFactorStep;

impl DamageStep for RandomFactorStep {
    fn name(&self) -> &'static str {
        "random_factor"
    }

    fn apply(
        &self,
        ctx: &mut DamageContext,
        _field: &Field,
        rng: &mut dyn RandomSource,
    ) -> Result<(), ActionError> {
        if ctx.power == 0 {
            return Ok(());
        }
        let factor = match ctx.fixed_random {
            Some(fixed) => fixed.clamp(0.85, 1.0),
            None => (85 + rng.next_bounded(16)) as f64 / 100.0,
        };
        ctx.multiplier *= factor;
        Ok(())
    }
}

/// Same-type attack bonus: 1.5x when the move's element matches one of
/// the attacker's types.
pub struct StabStep;

impl DamageStep for StabStep {
    fn name(&self) -> &'static str {
        "stab"
    }

    fn apply(
        &self,
        ctx: &mut DamageContext,
        field: &Field,
        _rng: &mut dyn RandomSource,
    ) -> Result<(), ActionError> {
        if ctx.power == 0 {
            return Ok(());
        }
        let attacker = field.creature_at(ctx.attacker)?;
        if attacker
            .types()
            .map_err(ActionError::from)?
            .contains(&ctx.element)
        {
            ctx.is_stab = true;
            ctx.multiplier *= 1.5;
        }
        Ok(())
    }
}

/// Type chart matchup against the defender's types, including ability
/// immunities (Levitate blanks Ground moves).
pub struct TypeEffectivenessStep;

impl DamageStep for TypeEffectivenessStep {
    fn name(&self) -> &'static str {
        "type_effectiveness"
    }

    fn apply(
        &self,
        ctx: &mut DamageContext,
        field: &Field,
        _rng: &mut dyn RandomSource,
    ) -> Result<(), ActionError> {
        if ctx.power == 0 {
            return Ok(());
        }
        let defender = field.creature_at(ctx.defender)?;
        if ctx.element == ElementType::Ground && defender.has_ability(Ability::Levitate) {
            ctx.type_effectiveness = 0.0;
            return Ok(());
        }
        let types = defender.types().map_err(ActionError::from)?;
        ctx.type_effectiveness = ElementType::effectiveness_against(ctx.element, &types);
        ctx.multiplier *= ctx.type_effectiveness;
        Ok(())
    }
}

/// Sun boosts Fire and dampens Water; Rain does the reverse. Sandstorm
/// and Hail only deal chip damage and leave move damage alone.
pub struct WeatherStep;

impl DamageStep for WeatherStep {
    fn name(&self) -> &'static str {
        "weather"
    }

    fn apply(
        &self,
        ctx: &mut DamageContext,
        field: &Field,
        _rng: &mut dyn RandomSource,
    ) -> Result<(), ActionError> {
        if ctx.power == 0 {
            return Ok(());
        }
        match (field.weather_kind(), ctx.element) {
            (Some(Weather::Sun), ElementType::Fire) => ctx.multiplier *= 1.5,
            (Some(Weather::Sun), ElementType::Water) => ctx.multiplier *= 0.5,
            (Some(Weather::Rain), ElementType::Water) => ctx.multiplier *= 1.5,
            (Some(Weather::Rain), ElementType::Fire) => ctx.multiplier *= 0.5,
            _ => {}
        }
        Ok(())
    }
}

/// Terrain boosts its matching element for grounded attackers by 1.3x;
/// Misty Terrain halves Dragon damage into grounded defenders.
pub struct TerrainStep;

impl DamageStep for TerrainStep {
    fn name(&self) -> &'static str {
        "terrain"
    }

    fn apply(
        &self,
        ctx: &mut DamageContext,
        field: &Field,
        _rng: &mut dyn RandomSource,
    ) -> Result<(), ActionError> {
        if ctx.power == 0 {
            return Ok(());
        }
        let Some(terrain) = field.terrain_kind() else {
            return Ok(());
        };
        match (terrain, ctx.element) {
            (Terrain::Electric, ElementType::Electric)
            | (Terrain::Grassy, ElementType::Grass)
            | (Terrain::Psychic, ElementType::Psychic) => {
                if field.is_grounded(ctx.attacker)? {
                    ctx.multiplier *= 1.3;
                }
            }
            (Terrain::Misty, ElementType::Dragon) => {
                if field.is_grounded(ctx.defender)? {
                    ctx.multiplier *= 0.5;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Reflect, Light Screen, and Aurora Veil on the defending side. Halves
/// in singles, two-thirds in multi-slot formats. Critical hits punch
/// straight through.
pub struct ScreenStep;

impl DamageStep for ScreenStep {
    fn name(&self) -> &'static str {
        "screens"
    }

    fn apply(
        &self,
        ctx: &mut DamageContext,
        field: &Field,
        _rng: &mut dyn RandomSource,
    ) -> Result<(), ActionError> {
        if ctx.power == 0 || ctx.is_crit {
            return Ok(());
        }
        let side = field.side(ctx.defender.side);
        let screened = match ctx.category {
            MoveCategory::Physical => {
                side.has_screen(Screen::Reflect) || side.has_screen(Screen::AuroraVeil)
            }
            MoveCategory::Special => {
                side.has_screen(Screen::LightScreen) || side.has_screen(Screen::AuroraVeil)
            }
            MoveCategory::Status => false,
        };
        if screened {
            ctx.multiplier *= if side.slots.len() > 1 { 2.0 / 3.0 } else { 0.5 };
        }
        Ok(())
    }
}

/// Burn halves physical damage unless the attacker has Guts.
pub struct BurnStep;

impl DamageStep for BurnStep {
    fn name(&self) -> &'static str {
        "burn"
    }

    fn apply(
        &self,
        ctx: &mut DamageContext,
        field: &Field,
        _rng: &mut dyn RandomSource,
    ) -> Result<(), ActionError> {
        if ctx.power == 0 || ctx.category != MoveCategory::Physical {
            return Ok(());
        }
        let attacker = field.creature_at(ctx.attacker)?;
        if attacker.has_status(StatusKind::Burn) && !attacker.has_ability(Ability::Guts) {
            ctx.multiplier *= 0.5;
        }
        Ok(())
    }
}

/// Pinch abilities: Blaze, Torrent, and Overgrow boost their element by
/// 1.5x while the attacker is at or below a third of max HP.
pub struct PinchAbilityStep;

impl DamageStep for PinchAbilityStep {
    fn name(&self) -> &'static str {
        "ability"
    }

    fn apply(
        &self,
        ctx: &mut DamageContext,
        field: &Field,
        _rng: &mut dyn RandomSource,
    ) -> Result<(), ActionError> {
        if ctx.power == 0 {
            return Ok(());
        }
        let attacker = field.creature_at(ctx.attacker)?;
        let boosted_element = match attacker.ability {
            Some(Ability::Blaze) => ElementType::Fire,
            Some(Ability::Torrent) => ElementType::Water,
            Some(Ability::Overgrow) => ElementType::Grass,
            _ => return Ok(()),
        };
        if ctx.element == boosted_element && attacker.current_hp() * 3 <= attacker.max_hp {
            ctx.multiplier *= 1.5;
        }
        Ok(())
    }
}

/// Held-item damage modifiers. Life Orb boosts all move damage by 1.3x;
/// its recoil is queued by the move executor, not here.
pub struct ItemStep;

impl DamageStep for ItemStep {
    fn name(&self) -> &'static str {
        "item"
    }

    fn apply(
        &self,
        ctx: &mut DamageContext,
        field: &Field,
        _rng: &mut dyn RandomSource,
    ) -> Result<(), ActionError> {
        if ctx.power == 0 {
            return Ok(());
        }
        if field.creature_at(ctx.attacker)?.has_item(Item::LifeOrb) {
            ctx.multiplier *= 1.3;
        }
        Ok(())
    }
}
