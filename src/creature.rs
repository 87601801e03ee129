use crate::catalog::{get_move_data, get_species_data};
use crate::errors::CatalogError;
use schema::{Ability, ElementType, Item, MoveId, Species, StatusKind};
use serde::{Deserialize, Serialize};

/// Non-volatile status condition with its bookkeeping. At most one at a
/// time; volatile conditions (flinch, protect) live on the slot instead.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCondition {
    Burn,
    Poison,
    /// `counter` starts at 1 and grows by one each end-of-turn tick.
    BadlyPoisoned { counter: u8 },
    Paralysis,
    Sleep { turns_remaining: u8 },
    Freeze,
}

impl StatusCondition {
    pub fn kind(&self) -> StatusKind {
        match self {
            StatusCondition::Burn => StatusKind::Burn,
            StatusCondition::Poison => StatusKind::Poison,
            StatusCondition::BadlyPoisoned { .. } => StatusKind::BadlyPoison,
            StatusCondition::Paralysis => StatusKind::Paralysis,
            StatusCondition::Sleep { .. } => StatusKind::Sleep,
            StatusCondition::Freeze => StatusKind::Freeze,
        }
    }

    /// Build the stored condition for a freshly inflicted status kind.
    /// Sleep duration is rolled by the caller so this stays deterministic.
    pub fn from_kind(kind: StatusKind, sleep_turns: u8) -> Self {
        match kind {
            StatusKind::Burn => StatusCondition::Burn,
            StatusKind::Poison => StatusCondition::Poison,
            StatusKind::BadlyPoison => StatusCondition::BadlyPoisoned { counter: 1 },
            StatusKind::Paralysis => StatusCondition::Paralysis,
            StatusKind::Sleep => StatusCondition::Sleep {
                turns_remaining: sleep_turns,
            },
            StatusKind::Freeze => StatusCondition::Freeze,
        }
    }
}

/// A known move and its remaining PP.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveInstance {
    pub move_id: MoveId,
    pub pp: u8,
}

impl MoveInstance {
    pub fn new(move_id: MoveId) -> Result<Self, CatalogError> {
        let data = get_move_data(move_id)?;
        Ok(Self {
            move_id,
            pp: data.pp,
        })
    }

    /// Spend one PP. Returns false when the move has none left.
    pub fn use_move(&mut self) -> bool {
        if self.pp == 0 {
            return false;
        }
        self.pp -= 1;
        true
    }
}

/// Computed flat stats for a combatant at its level. HP lives on the
/// instance itself as max/current.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputedStats {
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

/// A concrete combatant: a species at a level, with rolled stats, a
/// moveset, and battle-relevant carried state.
///
/// `current_hp` is private so every HP change funnels through
/// `take_damage`/`heal`, which clamp to `[0, max_hp]`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreatureInst {
    pub name: String,
    pub species: Species,
    pub level: u8,
    pub max_hp: u16,
    current_hp: u16,
    pub stats: ComputedStats,
    pub moves: [Option<MoveInstance>; 4],
    pub ability: Option<Ability>,
    pub held_item: Option<Item>,
    pub status: Option<StatusCondition>,
}

impl CreatureInst {
    /// Create an instance from catalog data at the given level, knowing the
    /// given moves (up to four; extras are dropped).
    pub fn new(species: Species, level: u8, moves: Vec<MoveId>) -> Result<Self, CatalogError> {
        let data = get_species_data(species)?;

        let max_hp = Self::hp_stat(data.base_stats.hp, level);
        let stats = ComputedStats {
            attack: Self::flat_stat(data.base_stats.attack, level),
            defense: Self::flat_stat(data.base_stats.defense, level),
            sp_attack: Self::flat_stat(data.base_stats.sp_attack, level),
            sp_defense: Self::flat_stat(data.base_stats.sp_defense, level),
            speed: Self::flat_stat(data.base_stats.speed, level),
        };

        let mut move_array = [const { None }; 4];
        for (i, move_id) in moves.into_iter().take(4).enumerate() {
            move_array[i] = Some(MoveInstance::new(move_id)?);
        }

        Ok(Self {
            name: data.name.to_string(),
            species,
            level,
            max_hp,
            current_hp: max_hp,
            stats,
            moves: move_array,
            ability: None,
            held_item: None,
            status: None,
        })
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.ability = Some(ability);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.held_item = Some(item);
        self
    }

    // HP = (2 * Base * Level) / 100 + Level + 10
    fn hp_stat(base: u16, level: u8) -> u16 {
        (2 * base * level as u16) / 100 + level as u16 + 10
    }

    // Stat = (2 * Base * Level) / 100 + 5
    fn flat_stat(base: u16, level: u8) -> u16 {
        (2 * base * level as u16) / 100 + 5
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Apply damage, clamped at zero. Returns true if this reduced HP to
    /// zero (the caller is responsible for queueing the faint).
    pub fn take_damage(&mut self, amount: u16) -> bool {
        self.current_hp = self.current_hp.saturating_sub(amount);
        self.current_hp == 0
    }

    /// Restore HP, clamped at max. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let before = self.current_hp;
        self.current_hp = self.current_hp.saturating_add(amount).min(self.max_hp);
        self.current_hp - before
    }

    /// The instance's element types, from species data.
    pub fn types(&self) -> Result<Vec<ElementType>, CatalogError> {
        Ok(get_species_data(self.species)?.types())
    }

    pub fn has_ability(&self, ability: Ability) -> bool {
        self.ability == Some(ability)
    }

    pub fn has_item(&self, item: Item) -> bool {
        self.held_item == Some(item)
    }

    pub fn has_status(&self, kind: StatusKind) -> bool {
        self.status.map(|s| s.kind() == kind) == Some(true)
    }
}
