use crate::battle::field::{Field, SideId, SlotRef};
use std::fmt;

/// A broken structural invariant found by `validate_field`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A slot binds a party index that does not exist.
    DanglingBinding { slot: SlotRef, party_index: usize },
    /// Two slots on one side bind the same party member.
    DuplicateBinding { side: SideId, party_index: usize },
    /// A fainted combatant is still bound while reserves remain.
    FaintedBound { slot: SlotRef },
    /// A stat stage is outside [-6, 6].
    StageOutOfRange { slot: SlotRef, stage: i8 },
    /// A hazard holds more layers than its cap allows.
    HazardOverCap { side: SideId, layers: u8 },
    /// A side has an empty party.
    EmptyParty { side: SideId },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::DanglingBinding { slot, party_index } => {
                write!(f, "{} binds missing party index {}", slot, party_index)
            }
            Violation::DuplicateBinding { side, party_index } => {
                write!(f, "{} side binds party index {} twice", side, party_index)
            }
            Violation::FaintedBound { slot } => {
                write!(f, "{} still binds a fainted combatant", slot)
            }
            Violation::StageOutOfRange { slot, stage } => {
                write!(f, "{} carries out-of-range stage {}", slot, stage)
            }
            Violation::HazardOverCap { side, layers } => {
                write!(f, "{} side has {} hazard layers over the cap", side, layers)
            }
            Violation::EmptyParty { side } => write!(f, "{} side has no party", side),
        }
    }
}

/// Check the structural invariants the engine relies on. Returns every
/// violation found rather than stopping at the first, so a host can log
/// the full picture.
pub fn validate_field(field: &Field) -> Vec<Violation> {
    let mut violations = Vec::new();

    for side_id in SideId::both() {
        let side = field.side(side_id);
        if side.party.is_empty() {
            violations.push(Violation::EmptyParty { side: side_id });
        }

        let mut seen = Vec::new();
        for (slot_index, slot) in side.slots.iter().enumerate() {
            let slot_ref = SlotRef::new(side_id, slot_index);

            if let Some(party_index) = slot.bound {
                match side.party.get(party_index) {
                    None => violations.push(Violation::DanglingBinding {
                        slot: slot_ref,
                        party_index,
                    }),
                    Some(creature) => {
                        if seen.contains(&party_index) {
                            violations.push(Violation::DuplicateBinding {
                                side: side_id,
                                party_index,
                            });
                        }
                        seen.push(party_index);
                        if creature.is_fainted() && side.first_healthy_reserve().is_some() {
                            violations.push(Violation::FaintedBound { slot: slot_ref });
                        }
                    }
                }
            }

            for (_, &stage) in &slot.stat_stages {
                if !(-6..=6).contains(&stage) {
                    violations.push(Violation::StageOutOfRange {
                        slot: slot_ref,
                        stage,
                    });
                }
            }
        }

        for (&hazard, &layers) in &side.hazards {
            if layers > hazard.max_layers() {
                violations.push(Violation::HazardOverCap {
                    side: side_id,
                    layers,
                });
            }
        }
    }

    violations
}
