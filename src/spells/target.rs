//! Aim points and effect targets.
//!
//! A `Target` is an ordered list of destinations. The same type serves as
//! the aim point the caster picked, the spell target derived from it, and
//! each effect's transformed target.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::battle::{BattleInfo, Unit};
use crate::core::{BattleHex, UnitId};

/// One aimed-at location, optionally naming the unit standing there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Destination {
    pub unit: Option<UnitId>,
    pub hex: BattleHex,
}

impl Destination {
    /// Destination pointing at a unit on its current hex.
    #[must_use]
    pub fn unit(unit: &Unit) -> Self {
        Self {
            unit: Some(unit.id),
            hex: unit.position,
        }
    }

    /// Destination pointing at a bare hex.
    #[must_use]
    pub const fn hex(hex: BattleHex) -> Self {
        Self { unit: None, hex }
    }
}

/// Ordered list of destinations.
pub type Target = SmallVec<[Destination; 4]>;

/// Target as seen by a single effect.
pub type EffectTarget = Target;

/// Resolve the units named by a target, skipping bare hexes and unknown ids.
pub fn target_units<'a>(
    battle: &'a dyn BattleInfo,
    target: &'a Target,
) -> impl Iterator<Item = &'a Unit> + 'a {
    target
        .iter()
        .filter_map(move |dest| dest.unit.and_then(|id| battle.unit(id)))
}
