//! Shared targeting for effects that act on units.
//!
//! Damage, heal, timed statuses and dispel all pick units out of the spell
//! target and differ only in which units they accept. They implement
//! [`UnitSelector::accepts`] and get filtering and legality checks for free.

use rustc_hash::FxHashSet;

use crate::battle::{BattleInfo, Unit};
use crate::spells::{Destination, EffectTarget, Mechanics, Problem, Target};

/// Capability: selecting units out of a target.
pub trait UnitSelector {
    /// Whether dead units can be selected.
    fn allow_dead(&self) -> bool {
        false
    }

    /// Kind-specific acceptance test, after validity and immunity.
    fn accepts(&self, m: &dyn Mechanics, unit: &Unit) -> bool;

    /// Full selection test.
    fn is_valid_unit(&self, m: &dyn Mechanics, unit: &Unit) -> bool {
        unit.is_valid_target(self.allow_dead()) && !m.is_immune(unit) && self.accepts(m, unit)
    }

    /// Selected units of `target`, each once, in target order.
    ///
    /// Destinations are rebuilt from current battle state, so a stale hex
    /// in the input is corrected.
    fn select_units(&self, m: &dyn Mechanics, target: &Target) -> EffectTarget {
        let battle = m.battle();
        let mut seen = FxHashSet::default();
        target
            .iter()
            .filter_map(|dest| dest.unit.and_then(|id| battle.unit(id)))
            .filter(|unit| self.is_valid_unit(m, unit) && seen.insert(unit.id))
            .map(Destination::unit)
            .collect()
    }

    /// Whether any unit on the field could be selected.
    fn has_candidates(&self, m: &dyn Mechanics) -> bool {
        m.battle().units().any(|unit| self.is_valid_unit(m, unit))
    }

    /// Coarse check: some unit on the field qualifies.
    fn check_candidates(&self, problem: &mut Problem, m: &dyn Mechanics) -> bool {
        if self.has_candidates(m) {
            true
        } else {
            problem.add("No appropriate target");
            false
        }
    }

    /// Precise check: at least one unit of `target` still qualifies.
    fn check_units(&self, problem: &mut Problem, m: &dyn Mechanics, target: &EffectTarget) -> bool {
        let battle = m.battle();
        let any = target
            .iter()
            .filter_map(|dest| dest.unit.and_then(|id| battle.unit(id)))
            .any(|unit| self.is_valid_unit(m, unit));
        if !any {
            problem.add("No valid target");
        }
        any
    }
}
