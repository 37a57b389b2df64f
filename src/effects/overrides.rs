//! Per-spell exceptions to the default prepare rule.
//!
//! By default `EffectBundle::prepare` applies every automatic effect. A
//! handful of spells need a specific effect gated on something else. Those
//! cases live here as data, keyed by `(spell, effect name)`, so adding one
//! never touches the prepare loop.
//!
//! The standard table holds one rule: when Resurrection is cast, its
//! `"cure"` effect only runs for creature-activated casts.

use rustc_hash::FxHashMap;

use crate::core::{Mode, SpellId};
use crate::spells::Mechanics;

/// Decides whether an overridden effect is included in a cast.
pub type InclusionRule = fn(&dyn Mechanics) -> bool;

/// Table of `(spell, effect name) → inclusion rule`.
#[derive(Clone, Debug)]
pub struct PrepareOverrides {
    rules: FxHashMap<SpellId, FxHashMap<String, InclusionRule>>,
}

/// Included only when a creature, not a player, triggered the cast.
pub fn creature_triggered(m: &dyn Mechanics) -> bool {
    m.mode() == Mode::CreatureActive
}

impl PrepareOverrides {
    /// A table with no overrides.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rules: FxHashMap::default(),
        }
    }

    /// The standard table.
    #[must_use]
    pub fn standard() -> Self {
        let mut table = Self::empty();
        table.insert(SpellId::RESURRECTION, "cure", creature_triggered);
        table
    }

    /// Add or replace a rule.
    pub fn insert(&mut self, spell: SpellId, effect: impl Into<String>, rule: InclusionRule) {
        self.rules.entry(spell).or_default().insert(effect.into(), rule);
    }

    /// Add a rule (builder pattern).
    #[must_use]
    pub fn with(mut self, spell: SpellId, effect: impl Into<String>, rule: InclusionRule) -> Self {
        self.insert(spell, effect, rule);
        self
    }

    /// The rule for an effect of a spell, if one exists.
    #[must_use]
    pub fn rule(&self, spell: SpellId, effect: &str) -> Option<InclusionRule> {
        self.rules.get(&spell).and_then(|by_name| by_name.get(effect)).copied()
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.values().map(|by_name| by_name.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PrepareOverrides {
    fn default() -> Self {
        Self::standard()
    }
}
