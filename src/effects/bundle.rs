//! Per-spell-level effect bundles.
//!
//! An `EffectBundle` owns every configured effect of one spell, grouped by
//! spell level and keyed by effect name. It decides, for a whole level:
//!
//! - whether a cast is legal (`applicable`, `applicable_at`)
//! - which effects run and on what (`prepare`)
//! - how the level is built from configuration (`load_json`)
//!
//! ## Ordering
//!
//! Within a level, effects are visited in lexicographic order of their
//! names. This order decides the sequence of emitted battle commands and is
//! therefore part of the networked contract.
//!
//! ## Lifecycle
//!
//! A bundle is built through `&mut self` (`add`, `load_json`) and afterwards
//! shared read-only, typically behind an `Arc`. Every query takes `&self`
//! and leaves the bundle untouched.
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use spell_engine::battle::{BattleState, Unit};
//! use spell_engine::core::{BattleHex, BattleSide, CreatureId, SpellId, SpellLevel, UnitId};
//! use spell_engine::effects::{Effect, EffectBundle, EffectRegistry};
//! use spell_engine::spells::{CastMechanics, Destination, Problem, Target};
//!
//! let registry = EffectRegistry::with_builtin_effects();
//! let mut bundle = EffectBundle::new();
//! bundle
//!     .load_json(&registry, SpellLevel::BASIC, &json!({ "bolt": { "type": "damage" } }))
//!     .unwrap();
//!
//! let mut state = BattleState::new();
//! let hex = BattleHex::from_xy(8, 5).unwrap();
//! state.add_unit(Unit::new(UnitId(1), CreatureId(3), BattleSide::Defender, hex, 10, 10));
//!
//! let m = CastMechanics::new(&state, SpellId::MAGIC_ARROW, SpellLevel::BASIC).with_effect_value(25);
//! let aim: Target = [Destination { unit: Some(UnitId(1)), hex }].into_iter().collect();
//!
//! let mut problem = Problem::new();
//! assert!(bundle.applicable_at(&mut problem, &m, &aim, &aim));
//!
//! let to_apply = bundle.prepare(&m, &aim, &aim);
//! assert_eq!(to_apply.len(), 1);
//! assert_eq!(to_apply[0].0.name(), "bolt");
//! ```

use std::collections::BTreeMap;
use std::ops::ControlFlow;

use serde_json::{Map, Value};
use tracing::warn;

use crate::core::{AimType, ConfigError, SpellLevel};
use crate::spells::{EffectTarget, Mechanics, Problem, Target};

use super::effect::{Applicability, Effect, TargetTransform};
use super::overrides::PrepareOverrides;
use super::registry::EffectRegistry;

/// Effects selected for one cast, each paired with its own target.
pub type EffectsToApply<'a> = Vec<(&'a dyn Effect, EffectTarget)>;

/// Outcome of loading one level's configuration.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Entries turned into effects.
    pub loaded: usize,
    /// Entries dropped, with the reason for each.
    pub skipped: Vec<ConfigError>,
}

impl LoadReport {
    /// Whether every entry loaded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Treat any skipped entry as a hard failure.
    ///
    /// Returns the number of loaded entries, or the first skip reason.
    pub fn into_strict(self) -> Result<usize, ConfigError> {
        match self.skipped.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.loaded),
        }
    }
}

/// All effects of one spell, per level.
#[derive(Debug)]
pub struct EffectBundle {
    levels: [BTreeMap<String, Box<dyn Effect>>; SpellLevel::COUNT],
    overrides: PrepareOverrides,
}

impl Default for EffectBundle {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply the bundle-wide legality rule to the automatic effects.
///
/// Stops at the first mandatory failure. Passes when no mandatory effect
/// failed and at least one effect succeeded.
fn all_required_and_any<'e>(
    effects: impl Iterator<Item = &'e dyn Effect>,
    mut check: impl FnMut(&'e dyn Effect) -> bool,
) -> bool {
    let outcome = effects
        .filter(|effect| effect.core().automatic)
        .try_fold(false, |any_passed, effect| {
            if check(effect) {
                ControlFlow::Continue(true)
            } else if effect.core().optional {
                ControlFlow::Continue(any_passed)
            } else {
                ControlFlow::Break(())
            }
        });

    matches!(outcome, ControlFlow::Continue(true))
}

impl EffectBundle {
    /// Create an empty bundle with the standard prepare overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::with_overrides(PrepareOverrides::standard())
    }

    /// Create an empty bundle with a custom override table.
    #[must_use]
    pub fn with_overrides(overrides: PrepareOverrides) -> Self {
        Self {
            levels: Default::default(),
            overrides,
        }
    }

    /// Name an effect and store it under `level`.
    ///
    /// An existing effect of the same name is replaced (last write wins)
    /// and returned.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        mut effect: Box<dyn Effect>,
        level: SpellLevel,
    ) -> Option<Box<dyn Effect>> {
        let name = name.into();
        effect.core_mut().name = name.clone();
        self.levels[level.index()].insert(name, effect)
    }

    /// Look up an effect by name, automatic or not.
    #[must_use]
    pub fn get(&self, level: SpellLevel, name: &str) -> Option<&dyn Effect> {
        self.levels[level.index()].get(name).map(|effect| &**effect)
    }

    /// Effects of `level` in evaluation order.
    pub fn effects(&self, level: SpellLevel) -> impl Iterator<Item = &dyn Effect> + '_ {
        self.levels[level.index()].values().map(|effect| &**effect)
    }

    /// Number of effects at `level`.
    #[must_use]
    pub fn len(&self, level: SpellLevel) -> usize {
        self.levels[level.index()].len()
    }

    #[must_use]
    pub fn is_empty(&self, level: SpellLevel) -> bool {
        self.levels[level.index()].is_empty()
    }

    #[must_use]
    pub fn overrides(&self) -> &PrepareOverrides {
        &self.overrides
    }

    /// Aim-point-independent legality of a cast.
    ///
    /// Only automatic effects count. The first failing mandatory effect
    /// rejects the cast and stops evaluation. Otherwise at least one
    /// automatic effect must pass.
    pub fn applicable(&self, problem: &mut Problem, m: &dyn Mechanics) -> bool {
        all_required_and_any(self.effects(m.effect_level()), |effect| {
            effect.applicable(problem, m)
        })
    }

    /// Legality of a cast at a concrete aim point.
    ///
    /// Same rule as `applicable`, with each effect checked against its own
    /// transformed target.
    pub fn applicable_at(
        &self,
        problem: &mut Problem,
        m: &dyn Mechanics,
        aim_point: &Target,
        spell_target: &Target,
    ) -> bool {
        all_required_and_any(self.effects(m.effect_level()), |effect| {
            let target = effect.transform_target(m, aim_point, spell_target);
            effect.applicable_to(problem, m, aim_point, &target)
        })
    }

    /// Effects to apply for a cast, in order, each with its target.
    ///
    /// Every automatic effect is included unless the override table has a
    /// rule for `(spell, effect name)`, in which case the rule decides.
    pub fn prepare(
        &self,
        m: &dyn Mechanics,
        aim_point: &Target,
        spell_target: &Target,
    ) -> EffectsToApply<'_> {
        self.effects(m.effect_level())
            .filter(|effect| self.included(*effect, m))
            .map(|effect| (effect, effect.transform_target(m, aim_point, spell_target)))
            .collect()
    }

    fn included(&self, effect: &dyn Effect, m: &dyn Mechanics) -> bool {
        match self.overrides.rule(m.spell_id(), effect.name()) {
            Some(rule) => rule(m),
            None => effect.core().automatic,
        }
    }

    /// Aim types the spell accepts at `level`, starting from `base`.
    #[must_use]
    pub fn target_types(&self, level: SpellLevel, base: AimType) -> Vec<AimType> {
        let mut types = vec![base];
        for effect in self.effects(level) {
            effect.adjust_target_types(&mut types);
        }
        types
    }

    /// Build `level` from a `name → { "type": ..., ... }` object.
    ///
    /// Each entry's type is resolved through `registry`. An entry with a
    /// missing or unknown type, or with invalid fields, is logged, recorded
    /// in the report and skipped; the rest of the level still loads. Only a
    /// configuration that is not an object at all is an error.
    pub fn load_json(
        &mut self,
        registry: &EffectRegistry,
        level: SpellLevel,
        config: &Value,
    ) -> Result<LoadReport, ConfigError> {
        let entries = config.as_object().ok_or_else(|| ConfigError::NotAnObject {
            context: format!("effects of level '{level}'"),
        })?;

        let mut report = LoadReport::default();
        for (name, entry) in entries {
            match build_effect(registry, level, name, entry) {
                Ok(effect) => {
                    self.add(name.as_str(), effect, level);
                    report.loaded += 1;
                }
                Err(err) => {
                    let effect_type = entry.get("type").and_then(Value::as_str).unwrap_or_default();
                    warn!(effect = %name, effect_type, level = %level, error = %err, "skipping effect");
                    report.skipped.push(err);
                }
            }
        }
        Ok(report)
    }

    /// Configuration of `level`, loadable again with `load_json`.
    pub fn save_json(&self, level: SpellLevel) -> Result<Value, serde_json::Error> {
        let mut out = Map::new();
        for effect in self.effects(level) {
            out.insert(effect.name().to_string(), Value::Object(effect.save_json()?));
        }
        Ok(Value::Object(out))
    }
}

fn build_effect(
    registry: &EffectRegistry,
    level: SpellLevel,
    name: &str,
    entry: &Value,
) -> Result<Box<dyn Effect>, ConfigError> {
    let effect_type = entry
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| ConfigError::MissingType {
            effect: name.to_string(),
        })?;

    let factory = registry
        .find(effect_type)
        .ok_or_else(|| ConfigError::UnknownType {
            effect: name.to_string(),
            effect_type: effect_type.to_string(),
        })?;

    let mut effect = factory.create(level);
    effect
        .load_json(entry)
        .map_err(|source| ConfigError::InvalidField {
            effect: name.to_string(),
            source,
        })?;
    Ok(effect)
}
