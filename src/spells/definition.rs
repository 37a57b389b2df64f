//! Spell definitions loaded from configuration.
//!
//! A definition names a spell, fixes the aim type it starts from, and owns
//! the effect bundle of every mastery level:
//!
//! ```json
//! {
//!   "id": 17,
//!   "name": "Lightning Bolt",
//!   "targetType": "CREATURE",
//!   "levels": {
//!     "basic":  { "battleEffects": { "bolt": { "type": "damage" } } },
//!     "expert": { "battleEffects": { "bolt": { "type": "damage", "variance": 10 } } }
//!   }
//! }
//! ```
//!
//! Levels left out of `levels` simply have no effects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{AimType, ConfigError, SpellId, SpellLevel};
use crate::effects::{EffectBundle, EffectRegistry, LoadReport};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSpell {
    id: SpellId,
    name: String,
    #[serde(default = "default_target_type")]
    target_type: AimType,
    #[serde(default)]
    levels: BTreeMap<String, RawLevel>,
}

#[derive(Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct RawLevel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    battle_effects: Option<Value>,
}

fn default_target_type() -> AimType {
    AimType::NoTarget
}

/// A spell with its per-level effects.
#[derive(Debug)]
pub struct SpellDefinition {
    pub id: SpellId,
    pub name: String,
    /// Aim type before effects adjust it.
    pub target_type: AimType,
    bundle: EffectBundle,
}

impl SpellDefinition {
    /// Create a definition with no effects.
    pub fn new(id: SpellId, name: impl Into<String>, target_type: AimType) -> Self {
        Self {
            id,
            name: name.into(),
            target_type,
            bundle: EffectBundle::new(),
        }
    }

    /// Replace the effect bundle (builder pattern).
    #[must_use]
    pub fn with_bundle(mut self, bundle: EffectBundle) -> Self {
        self.bundle = bundle;
        self
    }

    /// Build a definition from JSON.
    ///
    /// Malformed definitions and unknown level names are errors. Individual
    /// effect entries that cannot be built are skipped and listed in the
    /// returned report.
    pub fn from_json(registry: &EffectRegistry, config: &Value) -> Result<(Self, LoadReport), ConfigError> {
        let raw = RawSpell::deserialize(config).map_err(ConfigError::InvalidSpell)?;

        let mut definition = Self::new(raw.id, raw.name, raw.target_type);
        let mut report = LoadReport::default();

        for (key, level_config) in raw.levels {
            let level = SpellLevel::from_name(&key).ok_or(ConfigError::UnknownLevel { level: key })?;
            if let Some(effects) = level_config.battle_effects {
                let level_report = definition.bundle.load_json(registry, level, &effects)?;
                report.loaded += level_report.loaded;
                report.skipped.extend(level_report.skipped);
            }
        }

        Ok((definition, report))
    }

    /// Serialize back into the form `from_json` reads.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        let mut levels = Map::new();
        for level in SpellLevel::all().filter(|level| !self.bundle.is_empty(*level)) {
            let raw = RawLevel {
                battle_effects: Some(self.bundle.save_json(level)?),
            };
            levels.insert(level.name().to_string(), serde_json::to_value(raw)?);
        }

        let mut out = Map::new();
        out.insert("id".to_string(), serde_json::to_value(self.id)?);
        out.insert("name".to_string(), Value::from(self.name.as_str()));
        out.insert("targetType".to_string(), serde_json::to_value(self.target_type)?);
        out.insert("levels".to_string(), Value::Object(levels));
        Ok(Value::Object(out))
    }

    #[must_use]
    pub fn bundle(&self) -> &EffectBundle {
        &self.bundle
    }

    pub fn bundle_mut(&mut self) -> &mut EffectBundle {
        &mut self.bundle
    }

    /// Aim types accepted at `level` once every effect has adjusted them.
    #[must_use]
    pub fn aim_types(&self, level: SpellLevel) -> Vec<AimType> {
        self.bundle.target_types(level, self.target_type)
    }
}
