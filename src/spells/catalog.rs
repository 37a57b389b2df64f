//! Spell catalog for definition lookup.

use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::debug;

use crate::core::{ConfigError, SpellId};
use crate::effects::{EffectRegistry, LoadReport};

use super::definition::SpellDefinition;

/// Spell definitions keyed by id.
///
/// ## Example
///
/// ```
/// use spell_engine::core::{AimType, SpellId};
/// use spell_engine::spells::{SpellCatalog, SpellDefinition};
///
/// let mut catalog = SpellCatalog::new();
/// catalog
///     .register(SpellDefinition::new(SpellId::CURE, "Cure", AimType::Creature))
///     .unwrap();
///
/// assert_eq!(catalog.get(SpellId::CURE).unwrap().name, "Cure");
/// assert!(catalog
///     .register(SpellDefinition::new(SpellId::CURE, "Cure again", AimType::Creature))
///     .is_err());
/// ```
#[derive(Debug, Default)]
pub struct SpellCatalog {
    spells: FxHashMap<SpellId, SpellDefinition>,
}

impl SpellCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition. An id can only be registered once.
    pub fn register(&mut self, spell: SpellDefinition) -> Result<(), ConfigError> {
        if self.spells.contains_key(&spell.id) {
            return Err(ConfigError::DuplicateSpell { id: spell.id });
        }
        debug!(spell = %spell.id, name = %spell.name, "registered spell");
        self.spells.insert(spell.id, spell);
        Ok(())
    }

    /// Load a JSON array of definitions.
    ///
    /// Stops at the first malformed or duplicate definition. Skipped effect
    /// entries are collected across all spells.
    pub fn load_json(&mut self, registry: &EffectRegistry, config: &Value) -> Result<LoadReport, ConfigError> {
        let spells = config.as_array().ok_or_else(|| ConfigError::NotAnArray {
            context: "spell catalog".to_string(),
        })?;

        let mut report = LoadReport::default();
        for entry in spells {
            let (spell, spell_report) = SpellDefinition::from_json(registry, entry)?;
            self.register(spell)?;
            report.loaded += spell_report.loaded;
            report.skipped.extend(spell_report.skipped);
        }
        Ok(report)
    }

    #[must_use]
    pub fn get(&self, id: SpellId) -> Option<&SpellDefinition> {
        self.spells.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: SpellId) -> bool {
        self.spells.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.spells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    /// Iterate over all definitions, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &SpellDefinition> {
        self.spells.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AimType;
    use serde_json::json;

    #[test]
    fn test_duplicate_rejected() {
        let mut catalog = SpellCatalog::new();
        catalog
            .register(SpellDefinition::new(SpellId::DISPEL, "Dispel", AimType::Creature))
            .unwrap();

        let err = catalog
            .register(SpellDefinition::new(SpellId::DISPEL, "Other", AimType::NoTarget))
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateSpell { id } if id == SpellId::DISPEL));
        assert_eq!(catalog.get(SpellId::DISPEL).unwrap().name, "Dispel");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_load_array() {
        let registry = EffectRegistry::with_builtin_effects();
        let mut catalog = SpellCatalog::new();

        let report = catalog
            .load_json(
                &registry,
                &json!([
                    { "id": 15, "name": "Magic Arrow", "targetType": "CREATURE",
                      "levels": { "basic": { "battleEffects": { "arrow": { "type": "damage" } } } } },
                    { "id": 35, "name": "Dispel", "targetType": "CREATURE",
                      "levels": { "basic": { "battleEffects": {
                          "dispel": { "type": "dispel" },
                          "junk": { "type": "teleport" }
                      } } } }
                ]),
            )
            .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(report.loaded, 2);
        assert_eq!(report.skipped.len(), 1);
        assert!(catalog.contains(SpellId::MAGIC_ARROW));
        assert_eq!(catalog.iter().count(), 2);
    }

    #[test]
    fn test_load_rejects_non_array() {
        let registry = EffectRegistry::with_builtin_effects();
        let mut catalog = SpellCatalog::new();
        let err = catalog.load_json(&registry, &json!({})).unwrap_err();
        assert!(matches!(err, ConfigError::NotAnArray { .. }));
        assert!(catalog.is_empty());
    }
}
