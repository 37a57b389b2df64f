//! Dispel effect: strips statuses from units.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::battle::{BattleCommand, BattleInfo, StatusId, Unit};
use crate::core::{AimType, BattleRng, SpellLevel};
use crate::spells::{EffectTarget, Mechanics, Problem, Target};

use super::effect::{Applicability, Application, Effect, EffectCore, TargetTransform};
use super::registry::EffectType;
use super::unit::UnitSelector;

/// Configuration of a dispel effect.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DispelConfig {
    /// Statuses to remove. Empty removes everything.
    pub statuses: Vec<StatusId>,
}

#[derive(Clone, Debug)]
pub struct Dispel {
    core: EffectCore,
    config: DispelConfig,
}

impl Dispel {
    #[must_use]
    pub fn config(&self) -> &DispelConfig {
        &self.config
    }

    #[must_use]
    pub fn with_config(mut self, config: DispelConfig) -> Self {
        self.config = config;
        self
    }
}

impl EffectType for Dispel {
    const TYPE_NAME: &'static str = "dispel";

    fn with_level(level: SpellLevel) -> Self {
        Self {
            core: EffectCore::new(level),
            config: DispelConfig::default(),
        }
    }
}

impl UnitSelector for Dispel {
    fn accepts(&self, _m: &dyn Mechanics, unit: &Unit) -> bool {
        if self.config.statuses.is_empty() {
            !unit.statuses.is_empty()
        } else {
            self.config.statuses.iter().any(|status| unit.has_status(*status))
        }
    }
}

impl TargetTransform for Dispel {
    fn adjust_target_types(&self, _types: &mut Vec<AimType>) {}

    fn filter_target(&self, m: &dyn Mechanics, target: &EffectTarget) -> EffectTarget {
        self.select_units(m, target)
    }

    fn transform_target(&self, m: &dyn Mechanics, _aim_point: &Target, spell_target: &Target) -> EffectTarget {
        self.select_units(m, spell_target)
    }
}

impl Applicability for Dispel {
    fn applicable(&self, problem: &mut Problem, m: &dyn Mechanics) -> bool {
        self.check_candidates(problem, m)
    }

    fn applicable_to(
        &self,
        problem: &mut Problem,
        m: &dyn Mechanics,
        _aim_point: &Target,
        target: &EffectTarget,
    ) -> bool {
        self.check_units(problem, m, target)
    }
}

impl Application for Dispel {
    fn commands(&self, _rng: &mut BattleRng, m: &dyn Mechanics, target: &EffectTarget) -> Vec<BattleCommand> {
        let battle = m.battle();
        target
            .iter()
            .filter_map(|dest| dest.unit.and_then(|id| battle.unit(id)))
            .filter(|unit| self.is_valid_unit(m, unit))
            .map(|unit| BattleCommand::RemoveStatuses {
                unit: unit.id,
                statuses: self.config.statuses.clone(),
            })
            .collect()
    }
}

impl Effect for Dispel {
    fn core(&self) -> &EffectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EffectCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn load_effect(&mut self, config: &Value) -> Result<(), serde_json::Error> {
        self.config = DispelConfig::deserialize(config)?;
        Ok(())
    }

    fn save_effect(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(&self.config)
    }
}
