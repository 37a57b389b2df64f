//! Heal effect: restores hit points and, at resurrect levels, dead creatures.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::battle::{BattleCommand, BattleInfo, HealLevel, Unit};
use crate::core::{AimType, BattleRng, SpellLevel};
use crate::spells::{EffectTarget, Mechanics, Problem, Target};

use super::effect::{Applicability, Application, Effect, EffectCore, TargetTransform};
use super::registry::EffectType;
use super::unit::UnitSelector;

/// Configuration of a heal effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealConfig {
    pub heal_level: HealLevel,
    /// Percent of the effect value actually restored.
    pub heal_power: u16,
    /// A unit is only worth healing if at least this many whole creatures
    /// come back.
    pub min_full_units: i32,
}

impl Default for HealConfig {
    fn default() -> Self {
        Self {
            heal_level: HealLevel::Heal,
            heal_power: 100,
            min_full_units: 0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Heal {
    core: EffectCore,
    config: HealConfig,
}

impl Heal {
    #[must_use]
    pub fn config(&self) -> &HealConfig {
        &self.config
    }

    #[must_use]
    pub fn with_config(mut self, config: HealConfig) -> Self {
        self.config = config;
        self
    }

    /// Hit points available to each healed unit.
    #[must_use]
    pub fn power(&self, m: &dyn Mechanics) -> i64 {
        m.effect_value() * i64::from(self.config.heal_power) / 100
    }
}

impl EffectType for Heal {
    const TYPE_NAME: &'static str = "heal";

    fn with_level(level: SpellLevel) -> Self {
        Self {
            core: EffectCore::new(level),
            config: HealConfig::default(),
        }
    }
}

impl UnitSelector for Heal {
    fn allow_dead(&self) -> bool {
        self.config.heal_level.revives()
    }

    fn accepts(&self, m: &dyn Mechanics, unit: &Unit) -> bool {
        let missing = unit.missing_health(self.config.heal_level);
        if missing <= 0 {
            return false;
        }

        if self.config.min_full_units > 0 {
            let gained = self.power(m).min(missing);
            if gained < i64::from(self.config.min_full_units) * i64::from(unit.max_health) {
                return false;
            }
        }

        // A corpse under a living unit cannot get up.
        !(unit.is_dead() && m.battle().is_occupied(unit.position))
    }
}

impl TargetTransform for Heal {
    fn adjust_target_types(&self, _types: &mut Vec<AimType>) {}

    fn filter_target(&self, m: &dyn Mechanics, target: &EffectTarget) -> EffectTarget {
        self.select_units(m, target)
    }

    fn transform_target(&self, m: &dyn Mechanics, _aim_point: &Target, spell_target: &Target) -> EffectTarget {
        self.select_units(m, spell_target)
    }
}

impl Applicability for Heal {
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

impl Application for Heal {
    fn commands(&self, _rng: &mut BattleRng, m: &dyn Mechanics, target: &EffectTarget) -> Vec<BattleCommand> {
        let battle = m.battle();
        let level = self.config.heal_level;
        let power = self.power(m);

        target
            .iter()
            .filter_map(|dest| dest.unit.and_then(|id| battle.unit(id)))
            .filter(|unit| self.is_valid_unit(m, unit))
            .map(|unit| {
                let amount = match level {
                    HealLevel::OverHeal => power,
                    _ => power.min(unit.missing_health(level)),
                };
                BattleCommand::Heal {
                    unit: unit.id,
                    amount,
                    level,
                }
            })
            .collect()
    }
}

impl Effect for Heal {
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
        self.config = HealConfig::deserialize(config)?;
        Ok(())
    }

    fn save_effect(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(&self.config)
    }
}
