//! Summon effect: brings a new stack onto the caster's side.
//!
//! Summon ignores where the caster aimed. The new unit appears on the first
//! free hex of the caster's deployment edge. Casting it again while the same
//! creature is already summoned reinforces that stack instead of adding a
//! second one.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::battle::{BattleCommand, BattleInfo, HealLevel, Unit};
use crate::core::{AimType, BattleRng, CreatureId, SpellLevel};
use crate::spells::{EffectTarget, Mechanics, Problem, Target};

use super::effect::{Applicability, Application, Effect, EffectCore, TargetTransform};
use super::registry::EffectType;

/// Configuration of a summon effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummonConfig {
    /// Creature kind to summon.
    pub id: CreatureId,
    /// The summoned stack stays after the battle.
    pub permanent: bool,
    /// Only one kind of summoned creature per side.
    pub exclusive: bool,
}

impl Default for SummonConfig {
    fn default() -> Self {
        Self {
            id: CreatureId(0),
            permanent: false,
            exclusive: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Summon {
    core: EffectCore,
    config: SummonConfig,
}

impl Summon {
    #[must_use]
    pub fn config(&self) -> &SummonConfig {
        &self.config
    }

    #[must_use]
    pub fn with_config(mut self, config: SummonConfig) -> Self {
        self.config = config;
        self
    }

    /// Living summoned units on the caster's side.
    fn summoned<'a>(&self, m: &'a dyn Mechanics) -> impl Iterator<Item = &'a Unit> + 'a {
        let side = m.caster_side();
        m.battle()
            .units()
            .filter(move |unit| unit.side == side && unit.summoned && unit.alive())
    }

    /// The existing stack a new cast would reinforce.
    fn reinforced<'a>(&self, m: &'a dyn Mechanics) -> Option<&'a Unit> {
        let creature = self.config.id;
        self.summoned(m).find(|unit| unit.creature == creature)
    }
}

impl EffectType for Summon {
    const TYPE_NAME: &'static str = "summon";

    fn with_level(level: SpellLevel) -> Self {
        Self {
            core: EffectCore::new(level),
            config: SummonConfig::default(),
        }
    }
}

impl TargetTransform for Summon {
    fn adjust_target_types(&self, types: &mut Vec<AimType>) {
        types.clear();
        types.push(AimType::NoTarget);
    }

    fn filter_target(&self, _m: &dyn Mechanics, _target: &EffectTarget) -> EffectTarget {
        EffectTarget::new()
    }

    fn transform_target(&self, _m: &dyn Mechanics, _aim_point: &Target, _spell_target: &Target) -> EffectTarget {
        EffectTarget::new()
    }
}

impl Applicability for Summon {
    fn applicable(&self, problem: &mut Problem, m: &dyn Mechanics) -> bool {
        let creature = self.config.id;

        if m.creature_health(creature).is_none() {
            problem.add(format!("Unknown creature {}", creature.0));
            return false;
        }

        if self.config.exclusive {
            if let Some(other) = self.summoned(m).find(|unit| unit.creature != creature) {
                problem.add(format!("Another creature ({}) is already summoned", other.creature.0));
                return false;
            }
        }

        if m.effect_value() <= 0 {
            problem.add("Spell is too weak to summon anything");
            return false;
        }

        if self.reinforced(m).is_none() && m.battle().free_hex(m.caster_side()).is_none() {
            problem.add("No room to summon");
            return false;
        }

        true
    }

    fn applicable_to(
        &self,
        problem: &mut Problem,
        m: &dyn Mechanics,
        _aim_point: &Target,
        _target: &EffectTarget,
    ) -> bool {
        self.applicable(problem, m)
    }
}

impl Application for Summon {
    fn commands(&self, _rng: &mut BattleRng, m: &dyn Mechanics, _target: &EffectTarget) -> Vec<BattleCommand> {
        let Some(health) = m.creature_health(self.config.id) else {
            return Vec::new();
        };
        let amount = m.effect_value();
        if amount <= 0 {
            return Vec::new();
        }

        if let Some(existing) = self.reinforced(m) {
            return vec![BattleCommand::Heal {
                unit: existing.id,
                amount: amount * i64::from(health),
                level: HealLevel::OverHeal,
            }];
        }

        let side = m.caster_side();
        let Some(position) = m.battle().free_hex(side) else {
            return Vec::new();
        };
        vec![BattleCommand::Summon {
            creature: self.config.id,
            side,
            amount: i32::try_from(amount).unwrap_or(i32::MAX),
            health,
            position,
            permanent: self.config.permanent,
        }]
    }
}

impl Effect for Summon {
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
        self.config = SummonConfig::deserialize(config)?;
        Ok(())
    }

    fn save_effect(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(&self.config)
    }
}
