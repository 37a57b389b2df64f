//! Damage effect.
//!
//! Hits every living unit of the spell target for the cast's effect value.
//! With `chainLength > 0` it instead starts at the aimed unit and jumps to
//! the nearest unvisited unit each hop, losing `chainFactor` percent of its
//! strength per jump.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::battle::{BattleCommand, BattleInfo, Unit};
use crate::core::{AimType, BattleRng, SpellLevel};
use crate::spells::{Destination, EffectTarget, Mechanics, Problem, Target};

use super::effect::{Applicability, Application, Effect, EffectCore, TargetTransform};
use super::registry::EffectType;
use super::unit::UnitSelector;

/// Configuration of a damage effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DamageConfig {
    /// Total units hit by a chain, including the first. 0 disables chaining.
    pub chain_length: u8,
    /// Percent of strength kept on each jump.
    pub chain_factor: u8,
    /// Random spread in percent, rolled per unit.
    pub variance: u8,
}

impl Default for DamageConfig {
    fn default() -> Self {
        Self {
            chain_length: 0,
            chain_factor: 50,
            variance: 0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Damage {
    core: EffectCore,
    config: DamageConfig,
}

impl Damage {
    #[must_use]
    pub fn config(&self) -> &DamageConfig {
        &self.config
    }

    /// Replace the configuration (builder pattern).
    #[must_use]
    pub fn with_config(mut self, config: DamageConfig) -> Self {
        self.config = config;
        self
    }

    fn chains(&self) -> bool {
        self.config.chain_length > 0
    }

    fn chain_target(&self, m: &dyn Mechanics, aim_point: &Target) -> EffectTarget {
        let battle = m.battle();
        let first = aim_point.first().and_then(|dest| {
            dest.unit
                .and_then(|id| battle.unit(id))
                .or_else(|| battle.unit_at(dest.hex))
        });

        let mut chain = EffectTarget::new();
        let Some(first) = first.filter(|unit| self.is_valid_unit(m, unit)) else {
            return chain;
        };

        let mut visited = FxHashSet::default();
        visited.insert(first.id);
        chain.push(Destination::unit(first));

        let mut last = first;
        while chain.len() < usize::from(self.config.chain_length) {
            let next = battle
                .units()
                .filter(|unit| !visited.contains(&unit.id) && self.is_valid_unit(m, unit))
                .min_by_key(|unit| (last.position.distance(unit.position), unit.position, unit.id));

            let Some(next) = next else { break };
            visited.insert(next.id);
            chain.push(Destination::unit(next));
            last = next;
        }
        chain
    }
}

impl EffectType for Damage {
    const TYPE_NAME: &'static str = "damage";

    fn with_level(level: SpellLevel) -> Self {
        Self {
            core: EffectCore::new(level),
            config: DamageConfig::default(),
        }
    }
}

impl UnitSelector for Damage {
    fn accepts(&self, _m: &dyn Mechanics, _unit: &Unit) -> bool {
        true
    }
}

impl TargetTransform for Damage {
    fn adjust_target_types(&self, types: &mut Vec<AimType>) {
        if self.chains() {
            types.clear();
            types.push(AimType::Creature);
        }
    }

    fn filter_target(&self, m: &dyn Mechanics, target: &EffectTarget) -> EffectTarget {
        self.select_units(m, target)
    }

    fn transform_target(&self, m: &dyn Mechanics, aim_point: &Target, spell_target: &Target) -> EffectTarget {
        if self.chains() {
            self.chain_target(m, aim_point)
        } else {
            self.select_units(m, spell_target)
        }
    }
}

impl Applicability for Damage {
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

impl Application for Damage {
    fn commands(&self, rng: &mut BattleRng, m: &dyn Mechanics, target: &EffectTarget) -> Vec<BattleCommand> {
        let battle = m.battle();
        let variance = i64::from(self.config.variance);
        let mut strength = m.effect_value();
        let mut commands = Vec::with_capacity(target.len());

        for dest in target {
            let Some(unit) = dest.unit.and_then(|id| battle.unit(id)) else {
                continue;
            };
            if self.is_valid_unit(m, unit) {
                let mut amount = strength;
                if variance > 0 {
                    amount = amount * (100 + rng.gen_range(-variance..=variance)) / 100;
                }
                commands.push(BattleCommand::Damage {
                    unit: unit.id,
                    amount: amount.max(0),
                });
            }
            if self.chains() {
                strength = strength * i64::from(self.config.chain_factor) / 100;
            }
        }
        commands
    }
}

impl Effect for Damage {
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
        self.config = DamageConfig::deserialize(config)?;
        Ok(())
    }

    fn save_effect(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::BattleState;
    use crate::core::{BattleHex, BattleSide, CreatureId, SpellId, UnitId};
    use crate::spells::CastMechanics;
    use serde_json::json;
    use smallvec::smallvec;

    fn hex(x: i16, y: i16) -> BattleHex {
        BattleHex::from_xy(x, y).unwrap()
    }

    /// Units 0..4 on row 5 at columns 2, 4, 9, 14; unit 2 is dead.
    fn setup() -> BattleState {
        let mut state = BattleState::new();
        for (id, x) in [(0, 2), (1, 4), (2, 9), (3, 14)] {
            state.add_unit(Unit::new(UnitId(id), CreatureId(1), BattleSide::Defender, hex(x, 5), 10, 10));
        }
        state.unit_mut(UnitId(2)).unwrap().take_damage(1000);
        state
    }

    fn everyone(state: &BattleState) -> Target {
        state.units().map(Destination::unit).collect()
    }

    fn chain(length: u8) -> Damage {
        Damage::with_level(SpellLevel::BASIC).with_config(DamageConfig {
            chain_length: length,
            ..DamageConfig::default()
        })
    }

    #[test]
    fn test_filter_drops_dead_units() {
        let state = setup();
        let m = CastMechanics::new(&state, SpellId::LIGHTNING_BOLT, SpellLevel::BASIC);
        let damage = Damage::with_level(SpellLevel::BASIC);

        let all = everyone(&state);
        let filtered = damage.filter_target(&m, &all);

        assert_eq!(filtered.len(), 3);
        assert!(filtered.iter().all(|d| d.unit != Some(UnitId(2))));
    }

    #[test]
    fn test_plain_damage_ignores_aim_point() {
        let state = setup();
        let m = CastMechanics::new(&state, SpellId::LIGHTNING_BOLT, SpellLevel::BASIC);
        let damage = Damage::with_level(SpellLevel::BASIC);

        let aim: Target = smallvec![Destination::hex(hex(8, 8))];
        let target = damage.transform_target(&m, &aim, &everyone(&state));
        assert_eq!(target.len(), 3);
    }

    #[test]
    fn test_chain_follows_nearest_living() {
        let state = setup();
        let m = CastMechanics::new(&state, SpellId::CHAIN_LIGHTNING, SpellLevel::EXPERT);

        let aim: Target = smallvec![Destination::hex(hex(4, 5))];
        let target = chain(4).transform_target(&m, &aim, &Target::new());

        let ids: Vec<_> = target.iter().map(|d| d.unit.unwrap()).collect();
        assert_eq!(ids, vec![UnitId(1), UnitId(0), UnitId(3)]);
    }

    #[test]
    fn test_chain_stops_at_length() {
        let state = setup();
        let m = CastMechanics::new(&state, SpellId::CHAIN_LIGHTNING, SpellLevel::EXPERT);

        let aim: Target = smallvec![Destination::unit(state.unit(UnitId(3)).unwrap())];
        let target = chain(2).transform_target(&m, &aim, &Target::new());

        let ids: Vec<_> = target.iter().map(|d| d.unit.unwrap()).collect();
        assert_eq!(ids, vec![UnitId(3), UnitId(1)]);
    }

    #[test]
    fn test_chain_from_empty_hex_is_empty() {
        let state = setup();
        let m = CastMechanics::new(&state, SpellId::CHAIN_LIGHTNING, SpellLevel::EXPERT);

        let aim: Target = smallvec![Destination::hex(hex(7, 7))];
        assert!(chain(3).transform_target(&m, &aim, &Target::new()).is_empty());

        let mut problem = Problem::new();
        assert!(!chain(3).applicable_to(&mut problem, &m, &aim, &Target::new()));
        assert!(!problem.is_empty());
    }

    #[test]
    fn test_chain_decay() {
        let state = setup();
        let m = CastMechanics::new(&state, SpellId::CHAIN_LIGHTNING, SpellLevel::EXPERT)
            .with_effect_value(100);
        let effect = chain(3);

        let aim: Target = smallvec![Destination::hex(hex(4, 5))];
        let target = effect.transform_target(&m, &aim, &Target::new());
        let commands = effect.commands(&mut BattleRng::new(0), &m, &target);

        let amounts: Vec<_> = commands
            .iter()
            .map(|c| match c {
                BattleCommand::Damage { amount, .. } => *amount,
                other => panic!("unexpected command {other:?}"),
            })
            .collect();
        assert_eq!(amounts, vec![100, 50, 25]);
    }

    #[test]
    fn test_variance_is_deterministic() {
        let state = setup();
        let m = CastMechanics::new(&state, SpellId::MAGIC_ARROW, SpellLevel::BASIC)
            .with_effect_value(100);
        let effect = Damage::with_level(SpellLevel::BASIC).with_config(DamageConfig {
            variance: 20,
            ..DamageConfig::default()
        });
        let target = everyone(&state);

        let first = effect.commands(&mut BattleRng::new(9), &m, &target);
        let second = effect.commands(&mut BattleRng::new(9), &m, &target);
        assert_eq!(first, second);

        for command in &first {
            let BattleCommand::Damage { amount, .. } = command else {
                panic!("unexpected command");
            };
            assert!((80..=120).contains(amount));
        }
    }

    #[test]
    fn test_chain_requires_creature_aim() {
        let mut types = vec![AimType::Location];
        chain(3).adjust_target_types(&mut types);
        assert_eq!(types, vec![AimType::Creature]);

        let mut types = vec![AimType::Location];
        Damage::with_level(SpellLevel::BASIC).adjust_target_types(&mut types);
        assert_eq!(types, vec![AimType::Location]);
    }

    #[test]
    fn test_config_round_trip() {
        let mut effect = Damage::with_level(SpellLevel::BASIC);
        effect.load_effect(&json!({ "chainLength": 4, "chainFactor": 75 })).unwrap();

        assert_eq!(effect.config().chain_length, 4);
        assert_eq!(effect.config().chain_factor, 75);
        assert_eq!(effect.config().variance, 0);
        assert_eq!(
            effect.save_effect().unwrap(),
            json!({ "chainLength": 4, "chainFactor": 75, "variance": 0 })
        );
    }
}
