//! Timed effect: puts statuses on units for a number of turns.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::battle::{BattleCommand, BattleInfo, StatusId, Unit};
use crate::core::{AimType, BattleRng, SpellLevel};
use crate::spells::{EffectTarget, Mechanics, Problem, Target};

use super::effect::{Applicability, Application, Effect, EffectCore, TargetTransform};
use super::registry::EffectType;
use super::unit::UnitSelector;

/// Configuration of a timed effect.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimedConfig {
    pub statuses: Vec<StatusId>,
    /// Turns the statuses last. Falls back to the cast's effect value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    /// Recasting extends the duration instead of refreshing it.
    pub cumulative: bool,
}

#[derive(Clone, Debug)]
pub struct Timed {
    core: EffectCore,
    config: TimedConfig,
}

impl Timed {
    #[must_use]
    pub fn config(&self) -> &TimedConfig {
        &self.config
    }

    #[must_use]
    pub fn with_config(mut self, config: TimedConfig) -> Self {
        self.config = config;
        self
    }

    /// Turns the statuses will last for this cast.
    #[must_use]
    pub fn duration(&self, m: &dyn Mechanics) -> i32 {
        self.config
            .duration
            .unwrap_or_else(|| i32::try_from(m.effect_value()).unwrap_or(i32::MAX))
    }
}

impl EffectType for Timed {
    const TYPE_NAME: &'static str = "timed";

    fn with_level(level: SpellLevel) -> Self {
        Self {
            core: EffectCore::new(level),
            config: TimedConfig::default(),
        }
    }
}

impl UnitSelector for Timed {
    fn accepts(&self, _m: &dyn Mechanics, unit: &Unit) -> bool {
        if self.config.cumulative {
            !self.config.statuses.is_empty()
        } else {
            self.config.statuses.iter().any(|status| !unit.has_status(*status))
        }
    }
}

impl TargetTransform for Timed {
    fn adjust_target_types(&self, _types: &mut Vec<AimType>) {}

    fn filter_target(&self, m: &dyn Mechanics, target: &EffectTarget) -> EffectTarget {
        self.select_units(m, target)
    }

    fn transform_target(&self, m: &dyn Mechanics, _aim_point: &Target, spell_target: &Target) -> EffectTarget {
        self.select_units(m, spell_target)
    }
}

impl Applicability for Timed {
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

impl Application for Timed {
    fn commands(&self, _rng: &mut BattleRng, m: &dyn Mechanics, target: &EffectTarget) -> Vec<BattleCommand> {
        let battle = m.battle();
        let duration = self.duration(m);
        let cumulative = self.config.cumulative;

        target
            .iter()
            .filter_map(|dest| dest.unit.and_then(|id| battle.unit(id)))
            .filter(|unit| self.is_valid_unit(m, unit))
            .flat_map(|unit| {
                self.config.statuses.iter().map(move |&status| BattleCommand::AddStatus {
                    unit: unit.id,
                    status,
                    duration,
                    cumulative,
                })
            })
            .collect()
    }
}

impl Effect for Timed {
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
        self.config = TimedConfig::deserialize(config)?;
        Ok(())
    }

    fn save_effect(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{BattleMutator, BattleState};
    use crate::core::{BattleHex, BattleSide, CreatureId, SpellId, UnitId};
    use crate::spells::{CastMechanics, Destination};
    use serde_json::json;

    const SLOW: StatusId = StatusId(54);
    const WEAKNESS: StatusId = StatusId(45);

    fn setup() -> BattleState {
        let mut state = BattleState::new();
        let hex = |y| BattleHex::from_xy(8, y).unwrap();
        state.add_unit(Unit::new(UnitId(0), CreatureId(1), BattleSide::Defender, hex(4), 4, 10));
        state.add_unit(
            Unit::new(UnitId(1), CreatureId(1), BattleSide::Defender, hex(6), 4, 10)
                .with_status(SLOW, 3),
        );
        state
    }

    fn slow(cumulative: bool) -> Timed {
        Timed::with_level(SpellLevel::BASIC).with_config(TimedConfig {
            statuses: vec![SLOW],
            duration: None,
            cumulative,
        })
    }

    fn everyone(state: &BattleState) -> Target {
        state.units().map(Destination::unit).collect()
    }

    #[test]
    fn test_refresh_skips_units_already_affected() {
        let state = setup();
        let m = CastMechanics::new(&state, SpellId(54), SpellLevel::BASIC).with_effect_value(2);

        let filtered = slow(false).filter_target(&m, &everyone(&state));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].unit, Some(UnitId(0)));

        let filtered = slow(true).filter_target(&m, &everyone(&state));
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_duration_falls_back_to_effect_value() {
        let state = setup();
        let m = CastMechanics::new(&state, SpellId(54), SpellLevel::BASIC).with_effect_value(2);
        assert_eq!(slow(false).duration(&m), 2);

        let fixed = Timed::with_level(SpellLevel::BASIC).with_config(TimedConfig {
            statuses: vec![SLOW],
            duration: Some(7),
            cumulative: false,
        });
        assert_eq!(fixed.duration(&m), 7);
    }

    #[test]
    fn test_cumulative_extends() {
        let mut state = setup();
        let m = CastMechanics::new(&state, SpellId(54), SpellLevel::BASIC).with_effect_value(2);
        let effect = slow(true);

        let target = effect.transform_target(&m, &Target::new(), &everyone(&state));
        let commands = effect.commands(&mut BattleRng::new(0), &m, &target);
        assert_eq!(commands.len(), 2);

        for command in &commands {
            state.apply_command(command);
        }
        let turns = |id| {
            state.unit(id).unwrap().statuses.iter().find(|s| s.id == SLOW).map(|s| s.turns_left)
        };
        assert_eq!(turns(UnitId(0)), Some(2));
        assert_eq!(turns(UnitId(1)), Some(5));
    }

    #[test]
    fn test_one_command_per_status() {
        let state = setup();
        let m = CastMechanics::new(&state, SpellId(61), SpellLevel::BASIC).with_effect_value(1);
        let effect = Timed::with_level(SpellLevel::BASIC).with_config(TimedConfig {
            statuses: vec![SLOW, WEAKNESS],
            duration: None,
            cumulative: false,
        });

        let target = effect.transform_target(&m, &Target::new(), &everyone(&state));
        let commands = effect.commands(&mut BattleRng::new(0), &m, &target);
        assert_eq!(commands.len(), 4);
    }

    #[test]
    fn test_save_omits_unset_duration() {
        let effect = slow(false);
        assert_eq!(
            effect.save_effect().unwrap(),
            json!({ "statuses": [54], "cumulative": false })
        );
    }
}
