//! The `Effect` interface.
//!
//! An effect is one configured piece of a spell level: "deal damage",
//! "heal", "summon"... It is split into small capabilities so that a
//! concrete effect implements exactly the behaviour it needs:
//!
//! - [`TargetTransform`]: what the effect acts on
//! - [`Applicability`]: whether the effect can happen at all
//! - [`Application`]: which battle mutations it produces
//!
//! [`Effect`] ties them together with the shared [`EffectCore`] flags and
//! the configuration hooks, and derives both apply paths from
//! `Application::commands`, so the networked and local paths can never
//! disagree.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::battle::{BattleCommand, BattleMutator, BattlePacket, PacketSender};
use crate::core::{AimType, BattleRng, SpellLevel};
use crate::spells::{EffectTarget, Mechanics, Problem, Target};

/// State every effect carries regardless of its kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectCore {
    /// Name within the bundle. Assigned by the bundle, not the effect.
    pub name: String,
    /// Takes part in default applicability and apply evaluation.
    pub automatic: bool,
    /// Failing does not block the rest of the bundle.
    pub optional: bool,
    spell_level: SpellLevel,
}

impl EffectCore {
    /// Automatic, mandatory, unnamed.
    #[must_use]
    pub fn new(spell_level: SpellLevel) -> Self {
        Self {
            name: String::new(),
            automatic: true,
            optional: false,
            spell_level,
        }
    }

    #[must_use]
    pub const fn spell_level(&self) -> SpellLevel {
        self.spell_level
    }
}

/// Flags shared by all effect configurations.
#[derive(Serialize, Deserialize)]
#[serde(default)]
struct CommonConfig {
    automatic: bool,
    optional: bool,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            automatic: true,
            optional: false,
        }
    }
}

/// Capability: choosing what an effect acts on.
pub trait TargetTransform {
    /// Narrow or extend the aim types the spell accepts.
    fn adjust_target_types(&self, types: &mut Vec<AimType>);

    /// Keep only the destinations this effect cares about.
    fn filter_target(&self, m: &dyn Mechanics, target: &EffectTarget) -> EffectTarget;

    /// Turn "where the caster aimed" plus "what the spell hit" into
    /// "what this effect acts on".
    fn transform_target(
        &self,
        m: &dyn Mechanics,
        aim_point: &Target,
        spell_target: &Target,
    ) -> EffectTarget;
}

/// Capability: legality checks.
///
/// Failures are reported by returning `false` and describing the reason in
/// `problem`. Both checks default to "always applicable".
pub trait Applicability {
    /// Check independent of any aim point.
    fn applicable(&self, _problem: &mut Problem, _m: &dyn Mechanics) -> bool {
        true
    }

    /// Check against a concrete aim point and this effect's own target.
    fn applicable_to(
        &self,
        _problem: &mut Problem,
        _m: &dyn Mechanics,
        _aim_point: &Target,
        _target: &EffectTarget,
    ) -> bool {
        true
    }
}

/// Capability: describing the outcome as battle mutations.
pub trait Application {
    /// Mutations for `target`, in application order.
    ///
    /// Must consume `rng` identically on every participant.
    fn commands(
        &self,
        rng: &mut BattleRng,
        m: &dyn Mechanics,
        target: &EffectTarget,
    ) -> Vec<BattleCommand>;
}

/// A configured effect bound to one spell level.
pub trait Effect: TargetTransform + Applicability + Application + Send + Sync + std::fmt::Debug {
    fn core(&self) -> &EffectCore;

    fn core_mut(&mut self) -> &mut EffectCore;

    /// Registry name of this effect's kind.
    fn type_name(&self) -> &'static str;

    /// Read the kind-specific fields from a configuration entry.
    fn load_effect(&mut self, config: &Value) -> Result<(), serde_json::Error>;

    /// Write the kind-specific fields as a JSON object.
    fn save_effect(&self) -> Result<Value, serde_json::Error>;

    /// Apply through the networked channel.
    ///
    /// Sends one packet holding every command, or nothing when the effect
    /// has nothing to do.
    fn apply(
        &self,
        sender: &mut dyn PacketSender,
        rng: &mut BattleRng,
        m: &dyn Mechanics,
        target: &EffectTarget,
    ) {
        let commands = self.commands(rng, m, target);
        if !commands.is_empty() {
            sender.send_and_apply(BattlePacket::new(m.spell_id(), &self.core().name, commands));
        }
    }

    /// Apply directly to local battle state.
    fn apply_local(
        &self,
        battle: &mut dyn BattleMutator,
        rng: &mut BattleRng,
        m: &dyn Mechanics,
        target: &EffectTarget,
    ) {
        for command in self.commands(rng, m, target) {
            battle.apply_command(&command);
        }
    }

    /// Load common flags, then the kind-specific fields.
    fn load_json(&mut self, config: &Value) -> Result<(), serde_json::Error> {
        let common = CommonConfig::deserialize(config)?;
        let core = self.core_mut();
        core.automatic = common.automatic;
        core.optional = common.optional;
        self.load_effect(config)
    }

    /// Save `type`, common flags and the kind-specific fields.
    fn save_json(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let mut out = Map::new();
        out.insert("type".to_string(), Value::from(self.type_name()));
        out.insert("automatic".to_string(), Value::from(self.core().automatic));
        out.insert("optional".to_string(), Value::from(self.core().optional));
        if let Value::Object(fields) = self.save_effect()? {
            out.extend(fields);
        }
        Ok(out)
    }

    fn name(&self) -> &str {
        &self.core().name
    }

    fn spell_level(&self) -> SpellLevel {
        self.core().spell_level()
    }
}
