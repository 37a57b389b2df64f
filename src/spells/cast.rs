//! Cast orchestration.
//!
//! Checks a cast against a bundle, prepares it and applies every selected
//! effect in bundle order. The networked and local entry points share the
//! check and the preparation, and both draw from the same `BattleRng`
//! sequence, so for the same seed they produce identical commands.

use tracing::{debug, trace};

use crate::battle::{BattleMutator, PacketSender};
use crate::core::BattleRng;
use crate::effects::{EffectBundle, EffectsToApply};

use super::mechanics::Mechanics;
use super::problem::Problem;
use super::target::Target;

fn checked<'b>(
    bundle: &'b EffectBundle,
    m: &dyn Mechanics,
    aim_point: &Target,
    spell_target: &Target,
) -> Result<EffectsToApply<'b>, Problem> {
    let mut problem = Problem::new();
    if !bundle.applicable_at(&mut problem, m, aim_point, spell_target) {
        debug!(spell = %m.spell_id(), level = %m.effect_level(), %problem, "cast rejected");
        return Err(problem);
    }
    Ok(bundle.prepare(m, aim_point, spell_target))
}

/// Cast through the networked channel.
///
/// Returns the number of effects applied, or the reasons the cast is not
/// legal at this aim point.
pub fn cast(
    bundle: &EffectBundle,
    m: &dyn Mechanics,
    aim_point: &Target,
    spell_target: &Target,
    rng: &mut BattleRng,
    sender: &mut dyn PacketSender,
) -> Result<usize, Problem> {
    let to_apply = checked(bundle, m, aim_point, spell_target)?;
    for (effect, target) in &to_apply {
        trace!(effect = effect.name(), targets = target.len(), "applying effect");
        effect.apply(sender, rng, m, target);
    }
    Ok(to_apply.len())
}

/// Cast directly onto local battle state.
pub fn cast_local(
    bundle: &EffectBundle,
    m: &dyn Mechanics,
    aim_point: &Target,
    spell_target: &Target,
    rng: &mut BattleRng,
    mutator: &mut dyn BattleMutator,
) -> Result<usize, Problem> {
    let to_apply = checked(bundle, m, aim_point, spell_target)?;
    for (effect, target) in &to_apply {
        trace!(effect = effect.name(), targets = target.len(), "applying effect locally");
        effect.apply_local(mutator, rng, m, target);
    }
    Ok(to_apply.len())
}
