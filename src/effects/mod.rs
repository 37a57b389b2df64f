//! Spell effects and the per-level bundles that hold them.
//!
//! - `Effect`: one configured piece of a spell level, built from small
//!   capability traits (`TargetTransform`, `Applicability`, `Application`)
//! - `EffectRegistry`: type name to factory, used while loading configuration
//! - `EffectBundle`: the named effects of every level of one spell, with
//!   applicability aggregation and target preparation
//! - `PrepareOverrides`: per-spell exceptions to the default prepare rule
//!
//! ## Built-in effects
//!
//! | type     | struct    | acts on                           |
//! |----------|-----------|-----------------------------------|
//! | `damage` | [`Damage`]| living units, optionally chained  |
//! | `heal`   | [`Heal`]  | wounded (or dead) units           |
//! | `summon` | [`Summon`]| nothing; creates a unit           |
//! | `timed`  | [`Timed`] | units lacking the statuses        |
//! | `dispel` | [`Dispel`]| units carrying matching statuses  |

mod effect;
mod unit;
mod registry;
mod overrides;
mod bundle;

mod damage;
mod heal;
mod summon;
mod timed;
mod dispel;

pub use effect::{Applicability, Application, Effect, EffectCore, TargetTransform};
pub use unit::UnitSelector;
pub use registry::{EffectFactory, EffectRegistry, EffectType};
pub use overrides::{creature_triggered, InclusionRule, PrepareOverrides};
pub use bundle::{EffectBundle, EffectsToApply, LoadReport};

pub use damage::{Damage, DamageConfig};
pub use heal::{Heal, HealConfig};
pub use summon::{Summon, SummonConfig};
pub use timed::{Timed, TimedConfig};
pub use dispel::{Dispel, DispelConfig};
