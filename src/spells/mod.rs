//! Spells: cast context, targets, definitions and cast orchestration.
//!
//! - [`Mechanics`] / [`CastMechanics`]: what is being cast, by whom, where
//! - [`Target`] / [`Destination`]: aim points and effect targets
//! - [`Problem`]: reasons a cast is rejected
//! - [`SpellDefinition`] / [`SpellCatalog`]: spells loaded from JSON
//! - [`cast`] / [`cast_local`]: check, prepare and apply a bundle
//!
//! `cast_local` reads the battle through `Mechanics` and writes through a
//! separate `BattleMutator`. Callers typically hand the mechanics a clone of
//! `BattleState` (O(1) thanks to `im`) and mutate the original.

mod target;
mod problem;
mod mechanics;
mod definition;
mod catalog;
mod cast;

pub use target::{target_units, Destination, EffectTarget, Target};
pub use problem::{Problem, ProblemMessage, Severity};
pub use mechanics::{CastMechanics, Mechanics};
pub use definition::SpellDefinition;
pub use catalog::SpellCatalog;
pub use cast::{cast, cast_local};
