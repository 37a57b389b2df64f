//! Core engine types: identifiers, battlefield geometry, spell levels, RNG, errors.
//!
//! Nothing in here knows about effects. These are the value types every
//! other module passes around.

pub mod entity;
pub mod spell;
pub mod rng;
pub mod error;

pub use entity::{BattleHex, BattleSide, CreatureId, UnitId, FIELD_HEIGHT, FIELD_WIDTH};
pub use spell::{AimType, Mode, SpellId, SpellLevel};
pub use rng::{BattleRng, BattleRngState};
pub use error::{ConfigError, PacketError};
