//! # spell-engine
//!
//! Battle spell effects for a hex-grid tactical combat engine.
//!
//! ## Design Principles
//!
//! 1. **Data-Driven**: Spells are JSON. Each mastery level holds a set of
//!    named effects whose types are resolved through an `EffectRegistry`.
//!
//! 2. **Capabilities Over Hierarchies**: An effect is a small set of traits
//!    (target transform, applicability, application). Shared unit targeting
//!    is a trait with default methods, not a base class.
//!
//! 3. **One Source of Truth for Outcomes**: Effects describe their outcome
//!    as `BattleCommand`s. The networked path packs them into packets, the
//!    local path applies them directly, so both always agree.
//!
//! ## Architecture
//!
//! - **Deterministic**: All randomness comes from a seeded `BattleRng`, and
//!   effects within a level are visited in name order.
//!
//! - **Persistent Data Structures**: `BattleState` clones in O(1) via
//!   `im-rs`, for lookahead and for casting onto a snapshot.
//!
//! - **Lenient Loading**: Bad effect entries are logged and skipped. The
//!   returned `LoadReport` lets callers opt into strict validation.
//!
//! ## Modules
//!
//! - `core`: Identifiers, hex geometry, spell levels, modes, RNG, errors
//! - `battle`: Units, battle state, commands and packets
//! - `spells`: Cast context, targets, definitions, cast orchestration
//! - `effects`: Effect traits, registry, bundles and built-in effects

pub mod core;
pub mod battle;
pub mod spells;
pub mod effects;

// Re-export commonly used types
pub use crate::core::{
    AimType, BattleHex, BattleRng, BattleRngState, BattleSide, ConfigError, CreatureId, Mode,
    PacketError, SpellId, SpellLevel, UnitId,
};

pub use crate::battle::{
    BattleCommand, BattleInfo, BattleMutator, BattlePacket, BattleState, HealLevel, PacketLog,
    PacketSender, StatusId, Unit,
};

pub use crate::spells::{
    cast, cast_local, CastMechanics, Destination, EffectTarget, Mechanics, Problem, Severity,
    SpellCatalog, SpellDefinition, Target,
};

pub use crate::effects::{
    Applicability, Application, Effect, EffectBundle, EffectCore, EffectRegistry, EffectType,
    EffectsToApply, LoadReport, PrepareOverrides, TargetTransform, UnitSelector,
};
