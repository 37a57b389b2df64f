//! Error types.
//!
//! Only configuration and packet encoding can fail. Cast legality is not an
//! error: it is reported through `Problem`.

use thiserror::Error;

use super::SpellId;

/// Errors raised while loading effect or spell configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{context}: expected a JSON object")]
    NotAnObject { context: String },

    #[error("{context}: expected a JSON array")]
    NotAnArray { context: String },

    #[error("effect '{effect}' has no type")]
    MissingType { effect: String },

    #[error("effect '{effect}' has unknown type '{effect_type}'")]
    UnknownType { effect: String, effect_type: String },

    #[error("effect '{effect}' has invalid configuration: {source}")]
    InvalidField {
        effect: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown spell level '{level}'")]
    UnknownLevel { level: String },

    #[error("invalid spell definition: {0}")]
    InvalidSpell(#[source] serde_json::Error),

    #[error("{id} is already registered")]
    DuplicateSpell { id: SpellId },
}

/// Errors raised while encoding or decoding battle packets.
#[derive(Debug, Error)]
pub enum PacketError {
    #[error("packet codec failed: {0}")]
    Codec(#[from] bincode::Error),
}
