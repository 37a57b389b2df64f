//! Spell identity and cast classification.
//!
//! - `SpellId`: opaque spell identity, with a few well-known constants
//! - `SpellLevel`: validated mastery tier a spell is cast at
//! - `Mode`: what triggered the cast
//! - `AimType`: what kind of aim point a spell expects

use serde::{Deserialize, Serialize};

/// Spell identifier.
///
/// The engine only interprets the ids that appear in prepare override
/// tables. Everything else is opaque.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpellId(pub u16);

impl SpellId {
    pub const MAGIC_ARROW: Self = Self(15);
    pub const LIGHTNING_BOLT: Self = Self(17);
    pub const CHAIN_LIGHTNING: Self = Self(19);
    pub const DISPEL: Self = Self(35);
    pub const CURE: Self = Self(37);
    pub const RESURRECTION: Self = Self(38);
    pub const ANIMATE_DEAD: Self = Self(39);

    /// Create a new spell ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for SpellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Spell({})", self.0)
    }
}

/// Mastery tier a spell is cast at.
///
/// Only `0..SpellLevel::COUNT` can be constructed, so per-level storage can
/// be a fixed array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SpellLevel(u8);

impl SpellLevel {
    /// Number of distinct levels.
    pub const COUNT: usize = 4;

    pub const NONE: Self = Self(0);
    pub const BASIC: Self = Self(1);
    pub const ADVANCED: Self = Self(2);
    pub const EXPERT: Self = Self(3);

    /// Configuration keys for each level, indexed by level.
    pub const NAMES: [&'static str; Self::COUNT] = ["none", "basic", "advanced", "expert"];

    /// Create a level, returning `None` if out of range.
    #[must_use]
    pub const fn new(level: u8) -> Option<Self> {
        if (level as usize) < Self::COUNT {
            Some(Self(level))
        } else {
            None
        }
    }

    /// Look up a level by its configuration key.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .position(|n| *n == name)
            .map(|idx| Self(idx as u8))
    }

    /// Index into per-level storage.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Configuration key of this level.
    #[must_use]
    pub const fn name(self) -> &'static str {
        Self::NAMES[self.0 as usize]
    }

    /// Iterate over all levels, lowest first.
    pub fn all() -> impl Iterator<Item = SpellLevel> {
        (0..Self::COUNT as u8).map(SpellLevel)
    }
}

impl TryFrom<u8> for SpellLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level).ok_or_else(|| format!("spell level {level} out of range"))
    }
}

impl From<SpellLevel> for u8 {
    fn from(level: SpellLevel) -> Self {
        level.0
    }
}

impl std::fmt::Display for SpellLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What triggered a cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Player-directed cast from a hero's spellbook.
    Hero,
    /// Redirected by a magic mirror.
    MagicMirror,
    /// Activated ability of a creature.
    CreatureActive,
    /// Start-of-turn cast by an enchanter creature.
    Enchanter,
    /// Cast as a side effect of an attack.
    SpellLikeAttack,
    /// Passive, condition-triggered cast.
    Passive,
}

impl Mode {
    /// Whether a player directed this cast by hand.
    #[must_use]
    pub const fn is_player_directed(self) -> bool {
        matches!(self, Self::Hero)
    }
}

/// Kind of aim point a spell expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AimType {
    /// Cast without choosing anything.
    NoTarget,
    /// Aimed at a unit.
    Creature,
    /// Aimed at an obstacle.
    Obstacle,
    /// Aimed at a hex.
    Location,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_range() {
        assert_eq!(SpellLevel::new(0), Some(SpellLevel::NONE));
        assert_eq!(SpellLevel::new(3), Some(SpellLevel::EXPERT));
        assert_eq!(SpellLevel::new(4), None);
    }

    #[test]
    fn test_level_names() {
        assert_eq!(SpellLevel::from_name("advanced"), Some(SpellLevel::ADVANCED));
        assert_eq!(SpellLevel::from_name("grandmaster"), None);
        assert_eq!(SpellLevel::BASIC.name(), "basic");
        assert_eq!(SpellLevel::all().count(), SpellLevel::COUNT);
    }

    #[test]
    fn test_level_serde_rejects_out_of_range() {
        let level: SpellLevel = serde_json::from_str("2").unwrap();
        assert_eq!(level, SpellLevel::ADVANCED);
        assert!(serde_json::from_str::<SpellLevel>("9").is_err());
    }

    #[test]
    fn test_aim_type_serde() {
        let aim: AimType = serde_json::from_str("\"NO_TARGET\"").unwrap();
        assert_eq!(aim, AimType::NoTarget);
        assert_eq!(serde_json::to_string(&AimType::Creature).unwrap(), "\"CREATURE\"");
    }

    #[test]
    fn test_mode_player_directed() {
        assert!(Mode::Hero.is_player_directed());
        assert!(!Mode::CreatureActive.is_player_directed());
        assert!(!Mode::Passive.is_player_directed());
    }
}
