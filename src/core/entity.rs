//! Battle entity identification and battlefield geometry.
//!
//! ## ID Types
//!
//! - `UnitId`: a stack of creatures present on the battlefield
//! - `CreatureId`: the creature kind a unit is made of
//! - `BattleSide`: which side of the battle a unit fights for
//!
//! ## Battlefield Layout
//!
//! The battlefield is a hex grid of `FIELD_WIDTH` × `FIELD_HEIGHT` hexes
//! with even rows shifted right by half a hex. Hexes are addressed by a
//! single index `x + y * FIELD_WIDTH`.
//!
//! ```
//! use spell_engine::core::BattleHex;
//!
//! let a = BattleHex::from_xy(2, 2).unwrap();
//! let b = BattleHex::from_xy(5, 2).unwrap();
//!
//! assert_eq!(a.distance(b), 3);
//! assert!(!BattleHex::INVALID.is_valid());
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a unit on the battlefield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    /// Create a new unit ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for UnitId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unit({})", self.0)
    }
}

/// Identifier of a creature kind. Opaque to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CreatureId(pub u16);

impl CreatureId {
    /// Create a new creature ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CreatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Creature({})", self.0)
    }
}

/// Side of the battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BattleSide {
    /// Left side, deploys from column 1.
    Attacker,
    /// Right side, deploys from the last playable column.
    Defender,
}

impl BattleSide {
    /// The opposing side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Attacker => Self::Defender,
            Self::Defender => Self::Attacker,
        }
    }
}

/// Width of the battlefield in hexes.
pub const FIELD_WIDTH: i16 = 17;

/// Height of the battlefield in hexes.
pub const FIELD_HEIGHT: i16 = 11;

/// A hex on the battlefield.
///
/// Columns 0 and `FIELD_WIDTH - 1` exist but are not playable: units never
/// stand there. Use `is_playable` to check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BattleHex(pub i16);

impl BattleHex {
    /// Sentinel for "no hex".
    pub const INVALID: Self = Self(-1);

    /// Create a hex from column/row coordinates.
    ///
    /// Returns `None` if the coordinates are off the field.
    #[must_use]
    pub const fn from_xy(x: i16, y: i16) -> Option<Self> {
        if x < 0 || y < 0 || x >= FIELD_WIDTH || y >= FIELD_HEIGHT {
            None
        } else {
            Some(Self(x + y * FIELD_WIDTH))
        }
    }

    /// Column of this hex.
    #[must_use]
    pub const fn x(self) -> i16 {
        self.0 % FIELD_WIDTH
    }

    /// Row of this hex.
    #[must_use]
    pub const fn y(self) -> i16 {
        self.0 / FIELD_WIDTH
    }

    /// Check if the hex lies on the field.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 >= 0 && self.0 < FIELD_WIDTH * FIELD_HEIGHT
    }

    /// Check if a unit may stand on this hex.
    #[must_use]
    pub const fn is_playable(self) -> bool {
        self.is_valid() && self.x() > 0 && self.x() < FIELD_WIDTH - 1
    }

    /// Hex distance between two hexes.
    ///
    /// Rows are offset by half a hex, so columns are first mapped to a
    /// skewed axis before taking the hex-grid metric.
    #[must_use]
    pub fn distance(self, other: Self) -> i16 {
        let (y1, y2) = (self.y(), other.y());
        let x1 = self.x() + y1 / 2;
        let x2 = other.x() + y2 / 2;

        let dx = x2 - x1;
        let dy = y2 - y1;

        if (dx >= 0 && dy >= 0) || (dx < 0 && dy < 0) {
            dx.abs().max(dy.abs())
        } else {
            dx.abs() + dy.abs()
        }
    }
}

impl std::fmt::Display for BattleHex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "Hex({}, {})", self.x(), self.y())
        } else {
            write!(f, "Hex(invalid)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_coordinates() {
        let hex = BattleHex::from_xy(3, 4).unwrap();
        assert_eq!(hex.0, 3 + 4 * FIELD_WIDTH);
        assert_eq!(hex.x(), 3);
        assert_eq!(hex.y(), 4);
    }

    #[test]
    fn test_hex_out_of_range() {
        assert!(BattleHex::from_xy(-1, 0).is_none());
        assert!(BattleHex::from_xy(FIELD_WIDTH, 0).is_none());
        assert!(BattleHex::from_xy(0, FIELD_HEIGHT).is_none());
        assert!(!BattleHex::INVALID.is_valid());
    }

    #[test]
    fn test_playable_columns() {
        assert!(!BattleHex::from_xy(0, 5).unwrap().is_playable());
        assert!(BattleHex::from_xy(1, 5).unwrap().is_playable());
        assert!(!BattleHex::from_xy(FIELD_WIDTH - 1, 5).unwrap().is_playable());
    }

    #[test]
    fn test_distance_same_row() {
        let a = BattleHex::from_xy(2, 3).unwrap();
        let b = BattleHex::from_xy(7, 3).unwrap();
        assert_eq!(a.distance(b), 5);
        assert_eq!(b.distance(a), 5);
        assert_eq!(a.distance(a), 0);
    }

    #[test]
    fn test_distance_neighbours() {
        // Even row 2: neighbours below are (x, 3) and (x+1, 3)
        let center = BattleHex::from_xy(5, 2).unwrap();
        assert_eq!(center.distance(BattleHex::from_xy(5, 3).unwrap()), 1);
        assert_eq!(center.distance(BattleHex::from_xy(6, 3).unwrap()), 1);
        assert_eq!(center.distance(BattleHex::from_xy(4, 3).unwrap()), 2);

        // Odd row 3: neighbours below are (x-1, 4) and (x, 4)
        let center = BattleHex::from_xy(5, 3).unwrap();
        assert_eq!(center.distance(BattleHex::from_xy(4, 4).unwrap()), 1);
        assert_eq!(center.distance(BattleHex::from_xy(5, 4).unwrap()), 1);
    }

    #[test]
    fn test_distance_vertical() {
        let a = BattleHex::from_xy(5, 0).unwrap();
        let b = BattleHex::from_xy(5, 4).unwrap();
        assert_eq!(a.distance(b), 4);
    }

    #[test]
    fn test_opponent_side() {
        assert_eq!(BattleSide::Attacker.opponent(), BattleSide::Defender);
        assert_eq!(BattleSide::Defender.opponent(), BattleSide::Attacker);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", UnitId(7)), "Unit(7)");
        assert_eq!(format!("{}", BattleHex::from_xy(1, 2).unwrap()), "Hex(1, 2)");
    }

    #[test]
    fn test_serialization() {
        let id = UnitId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: UnitId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
