//! Battle state: the units on the field.
//!
//! ## BattleInfo
//!
//! Read-only view used by effects while computing targets and legality.
//!
//! ## BattleState
//!
//! Concrete unit store. Uses `im` persistent maps so that cloning for
//! local lookahead is O(1): clone, apply speculative commands, discard.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::core::{BattleHex, BattleSide, CreatureId, UnitId, FIELD_HEIGHT, FIELD_WIDTH};

use super::command::{BattleCommand, BattleMutator};
use super::unit::{TimedStatus, Unit};

/// Read-only battle queries.
pub trait BattleInfo {
    /// All units, in id order, including dead ones.
    fn units(&self) -> Box<dyn Iterator<Item = &Unit> + '_>;

    /// Look up a unit by id.
    fn unit(&self, id: UnitId) -> Option<&Unit>;

    /// The unit standing on `hex`, if any.
    ///
    /// Living units take precedence over corpses on the same hex.
    fn unit_at(&self, hex: BattleHex) -> Option<&Unit> {
        let mut corpse = None;
        for unit in self.units().filter(|u| u.position == hex && !u.ghost) {
            if unit.alive() {
                return Some(unit);
            }
            corpse.get_or_insert(unit);
        }
        corpse
    }

    /// Whether a living unit occupies `hex`.
    fn is_occupied(&self, hex: BattleHex) -> bool {
        self.units().any(|u| u.alive() && u.position == hex)
    }

    /// First free playable hex on `side`'s deployment edge.
    ///
    /// Scans columns inward from the side's edge, top row first.
    fn free_hex(&self, side: BattleSide) -> Option<BattleHex> {
        let columns: Vec<i16> = match side {
            BattleSide::Attacker => (1..FIELD_WIDTH - 1).collect(),
            BattleSide::Defender => (1..FIELD_WIDTH - 1).rev().collect(),
        };
        columns
            .into_iter()
            .flat_map(|x| (0..FIELD_HEIGHT).filter_map(move |y| BattleHex::from_xy(x, y)))
            .find(|hex| !self.is_occupied(*hex))
    }
}

/// The units of one battle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleState {
    units: OrdMap<UnitId, Unit>,
    next_unit_id: u32,
}

impl BattleState {
    /// Create an empty battle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a unit, keeping its id.
    ///
    /// Replaces any unit with the same id.
    pub fn add_unit(&mut self, unit: Unit) {
        self.next_unit_id = self.next_unit_id.max(unit.id.0 + 1);
        self.units.insert(unit.id, unit);
    }

    /// Allocate a fresh unit id.
    pub fn allocate_id(&mut self) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        id
    }

    /// Mutable access to a unit.
    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    /// Number of units, including dead ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Summoned units of `side` that are still alive.
    pub fn summoned_creatures(&self, side: BattleSide) -> impl Iterator<Item = CreatureId> + '_ {
        self.units
            .values()
            .filter(move |u| u.side == side && u.summoned && u.alive())
            .map(|u| u.creature)
    }
}

impl BattleInfo for BattleState {
    fn units(&self) -> Box<dyn Iterator<Item = &Unit> + '_> {
        Box::new(self.units.values())
    }

    fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }
}

impl BattleMutator for BattleState {
    fn apply_command(&mut self, command: &BattleCommand) {
        match command {
            BattleCommand::Damage { unit, amount } => {
                if let Some(u) = self.units.get_mut(unit) {
                    u.take_damage(*amount);
                }
            }
            BattleCommand::Heal { unit, amount, level } => {
                if let Some(u) = self.units.get_mut(unit) {
                    u.heal(*amount, *level);
                }
            }
            BattleCommand::Summon {
                creature,
                side,
                amount,
                health,
                position,
                permanent,
            } => {
                let id = self.allocate_id();
                let mut unit = Unit::new(id, *creature, *side, *position, *amount, *health);
                unit.summoned = true;
                unit.permanent = *permanent;
                self.units.insert(id, unit);
            }
            BattleCommand::AddStatus {
                unit,
                status,
                duration,
                cumulative,
            } => {
                if let Some(u) = self.units.get_mut(unit) {
                    let existing = u.statuses.iter_mut().find(|s| s.id == *status);
                    match existing {
                        Some(s) if *cumulative => s.turns_left += *duration,
                        Some(s) => s.turns_left = s.turns_left.max(*duration),
                        None => u.statuses.push(TimedStatus {
                            id: *status,
                            turns_left: *duration,
                        }),
                    }
                }
            }
            BattleCommand::RemoveStatuses { unit, statuses } => {
                if let Some(u) = self.units.get_mut(unit) {
                    if statuses.is_empty() {
                        u.statuses.clear();
                    } else {
                        u.statuses.retain(|s| !statuses.contains(&s.id));
                    }
                }
            }
        }
    }
}
