//! Battle units.
//!
//! A unit is a stack of identical creatures standing on one hex. Health is
//! tracked as a creature count plus the remaining hit points of the top
//! creature, so damage kills whole creatures before touching the next one.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{BattleHex, BattleSide, CreatureId, UnitId};

/// Identifier of a timed status (slow, bless, ...). Opaque to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StatusId(pub u16);

impl StatusId {
    /// Create a new status ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }
}

/// A status applied to a unit for a number of turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedStatus {
    pub id: StatusId,
    pub turns_left: i32,
}

/// How far a heal may go.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HealLevel {
    /// Restore hit points of the top creature only.
    #[default]
    Heal,
    /// Bring dead creatures back, up to the starting count.
    Resurrect,
    /// Bring creatures back without a cap.
    OverHeal,
}

impl HealLevel {
    /// Whether this level can revive dead creatures.
    #[must_use]
    pub const fn revives(self) -> bool {
        !matches!(self, Self::Heal)
    }
}

/// A unit on the battlefield.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub creature: CreatureId,
    pub side: BattleSide,
    pub position: BattleHex,

    /// Living creatures in the stack.
    pub count: i32,
    /// Hit points of the top creature.
    pub first_hp_left: i32,
    /// Hit points of one healthy creature.
    pub max_health: i32,
    /// Creatures in the stack when it entered the battle.
    pub base_amount: i32,

    /// Removed from play but kept for bookkeeping.
    pub ghost: bool,
    /// Immobile war machine; never a spell target.
    pub turret: bool,
    /// Created by a spell.
    pub summoned: bool,
    /// Stays with the army after the battle.
    pub permanent: bool,

    pub statuses: SmallVec<[TimedStatus; 4]>,
}

impl Unit {
    /// Create a healthy unit.
    pub fn new(
        id: UnitId,
        creature: CreatureId,
        side: BattleSide,
        position: BattleHex,
        count: i32,
        max_health: i32,
    ) -> Self {
        Self {
            id,
            creature,
            side,
            position,
            count,
            first_hp_left: if count > 0 { max_health } else { 0 },
            max_health,
            base_amount: count,
            ghost: false,
            turret: false,
            summoned: false,
            permanent: false,
            statuses: SmallVec::new(),
        }
    }

    /// Mark as a turret (builder pattern).
    #[must_use]
    pub fn turret(mut self) -> Self {
        self.turret = true;
        self
    }

    /// Mark as summoned (builder pattern).
    #[must_use]
    pub fn summoned(mut self) -> Self {
        self.summoned = true;
        self
    }

    /// Mark as staying after the battle (builder pattern).
    #[must_use]
    pub fn permanent(mut self) -> Self {
        self.permanent = true;
        self
    }

    /// Add a status (builder pattern).
    #[must_use]
    pub fn with_status(mut self, id: StatusId, turns: i32) -> Self {
        self.statuses.push(TimedStatus { id, turns_left: turns });
        self
    }

    #[must_use]
    pub fn alive(&self) -> bool {
        self.count > 0 && !self.ghost
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        !self.alive() && !self.ghost
    }

    /// Whether the unit can be the object of a spell effect.
    ///
    /// Turrets and ghosts never are. Dead units only when `allow_dead`.
    #[must_use]
    pub fn is_valid_target(&self, allow_dead: bool) -> bool {
        (self.alive() || (allow_dead && self.is_dead()))
            && self.position.is_valid()
            && !self.turret
    }

    /// Current hit points of the whole stack.
    #[must_use]
    pub fn available_health(&self) -> i64 {
        if self.count <= 0 {
            0
        } else {
            i64::from(self.count - 1) * i64::from(self.max_health) + i64::from(self.first_hp_left)
        }
    }

    /// Hit points of the stack at full strength.
    #[must_use]
    pub fn total_health(&self) -> i64 {
        i64::from(self.base_amount) * i64::from(self.max_health)
    }

    /// Hit points a heal of the given level could restore.
    #[must_use]
    pub fn missing_health(&self, level: HealLevel) -> i64 {
        match level {
            HealLevel::Heal if self.alive() => {
                i64::from(self.max_health - self.first_hp_left)
            }
            HealLevel::Heal => 0,
            HealLevel::Resurrect | HealLevel::OverHeal => {
                (self.total_health() - self.available_health()).max(0)
            }
        }
    }

    /// Whether the stack is below full strength.
    #[must_use]
    pub fn is_damaged(&self) -> bool {
        self.available_health() < self.total_health()
    }

    #[must_use]
    pub fn has_status(&self, id: StatusId) -> bool {
        self.statuses.iter().any(|s| s.id == id)
    }

    /// Apply damage, returning the number of creatures killed.
    pub fn take_damage(&mut self, amount: i64) -> i32 {
        let before = self.count;
        let remaining = self.available_health() - amount.max(0);
        self.set_health(remaining);
        before - self.count
    }

    /// Restore hit points, returning the number of creatures revived.
    pub fn heal(&mut self, amount: i64, level: HealLevel) -> i32 {
        let before = self.count;
        let amount = amount.max(0);
        match level {
            HealLevel::Heal => {
                if self.alive() {
                    let top = i64::from(self.first_hp_left) + amount;
                    self.first_hp_left = top.min(i64::from(self.max_health)) as i32;
                }
            }
            HealLevel::Resurrect => {
                let target = (self.available_health() + amount).min(self.total_health());
                self.set_health(target);
            }
            HealLevel::OverHeal => {
                let target = self.available_health() + amount;
                self.set_health(target);
            }
        }
        self.count - before
    }

    fn set_health(&mut self, health: i64) {
        let max = i64::from(self.max_health.max(1));
        if health <= 0 {
            self.count = 0;
            self.first_hp_left = 0;
        } else {
            let count = (health + max - 1) / max;
            self.count = count as i32;
            self.first_hp_left = (health - (count - 1) * max) as i32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(count: i32, max_health: i32) -> Unit {
        Unit::new(
            UnitId(1),
            CreatureId(5),
            BattleSide::Attacker,
            BattleHex::from_xy(3, 3).unwrap(),
            count,
            max_health,
        )
    }

    #[test]
    fn test_new_unit_health() {
        let u = unit(10, 5);
        assert!(u.alive());
        assert_eq!(u.available_health(), 50);
        assert_eq!(u.total_health(), 50);
    }

    #[test]
    fn test_damage_kills_whole_creatures() {
        let mut u = unit(10, 5);
        let killed = u.take_damage(12);
        assert_eq!(killed, 2);
        assert_eq!(u.count, 8);
        assert_eq!(u.first_hp_left, 3);
        assert_eq!(u.available_health(), 38);
    }

    #[test]
    fn test_overkill() {
        let mut u = unit(2, 5);
        assert_eq!(u.take_damage(100), 2);
        assert!(u.is_dead());
        assert_eq!(u.available_health(), 0);
    }

    #[test]
    fn test_heal_only_tops_first_creature() {
        let mut u = unit(10, 5);
        u.take_damage(12);
        let revived = u.heal(100, HealLevel::Heal);
        assert_eq!(revived, 0);
        assert_eq!(u.count, 8);
        assert_eq!(u.first_hp_left, 5);
    }

    #[test]
    fn test_resurrect_caps_at_base_amount() {
        let mut u = unit(10, 5);
        u.take_damage(100);
        assert!(u.is_dead());

        let revived = u.heal(1000, HealLevel::Resurrect);
        assert_eq!(revived, 10);
        assert_eq!(u.available_health(), 50);
    }

    #[test]
    fn test_overheal_exceeds_base_amount() {
        let mut u = unit(2, 5);
        u.heal(10, HealLevel::OverHeal);
        assert_eq!(u.count, 4);
    }

    #[test]
    fn test_valid_target() {
        let mut u = unit(1, 5);
        assert!(u.is_valid_target(false));

        u.take_damage(5);
        assert!(!u.is_valid_target(false));
        assert!(u.is_valid_target(true));

        let t = unit(1, 5).turret();
        assert!(!t.is_valid_target(true));

        let mut g = unit(1, 5);
        g.ghost = true;
        assert!(!g.is_dead());
        assert!(!g.is_valid_target(true));
    }

    #[test]
    fn test_missing_health() {
        let mut u = unit(3, 10);
        assert_eq!(u.missing_health(HealLevel::Heal), 0);
        assert!(!u.is_damaged());

        u.take_damage(14);
        assert!(u.is_damaged());
        assert_eq!(u.missing_health(HealLevel::Heal), 4);
        assert_eq!(u.missing_health(HealLevel::Resurrect), 14);
    }

    #[test]
    fn test_statuses() {
        let u = unit(1, 1).with_status(StatusId(4), 2);
        assert!(u.has_status(StatusId(4)));
        assert!(!u.has_status(StatusId(5)));
    }
}
