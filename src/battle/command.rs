//! Battle mutations and the two channels that carry them.
//!
//! Effects never touch battle state directly. They describe their outcome
//! as a list of `BattleCommand`s, which then travel either:
//!
//! - through a `PacketSender`, wrapped in a `BattlePacket`, when every
//!   participant of a networked battle must apply the same change, or
//! - straight into a `BattleMutator` for local prediction and lookahead.

use serde::{Deserialize, Serialize};

use crate::core::{BattleHex, BattleSide, CreatureId, PacketError, SpellId, UnitId};

use super::unit::{HealLevel, StatusId};

/// A single battle mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleCommand {
    /// Remove hit points from a unit.
    Damage { unit: UnitId, amount: i64 },

    /// Restore hit points to a unit.
    Heal {
        unit: UnitId,
        amount: i64,
        level: HealLevel,
    },

    /// Bring a new unit into the battle.
    Summon {
        creature: CreatureId,
        side: BattleSide,
        amount: i32,
        health: i32,
        position: BattleHex,
        permanent: bool,
    },

    /// Apply a timed status.
    AddStatus {
        unit: UnitId,
        status: StatusId,
        duration: i32,
        cumulative: bool,
    },

    /// Remove statuses. An empty list removes all of them.
    RemoveStatuses {
        unit: UnitId,
        statuses: Vec<StatusId>,
    },
}

/// Accepts mutations applied immediately to local battle state.
pub trait BattleMutator {
    fn apply_command(&mut self, command: &BattleCommand);
}

/// The commands one effect produced for one cast.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattlePacket {
    pub spell: SpellId,
    /// Name of the effect within its bundle.
    pub effect: String,
    pub commands: Vec<BattleCommand>,
}

impl BattlePacket {
    /// Create a packet.
    pub fn new(spell: SpellId, effect: impl Into<String>, commands: Vec<BattleCommand>) -> Self {
        Self {
            spell,
            effect: effect.into(),
            commands,
        }
    }

    /// Encode for the wire.
    pub fn encode(&self) -> Result<Vec<u8>, PacketError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from the wire.
    pub fn decode(bytes: &[u8]) -> Result<Self, PacketError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Apply every command to local state, in order.
    pub fn apply_to(&self, mutator: &mut dyn BattleMutator) {
        for command in &self.commands {
            mutator.apply_command(command);
        }
    }
}

/// Networked command channel.
///
/// Implementations broadcast the packet to all participants and apply it
/// on the authoritative state.
pub trait PacketSender {
    fn send_and_apply(&mut self, packet: BattlePacket);
}

/// A `PacketSender` that records every packet in order.
///
/// Record-only: `send_and_apply` stores the packet and changes no battle
/// state. Apply the recorded packets with `replay`; replaying onto a copy of
/// the starting state reproduces the battle exactly.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PacketLog {
    packets: Vec<BattlePacket>,
}

impl PacketLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded packets, oldest first.
    #[must_use]
    pub fn packets(&self) -> &[BattlePacket] {
        &self.packets
    }

    /// All recorded commands, flattened across packets.
    pub fn commands(&self) -> impl Iterator<Item = &BattleCommand> {
        self.packets.iter().flat_map(|p| p.commands.iter())
    }

    /// Apply every recorded packet to `mutator`.
    pub fn replay(&self, mutator: &mut dyn BattleMutator) {
        for packet in &self.packets {
            packet.apply_to(mutator);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }
}

impl PacketSender for PacketLog {
    fn send_and_apply(&mut self, packet: BattlePacket) {
        self.packets.push(packet);
    }
}
