//! Battle collaborators consumed by spell effects.
//!
//! - [`Unit`]: a creature stack on the field
//! - [`BattleInfo`] / [`BattleState`]: read-only queries and the concrete store
//! - [`BattleCommand`]: the mutations effects emit
//! - [`PacketSender`] / [`BattleMutator`]: networked and local command sinks

mod unit;
mod state;
mod command;

pub use unit::{HealLevel, StatusId, TimedStatus, Unit};
pub use state::{BattleInfo, BattleState};
pub use command::{BattleCommand, BattleMutator, BattlePacket, PacketLog, PacketSender};
