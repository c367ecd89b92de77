//! # BotSwarm Dispatch
//!
//! Intercepts every message a master's client sends and mirrors the
//! meaningful ones onto that master's bots.
//!
//! ```text
//! host ──▶ BotSwarm::handle_master_packet
//!            └─▶ PacketDispatcher (opcode → handler)
//!                  └─▶ handler walks the BotRegistry, drives each bot
//! ```
//!
//! Only [`BotManager`] inserts into or removes from the registry. Handlers
//! borrow it for the duration of one message. Everything runs on the thread
//! that delivered the message; there is no locking here.

pub mod dispatcher;
pub mod handlers;
pub mod manager;
pub mod registry;
pub mod roll;
pub mod swarm;
pub mod taxi;

#[cfg(test)]
mod test_helpers;

pub use dispatcher::{DispatchOutcome, PacketDispatcher};
pub use handlers::{Handler, HandlerContext};
pub use manager::BotManager;
pub use registry::{AgentHandle, BotRegistry};
pub use roll::{RandomRolls, RollSource, SeededRolls};
pub use swarm::BotSwarm;
pub use taxi::TaxiTransition;
