//! # BotSwarm Core
//!
//! Domain types, wire decoding, traits, and error definitions for the
//! master-packet interception dispatcher. This crate has **no host
//! dependencies**: the game world, sessions, groups and bot AI are all
//! reached through the traits in [`agent`] and [`host`].
//!
//! ## Design Philosophy
//!
//! Every collaborator owned by the game server is a trait here. The
//! dispatcher crate implements its decision procedures against these traits,
//! which means:
//! - The server plugs in its real player/session/group objects
//! - Tests plug in recording fakes
//! - The dependency graph points inward on core

pub mod agent;
pub mod error;
pub mod guid;
pub mod host;
pub mod opcode;
pub mod packet;
pub mod world;

// Re-export key types at crate root for ergonomics
pub use agent::{BotController, BotPlayer, BotSettings, FlightPath};
pub use error::{Ineligibility, PacketError, Result, SwarmError};
pub use guid::ObjectGuid;
pub use host::{ControllerFactory, GroupService, Host, MasterView, SessionProvider, WorldQuery};
pub use opcode::Opcode;
pub use packet::{PacketBuilder, WorldPacket};
pub use world::{
    GameObjectInfo, GameObjectType, GossipMenuItem, GossipOption, GroupId, MovementOrder,
    NpcInfo, Position, QuestStatus, QuestTemplate, RemoveMethod, RollVote, TaxiNode,
    TaxiPathNode, Team, TextEmote, WorldObjectInfo,
};
