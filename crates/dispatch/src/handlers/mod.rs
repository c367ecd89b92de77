//! Reaction handlers, one per intercepted opcode.
//!
//! Each handler decodes the fields it needs from its own copy of the master's
//! message, applies its fan-out policy to the registry, and returns how many
//! bots it acted on. An `Err` aborts the rest of that one message only.

pub mod emote;
pub mod gossip;
pub mod loot;
pub mod quest;
pub mod session;
pub mod taxi;
pub mod vendor;

use botswarm_config::SwarmConfig;
use botswarm_core::{Host, SwarmError, WorldPacket};

use crate::manager::BotManager;
use crate::registry::BotRegistry;
use crate::roll::RollSource;

/// Signature every reaction handler implements.
pub type Handler = fn(&mut HandlerContext<'_>, &mut WorldPacket) -> Result<usize, SwarmError>;

/// Everything a handler may touch while processing one message.
pub struct HandlerContext<'a> {
    pub manager: &'a mut BotManager,
    pub rolls: &'a mut dyn RollSource,
}

impl<'a> HandlerContext<'a> {
    pub fn new(manager: &'a mut BotManager, rolls: &'a mut dyn RollSource) -> Self {
        Self { manager, rolls }
    }

    /// Registry plus the read-only host and config.
    pub fn split(&mut self) -> (&mut BotRegistry, &Host, &SwarmConfig) {
        self.manager.split()
    }
}

/// Build an `Unresolvable` error for a world lookup that came back empty.
///
/// With `debug_whisper` on, every live bot first tells the master what it
/// could not find.
pub(crate) fn unresolvable(
    registry: &mut BotRegistry,
    config: &SwarmConfig,
    what: &str,
    id: impl std::fmt::Display,
) -> SwarmError {
    if config.debug_whisper {
        let text = format!("I can't find {what} {id}.");
        for bot in registry.live_mut() {
            bot.controller_mut().tell_master(&text);
        }
    }
    SwarmError::Unresolvable(format!("{what} {id}"))
}
