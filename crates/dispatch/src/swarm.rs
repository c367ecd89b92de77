//! The per-master entry point the host talks to.

use botswarm_config::SwarmConfig;
use botswarm_core::{Host, ObjectGuid, SwarmError, WorldPacket};

use crate::dispatcher::{DispatchOutcome, PacketDispatcher};
use crate::handlers::HandlerContext;
use crate::manager::BotManager;
use crate::registry::AgentHandle;
use crate::roll::{RandomRolls, RollSource};

/// All bots of one master plus the machinery that mirrors the master's
/// actions onto them.
///
/// Lives exactly as long as the master's session. Dropping it logs every bot
/// out.
pub struct BotSwarm {
    manager: BotManager,
    dispatcher: PacketDispatcher,
    rolls: Box<dyn RollSource>,
}

impl BotSwarm {
    pub fn new(host: Host, config: &SwarmConfig) -> Self {
        Self::with_roll_source(host, config, Box::new(RandomRolls::new()))
    }

    /// Like [`BotSwarm::new`] with a caller-supplied source for loot votes.
    pub fn with_roll_source(host: Host, config: &SwarmConfig, rolls: Box<dyn RollSource>) -> Self {
        Self {
            manager: BotManager::new(host, config),
            dispatcher: PacketDispatcher::with_default_handlers(),
            rolls,
        }
    }

    pub fn add_bot(&mut self, guid: ObjectGuid) -> Result<(), SwarmError> {
        self.manager.add_bot(guid)
    }

    pub fn remove_bot(&mut self, guid: ObjectGuid) -> Result<(), SwarmError> {
        self.manager.remove_bot(guid)
    }

    /// Log out every bot. Returns how many there were.
    pub fn remove_all(&mut self) -> usize {
        self.manager.remove_all()
    }

    pub fn get_bot(&self, guid: ObjectGuid) -> Option<&AgentHandle> {
        self.manager.get_bot(guid)
    }

    pub fn stay(&mut self) -> usize {
        self.manager.stay()
    }

    pub fn bot_count(&self) -> usize {
        self.manager.registry().len()
    }

    pub fn manager(&self) -> &BotManager {
        &self.manager
    }

    pub fn dispatcher(&self) -> &PacketDispatcher {
        &self.dispatcher
    }

    /// Mirror one intercepted master message onto the bots.
    pub fn handle_master_packet(&mut self, packet: &WorldPacket) -> DispatchOutcome {
        let mut ctx = HandlerContext::new(&mut self.manager, &mut *self.rolls);
        self.dispatcher.dispatch(&mut ctx, packet)
    }
}

impl Drop for BotSwarm {
    fn drop(&mut self) {
        self.manager.remove_all();
    }
}
