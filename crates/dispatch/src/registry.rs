//! Bot registry: the set of bots one master currently controls.
//!
//! Entries are inserted and removed only by [`BotManager`](crate::BotManager);
//! handlers get read access and mutable access to existing entries.

use std::collections::HashMap;

use botswarm_core::{BotController, BotPlayer, ObjectGuid};
use tracing::warn;

/// One managed bot: its live player/session and the controller attached to it.
///
/// Both halves are created together at login and destroyed together at
/// logout, so a controller can never outlive its session or the reverse.
pub struct AgentHandle {
    guid: ObjectGuid,
    player: Box<dyn BotPlayer>,
    controller: Box<dyn BotController>,
}

impl AgentHandle {
    pub(crate) fn new(player: Box<dyn BotPlayer>, controller: Box<dyn BotController>) -> Self {
        Self {
            guid: player.guid(),
            player,
            controller,
        }
    }

    pub fn guid(&self) -> ObjectGuid {
        self.guid
    }

    pub fn name(&self) -> &str {
        self.player.name()
    }

    /// Whether the underlying character is still in the world.
    pub fn is_live(&self) -> bool {
        self.player.is_in_world()
    }

    pub fn player(&self) -> &dyn BotPlayer {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> &mut dyn BotPlayer {
        self.player.as_mut()
    }

    pub fn controller(&self) -> &dyn BotController {
        self.controller.as_ref()
    }

    pub fn controller_mut(&mut self) -> &mut dyn BotController {
        self.controller.as_mut()
    }

    /// Borrow player and controller at the same time.
    pub fn split_mut(&mut self) -> (&mut dyn BotPlayer, &mut dyn BotController) {
        (self.player.as_mut(), self.controller.as_mut())
    }

    pub(crate) fn into_parts(self) -> (Box<dyn BotPlayer>, Box<dyn BotController>) {
        (self.player, self.controller)
    }
}

impl std::fmt::Debug for AgentHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentHandle")
            .field("guid", &self.guid)
            .field("name", &self.player.name())
            .finish()
    }
}

/// Central registry holding all managed bots, keyed by guid.
#[derive(Debug, Default)]
pub struct BotRegistry {
    bots: HashMap<ObjectGuid, AgentHandle>,
}

impl BotRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            bots: HashMap::new(),
        }
    }

    /// Insert `handle`, or hand it back if its guid is already registered.
    pub(crate) fn insert(&mut self, handle: AgentHandle) -> Result<(), AgentHandle> {
        let guid = handle.guid();
        if self.bots.contains_key(&guid) {
            return Err(handle);
        }
        self.bots.insert(guid, handle);
        Ok(())
    }

    pub(crate) fn remove(&mut self, guid: ObjectGuid) -> Option<AgentHandle> {
        self.bots.remove(&guid)
    }

    /// Get a bot by guid.
    pub fn get(&self, guid: ObjectGuid) -> Option<&AgentHandle> {
        self.bots.get(&guid)
    }

    pub fn get_mut(&mut self, guid: ObjectGuid) -> Option<&mut AgentHandle> {
        self.bots.get_mut(&guid)
    }

    /// A bot by guid, only if its character is still in the world.
    pub fn get_live_mut(&mut self, guid: ObjectGuid) -> Option<&mut AgentHandle> {
        self.bots.get_mut(&guid).filter(|bot| bot.is_live())
    }

    pub fn contains(&self, guid: ObjectGuid) -> bool {
        self.bots.contains_key(&guid)
    }

    /// Snapshot of all registered guids.
    pub fn guids(&self) -> Vec<ObjectGuid> {
        self.bots.keys().copied().collect()
    }

    /// Number of registered bots.
    pub fn len(&self) -> usize {
        self.bots.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgentHandle> {
        self.bots.values()
    }

    /// Every bot whose character is still in the world.
    ///
    /// Dead handles are logged and skipped; they never stop the iteration.
    pub fn live_mut(&mut self) -> impl Iterator<Item = &mut AgentHandle> {
        self.bots.values_mut().filter(|bot| {
            let live = bot.is_live();
            if !live {
                warn!(bot = %bot.guid(), "Skipping bot that is no longer in world");
            }
            live
        })
    }
}
