//! Lifecycle manager: the only code path that creates or destroys bots.
//!
//! Login attaches a fresh controller and inserts the pair into the registry
//! in one step; logout detaches, removes and terminates in one step. Group
//! membership is reconciled on the way in and out so a managed bot is only
//! ever grouped with its master.

use botswarm_config::SwarmConfig;
use botswarm_core::{
    BotSettings, Host, ObjectGuid, RemoveMethod, SwarmError,
};
use tracing::{debug, info, warn};

use crate::registry::{AgentHandle, BotRegistry};

/// Owns the registry for one master and everything needed to fill it.
pub struct BotManager {
    registry: BotRegistry,
    host: Host,
    config: SwarmConfig,
    settings: BotSettings,
}

impl BotManager {
    pub fn new(host: Host, config: &SwarmConfig) -> Self {
        Self {
            registry: BotRegistry::new(),
            host,
            settings: config.bot_settings(),
            config: config.clone(),
        }
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    pub fn registry(&self) -> &BotRegistry {
        &self.registry
    }

    /// Mutable registry access plus the read-only context handlers need.
    pub(crate) fn split(&mut self) -> (&mut BotRegistry, &Host, &SwarmConfig) {
        (&mut self.registry, &self.host, &self.config)
    }

    pub fn get_bot(&self, guid: ObjectGuid) -> Option<&AgentHandle> {
        self.registry.get(guid)
    }

    /// Log in the character `guid` as a bot of this master.
    pub fn add_bot(&mut self, guid: ObjectGuid) -> Result<(), SwarmError> {
        if self.registry.contains(guid) {
            return Err(SwarmError::AlreadyPresent(guid));
        }

        let master = self.host.master_guid();
        if guid == master {
            return Err(SwarmError::Session("a master cannot control itself".into()));
        }

        if self.registry.len() >= self.config.max_bots as usize {
            return Err(SwarmError::LimitReached {
                max: self.config.max_bots,
            });
        }

        let player = self.host.sessions.login(guid)?;
        let controller = self
            .host
            .controllers
            .attach(player.as_ref(), master, &self.settings);
        let handle = AgentHandle::new(player, controller);
        let bot = handle.guid();
        if let Err(rejected) = self.registry.insert(handle) {
            warn!(requested = %guid, bot = %bot, "Login returned a bot that is already managed");
            self.release(rejected);
            return Err(SwarmError::AlreadyPresent(bot));
        }
        info!(bot = %bot, master = %master, "Bot logged in");

        self.leave_foreign_group(bot);
        self.reclaim_leadership();
        Ok(())
    }

    /// A freshly logged-in bot drops any group its master is not part of.
    fn leave_foreign_group(&self, bot: ObjectGuid) {
        let groups = &self.host.groups;
        let Some(theirs) = groups.group_of(bot) else {
            return;
        };

        let with_master = self
            .host
            .master_group()
            .is_some_and(|g| groups.is_member(g, bot));
        if !with_master {
            debug!(bot = %bot, "Bot leaves a group its master is not in");
            groups.remove_member(theirs, bot, RemoveMethod::Default);
        }
    }

    /// Hand leadership back to the master if one of our own bots holds it.
    ///
    /// Leadership taken by anyone outside the registry is left alone.
    fn reclaim_leadership(&self) {
        let groups = &self.host.groups;
        let master = self.host.master_guid();
        let Some(group) = self.host.master_group() else {
            return;
        };
        if groups.is_leader(group, master) {
            return;
        }

        if let Some(usurper) = self
            .registry
            .iter()
            .map(AgentHandle::guid)
            .find(|bot| groups.is_leader(group, *bot))
        {
            info!(bot = %usurper, master = %master, "Returning group leadership to master");
            groups.change_leader(group, master);
        }
    }

    /// Log a bot out and release it.
    pub fn remove_bot(&mut self, guid: ObjectGuid) -> Result<(), SwarmError> {
        let handle = self
            .registry
            .remove(guid)
            .ok_or(SwarmError::NotFound(guid))?;

        self.release(handle);
        info!(bot = %guid, "Bot logged out");
        Ok(())
    }

    /// Detach the controller, then terminate the session.
    fn release(&self, handle: AgentHandle) {
        let (player, mut controller) = handle.into_parts();
        controller.on_detach();
        drop(controller);
        self.host.sessions.logout(player);
    }

    /// Log out every bot, then make sure none is left in the master's group.
    ///
    /// Group cleanup runs only after the registry is empty and works from the
    /// snapshot of guids taken up front.
    pub fn remove_all(&mut self) -> usize {
        let bots = self.registry.guids();
        for guid in &bots {
            if let Some(handle) = self.registry.remove(*guid) {
                self.release(handle);
                info!(bot = %guid, "Bot logged out");
            }
        }
        self.remove_all_from_group(&bots);
        bots.len()
    }

    fn remove_all_from_group(&self, bots: &[ObjectGuid]) {
        let groups = &self.host.groups;
        let Some(group) = self.host.master_group() else {
            return;
        };
        for bot in bots {
            if groups.is_member(group, *bot) {
                groups.remove_member(group, *bot, RemoveMethod::Default);
            }
        }
    }

    /// Stop every bot where it stands.
    pub fn stay(&mut self) -> usize {
        let mut affected = 0;
        for bot in self.registry.live_mut() {
            bot.player_mut().clear_motion();
            affected += 1;
        }
        affected
    }
}
