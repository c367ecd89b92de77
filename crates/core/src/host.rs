//! Server-side collaborators shared by every bot of one master.
//!
//! The game server owns all of these. They take `&self` because the host
//! shares them with the rest of the world update; any mutation goes through
//! the host's own interior mutability.

use std::sync::Arc;

use crate::agent::{BotController, BotPlayer, BotSettings};
use crate::error::Result;
use crate::guid::ObjectGuid;
use crate::world::{
    GameObjectInfo, GossipMenuItem, GroupId, QuestTemplate, RemoveMethod, RollVote, TaxiNode,
    Team, WorldObjectInfo,
};

/// Character sessions: name resolution plus bot login/logout.
pub trait SessionProvider: Send + Sync {
    /// Log a persisted character in as a bot and return its live player.
    fn login(&self, guid: ObjectGuid) -> Result<Box<dyn BotPlayer>>;

    /// Terminate the bot's session and release it.
    fn logout(&self, player: Box<dyn BotPlayer>);

    fn name_of(&self, guid: ObjectGuid) -> Option<String>;

    fn guid_by_name(&self, name: &str) -> Option<ObjectGuid>;

    fn is_online(&self, guid: ObjectGuid) -> bool;
}

/// Creates behavior controllers for freshly logged-in bots.
pub trait ControllerFactory: Send + Sync {
    fn attach(
        &self,
        bot: &dyn BotPlayer,
        master: ObjectGuid,
        settings: &BotSettings,
    ) -> Box<dyn BotController>;
}

/// Static data and world object lookups, resolved from the master's map.
pub trait WorldQuery: Send + Sync {
    fn quest_template(&self, quest: u32) -> Option<QuestTemplate>;

    fn game_object(&self, guid: ObjectGuid) -> Option<GameObjectInfo>;

    /// A creature or game object.
    fn world_object(&self, guid: ObjectGuid) -> Option<WorldObjectInfo>;

    fn unit_exists(&self, guid: ObjectGuid) -> bool;

    fn taxi_node(&self, node: u32) -> Option<TaxiNode>;

    fn taxi_mount_display(&self, node: u32, team: Team) -> Option<u32>;

    /// `(path id, cost)` for a direct leg.
    fn taxi_path(&self, from: u32, to: u32) -> Option<(u32, u32)>;

    fn gossip_menu_items(&self, menu_id: u32) -> Vec<GossipMenuItem>;
}

/// Party/raid membership.
pub trait GroupService: Send + Sync {
    fn group_of(&self, member: ObjectGuid) -> Option<GroupId>;

    fn is_member(&self, group: GroupId, member: ObjectGuid) -> bool;

    fn is_leader(&self, group: GroupId, member: ObjectGuid) -> bool;

    fn remove_member(&self, group: GroupId, member: ObjectGuid, method: RemoveMethod);

    fn change_leader(&self, group: GroupId, new_leader: ObjectGuid);

    fn count_roll_vote(
        &self,
        group: GroupId,
        voter: ObjectGuid,
        item: ObjectGuid,
        number_of_players: u32,
        vote: RollVote,
    );
}

/// Read-only view of the controlling player.
pub trait MasterView: Send + Sync {
    fn guid(&self) -> ObjectGuid;

    fn name(&self) -> String;

    /// Currently targeted object, or the empty guid.
    fn selection(&self) -> ObjectGuid;
}

/// The full set of collaborators one dispatcher works against.
#[derive(Clone)]
pub struct Host {
    pub sessions: Arc<dyn SessionProvider>,
    pub controllers: Arc<dyn ControllerFactory>,
    pub world: Arc<dyn WorldQuery>,
    pub groups: Arc<dyn GroupService>,
    pub master: Arc<dyn MasterView>,
}

impl Host {
    pub fn master_guid(&self) -> ObjectGuid {
        self.master.guid()
    }

    pub fn master_group(&self) -> Option<GroupId> {
        self.groups.group_of(self.master.guid())
    }

    /// Whether `member` is in the same group as the master.
    pub fn shares_group_with_master(&self, member: ObjectGuid) -> bool {
        match (self.master_group(), self.groups.group_of(member)) {
            (Some(master), Some(theirs)) => master == theirs,
            _ => false,
        }
    }
}
