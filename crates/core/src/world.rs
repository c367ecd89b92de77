//! World records the dispatcher reads through its collaborators.
//!
//! These are plain values copied out of the host's object model. The
//! dispatcher never holds a reference into host memory across a call.

use serde::{Deserialize, Serialize};

use crate::guid::ObjectGuid;

/// A point on a map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Faction side; selects the taxi mount appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Alliance,
    Horde,
}

/// Opaque handle of a party/raid owned by the group collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub u32);

/// How a member leaves a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoveMethod {
    Default = 0,
    Kick = 1,
}

/// A bot's vote in a group loot roll. Discriminants are the wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollVote {
    Pass = 0,
    Need = 1,
    Greed = 2,
    Disenchant = 3,
}

impl RollVote {
    /// Map a raw choice in `0..=3` to a vote; anything else passes.
    pub fn from_choice(choice: u32) -> Self {
        match choice {
            1 => RollVote::Need,
            2 => RollVote::Greed,
            3 => RollVote::Disenchant,
            _ => RollVote::Pass,
        }
    }

    pub fn choice(self) -> u32 {
        self as u32
    }
}

/// Standing movement instruction for a bot's controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementOrder {
    Stay,
    Follow(ObjectGuid),
}

/// Text emote ids sent with `CMSG_TEXT_EMOTE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextEmote(pub u32);

impl TextEmote {
    pub const BOW: TextEmote = TextEmote(17);
    pub const DRINK: TextEmote = TextEmote(35);
    pub const EAT: TextEmote = TextEmote(37);
    pub const POINT: TextEmote = TextEmote(72);
    pub const WAVE: TextEmote = TextEmote(101);
    pub const STAND: TextEmote = TextEmote(141);
    /// "Follow me" has no named text emote; clients send the raw id.
    pub const FOLLOW_ME: TextEmote = TextEmote(324);
}

/// Progress of a quest on one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    None,
    Complete,
    Unavailable,
    Incomplete,
    Available,
    Failed,
}

pub const QUEST_ITEM_OBJECTIVES_COUNT: usize = 6;
pub const QUEST_OBJECTIVES_COUNT: usize = 4;

/// The parts of a quest definition the accept procedure looks at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestTemplate {
    pub id: u32,
    pub req_item_count: [u32; QUEST_ITEM_OBJECTIVES_COUNT],
    pub req_creature_or_go_count: [i32; QUEST_OBJECTIVES_COUNT],
}

impl QuestTemplate {
    /// A quest with no objectives.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            req_item_count: [0; QUEST_ITEM_OBJECTIVES_COUNT],
            req_creature_or_go_count: [0; QUEST_OBJECTIVES_COUNT],
        }
    }

    pub fn needs_items(&self) -> bool {
        self.req_item_count.iter().any(|c| *c > 0)
    }

    pub fn needs_creatures_or_objects(&self) -> bool {
        self.req_creature_or_go_count.iter().any(|c| *c > 0)
    }
}

/// A flight master node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxiNode {
    pub id: u32,
    pub map_id: u32,
    pub position: Position,
}

/// One waypoint of an in-progress flight spline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxiPathNode {
    pub map_id: u32,
    pub position: Position,
}

/// Game object kind (subset that matters here).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameObjectType(pub u32);

impl GameObjectType {
    pub const DOOR: GameObjectType = GameObjectType(0);
    pub const BUTTON: GameObjectType = GameObjectType(1);
    pub const QUESTGIVER: GameObjectType = GameObjectType(2);
    pub const CHEST: GameObjectType = GameObjectType(3);
}

/// A usable game object on the master's map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameObjectInfo {
    pub guid: ObjectGuid,
    pub go_type: GameObjectType,
}

/// Any creature or game object, with enough placement to answer
/// "same map instance?" questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldObjectInfo {
    pub guid: ObjectGuid,
    pub map_id: u32,
    pub instance_id: u32,
}

/// An NPC a bot is able to interact with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcInfo {
    pub guid: ObjectGuid,
    pub npc_flags: u32,
    pub gossip_menu_id: u32,
}

/// Gossip option categories. Discriminants are the database ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GossipOption {
    None = 0,
    Gossip = 1,
    QuestGiver = 2,
    Vendor = 3,
    TaxiVendor = 4,
    Trainer = 5,
    SpiritHealer = 6,
    SpiritGuide = 7,
    Innkeeper = 8,
    Banker = 9,
    Petitioner = 10,
    TabardDesigner = 11,
    Battlefield = 12,
    Auctioneer = 13,
    StablePet = 14,
    Armorer = 15,
    UnlearnTalents = 16,
    UnlearnPetSkills = 17,
}

impl GossipOption {
    pub fn from_id(id: u32) -> Option<Self> {
        let option = match id {
            0 => GossipOption::None,
            1 => GossipOption::Gossip,
            2 => GossipOption::QuestGiver,
            3 => GossipOption::Vendor,
            4 => GossipOption::TaxiVendor,
            5 => GossipOption::Trainer,
            6 => GossipOption::SpiritHealer,
            7 => GossipOption::SpiritGuide,
            8 => GossipOption::Innkeeper,
            9 => GossipOption::Banker,
            10 => GossipOption::Petitioner,
            11 => GossipOption::TabardDesigner,
            12 => GossipOption::Battlefield,
            13 => GossipOption::Auctioneer,
            14 => GossipOption::StablePet,
            15 => GossipOption::Armorer,
            16 => GossipOption::UnlearnTalents,
            17 => GossipOption::UnlearnPetSkills,
            _ => return None,
        };
        Some(option)
    }
}

/// One configured entry of an NPC's gossip menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GossipMenuItem {
    pub option: GossipOption,
    /// NPC flag bits that must be set on the creature for this entry to show.
    pub npc_option_npcflag: u32,
}

impl GossipMenuItem {
    pub fn is_offered_by(&self, npc: &NpcInfo) -> bool {
        self.npc_option_npcflag & npc.npc_flags != 0
    }
}
