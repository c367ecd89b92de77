//! Per-bot collaborator traits.
//!
//! A managed bot is two host objects bound together: the [`BotPlayer`]
//! (character, movement, taxi state and its world session) and the
//! [`BotController`] (the behavior layer attached at login). The dispatcher
//! owns both boxes for exactly as long as the bot is registered.

use serde::{Deserialize, Serialize};

use crate::guid::ObjectGuid;
use crate::packet::WorldPacket;
use crate::world::{
    MovementOrder, NpcInfo, Position, QuestStatus, QuestTemplate, RollVote, TaxiPathNode, Team,
    WorldObjectInfo,
};

/// A bot character and its live session.
pub trait BotPlayer: Send {
    fn guid(&self) -> ObjectGuid;

    fn name(&self) -> &str;

    /// Whether the character is still in the world. A bot that has been
    /// logged out by another code path reports `false` and must be skipped.
    fn is_in_world(&self) -> bool;

    fn map_id(&self) -> u32;

    fn orientation(&self) -> f32;

    fn team(&self) -> Team;

    // --- Relations to other objects ---

    fn is_friendly_to(&self, unit: ObjectGuid) -> bool;

    fn is_within_los(&self, unit: ObjectGuid) -> bool;

    /// Same map and instance as `object`.
    fn is_in_map(&self, object: &WorldObjectInfo) -> bool;

    /// The NPC, if it exists and this character is allowed to talk to it.
    fn npc_if_can_interact(&self, npc: ObjectGuid) -> Option<NpcInfo>;

    // --- Movement ---

    fn clear_motion(&mut self);

    fn move_follow(&mut self, target: ObjectGuid, distance: f32, angle: f32);

    /// The running flight spline, if the top movement generator is a flight.
    fn active_flight(&mut self) -> Option<&mut dyn FlightPath>;

    fn teleport_to(&mut self, map_id: u32, position: Position, orientation: f32);

    // --- Taxi route state ---

    /// Final node of the current route, if any.
    fn taxi_destination(&self) -> Option<u32>;

    /// Node the current leg departs from.
    fn taxi_source(&self) -> u32;

    /// Pop the just-finished leg and return the next queued node.
    fn next_taxi_destination(&mut self) -> Option<u32>;

    fn clear_taxi_destinations(&mut self);

    /// Character may use every flight path regardless of discovery.
    fn is_taxi_cheater(&self) -> bool;

    /// Mark `node` as known. Returns `true` if it was newly added.
    fn set_taximask_node(&mut self, node: u32) -> bool;

    // --- Quests ---

    fn quest_status(&self, quest: u32) -> QuestStatus;

    fn can_take_quest(&self, quest: &QuestTemplate) -> bool;

    /// `false` when the character already holds the quest.
    fn satisfies_quest_status(&self, quest: &QuestTemplate) -> bool;

    /// `false` when the quest log is full.
    fn satisfies_quest_log(&self) -> bool;

    /// `false` when the quest's starting items do not fit in the bags.
    fn can_add_quest(&self, quest: &QuestTemplate) -> bool;

    /// Build the giver's quest menu for this character; returns offered quest ids.
    fn quest_menu(&mut self, giver: ObjectGuid) -> Vec<u32>;

    /// Bump the need/greed roll progress counters.
    fn update_roll_criteria(&mut self, vote: RollVote);

    // --- Session protocol ---

    fn send_new_taxi_path(&mut self);

    /// Start a flight leg. `start_node` is the spline index to begin at.
    fn send_do_flight(&mut self, mount_display_id: u32, path_id: u32, start_node: u32);

    fn send_learn_new_taxi_node(&mut self, npc: &NpcInfo);

    /// Run the session's own quest-accept handler on `packet`.
    fn handle_quest_accept(&mut self, packet: &mut WorldPacket);

    /// Run the session's own area-trigger handler on `packet`.
    fn handle_area_trigger(&mut self, packet: &mut WorldPacket);
}

/// An in-progress flight spline.
pub trait FlightPath {
    fn interrupt(&mut self);

    /// Re-seat the node cursor after a cross-map hop.
    fn set_current_node_after_teleport(&mut self);

    fn current_node(&self) -> Option<TaxiPathNode>;

    fn skip_current_node(&mut self);
}

/// The behavior layer attached to a bot while it is managed.
pub trait BotController: Send {
    /// Suppress autonomous updates for `seconds`.
    fn set_ignore_update_time(&mut self, seconds: u32);

    /// Hand a decoded taxi route to the bot's own route logic.
    fn queue_taxi(&mut self, flight_master: ObjectGuid, nodes: &[u32]);

    /// Whisper the master the bot's usable-but-unequipped inventory.
    fn send_not_equip_list(&mut self);

    fn feast(&mut self);

    fn attack(&mut self, target: ObjectGuid);

    fn set_movement_order(&mut self, order: MovementOrder);

    fn turn_in_quests(&mut self, giver: ObjectGuid);

    /// Accept `quest` from `giver`. Returns `false` if it could not be taken.
    fn add_quest(&mut self, quest: u32, giver: ObjectGuid) -> bool;

    /// Whether the bags have room for one more item.
    fn can_store(&self) -> bool;

    fn sell_garbage(&mut self);

    fn tell_master(&mut self, text: &str);

    fn set_quest_need_items(&mut self);

    fn set_quest_need_creatures(&mut self);

    /// Called once, right before the bot's session is terminated.
    fn on_detach(&mut self) {}
}

/// Behavior tuning handed to every controller at attach time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotSettings {
    pub debug_whisper: bool,
    pub follow_distance_min: f32,
    pub follow_distance_max: f32,
    pub collect_combat: bool,
    pub collect_quest: bool,
    pub collect_profession: bool,
    pub collect_loot: bool,
    pub collect_skin: bool,
    pub collect_objects: bool,
    pub collect_distance: u32,
    pub collect_distance_max: u32,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            debug_whisper: false,
            follow_distance_min: 0.5,
            follow_distance_max: 1.0,
            collect_combat: true,
            collect_quest: true,
            collect_profession: true,
            collect_loot: true,
            collect_skin: true,
            collect_objects: true,
            collect_distance: 25,
            collect_distance_max: 50,
        }
    }
}
