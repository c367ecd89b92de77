//! Quest givers: turn-ins, auto-accept, and mirrored quest accepts.

use botswarm_core::{
    BotPlayer, GameObjectType, Ineligibility, ObjectGuid, QuestStatus, QuestTemplate, SwarmError,
    WorldPacket,
};
use tracing::debug;

use super::{HandlerContext, unresolvable};

/// Sent to the master after a mirrored accept succeeds.
pub const QUEST_ACCEPTED: &str = "Got the quest.";

/// `CMSG_GAMEOBJ_USE` / `CMSG_GAMEOBJ_REPORT_USE`: if the object is a quest
/// giver, turn in what can be turned in and take everything it offers.
pub fn gameobj_use(ctx: &mut HandlerContext<'_>, packet: &mut WorldPacket) -> Result<usize, SwarmError> {
    let object = packet.read_guid()?;
    let (registry, host, config) = ctx.split();
    let info = host
        .world
        .game_object(object)
        .ok_or_else(|| unresolvable(registry, config, "game object", object))?;

    // Chests and other kinds are not mirrored yet.
    if info.go_type != GameObjectType::QUESTGIVER {
        return Ok(0);
    }

    let mut affected = 0;
    for bot in registry.live_mut() {
        let guid = bot.guid();
        let (player, controller) = bot.split_mut();
        controller.turn_in_quests(object);
        for quest in player.quest_menu(object) {
            if !controller.add_quest(quest, object) {
                debug!(bot = %guid, quest, "Couldn't take quest");
            }
        }
        affected += 1;
    }
    Ok(affected)
}

/// `CMSG_QUESTGIVER_HELLO`: npc guid.
pub fn questgiver_hello(
    ctx: &mut HandlerContext<'_>,
    packet: &mut WorldPacket,
) -> Result<usize, SwarmError> {
    let giver = packet.read_guid()?;
    turn_in_all(ctx, giver)
}

/// `CMSG_QUESTGIVER_COMPLETE_QUEST`: npc guid, quest id.
pub fn questgiver_complete_quest(
    ctx: &mut HandlerContext<'_>,
    packet: &mut WorldPacket,
) -> Result<usize, SwarmError> {
    let giver = packet.read_guid()?;
    let quest = packet.read_u32()?;
    debug!(giver = %giver, quest, "Master completed quest");
    turn_in_all(ctx, giver)
}

fn turn_in_all(ctx: &mut HandlerContext<'_>, giver: ObjectGuid) -> Result<usize, SwarmError> {
    let (registry, host, config) = ctx.split();
    host.world
        .world_object(giver)
        .ok_or_else(|| unresolvable(registry, config, "quest giver", giver))?;

    let mut affected = 0;
    for bot in registry.live_mut() {
        bot.controller_mut().turn_in_quests(giver);
        affected += 1;
    }
    Ok(affected)
}

/// `CMSG_QUESTGIVER_ACCEPT_QUEST`: npc guid, quest id, one unused word.
///
/// Each bot either accepts through its own session or tells the master the
/// first reason it cannot.
pub fn questgiver_accept_quest(
    ctx: &mut HandlerContext<'_>,
    packet: &mut WorldPacket,
) -> Result<usize, SwarmError> {
    let giver = packet.read_guid()?;
    let quest = packet.read_u32()?;
    let unk = packet.read_u32()?;
    debug!(giver = %giver, quest, unk, "Master accepted quest");

    let (registry, host, config) = ctx.split();
    let template = host
        .world
        .quest_template(quest)
        .ok_or_else(|| unresolvable(registry, config, "quest", quest))?;

    let mut affected = 0;
    for bot in registry.live_mut() {
        let (player, controller) = bot.split_mut();
        match check_quest_eligibility(player, &template) {
            Err(reason) => controller.tell_master(&reason.message()),
            Ok(()) => {
                packet.rewind();
                player.handle_quest_accept(packet);
                controller.tell_master(QUEST_ACCEPTED);
                if template.needs_items() {
                    controller.set_quest_need_items();
                }
                if template.needs_creatures_or_objects() {
                    controller.set_quest_need_creatures();
                }
            }
        }
        affected += 1;
    }
    Ok(affected)
}

/// Decide whether `player` may take `quest`.
///
/// Checks run in a fixed order and the first failure is the answer; later
/// checks are never evaluated.
pub fn check_quest_eligibility(
    player: &dyn BotPlayer,
    quest: &QuestTemplate,
) -> Result<(), Ineligibility> {
    if player.quest_status(quest.id) == QuestStatus::Complete {
        return Err(Ineligibility::AlreadyCompleted);
    }
    if !player.can_take_quest(quest) {
        return Err(if player.satisfies_quest_status(quest) {
            Ineligibility::CannotTake
        } else {
            Ineligibility::AlreadyHave
        });
    }
    if !player.satisfies_quest_log() {
        return Err(Ineligibility::QuestLogFull);
    }
    if !player.can_add_quest(quest) {
        return Err(Ineligibility::BagsFull);
    }
    Ok(())
}
