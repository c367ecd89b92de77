//! Gossip menus opened by the master.

use botswarm_core::{GossipOption, SwarmError, WorldPacket};
use tracing::{debug, trace};

use super::HandlerContext;

pub const CANT_INTERACT: &str = "I can't talk to that NPC from here.";

/// `CMSG_GOSSIP_HELLO`: npc guid.
///
/// For every menu entry the NPC actually offers, bots learn flight nodes from
/// flight masters and turn in quests at quest givers. Vendors, stable masters,
/// auctioneers, bankers and innkeepers are recognized but left alone.
pub fn gossip_hello(ctx: &mut HandlerContext<'_>, packet: &mut WorldPacket) -> Result<usize, SwarmError> {
    let npc = packet.read_guid()?;
    let (registry, host, config) = ctx.split();

    let mut affected = 0;
    for bot in registry.live_mut() {
        let guid = bot.guid();
        let (player, controller) = bot.split_mut();
        let Some(info) = player.npc_if_can_interact(npc) else {
            debug!(bot = %guid, npc = %npc, "NPC not found or bot can't interact with it");
            if config.debug_whisper {
                controller.tell_master(CANT_INTERACT);
            }
            continue;
        };

        let mut acted = false;
        for item in host.world.gossip_menu_items(info.gossip_menu_id) {
            if !item.is_offered_by(&info) {
                continue;
            }
            match item.option {
                GossipOption::TaxiVendor => {
                    player.send_learn_new_taxi_node(&info);
                    acted = true;
                }
                GossipOption::QuestGiver => {
                    controller.turn_in_quests(npc);
                    acted = true;
                }
                GossipOption::Vendor
                | GossipOption::StablePet
                | GossipOption::Auctioneer
                | GossipOption::Banker
                | GossipOption::Innkeeper => {
                    trace!(bot = %guid, option = ?item.option, "Gossip option left to the master");
                }
                other => {
                    debug!(bot = %guid, option = ?other, "Unhandled gossip option");
                }
            }
        }
        if acted {
            affected += 1;
        }
    }
    Ok(affected)
}
