//! Group loot rolls.

use botswarm_core::{RollVote, SwarmError, WorldPacket};
use tracing::debug;

use super::HandlerContext;

/// Highest raw roll choice (disenchant).
const MAX_CHOICE: u32 = 3;

/// `CMSG_LOOT_ROLL`: item guid, number of invited rollers, master's vote.
///
/// Every grouped bot casts its own vote: uniformly random when it has room
/// for the item, a pass otherwise.
pub fn loot_roll(ctx: &mut HandlerContext<'_>, packet: &mut WorldPacket) -> Result<usize, SwarmError> {
    let item = packet.read_guid()?;
    let number_of_players = packet.read_u32()?;
    let master_vote = packet.read_u8()?;
    debug!(item = %item, number_of_players, master_vote, "Master rolled on loot");

    let rolls = &mut *ctx.rolls;
    let (registry, host, _) = ctx.manager.split();
    let mut affected = 0;
    for bot in registry.live_mut() {
        let guid = bot.guid();
        let Some(group) = host.groups.group_of(guid) else {
            continue;
        };

        let (player, controller) = bot.split_mut();
        let choice = if controller.can_store() {
            rolls.roll(MAX_CHOICE)
        } else {
            0
        };
        let vote = RollVote::from_choice(choice);

        host.groups
            .count_roll_vote(group, guid, item, number_of_players, vote);
        if matches!(vote, RollVote::Need | RollVote::Greed) {
            player.update_roll_criteria(vote);
        }
        debug!(bot = %guid, ?vote, "Bot rolled on loot");
        affected += 1;
    }
    Ok(affected)
}
