//! Vendor windows: bots sell their junk alongside the master.

use botswarm_core::{SwarmError, WorldPacket};

use super::{HandlerContext, unresolvable};

pub const TOO_FAR_TO_SELL: &str = "I'm too far away to sell items!";

/// `CMSG_LIST_INVENTORY`: vendor guid. Gated on `sell_garbage`.
pub fn list_inventory(ctx: &mut HandlerContext<'_>, packet: &mut WorldPacket) -> Result<usize, SwarmError> {
    let (registry, host, config) = ctx.split();
    if !config.sell_garbage {
        return Ok(0);
    }

    let vendor = packet.read_guid()?;
    let info = host
        .world
        .world_object(vendor)
        .ok_or_else(|| unresolvable(registry, config, "vendor", vendor))?;

    let mut affected = 0;
    for bot in registry.live_mut() {
        let (player, controller) = bot.split_mut();
        if player.is_in_map(&info) {
            controller.sell_garbage();
        } else {
            controller.tell_master(TOO_FAR_TO_SELL);
        }
        affected += 1;
    }
    Ok(affected)
}
