//! Session-level master actions: logout, inspect, area triggers, resurrection.

use botswarm_core::{RemoveMethod, SwarmError, WorldPacket};
use tracing::debug;

use super::HandlerContext;

/// `CMSG_LOGOUT_REQUEST`: the master is leaving, so every bot goes too.
pub fn logout_request(
    ctx: &mut HandlerContext<'_>,
    _packet: &mut WorldPacket,
) -> Result<usize, SwarmError> {
    Ok(ctx.manager.remove_all())
}

/// `CMSG_INSPECT`: the inspected bot reports gear it could equip.
pub fn inspect(ctx: &mut HandlerContext<'_>, packet: &mut WorldPacket) -> Result<usize, SwarmError> {
    let target = packet.read_guid()?;
    let (registry, _, _) = ctx.split();
    match registry.get_live_mut(target) {
        Some(bot) => {
            bot.controller_mut().send_not_equip_list();
            Ok(1)
        }
        None => Ok(0),
    }
}

/// `CMSG_AREATRIGGER`: replay the trigger through every bot's own session.
pub fn area_trigger(
    ctx: &mut HandlerContext<'_>,
    packet: &mut WorldPacket,
) -> Result<usize, SwarmError> {
    let trigger = packet.read_u32()?;
    debug!(trigger, "Master crossed area trigger");

    let (registry, _, _) = ctx.split();
    let mut affected = 0;
    for bot in registry.live_mut() {
        packet.rewind();
        bot.player_mut().handle_area_trigger(packet);
        affected += 1;
    }
    Ok(affected)
}

/// `CMSG_SPIRIT_HEALER_ACTIVATE`: kick every bot out of the master's group.
pub fn spirit_healer_activate(
    ctx: &mut HandlerContext<'_>,
    _packet: &mut WorldPacket,
) -> Result<usize, SwarmError> {
    let (registry, host, _) = ctx.split();
    let Some(group) = host.master_group() else {
        return Ok(0);
    };

    let mut affected = 0;
    for bot in registry.iter() {
        if host.groups.is_member(group, bot.guid()) {
            host.groups.remove_member(group, bot.guid(), RemoveMethod::Kick);
            affected += 1;
        }
    }
    Ok(affected)
}
