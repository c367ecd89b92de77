//! Flight activation and leg continuation.

use botswarm_core::{ObjectGuid, PacketError, SwarmError, WorldPacket};
use tracing::debug;

use super::HandlerContext;
use crate::taxi::{self, TaxiTransition};

/// How close a bot walks up to the flight master before boarding.
pub const INTERACTION_DISTANCE: f32 = 5.0;

/// Update suppression for the first bot; each following bot waits longer so
/// they do not all board on the same tick.
const BOARDING_DELAY_BASE: u32 = 9;
const BOARDING_DELAY_STEP: u32 = 3;

/// `CMSG_ACTIVATETAXI`: flight master guid, source node, destination node.
pub fn activate_taxi(
    ctx: &mut HandlerContext<'_>,
    packet: &mut WorldPacket,
) -> Result<usize, SwarmError> {
    let flight_master = packet.read_guid()?;
    let from = packet.read_u32()?;
    let to = packet.read_u32()?;

    debug!(from, to, "Master activated taxi");
    board_flight(ctx, flight_master, &[from, to])
}

/// `CMSG_ACTIVATETAXIEXPRESS`: flight master guid, node count, nodes.
pub fn activate_taxi_express(
    ctx: &mut HandlerContext<'_>,
    packet: &mut WorldPacket,
) -> Result<usize, SwarmError> {
    let flight_master = packet.read_guid()?;
    let count = packet.read_u32()? as usize;
    if count > packet.remaining() / 4 {
        return Err(PacketError::Malformed("taxi node count exceeds payload").into());
    }

    let nodes = (0..count)
        .map(|_| packet.read_u32())
        .collect::<Result<Vec<u32>, PacketError>>()?;
    let (Some(first), Some(last)) = (nodes.first(), nodes.last()) else {
        return Ok(0);
    };

    debug!(from = first, to = last, hops = nodes.len(), "Master activated express taxi");
    board_flight(ctx, flight_master, &nodes)
}

/// Walk every bot grouped with the master to the flight master and hand it
/// the route.
fn board_flight(
    ctx: &mut HandlerContext<'_>,
    flight_master: ObjectGuid,
    nodes: &[u32],
) -> Result<usize, SwarmError> {
    let (registry, host, _) = ctx.split();
    let flight_master_present = host.world.unit_exists(flight_master);

    let mut delay = BOARDING_DELAY_BASE;
    let mut affected = 0;
    for bot in registry.live_mut() {
        delay += BOARDING_DELAY_STEP;
        if !host.shares_group_with_master(bot.guid()) {
            continue;
        }

        let (player, controller) = bot.split_mut();
        controller.set_ignore_update_time(delay);
        player.clear_motion();
        if flight_master_present {
            let orientation = player.orientation();
            player.move_follow(flight_master, INTERACTION_DISTANCE, orientation);
        }
        controller.queue_taxi(flight_master, nodes);
        affected += 1;
    }
    Ok(affected)
}

/// `CMSG_MOVE_SPLINE_DONE`: packed mover guid followed by movement info.
///
/// Only the guid is decoded; the movement block is never looked at.
pub fn move_spline_done(
    ctx: &mut HandlerContext<'_>,
    packet: &mut WorldPacket,
) -> Result<usize, SwarmError> {
    packet.read_packed_guid()?;

    let (registry, host, config) = ctx.split();
    let mut affected = 0;
    for bot in registry.live_mut() {
        let guid = bot.guid();
        let (player, controller) = bot.split_mut();
        match taxi::continue_route(player, &*host.world) {
            TaxiTransition::NoActiveRoute => continue,
            TaxiTransition::MultiMapTransition { teleported } => {
                debug!(bot = %guid, teleported, "Taxi crosses map border, ending fan-out");
                affected += 1;
                break;
            }
            TaxiTransition::LegAbandoned { from, to } => {
                debug!(bot = %guid, from, to, "No mount or path for next taxi leg");
                if config.debug_whisper {
                    controller.tell_master(&format!(
                        "I can't find a flight path from node {from} to node {to}."
                    ));
                }
                affected += 1;
            }
            TaxiTransition::NextLeg { .. } | TaxiTransition::RouteComplete => affected += 1,
        }
    }
    Ok(affected)
}
