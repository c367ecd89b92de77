//! Multi-hop flight continuation.
//!
//! A route of nodes `[A, B, C, ..]` is flown one leg at a time; the client
//! reports each finished spline and the bot must be sent off on the next leg
//! itself. Cross-map routes additionally need a teleport at the map border.

use botswarm_core::{BotPlayer, WorldQuery};
use tracing::debug;

/// What happened to one bot's route after a spline-done report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxiTransition {
    /// No destination recorded; nothing to continue.
    NoActiveRoute,
    /// The destination lies on another map. `teleported` is false when the
    /// bot was not actually flying.
    MultiMapTransition { teleported: bool },
    /// Next leg started.
    NextLeg {
        from: u32,
        to: u32,
        mount: u32,
        path: u32,
    },
    /// No mount or no path for the next leg; the rest of the route was dropped.
    LegAbandoned { from: u32, to: u32 },
    /// Final node reached; route state cleared.
    RouteComplete,
}

/// Spline index the next leg starts from. Index 0 is the node just reached.
const SKIP_START_NODE: u32 = 1;

/// Advance `bot` along its queued route by one step.
pub fn continue_route(bot: &mut dyn BotPlayer, world: &dyn WorldQuery) -> TaxiTransition {
    let Some(destination) = bot.taxi_destination() else {
        return TaxiTransition::NoActiveRoute;
    };

    if let Some(node) = world.taxi_node(destination) {
        if node.map_id != bot.map_id() {
            let teleported = hand_off_map(bot, node.map_id);
            return TaxiTransition::MultiMapTransition { teleported };
        }
    }

    let Some(next) = bot.next_taxi_destination() else {
        bot.clear_taxi_destinations();
        return TaxiTransition::RouteComplete;
    };

    let source = bot.taxi_source();
    if bot.is_taxi_cheater() && bot.set_taximask_node(source) {
        bot.send_new_taxi_path();
    }

    debug!(bot = %bot.guid(), from = source, to = next, "Taxi continues to next leg");

    let mount = world.taxi_mount_display(source, bot.team());
    let path = world.taxi_path(source, next).map(|(path, _cost)| path);
    match (mount, path) {
        (Some(mount), Some(path)) if mount != 0 && path != 0 => {
            bot.send_do_flight(mount, path, SKIP_START_NODE);
            TaxiTransition::NextLeg {
                from: source,
                to: next,
                mount,
                path,
            }
        }
        _ => {
            bot.clear_taxi_destinations();
            TaxiTransition::LegAbandoned {
                from: source,
                to: next,
            }
        }
    }
}

/// Carry an airborne bot across the map border onto `map_id`.
fn hand_off_map(bot: &mut dyn BotPlayer, map_id: u32) -> bool {
    let orientation = bot.orientation();
    let landing = match bot.active_flight() {
        Some(flight) => {
            flight.interrupt();
            flight.set_current_node_after_teleport();
            let node = flight.current_node();
            flight.skip_current_node();
            node
        }
        None => return false,
    };

    match landing {
        Some(node) => {
            bot.teleport_to(map_id, node.position, orientation);
            true
        }
        None => false,
    }
}
