//! Text emotes as commands.
//!
//! | Emote | Effect |
//! |---|---|
//! | eat, drink | every bot eats and drinks |
//! | point | bots that can see the master's target and are hostile to it attack |
//! | stand | selected bot stays, or all bots if none is selected |
//! | wave, "follow me" | selected bot follows, or all bots if none is selected |
//! | bow and the rest | nothing |

use botswarm_core::{MovementOrder, SwarmError, TextEmote, WorldPacket};
use tracing::debug;

use super::{HandlerContext, unresolvable};

/// `CMSG_TEXT_EMOTE`: emote id first; target and emote number follow unread.
pub fn text_emote(ctx: &mut HandlerContext<'_>, packet: &mut WorldPacket) -> Result<usize, SwarmError> {
    let emote = TextEmote(packet.read_u32()?);
    debug!(emote = emote.0, "Master emoted");

    match emote {
        TextEmote::EAT | TextEmote::DRINK => feast(ctx),
        TextEmote::POINT => attack_selection(ctx),
        TextEmote::STAND => order_selection_or_all(ctx, MovementOrder::Stay),
        TextEmote::WAVE | TextEmote::FOLLOW_ME => {
            let master = ctx.manager.host().master_guid();
            order_selection_or_all(ctx, MovementOrder::Follow(master))
        }
        _ => Ok(0),
    }
}

fn feast(ctx: &mut HandlerContext<'_>) -> Result<usize, SwarmError> {
    let (registry, _, _) = ctx.split();
    let mut affected = 0;
    for bot in registry.live_mut() {
        bot.controller_mut().feast();
        affected += 1;
    }
    Ok(affected)
}

fn attack_selection(ctx: &mut HandlerContext<'_>) -> Result<usize, SwarmError> {
    let (registry, host, config) = ctx.split();
    let target = host.master.selection();
    if target.is_empty() {
        return Err(SwarmError::Unresolvable("master has nothing selected".into()));
    }
    if !host.world.unit_exists(target) {
        return Err(unresolvable(registry, config, "unit", target));
    }

    let mut affected = 0;
    for bot in registry.live_mut() {
        let (player, controller) = bot.split_mut();
        if !player.is_friendly_to(target) && player.is_within_los(target) {
            controller.attack(target);
            affected += 1;
        }
    }
    Ok(affected)
}

/// Give `order` to the bot the master has selected, or to every bot.
fn order_selection_or_all(
    ctx: &mut HandlerContext<'_>,
    order: MovementOrder,
) -> Result<usize, SwarmError> {
    let (registry, host, _) = ctx.split();
    let selected = host.master.selection();
    if let Some(bot) = registry.get_mut(selected) {
        if !bot.is_live() {
            debug!(bot = %selected, "Selected bot is no longer in world");
            return Ok(0);
        }
        bot.controller_mut().set_movement_order(order);
        return Ok(1);
    }

    let mut affected = 0;
    for bot in registry.live_mut() {
        bot.controller_mut().set_movement_order(order);
        affected += 1;
    }
    Ok(affected)
}
