//! Opcode dispatch table.
//!
//! Maps each intercepted opcode to its reaction handler. Opcodes without an
//! entry are ignored; the protocol is large and only a handful of master
//! actions are worth mirroring.

use std::collections::HashMap;

use botswarm_core::{Opcode, WorldPacket};
use tracing::{debug, trace};

use crate::handlers::{self, Handler, HandlerContext};

/// What became of one intercepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No handler for this opcode.
    Ignored,
    /// The handler ran to completion and acted on `affected` bots.
    Handled { opcode: Opcode, affected: usize },
    /// The handler gave up on this message.
    Aborted { opcode: Opcode, reason: String },
}

/// Opcode → handler table.
pub struct PacketDispatcher {
    handlers: HashMap<Opcode, Handler>,
}

impl PacketDispatcher {
    /// An empty table.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// A table with every built-in reaction handler.
    pub fn with_default_handlers() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register(Opcode::CMSG_ACTIVATETAXI, handlers::taxi::activate_taxi);
        dispatcher.register(
            Opcode::CMSG_ACTIVATETAXIEXPRESS,
            handlers::taxi::activate_taxi_express,
        );
        dispatcher.register(Opcode::CMSG_MOVE_SPLINE_DONE, handlers::taxi::move_spline_done);
        dispatcher.register(Opcode::CMSG_LOGOUT_REQUEST, handlers::session::logout_request);
        dispatcher.register(Opcode::CMSG_INSPECT, handlers::session::inspect);
        dispatcher.register(Opcode::CMSG_AREATRIGGER, handlers::session::area_trigger);
        dispatcher.register(
            Opcode::CMSG_SPIRIT_HEALER_ACTIVATE,
            handlers::session::spirit_healer_activate,
        );
        dispatcher.register(Opcode::CMSG_TEXT_EMOTE, handlers::emote::text_emote);
        dispatcher.register(Opcode::CMSG_GAMEOBJ_USE, handlers::quest::gameobj_use);
        dispatcher.register(Opcode::CMSG_GAMEOBJ_REPORT_USE, handlers::quest::gameobj_use);
        dispatcher.register(Opcode::CMSG_QUESTGIVER_HELLO, handlers::quest::questgiver_hello);
        dispatcher.register(
            Opcode::CMSG_QUESTGIVER_ACCEPT_QUEST,
            handlers::quest::questgiver_accept_quest,
        );
        dispatcher.register(
            Opcode::CMSG_QUESTGIVER_COMPLETE_QUEST,
            handlers::quest::questgiver_complete_quest,
        );
        dispatcher.register(Opcode::CMSG_LOOT_ROLL, handlers::loot::loot_roll);
        dispatcher.register(Opcode::CMSG_GOSSIP_HELLO, handlers::gossip::gossip_hello);
        dispatcher.register(Opcode::CMSG_LIST_INVENTORY, handlers::vendor::list_inventory);
        dispatcher
    }

    /// Install `handler` for `opcode`, replacing any previous one.
    pub fn register(&mut self, opcode: Opcode, handler: Handler) {
        self.handlers.insert(opcode, handler);
    }

    pub fn handles(&self, opcode: Opcode) -> bool {
        self.handlers.contains_key(&opcode)
    }

    /// Registered opcodes, ascending.
    pub fn opcodes(&self) -> Vec<Opcode> {
        let mut opcodes: Vec<Opcode> = self.handlers.keys().copied().collect();
        opcodes.sort_unstable();
        opcodes
    }

    /// Route `packet` to its handler.
    ///
    /// The handler works on its own copy with the cursor at the start, so
    /// nothing a handler reads leaks into the next one.
    pub fn dispatch(&self, ctx: &mut HandlerContext<'_>, packet: &WorldPacket) -> DispatchOutcome {
        let opcode = packet.opcode();
        let Some(handler) = self.handlers.get(&opcode) else {
            trace!(%opcode, "No handler for master packet");
            return DispatchOutcome::Ignored;
        };

        debug!(%opcode, len = packet.len(), "Intercepted master packet");
        let mut packet = packet.clone();
        packet.rewind();

        match handler(ctx, &mut packet) {
            Ok(affected) => {
                debug!(%opcode, affected, "Master packet mirrored");
                DispatchOutcome::Handled { opcode, affected }
            }
            Err(e) => {
                debug!(%opcode, error = %e, "Master packet handler aborted");
                DispatchOutcome::Aborted {
                    opcode,
                    reason: e.to_string(),
                }
            }
        }
    }
}

impl Default for PacketDispatcher {
    fn default() -> Self {
        Self::with_default_handlers()
    }
}
