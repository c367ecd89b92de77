//! Client message type tags.
//!
//! Only the opcodes the dispatcher reacts to are named here. Every other
//! value is still representable so unknown traffic can be ignored without
//! a decoding failure.

use serde::{Deserialize, Serialize};

/// A client-to-server message type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Opcode(pub u16);

impl Opcode {
    pub const CMSG_LOGOUT_REQUEST: Opcode = Opcode(0x04B);
    pub const CMSG_GAMEOBJ_USE: Opcode = Opcode(0x0B1);
    pub const CMSG_AREATRIGGER: Opcode = Opcode(0x0B4);
    pub const CMSG_TEXT_EMOTE: Opcode = Opcode(0x104);
    pub const CMSG_INSPECT: Opcode = Opcode(0x114);
    pub const CMSG_GOSSIP_HELLO: Opcode = Opcode(0x17B);
    pub const CMSG_QUESTGIVER_HELLO: Opcode = Opcode(0x184);
    pub const CMSG_QUESTGIVER_ACCEPT_QUEST: Opcode = Opcode(0x189);
    pub const CMSG_QUESTGIVER_COMPLETE_QUEST: Opcode = Opcode(0x18A);
    pub const CMSG_LIST_INVENTORY: Opcode = Opcode(0x19E);
    pub const CMSG_ACTIVATETAXI: Opcode = Opcode(0x1AD);
    pub const CMSG_SPIRIT_HEALER_ACTIVATE: Opcode = Opcode(0x21C);
    pub const CMSG_LOOT_ROLL: Opcode = Opcode(0x2A0);
    pub const CMSG_MOVE_SPLINE_DONE: Opcode = Opcode(0x2C9);
    pub const CMSG_ACTIVATETAXIEXPRESS: Opcode = Opcode(0x312);
    pub const CMSG_GAMEOBJ_REPORT_USE: Opcode = Opcode(0x481);

    /// Every opcode with a symbolic name, in wire-value order.
    pub const NAMED: &'static [Opcode] = &[
        Opcode::CMSG_LOGOUT_REQUEST,
        Opcode::CMSG_GAMEOBJ_USE,
        Opcode::CMSG_AREATRIGGER,
        Opcode::CMSG_TEXT_EMOTE,
        Opcode::CMSG_INSPECT,
        Opcode::CMSG_GOSSIP_HELLO,
        Opcode::CMSG_QUESTGIVER_HELLO,
        Opcode::CMSG_QUESTGIVER_ACCEPT_QUEST,
        Opcode::CMSG_QUESTGIVER_COMPLETE_QUEST,
        Opcode::CMSG_LIST_INVENTORY,
        Opcode::CMSG_ACTIVATETAXI,
        Opcode::CMSG_SPIRIT_HEALER_ACTIVATE,
        Opcode::CMSG_LOOT_ROLL,
        Opcode::CMSG_MOVE_SPLINE_DONE,
        Opcode::CMSG_ACTIVATETAXIEXPRESS,
        Opcode::CMSG_GAMEOBJ_REPORT_USE,
    ];

    /// Symbolic name, if this is one of the opcodes the dispatcher knows.
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Opcode::CMSG_LOGOUT_REQUEST => "CMSG_LOGOUT_REQUEST",
            Opcode::CMSG_GAMEOBJ_USE => "CMSG_GAMEOBJ_USE",
            Opcode::CMSG_AREATRIGGER => "CMSG_AREATRIGGER",
            Opcode::CMSG_TEXT_EMOTE => "CMSG_TEXT_EMOTE",
            Opcode::CMSG_INSPECT => "CMSG_INSPECT",
            Opcode::CMSG_GOSSIP_HELLO => "CMSG_GOSSIP_HELLO",
            Opcode::CMSG_QUESTGIVER_HELLO => "CMSG_QUESTGIVER_HELLO",
            Opcode::CMSG_QUESTGIVER_ACCEPT_QUEST => "CMSG_QUESTGIVER_ACCEPT_QUEST",
            Opcode::CMSG_QUESTGIVER_COMPLETE_QUEST => "CMSG_QUESTGIVER_COMPLETE_QUEST",
            Opcode::CMSG_LIST_INVENTORY => "CMSG_LIST_INVENTORY",
            Opcode::CMSG_ACTIVATETAXI => "CMSG_ACTIVATETAXI",
            Opcode::CMSG_SPIRIT_HEALER_ACTIVATE => "CMSG_SPIRIT_HEALER_ACTIVATE",
            Opcode::CMSG_LOOT_ROLL => "CMSG_LOOT_ROLL",
            Opcode::CMSG_MOVE_SPLINE_DONE => "CMSG_MOVE_SPLINE_DONE",
            Opcode::CMSG_ACTIVATETAXIEXPRESS => "CMSG_ACTIVATETAXIEXPRESS",
            Opcode::CMSG_GAMEOBJ_REPORT_USE => "CMSG_GAMEOBJ_REPORT_USE",
            _ => return None,
        };
        Some(name)
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "UNKNOWN(0x{:03X})", self.0),
        }
    }
}
