//! Error types for the BotSwarm domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Nothing here is fatal
//! to the host: the worst outcome of any variant is a skipped or partially
//! applied fan-out for the current message.

use thiserror::Error;

use crate::guid::ObjectGuid;

/// The top-level error type for all dispatcher operations.
#[derive(Debug, Error)]
pub enum SwarmError {
    // --- Registry errors ---
    #[error("Bot {0} is already registered")]
    AlreadyPresent(ObjectGuid),

    #[error("Bot {0} is not registered")]
    NotFound(ObjectGuid),

    #[error("Bot limit reached (max {max})")]
    LimitReached { max: u32 },

    // --- World lookups ---
    #[error("Unresolvable: {0}")]
    Unresolvable(String),

    // --- Per-bot eligibility ---
    #[error("Ineligible: {0}")]
    Ineligible(#[from] Ineligibility),

    // --- Wire decoding ---
    #[error("Packet error: {0}")]
    Packet(#[from] PacketError),

    // --- Session layer ---
    #[error("Session error: {0}")]
    Session(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, SwarmError>;

/// Decoding failures while reading an intercepted message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
    #[error("message too short: need {need}, got {got}")]
    TooShort { need: usize, got: usize },

    #[error("malformed message: {0}")]
    Malformed(&'static str),
}

/// Why a bot refused to mirror the master's quest accept.
///
/// Variants are listed in evaluation order; the first failing check wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Ineligibility {
    #[error("I already completed that quest.")]
    AlreadyCompleted,

    #[error("I already have that quest.")]
    AlreadyHave,

    #[error("I can't take that quest.")]
    CannotTake,

    #[error("My quest log is full.")]
    QuestLogFull,

    #[error("I can't take that quest because it requires that I take items, but my bags are full!")]
    BagsFull,
}

impl Ineligibility {
    /// The text the bot whispers to its master.
    pub fn message(self) -> String {
        self.to_string()
    }
}
