use crate::Tag;

/// Service closed the game; no payload.
pub const GAME_CLOSE: Tag = 0;
/// Typing progress, in both directions.
pub const TYPING: Tag = 1;
/// Partner (or echoed own) hint.
pub const HINT: Tag = 2;
/// Partner (or echoed own) guess.
pub const GUESS: Tag = 3;
/// Round over, with score details.
pub const GAME_END: Tag = 4;
/// Replay prompt inbound, replay decision outbound.
pub const KEEP_PLAYING: Tag = 5;
/// Proposition rejected by the service.
pub const REFUSED_PROPOSITION: Tag = 6;
/// Round start.
pub const NEW_GAME: Tag = 7;
/// Partner reaction inbound, own reaction outbound.
pub const SENTIMENT: Tag = 9;
/// Periodic round snapshot.
pub const GAME_UPDATE: Tag = 11;
/// Round abandoned, in both directions.
pub const GIVE_UP: Tag = 12;
/// Outbound only.
pub const CANCEL: Tag = 13;
/// Queue status while waiting for a partner.
pub const MATCH_MAKING: Tag = 17;
/// Outbound only: a complete hint or guess.
pub const PROPOSITION: Tag = 100;
