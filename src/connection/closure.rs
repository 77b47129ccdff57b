use crate::protocol::DecodeError;

/// Why a session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Closure {
    /// Service closed the game.
    GameClosed,
    /// Partner streak reached the round cap.
    RoundCap,
    /// Round was abandoned.
    GaveUp,
    /// Partner declined another round.
    Declined,
    /// Stop signal received.
    Halted,
    /// Connection closed or failed underneath us.
    Hangup,
    /// A frame could not be understood.
    Decode(DecodeError),
}

impl Closure {
    /// Recognized end-of-game conditions, as opposed to transport trouble.
    pub fn is_policy(&self) -> bool {
        !matches!(self, Self::Hangup | Self::Decode(_))
    }
}

impl std::fmt::Display for Closure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GameClosed => write!(f, "game closed"),
            Self::RoundCap => write!(f, "round cap reached"),
            Self::GaveUp => write!(f, "round given up"),
            Self::Declined => write!(f, "replay declined"),
            Self::Halted => write!(f, "stopped"),
            Self::Hangup => write!(f, "connection lost"),
            Self::Decode(e) => write!(f, "{}", e),
        }
    }
}
