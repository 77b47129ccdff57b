/// Errors raised while turning a frame into an [`super::Event`].
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Frame text is not an envelope at all.
    Envelope(String),
    /// Envelope carries a tag outside the documented table.
    UnknownTag(i64),
    /// Payload does not have the shape its tag requires.
    Payload { tag: i64, reason: String },
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Envelope(s) => write!(f, "malformed envelope: {}", s),
            Self::UnknownTag(t) => write!(f, "unknown message type {}", t),
            Self::Payload { tag, reason } => write!(f, "bad payload for type {}: {}", tag, reason),
        }
    }
}

impl std::error::Error for DecodeError {}
