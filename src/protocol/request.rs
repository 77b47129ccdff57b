use super::*;
use crate::Tag;
use serde_json::json;

/// Actions we can ask the game service to perform.
#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    /// Partial text, sent while a proposition is being typed.
    Typing(String),
    /// Final hint or guess.
    Proposition(String),
    /// Reply to a replay prompt.
    KeepPlaying(bool),
    /// Abandon the current round.
    GiveUp,
    /// Reaction sent to the partner.
    Sentiment(Mood),
    Cancel,
}

impl Request {
    pub fn tag(&self) -> Tag {
        match self {
            Self::Typing(_) => TYPING,
            Self::Proposition(_) => PROPOSITION,
            Self::KeepPlaying(_) => KEEP_PLAYING,
            Self::GiveUp => GIVE_UP,
            Self::Sentiment(_) => SENTIMENT,
            Self::Cancel => CANCEL,
        }
    }
    /// Whether the service echoes this request straight back to us.
    /// Echoes must be absorbed before they reach the application.
    pub fn echoes(&self) -> bool {
        matches!(self, Self::Typing(_) | Self::Sentiment(_))
    }
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&Outbound::from(self))
    }
}

impl From<&Request> for Outbound {
    fn from(request: &Request) -> Self {
        let value = match request {
            Request::Typing(text) => json!(text),
            Request::Proposition(word) => json!(word),
            Request::KeepPlaying(replay) => json!(replay),
            Request::Sentiment(mood) => json!(mood.code()),
            Request::GiveUp => json!({}),
            Request::Cancel => json!({}),
        };
        Self {
            tag: request.tag(),
            value,
        }
    }
}

impl std::fmt::Display for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Typing(text) => write!(f, "typing {:?}", text),
            Self::Proposition(word) => write!(f, "propose {:?}", word),
            Self::KeepPlaying(replay) => write!(f, "keep playing: {}", replay),
            Self::GiveUp => write!(f, "give up"),
            Self::Sentiment(mood) => write!(f, "sentiment {}", mood),
            Self::Cancel => write!(f, "cancel"),
        }
    }
}
