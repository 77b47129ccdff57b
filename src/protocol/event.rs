use super::*;
use crate::Tag;
use serde::de::DeserializeOwned;

/// Everything the game service can push to us.
/// The envelope tag alone decides the variant and its payload shape.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Service closed the game.
    GameClose,
    /// Partner is typing.
    Typing(Typing),
    /// A hint was sent (by the partner, or our own echoed back).
    Hint(Hint),
    /// A guess was sent (by the partner, or our own echoed back).
    Guess(Guess),
    /// Round over.
    GameEnd(GameEnd),
    /// Replay prompt.
    KeepPlaying(KeepPlaying),
    /// Last proposition was rejected.
    RefusedProposition(Refusal),
    /// Round start.
    NewGame(NewGame),
    /// Partner reaction.
    Sentiment(Sentiment),
    /// Round snapshot.
    GameUpdate(GameUpdate),
    /// Round abandoned.
    GiveUp,
    /// Still waiting for a partner.
    MatchMaking(MatchMaking),
}

impl Event {
    /// Decodes one text frame.
    pub fn decode(frame: &str) -> Result<Self, DecodeError> {
        serde_json::from_str::<Envelope>(frame)
            .map_err(|e| DecodeError::Envelope(e.to_string()))
            .and_then(|envelope| Self::classify(envelope.tag, envelope.data))
    }

    /// Picks the variant for `tag` and decodes `data` into its payload.
    pub fn classify(tag: i64, data: serde_json::Value) -> Result<Self, DecodeError> {
        let kind = Tag::try_from(tag).map_err(|_| DecodeError::UnknownTag(tag))?;
        match kind {
            GAME_CLOSE => Ok(Self::GameClose),
            TYPING => Self::payload(tag, data).map(Self::Typing),
            HINT => Self::payload(tag, data).map(Self::Hint),
            GUESS => Self::payload(tag, data).map(Self::Guess),
            GAME_END => Self::payload(tag, data).map(Self::GameEnd),
            KEEP_PLAYING => Self::payload(tag, data).map(Self::KeepPlaying),
            REFUSED_PROPOSITION => Self::payload(tag, data).map(Self::RefusedProposition),
            NEW_GAME => Self::payload(tag, data).map(Self::NewGame),
            SENTIMENT => Self::payload(tag, data).map(Self::Sentiment),
            GAME_UPDATE => Self::payload(tag, data).map(Self::GameUpdate),
            GIVE_UP => Ok(Self::GiveUp),
            MATCH_MAKING => Self::payload(tag, data).map(Self::MatchMaking),
            _ => Err(DecodeError::UnknownTag(tag)),
        }
    }

    /// Tag this event travels under; the key used by echo suppression.
    pub fn tag(&self) -> Tag {
        match self {
            Self::GameClose => GAME_CLOSE,
            Self::Typing(_) => TYPING,
            Self::Hint(_) => HINT,
            Self::Guess(_) => GUESS,
            Self::GameEnd(_) => GAME_END,
            Self::KeepPlaying(_) => KEEP_PLAYING,
            Self::RefusedProposition(_) => REFUSED_PROPOSITION,
            Self::NewGame(_) => NEW_GAME,
            Self::Sentiment(_) => SENTIMENT,
            Self::GameUpdate(_) => GAME_UPDATE,
            Self::GiveUp => GIVE_UP,
            Self::MatchMaking(_) => MATCH_MAKING,
        }
    }

    fn payload<T>(tag: i64, data: serde_json::Value) -> Result<T, DecodeError>
    where
        T: DeserializeOwned,
    {
        let data = match data {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            data => data,
        };
        serde_json::from_value(data).map_err(|e| DecodeError::Payload {
            tag,
            reason: e.to_string(),
        })
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::GameClose => write!(f, "game closed"),
            Self::Typing(t) => write!(f, "typing ({} chars)", t.length),
            Self::Hint(h) => write!(f, "hint: {}", h.hint),
            Self::Guess(g) => write!(f, "guess: {}", g.guess),
            Self::GameEnd(e) => write!(f, "game end: {} (win: {})", e.word, e.is_win),
            Self::KeepPlaying(k) => write!(f, "keep playing: {}", k.replay),
            Self::RefusedProposition(r) => write!(f, "refused proposition ({})", r.reason),
            Self::NewGame(g) => write!(f, "round {} (guesser: {})", g.round(), g.is_guesser),
            Self::Sentiment(s) => write!(f, "sentiment {}", s.code),
            Self::GameUpdate(u) => write!(f, "round {} ({:.0}s left)", u.round, u.time_left),
            Self::GiveUp => write!(f, "give up"),
            Self::MatchMaking(m) => write!(f, "queue {} / {} players", m.queue_size, m.players),
        }
    }
}
