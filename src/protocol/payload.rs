use super::*;
use crate::Seconds;
use serde::Deserialize;

// Fields missing from a payload take their zero value; a field of the wrong
// JSON type fails the whole decode.

/// Queue status while waiting to be paired.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct MatchMaking {
    pub queue_size: i64,
    pub players: i64,
    #[serde(rename = "Turns")]
    pub active_games: i64,
}

impl MatchMaking {
    /// Games queued ahead of ours.
    pub fn ahead(&self) -> i64 {
        (self.queue_size - 1).max(0)
    }
}

/// Partner typing progress: only the current length is disclosed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Typing {
    #[serde(rename = "CurrentTyping")]
    pub length: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Hint {
    #[serde(rename = "Prop")]
    pub hint: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Guess {
    #[serde(rename = "Guess")]
    pub guess: String,
}

/// Round outcome with scoring breakdown and partner identity.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GameEnd {
    pub partner: String,
    pub partner_rank: i64,
    pub is_win: bool,
    pub word: String,
    pub link: String,
    pub brik_bonus: i64,
    pub time_bonus: i64,
    pub player_score: i64,
    #[serde(rename = "RoundDuration")]
    pub duration: f64,
    pub word_bricks: f64,
    pub word_times: f64,
    #[serde(rename = "WordDiff")]
    pub difficulty: i64,
    #[serde(rename = "WordCluster")]
    pub cluster: i64,
    pub stars: Vec<String>,
}

impl GameEnd {
    /// Partner name and rank, when the service disclosed both.
    pub fn partner(&self) -> Option<(&str, i64)> {
        (!self.partner.is_empty() && self.partner_rank != 0)
            .then_some((self.partner.as_str(), self.partner_rank))
    }
}

/// Replay prompt: whether the partner wants another round.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct KeepPlaying {
    #[serde(rename = "Replay")]
    pub replay: bool,
}

/// Rejected proposition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Refusal {
    #[serde(rename = "Frb_cause")]
    pub reason: i64,
}

impl Refusal {
    /// Human-readable cause, if the code is documented.
    pub fn cause(&self) -> Option<&'static str> {
        match self.reason {
            1 => Some("the beginning is too similar"),
            2 => Some("the spelling is invalid"),
            3 => Some("the spelling is too similar"),
            4 => Some("special characters are forbidden"),
            5 => Some("the word is too long"),
            6 => Some("the ending is too similar"),
            _ => None,
        }
    }
}

/// Periodic snapshot of the round in progress.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GameUpdate {
    pub word: String,
    #[serde(rename = "RoundNumber")]
    pub round: i64,
    pub time_left: Seconds,
    #[serde(rename = "WordCluster")]
    pub cluster: i64,
    pub can_give_up: bool,
}

impl GameUpdate {
    /// Whether the round should be abandoned before it times out.
    pub fn should_give_up(&self) -> bool {
        self.can_give_up && self.time_left < crate::GIVE_UP_THRESHOLD
    }
}

/// Round start: a snapshot plus which side of the table we sit on.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewGame {
    #[serde(flatten)]
    pub update: GameUpdate,
    #[serde(rename = "IsGuesser", default)]
    pub is_guesser: bool,
}

impl NewGame {
    pub fn round(&self) -> i64 {
        self.update.round
    }
}

/// Partner reaction code.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Sentiment {
    #[serde(rename = "Sentiment")]
    pub code: i64,
}

impl Sentiment {
    pub fn mood(&self) -> Option<Mood> {
        Mood::try_from(self.code).ok()
    }
}
