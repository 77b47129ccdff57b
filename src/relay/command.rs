use super::*;
use crate::protocol::Mood;
use std::collections::HashSet;

/// Letters accepted in a proposition on top of ASCII ones.
const ACCENTED: &str = "àâäéèêëïîöôûüùÿŷœæ";

/// Who may do what. Roots are implicitly admins.
#[derive(Debug, Clone, Default)]
pub struct Roles {
    roots: HashSet<String>,
    admins: HashSet<String>,
}

impl Roles {
    pub fn new<R, A>(roots: R, admins: A) -> Self
    where
        R: IntoIterator<Item = String>,
        A: IntoIterator<Item = String>,
    {
        let keep = |nick: &String| !nick.trim().is_empty();
        Self {
            roots: roots.into_iter().filter(keep).collect(),
            admins: admins.into_iter().filter(keep).collect(),
        }
    }
    pub fn is_root(&self, nick: &str) -> bool {
        self.roots.contains(nick)
    }
    pub fn is_admin(&self, nick: &str) -> bool {
        self.is_root(nick) || self.admins.contains(nick)
    }
}

/// What a chat line asks the bot to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    HardStop,
    Quit,
    Sentiment(Mood),
    Score,
    Propose(String),
}

impl Command {
    /// Interprets `line` given who said it and the current state.
    /// Lines that ask for nothing, or for something not allowed now, yield `None`.
    pub fn parse(line: &Line, roles: &Roles, playing: bool, proposing: bool) -> Option<Self> {
        let admin = roles.is_admin(&line.nick);
        let root = roles.is_root(&line.nick);
        match line.text.as_str() {
            "!start" if admin && !playing => Some(Self::Start),
            "!stop" if admin && playing => Some(Self::Stop),
            "!hardstop" if root && playing => Some(Self::HardStop),
            "!quit" if root => Some(Self::Quit),
            "!nice" if admin => Some(Self::Sentiment(Mood::Positive)),
            "!main" if admin => Some(Self::Sentiment(Mood::Skip)),
            "!ffs" if admin => Some(Self::Sentiment(Mood::Negative)),
            "!score" if admin => Some(Self::Score),
            text if proposing && is_word(text) => Some(Self::Propose(text.trim_end().to_string())),
            _ => None,
        }
    }
}

/// A single word of letters, optionally followed by whitespace.
pub fn is_word(text: &str) -> bool {
    let word = text.trim_end();
    !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphabetic() || ACCENTED.contains(c))
}
