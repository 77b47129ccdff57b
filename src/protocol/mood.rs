/// Reaction a player can send to their partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Positive = 1,
    Skip = 2,
    Negative = 3,
}

impl Mood {
    pub fn code(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for Mood {
    type Error = i64;
    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Positive),
            2 => Ok(Self::Skip),
            3 => Ok(Self::Negative),
            x => Err(x),
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Skip => write!(f, "skip"),
            Self::Negative => write!(f, "negative"),
        }
    }
}
