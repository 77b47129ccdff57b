use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;

/// Player statistics as published by the service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Stats {
    pub login: String,
    pub rounds: i64,
    pub rounds_won: i64,
    #[serde(rename = "EloM")]
    pub score: i64,
    #[serde(rename = "EloG")]
    pub guess_score: i64,
    #[serde(rename = "EloP")]
    pub propose_score: i64,
    pub rank: i64,
    pub gives_up: i64,
    pub stars: Stars,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Stars {
    #[serde(rename = "BlueStar")]
    pub blue: i64,
    #[serde(rename = "CooperStar")]
    pub copper: i64,
    #[serde(rename = "GoldStar")]
    pub gold: i64,
    #[serde(rename = "PurpleStar")]
    pub purple: i64,
    #[serde(rename = "SilverStar")]
    pub silver: i64,
}

impl Stats {
    /// Percentage of rounds won. No rounds played reads as 0%.
    pub fn win_rate(&self) -> f64 {
        100.0 * self.rounds_won as f64 / self.rounds.max(1) as f64
    }
    pub fn summary(&self) -> String {
        format!(
            "{} rounds played, {} won ({:.1}%), {} given up. Score: {}, rank {}.",
            self.rounds,
            self.rounds_won,
            self.win_rate(),
            self.gives_up,
            self.score,
            self.rank,
        )
    }
}

/// Source of the bot's statistics.
#[async_trait::async_trait]
pub trait Scoreboard: Send + Sync {
    async fn stats(&self) -> anyhow::Result<Stats>;
}

/// Statistics kept in a JSON document on disk, in the service's format.
#[derive(Debug, Clone)]
pub struct StatsFile(PathBuf);

impl From<PathBuf> for StatsFile {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

#[async_trait::async_trait]
impl Scoreboard for StatsFile {
    async fn stats(&self) -> anyhow::Result<Stats> {
        let text = tokio::fs::read_to_string(&self.0)
            .await
            .with_context(|| format!("reading {}", self.0.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", self.0.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn decodes_service_fields() {
        let stats: Stats = serde_json::from_str(
            r#"{"Login":"bot","Rounds":10,"RoundsWon":4,"EloM":1234,"EloG":1100,"EloP":1300,
                "Rank":42,"GivesUp":1,"Stars":{"BlueStar":2,"CooperStar":3}}"#,
        )
        .expect("decode stats");
        assert_eq!(stats.login, "bot");
        assert_eq!(stats.score, 1234);
        assert_eq!(stats.propose_score, 1300);
        assert_eq!(stats.stars.copper, 3);
        assert_eq!(stats.stars.gold, 0);
        assert_eq!(
            stats.summary(),
            "10 rounds played, 4 won (40.0%), 1 given up. Score: 1234, rank 42."
        );
    }
    #[test]
    fn no_rounds_no_division_by_zero() {
        let stats = Stats::default();
        assert_eq!(stats.win_rate(), 0.0);
    }
    #[tokio::test]
    async fn missing_file_is_an_error() {
        let board = StatsFile::from(PathBuf::from("/nonexistent/lexiflaire/stats.json"));
        let error = board.stats().await.expect_err("missing file");
        assert!(error.to_string().contains("reading"));
    }
}
