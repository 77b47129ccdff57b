use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Command line and environment configuration of the relay binary.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Session key cookie handed out by the service
    #[arg(long, env = "LEXIFLAIRE_KEY", hide_env_values = true)]
    pub key: String,
    /// WebSocket update endpoint; the key is appended as the last path segment
    #[arg(long, env = "LEXIFLAIRE_ENDPOINT", default_value = crate::ENDPOINT)]
    pub endpoint: String,
    /// Name the bot goes by
    #[arg(long, default_value = "lexiflaire")]
    pub nick: String,
    /// Nick the console input is attributed to
    #[arg(long, default_value = "operator")]
    pub operator: String,
    /// Comma-separated nicks allowed every command
    #[arg(long, value_delimiter = ',', default_value = "operator")]
    pub roots: Vec<String>,
    /// Comma-separated nicks allowed to start, stop and react
    #[arg(long, value_delimiter = ',')]
    pub admins: Vec<String>,
    /// Seconds to wait between two sessions
    #[arg(long, default_value_t = crate::RETRY_DELAY.as_secs())]
    pub retry: u64,
    /// JSON statistics document served by the `!score` command
    #[arg(long, env = "LEXIFLAIRE_STATS")]
    pub stats: Option<PathBuf>,
}

impl Config {
    pub fn retry(&self) -> Duration {
        Duration::from_secs(self.retry)
    }
}
