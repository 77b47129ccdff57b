//! Session bridge and policy engine for the lexiflaire word game.
//!
//! Keeps a duplex connection to the game service alive, classifies its
//! event stream, and relays it to a chat-facing control loop while applying
//! session policy on the way through.
//!
//! ## Architecture
//!
//! - [`protocol`]: Wire envelopes, the closed [`protocol::Event`] sum type, outbound requests
//! - [`humanize`]: Bot detection over typing timings, humanized text submission
//! - [`connection`]: Reader and multiplexer tasks owning one physical connection
//! - [`bridge`]: Per-session controller and the supervisor that keeps sessions coming
//! - [`relay`]: The upstream chat application: commands, notices, round bookkeeping
pub mod bridge;
pub mod connection;
pub mod humanize;
pub mod protocol;
pub mod relay;

#[cfg(feature = "server")]
mod config;
#[cfg(feature = "server")]
pub use config::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Numeric message type carried in every wire envelope.
pub type Tag = u8;
/// Elapsed wall time between two observed events, in milliseconds.
pub type Millis = i64;
/// Seconds left in the current round, as reported by the service.
pub type Seconds = f64;

// ============================================================================
// SESSION POLICY
// ============================================================================
/// A continuous partner streak is cut after this many rounds.
pub const ROUND_CAP: i64 = 4;
/// Give up automatically once fewer seconds than this remain.
pub const GIVE_UP_THRESHOLD: Seconds = 20.0;
/// Remaining-time announcements start below this many seconds.
pub const TIME_ANNOUNCE_START: Seconds = 20.0;
/// Pause between two sessions so the service is not hammered.
pub const RETRY_DELAY: std::time::Duration = std::time::Duration::from_secs(3);

// ============================================================================
// BOT DETECTION
// A fixed-delay opponent types with near-constant 200ms spacing.
// ============================================================================
/// Lower (exclusive) bound of the suspicious mean keystroke delta.
pub const BOT_MEAN_LOW: f64 = 198.0;
/// Upper (exclusive) bound of the suspicious mean keystroke delta.
pub const BOT_MEAN_HIGH: f64 = 202.0;
/// Maximum spread of keystroke deltas for a sample to look automated.
pub const BOT_SPREAD: f64 = 2.0;

// ============================================================================
// HUMANIZED TYPING
// ============================================================================
/// Shortest pause between two simulated keystrokes, in milliseconds.
pub const TYPING_DELAY_MIN: u64 = 33;
/// Upper (exclusive) bound of the pause between keystrokes, in milliseconds.
pub const TYPING_DELAY_MAX: u64 = 88;

// ============================================================================
// ANNOUNCEMENT THROTTLES
// ============================================================================
/// Minimum spacing between two "partner is typing" announcements.
pub const TYPING_ANNOUNCE_INTERVAL: std::time::Duration = std::time::Duration::from_millis(4500);
/// Minimum spacing between two queue position announcements.
pub const QUEUE_ANNOUNCE_INTERVAL: std::time::Duration = std::time::Duration::from_secs(6);
/// Minimum spacing between two partner sentiment announcements.
pub const SENTIMENT_ANNOUNCE_INTERVAL: std::time::Duration = std::time::Duration::from_secs(2);

// ============================================================================
// REMOTE SERVICE
// ============================================================================
/// Update endpoint; the session key is appended as the last path segment.
pub const ENDPOINT: &str = "ws://lexiflaire.com/wsupdate/";
/// Browser user agent expected by the service.
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:87.0) Gecko/20100101 Firefox/87.0";

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Terminal at INFO, plus a DEBUG transcript of the session traffic
/// under `logs/`, one file per run.
/// WebSocket library internals are left out of both.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .add_filter_ignore_str("tungstenite")
        .add_filter_ignore_str("tokio_tungstenite")
        .build();
    let started = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    let path = logfile(started);
    let transcript = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(&path).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, transcript]).expect("initialize logger");
    log::info!("[main] transcript at {}", path);
}

#[cfg(feature = "server")]
fn logfile(started: u64) -> String {
    format!("logs/lexiflaire-{}.log", started)
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
/// The open connection is dropped without a final keep-playing reply.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            log::warn!("violent interrupt received, exiting immediately");
            std::process::exit(0);
        }
    });
}
