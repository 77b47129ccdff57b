//! lexiflaire Relay Binary
//!
//! Plays the lexiflaire word game on behalf of a chat channel.
//! The terminal stands in for the channel: type `!start` to begin.

use clap::Parser;
use lexiflaire::bridge::SupervisorConfig;
use lexiflaire::connection::Remote;
use lexiflaire::connection::StaticKey;
use lexiflaire::relay::*;
use lexiflaire::*;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    log();
    kys();
    let config = Config::parse();
    log::info!("[main] {} connecting to {}", config.nick, config.endpoint);
    let console = Console::new(config.operator.clone());
    let lines = console.listen();
    let remote = Remote::new(config.endpoint.clone(), StaticKey::from(config.key.clone()));
    let roles = Roles::new(config.roots.clone(), config.admins.clone());
    let supervisor = SupervisorConfig {
        retry: config.retry(),
    };
    let mut host = Host::new(Arc::new(console), Arc::new(remote), roles).with_supervisor(supervisor);
    if let Some(path) = config.stats.clone() {
        host = host.with_scoreboard(Arc::new(StatsFile::from(path)));
    }
    host.run(lines).await;
}
