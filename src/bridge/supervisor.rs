use super::*;
use crate::RETRY_DELAY;
use crate::connection::Connect;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy)]
pub struct SupervisorConfig {
    /// Pause between a finished session and the next one.
    pub retry: Duration,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self { retry: RETRY_DELAY }
    }
}

/// Keeps the bot in a game: one session after another, until told to stop
/// or the service can't be reached.
pub struct Supervisor {
    connector: Arc<dyn Connect>,
    controller: Controller,
    config: SupervisorConfig,
}

impl Supervisor {
    pub fn new(connector: Arc<dyn Connect>, link: Link, config: SupervisorConfig) -> Self {
        Self {
            connector,
            controller: Controller::new(link),
            config,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub async fn run(mut self) {
        loop {
            if self.controller.link().notices.is_closed() {
                log::info!("[supervisor] application gone");
                break;
            }
            let mut session = match self.connector.open().await {
                Ok(session) => session,
                Err(e) => {
                    log::error!("[supervisor] cannot open session: {}", e);
                    self.controller.link().report(Fault::Connection(e));
                    break;
                }
            };
            let stale = self.controller.flush();
            if stale > 0 {
                log::info!("[supervisor] dropped {} leftovers from the last session", stale);
            }
            self.controller.link().notify(Notice::Searching);
            let outcome = self.controller.drive(&mut session).await;
            session.join().await;
            match outcome {
                Outcome::Continue => tokio::time::sleep(self.config.retry).await,
                Outcome::Halt => {
                    self.controller.link().report(Fault::Stopped);
                    break;
                }
            }
        }
        log::info!("[supervisor] done");
    }
}
