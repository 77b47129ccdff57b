use crate::protocol::*;
use crate::*;
use rand::Rng;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Pause range between two simulated keystrokes.
#[derive(Debug, Clone, Copy)]
pub struct TypistConfig {
    pub min: Duration,
    pub max: Duration,
}

impl Default for TypistConfig {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(TYPING_DELAY_MIN),
            max: Duration::from_millis(TYPING_DELAY_MAX),
        }
    }
}

/// Submits text the way a person would: one growing prefix at a time,
/// with a jittered pause between keystrokes, then the full proposition.
#[derive(Debug, Clone, Default)]
pub struct Typist {
    config: TypistConfig,
}

impl Typist {
    pub fn new(config: TypistConfig) -> Self {
        Self { config }
    }

    /// Every request a submission of `text` produces, in order.
    pub fn keystrokes(text: &str) -> Vec<Request> {
        text.char_indices()
            .map(|(i, c)| Request::Typing(text[..i + c.len_utf8()].to_string()))
            .chain(std::iter::once(Request::Proposition(text.to_string())))
            .collect()
    }

    /// Spawns the submission. Requests go to `sink` as they are "typed".
    pub fn submit(&self, sink: UnboundedSender<Request>, text: String) -> Submission {
        self.follow(None, sink, text)
    }

    /// Like [`Typist::submit`], but typing starts only once `previous` is over.
    /// Cancelling the returned submission cancels `previous` too.
    pub fn follow(
        &self,
        previous: Option<Submission>,
        sink: UnboundedSender<Request>,
        text: String,
    ) -> Submission {
        let config = self.config;
        let task = tokio::spawn(async move {
            if let Some(previous) = previous {
                log::debug!("[typist] {:?} waits for the previous submission", text);
                previous.finish().await;
            }
            log::debug!("[typist] submitting {:?}", text);
            for request in Self::keystrokes(&text) {
                let typing = matches!(request, Request::Typing(_));
                if sink.send(request).is_err() {
                    log::debug!("[typist] sink closed, dropping submission");
                    return;
                }
                if typing {
                    tokio::time::sleep(Self::pause(&config)).await;
                }
            }
        });
        Submission(task)
    }

    fn pause(config: &TypistConfig) -> Duration {
        match config.min < config.max {
            true => rand::rng().random_range(config.min..config.max),
            false => config.min,
        }
    }
}

/// Handle on an in-flight submission. Dropping it stops the typing.
#[derive(Debug)]
pub struct Submission(JoinHandle<()>);

impl Submission {
    /// Still typing; a second submission must wait for this one.
    pub fn pending(&self) -> bool {
        !self.0.is_finished()
    }
    /// Stops typing mid-word. Nothing more is sent.
    pub fn cancel(&self) {
        self.0.abort();
    }
    pub async fn finish(mut self) {
        let _ = (&mut self.0).await;
    }
}

impl Drop for Submission {
    fn drop(&mut self) {
        self.0.abort();
    }
}
