use super::*;
use crate::protocol::*;
use crate::*;
use futures::Sink;
use futures::SinkExt;
use std::fmt::Display;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;

/// Write half of a session, and its lifecycle owner.
///
/// Services three sources with no fixed priority:
/// - outbound requests, written in submission order
/// - the stop signal, which flushes pending requests, declines replay and closes
/// - reader events, intercepted before being relayed upstream
///
/// When it ends, the connection is closed once, the reader is wound down,
/// and the cause is reported on the done channel.
pub struct Multiplexer<W> {
    sink: W,
    requests: UnboundedReceiver<Request>,
    stop: oneshot::Receiver<()>,
    frames: UnboundedReceiver<Event>,
    events: UnboundedSender<Event>,
    reader: JoinHandle<Closure>,
    round: i64,
}

impl<W> Multiplexer<W>
where
    W: Sink<Message> + Unpin,
    W::Error: Display,
{
    pub fn new(
        sink: W,
        requests: UnboundedReceiver<Request>,
        stop: oneshot::Receiver<()>,
        frames: UnboundedReceiver<Event>,
        events: UnboundedSender<Event>,
        reader: JoinHandle<Closure>,
    ) -> Self {
        Self {
            sink,
            requests,
            stop,
            frames,
            events,
            reader,
            round: 0,
        }
    }

    pub async fn run(mut self, done: oneshot::Sender<Closure>) {
        let closure = match self.pump().await {
            Some(closure) => {
                self.reader.abort();
                let _ = (&mut self.reader).await;
                closure
            }
            None => (&mut self.reader).await.unwrap_or(Closure::Hangup),
        };
        if let Err(e) = self.sink.close().await {
            log::warn!("[mux] close failed: {}", e);
        }
        log::info!("[mux] session ended: {}", closure);
        let _ = done.send(closure);
    }
}

impl<W> Multiplexer<W>
where
    W: Sink<Message> + Unpin,
    W::Error: Display,
{
    /// Runs until something ends the session.
    /// `None` means the reader stopped first and knows why.
    async fn pump(&mut self) -> Option<Closure> {
        loop {
            tokio::select! {
                Some(request) = self.requests.recv() => self.write(&request).await,
                _ = &mut self.stop => return Some(self.halt().await),
                frame = self.frames.recv() => match frame {
                    Some(event) => if let Some(closure) = self.intercept(event).await {
                        return Some(closure);
                    },
                    None => return None,
                },
            }
        }
    }

    async fn halt(&mut self) -> Closure {
        while let Ok(request) = self.requests.try_recv() {
            self.write(&request).await;
        }
        self.write(&Request::KeepPlaying(false)).await;
        Closure::Halted
    }

    async fn intercept(&mut self, event: Event) -> Option<Closure> {
        log::debug!("[mux] inbound: {}", event);
        match event {
            Event::GameClose => {
                self.write(&Request::KeepPlaying(false)).await;
                Some(Closure::GameClosed)
            }
            Event::NewGame(ref game) => {
                self.round = game.round();
                self.relay(event);
                None
            }
            Event::GameEnd(_) => {
                self.relay(event);
                match self.round >= ROUND_CAP {
                    true => {
                        self.write(&Request::KeepPlaying(false)).await;
                        Some(Closure::RoundCap)
                    }
                    false => None,
                }
            }
            Event::GiveUp => {
                self.relay(event);
                Some(Closure::GaveUp)
            }
            Event::KeepPlaying(KeepPlaying { replay: false }) => {
                self.relay(event);
                Some(Closure::Declined)
            }
            Event::KeepPlaying(_)
            | Event::Typing(_)
            | Event::Hint(_)
            | Event::Guess(_)
            | Event::RefusedProposition(_)
            | Event::Sentiment(_)
            | Event::GameUpdate(_)
            | Event::MatchMaking(_) => {
                self.relay(event);
                None
            }
        }
    }

    fn relay(&self, event: Event) {
        self.events
            .send(event)
            .inspect_err(|e| log::debug!("[mux] nobody listening for {}", e.0))
            .ok();
    }

    async fn write(&mut self, request: &Request) {
        let json = match request.to_json() {
            Ok(json) => json,
            Err(e) => return log::warn!("[mux] cannot encode {}: {}", request, e),
        };
        match self.sink.send(Message::Text(json.into())).await {
            Ok(()) => log::debug!("[mux] wrote {}", request),
            Err(e) => log::warn!("[mux] write failed for {}: {}", request, e),
        }
    }
}
