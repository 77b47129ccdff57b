use super::*;
use crate::Tag;
use crate::protocol::*;
use futures::Sink;
use futures::Stream;
use std::fmt::Display;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;

/// What the session has to say next.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    Event(Event),
    /// The session is over; every relayed event has been delivered before this.
    Done(Closure),
}

/// Handle on one live connection and the two tasks serving it.
pub struct Session {
    requests: UnboundedSender<Request>,
    events: UnboundedReceiver<Event>,
    filter: Filter,
    stop: Option<oneshot::Sender<()>>,
    done: Option<oneshot::Receiver<Closure>>,
    closure: Option<Closure>,
    task: Option<JoinHandle<()>>,
}

impl Session {
    /// Spawns the reader and multiplexer over an established duplex.
    pub fn spawn<W, R, E>(sink: W, stream: R) -> Self
    where
        W: Sink<Message> + Send + Unpin + 'static,
        W::Error: Display,
        R: Stream<Item = Result<Message, E>> + Send + Unpin + 'static,
        E: Display + Send + 'static,
    {
        let filter = Filter::default();
        let (requests, outbound) = unbounded_channel();
        let (frames, inbound) = unbounded_channel();
        let (relay, events) = unbounded_channel();
        let (stop, halt) = oneshot::channel();
        let (finish, done) = oneshot::channel();
        let reader = tokio::spawn(Reader::new(stream, filter.clone(), frames).run());
        let mux = Multiplexer::new(sink, outbound, halt, inbound, relay, reader);
        let task = tokio::spawn(mux.run(finish));
        log::info!("[session] opened");
        Self {
            requests,
            events,
            filter,
            stop: Some(stop),
            done: Some(done),
            closure: None,
            task: Some(task),
        }
    }
}

impl Session {
    /// Queues a request for the multiplexer to write.
    pub fn send(&self, request: Request) {
        self.requests
            .send(request)
            .inspect_err(|e| log::warn!("[session] dropped {}: session closed", e.0))
            .ok();
    }
    /// Absorb the next inbound event carrying `tag`.
    pub fn suppress(&self, tag: Tag) {
        self.filter.expect(tag);
    }
    pub fn filter(&self) -> &Filter {
        &self.filter
    }
    /// Ends the session right away. Later calls do nothing.
    pub fn halt(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
    /// Next relayed event, or the closure once the session is over.
    /// Safe to cancel: nothing is lost if another branch wins a select.
    pub async fn next(&mut self) -> Update {
        if self.closure.is_none() {
            if let Some(event) = self.events.recv().await {
                return Update::Event(event);
            }
            let closure = match self.done.as_mut() {
                Some(done) => done.await.unwrap_or(Closure::Hangup),
                None => Closure::Hangup,
            };
            self.done = None;
            self.closure = Some(closure);
        }
        Update::Done(self.closure.clone().unwrap_or(Closure::Hangup))
    }
    /// Waits until both tasks have wound down.
    pub async fn join(mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::testing::*;
    use serde_json::Value;
    use serde_json::json;
    #[tokio::test]
    async fn suppression_absorbs_exactly_next_echo() {
        let (mut session, wire) = pair();
        session.suppress(TYPING);
        wire.push(1, json!({ "CurrentTyping": 1 }));
        wire.push(1, json!({ "CurrentTyping": 2 }));
        assert_eq!(
            session.next().await,
            Update::Event(Event::Typing(Typing { length: 2 }))
        );
        assert!(!session.filter().pending(TYPING));
        session.halt();
        assert_eq!(session.next().await, Update::Done(Closure::Halted));
    }
    #[tokio::test]
    async fn suppression_only_matches_its_tag() {
        let (mut session, wire) = pair();
        session.suppress(SENTIMENT);
        wire.push(1, json!({ "CurrentTyping": 4 }));
        assert_eq!(
            session.next().await,
            Update::Event(Event::Typing(Typing { length: 4 }))
        );
        assert!(session.filter().pending(SENTIMENT));
        session.halt();
        session.join().await;
    }
    #[tokio::test]
    async fn fourth_round_end_closes_session() {
        let (mut session, wire) = pair();
        wire.push(7, json!({ "RoundNumber": 4 }));
        wire.push(4, json!({ "Word": "lune" }));
        assert!(matches!(session.next().await, Update::Event(Event::NewGame(_))));
        assert!(matches!(session.next().await, Update::Event(Event::GameEnd(_))));
        assert_eq!(session.next().await, Update::Done(Closure::RoundCap));
        assert_eq!(session.next().await, Update::Done(Closure::RoundCap));
        session.join().await;
        assert_eq!(wire.written().await, vec![decline()]);
    }
    #[tokio::test]
    async fn early_rounds_keep_session_open() {
        let (mut session, wire) = pair();
        for round in 1..=3 {
            wire.push(7, json!({ "RoundNumber": round }));
            wire.push(4, json!({}));
        }
        wire.push(1, json!({ "CurrentTyping": 1 }));
        for _ in 0..6 {
            assert!(matches!(session.next().await, Update::Event(_)));
        }
        assert!(matches!(session.next().await, Update::Event(Event::Typing(_))));
        session.halt();
        assert_eq!(session.next().await, Update::Done(Closure::Halted));
        session.join().await;
        assert_eq!(wire.written().await, vec![decline()]);
    }
    #[tokio::test]
    async fn round_cap_follows_current_streak() {
        let (mut session, wire) = pair();
        wire.push(7, json!({ "RoundNumber": 3 }));
        wire.push(4, json!({}));
        wire.push(7, json!({ "RoundNumber": 1 }));
        wire.push(4, json!({}));
        wire.push(1, json!({ "CurrentTyping": 1 }));
        for _ in 0..4 {
            assert!(matches!(session.next().await, Update::Event(_)));
        }
        assert!(matches!(session.next().await, Update::Event(Event::Typing(_))));
        session.halt();
        session.join().await;
    }
    #[tokio::test]
    async fn game_close_declines_without_relaying() {
        let (mut session, wire) = pair();
        wire.push(0, Value::Null);
        assert_eq!(session.next().await, Update::Done(Closure::GameClosed));
        session.join().await;
        assert_eq!(wire.written().await, vec![decline()]);
    }
    #[tokio::test]
    async fn give_up_is_relayed_then_closes() {
        let (mut session, wire) = pair();
        wire.push(12, json!({}));
        assert_eq!(session.next().await, Update::Event(Event::GiveUp));
        assert_eq!(session.next().await, Update::Done(Closure::GaveUp));
        session.join().await;
        assert!(wire.written().await.is_empty());
    }
    #[tokio::test]
    async fn declined_replay_is_relayed_then_closes() {
        let (mut session, wire) = pair();
        wire.push(5, json!({ "Replay": true }));
        wire.push(5, json!({ "Replay": false }));
        assert_eq!(
            session.next().await,
            Update::Event(Event::KeepPlaying(KeepPlaying { replay: true }))
        );
        assert_eq!(
            session.next().await,
            Update::Event(Event::KeepPlaying(KeepPlaying { replay: false }))
        );
        assert_eq!(session.next().await, Update::Done(Closure::Declined));
        session.join().await;
    }
    #[tokio::test]
    async fn unknown_frame_is_fatal() {
        let (mut session, wire) = pair();
        wire.push(8, json!({}));
        wire.push(1, json!({}));
        assert_eq!(
            session.next().await,
            Update::Done(Closure::Decode(DecodeError::UnknownTag(8)))
        );
        session.join().await;
        assert!(wire.written().await.is_empty());
    }
    #[tokio::test]
    async fn halt_flushes_requests_in_order() {
        let (mut session, wire) = pair();
        session.send(Request::Typing("a".to_string()));
        session.send(Request::Proposition("a".to_string()));
        session.halt();
        assert_eq!(session.next().await, Update::Done(Closure::Halted));
        session.join().await;
        assert_eq!(
            wire.written().await,
            vec![
                json!({ "MessageType": 1, "Value": "a" }),
                json!({ "MessageType": 100, "Value": "a" }),
                decline(),
            ]
        );
    }
    #[tokio::test]
    async fn failed_writes_leave_session_running() {
        let (mut session, mut wire) = pair();
        wire.deafen();
        session.send(Request::GiveUp);
        wire.push(3, json!({ "Guess": "a" }));
        assert_eq!(
            session.next().await,
            Update::Event(Event::Guess(Guess {
                guess: "a".to_string()
            }))
        );
        session.halt();
        assert_eq!(session.next().await, Update::Done(Closure::Halted));
        session.join().await;
        assert!(wire.written().await.is_empty());
    }
    #[tokio::test]
    async fn ignores_control_frames_and_reports_hangup() {
        let (mut session, wire) = pair();
        wire.push_raw(Message::Ping(Vec::new().into()));
        wire.push(3, json!({ "Guess": "soleil" }));
        assert_eq!(
            session.next().await,
            Update::Event(Event::Guess(Guess {
                guess: "soleil".to_string()
            }))
        );
        wire.hangup();
        assert_eq!(session.next().await, Update::Done(Closure::Hangup));
        session.join().await;
        assert!(wire.written().await.is_empty());
    }
}
