use super::*;
use crate::connection::*;
use crate::protocol::*;

/// Whether the supervisor should open another session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Halt,
}

/// Replay bookkeeping for the session being driven.
#[derive(Debug)]
struct Replay {
    /// A reply to the replay prompt already went out this round.
    sent: bool,
    /// Cleared by a soft stop; the next reply declines.
    keep: bool,
}

impl Default for Replay {
    fn default() -> Self {
        Self {
            sent: false,
            keep: true,
        }
    }
}

/// Drives one session end to end, applying policy in both directions.
///
/// Inbound:
/// - NewGame re-arms the replay reply
/// - a replay prompt gets exactly one reply per round
/// - a declined replay ends the session, to be followed by a fresh one
/// - give up once the round is nearly out of time
///
/// Outbound:
/// - requests the service echoes back are registered with the echo filter
pub struct Controller {
    link: Link,
}

impl Controller {
    pub fn new(link: Link) -> Self {
        Self { link }
    }
    pub fn link(&self) -> &Link {
        &self.link
    }
    /// Drops requests and aborts left over from a session that is already over.
    /// Stops are kept; they outlive sessions.
    pub fn flush(&mut self) -> usize {
        let mut stale = 0;
        while let Ok(request) = self.link.requests.try_recv() {
            log::debug!("[controller] dropping stale {}", request);
            stale += 1;
        }
        while let Ok(()) = self.link.aborts.try_recv() {
            log::debug!("[controller] dropping stale abort");
            stale += 1;
        }
        stale
    }
    pub async fn drive(&mut self, session: &mut Session) -> Outcome {
        let mut replay = Replay::default();
        loop {
            tokio::select! {
                update = session.next() => match update {
                    Update::Done(closure) => {
                        match closure.is_policy() {
                            true => log::info!("[controller] session done: {}", closure),
                            false => log::warn!("[controller] session lost: {}", closure),
                        }
                        return Outcome::Continue;
                    }
                    Update::Event(event) => if let Some(outcome) = self.police(session, &mut replay, event) {
                        return outcome;
                    },
                },
                Some(request) = self.link.requests.recv() => self.forward(session, request),
                Some(()) = self.link.aborts.recv() => {
                    log::info!("[controller] session aborted");
                    session.halt();
                    return Outcome::Continue;
                }
                Some(stop) = self.link.stops.recv() => match stop {
                    Stop::Hard => {
                        log::info!("[controller] hard stop");
                        session.halt();
                        return Outcome::Halt;
                    }
                    Stop::Soft => {
                        log::info!("[controller] soft stop, declining at next replay prompt");
                        replay.keep = false;
                    }
                },
            }
        }
    }
}

impl Controller {
    fn police(&self, session: &mut Session, replay: &mut Replay, event: Event) -> Option<Outcome> {
        let outcome = match &event {
            Event::NewGame(_) => {
                replay.sent = false;
                None
            }
            Event::KeepPlaying(prompt) if !prompt.replay => Some(Outcome::Continue),
            Event::KeepPlaying(_) if !replay.sent => Self::reply(session, replay),
            Event::GameUpdate(update) if update.should_give_up() => {
                log::info!("[controller] {:.0}s left, giving up", update.time_left);
                session.send(Request::GiveUp);
                None
            }
            _ => None,
        };
        self.link.notify(Notice::Event(event));
        outcome
    }

    fn reply(session: &mut Session, replay: &mut Replay) -> Option<Outcome> {
        replay.sent = true;
        if replay.keep {
            session.suppress(KEEP_PLAYING);
        }
        session.send(Request::KeepPlaying(replay.keep));
        match replay.keep {
            true => None,
            false => {
                session.halt();
                Some(Outcome::Halt)
            }
        }
    }

    fn forward(&self, session: &Session, request: Request) {
        if request.echoes() {
            session.suppress(request.tag());
        }
        session.send(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::testing::*;
    use serde_json::json;
    use tokio::task::JoinHandle;
    fn drive(mut controller: Controller, mut session: Session) -> JoinHandle<(Outcome, Session)> {
        tokio::spawn(async move {
            let outcome = controller.drive(&mut session).await;
            (outcome, session)
        })
    }
    async fn event(handles: &mut Handles) -> Event {
        match handles.notices.recv().await {
            Some(Notice::Event(event)) => event,
            other => panic!("expected event notice, got {:?}", other),
        }
    }
    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }
    #[tokio::test]
    async fn declined_replay_continues_supervising() {
        let (link, mut handles) = Link::pair();
        let (mut session, wire) = pair();
        wire.push(5, json!({ "Replay": false }));
        let outcome = Controller::new(link).drive(&mut session).await;
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(
            event(&mut handles).await,
            Event::KeepPlaying(KeepPlaying { replay: false })
        );
        session.join().await;
        assert!(wire.written().await.is_empty());
    }
    #[tokio::test]
    async fn replay_prompt_gets_one_reply_per_round() {
        let (link, mut handles) = Link::pair();
        let (session, wire) = pair();
        let task = drive(Controller::new(link), session);
        wire.push(5, json!({ "Replay": true }));
        assert!(matches!(event(&mut handles).await, Event::KeepPlaying(_)));
        wire.push(5, json!({ "Replay": true })); // echo of our reply
        wire.push(5, json!({ "Replay": true }));
        assert!(matches!(event(&mut handles).await, Event::KeepPlaying(_)));
        handles.stop(Stop::Hard);
        let (outcome, session) = task.await.expect("controller task");
        assert_eq!(outcome, Outcome::Halt);
        session.join().await;
        assert_eq!(
            wire.written().await,
            vec![json!({ "MessageType": 5, "Value": true }), decline()]
        );
    }
    #[tokio::test]
    async fn new_game_rearms_replay_reply() {
        let (link, mut handles) = Link::pair();
        let (session, wire) = pair();
        let task = drive(Controller::new(link), session);
        wire.push(5, json!({ "Replay": true }));
        assert!(matches!(event(&mut handles).await, Event::KeepPlaying(_)));
        wire.push(5, json!({ "Replay": true })); // echo of our reply
        wire.push(7, json!({ "RoundNumber": 2 }));
        assert!(matches!(event(&mut handles).await, Event::NewGame(_)));
        wire.push(5, json!({ "Replay": true }));
        assert!(matches!(event(&mut handles).await, Event::KeepPlaying(_)));
        handles.stop(Stop::Hard);
        let (_, session) = task.await.expect("controller task");
        session.join().await;
        let accept = json!({ "MessageType": 5, "Value": true });
        assert_eq!(wire.written().await, vec![accept.clone(), accept, decline()]);
    }
    #[tokio::test]
    async fn soft_stop_declines_at_next_prompt() {
        let (link, handles) = Link::pair();
        let (session, wire) = pair();
        let task = drive(Controller::new(link), session);
        handles.stop(Stop::Soft);
        settle().await;
        wire.push(5, json!({ "Replay": true }));
        let (outcome, session) = task.await.expect("controller task");
        assert_eq!(outcome, Outcome::Halt);
        assert!(!session.filter().pending(KEEP_PLAYING));
        session.join().await;
        // the reply itself, then the decline written on halt
        assert_eq!(wire.written().await, vec![decline(), decline()]);
    }
    #[tokio::test]
    async fn hard_stop_ends_supervision() {
        let (link, handles) = Link::pair();
        let (session, wire) = pair();
        let task = drive(Controller::new(link), session);
        handles.stop(Stop::Hard);
        let (outcome, session) = task.await.expect("controller task");
        assert_eq!(outcome, Outcome::Halt);
        session.join().await;
        assert_eq!(wire.written().await, vec![decline()]);
    }
    #[tokio::test]
    async fn abort_closes_session_but_continues() {
        let (link, handles) = Link::pair();
        let (session, wire) = pair();
        let task = drive(Controller::new(link), session);
        handles.abort();
        let (outcome, session) = task.await.expect("controller task");
        assert_eq!(outcome, Outcome::Continue);
        session.join().await;
        assert_eq!(wire.written().await, vec![decline()]);
    }
    #[tokio::test]
    async fn gives_up_when_time_runs_low() {
        let (link, mut handles) = Link::pair();
        let (session, wire) = pair();
        let task = drive(Controller::new(link), session);
        wire.push(11, json!({ "TimeLeft": 45.0, "CanGiveUp": true }));
        wire.push(11, json!({ "TimeLeft": 12.0, "CanGiveUp": false }));
        wire.push(11, json!({ "TimeLeft": 12.0, "CanGiveUp": true }));
        for _ in 0..3 {
            assert!(matches!(event(&mut handles).await, Event::GameUpdate(_)));
        }
        handles.stop(Stop::Hard);
        let (_, session) = task.await.expect("controller task");
        session.join().await;
        assert_eq!(
            wire.written().await,
            vec![json!({ "MessageType": 12, "Value": {} }), decline()]
        );
    }
    #[tokio::test]
    async fn flush_drops_queued_requests() {
        let (link, handles) = Link::pair();
        let mut controller = Controller::new(link);
        handles.request(Request::Typing("st".to_string()));
        handles.request(Request::Sentiment(Mood::Positive));
        handles.abort();
        assert_eq!(controller.flush(), 3);
        assert_eq!(controller.flush(), 0);
        let (mut session, wire) = pair();
        handles.stop(Stop::Hard);
        assert_eq!(controller.drive(&mut session).await, Outcome::Halt);
        session.join().await;
        assert_eq!(wire.written().await, vec![decline()]);
    }
    #[tokio::test]
    async fn echoing_requests_are_suppressed() {
        let (link, mut handles) = Link::pair();
        let (session, wire) = pair();
        let task = drive(Controller::new(link), session);
        handles.request(Request::Typing("p".to_string()));
        handles.request(Request::Proposition("p".to_string()));
        settle().await;
        wire.push(1, json!({ "CurrentTyping": 1 }));
        wire.push(3, json!({ "Guess": "p" }));
        assert_eq!(
            event(&mut handles).await,
            Event::Guess(Guess {
                guess: "p".to_string()
            })
        );
        handles.stop(Stop::Hard);
        let (_, session) = task.await.expect("controller task");
        session.join().await;
        assert_eq!(
            wire.written().await,
            vec![
                json!({ "MessageType": 1, "Value": "p" }),
                json!({ "MessageType": 100, "Value": "p" }),
                decline(),
            ]
        );
    }
}
