use crate::connection::ConnectionError;
use crate::protocol::*;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

/// Something the application should hear about.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// A fresh session is looking for a partner.
    Searching,
    Event(Event),
}

/// Operator request to end the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    /// Finish the current round, then decline to keep playing.
    Soft,
    /// Close the session now.
    Hard,
}

/// Terminal condition reported by the supervisor.
#[derive(Debug)]
pub enum Fault {
    /// Service unreachable; no further session is attempted.
    Connection(ConnectionError),
    /// Playing stopped on request.
    Stopped,
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection(e) => write!(f, "{}", e),
            Self::Stopped => write!(f, "stop request"),
        }
    }
}

impl std::error::Error for Fault {}

/// Engine side of the channels.
pub struct Link {
    pub notices: UnboundedSender<Notice>,
    pub faults: UnboundedSender<Fault>,
    pub requests: UnboundedReceiver<Request>,
    pub stops: UnboundedReceiver<Stop>,
    pub aborts: UnboundedReceiver<()>,
}

/// Application side of the channels.
pub struct Handles {
    pub notices: UnboundedReceiver<Notice>,
    pub faults: UnboundedReceiver<Fault>,
    pub requests: UnboundedSender<Request>,
    pub stops: UnboundedSender<Stop>,
    pub aborts: UnboundedSender<()>,
}

/// What the application reads next.
#[derive(Debug)]
pub enum Feed {
    Notice(Notice),
    Fault(Fault),
    /// The engine is gone and has nothing left to say.
    Closed,
}

impl Link {
    /// Creates both ends of a fresh set of channels.
    pub fn pair() -> (Link, Handles) {
        let (notices, notices_rx) = unbounded_channel();
        let (faults, faults_rx) = unbounded_channel();
        let (requests_tx, requests) = unbounded_channel();
        let (stops_tx, stops) = unbounded_channel();
        let (aborts_tx, aborts) = unbounded_channel();
        let link = Link {
            notices,
            faults,
            requests,
            stops,
            aborts,
        };
        let handles = Handles {
            notices: notices_rx,
            faults: faults_rx,
            requests: requests_tx,
            stops: stops_tx,
            aborts: aborts_tx,
        };
        (link, handles)
    }
    pub fn notify(&self, notice: Notice) {
        self.notices
            .send(notice)
            .inspect_err(|_| log::debug!("[link] notice dropped, application gone"))
            .ok();
    }
    pub fn report(&self, fault: Fault) {
        self.faults
            .send(fault)
            .inspect_err(|e| log::warn!("[link] unreported fault: {}", e.0))
            .ok();
    }
}

impl Handles {
    /// Notices are drained before a fault, so the fault is always last.
    pub async fn next(&mut self) -> Feed {
        tokio::select! {
            biased;
            Some(notice) = self.notices.recv() => Feed::Notice(notice),
            Some(fault) = self.faults.recv() => Feed::Fault(fault),
            else => Feed::Closed,
        }
    }
    pub fn request(&self, request: Request) {
        self.requests
            .send(request)
            .inspect_err(|e| log::warn!("[link] dropped {}: engine gone", e.0))
            .ok();
    }
    pub fn stop(&self, stop: Stop) {
        let _ = self.stops.send(stop);
    }
    pub fn abort(&self) {
        let _ = self.aborts.send(());
    }
}
