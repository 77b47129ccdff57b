use super::*;
use crate::bridge::*;
use crate::connection::Connect;
use crate::humanize::*;
use crate::protocol::*;
use crate::*;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedReceiver;

/// The relay application: turns chat lines into commands for the bridge,
/// and bridge notices into chat lines.
///
/// Playing state lives here. While playing, the host holds the [`Handles`]
/// of a running [`Supervisor`]; a fault drops them and returns to idle.
pub struct Host {
    chat: Arc<dyn Chat>,
    connector: Arc<dyn Connect>,
    scoreboard: Option<Arc<dyn Scoreboard>>,
    roles: Roles,
    typist: Typist,
    supervisor: SupervisorConfig,
    handles: Option<Handles>,
    round: Option<NewGame>,
    /// Our side holds the word, or has just been answered.
    turn: bool,
    /// A chat word would be taken as our next proposition.
    proposing: bool,
    /// Next remaining-time announcement happens at or below this.
    countdown: Seconds,
    timings: Timings,
    queue: Throttle,
    typing: Throttle,
    sentiment: Throttle,
    total: i64,
    submission: Option<Submission>,
}

impl Host {
    pub fn new(chat: Arc<dyn Chat>, connector: Arc<dyn Connect>, roles: Roles) -> Self {
        Self {
            chat,
            connector,
            roles,
            scoreboard: None,
            typist: Typist::default(),
            supervisor: SupervisorConfig::default(),
            handles: None,
            round: None,
            turn: false,
            proposing: false,
            countdown: TIME_ANNOUNCE_START,
            timings: Timings::default(),
            queue: Throttle::new(QUEUE_ANNOUNCE_INTERVAL),
            typing: Throttle::new(TYPING_ANNOUNCE_INTERVAL),
            sentiment: Throttle::new(SENTIMENT_ANNOUNCE_INTERVAL),
            total: 0,
            submission: None,
        }
    }
    pub fn with_scoreboard(mut self, scoreboard: Arc<dyn Scoreboard>) -> Self {
        self.scoreboard = Some(scoreboard);
        self
    }
    pub fn with_supervisor(mut self, config: SupervisorConfig) -> Self {
        self.supervisor = config;
        self
    }
    pub fn playing(&self) -> bool {
        self.handles.is_some()
    }
    pub fn proposing(&self) -> bool {
        self.proposing
    }
    /// Cumulative score over every round since startup.
    pub fn total(&self) -> i64 {
        self.total
    }

    /// Serves chat lines and bridge notices until `!quit` or end of input.
    pub async fn run(mut self, mut lines: UnboundedReceiver<Line>) {
        log::info!("[host] ready");
        self.chat.say("Hi, it's me.");
        loop {
            tokio::select! {
                line = lines.recv() => match line {
                    Some(line) => if self.line(line) {
                        break;
                    },
                    None => break,
                },
                feed = Self::next(&mut self.handles) => self.feed(feed, Instant::now()),
            }
        }
        self.halt();
        log::info!("[host] quitting");
    }
}

impl Host {
    async fn next(handles: &mut Option<Handles>) -> Feed {
        match handles {
            Some(handles) => handles.next().await,
            None => std::future::pending().await,
        }
    }

    /// Handles one chat line. Returns whether to quit.
    fn line(&mut self, line: Line) -> bool {
        let command = Command::parse(&line, &self.roles, self.playing(), self.proposing);
        let Some(command) = command else {
            return false;
        };
        log::info!("[host] {} asks for {:?}", line.nick, command);
        match command {
            Command::Quit => return true,
            Command::Start => self.start(),
            Command::Stop => {
                self.chat.say("OK, stopping after this round.");
                self.stop(Stop::Soft);
            }
            Command::HardStop => self.stop(Stop::Hard),
            Command::Sentiment(mood) => self.request(Request::Sentiment(mood)),
            Command::Score => self.score(),
            Command::Propose(word) => self.propose(word),
        }
        false
    }

    fn start(&mut self) {
        let (link, handles) = Link::pair();
        Supervisor::new(self.connector.clone(), link, self.supervisor).spawn();
        self.handles = Some(handles);
    }

    fn stop(&self, stop: Stop) {
        if let Some(handles) = self.handles.as_ref() {
            handles.stop(stop);
        }
    }

    fn request(&self, request: Request) {
        match self.handles.as_ref() {
            Some(handles) => handles.request(request),
            None => log::debug!("[host] not playing, dropping {}", request),
        }
    }

    fn score(&self) {
        let Some(scoreboard) = self.scoreboard.clone() else {
            return log::warn!("[host] no scoreboard configured");
        };
        let chat = self.chat.clone();
        tokio::spawn(async move {
            match scoreboard.stats().await {
                Ok(stats) => chat.say(&stats.summary()),
                Err(e) => log::warn!("[host] statistics unavailable: {:#}", e),
            }
        });
    }

    fn propose(&mut self, word: String) {
        let Some(handles) = self.handles.as_ref() else {
            return;
        };
        self.proposing = false;
        self.typing.arm(Instant::now());
        let previous = self.submission.take().filter(Submission::pending);
        self.submission = Some(self.typist.follow(previous, handles.requests.clone(), word));
    }

    /// Whatever is still being typed belonged to a session that is over.
    fn silence(&mut self) {
        if let Some(submission) = self.submission.take() {
            log::debug!("[host] cancelling submission");
            submission.cancel();
        }
    }

    /// Back to idle: no session, nothing left typing.
    fn halt(&mut self) {
        self.handles = None;
        self.round = None;
        self.proposing = false;
        self.silence();
    }
}

impl Host {
    fn feed(&mut self, feed: Feed, now: Instant) {
        match feed {
            Feed::Notice(notice) => self.notice(notice, now),
            Feed::Fault(fault) => {
                log::warn!("[host] aborted: {}", fault);
                self.chat.say(&format!("Aborted! {}", fault));
                self.halt();
            }
            Feed::Closed => {
                log::warn!("[host] bridge went away");
                self.halt();
            }
        }
    }

    fn notice(&mut self, notice: Notice, now: Instant) {
        match notice {
            Notice::Searching => {
                self.silence();
                self.queue.arm(now);
                self.chat.say("Looking for a game, !stop to stop.");
            }
            Notice::Event(event) => self.event(event, now),
        }
    }

    fn event(&mut self, event: Event, now: Instant) {
        match event {
            Event::MatchMaking(queue) => {
                if self.queue.ready(now) {
                    self.chat.say(&format!(
                        "Still queued. {} players, {} games ahead of ours.",
                        queue.players,
                        queue.ahead()
                    ));
                }
            }
            Event::NewGame(game) => self.new_game(game),
            Event::GameEnd(end) => self.game_end(end),
            Event::GameUpdate(update) => {
                if update.time_left > 0.0 && update.time_left <= self.countdown {
                    self.countdown /= 2.0;
                    self.chat
                        .say(&format!("{:.0} seconds left", update.time_left));
                }
            }
            Event::GiveUp => self.chat.say("Round given up."),
            Event::Guess(guess) => {
                if self.automated() {
                    return;
                }
                match self.round.as_ref().map(|r| r.is_guesser) {
                    Some(false) => {
                        self.answered();
                        self.chat
                            .say(&format!("Partner guesses: {}", guess.guess));
                    }
                    Some(true) => self.chat.say(&format!("Guess sent: {}", guess.guess)),
                    None => {}
                }
            }
            Event::Hint(hint) => {
                if self.automated() {
                    return;
                }
                match self.round.as_ref().map(|r| r.is_guesser) {
                    Some(true) => {
                        self.answered();
                        self.chat.say(&format!("Partner hints: {}", hint.hint));
                    }
                    Some(false) => self.chat.say(&format!("Hint sent: {}", hint.hint)),
                    None => {}
                }
            }
            Event::RefusedProposition(refusal) => self.refused(refusal),
            Event::Sentiment(sentiment) => {
                if let Some(mood) = sentiment.mood() {
                    if self.sentiment.ready(now) {
                        self.chat.say(&format!("Partner {}.", Self::mood(mood)));
                    }
                }
            }
            Event::Typing(_) => {
                self.timings.tick(now);
                if self.typing.ready(now) {
                    self.chat.say("[…]");
                }
            }
            Event::KeepPlaying(_) | Event::GameClose => {}
        }
    }

    fn new_game(&mut self, game: NewGame) {
        self.typing.reset();
        self.sentiment.reset();
        self.timings.reset();
        self.countdown = TIME_ANNOUNCE_START;
        self.turn = !game.is_guesser;
        self.proposing = !game.is_guesser;
        match game.is_guesser {
            true => self.chat.say("You are guessing…"),
            false => self
                .chat
                .say(&format!("Make them guess: {}", game.update.word)),
        }
        self.round = Some(game);
    }

    fn game_end(&mut self, end: GameEnd) {
        self.round = None;
        self.total += end.player_score;
        let outcome = match end.is_win {
            true => "won",
            false => "lost",
        };
        let partner = end
            .partner()
            .map(|(name, rank)| format!(" You played with {}, rank {}.", name, rank))
            .unwrap_or_default();
        self.chat.say(&format!(
            "It's {}, the word was {}, {} (total: {}).{}",
            outcome, end.word, end.player_score, self.total, partner
        ));
    }

    fn refused(&mut self, refusal: Refusal) {
        if self.round.is_none() {
            return;
        }
        self.timings.reset();
        let cause = refusal.cause().unwrap_or("unknown reason");
        match self.turn {
            true => {
                self.proposing = true;
                self.chat
                    .say(&format!("Invalid proposition: {}. Try again!", cause));
            }
            false => self
                .chat
                .say(&format!("Partner's proposition refused: {}", cause)),
        }
    }

    /// The partner replied; it's our move.
    fn answered(&mut self) {
        self.turn = true;
        self.proposing = true;
    }

    /// Runs the bot check on the partner's typing so far.
    /// A bot gets the session aborted.
    fn automated(&mut self) -> bool {
        if !self.timings.check() {
            return false;
        }
        self.chat.say("Oh no, it's the HAL9000 bot :( Giving up.");
        if let Some(handles) = self.handles.as_ref() {
            handles.abort();
        }
        true
    }

    fn mood(mood: Mood) -> &'static str {
        match mood {
            Mood::Positive => "is delighted",
            Mood::Skip => "wants a turn",
            Mood::Negative => "is sulking",
        }
    }
}
