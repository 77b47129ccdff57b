use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::unbounded_channel;

/// One message said in the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub nick: String,
    pub text: String,
}

impl Line {
    pub fn new(nick: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            text: text.into(),
        }
    }
}

/// Where rendered notices are said.
pub trait Chat: Send + Sync {
    fn say(&self, text: &str);
}

/// Terminal as a one-person channel: stdin lines are said by the operator,
/// everything the bot says goes to stdout.
#[derive(Debug, Clone)]
pub struct Console {
    operator: String,
}

impl Console {
    pub fn new(operator: String) -> Self {
        Self { operator }
    }
    /// Spawns the stdin reader. The receiver closes on end of input.
    pub fn listen(&self) -> UnboundedReceiver<Line> {
        let (tx, rx) = unbounded_channel();
        let nick = self.operator.clone();
        tokio::spawn(async move {
            let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(text)) => {
                        if tx.send(Line::new(nick.as_str(), text)).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        log::warn!("[console] stdin read failed: {}", e);
                        break;
                    }
                }
            }
            log::debug!("[console] input closed");
        });
        rx
    }
}

impl Chat for Console {
    fn say(&self, text: &str) {
        println!("{}", text);
    }
}
