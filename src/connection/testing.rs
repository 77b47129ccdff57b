//! In-memory far end of a connection, for exercising sessions in tests.
use super::*;
use futures::StreamExt;
use futures::channel::mpsc;
use serde_json::Value;
use serde_json::json;
use tokio_tungstenite::tungstenite::Error as WsError;
use tokio_tungstenite::tungstenite::Message;

pub(crate) struct Wire {
    frames: mpsc::UnboundedSender<Result<Message, WsError>>,
    written: mpsc::UnboundedReceiver<Message>,
}

/// A live session whose connection is the returned [`Wire`].
pub(crate) fn pair() -> (Session, Wire) {
    let (sink, written) = mpsc::unbounded::<Message>();
    let (frames, stream) = mpsc::unbounded::<Result<Message, WsError>>();
    (Session::spawn(sink, stream), Wire { frames, written })
}

impl Wire {
    pub(crate) fn push(&self, tag: i64, data: Value) {
        let text = json!({ "MessageType": tag, "Data": data }).to_string();
        self.push_raw(Message::Text(text.into()));
    }
    pub(crate) fn push_raw(&self, message: Message) {
        self.frames.unbounded_send(Ok(message)).expect("push frame");
    }
    /// Stops accepting writes; every later write fails.
    pub(crate) fn deafen(&mut self) {
        self.written.close();
    }
    pub(crate) fn hangup(&self) {
        self.frames.close_channel();
    }
    /// Everything written to the connection; call once the session is over.
    pub(crate) async fn written(self) -> Vec<Value> {
        self.written
            .filter_map(|message| async move {
                match message {
                    Message::Text(text) => serde_json::from_str(text.as_str()).ok(),
                    _ => None,
                }
            })
            .collect()
            .await
    }
}

/// The "do not keep playing" frame.
pub(crate) fn decline() -> Value {
    json!({ "MessageType": 5, "Value": false })
}
