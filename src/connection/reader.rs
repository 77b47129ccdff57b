use super::*;
use crate::protocol::*;
use futures::Stream;
use futures::StreamExt;
use std::fmt::Display;
use tokio::sync::mpsc::UnboundedSender;
use tokio_tungstenite::tungstenite::Message;

/// Read half of a session.
///
/// - Decodes each text frame into an [`Event`]
/// - Drops the event if the [`Filter`] was expecting its echo
/// - Forwards everything else to the multiplexer, in arrival order
///
/// A frame that fails to decode ends the reader, and with it the session.
pub struct Reader<R> {
    stream: R,
    filter: Filter,
    sender: UnboundedSender<Event>,
}

impl<R, E> Reader<R>
where
    R: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    pub fn new(stream: R, filter: Filter, sender: UnboundedSender<Event>) -> Self {
        Self {
            stream,
            filter,
            sender,
        }
    }
    pub async fn run(mut self) -> Closure {
        while let Some(frame) = self.stream.next().await {
            let text = match frame {
                Ok(Message::Text(text)) => text,
                Ok(Message::Close(_)) => {
                    log::debug!("[reader] close frame received");
                    break;
                }
                Ok(_) => continue,
                Err(e) => {
                    log::warn!("[reader] read failed: {}", e);
                    break;
                }
            };
            let event = match Event::decode(text.as_str()) {
                Ok(event) => event,
                Err(e) => {
                    log::error!("[reader] {}", e);
                    return Closure::Decode(e);
                }
            };
            if self.filter.take(event.tag()) {
                log::debug!("[reader] filtered event of type {}", event.tag());
                continue;
            }
            if self.sender.send(event).is_err() {
                break;
            }
        }
        Closure::Hangup
    }
}
