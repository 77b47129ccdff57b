use super::*;
use crate::*;
use futures::StreamExt;
use std::sync::Arc;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::http::header;

/// Supplier of the session key the service hands out as a cookie.
/// Acquiring it over HTTP is someone else's job.
#[async_trait::async_trait]
pub trait KeySource: Send + Sync {
    async fn key(&self) -> Result<String, ConnectionError>;
}

/// A key obtained ahead of time.
#[derive(Debug, Clone)]
pub struct StaticKey(String);

impl From<String> for StaticKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

#[async_trait::async_trait]
impl KeySource for StaticKey {
    async fn key(&self) -> Result<String, ConnectionError> {
        match self.0.trim() {
            "" => Err(ConnectionError::Key("empty key".to_string())),
            key => Ok(key.to_string()),
        }
    }
}

/// Anything that can open a fresh [`Session`].
#[async_trait::async_trait]
pub trait Connect: Send + Sync {
    async fn open(&self) -> Result<Session, ConnectionError>;
}

/// The real game service, reached over a WebSocket.
pub struct Remote {
    endpoint: String,
    keys: Arc<dyn KeySource>,
}

impl Remote {
    pub fn new<K>(endpoint: String, keys: K) -> Self
    where
        K: KeySource + 'static,
    {
        Self {
            endpoint,
            keys: Arc::new(keys),
        }
    }
    /// Resource path with the key as its last segment.
    pub fn url(&self, key: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), key)
    }
}

#[async_trait::async_trait]
impl Connect for Remote {
    async fn open(&self) -> Result<Session, ConnectionError> {
        let key = self.keys.key().await?;
        let mut request = self
            .url(&key)
            .into_client_request()
            .map_err(|e| ConnectionError::Request(e.to_string()))?;
        request
            .headers_mut()
            .insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
        request
            .headers_mut()
            .insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
        let (stream, _) = tokio_tungstenite::connect_async(request)
            .await
            .map_err(ConnectionError::Handshake)?;
        log::info!("[remote] connected to {}", self.endpoint);
        let (sink, stream) = stream.split();
        Ok(Session::spawn(sink, stream))
    }
}
