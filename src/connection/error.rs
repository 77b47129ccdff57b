/// Failure to establish a session. Nothing is spawned when this is returned.
#[derive(Debug)]
pub enum ConnectionError {
    /// No session key could be obtained.
    Key(String),
    /// Endpoint or headers could not form a valid request.
    Request(String),
    /// WebSocket handshake failed.
    Handshake(tokio_tungstenite::tungstenite::Error),
}

impl std::fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Key(s) => write!(f, "no session key: {}", s),
            Self::Request(s) => write!(f, "invalid request: {}", s),
            Self::Handshake(e) => write!(f, "handshake failed: {}", e),
        }
    }
}

impl std::error::Error for ConnectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Handshake(e) => Some(e),
            _ => None,
        }
    }
}
