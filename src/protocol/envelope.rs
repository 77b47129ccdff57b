use crate::Tag;
use serde::Deserialize;
use serde::Serialize;

/// Raw inbound frame before classification.
/// The payload is kept opaque until the tag picks its shape.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(rename = "MessageType")]
    pub tag: i64,
    #[serde(rename = "Data", default)]
    pub data: serde_json::Value,
}

/// Outbound frame as written to the connection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outbound {
    #[serde(rename = "MessageType")]
    pub tag: Tag,
    #[serde(rename = "Value")]
    pub value: serde_json::Value,
}
