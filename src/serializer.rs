//! Pluggable message serializer.
//!
//! The session layer talks to the wire through [`MessageSerializer`] so that a
//! different protocol dialect can be swapped in without touching it.

use crate::decoder::decode;
use crate::encoder::encode;
use crate::error::Result;
use crate::message::{ClientMessage, ServerMessage};

/// Converts messages to and from wire text
pub trait MessageSerializer: Send + Sync {
    /// Encode an outbound client message
    fn write_client_message(&self, message: &ClientMessage) -> Result<String>;

    /// Decode an inbound frame. Never fails; see [`ServerMessage::Unsupported`].
    fn read_server_message(&self, raw: &str) -> ServerMessage;
}

/// Serializer for the `graphql-transport-ws` dialect with persisted query support
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphqlWsSerializer;

impl MessageSerializer for GraphqlWsSerializer {
    fn write_client_message(&self, message: &ClientMessage) -> Result<String> {
        encode(message)
    }

    fn read_server_message(&self, raw: &str) -> ServerMessage {
        decode(raw)
    }
}
