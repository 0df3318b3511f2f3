//! Wire tags of the subscription protocol.
//!
//! Client and server vocabularies are kept in separate enums. Both contain a
//! `complete` tag: the client sends it to stop a subscription, the server sends
//! it when a subscription finished. Which one applies is fixed by direction.

use serde::{Serialize, Serializer};
use std::fmt;

// Client -> Server
pub const CONNECTION_INIT: &str = "connection_init";
pub const SUBSCRIBE: &str = "subscribe";
pub const COMPLETE: &str = "complete";
pub const CONNECTION_TERMINATE: &str = "connection_terminate";

// Server -> Client
pub const CONNECTION_ACK: &str = "connection_ack";
pub const NEXT: &str = "next";
pub const KEEP_ALIVE: &str = "ka";
pub const ERROR: &str = "error";
pub const CONNECTION_ERROR: &str = "connection_error";

/// Only supported version of the `persistedQuery` extension
pub const PERSISTED_QUERY_VERSION: u32 = 1;

/// Message types sent by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientMessageType {
    ConnectionInit,
    Subscribe,
    Complete,
    ConnectionTerminate,
}

impl ClientMessageType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ClientMessageType::ConnectionInit => CONNECTION_INIT,
            ClientMessageType::Subscribe => SUBSCRIBE,
            ClientMessageType::Complete => COMPLETE,
            ClientMessageType::ConnectionTerminate => CONNECTION_TERMINATE,
        }
    }
}

/// Message types sent by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerMessageType {
    ConnectionAck,
    Next,
    KeepAlive,
    Error,
    ConnectionError,
    Complete,
}

impl ServerMessageType {
    pub const fn as_str(self) -> &'static str {
        match self {
            ServerMessageType::ConnectionAck => CONNECTION_ACK,
            ServerMessageType::Next => NEXT,
            ServerMessageType::KeepAlive => KEEP_ALIVE,
            ServerMessageType::Error => ERROR,
            ServerMessageType::ConnectionError => CONNECTION_ERROR,
            ServerMessageType::Complete => COMPLETE,
        }
    }

    /// Look up a server message type by its wire tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            CONNECTION_ACK => Some(ServerMessageType::ConnectionAck),
            NEXT => Some(ServerMessageType::Next),
            KEEP_ALIVE => Some(ServerMessageType::KeepAlive),
            ERROR => Some(ServerMessageType::Error),
            CONNECTION_ERROR => Some(ServerMessageType::ConnectionError),
            COMPLETE => Some(ServerMessageType::Complete),
            _ => None,
        }
    }
}

impl Serialize for ClientMessageType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl Serialize for ServerMessageType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for ClientMessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ServerMessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_SERVER: [ServerMessageType; 6] = [
        ServerMessageType::ConnectionAck,
        ServerMessageType::Next,
        ServerMessageType::KeepAlive,
        ServerMessageType::Error,
        ServerMessageType::ConnectionError,
        ServerMessageType::Complete,
    ];

    #[test]
    fn test_client_tags() {
        assert_eq!(ClientMessageType::ConnectionInit.as_str(), "connection_init");
        assert_eq!(ClientMessageType::Subscribe.as_str(), "subscribe");
        assert_eq!(ClientMessageType::Complete.as_str(), "complete");
        assert_eq!(
            ClientMessageType::ConnectionTerminate.as_str(),
            "connection_terminate"
        );
    }

    #[test]
    fn test_server_tag_lookup_is_inverse_of_as_str() {
        for ty in ALL_SERVER {
            assert_eq!(ServerMessageType::from_tag(ty.as_str()), Some(ty));
        }
        assert_eq!(ServerMessageType::from_tag("ka"), Some(ServerMessageType::KeepAlive));
    }

    #[test]
    fn test_client_only_tags_are_not_server_tags() {
        assert_eq!(ServerMessageType::from_tag(CONNECTION_INIT), None);
        assert_eq!(ServerMessageType::from_tag(SUBSCRIBE), None);
        assert_eq!(ServerMessageType::from_tag(CONNECTION_TERMINATE), None);
        assert_eq!(ServerMessageType::from_tag("data"), None);
        assert_eq!(ServerMessageType::from_tag("CONNECTION_ACK"), None);
    }

    #[test]
    fn test_complete_is_shared() {
        assert_eq!(
            ClientMessageType::Complete.as_str(),
            ServerMessageType::Complete.as_str()
        );
    }

    #[test]
    fn test_serialize_matches_tag() {
        let json = serde_json::to_string(&ClientMessageType::Subscribe).unwrap();
        assert_eq!(json, "\"subscribe\"");

        let json = serde_json::to_string(&ServerMessageType::KeepAlive).unwrap();
        assert_eq!(json, "\"ka\"");
    }

    #[test]
    fn test_display() {
        assert_eq!(ClientMessageType::ConnectionTerminate.to_string(), "connection_terminate");
        assert_eq!(ServerMessageType::ConnectionError.to_string(), "connection_error");
    }
}
