//! Client and server message model.
//!
//! Both directions are closed sets. Messages are plain values built right
//! before encoding or right after decoding.

use crate::operation::{Operation, Variables};
use crate::protocol::{ClientMessageType, ServerMessageType};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Error message a server returns for an unknown persisted query hash
pub const PERSISTED_QUERY_NOT_FOUND: &str = "PersistedQueryNotFound";

/// Error code a server returns for an unknown persisted query hash
pub const PERSISTED_QUERY_NOT_FOUND_CODE: &str = "PERSISTED_QUERY_NOT_FOUND";

/// Messages sent from client to server
#[derive(Clone)]
pub enum ClientMessage {
    /// Open the session. Params are sent verbatim.
    Init { connection_params: Variables },

    /// Start a subscription.
    ///
    /// `send_document` only matters when `auto_persist` is set. Passing
    /// `send_document = true` with `auto_persist = false` is allowed; the
    /// document is sent either way.
    Start {
        subscription_id: String,
        operation: Arc<dyn Operation>,
        auto_persist: bool,
        send_document: bool,
    },

    /// Cancel one active subscription
    Stop { subscription_id: String },

    /// Close the session
    Terminate,
}

impl ClientMessage {
    pub fn init(connection_params: Variables) -> Self {
        ClientMessage::Init { connection_params }
    }

    pub fn start(
        subscription_id: impl Into<String>,
        operation: Arc<dyn Operation>,
        auto_persist: bool,
        send_document: bool,
    ) -> Self {
        ClientMessage::Start {
            subscription_id: subscription_id.into(),
            operation,
            auto_persist,
            send_document,
        }
    }

    pub fn stop(subscription_id: impl Into<String>) -> Self {
        ClientMessage::Stop {
            subscription_id: subscription_id.into(),
        }
    }

    pub fn terminate() -> Self {
        ClientMessage::Terminate
    }

    /// Wire tag of this message
    pub fn message_type(&self) -> ClientMessageType {
        match self {
            ClientMessage::Init { .. } => ClientMessageType::ConnectionInit,
            ClientMessage::Start { .. } => ClientMessageType::Subscribe,
            ClientMessage::Stop { .. } => ClientMessageType::Complete,
            ClientMessage::Terminate => ClientMessageType::ConnectionTerminate,
        }
    }

    /// Subscription id for `Start` and `Stop`
    pub fn subscription_id(&self) -> Option<&str> {
        match self {
            ClientMessage::Start {
                subscription_id, ..
            }
            | ClientMessage::Stop { subscription_id } => Some(subscription_id.as_str()),
            ClientMessage::Init { .. } | ClientMessage::Terminate => None,
        }
    }

    /// Resend form of a `Start` after the server rejected the persisted hash.
    ///
    /// Keeps the persisted query extension and adds the document. Any other
    /// message is returned unchanged.
    pub fn with_document(self) -> Self {
        match self {
            ClientMessage::Start {
                subscription_id,
                operation,
                auto_persist,
                ..
            } => ClientMessage::Start {
                subscription_id,
                operation,
                auto_persist,
                send_document: true,
            },
            other => other,
        }
    }
}

impl fmt::Debug for ClientMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientMessage::Init { connection_params } => f
                .debug_struct("Init")
                .field("connection_params", connection_params)
                .finish(),
            ClientMessage::Start {
                subscription_id,
                operation,
                auto_persist,
                send_document,
            } => f
                .debug_struct("Start")
                .field("subscription_id", subscription_id)
                .field("operation", &operation.name())
                .field("operation_id", &operation.id())
                .field("auto_persist", auto_persist)
                .field("send_document", send_document)
                .finish(),
            ClientMessage::Stop { subscription_id } => f
                .debug_struct("Stop")
                .field("subscription_id", subscription_id)
                .finish(),
            ClientMessage::Terminate => f.write_str("Terminate"),
        }
    }
}

/// Operations are compared by everything they put on the wire: name, id,
/// document and projected variables.
impl PartialEq for ClientMessage {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                ClientMessage::Init { connection_params: a },
                ClientMessage::Init { connection_params: b },
            ) => a == b,
            (
                ClientMessage::Start {
                    subscription_id: id_a,
                    operation: op_a,
                    auto_persist: persist_a,
                    send_document: send_a,
                },
                ClientMessage::Start {
                    subscription_id: id_b,
                    operation: op_b,
                    auto_persist: persist_b,
                    send_document: send_b,
                },
            ) => {
                id_a == id_b
                    && persist_a == persist_b
                    && send_a == send_b
                    && same_operation(op_a.as_ref(), op_b.as_ref())
            }
            (
                ClientMessage::Stop { subscription_id: a },
                ClientMessage::Stop { subscription_id: b },
            ) => a == b,
            (ClientMessage::Terminate, ClientMessage::Terminate) => true,
            _ => false,
        }
    }
}

fn same_operation(a: &dyn Operation, b: &dyn Operation) -> bool {
    a.name() == b.name()
        && a.id() == b.id()
        && a.document() == b.document()
        && a.variables().ok() == b.variables().ok()
}

/// Messages received from the server
#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    ConnectionAcknowledge,
    Data { id: String, payload: Value },
    ConnectionKeepAlive,
    Error { id: String, payload: Value },
    ConnectionError { payload: Value },
    Complete { id: String },
    /// Input that could not be decoded, kept verbatim
    Unsupported { raw: String },
}

impl ServerMessage {
    /// Wire tag of this message, `None` for `Unsupported`
    pub fn message_type(&self) -> Option<ServerMessageType> {
        match self {
            ServerMessage::ConnectionAcknowledge => Some(ServerMessageType::ConnectionAck),
            ServerMessage::Data { .. } => Some(ServerMessageType::Next),
            ServerMessage::ConnectionKeepAlive => Some(ServerMessageType::KeepAlive),
            ServerMessage::Error { .. } => Some(ServerMessageType::Error),
            ServerMessage::ConnectionError { .. } => Some(ServerMessageType::ConnectionError),
            ServerMessage::Complete { .. } => Some(ServerMessageType::Complete),
            ServerMessage::Unsupported { .. } => None,
        }
    }

    /// Subscription id for `Data`, `Error` and `Complete`
    pub fn id(&self) -> Option<&str> {
        match self {
            ServerMessage::Data { id, .. }
            | ServerMessage::Error { id, .. }
            | ServerMessage::Complete { id } => Some(id.as_str()),
            _ => None,
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, ServerMessage::Unsupported { .. })
    }

    /// Whether this is an `Error` rejecting an unknown persisted query hash.
    ///
    /// The payload may be a list of GraphQL errors, an object with an
    /// `errors` list, or a single error object.
    pub fn is_persisted_query_not_found(&self) -> bool {
        let ServerMessage::Error { payload, .. } = self else {
            return false;
        };

        let errors: &[Value] = match payload {
            Value::Array(errors) => errors.as_slice(),
            Value::Object(map) => match map.get("errors") {
                Some(Value::Array(errors)) => errors.as_slice(),
                _ => std::slice::from_ref(payload),
            },
            _ => return false,
        };

        errors.iter().any(|error| {
            error.get("message").and_then(Value::as_str) == Some(PERSISTED_QUERY_NOT_FOUND)
                || error
                    .get("extensions")
                    .and_then(|ext| ext.get("code"))
                    .and_then(Value::as_str)
                    == Some(PERSISTED_QUERY_NOT_FOUND_CODE)
        })
    }
}
