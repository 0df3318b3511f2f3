//! Client message encoder.
//!
//! Renders a [`ClientMessage`] into the JSON text sent over the socket:
//!
//! ```json
//! {"type":"subscribe","id":"1","payload":{
//!   "variables":{},
//!   "operationName":"Ticker",
//!   "extensions":{"persistedQuery":{"version":1,"sha256Hash":"ecf4edb4..."}}
//! }}
//! ```
//!
//! `query` is included unless the subscription is auto-persisted without its
//! document. `extensions.persistedQuery` is included only when auto-persisted.

use crate::error::{Error, Result};
use crate::message::ClientMessage;
use crate::operation::{Operation, Variables};
use crate::protocol::{ClientMessageType, PERSISTED_QUERY_VERSION};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Persisted query extension in a subscribe payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedQueryExtension {
    /// APQ version (currently always 1)
    pub version: u32,
    /// Operation id
    pub sha256_hash: String,
}

impl PersistedQueryExtension {
    pub fn new(sha256_hash: impl Into<String>) -> Self {
        Self {
            version: PERSISTED_QUERY_VERSION,
            sha256_hash: sha256_hash.into(),
        }
    }
}

/// Protocol message envelope
#[derive(Serialize)]
struct WireMessage<'a> {
    #[serde(rename = "type")]
    message_type: ClientMessageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<WirePayload<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum WirePayload<'a> {
    ConnectionParams(&'a Variables),
    Subscribe(SubscribePayload<'a>),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubscribePayload<'a> {
    variables: Variables,
    operation_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extensions: Option<Extensions>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Extensions {
    persisted_query: PersistedQueryExtension,
}

/// Encode a client message to wire text.
///
/// Fails only when the operation's variables cannot be projected, or when the
/// document has to be sent and the operation carries none.
pub fn encode(message: &ClientMessage) -> Result<String> {
    let wire = wire_message(message)?;
    let text = serde_json::to_string(&wire)?;
    trace!(
        message_type = %message.message_type(),
        id = ?message.subscription_id(),
        "Encoded client message"
    );
    Ok(text)
}

/// Encode a client message to a JSON value
pub fn encode_value(message: &ClientMessage) -> Result<serde_json::Value> {
    let wire = wire_message(message)?;
    Ok(serde_json::to_value(&wire)?)
}

fn wire_message(message: &ClientMessage) -> Result<WireMessage<'_>> {
    let (id, payload) = match message {
        ClientMessage::Init { connection_params } => {
            (None, Some(WirePayload::ConnectionParams(connection_params)))
        }
        ClientMessage::Start {
            subscription_id,
            operation,
            auto_persist,
            send_document,
        } => (
            Some(subscription_id.as_str()),
            Some(WirePayload::Subscribe(subscribe_payload(
                operation.as_ref(),
                *auto_persist,
                *send_document,
            )?)),
        ),
        ClientMessage::Stop { subscription_id } => (Some(subscription_id.as_str()), None),
        ClientMessage::Terminate => (None, None),
    };

    Ok(WireMessage {
        message_type: message.message_type(),
        id,
        payload,
    })
}

fn subscribe_payload(
    operation: &dyn Operation,
    auto_persist: bool,
    send_document: bool,
) -> Result<SubscribePayload<'_>> {
    let query = if !auto_persist || send_document {
        let document = operation.document().ok_or_else(|| Error::MissingDocument {
            operation: operation.name().to_string(),
        })?;
        Some(document)
    } else {
        None
    };

    let extensions = auto_persist.then(|| Extensions {
        persisted_query: PersistedQueryExtension::new(operation.id()),
    });

    Ok(SubscribePayload {
        variables: operation.variables()?,
        operation_name: operation.name(),
        query,
        extensions,
    })
}
