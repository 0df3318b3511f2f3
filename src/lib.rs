//! # graphql-ws-transport
//!
//! Message model and codec for GraphQL subscriptions over a persistent duplex
//! text connection such as a WebSocket.
//!
//! ## Features
//!
//! - **Closed message sets**: [`ClientMessage`] and [`ServerMessage`] enums for each direction
//! - **Persisted queries**: `subscribe` payloads can carry an `extensions.persistedQuery`
//!   hash instead of, or alongside, the document
//! - **Total decoder**: malformed or unknown frames become [`ServerMessage::Unsupported`]
//!   with the original text, never an error
//! - **Pluggable operations**: the encoder only sees the [`Operation`] trait
//!
//! Connection management, authentication and subscription bookkeeping live in
//! the layer above; this crate only turns messages into text and back.
//!
//! ## Example
//!
//! ```rust
//! use graphql_ws_transport::{decode, encode, ClientMessage, SerializedOperation, ServerMessage};
//! use std::sync::Arc;
//!
//! # fn main() -> graphql_ws_transport::Result<()> {
//! let operation = Arc::new(SerializedOperation::new(
//!     "Ticker",
//!     "subscription Ticker { ticker }",
//!     (),
//! ));
//!
//! let text = encode(&ClientMessage::start("1", operation, false, true))?;
//! assert!(text.starts_with(r#"{"type":"subscribe","id":"1""#));
//!
//! let message = decode(r#"{"type":"complete","id":"1"}"#);
//! assert_eq!(message, ServerMessage::Complete { id: "1".to_string() });
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod message;
pub mod operation;
pub mod protocol;
pub mod serializer;

pub use config::TransportConfig;
pub use decoder::decode;
pub use encoder::{encode, encode_value, PersistedQueryExtension};
pub use error::{Error, Result};
pub use message::{ClientMessage, ServerMessage};
pub use operation::{operation_id, Operation, SerializedOperation, Variables};
pub use protocol::{ClientMessageType, ServerMessageType};
pub use serializer::{GraphqlWsSerializer, MessageSerializer};
