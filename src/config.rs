//! Transport configuration.

use crate::message::ClientMessage;
use crate::operation::{Operation, Variables};
use std::sync::Arc;

/// Configuration for a subscription session
///
/// # Example
///
/// ```rust
/// use graphql_ws_transport::TransportConfig;
///
/// let config = TransportConfig::default()
///     .with_connection_param("authToken", "secret")
///     .with_auto_persist(true);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportConfig {
    /// Sent verbatim as the `connection_init` payload (default: empty)
    pub connection_params: Variables,
    /// Start subscriptions with a persisted query hash (default: false)
    pub auto_persist_subscriptions: bool,
}

impl TransportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection parameter
    pub fn with_connection_param(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.connection_params.insert(key.into(), value.into());
        self
    }

    /// Enable or disable automatic persisted queries
    pub fn with_auto_persist(mut self, enabled: bool) -> Self {
        self.auto_persist_subscriptions = enabled;
        self
    }

    /// `connection_init` message for this session
    pub fn init_message(&self) -> ClientMessage {
        ClientMessage::init(self.connection_params.clone())
    }

    /// First `subscribe` message for an operation.
    ///
    /// When auto-persisting, only the hash is sent; use
    /// [`ClientMessage::with_document`] to resend after the server reports
    /// `PersistedQueryNotFound`.
    pub fn start_message(
        &self,
        subscription_id: impl Into<String>,
        operation: Arc<dyn Operation>,
    ) -> ClientMessage {
        let auto_persist = self.auto_persist_subscriptions;
        ClientMessage::start(subscription_id, operation, auto_persist, !auto_persist)
    }
}
