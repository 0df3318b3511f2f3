//! Operation descriptors consumed by the encoder.
//!
//! The encoder never looks at how an operation's variables are typed. It asks
//! the [`Operation`] for its name, document and id, and for a projection of its
//! variables into an ordered JSON object.

use crate::error::{Error, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Ordered string-keyed mapping of JSON values
pub type Variables = serde_json::Map<String, serde_json::Value>;

/// A GraphQL operation that can be started over the subscription transport.
pub trait Operation: Send + Sync {
    /// Operation name, sent as `operationName`
    fn name(&self) -> &str;

    /// Document text, or `None` when it was stripped from the operation
    fn document(&self) -> Option<&str>;

    /// Stable identifier, sent as the persisted query `sha256Hash`
    fn id(&self) -> &str;

    /// Project the operation's variables to an ordered JSON object.
    ///
    /// Failures propagate out of the encoder unchanged.
    fn variables(&self) -> Result<Variables>;
}

/// Compute the persisted query identifier of a document
///
/// Lowercase hex encoded SHA-256 of the document text.
pub fn operation_id(document: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(document.as_bytes());
    hex::encode(hasher.finalize())
}

/// An [`Operation`] whose variables are any serde-serializable value.
///
/// Use `()` for operations without variables.
#[derive(Debug, Clone)]
pub struct SerializedOperation<V> {
    name: String,
    document: Option<String>,
    id: String,
    variables: V,
}

impl<V> SerializedOperation<V> {
    /// Create an operation whose id is derived from its document
    pub fn new(name: impl Into<String>, document: impl Into<String>, variables: V) -> Self {
        let document = document.into();
        Self {
            name: name.into(),
            id: operation_id(&document),
            document: Some(document),
            variables,
        }
    }

    /// Override the derived id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Drop the document; only the id remains sendable
    pub fn without_document(mut self) -> Self {
        self.document = None;
        self
    }
}

impl<V: Serialize + Send + Sync> Operation for SerializedOperation<V> {
    fn name(&self) -> &str {
        &self.name
    }

    fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn variables(&self) -> Result<Variables> {
        let value = serde_json::to_value(&self.variables)
            .map_err(|e| Error::Variables(format!("{}: {e}", self.name)))?;

        match value {
            serde_json::Value::Object(map) => Ok(map),
            serde_json::Value::Null => Ok(Variables::new()),
            other => Err(Error::Variables(format!(
                "{}: expected a JSON object, found {}",
                self.name,
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
