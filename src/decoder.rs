//! Server message decoder.
//!
//! [`decode`] is total: invalid JSON, a non-object, a missing or unknown
//! `type`, or a known type missing a required field all produce
//! [`ServerMessage::Unsupported`] carrying the original text. Payloads are kept
//! as generic JSON.

use crate::message::ServerMessage;
use crate::protocol::ServerMessageType;
use serde_json::{Map, Value};
use tracing::debug;

/// Decode a raw text frame received from the server
pub fn decode(raw: &str) -> ServerMessage {
    match try_decode(raw) {
        Ok(message) => message,
        Err(reason) => {
            debug!(reason, raw_len = raw.len(), "Unsupported server message");
            ServerMessage::Unsupported {
                raw: raw.to_string(),
            }
        }
    }
}

fn try_decode(raw: &str) -> Result<ServerMessage, &'static str> {
    let value: Value = serde_json::from_str(raw).map_err(|_| "invalid json")?;
    let Value::Object(mut object) = value else {
        return Err("not a json object");
    };

    let message_type = match object.get("type") {
        Some(Value::String(tag)) => ServerMessageType::from_tag(tag).ok_or("unknown type")?,
        Some(_) => return Err("type is not a string"),
        None => return Err("missing type"),
    };

    let message = match message_type {
        ServerMessageType::ConnectionAck => ServerMessage::ConnectionAcknowledge,
        ServerMessageType::Next => ServerMessage::Data {
            id: take_id(&mut object)?,
            payload: object.remove("payload").ok_or("missing payload")?,
        },
        ServerMessageType::KeepAlive => ServerMessage::ConnectionKeepAlive,
        ServerMessageType::Error => ServerMessage::Error {
            id: take_id(&mut object)?,
            payload: take_payload(&mut object),
        },
        ServerMessageType::ConnectionError => ServerMessage::ConnectionError {
            payload: take_payload(&mut object),
        },
        ServerMessageType::Complete => ServerMessage::Complete {
            id: take_id(&mut object)?,
        },
    };

    Ok(message)
}

fn take_id(object: &mut Map<String, Value>) -> Result<String, &'static str> {
    match object.remove("id") {
        Some(Value::String(id)) => Ok(id),
        Some(_) => Err("id is not a string"),
        None => Err("missing id"),
    }
}

/// Absent payload is treated as `null`
fn take_payload(object: &mut Map<String, Value>) -> Value {
    object.remove("payload").unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unsupported(raw: &str) -> ServerMessage {
        ServerMessage::Unsupported {
            raw: raw.to_string(),
        }
    }

    #[test]
    fn test_decode_connection_ack() {
        assert_eq!(
            decode(r#"{"type":"connection_ack"}"#),
            ServerMessage::ConnectionAcknowledge
        );
        // payload is ignored
        assert_eq!(
            decode(r#"{"type":"connection_ack","payload":{"server":"v1"}}"#),
            ServerMessage::ConnectionAcknowledge
        );
    }

    #[test]
    fn test_decode_data() {
        assert_eq!(
            decode(r#"{"type":"next","id":"some-id","payload":{"key":"value"}}"#),
            ServerMessage::Data {
                id: "some-id".to_string(),
                payload: json!({"key": "value"}),
            }
        );
    }

    #[test]
    fn test_decode_data_keeps_payload_structure() {
        let message = decode(
            r#"{"type":"next","id":"1","payload":{"data":{"ticker":[1,2.5,null,true]}}}"#,
        );
        let ServerMessage::Data { payload, .. } = message else {
            panic!("expected data");
        };
        assert_eq!(payload["data"]["ticker"], json!([1, 2.5, null, true]));
    }

    #[test]
    fn test_decode_data_requires_id_and_payload() {
        let missing_id = r#"{"type":"next","payload":{"key":"value"}}"#;
        assert_eq!(decode(missing_id), unsupported(missing_id));

        let missing_payload = r#"{"type":"next","id":"some-id"}"#;
        assert_eq!(decode(missing_payload), unsupported(missing_payload));

        let numeric_id = r#"{"type":"next","id":7,"payload":{}}"#;
        assert_eq!(decode(numeric_id), unsupported(numeric_id));
    }

    #[test]
    fn test_decode_keep_alive() {
        assert_eq!(decode(r#"{"type":"ka"}"#), ServerMessage::ConnectionKeepAlive);
    }

    #[test]
    fn test_decode_error() {
        assert_eq!(
            decode(r#"{"type":"error","id":"some-id","payload":{"key":"value"}}"#),
            ServerMessage::Error {
                id: "some-id".to_string(),
                payload: json!({"key": "value"}),
            }
        );
    }

    #[test]
    fn test_decode_error_without_payload() {
        assert_eq!(
            decode(r#"{"type":"error","id":"some-id"}"#),
            ServerMessage::Error {
                id: "some-id".to_string(),
                payload: Value::Null,
            }
        );

        let missing_id = r#"{"type":"error","payload":{"key":"value"}}"#;
        assert_eq!(decode(missing_id), unsupported(missing_id));
    }

    #[test]
    fn test_decode_connection_error() {
        assert_eq!(
            decode(r#"{"type":"connection_error","payload":{"key":"value"}}"#),
            ServerMessage::ConnectionError {
                payload: json!({"key": "value"}),
            }
        );
        assert_eq!(
            decode(r#"{"type":"connection_error"}"#),
            ServerMessage::ConnectionError {
                payload: Value::Null,
            }
        );
    }

    #[test]
    fn test_decode_complete() {
        assert_eq!(
            decode(r#"{"type":"complete","id":"some-id"}"#),
            ServerMessage::Complete {
                id: "some-id".to_string(),
            }
        );

        let missing_id = r#"{"type":"complete"}"#;
        assert_eq!(decode(missing_id), unsupported(missing_id));
    }

    #[test]
    fn test_decode_unknown() {
        assert_eq!(decode("invalid json"), unsupported("invalid json"));
        assert_eq!(decode("{}"), unsupported("{}"));
        assert_eq!(
            decode(r#"{"type":"unknown"}"#),
            unsupported(r#"{"type":"unknown"}"#)
        );
    }

    #[test]
    fn test_decode_wrong_shapes() {
        for raw in [
            "",
            "null",
            "42",
            r#""connection_ack""#,
            r#"[{"type":"connection_ack"}]"#,
            r#"{"type":null}"#,
            r#"{"type":1}"#,
            r#"{"type":"connection_init"}"#,
            r#"{"type":"subscribe","id":"1","payload":{}}"#,
            r#"{"type":"connection_ack""#,
        ] {
            assert_eq!(decode(raw), unsupported(raw), "input: {raw}");
        }
    }

    #[test]
    fn test_unsupported_keeps_raw_verbatim() {
        let raw = "  {\"type\": \"pong\"}\n";
        assert_eq!(decode(raw), unsupported(raw));
    }

    #[test]
    fn test_decode_tolerates_whitespace_and_extra_fields() {
        assert_eq!(
            decode("  {\"type\" : \"complete\", \"id\": \"a\", \"extra\": true}  "),
            ServerMessage::Complete {
                id: "a".to_string(),
            }
        );
    }
}
