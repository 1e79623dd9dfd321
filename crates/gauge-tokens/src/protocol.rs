//! Wire format between the request bridge and the encoding worker.
//!
//! Frames are JSON text. Requests and responses are correlated by `id` only;
//! responses may arrive in any order.

use gauge_core::errors::BridgeError;
use gauge_core::models::EncodingId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// `{ "id": 1, "text": "...", "encoding": "cl100k_base" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRequest {
    pub id: u64,
    pub text: String,
    pub encoding: EncodingId,
}

/// `{ "id": 1, "ok": true, "count": 3 }` or `{ "id": 1, "ok": false, "error": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    pub id: u64,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CountResponse {
    pub fn success(id: u64, count: usize) -> Self {
        Self {
            id,
            ok: true,
            count: Some(count),
            error: None,
        }
    }

    pub fn failure(id: u64, error: impl Into<String>) -> Self {
        Self {
            id,
            ok: false,
            count: None,
            error: Some(error.into()),
        }
    }

    /// The count, or the service's error message.
    ///
    /// An `ok` response without a count is treated as a failure.
    pub fn into_result(self) -> Result<usize, String> {
        match (self.ok, self.count) {
            (true, Some(count)) => Ok(count),
            (true, None) => Err("response carried no count".to_string()),
            (false, _) => Err(self.error.unwrap_or_else(|| "unknown error".to_string())),
        }
    }
}

pub fn encode_frame<T: Serialize>(message: &T) -> Result<String, BridgeError> {
    serde_json::to_string(message).map_err(|e| BridgeError::Codec {
        reason: e.to_string(),
    })
}

pub fn decode_frame<T: DeserializeOwned>(frame: &str) -> Result<T, BridgeError> {
    serde_json::from_str(frame).map_err(|e| BridgeError::Codec {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_wire_shape() {
        let frame = encode_frame(&CountResponse::success(7, 3)).unwrap();
        assert_eq!(frame, r#"{"id":7,"ok":true,"count":3}"#);
    }

    #[test]
    fn failure_wire_shape() {
        let frame = encode_frame(&CountResponse::failure(7, "boom")).unwrap();
        assert_eq!(frame, r#"{"id":7,"ok":false,"error":"boom"}"#);
    }

    #[test]
    fn request_uses_encoding_wire_name() {
        let frame = encode_frame(&CountRequest {
            id: 1,
            text: "Hello".into(),
            encoding: EncodingId::O200kBase,
        })
        .unwrap();
        assert_eq!(frame, r#"{"id":1,"text":"Hello","encoding":"o200k_base"}"#);
    }

    #[test]
    fn ok_without_count_is_a_failure() {
        let response: CountResponse = decode_frame(r#"{"id":2,"ok":true}"#).unwrap();
        assert!(response.into_result().is_err());
    }

    #[test]
    fn garbage_is_a_codec_error() {
        let err = decode_frame::<CountResponse>("not json").unwrap_err();
        assert!(matches!(err, BridgeError::Codec { .. }));
    }
}
