use gauge_core::errors::*;

#[test]
fn encoding_unavailable_carries_encoding_and_reason() {
    let err = EncodingError::Unavailable {
        encoding: "o200k_base".into(),
        reason: "vocabulary download failed".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("o200k_base"));
    assert!(msg.contains("vocabulary download failed"));
}

#[test]
fn channel_timeout_carries_values() {
    let err = BridgeError::ChannelTimeout {
        request_id: 42,
        timeout_ms: 5000,
    };
    let msg = err.to_string();
    assert!(msg.contains("42"));
    assert!(msg.contains("5000"));
}

#[test]
fn adapter_unresolvable_carries_attempts() {
    let err = AdapterError::Unresolvable { attempts: 10 };
    assert!(err.to_string().contains("10"));
}

// --- From impls ---

#[test]
fn encoding_error_converts_to_gauge_error() {
    let err: GaugeError = EncodingError::Unsupported {
        name: "r50k".into(),
    }
    .into();
    assert!(matches!(err, GaugeError::EncodingError(_)));
}

#[test]
fn bridge_error_converts_to_gauge_error() {
    let err: GaugeError = BridgeError::Detached.into();
    assert!(matches!(err, GaugeError::BridgeError(_)));
}

#[test]
fn config_error_converts_to_gauge_error() {
    let err: GaugeError = ConfigError::FileNotFound {
        path: "gauge.toml".into(),
    }
    .into();
    assert!(matches!(err, GaugeError::ConfigError(_)));
    assert!(err.to_string().contains("gauge.toml"));
}

#[test]
fn serde_error_converts_to_gauge_error() {
    let serde_err = serde_json::from_str::<u64>("not json").unwrap_err();
    let err: GaugeError = serde_err.into();
    assert!(matches!(err, GaugeError::SerializationError(_)));
}
