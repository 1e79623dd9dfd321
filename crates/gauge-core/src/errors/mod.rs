//! Error handling for context-gauge.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod adapter_error;
pub mod bridge_error;
pub mod config_error;
pub mod encoding_error;
pub mod gauge_error;

pub use adapter_error::AdapterError;
pub use bridge_error::BridgeError;
pub use config_error::ConfigError;
pub use encoding_error::EncodingError;
pub use gauge_error::{GaugeError, GaugeResult};
