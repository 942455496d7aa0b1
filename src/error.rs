//! Error type shared by the browser-facing modules.
//!
//! Everything here surfaces at mount time: once an effect is running there is
//! nothing recoverable mid-frame, so per-frame failures are logged and the
//! frame is skipped instead of propagated.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Initialization and DOM failures for the effects crate.
#[derive(Debug, Error)]
pub enum FxError {
    /// No global `window` object; not running in a browser.
    #[error("no global `window` object")]
    NoWindow,

    /// The window has no `document`.
    #[error("window has no `document`")]
    NoDocument,

    /// The platform refused to hand out a 2d canvas context. The overlay
    /// cannot run at all in this case and must not start its loop.
    #[error("2d canvas context unavailable")]
    ContextUnavailable,

    /// The host passed an options object that failed to parse.
    #[error("invalid options: {0}")]
    Config(#[from] serde_json::Error),

    /// A DOM call failed; carries the stringified `JsValue`.
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

impl From<JsValue> for FxError {
    fn from(value: JsValue) -> Self {
        Self::Dom(format!("{value:?}"))
    }
}

impl From<FxError> for JsValue {
    fn from(err: FxError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
