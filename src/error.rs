// =============================================================================
// error.rs - Error type shared by every fallible operation
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid hex color: {0}")]
    InvalidHex(String),

    #[error("unknown color format: {0}")]
    UnknownFormat(String),

    #[error("invalid shortcut: {0}")]
    InvalidShortcut(String),

    #[error("no history entry at index {0}")]
    HistoryIndex(usize),

    #[error("clipboard error: {0}")]
    Clipboard(String),

    #[error("hotkey registration failed: {0}")]
    Hotkey(String),

    #[error("platform error: {0}")]
    Platform(String),

    #[error("the interactive picker is not supported on this platform")]
    UnsupportedPlatform,
}

pub type Result<T> = std::result::Result<T, PickerError>;
