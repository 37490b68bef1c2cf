//! Error types for identifier parsing and payload decoding.

/// Errors produced while parsing identifiers or decoding wire payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("invalid payload length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("non-zero padding byte 0x{byte:02x} at offset {offset}")]
    InvalidPadding { offset: usize, byte: u8 },

    #[error("invalid flag byte 0x{0:02x}")]
    InvalidFlag(u8),

    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("invalid platform version: {0}")]
    InvalidVersion(String),
}
