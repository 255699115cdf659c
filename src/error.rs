use thiserror::Error;

use crate::{bit_path::MAX_CODE_LEN, huffman::Symbol};

/// Errors raised while building codes or packing a buffer.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// The reserved end-of-stream value appeared as ordinary data.
    #[error("reserved sentinel byte {:#04x} found at offset {offset}", crate::SENTINEL)]
    SentinelCollision { offset: usize },

    /// The tree is deeper than the widest representable code.
    #[error("code length exceeds the maximum of {max} bits")]
    CodeTooLong { max: u8 },

    /// A symbol to encode has no entry in the code table.
    #[error("no code for symbol {0}")]
    MissingCode(Symbol),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed `.properties` report or configuration.
    #[error("properties error: {0}")]
    Properties(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl HuffmanError {
    pub(crate) fn code_too_long() -> Self {
        HuffmanError::CodeTooLong { max: MAX_CODE_LEN }
    }
}

impl From<java_properties::PropertiesError> for HuffmanError {
    fn from(e: java_properties::PropertiesError) -> Self {
        HuffmanError::Properties(e.to_string())
    }
}

impl From<bincode::Error> for HuffmanError {
    fn from(e: bincode::Error) -> Self {
        HuffmanError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for HuffmanError {
    fn from(e: serde_json::Error) -> Self {
        HuffmanError::Serialization(e.to_string())
    }
}
