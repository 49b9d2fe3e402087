//! PPTX-layer error taxonomy (spec §4.10/§4.11/§7).

use thiserror::Error;

use crate::error::ErrorCode;

#[derive(Error, Debug)]
pub enum Error {
    // --- Shape id / name generation (C11) ---
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // --- Shape serializer (C11) ---
    #[error("blip fill references a data: URI, which is unsupported: {0}")]
    DataUriUnsupported(String),

    #[error("blip fill must declare exactly one of stretch or tile")]
    FillModeRequired,

    #[error("ole object is missing required field: {0}")]
    MissingRequiredField(String),

    // --- SmartArt update dispatcher (C12) ---
    #[error("diagram not found for resource id {0}")]
    DiagramNotFound(String),

    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("connection endpoint not found: {0}")]
    ConnectionEndpointNotFound(String),
}

/// Map a PPTX-layer error onto the fixed boundary code set (spec §4.12/§7).
pub fn classify(err: &Error) -> ErrorCode {
    match err {
        Error::InvalidInput(_)
        | Error::DataUriUnsupported(_)
        | Error::FillModeRequired
        | Error::MissingRequiredField(_) => ErrorCode::BuildError,

        Error::DiagramNotFound(_)
        | Error::NodeNotFound(_)
        | Error::ConnectionEndpointNotFound(_) => ErrorCode::PatchError,
    }
}

pub type Result<T> = std::result::Result<T, Error>;
