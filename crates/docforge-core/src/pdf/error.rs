//! PDF-layer error taxonomy, per spec §7.

use thiserror::Error;

use crate::error::ErrorCode;

#[derive(Error, Debug)]
pub enum Error {
    // --- Syntactic: lexer / object parser (C4) ---
    #[error("unexpected token: {0}")]
    UnexpectedToken(String),

    #[error("missing keyword: expected {0}")]
    MissingKeyword(String),

    #[error("duplicate dictionary key: {0}")]
    DuplicateDictKey(String),

    #[error("stream length mismatch for object {0}")]
    StreamLengthMismatch(String),

    // --- Syntactic: cross-reference / resolver (C5) ---
    #[error("cross-reference table is malformed: {0}")]
    MalformedXref(String),

    #[error("object {0} not found")]
    ObjectNotFound(u32),

    // --- Syntactic: stream filter chain (C2) ---
    #[error("invalid filter chain: {0}")]
    InvalidFilterChain(String),

    #[error("stream decode failed in filter {filter}: {reason}")]
    DecodeFailure { filter: String, reason: String },

    // --- Authorization: standard security handler (C3) ---
    #[error("document is encrypted and the access policy requires rejection")]
    AuthRequired,

    #[error("unsupported crypt filter: {0}")]
    UnsupportedCryptFilter(String),

    #[error("truncated ciphertext")]
    TruncatedCiphertext,

    #[error("bad padding during AES decryption")]
    BadPadding,

    // --- Semantic / unsupported: font tables, cmap, content stream, image ---
    #[error("font resource error: {0}")]
    FontError(String),

    #[error("cmap parse error: {0}")]
    CMapError(String),

    #[error("graphics stack underflow: Q without matching q")]
    GraphicsStackUnderflow,

    #[error("unsupported feature: {0}")]
    Unsupported(String),

    #[error("image exceeds maximum dimension ({0} > {1})")]
    ImageTooLarge(u32, u32),
}

/// Map a PDF-layer error onto the fixed boundary code set (spec §4.12/§7).
pub fn classify(err: &Error) -> ErrorCode {
    match err {
        Error::UnexpectedToken(_)
        | Error::MissingKeyword(_)
        | Error::DuplicateDictKey(_)
        | Error::StreamLengthMismatch(_)
        | Error::MalformedXref(_)
        | Error::ObjectNotFound(_)
        | Error::InvalidFilterChain(_)
        | Error::DecodeFailure { .. }
        | Error::CMapError(_) => ErrorCode::ParseError,

        Error::AuthRequired
        | Error::UnsupportedCryptFilter(_)
        | Error::TruncatedCiphertext
        | Error::BadPadding => ErrorCode::VerifyError,

        Error::FontError(_)
        | Error::GraphicsStackUnderflow
        | Error::Unsupported(_)
        | Error::ImageTooLarge(_, _) => ErrorCode::ParseError,
    }
}

pub type Result<T> = std::result::Result<T, Error>;
