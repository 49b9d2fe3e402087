//! Error & Result Envelope (C13).
//!
//! Every format-specific module (`pdf`, `xlsx`, `pptx`) defines its own
//! `thiserror` enum for its failure modes. This module composes them into a
//! single top-level [`Error`], and exposes the [`Envelope`] boundary type
//! that public command-style entry points return, per spec §4.12 / §7.

use thiserror::Error;

use crate::{pdf, pptx, xlsx};

/// The top-level error type for docforge-core.
#[derive(Error, Debug)]
pub enum Error {
    /// A failure inside the PDF object layer or content-stream pipeline.
    #[error(transparent)]
    Pdf(#[from] pdf::Error),

    /// A failure inside the XLSX domain/apply pipeline.
    #[error(transparent)]
    Xlsx(#[from] xlsx::Error),

    /// A failure inside the PPTX serializer/SmartArt pipeline.
    #[error(transparent)]
    Pptx(#[from] pptx::Error),

    /// An underlying I/O error surfaced by a caller-supplied reader.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error encountered while parsing caller-supplied JSON spec input.
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// An internal or otherwise unclassified error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// A convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Fixed failure codes used by the Result envelope, per spec §4.12.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    FileNotFound,
    InvalidJson,
    ParseError,
    BuildError,
    PatchError,
    VerifyError,
    SheetNotFound,
    NoTestCases,
    NoMatchingTests,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::FileNotFound => "FILE_NOT_FOUND",
            ErrorCode::InvalidJson => "INVALID_JSON",
            ErrorCode::ParseError => "PARSE_ERROR",
            ErrorCode::BuildError => "BUILD_ERROR",
            ErrorCode::PatchError => "PATCH_ERROR",
            ErrorCode::VerifyError => "VERIFY_ERROR",
            ErrorCode::SheetNotFound => "SHEET_NOT_FOUND",
            ErrorCode::NoTestCases => "NO_TEST_CASES",
            ErrorCode::NoMatchingTests => "NO_MATCHING_TESTS",
        }
    }
}

/// The boundary result type every public command-style operation returns.
///
/// Internally the pipeline propagates `Result<T, Error>` with `?` as usual;
/// only the outermost entry point converts a fatal `Error` into this shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Ok { value: T },
    Err {
        code: ErrorCode,
        message: String,
        details: Option<String>,
    },
}

impl<T> Envelope<T> {
    pub fn ok(value: T) -> Self {
        Envelope::Ok { value }
    }

    pub fn err(code: ErrorCode, message: impl Into<String>) -> Self {
        Envelope::Err {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Envelope::Ok { .. })
    }
}

/// Map a fatal [`Error`] to its boundary code, per the §4.12/§7 taxonomy.
///
/// *Syntactic* failures (lexer/parser/xref/filter/CMap) map to
/// `PARSE_ERROR`; *semantic* and *authorization* failures that occur while
/// constructing a new document map to `BUILD_ERROR`; failures from the
/// apply/patch pipeline map to `PATCH_ERROR`; sheet-scoped lookups map to
/// `SHEET_NOT_FOUND`.
pub fn classify(err: &Error) -> ErrorCode {
    match err {
        Error::Pdf(e) => pdf::classify(e),
        Error::Xlsx(xlsx::Error::SheetNotFound { .. }) => ErrorCode::SheetNotFound,
        Error::Xlsx(_) => ErrorCode::BuildError,
        Error::Pptx(_) => ErrorCode::PatchError,
        Error::Io(_) => ErrorCode::FileNotFound,
        Error::InvalidJson(_) => ErrorCode::InvalidJson,
        Error::Internal(_) => ErrorCode::VerifyError,
    }
}

impl<T> From<Result<T>> for Envelope<T> {
    fn from(r: Result<T>) -> Self {
        match r {
            Ok(v) => Envelope::ok(v),
            Err(e) => {
                let code = classify(&e);
                Envelope::Err {
                    code,
                    message: e.to_string(),
                    details: None,
                }
            }
        }
    }
}
