//! XLSX-layer error taxonomy (spec §4.8/§4.9/§7).

use thiserror::Error;

use crate::error::ErrorCode;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid cell reference: {0}")]
    InvalidCellReference(String),

    #[error("column number out of range: {0}")]
    InvalidColumnNumber(u32),

    #[error("row number out of range: {0}")]
    InvalidRowNumber(u32),

    #[error("invalid error value: {0}")]
    InvalidErrorValue(String),

    #[error("duplicate sheet name: {0}")]
    DuplicateSheetName(String),

    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error("sheet not found: {name}")]
    SheetNotFound { name: String },

    #[error("invalid color spec: {0}")]
    InvalidColor(String),

    #[error("invalid date value: {0}")]
    InvalidDate(String),
}

/// Map an XLSX-layer error onto the fixed boundary code set.
pub fn classify(err: &Error) -> ErrorCode {
    match err {
        Error::SheetNotFound { .. } => ErrorCode::SheetNotFound,
        Error::InvalidCellReference(_)
        | Error::InvalidColumnNumber(_)
        | Error::InvalidRowNumber(_)
        | Error::InvalidErrorValue(_)
        | Error::DuplicateSheetName(_)
        | Error::InvalidRange(_)
        | Error::InvalidColor(_)
        | Error::InvalidDate(_) => ErrorCode::BuildError,
    }
}

pub type Result<T> = std::result::Result<T, Error>;
