//! docforge: a thin facade over [`docforge_core`]'s format pipelines for
//! PDF, XLSX, and PPTX documents.
//!
//! This crate adds nothing of its own: it re-exports the core's public
//! API so a consumer depends on one crate name. ZIP/XML container I/O,
//! JSON spec loading, and any CLI surface are left to the host
//! application -- they are external collaborators, not part of the
//! core contract.

pub use docforge_core::error::{classify, Envelope, Error, ErrorCode, Result};
pub use docforge_core::{bytes, numfmt, pdf, pptx, xlsx};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_module_is_reachable_through_the_facade() {
        let result = pdf::parse(b"", &pdf::ParseOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn xlsx_module_is_reachable_through_the_facade() {
        let wb = xlsx::resolve_workbook(&xlsx::WorkbookSpec::default()).unwrap();
        assert!(wb.sheets.is_empty());
    }

    #[test]
    fn pptx_module_is_reachable_through_the_facade() {
        assert_eq!(pptx::generate_shape_id::<&str>(&[]), "2");
    }

    #[test]
    fn envelope_wraps_a_core_error() {
        let result: docforge_core::xlsx::Result<()> =
            Err(docforge_core::xlsx::Error::SheetNotFound { name: "X".to_string() });
        let core_result: docforge_core::error::Result<()> = result.map_err(Into::into);
        let env: Envelope<()> = core_result.into();
        match env {
            Envelope::Err { code, .. } => assert_eq!(code, ErrorCode::SheetNotFound),
            Envelope::Ok { .. } => panic!("expected an error envelope"),
        }
    }
}
