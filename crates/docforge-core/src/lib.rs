//! docforge-core: the format core for PDF, XLSX, and PPTX documents.
//!
//! Three independent pipelines share a byte-utility layer and a common
//! error/result envelope:
//!
//! - [`pdf`] — the native PDF object layer: lexer, object parser,
//!   cross-reference resolver, stream filters, standard security handler,
//!   font tables, and the content-stream interpreter.
//! - [`xlsx`] — the OOXML spreadsheet domain model, build-spec resolver,
//!   and immutable apply-modifications engine.
//! - [`pptx`] — the OOXML presentation shape serializer, shape-id
//!   generator, and SmartArt update dispatcher.

pub mod bytes;
pub mod error;
pub mod numfmt;
pub mod pdf;
pub mod pptx;
pub mod xlsx;
