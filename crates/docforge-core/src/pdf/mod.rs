//! Native PDF object layer: lexer, object parser, cross-reference
//! resolver, stream filters, standard security handler, font tables, and
//! the content-stream interpreter (spec components C2-C8).

pub mod content;
pub mod crypt;
pub mod error;
pub mod filters;
pub mod font;
pub mod gstate;
pub mod image;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod xref;

pub use error::{classify, Error, Result};
pub use object::{Dict, Name, Object, PdfString, Ref, Stream};
pub use resolver::Document;

/// Options controlling how far a document is resolved (spec §6: parsing
/// is eager through the xref/object layer, not lazily streamed).
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Password used to unlock a Standard-Security-Handler-encrypted
    /// document. Ignored for unencrypted files.
    pub password: String,
    /// Maximum Form XObject recursion depth (C7).
    pub max_form_recursion_depth: u32,
    /// Maximum pixel dimension tolerated when decoding an image XObject
    /// before the decoder falls back to reporting `ImageTooLarge` (C8).
    pub max_image_dimension: u32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            password: String::new(),
            max_form_recursion_depth: 16,
            max_image_dimension: 4096,
        }
    }
}

/// Parse a complete PDF file into a resolved `Document`.
pub fn parse(data: &[u8], options: &ParseOptions) -> Result<Document> {
    Document::open(data, options)
}
