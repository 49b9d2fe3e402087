//! docforge-xml: serde/quick-xml schema types for the OOXML parts this
//! system emits.
//!
//! # Modules
//!
//! - [`namespaces`] - OOXML namespace URI constants
//! - [`content_types`] - `[Content_Types].xml` structures
//! - [`relationships`] - Relationships (`.rels`) structures
//! - [`workbook`] - `xl/workbook.xml` structures
//! - [`worksheet`] - `xl/worksheets/sheet*.xml` structures
//! - [`styles`] - `xl/styles.xml` structures
//! - [`shared_strings`] - `xl/sharedStrings.xml` structures
//! - [`slide`] - `ppt/slides/slide*.xml` shape-tree structures
//! - [`diagram`] - `ppt/diagrams/data*.xml` SmartArt structures

pub mod content_types;
pub mod diagram;
pub mod namespaces;
pub mod relationships;
pub mod shared_strings;
pub mod slide;
pub mod styles;
pub mod workbook;
pub mod worksheet;
