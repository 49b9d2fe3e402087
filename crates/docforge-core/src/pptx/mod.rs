//! PPTX format core (spec §3, §4.10, §4.11): the shape domain model, the
//! total shape-tree serializer (C11), and the SmartArt update dispatcher
//! (C12) over OOXML presentation documents.

pub mod domain;
pub mod error;
pub mod ids;
pub mod serializer;
pub mod smartart;

pub use domain::{
    BlipFillSpec, ColorRef, ConnectionSite, CustomPath, FillMode, FontRefSpec, Geometry,
    GraphicFrameContent, HyperlinkSpec, MediaRef, NonVisualProps, OleObjectSpec, Paragraph,
    PathCommand, PlaceholderSpec, Rect, Shape, ShapeKind, ShapeLocks, ShapeStyleSpec, SoundRef,
    StyleRefSpec, TableRow, TableSpec, TextBody, Transform,
};
pub use error::{classify, Error, Result};
pub use ids::{generate_shape_id, generate_shape_name};
pub use serializer::serialize_shape;
pub use smartart::{apply_smart_art_updates, ConnectionOp, SmartArtUpdate};
