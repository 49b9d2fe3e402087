//! PPTX shape domain model (spec §3, §4.10): the typed shape sum type the
//! serializer (C11) converts into exact `docforge_xml::slide` element
//! trees. Kept separate from the XML schema crate (unlike the XLSX side's
//! pass-through feature blocks) because the serializer's job is precisely
//! to bridge this value-typed, immutable domain into the schema's strict
//! attribute-presence rules -- there is no profitable reuse to be had by
//! collapsing the two, the way there was for XLSX's `mergeCells`/
//! `hyperlinks` blocks.

/// `a:hlinkClick`/`a:hlinkHover`, spec §4.10.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HyperlinkSpec {
    pub r_id: Option<String>,
    pub action: Option<String>,
    pub tooltip: Option<String>,
    pub sound: Option<SoundRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SoundRef {
    pub r_embed: String,
    pub name: Option<String>,
}

/// The subset of `a:*Locks` flags spec §3's `locks?` field covers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShapeLocks {
    pub no_grp: bool,
    pub no_select: bool,
    pub no_rot: bool,
    pub no_change_aspect: bool,
}

/// Non-visual properties shared by every shape kind, spec §3/§4.10.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NonVisualProps {
    pub id: u32,
    pub name: String,
    pub description: Option<String>,
    pub title: Option<String>,
    pub hidden: Option<bool>,
    pub hyperlink: Option<HyperlinkSpec>,
    pub hyperlink_hover: Option<HyperlinkSpec>,
    pub locks: Option<ShapeLocks>,
}

/// `a:xfrm`: EMU offset/extent, 60000ths-of-a-degree rotation, spec §3.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub rotation: i32,
    pub flip_h: bool,
    pub flip_v: bool,
    pub offset: Option<(i64, i64)>,
    pub extent: Option<(i64, i64)>,
    pub child_offset: Option<(i64, i64)>,
    pub child_extent: Option<(i64, i64)>,
}

impl Transform {
    pub fn is_default_rotation_flip(&self) -> bool {
        self.rotation == 0 && !self.flip_h && !self.flip_v
    }
}

/// Custom-geometry path command, spec §3.
#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    MoveTo(i64, i64),
    LineTo(i64, i64),
    ArcTo { w_radius: i64, h_radius: i64, start_angle: i64, swing_angle: i64 },
    QuadBezierTo(Vec<(i64, i64)>),
    CubicBezierTo(Vec<(i64, i64)>),
    Close,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomPath {
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub fill: Option<String>,
    pub stroke: Option<bool>,
    pub commands: Vec<PathCommand>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub l: i64,
    pub t: i64,
    pub r: i64,
    pub b: i64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionSite {
    pub angle: i64,
    pub x: i64,
    pub y: i64,
}

/// `a:prstGeom` / `a:custGeom`, spec §3: "preset(name, adjustValues[]) or
/// custom(paths[], guides?, textRect?, connectionSites?, adjustValues?)".
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Preset {
        name: String,
        adjust_values: Vec<(String, i64)>,
    },
    Custom {
        paths: Vec<CustomPath>,
        guides: Vec<(String, String)>,
        text_rect: Option<Rect>,
        connection_sites: Vec<ConnectionSite>,
        adjust_values: Vec<(String, String)>,
    },
}

/// `a:srgbClr` / `a:schemeClr`.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorRef {
    Srgb(String),
    Scheme(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleRefSpec {
    pub idx: u32,
    pub color: ColorRef,
}

/// `a:fontRef`: per spec §4.10 "the font reference accepts only a
/// solid-fill color override (anything else is rejected)" -- this is
/// encoded structurally here by only ever carrying a [`ColorRef`].
#[derive(Debug, Clone, PartialEq)]
pub struct FontRefSpec {
    pub idx: String,
    pub color: ColorRef,
}

/// `p:style`, spec §4.10: "emit child refs only when at least one
/// reference is present".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeStyleSpec {
    pub line_ref: Option<StyleRefSpec>,
    pub fill_ref: Option<StyleRefSpec>,
    pub effect_ref: Option<StyleRefSpec>,
    pub font_ref: Option<FontRefSpec>,
}

impl ShapeStyleSpec {
    pub fn is_empty(&self) -> bool {
        self.line_ref.is_none()
            && self.fill_ref.is_none()
            && self.effect_ref.is_none()
            && self.font_ref.is_none()
    }
}

/// A text body paragraph: one run of plain text per spec.md's "text
/// bodies" (rich per-run formatting is not part of the modeled domain).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub runs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBody {
    pub paragraphs: Vec<Paragraph>,
}

impl TextBody {
    pub fn plain(text: impl Into<String>) -> Self {
        TextBody {
            paragraphs: vec![Paragraph { runs: vec![text.into()] }],
        }
    }
}

/// `a:stretch`/`a:tile` mutual exclusion, spec §4.10: "`stretch` vs
/// `tile` is mutually exclusive and one is required".
#[derive(Debug, Clone, PartialEq)]
pub enum FillMode {
    Stretch { source_rect: Option<Rect> },
    Tile {
        source_rect: Option<Rect>,
        sx: Option<i64>,
        sy: Option<i64>,
        flip: Option<String>,
        align: Option<String>,
    },
}

/// `p:blipFill`, spec §4.10. `fill` is `Option` (rather than a required
/// enum) so the "neither tile nor stretch" rejection edge case in spec
/// §8 is reachable by construction, not ruled out by the type.
#[derive(Debug, Clone, PartialEq)]
pub struct BlipFillSpec {
    pub resource_id: String,
    pub source_rect: Option<Rect>,
    pub fill: Option<FillMode>,
}

/// `a:videoFile`/`a:audioFile`/`a:wavAudioFile`/`a:quickTimeFile`, spec
/// §4.10 "Media".
#[derive(Debug, Clone, PartialEq)]
pub enum MediaRef {
    Video { r_link: String },
    Audio { r_link: String },
    WavAudio { r_link: String },
    QuickTime { r_link: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub height: i64,
    pub cells: Vec<TextBody>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    pub column_widths: Vec<i64>,
    pub rows: Vec<TableRow>,
}

/// `p:oleObj`, spec §4.10. `progId` is the one required field the spec
/// names (see §7's "missing required fields (`progId`, ...)").
#[derive(Debug, Clone, PartialEq)]
pub struct OleObjectSpec {
    pub prog_id: String,
    pub r_id: Option<String>,
    pub name: Option<String>,
    pub show_as_icon: bool,
}

/// `a:graphicData` content, spec §4.10: "other `graphicFrame` content
/// types are rejected" -- there is no catch-all variant.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphicFrameContent {
    Table(TableSpec),
    Ole(OleObjectSpec),
}

/// The per-kind payload of spec §3's shape sum type
/// (`sp | grpSp | pic | cxnSp | graphicFrame | contentPart`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceholderSpec {
    pub ph_type: Option<String>,
    pub idx: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Sp {
        geometry: Option<Geometry>,
        style: Option<ShapeStyleSpec>,
        text_body: Option<TextBody>,
        placeholder: Option<PlaceholderSpec>,
    },
    GrpSp {
        children: Vec<Shape>,
    },
    Pic {
        blip_fill: BlipFillSpec,
        media: Option<MediaRef>,
    },
    CxnSp {
        geometry: Option<Geometry>,
        style: Option<ShapeStyleSpec>,
    },
    GraphicFrame {
        content: GraphicFrameContent,
    },
    ContentPart {
        r_id: String,
    },
}

/// A single shape in the shape tree, spec §3.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub non_visual: NonVisualProps,
    pub transform: Option<Transform>,
    pub kind: ShapeKind,
}

impl Shape {
    /// The base name spec §4.10's shape-name generator matches a shape
    /// kind against (`"sp"`, `"grpSp"`, `"pic"`, `"cxnSp"`, or the
    /// `graphicFrame`'s content-specific label).
    pub fn kind_label(&self) -> &'static str {
        match &self.kind {
            ShapeKind::Sp { .. } => "sp",
            ShapeKind::GrpSp { .. } => "grpSp",
            ShapeKind::Pic { .. } => "pic",
            ShapeKind::CxnSp { .. } => "cxnSp",
            ShapeKind::GraphicFrame { .. } => "graphicFrame",
            ShapeKind::ContentPart { .. } => "contentPart",
        }
    }
}
