//! PresentationML shape-tree schema structures (`ppt/slides/slide*.xml`).
//!
//! Mirrors the `worksheet`/`styles` convention used for the XLSX side:
//! `Option<T>` fields with `skip_serializing_if` model OOXML's
//! "emit-if-present" discipline, and struct field declaration order is
//! relied upon to match the schema's element sequence (quick-xml
//! serializes struct fields in declaration order).

use serde::{Deserialize, Serialize};

/// Non-visual drawing properties shared by every shape kind
/// (`p:cNvPr` plus its sibling locks and hyperlink elements), spec §4.10.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CNvPr {
    #[serde(rename = "@id")]
    pub id: u32,

    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "@descr", skip_serializing_if = "Option::is_none")]
    pub descr: Option<String>,

    #[serde(rename = "@title", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "@hidden", skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,

    #[serde(rename = "a:hlinkClick", skip_serializing_if = "Option::is_none")]
    pub hlink_click: Option<HlinkClick>,

    #[serde(rename = "a:hlinkHover", skip_serializing_if = "Option::is_none")]
    pub hlink_hover: Option<HlinkClick>,
}

/// `a:hlinkClick` / `a:hlinkHover`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HlinkClick {
    #[serde(rename = "@r:id", skip_serializing_if = "Option::is_none")]
    pub r_id: Option<String>,

    #[serde(rename = "@action", skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(rename = "@tooltip", skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,

    #[serde(rename = "a:snd", skip_serializing_if = "Option::is_none")]
    pub snd: Option<SndRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SndRef {
    #[serde(rename = "@r:embed")]
    pub r_embed: String,

    #[serde(rename = "@name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// 2-D transform (`a:xfrm`): EMU offset/extent, 60000ths-of-a-degree
/// rotation, and optional flip/child-offset-extent for groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Xfrm {
    #[serde(rename = "@rot", skip_serializing_if = "Option::is_none")]
    pub rot: Option<i32>,

    #[serde(rename = "@flipH", skip_serializing_if = "Option::is_none")]
    pub flip_h: Option<bool>,

    #[serde(rename = "@flipV", skip_serializing_if = "Option::is_none")]
    pub flip_v: Option<bool>,

    #[serde(rename = "a:off", skip_serializing_if = "Option::is_none")]
    pub off: Option<Point>,

    #[serde(rename = "a:ext", skip_serializing_if = "Option::is_none")]
    pub ext: Option<Extent>,

    #[serde(rename = "a:chOff", skip_serializing_if = "Option::is_none")]
    pub ch_off: Option<Point>,

    #[serde(rename = "a:chExt", skip_serializing_if = "Option::is_none")]
    pub ch_ext: Option<Extent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(rename = "@x")]
    pub x: i64,
    #[serde(rename = "@y")]
    pub y: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    #[serde(rename = "@cx")]
    pub cx: i64,
    #[serde(rename = "@cy")]
    pub cy: i64,
}

/// `a:prstGeom`: preset autoshape geometry with adjust-value list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetGeom {
    #[serde(rename = "@prst")]
    pub prst: String,

    #[serde(rename = "a:avLst", default)]
    pub av_lst: AdjustValueList,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjustValueList {
    #[serde(rename = "a:gd", default)]
    pub gd: Vec<AdjustValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustValue {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@fmla")]
    pub fmla: String,
}

/// `a:custGeom`: custom path geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustGeom {
    #[serde(rename = "a:avLst", default)]
    pub av_lst: AdjustValueList,

    #[serde(rename = "a:gdLst", default)]
    pub gd_lst: GuideList,

    #[serde(rename = "a:ahLst", default)]
    pub ah_lst: String,

    #[serde(rename = "a:cxnLst", skip_serializing_if = "Option::is_none")]
    pub cxn_lst: Option<ConnectionSiteList>,

    #[serde(rename = "a:rect", skip_serializing_if = "Option::is_none")]
    pub rect: Option<TextRect>,

    #[serde(rename = "a:pathLst")]
    pub path_lst: PathList,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuideList {
    #[serde(rename = "a:gd", default)]
    pub gd: Vec<AdjustValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSiteList {
    #[serde(rename = "a:cxn", default)]
    pub cxn: Vec<ConnectionSite>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSite {
    #[serde(rename = "@ang")]
    pub ang: i64,
    #[serde(rename = "a:pos")]
    pub pos: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRect {
    #[serde(rename = "@l")]
    pub l: i64,
    #[serde(rename = "@t")]
    pub t: i64,
    #[serde(rename = "@r")]
    pub r: i64,
    #[serde(rename = "@b")]
    pub b: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathList {
    #[serde(rename = "a:path", default)]
    pub path: Vec<Path>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    #[serde(rename = "@w", skip_serializing_if = "Option::is_none")]
    pub w: Option<i64>,
    #[serde(rename = "@h", skip_serializing_if = "Option::is_none")]
    pub h: Option<i64>,
    #[serde(rename = "@fill", skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(rename = "@stroke", skip_serializing_if = "Option::is_none")]
    pub stroke: Option<bool>,

    #[serde(rename = "$value", default)]
    pub commands: Vec<PathCommand>,
}

/// Custom-geometry path commands, spec §3/§4.10. Serialized as the
/// mixed-content child sequence of `a:path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    #[serde(rename = "a:moveTo")]
    MoveTo { #[serde(rename = "a:pt")] pt: Point },
    #[serde(rename = "a:lnTo")]
    LnTo { #[serde(rename = "a:pt")] pt: Point },
    #[serde(rename = "a:arcTo")]
    ArcTo {
        #[serde(rename = "@wR")]
        w_r: i64,
        #[serde(rename = "@hR")]
        h_r: i64,
        #[serde(rename = "@stAng")]
        st_ang: i64,
        #[serde(rename = "@swAng")]
        sw_ang: i64,
    },
    #[serde(rename = "a:quadBezTo")]
    QuadBezTo { #[serde(rename = "a:pt")] pts: Vec<Point> },
    #[serde(rename = "a:cubicBezTo")]
    CubicBezTo { #[serde(rename = "a:pt")] pts: Vec<Point> },
    #[serde(rename = "a:close")]
    Close {},
}

/// Blip (picture) fill: `a:blipFill`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlipFill {
    #[serde(rename = "a:blip")]
    pub blip: Blip,

    #[serde(rename = "a:srcRect", skip_serializing_if = "Option::is_none")]
    pub src_rect: Option<SrcRect>,

    #[serde(rename = "a:stretch", skip_serializing_if = "Option::is_none")]
    pub stretch: Option<Stretch>,

    #[serde(rename = "a:tile", skip_serializing_if = "Option::is_none")]
    pub tile: Option<Tile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blip {
    #[serde(rename = "@r:embed")]
    pub r_embed: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SrcRect {
    #[serde(rename = "@l", skip_serializing_if = "Option::is_none")]
    pub l: Option<i64>,
    #[serde(rename = "@t", skip_serializing_if = "Option::is_none")]
    pub t: Option<i64>,
    #[serde(rename = "@r", skip_serializing_if = "Option::is_none")]
    pub r: Option<i64>,
    #[serde(rename = "@b", skip_serializing_if = "Option::is_none")]
    pub b: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stretch {
    #[serde(rename = "a:fillRect", default)]
    pub fill_rect: SrcRect,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    #[serde(rename = "@sx", skip_serializing_if = "Option::is_none")]
    pub sx: Option<i64>,
    #[serde(rename = "@sy", skip_serializing_if = "Option::is_none")]
    pub sy: Option<i64>,
    #[serde(rename = "@flip", skip_serializing_if = "Option::is_none")]
    pub flip: Option<String>,
    #[serde(rename = "@algn", skip_serializing_if = "Option::is_none")]
    pub algn: Option<String>,
}

/// Text body (`p:txBody`). Paragraph content is carried as a single
/// plain-text run per paragraph; rich per-run formatting is out of
/// scope (spec does not model it).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TxBody {
    #[serde(rename = "a:bodyPr", default)]
    pub body_pr: String,

    #[serde(rename = "a:p", default)]
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(rename = "a:r", default)]
    pub runs: Vec<Run>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    #[serde(rename = "a:t", default)]
    pub text: String,
}

/// `p:style` shape-style reference (line/fill/effect/font refs); per
/// spec §4.10 the font reference accepts only a solid-fill color.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    #[serde(rename = "a:lnRef", skip_serializing_if = "Option::is_none")]
    pub ln_ref: Option<StyleRef>,
    #[serde(rename = "a:fillRef", skip_serializing_if = "Option::is_none")]
    pub fill_ref: Option<StyleRef>,
    #[serde(rename = "a:effectRef", skip_serializing_if = "Option::is_none")]
    pub effect_ref: Option<StyleRef>,
    #[serde(rename = "a:fontRef", skip_serializing_if = "Option::is_none")]
    pub font_ref: Option<FontRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRef {
    #[serde(rename = "@idx")]
    pub idx: u32,
    #[serde(rename = "a:srgbClr", skip_serializing_if = "Option::is_none")]
    pub srgb_clr: Option<SrgbClr>,
    #[serde(rename = "a:schemeClr", skip_serializing_if = "Option::is_none")]
    pub scheme_clr: Option<SchemeClr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontRef {
    #[serde(rename = "@idx")]
    pub idx: String,
    #[serde(rename = "a:srgbClr", skip_serializing_if = "Option::is_none")]
    pub srgb_clr: Option<SrgbClr>,
    #[serde(rename = "a:schemeClr", skip_serializing_if = "Option::is_none")]
    pub scheme_clr: Option<SchemeClr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SrgbClr {
    #[serde(rename = "@val")]
    pub val: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeClr {
    #[serde(rename = "@val")]
    pub val: String,
}

/// Geometry choice for `p:spPr`/`p:cxnSp`'s `spPr`: preset or custom, spec
/// §3/§4.10. Mixed-content sibling of `a:xfrm`, same tagging convention as
/// [`PathCommand`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geom {
    #[serde(rename = "a:prstGeom")]
    Preset(PresetGeom),
    #[serde(rename = "a:custGeom")]
    Custom(CustGeom),
}

/// Shape properties (`p:spPr`): transform plus geometry. Shared by
/// `p:sp`, `p:pic`, and `p:cxnSp`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpPr {
    #[serde(rename = "a:xfrm", skip_serializing_if = "Option::is_none")]
    pub xfrm: Option<Xfrm>,

    #[serde(rename = "$value", skip_serializing_if = "Option::is_none")]
    pub geom: Option<Geom>,
}

/// `p:grpSpPr`: the group shape's own transform (no geometry).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrpSpPr {
    #[serde(rename = "a:xfrm", skip_serializing_if = "Option::is_none")]
    pub xfrm: Option<Xfrm>,
}

/// `a:spLocks`/`a:cxnSpLocks`/`a:grpSpLocks`: the subset of shape-locking
/// flags spec §3's `locks?` field covers. Absent when nothing is locked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeLocks {
    #[serde(rename = "@noGrp", skip_serializing_if = "Option::is_none")]
    pub no_grp: Option<bool>,
    #[serde(rename = "@noSelect", skip_serializing_if = "Option::is_none")]
    pub no_select: Option<bool>,
    #[serde(rename = "@noRot", skip_serializing_if = "Option::is_none")]
    pub no_rot: Option<bool>,
    #[serde(rename = "@noChangeAspect", skip_serializing_if = "Option::is_none")]
    pub no_change_aspect: Option<bool>,
}

/// `p:ph`: placeholder type/index reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderRef {
    #[serde(rename = "@type", skip_serializing_if = "Option::is_none")]
    pub ph_type: Option<String>,
    #[serde(rename = "@idx", skip_serializing_if = "Option::is_none")]
    pub idx: Option<u32>,
}

/// `a:videoFile`/`a:audioFile`/`a:wavAudioFile`/`a:quickTimeFile`: a
/// relationship-linked media reference, spec §4.10 "Media".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaLink {
    #[serde(rename = "@r:link")]
    pub r_link: String,
}

/// `p:nvPr`: the non-visual-properties tail shared by every shape kind's
/// non-visual group. Carries the placeholder reference and, for `p:pic`,
/// the media-file child that makes the picture a video/audio object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NvPr {
    #[serde(rename = "p:ph", skip_serializing_if = "Option::is_none")]
    pub ph: Option<PlaceholderRef>,

    #[serde(rename = "a:videoFile", skip_serializing_if = "Option::is_none")]
    pub video_file: Option<MediaLink>,

    #[serde(rename = "a:audioFile", skip_serializing_if = "Option::is_none")]
    pub audio_file: Option<MediaLink>,

    #[serde(rename = "a:wavAudioFile", skip_serializing_if = "Option::is_none")]
    pub wav_audio_file: Option<MediaLink>,

    #[serde(rename = "a:quickTimeFile", skip_serializing_if = "Option::is_none")]
    pub quick_time_file: Option<MediaLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CNvSpPr {
    #[serde(rename = "a:spLocks", skip_serializing_if = "Option::is_none")]
    pub sp_locks: Option<ShapeLocks>,
    #[serde(rename = "@txBox", skip_serializing_if = "Option::is_none")]
    pub tx_box: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CNvPicPr {
    #[serde(rename = "a:picLocks", skip_serializing_if = "Option::is_none")]
    pub pic_locks: Option<ShapeLocks>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CNvCxnSpPr {
    #[serde(rename = "a:cxnSpLocks", skip_serializing_if = "Option::is_none")]
    pub cxn_sp_locks: Option<ShapeLocks>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CNvGrpSpPr {
    #[serde(rename = "a:grpSpLocks", skip_serializing_if = "Option::is_none")]
    pub grp_sp_locks: Option<ShapeLocks>,
}

/// `p:nvSpPr`: the non-visual group for a plain autoshape/text box (`p:sp`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NvSpPr {
    #[serde(rename = "p:cNvPr")]
    pub c_nv_pr: CNvPr,
    #[serde(rename = "p:cNvSpPr", default)]
    pub c_nv_sp_pr: CNvSpPr,
    #[serde(rename = "p:nvPr", default)]
    pub nv_pr: NvPr,
}

impl Default for CNvPr {
    fn default() -> Self {
        CNvPr {
            id: 0,
            name: String::new(),
            descr: None,
            title: None,
            hidden: None,
            hlink_click: None,
            hlink_hover: None,
        }
    }
}

/// `p:sp`: a plain autoshape or text box, spec §3's `sp` shape variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sp {
    #[serde(rename = "p:nvSpPr")]
    pub nv_sp_pr: NvSpPr,
    #[serde(rename = "p:spPr", default)]
    pub sp_pr: SpPr,
    #[serde(rename = "p:style", skip_serializing_if = "Option::is_none")]
    pub style: Option<ShapeStyle>,
    #[serde(rename = "p:txBody", skip_serializing_if = "Option::is_none")]
    pub tx_body: Option<TxBody>,
}

/// `p:nvPicPr`: the non-visual group for `p:pic`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NvPicPr {
    #[serde(rename = "p:cNvPr")]
    pub c_nv_pr: CNvPr,
    #[serde(rename = "p:cNvPicPr", default)]
    pub c_nv_pic_pr: CNvPicPr,
    #[serde(rename = "p:nvPr", default)]
    pub nv_pr: NvPr,
}

/// `p:pic`: a picture (including video/audio "pictures" whose `nvPr`
/// carries a media-file child), spec §3's `pic` shape variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pic {
    #[serde(rename = "p:nvPicPr")]
    pub nv_pic_pr: NvPicPr,
    #[serde(rename = "p:blipFill")]
    pub blip_fill: BlipFill,
    #[serde(rename = "p:spPr", default)]
    pub sp_pr: SpPr,
}

/// `p:nvCxnSpPr`: the non-visual group for `p:cxnSp`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NvCxnSpPr {
    #[serde(rename = "p:cNvPr")]
    pub c_nv_pr: CNvPr,
    #[serde(rename = "p:cNvCxnSpPr", default)]
    pub c_nv_cxn_sp_pr: CNvCxnSpPr,
    #[serde(rename = "p:nvPr", default)]
    pub nv_pr: NvPr,
}

/// `p:cxnSp`: a connector shape, spec §3's `cxnSp` shape variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CxnSp {
    #[serde(rename = "p:nvCxnSpPr")]
    pub nv_cxn_sp_pr: NvCxnSpPr,
    #[serde(rename = "p:spPr", default)]
    pub sp_pr: SpPr,
    #[serde(rename = "p:style", skip_serializing_if = "Option::is_none")]
    pub style: Option<ShapeStyle>,
}

/// `p:nvGrpSpPr`: the non-visual group for `p:grpSp`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NvGrpSpPr {
    #[serde(rename = "p:cNvPr")]
    pub c_nv_pr: CNvPr,
    #[serde(rename = "p:cNvGrpSpPr", default)]
    pub c_nv_grp_sp_pr: CNvGrpSpPr,
    #[serde(rename = "p:nvPr", default)]
    pub nv_pr: NvPr,
}

/// `p:grpSp`: a shape group, spec §3's `grpSp` shape variant. Its
/// children are the same mixed sequence as the slide's top-level shape
/// tree, so groups nest to arbitrary depth.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrpSp {
    #[serde(rename = "p:nvGrpSpPr")]
    pub nv_grp_sp_pr: NvGrpSpPr,
    #[serde(rename = "p:grpSpPr", default)]
    pub grp_sp_pr: GrpSpPr,
    #[serde(rename = "$value", default)]
    pub shapes: Vec<ShapeTreeEntry>,
}

/// `p:nvGraphicFramePr`: the non-visual group for `p:graphicFrame`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NvGraphicFramePr {
    #[serde(rename = "p:cNvPr")]
    pub c_nv_pr: CNvPr,
    #[serde(rename = "p:cNvGraphicFramePr", default)]
    pub c_nv_graphic_frame_pr: String,
    #[serde(rename = "p:nvPr", default)]
    pub nv_pr: NvPr,
}

/// The `uri` attribute of `a:graphicData`, spec §4.10's "constant URI"
/// for each supported `graphicFrame` content type.
pub mod graphic_data_uri {
    pub const TABLE: &str = "http://schemas.openxmlformats.org/drawingml/2006/table";
    pub const OLE: &str = "http://schemas.openxmlformats.org/presentationml/2006/ole";
}

/// `a:tbl`: a table, spec §4.10 "Tables serialize `a:tbl` with grid
/// widths and row heights".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tbl {
    #[serde(rename = "a:tblGrid", default)]
    pub tbl_grid: TblGrid,
    #[serde(rename = "a:tr", default)]
    pub rows: Vec<Tr>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TblGrid {
    #[serde(rename = "a:gridCol", default)]
    pub cols: Vec<GridCol>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCol {
    #[serde(rename = "@w")]
    pub w: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tr {
    #[serde(rename = "@h")]
    pub h: i64,
    #[serde(rename = "a:tc", default)]
    pub cells: Vec<Tc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tc {
    #[serde(rename = "a:txBody", default)]
    pub tx_body: TxBody,
}

/// `p:oleObj`: an embedded/linked OLE object, spec §4.10 "OLE objects
/// serialize `p:oleObj` under `a:graphicData` with the OLE URI constant".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OleObj {
    #[serde(rename = "@name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "@progId")]
    pub prog_id: String,
    #[serde(rename = "@r:id", skip_serializing_if = "Option::is_none")]
    pub r_id: Option<String>,
    #[serde(rename = "@showAsIcon", skip_serializing_if = "Option::is_none")]
    pub show_as_icon: Option<bool>,
}

/// Mixed content of `a:graphicData`: the one supported content kind,
/// spec §4.10 "other `graphicFrame` content types are rejected".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GraphicDataContent {
    #[serde(rename = "a:tbl")]
    Table(Tbl),
    #[serde(rename = "p:oleObj")]
    Ole(OleObj),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphicData {
    #[serde(rename = "@uri")]
    pub uri: String,
    #[serde(rename = "$value")]
    pub content: GraphicDataContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graphic {
    #[serde(rename = "a:graphicData")]
    pub graphic_data: GraphicData,
}

/// `p:graphicFrame`: a table or OLE object host, spec §3's
/// `graphicFrame` shape variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphicFrame {
    #[serde(rename = "p:nvGraphicFramePr")]
    pub nv_graphic_frame_pr: NvGraphicFramePr,
    #[serde(rename = "p:xfrm")]
    pub xfrm: Xfrm,
    #[serde(rename = "a:graphic")]
    pub graphic: Graphic,
}

/// `p:nvContentPartPr`: the non-visual group for `p:contentPart`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NvContentPartPr {
    #[serde(rename = "p:cNvPr")]
    pub c_nv_pr: CNvPr,
    #[serde(rename = "p:cNvContentPartPr", default)]
    pub c_nv_content_part_pr: String,
    #[serde(rename = "p:nvPr", default)]
    pub nv_pr: NvPr,
}

/// `p:contentPart`: an externally-authored ink/content part reference,
/// spec §3's `contentPart` shape variant. Per §4.10 this is a rejected
/// `graphicFrame` content alternative everywhere except here, its own
/// dedicated shape-tree entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPart {
    #[serde(rename = "p:nvContentPartPr")]
    pub nv_content_part_pr: NvContentPartPr,
    #[serde(rename = "a:xfrm", skip_serializing_if = "Option::is_none")]
    pub xfrm: Option<Xfrm>,
    #[serde(rename = "@r:id")]
    pub r_id: String,
}

/// The slide/group shape-tree's mixed-content child sequence, spec §3's
/// shape sum type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeTreeEntry {
    #[serde(rename = "p:sp")]
    Sp(Sp),
    #[serde(rename = "p:grpSp")]
    GrpSp(GrpSp),
    #[serde(rename = "p:pic")]
    Pic(Pic),
    #[serde(rename = "p:cxnSp")]
    CxnSp(CxnSp),
    #[serde(rename = "p:graphicFrame")]
    GraphicFrame(GraphicFrame),
    #[serde(rename = "p:contentPart")]
    ContentPart(ContentPart),
}
