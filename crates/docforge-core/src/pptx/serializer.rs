//! PPTX shape serializer (spec §4.10, C11): a total function from the
//! shape domain ([`crate::pptx::domain`]) to an exact `docforge_xml::slide`
//! element tree. Grounded on `docforge-xml`'s own serde/quick-xml
//! `#[derive(Serialize)]` + `@Attr`-renaming convention (the same one
//! `docforge-core::xlsx::sst` bridges for shared strings) and, for the
//! attribute/element-ordering discipline a hand-rolled XML generator has
//! to get right by hand, the `yingkitw-pptx-rs` XML generator in the
//! reference pack.

use docforge_xml::slide::{
    self, AdjustValue, AdjustValueList, Blip, BlipFill, CNvCxnSpPr, CNvGrpSpPr, CNvPicPr, CNvPr,
    CNvSpPr, ConnectionSite as XmlConnectionSite, ConnectionSiteList, ContentPart, CustGeom,
    CxnSp, Extent, FontRef, Geom, Graphic, GraphicData, GraphicDataContent, GraphicFrame, GrpSp,
    GrpSpPr, GridCol, GuideList, HlinkClick, MediaLink, NvCxnSpPr, NvContentPartPr,
    NvGraphicFramePr, NvGrpSpPr, NvPicPr, NvPr, NvSpPr, OleObj, Path, PathCommand as XmlPathCommand,
    PathList, Pic, PlaceholderRef, Point, PresetGeom, Run, SchemeClr, ShapeLocks, ShapeStyle,
    ShapeTreeEntry, SndRef, Sp, SpPr, SrcRect, SrgbClr, Stretch, StyleRef, Tbl, TblGrid, Tc, Tr,
    TxBody, Xfrm,
};

use crate::pptx::domain::{
    BlipFillSpec, ColorRef, CustomPath, FillMode, FontRefSpec, Geometry, GraphicFrameContent,
    HyperlinkSpec, MediaRef, NonVisualProps, OleObjectSpec, PathCommand, Rect, Shape, ShapeKind,
    ShapeStyleSpec, StyleRefSpec, TableSpec, TextBody as DomainTextBody, Transform,
};
use crate::pptx::error::{Error, Result};

/// Serialize one shape-tree entry, dispatching on its domain kind (spec
/// §3's shape sum type).
pub fn serialize_shape(shape: &Shape) -> Result<ShapeTreeEntry> {
    let xfrm = shape.transform.as_ref().map(serialize_xfrm);

    match &shape.kind {
        ShapeKind::Sp { geometry, style, text_body, placeholder } => {
            let sp_pr = SpPr {
                xfrm,
                geom: geometry.as_ref().map(serialize_geometry).transpose()?,
            };
            Ok(ShapeTreeEntry::Sp(Sp {
                nv_sp_pr: NvSpPr {
                    c_nv_pr: serialize_cnvpr(&shape.non_visual),
                    c_nv_sp_pr: CNvSpPr {
                        sp_locks: shape.non_visual.locks.map(serialize_locks),
                        tx_box: None,
                    },
                    nv_pr: NvPr {
                        ph: placeholder.as_ref().map(|p| PlaceholderRef {
                            ph_type: p.ph_type.clone(),
                            idx: p.idx,
                        }),
                        ..Default::default()
                    },
                },
                sp_pr,
                style: style.as_ref().map(serialize_style).transpose()?,
                tx_body: text_body.as_ref().map(serialize_text_body),
            }))
        }

        ShapeKind::GrpSp { children } => {
            let shapes = children
                .iter()
                .map(serialize_shape)
                .collect::<Result<Vec<_>>>()?;
            Ok(ShapeTreeEntry::GrpSp(GrpSp {
                nv_grp_sp_pr: NvGrpSpPr {
                    c_nv_pr: serialize_cnvpr(&shape.non_visual),
                    c_nv_grp_sp_pr: CNvGrpSpPr {
                        grp_sp_locks: shape.non_visual.locks.map(serialize_locks),
                    },
                    nv_pr: NvPr::default(),
                },
                grp_sp_pr: GrpSpPr { xfrm },
                shapes,
            }))
        }

        ShapeKind::Pic { blip_fill, media } => {
            let sp_pr = SpPr { xfrm, geom: None };
            Ok(ShapeTreeEntry::Pic(Pic {
                nv_pic_pr: NvPicPr {
                    c_nv_pr: serialize_cnvpr(&shape.non_visual),
                    c_nv_pic_pr: CNvPicPr {
                        pic_locks: shape.non_visual.locks.map(serialize_locks),
                    },
                    nv_pr: NvPr {
                        video_file: matches!(media, Some(MediaRef::Video { .. }))
                            .then(|| media_link(media)),
                        audio_file: matches!(media, Some(MediaRef::Audio { .. }))
                            .then(|| media_link(media)),
                        wav_audio_file: matches!(media, Some(MediaRef::WavAudio { .. }))
                            .then(|| media_link(media)),
                        quick_time_file: matches!(media, Some(MediaRef::QuickTime { .. }))
                            .then(|| media_link(media)),
                        ..Default::default()
                    },
                },
                blip_fill: serialize_blip_fill(blip_fill)?,
                sp_pr,
            }))
        }

        ShapeKind::CxnSp { geometry, style } => {
            let sp_pr = SpPr {
                xfrm,
                geom: geometry.as_ref().map(serialize_geometry).transpose()?,
            };
            Ok(ShapeTreeEntry::CxnSp(CxnSp {
                nv_cxn_sp_pr: NvCxnSpPr {
                    c_nv_pr: serialize_cnvpr(&shape.non_visual),
                    c_nv_cxn_sp_pr: CNvCxnSpPr {
                        cxn_sp_locks: shape.non_visual.locks.map(serialize_locks),
                    },
                    nv_pr: NvPr::default(),
                },
                sp_pr,
                style: style.as_ref().map(serialize_style).transpose()?,
            }))
        }

        ShapeKind::GraphicFrame { content } => {
            let xfrm = xfrm.ok_or_else(|| {
                Error::InvalidInput("graphicFrame requires a transform".to_string())
            })?;
            Ok(ShapeTreeEntry::GraphicFrame(GraphicFrame {
                nv_graphic_frame_pr: NvGraphicFramePr {
                    c_nv_pr: serialize_cnvpr(&shape.non_visual),
                    c_nv_graphic_frame_pr: String::new(),
                    nv_pr: NvPr::default(),
                },
                xfrm,
                graphic: serialize_graphic_frame_content(content)?,
            }))
        }

        ShapeKind::ContentPart { r_id } => Ok(ShapeTreeEntry::ContentPart(ContentPart {
            nv_content_part_pr: NvContentPartPr {
                c_nv_pr: serialize_cnvpr(&shape.non_visual),
                c_nv_content_part_pr: String::new(),
                nv_pr: NvPr::default(),
            },
            xfrm,
            r_id: r_id.clone(),
        })),
    }
}

fn media_link(media: &Option<MediaRef>) -> MediaLink {
    let r_link = match media {
        Some(MediaRef::Video { r_link })
        | Some(MediaRef::Audio { r_link })
        | Some(MediaRef::WavAudio { r_link })
        | Some(MediaRef::QuickTime { r_link }) => r_link.clone(),
        None => String::new(),
    };
    MediaLink { r_link }
}

fn serialize_locks(locks: crate::pptx::domain::ShapeLocks) -> ShapeLocks {
    ShapeLocks {
        no_grp: locks.no_grp.then_some(true),
        no_select: locks.no_select.then_some(true),
        no_rot: locks.no_rot.then_some(true),
        no_change_aspect: locks.no_change_aspect.then_some(true),
    }
}

fn serialize_hlink(link: &HyperlinkSpec) -> HlinkClick {
    HlinkClick {
        r_id: link.r_id.clone(),
        action: link.action.clone(),
        tooltip: link.tooltip.clone(),
        snd: link.sound.as_ref().map(|s| SndRef {
            r_embed: s.r_embed.clone(),
            name: s.name.clone(),
        }),
    }
}

/// `p:cNvPr`, spec §4.10: "boolean `hidden` serializes as `"1"`/`"0"`
/// when set, omitted when undefined".
fn serialize_cnvpr(nv: &NonVisualProps) -> CNvPr {
    CNvPr {
        id: nv.id,
        name: nv.name.clone(),
        descr: nv.description.clone(),
        title: nv.title.clone(),
        hidden: nv.hidden,
        hlink_click: nv.hyperlink.as_ref().map(serialize_hlink),
        hlink_hover: nv.hyperlink_hover.as_ref().map(serialize_hlink),
    }
}

/// `a:xfrm`: "rotation and flip attributes are emitted only when
/// non-default" (spec §4.10).
fn serialize_xfrm(transform: &Transform) -> Xfrm {
    Xfrm {
        rot: (transform.rotation != 0).then_some(transform.rotation),
        flip_h: transform.flip_h.then_some(true),
        flip_v: transform.flip_v.then_some(true),
        off: transform.offset.map(|(x, y)| Point { x, y }),
        ext: transform.extent.map(|(cx, cy)| Extent { cx, cy }),
        ch_off: transform.child_offset.map(|(x, y)| Point { x, y }),
        ch_ext: transform.child_extent.map(|(cx, cy)| Extent { cx, cy }),
    }
}

fn serialize_rect(rect: Rect) -> SrcRect {
    SrcRect {
        l: Some(rect.l),
        t: Some(rect.t),
        r: Some(rect.r),
        b: Some(rect.b),
    }
}

fn serialize_geometry(geometry: &Geometry) -> Result<Geom> {
    match geometry {
        Geometry::Preset { name, adjust_values } => Ok(Geom::Preset(PresetGeom {
            prst: name.clone(),
            av_lst: AdjustValueList {
                gd: adjust_values
                    .iter()
                    .map(|(n, v)| AdjustValue {
                        name: n.clone(),
                        fmla: format!("val {v}"),
                    })
                    .collect(),
            },
        })),
        Geometry::Custom {
            paths,
            guides,
            text_rect,
            connection_sites,
            adjust_values,
        } => Ok(Geom::Custom(CustGeom {
            av_lst: AdjustValueList {
                gd: adjust_values
                    .iter()
                    .map(|(n, fmla)| AdjustValue {
                        name: n.clone(),
                        fmla: fmla.clone(),
                    })
                    .collect(),
            },
            gd_lst: GuideList {
                gd: guides
                    .iter()
                    .map(|(n, fmla)| AdjustValue {
                        name: n.clone(),
                        fmla: fmla.clone(),
                    })
                    .collect(),
            },
            ah_lst: String::new(),
            cxn_lst: (!connection_sites.is_empty()).then(|| ConnectionSiteList {
                cxn: connection_sites
                    .iter()
                    .map(|c| XmlConnectionSite {
                        ang: c.angle,
                        pos: Point { x: c.x, y: c.y },
                    })
                    .collect(),
            }),
            rect: text_rect.map(|r| slide::TextRect { l: r.l, t: r.t, r: r.r, b: r.b }),
            path_lst: PathList {
                path: paths.iter().map(serialize_custom_path).collect(),
            },
        })),
    }
}

fn serialize_custom_path(path: &CustomPath) -> Path {
    Path {
        w: path.width,
        h: path.height,
        fill: path.fill.clone(),
        stroke: path.stroke,
        commands: path.commands.iter().map(serialize_path_command).collect(),
    }
}

fn serialize_path_command(command: &PathCommand) -> XmlPathCommand {
    match command {
        PathCommand::MoveTo(x, y) => XmlPathCommand::MoveTo { pt: Point { x: *x, y: *y } },
        PathCommand::LineTo(x, y) => XmlPathCommand::LnTo { pt: Point { x: *x, y: *y } },
        PathCommand::ArcTo { w_radius, h_radius, start_angle, swing_angle } => {
            XmlPathCommand::ArcTo {
                w_r: *w_radius,
                h_r: *h_radius,
                st_ang: *start_angle,
                sw_ang: *swing_angle,
            }
        }
        PathCommand::QuadBezierTo(pts) => XmlPathCommand::QuadBezTo {
            pts: pts.iter().map(|(x, y)| Point { x: *x, y: *y }).collect(),
        },
        PathCommand::CubicBezierTo(pts) => XmlPathCommand::CubicBezTo {
            pts: pts.iter().map(|(x, y)| Point { x: *x, y: *y }).collect(),
        },
        PathCommand::Close => XmlPathCommand::Close {},
    }
}

fn serialize_color(color: &ColorRef) -> (Option<SrgbClr>, Option<SchemeClr>) {
    match color {
        ColorRef::Srgb(val) => (Some(SrgbClr { val: val.clone() }), None),
        ColorRef::Scheme(val) => (None, Some(SchemeClr { val: val.clone() })),
    }
}

fn serialize_style_ref(r: &StyleRefSpec) -> StyleRef {
    let (srgb, scheme) = serialize_color(&r.color);
    StyleRef { idx: r.idx, srgb_clr: srgb, scheme_clr: scheme }
}

fn serialize_font_ref(r: &FontRefSpec) -> FontRef {
    let (srgb, scheme) = serialize_color(&r.color);
    FontRef { idx: r.idx.clone(), srgb_clr: srgb, scheme_clr: scheme }
}

/// `p:style`, spec §4.10: "emit child refs only when at least one
/// reference is present".
fn serialize_style(style: &ShapeStyleSpec) -> Result<ShapeStyle> {
    if style.is_empty() {
        return Err(Error::InvalidInput(
            "shape style must carry at least one reference".to_string(),
        ));
    }
    Ok(ShapeStyle {
        ln_ref: style.line_ref.as_ref().map(serialize_style_ref),
        fill_ref: style.fill_ref.as_ref().map(serialize_style_ref),
        effect_ref: style.effect_ref.as_ref().map(serialize_style_ref),
        font_ref: style.font_ref.as_ref().map(serialize_font_ref),
    })
}

pub(crate) fn serialize_text_body(body: &DomainTextBody) -> TxBody {
    TxBody {
        body_pr: String::new(),
        paragraphs: body
            .paragraphs
            .iter()
            .map(|p| slide::Paragraph {
                runs: p.runs.iter().map(|t| Run { text: t.clone() }).collect(),
            })
            .collect(),
    }
}

/// `p:blipFill`, spec §4.10: rejects a `data:` URI resource and requires
/// exactly one of stretch/tile.
fn serialize_blip_fill(spec: &BlipFillSpec) -> Result<BlipFill> {
    if spec.resource_id.starts_with("data:") {
        return Err(Error::DataUriUnsupported(spec.resource_id.clone()));
    }
    let src_rect = spec.source_rect.map(serialize_rect);
    let (stretch, tile) = match &spec.fill {
        None => return Err(Error::FillModeRequired),
        Some(FillMode::Stretch { source_rect }) => (
            Some(Stretch {
                fill_rect: source_rect.map(serialize_rect).unwrap_or_default(),
            }),
            None,
        ),
        Some(FillMode::Tile { sx, sy, flip, align, .. }) => (
            None,
            Some(docforge_xml::slide::Tile {
                sx: *sx,
                sy: *sy,
                flip: flip.clone(),
                algn: align.clone(),
            }),
        ),
    };
    Ok(BlipFill {
        blip: Blip { r_embed: spec.resource_id.clone() },
        src_rect,
        stretch,
        tile,
    })
}

fn serialize_graphic_frame_content(content: &GraphicFrameContent) -> Result<Graphic> {
    match content {
        GraphicFrameContent::Table(table) => Ok(Graphic {
            graphic_data: GraphicData {
                uri: slide::graphic_data_uri::TABLE.to_string(),
                content: GraphicDataContent::Table(serialize_table(table)),
            },
        }),
        GraphicFrameContent::Ole(ole) => Ok(Graphic {
            graphic_data: GraphicData {
                uri: slide::graphic_data_uri::OLE.to_string(),
                content: GraphicDataContent::Ole(serialize_ole(ole)?),
            },
        }),
    }
}

fn serialize_table(table: &TableSpec) -> Tbl {
    Tbl {
        tbl_grid: TblGrid {
            cols: table.column_widths.iter().map(|w| GridCol { w: *w }).collect(),
        },
        rows: table
            .rows
            .iter()
            .map(|row| Tr {
                h: row.height,
                cells: row
                    .cells
                    .iter()
                    .map(|c| Tc { tx_body: serialize_text_body(c) })
                    .collect(),
            })
            .collect(),
    }
}

fn serialize_ole(ole: &OleObjectSpec) -> Result<OleObj> {
    if ole.prog_id.is_empty() {
        return Err(Error::MissingRequiredField("progId".to_string()));
    }
    Ok(OleObj {
        name: ole.name.clone(),
        prog_id: ole.prog_id.clone(),
        r_id: ole.r_id.clone(),
        show_as_icon: ole.show_as_icon.then_some(true),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pptx::domain::*;

    fn base_nv(id: u32, name: &str) -> NonVisualProps {
        NonVisualProps { id, name: name.to_string(), ..Default::default() }
    }

    #[test]
    fn sp_serializes_preset_geometry_with_adjust_values() {
        let shape = Shape {
            non_visual: base_nv(2, "Rectangle 1"),
            transform: Some(Transform {
                offset: Some((100, 200)),
                extent: Some((300, 400)),
                ..Default::default()
            }),
            kind: ShapeKind::Sp {
                geometry: Some(Geometry::Preset {
                    name: "roundRect".to_string(),
                    adjust_values: vec![("adj".to_string(), 16667)],
                }),
                style: None,
                text_body: Some(TextBody::plain("Hello")),
                placeholder: None,
            },
        };

        let entry = serialize_shape(&shape).unwrap();
        match entry {
            ShapeTreeEntry::Sp(sp) => {
                assert_eq!(sp.nv_sp_pr.c_nv_pr.id, 2);
                assert_eq!(sp.nv_sp_pr.c_nv_pr.name, "Rectangle 1");
                let geom = sp.sp_pr.geom.unwrap();
                match geom {
                    Geom::Preset(p) => {
                        assert_eq!(p.prst, "roundRect");
                        assert_eq!(p.av_lst.gd[0].fmla, "val 16667");
                    }
                    _ => panic!("expected preset geometry"),
                }
                assert_eq!(sp.tx_body.unwrap().paragraphs[0].runs[0].text, "Hello");
            }
            _ => panic!("expected p:sp"),
        }
    }

    #[test]
    fn hidden_flag_passes_through_only_when_set() {
        let shape = Shape {
            non_visual: NonVisualProps { hidden: Some(true), ..base_nv(3, "Shape 2") },
            transform: None,
            kind: ShapeKind::Sp { geometry: None, style: None, text_body: None, placeholder: None },
        };
        let entry = serialize_shape(&shape).unwrap();
        match entry {
            ShapeTreeEntry::Sp(sp) => assert_eq!(sp.nv_sp_pr.c_nv_pr.hidden, Some(true)),
            _ => panic!("expected p:sp"),
        }
    }

    #[test]
    fn blip_fill_rejects_data_uri() {
        let spec = BlipFillSpec {
            resource_id: "data:image/png;base64,abc".to_string(),
            source_rect: None,
            fill: Some(FillMode::Stretch { source_rect: None }),
        };
        let err = serialize_blip_fill(&spec).unwrap_err();
        assert!(matches!(err, Error::DataUriUnsupported(_)));
    }

    #[test]
    fn blip_fill_requires_stretch_or_tile() {
        let spec = BlipFillSpec {
            resource_id: "rId5".to_string(),
            source_rect: None,
            fill: None,
        };
        let err = serialize_blip_fill(&spec).unwrap_err();
        assert!(matches!(err, Error::FillModeRequired));
    }

    #[test]
    fn blip_fill_accepts_tile() {
        let spec = BlipFillSpec {
            resource_id: "rId5".to_string(),
            source_rect: None,
            fill: Some(FillMode::Tile {
                source_rect: None,
                sx: Some(100000),
                sy: Some(100000),
                flip: None,
                align: Some("tl".to_string()),
            }),
        };
        let blip = serialize_blip_fill(&spec).unwrap();
        assert!(blip.tile.is_some());
        assert!(blip.stretch.is_none());
    }

    #[test]
    fn ole_object_requires_prog_id() {
        let ole = OleObjectSpec {
            prog_id: String::new(),
            r_id: None,
            name: None,
            show_as_icon: false,
        };
        let err = serialize_ole(&ole).unwrap_err();
        assert!(matches!(err, Error::MissingRequiredField(_)));
    }

    #[test]
    fn graphic_frame_requires_transform() {
        let shape = Shape {
            non_visual: base_nv(4, "Table 1"),
            transform: None,
            kind: ShapeKind::GraphicFrame {
                content: GraphicFrameContent::Table(TableSpec { column_widths: vec![], rows: vec![] }),
            },
        };
        assert!(serialize_shape(&shape).is_err());
    }

    #[test]
    fn table_graphic_frame_uses_table_uri() {
        let shape = Shape {
            non_visual: base_nv(4, "Table 1"),
            transform: Some(Transform { offset: Some((0, 0)), extent: Some((100, 100)), ..Default::default() }),
            kind: ShapeKind::GraphicFrame {
                content: GraphicFrameContent::Table(TableSpec {
                    column_widths: vec![100, 200],
                    rows: vec![TableRow { height: 50, cells: vec![TextBody::plain("a"), TextBody::plain("b")] }],
                }),
            },
        };
        match serialize_shape(&shape).unwrap() {
            ShapeTreeEntry::GraphicFrame(gf) => {
                assert_eq!(gf.graphic.graphic_data.uri, slide::graphic_data_uri::TABLE);
            }
            _ => panic!("expected graphicFrame"),
        }
    }

    #[test]
    fn rotation_and_flip_omitted_when_default() {
        let xfrm = serialize_xfrm(&Transform::default());
        assert_eq!(xfrm.rot, None);
        assert_eq!(xfrm.flip_h, None);
        assert_eq!(xfrm.flip_v, None);
    }

    #[test]
    fn group_shape_serializes_nested_children() {
        let child = Shape {
            non_visual: base_nv(3, "Shape 2"),
            transform: None,
            kind: ShapeKind::Sp { geometry: None, style: None, text_body: None, placeholder: None },
        };
        let group = Shape {
            non_visual: base_nv(2, "Group 1"),
            transform: Some(Transform {
                offset: Some((0, 0)),
                extent: Some((100, 100)),
                child_offset: Some((0, 0)),
                child_extent: Some((100, 100)),
                ..Default::default()
            }),
            kind: ShapeKind::GrpSp { children: vec![child] },
        };
        match serialize_shape(&group).unwrap() {
            ShapeTreeEntry::GrpSp(g) => {
                assert_eq!(g.shapes.len(), 1);
                assert!(g.grp_sp_pr.xfrm.unwrap().ch_ext.is_some());
            }
            _ => panic!("expected grpSp"),
        }
    }
}
