//! Cross-module integration tests exercising the public facade end to
//! end: spec resolution, the apply engine, the PPTX serializer, and the
//! error envelope, the way a host application would chain them.

use docforge::pptx::{self, FillMode, Shape, ShapeKind, TextBody, Transform};
use docforge::xlsx::{
    self, CellSpec, CellValueSpec, ModSpec, RowSpec, SheetMutation, SheetSpec, WorkbookSpec,
};
use docforge::{pdf, Envelope, ErrorCode};

fn sample_workbook_spec() -> WorkbookSpec {
    WorkbookSpec {
        sheets: vec![SheetSpec {
            name: "Sheet1".to_string(),
            state: None,
            rows: vec![RowSpec {
                row: 1,
                height: None,
                cells: vec![CellSpec {
                    reference: "A1".to_string(),
                    value: CellValueSpec::String("Alpha".to_string()),
                    formula: None,
                    style_id: None,
                }],
            }],
            columns: vec![],
            merge_cells: vec![],
        }],
        ..Default::default()
    }
}

#[test]
fn resolve_workbook_then_apply_renames_sheet() {
    let workbook = xlsx::resolve_workbook(&sample_workbook_spec()).unwrap();
    assert_eq!(workbook.sheets.len(), 1);
    assert_eq!(workbook.sheets[0].name, "Sheet1");

    let mod_spec = ModSpec {
        sheet_mutations: vec![SheetMutation {
            name: "Sheet1".to_string(),
            rename: Some("Renamed".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    };
    let updated = xlsx::apply(&workbook, &mod_spec).unwrap();
    assert_eq!(updated.sheets[0].name, "Renamed");
}

#[test]
fn duplicate_sheet_names_are_rejected_at_resolve_time() {
    let mut spec = sample_workbook_spec();
    spec.sheets.push(spec.sheets[0].clone());
    let err = xlsx::resolve_workbook(&spec).unwrap_err();
    assert!(matches!(err, xlsx::Error::DuplicateSheetName(_)));
}

#[test]
fn pptx_shape_id_and_name_generation_feed_into_serialization() {
    let next_id = pptx::generate_shape_id(&["1", "4"]);
    assert_eq!(next_id, "5");
    let next_name = pptx::generate_shape_name("pic", &["Picture 1"]).unwrap();
    assert_eq!(next_name, "Picture 2");

    let shape = Shape {
        non_visual: pptx::NonVisualProps {
            id: next_id.parse().unwrap(),
            name: next_name,
            ..Default::default()
        },
        transform: Some(Transform {
            offset: Some((0, 0)),
            extent: Some((914400, 914400)),
            ..Default::default()
        }),
        kind: ShapeKind::Pic {
            blip_fill: pptx::BlipFillSpec {
                resource_id: "rId2".to_string(),
                source_rect: None,
                fill: Some(FillMode::Stretch { source_rect: None }),
            },
            media: None,
        },
    };
    let entry = pptx::serialize_shape(&shape).unwrap();
    assert!(matches!(entry, docforge_xml::slide::ShapeTreeEntry::Pic(_)));
}

#[test]
fn smartart_node_text_round_trips_through_the_facade() {
    use docforge_xml::diagram::{pt_type, CxnList, DataModel, Pt, PtList};
    use std::collections::HashMap;

    let mut rels = HashMap::new();
    rels.insert("rId1".to_string(), "ppt/diagrams/data1.xml".to_string());

    let mut diagrams = HashMap::new();
    diagrams.insert(
        "ppt/diagrams/data1.xml".to_string(),
        DataModel {
            xmlns_dgm: None,
            xmlns_a: None,
            pt_lst: PtList {
                pt: vec![Pt {
                    model_id: "{n1}".to_string(),
                    pt_type: Some(pt_type::NODE.to_string()),
                    cxn_id: None,
                    pr_set: None,
                    sp_pr: None,
                    t: None,
                }],
            },
            cxn_lst: CxnList::default(),
            ext_lst: None,
        },
    );

    let update = pptx::SmartArtUpdate::NodeText {
        resource_id: "rId1".to_string(),
        node_id: "{n1}".to_string(),
        text: TextBody::plain("Updated"),
    };
    pptx::apply_smart_art_updates(&rels, &mut diagrams, &[update]).unwrap();

    let diagram = &diagrams["ppt/diagrams/data1.xml"];
    let text = diagram.pt_lst.pt[0].t.as_ref().unwrap();
    assert_eq!(text.paragraphs[0].runs[0].text, "Updated");
}

#[test]
fn pdf_parse_error_classifies_into_the_envelope() {
    let result = pdf::parse(b"not a pdf", &pdf::ParseOptions::default());
    assert!(result.is_err());
    let core_result: docforge_core::error::Result<_> =
        result.map_err(docforge_core::error::Error::from);
    let env: Envelope<_> = core_result.into();
    match env {
        Envelope::Err { code, .. } => assert_eq!(code, ErrorCode::ParseError),
        Envelope::Ok { .. } => panic!("expected a parse error"),
    }
}
