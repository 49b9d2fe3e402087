//! SmartArt update dispatcher (spec §4.11, C12):
//! `applySmartArtUpdates(zipLikeView, slidePath, specs[])`. The core never
//! touches ZIP/part I/O (spec §6's "external collaborators"), so the
//! "zip-like view" and "slide path" are reduced here to the two things
//! the dispatcher actually reads: a resolved slide-rels map
//! (`resourceId -> diagram part path`, spec §4.11's "resolves each
//! `resourceId` through the slide's rels part") and the mutable set of
//! already-parsed [`DataModel`]s keyed by that same part path.
//!
//! Grounded on `DevExzh-litchi`'s read-only `ooxml::pptx::smartart`
//! diagram-node-tree shape (see `docforge_xml::diagram`) for the pt/cxn
//! data model, extended here with the write-side node add/remove/
//! connection operations the reference module does not implement.

use std::collections::HashMap;

use docforge_xml::diagram::{cxn_type, pt_type, Cxn, DataModel, Pt};

use crate::pptx::domain::TextBody;
use crate::pptx::error::{Error, Result};
use crate::pptx::serializer::serialize_text_body;

/// One ordered SmartArt change, spec §4.11: "applies each ordered change
/// by type: `nodeText` ... `nodeAdd` ... `nodeRemove` ... `connection`".
#[derive(Debug, Clone, PartialEq)]
pub enum SmartArtUpdate {
    NodeText {
        resource_id: String,
        node_id: String,
        text: TextBody,
    },
    NodeAdd {
        resource_id: String,
        parent_id: String,
        text: TextBody,
    },
    NodeRemove {
        resource_id: String,
        node_id: String,
    },
    Connection {
        resource_id: String,
        src_id: String,
        dest_id: String,
        /// Opaque passthrough per spec §9's open question: "SmartArt
        /// `connection` edges have a `connectionType` string with no
        /// validated enumeration in the source. Implementers should
        /// treat it as opaque and pass through verbatim."
        connection_type: String,
        op: ConnectionOp,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionOp {
    Add,
    Remove,
}

/// Apply every update in order against the diagram store, resolving
/// each update's `resourceId` through `rels` first. A `resourceId`
/// absent from `rels`, or present but without a loaded diagram, is a
/// `DiagramNotFound` error naming the id (spec §4.11 scenario S5).
pub fn apply_smart_art_updates(
    rels: &HashMap<String, String>,
    diagrams: &mut HashMap<String, DataModel>,
    updates: &[SmartArtUpdate],
) -> Result<()> {
    for update in updates {
        let resource_id = resource_id_of(update);
        let part_path = rels
            .get(resource_id)
            .ok_or_else(|| Error::DiagramNotFound(resource_id.to_string()))?;
        let diagram = diagrams
            .get_mut(part_path)
            .ok_or_else(|| Error::DiagramNotFound(resource_id.to_string()))?;
        apply_one(diagram, update)?;
    }
    Ok(())
}

fn resource_id_of(update: &SmartArtUpdate) -> &str {
    match update {
        SmartArtUpdate::NodeText { resource_id, .. }
        | SmartArtUpdate::NodeAdd { resource_id, .. }
        | SmartArtUpdate::NodeRemove { resource_id, .. }
        | SmartArtUpdate::Connection { resource_id, .. } => resource_id,
    }
}

fn apply_one(diagram: &mut DataModel, update: &SmartArtUpdate) -> Result<()> {
    match update {
        SmartArtUpdate::NodeText { node_id, text, .. } => node_text(diagram, node_id, text),
        SmartArtUpdate::NodeAdd { parent_id, text, .. } => node_add(diagram, parent_id, text),
        SmartArtUpdate::NodeRemove { node_id, .. } => node_remove(diagram, node_id),
        SmartArtUpdate::Connection { src_id, dest_id, connection_type, op, .. } => {
            connection(diagram, src_id, dest_id, connection_type, *op)
        }
    }
}

fn node_text(diagram: &mut DataModel, node_id: &str, text: &TextBody) -> Result<()> {
    let pt = diagram
        .pt_lst
        .pt
        .iter_mut()
        .find(|p| p.model_id == node_id && p.is_content_node())
        .ok_or_else(|| Error::NodeNotFound(node_id.to_string()))?;
    pt.t = Some(serialize_text_body(text));
    Ok(())
}

fn generate_model_id(prefix: &str, existing: &[String]) -> String {
    let mut n = existing.len() as u64;
    loop {
        let candidate = format!("{{docforge-{prefix}-{n}}}");
        if !existing.iter().any(|id| id == &candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn node_add(diagram: &mut DataModel, parent_id: &str, text: &TextBody) -> Result<()> {
    if !diagram.pt_lst.pt.iter().any(|p| p.model_id == parent_id) {
        return Err(Error::NodeNotFound(parent_id.to_string()));
    }

    let existing_pt_ids: Vec<String> = diagram.pt_lst.pt.iter().map(|p| p.model_id.clone()).collect();
    let node_id = generate_model_id("node", &existing_pt_ids);

    let existing_cxn_ids: Vec<String> = diagram.cxn_lst.cxn.iter().map(|c| c.model_id.clone()).collect();
    let cxn_id = generate_model_id("cxn", &existing_cxn_ids);

    let src_ord = diagram
        .cxn_lst
        .cxn
        .iter()
        .filter(|c| c.cxn_type.as_deref() == Some(cxn_type::PARENT_OF) && c.src_id == parent_id)
        .map(|c| c.src_ord + 1)
        .max()
        .unwrap_or(0);

    diagram.pt_lst.pt.push(Pt {
        model_id: node_id.clone(),
        pt_type: Some(pt_type::NODE.to_string()),
        cxn_id: None,
        pr_set: None,
        sp_pr: None,
        t: Some(serialize_text_body(text)),
    });

    diagram.cxn_lst.cxn.push(Cxn {
        model_id: cxn_id,
        cxn_type: Some(cxn_type::PARENT_OF.to_string()),
        src_id: parent_id.to_string(),
        dest_id: node_id,
        src_ord,
        dest_ord: 0,
        par_trans_id: None,
        sib_trans_id: None,
    });

    Ok(())
}

/// Collect `node_id` and every descendant reachable through `parOf`
/// edges, spec §4.11: "`nodeRemove` drops the subtree".
fn subtree_ids(diagram: &DataModel, node_id: &str) -> Vec<String> {
    let mut stack = vec![node_id.to_string()];
    let mut collected = Vec::new();
    while let Some(id) = stack.pop() {
        for cxn in &diagram.cxn_lst.cxn {
            if cxn.cxn_type.as_deref() == Some(cxn_type::PARENT_OF) && cxn.src_id == id {
                stack.push(cxn.dest_id.clone());
            }
        }
        collected.push(id);
    }
    collected
}

fn node_remove(diagram: &mut DataModel, node_id: &str) -> Result<()> {
    if !diagram.pt_lst.pt.iter().any(|p| p.model_id == node_id) {
        return Err(Error::NodeNotFound(node_id.to_string()));
    }

    let doomed = subtree_ids(diagram, node_id);
    diagram.pt_lst.pt.retain(|p| !doomed.contains(&p.model_id));
    diagram
        .cxn_lst
        .cxn
        .retain(|c| !doomed.contains(&c.src_id) && !doomed.contains(&c.dest_id));
    Ok(())
}

fn connection(
    diagram: &mut DataModel,
    src_id: &str,
    dest_id: &str,
    connection_type: &str,
    op: ConnectionOp,
) -> Result<()> {
    match op {
        ConnectionOp::Add => {
            let existing_ids: Vec<String> = diagram.cxn_lst.cxn.iter().map(|c| c.model_id.clone()).collect();
            let model_id = generate_model_id("cxn", &existing_ids);
            let src_ord = diagram
                .cxn_lst
                .cxn
                .iter()
                .filter(|c| c.src_id == src_id)
                .map(|c| c.src_ord + 1)
                .max()
                .unwrap_or(0);
            diagram.cxn_lst.cxn.push(Cxn {
                model_id,
                cxn_type: Some(connection_type.to_string()),
                src_id: src_id.to_string(),
                dest_id: dest_id.to_string(),
                src_ord,
                dest_ord: 0,
                par_trans_id: None,
                sib_trans_id: None,
            });
            Ok(())
        }
        ConnectionOp::Remove => {
            let before = diagram.cxn_lst.cxn.len();
            diagram.cxn_lst.cxn.retain(|c| {
                !(c.src_id == src_id
                    && c.dest_id == dest_id
                    && c.cxn_type.as_deref() == Some(connection_type))
            });
            if diagram.cxn_lst.cxn.len() == before {
                return Err(Error::ConnectionEndpointNotFound(format!(
                    "{src_id} -> {dest_id}"
                )));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docforge_xml::diagram::{CxnList, PtList};

    fn sample_diagram() -> DataModel {
        DataModel {
            xmlns_dgm: None,
            xmlns_a: None,
            pt_lst: PtList {
                pt: vec![
                    Pt {
                        model_id: "{root}".to_string(),
                        pt_type: Some(pt_type::DOCUMENT.to_string()),
                        cxn_id: None,
                        pr_set: None,
                        sp_pr: None,
                        t: None,
                    },
                    Pt {
                        model_id: "{n1}".to_string(),
                        pt_type: Some(pt_type::NODE.to_string()),
                        cxn_id: None,
                        pr_set: None,
                        sp_pr: None,
                        t: None,
                    },
                ],
            },
            cxn_lst: CxnList {
                cxn: vec![Cxn {
                    model_id: "{c1}".to_string(),
                    cxn_type: Some(cxn_type::PARENT_OF.to_string()),
                    src_id: "{root}".to_string(),
                    dest_id: "{n1}".to_string(),
                    src_ord: 0,
                    dest_ord: 0,
                    par_trans_id: None,
                    sib_trans_id: None,
                }],
            },
            ext_lst: None,
        }
    }

    #[test]
    fn missing_resource_id_is_diagram_not_found() {
        let rels = HashMap::new();
        let mut diagrams = HashMap::new();
        let updates = vec![SmartArtUpdate::NodeText {
            resource_id: "rId999".to_string(),
            node_id: "{n1}".to_string(),
            text: TextBody::plain("x"),
        }];
        let err = apply_smart_art_updates(&rels, &mut diagrams, &updates).unwrap_err();
        assert!(err.to_string().contains("rId999"));
    }

    #[test]
    fn node_text_replaces_content() {
        let mut rels = HashMap::new();
        rels.insert("rId1".to_string(), "ppt/diagrams/data1.xml".to_string());
        let mut diagrams = HashMap::new();
        diagrams.insert("ppt/diagrams/data1.xml".to_string(), sample_diagram());

        let updates = vec![SmartArtUpdate::NodeText {
            resource_id: "rId1".to_string(),
            node_id: "{n1}".to_string(),
            text: TextBody::plain("Updated"),
        }];
        apply_smart_art_updates(&rels, &mut diagrams, &updates).unwrap();

        let diagram = &diagrams["ppt/diagrams/data1.xml"];
        let pt = diagram.pt_lst.pt.iter().find(|p| p.model_id == "{n1}").unwrap();
        assert_eq!(pt.t.as_ref().unwrap().paragraphs[0].runs[0].text, "Updated");
    }

    #[test]
    fn node_add_creates_node_and_parent_edge() {
        let mut rels = HashMap::new();
        rels.insert("rId1".to_string(), "ppt/diagrams/data1.xml".to_string());
        let mut diagrams = HashMap::new();
        diagrams.insert("ppt/diagrams/data1.xml".to_string(), sample_diagram());

        let updates = vec![SmartArtUpdate::NodeAdd {
            resource_id: "rId1".to_string(),
            parent_id: "{root}".to_string(),
            text: TextBody::plain("New"),
        }];
        apply_smart_art_updates(&rels, &mut diagrams, &updates).unwrap();

        let diagram = &diagrams["ppt/diagrams/data1.xml"];
        assert_eq!(diagram.pt_lst.pt.len(), 3);
        let new_edges: Vec<_> = diagram
            .cxn_lst
            .cxn
            .iter()
            .filter(|c| c.src_id == "{root}" && c.cxn_type.as_deref() == Some(cxn_type::PARENT_OF))
            .collect();
        assert_eq!(new_edges.len(), 2);
    }

    #[test]
    fn node_remove_drops_subtree() {
        let mut rels = HashMap::new();
        rels.insert("rId1".to_string(), "ppt/diagrams/data1.xml".to_string());
        let mut diagrams = HashMap::new();
        diagrams.insert("ppt/diagrams/data1.xml".to_string(), sample_diagram());

        let updates = vec![SmartArtUpdate::NodeRemove {
            resource_id: "rId1".to_string(),
            node_id: "{n1}".to_string(),
        }];
        apply_smart_art_updates(&rels, &mut diagrams, &updates).unwrap();

        let diagram = &diagrams["ppt/diagrams/data1.xml"];
        assert_eq!(diagram.pt_lst.pt.len(), 1);
        assert!(diagram.cxn_lst.cxn.is_empty());
    }

    #[test]
    fn connection_add_then_remove() {
        let mut rels = HashMap::new();
        rels.insert("rId1".to_string(), "ppt/diagrams/data1.xml".to_string());
        let mut diagrams = HashMap::new();
        diagrams.insert("ppt/diagrams/data1.xml".to_string(), sample_diagram());

        let add = SmartArtUpdate::Connection {
            resource_id: "rId1".to_string(),
            src_id: "{n1}".to_string(),
            dest_id: "{root}".to_string(),
            connection_type: "customEdge".to_string(),
            op: ConnectionOp::Add,
        };
        apply_smart_art_updates(&rels, &mut diagrams, &[add]).unwrap();
        assert_eq!(diagrams["ppt/diagrams/data1.xml"].cxn_lst.cxn.len(), 2);

        let remove = SmartArtUpdate::Connection {
            resource_id: "rId1".to_string(),
            src_id: "{n1}".to_string(),
            dest_id: "{root}".to_string(),
            connection_type: "customEdge".to_string(),
            op: ConnectionOp::Remove,
        };
        apply_smart_art_updates(&rels, &mut diagrams, &[remove]).unwrap();
        assert_eq!(diagrams["ppt/diagrams/data1.xml"].cxn_lst.cxn.len(), 1);
    }

    #[test]
    fn connection_remove_missing_edge_errors() {
        let mut rels = HashMap::new();
        rels.insert("rId1".to_string(), "ppt/diagrams/data1.xml".to_string());
        let mut diagrams = HashMap::new();
        diagrams.insert("ppt/diagrams/data1.xml".to_string(), sample_diagram());

        let remove = SmartArtUpdate::Connection {
            resource_id: "rId1".to_string(),
            src_id: "{n1}".to_string(),
            dest_id: "{root}".to_string(),
            connection_type: "nope".to_string(),
            op: ConnectionOp::Remove,
        };
        let err = apply_smart_art_updates(&rels, &mut diagrams, &[remove]).unwrap_err();
        assert!(matches!(err, Error::ConnectionEndpointNotFound(_)));
    }
}
