//! SmartArt data model schema (`ppt/diagrams/data*.xml`), spec §4.11.
//!
//! The `dgm:dataModel` element carries a point list (`ptLst`, nodes and
//! presentation points alike) and a connection list (`cxnLst`, parent/
//! sibling/presentation edges). Layout (`layoutNode`) and style/color
//! transform parts are treated as opaque and are not modeled here; only
//! the pieces the update dispatcher touches are typed.

use serde::{Deserialize, Serialize};

use crate::slide::TxBody;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename = "dgm:dataModel")]
pub struct DataModel {
    #[serde(rename = "@xmlns:dgm", skip_serializing_if = "Option::is_none")]
    pub xmlns_dgm: Option<String>,

    #[serde(rename = "@xmlns:a", skip_serializing_if = "Option::is_none")]
    pub xmlns_a: Option<String>,

    #[serde(rename = "dgm:ptLst")]
    pub pt_lst: PtList,

    #[serde(rename = "dgm:cxnLst")]
    pub cxn_lst: CxnList,

    /// `dgm:bg`/`dgm:whole` and other style passthrough content, kept
    /// verbatim so a round trip doesn't drop presentation styling.
    #[serde(rename = "dgm:extLst", skip_serializing_if = "Option::is_none")]
    pub ext_lst: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PtList {
    #[serde(rename = "dgm:pt", default)]
    pub pt: Vec<Pt>,
}

pub mod pt_type {
    pub const NODE: &str = "node";
    pub const ASSIST: &str = "asst";
    pub const DOCUMENT: &str = "doc";
    pub const PRESENTATION: &str = "pres";
    pub const PARENT_TRANSITION: &str = "parTrans";
    pub const SIBLING_TRANSITION: &str = "sibTrans";
}

/// A single SmartArt data point. `model_id` is the stable identifier
/// used by connections; `pt_type` distinguishes content nodes
/// (`node`/`asst`/`doc`) from layout/transition points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pt {
    #[serde(rename = "@modelId")]
    pub model_id: String,

    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub pt_type: Option<String>,

    #[serde(rename = "@cxnId", default, skip_serializing_if = "Option::is_none")]
    pub cxn_id: Option<String>,

    #[serde(rename = "dgm:prSet", skip_serializing_if = "Option::is_none")]
    pub pr_set: Option<String>,

    #[serde(rename = "dgm:spPr", skip_serializing_if = "Option::is_none")]
    pub sp_pr: Option<String>,

    #[serde(rename = "dgm:t", skip_serializing_if = "Option::is_none")]
    pub t: Option<TxBody>,
}

impl Pt {
    pub fn is_content_node(&self) -> bool {
        matches!(
            self.pt_type.as_deref(),
            None | Some(pt_type::NODE) | Some(pt_type::ASSIST) | Some(pt_type::DOCUMENT)
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CxnList {
    #[serde(rename = "dgm:cxn", default)]
    pub cxn: Vec<Cxn>,
}

pub mod cxn_type {
    pub const PARENT_OF: &str = "parOf";
    pub const PRESENTATION_OF: &str = "presOf";
    pub const PRESENTATION_PARENT_OF: &str = "presParOf";
    pub const UNKNOWN_RELATIONSHIP: &str = "unknownRelationship";
}

/// A connection between two `Pt`s. `cxn_type` is treated as an opaque
/// passthrough string: the dispatcher does not attempt to interpret
/// layout-specific connection types beyond `parOf`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cxn {
    #[serde(rename = "@modelId")]
    pub model_id: String,

    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub cxn_type: Option<String>,

    #[serde(rename = "@srcId")]
    pub src_id: String,

    #[serde(rename = "@destId")]
    pub dest_id: String,

    #[serde(rename = "@srcOrd")]
    pub src_ord: u32,

    #[serde(rename = "@destOrd")]
    pub dest_ord: u32,

    #[serde(rename = "@parTransId", default, skip_serializing_if = "Option::is_none")]
    pub par_trans_id: Option<String>,

    #[serde(rename = "@sibTransId", default, skip_serializing_if = "Option::is_none")]
    pub sib_trans_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_node_classification() {
        let pt = Pt {
            model_id: "{1}".into(),
            pt_type: Some(pt_type::NODE.into()),
            cxn_id: None,
            pr_set: None,
            sp_pr: None,
            t: None,
        };
        assert!(pt.is_content_node());

        let pt = Pt {
            pt_type: Some(pt_type::PRESENTATION.into()),
            ..pt
        };
        assert!(!pt.is_content_node());
    }
}
