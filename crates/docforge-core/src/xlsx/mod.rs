//! XLSX format core (spec §3, §4.8, §4.9): the domain model, build-spec
//! resolver, and immutable apply-modifications engine over OOXML
//! spreadsheet documents.

pub mod apply;
pub mod dates;
pub mod domain;
pub mod error;
pub mod spec;
pub mod sst;
pub mod utils;

pub use apply::{apply, FeatureOp, HyperlinkSpec, ModSpec, RowMutationSpec, RowPropertyUpdate, SheetMutation};
pub use domain::{
    Cell, CellAddress, CellValue, ColorSpec, ColumnDef, DefinedNameEntry, Formula, FormulaType,
    FreezePane, HyperlinkEntry, HyperlinkTarget, MergeRange, PageBreaksConfig, Row, Sheet,
    SheetState, SheetViewConfig, Styles, Workbook,
};
pub use error::{Error, Result};
pub use spec::{
    CellSpec, CellValueSpec, ColumnSpec, DefinedNameSpec, FormulaSpec, RowSpec, SheetSpec,
    StylesSpec, WorkbookSpec, resolve_workbook,
};
