//! XLSX build-spec input types and the `resolveWorkbook` resolver (spec
//! §4.8, C9). Grounded on the teacher's domain/XML split, restructured
//! into the purely functional `resolveWorkbook(spec) -> Workbook`
//! contract this spec mandates rather than the teacher's mutate-in-place
//! `Workbook` API.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use docforge_xml::styles::{Border, Fill, Font, NumFmt, Xf};

use crate::xlsx::dates::DateSystem;
use crate::xlsx::domain::{
    Cell, CellAddress, CellValue, ColumnDef, DefinedNameEntry, Formula, FormulaType, MergeRange,
    Row, Sheet, SheetState, Styles, Workbook,
};
use crate::xlsx::error::{Error, Result};
use crate::xlsx::utils::cell_ref::cell_name_to_coordinates;

/// Shorthand or fully-tagged cell value, per spec §4.8: "shorthand
/// `string|number|boolean` or tagged value".
#[derive(Debug, Clone, PartialEq)]
pub enum CellValueSpec {
    Empty,
    String(String),
    Number(f64),
    Bool(bool),
    /// ISO 8601 input, normalized to a UTC instant (spec §4.8 item 6).
    Date(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormulaSpec {
    pub formula_type: Option<String>,
    pub expr: String,
    pub shared_index: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellSpec {
    pub reference: String,
    pub value: CellValueSpec,
    pub formula: Option<FormulaSpec>,
    pub style_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowSpec {
    pub row: u32,
    pub height: Option<f64>,
    pub cells: Vec<CellSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub min: u32,
    pub max: u32,
    pub width: Option<f64>,
    pub hidden: Option<bool>,
    pub style_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StylesSpec {
    pub fonts: Vec<Font>,
    pub fills: Vec<Fill>,
    pub borders: Vec<Border>,
    pub number_formats: Vec<NumFmt>,
    pub cell_xfs: Vec<Xf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefinedNameSpec {
    pub name: String,
    pub value: String,
    pub local_sheet_id: Option<u32>,
    pub hidden: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetSpec {
    pub name: String,
    pub state: Option<String>,
    pub rows: Vec<RowSpec>,
    pub columns: Vec<ColumnSpec>,
    pub merge_cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkbookSpec {
    pub sheets: Vec<SheetSpec>,
    pub date_system: Option<String>,
    pub defined_names: Vec<DefinedNameSpec>,
    pub styles: Option<StylesSpec>,
}

/// Resolve a build spec into a fully-formed [`Workbook`] (spec §4.8).
pub fn resolve_workbook(spec: &WorkbookSpec) -> Result<Workbook> {
    let date_system = match spec.date_system.as_deref() {
        Some("1904") => DateSystem::Excel1904,
        _ => DateSystem::Excel1900,
    };

    let mut styles = Styles::defaults();
    if let Some(styles_spec) = &spec.styles {
        styles.append(
            styles_spec.fonts.clone(),
            styles_spec.fills.clone(),
            styles_spec.borders.clone(),
            styles_spec.number_formats.clone(),
            styles_spec.cell_xfs.clone(),
        );
    }

    let mut seen_names = HashSet::new();
    let mut sheets = Vec::with_capacity(spec.sheets.len());
    for (index, sheet_spec) in spec.sheets.iter().enumerate() {
        if !seen_names.insert(sheet_spec.name.clone()) {
            return Err(Error::DuplicateSheetName(sheet_spec.name.clone()));
        }
        sheets.push(resolve_sheet(sheet_spec, index, date_system)?);
    }

    let defined_names = spec
        .defined_names
        .iter()
        .map(|d| DefinedNameEntry {
            name: d.name.clone(),
            value: d.value.clone(),
            local_sheet_id: d.local_sheet_id,
            hidden: d.hidden,
        })
        .collect();

    let mut workbook = Workbook { date_system, sheets, styles, shared_strings: Vec::new(), defined_names };
    workbook.rebuild_shared_strings();
    Ok(workbook)
}

/// Resolve one sheet spec at the given position, assigning `sheetId =
/// index+1` and `xmlPath = "xl/worksheets/sheet<index+1>.xml"` (spec
/// §4.8 item 8). Reused by the apply engine's new-sheet-append phase
/// (spec §4.9 item 4) with the final post-removal index.
pub fn resolve_sheet(spec: &SheetSpec, index: usize, date_system: DateSystem) -> Result<Sheet> {
    let mut rows = Vec::with_capacity(spec.rows.len());
    for row_spec in &spec.rows {
        let mut cells = Vec::with_capacity(row_spec.cells.len());
        for cell_spec in &row_spec.cells {
            cells.push(resolve_cell(cell_spec, date_system)?);
        }
        rows.push(Row { row: row_spec.row, height: row_spec.height, cells });
    }

    let columns = spec
        .columns
        .iter()
        .map(|c| ColumnDef { min: c.min, max: c.max, width: c.width, hidden: c.hidden, style_id: c.style_id })
        .collect();

    let merge_cells = spec
        .merge_cells
        .iter()
        .map(|r| parse_merge_range(r))
        .collect::<Result<Vec<_>>>()?;

    let state = match spec.state.as_deref() {
        Some(s) => SheetState::parse(s).ok_or_else(|| Error::InvalidRange(format!("invalid sheet state '{s}'")))?,
        None => SheetState::Visible,
    };

    Ok(Sheet {
        name: spec.name.clone(),
        sheet_id: index as u32 + 1,
        state,
        tab_color: None,
        rows,
        columns,
        merge_cells,
        hyperlinks: Vec::new(),
        conditional_formattings: Vec::new(),
        data_validations: None,
        auto_filter: None,
        page_setup: None,
        page_margins: None,
        header_footer: None,
        print_options: None,
        sheet_protection: None,
        sheet_format_pr: None,
        sheet_view: None,
        page_breaks: None,
        xml_path: Sheet::xml_path_for(index),
    })
}

pub(crate) fn resolve_cell(spec: &CellSpec, date_system: DateSystem) -> Result<Cell> {
    let (col, row) = cell_name_to_coordinates(&spec.reference)?;
    let value = resolve_cell_value(&spec.value, date_system)?;
    let formula = match &spec.formula {
        Some(f) => Some(Formula {
            formula_type: f
                .formula_type
                .as_deref()
                .map(|t| FormulaType::parse(t).unwrap_or_default())
                .unwrap_or_default(),
            expr: f.expr.clone(),
            shared_index: f.shared_index,
        }),
        None => None,
    };
    Ok(Cell { address: CellAddress { col, row }, value, formula, style_id: spec.style_id })
}

fn resolve_cell_value(spec: &CellValueSpec, date_system: DateSystem) -> Result<CellValue> {
    match spec {
        CellValueSpec::Empty => Ok(CellValue::Empty),
        CellValueSpec::String(s) => Ok(CellValue::String(s.clone())),
        CellValueSpec::Number(n) => Ok(CellValue::Number(*n)),
        CellValueSpec::Bool(b) => Ok(CellValue::Bool(*b)),
        CellValueSpec::Date(iso) => {
            let parsed = parse_iso8601(iso)?;
            let _ = date_system; // normalization target is always UTC, per spec §4.8 item 6
            Ok(CellValue::Date(parsed))
        }
        CellValueSpec::Error(e) => {
            crate::xlsx::domain::validate_error_value(e)?;
            Ok(CellValue::Error(e.clone()))
        }
    }
}

fn parse_iso8601(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let dt = date.and_hms_opt(0, 0, 0).ok_or_else(|| Error::InvalidDate(s.to_string()))?;
        return Ok(DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc));
    }
    Err(Error::InvalidDate(s.to_string()))
}

/// Parse a range reference like `"A1:C3"` into a normalized
/// [`MergeRange`], validating `start <= end` (spec §4.8 item 3).
pub fn parse_merge_range(reference: &str) -> Result<MergeRange> {
    let parts: Vec<&str> = reference.split(':').collect();
    if parts.len() != 2 {
        return Err(Error::InvalidRange(format!("expected 'A1:C3', got '{reference}'")));
    }
    let (c1, r1) = cell_name_to_coordinates(parts[0])?;
    let (c2, r2) = cell_name_to_coordinates(parts[1])?;
    let start = CellAddress { col: c1.min(c2), row: r1.min(r2) };
    let end = CellAddress { col: c1.max(c2), row: r1.max(r2) };
    if start.col > end.col || start.row > end.row {
        return Err(Error::InvalidRange(reference.to_string()));
    }
    Ok(MergeRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_spec() -> WorkbookSpec {
        WorkbookSpec {
            sheets: vec![SheetSpec {
                name: "Sheet1".into(),
                rows: vec![RowSpec {
                    row: 1,
                    height: None,
                    cells: vec![
                        CellSpec {
                            reference: "A1".into(),
                            value: CellValueSpec::String("Hello".into()),
                            formula: None,
                            style_id: None,
                        },
                        CellSpec {
                            reference: "B1".into(),
                            value: CellValueSpec::Number(42.0),
                            formula: None,
                            style_id: None,
                        },
                    ],
                }],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn s3_xlsx_spec_to_workbook() {
        let wb = resolve_workbook(&sample_spec()).unwrap();
        assert_eq!(wb.sheets[0].name, "Sheet1");
        assert_eq!(wb.sheets[0].xml_path, "xl/worksheets/sheet1.xml");
        assert_eq!(wb.date_system, DateSystem::Excel1900);
        assert_eq!(wb.shared_strings, vec!["Hello".to_string()]);
        assert_eq!(wb.sheets[0].rows[0].cells[0].value, CellValue::String("Hello".into()));
        assert_eq!(wb.sheets[0].rows[0].cells[1].value, CellValue::Number(42.0));
    }

    #[test]
    fn s4_error_cell_validation() {
        let mut spec = sample_spec();
        spec.sheets[0].rows[0].cells[0].value = CellValueSpec::Error("#INVALID!".into());
        assert!(resolve_workbook(&spec).is_err());

        spec.sheets[0].rows[0].cells[0].value = CellValueSpec::Error("#DIV/0!".into());
        assert!(resolve_workbook(&spec).is_ok());
    }

    #[test]
    fn duplicate_sheet_name_rejected() {
        let mut spec = sample_spec();
        spec.sheets.push(spec.sheets[0].clone());
        assert!(matches!(resolve_workbook(&spec), Err(Error::DuplicateSheetName(_))));
    }

    #[test]
    fn merge_range_start_must_not_exceed_end() {
        assert!(parse_merge_range("A1:A1").is_ok());
        let r = parse_merge_range("C3:A1").unwrap();
        assert_eq!(r.start, CellAddress { col: 1, row: 1 });
        assert_eq!(r.end, CellAddress { col: 3, row: 3 });
    }

    #[test]
    fn malformed_merge_range_rejected() {
        assert!(parse_merge_range("A1").is_err());
    }

    #[test]
    fn iso8601_date_normalizes_to_utc() {
        let dt = parse_iso8601("2024-06-15T10:30:00Z").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-06-15T10:30:00+00:00");
    }

    #[test]
    fn bare_date_normalizes_to_midnight_utc() {
        let dt = parse_iso8601("2024-06-15").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-06-15T00:00:00+00:00");
    }

    #[test]
    fn formula_type_defaults_to_normal() {
        let spec = FormulaSpec { formula_type: None, expr: "A1+B1".into(), shared_index: None };
        let cell = resolve_cell(
            &CellSpec { reference: "C1".into(), value: CellValueSpec::Number(0.0), formula: Some(spec), style_id: None },
            DateSystem::Excel1900,
        )
        .unwrap();
        assert_eq!(cell.formula.unwrap().formula_type, FormulaType::Normal);
    }
}
