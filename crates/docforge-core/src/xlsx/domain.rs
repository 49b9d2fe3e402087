//! XLSX domain model (spec §3, §4.8): the typed `Workbook`/`Sheet`/`Cell`
//! value types the spec resolver produces and the apply engine transforms.
//!
//! Feature blocks that the spec names by the same shape it gives the XML
//! part (`mergeCells`, `hyperlinks`, `conditionalFormattings`, ...) wrap
//! `docforge_xml::worksheet` types directly rather than re-modeling them,
//! the same reuse pattern [`crate::xlsx::sst::SharedStringTable`] already
//! establishes for shared strings. Only the pieces the spec calls out with
//! their own domain semantics (cell addressing, cell values, styles) get a
//! dedicated representation.

use chrono::{DateTime, Utc};

use docforge_xml::styles::{Border, Fill, Font, NumFmt, Xf};
use docforge_xml::worksheet::{
    AutoFilter, Color, ConditionalFormatting, DataValidations, HeaderFooter, PageSetup,
    PrintOptions, SheetFormatPr, SheetProtection,
};

use crate::xlsx::dates::DateSystem;
use crate::xlsx::error::{Error, Result};

/// 1-based `(col, row)` coordinates, per spec §3's A1-parsing invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CellAddress {
    pub col: u32,
    pub row: u32,
}

/// The allowed XLSX error-value vocabulary (spec §3).
pub const ALLOWED_ERROR_VALUES: &[&str] = &[
    "#NULL!",
    "#DIV/0!",
    "#VALUE!",
    "#REF!",
    "#NAME?",
    "#NUM!",
    "#N/A",
    "#GETTING_DATA",
];

pub fn validate_error_value(value: &str) -> Result<()> {
    if ALLOWED_ERROR_VALUES.contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidErrorValue(value.to_string()))
    }
}

/// Tagged-union cell value (spec §3: `{string|number|boolean|date|error|empty}`).
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    String(String),
    Number(f64),
    Bool(bool),
    Date(DateTime<Utc>),
    Error(String),
}

/// Formula `type` attribute; absent input defaults to `Normal` (spec §4.8
/// item 7: "formula type defaulting to normal").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormulaType {
    #[default]
    Normal,
    Shared,
    Array,
    DataTable,
}

impl FormulaType {
    pub fn as_str(self) -> &'static str {
        match self {
            FormulaType::Normal => "normal",
            FormulaType::Shared => "shared",
            FormulaType::Array => "array",
            FormulaType::DataTable => "dataTable",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(FormulaType::Normal),
            "shared" => Some(FormulaType::Shared),
            "array" => Some(FormulaType::Array),
            "dataTable" => Some(FormulaType::DataTable),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    pub formula_type: FormulaType,
    pub expr: String,
    pub shared_index: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub address: CellAddress,
    pub value: CellValue,
    pub formula: Option<Formula>,
    pub style_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub row: u32,
    pub height: Option<f64>,
    pub cells: Vec<Cell>,
}

/// A merge range, already normalized so `start <= end` (spec §4.8 item 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRange {
    pub start: CellAddress,
    pub end: CellAddress,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub min: u32,
    pub max: u32,
    pub width: Option<f64>,
    pub hidden: Option<bool>,
    pub style_id: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetState {
    Visible,
    Hidden,
    VeryHidden,
}

impl SheetState {
    pub fn as_str(self) -> &'static str {
        match self {
            SheetState::Visible => "visible",
            SheetState::Hidden => "hidden",
            SheetState::VeryHidden => "veryHidden",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "visible" => Some(SheetState::Visible),
            "hidden" => Some(SheetState::Hidden),
            "veryHidden" => Some(SheetState::VeryHidden),
            _ => None,
        }
    }
}

impl Default for SheetState {
    fn default() -> Self {
        SheetState::Visible
    }
}

/// Hyperlink target kind, grounded on the teacher's `HyperlinkType`
/// (`sheetkit-core::hyperlink`), narrowed to what the apply engine's
/// rel-id allocation rule (spec §4.9) distinguishes.
#[derive(Debug, Clone, PartialEq)]
pub enum HyperlinkTarget {
    External(String),
    Email(String),
    Internal(String),
}

impl HyperlinkTarget {
    /// Whether this target receives a scoped `rId<k>` relationship, per
    /// spec §4.9 ("hyperlinks with `http(s)://` or `mailto:` targets").
    pub fn needs_relationship(&self) -> bool {
        matches!(self, HyperlinkTarget::External(_) | HyperlinkTarget::Email(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HyperlinkEntry {
    pub cell: String,
    pub target: HyperlinkTarget,
    pub display: Option<String>,
    pub tooltip: Option<String>,
    pub rel_id: Option<String>,
}

/// Frozen/split-pane configuration, resolved into XML `Pane` form by the
/// apply engine (spec §4.9's freeze-pane rule).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FreezePane {
    pub row: Option<u32>,
    pub col: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetViewConfig {
    pub tab_selected: Option<bool>,
    pub zoom_scale: Option<u32>,
    pub freeze: Option<FreezePane>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageBreaksConfig {
    pub row_breaks: Vec<u32>,
    pub col_breaks: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub sheet_id: u32,
    pub state: SheetState,
    pub tab_color: Option<Color>,
    pub rows: Vec<Row>,
    pub columns: Vec<ColumnDef>,
    pub merge_cells: Vec<MergeRange>,
    pub hyperlinks: Vec<HyperlinkEntry>,
    pub conditional_formattings: Vec<ConditionalFormatting>,
    pub data_validations: Option<DataValidations>,
    pub auto_filter: Option<AutoFilter>,
    pub page_setup: Option<PageSetup>,
    pub page_margins: Option<docforge_xml::worksheet::PageMargins>,
    pub header_footer: Option<HeaderFooter>,
    pub print_options: Option<PrintOptions>,
    pub sheet_protection: Option<SheetProtection>,
    pub sheet_format_pr: Option<SheetFormatPr>,
    pub sheet_view: Option<SheetViewConfig>,
    pub page_breaks: Option<PageBreaksConfig>,
    pub xml_path: String,
}

impl Sheet {
    pub fn xml_path_for(index: usize) -> String {
        format!("xl/worksheets/sheet{}.xml", index + 1)
    }
}

/// Styles, wrapping the XML schema types directly (spec §3: `{fonts[],
/// fills[], borders[], numberFormats[], cellXfs[]}`), seeded from the
/// OOXML default-slot invariants already implemented by
/// `docforge_xml::styles::StyleSheet::default()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Styles {
    pub fonts: Vec<Font>,
    pub fills: Vec<Fill>,
    pub borders: Vec<Border>,
    pub number_formats: Vec<NumFmt>,
    pub cell_xfs: Vec<Xf>,
}

impl Styles {
    /// Seed from the OOXML-mandated defaults: `fonts[0]` is the default
    /// font, `fills[0]`/`fills[1]` are `none`/`gray125`, `borders[0]` is
    /// empty, `cellXfs[0]` is the identity format (spec §3).
    pub fn defaults() -> Self {
        let sheet = docforge_xml::styles::StyleSheet::default();
        Styles {
            fonts: sheet.fonts.fonts,
            fills: sheet.fills.fills,
            borders: sheet.borders.borders,
            number_formats: Vec::new(),
            cell_xfs: sheet.cell_xfs.xfs,
        }
    }

    /// Append a batch of custom entries, preserving pre-existing indices
    /// (spec §4.8 item 1, and §4.9 item 1 "append-only style additions").
    /// Returns the 0-based index assigned to the first appended `cellXfs`
    /// entry, the basis callers use to address newly added formats.
    pub fn append(
        &mut self,
        fonts: Vec<Font>,
        fills: Vec<Fill>,
        borders: Vec<Border>,
        number_formats: Vec<NumFmt>,
        cell_xfs: Vec<Xf>,
    ) -> u32 {
        self.fonts.extend(fonts);
        self.fills.extend(fills);
        self.borders.extend(borders);
        self.number_formats.extend(number_formats);
        let first_new_xf = self.cell_xfs.len() as u32;
        self.cell_xfs.extend(cell_xfs);
        first_new_xf
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefinedNameEntry {
    pub name: String,
    pub value: String,
    pub local_sheet_id: Option<u32>,
    pub hidden: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    pub date_system: DateSystem,
    pub sheets: Vec<Sheet>,
    pub styles: Styles,
    pub shared_strings: Vec<String>,
    pub defined_names: Vec<DefinedNameEntry>,
}

impl Workbook {
    pub fn sheet(&self, name: &str) -> Result<&Sheet> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| Error::SheetNotFound { name: name.to_string() })
    }

    /// Rebuild `shared_strings` as the deduped, first-encounter-ordered
    /// union of every string-typed cell value across all sheets (spec
    /// §4.8 item 5 / §4.9 item 6 / invariant U5).
    pub fn rebuild_shared_strings(&mut self) {
        let mut seen = std::collections::HashSet::new();
        let mut strings = Vec::new();
        for sheet in &self.sheets {
            for row in &sheet.rows {
                for cell in &row.cells {
                    if let CellValue::String(s) = &cell.value {
                        if seen.insert(s.clone()) {
                            strings.push(s.clone());
                        }
                    }
                }
            }
        }
        self.shared_strings = strings;
    }
}

/// A color spec as given by a build/modification spec input: either a
/// direct RGB string or a theme/tint reference (spec §4.8 item 4).
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSpec {
    Rgb(String),
    Theme { theme: u32, tint: Option<f64> },
}

/// Resolve a color spec per spec §4.8 item 4: `"#RRGGBB"` becomes
/// `"FFRRGGBB"` (uppercase, alpha-prefixed); an already-8-hex-digit RGB
/// string is preserved verbatim; theme references pass through.
pub fn resolve_color(spec: &ColorSpec) -> Result<Color> {
    match spec {
        ColorSpec::Rgb(raw) => {
            let hex = raw.strip_prefix('#').unwrap_or(raw);
            let rgb = match hex.len() {
                6 => format!("FF{}", hex.to_uppercase()),
                8 => hex.to_uppercase(),
                _ => return Err(Error::InvalidColor(raw.clone())),
            };
            if !rgb.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(Error::InvalidColor(raw.clone()));
            }
            Ok(Color { rgb: Some(rgb), theme: None, tint: None, indexed: None })
        }
        ColorSpec::Theme { theme, tint } => {
            Ok(Color { rgb: None, theme: Some(*theme), tint: *tint, indexed: None })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles_defaults_match_ooxml_slots() {
        let styles = Styles::defaults();
        assert_eq!(styles.fills.len(), 2);
        assert_eq!(styles.borders.len(), 1);
        assert_eq!(styles.cell_xfs.len(), 1);
        assert_eq!(styles.cell_xfs[0].xf_id, Some(0));
    }

    #[test]
    fn styles_append_returns_first_new_index() {
        let mut styles = Styles::defaults();
        let xf = Xf {
            num_fmt_id: None,
            font_id: None,
            fill_id: None,
            border_id: None,
            xf_id: Some(0),
            apply_number_format: None,
            apply_font: None,
            apply_fill: None,
            apply_border: None,
            apply_alignment: None,
            alignment: None,
            protection: None,
        };
        let first = styles.append(vec![], vec![], vec![], vec![], vec![xf]);
        assert_eq!(first, 1);
        assert_eq!(styles.cell_xfs.len(), 2);
    }

    #[test]
    fn resolve_color_short_hex_gets_alpha_prefix() {
        let c = resolve_color(&ColorSpec::Rgb("#FF0000".into())).unwrap();
        assert_eq!(c.rgb.as_deref(), Some("FFFF0000"));
    }

    #[test]
    fn resolve_color_eight_hex_preserved() {
        let c = resolve_color(&ColorSpec::Rgb("80112233".into())).unwrap();
        assert_eq!(c.rgb.as_deref(), Some("80112233"));
    }

    #[test]
    fn resolve_color_theme_passes_through() {
        let c = resolve_color(&ColorSpec::Theme { theme: 4, tint: Some(0.5) }).unwrap();
        assert_eq!(c.theme, Some(4));
        assert_eq!(c.tint, Some(0.5));
    }

    #[test]
    fn resolve_color_invalid_length_rejected() {
        assert!(resolve_color(&ColorSpec::Rgb("abc".into())).is_err());
    }

    #[test]
    fn error_value_membership() {
        assert!(validate_error_value("#DIV/0!").is_ok());
        assert!(validate_error_value("#INVALID!").is_err());
    }

    #[test]
    fn rebuild_shared_strings_dedupes_in_first_encounter_order() {
        let mut wb = Workbook {
            date_system: DateSystem::Excel1900,
            sheets: vec![Sheet {
                name: "Sheet1".into(),
                sheet_id: 1,
                state: SheetState::Visible,
                tab_color: None,
                rows: vec![Row {
                    row: 1,
                    height: None,
                    cells: vec![
                        Cell {
                            address: CellAddress { col: 1, row: 1 },
                            value: CellValue::String("Hello".into()),
                            formula: None,
                            style_id: None,
                        },
                        Cell {
                            address: CellAddress { col: 2, row: 1 },
                            value: CellValue::String("World".into()),
                            formula: None,
                            style_id: None,
                        },
                        Cell {
                            address: CellAddress { col: 3, row: 1 },
                            value: CellValue::String("Hello".into()),
                            formula: None,
                            style_id: None,
                        },
                    ],
                }],
                columns: vec![],
                merge_cells: vec![],
                hyperlinks: vec![],
                conditional_formattings: vec![],
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
                xml_path: "xl/worksheets/sheet1.xml".into(),
            }],
            styles: Styles::defaults(),
            shared_strings: vec![],
            defined_names: vec![],
        };
        wb.rebuild_shared_strings();
        assert_eq!(wb.shared_strings, vec!["Hello".to_string(), "World".to_string()]);
    }
}
