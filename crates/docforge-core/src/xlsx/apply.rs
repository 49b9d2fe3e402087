//! XLSX apply-modifications engine (spec §4.9, C10): `apply(workbook,
//! modSpec) -> workbook`, a pure function returning a new [`Workbook`]
//! with the fixed six-phase ordering the spec mandates. Grounded on the
//! teacher's per-feature mutator functions (`sheetkit-core::row`,
//! `col`, `merge`, `hyperlink`), restructured into one ordered pipeline
//! instead of the teacher's mutate-in-place method calls.

use docforge_xml::worksheet::{
    AutoFilter, DataValidations, HeaderFooter, PageMargins, PageSetup, Pane, PrintOptions,
    SheetFormatPr, SheetProtection,
};

use crate::xlsx::domain::{
    ColumnDef, DefinedNameEntry, FreezePane, HyperlinkEntry, HyperlinkTarget, PageBreaksConfig,
    Row, Sheet, SheetState, SheetViewConfig, Workbook, resolve_color,
};
use crate::xlsx::error::{Error, Result};
use crate::xlsx::spec::{self, CellSpec, SheetSpec, StylesSpec};
use crate::xlsx::utils::cell_ref::column_number_to_name;

/// `set` / `clear` / `absent`, the three-way disposition spec §4.9
/// gives every feature-block replacement.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureOp<T> {
    Absent,
    Clear,
    Set(T),
}

impl<T> Default for FeatureOp<T> {
    fn default() -> Self {
        FeatureOp::Absent
    }
}

impl<T> FeatureOp<T> {
    /// Apply this disposition to an `Option<T>` sheet field: absent
    /// leaves it untouched, clear nulls it, set replaces it.
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            FeatureOp::Absent => {}
            FeatureOp::Clear => *field = None,
            FeatureOp::Set(v) => *field = Some(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowMutationSpec {
    pub row: u32,
    pub height: Option<f64>,
    pub cells: Vec<CellSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowPropertyUpdate {
    pub row: u32,
    pub height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HyperlinkSpec {
    pub cell: String,
    pub target: HyperlinkTarget,
    pub display: Option<String>,
    pub tooltip: Option<String>,
}

/// A single sheet's mutation set, matched against the workbook by its
/// *current* name (spec §4.9 item 3: "only for sheets matching by
/// current name").
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetMutation {
    pub name: String,
    pub rename: Option<String>,
    pub state: Option<String>,
    pub tab_color: Option<crate::xlsx::domain::ColorSpec>,
    pub rows: Vec<RowMutationSpec>,
    pub row_properties: Vec<RowPropertyUpdate>,
    pub remove_rows: Vec<u32>,
    pub columns: Vec<ColumnDef>,
    pub remove_columns: Vec<u32>,
    pub add_merge_ranges: Vec<String>,
    pub remove_merge_ranges: Vec<String>,
    pub hyperlinks: FeatureOp<Vec<HyperlinkSpec>>,
    pub conditional_formattings: FeatureOp<Vec<docforge_xml::worksheet::ConditionalFormatting>>,
    pub data_validations: FeatureOp<DataValidations>,
    pub auto_filter: FeatureOp<AutoFilter>,
    pub page_setup: FeatureOp<PageSetup>,
    pub page_margins: FeatureOp<PageMargins>,
    pub header_footer: FeatureOp<HeaderFooter>,
    pub print_options: FeatureOp<PrintOptions>,
    pub sheet_protection: FeatureOp<SheetProtection>,
    pub sheet_format_pr: FeatureOp<SheetFormatPr>,
    pub sheet_view: FeatureOp<SheetViewConfig>,
    pub page_breaks: FeatureOp<PageBreaksConfig>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModSpec {
    pub style_additions: Option<StylesSpec>,
    pub remove_sheets: Vec<String>,
    pub sheet_mutations: Vec<SheetMutation>,
    pub new_sheets: Vec<SheetSpec>,
    pub defined_names: Vec<crate::xlsx::spec::DefinedNameSpec>,
}

/// Apply a modification spec to a workbook, returning a new workbook
/// (spec §4.9). Phases run in the fixed order the contract names;
/// nothing is mutated in place.
pub fn apply(workbook: &Workbook, mod_spec: &ModSpec) -> Result<Workbook> {
    let mut wb = workbook.clone();

    // 1. append-only style additions
    if let Some(additions) = &mod_spec.style_additions {
        wb.styles.append(
            additions.fonts.clone(),
            additions.fills.clone(),
            additions.borders.clone(),
            additions.number_formats.clone(),
            additions.cell_xfs.clone(),
        );
    }

    // 2. sheet removal by name
    wb.sheets.retain(|s| !mod_spec.remove_sheets.contains(&s.name));

    // 3. per-sheet mutation
    for mutation in &mod_spec.sheet_mutations {
        let date_system = wb.date_system;
        let sheet = wb
            .sheets
            .iter_mut()
            .find(|s| s.name == mutation.name)
            .ok_or_else(|| Error::SheetNotFound { name: mutation.name.clone() })?;
        apply_sheet_mutation(sheet, mutation, date_system)?;
    }

    // 4. new sheets appended, sheetId = existingCount+i+1
    let existing_count = wb.sheets.len();
    for (i, sheet_spec) in mod_spec.new_sheets.iter().enumerate() {
        if wb.sheets.iter().any(|s| s.name == sheet_spec.name) {
            return Err(Error::DuplicateSheetName(sheet_spec.name.clone()));
        }
        let index = existing_count + i;
        let mut sheet = spec::resolve_sheet(sheet_spec, index, wb.date_system)?;
        sheet.sheet_id = index as u32 + 1;
        wb.sheets.push(sheet);
    }

    // 5. defined name upsert by name
    for dn in &mod_spec.defined_names {
        upsert_defined_name(&mut wb.defined_names, dn);
    }

    // 6. rebuild shared strings from the final sheet set
    wb.rebuild_shared_strings();

    Ok(wb)
}

fn apply_sheet_mutation(
    sheet: &mut Sheet,
    mutation: &SheetMutation,
    date_system: crate::xlsx::dates::DateSystem,
) -> Result<()> {
    if let Some(new_name) = &mutation.rename {
        sheet.name = new_name.clone();
    }
    if let Some(state) = &mutation.state {
        sheet.state = SheetState::parse(state)
            .ok_or_else(|| Error::InvalidRange(format!("invalid sheet state '{state}'")))?;
    }
    if let Some(color_spec) = &mutation.tab_color {
        sheet.tab_color = Some(resolve_color(color_spec)?);
    }

    // cell merges: new cells replace colocated old cells by (col,row);
    // new rows appended sorted by row number.
    for row_mut in &mutation.rows {
        merge_row(sheet, row_mut, date_system)?;
    }
    sheet.rows.sort_by_key(|r| r.row);

    // row-property merge
    for prop in &mutation.row_properties {
        if let Some(row) = sheet.rows.iter_mut().find(|r| r.row == prop.row) {
            if prop.height.is_some() {
                row.height = prop.height;
            }
        }
    }

    // row removal by row number set
    if !mutation.remove_rows.is_empty() {
        sheet.rows.retain(|r| !mutation.remove_rows.contains(&r.row));
    }

    // column add/replace by min
    for col in &mutation.columns {
        if let Some(existing) = sheet.columns.iter_mut().find(|c| c.min == col.min) {
            *existing = col.clone();
        } else {
            sheet.columns.push(col.clone());
        }
    }

    // column removal
    if !mutation.remove_columns.is_empty() {
        sheet.columns.retain(|c| !mutation.remove_columns.contains(&c.min));
    }

    // merge-range add then remove
    for range_str in &mutation.add_merge_ranges {
        let range = spec::parse_merge_range(range_str)?;
        if !sheet.merge_cells.contains(&range) {
            sheet.merge_cells.push(range);
        }
    }
    for range_str in &mutation.remove_merge_ranges {
        let range = spec::parse_merge_range(range_str)?;
        sheet.merge_cells.retain(|r| *r != range);
    }

    // feature replacements: each is set / clear / absent
    apply_hyperlinks(sheet, mutation.hyperlinks.clone());
    match mutation.conditional_formattings.clone() {
        FeatureOp::Absent => {}
        FeatureOp::Clear => sheet.conditional_formattings.clear(),
        FeatureOp::Set(v) => sheet.conditional_formattings = v,
    }
    mutation.data_validations.clone().apply_to(&mut sheet.data_validations);
    mutation.auto_filter.clone().apply_to(&mut sheet.auto_filter);
    mutation.page_setup.clone().apply_to(&mut sheet.page_setup);
    mutation.page_margins.clone().apply_to(&mut sheet.page_margins);
    mutation.header_footer.clone().apply_to(&mut sheet.header_footer);
    mutation.print_options.clone().apply_to(&mut sheet.print_options);
    mutation.sheet_protection.clone().apply_to(&mut sheet.sheet_protection);
    mutation.sheet_format_pr.clone().apply_to(&mut sheet.sheet_format_pr);
    mutation.sheet_view.clone().apply_to(&mut sheet.sheet_view);
    mutation.page_breaks.clone().apply_to(&mut sheet.page_breaks);

    Ok(())
}

fn merge_row(
    sheet: &mut Sheet,
    row_mut: &RowMutationSpec,
    date_system: crate::xlsx::dates::DateSystem,
) -> Result<()> {
    let cells = row_mut
        .cells
        .iter()
        .map(|c| spec::resolve_cell(c, date_system))
        .collect::<Result<Vec<_>>>()?;

    if let Some(existing_row) = sheet.rows.iter_mut().find(|r| r.row == row_mut.row) {
        if row_mut.height.is_some() {
            existing_row.height = row_mut.height;
        }
        for new_cell in cells {
            if let Some(slot) = existing_row
                .cells
                .iter_mut()
                .find(|c| c.address == new_cell.address)
            {
                *slot = new_cell;
            } else {
                existing_row.cells.push(new_cell);
            }
        }
    } else {
        sheet.rows.push(Row { row: row_mut.row, height: row_mut.height, cells });
    }
    Ok(())
}

/// Hyperlinks with `http(s)://`/`mailto:` targets receive a
/// monotonically numbered relationship id `rId<k>` scoped to the sheet
/// (spec §4.9); internal-target hyperlinks never do.
fn apply_hyperlinks(sheet: &mut Sheet, op: FeatureOp<Vec<HyperlinkSpec>>) {
    match op {
        FeatureOp::Absent => {}
        FeatureOp::Clear => sheet.hyperlinks.clear(),
        FeatureOp::Set(specs) => {
            let mut next_rid = 1u32;
            sheet.hyperlinks = specs
                .into_iter()
                .map(|s| {
                    let rel_id = if s.target.needs_relationship() {
                        let id = format!("rId{next_rid}");
                        next_rid += 1;
                        Some(id)
                    } else {
                        None
                    };
                    HyperlinkEntry {
                        cell: s.cell,
                        target: s.target,
                        display: s.display,
                        tooltip: s.tooltip,
                        rel_id,
                    }
                })
                .collect();
        }
    }
}

fn upsert_defined_name(names: &mut Vec<DefinedNameEntry>, new: &crate::xlsx::spec::DefinedNameSpec) {
    if let Some(existing) = names.iter_mut().find(|n| n.name == new.name) {
        existing.value = new.value.clone();
        existing.local_sheet_id = new.local_sheet_id;
        existing.hidden = new.hidden;
    } else {
        names.push(DefinedNameEntry {
            name: new.name.clone(),
            value: new.value.clone(),
            local_sheet_id: new.local_sheet_id,
            hidden: new.hidden,
        });
    }
}

/// Resolve a freeze-pane spec into XML `Pane` form (spec §4.9): `{row?,
/// col?} -> Pane{xSplit=col, ySplit=row, topLeftCell=<colLetter(col)><row+1>,
/// activePane="bottomRight", state="frozen"}`. `col` falls back to `1`
/// (column A) when absent, since `colLetter(0)` has no representation.
pub fn resolve_freeze_pane(freeze: FreezePane) -> Result<Pane> {
    let col = freeze.col.unwrap_or(0).max(1);
    let row = freeze.row.unwrap_or(0);
    let top_left_col = column_number_to_name(col)?;
    Ok(Pane {
        x_split: freeze.col.map(|c| c as f64),
        y_split: freeze.row.map(|r| r as f64),
        top_left_cell: Some(format!("{top_left_col}{}", row + 1)),
        active_pane: Some("bottomRight".to_string()),
        state: Some("frozen".to_string()),
    })
}
