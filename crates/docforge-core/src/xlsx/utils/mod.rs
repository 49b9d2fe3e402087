//! Spreadsheet utility modules: A1 cell-reference math (§4.8, §4.9,
//! §9 column-letter derivation) and the Excel hard limits they validate
//! against.

pub mod cell_ref;
pub mod constants;
