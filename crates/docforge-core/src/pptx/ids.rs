//! Shape id / name generation (spec §4.10, C11). Grounded on the same
//! "scan existing, take max, add one" shape the XLSX side's
//! `column_number_to_name`/defined-name-upsert logic uses, applied here
//! to non-visual-id and shape-name allocation instead.

use crate::pptx::error::{Error, Result};

/// `generateShapeId`: "the next shape id is `max(existingNumericIds) + 1`
/// starting from 2 (1 is reserved for the slide's group shape). Non-numeric
/// existing ids are ignored." (spec §4.10, scenario S2).
pub fn generate_shape_id<S: AsRef<str>>(existing_ids: &[S]) -> String {
    let max = existing_ids
        .iter()
        .filter_map(|id| id.as_ref().parse::<u32>().ok())
        .chain(std::iter::once(1))
        .max()
        .unwrap_or(1);
    (max + 1).to_string()
}

/// The base name spec §4.10 picks for a shape kind: `"sp"`/`"shape"` ->
/// `"Shape"`, `"text"`/`"textbox"`/`"textBox"` -> `"TextBox"`,
/// `"pic"`/`"picture"` -> `"Picture"`, `"grpSp"`/`"group"` -> `"Group"`,
/// `"cxnSp"`/`"connector"` -> `"Connector"`, otherwise the kind string
/// verbatim (scenario S6: `"chart"` stays `"chart"`).
fn base_name_for_kind(kind: &str) -> &str {
    match kind {
        "sp" | "shape" => "Shape",
        "text" | "textbox" | "textBox" => "TextBox",
        "pic" | "picture" => "Picture",
        "grpSp" | "group" => "Group",
        "cxnSp" | "connector" => "Connector",
        other => other,
    }
}

/// `generateShapeName`: "picks a base by type ... and appends
/// `max(existing index for that base)+1`, starting at 1" (spec §4.10,
/// scenarios S2/S6). An empty `kind` is rejected (S6:
/// `generateShapeName("", []) => InvalidInput`).
pub fn generate_shape_name<S: AsRef<str>>(kind: &str, existing_names: &[S]) -> Result<String> {
    if kind.is_empty() {
        return Err(Error::InvalidInput("shape kind must not be empty".to_string()));
    }

    let base = base_name_for_kind(kind);
    let prefix = format!("{base} ");
    let max_index = existing_names
        .iter()
        .filter_map(|name| name.as_ref().strip_prefix(prefix.as_str()))
        .filter_map(|rest| rest.parse::<u32>().ok())
        .max()
        .unwrap_or(0);

    Ok(format!("{base} {}", max_index + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_id_empty_existing_starts_at_two() {
        assert_eq!(generate_shape_id::<&str>(&[]), "2");
    }

    #[test]
    fn shape_id_takes_max_plus_one() {
        assert_eq!(generate_shape_id(&["1", "2", "10"]), "11");
    }

    #[test]
    fn shape_id_ignores_non_numeric_ids() {
        assert_eq!(generate_shape_id(&["abc", "3", "x9"]), "4");
    }

    #[test]
    fn shape_name_textbox_by_alias() {
        assert_eq!(
            generate_shape_name("text", &["TextBox 3"]).unwrap(),
            "TextBox 4"
        );
    }

    #[test]
    fn shape_name_unknown_kind_stays_verbatim() {
        assert_eq!(
            generate_shape_name("chart", &["chart 1"]).unwrap(),
            "chart 2"
        );
    }

    #[test]
    fn shape_name_empty_kind_is_invalid() {
        let err = generate_shape_name::<&str>("", &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn shape_name_starts_at_one_with_no_existing_match() {
        assert_eq!(generate_shape_name("pic", &["Shape 1"]).unwrap(), "Picture 1");
    }

    #[test]
    fn shape_name_ignores_names_with_different_base() {
        assert_eq!(
            generate_shape_name("group", &["Shape 5", "Group 2"]).unwrap(),
            "Group 3"
        );
    }
}
