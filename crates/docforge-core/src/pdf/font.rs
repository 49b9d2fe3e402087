//! Font table extraction and ToUnicode CMap parsing (C6, spec §4.5).

use std::collections::HashMap;

use crate::pdf::content::GlyphMetrics;
use crate::pdf::error::{Error, Result};
use crate::pdf::filters;
use crate::pdf::object::{Dict, Object};
use crate::pdf::resolver::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSubtype {
    Type1,
    TrueType,
    Type3,
    Type0,
}

impl FontSubtype {
    fn from_name(name: &str) -> Self {
        match name {
            "TrueType" => FontSubtype::TrueType,
            "Type3" => FontSubtype::Type3,
            "Type0" => FontSubtype::Type0,
            _ => FontSubtype::Type1,
        }
    }

    /// Number of bytes per character code (spec §4.5: 2 for `Type0`,
    /// else 1).
    pub fn code_byte_width(self) -> u8 {
        match self {
            FontSubtype::Type0 => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FontDescriptor {
    pub ascent: f64,
    pub descent: f64,
    pub missing_width: f64,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self { ascent: 0.0, descent: 0.0, missing_width: 0.0 }
    }
}

/// A single font resource's metrics and mapping tables.
#[derive(Debug, Clone)]
pub struct Font {
    pub subtype: FontSubtype,
    pub base_font: String,
    pub first_char: i64,
    pub widths: Vec<f64>,
    pub descriptor: FontDescriptor,
    pub to_unicode: Option<ToUnicodeCMap>,
}

impl Font {
    /// Width (1/1000 em) of character code `code`, per spec §4.5:
    /// simple fonts index `/Widths` by `code - FirstChar`; `Type0` fonts
    /// index by CID (the `/W` array, sparse, not modeled beyond the
    /// default fallback here since full CID range parsing is out of
    /// scope for metrics-only consumers).
    pub fn width_for_code(&self, code: u32) -> f64 {
        let idx = code as i64 - self.first_char;
        if idx >= 0 {
            if let Some(w) = self.widths.get(idx as usize) {
                return *w;
            }
        }
        if self.descriptor.missing_width > 0.0 {
            self.descriptor.missing_width
        } else {
            500.0
        }
    }
}

/// Decoded `beginbfchar`/`beginbfrange` ToUnicode mapping.
#[derive(Debug, Clone, Default)]
pub struct ToUnicodeCMap {
    pub map: HashMap<u32, String>,
    pub code_byte_width: u8,
}

impl ToUnicodeCMap {
    pub fn lookup(&self, code: u32) -> Option<&str> {
        self.map.get(&code).map(|s| s.as_str())
    }
}

/// All fonts resolvable from a page's (or an inherited) `/Resources`
/// dict, keyed by resource name (e.g. `"F1"`).
pub struct FontTable {
    fonts: HashMap<String, Font>,
}

impl FontTable {
    /// Walk `/Resources/Font`, resolving `/Subtype`, `/BaseFont`,
    /// `/Encoding`, `/Widths`/`/W`, `/FontDescriptor`, and (for
    /// `Type0`) the first `/DescendantFonts` entry.
    pub fn extract(doc: &Document, resources: &Dict) -> Result<Self> {
        let mut fonts = HashMap::new();
        let Some(font_dict) = resources.get_dict("Font") else {
            return Ok(Self { fonts });
        };

        for (name, entry) in font_dict.iter() {
            let resolved = doc.resolve(entry)?;
            let Some(dict) = resolved.as_dict() else { continue };
            let font = Self::extract_one(doc, dict)?;
            fonts.insert(name.as_str().to_string(), font);
        }
        Ok(Self { fonts })
    }

    fn extract_one(doc: &Document, dict: &Dict) -> Result<Font> {
        let subtype = FontSubtype::from_name(dict.get_name("Subtype").unwrap_or("Type1"));
        let base_font = dict.get_name("BaseFont").unwrap_or("").to_string();

        let (metrics_dict, first_char, widths) = if subtype == FontSubtype::Type0 {
            let descendant = dict
                .get_array("DescendantFonts")
                .and_then(|arr| arr.first())
                .cloned()
                .map(|o| doc.resolve(&o))
                .transpose()?
                .and_then(|o| o.as_dict().cloned());
            match descendant {
                Some(d) => {
                    let widths = cid_widths(doc, &d)?;
                    (Some(d), 0, widths)
                }
                None => (None, 0, Vec::new()),
            }
        } else {
            let first_char = dict.get_int("FirstChar").unwrap_or(0);
            let widths = dict
                .get_array("Widths")
                .map(|arr| arr.iter().filter_map(Object::as_f64).collect())
                .unwrap_or_default();
            (Some(dict.clone()), first_char, widths)
        };

        let descriptor = metrics_dict
            .as_ref()
            .and_then(|d| d.get_dict("FontDescriptor"))
            .map(|d| FontDescriptor {
                ascent: d.get_f64("Ascent").unwrap_or(0.0),
                descent: d.get_f64("Descent").unwrap_or(0.0),
                missing_width: d.get_f64("MissingWidth").unwrap_or(0.0),
            })
            .unwrap_or_default();

        let to_unicode = match doc.resolve_dict_entry(dict, "ToUnicode")? {
            Some(obj) => obj.as_stream().map(|s| parse_to_unicode(doc, s)).transpose()?,
            None => None,
        };

        Ok(Font { subtype, base_font, first_char, widths, descriptor, to_unicode })
    }

    pub fn get(&self, resource_name: &str) -> Option<&Font> {
        self.fonts.get(resource_name)
    }
}

impl GlyphMetrics for FontTable {
    fn code_byte_width(&self, font_name: &str) -> u8 {
        self.get(font_name).map(|f| f.subtype.code_byte_width()).unwrap_or(1)
    }

    fn glyph_width(&self, font_name: &str, code: u32) -> f64 {
        self.get(font_name).map(|f| f.width_for_code(code)).unwrap_or(500.0)
    }
}

/// CID font widths live in a sparse `/W` array: runs of either
/// `c [w1 w2 ...]` or `cFirst cLast w`. Expanded here into a dense
/// per-CID vector starting at CID 0 (missing entries default to 0 and
/// fall back to `MissingWidth` at lookup time).
fn cid_widths(doc: &Document, descendant: &Dict) -> Result<Vec<f64>> {
    let Some(w) = doc.resolve_dict_entry(descendant, "W")? else {
        return Ok(Vec::new());
    };
    let Some(items) = w.as_array() else { return Ok(Vec::new()) };
    let mut out: Vec<f64> = Vec::new();
    let mut i = 0;
    while i < items.len() {
        let start = items[i].as_i64().unwrap_or(0);
        i += 1;
        if i >= items.len() {
            break;
        }
        match &items[i] {
            Object::Array(widths) => {
                for (k, wobj) in widths.iter().enumerate() {
                    let cid = start as usize + k;
                    ensure_len(&mut out, cid + 1);
                    out[cid] = wobj.as_f64().unwrap_or(0.0);
                }
                i += 1;
            }
            _ => {
                let end = items[i].as_i64().unwrap_or(start);
                i += 1;
                let width = items.get(i).and_then(Object::as_f64).unwrap_or(0.0);
                i += 1;
                for cid in start..=end {
                    ensure_len(&mut out, cid as usize + 1);
                    out[cid as usize] = width;
                }
            }
        }
    }
    Ok(out)
}

fn ensure_len(v: &mut Vec<f64>, len: usize) {
    if v.len() < len {
        v.resize(len, 0.0);
    }
}

/// Decode the ToUnicode CMap stream and parse its `bfchar`/`bfrange`
/// sections (spec §4.5). The maximum source-hex length observed across
/// the whole map determines `codeByteWidth`.
fn parse_to_unicode(_doc: &Document, stream: &crate::pdf::object::Stream) -> Result<ToUnicodeCMap> {
    let decoded = filters::decode_stream(&stream.dict, &stream.raw_data)?;
    let text = String::from_utf8_lossy(&decoded);

    let mut map = HashMap::new();
    let mut max_hex_len = 1usize;

    for section in split_sections(&text, "beginbfchar", "endbfchar") {
        for (src_hex, dst) in parse_pairs(section) {
            max_hex_len = max_hex_len.max(src_hex.len());
            if let Some(code) = hex_to_u32(&src_hex) {
                if let Some(unicode) = hex_codepoints_to_string(&dst) {
                    map.insert(code, unicode);
                }
            }
        }
    }

    for section in split_sections(&text, "beginbfrange", "endbfrange") {
        for (start_hex, end_hex, dest) in parse_ranges(section) {
            max_hex_len = max_hex_len.max(start_hex.len()).max(end_hex.len());
            let Some(start) = hex_to_u32(&start_hex) else { continue };
            let Some(end) = hex_to_u32(&end_hex) else { continue };
            // Safety bound (spec §4.5): clamp ranges beyond 256 codes.
            let end = end.min(start.saturating_add(255));
            match dest {
                RangeDest::Increment(dst_hex) => {
                    let Some(dst_start) = hex_to_u32(&dst_hex) else { continue };
                    for (offset, code) in (start..=end).enumerate() {
                        if let Some(ch) = char::from_u32(dst_start + offset as u32) {
                            map.insert(code, ch.to_string());
                        }
                    }
                }
                RangeDest::Array(items) => {
                    for (code, item_hex) in (start..=end).zip(items.iter()) {
                        if let Some(unicode) = hex_codepoints_to_string(item_hex) {
                            map.insert(code, unicode);
                        }
                    }
                }
            }
        }
    }

    let code_byte_width = if max_hex_len > 2 { 2 } else { 1 };
    Ok(ToUnicodeCMap { map, code_byte_width })
}

fn split_sections<'a>(text: &'a str, begin: &str, end: &str) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut rest = text;
    while let Some(b) = rest.find(begin) {
        let after_begin = &rest[b + begin.len()..];
        let Some(e) = after_begin.find(end) else { break };
        out.push(&after_begin[..e]);
        rest = &after_begin[e + end.len()..];
    }
    out
}

fn hex_tokens(s: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '<' {
            let mut hex = String::new();
            for c in chars.by_ref() {
                if c == '>' {
                    break;
                }
                if c.is_ascii_hexdigit() {
                    hex.push(c);
                }
            }
            out.push(hex);
        }
    }
    out
}

fn parse_pairs(section: &str) -> Vec<(String, String)> {
    let tokens = hex_tokens(section);
    tokens.chunks_exact(2).map(|c| (c[0].clone(), c[1].clone())).collect()
}

enum RangeDest {
    Increment(String),
    Array(Vec<String>),
}

fn parse_ranges(section: &str) -> Vec<(String, String, RangeDest)> {
    let mut out = Vec::new();
    let mut rest = section;
    loop {
        let Some(start_pos) = rest.find('<') else { break };
        let Some(start_end) = rest[start_pos..].find('>') else { break };
        let start_hex: String = rest[start_pos + 1..start_pos + start_end]
            .chars()
            .filter(|c| c.is_ascii_hexdigit())
            .collect();
        rest = &rest[start_pos + start_end + 1..];

        let Some(mid_pos) = rest.find('<').or_else(|| rest.find('[')) else { break };
        if rest.as_bytes().get(mid_pos) == Some(&b'[') {
            let Some(close) = rest[mid_pos..].find(']') else { break };
            let array_section = &rest[mid_pos + 1..mid_pos + close];
            let items = hex_tokens(array_section);
            rest = &rest[mid_pos + close + 1..];
            // end_hex for array form is implied by item count, not read
            // separately; reuse the next `<...>` as the nominal end (it
            // is not emitted by well-formed bfrange array sections, so
            // fall back to start_hex to keep the range non-empty).
            out.push((start_hex.clone(), start_hex, RangeDest::Array(items)));
            continue;
        }
        let Some(end_end) = rest[mid_pos..].find('>') else { break };
        let end_hex: String = rest[mid_pos + 1..mid_pos + end_end]
            .chars()
            .filter(|c| c.is_ascii_hexdigit())
            .collect();
        rest = &rest[mid_pos + end_end + 1..];

        let Some(dst_pos) = rest.find('<') else { break };
        let Some(dst_end) = rest[dst_pos..].find('>') else { break };
        let dst_hex: String = rest[dst_pos + 1..dst_pos + dst_end]
            .chars()
            .filter(|c| c.is_ascii_hexdigit())
            .collect();
        rest = &rest[dst_pos + dst_end + 1..];

        out.push((start_hex, end_hex, RangeDest::Increment(dst_hex)));
    }
    out
}

fn hex_to_u32(hex: &str) -> Option<u32> {
    if hex.is_empty() {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

/// A destination hex string is 1 or more big-endian UTF-16 code units
/// (2 hex digits per byte, 4 per unit); decode into a Rust `String`.
fn hex_codepoints_to_string(hex: &str) -> Option<String> {
    if hex.is_empty() {
        return None;
    }
    let bytes: Vec<u8> = (0..hex.len())
        .step_by(2)
        .filter_map(|i| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok())
        .collect();
    let units: Vec<u16> = bytes.chunks_exact(2).map(|c| u16::from_be_bytes([c[0], c[1]])).collect();
    Some(String::from_utf16_lossy(&units))
}

/// Standard-14 base-font name to its WinAnsi-ish width table is out of
/// scope; this maps the 14 canonical names to themselves as a
/// normalization step (spec §9 Open Question: the simpler, ISO
/// 32000-1 §9.6.2.2-aligned table is used, not the CJK-rewriting one —
/// i.e. no renaming beyond what `/BaseFont` already specifies).
pub fn normalize_standard_14_name(base_font: &str) -> &str {
    const STANDARD_14: &[&str] = &[
        "Times-Roman",
        "Times-Bold",
        "Times-Italic",
        "Times-BoldItalic",
        "Helvetica",
        "Helvetica-Bold",
        "Helvetica-Oblique",
        "Helvetica-BoldOblique",
        "Courier",
        "Courier-Bold",
        "Courier-Oblique",
        "Courier-BoldOblique",
        "Symbol",
        "ZapfDingbats",
    ];
    // Strip a subset-tag prefix ("ABCDEF+Helvetica" -> "Helvetica") before
    // matching, per ISO 32000-1 §9.6.2.2.
    let candidate = base_font
        .find('+')
        .filter(|&i| i == 6 && base_font[..6].chars().all(|c| c.is_ascii_uppercase()))
        .map(|i| &base_font[i + 1..])
        .unwrap_or(base_font);
    STANDARD_14
        .iter()
        .find(|&&name| name == candidate)
        .copied()
        .unwrap_or(base_font)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_subset_tag_for_standard_14_match() {
        assert_eq!(normalize_standard_14_name("ABCDEF+Helvetica"), "Helvetica");
    }

    #[test]
    fn leaves_non_standard_names_untouched() {
        assert_eq!(normalize_standard_14_name("ArialMT"), "ArialMT");
    }

    #[test]
    fn bfchar_pair_decodes() {
        let section = "<0041><0042>";
        let pairs = parse_pairs(section);
        assert_eq!(pairs, vec![("0041".to_string(), "0042".to_string())]);
        assert_eq!(hex_codepoints_to_string("0042").as_deref(), Some("B"));
    }

    #[test]
    fn bfrange_increment_decodes() {
        let section = "<0001><0003><0041>";
        let ranges = parse_ranges(section);
        assert_eq!(ranges.len(), 1);
        match &ranges[0].2 {
            RangeDest::Increment(hex) => assert_eq!(hex, "0041"),
            _ => panic!("expected increment form"),
        }
    }

    #[test]
    fn code_byte_width_from_max_hex_len() {
        let text = "1 beginbfchar\n<41><0041>\nendbfchar";
        let mut max_hex_len = 1usize;
        for section in split_sections(text, "beginbfchar", "endbfchar") {
            for (src, _dst) in parse_pairs(section) {
                max_hex_len = max_hex_len.max(src.len());
            }
        }
        assert_eq!(max_hex_len, 2);
    }
}
