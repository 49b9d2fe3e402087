//! Cross-reference table parsing (C5): classic `xref` tables and
//! cross-reference streams, chained through `/Prev` and `/XRefStm`.

use std::collections::BTreeMap;

use crate::pdf::error::Error;
use crate::pdf::lexer::{Lexer, Token};
use crate::pdf::object::{Dict, Object};
use crate::pdf::parser::ObjectParser;

/// Where a given object's bytes live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XrefEntry {
    /// A free (unused) entry; the object is absent.
    Free,
    /// A direct byte offset into the file, with its recorded generation.
    InUse { offset: usize, gen: u16 },
    /// Compressed inside an object stream: `(stream object number, index)`.
    InStream { stream_num: u32, index: u32 },
}

#[derive(Debug, Clone, Default)]
pub struct XrefTable {
    pub entries: BTreeMap<u32, XrefEntry>,
    pub trailer: Dict,
}

impl XrefTable {
    /// Build the complete table by following the `startxref` offset and
    /// every `/Prev`/`/XRefStm` chain link. Earlier (later-in-chain,
    /// i.e. older) entries never override ones already present, since
    /// the most recent update always takes precedence.
    pub fn load(data: &[u8], start_offset: usize) -> Result<Self, Error> {
        let mut table = XrefTable::default();
        let mut visited = std::collections::HashSet::new();
        let mut next = Some(start_offset);
        let mut trailer_merged = false;

        while let Some(offset) = next {
            if !visited.insert(offset) || offset >= data.len() {
                break;
            }
            let section = XrefSection::parse_at(data, offset)?;

            for (&num, &entry) in &section.entries {
                table.entries.entry(num).or_insert(entry);
            }
            if !trailer_merged {
                table.trailer = section.trailer.clone();
                trailer_merged = true;
            } else {
                for (k, v) in section.trailer.iter() {
                    if !table.trailer.contains_key(k.as_str()) {
                        table.trailer.insert(k.clone(), v.clone());
                    }
                }
            }

            next = section
                .trailer
                .get_int("XRefStm")
                .map(|v| v as usize)
                .or(None);
            if let Some(hybrid_offset) = next {
                if visited.insert(hybrid_offset) && hybrid_offset < data.len() {
                    if let Ok(hybrid) = XrefSection::parse_at(data, hybrid_offset) {
                        for (&num, &entry) in &hybrid.entries {
                            table.entries.entry(num).or_insert(entry);
                        }
                    }
                }
            }

            next = section.trailer.get_int("Prev").map(|v| v as usize);
        }

        if table.entries.is_empty() {
            return Err(Error::MalformedXref(
                "no cross-reference entries found".into(),
            ));
        }
        Ok(table)
    }

    /// Rebuild the table from scratch by scanning the whole file for
    /// `<num> <gen> obj` patterns. Used when `startxref` is missing,
    /// corrupt, or its chain fails to resolve (spec §4.5 linear-scan
    /// fallback).
    pub fn rebuild_by_scan(data: &[u8]) -> Self {
        let mut entries = BTreeMap::new();
        let mut pos = 0usize;
        while pos < data.len() {
            let Some(rel) = find_subsequence(&data[pos..], b" obj") else {
                break;
            };
            let obj_kw_pos = pos + rel;
            if let Some((num, gen, header_start)) = backtrack_object_header(data, obj_kw_pos) {
                entries.insert(num, XrefEntry::InUse { offset: header_start, gen });
            }
            pos = obj_kw_pos + 4;
        }

        let mut trailer = Dict::new();
        if let Some(root) = find_catalog_object(data, &entries) {
            trailer.insert("Root".into(), root);
        }
        Self { entries, trailer }
    }
}

fn find_subsequence(hay: &[u8], needle: &[u8]) -> Option<usize> {
    hay.windows(needle.len()).position(|w| w == needle)
}

/// Given the position of the ` obj` keyword, walk backwards to recover
/// `<num> <gen>` and the offset where that digit sequence starts.
fn backtrack_object_header(data: &[u8], obj_kw_pos: usize) -> Option<(u32, u16, usize)> {
    let mut p = obj_kw_pos;
    // skip whitespace directly before "obj"
    while p > 0 && data[p - 1].is_ascii_whitespace() {
        p -= 1;
    }
    let gen_end = p;
    while p > 0 && data[p - 1].is_ascii_digit() {
        p -= 1;
    }
    let gen_start = p;
    if gen_start == gen_end {
        return None;
    }
    while p > 0 && data[p - 1].is_ascii_whitespace() {
        p -= 1;
    }
    let num_end = p;
    while p > 0 && data[p - 1].is_ascii_digit() {
        p -= 1;
    }
    let num_start = p;
    if num_start == num_end {
        return None;
    }
    let num: u32 = std::str::from_utf8(&data[num_start..num_end]).ok()?.parse().ok()?;
    let gen: u16 = std::str::from_utf8(&data[gen_start..gen_end]).ok()?.parse().ok()?;
    Some((num, gen, num_start))
}

fn find_catalog_object(data: &[u8], entries: &BTreeMap<u32, XrefEntry>) -> Option<Object> {
    for (&num, entry) in entries {
        let XrefEntry::InUse { offset, .. } = *entry else {
            continue;
        };
        let mut parser = ObjectParser::new(data, offset);
        if let Ok(obj) = parser.parse_indirect_object() {
            if let Some(d) = obj.value.as_dict() {
                if d.get_name("Type") == Some("Catalog") {
                    return Some(Object::Ref(crate::pdf::object::Ref::new(num, 0)));
                }
            }
        }
    }
    None
}

struct XrefSection {
    entries: BTreeMap<u32, XrefEntry>,
    trailer: Dict,
}

impl XrefSection {
    fn parse_at(data: &[u8], offset: usize) -> Result<Self, Error> {
        let mut lex = Lexer::at(data, offset);
        lex.skip_whitespace_and_comments();
        if lex.remaining().starts_with(b"xref") {
            Self::parse_classic_table(data, offset)
        } else {
            Self::parse_stream(data, offset)
        }
    }

    fn parse_classic_table(data: &[u8], offset: usize) -> Result<Self, Error> {
        let mut lex = Lexer::at(data, offset);
        lex.skip_whitespace_and_comments();
        lex.pos += "xref".len();

        let mut entries = BTreeMap::new();
        loop {
            lex.skip_whitespace_and_comments();
            if lex.remaining().starts_with(b"trailer") {
                lex.pos += "trailer".len();
                break;
            }
            let Some(Token::Integer(start)) = lex.next_token()? else {
                return Err(Error::MalformedXref("expected subsection start".into()));
            };
            let Some(Token::Integer(count)) = lex.next_token()? else {
                return Err(Error::MalformedXref("expected subsection count".into()));
            };
            for i in 0..count {
                lex.skip_whitespace_and_comments();
                let rec_start = lex.pos;
                if lex.remaining().len() < 20 {
                    return Err(Error::MalformedXref("truncated xref record".into()));
                }
                let record = &data[rec_start..rec_start + 20];
                lex.pos = rec_start + 20;
                let text = std::str::from_utf8(record)
                    .map_err(|_| Error::MalformedXref("non-UTF8 xref record".into()))?;
                let fields: Vec<&str> = text.split_whitespace().collect();
                if fields.len() < 3 {
                    return Err(Error::MalformedXref("malformed xref record".into()));
                }
                let num = (start + i) as u32;
                let pos_or_next: usize = fields[0]
                    .parse()
                    .map_err(|_| Error::MalformedXref("bad xref offset".into()))?;
                let gen: u16 = fields[1]
                    .parse()
                    .map_err(|_| Error::MalformedXref("bad xref generation".into()))?;
                match fields[2] {
                    "n" => {
                        entries.insert(num, XrefEntry::InUse { offset: pos_or_next, gen });
                    }
                    "f" => {
                        entries.insert(num, XrefEntry::Free);
                    }
                    other => {
                        return Err(Error::MalformedXref(format!(
                            "unknown xref entry type {other:?}"
                        )))
                    }
                }
            }
        }

        let mut parser = ObjectParser::new(data, lex.pos);
        let trailer_obj = parser.parse_object()?;
        let trailer = trailer_obj
            .as_dict()
            .cloned()
            .ok_or_else(|| Error::MalformedXref("trailer is not a dictionary".into()))?;

        Ok(Self { entries, trailer })
    }

    fn parse_stream(data: &[u8], offset: usize) -> Result<Self, Error> {
        let mut parser = ObjectParser::new(data, offset);
        let indirect = parser.parse_indirect_object()?;
        let stream = indirect
            .value
            .as_stream()
            .ok_or_else(|| Error::MalformedXref("xref stream object is not a stream".into()))?
            .clone();

        let w = stream
            .dict
            .get_array("W")
            .ok_or_else(|| Error::MalformedXref("xref stream missing /W".into()))?;
        if w.len() != 3 {
            return Err(Error::MalformedXref("/W must have 3 entries".into()));
        }
        let widths: Vec<usize> = w.iter().map(|o| o.as_i64().unwrap_or(0) as usize).collect();

        let size = stream
            .dict
            .get_int("Size")
            .ok_or_else(|| Error::MalformedXref("xref stream missing /Size".into()))?;

        let index: Vec<i64> = match stream.dict.get_array("Index") {
            Some(arr) => arr.iter().filter_map(|o| o.as_i64()).collect(),
            None => vec![0, size],
        };

        // Decompress via the filter chain defined on this stream itself.
        let decoded = crate::pdf::filters::decode_stream(&stream.dict, &stream.raw_data)?;

        let record_len: usize = widths.iter().sum();
        if record_len == 0 {
            return Err(Error::MalformedXref("/W entries are all zero".into()));
        }

        let mut entries = BTreeMap::new();
        let mut cursor = 0usize;
        let mut idx_iter = index.chunks_exact(2);
        while let Some(pair) = idx_iter.next() {
            let (start, count) = (pair[0], pair[1]);
            for i in 0..count {
                if cursor + record_len > decoded.len() {
                    break;
                }
                let rec = &decoded[cursor..cursor + record_len];
                cursor += record_len;
                let fields = read_be_fields(rec, &widths);
                let field_type = if widths[0] == 0 { 1 } else { fields[0] };
                let num = (start + i) as u32;
                match field_type {
                    0 => {
                        entries.insert(num, XrefEntry::Free);
                    }
                    1 => {
                        entries.insert(
                            num,
                            XrefEntry::InUse {
                                offset: fields[1] as usize,
                                gen: fields[2] as u16,
                            },
                        );
                    }
                    2 => {
                        entries.insert(
                            num,
                            XrefEntry::InStream {
                                stream_num: fields[1] as u32,
                                index: fields[2] as u32,
                            },
                        );
                    }
                    other => {
                        return Err(Error::MalformedXref(format!(
                            "unknown xref stream entry type {other}"
                        )))
                    }
                }
            }
        }

        Ok(Self {
            entries,
            trailer: stream.dict,
        })
    }
}

fn read_be_fields(record: &[u8], widths: &[usize]) -> [i64; 3] {
    let mut out = [0i64; 3];
    let mut pos = 0;
    for (i, &w) in widths.iter().enumerate() {
        let mut v: i64 = 0;
        for &b in &record[pos..pos + w] {
            v = (v << 8) | b as i64;
        }
        out[i] = v;
        pos += w;
    }
    out
}
