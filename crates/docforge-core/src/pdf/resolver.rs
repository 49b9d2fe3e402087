//! Document resolution (C5): the permanent object cache, object-stream
//! decompression, and `Document::open`'s top-level parse pipeline.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::pdf::crypt::SecurityHandler;
use crate::pdf::error::{Error, Result};
use crate::pdf::filters;
use crate::pdf::object::{Dict, Object, Ref};
use crate::pdf::parser::ObjectParser;
use crate::pdf::xref::{XrefEntry, XrefTable};
use crate::pdf::ParseOptions;

/// A fully parsed PDF file: cross-reference table, trailer, decrypted
/// object cache, and the security handler (if the file is encrypted).
///
/// Objects are resolved lazily on first access and cached permanently;
/// resolution is cycle-safe because the in-flight marker is inserted
/// before the object's own value is parsed, so a self- or mutually-
/// referential object sees `Object::Null` rather than recursing forever.
pub struct Document {
    data: Vec<u8>,
    xref: XrefTable,
    security: Option<SecurityHandler>,
    cache: RefCell<HashMap<u32, Object>>,
    in_flight: RefCell<std::collections::HashSet<u32>>,
}

impl Document {
    pub fn open(data: &[u8], options: &ParseOptions) -> Result<Self> {
        let loaded = find_startxref(data).and_then(|start| XrefTable::load(data, start).ok());

        let xref = loaded.unwrap_or_else(|| {
            let mut t = XrefTable::rebuild_by_scan(data);
            if t.trailer.is_empty() {
                if let Some(trailer) = find_trailer_dict(data) {
                    t.trailer = trailer;
                }
            }
            t
        });

        let security = match xref.trailer.get("Encrypt") {
            Some(Object::Ref(r)) => {
                let id0 = first_id_bytes(&xref.trailer);
                let doc = Document {
                    data: data.to_vec(),
                    xref: xref.clone(),
                    security: None,
                    cache: RefCell::new(HashMap::new()),
                    in_flight: RefCell::new(std::collections::HashSet::new()),
                };
                let encrypt_dict = doc
                    .get_object(r.num)?
                    .as_dict()
                    .cloned()
                    .ok_or(Error::AuthRequired)?;
                Some(SecurityHandler::new(&encrypt_dict, &id0, &options.password)?)
            }
            Some(Object::Dict(d)) => {
                let id0 = first_id_bytes(&xref.trailer);
                Some(SecurityHandler::new(d, &id0, &options.password)?)
            }
            _ => None,
        };

        Ok(Document {
            data: data.to_vec(),
            xref,
            security,
            cache: RefCell::new(HashMap::new()),
            in_flight: RefCell::new(std::collections::HashSet::new()),
        })
    }

    pub fn trailer(&self) -> &Dict {
        &self.xref.trailer
    }

    /// The root (`/Root`) dictionary's number, if present and resolvable.
    pub fn root(&self) -> Result<Object> {
        match self.trailer().get("Root") {
            Some(Object::Ref(r)) => self.resolve(&Object::Ref(*r)),
            Some(other) => Ok(other.clone()),
            None => Err(Error::ObjectNotFound(0)),
        }
    }

    /// Fetch and cache object `num`, parsing it from its xref-recorded
    /// location (direct offset or inside an object stream) on first use.
    pub fn get_object(&self, num: u32) -> Result<Object> {
        if let Some(obj) = self.cache.borrow().get(&num) {
            return Ok(obj.clone());
        }
        if !self.in_flight.borrow_mut().insert(num) {
            // Cycle: this object is already being resolved further up
            // the call stack.
            return Ok(Object::Null);
        }

        let entry = self
            .xref
            .entries
            .get(&num)
            .copied()
            .ok_or(Error::ObjectNotFound(num))?;

        let result = match entry {
            XrefEntry::Free => Ok(Object::Null),
            XrefEntry::InUse { offset, .. } => self.parse_at_offset(num, offset),
            XrefEntry::InStream { stream_num, index } => {
                self.parse_from_object_stream(stream_num, index)
            }
        };

        self.in_flight.borrow_mut().remove(&num);
        let value = result?;
        self.cache.borrow_mut().insert(num, value.clone());
        Ok(value)
    }

    fn parse_at_offset(&self, num: u32, offset: usize) -> Result<Object> {
        if offset >= self.data.len() {
            return Err(Error::ObjectNotFound(num));
        }
        let mut parser = ObjectParser::new(&self.data, offset);
        let indirect = parser.parse_indirect_object()?;
        self.decrypt_if_needed(Ref::new(indirect.num, indirect.gen), indirect.value)
    }

    fn parse_from_object_stream(&self, stream_num: u32, index: u32) -> Result<Object> {
        let container = self.get_object(stream_num)?;
        let stream = container.as_stream().ok_or(Error::ObjectNotFound(stream_num))?;
        let decoded = filters::decode_stream(&stream.dict, &stream.raw_data)?;

        let n = stream.dict.get_int("N").ok_or(Error::ObjectNotFound(stream_num))? as usize;
        let first = stream.dict.get_int("First").ok_or(Error::ObjectNotFound(stream_num))? as usize;

        let header = std::str::from_utf8(&decoded[..first.min(decoded.len())])
            .map_err(|_| Error::DecodeFailure { filter: "ObjStm".into(), reason: "non-utf8 header".into() })?;
        let mut nums = header.split_whitespace();
        let mut pairs = Vec::with_capacity(n);
        for _ in 0..n {
            let obj_num: u32 = nums
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or(Error::MalformedXref("malformed ObjStm header".into()))?;
            let rel_off: usize = nums
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or(Error::MalformedXref("malformed ObjStm header".into()))?;
            pairs.push((obj_num, rel_off));
        }

        let (_, rel_offset) = pairs
            .get(index as usize)
            .copied()
            .ok_or(Error::ObjectNotFound(stream_num))?;
        let body = &decoded[first + rel_offset..];
        let mut parser = ObjectParser::new(body, 0);
        parser.parse_object()
        // Objects inside object streams are never individually encrypted
        // (ISO 32000-1 §7.5.7): the stream itself carries the crypt filter.
    }

    fn decrypt_if_needed(&self, obj: Ref, value: Object) -> Result<Object> {
        let Some(handler) = &self.security else {
            return Ok(value);
        };
        decrypt_object(handler, obj, value)
    }

    /// Resolve `obj` one indirection level if it is a `Ref`, otherwise
    /// return it unchanged.
    pub fn resolve(&self, obj: &Object) -> Result<Object> {
        match obj {
            Object::Ref(r) => self.get_object(r.num),
            other => Ok(other.clone()),
        }
    }

    /// Resolve every `Ref` within a dict's direct values one level deep;
    /// nested arrays/dicts are left untouched (callers resolve as needed).
    pub fn resolve_dict_entry(&self, dict: &Dict, key: &str) -> Result<Option<Object>> {
        match dict.get(key) {
            Some(obj) => Ok(Some(self.resolve(obj)?)),
            None => Ok(None),
        }
    }

    /// Fully decoded bytes of the stream at `obj`, after filter decoding
    /// and (if the document is encrypted) decryption of the raw bytes
    /// first, per ISO 32000-1 §7.6.2: string/stream decryption is always
    /// applied before filters run.
    pub fn stream_data(&self, num: u32) -> Result<Vec<u8>> {
        let obj = self.get_object(num)?;
        let stream = obj.as_stream().ok_or(Error::ObjectNotFound(num))?;
        filters::decode_stream(&stream.dict, &stream.raw_data)
    }
}

fn decrypt_object(handler: &SecurityHandler, obj: Ref, value: Object) -> Result<Object> {
    match value {
        Object::String(s) => {
            let plain = handler.decrypt(obj, &s.bytes)?;
            Ok(Object::String(crate::pdf::object::PdfString::new(plain)))
        }
        Object::Array(items) => Ok(Object::Array(
            items
                .into_iter()
                .map(|i| decrypt_object(handler, obj, i))
                .collect::<Result<Vec<_>>>()?,
        )),
        Object::Dict(d) => {
            let mut out = Dict::new();
            for (k, v) in d.iter() {
                out.insert(k.clone(), decrypt_object(handler, obj, v.clone())?);
            }
            Ok(Object::Dict(out))
        }
        Object::Stream(s) => {
            let mut dict = Dict::new();
            for (k, v) in s.dict.iter() {
                dict.insert(k.clone(), decrypt_object(handler, obj, v.clone())?);
            }
            let raw = handler.decrypt(obj, &s.raw_data)?;
            Ok(Object::Stream(crate::pdf::object::Stream { dict, raw_data: raw }))
        }
        other => Ok(other),
    }
}

fn first_id_bytes(trailer: &Dict) -> Vec<u8> {
    trailer
        .get_array("ID")
        .and_then(|arr| arr.first())
        .and_then(|o| o.as_string())
        .map(|s| s.bytes.clone())
        .unwrap_or_default()
}

/// Find the byte offset recorded by the last `startxref` keyword in the
/// file (scanning from the end, per spec).
fn find_startxref(data: &[u8]) -> Option<usize> {
    let needle = b"startxref";
    let tail_start = data.len().saturating_sub(2048);
    let search_region = &data[tail_start..];
    let rel = search_region
        .windows(needle.len())
        .rposition(|w| w == needle)?;
    let after = tail_start + rel + needle.len();
    let text = std::str::from_utf8(&data[after..data.len().min(after + 32)]).ok()?;
    text.split_whitespace().next()?.parse().ok()
}

/// Last-resort trailer recovery: scan for a bare `trailer` dict when
/// both the xref chain and the object-stream scan failed to produce one.
fn find_trailer_dict(data: &[u8]) -> Option<Dict> {
    let needle = b"trailer";
    let rel = data.windows(needle.len()).rposition(|w| w == needle)?;
    let mut parser = ObjectParser::new(data, rel + needle.len());
    parser.parse_object().ok()?.as_dict().cloned()
}
