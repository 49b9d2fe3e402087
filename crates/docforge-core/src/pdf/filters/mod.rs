//! Stream filter chain (C2): `/Filter` + `/DecodeParms` dispatch.
//!
//! An image codec (`DCTDecode`, `CCITTFaxDecode`, or in principle
//! `JPXDecode`) must be the terminal filter in a chain; a predictor or
//! another filter after it is rejected as `InvalidFilterChain` rather
//! than silently ignored, since re-filtering already-decoded pixel
//! bytes would silently corrupt them.

pub mod ascii85;
pub mod asciihex;
pub mod bitreader;
pub mod ccitt;
pub mod dct;
pub mod flate;
pub mod lzw;
pub mod predictor;
pub mod runlength;

use crate::pdf::error::Error;
use crate::pdf::object::{Dict, Object};

fn names_of(dict: &Dict, key: &str) -> Vec<String> {
    match dict.get(key) {
        Some(Object::Name(n)) => vec![n.as_str().to_string()],
        Some(Object::Array(items)) => items
            .iter()
            .filter_map(|o| o.as_name().map(|s| s.to_string()))
            .collect(),
        _ => Vec::new(),
    }
}

fn parms_of(dict: &Dict, count: usize) -> Vec<Dict> {
    match dict.get("DecodeParms").or_else(|| dict.get("DP")) {
        Some(Object::Dict(d)) => vec![d.clone()],
        Some(Object::Array(items)) => items
            .iter()
            .map(|o| o.as_dict().cloned().unwrap_or_default())
            .collect(),
        _ => vec![Dict::new(); count],
    }
}

fn is_image_codec(name: &str) -> bool {
    matches!(name, "DCTDecode" | "DCT" | "JPXDecode" | "CCITTFaxDecode" | "CCF")
}

/// Run the full `/Filter` chain declared on a stream dictionary over its
/// raw bytes, applying any associated predictor per stage.
pub fn decode_stream(dict: &Dict, raw: &[u8]) -> Result<Vec<u8>, Error> {
    let filters = names_of(dict, "Filter");
    if filters.is_empty() {
        return Ok(raw.to_vec());
    }
    let mut parms = parms_of(dict, filters.len());
    while parms.len() < filters.len() {
        parms.push(Dict::new());
    }

    let mut data = raw.to_vec();
    for (i, filter) in filters.iter().enumerate() {
        if is_image_codec(filter) && i != filters.len() - 1 {
            return Err(Error::InvalidFilterChain(format!(
                "{filter} must be the terminal filter in the chain"
            )));
        }
        data = apply_one(filter, &data, &parms[i])?;
    }
    Ok(data)
}

fn apply_one(filter: &str, data: &[u8], parm: &Dict) -> Result<Vec<u8>, Error> {
    let decoded = match filter {
        "FlateDecode" | "Fl" => flate::decode(data),
        "LZWDecode" | "LZW" => {
            let early_change = parm.get_int("EarlyChange").unwrap_or(1) != 0;
            lzw::decode(data, early_change)
        }
        "ASCII85Decode" | "A85" => ascii85::decode(data),
        "ASCIIHexDecode" | "AHx" => asciihex::decode(data),
        "RunLengthDecode" | "RL" => runlength::decode(data),
        "DCTDecode" | "DCT" | "JPXDecode" => return Ok(data.to_vec()),
        "CCITTFaxDecode" | "CCF" => {
            if parm.get_bool("EndOfLine").unwrap_or(false) {
                return Err(Error::Unsupported(
                    "CCITTFaxDecode with EndOfLine=true".to_string(),
                ));
            }
            let params = ccitt::CcittParams {
                k: parm.get_int("K").unwrap_or(0),
                columns: parm.get_int("Columns").unwrap_or(1728) as u32,
                rows: parm.get_int("Rows").unwrap_or(0) as u32,
                black_is_1: parm.get_bool("BlackIs1").unwrap_or(false),
                byte_align: parm.get_bool("EncodedByteAlign").unwrap_or(false),
                end_of_line: false,
                end_of_block: parm.get_bool("EndOfBlock").unwrap_or(true),
            };
            return ccitt::decode(data, &params)
                .map_err(|reason| {
                    Error::DecodeFailure {
                        filter: filter.to_string(),
                        reason,
                    }
                    .into()
                });
        }
        "Crypt" => return Ok(data.to_vec()),
        other => {
            return Err(Error::Unsupported(format!("filter {other}")));
        }
    }
    .map_err(|reason| Error::DecodeFailure {
        filter: filter.to_string(),
        reason,
    })?;

    if let Some(pred) = parm.get_int("Predictor") {
        if pred > 1 {
            let colors = parm.get_int("Colors").unwrap_or(1);
            let bpc = parm.get_int("BitsPerComponent").unwrap_or(8);
            let columns = parm.get_int("Columns").unwrap_or(1);
            return predictor::undo(&decoded, pred, colors, bpc, columns).map_err(|reason| {
                Error::DecodeFailure {
                    filter: filter.to_string(),
                    reason,
                }
            });
        }
    }
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::object::Name;

    #[test]
    fn no_filter_passes_through() {
        let dict = Dict::new();
        assert_eq!(decode_stream(&dict, b"raw").unwrap(), b"raw");
    }

    #[test]
    fn image_codec_must_be_terminal() {
        let mut dict = Dict::new();
        dict.insert(
            Name::from("Filter"),
            Object::Array(vec![
                Object::Name(Name::from("DCTDecode")),
                Object::Name(Name::from("ASCII85Decode")),
            ]),
        );
        let err = decode_stream(&dict, b"xyz").unwrap_err();
        assert!(matches!(err, Error::InvalidFilterChain(_)));
    }

    #[test]
    fn ccitt_must_also_be_terminal() {
        let mut dict = Dict::new();
        dict.insert(
            Name::from("Filter"),
            Object::Array(vec![
                Object::Name(Name::from("CCITTFaxDecode")),
                Object::Name(Name::from("FlateDecode")),
            ]),
        );
        let err = decode_stream(&dict, b"xyz").unwrap_err();
        assert!(matches!(err, Error::InvalidFilterChain(_)));
    }

    #[test]
    fn ccitt_end_of_line_is_rejected() {
        let mut dict = Dict::new();
        dict.insert(Name::from("Filter"), Object::Name(Name::from("CCITTFaxDecode")));
        let mut parm = Dict::new();
        parm.insert(Name::from("Columns"), Object::integer(64));
        parm.insert(Name::from("Rows"), Object::integer(64));
        parm.insert(Name::from("K"), Object::integer(-1));
        parm.insert(Name::from("EndOfLine"), Object::Bool(true));
        dict.insert(Name::from("DecodeParms"), Object::Dict(parm));
        let err = decode_stream(&dict, b"anything").unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
    }

    #[test]
    fn runlength_then_no_predictor_round_trips() {
        let mut dict = Dict::new();
        dict.insert(Name::from("Filter"), Object::Name(Name::from("RunLengthDecode")));
        let encoded = vec![2u8, b'a', b'b', b'c', 128];
        assert_eq!(decode_stream(&dict, &encoded).unwrap(), b"abc");
    }
}
