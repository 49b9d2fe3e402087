//! `/ASCIIHexDecode` (C2): hex text terminated by `>`.

use crate::bytes::hex;

pub fn decode(data: &[u8]) -> Result<Vec<u8>, String> {
    let text = String::from_utf8_lossy(data);
    let text = text.split('>').next().unwrap_or(&text);
    Ok(hex::decode(text))
}
