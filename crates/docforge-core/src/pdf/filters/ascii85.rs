//! `/ASCII85Decode` (C2). Wraps the shared byte-utility codec.

use crate::bytes::base85;

pub fn decode(data: &[u8]) -> Result<Vec<u8>, String> {
    let text = String::from_utf8_lossy(data);
    base85::decode(&text)
}
