//! `/FlateDecode` via `flate2`, with zlib-header tolerance for producers
//! that emit raw deflate (C2).

use flate2::read::ZlibDecoder;
use std::io::Read;

pub fn decode(data: &[u8]) -> Result<Vec<u8>, String> {
    let mut out = Vec::new();
    let mut decoder = ZlibDecoder::new(data);
    match decoder.read_to_end(&mut out) {
        Ok(_) => Ok(out),
        Err(_) => {
            // Some producers write raw deflate without a zlib wrapper.
            out.clear();
            let mut raw = flate2::read::DeflateDecoder::new(data);
            raw.read_to_end(&mut out)
                .map_err(|e| format!("flate decode failed: {e}"))?;
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn decodes_zlib_wrapped_deflate() {
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
        enc.write_all(b"hello pdf stream").unwrap();
        let compressed = enc.finish().unwrap();
        assert_eq!(decode(&compressed).unwrap(), b"hello pdf stream");
    }
}
