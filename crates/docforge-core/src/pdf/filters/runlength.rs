//! `/RunLengthDecode` (C2), per PDF 32000-1 §7.4.5.

pub fn decode(data: &[u8]) -> Result<Vec<u8>, String> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < data.len() {
        let length = data[i];
        i += 1;
        if length == 128 {
            break; // EOD
        } else if length < 128 {
            let count = length as usize + 1;
            let end = (i + count).min(data.len());
            out.extend_from_slice(&data[i..end]);
            i = end;
        } else {
            let count = 257 - length as usize;
            let Some(&byte) = data.get(i) else {
                return Err("truncated RunLength stream".to_string());
            };
            out.extend(std::iter::repeat(byte).take(count));
            i += 1;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_literal_and_repeat_runs() {
        // literal "AB" (len=1), repeat 'C' x4 (len=253), EOD
        let data = vec![1, b'A', b'B', 253, b'C', 128];
        assert_eq!(decode(&data).unwrap(), b"ABCCCC");
    }
}
