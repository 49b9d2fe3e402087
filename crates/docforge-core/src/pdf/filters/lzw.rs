//! `/LZWDecode` (C2): the PDF variant of TIFF LZW, MSB-first bit packing,
//! codes growing 9->12 bits, with the `/EarlyChange` table-size quirk.

use super::bitreader::BitReader;

const CLEAR_CODE: u16 = 256;
const EOD_CODE: u16 = 257;

fn reset_table(table: &mut Vec<Vec<u8>>) {
    table.clear();
    for i in 0..256u16 {
        table.push(vec![i as u8]);
    }
    table.push(Vec::new()); // 256: clear, never looked up
    table.push(Vec::new()); // 257: eod, never looked up
}

/// Decode an LZW-compressed stream. `early_change` matches the PDF
/// `/EarlyChange` parameter (default `1`): when set, the code width grows
/// one table entry earlier than the strict TIFF algorithm.
pub fn decode(data: &[u8], early_change: bool) -> Result<Vec<u8>, String> {
    let mut reader = BitReader::new(data);
    let mut table: Vec<Vec<u8>> = Vec::new();
    let mut code_width = 9u32;
    let mut out = Vec::new();
    let mut prev: Option<Vec<u8>> = None;
    let threshold = if early_change { 1 } else { 0 };

    reset_table(&mut table);

    loop {
        let Some(code) = reader.read(code_width) else {
            break;
        };
        if code == CLEAR_CODE {
            reset_table(&mut table);
            code_width = 9;
            prev = None;
            continue;
        }
        if code == EOD_CODE {
            break;
        }

        let entry: Vec<u8> = if (code as usize) < table.len() {
            table[code as usize].clone()
        } else if code as usize == table.len() {
            let p = prev
                .as_ref()
                .ok_or_else(|| "LZW stream references unknown code with no prior".to_string())?;
            let mut e = p.clone();
            e.push(p[0]);
            e
        } else {
            return Err(format!("LZW code {code} out of range"));
        };

        out.extend_from_slice(&entry);

        if let Some(p) = prev {
            let mut new_entry = p;
            new_entry.push(entry[0]);
            table.push(new_entry);
        }
        prev = Some(entry);

        let table_len = table.len() as u16;
        code_width = if table_len + threshold > 2047 {
            12
        } else if table_len + threshold > 1023 {
            11
        } else if table_len + threshold > 511 {
            10
        } else {
            9
        };
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_clear_and_eod_with_no_data() {
        let data = encode_bits(&[CLEAR_CODE, EOD_CODE], 9);
        assert_eq!(decode(&data, true).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn decodes_single_literal_code() {
        // Clear, literal 'A' (code 65), EOD.
        let data = encode_bits(&[CLEAR_CODE, 65, EOD_CODE], 9);
        assert_eq!(decode(&data, true).unwrap(), b"A");
    }

    fn encode_bits(codes: &[u16], width: u32) -> Vec<u8> {
        let mut bits = Vec::new();
        for &c in codes {
            for i in (0..width).rev() {
                bits.push(((c >> i) & 1) as u8);
            }
        }
        let mut bytes = vec![0u8; (bits.len() + 7) / 8];
        for (i, &b) in bits.iter().enumerate() {
            if b == 1 {
                bytes[i / 8] |= 1 << (7 - i % 8);
            }
        }
        bytes
    }
}
