//! PNG and TIFF predictors applied after Flate/LZW decompression (C2).

/// Undo a PNG (`/Predictor >= 10`) or TIFF (`/Predictor == 2`) predictor.
/// `colors`, `bits_per_component`, and `columns` describe the sample
/// layout; `predictor < 2` is a no-op.
pub fn undo(
    data: &[u8],
    predictor: i64,
    colors: i64,
    bits_per_component: i64,
    columns: i64,
) -> Result<Vec<u8>, String> {
    if predictor <= 1 {
        return Ok(data.to_vec());
    }
    let colors = colors.max(1) as usize;
    let bpc = bits_per_component.max(1) as usize;
    let columns = columns.max(1) as usize;
    let bytes_per_pixel = ((colors * bpc) as f64 / 8.0).ceil().max(1.0) as usize;
    let row_bytes = (colors * bpc * columns + 7) / 8;

    if predictor == 2 {
        return Ok(undo_tiff(data, row_bytes, bytes_per_pixel, bpc));
    }

    // PNG predictors: each row is prefixed with a 1-byte filter tag.
    let stride = row_bytes + 1;
    if stride == 0 {
        return Err("predictor row width is zero".to_string());
    }
    let mut out = Vec::with_capacity(data.len());
    let mut prev_row = vec![0u8; row_bytes];

    for chunk in data.chunks(stride) {
        if chunk.len() < 2 {
            break;
        }
        let tag = chunk[0];
        let mut row = chunk[1..].to_vec();
        if row.len() < row_bytes {
            row.resize(row_bytes, 0);
        }
        for i in 0..row_bytes {
            let a = if i >= bytes_per_pixel { row[i - bytes_per_pixel] } else { 0 };
            let b = prev_row[i];
            let c = if i >= bytes_per_pixel { prev_row[i - bytes_per_pixel] } else { 0 };
            let x = row[i];
            row[i] = match tag {
                0 => x,
                1 => x.wrapping_add(a),
                2 => x.wrapping_add(b),
                3 => x.wrapping_add(((a as u16 + b as u16) / 2) as u8),
                4 => x.wrapping_add(paeth(a, b, c)),
                other => return Err(format!("unknown PNG filter tag {other}")),
            };
        }
        out.extend_from_slice(&row);
        prev_row = row;
    }
    Ok(out)
}

fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let (a, b, c) = (a as i32, b as i32, c as i32);
    let p = a + b - c;
    let pa = (p - a).abs();
    let pb = (p - b).abs();
    let pc = (p - c).abs();
    if pa <= pb && pa <= pc {
        a as u8
    } else if pb <= pc {
        b as u8
    } else {
        c as u8
    }
}

fn undo_tiff(data: &[u8], row_bytes: usize, bytes_per_pixel: usize, bpc: usize) -> Vec<u8> {
    let mut out = data.to_vec();
    if bpc != 8 {
        // Sub-byte TIFF prediction is rare in practice; pass through
        // unchanged rather than risk corrupting aligned samples.
        return out;
    }
    for row in out.chunks_mut(row_bytes) {
        for i in bytes_per_pixel..row.len() {
            row[i] = row[i].wrapping_add(row[i - bytes_per_pixel]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_sub_filter_round_trips() {
        // One row, 1 byte/pixel, Sub filter: [1, 10, 5, 5]
        let raw = vec![1u8, 10, 5, 5];
        let decoded = undo(&raw, 10, 1, 8, 3).unwrap();
        assert_eq!(decoded, vec![10, 15, 20]);
    }

    #[test]
    fn tiff_predictor_accumulates_per_component() {
        let raw = vec![10u8, 5, 5];
        let decoded = undo(&raw, 2, 1, 8, 3);
        assert_eq!(decoded.unwrap(), vec![10, 15, 20]);
    }

    #[test]
    fn predictor_none_is_identity() {
        let raw = vec![1, 2, 3];
        assert_eq!(undo(&raw, 1, 1, 8, 3).unwrap(), raw);
    }
}
