//! PDF image pipeline (C8, spec §4.7): XObject decode, color-space
//! resolution, soft-mask alpha merge, and conversion to RGBA.

use crate::pdf::error::{Error, Result};
use crate::pdf::filters;
use crate::pdf::object::{Dict, Object, Stream};
use crate::pdf::resolver::Document;

/// Decoded, RGBA-converted raster image (spec §4.7).
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaImage {
    pub width: u32,
    pub height: u32,
    /// Row-major, 4 bytes per pixel, top-to-bottom per PDF image sample
    /// order (no axis flip is performed here; that is a rendering
    /// concern for a downstream consumer).
    pub pixels: Vec<u8>,
}

/// The color space an image's samples are resolved against, after
/// `ICCBased` dispatch by component count (spec §4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpaceKind {
    DeviceGray,
    DeviceRgb,
    DeviceCmyk,
    /// Pattern color spaces are unsupported for image sampling; the
    /// caller gets a transparent image and a logged warning.
    Pattern,
}

impl ColorSpaceKind {
    fn components(self) -> usize {
        match self {
            ColorSpaceKind::DeviceGray => 1,
            ColorSpaceKind::DeviceRgb => 3,
            ColorSpaceKind::DeviceCmyk => 4,
            ColorSpaceKind::Pattern => 0,
        }
    }

    fn from_component_count(n: usize) -> Self {
        match n {
            1 => ColorSpaceKind::DeviceGray,
            4 => ColorSpaceKind::DeviceCmyk,
            _ => ColorSpaceKind::DeviceRgb,
        }
    }
}

/// Resolve a `/ColorSpace` entry (direct name, indirect array for
/// `ICCBased`/`Indexed`, or a resource-dict lookup) to the component
/// count that drives sample unpacking.
fn resolve_color_space(doc: &Document, cs: &Object) -> Result<ColorSpaceKind> {
    match cs {
        Object::Name(n) => Ok(match n.as_str() {
            "DeviceGray" | "CalGray" | "G" => ColorSpaceKind::DeviceGray,
            "DeviceRGB" | "CalRGB" | "RGB" => ColorSpaceKind::DeviceRgb,
            "DeviceCMYK" | "CMYK" => ColorSpaceKind::DeviceCmyk,
            "Pattern" => ColorSpaceKind::Pattern,
            _ => ColorSpaceKind::DeviceRgb,
        }),
        Object::Array(items) => {
            let Some(family) = items.first().and_then(|o| o.as_name()) else {
                return Ok(ColorSpaceKind::DeviceRgb);
            };
            match family {
                "ICCBased" => {
                    let stream_obj = items
                        .get(1)
                        .map(|o| doc.resolve(o))
                        .transpose()?
                        .unwrap_or(Object::Null);
                    let n = stream_obj
                        .as_stream()
                        .and_then(|s| s.dict.get_int("N"))
                        .unwrap_or(3) as usize;
                    Ok(ColorSpaceKind::from_component_count(n))
                }
                "Indexed" => Ok(ColorSpaceKind::DeviceRgb),
                "DeviceN" | "Separation" => Ok(ColorSpaceKind::DeviceGray),
                "Pattern" => Ok(ColorSpaceKind::Pattern),
                "CalRGB" => Ok(ColorSpaceKind::DeviceRgb),
                "CalGray" => Ok(ColorSpaceKind::DeviceGray),
                _ => Ok(ColorSpaceKind::DeviceRgb),
            }
        }
        Object::Ref(_) => {
            let resolved = doc.resolve(cs)?;
            resolve_color_space(doc, &resolved)
        }
        _ => Ok(ColorSpaceKind::DeviceRgb),
    }
}

/// Unpack a sub-byte-per-component sample plane into one `u8` per
/// component (0-255), honoring `bpc in {1,2,4,8,16}`.
fn unpack_samples(data: &[u8], width: u32, height: u32, components: usize, bpc: u8) -> Vec<u8> {
    if bpc == 8 {
        return data.to_vec();
    }
    let row_bits = width as usize * components * bpc as usize;
    let row_bytes = (row_bits + 7) / 8;
    let max_val = (1u32 << bpc) - 1;
    let mut out = Vec::with_capacity(width as usize * height as usize * components);

    for row in 0..height as usize {
        let row_start = row * row_bytes;
        let row_data = &data[row_start.min(data.len())..(row_start + row_bytes).min(data.len())];
        let mut bit_pos = 0usize;
        for _ in 0..(width as usize * components) {
            let value = match bpc {
                1 | 2 | 4 => {
                    let byte_idx = bit_pos / 8;
                    let byte = row_data.get(byte_idx).copied().unwrap_or(0);
                    let shift = 8 - bpc as usize - (bit_pos % 8);
                    let mask = (1u16 << bpc) - 1;
                    ((byte as u16 >> shift) & mask) as u32
                }
                16 => {
                    let byte_idx = bit_pos / 8;
                    let hi = row_data.get(byte_idx).copied().unwrap_or(0) as u32;
                    let lo = row_data.get(byte_idx + 1).copied().unwrap_or(0) as u32;
                    (hi << 8) | lo
                }
                _ => 0,
            };
            let scaled = if max_val == 0 { 0 } else { (value * 255 / max_val) as u8 };
            out.push(scaled);
            bit_pos += bpc as usize;
        }
    }
    out
}

/// Convert unpacked component samples to RGBA, applying `/Decode`
/// inversion when present (spec §4.7: `[1 0]` inverts a gray/alpha
/// plane, used by soft masks).
fn samples_to_rgba(samples: &[u8], space: ColorSpaceKind, decode_inverted: bool) -> Vec<u8> {
    let n = space.components().max(1);
    let pixel_count = samples.len() / n;
    let mut out = Vec::with_capacity(pixel_count * 4);

    for px in samples.chunks(n) {
        let get = |i: usize| -> f64 {
            let v = px.get(i).copied().unwrap_or(0) as f64 / 255.0;
            if decode_inverted {
                1.0 - v
            } else {
                v
            }
        };
        let (r, g, b) = match space {
            ColorSpaceKind::DeviceGray => {
                let v = (get(0) * 255.0).round() as u8;
                (v, v, v)
            }
            ColorSpaceKind::DeviceRgb => (
                (get(0) * 255.0).round() as u8,
                (get(1) * 255.0).round() as u8,
                (get(2) * 255.0).round() as u8,
            ),
            ColorSpaceKind::DeviceCmyk => {
                let c = get(0);
                let m = get(1);
                let y = get(2);
                let k = get(3);
                (
                    (255.0 * (1.0 - c) * (1.0 - k)).round() as u8,
                    (255.0 * (1.0 - m) * (1.0 - k)).round() as u8,
                    (255.0 * (1.0 - y) * (1.0 - k)).round() as u8,
                )
            }
            ColorSpaceKind::Pattern => (0, 0, 0),
        };
        let alpha = if matches!(space, ColorSpaceKind::Pattern) { 0 } else { 255 };
        out.extend_from_slice(&[r, g, b, alpha]);
    }
    out
}

/// Decode a single image XObject stream to RGBA, honoring filters,
/// color-space resolution, and an embedded `/SMask`/`/Mask` when
/// present. `max_dimension` caps `Width`/`Height` (spec §5 resource
/// policy, default 4096).
pub fn decode_image_xobject(doc: &Document, stream: &Stream, max_dimension: u32) -> Result<RgbaImage> {
    let dict = &stream.dict;
    let width = dict.get_int("Width").unwrap_or(0) as u32;
    let height = dict.get_int("Height").unwrap_or(0) as u32;
    if width == 0 || height == 0 {
        return Err(Error::Unsupported("image XObject missing Width/Height".into()));
    }
    if width > max_dimension || height > max_dimension {
        return Err(Error::ImageTooLarge(width.max(height), max_dimension));
    }

    if dict.get_bool("ImageMask").unwrap_or(false) {
        return decode_image_mask(doc, stream, width, height);
    }

    let bpc = dict.get_int("BitsPerComponent").unwrap_or(8) as u8;
    let is_dct = filter_names(dict).iter().any(|f| f == "DCTDecode" || f == "DCT");
    let is_jpx = filter_names(dict).iter().any(|f| f == "JPXDecode");
    if is_jpx {
        return Err(Error::Unsupported("JPXDecode (JPEG 2000) is not supported".into()));
    }

    let decoded = filters::decode_stream(dict, &stream.raw_data)?;

    let mut rgba = if is_dct {
        let (rgb, jw, jh, _n) = filters::dct::decode(&decoded)
            .map_err(|reason| Error::DecodeFailure { filter: "DCTDecode".into(), reason })?;
        if jw != width || jh != height {
            log::warn!("DCTDecode dimensions {jw}x{jh} differ from declared {width}x{height}");
        }
        samples_to_rgba(&rgb, ColorSpaceKind::DeviceRgb, false)
    } else {
        let space = match dict.get("ColorSpace") {
            Some(cs) => resolve_color_space(doc, cs)?,
            None => {
                // Auto-detect fallback by component count (spec §4.7).
                let bits_per_pixel = decoded.len() * 8 / (width as usize * height as usize).max(1);
                let comps = (bits_per_pixel / bpc.max(1) as usize).max(1);
                ColorSpaceKind::from_component_count(comps)
            }
        };
        let expected_bits = width as usize * height as usize * space.components() * bpc as usize;
        let actual_bits = decoded.len() * 8;
        let space = if expected_bits > 0 && actual_bits < expected_bits {
            let comps = (actual_bits / (width as usize * height as usize * bpc.max(1) as usize)).max(1);
            ColorSpaceKind::from_component_count(comps)
        } else {
            space
        };
        let decode_inverted = decode_array_inverted(dict);
        let samples = unpack_samples(&decoded, width, height, space.components(), bpc);
        samples_to_rgba(&samples, space, decode_inverted)
    };

    if let Some(smask) = doc.resolve_dict_entry(dict, "SMask")? {
        if let Some(smask_stream) = smask.as_stream() {
            apply_soft_mask(doc, smask_stream, width, height, &mut rgba)?;
        }
    } else if let Some(mask) = doc.resolve_dict_entry(dict, "Mask")? {
        if let Some(mask_stream) = mask.as_stream() {
            apply_stencil_mask(doc, mask_stream, width, height, &mut rgba)?;
        }
    }

    Ok(RgbaImage { width, height, pixels: rgba })
}

/// `/ImageMask true` images carry no color space; `0`/`1` samples paint
/// with the current fill color or are transparent (we render mask
/// coverage into alpha, leaving color white, since the current fill
/// color is a graphics-state concern handled by the caller).
fn decode_image_mask(doc: &Document, stream: &Stream, width: u32, height: u32) -> Result<RgbaImage> {
    let _ = doc;
    let decoded = filters::decode_stream(&stream.dict, &stream.raw_data)?;
    let inverted = decode_array_inverted(&stream.dict);
    let samples = unpack_samples(&decoded, width, height, 1, 1);
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for s in samples {
        let painted = if inverted { s > 127 } else { s <= 127 };
        let alpha = if painted { 255 } else { 0 };
        pixels.extend_from_slice(&[0, 0, 0, alpha]);
    }
    Ok(RgbaImage { width, height, pixels })
}

fn decode_array_inverted(dict: &Dict) -> bool {
    match dict.get_array("Decode") {
        Some([Object::Number { value: a, .. }, Object::Number { value: b, .. }, ..]) => *a > *b,
        _ => false,
    }
}

fn filter_names(dict: &Dict) -> Vec<String> {
    match dict.get("Filter") {
        Some(Object::Name(n)) => vec![n.as_str().to_string()],
        Some(Object::Array(items)) => items.iter().filter_map(|o| o.as_name().map(String::from)).collect(),
        _ => Vec::new(),
    }
}

/// Merge a `/SMask` image's luminance into `rgba`'s alpha channel,
/// resampling nearest-neighbor if the mask's dimensions differ.
fn apply_soft_mask(doc: &Document, mask_stream: &Stream, width: u32, height: u32, rgba: &mut [u8]) -> Result<()> {
    let mask_img = decode_image_xobject(doc, mask_stream, width.max(height).max(4096))?;
    for y in 0..height {
        for x in 0..width {
            let mx = if mask_img.width == width { x } else { x * mask_img.width / width.max(1) };
            let my = if mask_img.height == height { y } else { y * mask_img.height / height.max(1) };
            let mask_idx = (my as usize * mask_img.width as usize + mx as usize) * 4;
            let alpha = mask_img.pixels.get(mask_idx).copied().unwrap_or(255);
            let out_idx = (y as usize * width as usize + x as usize) * 4 + 3;
            if let Some(slot) = rgba.get_mut(out_idx) {
                *slot = alpha;
            }
        }
    }
    Ok(())
}

/// `/Mask` pointing at a stencil (1 bpc `ImageMask`) image: `1` samples
/// (or `0` under `/Decode [1 0]`) mask the pixel out (alpha 0).
fn apply_stencil_mask(doc: &Document, mask_stream: &Stream, width: u32, height: u32, rgba: &mut [u8]) -> Result<()> {
    let mask_img = decode_image_mask(
        doc,
        mask_stream,
        mask_stream.dict.get_int("Width").unwrap_or(width as i64) as u32,
        mask_stream.dict.get_int("Height").unwrap_or(height as i64) as u32,
    )?;
    for y in 0..height {
        for x in 0..width {
            let mx = if mask_img.width == width { x } else { x * mask_img.width / width.max(1) };
            let my = if mask_img.height == height { y } else { y * mask_img.height / height.max(1) };
            let mask_idx = (my as usize * mask_img.width as usize + mx as usize) * 4 + 3;
            let masked_out = mask_img.pixels.get(mask_idx).copied().unwrap_or(0) > 0;
            let out_idx = (y as usize * width as usize + x as usize) * 4 + 3;
            if masked_out {
                if let Some(slot) = rgba.get_mut(out_idx) {
                    *slot = 0;
                }
            }
        }
    }
    Ok(())
}
