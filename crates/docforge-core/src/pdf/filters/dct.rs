//! `/DCTDecode` (C2): baseline JPEG via the `image` crate. Feature-gated
//! behind `pdf-jpeg`; with the feature disabled the raw (still-encoded)
//! bytes pass through unchanged so callers needing only the compressed
//! bytes (e.g. to re-embed) are unaffected.

#[cfg(feature = "pdf-jpeg")]
pub fn decode(data: &[u8]) -> Result<(Vec<u8>, u32, u32, u8), String> {
    let img = image::load_from_memory_with_format(data, image::ImageFormat::Jpeg)
        .map_err(|e| format!("JPEG decode failed: {e}"))?;
    let rgb = img.to_rgb8();
    let (w, h) = rgb.dimensions();
    Ok((rgb.into_raw(), w, h, 3))
}

#[cfg(not(feature = "pdf-jpeg"))]
pub fn decode(_data: &[u8]) -> Result<(Vec<u8>, u32, u32, u8), String> {
    Err("DCTDecode support requires the pdf-jpeg feature".to_string())
}
