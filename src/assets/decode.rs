use std::{io::Cursor, path::Path};

use anyhow::Context;
use image::{AnimationDecoder, ImageDecoder, Limits, codecs::gif::GifDecoder};

use crate::{
    assets::model::{AnimationFrame, Asset, AssetKind, Raster},
    foundation::error::{JumpscareError, JumpscareResult},
};

/// Largest GIF logical screen side accepted before any canvas is allocated.
pub const MAX_GIF_SIDE: u32 = 8192;

/// Decode a still image (PNG, JPEG, a GIF's first frame, ...).
pub fn decode_still(bytes: &[u8]) -> JumpscareResult<Raster> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| JumpscareError::decode(format!("decode image from memory: {e}")))?;
    Ok(Raster::from_straight(dyn_img.to_rgba8()))
}

/// Decode every frame of a GIF, fully composited, with per-frame delays.
pub fn decode_gif_frames(bytes: &[u8]) -> JumpscareResult<Vec<AnimationFrame>> {
    let mut decoder = GifDecoder::new(Cursor::new(bytes))
        .map_err(|e| JumpscareError::decode(format!("open gif: {e}")))?;
    // The header alone decides the canvas size, so check it before decoding frames.
    let (width, height) = decoder.dimensions();
    if width > MAX_GIF_SIDE || height > MAX_GIF_SIDE {
        return Err(JumpscareError::decode(format!(
            "gif canvas {width}x{height} exceeds {MAX_GIF_SIDE}x{MAX_GIF_SIDE}"
        )));
    }
    decoder
        .set_limits(Limits::default())
        .map_err(|e| JumpscareError::decode(format!("gif limits: {e}")))?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(|e| JumpscareError::decode(format!("decode gif frames: {e}")))?;

    let out = frames
        .into_iter()
        .map(|frame| {
            let (num, den) = frame.delay().numer_denom_ms();
            let declared_ms = if den == 0 {
                0
            } else {
                (f64::from(num) / f64::from(den)).round() as i64
            };
            AnimationFrame::new(Raster::from_straight(frame.into_buffer()), declared_ms)
        })
        .collect::<Vec<_>>();

    tracing::debug!(frames = out.len(), "decoded gif");
    Ok(out)
}

/// Decode bytes as the given kind of asset.
pub fn decode_asset(bytes: &[u8], kind: AssetKind) -> JumpscareResult<Asset> {
    match kind {
        AssetKind::Animation => Ok(Asset::Animated(decode_gif_frames(bytes)?)),
        AssetKind::Still => Ok(Asset::Static(decode_still(bytes)?)),
    }
}

/// Read and decode an asset file, picking the kind from its extension.
pub fn load_asset(path: &Path) -> JumpscareResult<Asset> {
    if !path.is_file() {
        return Err(JumpscareError::resource_missing(format!(
            "asset not found: {}",
            path.display()
        )));
    }
    let bytes =
        std::fs::read(path).with_context(|| format!("read asset '{}'", path.display()))?;
    decode_asset(&bytes, AssetKind::from_path(path))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
