use std::sync::Arc;

use image::imageops::FilterType;

use crate::{
    assets::model::Raster,
    foundation::core::{Offset, SurfaceSize},
};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
/// Aspect-preserving scaling policy.
pub enum FitMode {
    /// Whole image visible; letterboxed on one axis.
    #[default]
    Contain,
    /// Surface fully covered; image cropped on one axis.
    Cover,
}

/// Scaled size of a `width` x `height` image for `target` under `mode`.
///
/// Each side is at least 1 pixel. Under [`FitMode::Contain`] neither side
/// exceeds the target.
pub fn fit_size(width: u32, height: u32, target: SurfaceSize, mode: FitMode) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (1, 1);
    }
    let sx = f64::from(target.width) / f64::from(width);
    let sy = f64::from(target.height) / f64::from(height);
    let scale = match mode {
        FitMode::Contain => sx.min(sy),
        FitMode::Cover => sx.max(sy),
    };

    let w = ((f64::from(width) * scale).floor() as u32).max(1);
    let h = ((f64::from(height) * scale).floor() as u32).max(1);
    match mode {
        FitMode::Contain => (w.min(target.width.max(1)), h.min(target.height.max(1))),
        FitMode::Cover => (w, h),
    }
}

/// Top-left position that centers a `width` x `height` box on `target`.
///
/// Negative when the box is larger than the target.
pub fn center_offset(width: u32, height: u32, target: SurfaceSize) -> Offset {
    let x = (i64::from(target.width) - i64::from(width)).div_euclid(2);
    let y = (i64::from(target.height) - i64::from(height)).div_euclid(2);
    Offset::new(x as i32, y as i32)
}

/// Resample a premultiplied raster to an exact size (Lanczos3).
pub fn scale_raster(raster: &Raster, width: u32, height: u32) -> Raster {
    if raster.width == width && raster.height == height {
        return raster.clone();
    }
    let Some(src) = image::RgbaImage::from_raw(
        raster.width,
        raster.height,
        raster.rgba8_premul.as_ref().clone(),
    ) else {
        return Raster::solid(width, height, [0, 0, 0, 0]);
    };

    let mut data = image::imageops::resize(&src, width, height, FilterType::Lanczos3).into_raw();
    // Lanczos ringing can push a color channel above alpha.
    for px in data.chunks_exact_mut(4) {
        let a = px[3];
        px[0] = px[0].min(a);
        px[1] = px[1].min(a);
        px[2] = px[2].min(a);
    }
    Raster {
        width,
        height,
        rgba8_premul: Arc::new(data),
    }
}

/// Scale `raster` into `target` under `mode`.
pub fn fit_raster(raster: &Raster, target: SurfaceSize, mode: FitMode) -> Raster {
    let (w, h) = fit_size(raster.width, raster.height, target, mode);
    scale_raster(raster, w, h)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fit.rs"]
mod tests;
