use std::{path::Path, sync::Arc, time::Duration};

/// Shortest display time of one animation frame.
///
/// GIF frames declaring zero (or a negative) delay are shown this long instead.
pub const MIN_FRAME_DURATION: Duration = Duration::from_millis(100);

#[derive(Clone, Debug, PartialEq, Eq)]
/// Raster image in premultiplied RGBA8 form.
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl Raster {
    /// Wrap already premultiplied bytes. Returns `None` on a size mismatch.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> Option<Self> {
        if rgba8_premul.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Premultiply a straight-alpha image.
    pub fn from_straight(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut data = img.into_raw();
        premultiply_rgba8_in_place(&mut data);
        Self {
            width,
            height,
            rgba8_premul: Arc::new(data),
        }
    }

    /// Single opaque color, mostly useful for fixtures.
    pub fn solid(width: u32, height: u32, rgba_premul: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for _ in 0..(width as usize) * (height as usize) {
            data.extend_from_slice(&rgba_premul);
        }
        Self {
            width,
            height,
            rgba8_premul: Arc::new(data),
        }
    }

    /// Pixel at `(x, y)`; panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.rgba8_premul[i..i + 4];
        [px[0], px[1], px[2], px[3]]
    }
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

/// Display duration for a declared frame delay in milliseconds.
pub fn frame_duration_from_ms(declared_ms: i64) -> Duration {
    if declared_ms <= 0 {
        return MIN_FRAME_DURATION;
    }
    Duration::from_millis(declared_ms as u64)
}

#[derive(Clone, Debug)]
/// One frame of an animated asset.
pub struct AnimationFrame {
    /// Frame pixels.
    pub raster: Raster,
    /// How long the frame stays on screen.
    pub duration: Duration,
}

impl AnimationFrame {
    /// Build a frame from a declared delay, applying [`MIN_FRAME_DURATION`].
    pub fn new(raster: Raster, declared_ms: i64) -> Self {
        Self {
            raster,
            duration: frame_duration_from_ms(declared_ms),
        }
    }
}

#[derive(Clone, Debug)]
/// Visual content of one playback session. Immutable once loaded.
pub enum Asset {
    /// Ordered frames, each with its own duration.
    Animated(Vec<AnimationFrame>),
    /// A single image.
    Static(Raster),
}

impl Asset {
    /// Number of frames (1 for a static image).
    pub fn frame_count(&self) -> usize {
        match self {
            Self::Animated(frames) => frames.len(),
            Self::Static(_) => 1,
        }
    }

    /// Sum of frame durations; zero for static images.
    pub fn nominal_duration(&self) -> Duration {
        match self {
            Self::Animated(frames) => frames.iter().map(|f| f.duration).sum(),
            Self::Static(_) => Duration::ZERO,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How a file on disk is decoded.
pub enum AssetKind {
    /// Multi-frame GIF.
    Animation,
    /// PNG, JPEG or any other still format `image` understands.
    Still,
}

impl AssetKind {
    /// Pick the kind from the file extension (`.gif` is animated).
    pub fn from_path(path: &Path) -> Self {
        let is_gif = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("gif"));
        if is_gif { Self::Animation } else { Self::Still }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/model.rs"]
mod tests;
