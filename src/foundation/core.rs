use std::time::Duration;

use crate::foundation::error::{JumpscareError, JumpscareResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Pixel dimensions of a render surface.
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Create a size, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> JumpscareResult<Self> {
        let size = Self { width, height };
        size.validate()?;
        Ok(size)
    }

    /// Fail with [`JumpscareError::InvalidSurface`] when either side is zero.
    pub fn validate(self) -> JumpscareResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(JumpscareError::InvalidSurface {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Number of pixels.
    pub fn area(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
/// Signed pixel position on a surface. May point outside it.
pub struct Offset {
    /// Horizontal position.
    pub x: i32,
    /// Vertical position.
    pub y: i32,
}

impl Offset {
    /// The origin.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create an offset.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise sum.
    pub fn translate(self, by: Offset) -> Self {
        Self {
            x: self.x.saturating_add(by.x),
            y: self.y.saturating_add(by.y),
        }
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };
    /// Opaque black.
    pub const BLACK: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };
    /// Opaque white.
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };

    /// Convert straight (non-premultiplied) RGBA.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Channels as `[r, g, b, a]`.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Target tick rate of a render loop.
pub struct FrameRate {
    /// Ticks per second, must be > 0.
    pub per_sec: u32,
}

impl FrameRate {
    /// Create a frame rate, rejecting zero.
    pub fn new(per_sec: u32) -> JumpscareResult<Self> {
        if per_sec == 0 {
            return Err(JumpscareError::validation("frame rate must be > 0"));
        }
        Ok(Self { per_sec })
    }

    /// Wall time allotted to one tick.
    pub fn tick_budget(self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.per_sec.max(1)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
