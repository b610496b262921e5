use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    assets::model::Raster,
    foundation::{
        core::{Offset, Rgba8Premul, SurfaceSize},
        error::JumpscareResult,
    },
    render::composite::{blit_over_in_place, fill_over_in_place},
};

/// Render target of a playback session.
///
/// Size is fixed for the lifetime of the surface. Drawing calls only touch
/// the back buffer; [`Surface::present`] makes the result visible.
pub trait Surface {
    /// Pixel size of the drawable area.
    fn size(&self) -> SurfaceSize;

    /// Overwrite every pixel with `color`.
    fn clear(&mut self, color: Rgba8Premul);

    /// Blend `raster` with its top-left corner at `at`, clipped to the surface.
    fn draw_raster(&mut self, raster: &Raster, at: Offset);

    /// Blend `color` at `opacity` over the whole surface.
    fn fill(&mut self, color: Rgba8Premul, opacity: f32);

    /// Show the back buffer.
    fn present(&mut self) -> JumpscareResult<()>;
}

#[derive(Clone, Debug)]
/// In-memory premultiplied RGBA8 surface.
pub struct PixelSurface {
    size: SurfaceSize,
    data: Vec<u8>,
    presented: u64,
}

impl PixelSurface {
    /// Transparent surface of `size`; fails on zero dimensions.
    pub fn new(size: SurfaceSize) -> JumpscareResult<Self> {
        size.validate()?;
        Ok(Self {
            size,
            data: vec![0u8; size.area() * 4],
            presented: 0,
        })
    }

    /// Row-major premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel at `(x, y)`; panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.size.width as usize) + (x as usize)) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Number of [`Surface::present`] calls so far.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Pixels flattened over opaque black, as straight RGBA8.
    pub fn to_opaque_rgba8(&self) -> Vec<u8> {
        // Premultiplied color over black is the color itself.
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            px[3] = 255;
        }
        out
    }
}

impl Surface for PixelSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self, color: Rgba8Premul) {
        let c = color.to_array();
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&c);
        }
    }

    fn draw_raster(&mut self, raster: &Raster, at: Offset) {
        blit_over_in_place(&mut self.data, self.size, raster, at);
    }

    fn fill(&mut self, color: Rgba8Premul, opacity: f32) {
        fill_over_in_place(&mut self.data, color.to_array(), opacity);
    }

    fn present(&mut self) -> JumpscareResult<()> {
        self.presented += 1;
        Ok(())
    }
}

/// Headless surface that writes presented frames as numbered PNG files.
pub struct PngDumpSurface {
    pixels: PixelSurface,
    dir: PathBuf,
    stride: u32,
    written: u64,
}

impl PngDumpSurface {
    /// Write every `stride`-th presented frame into `dir` (created if needed).
    pub fn new(dir: &Path, size: SurfaceSize, stride: u32) -> JumpscareResult<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create dump dir '{}'", dir.display()))?;
        Ok(Self {
            pixels: PixelSurface::new(size)?,
            dir: dir.to_path_buf(),
            stride: stride.max(1),
            written: 0,
        })
    }

    /// Number of PNG files written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Back buffer.
    pub fn pixels(&self) -> &PixelSurface {
        &self.pixels
    }
}

impl Surface for PngDumpSurface {
    fn size(&self) -> SurfaceSize {
        self.pixels.size()
    }

    fn clear(&mut self, color: Rgba8Premul) {
        self.pixels.clear(color);
    }

    fn draw_raster(&mut self, raster: &Raster, at: Offset) {
        self.pixels.draw_raster(raster, at);
    }

    fn fill(&mut self, color: Rgba8Premul, opacity: f32) {
        self.pixels.fill(color, opacity);
    }

    fn present(&mut self) -> JumpscareResult<()> {
        let index = self.pixels.presented();
        self.pixels.present()?;
        if !index.is_multiple_of(u64::from(self.stride)) {
            return Ok(());
        }

        let size = self.pixels.size();
        let path = self.dir.join(format!("frame_{index:05}.png"));
        image::save_buffer_with_format(
            &path,
            &self.pixels.to_opaque_rgba8(),
            size.width,
            size.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        self.written += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
