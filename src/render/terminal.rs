use std::io::{self, Write};

use crossterm::{
    cursor::{self, MoveTo},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::{
    assets::model::Raster,
    foundation::{
        core::{Offset, Rgba8Premul, SurfaceSize},
        error::{JumpscareError, JumpscareResult},
    },
    render::surface::{PixelSurface, Surface},
};

const UPPER_HALF_BLOCK: char = '\u{2580}';

pub(crate) fn io_err(what: &'static str) -> impl FnOnce(io::Error) -> JumpscareError {
    move |e| JumpscareError::terminal(format!("{what}: {e}"))
}

/// Raw mode plus alternate screen for as long as the guard lives.
///
/// Dropping the guard restores the terminal, on every exit path.
pub struct TerminalGuard {
    mouse: bool,
}

impl TerminalGuard {
    /// Switch the terminal into drawing mode, optionally capturing mouse clicks.
    pub fn enter(mouse_capture: bool) -> JumpscareResult<Self> {
        terminal::enable_raw_mode().map_err(io_err("enable raw mode"))?;
        let guard = Self {
            mouse: mouse_capture,
        };

        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))
            .map_err(io_err("enter alternate screen"))?;
        if mouse_capture {
            execute!(out, EnableMouseCapture).map_err(io_err("enable mouse capture"))?;
        }
        tracing::debug!(mouse_capture, "terminal entered");
        Ok(guard)
    }

    /// Current terminal size in cells (columns, rows).
    pub fn size(&self) -> JumpscareResult<(u16, u16)> {
        terminal::size().map_err(io_err("query terminal size"))
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        if self.mouse {
            let _ = execute!(out, DisableMouseCapture);
        }
        let _ = execute!(out, ResetColor, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        tracing::debug!("terminal restored");
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Colors of one terminal cell drawn as an upper half block.
pub struct HalfBlock {
    /// Upper pixel, foreground color.
    pub top: [u8; 3],
    /// Lower pixel, background color.
    pub bottom: [u8; 3],
}

/// Pair up pixel rows into half-block cells, flattened over black.
///
/// A trailing odd row is paired with black.
pub fn half_block_cells(pixels: &PixelSurface) -> Vec<HalfBlock> {
    let size = pixels.size();
    let rows = size.height.div_ceil(2);
    let mut cells = Vec::with_capacity((rows * size.width) as usize);
    for r in 0..rows {
        for x in 0..size.width {
            let t = pixels.pixel(x, r * 2);
            let b = if r * 2 + 1 < size.height {
                pixels.pixel(x, r * 2 + 1)
            } else {
                [0, 0, 0, 255]
            };
            cells.push(HalfBlock {
                top: [t[0], t[1], t[2]],
                bottom: [b[0], b[1], b[2]],
            });
        }
    }
    cells
}

/// Truecolor surface drawn into a rectangle of terminal cells.
///
/// Each cell shows two vertically stacked pixels. Only cells that changed
/// since the previous present are re-emitted.
pub struct TerminalSurface<W: Write> {
    pixels: PixelSurface,
    origin: (u16, u16),
    cols: u16,
    out: W,
    previous: Vec<Option<HalfBlock>>,
}

impl<W: Write> TerminalSurface<W> {
    /// Surface of `cols` x `rows` cells with its top-left cell at `origin`.
    pub fn new(out: W, origin: (u16, u16), cols: u16, rows: u16) -> JumpscareResult<Self> {
        let size = SurfaceSize::new(u32::from(cols), u32::from(rows) * 2)?;
        Ok(Self {
            pixels: PixelSurface::new(size)?,
            origin,
            cols,
            out,
            previous: vec![None; usize::from(cols) * usize::from(rows)],
        })
    }

    /// Surface covering `scale` of a `term_cols` x `term_rows` terminal, centered.
    pub fn centered(out: W, term_cols: u16, term_rows: u16, scale: f64) -> JumpscareResult<Self> {
        let scale = scale.clamp(0.0, 1.0);
        let cols = ((f64::from(term_cols) * scale).floor() as u16).clamp(1, term_cols.max(1));
        let rows = ((f64::from(term_rows) * scale).floor() as u16).clamp(1, term_rows.max(1));
        let origin = (
            term_cols.saturating_sub(cols) / 2,
            term_rows.saturating_sub(rows) / 2,
        );
        Self::new(out, origin, cols, rows)
    }

    /// Top-left cell of the surface.
    pub fn origin(&self) -> (u16, u16) {
        self.origin
    }

    /// Back buffer.
    pub fn pixels(&self) -> &PixelSurface {
        &self.pixels
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self) -> io::Result<()> {
        let cells = half_block_cells(&self.pixels);
        let cols = usize::from(self.cols);
        let mut cursor: Option<(u16, u16)> = None;

        for (i, cell) in cells.iter().enumerate() {
            if self.previous[i] == Some(*cell) {
                continue;
            }
            self.previous[i] = Some(*cell);

            let x = self.origin.0 + (i % cols) as u16;
            let y = self.origin.1 + (i / cols) as u16;
            if cursor != Some((x, y)) {
                queue!(self.out, MoveTo(x, y))?;
            }
            queue!(
                self.out,
                SetForegroundColor(rgb(cell.top)),
                SetBackgroundColor(rgb(cell.bottom)),
                Print(UPPER_HALF_BLOCK)
            )?;
            cursor = Some((x + 1, y));
        }

        queue!(self.out, ResetColor)?;
        self.out.flush()
    }
}

fn rgb(c: [u8; 3]) -> Color {
    Color::Rgb {
        r: c[0],
        g: c[1],
        b: c[2],
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
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
        self.pixels.present()?;
        self.emit().map_err(io_err("draw frame"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/terminal.rs"]
mod tests;
