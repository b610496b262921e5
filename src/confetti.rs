//! The `hakuna` terminal animation: a rainbow title, a bouncing figure and
//! falling confetti on a character grid.
//!
//! [`Scene`] holds the animation state and is advanced with [`Scene::step`];
//! [`Scene::draw`] renders it into a [`CellGrid`] that [`GridPainter`] sends
//! to a terminal. Only [`run_animation`] touches time, input and output.

use std::{io::Write, time::Duration};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use rand::{Rng, RngCore};

use crate::{
    clock::Clock,
    foundation::error::JumpscareResult,
    input::{InputEvent, InputSource},
    render::terminal::io_err,
};

/// Time between two animation steps (about 16 per second).
pub const TICK: Duration = Duration::from_millis(60);

/// Banner text on row [`TITLE_ROW`].
pub const TITLE: &str = "HAKUNA MATTATA";
/// Dim line under the title.
pub const TAGLINE: &str = "it means no worries for the rest of your code";
/// Hint on the second to last row.
pub const FOOTER: &str = "Press Q to quit";

const TITLE_ROW: i32 = 2;
const TAGLINE_ROW: i32 = 4;
/// Confetti spawn row and upper bound of the figure.
const TOP_ROW: i32 = 6;

const FIGURE: [&str; 3] = [
    r"   (\_/)          (\____/)   ",
    r"   ( o_o)        ( o(oo)o )  ",
    r"   /   >~        (  (  )  )  ",
];

const GLYPHS: [char; 10] = ['*', '+', 'o', '•', '·', '·', '•', 'o', '+', '*'];

/// Confetti stops spawning once this many pieces are alive.
pub const MAX_PIECES: usize = 120;
const SPAWN_EVERY: u64 = 6;
const SPAWN_BATCH: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Foreground colors used by the animation.
pub enum Hue {
    /// Red.
    Red,
    /// Yellow.
    Yellow,
    /// Green.
    Green,
    /// Cyan.
    Cyan,
    /// Blue.
    Blue,
    /// Magenta.
    Magenta,
}

/// Title and confetti colors, in cycling order.
pub const PALETTE: [Hue; 6] = [
    Hue::Red,
    Hue::Yellow,
    Hue::Green,
    Hue::Cyan,
    Hue::Blue,
    Hue::Magenta,
];

impl Hue {
    fn color(self) -> Color {
        match self {
            Self::Red => Color::Red,
            Self::Yellow => Color::Yellow,
            Self::Green => Color::Green,
            Self::Cyan => Color::Cyan,
            Self::Blue => Color::Blue,
            Self::Magenta => Color::Magenta,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Attributes of one grid cell.
pub struct Style {
    /// Foreground color; `None` keeps the terminal default.
    pub hue: Option<Hue>,
    /// Bold weight.
    pub bold: bool,
    /// Dim intensity.
    pub dim: bool,
}

impl Style {
    const PLAIN: Self = Self {
        hue: None,
        bold: false,
        dim: false,
    };
    const DIM: Self = Self {
        hue: None,
        bold: false,
        dim: true,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// One character with its style.
pub struct Cell {
    /// Displayed character.
    pub ch: char,
    /// How it is drawn.
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::PLAIN,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A `cols` x `rows` character frame. Writes outside it are dropped.
pub struct CellGrid {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Blank grid.
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::default(); usize::from(cols) * usize::from(rows)],
        }
    }

    /// Size as (columns, rows).
    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= i32::from(self.cols) || y >= i32::from(self.rows) {
            return None;
        }
        Some(y as usize * usize::from(self.cols) + x as usize)
    }

    /// Cell at (x, y), if inside the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Set a single cell.
    pub fn put(&mut self, x: i32, y: i32, ch: char, style: Style) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Cell { ch, style };
        }
    }

    /// Write `text` left to right from (x, y).
    pub fn put_str(&mut self, x: i32, y: i32, text: &str, style: Style) {
        for (i, ch) in text.chars().enumerate() {
            self.put(x + i as i32, y, ch, style);
        }
    }

    /// Characters of row `y`, without styles.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.cols)
            .filter_map(|x| self.get(i32::from(x), i32::from(y)))
            .map(|c| c.ch)
            .collect()
    }
}

fn text_width(text: &str) -> i32 {
    text.chars().count() as i32
}

/// Column that centers `text` on a `cols` wide row, never negative.
pub fn center_x(cols: u16, text: &str) -> i32 {
    ((i32::from(cols) - text_width(text)) / 2).max(0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A falling piece of confetti.
pub struct Confetti {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Displayed glyph.
    pub glyph: char,
    /// Color, `None` in monochrome mode.
    pub hue: Option<Hue>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Top-left corner and velocity of the bouncing figure.
pub struct Figure {
    /// Column of the left edge.
    pub x: i32,
    /// Row of the top line.
    pub y: i32,
    /// Columns per step.
    pub vx: i32,
    /// Rows per step.
    pub vy: i32,
}

impl Figure {
    /// Figure size as (width, height) in cells.
    pub fn extent() -> (i32, i32) {
        let w = FIGURE.iter().map(|l| text_width(l)).max().unwrap_or(0);
        (w, FIGURE.len() as i32)
    }

    fn step(&mut self, cols: u16, rows: u16) {
        let (w, h) = Self::extent();
        self.x += self.vx;
        self.y += self.vy;
        if self.y <= TOP_ROW || self.y + h >= i32::from(rows) - 1 {
            self.vy = -self.vy;
            self.y += self.vy;
        }
        if self.x <= 0 || self.x + w >= i32::from(cols) - 1 {
            self.vx = -self.vx;
            self.x += self.vx;
        }
    }
}

/// State of the confetti animation.
#[derive(Clone, Debug)]
pub struct Scene {
    tick: u64,
    color: bool,
    figure: Figure,
    confetti: Vec<Confetti>,
}

impl Scene {
    /// Scene for a `cols` x `rows` terminal; `color == false` draws monochrome.
    pub fn new(cols: u16, rows: u16, color: bool) -> Self {
        Self {
            tick: 0,
            color,
            figure: Figure {
                x: center_x(cols, FIGURE[0]),
                y: i32::from(rows) / 2,
                vx: 2,
                vy: 1,
            },
            confetti: Vec::new(),
        }
    }

    /// Steps taken so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The bouncing figure.
    pub fn figure(&self) -> Figure {
        self.figure
    }

    /// Live confetti pieces.
    pub fn confetti(&self) -> &[Confetti] {
        &self.confetti
    }

    /// Advance one tick on a `cols` x `rows` terminal.
    pub fn step(&mut self, cols: u16, rows: u16, rng: &mut dyn RngCore) {
        self.tick += 1;
        self.figure.step(cols, rows);

        if self.tick % SPAWN_EVERY == 0 && self.confetti.len() < MAX_PIECES {
            let span = i32::from(cols).max(1);
            for _ in 0..SPAWN_BATCH {
                let piece = Confetti {
                    x: rng.gen_range(0..span),
                    y: TOP_ROW,
                    glyph: GLYPHS[rng.gen_range(0..GLYPHS.len())],
                    hue: self
                        .color
                        .then(|| PALETTE[rng.gen_range(0..PALETTE.len())]),
                };
                self.confetti.push(piece);
            }
        }

        let floor = i32::from(rows) - 1;
        for piece in &mut self.confetti {
            piece.y += 1;
        }
        self.confetti.retain(|p| p.y < floor);
    }

    /// Style of title character `i` at the current tick.
    pub fn title_style(&self, i: usize) -> Style {
        let hue = self
            .color
            .then(|| PALETTE[(i + (self.tick / 2) as usize) % PALETTE.len()]);
        Style {
            hue,
            bold: true,
            dim: false,
        }
    }

    /// Render the scene into a fresh grid.
    pub fn draw(&self, cols: u16, rows: u16) -> CellGrid {
        let mut grid = CellGrid::new(cols, rows);

        let title_x = center_x(cols, TITLE);
        for (i, ch) in TITLE.chars().enumerate() {
            grid.put(title_x + i as i32, TITLE_ROW, ch, self.title_style(i));
        }
        grid.put_str(center_x(cols, TAGLINE), TAGLINE_ROW, TAGLINE, Style::DIM);

        for (i, line) in FIGURE.iter().enumerate() {
            grid.put_str(self.figure.x, self.figure.y + i as i32, line, Style::PLAIN);
        }

        for piece in &self.confetti {
            let style = Style {
                hue: piece.hue,
                ..Style::PLAIN
            };
            grid.put(piece.x, piece.y, piece.glyph, style);
        }

        grid.put_str(
            center_x(cols, FOOTER),
            i32::from(rows) - 2,
            FOOTER,
            Style::DIM,
        );
        grid
    }
}

/// Sends [`CellGrid`]s to a terminal, re-emitting only changed cells.
pub struct GridPainter<W: Write> {
    out: W,
    previous: Option<CellGrid>,
}

impl<W: Write> GridPainter<W> {
    /// Painter writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            previous: None,
        }
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Draw `grid`. A size change clears the screen and repaints everything.
    pub fn paint(&mut self, grid: CellGrid) -> JumpscareResult<()> {
        self.emit(&grid).map_err(io_err("paint animation"))?;
        self.previous = Some(grid);
        Ok(())
    }

    fn emit(&mut self, grid: &CellGrid) -> std::io::Result<()> {
        let previous = match self.previous.take() {
            Some(p) if p.size() == grid.size() => Some(p),
            _ => {
                queue!(self.out, ResetColor, Clear(ClearType::All))?;
                None
            }
        };
        let (cols, rows) = grid.size();
        let blank = Cell::default();

        for y in 0..rows {
            for x in 0..cols {
                let (xi, yi) = (i32::from(x), i32::from(y));
                let cell = grid.get(xi, yi).unwrap_or(blank);
                let before = match &previous {
                    Some(p) => p.get(xi, yi),
                    None => Some(blank),
                };
                if before == Some(cell) {
                    continue;
                }
                queue!(self.out, MoveTo(x, y), SetAttribute(Attribute::Reset))?;
                if cell.style.bold {
                    queue!(self.out, SetAttribute(Attribute::Bold))?;
                }
                if cell.style.dim {
                    queue!(self.out, SetAttribute(Attribute::Dim))?;
                }
                if let Some(hue) = cell.style.hue {
                    queue!(self.out, SetForegroundColor(hue.color()))?;
                }
                queue!(self.out, Print(cell.ch), ResetColor)?;
            }
        }
        queue!(self.out, SetAttribute(Attribute::Reset))?;
        self.out.flush()
    }
}

fn quit_requested(events: &[InputEvent]) -> bool {
    events
        .iter()
        .any(|ev| matches!(ev, InputEvent::Quit | InputEvent::Key('q' | 'Q')))
}

/// Run the animation until `q`, `Q` or an interrupt arrives, or for at most
/// `max_ticks` steps. Returns the number of steps drawn.
///
/// `size` is queried every tick so the scene follows terminal resizes.
pub fn run_animation<W: Write>(
    painter: &mut GridPainter<W>,
    input: &mut dyn InputSource,
    clock: &mut dyn Clock,
    rng: &mut dyn RngCore,
    mut size: impl FnMut() -> JumpscareResult<(u16, u16)>,
    color: bool,
    max_ticks: Option<u64>,
) -> JumpscareResult<u64> {
    let (cols, rows) = size()?;
    let mut scene = Scene::new(cols, rows, color);
    tracing::debug!(cols, rows, color, "animation started");

    loop {
        if max_ticks.is_some_and(|max| scene.tick() >= max) {
            break;
        }
        let now = clock.now();
        let (cols, rows) = size()?;
        scene.step(cols, rows, &mut *rng);
        painter.paint(scene.draw(cols, rows))?;

        if quit_requested(&input.poll_pending()?) {
            break;
        }
        clock.sleep_until(now + TICK);
    }

    tracing::debug!(ticks = scene.tick(), "animation finished");
    Ok(scene.tick())
}

#[cfg(test)]
#[path = "../tests/unit/confetti.rs"]
mod tests;
