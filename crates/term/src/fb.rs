//! Character canvas the game view draws into.
//!
//! Every write is clipped to the canvas, so drawing code can place panels
//! and overlays without checking the terminal size first.

use std::fmt::Write as _;
use std::ops::BitOr;

use arrayvec::ArrayString;

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Move each channel `percent` (0..=100) of the way to black.
    pub fn darken(self, percent: u8) -> Self {
        let keep = 100 - percent.min(100) as u32;
        let scale = |c: u8| (c as u32 * keep / 100) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// SGR attribute flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Attrs(u8);

impl Attrs {
    pub const NONE: Attrs = Attrs(0);
    pub const BOLD: Attrs = Attrs(1);
    pub const DIM: Attrs = Attrs(1 << 1);

    pub fn contains(self, other: Attrs) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Attrs {
    type Output = Attrs;

    fn bitor(self, rhs: Attrs) -> Attrs {
        Attrs(self.0 | rhs.0)
    }
}

/// Colors and attributes of one cell. Built with `Style::fg(..).on(..).bold()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Rgb,
    pub bg: Rgb,
    pub attrs: Attrs,
}

impl Style {
    /// Light grey on black.
    pub const PLAIN: Style = Style {
        fg: Rgb::new(220, 220, 220),
        bg: Rgb::BLACK,
        attrs: Attrs::NONE,
    };

    pub const fn fg(fg: Rgb) -> Self {
        Style { fg, ..Self::PLAIN }
    }

    pub const fn on(self, bg: Rgb) -> Self {
        Style { bg, ..self }
    }

    pub const fn bold(self) -> Self {
        Style {
            attrs: Attrs(self.attrs.0 | Attrs::BOLD.0),
            ..self
        }
    }

    pub const fn dim(self) -> Self {
        Style {
            attrs: Attrs(self.attrs.0 | Attrs::DIM.0),
            ..self
        }
    }

    pub fn is_bold(&self) -> bool {
        self.attrs.contains(Attrs::BOLD)
    }

    pub fn is_dim(&self) -> bool {
        self.attrs.contains(Attrs::DIM)
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::PLAIN
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        style: Style::PLAIN,
    };
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Axis-aligned area in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    /// A `w` x `h` area centered in `outer_w` x `outer_h`, pinned to the
    /// top-left corner when it does not fit.
    pub fn centered(outer_w: u16, outer_h: u16, w: u16, h: u16) -> Self {
        Self::new(outer_w.saturating_sub(w) / 2, outer_h.saturating_sub(h) / 2, w, h)
    }

    /// The area inside a one-cell border.
    pub fn inner(self) -> Self {
        Self::new(
            self.x.saturating_add(1),
            self.y.saturating_add(1),
            self.w.saturating_sub(2),
            self.h.saturating_sub(2),
        )
    }

    /// First column past the right edge.
    pub fn right(self) -> u16 {
        self.x.saturating_add(self.w)
    }

    /// First row past the bottom edge.
    pub fn bottom(self) -> u16 {
        self.y.saturating_add(self.h)
    }

    pub fn middle_row(self) -> u16 {
        self.y.saturating_add(self.h / 2)
    }
}

/// Row-major grid of styled cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Resize and blank every cell. The allocation is reused.
    pub fn reset(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(width as usize * height as usize, Cell::BLANK);
    }

    /// Cells of row `y`; empty past the bottom.
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let w = self.width as usize;
        let start = y as usize * w;
        &self.cells[start..start + w]
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.row(y).get(x as usize).copied()
    }

    pub fn put(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if x < self.width && y < self.height {
            let i = y as usize * self.width as usize + x as usize;
            self.cells[i] = Cell { ch, style };
        }
    }

    /// Write `s` from column `x`. Returns the column after the last char.
    pub fn text(&mut self, x: u16, y: u16, s: &str, style: Style) -> u16 {
        let mut cx = x;
        for ch in s.chars() {
            self.put(cx, y, ch, style);
            cx = cx.saturating_add(1);
        }
        cx
    }

    /// Write `value` in decimal. Returns the column after the last digit.
    pub fn number(&mut self, x: u16, y: u16, value: u32, style: Style) -> u16 {
        // u32::MAX is ten digits.
        let mut digits = ArrayString::<10>::new();
        let _ = write!(digits, "{value}");
        self.text(x, y, &digits, style)
    }

    /// Write `s` horizontally centered in `area` on row `y`.
    pub fn text_centered(&mut self, area: Rect, y: u16, s: &str, style: Style) -> u16 {
        let len = s.chars().count() as u16;
        let x = area.x.saturating_add(area.w.saturating_sub(len) / 2);
        self.text(x, y, s, style)
    }

    pub fn fill(&mut self, area: Rect, ch: char, style: Style) {
        let x0 = area.x.min(self.width) as usize;
        let x1 = area.right().min(self.width) as usize;
        let w = self.width as usize;
        for y in area.y..area.bottom().min(self.height) {
            let start = y as usize * w;
            self.cells[start + x0..start + x1].fill(Cell { ch, style });
        }
    }

    /// Single-line box drawn on the outer edge of `area`.
    pub fn frame(&mut self, area: Rect, style: Style) {
        if area.w < 2 || area.h < 2 {
            return;
        }
        let (left, top) = (area.x, area.y);
        let (right, bottom) = (area.right() - 1, area.bottom() - 1);
        for x in left + 1..right {
            self.put(x, top, '─', style);
            self.put(x, bottom, '─', style);
        }
        for y in top + 1..bottom {
            self.put(left, y, '│', style);
            self.put(right, y, '│', style);
        }
        for (x, y, ch) in [
            (left, top, '┌'),
            (right, top, '┐'),
            (left, bottom, '└'),
            (right, bottom, '┘'),
        ] {
            self.put(x, y, ch, style);
        }
    }

    /// Characters of row `y`, for tests and debugging.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|c| c.ch).collect()
    }
}
