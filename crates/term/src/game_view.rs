//! GameView: maps a [`GameSnapshot`] onto a terminal canvas.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{definition_for, GamePhase, GameSnapshot, PieceSnapshot};
use crate::fb::{Canvas, Rect, Rgb, Style};
use crate::settings::SoundCue;
use crate::types::ColorTag;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Colors for the playfield and the seven block tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Rgb,
    pub cyan: Rgb,
    pub blue: Rgb,
    pub orange: Rgb,
    pub yellow: Rgb,
    pub green: Rgb,
    pub purple: Rgb,
    pub red: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Rgb::BLACK,
            cyan: Rgb::new(0x00, 0xf0, 0xf0),
            blue: Rgb::new(0x00, 0x00, 0xf0),
            orange: Rgb::new(0xf0, 0xa0, 0x00),
            yellow: Rgb::new(0xf0, 0xf0, 0x00),
            green: Rgb::new(0x00, 0xf0, 0x00),
            purple: Rgb::new(0xa0, 0x00, 0xf0),
            red: Rgb::new(0xf0, 0x00, 0x00),
        }
    }
}

impl Theme {
    /// Build a theme from a background and a per-tag color lookup.
    pub fn from_fn(background: Rgb, mut color: impl FnMut(ColorTag) -> Rgb) -> Self {
        Self {
            background,
            cyan: color(ColorTag::Cyan),
            blue: color(ColorTag::Blue),
            orange: color(ColorTag::Orange),
            yellow: color(ColorTag::Yellow),
            green: color(ColorTag::Green),
            purple: color(ColorTag::Purple),
            red: color(ColorTag::Red),
        }
    }

    pub fn block(&self, tag: ColorTag) -> Rgb {
        match tag {
            ColorTag::Cyan => self.cyan,
            ColorTag::Blue => self.blue,
            ColorTag::Orange => self.orange,
            ColorTag::Yellow => self.yellow,
            ColorTag::Green => self.green,
            ColorTag::Purple => self.purple,
            ColorTag::Red => self.red,
        }
    }
}

/// Host-side state shown next to the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hud<'a> {
    /// Active combo banner, see `ComboTracker::banner`.
    pub combo: Option<u32>,
    pub sound_on: bool,
    pub music_on: bool,
    /// Most recent audible cue.
    pub last_cue: Option<SoundCue>,
    /// One-line message at the bottom of the side panel.
    pub status: Option<&'a str>,
}

/// Block glyphs drawn per cell.
pub const BLOCK_GLYPH: char = '█';
pub const GHOST_GLYPH: char = '░';
pub const EMPTY_GLYPH: char = '·';

const GRID_DOT: Rgb = Rgb::new(70, 70, 80);
const PANEL_TEXT: Rgb = Rgb::new(200, 200, 200);
const COMBO_TEXT: Rgb = Rgb::new(255, 200, 60);

/// Narrowest side panel worth drawing.
const PANEL_MIN_WIDTH: u16 = 10;

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    theme: Theme,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            theme: Theme::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn cell_w(&self) -> u16 {
        self.cell_w
    }

    /// Frame rectangle (border included) for a board of `rows` x `cols`,
    /// centered in the viewport.
    pub fn board_rect(&self, rows: u8, cols: u8, viewport: Viewport) -> Rect {
        let w = cols as u16 * self.cell_w + 2;
        let h = rows as u16 * self.cell_h + 2;
        Rect::centered(viewport.width, viewport.height, w, h)
    }

    /// Draw `snap` into `canvas`, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, hud: &Hud<'_>, viewport: Viewport, canvas: &mut Canvas) {
        canvas.reset(viewport.width, viewport.height);

        let frame = self.board_rect(snap.board.rows(), snap.board.cols(), viewport);
        let field = Style::PLAIN.on(self.theme.background);
        canvas.fill(frame.inner(), ' ', field);
        canvas.frame(frame, Style::PLAIN);

        let empty = Style::fg(GRID_DOT).on(self.theme.background).dim();
        for y in 0..snap.board.rows() {
            for x in 0..snap.board.cols() {
                let (ch, style) = match snap.board.get(x as i8, y as i8).flatten() {
                    Some(tag) => (BLOCK_GLYPH, Style::fg(self.theme.block(tag)).on(self.theme.background)),
                    None => (EMPTY_GLYPH, empty),
                };
                canvas.fill(self.cell_rect(frame, x as u16, y as u16), ch, style);
            }
        }

        if let Some(ghost) = &snap.ghost {
            let style = Style::fg(self.theme.block(ghost.color).darken(40))
                .on(self.theme.background)
                .dim();
            self.draw_piece(canvas, frame, snap, ghost, GHOST_GLYPH, style);
        }
        if let Some(current) = &snap.current {
            let style = Style::fg(self.theme.block(current.color))
                .on(self.theme.background)
                .bold();
            self.draw_piece(canvas, frame, snap, current, BLOCK_GLYPH, style);
        }

        self.draw_side_panel(canvas, snap, hud, frame);

        let overlay = Style::fg(Rgb::WHITE).bold();
        let mid = frame.middle_row();
        match snap.phase {
            GamePhase::Paused => {
                canvas.text_centered(frame, mid, "PAUSED", overlay);
            }
            GamePhase::GameOver => {
                canvas.text_centered(frame, mid, "GAME OVER", overlay);
                self.draw_final_score(canvas, frame, snap.score, overlay);
            }
            GamePhase::Ready => {
                canvas.text_centered(frame, mid, "PRESS R", overlay);
            }
            GamePhase::Running => {}
        }
    }

    /// Convenience helper that allocates a new canvas.
    pub fn render(&self, snap: &GameSnapshot, hud: &Hud<'_>, viewport: Viewport) -> Canvas {
        let mut canvas = Canvas::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut canvas);
        canvas
    }

    /// Terminal area covered by board cell (`x`, `y`).
    fn cell_rect(&self, frame: Rect, x: u16, y: u16) -> Rect {
        let field = frame.inner();
        Rect::new(
            field.x + x * self.cell_w,
            field.y + y * self.cell_h,
            self.cell_w,
            self.cell_h,
        )
    }

    /// Cells above row 0 are not drawn.
    fn draw_piece(
        &self,
        canvas: &mut Canvas,
        frame: Rect,
        snap: &GameSnapshot,
        piece: &PieceSnapshot,
        ch: char,
        style: Style,
    ) {
        let rows = snap.board.rows() as i8;
        let cols = snap.board.cols() as i8;
        for &(x, y) in piece.cells.iter() {
            if (0..cols).contains(&x) && (0..rows).contains(&y) {
                canvas.fill(self.cell_rect(frame, x as u16, y as u16), ch, style);
            }
        }
    }

    fn draw_side_panel(&self, canvas: &mut Canvas, snap: &GameSnapshot, hud: &Hud<'_>, frame: Rect) {
        let x = frame.right().saturating_add(2);
        if canvas.width().saturating_sub(x) < PANEL_MIN_WIDTH {
            return;
        }

        let label = Style::PLAIN.bold();
        let value = Style::fg(PANEL_TEXT);
        let note = value.dim();

        let mut y = frame.y;
        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            canvas.text(x, y, name, label);
            canvas.number(x, y + 1, n, value);
            y += 3;
        }

        canvas.text(x, y, "NEXT", label);
        if let Some(next) = &snap.next {
            self.draw_preview(canvas, x, y + 1, next);
        }
        y += 6;

        if let Some(combo) = hud.combo {
            let style = Style::fg(COMBO_TEXT).bold();
            let end = canvas.number(x, y, combo, style);
            canvas.text(end, y, " COMBO!", style);
        }
        y += 2;

        canvas.text(x, y, if hud.sound_on { "SOUND ON" } else { "SOUND OFF" }, note);
        canvas.text(x, y + 1, if hud.music_on { "MUSIC ON" } else { "MUSIC OFF" }, note);
        if let Some(cue) = hud.last_cue {
            let end = canvas.text(x, y + 2, "SFX ", note);
            canvas.text(end, y + 2, cue.as_str(), note);
        }
        canvas.text(x, y + 3, snap.phase.as_str(), note);
        if let Some(status) = hud.status {
            canvas.text(x, y + 4, status, note);
        }
    }

    /// Draw the base (unrotated) matrix of `piece` at a fixed panel origin.
    fn draw_preview(&self, canvas: &mut Canvas, x: u16, y: u16, piece: &PieceSnapshot) {
        let style = Style::fg(self.theme.block(piece.color));
        for (col, row) in definition_for(piece.kind).matrix.filled() {
            let cell = Rect::new(x + col as u16 * self.cell_w, y + row as u16, self.cell_w, 1);
            canvas.fill(cell, BLOCK_GLYPH, style);
        }
    }

    fn draw_final_score(&self, canvas: &mut Canvas, frame: Rect, score: u32, style: Style) {
        let digits = score.checked_ilog10().unwrap_or(0) as u16 + 1;
        let width = "SCORE ".len() as u16 + digits;
        let x = frame.x + frame.w.saturating_sub(width) / 2;
        let end = canvas.text(x, frame.middle_row() + 1, "SCORE ", style);
        canvas.number(end, frame.middle_row() + 1, score, style);
    }
}
