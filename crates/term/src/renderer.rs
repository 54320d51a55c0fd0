//! Terminal output: screen setup, frame encoding and the bell.
//!
//! Each frame is encoded into a byte buffer and written once. A frame is
//! repainted in full when the canvas size or the game phase changed since the
//! last one, or after [`TerminalRenderer::invalidate`]. Otherwise only the
//! runs of cells that changed are sent.

use std::io::{self, Write};
use std::mem;

use anyhow::Result;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    queue,
    style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::core::GamePhase;
use crate::fb::{Attrs, Canvas, Cell, Rgb, Style};
use crate::settings::SoundCue;

/// Unchanged cells between two changed runs that are reprinted rather than
/// skipped with a cursor move.
const MERGE_GAP: usize = 3;

const BEL: u8 = 0x07;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Full,
    Diff,
    Unchanged,
}

/// What one [`TerminalRenderer::present`] call sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub kind: FrameKind,
    /// Cells printed.
    pub cells: usize,
    /// Bytes written to the terminal.
    pub bytes: usize,
}

/// A phase change swaps whole overlays in and out, so it repaints everything.
pub fn needs_full_repaint(shown: Option<(&Canvas, GamePhase)>, next: &Canvas, phase: GamePhase) -> bool {
    match shown {
        None => true,
        Some((canvas, shown_phase)) => canvas.size() != next.size() || shown_phase != phase,
    }
}

/// Cues that ring the terminal bell. Per-move cues would be noise.
pub fn rings_bell(cue: SoundCue) -> bool {
    matches!(cue, SoundCue::Clear | SoundCue::GameOver)
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    buf: Vec<u8>,
    shown: Option<(Canvas, GamePhase)>,
    active: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(32 * 1024),
            shown: None,
            active: false,
        }
    }

    /// Raw mode, alternate screen, hidden cursor and mouse reporting.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        self.buf.clear();
        queue!(
            self.buf,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            EnableMouseCapture,
        )?;
        self.write_buf()
    }

    /// Undo [`enter`](Self::enter). Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.shown = None;
        self.buf.clear();
        queue!(
            self.buf,
            DisableMouseCapture,
            SetAttribute(Attribute::Reset),
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen,
        )?;
        let written = self.write_buf();
        terminal::disable_raw_mode()?;
        written
    }

    /// Repaint everything on the next present (the terminal was resized or
    /// scribbled on).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Send `canvas` to the terminal.
    ///
    /// The canvas is kept for diffing the next frame, and the caller gets the
    /// previous frame's buffer back in its place to draw into.
    pub fn present(&mut self, canvas: &mut Canvas, phase: GamePhase) -> Result<FrameStats> {
        let full = needs_full_repaint(self.shown.as_ref().map(|(c, p)| (c, *p)), canvas, phase);
        let prev = match &self.shown {
            Some((shown, _)) if !full => Some(shown),
            _ => None,
        };

        self.buf.clear();
        let cells = encode_frame(prev, canvas, &mut self.buf)?;
        let bytes = self.buf.len();
        if bytes > 0 {
            self.write_buf()?;
        }

        let mut retired = match self.shown.take() {
            Some((shown, _)) => shown,
            None => Canvas::new(0, 0),
        };
        mem::swap(&mut retired, canvas);
        self.shown = Some((retired, phase));

        let kind = if full {
            FrameKind::Full
        } else if cells == 0 {
            FrameKind::Unchanged
        } else {
            FrameKind::Diff
        };
        Ok(FrameStats { kind, cells, bytes })
    }

    /// Ring the bell if `cue` calls for it. Returns whether it rang.
    pub fn play(&mut self, cue: SoundCue) -> Result<bool> {
        if !rings_bell(cue) {
            return Ok(false);
        }
        self.buf.clear();
        self.buf.push(BEL);
        self.write_buf()?;
        Ok(true)
    }

    fn write_buf(&mut self) -> Result<()> {
        let mut out = self.stdout.lock();
        out.write_all(&self.buf)?;
        out.flush()?;
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Encode `next` into `out`: a diff against `prev` when it has the same size,
/// otherwise a clear and full repaint. Returns the number of cells printed.
pub fn encode_frame(prev: Option<&Canvas>, next: &Canvas, out: &mut Vec<u8>) -> Result<usize> {
    let prev = prev.filter(|p| p.size() == next.size());
    let mut pen = Pen::default();
    let mut printed = 0;

    if prev.is_none() {
        queue!(out, terminal::Clear(terminal::ClearType::All))?;
    }
    for y in 0..next.height() {
        let row = next.row(y);
        match prev {
            None => {
                pen.print_run(out, 0, y, row)?;
                printed += row.len();
            }
            Some(prev) => {
                for (start, len) in changed_runs(prev.row(y), row) {
                    pen.print_run(out, start as u16, y, &row[start..start + len])?;
                    printed += len;
                }
            }
        }
    }
    pen.finish(out)?;
    Ok(printed)
}

/// `(start, len)` runs where `new` differs from `old`. Runs separated by at
/// most [`MERGE_GAP`] equal cells are merged.
fn changed_runs<'a>(old: &'a [Cell], new: &'a [Cell]) -> impl Iterator<Item = (usize, usize)> + 'a {
    let differs = move |x: usize| old.get(x) != Some(&new[x]);
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < new.len() && !differs(x) {
            x += 1;
        }
        if x == new.len() {
            return None;
        }
        let start = x;
        let mut end = x;
        while x < new.len() {
            if differs(x) {
                end = x + 1;
            } else if x - end >= MERGE_GAP {
                break;
            }
            x += 1;
        }
        x = end;
        Some((start, end - start))
    })
}

/// Cursor position and SGR state as last sent, so repeated moves and
/// unchanged colors are not re-emitted.
#[derive(Default)]
struct Pen {
    at: Option<(u16, u16)>,
    style: Option<Style>,
}

impl Pen {
    fn print_run(&mut self, out: &mut Vec<u8>, x: u16, y: u16, cells: &[Cell]) -> Result<()> {
        if self.at != Some((x, y)) {
            queue!(out, cursor::MoveTo(x, y))?;
        }
        for cell in cells {
            self.set_style(out, cell.style)?;
            queue!(out, Print(cell.ch))?;
        }
        self.at = Some((x.saturating_add(cells.len() as u16), y));
        Ok(())
    }

    fn set_style(&mut self, out: &mut Vec<u8>, style: Style) -> Result<()> {
        match self.style {
            Some(cur) if cur == style => {}
            Some(cur) if cur.attrs == style.attrs => {
                if cur.fg != style.fg {
                    queue!(out, SetForegroundColor(color(style.fg)))?;
                }
                if cur.bg != style.bg {
                    queue!(out, SetBackgroundColor(color(style.bg)))?;
                }
            }
            _ => {
                // SGR 0 also drops the colors.
                queue!(out, SetAttribute(Attribute::Reset))?;
                if style.attrs.contains(Attrs::BOLD) {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
                if style.attrs.contains(Attrs::DIM) {
                    queue!(out, SetAttribute(Attribute::Dim))?;
                }
                queue!(
                    out,
                    SetForegroundColor(color(style.fg)),
                    SetBackgroundColor(color(style.bg)),
                )?;
            }
        }
        self.style = Some(style);
        Ok(())
    }

    fn finish(&mut self, out: &mut Vec<u8>) -> Result<()> {
        if self.style.take().is_some() {
            queue!(out, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(haystack: &[u8], needle: &str) -> usize {
        haystack
            .windows(needle.len())
            .filter(|w| *w == needle.as_bytes())
            .count()
    }

    #[test]
    fn rgb_maps_to_truecolor() {
        assert_eq!(
            color(Rgb::new(0xf0, 0xa0, 0)),
            Color::Rgb {
                r: 0xf0,
                g: 0xa0,
                b: 0
            }
        );
    }

    #[test]
    fn nearby_changes_merge_into_one_run() {
        let old = [Cell::BLANK; 16];
        let mut new = old;
        for x in [1, 2, 3, 5, 11] {
            new[x].ch = '█';
        }
        let runs: Vec<_> = changed_runs(&old, &new).collect();
        assert_eq!(runs, vec![(1, 5), (11, 1)]);
    }

    #[test]
    fn gap_wider_than_merge_limit_splits_runs() {
        let old = [Cell::BLANK; 8];
        let mut new = old;
        new[0].ch = 'a';
        new[MERGE_GAP + 2].ch = 'b';
        let runs: Vec<_> = changed_runs(&old, &new).collect();
        assert_eq!(runs, vec![(0, 1), (MERGE_GAP + 2, 1)]);
    }

    #[test]
    fn unchanged_frame_encodes_nothing() {
        let canvas = Canvas::new(6, 4);
        let mut out = Vec::new();
        assert_eq!(encode_frame(Some(&canvas), &canvas.clone(), &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn size_change_falls_back_to_full_repaint() {
        let small = Canvas::new(2, 2);
        let big = Canvas::new(3, 2);
        let mut out = Vec::new();
        assert_eq!(encode_frame(Some(&small), &big, &mut out).unwrap(), 6);
        assert_eq!(count(&out, "\x1b[2J"), 1);
    }

    #[test]
    fn repeated_style_is_sent_once() {
        let mut canvas = Canvas::new(4, 2);
        let red = Style::fg(Rgb::new(255, 0, 0));
        canvas.text(0, 0, "ab", red);
        canvas.text(0, 1, "cd", red);
        let mut out = Vec::new();
        encode_frame(None, &canvas, &mut out).unwrap();
        assert_eq!(count(&out, "\x1b[38;2;255;0;0m"), 2);

        let mut out = Vec::new();
        let mut same = Canvas::new(4, 1);
        same.text(0, 0, "abcd", red);
        encode_frame(None, &same, &mut out).unwrap();
        assert_eq!(count(&out, "\x1b[38;2;255;0;0m"), 1);
        assert_eq!(count(&out, "\x1b[0m"), 2);
    }

    #[test]
    fn contiguous_runs_skip_cursor_moves() {
        let prev = Canvas::new(8, 1);
        let mut next = prev.clone();
        next.text(2, 0, "xy", Style::PLAIN);
        next.text(5, 0, "z", Style::PLAIN);
        let mut out = Vec::new();
        assert_eq!(encode_frame(Some(&prev), &next, &mut out).unwrap(), 4);
        assert_eq!(count(&out, "\x1b[1;3H"), 1);
        assert_eq!(count(&out, "H"), 1);
    }

    #[test]
    fn phase_change_forces_full_repaint() {
        let canvas = Canvas::new(4, 4);
        let shown = Some((&canvas, GamePhase::Running));
        assert!(!needs_full_repaint(shown, &canvas, GamePhase::Running));
        assert!(needs_full_repaint(shown, &canvas, GamePhase::Paused));
        assert!(needs_full_repaint(shown, &Canvas::new(5, 4), GamePhase::Running));
        assert!(needs_full_repaint(None, &canvas, GamePhase::Running));
    }

    #[test]
    fn only_clear_and_game_over_ring() {
        assert!(rings_bell(SoundCue::Clear));
        assert!(rings_bell(SoundCue::GameOver));
        assert!(!rings_bell(SoundCue::Move));
        assert!(!rings_bell(SoundCue::Rotate));
        assert!(!rings_bell(SoundCue::Drop));
    }
}
