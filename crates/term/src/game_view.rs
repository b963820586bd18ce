//! GameView: maps a [`SessionSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────┐  LEVEL
//! │● ■ ▲ ◆ ● ■ ▲ │  1
//! │■ ▲ ◆ ● ■ ▲ ◆ │
//! │...           │  SCORE
//! └──────────────┘  120 / 900
//! ```

use crate::core::{MatchSet, Outcome, Phase, SessionSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Coord, TileKind};

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

/// Presentation state that lives outside the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardOverlay<'a> {
    pub cursor: Option<Coord>,
    pub selected: Option<Coord>,
    /// Cells being cleared in the current playback frame.
    pub highlight: Option<&'a MatchSet>,
    /// No level follows the current one.
    pub last_level: bool,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const CURSOR_BG: Rgb = Rgb::new(70, 70, 95);
const SELECTED_BG: Rgb = Rgb::new(120, 100, 40);
const HIGHLIGHT_BG: Rgb = Rgb::new(200, 200, 210);

const TILE_GLYPHS: [char; 8] = ['●', '■', '▲', '◆', '★', '♥', '♣', '✚'];
const TILE_COLORS: [Rgb; 8] = [
    Rgb::new(220, 80, 80),
    Rgb::new(80, 120, 220),
    Rgb::new(100, 220, 120),
    Rgb::new(240, 220, 80),
    Rgb::new(200, 120, 220),
    Rgb::new(255, 165, 0),
    Rgb::new(80, 220, 220),
    Rgb::new(235, 235, 235),
];

/// Glyph and colour for a tile kind. Kinds past the palette wrap around.
pub fn tile_look(kind: TileKind) -> (char, Rgb) {
    let i = kind as usize % TILE_GLYPHS.len();
    (TILE_GLYPHS[i], TILE_COLORS[i])
}

/// A lightweight terminal renderer for the puzzle board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2 columns per tile keeps the board roughly square.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        overlay: &BoardOverlay<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::PLAIN.cell(' '));

        let board_w = (snap.cols as u16).saturating_mul(self.cell_w);
        let board_h = snap.rows as u16;
        let frame_w = board_w.saturating_add(2);
        let frame_h = board_h.saturating_add(2);

        let panel_w = 16;
        let start_x = viewport
            .width
            .saturating_sub(frame_w.saturating_add(panel_w))
            / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            board_w,
            board_h,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG),
        );
        draw_border(
            fb,
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0)),
        );

        for row in 0..snap.rows {
            for col in 0..snap.cols {
                let at = Coord::new(row, col);
                self.draw_tile(fb, start_x, start_y, snap, overlay, at);
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        match snap.phase {
            Phase::Ended(Outcome::Win) if overlay.last_level => {
                draw_banner(fb, start_x, start_y, frame_w, frame_h, "ALL CLEAR", "r: replay");
            }
            Phase::Ended(Outcome::Win) => {
                draw_banner(fb, start_x, start_y, frame_w, frame_h, "LEVEL CLEAR", "n: next");
            }
            Phase::Ended(Outcome::Fail) => {
                draw_banner(fb, start_x, start_y, frame_w, frame_h, "OUT OF MOVES", "r: retry");
            }
            Phase::Idle | Phase::Resolving => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &SessionSnapshot,
        overlay: &BoardOverlay<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, overlay, viewport, &mut fb);
        fb
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        snap: &SessionSnapshot,
        overlay: &BoardOverlay<'_>,
        at: Coord,
    ) {
        let highlighted = overlay.highlight.is_some_and(|m| m.contains(&at));
        let bg = if highlighted {
            HIGHLIGHT_BG
        } else if overlay.selected == Some(at) {
            SELECTED_BG
        } else if overlay.cursor == Some(at) {
            CURSOR_BG
        } else {
            BOARD_BG
        };

        let (ch, style) = match snap.kind(at) {
            Some(kind) => {
                let (glyph, fg) = tile_look(kind);
                (glyph, CellStyle::new(fg, bg).bold())
            }
            None => ('·', CellStyle::new(Rgb::new(90, 90, 100), bg).dim()),
        };

        let px = start_x + 1 + (at.col as u16) * self.cell_w;
        let py = start_y + 1 + at.row as u16;
        fb.fill_rect(px, py, self.cell_w, 1, ' ', style);
        fb.put_char(px, py, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x.saturating_add(10) > viewport.width {
            return;
        }

        let label = CellStyle::PLAIN.bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let dim = value.dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, "LEVEL", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.level_id, value);
        y += 2;

        fb.put_str(panel_x, y, "SCORE", label);
        y += 1;
        let x = fb.put_u32(panel_x, y, snap.score, value);
        let x = fb.put_str(x, y, " / ", dim);
        fb.put_u32(x, y, snap.target_score, dim);
        y += 2;

        fb.put_str(panel_x, y, "MOVES", label);
        y += 1;
        let moves_style = if snap.moves_remaining <= 3 {
            CellStyle::new(Rgb::new(230, 90, 90), Rgb::new(0, 0, 0)).bold()
        } else {
            value
        };
        fb.put_u32(panel_x, y, snap.moves_remaining, moves_style);
        y += 2;

        let bar_w = 10u16;
        let filled = if snap.target_score == 0 {
            bar_w
        } else {
            let ratio = (snap.score as u64 * bar_w as u64) / snap.target_score as u64;
            ratio.min(bar_w as u64) as u16
        };
        for i in 0..bar_w {
            let ch = if i < filled { '█' } else { '░' };
            fb.put_char(panel_x + i, y, ch, value);
        }
        y += 2;

        for hint in ["arrows: move", "space: pick", "wasd: swap", "q: quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, hint, dim);
            y += 1;
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }
    let right = x + w - 1;
    let bottom = y + h - 1;

    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for dx in x + 1..right {
        fb.put_char(dx, y, '─', style);
        fb.put_char(dx, bottom, '─', style);
    }
    for dy in y + 1..bottom {
        fb.put_char(x, dy, '│', style);
        fb.put_char(right, dy, '│', style);
    }
}

fn draw_banner(
    fb: &mut FrameBuffer,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    title: &str,
    hint: &str,
) {
    let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
    let mid_y = start_y.saturating_add(frame_h / 2);
    for (dy, text) in [(0u16, title), (1, hint)] {
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let s = if dy == 0 { style } else { style.dim() };
        fb.put_str(x, mid_y.saturating_add(dy), text, s);
    }
}
