//! GameView: maps an engine [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::engine::GameSnapshot;
use crate::fb::{FrameBuffer, Glyph, Style};
use crate::types::{Color, BOARD_HEIGHT, BOARD_WIDTH};

const WELL_BG: Color = Color::new(30, 30, 40);
const SCREEN_BG: Color = Color::new(0, 0, 0);

const CONTROLS: [(&str, &str); 7] = [
    ("←→", "move"),
    ("↓", "soft drop"),
    ("↑", "rotate"),
    ("spc", "hard drop"),
    ("p", "pause"),
    ("r", "restart"),
    ("q", "quit"),
];

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

/// A lightweight terminal renderer for the Tetris game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2, cell_h: 1 }
    }
}

/// Where the well was placed inside the viewport.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is resized to the
    /// viewport when needed.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame = Frame {
            x: viewport.width.saturating_sub(board_px_w + 2) / 2,
            y: viewport.height.saturating_sub(board_px_h + 2) / 2,
            w: board_px_w + 2,
            h: board_px_h + 2,
        };

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            board_px_w,
            board_px_h,
            ' ',
            Style::new(SCREEN_BG, WELL_BG),
        );
        self.draw_border(fb, frame, Style::new(Color::new(200, 200, 200), SCREEN_BG));

        // Locked cells.
        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(color) => self.draw_block(fb, frame, x as i8, y as i8, *color),
                    None => self.fill_cell(
                        fb,
                        frame,
                        x as i8,
                        y as i8,
                        '·',
                        Style::new(Color::new(90, 90, 100), WELL_BG).dim(),
                    ),
                }
            }
        }

        if let Some(piece) = snap.current {
            // Ghost first so the falling piece covers any overlap.
            if let Some(ghost_y) = snap.ghost_y {
                let style = Style::new(piece.color, WELL_BG).dim();
                for (dx, dy) in piece.shape.cells() {
                    self.fill_cell(fb, frame, piece.x + dx, ghost_y + dy, '░', style);
                }
            }
            for (x, y) in piece.board_cells() {
                self.draw_block(fb, frame, x, y, piece.color);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over {
            self.draw_overlay(fb, frame, "GAME OVER", Some("r to restart"));
        } else if snap.paused {
            self.draw_overlay(fb, frame, "PAUSED", Some("p to resume"));
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, f: Frame, style: Style) {
        fb.put_char(f.x, f.y, '┌', style);
        fb.put_char(f.x + f.w - 1, f.y, '┐', style);
        fb.put_char(f.x, f.y + f.h - 1, '└', style);
        fb.put_char(f.x + f.w - 1, f.y + f.h - 1, '┘', style);

        for dx in 1..f.w - 1 {
            fb.put_char(f.x + dx, f.y, '─', style);
            fb.put_char(f.x + dx, f.y + f.h - 1, '─', style);
        }
        for dy in 1..f.h - 1 {
            fb.put_char(f.x, f.y + dy, '│', style);
            fb.put_char(f.x + f.w - 1, f.y + dy, '│', style);
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, f: Frame, x: i8, y: i8, color: Color) {
        self.fill_cell(fb, f, x, y, '█', Style::new(color, WELL_BG).bold());
    }

    /// Fill one board cell; cells off the board (e.g. above row 0) are skipped.
    fn fill_cell(&self, fb: &mut FrameBuffer, f: Frame, x: i8, y: i8, ch: char, style: Style) {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = f.x + 1 + x as u16 * self.cell_w;
        let py = f.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, f: Frame) {
        let panel_x = f.x.saturating_add(f.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = Style::default().bold();
        let value = Style::new(Color::new(200, 200, 200), SCREEN_BG);

        let mut y = f.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        let next = snap.next;
        let style = Style::new(next.color, SCREEN_BG).bold();
        for (dx, dy) in next.shape.cells() {
            let px = panel_x + dx as u16 * self.cell_w;
            let py = y + dy as u16;
            fb.fill_rect(px, py, self.cell_w, 1, '█', style);
        }
        y = y.saturating_add(next.shape.size() as u16 + 1);

        let dim = value.dim();
        for (key, what) in CONTROLS {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, key, value);
            fb.put_str(panel_x + 4, y, what, dim);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, f: Frame, title: &str, hint: Option<&str>) {
        let style = Style::new(Color::new(255, 255, 255), SCREEN_BG).bold();
        let mid_y = f.y.saturating_add(f.h / 2);
        self.put_centered(fb, f, mid_y, title, style);
        if let Some(hint) = hint {
            self.put_centered(fb, f, mid_y.saturating_add(1), hint, Style { bold: false, ..style });
        }
    }

    fn put_centered(&self, fb: &mut FrameBuffer, f: Frame, y: u16, text: &str, style: Style) {
        let text_w = text.chars().count() as u16;
        let x = f.x.saturating_add(f.w.saturating_sub(text_w) / 2);
        fb.put_str(x, y, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Tetromino;
    use crate::types::PieceKind;

    fn find(fb: &FrameBuffer, needle: &str) -> Option<(u16, u16)> {
        (0..fb.height()).find_map(|y| {
            fb.row_text(y)
                .find(needle)
                .map(|byte_x| (fb.row_text(y)[..byte_x].chars().count() as u16, y))
        })
    }

    #[test]
    fn border_is_centered_in_viewport() {
        let fb = GameView::default().render(&GameSnapshot::default(), Viewport::new(80, 24));
        // Well is 22x22 including the border.
        assert_eq!(fb.get(29, 1).map(|g| g.ch), Some('┌'));
        assert_eq!(fb.get(50, 1).map(|g| g.ch), Some('┐'));
        assert_eq!(fb.get(29, 22).map(|g| g.ch), Some('└'));
        assert_eq!(fb.get(50, 22).map(|g| g.ch), Some('┘'));
    }

    #[test]
    fn locked_cell_uses_its_color() {
        let mut snap = GameSnapshot::default();
        let teal = Color::new(0, 0xf0, 0xf0);
        snap.board[19][0] = Some(teal);

        let fb = GameView::default().render(&snap, Viewport::new(80, 24));
        // Row 19 sits at y = 1 + 1 + 19; column 0 spans x = 30..=31.
        for x in 30..=31 {
            let g = fb.get(x, 21).unwrap();
            assert_eq!(g.ch, '█');
            assert_eq!(g.style.fg, teal);
        }
        assert_eq!(fb.get(32, 21).map(|g| g.ch), Some('·'));
    }

    #[test]
    fn current_piece_hides_above_board_cells() {
        let mut snap = GameSnapshot::default();
        snap.current = Some(Tetromino::spawn(PieceKind::O).shifted(0, -1));
        snap.ghost_y = Some(18);
        let fb = GameView::default().render(&snap, Viewport::new(80, 24));

        // Only the bottom row of the O is on the board.
        assert_eq!(fb.get(38, 2).map(|g| g.ch), Some('█'));
        assert_eq!(fb.get(38, 3).map(|g| g.ch), Some('·'));
        // Ghost sits on rows 18..=19.
        assert_eq!(fb.get(38, 20).map(|g| g.ch), Some('░'));
        assert_eq!(fb.get(38, 21).map(|g| g.ch), Some('░'));
    }

    #[test]
    fn side_panel_shows_score_and_next() {
        let mut snap = GameSnapshot::default();
        snap.score = 1300;
        snap.next = Tetromino::spawn(PieceKind::T);
        let fb = GameView::default().render(&snap, Viewport::new(80, 24));

        let (sx, sy) = find(&fb, "SCORE").expect("score label");
        assert_eq!(sx, 53);
        let value: String = fb.row_text(sy + 1).chars().skip(sx as usize).take(4).collect();
        assert_eq!(value, "1300");

        let (nx, ny) = find(&fb, "NEXT").expect("next label");
        // T's top cell is the middle of its 3-wide box.
        let top = fb.get(nx + 2, ny + 1).unwrap();
        assert_eq!(top.ch, '█');
        assert_eq!(top.style.fg, snap.next.color);
        assert_eq!(fb.get(nx, ny + 1).map(|g| g.ch), Some(' '));

        assert!(find(&fb, "restart").is_some());
    }

    #[test]
    fn overlays() {
        let mut snap = GameSnapshot::default();
        snap.paused = true;
        let fb = GameView::default().render(&snap, Viewport::new(80, 24));
        assert!(find(&fb, "PAUSED").is_some());
        assert!(find(&fb, "GAME OVER").is_none());

        snap.game_over = true;
        let fb = GameView::default().render(&snap, Viewport::new(80, 24));
        assert!(find(&fb, "GAME OVER").is_some());
        assert!(find(&fb, "r to restart").is_some());
        assert!(find(&fb, "PAUSED").is_none());
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let fb = GameView::default().render(&GameSnapshot::default(), Viewport::new(5, 3));
        assert_eq!((fb.width(), fb.height()), (5, 3));
    }
}
