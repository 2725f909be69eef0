//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize or [`TerminalRenderer::invalidate`])
//! is a full redraw; after that only runs of changed glyphs are written.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{Attribute, Color as TermColor, Colors, Print, ResetColor, SetAttribute, SetColors},
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Style};
use crate::types::Color;

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Undo [`Self::enter`]. Safe to call after a failed frame.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode().context("disable raw mode")?;
        Ok(())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Force the next draw to be a full redraw (terminal resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// Callers keep one `FrameBuffer` and pass it in every frame. After the
    /// call it holds the previous frame, ready to be rendered over.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            stale => {
                encode_full_into(fb, &mut self.buf)?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf).context("write frame")?;
        self.out.flush().context("flush frame")?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut painter = Painter::new(out);
    for y in 0..fb.height() {
        painter.run(fb, y, 0, fb.width())?;
    }
    painter.finish()
}

/// Encode only the runs that differ between `prev` and `next`.
///
/// Frames of different sizes are not diffed; every row of `next` is written.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let same_size = prev.width() == next.width() && prev.height() == next.height();
    let mut painter = Painter::new(out);
    for y in 0..next.height() {
        if !same_size {
            painter.run(next, y, 0, next.width())?;
            continue;
        }
        for (x, len) in changed_runs(prev, next, y) {
            painter.run(next, y, x, len)?;
        }
    }
    painter.finish()
}

/// Horizontal spans `(x, len)` of row `y` where the two frames disagree.
fn changed_runs<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
    y: u16,
) -> impl Iterator<Item = (u16, u16)> + 'a {
    let w = next.width();
    let differs = move |x: u16| prev.get(x, y) != next.get(x, y);
    let mut x = 0u16;
    std::iter::from_fn(move || {
        while x < w && !differs(x) {
            x += 1;
        }
        if x >= w {
            return None;
        }
        let start = x;
        while x < w && differs(x) {
            x += 1;
        }
        Some((start, x - start))
    })
}

/// Writes glyph runs, switching SGR state only when the style changes.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    pen: Option<Style>,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, pen: None }
    }

    fn run(&mut self, fb: &FrameBuffer, y: u16, x: u16, len: u16) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        for gx in x..x + len {
            let glyph = fb.get(gx, y).unwrap_or_default();
            if self.pen != Some(glyph.style) {
                self.pen_to(glyph.style)?;
            }
            self.out.queue(Print(glyph.ch))?;
        }
        Ok(())
    }

    fn pen_to(&mut self, style: Style) -> Result<()> {
        let attrs_changed = self
            .pen
            .map_or(true, |pen| pen.bold != style.bold || pen.dim != style.dim);
        if attrs_changed {
            // Reset also drops colors, so colors are always set afterwards.
            self.out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                self.out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                self.out.queue(SetAttribute(Attribute::Dim))?;
            }
        }
        self.out.queue(SetColors(Colors::new(
            term_color(style.fg),
            term_color(style.bg),
        )))?;
        self.pen = Some(style);
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(ResetColor)?;
        Ok(())
    }
}

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}
