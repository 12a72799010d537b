/// Rendering backend — all terminal I/O lives here.
///
/// `TerminalSurface` implements the game's `DrawSurface` by scaling world
/// coordinates onto the terminal's character grid.  No game logic is
/// performed; this module only translates draw calls into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal,
    QueueableCommand,
};
use block_shooter::entities::Viewport;
use block_shooter::surface::{DrawSurface, Paint, TextAlign};

const BLOCK: &str = "█";

/// Text at or above this size is drawn bold; a character grid has no other
/// way to show font size.
const BOLD_FONT_SIZE: f32 = 32.0;

fn color_of(paint: Paint) -> Color {
    match paint {
        Paint::White => Color::White,
        Paint::Red => Color::Red,
        Paint::Blue => Color::Blue,
        Paint::Yellow => Color::Yellow,
    }
}

/// Cells covered by the world interval `[start, start + len)` once scaled,
/// clipped to `0..limit`.  Anything partly inside a cell fills the cell.
fn cell_span(start: f32, len: f32, scale: f32, limit: u16) -> Option<(u16, u16)> {
    let first = (start * scale).floor().max(0.0);
    let end = ((start + len) * scale).ceil().min(limit as f32);
    if end <= first {
        return None;
    }
    Some((first as u16, end as u16))
}

pub struct TerminalSurface<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    /// Cells per world unit, per axis.
    scale_x: f32,
    scale_y: f32,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, cols: u16, rows: u16, viewport: Viewport) -> Self {
        let mut surface = TerminalSurface {
            out,
            cols,
            rows,
            scale_x: 1.0,
            scale_y: 1.0,
        };
        surface.resize(cols, rows, viewport);
        surface
    }

    pub fn resize(&mut self, cols: u16, rows: u16, viewport: Viewport) {
        self.cols = cols;
        self.rows = rows;
        self.scale_x = if viewport.width > 0.0 { cols as f32 / viewport.width } else { 0.0 };
        self.scale_y = if viewport.height > 0.0 { rows as f32 / viewport.height } else { 0.0 };
    }
}

impl<W: Write> DrawSurface for TerminalSurface<W> {
    fn clear(&mut self) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32, paint: Paint) -> std::io::Result<()> {
        let Some((c0, c1)) = cell_span(x, w, self.scale_x, self.cols) else {
            return Ok(());
        };
        let Some((r0, r1)) = cell_span(y, h, self.scale_y, self.rows) else {
            return Ok(());
        };

        let row_text = BLOCK.repeat((c1 - c0) as usize);
        self.out.queue(style::SetForegroundColor(color_of(paint)))?;
        for row in r0..r1 {
            self.out.queue(cursor::MoveTo(c0, row))?;
            self.out.queue(Print(&row_text))?;
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font_size: f32,
        align: TextAlign,
        paint: Paint,
    ) -> std::io::Result<()> {
        if self.rows == 0 {
            return Ok(());
        }
        // The baseline sits on the bottom of the row that contains it.
        let row = ((y * self.scale_y).ceil() - 1.0).clamp(0.0, (self.rows - 1) as f32) as u16;
        let anchor = x * self.scale_x;
        let width = text.chars().count() as f32;
        let col = match align {
            TextAlign::Left => anchor,
            TextAlign::Center => anchor - width / 2.0,
        };
        let col = col.round().clamp(0.0, self.cols.saturating_sub(1) as f32) as u16;

        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(color_of(paint)))?;
        if font_size >= BOLD_FONT_SIZE {
            self.out.queue(style::SetAttribute(Attribute::Bold))?;
        }
        self.out.queue(Print(text))?;
        self.out.queue(style::SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}
