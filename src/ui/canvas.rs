//! Bounds-checked text surface over a ratatui buffer
//!
//! Every write is clipped to the buffer area. A write that starts outside the
//! area is silently dropped, so callers never have to guard positions.

use ratatui::{buffer::Buffer, layout::Rect, style::Style};

use super::palette::Palette;
use super::panel::PanelWrite;

/// A grid of rows and columns addressed from the top-left of `area`
pub struct Canvas<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl<'a> Canvas<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        let area = area.intersection(buf.area);
        Self { buf, area }
    }

    /// (rows, cols)
    pub fn dimensions(&self) -> (u16, u16) {
        (self.area.height, self.area.width)
    }

    /// Writes `text` at (row, col), clipped at the right edge; a no-op when
    /// the position is outside the grid.
    pub fn write(&mut self, row: u16, col: u16, text: &str, style: Style) {
        if row >= self.area.height || col >= self.area.width {
            return;
        }
        let available = usize::from(self.area.width - col);
        self.buf.set_stringn(
            self.area.x + col,
            self.area.y + row,
            text,
            available,
            style,
        );
    }

    pub fn clear(&mut self) {
        let area = self.area;
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = self.buf.cell_mut((x, y)) {
                    cell.reset();
                }
            }
        }
    }

    /// Applies a laid-out panel in order
    pub fn paint(&mut self, writes: &[PanelWrite], palette: Palette) {
        for w in writes {
            self.write(w.row, w.col, &w.text, palette.style(w.tone));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::palette::Tone;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).map_or(" ", |c| c.symbol()).to_string())
            .collect()
    }

    #[test]
    fn test_write_inside_bounds() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 2));
        let area = buf.area;
        let mut canvas = Canvas::new(&mut buf, area);
        canvas.write(1, 2, "hi", Style::default());
        assert_eq!(row_text(&buf, 1), "  hi      ");
    }

    #[test]
    fn test_write_clips_at_right_edge() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 1));
        let area = buf.area;
        let mut canvas = Canvas::new(&mut buf, area);
        canvas.write(0, 3, "weather", Style::default());
        assert_eq!(row_text(&buf, 0), "   wea");
    }

    #[test]
    fn test_out_of_bounds_writes_are_ignored() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 2));
        let area = buf.area;
        let mut canvas = Canvas::new(&mut buf, area);
        canvas.write(2, 0, "nope", Style::default());
        canvas.write(0, 4, "nope", Style::default());
        canvas.write(u16::MAX, u16::MAX, "nope", Style::default());
        assert_eq!(row_text(&buf, 0), "    ");
        assert_eq!(row_text(&buf, 1), "    ");
    }

    #[test]
    fn test_zero_sized_area() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 0, 0));
        let area = buf.area;
        let mut canvas = Canvas::new(&mut buf, area);
        assert_eq!(canvas.dimensions(), (0, 0));
        canvas.write(0, 0, "x", Style::default());
    }

    #[test]
    fn test_clear_and_paint() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 1));
        let area = buf.area;
        let mut canvas = Canvas::new(&mut buf, area);
        canvas.write(0, 0, "stale", Style::default());
        canvas.clear();
        canvas.paint(
            &[PanelWrite {
                row: 0,
                col: 1,
                text: "ok".to_string(),
                tone: Tone::Value,
            }],
            Palette::monochrome(),
        );
        assert_eq!(row_text(&buf, 0), " ok  ");
    }
}
