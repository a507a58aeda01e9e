use crate::color::Rgb;
use crate::geometry::Rect;
use crate::style::TextStyle;
use crate::text::char_width;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub style: TextStyle,
    pub wide_continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            style: TextStyle::new(),
            wide_continuation: false,
        }
    }
}

impl Cell {
    pub fn new(char: char) -> Self {
        Self {
            char,
            ..Default::default()
        }
    }

    pub fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    pub fn with_bg(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        let cells = vec![Cell::default(); (width as usize) * (height as usize)];
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    fn index(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Write a string starting at (x, y), clipped to the buffer edge.
    ///
    /// Wide characters occupy two cells, the second marked as a continuation.
    /// Returns the column after the last written cell.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, fg: Rgb, bg: Rgb, style: TextStyle) -> u16 {
        let mut cx = x;
        for ch in s.chars() {
            let w = char_width(ch).max(1) as u16;
            if cx >= self.width || y >= self.height {
                break;
            }
            self.set(
                cx,
                y,
                Cell {
                    char: ch,
                    fg,
                    bg,
                    style,
                    wide_continuation: false,
                },
            );
            if w > 1 && cx + 1 < self.width {
                self.set(
                    cx + 1,
                    y,
                    Cell {
                        char: ' ',
                        fg,
                        bg,
                        style,
                        wide_continuation: true,
                    },
                );
            }
            cx = cx.saturating_add(w);
        }
        cx
    }

    /// Fill every cell inside `rect` with a space in the given colors.
    pub fn fill(&mut self, rect: Rect, fg: Rgb, bg: Rgb) {
        for y in rect.top()..rect.bottom().min(self.height) {
            for x in rect.left()..rect.right().min(self.width) {
                self.set(
                    x,
                    y,
                    Cell {
                        char: ' ',
                        fg,
                        bg,
                        style: TextStyle::new(),
                        wide_continuation: false,
                    },
                );
            }
        }
    }

    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| {
                let x = (i % self.width as usize) as u16;
                let y = (i / self.width as usize) as u16;
                (x, y, cell)
            })
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::default();
        }
    }

    /// The visible text of one row, trimmed of trailing spaces.
    ///
    /// Intended for tests that assert on rendered output.
    pub fn row_text(&self, y: u16) -> String {
        let mut out = String::new();
        for x in 0..self.width {
            if let Some(cell) = self.get(x, y) {
                if !cell.wide_continuation {
                    out.push(cell.char);
                }
            }
        }
        out.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_str_clips_at_edge() {
        let mut buf = Buffer::new(5, 1);
        let end = buf.put_str(
            0,
            0,
            "hello world",
            Rgb::default(),
            Rgb::default(),
            TextStyle::new(),
        );
        assert_eq!(end, 5);
        assert_eq!(buf.row_text(0), "hello");
    }

    #[test]
    fn wide_chars_mark_continuations() {
        let mut buf = Buffer::new(6, 1);
        buf.put_str(
            0,
            0,
            "日本",
            Rgb::default(),
            Rgb::default(),
            TextStyle::new(),
        );
        assert!(buf.get(1, 0).unwrap().wide_continuation);
        assert!(buf.get(3, 0).unwrap().wide_continuation);
        assert_eq!(buf.row_text(0), "日本");
    }

    #[test]
    fn diff_reports_changed_cells_only() {
        let a = Buffer::new(3, 1);
        let mut b = Buffer::new(3, 1);
        b.set(1, 0, Cell::new('x'));
        let changes: Vec<_> = b.diff(&a).collect();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].0, 1);
        assert_eq!(changes[0].2.char, 'x');
    }
}
