use super::Cell;
use super::Rgb;
use super::TextStyle;
use crate::text::char_width;

/// Pen used when writing text into a [`Buffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
    pub fg: Rgb,
    pub bg: Rgb,
    pub style: TextStyle,
}

impl Pen {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            style: TextStyle::new(),
        }
    }

    pub const fn with_style(mut self, style: TextStyle) -> Self {
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

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    /// Paints a full row with the pen's background.
    pub fn fill_row(&mut self, y: u16, pen: Pen) {
        for x in 0..self.width {
            self.set(
                x,
                y,
                Cell {
                    char: ' ',
                    fg: pen.fg,
                    bg: pen.bg,
                    style: pen.style,
                    wide_continuation: false,
                },
            );
        }
    }

    /// Writes `text` starting at `(x, y)`, clipped at `x + max_width` and the
    /// buffer edge. Returns the number of columns written.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, max_width: u16, pen: Pen) -> u16 {
        let limit = x.saturating_add(max_width).min(self.width);
        let mut col = x;
        for ch in text.chars() {
            let w = char_width(ch) as u16;
            if w == 0 {
                continue;
            }
            if col.saturating_add(w) > limit {
                break;
            }
            self.set(
                col,
                y,
                Cell {
                    char: ch,
                    fg: pen.fg,
                    bg: pen.bg,
                    style: pen.style,
                    wide_continuation: false,
                },
            );
            for extra in 1..w {
                self.set(
                    col + extra,
                    y,
                    Cell {
                        char: ' ',
                        fg: pen.fg,
                        bg: pen.bg,
                        style: pen.style,
                        wide_continuation: true,
                    },
                );
            }
            col += w;
        }
        col - x
    }

    /// Returns the characters of row `y` as a string, skipping wide-char
    /// continuation cells.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| !cell.wide_continuation)
            .map(|cell| cell.char)
            .collect()
    }

    fn index(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
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
}
