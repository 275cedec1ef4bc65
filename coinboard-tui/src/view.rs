//! Paints the board into a terminal buffer.

use coinboard_lib::BoardState;
use coinboard_lib::format::Trend;
use coinboard_lib::table::{COLUMNS, Row};

use crate::input::SearchInput;
use crate::terminal::{Buffer, Cell, Pen, Rgb, TextStyle};
use crate::text::{display_width, pad_left, truncate_to_width};

const BG: Rgb = Rgb::new(0, 0, 0);
const FG: Rgb = Rgb::new(220, 220, 220);
const MUTED: Rgb = Rgb::new(130, 130, 140);
const ACCENT: Rgb = Rgb::new(240, 185, 11);
const BAR_BG: Rgb = Rgb::new(28, 30, 36);
const GREEN: Rgb = Rgb::new(22, 199, 132);
const RED: Rgb = Rgb::new(234, 57, 67);

/// Rows above the table: title, spacer, search, spacer, column header.
const HEADER_ROWS: u16 = 5;
/// Rows below the table: status line.
const FOOTER_ROWS: u16 = 1;

const ICON_WIDTH: usize = 3;
const MIN_NAME_WIDTH: usize = 10;
/// Fixed widths for symbol, price, volume, change and market cap.
const FIXED_WIDTHS: [usize; 5] = [7, 14, 18, 9, 28];

/// Everything the view reads for one frame.
pub struct Frame<'a> {
    pub state: &'a BoardState,
    pub input: &'a SearchInput,
    pub scroll: usize,
    pub source: &'a str,
}

/// Number of table rows that fit in a terminal of `height` rows.
pub fn table_height(height: u16) -> usize {
    height.saturating_sub(HEADER_ROWS + FOOTER_ROWS) as usize
}

pub fn paint(buf: &mut Buffer, frame: &Frame) {
    let height = buf.height();
    if height == 0 {
        return;
    }
    for y in 0..height {
        buf.fill_row(y, Pen::new(FG, BG));
    }

    paint_title(buf, frame.source);
    paint_search(buf, frame.input);

    let widths = column_widths(buf.width() as usize);
    paint_header(buf, &widths);

    let rows = frame.state.rows();
    let visible = table_height(height);
    for (i, row) in rows.iter().skip(frame.scroll).take(visible).enumerate() {
        paint_row(buf, HEADER_ROWS + i as u16, row, &widths);
    }

    paint_status(buf, height - 1, frame.state, frame.scroll, visible);
}

fn paint_title(buf: &mut Buffer, source: &str) {
    let bar = Pen::new(FG, BAR_BG);
    buf.fill_row(0, bar);
    let x = buf.put_str(1, 0, "Coinboard", 9, bar.with_style(TextStyle::bold()));
    let source = format!("  {}", source);
    buf.put_str(1 + x, 0, &source, buf.width(), Pen::new(MUTED, BAR_BG));
}

fn paint_search(buf: &mut Buffer, input: &SearchInput) {
    let label = Pen::new(MUTED, BG);
    let x = buf.put_str(1, 2, "Search: ", 8, label);
    let start = 1 + x;
    let field = Pen::new(FG, BAR_BG);
    for col in start..buf.width().saturating_sub(1) {
        buf.set(
            col,
            2,
            Cell {
                bg: BAR_BG,
                ..Cell::default()
            },
        );
    }
    buf.put_str(start, 2, input.text(), buf.width(), field);

    // Block cursor
    let typed = u16::try_from(display_width(input.before_cursor())).unwrap_or(u16::MAX);
    let cursor_x = start.saturating_add(typed);
    let under = input.text()[input.cursor()..].chars().next().unwrap_or(' ');
    buf.put_str(cursor_x, 2, &under.to_string(), 2, Pen::new(BAR_BG, ACCENT));
}

/// Widths of the seven columns; the name column takes what is left.
fn column_widths(total: usize) -> [usize; 7] {
    let fixed: usize = ICON_WIDTH + FIXED_WIDTHS.iter().sum::<usize>() + COLUMNS.len() + 1;
    let name = total.saturating_sub(fixed).max(MIN_NAME_WIDTH);
    let [symbol, price, volume, change, cap] = FIXED_WIDTHS;
    [ICON_WIDTH, name, symbol, price, volume, change, cap]
}

fn paint_header(buf: &mut Buffer, widths: &[usize; 7]) {
    let pen = Pen::new(ACCENT, BG).with_style(TextStyle::bold());
    let mut x = 1u16;
    for (i, title) in COLUMNS.iter().enumerate() {
        let text = if i >= 3 {
            pad_left(title, widths[i])
        } else {
            truncate_to_width(title, widths[i])
        };
        buf.put_str(x, HEADER_ROWS - 1, &text, widths[i] as u16, pen);
        x += widths[i] as u16 + 1;
    }
}

/// The icon cell shows the first letter of its alt text.
fn icon_glyph(alt: &str) -> String {
    match alt.chars().next() {
        Some(c) => format!("[{}]", c.to_uppercase()),
        None => "[ ]".to_string(),
    }
}

fn paint_row(buf: &mut Buffer, y: u16, row: &Row, widths: &[usize; 7]) {
    let plain = Pen::new(FG, BG);
    let trend = match row.change.trend() {
        Trend::Up => Pen::new(GREEN, BG),
        Trend::Down => Pen::new(RED, BG),
    };

    let cells = row.cells();
    let mut x = 1u16;
    for (i, cell) in cells.iter().enumerate() {
        let (text, pen) = match i {
            0 => (icon_glyph(cell), Pen::new(ACCENT, BG)),
            1 => (truncate_to_width(cell, widths[i]), plain.with_style(TextStyle::bold())),
            2 => (truncate_to_width(cell, widths[i]), Pen::new(MUTED, BG)),
            5 => (pad_left(cell, widths[i]), trend),
            _ => (pad_left(cell, widths[i]), plain),
        };
        buf.put_str(x, y, &text, widths[i] as u16, pen);
        x += widths[i] as u16 + 1;
    }
}

fn paint_status(buf: &mut Buffer, y: u16, state: &BoardState, scroll: usize, visible: usize) {
    let bar = Pen::new(MUTED, BAR_BG);
    buf.fill_row(y, bar);

    let total = state.rows().len();
    let mut status = if state.is_loading() {
        "Loading…".to_string()
    } else if total == 0 {
        "No coins".to_string()
    } else {
        let last = (scroll + visible).min(total);
        format!("{}-{} of {} coins", scroll + 1, last, total)
    };
    if !state.applied_query().is_empty() {
        status.push_str(&format!("  ·  \"{}\"", state.applied_query()));
    }
    if let Some(key) = state.sort() {
        status.push_str(&format!("  ·  sorted by {}", key));
    }

    let mut x = 1 + buf.put_str(1, y, &status, buf.width(), bar);
    if let Some(err) = state.last_error() {
        x += buf.put_str(x + 2, y, err, buf.width(), Pen::new(RED, BAR_BG)) + 2;
    }

    let hints = "Enter search  F2 mkt cap  F3 24h %  Esc quit";
    let hint_width = display_width(hints) as u16;
    if buf.width() > x + hint_width + 2 {
        buf.put_str(buf.width() - hint_width - 1, y, hints, hint_width, bar);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinboard_lib::{CryptoRecord, FetchError};

    fn loaded_state() -> BoardState {
        let mut state = BoardState::new();
        let request = state.begin_request();
        let _ = state.apply_loaded(
            &request,
            vec![
                CryptoRecord::new("Bitcoin", "btc")
                    .with_price(64123.51)
                    .with_market_cap(1262000000000.0)
                    .with_change(-1.234),
                CryptoRecord::new("Ethereum", "eth")
                    .with_price(3100.0)
                    .with_market_cap(372000000000.0)
                    .with_change(2.5),
            ],
        );
        state
    }

    fn render(state: &BoardState, input: &SearchInput, width: u16, height: u16) -> Buffer {
        let mut buf = Buffer::new(width, height);
        paint(
            &mut buf,
            &Frame {
                state,
                input,
                scroll: 0,
                source: "file data.json",
            },
        );
        buf
    }

    #[test]
    fn test_rows_are_painted() {
        let state = loaded_state();
        let buf = render(&state, &SearchInput::new(), 140, 12);

        assert!(buf.row_text(0).contains("Coinboard"));
        assert!(buf.row_text(0).contains("file data.json"));
        assert!(buf.row_text(4).contains("Market Cap"));

        let btc = buf.row_text(5);
        assert!(btc.contains("[B]"));
        assert!(btc.contains("Bitcoin"));
        assert!(btc.contains("BTC"));
        assert!(btc.contains("$64,124"));
        assert!(btc.contains("-1.23%"));
        assert!(btc.contains("Mkt Cap: $1,262,000,000,000"));
        assert!(buf.row_text(6).contains("Ethereum"));
        assert!(buf.row_text(11).contains("1-2 of 2 coins"));
    }

    #[test]
    fn test_change_colour_follows_sign() {
        let state = loaded_state();
        let buf = render(&state, &SearchInput::new(), 140, 12);

        let find = |y: u16, needle: char| {
            (0..buf.width())
                .rev()
                .find(|&x| buf.get(x, y).map(|c| c.char) == Some(needle))
                .and_then(|x| buf.get(x, y))
                .copied()
        };
        // The last '%' on each row belongs to the change column
        assert_eq!(find(5, '%').unwrap().fg, RED);
        assert_eq!(find(6, '%').unwrap().fg, GREEN);
    }

    #[test]
    fn test_error_and_sort_in_status() {
        let mut state = loaded_state();
        let _ = state.sort_by_market_cap_descending();
        let request = state.begin_request();
        let _ = state.apply_failed(&request, &FetchError::http(404, "http://x/data.json"));

        let buf = render(&state, &SearchInput::new(), 160, 10);
        let status = buf.row_text(9);
        assert!(status.contains("sorted by market cap"));
        assert!(status.contains("HTTP 404"));
    }

    #[test]
    fn test_search_text_is_painted() {
        let state = BoardState::new();
        let mut input = SearchInput::new();
        for c in "sol".chars() {
            input.handle_key(crossterm::event::KeyEvent::new(
                crossterm::event::KeyCode::Char(c),
                crossterm::event::KeyModifiers::NONE,
            ));
        }
        let buf = render(&state, &input, 80, 8);
        assert!(buf.row_text(2).contains("Search: sol"));
        assert!(buf.row_text(7).contains("No coins"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let state = loaded_state();
        for (w, h) in [(0, 0), (1, 1), (10, 3), (20, 6)] {
            render(&state, &SearchInput::new(), w, h);
        }
    }

    #[test]
    fn test_query_wider_than_u16_does_not_panic() {
        let state = BoardState::new();
        let mut input = SearchInput::new();
        for _ in 0..70_000 {
            input.handle_key(crossterm::event::KeyEvent::new(
                crossterm::event::KeyCode::Char('x'),
                crossterm::event::KeyModifiers::NONE,
            ));
        }
        let buf = render(&state, &input, 80, 8);
        assert!(buf.row_text(2).contains("Search: xxx"));
    }

    #[test]
    fn test_table_height() {
        assert_eq!(table_height(24), 18);
        assert_eq!(table_height(3), 0);
    }
}
