//! Block-digit font for the tally balance display.
//!
//! Glyphs are drawn on a 3x5 pixel grid and every pixel is printed as two
//! terminal cells, which keeps the digits roughly square in most terminals.

/// Height of the rendered art in lines.
pub const ART_HEIGHT: usize = 5;

/// Terminal cells per glyph pixel.
const PIXEL: &str = "██";
const BLANK: &str = "  ";

/// A glyph: pixel width plus one bit row per line, most significant bit left.
#[derive(Debug, Clone, Copy)]
struct Glyph {
    width: u32,
    rows: [u8; ART_HEIGHT],
}

const DIGITS: [Glyph; 10] = [
    Glyph { width: 3, rows: [0b111, 0b101, 0b101, 0b101, 0b111] },
    Glyph { width: 3, rows: [0b010, 0b110, 0b010, 0b010, 0b111] },
    Glyph { width: 3, rows: [0b111, 0b001, 0b111, 0b100, 0b111] },
    Glyph { width: 3, rows: [0b111, 0b001, 0b011, 0b001, 0b111] },
    Glyph { width: 3, rows: [0b101, 0b101, 0b111, 0b001, 0b001] },
    Glyph { width: 3, rows: [0b111, 0b100, 0b111, 0b001, 0b111] },
    Glyph { width: 3, rows: [0b111, 0b100, 0b111, 0b101, 0b111] },
    Glyph { width: 3, rows: [0b111, 0b001, 0b001, 0b001, 0b001] },
    Glyph { width: 3, rows: [0b111, 0b101, 0b111, 0b101, 0b111] },
    Glyph { width: 3, rows: [0b111, 0b101, 0b111, 0b001, 0b111] },
];

const DOT: Glyph = Glyph { width: 1, rows: [0, 0, 0, 0, 1] };
const COMMA: Glyph = Glyph { width: 1, rows: [0, 0, 0, 1, 1] };
const MINUS: Glyph = Glyph { width: 3, rows: [0, 0, 0b111, 0, 0] };

fn glyph(ch: char) -> Option<Glyph> {
    match ch {
        '0'..='9' => ch.to_digit(10).map(|d| DIGITS[d as usize]),
        '.' => Some(DOT),
        ',' => Some(COMMA),
        '-' => Some(MINUS),
        _ => None,
    }
}

/// Build block art for an amount such as `"2,550.50"`.
///
/// Supports digits, `.`, `,` and `-`; other characters are skipped. Glyphs
/// are separated by one blank column.
///
/// # Returns
/// [`ART_HEIGHT`] lines of equal width (empty lines for empty input).
pub fn build_amount_art(text: &str) -> Vec<String> {
    let glyphs: Vec<Glyph> = text.chars().filter_map(glyph).collect();
    let mut lines = vec![String::new(); ART_HEIGHT];

    for (row, line) in lines.iter_mut().enumerate() {
        for (i, g) in glyphs.iter().enumerate() {
            if i > 0 {
                line.push(' ');
            }
            for bit in (0..g.width).rev() {
                let lit = (g.rows[row] >> bit) & 1 == 1;
                line.push_str(if lit { PIXEL } else { BLANK });
            }
        }
    }

    lines
}

/// Insert `,` between thousands in the integer part of a formatted amount.
///
/// `"-1234567.00"` becomes `"-1,234,567.00"`.
pub fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (integer, fraction) = match unsigned.find('.') {
        Some(idx) => unsigned.split_at(idx),
        None => (unsigned, ""),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped.push_str(fraction);
    grouped
}
