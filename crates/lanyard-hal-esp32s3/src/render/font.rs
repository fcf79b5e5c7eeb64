//! Scaled 5x7 pixel font shared by both badge typefaces.
//!
//! Scale is in hundredths; one glyph column maps to
//! `max(1, round(scale * 2 / 100))` pixels, so scale 100 renders a
//! 10x14 glyph cell and scale 200 doubles it.

use uc8151::FrameBuffer;

/// Glyph columns per character cell, including the inter-glyph gap.
pub const CELL_COLS: u32 = 6;
/// Glyph rows.
pub const GLYPH_ROWS: u32 = 7;

/// Pixel size of one glyph column/row at `scale` hundredths.
pub fn cell_px(scale: u16) -> u32 {
    let px = (scale as u32 * 2 + 50) / 100;
    px.max(1)
}

/// Rendered width of `text` at `scale`, without the trailing gap.
pub fn text_width(text: &str, scale: u16) -> u32 {
    let chars = text.chars().count() as u32;
    if chars == 0 {
        0
    } else {
        let cell = cell_px(scale);
        chars * CELL_COLS * cell - cell
    }
}

/// Vertical advance between wrapped lines at `scale`.
pub fn line_height(scale: u16) -> u32 {
    (GLYPH_ROWS + 1) * cell_px(scale)
}

/// Draws `text` with its top-left corner at `(x, y)`. Pixels outside
/// the frame clip silently.
pub fn draw_text(frame: &mut FrameBuffer, x: i32, y: i32, text: &str, scale: u16, ink: bool) {
    let cell = cell_px(scale) as i32;
    let mut cursor_x = x;

    for c in text.chars() {
        draw_glyph(frame, cursor_x, y, &glyph_columns(normalize_char(c)), cell, ink);
        cursor_x += CELL_COLS as i32 * cell;
    }
}

fn draw_glyph(frame: &mut FrameBuffer, x: i32, y: i32, columns: &[u8; 5], cell: i32, ink: bool) {
    for (col, bits) in columns.iter().enumerate() {
        for row in 0..GLYPH_ROWS as i32 {
            if (bits & (1 << row)) != 0 {
                fill_cell(frame, x + col as i32 * cell, y + row * cell, cell, ink);
            }
        }
    }
}

fn fill_cell(frame: &mut FrameBuffer, x: i32, y: i32, cell: i32, ink: bool) {
    for dy in 0..cell {
        for dx in 0..cell {
            let px = x + dx;
            let py = y + dy;
            if px >= 0 && py >= 0 {
                let _ = frame.set_pixel(px as usize, py as usize, ink);
            }
        }
    }
}

/// Folds accented and typographic characters onto the glyph set.
pub fn normalize_char(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' | 'ã' => 'a',
        'Á' | 'À' | 'Ä' | 'Â' | 'Ã' => 'A',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'É' | 'È' | 'Ë' | 'Ê' => 'E',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'Í' | 'Ì' | 'Ï' | 'Î' => 'I',
        'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
        'Ó' | 'Ò' | 'Ö' | 'Ô' | 'Õ' => 'O',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'Ú' | 'Ù' | 'Ü' | 'Û' => 'U',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ç' => 'c',
        'Ç' => 'C',
        '\'' | '’' | '‘' => '\'',
        '"' | '“' | '”' => '"',
        '-' | '‐' | '–' | '—' => '-',
        '…' => '.',
        _ => c,
    }
}

/// Column bitmaps, bit 0 at the glyph top.
pub fn glyph_columns(c: char) -> [u8; 5] {
    match c {
        'A' => [0x7E, 0x11, 0x11, 0x11, 0x7E],
        'B' => [0x7F, 0x49, 0x49, 0x49, 0x36],
        'C' => [0x3E, 0x41, 0x41, 0x41, 0x22],
        'D' => [0x7F, 0x41, 0x41, 0x22, 0x1C],
        'E' => [0x7F, 0x49, 0x49, 0x49, 0x41],
        'F' => [0x7F, 0x09, 0x09, 0x09, 0x01],
        'G' => [0x3E, 0x41, 0x49, 0x49, 0x7A],
        'H' => [0x7F, 0x08, 0x08, 0x08, 0x7F],
        'I' => [0x00, 0x41, 0x7F, 0x41, 0x00],
        'J' => [0x20, 0x40, 0x41, 0x3F, 0x01],
        'K' => [0x7F, 0x08, 0x14, 0x22, 0x41],
        'L' => [0x7F, 0x40, 0x40, 0x40, 0x40],
        'M' => [0x7F, 0x02, 0x0C, 0x02, 0x7F],
        'N' => [0x7F, 0x04, 0x08, 0x10, 0x7F],
        'O' => [0x3E, 0x41, 0x41, 0x41, 0x3E],
        'P' => [0x7F, 0x09, 0x09, 0x09, 0x06],
        'Q' => [0x3E, 0x41, 0x51, 0x21, 0x5E],
        'R' => [0x7F, 0x09, 0x19, 0x29, 0x46],
        'S' => [0x46, 0x49, 0x49, 0x49, 0x31],
        'T' => [0x01, 0x01, 0x7F, 0x01, 0x01],
        'U' => [0x3F, 0x40, 0x40, 0x40, 0x3F],
        'V' => [0x1F, 0x20, 0x40, 0x20, 0x1F],
        'W' => [0x7F, 0x20, 0x18, 0x20, 0x7F],
        'X' => [0x63, 0x14, 0x08, 0x14, 0x63],
        'Y' => [0x03, 0x04, 0x78, 0x04, 0x03],
        'Z' => [0x61, 0x51, 0x49, 0x45, 0x43],
        'a' => [0x20, 0x54, 0x54, 0x54, 0x78],
        'b' => [0x7F, 0x48, 0x44, 0x44, 0x38],
        'c' => [0x38, 0x44, 0x44, 0x44, 0x20],
        'd' => [0x38, 0x44, 0x44, 0x48, 0x7F],
        'e' => [0x38, 0x54, 0x54, 0x54, 0x18],
        'f' => [0x08, 0x7E, 0x09, 0x01, 0x02],
        'g' => [0x08, 0x14, 0x54, 0x54, 0x3C],
        'h' => [0x7F, 0x08, 0x04, 0x04, 0x78],
        'i' => [0x00, 0x44, 0x7D, 0x40, 0x00],
        'j' => [0x20, 0x40, 0x44, 0x3D, 0x00],
        'k' => [0x7F, 0x10, 0x28, 0x44, 0x00],
        'l' => [0x00, 0x41, 0x7F, 0x40, 0x00],
        'm' => [0x7C, 0x04, 0x18, 0x04, 0x78],
        'n' => [0x7C, 0x08, 0x04, 0x04, 0x78],
        'o' => [0x38, 0x44, 0x44, 0x44, 0x38],
        'p' => [0x7C, 0x14, 0x14, 0x14, 0x08],
        'q' => [0x08, 0x14, 0x14, 0x18, 0x7C],
        'r' => [0x7C, 0x08, 0x04, 0x04, 0x08],
        's' => [0x48, 0x54, 0x54, 0x54, 0x20],
        't' => [0x04, 0x3F, 0x44, 0x40, 0x20],
        'u' => [0x3C, 0x40, 0x40, 0x20, 0x7C],
        'v' => [0x1C, 0x20, 0x40, 0x20, 0x1C],
        'w' => [0x3C, 0x40, 0x30, 0x40, 0x3C],
        'x' => [0x44, 0x28, 0x10, 0x28, 0x44],
        'y' => [0x0C, 0x50, 0x50, 0x50, 0x3C],
        'z' => [0x44, 0x64, 0x54, 0x4C, 0x44],
        '0' => [0x3E, 0x51, 0x49, 0x45, 0x3E],
        '1' => [0x00, 0x42, 0x7F, 0x40, 0x00],
        '2' => [0x42, 0x61, 0x51, 0x49, 0x46],
        '3' => [0x21, 0x41, 0x45, 0x4B, 0x31],
        '4' => [0x18, 0x14, 0x12, 0x7F, 0x10],
        '5' => [0x27, 0x45, 0x45, 0x45, 0x39],
        '6' => [0x3C, 0x4A, 0x49, 0x49, 0x30],
        '7' => [0x01, 0x71, 0x09, 0x05, 0x03],
        '8' => [0x36, 0x49, 0x49, 0x49, 0x36],
        '9' => [0x06, 0x49, 0x49, 0x29, 0x1E],
        '.' => [0x00, 0x60, 0x60, 0x00, 0x00],
        ',' => [0x00, 0x80, 0x60, 0x00, 0x00],
        ':' => [0x00, 0x36, 0x36, 0x00, 0x00],
        ';' => [0x00, 0x80, 0x66, 0x00, 0x00],
        '!' => [0x00, 0x00, 0x5F, 0x00, 0x00],
        '?' => [0x02, 0x01, 0x51, 0x09, 0x06],
        '\'' => [0x00, 0x05, 0x03, 0x00, 0x00],
        '"' => [0x00, 0x07, 0x00, 0x07, 0x00],
        '&' => [0x36, 0x49, 0x55, 0x22, 0x50],
        '@' => [0x32, 0x49, 0x79, 0x41, 0x3E],
        '#' => [0x14, 0x7F, 0x14, 0x7F, 0x14],
        '+' => [0x08, 0x08, 0x3E, 0x08, 0x08],
        '-' => [0x08, 0x08, 0x08, 0x08, 0x08],
        '_' => [0x40, 0x40, 0x40, 0x40, 0x40],
        '/' => [0x20, 0x10, 0x08, 0x04, 0x02],
        '(' => [0x00, 0x1C, 0x22, 0x41, 0x00],
        ')' => [0x00, 0x41, 0x22, 0x1C, 0x00],
        '[' => [0x00, 0x7F, 0x41, 0x41, 0x00],
        ']' => [0x00, 0x41, 0x41, 0x7F, 0x00],
        '<' => [0x08, 0x14, 0x22, 0x41, 0x00],
        '>' => [0x00, 0x41, 0x22, 0x14, 0x08],
        ' ' => [0x00, 0x00, 0x00, 0x00, 0x00],
        _ => [0x00, 0x00, 0x5F, 0x00, 0x00],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_size_clamps_at_one_pixel() {
        assert_eq!(cell_px(10), 1);
        assert_eq!(cell_px(50), 1);
        assert_eq!(cell_px(100), 2);
        assert_eq!(cell_px(200), 4);
    }

    #[test]
    fn width_drops_the_trailing_gap() {
        assert_eq!(text_width("", 100), 0);
        assert_eq!(text_width("a", 100), 10);
        assert_eq!(text_width("ab", 100), 22);
    }

    #[test]
    fn width_is_monotone_in_scale() {
        let text = "Fernandez";
        let mut last = 0;
        for scale in (10u16..=200).step_by(10) {
            let width = text_width(text, scale);
            assert!(width >= last);
            last = width;
        }
    }

    #[test]
    fn accented_characters_fold_onto_base_glyphs() {
        assert_eq!(glyph_columns(normalize_char('é')), glyph_columns('e'));
        assert_eq!(glyph_columns(normalize_char('Ñ')), glyph_columns('N'));
    }

    #[test]
    fn drawing_inks_pixels_inside_the_glyph_cell() {
        let mut frame = FrameBuffer::new();
        draw_text(&mut frame, 4, 4, "I", 100, true);

        let inked = (0..uc8151::protocol::WIDTH)
            .flat_map(|x| (0..uc8151::protocol::HEIGHT).map(move |y| (x, y)))
            .filter(|&(x, y)| frame.pixel(x, y) == Some(true))
            .count();
        assert!(inked > 0);
    }

    #[test]
    fn negative_origins_clip_instead_of_wrapping() {
        let mut frame = FrameBuffer::new();
        draw_text(&mut frame, -40, -40, "W", 200, true);
        assert!(frame.bytes().iter().all(|b| *b == 0xFF));
    }
}
