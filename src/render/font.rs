// ── 3x5 bitmap glyphs ───────────────────────────────────────────────────────

/// Five rows of three dots each, most significant bit on the left.
type Glyph = [u8; 5];

#[rustfmt::skip]
const DIGITS: [Glyph; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b011, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b010, 0b010, 0b010], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
];

#[rustfmt::skip]
const LETTERS: [Glyph; 26] = [
    [0b010, 0b101, 0b111, 0b101, 0b101], // A
    [0b110, 0b101, 0b110, 0b101, 0b110], // B
    [0b011, 0b100, 0b100, 0b100, 0b011], // C
    [0b110, 0b101, 0b101, 0b101, 0b110], // D
    [0b111, 0b100, 0b110, 0b100, 0b111], // E
    [0b111, 0b100, 0b110, 0b100, 0b100], // F
    [0b011, 0b100, 0b101, 0b101, 0b011], // G
    [0b101, 0b101, 0b111, 0b101, 0b101], // H
    [0b111, 0b010, 0b010, 0b010, 0b111], // I
    [0b001, 0b001, 0b001, 0b101, 0b010], // J
    [0b101, 0b101, 0b110, 0b101, 0b101], // K
    [0b100, 0b100, 0b100, 0b100, 0b111], // L
    [0b101, 0b111, 0b111, 0b101, 0b101], // M
    [0b110, 0b101, 0b101, 0b101, 0b101], // N
    [0b010, 0b101, 0b101, 0b101, 0b010], // O
    [0b110, 0b101, 0b110, 0b100, 0b100], // P
    [0b010, 0b101, 0b101, 0b110, 0b011], // Q
    [0b110, 0b101, 0b110, 0b101, 0b101], // R
    [0b011, 0b100, 0b010, 0b001, 0b110], // S
    [0b111, 0b010, 0b010, 0b010, 0b010], // T
    [0b101, 0b101, 0b101, 0b101, 0b111], // U
    [0b101, 0b101, 0b101, 0b101, 0b010], // V
    [0b101, 0b101, 0b111, 0b111, 0b101], // W
    [0b101, 0b101, 0b010, 0b101, 0b101], // X
    [0b101, 0b101, 0b010, 0b010, 0b010], // Y
    [0b111, 0b001, 0b010, 0b100, 0b111], // Z
];

const UNKNOWN: Glyph = [0b111, 0b001, 0b011, 0b000, 0b010];

#[rustfmt::skip]
pub fn glyph(ch: char) -> Glyph {
    match ch.to_ascii_uppercase() {
        d @ '0'..='9' => DIGITS[d as usize - '0' as usize],
        l @ 'A'..='Z' => LETTERS[l as usize - 'A' as usize],
        ' '  => [0b000, 0b000, 0b000, 0b000, 0b000],
        ':'  => [0b000, 0b010, 0b000, 0b010, 0b000],
        '.'  => [0b000, 0b000, 0b000, 0b000, 0b010],
        ','  => [0b000, 0b000, 0b000, 0b010, 0b100],
        '-'  => [0b000, 0b000, 0b111, 0b000, 0b000],
        '+'  => [0b000, 0b010, 0b111, 0b010, 0b000],
        '='  => [0b000, 0b111, 0b000, 0b111, 0b000],
        '!'  => [0b010, 0b010, 0b010, 0b000, 0b010],
        '/'  => [0b001, 0b001, 0b010, 0b100, 0b100],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        '('  => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')'  => [0b100, 0b010, 0b010, 0b010, 0b100],
        '<'  => [0b001, 0b010, 0b100, 0b010, 0b001],
        '>'  => [0b100, 0b010, 0b001, 0b010, 0b100],
        '#'  => [0b101, 0b111, 0b101, 0b111, 0b101],
        '%'  => [0b101, 0b001, 0b010, 0b100, 0b101],
        _ => UNKNOWN,
    }
}

// ── Fonts ───────────────────────────────────────────────────────────────────

/// The built-in glyph set at an integer dot scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    scale: u32,
}

impl Font {
    pub fn system(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
        }
    }

    /// Same face at a different size.
    pub fn sized(self, scale: u32) -> Self {
        Self::system(scale)
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Dots from one glyph origin to the next.
    pub fn advance(&self) -> u32 {
        4 * self.scale
    }

    pub fn line_height(&self) -> u32 {
        5 * self.scale
    }
}
