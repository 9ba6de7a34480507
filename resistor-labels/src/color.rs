use std::fmt;

/// One stripe of the standard resistor color code.
///
/// The discriminant is the digit (or multiplier exponent) the color encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorBand {
    Black = 0,
    Brown = 1,
    Red = 2,
    Orange = 3,
    Yellow = 4,
    Green = 5,
    Blue = 6,
    Violet = 7,
    Grey = 8,
    White = 9,
}

impl ColorBand {
    /// The full palette, indexed by digit.
    pub const PALETTE: [ColorBand; 10] = [
        ColorBand::Black,
        ColorBand::Brown,
        ColorBand::Red,
        ColorBand::Orange,
        ColorBand::Yellow,
        ColorBand::Green,
        ColorBand::Blue,
        ColorBand::Violet,
        ColorBand::Grey,
        ColorBand::White,
    ];

    /// Color for a digit 0-9, `None` otherwise.
    pub fn from_digit(digit: u32) -> Option<ColorBand> {
        Self::PALETTE.get(digit as usize).copied()
    }

    pub fn digit(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorBand::Black => "black",
            ColorBand::Brown => "brown",
            ColorBand::Red => "red",
            ColorBand::Orange => "orange",
            ColorBand::Yellow => "yellow",
            ColorBand::Green => "green",
            ColorBand::Blue => "blue",
            ColorBand::Violet => "violet",
            ColorBand::Grey => "grey",
            ColorBand::White => "white",
        }
    }

    /// Fill color as RGB components in `0.0..=1.0`.
    ///
    /// Uses the CSS named colors, so brown and violet are the web shades
    /// rather than the darker ones printed on real parts.
    pub fn rgb(self) -> (f32, f32, f32) {
        let (r, g, b): (u8, u8, u8) = match self {
            ColorBand::Black => (0x00, 0x00, 0x00),
            ColorBand::Brown => (0xa5, 0x2a, 0x2a),
            ColorBand::Red => (0xff, 0x00, 0x00),
            ColorBand::Orange => (0xff, 0xa5, 0x00),
            ColorBand::Yellow => (0xff, 0xff, 0x00),
            ColorBand::Green => (0x00, 0x80, 0x00),
            ColorBand::Blue => (0x00, 0x00, 0xff),
            ColorBand::Violet => (0xee, 0x82, 0xee),
            ColorBand::Grey => (0x80, 0x80, 0x80),
            ColorBand::White => (0xff, 0xff, 0xff),
        };
        (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }
}

impl fmt::Display for ColorBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The three bands of a two-significant-digit value: digit 1, digit 2, multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandTriple(pub [ColorBand; 3]);

impl BandTriple {
    /// Bands for `base * 10^decade`, or `None` when `base` is not two digits
    /// or `decade` is past the end of the palette.
    pub fn for_value(base: u32, decade: u32) -> Option<BandTriple> {
        if !(10..100).contains(&base) {
            return None;
        }
        Some(BandTriple([
            ColorBand::from_digit(base / 10)?,
            ColorBand::from_digit(base % 10)?,
            ColorBand::from_digit(decade)?,
        ]))
    }

    pub fn bands(&self) -> [ColorBand; 3] {
        self.0
    }

    /// Bands in the order they are laid down from the right-hand stripe
    /// anchor moving left: multiplier, digit 2, digit 1.
    pub fn drawing_order(&self) -> impl Iterator<Item = ColorBand> + '_ {
        self.0.iter().rev().copied()
    }
}

impl fmt::Display for BandTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{a} {b} {c}")
    }
}
