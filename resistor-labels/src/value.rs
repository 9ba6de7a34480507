use std::fmt;

use crate::error::ConfigError;

/// Significant digits shown on a label.
pub const LABEL_PRECISION: usize = 5;

/// Unit prefix chosen by magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Ohm,
    Kiloohm,
    Megaohm,
}

impl Unit {
    /// Pick the unit for a value in ohms.
    pub fn for_ohms(ohms: u64) -> Unit {
        match ohms {
            0..=999 => Unit::Ohm,
            1_000..=999_999 => Unit::Kiloohm,
            _ => Unit::Megaohm,
        }
    }

    /// Ohms per one of this unit.
    pub fn scale(self) -> u64 {
        match self {
            Unit::Ohm => 1,
            Unit::Kiloohm => 1_000,
            Unit::Megaohm => 1_000_000,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Ohm => "\u{2126}",
            Unit::Kiloohm => "K\u{2126}",
            Unit::Megaohm => "M\u{2126}",
        }
    }

    /// Spelled-out suffix for fonts without an ohm glyph.
    pub fn ascii_suffix(self) -> &'static str {
        match self {
            Unit::Ohm => "Ohm",
            Unit::Kiloohm => "KOhm",
            Unit::Megaohm => "MOhm",
        }
    }
}

/// A resistance of `base * 10^decade` ohms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResistorValue {
    pub base: u32,
    pub decade: u32,
    ohms: u64,
}

impl ResistorValue {
    /// Returns `None` if the value does not fit in a `u64`.
    pub fn new(base: u32, decade: u32) -> Option<ResistorValue> {
        let ohms = 10u64.checked_pow(decade)?.checked_mul(u64::from(base))?;
        Some(ResistorValue { base, decade, ohms })
    }

    pub fn ohms(&self) -> u64 {
        self.ohms
    }

    pub fn unit(&self) -> Unit {
        Unit::for_ohms(self.ohms)
    }

    /// The value expressed in [`Self::unit`].
    pub fn magnitude(&self) -> f64 {
        let unit = self.unit();
        if unit == Unit::Ohm {
            self.ohms as f64
        } else {
            self.ohms as f64 / unit.scale() as f64
        }
    }

    /// Label text with the ASCII unit suffix, e.g. `4.7 KOhm`.
    pub fn ascii_text(&self) -> String {
        format!(
            "{} {}",
            format_general(self.magnitude(), LABEL_PRECISION),
            self.unit().ascii_suffix()
        )
    }
}

impl fmt::Display for ResistorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            format_general(self.magnitude(), LABEL_PRECISION),
            self.unit().suffix()
        )
    }
}

/// Format `x` with at most `precision` significant digits, in the style of
/// printf's `%g`: trailing zeros are dropped, and scientific notation is used
/// when the decimal exponent is below -4 or not less than `precision`.
pub fn format_general(x: f64, precision: usize) -> String {
    let precision = precision.max(1);
    if x == 0.0 {
        return "0".to_string();
    }
    if !x.is_finite() {
        return x.to_string();
    }

    // Round to the requested significant digits first; the exponent of the
    // rounded value decides the notation.
    let sci = format!("{:.*e}", precision - 1, x);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= precision as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    } else {
        let decimals = (precision as i32 - 1 - exp) as usize;
        trim_fraction(&format!("{:.*}", decimals, x)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Parse a resistance such as `470`, `4.7K`, `1M` or `2.2kΩ` into whole ohms.
pub fn parse_ohms(s: &str) -> Result<u64, ConfigError> {
    let invalid = || ConfigError::InvalidResistance(s.to_string());

    let trimmed = s.trim();
    let trimmed = trimmed
        .strip_suffix('\u{2126}')
        .or_else(|| trimmed.strip_suffix("ohm"))
        .or_else(|| trimmed.strip_suffix("Ohm"))
        .unwrap_or(trimmed)
        .trim_end();

    let (number, scale) = match trimmed.chars().last() {
        Some('k' | 'K') => (&trimmed[..trimmed.len() - 1], 1e3),
        Some('M') => (&trimmed[..trimmed.len() - 1], 1e6),
        _ => (trimmed, 1.0),
    };

    let mantissa: f64 = number.trim().parse().map_err(|_| invalid())?;
    let ohms = mantissa * scale;
    if !ohms.is_finite() || ohms < 0.0 || ohms > u64::MAX as f64 {
        return Err(invalid());
    }
    let rounded = ohms.round();
    if (ohms - rounded).abs() > 1e-6 {
        return Err(invalid());
    }
    Ok(rounded as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(base: u32, decade: u32) -> String {
        ResistorValue::new(base, decade).unwrap().to_string()
    }

    #[test]
    fn below_one_thousand_is_plain_ohms() {
        for (base, decade) in [(10, 0), (82, 0), (10, 1), (99, 1)] {
            let v = ResistorValue::new(base, decade).unwrap();
            assert_eq!(v.unit(), Unit::Ohm);
            assert_eq!(v.magnitude(), v.ohms() as f64);
        }
        assert_eq!(text(10, 0), "10 \u{2126}");
        assert_eq!(text(47, 1), "470 \u{2126}");
    }

    #[test]
    fn thousands_are_kiloohms() {
        for (base, decade) in [(10, 2), (12, 2), (68, 3), (82, 4)] {
            let v = ResistorValue::new(base, decade).unwrap();
            assert_eq!(v.unit(), Unit::Kiloohm);
            assert_eq!(v.magnitude(), v.ohms() as f64 / 1000.0);
        }
        assert_eq!(text(12, 2), "1.2 K\u{2126}");
        assert_eq!(text(47, 3), "47 K\u{2126}");
        assert_eq!(text(82, 4), "820 K\u{2126}");
    }

    #[test]
    fn millions_are_megaohms() {
        for (base, decade) in [(10, 5), (22, 5), (47, 6), (10, 9)] {
            let v = ResistorValue::new(base, decade).unwrap();
            assert_eq!(v.unit(), Unit::Megaohm);
            assert_eq!(v.magnitude(), v.ohms() as f64 / 1e6);
        }
        assert_eq!(text(10, 5), "1 M\u{2126}");
        assert_eq!(text(47, 6), "47 M\u{2126}");
    }

    #[test]
    fn huge_magnitudes_switch_to_exponent() {
        assert_eq!(text(10, 10), "1e+05 M\u{2126}");
        assert_eq!(text(15, 10), "1.5e+05 M\u{2126}");
    }

    #[test]
    fn ascii_text_spells_unit() {
        let v = ResistorValue::new(33, 2).unwrap();
        assert_eq!(v.ascii_text(), "3.3 KOhm");
    }

    #[test]
    fn overflow_is_none() {
        assert!(ResistorValue::new(10, 19).is_none());
        assert!(ResistorValue::new(99, 18).is_none());
        assert!(ResistorValue::new(18, 18).is_some());
    }

    #[test]
    fn general_format_matches_printf() {
        assert_eq!(format_general(10.0, 5), "10");
        assert_eq!(format_general(1.2, 5), "1.2");
        assert_eq!(format_general(820.0, 5), "820");
        assert_eq!(format_general(12345.0, 5), "12345");
        assert_eq!(format_general(123456.0, 5), "1.2346e+05");
        assert_eq!(format_general(100000.0, 5), "1e+05");
        assert_eq!(format_general(0.0001, 5), "0.0001");
        assert_eq!(format_general(0.00001, 5), "1e-05");
        assert_eq!(format_general(0.0, 5), "0");
    }

    #[test]
    fn parse_ohms_accepts_suffixes() {
        assert_eq!(parse_ohms("470").unwrap(), 470);
        assert_eq!(parse_ohms("4.7K").unwrap(), 4_700);
        assert_eq!(parse_ohms("2.2k\u{2126}").unwrap(), 2_200);
        assert_eq!(parse_ohms("1M").unwrap(), 1_000_000);
        assert_eq!(parse_ohms(" 10 ohm ").unwrap(), 10);
    }

    #[test]
    fn parse_ohms_rejects_garbage() {
        assert!(parse_ohms("").is_err());
        assert!(parse_ohms("abc").is_err());
        assert!(parse_ohms("-5").is_err());
        assert!(parse_ohms("0.5").is_err());
    }
}
