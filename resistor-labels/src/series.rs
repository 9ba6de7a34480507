use crate::error::ConfigError;
use crate::value::ResistorValue;

/// An ordered list of two-significant-digit base values, e.g. E12.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    bases: Vec<u32>,
}

impl Series {
    /// Build a series, rejecting entries that are not in `10..100`.
    pub fn new(bases: Vec<u32>) -> Result<Series, ConfigError> {
        if bases.is_empty() {
            return Err(ConfigError::EmptySeries);
        }
        if let Some((index, &value)) = bases
            .iter()
            .enumerate()
            .find(|(_, b)| !(10..100).contains(*b))
        {
            return Err(ConfigError::BaseOutOfRange { index, value });
        }
        Ok(Series { bases })
    }

    /// Parse a built-in series name (`E12`) or a comma-separated list of bases.
    pub fn parse(spec: &str) -> Result<Series, ConfigError> {
        if let Some(series) = builtin_series(spec.trim()) {
            return Ok(series);
        }
        let bases = spec
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<u32>()
                    .map_err(|_| ConfigError::InvalidSeriesEntry(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Series::new(bases)
    }

    /// Built-in tables are known to be valid.
    pub(crate) fn from_builtin(bases: &'static [u32]) -> Series {
        Series {
            bases: bases.to_vec(),
        }
    }

    pub fn bases(&self) -> &[u32] {
        &self.bases
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Whether `ohms` is exactly `base * 10^decade` for some base in the series,
    /// i.e. whether a sequence over this series will ever emit it.
    pub fn reaches(&self, ohms: u64) -> bool {
        if ohms < 10 {
            return false;
        }
        let mut mantissa = ohms;
        let mut decade = 0u32;
        while mantissa >= 100 {
            if mantissa % 10 != 0 {
                return false;
            }
            mantissa /= 10;
            decade += 1;
        }
        let base = mantissa as u32;
        self.bases.contains(&base) && ResistorValue::new(base, decade).is_some()
    }
}

pub const E3: &[u32] = &[10, 22, 47];
pub const E6: &[u32] = &[10, 15, 22, 33, 47, 68];
pub const E12: &[u32] = &[10, 12, 15, 18, 22, 27, 33, 39, 47, 56, 68, 82];
pub const E24: &[u32] = &[
    10, 11, 12, 13, 15, 16, 18, 20, 22, 24, 27, 30, 33, 36, 39, 43, 47, 51, 56, 62, 68, 75, 82,
    91,
];

/// Names of the built-in series. E48 and up need three significant digits.
pub const BUILTIN_NAMES: &[&str] = &["E3", "E6", "E12", "E24"];

/// Look up a built-in series by name, ignoring case.
pub fn builtin_series(name: &str) -> Option<Series> {
    let bases = match name.to_ascii_uppercase().as_str() {
        "E3" => E3,
        "E6" => E6,
        "E12" => E12,
        "E24" => E24,
        _ => return None,
    };
    Some(Series::from_builtin(bases))
}
