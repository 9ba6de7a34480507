use crate::error::ConfigError;
use crate::geometry::{Geometry, Grid};
use crate::sequence::ValueSequencer;
use crate::series::{Series, E12};
use crate::tiler::SheetTiler;

/// Everything needed to produce one label sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetConfig {
    pub series: Series,
    /// Last value to print, in ohms. It must be reachable from `series`.
    pub max_value: u64,
    pub geometry: Geometry,
}

impl Default for SheetConfig {
    /// E12 from 10 Ω to 1 MΩ on an Avery 5422 sheet.
    fn default() -> Self {
        SheetConfig {
            series: Series::from_builtin(E12),
            max_value: 1_000_000,
            geometry: Geometry::avery_5422(),
        }
    }
}

impl SheetConfig {
    /// Check that the sequence terminates and the geometry tiles the page.
    pub fn validate(&self) -> Result<Grid, ConfigError> {
        if !self.series.reaches(self.max_value) {
            return Err(ConfigError::UnreachableMaxValue(self.max_value));
        }
        if decade_of(self.max_value) > 9 {
            return Err(ConfigError::NoMultiplierColor(self.max_value));
        }
        Ok(self.geometry.validate()?)
    }

    pub fn sequencer(&self, limit: usize) -> ValueSequencer<'_> {
        ValueSequencer::new(&self.series, self.max_value, limit)
    }

    pub fn tiler(&self) -> Result<SheetTiler, ConfigError> {
        Ok(SheetTiler::new(self.geometry)?)
    }
}

/// Power of ten that scales a two-digit mantissa up to `ohms`.
fn decade_of(ohms: u64) -> u32 {
    let mut decade = 0;
    let mut mantissa = ohms;
    while mantissa >= 100 {
        mantissa /= 10;
        decade += 1;
    }
    decade
}

#[cfg(feature = "serde")]
mod toml_config {
    use serde::Deserialize;

    use super::SheetConfig;
    use crate::error::ConfigError;
    use crate::geometry::{Dim, Geometry, Margins, Pitch};
    use crate::series::Series;
    use crate::value::parse_ohms;

    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    enum SeriesSpec {
        Name(String),
        Bases(Vec<u32>),
    }

    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    enum OhmsSpec {
        Ohms(u64),
        Text(String),
    }

    /// On-disk form of [`SheetConfig`]. Geometry tables default to Avery 5422.
    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct RawConfig {
        series: Option<SeriesSpec>,
        max_value: Option<OhmsSpec>,
        page: Option<Dim>,
        label: Option<Dim>,
        margins: Option<Margins>,
        pitch: Option<Pitch>,
    }

    impl SheetConfig {
        /// Parse a TOML sheet description. Fields left out keep their defaults.
        pub fn from_toml_str(toml_str: &str) -> Result<SheetConfig, ConfigError> {
            let raw: RawConfig =
                toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
            let defaults = SheetConfig::default();

            let series = match raw.series {
                Some(SeriesSpec::Name(name)) => Series::parse(&name)?,
                Some(SeriesSpec::Bases(bases)) => Series::new(bases)?,
                None => defaults.series,
            };
            let max_value = match raw.max_value {
                Some(OhmsSpec::Ohms(ohms)) => ohms,
                Some(OhmsSpec::Text(text)) => parse_ohms(&text)?,
                None => defaults.max_value,
            };
            let geometry = Geometry {
                page: raw.page.unwrap_or(defaults.geometry.page),
                label: raw.label.unwrap_or(defaults.geometry.label),
                margins: raw.margins.unwrap_or(defaults.geometry.margins),
                pitch: raw.pitch.unwrap_or(defaults.geometry.pitch),
            };

            Ok(SheetConfig {
                series,
                max_value,
                geometry,
            })
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Grid;

    #[test]
    fn default_matches_avery_5422_e12() {
        let config = SheetConfig::default();
        assert_eq!(config.series.bases(), E12);
        assert_eq!(config.validate().unwrap(), Grid { columns: 2, rows: 10 });
    }

    #[test]
    fn unreachable_max_is_rejected() {
        let config = SheetConfig {
            max_value: 1_100,
            ..SheetConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnreachableMaxValue(1_100))
        ));
    }

    #[test]
    fn max_past_palette_is_rejected() {
        let config = SheetConfig {
            max_value: 10_000_000_000_000,
            ..SheetConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NoMultiplierColor(_))
        ));
    }

    #[test]
    fn geometry_errors_surface() {
        let mut config = SheetConfig::default();
        config.geometry.pitch.vertical = 0.7;
        assert!(matches!(config.validate(), Err(ConfigError::Geometry(_))));
        assert!(config.tiler().is_err());
    }

    #[test]
    fn decades() {
        assert_eq!(decade_of(10), 0);
        assert_eq!(decade_of(82), 0);
        assert_eq!(decade_of(100), 1);
        assert_eq!(decade_of(1_000_000), 5);
    }
}
