use thiserror::Error;

use crate::geometry::Axis;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("{0} must be positive and finite")]
    NonPositive(&'static str),

    #[error("{0} margin must be non-negative and finite")]
    NegativeMargin(Axis),

    #[error("{axis} pitch {pitch} is smaller than the label size {label}, cells would overlap")]
    PitchSmallerThanLabel { axis: Axis, pitch: f64, label: f64 },

    #[error("label does not fit the printable {0} extent of the page")]
    LabelExceedsPrintable(Axis),

    #[error("{axis} pitch does not tile the printable area: {remainder} left after {cells} cells")]
    NotCellAligned {
        axis: Axis,
        cells: f64,
        remainder: f64,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("series is empty")]
    EmptySeries,

    #[error("series entry {value} at index {index} is not a two-digit base")]
    BaseOutOfRange { index: usize, value: u32 },

    #[error("invalid series entry '{0}'")]
    InvalidSeriesEntry(String),

    #[error("invalid resistance '{0}'")]
    InvalidResistance(String),

    #[error("max value {0} is not a series base times a power of ten")]
    UnreachableMaxValue(u64),

    #[error("max value {0} needs a multiplier band past white")]
    NoMultiplierColor(u64),

    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("config parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("sequence did not reach its max value within {limit} labels")]
    IterationLimit { limit: usize },

    #[error("decade {0} has no multiplier band color")]
    NoMultiplierColor(u32),

    #[error("sequence already emitted its max value")]
    Exhausted,
}

/// Failure while tiling a sheet: either the sequence or the sink gave up.
#[derive(Debug, Error)]
pub enum RunError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error("renderer error: {0}")]
    Sink(#[source] E),
}
