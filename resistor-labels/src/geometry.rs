use std::fmt;

use crate::error::GeometryError;

/// Slack allowed when checking that cells tile the printable area, in sheet units.
pub const GEOMETRY_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        })
    }
}

/// Width and height.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Dim {
    pub w: f64,
    pub h: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Margins {
    pub horizontal: f64,
    pub vertical: f64,
}

/// Distance from one label's left/top edge to its right/lower neighbour's.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Pitch {
    pub horizontal: f64,
    pub vertical: f64,
}

/// A label cell. The origin is the top-left corner of the page, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// True if the interiors intersect; shared edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right() - GEOMETRY_TOLERANCE
            && other.x < self.right() - GEOMETRY_TOLERANCE
            && self.y < other.bottom() - GEOMETRY_TOLERANCE
            && other.y < self.bottom() - GEOMETRY_TOLERANCE
    }
}

/// Physical layout of a label sheet. All lengths share one unit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Geometry {
    pub page: Dim,
    pub label: Dim,
    pub margins: Margins,
    pub pitch: Pitch,
}

/// Number of label cells per row and per column, derived from a valid [`Geometry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub columns: usize,
    pub rows: usize,
}

impl Grid {
    pub fn cells_per_page(&self) -> usize {
        self.columns * self.rows
    }
}

impl Geometry {
    /// Avery 5422 sheet in inches: 4x6 page, two columns of ten 1.75x0.5 labels.
    pub fn avery_5422() -> Geometry {
        Geometry {
            page: Dim { w: 4.0, h: 6.0 },
            label: Dim { w: 1.75, h: 0.5 },
            margins: Margins {
                horizontal: 3.0 / 16.0,
                vertical: 0.5,
            },
            pitch: Pitch {
                horizontal: 1.75 + 1.0 / 8.0,
                vertical: 0.5,
            },
        }
    }

    /// Check that the labels tile the printable area exactly and return the grid.
    pub fn validate(&self) -> Result<Grid, GeometryError> {
        let columns = axis_cells(
            Axis::Horizontal,
            self.page.w,
            self.margins.horizontal,
            self.label.w,
            self.pitch.horizontal,
        )?;
        let rows = axis_cells(
            Axis::Vertical,
            self.page.h,
            self.margins.vertical,
            self.label.h,
            self.pitch.vertical,
        )?;
        Ok(Grid { columns, rows })
    }

    /// Rectangle of the cell at (`column`, `row`) on any page.
    pub fn cell_rect(&self, column: usize, row: usize) -> Rect {
        Rect {
            x: self.margins.horizontal + column as f64 * self.pitch.horizontal,
            y: self.margins.vertical + row as f64 * self.pitch.vertical,
            w: self.label.w,
            h: self.label.h,
        }
    }
}

fn axis_cells(
    axis: Axis,
    page: f64,
    margin: f64,
    label: f64,
    pitch: f64,
) -> Result<usize, GeometryError> {
    let (page_name, label_name, pitch_name) = match axis {
        Axis::Horizontal => ("page width", "label width", "horizontal pitch"),
        Axis::Vertical => ("page height", "label height", "vertical pitch"),
    };
    for (name, v) in [(page_name, page), (label_name, label), (pitch_name, pitch)] {
        if !(v.is_finite() && v > 0.0) {
            return Err(GeometryError::NonPositive(name));
        }
    }
    if !(margin.is_finite() && margin >= 0.0) {
        return Err(GeometryError::NegativeMargin(axis));
    }

    let printable = page - 2.0 * margin;
    if label > printable + GEOMETRY_TOLERANCE {
        return Err(GeometryError::LabelExceedsPrintable(axis));
    }
    if pitch < label - GEOMETRY_TOLERANCE {
        return Err(GeometryError::PitchSmallerThanLabel { axis, pitch, label });
    }

    let steps = (printable - label) / pitch;
    let whole = steps.round();
    if (steps - whole).abs() * pitch > GEOMETRY_TOLERANCE {
        return Err(GeometryError::NotCellAligned {
            axis,
            cells: steps.floor() + 1.0,
            remainder: (steps - steps.floor()) * pitch,
        });
    }
    Ok(whole as usize + 1)
}
