use std::convert::Infallible;

use crate::error::{GeometryError, RunError};
use crate::geometry::{Geometry, Grid, Rect};
use crate::sequence::{Label, ValueSequencer};

/// Receives the drawing instructions produced by [`SheetTiler::run`].
pub trait LabelSink {
    type Error: std::error::Error + 'static;

    /// Draw one label inside `rect` on the current page.
    fn draw_label(&mut self, rect: Rect, label: &Label) -> Result<(), Self::Error>;

    /// Finish the current page and start a new blank one.
    fn page_break(&mut self) -> Result<(), Self::Error>;
}

/// Adapts a pair of closures into a [`LabelSink`].
pub struct Callbacks<D, P> {
    pub draw: D,
    pub page_break: P,
}

impl<D, P> LabelSink for Callbacks<D, P>
where
    D: FnMut(Rect, &Label),
    P: FnMut(),
{
    type Error = Infallible;

    fn draw_label(&mut self, rect: Rect, label: &Label) -> Result<(), Infallible> {
        (self.draw)(rect, label);
        Ok(())
    }

    fn page_break(&mut self) -> Result<(), Infallible> {
        (self.page_break)();
        Ok(())
    }
}

/// Totals from a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetSummary {
    pub labels: usize,
    /// Number of page breaks issued, including the final flush.
    pub pages: usize,
}

/// Places labels row by row into the cells of a validated sheet geometry.
#[derive(Debug, Clone)]
pub struct SheetTiler {
    geometry: Geometry,
    grid: Grid,
}

impl SheetTiler {
    pub fn new(geometry: Geometry) -> Result<SheetTiler, GeometryError> {
        let grid = geometry.validate()?;
        Ok(SheetTiler { geometry, grid })
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Draw every label of `sequencer` into `sink`, breaking pages as they fill.
    ///
    /// A page break follows each full page and one more flushes the last
    /// page. If the final label fills a page exactly, that page is broken
    /// only once.
    pub fn run<S: LabelSink>(
        &self,
        sequencer: &mut ValueSequencer<'_>,
        sink: &mut S,
    ) -> Result<SheetSummary, RunError<S::Error>> {
        let mut column = 0;
        let mut row = 0;
        let mut summary = SheetSummary {
            labels: 0,
            pages: 0,
        };

        loop {
            let step = sequencer.advance()?;
            let rect = self.geometry.cell_rect(column, row);
            sink.draw_label(rect, &step.label).map_err(RunError::Sink)?;
            summary.labels += 1;

            if !step.more {
                break;
            }

            if column + 1 == self.grid.columns {
                column = 0;
                if row + 1 == self.grid.rows {
                    row = 0;
                    sink.page_break().map_err(RunError::Sink)?;
                    summary.pages += 1;
                    tracing::debug!(page = summary.pages, labels = summary.labels, "page full");
                } else {
                    row += 1;
                }
            } else {
                column += 1;
            }
        }

        sink.page_break().map_err(RunError::Sink)?;
        summary.pages += 1;
        tracing::debug!(
            labels = summary.labels,
            pages = summary.pages,
            "sheet finished"
        );
        Ok(summary)
    }

    /// [`Self::run`] with plain callbacks.
    pub fn run_with<D, P>(
        &self,
        sequencer: &mut ValueSequencer<'_>,
        draw: D,
        page_break: P,
    ) -> Result<SheetSummary, RunError<Infallible>>
    where
        D: FnMut(Rect, &Label),
        P: FnMut(),
    {
        self.run(sequencer, &mut Callbacks { draw, page_break })
    }
}
