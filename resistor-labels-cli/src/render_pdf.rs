//! PDF rendering of label sheets.

use std::convert::Infallible;
use std::path::Path;

use anyhow::{Context, Result};
use printpdf::path::PaintMode;
use printpdf::*;
use resistor_labels::geometry::{self, Dim};
use resistor_labels::sequence::Label;
use resistor_labels::tiler::LabelSink;

/// Inset of the value text and the stripe block from the cell's edges, in inches.
const INSET: f64 = 1.0 / 8.0;
const STRIPE: Dim = Dim {
    w: 1.0 / 8.0,
    h: 1.0 / 4.0,
};
const STRIPE_GAP: f64 = 1.0 / 16.0;
const FONT_SIZE_PT: f32 = 18.0;
const OUTLINE_PT: f32 = 1.0;

fn mm(inches: f64) -> Mm {
    Mm((inches * 25.4) as f32)
}

fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn grey() -> Color {
    rgb(0.5, 0.5, 0.5)
}

/// A PDF document that label cells are drawn into, one page per sheet.
pub struct PdfSheet {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    /// The built-in Helvetica has no Ω glyph.
    ascii_units: bool,
    page: Dim,
    pages: usize,
    needs_page: bool,
}

impl PdfSheet {
    /// Start a document with pages of `page` inches. Without a TTF font the
    /// labels use Helvetica-Bold and spell out the unit.
    pub fn new(page: Dim, font_path: Option<&Path>) -> Result<PdfSheet> {
        let (doc, first_page, first_layer) =
            PdfDocument::new("Resistor labels", mm(page.w), mm(page.h), "Page 1");
        let layer = doc.get_page(first_page).get_layer(first_layer);

        let (font, ascii_units) = match font_path {
            Some(path) => {
                let file = std::fs::File::open(path)
                    .with_context(|| format!("opening font {}", path.display()))?;
                let font = doc
                    .add_external_font(file)
                    .with_context(|| format!("loading font {}", path.display()))?;
                (font, false)
            }
            None => (
                doc.add_builtin_font(BuiltinFont::HelveticaBold)
                    .context("loading Helvetica-Bold")?,
                true,
            ),
        };

        Ok(PdfSheet {
            doc,
            layer,
            font,
            ascii_units,
            page,
            pages: 1,
            needs_page: false,
        })
    }

    /// Pages started so far.
    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn save(self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        self.doc
            .save(&mut std::io::BufWriter::new(file))
            .with_context(|| format!("writing PDF to {}", path.display()))?;
        Ok(())
    }

    fn start_page(&mut self) {
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            mm(self.page.w),
            mm(self.page.h),
            format!("Page {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.needs_page = false;
    }

    /// Axis-aligned rectangle from a bottom-left corner in PDF space.
    fn pdf_rect(x: f64, bottom: f64, w: f64, h: f64) -> printpdf::Rect {
        printpdf::Rect::new(mm(x), mm(bottom), mm(x + w), mm(bottom + h))
    }
}

impl LabelSink for PdfSheet {
    type Error = Infallible;

    fn draw_label(&mut self, rect: geometry::Rect, label: &Label) -> Result<(), Infallible> {
        // A break only opens the next page once something is drawn on it,
        // so the closing flush never leaves a blank page behind.
        if self.needs_page {
            self.start_page();
        }

        // PDF y is bottom-up; rect.y is measured from the top of the page.
        let bottom = self.page.h - rect.y - rect.h;

        self.layer.set_outline_thickness(OUTLINE_PT);
        self.layer.set_outline_color(grey());
        self.layer.add_rect(
            Self::pdf_rect(rect.x, bottom, rect.w, rect.h).with_mode(PaintMode::Stroke),
        );

        let text = if self.ascii_units {
            label.value.ascii_text()
        } else {
            label.text.clone()
        };
        let baseline = bottom + INSET;
        self.layer.set_fill_color(rgb(0.0, 0.0, 0.0));
        self.layer
            .use_text(text, FONT_SIZE_PT, mm(rect.x + INSET), mm(baseline), &self.font);

        let mut x = rect.right() - INSET - STRIPE.w;
        for band in label.bands.drawing_order() {
            let (r, g, b) = band.rgb();
            self.layer.set_fill_color(rgb(r, g, b));
            self.layer.set_outline_color(grey());
            self.layer.add_rect(
                Self::pdf_rect(x, baseline, STRIPE.w, STRIPE.h).with_mode(PaintMode::FillStroke),
            );
            x -= STRIPE_GAP + STRIPE.w;
        }

        tracing::trace!(
            text = %label.text,
            page = self.pages,
            x = rect.x,
            y = rect.y,
            "drew label"
        );
        Ok(())
    }

    fn page_break(&mut self) -> Result<(), Infallible> {
        self.needs_page = true;
        Ok(())
    }
}
