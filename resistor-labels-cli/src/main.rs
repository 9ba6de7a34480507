use std::cell::Cell;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use resistor_labels::config::SheetConfig;
use resistor_labels::geometry::Grid;
use resistor_labels::sequence::DEFAULT_ITERATION_LIMIT;
use resistor_labels::series::{self, Series};
use resistor_labels::value::parse_ohms;

mod render_pdf;

/// Print resistor value labels with color-code bands onto label sheets
#[derive(Parser)]
#[command(name = "resistor-labels", version)]
struct Cli {
    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the label sheet to a PDF file
    Render {
        /// Output PDF path
        output: PathBuf,
        #[command(flatten)]
        sheet: SheetArgs,
        /// TrueType font for the value text (enables the Ω symbol)
        #[arg(long)]
        font: Option<PathBuf>,
    },
    /// Print the labels and their sheet positions without rendering
    Preview {
        #[command(flatten)]
        sheet: SheetArgs,
    },
    /// List the built-in resistor series
    Series,
}

#[derive(Args)]
struct SheetArgs {
    /// Sheet description in TOML; defaults to E12 up to 1M on Avery 5422
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Series name (E3, E6, E12, E24) or comma-separated bases, e.g. "10,22,47"
    #[arg(long)]
    series: Option<String>,
    /// Last value to print, e.g. "470", "4.7K", "1M"
    #[arg(long)]
    max: Option<String>,
    /// Give up after this many labels
    #[arg(long, default_value_t = DEFAULT_ITERATION_LIMIT)]
    limit: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Render {
            output,
            sheet,
            font,
        } => cmd_render(&output, &sheet, font.as_deref()),
        Command::Preview { sheet } => cmd_preview(&sheet),
        Command::Series => cmd_series(),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Build the sheet config from a file (or the default) plus command-line overrides.
fn load_config(args: &SheetArgs) -> Result<(SheetConfig, Grid)> {
    let mut config = match &args.config {
        Some(path) => {
            let toml_str = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            SheetConfig::from_toml_str(&toml_str)
                .with_context(|| format!("parsing sheet config from {}", path.display()))?
        }
        None => SheetConfig::default(),
    };

    if let Some(spec) = &args.series {
        config.series =
            Series::parse(spec).with_context(|| format!("invalid series '{spec}'"))?;
    }
    if let Some(max) = &args.max {
        config.max_value = parse_ohms(max)?;
    }

    let grid = config.validate().context("invalid sheet configuration")?;
    tracing::info!(
        series_len = config.series.len(),
        max_value = config.max_value,
        columns = grid.columns,
        rows = grid.rows,
        "sheet configured"
    );
    Ok((config, grid))
}

fn cmd_render(output: &Path, args: &SheetArgs, font: Option<&Path>) -> Result<()> {
    let (config, _) = load_config(args)?;
    let tiler = config.tiler()?;
    let mut seq = config.sequencer(args.limit);
    let mut sheet = render_pdf::PdfSheet::new(config.geometry.page, font)?;

    let summary = tiler
        .run(&mut seq, &mut sheet)
        .context("laying out labels")?;
    sheet.save(output)?;

    println!("wrote {}", output.display());
    println!("{} labels on {} pages", summary.labels, summary.pages);
    Ok(())
}

/// Page, row and column of the next label, mirroring the tiler's fill order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PreviewCursor {
    page: usize,
    row: usize,
    column: usize,
}

impl PreviewCursor {
    fn new() -> Self {
        Self {
            page: 1,
            row: 0,
            column: 0,
        }
    }

    /// Step past a drawn label. Rows wrap here; pages only on a page break.
    fn advance(self, grid: Grid) -> Self {
        if self.column + 1 == grid.columns {
            Self {
                row: self.row + 1,
                column: 0,
                ..self
            }
        } else {
            Self {
                column: self.column + 1,
                ..self
            }
        }
    }

    fn page_break(self) -> Self {
        Self {
            page: self.page + 1,
            row: 0,
            column: 0,
        }
    }
}

fn cmd_preview(args: &SheetArgs) -> Result<()> {
    let (config, _) = load_config(args)?;
    let tiler = config.tiler()?;
    let grid = tiler.grid();
    let mut seq = config.sequencer(args.limit);

    println!(
        "{:>4} {:>4} {:>4}  {:<10} {}",
        "Page", "Row", "Col", "Value", "Bands"
    );
    println!("{}", "-".repeat(46));

    let cursor = Cell::new(PreviewCursor::new());
    let summary = tiler
        .run_with(
            &mut seq,
            |_, label| {
                let at = cursor.get();
                println!(
                    "{:>4} {:>4} {:>4}  {:<10} {}",
                    at.page,
                    at.row + 1,
                    at.column + 1,
                    label.text,
                    label.bands
                );
                cursor.set(at.advance(grid));
            },
            || cursor.set(cursor.get().page_break()),
        )
        .context("laying out labels")?;

    println!();
    println!("{} labels on {} pages", summary.labels, summary.pages);
    Ok(())
}

fn cmd_series() -> Result<()> {
    println!("{:<6} {:>6}  {}", "Series", "Values", "Bases");
    println!("{}", "-".repeat(46));
    for name in series::BUILTIN_NAMES {
        let Some(series) = series::builtin_series(name) else {
            continue;
        };
        let bases: Vec<String> = series.bases().iter().map(u32::to_string).collect();
        println!("{:<6} {:>6}  {}", name, series.len(), bases.join(","));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use resistor_labels::geometry::Rect;

    #[test]
    fn preview_cursor_tracks_tiler_cells() {
        let config = SheetConfig::default();
        let tiler = config.tiler().unwrap();
        let grid = tiler.grid();
        let geometry = config.geometry;
        let mut seq = config.sequencer(DEFAULT_ITERATION_LIMIT);

        let cursor = Cell::new(PreviewCursor::new());
        let mut seen: Vec<(PreviewCursor, Rect)> = Vec::new();
        tiler
            .run_with(
                &mut seq,
                |rect, _| {
                    seen.push((cursor.get(), rect));
                    cursor.set(cursor.get().advance(grid));
                },
                || cursor.set(cursor.get().page_break()),
            )
            .unwrap();

        assert_eq!(seen.len(), 61);
        for (at, rect) in &seen {
            assert_eq!(*rect, geometry.cell_rect(at.column, at.row));
        }
        let (last, _) = seen[60];
        assert_eq!(
            last,
            PreviewCursor {
                page: 4,
                row: 0,
                column: 0
            }
        );
        let (twentieth, _) = seen[19];
        assert_eq!(
            twentieth,
            PreviewCursor {
                page: 1,
                row: 9,
                column: 1
            }
        );
    }
}
