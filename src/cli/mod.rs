//! Command-line parsing for the cross-section fit browser.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fit/evaluation code.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::data::Product;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "xs", version, about = "Cross-section fit browser (H projectiles on H2)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the tabulated reactions, grouped by fast product species.
    List(ListArgs),
    /// Print one reaction's provenance and validity domain.
    Show(ShowArgs),
    /// Evaluate a reaction's fit and print or export the sampled curve.
    Eval(EvalArgs),
    /// Render one or more reactions into a log-log SVG chart.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// The TUI browses the same reaction tables as `xs list`, rendering the
    /// selected fit's curve with Ratatui.
    Tui(TuiArgs),
}

/// Options for the reaction listing.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Restrict the listing to one fast product species.
    #[arg(short = 'p', long, value_enum)]
    pub product: Option<ProductArg>,
}

/// Options for the reaction detail view.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Reaction label, e.g. "H+ + H2 -> total fast H".
    pub reaction: String,
}

/// Options for evaluating a fit.
#[derive(Debug, Parser)]
pub struct EvalArgs {
    /// Reaction label, e.g. "H+ + H2 -> total fast H".
    pub reaction: String,

    /// Number of log-spaced grid points across the validity domain.
    #[arg(short = 'n', long, default_value_t = 100)]
    pub points: usize,

    /// Evaluate at explicit energies (eV) instead of a log-spaced grid.
    /// Energies outside the validity domain are dropped.
    #[arg(short = 'e', long = "energy", value_name = "EV")]
    pub energies: Vec<f64>,

    /// Export the sampled curve to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the sampled curve (label + provenance + grid) to JSON.
    #[arg(long = "export-curve")]
    pub export_curve: Option<PathBuf>,
}

/// Options for SVG chart rendering.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Reaction labels to draw, or a single product species with `-p`.
    pub reactions: Vec<String>,

    /// Draw every reaction filed under one product species.
    #[arg(short = 'p', long, value_enum)]
    pub product: Option<ProductArg>,

    /// Overlay curve JSON files produced by `xs eval --export-curve`.
    #[arg(long = "curve", value_name = "JSON")]
    pub curves: Vec<PathBuf>,

    /// Output SVG path.
    #[arg(short = 'o', long, default_value = "xs.svg")]
    pub out: PathBuf,

    /// Number of log-spaced grid points per curve.
    #[arg(short = 'n', long, default_value_t = 400)]
    pub points: usize,

    /// Chart width (pixels).
    #[arg(long, default_value_t = 900)]
    pub width: u32,

    /// Chart height (pixels).
    #[arg(long, default_value_t = 600)]
    pub height: u32,
}

/// Options for the TUI.
#[derive(Debug, Parser)]
pub struct TuiArgs {
    /// Number of log-spaced grid points per rendered curve.
    #[arg(short = 'n', long, default_value_t = 200)]
    pub points: usize,
}

/// Product species as a CLI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProductArg {
    /// Fast H+ production.
    Hp,
    /// Fast H production.
    H,
    /// Fast H- production.
    Hm,
    /// Fast H2+ production.
    H2p,
    /// Fast H2 production.
    H2,
    /// Fast H3+ production.
    H3p,
}

impl From<ProductArg> for Product {
    fn from(arg: ProductArg) -> Self {
        match arg {
            ProductArg::Hp => Product::HPlus,
            ProductArg::H => Product::H,
            ProductArg::Hm => Product::HMinus,
            ProductArg::H2p => Product::H2Plus,
            ProductArg::H2 => Product::H2,
            ProductArg::H3p => Product::H3Plus,
        }
    }
}
