//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the reaction tables
//! - evaluates fits over the requested grids
//! - prints listings/tables
//! - writes optional exports and charts

use clap::Parser;

use crate::cli::{Command, EvalArgs, ListArgs, PlotArgs, ShowArgs};
use crate::data::{Product, ReactionDatabase};
use crate::error::FitError;
use crate::fit::{CrossSectionFit, GridSpec};
use crate::io::export::CurveFile;
use crate::plot::{sampled_series, CurveSeries};

/// Entry point for the `xs` binary.
pub fn run() -> Result<(), FitError> {
    // We want plain `xs` (and `xs -n 300`) to behave like `xs tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::List(args) => handle_list(args),
        Command::Show(args) => handle_show(args),
        Command::Eval(args) => handle_eval(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => crate::tui::run(args),
    }
}

fn handle_list(args: ListArgs) -> Result<(), FitError> {
    let db = ReactionDatabase::load()?;
    match args.product {
        Some(arg) => {
            let product: Product = arg.into();
            for reaction in db.by_product(product) {
                let (low, high) = reaction.fit().domain();
                println!("{:<42} domain [{low:.3e}, {high:.3e}] eV", reaction.label());
            }
        }
        None => print!("{}", crate::report::format_reaction_listing(&db)),
    }
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), FitError> {
    let db = ReactionDatabase::load()?;
    let reaction = lookup(&db, &args.reaction)?;
    print!("{}", crate::report::format_reaction_detail(reaction));
    Ok(())
}

fn handle_eval(args: EvalArgs) -> Result<(), FitError> {
    let mut db = ReactionDatabase::load()?;
    lookup(&db, &args.reaction)?;
    let reaction = db
        .get_mut(&args.reaction)
        .ok_or_else(|| unknown_reaction(&args.reaction))?;

    let spec = if args.energies.is_empty() {
        GridSpec::Count(args.points)
    } else {
        GridSpec::Points(args.energies.clone())
    };

    let label = reaction.label().to_string();
    let description = reaction.fit().description().to_string();
    let domain = reaction.fit().domain();

    let fit = reaction.fit_mut();
    let sigma = fit.evaluate_at(spec)?.map(<[f64]>::to_vec);
    print!(
        "{}",
        crate::report::format_evaluation_table(fit.grid(), sigma.as_deref())
    );

    let energies = fit.grid().energies().map(<[f64]>::to_vec).unwrap_or_default();
    let sigma = sigma.unwrap_or_default();

    if let Some(path) = &args.export {
        crate::io::export::write_curve_csv(path, &energies, &sigma)?;
    }
    if let Some(path) = &args.export_curve {
        let curve = CurveFile::new(label, description, domain, energies, sigma);
        crate::io::export::write_curve_json(path, &curve)?;
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), FitError> {
    let mut db = ReactionDatabase::load()?;

    let labels: Vec<String> = match (&args.reactions[..], args.product) {
        ([], Some(arg)) => db
            .by_product(arg.into())
            .map(|r| r.label().to_string())
            .collect(),
        (named, _) => named.to_vec(),
    };

    let mut series: Vec<CurveSeries> = Vec::with_capacity(labels.len() + args.curves.len());
    for label in &labels {
        lookup(&db, label)?;
        let reaction = db.get_mut(label).ok_or_else(|| unknown_reaction(label))?;
        let fit = reaction.fit_mut();
        fit.set_grid(GridSpec::Count(args.points))?;
        series.push(sampled_series(label.clone(), fit)?);
    }
    for path in &args.curves {
        let curve = crate::io::export::read_curve_json(path)?;
        series.push(CurveSeries {
            label: curve.label,
            points: curve.energy_ev.into_iter().zip(curve.sigma_m2).collect(),
        });
    }

    if series.is_empty() {
        return Err(FitError::InvalidPlotTarget(
            "nothing to plot: name a reaction, pass --product, or supply --curve.".to_string(),
        ));
    }

    crate::plot::render_svg_chart(
        &args.out,
        "Cross sections",
        &series,
        (args.width, args.height),
    )?;
    println!("Wrote chart: {}", args.out.display());
    Ok(())
}

fn lookup<'a>(
    db: &'a ReactionDatabase,
    label: &str,
) -> Result<&'a crate::data::Reaction, FitError> {
    db.get(label).ok_or_else(|| unknown_reaction(label))
}

fn unknown_reaction(label: &str) -> FitError {
    FitError::InvalidGrid(format!(
        "unknown reaction '{label}'; run `xs list` for the available labels."
    ))
}

/// Rewrite argv so `xs` defaults to `xs tui`.
///
/// Rules:
/// - `xs`                      -> `xs tui`
/// - `xs -n 300 ...`           -> `xs tui -n 300 ...`
/// - `xs --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "list" | "show" | "eval" | "plot" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(tokens: &[&str]) -> Vec<String> {
        rewrite_args(tokens.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite(&["xs"]), vec!["xs", "tui"]);
    }

    #[test]
    fn leading_flag_goes_to_tui() {
        assert_eq!(rewrite(&["xs", "-n", "300"]), vec!["xs", "tui", "-n", "300"]);
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(rewrite(&["xs", "list"]), vec!["xs", "list"]);
        assert_eq!(rewrite(&["xs", "--help"]), vec!["xs", "--help"]);
    }

    #[test]
    fn plot_draws_saved_curve_files() {
        let dir = std::env::temp_dir().join("xs-curves-test-plot-saved");
        std::fs::create_dir_all(&dir).unwrap();
        let json = dir.join("curve.json");
        let curve = CurveFile::new(
            "saved curve",
            "a previously exported curve",
            (10.0, 1.0e3),
            (1..=20).map(|i| i as f64 * 50.0).collect(),
            (1..=20).map(|i| 1e-20 * i as f64).collect(),
        );
        crate::io::export::write_curve_json(&json, &curve).unwrap();

        let out = dir.join("chart.svg");
        handle_plot(PlotArgs {
            reactions: vec![],
            product: None,
            curves: vec![json],
            out: out.clone(),
            points: 50,
            width: 640,
            height: 480,
        })
        .unwrap();
        assert!(std::fs::read_to_string(&out).unwrap().contains("<svg"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn plot_without_any_input_is_rejected() {
        let err = handle_plot(PlotArgs {
            reactions: vec![],
            product: None,
            curves: vec![],
            out: "unused.svg".into(),
            points: 50,
            width: 640,
            height: 480,
        })
        .unwrap_err();
        assert!(matches!(err, FitError::InvalidPlotTarget(_)));
    }
}
