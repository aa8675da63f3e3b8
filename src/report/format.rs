//! Reporting utilities: reaction listings and per-fit detail blocks.
//!
//! We keep formatting code in one place so:
//! - the fit evaluation code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::data::{Product, Reaction, ReactionDatabase};
use crate::fit::{CrossSectionFit, EnergyGrid};

/// Format the reaction listing, grouped by fast product species.
pub fn format_reaction_listing(db: &ReactionDatabase) -> String {
    let mut out = String::new();

    out.push_str("=== xs - cross-section fits for hydrogen projectiles on H2 ===\n");
    for product in Product::ALL {
        let mut group = db.by_product(product).peekable();
        if group.peek().is_none() {
            continue;
        }
        out.push_str(&format!("\nFast {} production:\n", product.label()));
        for reaction in group {
            let (low, high) = reaction.fit().domain();
            out.push_str(&format!(
                "  {:<42} domain [{low:.3e}, {high:.3e}] eV\n",
                reaction.label()
            ));
        }
    }

    out
}

/// Format one reaction's detail block: label, domain and provenance text.
pub fn format_reaction_detail(reaction: &Reaction) -> String {
    let fit = reaction.fit();
    let (low, high) = fit.domain();
    let mut out = String::new();

    out.push_str(&format!("Reaction: {}\n", reaction.label()));
    out.push_str(&format!("Product:  fast {}\n", reaction.product().label()));
    out.push_str(&format!("Domain:   [{low:.3e}, {high:.3e}] eV\n"));
    out.push_str(&format!("Grid:     {}\n", fit.grid_input()));
    out.push('\n');
    for line in fit.description().lines() {
        out.push_str(&format!("  {line}\n"));
    }

    out
}

/// Format an evaluated grid as an aligned two-column table.
///
/// A grid with no valid energies renders as an explicit notice rather than an
/// empty table.
pub fn format_evaluation_table(grid: &EnergyGrid, sigma: Option<&[f64]>) -> String {
    let (Some(energies), Some(sigma)) = (grid.energies(), sigma) else {
        return "No valid energies in the requested grid.\n".to_string();
    };

    let mut out = String::new();
    out.push_str(&format!("{:>14}  {:>14}\n", "energy (eV)", "sigma (m^2)"));
    for (e, s) in energies.iter().zip(sigma) {
        out.push_str(&format!("{e:>14.6e}  {s:>14.6e}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::GridSpec;

    #[test]
    fn listing_names_every_reaction_once() {
        let db = ReactionDatabase::load().unwrap();
        let listing = format_reaction_listing(&db);
        // Several labels are prefixes of others, so compare whole label
        // columns rather than substring hits.
        let mut listed: Vec<&str> = listing
            .lines()
            .filter_map(|line| line.strip_prefix("  "))
            .filter_map(|line| line.split(" domain [").next())
            .map(str::trim_end)
            .collect();
        listed.sort_unstable();
        let mut expected: Vec<&str> = db.labels().collect();
        expected.sort_unstable();
        assert_eq!(listed, expected);
    }

    #[test]
    fn detail_block_carries_provenance_text() {
        let db = ReactionDatabase::load().unwrap();
        let reaction = db.get("H+ + H2 -> total fast H").unwrap();
        let detail = format_reaction_detail(reaction);
        assert!(detail.contains("Tatsuo Tabata"));
        assert!(detail.contains("RMS: 1.3%"));
        assert!(detail.contains("fast H\n"));
        assert!(detail.contains("Grid:     5000 log-spaced points"));
    }

    #[test]
    fn evaluation_table_has_one_row_per_point() {
        let mut db = ReactionDatabase::load().unwrap();
        let fit = db.get_mut("H+ + H2 -> total fast H").unwrap().fit_mut();
        fit.set_grid(GridSpec::Count(8)).unwrap();
        let sigma = fit.evaluate().map(<[f64]>::to_vec);
        let table = format_evaluation_table(fit.grid(), sigma.as_deref());
        assert_eq!(table.lines().count(), 9);
    }

    #[test]
    fn empty_grid_renders_a_notice() {
        let table = format_evaluation_table(&EnergyGrid::NoValidEnergies, None);
        assert!(table.contains("No valid energies"));
    }
}
