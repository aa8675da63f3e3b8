//! Cross-section fits for hydrogenic projectiles colliding with molecular
//! hydrogen, keyed by reaction label and grouped by fast product species.
//!
//! Coefficients come from two compilations:
//! - C. F. Barnett, Atomic Data for Fusion, Volume 1: Collisions of H, H2,
//!   He and Li Atoms and Ions with Atoms and Molecules (Chebyshev fits)
//! - The Collected Works of Tatsuo Tabata, Volume 17, Atomic and Molecular
//!   Collision Cross Section (2) (semi-empirical fits)
//!
//! Every fit reports σ in m² over energies in eV.

use crate::error::FitError;
use crate::fit::{BarnettChebFit, CrossSectionFit, TabataFit, TabataForm};

/// Fast product species a reaction is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    HPlus,
    H,
    HMinus,
    H2Plus,
    H2,
    H3Plus,
}

impl Product {
    pub const ALL: [Product; 6] = [
        Product::HPlus,
        Product::H,
        Product::HMinus,
        Product::H2Plus,
        Product::H2,
        Product::H3Plus,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Product::HPlus => "H+",
            Product::H => "H",
            Product::HMinus => "H-",
            Product::H2Plus => "H2+",
            Product::H2 => "H2",
            Product::H3Plus => "H3+",
        }
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One tabulated reaction: label, product group and its evaluable fit.
pub struct Reaction {
    label: &'static str,
    product: Product,
    fit: Box<dyn CrossSectionFit>,
}

impl Reaction {
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn product(&self) -> Product {
        self.product
    }

    pub fn fit(&self) -> &dyn CrossSectionFit {
        self.fit.as_ref()
    }

    pub fn fit_mut(&mut self) -> &mut dyn CrossSectionFit {
        self.fit.as_mut()
    }
}

/// All shipped reactions, in publication order.
pub struct ReactionDatabase {
    reactions: Vec<Reaction>,
}

impl ReactionDatabase {
    /// Build every fit from its published parameter row.
    pub fn load() -> Result<Self, FitError> {
        let reactions = build_reactions()?;
        Ok(Self { reactions })
    }

    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reaction> {
        self.reactions.iter()
    }

    pub fn get(&self, label: &str) -> Option<&Reaction> {
        self.reactions.iter().find(|r| r.label == label)
    }

    pub fn get_mut(&mut self, label: &str) -> Option<&mut Reaction> {
        self.reactions.iter_mut().find(|r| r.label == label)
    }

    /// Reactions filed under one product species, in table order.
    pub fn by_product(&self, product: Product) -> impl Iterator<Item = &Reaction> {
        self.reactions.iter().filter(move |r| r.product == product)
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.reactions.iter().map(|r| r.label)
    }
}

fn tabata(
    label: &'static str,
    product: Product,
    domain: (f64, f64),
    description: &str,
    form: TabataForm,
    parameters: &[f64],
) -> Result<Reaction, FitError> {
    Ok(Reaction {
        label,
        product,
        fit: Box::new(TabataFit::new(domain, description, form, parameters)?),
    })
}

fn barnett(
    label: &'static str,
    product: Product,
    domain: (f64, f64),
    description: &str,
    projectile_mass: f64,
    coefficients: &[f64],
) -> Result<Reaction, FitError> {
    Ok(Reaction {
        label,
        product,
        fit: Box::new(BarnettChebFit::new(
            domain,
            description,
            projectile_mass,
            coefficients,
        )?),
    })
}

fn build_reactions() -> Result<Vec<Reaction>, FitError> {
    Ok(vec![
        // Fast H+ production.
        tabata(
            "H + H2 -> total fast H+",
            Product::HPlus,
            (5.62e1, 1.12e5),
            "Total H+ production from H + H2.\n\
             Reference: The Collected Works of Tatsuo Tabata, Volume 17, Atomic and Molecular \
             Collision Cross Section (2). T. Tabata.\n\
             Notes: none.\n\
             RMS: 4.7%.",
            TabataForm::Form2,
            &[2.0e1, 2.53e-4, 1.728, 2.164, 7.74e-1, 1.639, 1.43e1],
        )?,
        tabata(
            "H- + H2 -> total fast H+",
            Product::HPlus,
            (1.00e3, 3.00e5),
            "Total H+ production from H- + H2.\n\
             Reference: The Collected Works of Tatsuo Tabata, Volume 17, Atomic and Molecular \
             Collision Cross Section (2). T. Tabata.\n\
             Notes: none.\n\
             RMS: 9.0%.",
            TabataForm::Form6,
            &[0.0, 1.75e-8, 3.88, 9.06e-1, -2.74e-1, 3.19, 1.19],
        )?,
        barnett(
            "H2+ + H2 -> total fast H+ low energy",
            Product::HPlus,
            (1.6, 5.0),
            "Total H+ production from H2+ + H2 at low energies.\n\
             Reference: ATOMIC DATA FOR FUSION VOLUME 1 COLLISIONS OF H, H2, He and Li ATOMS \
             and IONS with ATOMS and MOLECULES. C. F. Barnett.\n\
             Notes: No attempt has been made to interpolate between the low-energy data and \
             the data taken at higher energies.\n\
             Accuracy: 25%.",
            2.0,
            &[
                -74.4493, 0.351878, -0.249279, 0.0781924, -0.0295527, 0.00853617, -0.00490330,
            ],
        )?,
        barnett(
            "H2+ + H2 -> total fast H+ high energy",
            Product::HPlus,
            (1.5e3, 1.0e7),
            "Total H+ production from H2+ + H2 at high energies.\n\
             Reference: ATOMIC DATA FOR FUSION VOLUME 1 COLLISIONS OF H, H2, He and Li ATOMS \
             and IONS with ATOMS and MOLECULES. C. F. Barnett.\n\
             Notes: No attempt has been made to interpolate between the low-energy data and \
             the data taken at higher energies.\n\
             Accuracy: 25%.",
            2.0,
            &[
                -74.9261, -2.19443, -0.855834, 0.0421307, 0.216227, 0.0921147, -0.0893079,
            ],
        )?,
        barnett(
            "H2 + H2 -> total fast H+ low energy",
            Product::HPlus,
            (2.5e3, 5.0e4),
            "Total H+ production from H2 + H2 at low energies.\n\
             Reference: ATOMIC DATA FOR FUSION VOLUME 1 COLLISIONS OF H, H2, He and Li ATOMS \
             and IONS with ATOMS and MOLECULES. C. F. Barnett.\n\
             Notes: This data involves the sum of the cross sections for the products: \
             \u{3c3}(H+ + H)proj + 2\u{3c3}(H+ + H+)proj + \u{3c3}(H+ + H-). No attempt has \
             been made to join the high and low energy data sets.\n\
             Accuracy: Unknown.",
            2.0,
            &[
                -75.7161, 0.371301, -0.373363, -0.209805, -0.0677263, -0.00389719, 0.0259767,
            ],
        )?,
        barnett(
            "H2 + H2 -> total fast H+ high energy",
            Product::HPlus,
            (1.5e5, 6.0e5),
            "Total H+ production from H2 + H2 at high energies.\n\
             Reference: ATOMIC DATA FOR FUSION VOLUME 1 COLLISIONS OF H, H2, He and Li ATOMS \
             and IONS with ATOMS and MOLECULES. C. F. Barnett.\n\
             Notes: This data involves the sum of the cross sections for the products: \
             \u{3c3}(H+ + H)proj + 2\u{3c3}(H+ + H+)proj + \u{3c3}(H+ + H-). No attempt has \
             been made to join the high and low energy data sets.\n\
             Accuracy: Unknown.",
            2.0,
            &[
                -75.8616, -0.542987, 0.0642733, 0.0118753, -0.00148111, 0.000221649, 0.00636358,
            ],
        )?,
        barnett(
            "H3+ + H2 -> total fast H+",
            Product::HPlus,
            (4.0e1, 6.0e5),
            "Total H+ production from H3+ + H2.\n\
             Reference: ATOMIC DATA FOR FUSION VOLUME 1 COLLISIONS OF H, H2, He and Li ATOMS \
             and IONS with ATOMS and MOLECULES. C. F. Barnett.\n\
             Notes: Large variations in measured dissociation cross sections have been \
             ascribed to the influence of H3+ ions formed in ion sources with varying degree \
             of vibrational excitation.\n\
             Accuracy: 30%.",
            3.0,
            &[
                -75.3369, 1.74367, -0.759749, -0.559135, 0.0918355, 0.0438106, -0.0940811,
            ],
        )?,
        // Fast H production.
        tabata(
            "H+ + H2 -> total fast H",
            Product::H,
            (3.16, 1.00e5),
            "Total H production from H+ + H2.\n\
             Reference: The Collected Works of Tatsuo Tabata, Volume 17, Atomic and Molecular \
             Collision Cross Section (2). T. Tabata.\n\
             Notes: none.\n\
             RMS: 1.3%.",
            TabataForm::Form8,
            &[
                2.5, 2.12e2, 1.721, 6.7e-4, 3.239e-1, 4.34e-3, 1.296, 1.42e-1, 9.34, 2.997,
            ],
        )?,
        tabata(
            "H- + H2 -> total fast H",
            Product::H,
            (2.37, 5.00e4),
            "Total H production from H- + H2.\n\
             Reference: The Collected Works of Tatsuo Tabata, Volume 17, Atomic and Molecular \
             Collision Cross Section (2). T. Tabata.\n\
             Notes: none.\n\
             RMS: 6.4%.",
            TabataForm::Form11,
            &[
                2.25, 4.19e-2, 1.89, 1.78e-1, -2.3e-1, 1.04, 8.7e-1, 1.65e1, 1.088, 5.33e-3,
                1.66e-1,
            ],
        )?,
        barnett(
            "H2+ + H2 -> total fast H",
            Product::H,
            (2.0e3, 1.0e5),
            "Total H production from H2+ + H2.\n\
             Reference: ATOMIC DATA FOR FUSION VOLUME 1 COLLISIONS OF H, H2, He and Li ATOMS \
             and IONS with ATOMS and MOLECULES. C. F. Barnett.\n\
             Notes: The data refer to the sum of the cross section for H2+ + H2 -> (H+ + H)proj \
             and H2+ + H2 -> (H + H)proj.\n\
             Accuracy: 20%.",
            2.0,
            &[
                -70.6702, -0.632612, -0.606521, -0.0915143, -0.0121710, 0.0168179, 0.0104797,
            ],
        )?,
        barnett(
            "H2 + H2 -> total fast H",
            Product::H,
            (2.5e3, 5.0e4),
            "Total H production from H2 + H2.\n\
             Reference: ATOMIC DATA FOR FUSION VOLUME 1 COLLISIONS OF H, H2, He and Li ATOMS \
             and IONS with ATOMS and MOLECULES. C. F. Barnett.\n\
             Notes: This data involves the sum of the cross sections for the products: \
             \u{3c3}(H+ + H)proj + 2\u{3c3}(H + H)proj. Variations in ion source conditions \
             produce changes up to 10% in the measured values.\n\
             Accuracy: 40%.",
            2.0,
            &[
                -71.7329, -0.200109, -0.223241, -0.0773361, -0.0140887, 0.0563185, -0.00955263,
            ],
        )?,
        barnett(
            "H3+ + H2 -> total fast H",
            Product::H,
            (1.5e3, 6.0e5),
            "Total H production from H3+ + H2.\n\
             Reference: ATOMIC DATA FOR FUSION VOLUME 1 COLLISIONS OF H, H2, He and Li ATOMS \
             and IONS with ATOMS and MOLECULES. C. F. Barnett.\n\
             Notes: Large variations in measured dissociation cross sections have been \
             ascribed to the influence of H3+ ion sources with varying degree of vibrational \
             excitation.\n\
             Accuracy: 30%.",
            3.0,
            &[
                -71.5391, -1.05347, -0.826342, 0.203507, 0.0536140, -0.0425785, -0.0185315,
            ],
        )?,
        // Fast H- production.
        barnett(
            "H+ + H2 -> total fast H-",
            Product::HMinus,
            (2.0e2, 1.0e6),
            "Total H- production from H+ + H2.\n\
             Reference: ATOMIC DATA FOR FUSION VOLUME 1 COLLISIONS OF H, H2, He and Li ATOMS \
             and IONS with ATOMS and MOLECULES. C. F. Barnett.\n\
             Notes: none.\n\
             Accuracy: 25% for energy < 1e4, 15% for energy < 1e5, 40% for energy > 1e5.",
            1.0,
            &[
                -95.8165, -7.17049, -7.48288, -1.93034, 0.761153, 0.556689, -0.0542859,
                -0.270184, -0.0147551,
            ],
        )?,
        tabata(
            "H + H2 -> total fast H-",
            Product::HMinus,
            (2.37e1, 9.11e4),
            "Total H- production from H + H2.\n\
             Reference: The Collected Works of Tatsuo Tabata, Volume 17, Atomic and Molecular \
             Collision Cross Section (2). T. Tabata.\n\
             Notes: none.\n\
             RMS: 3.6%.",
            TabataForm::Form13,
            &[
                2.1e1, 9.73e-3, 2.38, 1.39e-2, -5.51e-1, 7.7e-2, 2.12, 1.97e-6, 2.051, 5.5,
                6.62e-1, 2.02e1, 3.62,
            ],
        )?,
        // Fast H2+ production and destruction.
        barnett(
            "H2+ + H2 -> total H2+ destruction",
            Product::H2Plus,
            (1.3e3, 5.0e4),
            "Total H2+ destruction from H2+ + H2.\n\
             Reference: ATOMIC DATA FOR FUSION VOLUME 1 COLLISIONS OF H, H2, He and Li ATOMS \
             and IONS with ATOMS and MOLECULES. C. F. Barnett.\n\
             Notes: This cross section is the sum of cross sections for all reactions that \
             destroy the fast H2+ molecular ion in passage through H2. Large variations in \
             ion source operating conditions were found to produce changes up to 10% in the \
             measured cross section.\n\
             Accuracy: 20%.",
            2.0,
            &[
                -69.7995, -0.288081, -0.216489, -0.102343, -0.0344599, 0.0155290, 0.0223268,
            ],
        )?,
        tabata(
            "H2 + H2 -> total fast H2+",
            Product::H2Plus,
            (4.21e1, 9.90e4),
            "Total H2+ production from H2 + H2.\n\
             Reference: The Collected Works of Tatsuo Tabata, Volume 17, Atomic and Molecular \
             Collision Cross Section (2). T. Tabata.\n\
             Notes: none.\n\
             RMS: 3.4%.",
            TabataForm::Form10,
            &[
                3.2e1, 1.879e-3, 2.497, 6.62e-2, -4.67e-1, 3.58e-1, 5.0e-1, 7.67, 2.01e2,
            ],
        )?,
        barnett(
            "H3+ + H2 -> total fast H2+",
            Product::H2Plus,
            (1.1e2, 6.0e5),
            "Total H2+ production from H3+ + H2.\n\
             Reference: ATOMIC DATA FOR FUSION VOLUME 1 COLLISIONS OF H, H2, He and Li ATOMS \
             and IONS with ATOMS and MOLECULES. C. F. Barnett.\n\
             Notes: Large variations in measured dissociation cross sections have been \
             ascribed to the influence of H3+ ion sources with varying degree of vibrational \
             excitation.\n\
             Accuracy: 30%.",
            3.0,
            &[
                -75.4231, 0.295854, -0.985779, -0.0762360, 0.0980699, -0.0248092, -0.0512818,
            ],
        )?,
        // Fast H2 production and destruction.
        barnett(
            "H2 + H2 -> total H2 destruction",
            Product::H2,
            (1.3e3, 5.0e4),
            "Total H2 destruction from H2 + H2.\n\
             Reference: ATOMIC DATA FOR FUSION VOLUME 1 COLLISIONS OF H, H2, He and Li ATOMS \
             and IONS with ATOMS and MOLECULES. C. F. Barnett.\n\
             Notes: This cross section is the sum of cross sections for all reactions that \
             destroy the fast H2 molecule in passage through H2, i.e. those producing fast \
             H2+, (H + H), (H + H+) and (H+ + H+) products. Large variations in ion source \
             operating conditions were found to produce changes up to 10% in the measured \
             cross section.\n\
             Accuracy: 20%.",
            2.0,
            &[
                -71.8671, 0.380700, -0.137630, -0.0886297, -0.00459765, 0.0134628, 0.00197498,
            ],
        )?,
        tabata(
            "H+ + H2 -> H2 momentum transfer",
            Product::H2,
            (1.00e-1, 1.00e4),
            "H2 production from H+ + H2 due to momentum transfer.\n\
             Reference: The Collected Works of Tatsuo Tabata, Volume 17, Atomic and Molecular \
             Collision Cross Section (2). T. Tabata.\n\
             Notes: none.\n\
             RMS: 4.9%.",
            TabataForm::Form1,
            &[0.0, 5.74, -5.765e-1, 2.79e-2, 1.737],
        )?,
        tabata(
            "H + H2 -> H2 momentum transfer",
            Product::H2,
            (1.00e-1, 1.00e4),
            "H2 production from H + H2 due to momentum transfer.\n\
             Reference: The Collected Works of Tatsuo Tabata, Volume 17, Atomic and Molecular \
             Collision Cross Section (2). T. Tabata.\n\
             Notes: none.\n\
             RMS: 2.6%.",
            TabataForm::Form6,
            &[0.0, 6.36, -3.37e-1, 5.5e-3, 8.3e-1, 2.6e-2, 1.766],
        )?,
        tabata(
            "H- + H2 -> H2 momentum transfer",
            Product::H2,
            (1.00e-1, 1.00e4),
            "H2 production from H- + H2 due to momentum transfer.\n\
             Reference: The Collected Works of Tatsuo Tabata, Volume 17, Atomic and Molecular \
             Collision Cross Section (2). T. Tabata.\n\
             Notes: none.\n\
             RMS: 1.5%.",
            TabataForm::Form6,
            &[0.0, 2.97e1, 4.095e-3, 1.11e-4, 5.55e-1, 6.0e-3, 1.607],
        )?,
        barnett(
            "H2+ + H2 -> fast H2 charge exchange",
            Product::H2,
            (2.0, 1.0e5),
            "H2 production from H2+ + H2 due to charge exchange.\n\
             Reference: ATOMIC DATA FOR FUSION VOLUME 1 COLLISIONS OF H, H2, He and Li ATOMS \
             and IONS with ATOMS and MOLECULES. C. F. Barnett.\n\
             Notes: It is well known that the H2+ electron capture cross sections are \
             dependent on the vibrational levels of the H2+ ion. The effect increases as the \
             energy decreases.\n\
             Accuracy: 30% for energy < 2e3, 20% for energy > 2e3.",
            2.0,
            &[
                -71.4572, -1.88878, -0.906965, -0.676593, -0.388666, -0.0528444, 0.0283239,
                -0.0386419, 0.00767518,
            ],
        )?,
        tabata(
            "H3+ + H2 -> H2 momentum transfer",
            Product::H2,
            (1.00e-1, 1.00e4),
            "H2 production from H3+ + H2 due to momentum transfer.\n\
             Reference: The Collected Works of Tatsuo Tabata, Volume 17, Atomic and Molecular \
             Collision Cross Section (2). T. Tabata.\n\
             Notes: none.\n\
             RMS: 5.6%.",
            TabataForm::Form14,
            &[
                0.0, 1.16, -8.12e-1, 4.29e-4, -1.38e-1, 1.28e-2, 1.33, 8.67e-2, 2.18,
            ],
        )?,
        barnett(
            "H3+ + H2 -> total fast H2",
            Product::H2,
            (3.0e1, 6.0e5),
            "Total H2 production from H3+ + H2.\n\
             Reference: ATOMIC DATA FOR FUSION VOLUME 1 COLLISIONS OF H, H2, He and Li ATOMS \
             and IONS with ATOMS and MOLECULES. C. F. Barnett.\n\
             Notes: Large variations in measured dissociation cross sections have been \
             ascribed to the influence of H3+ ion sources with varying degree of vibrational \
             excitation.\n\
             Accuracy: 30%.",
            3.0,
            &[
                -74.8168, -0.899995, -1.57067, -0.379862, 0.384429, 0.264557, 0.0263143,
            ],
        )?,
        // Fast H3+ production and destruction.
        barnett(
            "H3+ + H2 -> total H3+ destruction",
            Product::H3Plus,
            (1.6e3, 3.5e4),
            "Total H3+ destruction from H3+ + H2.\n\
             Reference: ATOMIC DATA FOR FUSION VOLUME 1 COLLISIONS OF H, H2, He and Li ATOMS \
             and IONS with ATOMS and MOLECULES. C. F. Barnett.\n\
             Notes: This cross section is the sum of cross sections for all reactions that \
             destroy the H3+ molecular ion in passage through H2. Large variations in ion \
             source operating conditions were found to produce changes up to 10% in the \
             measured cross sections.\n\
             Accuracy: 20%.",
            3.0,
            &[
                -70.3701, 0.284601, -0.184305, -0.0425670, -0.00921848, 0.00921848, 0.00698594,
                0.00725332,
            ],
        )?,
        tabata(
            "H2+ + H2 -> H3+ + H",
            Product::H3Plus,
            (1.00e-1, 1.78e1),
            "H3+ production from H2+ + H2.\n\
             Reference: The Collected Works of Tatsuo Tabata, Volume 17, Atomic and Molecular \
             Collision Cross Section (2). T. Tabata.\n\
             Notes: none.\n\
             RMS: 1.2%.",
            TabataForm::Form6,
            &[0.0, 6.05, -5.247e-1, 4.088e-3, 2.872, 7.3e-3, 6.99],
        )?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::GridSpec;

    #[test]
    fn database_loads_every_reaction() {
        let db = ReactionDatabase::load().unwrap();
        assert_eq!(db.len(), 26);
        assert!(!db.is_empty());
    }

    #[test]
    fn every_product_group_is_nonempty() {
        let db = ReactionDatabase::load().unwrap();
        for product in Product::ALL {
            assert!(
                db.by_product(product).count() > 0,
                "no reactions filed under {product}"
            );
        }
    }

    #[test]
    fn lookup_by_label_round_trips() {
        let db = ReactionDatabase::load().unwrap();
        for label in db.labels().collect::<Vec<_>>() {
            let reaction = db.get(label).unwrap();
            assert_eq!(reaction.label(), label);
        }
        assert!(db.get("He + H2 -> nothing").is_none());
    }

    #[test]
    fn every_fit_evaluates_finite_and_nonnegative() {
        let mut db = ReactionDatabase::load().unwrap();
        let labels: Vec<_> = db.labels().collect();
        for label in labels {
            let reaction = db.get_mut(label).unwrap();
            let fit = reaction.fit_mut();
            let (low, high) = fit.domain();
            fit.set_grid(GridSpec::Count(64)).unwrap();
            let sigma = fit.evaluate().unwrap();
            assert_eq!(sigma.len(), 64);
            assert!(
                sigma.iter().all(|s| s.is_finite() && *s >= 0.0),
                "{label} not finite over ({low}, {high})"
            );
        }
    }

    #[test]
    fn barnett_low_energy_domain_is_scaled_by_projectile_mass() {
        let db = ReactionDatabase::load().unwrap();
        let reaction = db.get("H2+ + H2 -> total fast H+ low energy").unwrap();
        let (low, high) = reaction.fit().domain();
        assert!((low - 3.2).abs() < 1e-12);
        assert!((high - 10.0).abs() < 1e-12);
    }
}
