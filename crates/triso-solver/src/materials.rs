//! Material properties for the coated-particle layers.
//!
//! A [`Material`] is a resolved, read-only bundle of scalars by the time
//! the finite-element core sees it: the creep coefficient has already
//! been selected (fixed value or temperature correlation) and the
//! irradiation swelling rates evaluated from the configured correlation
//! at the material's fast fluence.

use crate::error::{Result, SolverError};

/// Empirical irradiation-induced dimensional change correlation.
///
/// The cases correspond to published curve fits for pyrocarbon swelling
/// as a function of fast fluence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwellingCorrelation {
    CaseB,
    CaseC,
    CaseD,
}

/// Material property record for one layer type.
///
/// Units follow the input convention: stresses and moduli in MPa,
/// lengths in um, temperature in C, fast fluence in 10^25 n/m^2.
/// Density is converted to t/mm^3 on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Material ID
    pub id: u32,
    /// Material name
    pub name: String,
    /// Irradiation temperature [C]
    pub temperature: f64,
    /// Fast fluence [10^25 n/m^2]
    pub fluence: f64,
    /// Elastic modulus E [MPa]
    pub elastic_modulus: f64,
    /// Poisson ratio v [-]
    pub poissons_ratio: f64,
    /// Density [t/mm^3]
    pub density: f64,
    /// Thermal expansion coefficient [1/K]
    pub thermal_expansion: f64,
    /// Mean strength [MPa]
    pub mean_strength: f64,
    /// Weibull modulus [-]
    pub weibull_modulus: f64,
    /// Irradiation creep coefficient K [1/MPa]
    pub creep_coefficient: f64,
    /// Whether K was resolved from the temperature correlation
    pub creep_temperature_dependent: bool,
    /// Creep Poisson ratio vc [-]
    pub creep_poissons_ratio: f64,
    /// Swelling correlation the strain rates were resolved from
    pub swelling_correlation: Option<SwellingCorrelation>,
    /// Radial irradiation-induced strain rate er [-]
    pub radial_swelling_rate: f64,
    /// Tangential irradiation-induced strain rate et [-]
    pub tangential_swelling_rate: f64,
}

impl Material {
    /// Create a material with its elastic properties; creep and swelling
    /// are configured afterwards through the setters.
    ///
    /// `density` is given in g/cm^3 and stored in t/mm^3.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u32,
        name: impl Into<String>,
        temperature: f64,
        fluence: f64,
        elastic_modulus: f64,
        poissons_ratio: f64,
        density: f64,
        thermal_expansion: f64,
        mean_strength: f64,
        weibull_modulus: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            temperature,
            fluence,
            elastic_modulus,
            poissons_ratio,
            density: density * 1e-9,
            thermal_expansion,
            mean_strength,
            weibull_modulus,
            creep_coefficient: 0.0,
            creep_temperature_dependent: false,
            creep_poissons_ratio: 0.0,
            swelling_correlation: None,
            radial_swelling_rate: 0.0,
            tangential_swelling_rate: 0.0,
        }
    }

    /// Select whether the creep coefficient follows the temperature
    /// correlation. When enabled, K is evaluated immediately from the
    /// material temperature and later fixed-value overrides are ignored.
    pub fn set_creep_temperature_dependent(&mut self, dependent: bool) {
        self.creep_temperature_dependent = dependent;
        if dependent {
            let t = self.temperature;
            self.creep_coefficient = 4.386e-4 - 9.70e-7 * t + 8.0294e-10 * t * t;
        }
    }

    /// Set a fixed creep coefficient. Ignored when the temperature
    /// correlation is active.
    pub fn set_creep_coefficient(&mut self, creep_coefficient: f64) {
        if !self.creep_temperature_dependent {
            self.creep_coefficient = creep_coefficient;
        }
    }

    /// Set the creep Poisson ratio.
    pub fn set_creep_poissons_ratio(&mut self, creep_poissons_ratio: f64) {
        self.creep_poissons_ratio = creep_poissons_ratio;
    }

    /// Resolve the radial and tangential swelling rates from a
    /// correlation case at the material's fast fluence.
    pub fn set_swelling_correlation(&mut self, correlation: SwellingCorrelation) {
        self.swelling_correlation = Some(correlation);
        let phi = self.fluence;
        match correlation {
            SwellingCorrelation::CaseB => {
                self.radial_swelling_rate =
                    1.36334e-3 * phi.powi(3) - 7.77024e-3 * phi.powi(2) + 2.00861e-2 * phi
                        - 2.22642e-2;
                self.tangential_swelling_rate =
                    -3.53804e-4 * phi.powi(3) + 1.67251e-3 * phi.powi(2) + 2.63307e-3 * phi
                        - 1.91253e-2;
            }
            SwellingCorrelation::CaseC => {
                self.radial_swelling_rate =
                    4.03266e-4 * phi.powi(3) - 2.25937e-3 * phi.powi(2) + 9.82884e-3 * phi
                        - 1.80613e-2;
                self.tangential_swelling_rate =
                    -4.91648e-4 * phi.powi(3) + 2.32979e-3 * phi.powi(2) + 1.71315e-3 * phi
                        - 1.78392e-2;
            }
            SwellingCorrelation::CaseD => {
                // The case-D fit saturates above phi = 6.08.
                if phi <= 6.08 {
                    self.radial_swelling_rate = 4.52013e-4 * phi.powi(5)
                        - 8.36313e-3 * phi.powi(4)
                        + 5.67549e-2 * phi.powi(3)
                        - 1.74247e-1 * phi.powi(2)
                        + 2.62692e-1 * phi
                        - 1.43234e-1;
                    self.tangential_swelling_rate =
                        1.30457e-4 * phi.powi(3) - 2.10029e-3 * phi.powi(2) + 9.07826e-3 * phi
                            - 3.24737e-2;
                } else {
                    self.radial_swelling_rate = 0.0954;
                    self.tangential_swelling_rate = -0.0249;
                }
            }
        }
    }

    /// Isotropic-elasticity stiffness moduli (d11, d12) used as nodal
    /// initial conditions:
    ///
    /// ```text
    /// d11 = E (1 - v) / ((1 + v) + (1 - 2v))
    /// d12 = E (2 v)   / ((1 + v) + (1 - 2v))
    /// ```
    pub fn stiffness_moduli(&self) -> (f64, f64) {
        let e = self.elastic_modulus;
        let v = self.poissons_ratio;
        let denominator = (1.0 + v) + (1.0 - 2.0 * v);
        let d11 = e * (1.0 - v) / denominator;
        let d12 = e * (2.0 * v) / denominator;
        (d11, d12)
    }

    /// Check that the elastic constants admit the constitutive and
    /// weak-form expressions (no zero denominators).
    pub fn validate_for_structural(&self) -> Result<()> {
        let invalid = |reason: String| SolverError::InvalidMaterial {
            name: self.name.clone(),
            reason,
        };

        if !(self.elastic_modulus > 0.0) {
            return Err(invalid(format!(
                "elastic modulus must be positive, got {}",
                self.elastic_modulus
            )));
        }
        let v = self.poissons_ratio;
        if v == 1.0 {
            return Err(invalid("Poisson ratio of 1 is not admissible".to_string()));
        }
        if (1.0 + v) + (1.0 - 2.0 * v) == 0.0 {
            return Err(invalid(format!(
                "Poisson ratio {v} makes the stiffness-modulus denominator vanish"
            )));
        }
        if !v.is_finite() || !self.fluence.is_finite() {
            return Err(invalid("non-finite elastic or fluence input".to_string()));
        }
        Ok(())
    }
}
