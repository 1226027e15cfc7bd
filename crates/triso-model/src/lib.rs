//! Input-deck parser for the coated-particle fuel model parameters.
//!
//! The deck is a flat list of `name = value` assignments, one per line,
//! with `#` comments. Every parameter is required; unknown or duplicate
//! names are rejected so a typo cannot silently fall back to a default.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("missing parameter `{0}`")]
    MissingParameter(&'static str),

    #[error("invalid model: {0}")]
    Invalid(String),
}

/// The full parameter set describing one coated particle and its
/// irradiation history.
///
/// Lengths are in micrometers, densities in g/cm^3, pressures in MPa,
/// temperatures in degrees Celsius and fast fluence in 10^25 n/m^2.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleModel {
    /// Fuel kernel diameter [um]
    pub kernel_diameter: f64,
    /// Buffer layer thickness [um]
    pub buffer_thickness: f64,
    /// Inner pyrocarbon layer thickness [um]
    pub ipyc_thickness: f64,
    /// Silicon carbide layer thickness [um]
    pub sic_thickness: f64,
    /// Outer pyrocarbon layer thickness [um]
    pub opyc_thickness: f64,
    /// Kernel density [g/cm^3]
    pub kernel_density: f64,
    /// Buffer density [g/cm^3]
    pub buffer_density: f64,
    /// IPyC density [g/cm^3]
    pub ipyc_density: f64,
    /// SiC density [g/cm^3]
    pub sic_density: f64,
    /// OPyC density [g/cm^3]
    pub opyc_density: f64,
    /// IPyC Bacon anisotropy factor [-]
    pub ipyc_baf: f64,
    /// OPyC Bacon anisotropy factor [-]
    pub opyc_baf: f64,
    /// Irradiation duration [effective full-power days]
    pub irradiation_duration: f64,
    /// End-of-life burnup [% FIMA]
    pub end_life_burnup: f64,
    /// End-of-life fast fluence [10^25 n/m^2]
    pub end_life_fluence: f64,
    /// Irradiation temperature [C]
    pub irradiation_temperature: f64,
    /// End-of-life internal gas pressure [MPa]
    pub end_life_internal_pressure: f64,
    /// Ambient (coolant) pressure [MPa]
    pub ambient_pressure: f64,
    /// Number of finite elements per coating layer
    pub elements_per_region: usize,
    /// Time-integration blend (0 explicit, 0.5 Crank-Nicolson, 1 implicit)
    pub beta: f64,
}

impl ParticleModel {
    /// Parse a model deck from a file on disk.
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse_str(&raw)
    }

    /// Parse a model deck from a string.
    pub fn parse_str(raw: &str) -> Result<Self> {
        let mut entries: HashMap<String, (usize, String)> = HashMap::new();

        for (idx, line) in raw.lines().enumerate() {
            let line_no = idx + 1;
            let content = match line.split_once('#') {
                Some((before, _)) => before,
                None => line,
            };
            let content = content.trim();
            if content.is_empty() {
                continue;
            }

            let (key, value) = content.split_once('=').ok_or_else(|| ModelError::Parse {
                line: line_no,
                message: format!("expected `name = value`, got `{content}`"),
            })?;
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim().to_string();

            if entries.insert(key.clone(), (line_no, value)).is_some() {
                return Err(ModelError::Parse {
                    line: line_no,
                    message: format!("duplicate parameter `{key}`"),
                });
            }
        }

        let model = Self {
            kernel_diameter: take_f64(&mut entries, "kernel_diameter")?,
            buffer_thickness: take_f64(&mut entries, "buffer_thickness")?,
            ipyc_thickness: take_f64(&mut entries, "ipyc_thickness")?,
            sic_thickness: take_f64(&mut entries, "sic_thickness")?,
            opyc_thickness: take_f64(&mut entries, "opyc_thickness")?,
            kernel_density: take_f64(&mut entries, "kernel_density")?,
            buffer_density: take_f64(&mut entries, "buffer_density")?,
            ipyc_density: take_f64(&mut entries, "ipyc_density")?,
            sic_density: take_f64(&mut entries, "sic_density")?,
            opyc_density: take_f64(&mut entries, "opyc_density")?,
            ipyc_baf: take_f64(&mut entries, "ipyc_baf")?,
            opyc_baf: take_f64(&mut entries, "opyc_baf")?,
            irradiation_duration: take_f64(&mut entries, "irradiation_duration")?,
            end_life_burnup: take_f64(&mut entries, "end_life_burnup")?,
            end_life_fluence: take_f64(&mut entries, "end_life_fluence")?,
            irradiation_temperature: take_f64(&mut entries, "irradiation_temperature")?,
            end_life_internal_pressure: take_f64(&mut entries, "end_life_internal_pressure")?,
            ambient_pressure: take_f64(&mut entries, "ambient_pressure")?,
            elements_per_region: take_usize(&mut entries, "elements_per_region")?,
            beta: take_f64(&mut entries, "beta")?,
        };

        if let Some((key, (line, _))) = entries.iter().min_by_key(|(_, (line, _))| *line) {
            return Err(ModelError::Parse {
                line: *line,
                message: format!("unknown parameter `{key}`"),
            });
        }

        model.validate()?;
        Ok(model)
    }

    /// Check basic consistency of the parameter set.
    pub fn validate(&self) -> Result<()> {
        if self.kernel_diameter <= 0.0 {
            return Err(ModelError::Invalid(format!(
                "kernel diameter must be positive, got {}",
                self.kernel_diameter
            )));
        }
        for (name, value) in [
            ("buffer_thickness", self.buffer_thickness),
            ("ipyc_thickness", self.ipyc_thickness),
            ("sic_thickness", self.sic_thickness),
            ("opyc_thickness", self.opyc_thickness),
        ] {
            if value <= 0.0 {
                return Err(ModelError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.elements_per_region == 0 {
            return Err(ModelError::Invalid(
                "at least one element per region is required".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.beta) {
            return Err(ModelError::Invalid(format!(
                "beta must lie in [0, 1], got {}",
                self.beta
            )));
        }
        if self.end_life_fluence < 0.0 {
            return Err(ModelError::Invalid(format!(
                "end-of-life fluence must be non-negative, got {}",
                self.end_life_fluence
            )));
        }
        Ok(())
    }

    /// Total coating thickness (buffer through OPyC) [um].
    pub fn coating_thickness(&self) -> f64 {
        self.buffer_thickness + self.ipyc_thickness + self.sic_thickness + self.opyc_thickness
    }

    /// Render the model back into deck form.
    pub fn to_deck(&self) -> String {
        let mut lines = vec![
            format!("kernel_diameter = {}", self.kernel_diameter),
            format!("buffer_thickness = {}", self.buffer_thickness),
            format!("ipyc_thickness = {}", self.ipyc_thickness),
            format!("sic_thickness = {}", self.sic_thickness),
            format!("opyc_thickness = {}", self.opyc_thickness),
            format!("kernel_density = {}", self.kernel_density),
            format!("buffer_density = {}", self.buffer_density),
            format!("ipyc_density = {}", self.ipyc_density),
            format!("sic_density = {}", self.sic_density),
            format!("opyc_density = {}", self.opyc_density),
            format!("ipyc_baf = {}", self.ipyc_baf),
            format!("opyc_baf = {}", self.opyc_baf),
            format!("irradiation_duration = {}", self.irradiation_duration),
            format!("end_life_burnup = {}", self.end_life_burnup),
            format!("end_life_fluence = {}", self.end_life_fluence),
            format!(
                "irradiation_temperature = {}",
                self.irradiation_temperature
            ),
            format!(
                "end_life_internal_pressure = {}",
                self.end_life_internal_pressure
            ),
            format!("ambient_pressure = {}", self.ambient_pressure),
            format!("elements_per_region = {}", self.elements_per_region),
            format!("beta = {}", self.beta),
        ];
        lines.push(String::new());
        lines.join("\n")
    }
}

impl Default for ParticleModel {
    /// Reference parameter set for a standard UO2 TRISO particle.
    fn default() -> Self {
        Self {
            kernel_diameter: 500.0,
            buffer_thickness: 95.0,
            ipyc_thickness: 40.0,
            sic_thickness: 35.0,
            opyc_thickness: 40.0,
            kernel_density: 10.4,
            buffer_density: 1.05,
            ipyc_density: 1.90,
            sic_density: 3.20,
            opyc_density: 1.90,
            ipyc_baf: 1.035,
            opyc_baf: 1.023,
            irradiation_duration: 600.0,
            end_life_burnup: 10.0,
            end_life_fluence: 10.0,
            irradiation_temperature: 1000.0,
            end_life_internal_pressure: 25.0,
            ambient_pressure: 0.1,
            elements_per_region: 10,
            beta: 0.5,
        }
    }
}

fn take_raw(
    entries: &mut HashMap<String, (usize, String)>,
    key: &'static str,
) -> Result<(usize, String)> {
    entries
        .remove(key)
        .ok_or(ModelError::MissingParameter(key))
}

fn take_f64(entries: &mut HashMap<String, (usize, String)>, key: &'static str) -> Result<f64> {
    let (line, raw) = take_raw(entries, key)?;
    raw.parse::<f64>().map_err(|_| ModelError::Parse {
        line,
        message: format!("`{key}` is not a number: `{raw}`"),
    })
}

fn take_usize(entries: &mut HashMap<String, (usize, String)>, key: &'static str) -> Result<usize> {
    let (line, raw) = take_raw(entries, key)?;
    raw.parse::<usize>().map_err(|_| ModelError::Parse {
        line,
        message: format!("`{key}` is not a non-negative integer: `{raw}`"),
    })
}
