//! Analysis pipeline: construct, assemble, solve.
//!
//! The pipeline is strictly sequential — mesh construction (which runs
//! every element's operator setup in chain order), global assembly,
//! then the dense solve. Any stage failing aborts the run; there is no
//! retry or degraded mode.

use log::info;
use serde::Serialize;
use triso_model::ParticleModel;

use crate::assembly::GlobalSystem;
use crate::error::Result;
use crate::materials::Material;
use crate::mesh::Mesh;

/// Analysis configuration and control.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Whether the pipeline logs per-stage progress at info level
    pub verbose: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { verbose: false }
    }
}

/// Summary of a completed analysis, serializable for results export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResults {
    /// Whether the solve completed
    pub success: bool,
    /// Number of degrees of freedom
    pub num_dofs: usize,
    /// Number of elements in the mesh
    pub num_elements: usize,
    /// Number of nodes in the mesh
    pub num_nodes: usize,
    /// Time-integration blend used
    pub beta: f64,
    /// Inner radius of the coating [um]
    pub inner_radius: f64,
    /// Outer radius of the coating [um]
    pub outer_radius: f64,
    /// Largest displacement magnitude [um]
    pub max_displacement: f64,
    /// Nodal radial displacements in node order [um]
    pub displacements: Vec<f64>,
    /// Human-readable status message
    pub message: String,
}

/// Everything a caller needs after a run: the mesh with per-element
/// state, the assembled global system, and the results summary.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub mesh: Mesh,
    pub system: GlobalSystem,
    pub results: AnalysisResults,
}

/// Orchestrates one linear creep/swelling analysis.
pub struct AnalysisPipeline {
    config: AnalysisConfig,
}

impl AnalysisPipeline {
    /// Create a pipeline with the given configuration.
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Create a pipeline with default configuration.
    pub fn linear_static() -> Self {
        Self::new(AnalysisConfig::default())
    }

    /// Run construct -> assemble -> solve over the model and the two
    /// layer materials.
    pub fn run(
        &self,
        model: &ParticleModel,
        pyc: Material,
        sic: Material,
    ) -> Result<AnalysisOutcome> {
        model.validate()?;

        if self.config.verbose {
            info!(
                "analysis: {} elements per region, beta = {}",
                model.elements_per_region, model.beta
            );
        }

        let mut mesh = Mesh::build(model, pyc, sic)?;
        let mut system = GlobalSystem::assemble(&mut mesh)?;
        system.validate()?;
        system.solve()?;
        system.scatter_displacements(&mut mesh);

        let results = AnalysisResults {
            success: true,
            num_dofs: system.num_dofs,
            num_elements: mesh.elements.len(),
            num_nodes: mesh.nodes.len(),
            beta: mesh.beta,
            inner_radius: mesh.inner_radius,
            outer_radius: mesh.outer_radius,
            max_displacement: system.displacement.amax(),
            displacements: system.displacement.iter().copied().collect(),
            message: format!(
                "solved {} DOF radial system over 4 regions",
                system.num_dofs
            ),
        };

        Ok(AnalysisOutcome {
            mesh,
            system,
            results,
        })
    }
}
