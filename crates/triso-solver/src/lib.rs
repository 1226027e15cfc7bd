//! Radial finite-element solver for coated-particle fuel mechanics.
//!
//! Models a multi-layer spherical shell (Buffer / IPyC / SiC / OPyC)
//! under irradiation-induced creep and swelling with a one-dimensional
//! chain of 2-node elements, one radial displacement DOF per node. The
//! pipeline is construct -> assemble -> solve; see [`analysis`] for the
//! orchestrator and [`element`] for the quadrature kernel.

pub mod analysis;
pub mod assembly;
pub mod element;
pub mod error;
pub mod materials;
pub mod mesh;
pub mod report;

pub use analysis::{AnalysisConfig, AnalysisOutcome, AnalysisPipeline, AnalysisResults};
pub use assembly::GlobalSystem;
pub use element::Element;
pub use error::{Result, SolverError};
pub use materials::{Material, SwellingCorrelation};
pub use mesh::{Mesh, Node, Region};
