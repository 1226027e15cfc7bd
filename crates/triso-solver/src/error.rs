//! Error types for the solver crate.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SolverError>;

/// Fatal analysis failures. None of these are retried: a singular matrix
/// or a degenerate material aborts the whole computation.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("element {element}: coupled compliance matrix C + beta*phi*A is singular")]
    SingularCoupling { element: usize },

    #[error(
        "global stiffness matrix is singular; the solver applies no boundary \
         conditions itself, so the caller must constrain at least one DOF"
    )]
    SingularSystem,

    #[error("material `{name}`: {reason}")]
    InvalidMaterial { name: String, reason: String },

    #[error("element {element}: stiffness modulus vanished at a quadrature point")]
    DegenerateStiffness { element: usize },

    #[error("DOF index {dof} out of range for a system with {num_dofs} DOFs")]
    DofOutOfRange { dof: usize, num_dofs: usize },

    #[error("global stiffness matrix has a zero or non-finite entry on row {dof}")]
    IllConditioned { dof: usize },

    #[error(transparent)]
    Model(#[from] triso_model::ModelError),
}
