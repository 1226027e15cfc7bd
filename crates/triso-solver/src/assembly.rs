//! Global system assembly and the dense linear solve.
//!
//! Assembles element stiffness matrices and force vectors into the
//! global system K * u = F:
//!
//! 1. Zero the global stiffness matrix and force vectors
//! 2. Loop over elements in chain order:
//!    - re-integrate Ke / Fei / Fee by quadrature
//!    - scatter-add the 2x2 Ke block into K at rows/cols {i, i+1}
//!    - assign Fei into Fi at {i, i+1} (assignment, not accumulation:
//!      a later element overwrites the shared-node entry; Fei is
//!      currently always zero so this has no visible effect)
//!    - scatter-add Fee into Fe at {i, i+1}
//! 3. Solve the dense system by LU decomposition
//!
//! The assembly applies NO boundary conditions itself. For the pure
//! Neumann-free weak form used here K is invertible by construction;
//! callers that need a constrained solution impose it through the
//! penalty method before solving.

use log::{debug, info};
use nalgebra::{DMatrix, DVector};

use crate::error::{Result, SolverError};
use crate::mesh::{Mesh, Region};

/// Penalty factor for externally imposed displacement constraints.
const PENALTY: f64 = 1e10;

/// Global finite element system over the radial DOF chain.
#[derive(Debug, Clone)]
pub struct GlobalSystem {
    /// Global stiffness matrix K (dense)
    pub stiffness: DMatrix<f64>,
    /// Global internal force vector Fi
    pub internal_force: DVector<f64>,
    /// Global external force vector Fe
    pub external_force: DVector<f64>,
    /// Combined force vector F = Fi + Fe (formed on solve)
    pub force: DVector<f64>,
    /// Global displacement vector u (filled on solve)
    pub displacement: DVector<f64>,
    /// Number of degrees of freedom
    pub num_dofs: usize,
    /// DOFs with an externally imposed penalty constraint
    pub constrained_dofs: Vec<usize>,
}

impl GlobalSystem {
    /// Create an empty global system.
    pub fn new(num_dofs: usize) -> Self {
        Self {
            stiffness: DMatrix::zeros(num_dofs, num_dofs),
            internal_force: DVector::zeros(num_dofs),
            external_force: DVector::zeros(num_dofs),
            force: DVector::zeros(num_dofs),
            displacement: DVector::zeros(num_dofs),
            num_dofs,
            constrained_dofs: Vec::new(),
        }
    }

    /// Assemble the global system from a mesh.
    pub fn assemble(mesh: &mut Mesh) -> Result<Self> {
        let mut system = Self::new(mesh.num_dofs());
        system.reassemble(mesh)?;
        Ok(system)
    }

    /// Re-run the full assembly: zero the globals, re-integrate every
    /// element in chain order and scatter its contributions.
    ///
    /// Externally imposed constraints are discarded; re-apply them
    /// before the next solve.
    pub fn reassemble(&mut self, mesh: &mut Mesh) -> Result<()> {
        self.stiffness.fill(0.0);
        self.internal_force.fill(0.0);
        self.external_force.fill(0.0);
        self.constrained_dofs.clear();

        let Mesh {
            nodes,
            elements,
            pyc,
            sic,
            ..
        } = mesh;

        for element in elements.iter_mut() {
            let material = match element.region {
                Region::SiC => &*sic,
                _ => &*pyc,
            };
            element.integrate(&nodes[element.node1], &nodes[element.node2], material)?;

            // The element's two local DOFs map to global rows i, i+1.
            let i = element.id - 1;
            for a in 0..2 {
                for b in 0..2 {
                    self.stiffness[(i + a, i + b)] += element.stiffness[(a, b)];
                }
            }

            // Assignment, not accumulation: see module docs.
            self.internal_force[i] = element.internal_force[0];
            self.internal_force[i + 1] = element.internal_force[1];

            self.external_force[i] += element.external_force[0];
            self.external_force[i + 1] += element.external_force[1];
        }

        debug!(
            "assembled {} elements into a {}x{} system",
            mesh.elements.len(),
            self.num_dofs,
            self.num_dofs
        );
        Ok(())
    }

    /// Impose a displacement value on one DOF through the penalty
    /// method. Must be re-applied after every [`Self::reassemble`].
    pub fn apply_displacement_bc(&mut self, dof: usize, value: f64) -> Result<()> {
        if dof >= self.num_dofs {
            return Err(SolverError::DofOutOfRange {
                dof,
                num_dofs: self.num_dofs,
            });
        }
        self.stiffness[(dof, dof)] += PENALTY;
        self.external_force[dof] += PENALTY * value;
        self.constrained_dofs.push(dof);
        Ok(())
    }

    /// Add a concentrated load to one DOF.
    pub fn apply_point_load(&mut self, dof: usize, magnitude: f64) -> Result<()> {
        if dof >= self.num_dofs {
            return Err(SolverError::DofOutOfRange {
                dof,
                num_dofs: self.num_dofs,
            });
        }
        self.external_force[dof] += magnitude;
        Ok(())
    }

    /// Check the assembled matrix before solving: all entries finite,
    /// no zero diagonal.
    pub fn validate(&self) -> Result<()> {
        for i in 0..self.num_dofs {
            if self.stiffness[(i, i)] == 0.0 {
                return Err(SolverError::IllConditioned { dof: i });
            }
            for j in 0..self.num_dofs {
                if !self.stiffness[(i, j)].is_finite() {
                    return Err(SolverError::IllConditioned { dof: i });
                }
            }
        }
        Ok(())
    }

    /// Form F = Fi + Fe and solve K * u = F by LU decomposition.
    ///
    /// Precondition: the caller has imposed any constraints it needs;
    /// the solver applies none. A singular K is a fatal error.
    pub fn solve(&mut self) -> Result<&DVector<f64>> {
        self.force = &self.internal_force + &self.external_force;
        self.displacement = self
            .stiffness
            .clone()
            .lu()
            .solve(&self.force)
            .ok_or(SolverError::SingularSystem)?;

        info!(
            "solved {} DOF system, |u|_max = {:.6e}",
            self.num_dofs,
            self.displacement.amax()
        );
        Ok(&self.displacement)
    }

    /// Copy each element's two displacement entries back from the
    /// global solution.
    pub fn scatter_displacements(&self, mesh: &mut Mesh) {
        for element in mesh.elements.iter_mut() {
            let i = element.id - 1;
            element.displacement[0] = self.displacement[i];
            element.displacement[1] = self.displacement[i + 1];
        }
    }
}
