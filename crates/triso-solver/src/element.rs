//! 2-node radial shell element for creep/swelling analysis.
//!
//! The element discretizes the radial displacement of a spherical shell
//! under irradiation creep and swelling. It has 2 nodes with one radial
//! DOF each.
//!
//! ## Element Formulation
//!
//! Local operators, all formed from the layer material:
//! ```text
//! C = (1/E) * [ 1      -2v  ]        elastic compliance
//!             [ -v     1-v  ]
//!
//! A = K * [ 1      -2vc ]            irradiation-creep compliance
//!         [ -vc    1-vc ]
//!
//! G = inverse(C + beta * phi * A)    time-blended coupled operator
//! ```
//!
//! The stiffness matrix and load vector come from 2-point Gauss
//! quadrature of a spherical-shell-weighted weak form over the natural
//! coordinate r in [-1, 1], with linear shape functions
//! N1 = (1-r)/2, N2 = (1+r)/2 and Jacobian J = L/2:
//! ```text
//! Ke[a][b] += 4*pi*w * ( (r^2/J) DNa DNb
//!                        + (2 - zeta1) r Na DNb
//!                        - zeta2 J Na Nb )
//! Fee[a]   += -4*pi*w * r J (r lambda1 + lambda2) Na
//! ```
//! where zeta1/zeta2 carry the nodal stiffness-modulus gradients and
//! lambda1/lambda2 the irradiation strain-rate gradients.

use std::f64::consts::PI;

use nalgebra::{Matrix2, Vector2};

use crate::error::{Result, SolverError};
use crate::materials::Material;
use crate::mesh::{Node, Region};

/// 2-node spherical-shell element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Element ID (1-based, equal to its position in the chain)
    pub id: usize,
    /// Index of the inner node in the mesh node list
    pub node1: usize,
    /// Index of the outer node in the mesh node list
    pub node2: usize,
    /// Coating layer this element belongs to
    pub region: Region,
    /// Constitutive (elastic compliance) matrix C
    pub constitutive: Matrix2<f64>,
    /// Irradiation-creep compliance matrix A
    pub irradiation: Matrix2<f64>,
    /// Coupled operator G = (C + beta*phi*A)^-1
    pub coupled: Matrix2<f64>,
    /// Element stiffness matrix Ke
    pub stiffness: Matrix2<f64>,
    /// Internal force vector Fei
    pub internal_force: Vector2<f64>,
    /// External force vector Fee
    pub external_force: Vector2<f64>,
    /// Element displacement vector ue
    pub displacement: Vector2<f64>,
    /// Stiffness modulus d11 carried by this element [MPa]
    pub d11: f64,
    /// Stiffness modulus d12 carried by this element [MPa]
    pub d12: f64,
    /// Radial irradiation strain rate carried by this element
    pub er: f64,
    /// Tangential irradiation strain rate carried by this element
    pub et: f64,
}

impl Element {
    /// Create an element between two node indices (inner first).
    pub fn new(id: usize, node1: usize, node2: usize, region: Region) -> Self {
        Self {
            id,
            node1,
            node2,
            region,
            constitutive: Matrix2::zeros(),
            irradiation: Matrix2::zeros(),
            coupled: Matrix2::zeros(),
            stiffness: Matrix2::zeros(),
            internal_force: Vector2::zeros(),
            external_force: Vector2::zeros(),
            displacement: Vector2::zeros(),
            d11: 0.0,
            d12: 0.0,
            er: 0.0,
            et: 0.0,
        }
    }

    /// Form the constitutive matrix C from the elastic constants.
    pub fn set_constitutive(&mut self, material: &Material) -> Result<()> {
        let e = material.elastic_modulus;
        let v = material.poissons_ratio;
        if e == 0.0 {
            return Err(SolverError::InvalidMaterial {
                name: material.name.clone(),
                reason: "elastic modulus is zero".to_string(),
            });
        }

        self.constitutive = Matrix2::new(
            1.0 / e,
            -2.0 * v / e,
            -v / e,
            (1.0 - v) / e,
        );
        Ok(())
    }

    /// Form the irradiation-creep compliance matrix A.
    pub fn set_irradiation(&mut self, material: &Material) {
        let k = material.creep_coefficient;
        let vc = material.creep_poissons_ratio;

        self.irradiation = Matrix2::new(
            k,
            -2.0 * vc * k,
            -vc * k,
            (1.0 - vc) * k,
        );
    }

    /// Form the coupled operator G = (C + beta*phi*A)^-1.
    ///
    /// `beta` blends the time integration (0 explicit, 0.5
    /// Crank-Nicolson, 1 implicit); the creep contribution scales with
    /// the material's fast fluence.
    pub fn set_coupled(&mut self, beta: f64, material: &Material) -> Result<()> {
        let blended = self.constitutive + self.irradiation * (beta * material.fluence);
        self.coupled = blended
            .try_inverse()
            .ok_or(SolverError::SingularCoupling { element: self.id })?;
        Ok(())
    }

    /// Cache the stiffness moduli and swelling rates on the element and
    /// push them onto both nodes through the node merge rule.
    ///
    /// Each interior node is written by its two adjacent elements, so
    /// the merged nodal value is their mean; element processing order
    /// decides the outcome if more writers ever touch a node.
    pub fn set_initial_conditions(
        &mut self,
        material: &Material,
        node1: &mut Node,
        node2: &mut Node,
    ) {
        let (d11, d12) = material.stiffness_moduli();
        self.d11 = d11;
        self.d12 = d12;
        self.er = material.radial_swelling_rate;
        self.et = material.tangential_swelling_rate;

        node1.set_d11(self.d11);
        node1.set_d12(self.d12);
        node2.set_d11(self.d11);
        node2.set_d12(self.d12);

        node1.set_er(self.er);
        node1.set_et(self.et);
        node2.set_er(self.er);
        node2.set_et(self.et);
    }

    /// Integrate the element stiffness matrix and force vectors with
    /// 2-point Gauss quadrature.
    ///
    /// Ke, Fei, Fee and ue are reset on entry, so the call is idempotent
    /// for unchanged node and material state.
    pub fn integrate(&mut self, node1: &Node, node2: &Node, material: &Material) -> Result<()> {
        self.stiffness = Matrix2::zeros();
        self.internal_force = Vector2::zeros();
        self.external_force = Vector2::zeros();
        self.displacement = Vector2::zeros();

        let points = [(1.0f64 / 3.0).sqrt(), -(1.0f64 / 3.0).sqrt()];
        let weights = [1.0, 1.0];

        let length = node2.x - node1.x;
        let jacobian = length / 2.0;
        let v = material.poissons_ratio;

        for (&r, &w) in points.iter().zip(weights.iter()) {
            let n1 = (1.0 - r) / 2.0;
            let n2 = (1.0 + r) / 2.0;
            let dn1 = -1.0 / 2.0;
            let dn2 = 1.0 / 2.0;

            // Half-length gradients and Gauss-point value of the
            // stiffness moduli interpolated from the nodes.
            let dd11 = (node2.d11 - node1.d11) / 2.0;
            let dd12 = (node2.d12 - node1.d12) / 2.0;
            let d11 = n1 * node1.d11 + n2 * node2.d11;
            if d11 == 0.0 {
                return Err(SolverError::DegenerateStiffness { element: self.id });
            }

            let zeta1 = 2.0 + (r / d11) * dd11;
            let zeta2 = -2.0 + (r / d11) * dd12;

            // Irradiation strain-rate interpolation and gradients.
            let deret = ((node2.er - node2.et) - (node1.er - node1.et)) / 2.0;
            let det = (node2.et - node1.et) / 2.0;
            let er = n1 * node1.er + n2 * node2.er;
            let et = n1 * node1.et + n2 * node2.et;

            let lambda1 = deret + ((1.0 + v) / (1.0 - v)) * det;
            let lambda2 = 2.0 * ((1.0 - 2.0 * v) / (1.0 - v)) * (er - et)
                + (r / d11) * dd11 * er
                + (r / d11) * dd12 * et;

            let shape = [(n1, dn1), (n2, dn2)];
            for (a, &(na, dna)) in shape.iter().enumerate() {
                for (b, &(nb, dnb)) in shape.iter().enumerate() {
                    self.stiffness[(a, b)] += 4.0
                        * w
                        * PI
                        * ((r * r / jacobian) * dna * dnb
                            + (2.0 - zeta1) * r * na * dnb
                            - zeta2 * jacobian * na * nb);
                }
                self.external_force[a] +=
                    -4.0 * w * PI * r * jacobian * (r * lambda1 + lambda2) * na;
            }

            // Boundary flux evaluations at r = -1 and r = +1. The du/dr
            // factor stays zero until an incremental time-stepping
            // scheme supplies the previous-step displacement gradient.
            let (r_minus, r_plus) = (-1.0, 1.0);
            let du_dr = 0.0;
            self.internal_force[0] += 0.5 * (-4.0 * PI * r_minus * r_minus * du_dr);
            self.internal_force[1] += 0.5 * (4.0 * PI * r_plus * r_plus * du_dr);
        }

        Ok(())
    }
}
