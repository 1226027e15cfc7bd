//! One-dimensional radial mesh over the four coating layers.
//!
//! The mesh is a simple chain: node i and node i+1 bound element i, DOF
//! numbering follows node order with one radial displacement per node,
//! and each quarter of the element range belongs to one coating layer.

use log::debug;
use triso_model::ParticleModel;

use crate::element::Element;
use crate::error::Result;
use crate::materials::Material;

/// Coating layer tag, innermost to outermost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Buffer,
    IPyC,
    SiC,
    OPyC,
}

impl Region {
    /// Layer label as it appears in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Buffer => "Buffer",
            Region::IPyC => "IPyC",
            Region::SiC => "SiC",
            Region::OPyC => "OPyC",
        }
    }

    /// Region of the element with 0-based index `index`, given
    /// `per_region` elements in each of the four layers.
    pub fn from_element_index(index: usize, per_region: usize) -> Self {
        match index / per_region {
            0 => Region::Buffer,
            1 => Region::IPyC,
            2 => Region::SiC,
            _ => Region::OPyC,
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mesh node: one radial DOF at a fixed coordinate, plus derived
/// state contributed by the elements sharing the node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Node ID (1-based)
    pub id: usize,
    /// Radial coordinate [um]
    pub x: f64,
    /// Stiffness modulus d11 [MPa], merged from adjacent elements
    pub d11: f64,
    /// Stiffness modulus d12 [MPa], merged from adjacent elements
    pub d12: f64,
    /// Radial irradiation strain rate, merged from adjacent elements
    pub er: f64,
    /// Tangential irradiation strain rate, merged from adjacent elements
    pub et: f64,
}

/// The shared merge rule for node-level derived fields.
///
/// A field starts at the 0.0 sentinel meaning "no prior write": the first
/// write stores the value, and each later write halves the stored value
/// and adds half the incoming one. With exactly two writers (the two
/// elements sharing an interior node) this is their mean. A third write
/// silently biases the result toward recent writers, and a legitimate
/// 0.0 contribution is indistinguishable from the sentinel; both hazards
/// are accepted properties of this scheme, not checked conditions.
fn merge(field: &mut f64, value: f64) {
    if *field == 0.0 {
        *field += value;
    } else {
        *field /= 2.0;
        *field += value / 2.0;
    }
}

impl Node {
    /// Create a node at radial coordinate `x` with all derived fields at
    /// the unset sentinel.
    pub fn new(id: usize, x: f64) -> Self {
        Self {
            id,
            x,
            d11: 0.0,
            d12: 0.0,
            er: 0.0,
            et: 0.0,
        }
    }

    /// Merge a d11 contribution from an adjacent element.
    pub fn set_d11(&mut self, d11: f64) {
        merge(&mut self.d11, d11);
    }

    /// Merge a d12 contribution from an adjacent element.
    pub fn set_d12(&mut self, d12: f64) {
        merge(&mut self.d12, d12);
    }

    /// Merge a radial strain-rate contribution from an adjacent element.
    pub fn set_er(&mut self, er: f64) {
        merge(&mut self.er, er);
    }

    /// Merge a tangential strain-rate contribution from an adjacent element.
    pub fn set_et(&mut self, et: f64) {
        merge(&mut self.et, et);
    }
}

/// The assembled radial mesh: nodes, elements and the two material
/// records they reference (PyC-type for Buffer/IPyC/OPyC, SiC for the
/// SiC layer).
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Inner radius (kernel surface) [um]
    pub inner_radius: f64,
    /// Outer radius (particle surface) [um]
    pub outer_radius: f64,
    /// Total coating thickness [um]
    pub length: f64,
    /// Elements in each of the four layers
    pub elements_per_region: usize,
    /// Time-integration blend used when forming the coupled operators
    pub beta: f64,
    /// Nodes in radial order, 1-based IDs
    pub nodes: Vec<Node>,
    /// Elements in radial order, 1-based IDs
    pub elements: Vec<Element>,
    /// Material for the pyrocarbon-type layers
    pub pyc: Material,
    /// Material for the SiC layer
    pub sic: Material,
}

impl Mesh {
    /// Build the mesh from the model geometry and the two layer
    /// materials, and run every element's setup in index order.
    ///
    /// Element setup mutates the two adjacent nodes through the merge
    /// rule, so construction order is part of the semantics: node k has
    /// already received element k-1's contribution when element k pushes
    /// its own.
    pub fn build(model: &ParticleModel, pyc: Material, sic: Material) -> Result<Self> {
        pyc.validate_for_structural()?;
        sic.validate_for_structural()?;

        let inner_radius = model.kernel_diameter / 2.0;
        let outer_radius = inner_radius + model.coating_thickness();
        let length = outer_radius - inner_radius;

        let per_region = model.elements_per_region;
        let num_elements = 4 * per_region;
        let num_nodes = num_elements + 1;
        let spacing = length / num_elements as f64;

        debug!(
            "building mesh: {num_elements} elements over [{inner_radius}, {outer_radius}] um"
        );

        let mut nodes: Vec<Node> = (0..num_nodes)
            .map(|i| Node::new(i + 1, inner_radius + spacing * i as f64))
            .collect();

        let mut elements = Vec::with_capacity(num_elements);
        for i in 0..num_elements {
            let region = Region::from_element_index(i, per_region);
            let material = match region {
                Region::SiC => &sic,
                _ => &pyc,
            };

            let mut element = Element::new(i + 1, i, i + 1, region);
            element.set_constitutive(material)?;
            element.set_irradiation(material);
            element.set_coupled(model.beta, material)?;

            let (inner, outer) = nodes.split_at_mut(i + 1);
            element.set_initial_conditions(material, &mut inner[i], &mut outer[0]);

            elements.push(element);
        }

        Ok(Self {
            inner_radius,
            outer_radius,
            length,
            elements_per_region: per_region,
            beta: model.beta,
            nodes,
            elements,
            pyc,
            sic,
        })
    }

    /// One radial displacement DOF per node.
    pub fn num_dofs(&self) -> usize {
        self.nodes.len()
    }

    /// Material assigned to a region.
    pub fn material_for(&self, region: Region) -> &Material {
        match region {
            Region::SiC => &self.sic,
            _ => &self.pyc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::SwellingCorrelation;

    fn pyc() -> Material {
        let mut mat =
            Material::new(1, "PyC", 1000.0, 10.0, 3.96e4, 0.33, 1.90, 5.5e-6, 200.0, 5.0);
        mat.set_creep_temperature_dependent(true);
        mat.set_creep_poissons_ratio(0.5);
        mat.set_swelling_correlation(SwellingCorrelation::CaseB);
        mat
    }

    fn sic() -> Material {
        Material::new(2, "SiC", 1000.0, 10.0, 3.70e5, 0.13, 3.20, 4.9e-6, 873.0, 8.02)
    }

    #[test]
    fn merge_rule_first_write_stores_value() {
        let mut node = Node::new(1, 0.0);
        node.set_d11(5.0);
        assert_eq!(node.d11, 5.0);
    }

    #[test]
    fn merge_rule_second_write_averages() {
        let mut node = Node::new(1, 0.0);
        node.set_d11(5.0);
        node.set_d11(7.0);
        assert_eq!(node.d11, 6.0);
    }

    #[test]
    fn merge_rule_third_write_biases_toward_recent() {
        // The rule assumes two writers; a third halves the running value
        // again, so the result is not the three-way mean.
        let mut node = Node::new(1, 0.0);
        node.set_d11(5.0);
        node.set_d11(7.0);
        node.set_d11(9.0);
        assert_eq!(node.d11, 7.5);
    }

    #[test]
    fn merge_rule_fields_are_independent() {
        let mut node = Node::new(1, 0.0);
        node.set_d11(4.0);
        node.set_er(1.0e-2);
        node.set_er(3.0e-2);
        assert_eq!(node.d11, 4.0);
        assert_eq!(node.er, 2.0e-2);
        assert_eq!(node.d12, 0.0);
        assert_eq!(node.et, 0.0);
    }

    #[test]
    fn region_quartiles() {
        assert_eq!(Region::from_element_index(0, 3), Region::Buffer);
        assert_eq!(Region::from_element_index(2, 3), Region::Buffer);
        assert_eq!(Region::from_element_index(3, 3), Region::IPyC);
        assert_eq!(Region::from_element_index(6, 3), Region::SiC);
        assert_eq!(Region::from_element_index(9, 3), Region::OPyC);
        assert_eq!(Region::from_element_index(11, 3), Region::OPyC);
    }

    #[test]
    fn build_places_nodes_uniformly() {
        let mut model = triso_model::ParticleModel::default();
        model.elements_per_region = 2;
        let mesh = Mesh::build(&model, pyc(), sic()).unwrap();

        assert_eq!(mesh.nodes.len(), 4 * 2 + 1);
        assert_eq!(mesh.elements.len(), 4 * 2);
        assert_eq!(mesh.num_dofs(), mesh.nodes.len());

        assert!((mesh.nodes[0].x - 250.0).abs() < 1e-9);
        let outer = 250.0 + 95.0 + 40.0 + 35.0 + 40.0;
        assert!((mesh.nodes.last().unwrap().x - outer).abs() < 1e-9);

        for pair in mesh.nodes.windows(2) {
            assert!(pair[0].x < pair[1].x);
        }

        let spacing = mesh.length / mesh.elements.len() as f64;
        for (i, node) in mesh.nodes.iter().enumerate() {
            assert_eq!(node.id, i + 1);
            assert!((node.x - (250.0 + spacing * i as f64)).abs() < 1e-9);
        }
    }

    #[test]
    fn build_assigns_regions_and_materials_by_quartile() {
        let mut model = triso_model::ParticleModel::default();
        model.elements_per_region = 2;
        let mesh = Mesh::build(&model, pyc(), sic()).unwrap();

        let regions: Vec<Region> = mesh.elements.iter().map(|e| e.region).collect();
        assert_eq!(
            regions,
            vec![
                Region::Buffer,
                Region::Buffer,
                Region::IPyC,
                Region::IPyC,
                Region::SiC,
                Region::SiC,
                Region::OPyC,
                Region::OPyC,
            ]
        );
        assert_eq!(mesh.material_for(Region::Buffer).name, "PyC");
        assert_eq!(mesh.material_for(Region::IPyC).name, "PyC");
        assert_eq!(mesh.material_for(Region::SiC).name, "SiC");
        assert_eq!(mesh.material_for(Region::OPyC).name, "PyC");
    }

    #[test]
    fn interior_nodes_average_their_two_elements() {
        let mut model = triso_model::ParticleModel::default();
        model.elements_per_region = 2;
        let mesh = Mesh::build(&model, pyc(), sic()).unwrap();

        let (d11_pyc, _) = mesh.pyc.stiffness_moduli();
        let (d11_sic, _) = mesh.sic.stiffness_moduli();

        // Node inside the buffer: both neighbours are PyC-type.
        assert!((mesh.nodes[1].d11 - d11_pyc).abs() < 1e-9);
        // Node on the IPyC/SiC interface (node index 4 for m = 2).
        let expected = (d11_pyc + d11_sic) / 2.0;
        assert!((mesh.nodes[4].d11 - expected).abs() < 1e-9);
        // Outermost node only sees the last OPyC element.
        assert!((mesh.nodes.last().unwrap().d11 - d11_pyc).abs() < 1e-9);
    }

    #[test]
    fn build_rejects_invalid_material() {
        let model = triso_model::ParticleModel::default();
        let bad = Material::new(1, "BAD", 1000.0, 10.0, 0.0, 0.33, 1.9, 0.0, 0.0, 0.0);
        assert!(Mesh::build(&model, bad, sic()).is_err());
    }
}
