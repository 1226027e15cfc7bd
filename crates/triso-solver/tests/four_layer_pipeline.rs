//! End-to-end integration test for the four-layer particle analysis.
//!
//! Validates the complete pipeline:
//! 1. Parse the model deck
//! 2. Build the PyC and SiC materials
//! 3. Build the radial mesh (element setup in chain order)
//! 4. Assemble the global system
//! 5. Solve for nodal displacements
//! 6. Check mesh invariants and closed-form expectations

use std::f64::consts::PI;

use triso_model::ParticleModel;
use triso_solver::{
    AnalysisPipeline, GlobalSystem, Material, Mesh, Region, SwellingCorrelation,
};

fn build_pyc(temperature: f64, fluence: f64) -> Material {
    let mut pyc = Material::new(
        1, "PyC", temperature, fluence, 3.96e4, 0.33, 1.90, 5.5e-6, 200.0, 5.0,
    );
    pyc.set_creep_temperature_dependent(true);
    pyc.set_creep_coefficient(2.7e-4);
    pyc.set_creep_poissons_ratio(0.50);
    pyc.set_swelling_correlation(SwellingCorrelation::CaseB);
    pyc
}

fn build_sic(temperature: f64, fluence: f64) -> Material {
    Material::new(
        2, "SiC", temperature, fluence, 3.70e5, 0.13, 3.20, 4.9e-6, 873.0, 8.02,
    )
}

#[test]
fn reference_particle_end_to_end() {
    let deck = ParticleModel::default().to_deck();
    let model = ParticleModel::parse_str(&deck).expect("reference deck should parse");

    let pyc = build_pyc(model.irradiation_temperature, model.end_life_fluence);
    let sic = build_sic(model.irradiation_temperature, model.end_life_fluence);

    let outcome = AnalysisPipeline::linear_static()
        .run(&model, pyc, sic)
        .expect("analysis should complete");

    // Mesh invariants: 4m elements, 4m+1 nodes, uniform strictly
    // increasing coordinates spanning kernel surface to particle surface.
    let m = model.elements_per_region;
    assert_eq!(outcome.mesh.elements.len(), 4 * m);
    assert_eq!(outcome.mesh.nodes.len(), 4 * m + 1);

    let inner = model.kernel_diameter / 2.0;
    let outer = inner + model.coating_thickness();
    assert!((outcome.mesh.nodes[0].x - inner).abs() < 1e-9);
    assert!((outcome.mesh.nodes.last().unwrap().x - outer).abs() < 1e-9);
    for pair in outcome.mesh.nodes.windows(2) {
        assert!(pair[0].x < pair[1].x);
    }

    // Region quartiles in order, with the PyC material shared by the
    // three pyrocarbon-type layers.
    for (i, element) in outcome.mesh.elements.iter().enumerate() {
        let expected = match i / m {
            0 => Region::Buffer,
            1 => Region::IPyC,
            2 => Region::SiC,
            _ => Region::OPyC,
        };
        assert_eq!(element.region, expected, "element {} region", element.id);
    }

    // The global matrix is tridiagonal and every internal-force entry
    // is zero (the du/dr placeholder).
    let n = outcome.system.num_dofs;
    for i in 0..n {
        for j in 0..n {
            if i.abs_diff(j) > 1 {
                assert_eq!(outcome.system.stiffness[(i, j)], 0.0);
            }
        }
    }
    assert_eq!(outcome.system.internal_force.amax(), 0.0);

    // Swelling drives a non-trivial solution.
    assert!(outcome.system.external_force.amax() > 0.0);
    assert!(outcome.results.max_displacement > 0.0);
    assert!(outcome.results.displacements.iter().all(|u| u.is_finite()));

    // Element displacements mirror the global solution.
    for element in &outcome.mesh.elements {
        let i = element.id - 1;
        assert_eq!(element.displacement[0], outcome.results.displacements[i]);
        assert_eq!(element.displacement[1], outcome.results.displacements[i + 1]);
    }
}

#[test]
fn coupled_operators_differ_between_pyc_and_sic() {
    let mut model = ParticleModel::default();
    model.elements_per_region = 1;
    let pyc = build_pyc(1000.0, 10.0);
    let sic = build_sic(1000.0, 10.0);

    let mut mesh = Mesh::build(&model, pyc, sic).unwrap();
    GlobalSystem::assemble(&mut mesh).unwrap();

    // Buffer and OPyC share the PyC material, so their local operators
    // coincide; the SiC element differs.
    let buffer = &mesh.elements[0];
    let sic_elem = &mesh.elements[2];
    let opyc = &mesh.elements[3];
    assert_eq!(buffer.constitutive, opyc.constitutive);
    assert_eq!(buffer.coupled, opyc.coupled);
    assert!(buffer.coupled != sic_elem.coupled);
}

/// The closed-form single-element case: a uniform unit-length element
/// with no swelling gives Ke = 4*pi*I, so a system built from it and
/// constrained at one end reproduces u = P/(4*pi) under a tip load P.
#[test]
fn single_element_closed_form_displacement() {
    use triso_solver::{Element, Node};

    let material = Material::new(
        1, "ELASTIC", 1000.0, 0.0, 1.0e5, 0.3, 1.9, 5.5e-6, 200.0, 5.0,
    );

    let mut node1 = Node::new(1, 0.0);
    let mut node2 = Node::new(2, 1.0);
    let mut element = Element::new(1, 0, 1, Region::Buffer);
    element.set_constitutive(&material).unwrap();
    element.set_irradiation(&material);
    element.set_coupled(0.5, &material).unwrap();
    element.set_initial_conditions(&material, &mut node1, &mut node2);
    element.integrate(&node1, &node2, &material).unwrap();

    let mut system = GlobalSystem::new(2);
    for a in 0..2 {
        for b in 0..2 {
            system.stiffness[(a, b)] += element.stiffness[(a, b)];
        }
        system.external_force[a] += element.external_force[a];
    }

    let load = 2.5;
    system.apply_displacement_bc(0, 0.0).unwrap();
    system.apply_point_load(1, load).unwrap();
    system.solve().unwrap();

    assert!(system.displacement[0].abs() < 1e-8);
    let expected = load / (4.0 * PI);
    assert!(
        (system.displacement[1] - expected).abs() < 1e-9,
        "u1 = {} expected {}",
        system.displacement[1],
        expected
    );
}

#[test]
fn explicit_and_implicit_blends_change_the_coupled_operator() {
    let pyc = build_pyc(1000.0, 10.0);

    let mut explicit_model = ParticleModel::default();
    explicit_model.elements_per_region = 1;
    explicit_model.beta = 0.0;
    let mut implicit_model = explicit_model.clone();
    implicit_model.beta = 1.0;

    let explicit_mesh =
        Mesh::build(&explicit_model, pyc.clone(), build_sic(1000.0, 10.0)).unwrap();
    let implicit_mesh = Mesh::build(&implicit_model, pyc, build_sic(1000.0, 10.0)).unwrap();

    // phi > 0, so the blend parameter must change G for the creeping
    // PyC element.
    assert!(explicit_mesh.elements[0].coupled != implicit_mesh.elements[0].coupled);
}
