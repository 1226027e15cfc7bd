//! Human-readable report formatting.
//!
//! Each function renders one block of the analysis report as a string;
//! the caller decides where it goes (stdout in the CLI).

use triso_model::ParticleModel;

use crate::assembly::GlobalSystem;
use crate::element::Element;
use crate::materials::Material;
use crate::mesh::{Mesh, Node};

const RULE: &str = "--------------------------------------------------------------------";

/// Echo of the parsed model parameters.
pub fn model_report(model: &ParticleModel) -> String {
    let lines = vec![
        RULE.to_string(),
        "Model parameters".to_string(),
        format!("Kernel diameter [um]          = {:.2}", model.kernel_diameter),
        format!("Buffer thickness [um]         = {:.2}", model.buffer_thickness),
        format!("IPyC thickness [um]           = {:.2}", model.ipyc_thickness),
        format!("SiC thickness [um]            = {:.2}", model.sic_thickness),
        format!("OPyC thickness [um]           = {:.2}", model.opyc_thickness),
        format!("Kernel density [g/cm3]        = {:.2}", model.kernel_density),
        format!("Buffer density [g/cm3]        = {:.2}", model.buffer_density),
        format!("IPyC density [g/cm3]          = {:.2}", model.ipyc_density),
        format!("SiC density [g/cm3]           = {:.2}", model.sic_density),
        format!("OPyC density [g/cm3]          = {:.2}", model.opyc_density),
        format!("IPyC BAF [-]                  = {:.3}", model.ipyc_baf),
        format!("OPyC BAF [-]                  = {:.3}", model.opyc_baf),
        format!("Irradiation duration [EFPD]   = {:.2}", model.irradiation_duration),
        format!("End-of-life burnup [% FIMA]   = {:.2}", model.end_life_burnup),
        format!("End-of-life fluence           = {:.2}", model.end_life_fluence),
        format!("Irradiation temperature [C]   = {:.2}", model.irradiation_temperature),
        format!(
            "End-of-life pressure [MPa]    = {:.2}",
            model.end_life_internal_pressure
        ),
        format!("Ambient pressure [MPa]        = {:.2}", model.ambient_pressure),
        format!("Elements per region           = {}", model.elements_per_region),
        format!("Method multiplier beta        = {:.2}", model.beta),
        RULE.to_string(),
    ];
    lines.join("\n")
}

/// One material record.
pub fn material_report(material: &Material) -> String {
    let correlation = material
        .swelling_correlation
        .map(|c| format!("{c:?}"))
        .unwrap_or_else(|| "none".to_string());
    let lines = vec![
        RULE.to_string(),
        format!("Material {} ({})", material.id, material.name),
        format!("Temperature [C]               = {:.2}", material.temperature),
        format!("Fast fluence                  = {:.2}", material.fluence),
        format!("Elastic modulus [MPa]         = {:.2e}", material.elastic_modulus),
        format!("Poisson ratio [-]             = {:.2}", material.poissons_ratio),
        format!("Density [t/mm3]               = {:.2e}", material.density),
        format!("Thermal exp. coeff. [1/K]     = {:.2e}", material.thermal_expansion),
        format!("Mean strength [MPa]           = {:.0}", material.mean_strength),
        format!("Weibull modulus [-]           = {:.2}", material.weibull_modulus),
        format!(
            "Creep temperature dependent   = {}",
            material.creep_temperature_dependent
        ),
        format!("Creep coefficient [1/MPa]     = {:.2e}", material.creep_coefficient),
        format!(
            "Creep Poisson ratio [-]       = {:.2}",
            material.creep_poissons_ratio
        ),
        format!("Swelling correlation          = {correlation}"),
        format!(
            "Radial swelling rate [-]      = {:.2e}",
            material.radial_swelling_rate
        ),
        format!(
            "Tangential swelling rate [-]  = {:.2e}",
            material.tangential_swelling_rate
        ),
        RULE.to_string(),
    ];
    lines.join("\n")
}

/// One node's merged state.
pub fn node_report(node: &Node) -> String {
    let lines = vec![
        format!("Node {}", node.id),
        format!("Radial coordinate [um]        = {:.2}", node.x),
        format!("d11 [MPa]                     = {:.2}", node.d11),
        format!("d12 [MPa]                     = {:.2}", node.d12),
        format!("Radial swelling rate [-]      = {:.2e}", node.er),
        format!("Tangential swelling rate [-]  = {:.2e}", node.et),
    ];
    lines.join("\n")
}

/// One element's state, including its two nodes.
pub fn element_report(element: &Element, mesh: &Mesh) -> String {
    let node1 = &mesh.nodes[element.node1];
    let node2 = &mesh.nodes[element.node2];
    let lines = vec![
        RULE.to_string(),
        format!("Element {} ({})", element.id, element.region),
        format!("Inner coordinate [um]         = {:.2}", node1.x),
        format!("Outer coordinate [um]         = {:.2}", node2.x),
        format!("Material                      = {}", mesh.material_for(element.region).name),
        format!("d11 on element [MPa]          = {:.2}", element.d11),
        format!("d12 on element [MPa]          = {:.2}", element.d12),
        format!("Radial swelling rate [-]      = {:.2e}", element.er),
        format!("Tangential swelling rate [-]  = {:.2e}", element.et),
        node_report(node1),
        node_report(node2),
        format!("Constitutive matrix C:{}", element.constitutive),
        format!("Irradiation matrix A:{}", element.irradiation),
        format!("Coupled operator G:{}", element.coupled),
        format!("Stiffness matrix Ke:{}", element.stiffness),
        format!("Internal force Fei:{}", element.internal_force),
        format!("External force Fee:{}", element.external_force),
        format!("Displacement ue:{}", element.displacement),
        RULE.to_string(),
    ];
    lines.join("\n")
}

/// Mesh and global-system summary with the solved displacements.
pub fn system_report(mesh: &Mesh, system: &GlobalSystem) -> String {
    let mut lines = vec![
        RULE.to_string(),
        "Finite element system".to_string(),
        format!("Inner radius [um]             = {:.2}", mesh.inner_radius),
        format!("Outer radius [um]             = {:.2}", mesh.outer_radius),
        format!("Coating thickness [um]        = {:.2}", mesh.length),
        format!("Number of elements            = {}", mesh.elements.len()),
        format!("Number of nodes               = {}", mesh.nodes.len()),
        format!("Degrees of freedom            = {}", system.num_dofs),
        format!("Method multiplier beta        = {:.2}", mesh.beta),
        format!("Constrained DOFs              = {:?}", system.constrained_dofs),
        "Radial displacements [um]:".to_string(),
    ];
    for node in &mesh.nodes {
        lines.push(format!(
            "  node {:>4}  r = {:>10.2}  u = {:>14.6e}",
            node.id,
            node.x,
            system.displacement[node.id - 1]
        ));
    }
    lines.push(format!("Global force vector F:{}", system.force));
    lines.push(RULE.to_string());
    lines.join("\n")
}
