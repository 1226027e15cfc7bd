use std::process::ExitCode;

use triso_model::ParticleModel;
use triso_solver::{AnalysisOutcome, AnalysisPipeline, Material, SwellingCorrelation, report};

fn usage() {
    eprintln!("usage: triso-cli solve <input.dat> [results.json]");
}

/// Pyrocarbon material shared by the Buffer, IPyC and OPyC layers.
fn build_pyc(temperature: f64, fluence: f64) -> Material {
    let mut pyc = Material::new(
        1, "PyC", temperature, fluence, 3.96e4, 0.33, 1.90, 5.5e-6, 200.0, 5.0,
    );
    pyc.set_creep_temperature_dependent(true);
    // Fallback value, disregarded while the temperature correlation is on.
    pyc.set_creep_coefficient(2.7e-4);
    pyc.set_creep_poissons_ratio(0.50);
    pyc.set_swelling_correlation(SwellingCorrelation::CaseB);
    pyc
}

/// Silicon carbide material for the SiC layer.
fn build_sic(temperature: f64, fluence: f64) -> Material {
    Material::new(
        2, "SiC", temperature, fluence, 3.70e5, 0.13, 3.20, 4.9e-6, 873.0, 8.02,
    )
}

fn write_results(path: &str, outcome: &AnalysisOutcome) -> Result<(), String> {
    let payload = serde_json::json!({
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "results": outcome.results,
    });
    let text = serde_json::to_string_pretty(&payload)
        .map_err(|err| format!("failed to serialize results: {err}"))?;
    std::fs::write(path, text).map_err(|err| format!("failed to write {path}: {err}"))
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    if !(3..=4).contains(&args.len()) || args[1] != "solve" {
        usage();
        return ExitCode::from(2);
    }

    let model = match ParticleModel::parse_file(&args[2]) {
        Ok(model) => model,
        Err(err) => {
            eprintln!("input error: {err}");
            return ExitCode::from(1);
        }
    };

    println!("{}", report::model_report(&model));

    let pyc = build_pyc(model.irradiation_temperature, model.end_life_fluence);
    let sic = build_sic(model.irradiation_temperature, model.end_life_fluence);
    println!("{}", report::material_report(&pyc));
    println!("{}", report::material_report(&sic));

    let outcome = match AnalysisPipeline::linear_static().run(&model, pyc, sic) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("analysis error: {err}");
            return ExitCode::from(1);
        }
    };

    for element in &outcome.mesh.elements {
        println!("{}", report::element_report(element, &outcome.mesh));
    }
    println!("{}", report::system_report(&outcome.mesh, &outcome.system));

    if let Some(path) = args.get(3) {
        if let Err(err) = write_results(path, &outcome) {
            eprintln!("{err}");
            return ExitCode::from(1);
        }
        println!("results written to {path}");
    }

    ExitCode::SUCCESS
}
