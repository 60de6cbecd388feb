use std::{ fs, path::PathBuf };
use ndarray as nd;
use serde_json::json;
use qlab::{
    export::Snapshot,
    grid,
    observables::Expectations,
    potential::{ evaluate_potential, Family },
    solve::{ self, System },
};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let session = lib::load_session()?;
    let params = &session.parameters;
    let omega = params.param1;

    // closed-form levels
    let system = System::new(Family::Harmonic, params, None, session.points())?;
    let spectrum = system.solve(params.num_states)?;
    let snapshot = Snapshot::new(params, None, &system, &spectrum)?;
    if let Some(props) = snapshot.quantum_properties {
        log::info!(
            "ΔX = {:.6}, ΔP = {:.6}, ΔX ΔP = {:.6} (heisenberg: {})",
            props.delta_x,
            props.delta_p,
            props.uncertainty_product,
            props.satisfies_heisenberg(),
        );
    }
    let expectations: Vec<Expectations>
        = spectrum.iter()
        .map(|sol| Expectations::compute(system.get_grid(), sol))
        .collect::<Result<_, _>>()?;

    // same potential through the finite-difference solver, for comparison
    let grid = grid::symmetric(params.system_size, session.points())?;
    let v = evaluate_potential(&grid, Family::Harmonic, omega, params.param2, None);
    let fd = solve::solve_finite_difference(&grid, &v, params.num_states)?;
    let e_fd: nd::Array1<f64> = fd.iter().map(|sol| sol.e).collect();
    let e_exact = spectrum.energies();
    e_exact.iter().zip(&e_fd).enumerate()
        .for_each(|(n, (ex, fd))| {
            log::info!("n = {}: exact {:.8}, finite-difference {:.8}", n, ex, fd);
        });

    let outdir = PathBuf::from("output");
    fs::create_dir_all(&outdir)?;
    fs::write(outdir.join("harmonic.json"), snapshot.to_json()?)?;
    fs::write(
        outdir.join("harmonic_fd.json"),
        serde_json::to_string_pretty(&json!({
            "omega": omega,
            "exact": e_exact.to_vec(),
            "finiteDifference": e_fd.to_vec(),
            "expectations": expectations,
        }))?,
    )?;
    Ok(())
}
