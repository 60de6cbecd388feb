use std::{ env, fs, path::PathBuf };
use ndarray as nd;
use serde_json::json;
use qlab::{
    config::Session,
    illustrative::{ self, QuantumNumbers },
    qubit::{ self, Qubit },
    solve::System,
};

// usage: gallery ["α, β"] [gate ...]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let mut args = env::args().skip(1);
    let mut state: Qubit
        = match args.next() {
            Some(s) => s.parse()?,
            None => Qubit::zero(),
        };

    let mut trajectory: Vec<serde_json::Value> = Vec::new();
    let mut record = |label: &str, q: &Qubit| {
        let (p0, p1) = q.probabilities();
        let b = q.bloch();
        trajectory.push(json!({
            "gate": label,
            "state": q.to_string(),
            "probabilities": [p0, p1],
            "bloch": b.vector(),
        }));
    };
    record("init", &state);
    for gate in args {
        match qubit::apply_gate(&state, &gate) {
            Ok(new) => {
                state = new;
                record(&gate, &state);
            },
            Err(err) => { log::warn!("skipping: {}", err); },
        }
    }
    log::info!("final state: {} (|α|² + |β|² = {:.6})", state, state.norm_sqr());

    let radial: Vec<serde_json::Value>
        = [(1, 0), (2, 0), (2, 1), (3, 0), (3, 1), (3, 2)].into_iter()
        .map(|(n, l)| {
            let (r, rad) = illustrative::hydrogen_radial(QuantumNumbers::new(n, l, 0));
            json!({ "n": n, "l": l, "r": r.to_vec(), "R": rad.to_vec() })
        })
        .collect();
    let (x_dot, v_dot) = illustrative::quantum_dot_potential();
    let (x_2d, z_2d) = illustrative::harmonic_2d_ground();
    let (theta, up, down) = illustrative::spin_components();
    let rho: nd::Array2<f64> = illustrative::illustrative_density_matrix(8);
    let session = Session::default();
    let params = &session.parameters;
    let system = System::new(session.potential, params, None, session.points())?;
    let energies: Vec<f64> = system.solve(params.num_states)?.energies().to_vec();
    let hamiltonian: nd::Array2<f64>
        = illustrative::illustrative_matrix_representation(&energies);
    let rows = |a: &nd::Array2<f64>| -> Vec<Vec<f64>> {
        a.outer_iter().map(|row| row.to_vec()).collect()
    };

    let outdir = PathBuf::from("output");
    fs::create_dir_all(&outdir)?;
    fs::write(
        outdir.join("gallery.json"),
        serde_json::to_string_pretty(&json!({
            "qubit": trajectory,
            "hydrogen": radial,
            "quantumDot": { "x": x_dot.to_vec(), "v": v_dot.to_vec() },
            "harmonic2d": { "x": x_2d.to_vec(), "z": rows(&z_2d) },
            "spin": { "theta": theta.to_vec(), "up": up.to_vec(), "down": down.to_vec() },
            "densityMatrix": rows(&rho),
            "hamiltonian": rows(&hamiltonian),
        }))?,
    )?;
    Ok(())
}
