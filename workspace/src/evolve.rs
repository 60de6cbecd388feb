use std::{ fs, path::PathBuf, thread, time::Duration };
use ndarray as nd;
use num_complex::Complex64 as C64;
use serde_json::json;
use qlab::{
    playback::{ Playback, SystemClock },
    solve::System,
    timedep,
    utils::wf_norm_c,
};

const FRAMES: usize = 120;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let session = lib::load_session()?;
    let params = &session.parameters;
    let system = System::new(
        session.potential,
        params,
        Some(&session.custom_potential),
        session.points(),
    )?;
    let spectrum = system.solve(params.num_states)?;
    if spectrum.used_fallback() {
        log::warn!("evolving placeholder states");
    }
    let c: Vec<C64> = session.initial_state.coefficients(spectrum.len());

    // drive the scheduler in real time and record every emitted frame
    let mut playback = Playback::new(SystemClock::new(), &session.playback);
    let wait = Duration::from_secs_f64(session.playback.frame_interval.max(0.0) / 4.0);
    let mut t: Vec<f64> = vec![playback.time()];
    playback.start();
    while t.len() < FRAMES {
        match playback.tick() {
            Some(tk) => { t.push(tk); },
            None => { thread::sleep(wait); },
        }
    }
    playback.stop();
    let t: nd::Array1<f64> = t.into_iter().collect();
    log::info!("recorded {} frames up to t = {:.3}", t.len(), t[t.len() - 1]);

    let psi: nd::Array2<C64> = timedep::evolve_many(&spectrum, &c, &t);
    let dx = system.get_dx();
    let density: Vec<Vec<f64>>
        = psi.outer_iter()
        .map(|psi_t| timedep::probability_density(&psi_t).to_vec())
        .collect();
    let current: Vec<Vec<f64>>
        = psi.outer_iter()
        .map(|psi_t| timedep::probability_current(&psi_t, dx).to_vec())
        .collect();
    let norm: Vec<f64>
        = psi.outer_iter().map(|psi_t| wf_norm_c(&psi_t, dx)).collect();
    let (k, rho_k) = timedep::momentum_density(&psi.row(psi.nrows() - 1), system.get_grid());

    let outdir = PathBuf::from("output");
    fs::create_dir_all(&outdir)?;
    fs::write(
        outdir.join("evolve.json"),
        serde_json::to_string_pretty(&json!({
            "potential": system.get_family(),
            "initialState": session.initial_state,
            "energies": spectrum.energies().to_vec(),
            "x": system.get_x().to_vec(),
            "v": system.get_V().to_vec(),
            "t": t.to_vec(),
            "density": density,
            "current": current,
            "norm": norm,
            "k": k.to_vec(),
            "momentumDensity": rho_k.to_vec(),
        }))?,
    )?;
    Ok(())
}
