use std::{ fs, path::PathBuf };
use ndarray as nd;
use serde_json::json;
use qlab::tunnel::{ self, Scattering };

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let session = lib::load_session()?;
    let params = &session.scattering;

    let t: nd::Array1<f64> = nd::Array1::linspace(0.0, 10.0, 6);
    let views: Vec<Scattering>
        = t.iter()
        .map(|&tk| Scattering::compute(params, tk))
        .collect::<Result<_, _>>()?;
    let res = views[0].result;
    match views[0].tunneling {
        Some(p) => log::info!(
            "E = {} below V0 = {}: tunneling probability {:.6e}",
            params.energy, params.barrier_height, p,
        ),
        None => log::info!(
            "E = {} above V0 = {}: T = {:.6}, R = {:.6}",
            params.energy, params.barrier_height, res.T, res.R,
        ),
    }

    // transmission against barrier width at fixed energy
    let widths: nd::Array1<f64> = nd::Array1::linspace(0.0, 3.0, 61);
    let t_width: Vec<f64>
        = widths.iter()
        .map(|&a| tunnel::tunnel(params.energy, params.barrier_height, a).T)
        .collect();

    let outdir = PathBuf::from("output");
    fs::create_dir_all(&outdir)?;
    fs::write(
        outdir.join("tunneling.json"),
        serde_json::to_string_pretty(&json!({
            "params": params,
            "t": t.to_vec(),
            "views": views,
            "widths": widths.to_vec(),
            "transmissionVsWidth": t_width,
        }))?,
    )?;
    Ok(())
}
