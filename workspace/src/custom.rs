use std::{ env, fs, path::PathBuf };
use qlab::{
    config::{ CustomPotential, Session },
    export::Snapshot,
    expr::Expr,
    potential::Family,
    solve::System,
};

// usage: custom [session.json] [expression]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let mut args = env::args().skip(1);
    let session: Session = lib::read_session(args.next())?;
    let custom
        = match args.next() {
            Some(function) => CustomPotential { function, ..session.custom_potential.clone() },
            None => session.custom_potential.clone(),
        };
    if let Err(err) = Expr::parse(&custom.function) {
        log::warn!("{}; the potential will be zero everywhere", err);
    }

    let params = &session.parameters;
    let system = System::new(Family::Custom, params, Some(&custom), session.points())?;
    let spectrum = system.solve(params.num_states)?;
    spectrum.iter().enumerate()
        .for_each(|(n, sol)| log::info!("E[{}] = {:.8}", n, sol.e));

    let snapshot = Snapshot::new(params, Some(&custom), &system, &spectrum)?;
    let outdir = PathBuf::from("output");
    fs::create_dir_all(&outdir)?;
    fs::write(outdir.join("custom.json"), snapshot.to_json()?)?;
    Ok(())
}
