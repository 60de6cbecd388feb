//! Helpers shared by the binaries in this crate.

use std::{ env, fs, path::Path };
use qlab::config::{ JsonConfig, Session };

/// Read a session document from `path`, or start from the defaults if no path
/// is given.
pub fn read_session<P>(path: Option<P>) -> anyhow::Result<Session>
where P: AsRef<Path>
{
    match path {
        Some(p) => {
            let session = Session::from_json(&fs::read_to_string(p.as_ref())?)?;
            log::debug!("loaded session from {}", p.as_ref().display());
            Ok(session)
        },
        None => Ok(Session::default()),
    }
}

/// Load the session named by the first command-line argument.
pub fn load_session() -> anyhow::Result<Session> {
    read_session(env::args().nth(1))
}
