//! Command implementations

pub mod catalog;
pub mod init;
pub mod prefs;
pub mod script;
pub mod status;

pub use catalog::run_list;
pub use init::run_init;
pub use prefs::{run_apply, run_resolve, run_set, run_toggle};
pub use script::run_script;
pub use status::run_status;

use anyhow::Result;
use hubtheme::Config;
use hubtheme::config::CONFIG_FILE_NAME;
use std::path::{Path, PathBuf};

/// Config file named on the command line, or `.hubtheme.toml`
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

/// Load the config; an explicitly named file must exist
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}
