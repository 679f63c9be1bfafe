mod config;

pub use config::{CalendarConfig, Config, LoggingConfig};

use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the habitcheck config directory.
///
/// `HABITCHECK_CONFIG_DIR` wins when set. Otherwise `~/.config/habitcheck[-dev]/`
/// is used, with the `-dev` suffix when `HABITCHECK_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = resolve_data_dir(
        std::env::var_os("HABITCHECK_CONFIG_DIR"),
        dirs::home_dir(),
        std::env::var("HABITCHECK_ENV").ok().as_deref(),
    );

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

fn resolve_data_dir(
    override_dir: Option<OsString>,
    home: Option<PathBuf>,
    env: Option<&str>,
) -> PathBuf {
    if let Some(dir) = override_dir {
        return PathBuf::from(dir);
    }
    let base_dir = home.unwrap_or_else(|| PathBuf::from(".")).join(".config");
    if env == Some("dev") {
        base_dir.join("habitcheck-dev")
    } else {
        base_dir.join("habitcheck")
    }
}
