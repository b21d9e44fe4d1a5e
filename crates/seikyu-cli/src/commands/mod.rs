pub mod batch;
pub mod config;
pub mod extract;
pub mod output;
pub mod scan;

use std::path::Path;

use seikyu_core::models::config::SeikyuConfig;

/// Load configuration from an explicit path, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<SeikyuConfig> {
    if let Some(path) = config_path {
        return Ok(SeikyuConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        Ok(SeikyuConfig::from_file(&default_path)?)
    } else {
        Ok(SeikyuConfig::default())
    }
}
