pub mod config;
pub mod options;
pub mod personalize;
pub mod recommend;
pub mod render;

use anyhow::Result;
use melody_curator::Config;

pub use options::show_options;
pub use personalize::{build_form, run_personalize};
pub use recommend::run_recommend;

/// Load configuration and apply CLI overrides.
pub fn load_config(api_key: Option<String>, model: Option<String>) -> Result<Config> {
    Ok(Config::load()?.with_overrides(api_key, model))
}
