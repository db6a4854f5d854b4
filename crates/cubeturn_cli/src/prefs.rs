use std::path::Path;

use cubeturn::AnimationPreferences;
use eyre::{Context, Result};

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

/// Loads the default preferences, overridden by `user_file` if there is one.
pub(crate) fn load(user_file: Option<&Path>) -> Result<AnimationPreferences> {
    let mut config = config::Config::builder()
        .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));

    if let Some(path) = user_file {
        log::info!("loading preferences from {}", path.display());
        let file = config::File::from(path).format(PREFS_FILE_FORMAT);
        config = config.add_source(file);
    }

    config
        .build()
        .and_then(|c| c.try_deserialize())
        .wrap_err("error loading preferences")
}
