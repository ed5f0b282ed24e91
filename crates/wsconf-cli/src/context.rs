//! Plan loading for commands

use std::path::Path;

use wsconf_model::{PLAN_FILENAME, PlanConfig};

use crate::error::Result;

/// Build the plan: environment defaults, then the plan file, then overrides.
///
/// An explicit plan path must exist; the default `.wsconf.json` is optional.
pub fn load_plan(plan: Option<&Path>, overrides: Option<&Path>) -> Result<PlanConfig> {
    let defaults = PlanConfig::from_env()?;

    let mut config = match plan {
        Some(path) => {
            if !path.is_file() {
                return Err(wsconf_model::Error::ConfigNotFound {
                    path: path.to_path_buf(),
                }
                .into());
            }
            PlanConfig::load(path, defaults)?
        }
        None => {
            let cwd = std::env::current_dir()?;
            PlanConfig::load(&cwd.join(PLAN_FILENAME), defaults)?
        }
    };

    if let Some(path) = overrides {
        if !path.is_file() {
            return Err(wsconf_model::Error::ConfigNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        config.apply_overrides_file(path)?;
    }

    tracing::debug!(workspace = %config.workspace_target().id(), "Loaded plan");
    Ok(config)
}
