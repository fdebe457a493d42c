//! `kith init`: project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::config::{KithConfig, CONFIG_FILE};
use crate::roster::SAMPLE_ROSTER;

/// Scaffold a project in `dir`, or in the working directory when omitted.
pub fn run(dir: Option<&str>) -> Result<()> {
    let project_dir = Path::new(dir.unwrap_or("."));
    create_project(project_dir)
}

pub(crate) fn create_project(project_dir: &Path) -> Result<()> {
    let config_path = project_dir.join(CONFIG_FILE);
    if config_path.exists() {
        bail!("{} already exists", config_path.display());
    }

    fs::create_dir_all(project_dir)
        .with_context(|| format!("creating {}", project_dir.display()))?;
    fs::write(&config_path, KithConfig::template())
        .with_context(|| format!("writing {}", config_path.display()))?;

    let roster_path = project_dir.join("roster.toml");
    if roster_path.exists() {
        log::info!("keeping existing {}", roster_path.display());
    } else {
        fs::write(&roster_path, SAMPLE_ROSTER)
            .with_context(|| format!("writing {}", roster_path.display()))?;
    }

    println!("Initialized kith project in {}", project_dir.display());
    println!("  {CONFIG_FILE}");
    println!("  roster.toml");

    Ok(())
}
