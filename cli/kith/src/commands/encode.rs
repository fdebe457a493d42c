//! `kith encode`: roster to JSON.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kith_codec::Encoder;

use crate::config::KithConfig;
use crate::roster::Roster;

/// Flags given on the command line. Each one overrides the config file.
#[derive(Debug, Default)]
pub struct EncodeArgs<'a> {
    pub roster: Option<&'a str>,
    pub root: Option<&'a str>,
    pub output: Option<&'a str>,
    pub compact: bool,
}

pub fn run(project_dir: &Path, config: &KithConfig, args: &EncodeArgs<'_>) -> Result<()> {
    let (bytes, output) = encode_project(project_dir, config, args)?;
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            fs::write(&path, &bytes).with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes).context("writing to stdout")?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

/// Load the roster, build the graph and encode it. Returns the bytes and the
/// destination file, `None` meaning stdout.
pub(crate) fn encode_project(
    project_dir: &Path,
    config: &KithConfig,
    args: &EncodeArgs<'_>,
) -> Result<(Vec<u8>, Option<PathBuf>)> {
    let roster_path = match args.roster {
        Some(path) => PathBuf::from(path),
        None => config.roster_path(project_dir),
    };
    let mut roster = Roster::load(&roster_path)?;
    if let Some(root) = args.root {
        roster.root = root.to_string();
    }
    let rooted = roster
        .build()
        .with_context(|| format!("building graph from {}", roster_path.display()))?;

    let encoder = Encoder::new().pretty(config.codec.pretty && !args.compact);
    let bytes = encoder
        .encode_rooted(&rooted)
        .with_context(|| format!("encoding graph rooted at '{}'", roster.root))?;

    let output = match args.output {
        Some(path) => Some(PathBuf::from(path)),
        None => config.output_path(project_dir),
    };
    Ok((bytes, output))
}
