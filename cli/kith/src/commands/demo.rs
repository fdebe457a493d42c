//! `kith demo`: round-trip the four-person sample through a file.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use kith_codec::{read_from, write_to, Decoder, Encoder};
use kith_core::is_isomorphic;

use crate::roster::Roster;

/// Output file used when `--output` is not given.
pub const DEFAULT_OUTPUT: &str = "person_data.json";

#[derive(Debug)]
pub(crate) struct DemoReport {
    pub bytes_written: usize,
    pub same_name: bool,
    pub same_born_in: bool,
    pub original_friends: usize,
    pub decoded_friends: usize,
    pub isomorphic: bool,
    pub fresh_identity: bool,
}

pub fn run(output: Option<&str>) -> Result<()> {
    let path = Path::new(output.unwrap_or(DEFAULT_OUTPUT));
    let report = round_trip(path)?;

    println!("Wrote {} bytes to {}", report.bytes_written, path.display());
    println!("  name matches:        {}", report.same_name);
    println!("  born_in matches:     {}", report.same_born_in);
    println!(
        "  friend count:        {} -> {}",
        report.original_friends, report.decoded_friends
    );
    println!("  same shape:          {}", report.isomorphic);
    println!("  new graph instance:  {}", report.fresh_identity);
    Ok(())
}

pub(crate) fn round_trip(path: &Path) -> Result<DemoReport> {
    let original = Roster::sample()?.build()?;
    log::info!("encoding sample graph {}", original.graph().id());

    let mut file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let bytes_written = write_to(&Encoder::new(), &mut file, original.graph(), original.root())
        .with_context(|| format!("writing {}", path.display()))?;
    drop(file);

    let mut file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let decoded = read_from(&Decoder::new(), &mut file)
        .with_context(|| format!("decoding {}", path.display()))?;

    let before = original.root_person();
    let after = decoded.root_person();
    Ok(DemoReport {
        bytes_written,
        same_name: before.name() == after.name(),
        same_born_in: before.born_in() == after.born_in(),
        original_friends: before.friend_count(),
        decoded_friends: after.friend_count(),
        isomorphic: is_isomorphic(
            original.graph(),
            original.root(),
            decoded.graph(),
            decoded.root(),
        )?,
        fresh_identity: original.graph().id() != decoded.graph().id(),
    })
}
