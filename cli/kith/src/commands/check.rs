//! `kith check`: verify that a file survives a decode/encode/decode cycle.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use kith_codec::{Decoder, Encoder};
use kith_core::{find_divergence, Divergence, GraphStats};

#[derive(Debug)]
pub(crate) struct CheckOutcome {
    pub stats: GraphStats,
    pub divergence: Option<Divergence>,
    /// The second encoding equals the first byte for byte.
    pub stable: bool,
}

pub fn run(input: &Path) -> Result<()> {
    let data = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let outcome = check_bytes(&data).with_context(|| format!("checking {}", input.display()))?;

    if let Some(divergence) = outcome.divergence {
        bail!("round trip diverged: {divergence}");
    }
    println!(
        "ok: {} people, {} friendships survive a round trip",
        outcome.stats.people, outcome.stats.friendships
    );
    if !outcome.stable {
        log::warn!("re-encoded output differs from the first re-encoding");
    }
    Ok(())
}

pub(crate) fn check_bytes(data: &[u8]) -> Result<CheckOutcome> {
    let decoder = Decoder::new();
    let encoder = Encoder::new();

    let first = decoder.decode(data)?;
    let first_bytes = encoder.encode_rooted(&first)?;
    let second = decoder.decode(&first_bytes)?;
    let second_bytes = encoder.encode_rooted(&second)?;

    let divergence = find_divergence(first.graph(), first.root(), second.graph(), second.root())?;
    Ok(CheckOutcome {
        stats: first.stats(),
        divergence,
        stable: first_bytes == second_bytes,
    })
}
