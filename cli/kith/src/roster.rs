//! Roster files: TOML descriptions of people and friendships.
//!
//! ```toml
//! root = "Ivan"
//!
//! [[person]]
//! name = "Ivan"
//! born_in = "2020-04-12T00:00:00"
//!
//! [[friendship]]
//! from = "Ivan"
//! to = "Petr"
//! mutual = true
//! ```

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use kith_codec::parse_timestamp;
use kith_core::{GraphBuilder, RootedGraph};
use serde::{Deserialize, Serialize};

/// The four-person sample written by `kith init` and used by `kith demo`.
pub const SAMPLE_ROSTER: &str = r#"root = "Ivan"

[[person]]
name = "Ivan"
born_in = "2020-04-12T00:00:00"

[[person]]
name = "Petr"
born_in = "2021-09-27T00:00:00"

[[person]]
name = "Anna"
born_in = "2019-11-05T00:00:00"

[[person]]
name = "Maria"
born_in = "2022-01-15T00:00:00"

[[friendship]]
from = "Ivan"
to = "Petr"

[[friendship]]
from = "Ivan"
to = "Anna"

[[friendship]]
from = "Petr"
to = "Anna"

[[friendship]]
from = "Anna"
to = "Maria"

[[friendship]]
from = "Maria"
to = "Ivan"
"#;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    /// Name of the person encoding starts from.
    pub root: String,
    #[serde(default, rename = "person")]
    pub people: Vec<RosterPerson>,
    #[serde(default, rename = "friendship")]
    pub friendships: Vec<Friendship>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterPerson {
    pub name: String,
    pub born_in: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Friendship {
    pub from: String,
    pub to: String,
    /// When false only `from -> to` is added.
    #[serde(default = "default_mutual")]
    pub mutual: bool,
}

fn default_mutual() -> bool {
    true
}

impl Roster {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        content
            .parse()
            .with_context(|| format!("parsing {}", path.display()))
    }

    pub fn sample() -> Result<Self> {
        SAMPLE_ROSTER.parse()
    }

    /// Build the rooted graph this roster describes. People are added in
    /// file order, then friendships in file order.
    pub fn build(&self) -> Result<RootedGraph> {
        let mut builder = GraphBuilder::new();
        for person in &self.people {
            let born_in = parse_timestamp(&person.born_in).ok_or_else(|| {
                anyhow!(
                    "person '{}' has invalid born_in {:?}",
                    person.name,
                    person.born_in
                )
            })?;
            builder.add_person(&person.name, born_in)?;
        }
        for link in &self.friendships {
            if link.mutual {
                builder.befriend(&link.from, &link.to)?;
            } else {
                builder.link(&link.from, &link.to)?;
            }
        }
        Ok(builder.build(&self.root)?)
    }
}

impl std::str::FromStr for Roster {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("invalid roster")
    }
}
