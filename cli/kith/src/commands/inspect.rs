//! `kith inspect`: show the people in an encoded file.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use kith_codec::{Decoder, Encoder, Envelope};
use kith_core::{GraphStats, RootedGraph};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct PersonRow {
    pub id: u64,
    pub name: String,
    pub born_in: String,
    pub friends: Vec<u64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct InspectReport {
    pub root_id: u64,
    pub people: Vec<PersonRow>,
    pub stats: GraphStats,
}

pub fn run(input: &Path, export: Option<&str>, raw: bool) -> Result<()> {
    let data = fs::read(input).with_context(|| format!("reading {}", input.display()))?;

    if raw {
        let envelope =
            Envelope::from_slice(&data).with_context(|| format!("parsing {}", input.display()))?;
        print_rows(envelope.root_id.value(), &rows_of(&envelope));
        return Ok(());
    }

    let rooted = Decoder::new()
        .decode(&data)
        .with_context(|| format!("decoding {}", input.display()))?;
    let report = build_report(&rooted)?;

    match export {
        None | Some("text") => {
            println!("--- {} ---", input.display());
            print_rows(report.root_id, &report.people);
            println!();
            println!("  People:      {}", report.stats.people);
            println!("  Friendships: {}", report.stats.friendships);
        }
        Some("json") => println!("{}", serde_json::to_string_pretty(&report)?),
        Some(other) => bail!("unknown export format '{other}' (expected text or json)"),
    }
    Ok(())
}

/// Rows for a decoded graph, numbered the way a fresh encode would number them.
pub(crate) fn build_report(rooted: &RootedGraph) -> Result<InspectReport> {
    let envelope = Encoder::new().encode_envelope(rooted.graph(), rooted.root())?;
    Ok(InspectReport {
        root_id: envelope.root_id.value(),
        people: rows_of(&envelope),
        stats: rooted.stats(),
    })
}

fn rows_of(envelope: &Envelope) -> Vec<PersonRow> {
    envelope
        .objects
        .iter()
        .map(|(id, record)| PersonRow {
            id: id.value(),
            name: record.name.clone(),
            born_in: record.born_in.clone(),
            friends: record.friend_ids.iter().map(|f| f.value()).collect(),
        })
        .collect()
}

fn print_rows(root_id: u64, rows: &[PersonRow]) {
    println!("{:>4}  {:<16} {:<28} FRIENDS", "ID", "NAME", "BORN_IN");
    for row in rows {
        let marker = if row.id == root_id { "*" } else { " " };
        let friends: Vec<String> = row.friends.iter().map(u64::to_string).collect();
        println!(
            "{:>3}{marker}  {:<16} {:<28} [{}]",
            row.id,
            row.name,
            row.born_in,
            friends.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Roster;
    use pretty_assertions::assert_eq;

    #[test]
    fn report_numbers_people_depth_first() {
        let rooted = Roster::sample().unwrap().build().unwrap();
        let report = build_report(&rooted).unwrap();

        assert_eq!(report.root_id, 1);
        let names: Vec<&str> = report.people.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ivan", "Petr", "Anna", "Maria"]);
        assert_eq!(report.people[0].friends, vec![2, 3, 4]);
        assert_eq!(report.stats.friendships, 10);
    }

    #[test]
    fn report_serializes_to_json() {
        let rooted = Roster::sample().unwrap().build().unwrap();
        let report = build_report(&rooted).unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["people"][3]["name"], "Maria");
        assert_eq!(value["people"][3]["born_in"], "2022-01-15T00:00:00");
        assert_eq!(value["stats"]["people"], 4);
    }

    #[test]
    fn run_accepts_each_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("g.json");
        let rooted = Roster::sample().unwrap().build().unwrap();
        fs::write(&path, Encoder::new().encode_rooted(&rooted).unwrap()).unwrap();

        run(&path, None, false).unwrap();
        run(&path, Some("json"), false).unwrap();
        run(&path, None, true).unwrap();
        assert!(run(&path, Some("yaml"), false).is_err());
    }

    #[test]
    fn raw_mode_skips_reference_checks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dangling.json");
        fs::write(
            &path,
            r#"{"root_id": 1, "objects": {"1": {"name": "a", "born_in": "2000-01-01T00:00:00", "friend_ids": [9]}}}"#,
        )
        .unwrap();

        run(&path, None, true).unwrap();
        let err = run(&path, None, false).unwrap_err();
        assert!(format!("{err:#}").contains("dangling reference"));
    }
}
