use std::collections::hash_map::Entry;
use std::collections::HashMap;

use anyhow::Result;
use spec_sync::{SpecSource, SyncConfig};

/// Validate a config without fetching: list each source with its derived
/// output filename and flag duplicate spec ids.
pub fn run(config: &SyncConfig) -> Result<()> {
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    let mut duplicates = 0usize;

    for (index, source) in config.sources.iter().enumerate() {
        let kind = match source {
            SpecSource::File { .. } => "file",
            SpecSource::Url { .. } => "url",
        };
        println!(
            "{index}: [{kind}] {} -> {}",
            source.spec_id(),
            source.output_filename()
        );

        match first_seen.entry(source.spec_id()) {
            Entry::Occupied(entry) => {
                eprintln!(
                    "warning: duplicate spec_id \"{}\": sources {} and {index} write the same file",
                    source.spec_id(),
                    entry.get()
                );
                duplicates += 1;
            }
            Entry::Vacant(entry) => {
                entry.insert(index);
            }
        }
    }

    println!(
        "{} sources -> {}",
        config.sources.len(),
        config.target_directory.display()
    );
    if duplicates > 0 {
        anyhow::bail!("{duplicates} duplicate spec_id(s) found");
    }

    Ok(())
}
