// src/output/dry_run.rs

use crate::clone::CloneRequest;
use anyhow::Result;
use log::debug;
use std::io::Write;

/// Writes the output for a dry run (-D).
///
/// Lists the git commands that would run, in plan order, with credentials
/// removed from the URLs.
pub fn write_dry_run(writer: &mut dyn Write, requests: &[CloneRequest]) -> Result<()> {
    debug!("Writing dry run for {} clone(s)...", requests.len());
    writeln!(writer, "\n--- Dry Run: Clones that would run ---")?;

    for request in requests {
        writeln!(writer, "- {}", request)?;
    }

    writeln!(writer, "--- End Dry Run ---")?;
    writer.flush()?;
    Ok(())
}
