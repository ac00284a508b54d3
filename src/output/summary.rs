// src/output/summary.rs

use crate::constants;
use crate::{CloneActivity, MirrorReport};
use anyhow::Result;
use log::debug;
use std::io::Write;

/// Writes the end-of-run summary.
///
/// Always lists the target group with its group and project counts and the
/// clone counts. Failed clones, failed listings, revisited groups and groups
/// beyond the depth limit each get a section only when there are any.
pub fn write_summary(writer: &mut dyn Write, report: &MirrorReport) -> Result<()> {
    let root = &report.tree.root;
    debug!("Writing summary for group '{}'...", root.group.name);
    write!(writer, "\n{}\n", constants::SUMMARY_SEPARATOR)?;
    writeln!(
        writer,
        "Group: {} ({} group(s), {} project(s))",
        root.group.name,
        root.group_count(),
        root.project_count()
    )?;

    match &report.clones {
        CloneActivity::Planned(requests) => {
            writeln!(writer, "Planned clones: {}", requests.len())?;
        }
        CloneActivity::Ran(results) => {
            let failed = report.failed_clones();
            writeln!(writer, "Cloned: {}", results.len() - failed.len())?;
            writeln!(writer, "Failed: {}", failed.len())?;
            for result in failed {
                writeln!(
                    writer,
                    "- {} ({}): {}",
                    result.request.project_name,
                    result.request.destination.display(),
                    result.outcome.failure_reason().unwrap_or_default()
                )?;
            }
        }
    }

    let tree = &report.tree;
    if !tree.failures.is_empty() {
        writeln!(writer, "Failed listings: {}", tree.failures.len())?;
        for failure in &tree.failures {
            writeln!(
                writer,
                "- {} of '{}' (id {}): {}",
                failure.listing, failure.group_name, failure.group_id, failure.error
            )?;
        }
    }
    if !tree.revisited.is_empty() {
        writeln!(writer, "Groups skipped as already visited: {}", tree.revisited.len())?;
        for group in &tree.revisited {
            writeln!(writer, "- {} (id {})", group.name, group.id)?;
        }
    }
    if !tree.depth_limited.is_empty() {
        writeln!(writer, "Groups beyond the depth limit: {}", tree.depth_limited.len())?;
        for group in &tree.depth_limited {
            writeln!(writer, "- {} (id {})", group.name, group.id)?;
        }
    }
    writer.flush()?;
    Ok(())
}
