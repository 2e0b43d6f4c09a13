//! Merging freshly built release notes into an existing release.

use crate::release::model::{Release, SectionKind};
use crate::{log_op_end, log_op_start};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// How entries from a source release are combined with a target release.
///
/// `Group` appends each section's entries to the same section of the
/// target, skipping entries the target already lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeMode {
    #[default]
    Group,
}

/// What a merge did to the target release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    pub breaking_added: usize,
    pub other_added: usize,
    /// Source entries already present in the target
    pub skipped: usize,
}

impl MergeReport {
    pub fn added(&self) -> usize {
        self.breaking_added + self.other_added
    }

    /// True if the target release was modified
    pub fn changed(&self) -> bool {
        self.added() > 0
    }
}

/// Append the entries of `source` that `target` lacks, keeping source order.
///
/// Returns `(added, skipped)`.
fn append_missing(target: &mut Vec<String>, source: &[String]) -> (usize, usize) {
    let mut added = 0;
    let mut skipped = 0;
    for entry in source {
        if target.iter().any(|existing| existing == entry) {
            skipped += 1;
        } else {
            target.push(entry.clone());
            added += 1;
        }
    }
    (added, skipped)
}

/// Merge `source` into `target`.
///
/// The target keeps its version, date and layout; missing sections are
/// created when the release is rendered. Merging the same source twice
/// leaves the target unchanged the second time.
pub fn merge_release(source: &Release, target: &mut Release, mode: MergeMode) -> MergeReport {
    let started = Instant::now();
    log_op_start!("merge_release", release_version = target.version.as_str());
    let mut report = MergeReport::default();

    match mode {
        MergeMode::Group => {
            let (added, skipped) = append_missing(
                target.entries_mut(SectionKind::Breaking),
                source.entries(SectionKind::Breaking),
            );
            report.breaking_added = added;
            report.skipped += skipped;

            let (added, skipped) = append_missing(
                target.entries_mut(SectionKind::Other),
                source.entries(SectionKind::Other),
            );
            report.other_added = added;
            report.skipped += skipped;
        }
    }

    log_op_end!(
        "merge_release",
        duration_ms = started.elapsed().as_millis() as u64,
        release_version = target.version.as_str(),
        breaking_added = report.breaking_added,
        other_added = report.other_added,
        skipped = report.skipped
    );
    report
}
