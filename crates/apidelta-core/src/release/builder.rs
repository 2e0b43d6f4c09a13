//! Turning a comparison result into release notes.

use crate::diff::model::{ChangeCategory, ChangeLogResult};
use crate::release::model::Release;
use std::collections::BTreeSet;

/// Builds a [`Release`] from a [`ChangeLogResult`].
///
/// Breaking changes always go to `Breaking Changes`. Non-breaking API
/// changes go to `Other Changes` only when their category is included;
/// value changes always go to `Other Changes`, after the API changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseNoteBuilder {
    include: BTreeSet<ChangeCategory>,
}

impl Default for ReleaseNoteBuilder {
    /// Includes obsoletions only
    fn default() -> Self {
        Self::new([ChangeCategory::Obsoleted])
    }
}

impl ReleaseNoteBuilder {
    pub fn new(include: impl IntoIterator<Item = ChangeCategory>) -> Self {
        Self {
            include: include.into_iter().collect(),
        }
    }

    pub fn includes(&self, category: ChangeCategory) -> bool {
        category.is_breaking() || self.include.contains(&category)
    }

    pub fn build(&self, result: &ChangeLogResult, version: &str, date: &str) -> Release {
        let mut release = Release::new(version, date);
        let changes = result.api_changes();

        release.breaking_entries = changes
            .breaking_changes()
            .into_iter()
            .map(|c| c.description())
            .collect();

        release.other_entries = changes
            .non_breaking_changes()
            .into_iter()
            .filter(|c| self.includes(c.category()))
            .map(|c| c.description())
            .chain(result.value_changes().iter().map(|v| v.description.clone()))
            .collect();

        tracing::debug!(
            release_version = version,
            breaking = release.breaking_entries.len(),
            other = release.other_entries.len(),
            filtered = changes.non_breaking_changes().len() + result.value_changes().len()
                - release.other_entries.len(),
            "release notes built"
        );
        release
    }
}

/// Build release notes with the given non-breaking category filter.
pub fn build_release(
    result: &ChangeLogResult,
    version: &str,
    date: &str,
    include: &BTreeSet<ChangeCategory>,
) -> Release {
    ReleaseNoteBuilder::new(include.iter().copied()).build(result, version, date)
}
