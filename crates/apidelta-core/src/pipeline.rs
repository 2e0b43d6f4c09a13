//! End-to-end changelog update.
//!
//! compare surfaces, build release notes, parse the existing changelog,
//! merge or insert, serialize.

use crate::config::ChangelogConfig;
use crate::diff::engine::compare_surfaces;
use crate::diff::model::{ChangeLogResult, ValueChange};
use crate::errors::{ApiDeltaError, ExError};
use crate::release::document::ChangelogDocument;
use crate::release::merge::MergeReport;
use crate::release::model::Release;
use crate::surface::load::validate_surface;
use crate::surface::model::ApiSurface;
use crate::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;

/// Outcome of [`update_changelog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogUpdate {
    /// Full updated changelog text
    pub text: String,
    /// Release notes built from this comparison
    pub release: Release,
    /// Set when the notes were merged into an existing release
    pub report: Option<MergeReport>,
    /// Index of the release that received the notes, if any
    pub target_index: Option<usize>,
    /// True if `text` differs from the (line-ending normalized) input
    pub changed: bool,
}

fn run(
    existing_text: &str,
    current: &ApiSurface,
    baseline: &ApiSurface,
    value_changes: Vec<ValueChange>,
    version: &str,
    config: &ChangelogConfig,
) -> Result<ChangelogUpdate, ExError> {
    let version = version.trim();
    if version.is_empty() {
        return Err(ApiDeltaError::InvalidInput {
            reason: "release version must not be empty".to_string(),
        }
        .into());
    }
    config.validate()?;
    validate_surface(current, "current")?;
    validate_surface(baseline, "baseline")?;

    let result = value_changes.into_iter().fold(
        ChangeLogResult::new(compare_surfaces(current, baseline)),
        |result, change| result.with_value_change(Some(change)),
    );
    let release = config.release_note_builder().build(
        &result,
        version,
        &config.resolved_release_date(),
    );

    let mut document = ChangelogDocument::parse(existing_text);
    let (report, target_index) = match document.find_release(version) {
        Some(index) => {
            let report = document.merge_into(index, &release, config.merge_mode)?;
            (Some(report), Some(index))
        }
        None if !release.is_empty() => {
            document.insert_release(0, release.clone())?;
            (None, Some(0))
        }
        None => (None, None),
    };

    let text = document.serialize();
    let changed = text != existing_text.replace("\r\n", "\n");
    Ok(ChangelogUpdate {
        text,
        release,
        report,
        target_index,
        changed,
    })
}

/// Compare `current` against `baseline` and fold the resulting release
/// notes for `version` into `existing_text`.
///
/// If the changelog already has a release for `version` the notes are
/// merged into it (its heading is kept). Otherwise a new release is
/// inserted as the newest one, unless there is nothing to report.
///
/// # Errors
///
/// - `InvalidInput` if `version` is blank
/// - `InvalidConfig` if `config` fails validation
/// - `DuplicateKey` if either surface has colliding keys
pub fn update_changelog(
    existing_text: &str,
    current: &ApiSurface,
    baseline: &ApiSurface,
    value_changes: Vec<ValueChange>,
    version: &str,
    config: &ChangelogConfig,
) -> Result<ChangelogUpdate, ExError> {
    let started = Instant::now();
    log_op_start!("update_changelog", release_version = version);

    match run(
        existing_text,
        current,
        baseline,
        value_changes,
        version,
        config,
    ) {
        Ok(update) => {
            log_op_end!(
                "update_changelog",
                duration_ms = started.elapsed().as_millis() as u64,
                release_version = version,
                changed = update.changed,
                merged = update.report.is_some()
            );
            Ok(update)
        }
        Err(err) => {
            let err = err.with_op("update_changelog");
            log_op_error!(
                "update_changelog",
                err.clone(),
                duration_ms = started.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;
    use crate::surface::model::{MethodSurface, TypeSurface};

    fn config() -> ChangelogConfig {
        ChangelogConfig {
            release_date: Some("Unreleased".to_string()),
            ..ChangelogConfig::default()
        }
    }

    fn surfaces() -> (ApiSurface, ApiSurface) {
        let baseline = ApiSurface::new(vec![TypeSurface::new("Azure.Foo.Bar")
            .with_method(MethodSurface::new("String", "M", &[]))]);
        let current = ApiSurface::new(vec![TypeSurface::new("Azure.Foo.Bar")]);
        (current, baseline)
    }

    #[test]
    fn test_inserts_new_release_at_top() {
        let (current, baseline) = surfaces();
        let existing = "# Release History\n\n## 1.0.0 (2023-01-01)\n\n### Other Changes\n\n- old\n";
        let update =
            update_changelog(existing, &current, &baseline, Vec::new(), "1.1.0", &config())
                .unwrap();
        assert_eq!(
            update.text,
            "# Release History\n\n## 1.1.0 (Unreleased)\n\n### Breaking Changes\n\n- Removed method 'String M()' in type Azure.Foo.Bar\n\n## 1.0.0 (2023-01-01)\n\n### Other Changes\n\n- old\n"
        );
        assert_eq!(update.target_index, Some(0));
        assert!(update.report.is_none());
        assert!(update.changed);
    }

    #[test]
    fn test_merges_into_existing_release() {
        let (current, baseline) = surfaces();
        let existing = "## 1.1.0 (Unreleased)\n\n### Features Added\n\n- New client\n";
        let update =
            update_changelog(existing, &current, &baseline, Vec::new(), "1.1.0", &config())
                .unwrap();
        assert_eq!(
            update.text,
            "## 1.1.0 (Unreleased)\n\n### Features Added\n\n- New client\n\n### Breaking Changes\n\n- Removed method 'String M()' in type Azure.Foo.Bar\n"
        );
        assert_eq!(update.report.map(|r| r.breaking_added), Some(1));
    }

    #[test]
    fn test_no_changes_leaves_text_alone() {
        let (current, _) = surfaces();
        let existing = "# Release History\r\n";
        let update =
            update_changelog(existing, &current, &current, Vec::new(), "1.1.0", &config())
                .unwrap();
        assert_eq!(update.text, "# Release History\n");
        assert!(!update.changed);
        assert_eq!(update.target_index, None);
    }

    #[test]
    fn test_blank_version_rejected() {
        let (current, baseline) = surfaces();
        let err = update_changelog("", &current, &baseline, Vec::new(), "  ", &config())
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert_eq!(err.op(), Some("update_changelog"));
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let (current, _) = surfaces();
        let broken = ApiSurface::new(vec![
            TypeSurface::new("Azure.Foo.Bar"),
            TypeSurface::new("Azure.Foo.Bar"),
        ]);
        let err = update_changelog("", &current, &broken, Vec::new(), "1.1.0", &config())
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::DuplicateKey);
    }
}
