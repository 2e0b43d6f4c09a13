//! End-to-end changelog updates.

mod common;

use apidelta_core::core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use apidelta_core::diff::diff_value;
use apidelta_core::errors::ExErrorKind;
use apidelta_core::logging_facility::init_test_capture;
use apidelta_core::surface::{ApiSurface, TypeSurface};
use apidelta_core::{update_changelog, ChangeCategory, ChangelogConfig};
use common::{fixed_config, scenario_baseline, scenario_current, AZURE_CHANGELOG, BAR};

#[test]
fn test_scenario_into_existing_unreleased_release() {
    let update = update_changelog(
        AZURE_CHANGELOG,
        &scenario_current(),
        &scenario_baseline(),
        Vec::new(),
        "1.1.0-beta.1",
        &fixed_config("2023-02-20"),
    )
    .unwrap();

    assert_eq!(update.target_index, Some(0));
    assert!(update.changed);
    // Existing heading wins over the configured date
    assert!(update.text.contains("## 1.1.0-beta.1 (Unreleased)\n"));
    assert!(!update.text.contains("2023-02-20"));
    assert!(update.text.contains(&format!(
        "### Breaking Changes\n\n- Removed method 'String M()' in type {BAR}\n\n### Bugs Fixed\n"
    )));
    assert!(update.text.contains(&format!(
        "### Other Changes\n\n- Obsoleted method 'String N()' in type {BAR}\n\n## 1.0.0 (2023-01-10)\n"
    )));
}

#[test]
fn test_new_version_becomes_newest_release() {
    let update = update_changelog(
        AZURE_CHANGELOG,
        &scenario_current(),
        &scenario_baseline(),
        diff_value("Azure.Core", "1.30.0", "1.31.0").into_iter().collect(),
        "1.2.0",
        &fixed_config("2023-02-20"),
    )
    .unwrap();

    assert_eq!(update.target_index, Some(0));
    assert!(update.report.is_none());
    assert_eq!(update.release.other_entries.len(), 2);
    assert!(update.text.starts_with(&format!(
        "# Release History\n\n## 1.2.0 (2023-02-20)\n\n### Breaking Changes\n\n- Removed method 'String M()' in type {BAR}\n\n### Other Changes\n\n- Obsoleted method 'String N()' in type {BAR}\n- Upgraded Azure.Core from 1.30.0 to 1.31.0\n\n## 1.1.0-beta.1 (Unreleased)\n"
    )));
}

#[test]
fn test_second_run_is_noop() {
    let config = fixed_config("Unreleased");
    let first = update_changelog(
        AZURE_CHANGELOG,
        &scenario_current(),
        &scenario_baseline(),
        Vec::new(),
        "1.1.0-beta.1",
        &config,
    )
    .unwrap();
    let second = update_changelog(
        &first.text,
        &scenario_current(),
        &scenario_baseline(),
        Vec::new(),
        "1.1.0-beta.1",
        &config,
    )
    .unwrap();

    assert!(!second.changed);
    assert_eq!(second.text, first.text);
    assert_eq!(second.report.map(|r| r.skipped), Some(2));
}

#[test]
fn test_filter_excludes_obsoletions() {
    let config = ChangelogConfig {
        include_categories: [ChangeCategory::Added].into_iter().collect(),
        ..fixed_config("Unreleased")
    };
    let update = update_changelog(
        "",
        &scenario_current(),
        &scenario_baseline(),
        Vec::new(),
        "2.0.0",
        &config,
    )
    .unwrap();
    assert!(update.release.other_entries.is_empty());
    assert_eq!(
        update.text,
        format!("## 2.0.0 (Unreleased)\n\n### Breaking Changes\n\n- Removed method 'String M()' in type {BAR}\n")
    );
}

#[test]
fn test_invalid_config_rejected_before_work() {
    let config = ChangelogConfig {
        release_date: Some("soon".to_string()),
        ..ChangelogConfig::default()
    };
    let err = update_changelog(
        AZURE_CHANGELOG,
        &scenario_current(),
        &scenario_baseline(),
        Vec::new(),
        "1.0.0",
        &config,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
}

#[test]
fn test_logs_operation_boundaries() {
    let capture = init_test_capture();
    let surface = ApiSurface::new(vec![TypeSurface::new("Azure.Logging.Unique")]);
    update_changelog(
        "",
        &surface,
        &surface,
        Vec::new(),
        "7.7.7-logging",
        &fixed_config("Unreleased"),
    )
    .unwrap();

    let mine = |event: &str| {
        capture.count_events(|e| {
            e.op.as_deref() == Some("update_changelog")
                && e.event.as_deref() == Some(event)
                && e.fields.get("release_version").map(String::as_str) == Some("7.7.7-logging")
        })
    };
    assert_eq!(mine(EVENT_START), 1);
    assert_eq!(mine(EVENT_END), 1);
    capture.assert_event_exists("compare_surfaces", EVENT_END);
    capture.assert_event_exists("parse_changelog", EVENT_END);
}

#[test]
fn test_logs_error_with_code() {
    let capture = init_test_capture();
    let surface = ApiSurface::default();
    let err = update_changelog("", &surface, &surface, Vec::new(), "", &fixed_config("Unreleased"))
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);

    let errors = capture.count_events(|e| {
        e.op.as_deref() == Some("update_changelog")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.fields.get("err.code").map(String::as_str) == Some("ERR_INVALID_INPUT")
    });
    assert!(errors >= 1);
}

#[test]
fn test_new_release_without_preamble_keeps_gap_before_old_release() {
    let update = update_changelog(
        "## 1.0.0 (2023-01-01)\n\n### Other Changes\n\n- old\n",
        &scenario_current(),
        &scenario_baseline(),
        Vec::new(),
        "1.1.0",
        &fixed_config("Unreleased"),
    )
    .unwrap();

    assert_eq!(
        update.text,
        format!(
            "## 1.1.0 (Unreleased)\n\n### Breaking Changes\n\n- Removed method 'String M()' in type {BAR}\n\n### Other Changes\n\n- Obsoleted method 'String N()' in type {BAR}\n\n## 1.0.0 (2023-01-01)\n\n### Other Changes\n\n- old\n"
        )
    );
}
