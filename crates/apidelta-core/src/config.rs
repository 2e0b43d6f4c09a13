//! Changelog generation settings.

use crate::diff::model::ChangeCategory;
use crate::errors::{ApiDeltaError, ExError};
use crate::release::merge::MergeMode;
use crate::release::model::{DATE_FORMAT, UNRELEASED};
use crate::release::ReleaseNoteBuilder;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Settings for one changelog update.
///
/// Decodes from JSON; missing fields take their defaults:
///
/// ```
/// use apidelta_core::config::ChangelogConfig;
///
/// let config = ChangelogConfig::from_json_str(r#"{"release_date": "Unreleased"}"#).unwrap();
/// assert_eq!(config.include_categories, ChangelogConfig::default().include_categories);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChangelogConfig {
    /// Non-breaking categories listed under `Other Changes`
    pub include_categories: BTreeSet<ChangeCategory>,
    /// Date for a newly created release; `None` means today (UTC)
    pub release_date: Option<String>,
    pub merge_mode: MergeMode,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            include_categories: BTreeSet::from([ChangeCategory::Obsoleted]),
            release_date: None,
            merge_mode: MergeMode::Group,
        }
    }
}

impl ChangelogConfig {
    /// Decode and validate a JSON configuration document.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the document does not decode or fails
    /// [`validate`](Self::validate).
    pub fn from_json_str(text: &str) -> Result<Self, ExError> {
        let config: ChangelogConfig = serde_json::from_str(text).map_err(|e| {
            ExError::from(ApiDeltaError::InvalidConfig {
                reason: e.to_string(),
            })
            .with_op("load_config")
            .with_source(ExError::from(ApiDeltaError::from(e)))
        })?;
        config.validate().map_err(|e| e.with_op("load_config"))?;
        Ok(config)
    }

    /// Check that `release_date` is either `Unreleased` or `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` describing the offending value.
    pub fn validate(&self) -> Result<(), ExError> {
        if let Some(date) = &self.release_date {
            let date = date.trim();
            if !date.eq_ignore_ascii_case(UNRELEASED)
                && NaiveDate::parse_from_str(date, DATE_FORMAT).is_err()
            {
                return Err(ApiDeltaError::InvalidConfig {
                    reason: format!(
                        "release_date '{}' is neither '{}' nor a {} date",
                        date, UNRELEASED, DATE_FORMAT
                    ),
                }
                .into());
            }
        }
        if self.include_categories.contains(&ChangeCategory::Removed) {
            tracing::warn!("include_categories lists Removed; breaking changes are always included");
        }
        Ok(())
    }

    /// Date for a new release heading
    pub fn resolved_release_date(&self) -> String {
        match &self.release_date {
            Some(date) => date.trim().to_string(),
            None => Utc::now().date_naive().format(DATE_FORMAT).to_string(),
        }
    }

    pub fn release_note_builder(&self) -> ReleaseNoteBuilder {
        ReleaseNoteBuilder::new(self.include_categories.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;

    #[test]
    fn test_defaults() {
        let config = ChangelogConfig::default();
        assert_eq!(
            config.include_categories.into_iter().collect::<Vec<_>>(),
            vec![ChangeCategory::Obsoleted]
        );
        assert_eq!(config.merge_mode, MergeMode::Group);
        assert!(config.release_date.is_none());
    }

    #[test]
    fn test_from_json_full() {
        let config = ChangelogConfig::from_json_str(
            r#"{"include_categories": ["Added", "Obsoleted"], "release_date": "2024-05-01", "merge_mode": "group"}"#,
        )
        .unwrap();
        assert_eq!(config.include_categories.len(), 2);
        assert_eq!(config.resolved_release_date(), "2024-05-01");
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(
            ChangelogConfig::from_json_str("{}").unwrap(),
            ChangelogConfig::default()
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ChangelogConfig::from_json_str(r#"{"mode": "group"}"#).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
        assert_eq!(err.op(), Some("load_config"));
    }

    #[test]
    fn test_bad_release_date_rejected() {
        let err = ChangelogConfig::from_json_str(r#"{"release_date": "next week"}"#).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
        assert!(err.message().contains("next week"));
    }

    #[test]
    fn test_today_is_formatted() {
        let date = ChangelogConfig::default().resolved_release_date();
        assert!(NaiveDate::parse_from_str(&date, DATE_FORMAT).is_ok());
    }
}
