//! Value-diff utility for metadata facts that are not part of the API
//! surface, such as dependency versions.

use crate::diff::model::ValueChange;

/// Compare two versions of a named dependency or fact.
///
/// Returns `None` when both values are equal, otherwise a change rendered as
/// `Upgraded {subject} from {old} to {new}`.
pub fn diff_value(subject: &str, old: &str, new: &str) -> Option<ValueChange> {
    ValueChange::between(old, new, |old, new| {
        format!("Upgraded {subject} from {old} to {new}")
    })
}

/// Like [`diff_value`] but tolerates a fact missing from one side.
///
/// A fact present only on one side is rendered with `(none)` for the
/// missing value; absent on both sides means no change.
pub fn diff_optional_value(subject: &str, old: Option<&str>, new: Option<&str>) -> Option<ValueChange> {
    match (old, new) {
        (None, None) => None,
        (old, new) => diff_value(subject, old.unwrap_or("(none)"), new.unwrap_or("(none)")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_values_yield_none() {
        assert!(diff_value("Azure.Core", "1.30.0", "1.30.0").is_none());
    }

    #[test]
    fn test_upgrade_description() {
        let change = diff_value("Azure.Core", "1.30.0", "1.32.0").unwrap();
        assert_eq!(change.old_value, "1.30.0");
        assert_eq!(change.new_value, "1.32.0");
        assert_eq!(change.description, "Upgraded Azure.Core from 1.30.0 to 1.32.0");
    }

    #[test]
    fn test_optional_values() {
        assert!(diff_optional_value("api-version", None, None).is_none());
        let change = diff_optional_value("api-version", None, Some("2023-01-01")).unwrap();
        assert_eq!(change.description, "Upgraded api-version from (none) to 2023-01-01");
    }
}
