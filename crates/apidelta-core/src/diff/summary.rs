//! Human-readable summary renderer for change sets.

use crate::diff::model::{ChangeCategory, ChangeSet};

/// Render a Markdown summary of a [`ChangeSet`].
///
/// Intended for review workflows such as pull-request descriptions. It is
/// informational only; release notes are produced by
/// [`crate::release::builder`].
pub fn render_change_summary(changes: &ChangeSet) -> String {
    let mut out = String::new();

    out.push_str("## API Changes\n\n");

    if !changes.has_change() {
        out.push_str("_No API changes detected._\n");
        return out;
    }

    let breaking = changes.breaking_changes().len();
    let non_breaking = changes.len() - breaking;
    out.push_str(&format!(
        "**Breaking**: {breaking}  \n**Non-breaking**: {non_breaking}\n\n"
    ));

    for category in [
        ChangeCategory::Removed,
        ChangeCategory::Obsoleted,
        ChangeCategory::Added,
    ] {
        let entries: Vec<String> = changes
            .iter()
            .filter(|c| c.category() == category)
            .map(|c| c.description())
            .collect();
        if entries.is_empty() {
            continue;
        }
        let heading = match category {
            ChangeCategory::Removed => "Removed (breaking)",
            ChangeCategory::Obsoleted => "Obsoleted",
            ChangeCategory::Added => "Added",
        };
        out.push_str(&format!("### {} ({})\n\n", heading, entries.len()));
        for entry in entries {
            out.push_str(&format!("- {}\n", entry));
        }
        out.push('\n');
    }

    out
}
