//! Change taxonomy.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! A [`ChangeSet`] preserves discovery order; nothing here sorts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// What happened to a member between baseline and current.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangeCategory {
    Added,
    Removed,
    Obsoleted,
}

impl ChangeCategory {
    /// `Removed` is the only breaking category
    pub fn is_breaking(self) -> bool {
        matches!(self, ChangeCategory::Removed)
    }

    /// Verb used at the start of a rendered note
    pub fn verb(self) -> &'static str {
        match self {
            ChangeCategory::Added => "Added",
            ChangeCategory::Removed => "Removed",
            ChangeCategory::Obsoleted => "Obsoleted",
        }
    }

    pub const ALL: [ChangeCategory; 3] = [
        ChangeCategory::Added,
        ChangeCategory::Removed,
        ChangeCategory::Obsoleted,
    ];
}

impl fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Which property accessor a [`Change::PropertyAccessor`] refers to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Accessor {
    Get,
    Set,
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Get => f.write_str("Get"),
            Accessor::Set => f.write_str("Set"),
        }
    }
}

/// Kind of member a change refers to, as spelled in rendered notes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemberKind {
    Type,
    Constructor,
    Method,
    Property,
    PropertyAccessor,
}

impl MemberKind {
    pub fn label(self) -> &'static str {
        match self {
            MemberKind::Type => "type",
            MemberKind::Constructor => "constructor",
            MemberKind::Method => "method",
            MemberKind::Property => "property",
            MemberKind::PropertyAccessor => "property method",
        }
    }
}

/// A single API change.
///
/// `type_name` is always the fully qualified name of the owning type;
/// `signature` is the display signature of the member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind")]
pub enum Change {
    Type {
        type_name: String,
        category: ChangeCategory,
    },
    Constructor {
        type_name: String,
        signature: String,
        category: ChangeCategory,
    },
    Method {
        type_name: String,
        signature: String,
        category: ChangeCategory,
    },
    Property {
        type_name: String,
        signature: String,
        category: ChangeCategory,
    },
    PropertyAccessor {
        type_name: String,
        signature: String,
        accessor: Accessor,
        category: ChangeCategory,
    },
}

impl Change {
    pub fn category(&self) -> ChangeCategory {
        match self {
            Change::Type { category, .. }
            | Change::Constructor { category, .. }
            | Change::Method { category, .. }
            | Change::Property { category, .. }
            | Change::PropertyAccessor { category, .. } => *category,
        }
    }

    pub fn is_breaking(&self) -> bool {
        self.category().is_breaking()
    }

    pub fn kind(&self) -> MemberKind {
        match self {
            Change::Type { .. } => MemberKind::Type,
            Change::Constructor { .. } => MemberKind::Constructor,
            Change::Method { .. } => MemberKind::Method,
            Change::Property { .. } => MemberKind::Property,
            Change::PropertyAccessor { .. } => MemberKind::PropertyAccessor,
        }
    }

    /// Fully qualified name of the type the change belongs to
    pub fn type_name(&self) -> &str {
        match self {
            Change::Type { type_name, .. }
            | Change::Constructor { type_name, .. }
            | Change::Method { type_name, .. }
            | Change::Property { type_name, .. }
            | Change::PropertyAccessor { type_name, .. } => type_name,
        }
    }

    /// Release-note text for this change.
    ///
    /// The wording is consumed by existing changelogs and must stay stable.
    pub fn description(&self) -> String {
        let verb = self.category().verb();
        match self {
            Change::Type { type_name, .. } => format!("{verb} type '{type_name}'"),
            Change::Constructor {
                type_name,
                signature,
                ..
            }
            | Change::Method {
                type_name,
                signature,
                ..
            }
            | Change::Property {
                type_name,
                signature,
                ..
            } => format!(
                "{verb} {} '{signature}' in type {type_name}",
                self.kind().label()
            ),
            Change::PropertyAccessor {
                type_name,
                signature,
                accessor,
                ..
            } => format!(
                "{verb} property method '{accessor}' for '{signature}' in type {type_name}"
            ),
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// Ordered collection of changes produced by one comparison.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, change: Change) {
        self.changes.push(change);
    }

    /// True iff at least one change was recorded
    pub fn has_change(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Change> {
        self.changes.iter()
    }

    pub fn as_slice(&self) -> &[Change] {
        &self.changes
    }

    /// Breaking changes, in discovery order
    pub fn breaking_changes(&self) -> Vec<&Change> {
        self.changes.iter().filter(|c| c.is_breaking()).collect()
    }

    /// Non-breaking changes, in discovery order
    pub fn non_breaking_changes(&self) -> Vec<&Change> {
        self.changes.iter().filter(|c| !c.is_breaking()).collect()
    }

    pub fn count_by_category(&self) -> BTreeMap<ChangeCategory, usize> {
        let mut counts = BTreeMap::new();
        for change in &self.changes {
            *counts.entry(change.category()).or_insert(0) += 1;
        }
        counts
    }
}

impl From<Vec<Change>> for ChangeSet {
    fn from(changes: Vec<Change>) -> Self {
        Self { changes }
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

/// A change to a simple metadata fact, e.g. a dependency version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValueChange {
    pub old_value: String,
    pub new_value: String,
    /// Rendered release-note text
    pub description: String,
}

impl ValueChange {
    /// Record a change only when the values differ.
    ///
    /// `describe` receives `(old, new)` and produces the note text.
    pub fn between<F>(old: &str, new: &str, describe: F) -> Option<Self>
    where
        F: FnOnce(&str, &str) -> String,
    {
        if old == new {
            return None;
        }
        Some(Self {
            old_value: old.to_string(),
            new_value: new.to_string(),
            description: describe(old, new),
        })
    }
}

/// Everything one comparison run produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeLogResult {
    api_changes: ChangeSet,
    value_changes: Vec<ValueChange>,
}

impl ChangeLogResult {
    pub fn new(api_changes: ChangeSet) -> Self {
        Self {
            api_changes,
            value_changes: Vec::new(),
        }
    }

    /// Append a value change; `None` (no change) is ignored
    pub fn with_value_change(mut self, change: Option<ValueChange>) -> Self {
        if let Some(change) = change {
            self.value_changes.push(change);
        }
        self
    }

    pub fn api_changes(&self) -> &ChangeSet {
        &self.api_changes
    }

    pub fn value_changes(&self) -> &[ValueChange] {
        &self.value_changes
    }

    /// True if either API or value changes were recorded
    pub fn has_change(&self) -> bool {
        self.api_changes.has_change() || !self.value_changes.is_empty()
    }
}
