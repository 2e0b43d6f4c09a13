//! Release notes model and rendering.
//!
//! A [`Release`] exposes its modeled content as plain fields. Releases
//! parsed from a changelog additionally remember how they were laid out in
//! the source text, so that rendering reproduces untouched parts byte for
//! byte and only re-renders what changed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date token used for a release that has not shipped yet
pub const UNRELEASED: &str = "Unreleased";

/// Date format used in release headings
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The two release-note sections this engine manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    Breaking,
    Other,
}

impl SectionKind {
    /// Sub-heading text, without the `### ` prefix
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Breaking => "Breaking Changes",
            SectionKind::Other => "Other Changes",
        }
    }

    /// Exact, case-sensitive match against a sub-heading title
    pub fn from_title(title: &str) -> Option<Self> {
        match title {
            "Breaking Changes" => Some(SectionKind::Breaking),
            "Other Changes" => Some(SectionKind::Other),
            _ => None,
        }
    }
}

/// Heading line as found in the source text (including leading blank lines).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawHeading {
    pub(crate) raw: String,
    pub(crate) version: String,
    pub(crate) date: String,
}

/// A modeled section as found in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawSection {
    pub(crate) kind: SectionKind,
    /// Verbatim text, from the leading blank lines through the last line
    pub(crate) raw: String,
    /// Non-bullet lines between the sub-heading and the first bullet
    pub(crate) preface: Vec<String>,
    /// Entries as parsed; the raw text is reused while entries still match
    pub(crate) parsed_entries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Block {
    Section(RawSection),
    /// Content this engine does not model, kept verbatim
    Passthrough(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ReleaseLayout {
    pub(crate) heading: Option<RawHeading>,
    pub(crate) blocks: Vec<Block>,
}

/// One version's entry in a changelog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub version: String,
    /// Release date (`YYYY-MM-DD`) or [`UNRELEASED`]
    pub date: String,
    pub breaking_entries: Vec<String>,
    pub other_entries: Vec<String>,
    pub(crate) layout: ReleaseLayout,
}

impl Release {
    pub fn new(version: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            date: date.into(),
            breaking_entries: Vec::new(),
            other_entries: Vec::new(),
            layout: ReleaseLayout::default(),
        }
    }

    /// A release whose heading carries the [`UNRELEASED`] token
    pub fn unreleased(version: impl Into<String>) -> Self {
        Self::new(version, UNRELEASED)
    }

    pub fn is_unreleased(&self) -> bool {
        self.date.trim().eq_ignore_ascii_case(UNRELEASED)
    }

    /// Parsed release date; `None` for unreleased or free-form dates
    pub fn release_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }

    pub fn entries(&self, kind: SectionKind) -> &[String] {
        match kind {
            SectionKind::Breaking => &self.breaking_entries,
            SectionKind::Other => &self.other_entries,
        }
    }

    pub fn entries_mut(&mut self, kind: SectionKind) -> &mut Vec<String> {
        match kind {
            SectionKind::Breaking => &mut self.breaking_entries,
            SectionKind::Other => &mut self.other_entries,
        }
    }

    /// Total number of modeled entries across both sections
    pub fn entry_count(&self) -> usize {
        self.breaking_entries.len() + self.other_entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }

    /// Change the release date, keeping the source heading's spacing
    /// when the heading is still in sync with the model.
    pub(crate) fn set_date(&mut self, date: &str) {
        let in_sync = matches!(
            &self.layout.heading,
            Some(h) if h.version == self.version && h.date == self.date
        );
        if let Some(heading) = self.layout.heading.as_mut().filter(|_| in_sync) {
            let old = format!("({})", heading.date);
            if let Some(at) = heading.raw.rfind(&old) {
                heading.raw.replace_range(at..at + old.len(), &format!("({date})"));
                heading.date = date.to_string();
            }
        }
        self.date = date.to_string();
    }

    /// Render this release as Markdown, standalone.
    ///
    /// Unchanged parts of a parsed release are reproduced verbatim.
    pub fn render(&self) -> String {
        let mut writer = MarkdownWriter::default();
        self.write_to(&mut writer);
        writer.finish()
    }

    /// Block order used for rendering.
    ///
    /// Sections the source text did not have are placed where a changelog
    /// author would put them: Breaking Changes before Other Changes, at the
    /// end of the release otherwise.
    fn render_plan(&self) -> Vec<PlannedBlock<'_>> {
        let mut plan: Vec<PlannedBlock<'_>> = self
            .layout
            .blocks
            .iter()
            .map(|block| match block {
                Block::Section(section) => PlannedBlock::Section(section.kind, Some(section)),
                Block::Passthrough(raw) => PlannedBlock::Passthrough(raw),
            })
            .collect();

        let position = |plan: &[PlannedBlock<'_>], kind: SectionKind| {
            plan.iter()
                .position(|b| matches!(b, PlannedBlock::Section(k, _) if *k == kind))
        };

        if !self.breaking_entries.is_empty() && position(&plan, SectionKind::Breaking).is_none() {
            let at = position(&plan, SectionKind::Other).unwrap_or(plan.len());
            plan.insert(at, PlannedBlock::Section(SectionKind::Breaking, None));
        }
        if !self.other_entries.is_empty() && position(&plan, SectionKind::Other).is_none() {
            let at = position(&plan, SectionKind::Breaking)
                .map(|i| i + 1)
                .unwrap_or(plan.len());
            plan.insert(at, PlannedBlock::Section(SectionKind::Other, None));
        }
        plan
    }

    pub(crate) fn write_to(&self, out: &mut MarkdownWriter) {
        match &self.layout.heading {
            Some(heading) if heading.version == self.version && heading.date == self.date => {
                out.verbatim(&heading.raw);
            }
            _ => out.rendered(&format!("## {} ({})\n", self.version, self.date)),
        }

        for block in self.render_plan() {
            match block {
                PlannedBlock::Passthrough(raw) => out.verbatim(raw),
                PlannedBlock::Section(kind, Some(section))
                    if section.parsed_entries.as_slice() == self.entries(kind) =>
                {
                    out.verbatim(&section.raw);
                }
                PlannedBlock::Section(kind, section) => {
                    let entries = self.entries(kind);
                    if entries.is_empty() {
                        continue;
                    }
                    let mut text = format!("### {}\n\n", kind.title());
                    if let Some(section) = section {
                        for line in &section.preface {
                            text.push_str(line);
                            text.push('\n');
                        }
                    }
                    for entry in entries {
                        text.push_str("- ");
                        text.push_str(entry);
                        text.push('\n');
                    }
                    out.rendered(&text);
                }
            }
        }
    }
}

enum PlannedBlock<'a> {
    Section(SectionKind, Option<&'a RawSection>),
    Passthrough(&'a str),
}

/// Markdown output that keeps one blank line after every re-rendered block.
///
/// Verbatim text carries its own spacing, except right after a rendered
/// block, where text not starting with a blank line gets one inserted.
#[derive(Debug, Default)]
pub(crate) struct MarkdownWriter {
    out: String,
    after_rendered: bool,
}

impl MarkdownWriter {
    pub(crate) fn new(preamble: &str) -> Self {
        Self {
            out: preamble.to_string(),
            after_rendered: false,
        }
    }

    /// Source text reproduced as is
    pub(crate) fn verbatim(&mut self, text: &str) {
        if self.after_rendered && !starts_with_blank_line(text) {
            push_gap(&mut self.out);
        }
        self.out.push_str(text);
        self.after_rendered = false;
    }

    /// Text in the canonical layout, separated by exactly one blank line
    pub(crate) fn rendered(&mut self, text: &str) {
        push_gap(&mut self.out);
        self.out.push_str(text);
        self.after_rendered = true;
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}

fn starts_with_blank_line(text: &str) -> bool {
    text.split('\n').next().is_some_and(|line| line.trim().is_empty())
}

/// Ensure exactly one blank line separates what was written from what follows.
fn push_gap(out: &mut String) {
    if out.is_empty() {
        return;
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    if !out.ends_with("\n\n") {
        out.push('\n');
    }
}
