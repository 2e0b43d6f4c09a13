//! Changelog document parsing and serialization.
//!
//! A changelog is Markdown: a free-form preamble followed by releases.
//!
//! ```text
//! # Release History
//!
//! ## 1.0.1 (2023-02-20)
//!
//! ### Breaking Changes
//!
//! - Removed method 'String M()' in type Azure.Foo.Bar
//!
//! ### Other Changes
//!
//! - Obsoleted method 'String N()' in type Azure.Foo.Bar
//! ```
//!
//! Only `## <version> (<date>)` headings start a release, and only the
//! `Breaking Changes` and `Other Changes` sub-sections are modeled. All
//! other content (preamble, other sub-sections, unrecognized headings and
//! everything under them, fenced code) is kept verbatim and written back
//! in place, so `serialize(parse(text))` reproduces `text` exactly up to
//! line-ending normalization.

use crate::errors::{ApiDeltaError, ExError};
use crate::release::merge::{merge_release, MergeMode, MergeReport};
use crate::release::model::{
    Block, MarkdownWriter, RawHeading, RawSection, Release, SectionKind, DATE_FORMAT,
};
use crate::{log_op_end, log_op_error, log_op_start};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;
use std::time::Instant;

fn release_heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^##\s+(?P<version>[^\s()]+)\s+\((?P<date>[^()]+)\)\s*$")
            .expect("Invalid regex")
    })
}

fn sub_heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^###\s+(?P<title>.+?)\s*$").expect("Invalid regex"))
}

fn top_heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#{1,2}(\s|$)").expect("Invalid regex"))
}

fn is_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

enum OpenBlock {
    Section(RawSection),
    Passthrough(String),
}

/// Line-oriented parser state.
///
/// Blank lines are held in `pending` and attached to whatever starts next,
/// so every heading owns the blank lines above it.
#[derive(Default)]
struct Parser {
    preamble: String,
    releases: Vec<Release>,
    open: Option<OpenBlock>,
    pending: String,
    /// Inside content following an unrecognized top-level heading
    opaque: bool,
    in_fence: bool,
}

impl Parser {
    fn feed(&mut self, line: &str) {
        let content = line.strip_suffix('\n').unwrap_or(line);

        if self.in_fence || is_fence(content) {
            if is_fence(content) {
                self.in_fence = !self.in_fence;
            }
            self.push_content(line, content, true);
            return;
        }

        if content.trim().is_empty() {
            self.pending.push_str(line);
            return;
        }

        if let Some(caps) = release_heading_re().captures(content) {
            self.start_release(line, &caps["version"], &caps["date"]);
            return;
        }

        if self.releases.is_empty() {
            self.push_content(line, content, false);
            return;
        }

        if !self.opaque {
            if let Some(caps) = sub_heading_re().captures(content) {
                self.start_sub_section(line, &caps["title"]);
                return;
            }
        }

        if top_heading_re().is_match(content) {
            self.close_block();
            let raw = std::mem::take(&mut self.pending) + line;
            self.open = Some(OpenBlock::Passthrough(raw));
            self.opaque = true;
            return;
        }

        self.push_content(line, content, false);
    }

    fn start_release(&mut self, line: &str, version: &str, date: &str) {
        self.close_block();
        self.opaque = false;
        let raw = std::mem::take(&mut self.pending) + line;
        let mut release = Release::new(version, date);
        release.layout.heading = Some(RawHeading {
            raw,
            version: version.to_string(),
            date: date.to_string(),
        });
        self.releases.push(release);
    }

    fn start_sub_section(&mut self, line: &str, title: &str) {
        self.close_block();
        let raw = std::mem::take(&mut self.pending) + line;

        let kind = SectionKind::from_title(title).filter(|kind| {
            self.releases.last().is_some_and(|release| {
                !release
                    .layout
                    .blocks
                    .iter()
                    .any(|b| matches!(b, Block::Section(s) if s.kind == *kind))
            })
        });

        self.open = Some(match kind {
            Some(kind) => OpenBlock::Section(RawSection {
                kind,
                raw,
                preface: Vec::new(),
                parsed_entries: Vec::new(),
            }),
            // Unmodeled or repeated sub-section
            None => OpenBlock::Passthrough(raw),
        });
    }

    /// Non-blank, non-heading line. `literal` lines are never bullets.
    fn push_content(&mut self, line: &str, content: &str, literal: bool) {
        let pending = std::mem::take(&mut self.pending);

        if self.releases.is_empty() {
            self.preamble.push_str(&pending);
            self.preamble.push_str(line);
            return;
        }

        match &mut self.open {
            Some(OpenBlock::Section(section)) => {
                section.raw.push_str(&pending);
                section.raw.push_str(line);
                match content.strip_prefix("- ") {
                    Some(entry) if !literal => section.parsed_entries.push(entry.to_string()),
                    _ => match section.parsed_entries.last_mut() {
                        Some(last) => {
                            last.push('\n');
                            last.push_str(content);
                        }
                        None => section.preface.push(content.to_string()),
                    },
                }
            }
            Some(OpenBlock::Passthrough(raw)) => {
                raw.push_str(&pending);
                raw.push_str(line);
            }
            None => self.open = Some(OpenBlock::Passthrough(pending + line)),
        }
    }

    fn close_block(&mut self) {
        let Some(block) = self.open.take() else {
            return;
        };
        let Some(release) = self.releases.last_mut() else {
            return;
        };
        match block {
            OpenBlock::Section(section) => {
                *release.entries_mut(section.kind) = section.parsed_entries.clone();
                release.layout.blocks.push(Block::Section(section));
            }
            OpenBlock::Passthrough(raw) => release.layout.blocks.push(Block::Passthrough(raw)),
        }
    }

    fn finish(mut self) -> ChangelogDocument {
        if !self.pending.is_empty() {
            let pending = std::mem::take(&mut self.pending);
            if self.releases.is_empty() {
                self.preamble.push_str(&pending);
            } else {
                match &mut self.open {
                    Some(OpenBlock::Section(section)) => section.raw.push_str(&pending),
                    Some(OpenBlock::Passthrough(raw)) => raw.push_str(&pending),
                    None => self.open = Some(OpenBlock::Passthrough(pending)),
                }
            }
        }
        self.close_block();
        ChangelogDocument {
            preamble: self.preamble,
            releases: self.releases,
        }
    }
}

/// A parsed changelog: preamble plus releases, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangelogDocument {
    preamble: String,
    releases: Vec<Release>,
}

impl ChangelogDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document with a preamble and no releases.
    ///
    /// The preamble is written verbatim; end it with a newline.
    pub fn with_preamble(preamble: impl Into<String>) -> Self {
        Self {
            preamble: preamble.into(),
            releases: Vec::new(),
        }
    }

    /// Parse changelog text. Never fails: unrecognized content is kept
    /// verbatim. CRLF line endings are normalized to LF.
    pub fn parse(text: &str) -> Self {
        let started = Instant::now();
        log_op_start!("parse_changelog", input_len = text.len());

        let normalized = text.replace("\r\n", "\n");
        let mut parser = Parser::default();
        for line in normalized.split_inclusive('\n') {
            parser.feed(line);
        }
        let document = parser.finish();

        log_op_end!(
            "parse_changelog",
            duration_ms = started.elapsed().as_millis() as u64,
            release_count = document.releases.len()
        );
        document
    }

    /// Render the document back to Markdown.
    ///
    /// Untouched content is reproduced verbatim; modified or new releases
    /// and sections are rendered in the canonical layout.
    pub fn serialize(&self) -> String {
        let mut out = MarkdownWriter::new(&self.preamble);
        for release in &self.releases {
            release.write_to(&mut out);
        }
        out.finish()
    }

    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    pub fn into_releases(self) -> Vec<Release> {
        self.releases
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    pub fn release(&self, index: usize) -> Option<&Release> {
        self.releases.get(index)
    }

    pub fn release_mut(&mut self, index: usize) -> Option<&mut Release> {
        self.releases.get_mut(index)
    }

    /// Index of the release with `version` (ASCII case-insensitive).
    pub fn find_release(&self, version: &str) -> Option<usize> {
        let version = version.trim();
        self.releases
            .iter()
            .position(|r| r.version.eq_ignore_ascii_case(version))
    }

    /// Index of the newest release still marked unreleased
    pub fn first_unreleased(&self) -> Option<usize> {
        self.releases.iter().position(Release::is_unreleased)
    }

    /// Insert `release` at `index`; `0` makes it the newest release.
    ///
    /// # Errors
    ///
    /// `NotFound` if `index` is greater than the number of releases.
    pub fn insert_release(&mut self, index: usize, release: Release) -> Result<(), ExError> {
        if index > self.releases.len() {
            return Err(ExError::from(ApiDeltaError::ReleaseIndexOutOfRange {
                index,
                len: self.releases.len(),
            })
            .with_op("insert_release"));
        }
        self.releases.insert(index, release);
        Ok(())
    }

    /// Append `release` as the oldest release
    pub fn push_release(&mut self, release: Release) {
        self.releases.push(release);
    }

    /// Merge `source` into the release at `index`.
    ///
    /// # Errors
    ///
    /// `NotFound` if `index` does not refer to a release.
    pub fn merge_into(
        &mut self,
        index: usize,
        source: &Release,
        mode: MergeMode,
    ) -> Result<MergeReport, ExError> {
        let len = self.releases.len();
        let target = self.releases.get_mut(index).ok_or_else(|| {
            ExError::from(ApiDeltaError::ReleaseIndexOutOfRange { index, len })
                .with_op("merge_into")
                .with_member_key(source.version.clone())
        })?;
        Ok(merge_release(source, target, mode))
    }

    /// Set the date of the release with `version` (ASCII case-insensitive).
    ///
    /// Returns `false` when the release already carries `date`. Only the
    /// heading line changes; all other content is kept as is.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `date` is not `YYYY-MM-DD`; `NotFound` if no
    /// release has `version`.
    pub fn update_release_date(&mut self, version: &str, date: &str) -> Result<bool, ExError> {
        let started = Instant::now();
        log_op_start!("update_release_date", release_version = version);

        match self.apply_release_date(version, date.trim()) {
            Ok(changed) => {
                log_op_end!(
                    "update_release_date",
                    duration_ms = started.elapsed().as_millis() as u64,
                    release_version = version,
                    changed = changed
                );
                Ok(changed)
            }
            Err(err) => {
                let err = ExError::from(err).with_op("update_release_date");
                log_op_error!(
                    "update_release_date",
                    err.clone(),
                    duration_ms = started.elapsed().as_millis() as u64
                );
                Err(err)
            }
        }
    }

    fn apply_release_date(&mut self, version: &str, date: &str) -> Result<bool, ApiDeltaError> {
        if date.len() != 10 || NaiveDate::parse_from_str(date, DATE_FORMAT).is_err() {
            return Err(ApiDeltaError::InvalidInput {
                reason: format!("Invalid release date format '{date}', expected YYYY-MM-DD"),
            });
        }
        let index = self
            .find_release(version)
            .ok_or_else(|| ApiDeltaError::ReleaseNotFound {
                version: version.trim().to_string(),
            })?;
        let release = &mut self.releases[index];
        if release.date.trim() == date {
            return Ok(false);
        }
        release.set_date(date);
        Ok(true)
    }
}

/// Parse changelog text into its releases, dropping the preamble.
pub fn parse_releases(text: &str) -> Vec<Release> {
    ChangelogDocument::parse(text).into_releases()
}

/// Render releases as a changelog without preamble.
pub fn serialize_releases(releases: &[Release]) -> String {
    let mut out = MarkdownWriter::default();
    for release in releases {
        release.write_to(&mut out);
    }
    out.finish()
}
