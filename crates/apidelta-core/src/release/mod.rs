//! Release notes: building, changelog documents, merging.
//!
//! - [`builder`] turns a comparison result into a [`Release`]
//! - [`document`] parses and serializes whole changelogs
//! - [`merge`] folds a new release into an existing one

pub mod builder;
pub mod document;
pub mod merge;
pub mod model;

pub use builder::{build_release, ReleaseNoteBuilder};
pub use document::{parse_releases, serialize_releases, ChangelogDocument};
pub use merge::{merge_release, MergeMode, MergeReport};
pub use model::{Release, SectionKind, DATE_FORMAT, UNRELEASED};
