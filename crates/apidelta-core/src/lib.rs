//! apidelta core - API surface diffing and changelog maintenance
//!
//! This crate provides:
//! - API surface snapshots with key-based member identity
//! - A deterministic surface comparer producing categorized changes
//! - Release-note building with a non-breaking category filter
//! - Lossless changelog parsing and serialization
//! - Merging new release notes into an existing release
//!
//! Everything is synchronous and in-memory; callers own file and network I/O.

pub use apidelta_core_types as core_types;

pub mod config;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod pipeline;
pub mod release;
pub mod surface;

// Re-export commonly used types
pub use config::ChangelogConfig;
pub use diff::{compare_surfaces, Change, ChangeCategory, ChangeLogResult, ChangeSet, ValueChange};
pub use errors::{ApiDeltaError, ExError, ExErrorKind};
pub use pipeline::{update_changelog, ChangelogUpdate};
pub use release::{
    build_release, merge_release, ChangelogDocument, MergeMode, MergeReport, Release,
    ReleaseNoteBuilder,
};
pub use surface::{parse_surface_json, ApiSurface, MethodSurface, PropertySurface, TypeSurface};
