//! API surface diff engine.
//!
//! Compares two API surface snapshots and produces an ordered, categorized
//! change set suitable for release notes and review summaries.
//!
//! ## Entry point
//!
//! ```
//! use apidelta_core::diff::compare_surfaces;
//! use apidelta_core::surface::{ApiSurface, MethodSurface, TypeSurface};
//!
//! let baseline = ApiSurface::new(vec![TypeSurface::new("Azure.Foo.Bar")
//!     .with_method(MethodSurface::new("String", "M", &[]))]);
//! let current = ApiSurface::new(vec![TypeSurface::new("Azure.Foo.Bar")]);
//!
//! let changes = compare_surfaces(&current, &baseline);
//! assert_eq!(changes.breaking_changes().len(), 1);
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical change sets, in
//!   identical order.
//! - **Key identity**: members match across versions only by key; a
//!   signature edit is a removal plus an addition.
//! - **Classification**: a change is breaking iff its category is `Removed`.

pub mod engine;
pub mod model;
pub mod summary;
pub mod value;

pub use engine::{compare_by_key, compare_surfaces};
pub use model::{
    Accessor, Change, ChangeCategory, ChangeLogResult, ChangeSet, MemberKind, ValueChange,
};
pub use summary::render_change_summary;
pub use value::diff_value;
