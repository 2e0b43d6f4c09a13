//! API surface snapshots.
//!
//! An [`ApiSurface`] is the public shape of one library version: its types
//! and, per type, constructors, methods and properties. Surfaces are
//! produced by an external introspection step; this module only defines the
//! model, the identity keys used to match members across versions, and a
//! JSON loader that rejects surfaces with colliding keys.

pub mod key;
pub mod load;
pub mod model;

pub use load::{parse_surface_json, validate_surface};
pub use model::{ApiSurface, MethodSurface, PropertySurface, TypeSurface};
