//! Surface snapshot decoding and validation.
//!
//! The comparer assumes keys are unique within one surface. Snapshots that
//! violate that are rejected here, before any comparison runs.

use crate::errors::{ApiDeltaError, ExError, ExErrorKind};
use crate::surface::model::ApiSurface;
use std::collections::HashSet;

/// Decode a JSON surface snapshot and validate its keys.
///
/// # Errors
///
/// - `InvalidSurface` if the bytes are not valid UTF-8 or not a valid snapshot
/// - `DuplicateKey` if two members of one scope share a key
pub fn parse_surface_json(bytes: &[u8]) -> Result<ApiSurface, ExError> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        ExError::from(ApiDeltaError::InvalidSurface {
            reason: format!("snapshot is not valid UTF-8: {}", e),
        })
        .with_op("parse_surface_json")
    })?;

    let surface: ApiSurface = serde_json::from_str(text).map_err(|e| {
        ExError::new(ExErrorKind::InvalidSurface)
            .with_op("parse_surface_json")
            .with_message(format!("snapshot is not a valid surface: {}", e))
            .with_source(ExError::from(ApiDeltaError::from(e)))
    })?;

    validate_surface(&surface, "input").map_err(|e| e.with_op("parse_surface_json"))?;
    Ok(surface)
}

fn check_unique(
    surface_label: &str,
    scope: &str,
    keys: impl Iterator<Item = String>,
) -> Result<(), ExError> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key.clone()) {
            return Err(ApiDeltaError::DuplicateMemberKey {
                surface: surface_label.to_string(),
                scope: scope.to_string(),
                key,
            }
            .into());
        }
    }
    Ok(())
}

/// Check that every key is unique within its scope.
///
/// Scopes are: all types of the surface, and per type its constructors,
/// its non-accessor methods and its properties. `surface_label` names the
/// surface in error messages (e.g. `"current"`, `"baseline"`).
///
/// # Errors
///
/// - `DuplicateKey` for the first colliding key, in enumeration order
pub fn validate_surface(surface: &ApiSurface, surface_label: &str) -> Result<(), ExError> {
    check_unique(surface_label, "type", surface.types.iter().map(|t| t.key()))?;

    for ty in &surface.types {
        let in_type = |e: ExError| {
            let message = format!("{} (in type {})", e.message(), ty.full_name);
            e.with_message(message)
        };
        check_unique(
            surface_label,
            "constructor",
            ty.constructors.iter().map(|c| c.constructor_key()),
        )
        .map_err(in_type)?;
        check_unique(
            surface_label,
            "method",
            ty.comparable_methods().map(|m| m.method_key()),
        )
        .map_err(in_type)?;
        check_unique(
            surface_label,
            "property",
            ty.properties.iter().map(|p| p.key()),
        )
        .map_err(in_type)?;
    }

    Ok(())
}
