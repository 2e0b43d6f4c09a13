use apidelta_core::surface::{ApiSurface, MethodSurface, PropertySurface, TypeSurface};
use apidelta_core::ChangelogConfig;

pub const BAR: &str = "Azure.Foo.Bar";

/// Baseline of the canonical scenario: `Azure.Foo.Bar` with `String M()`
/// and a non-obsolete `String N()`.
#[allow(dead_code)]
pub fn scenario_baseline() -> ApiSurface {
    ApiSurface::new(vec![TypeSurface::new(BAR)
        .with_method(MethodSurface::new("String", "M", &[]))
        .with_method(MethodSurface::new("String", "N", &[]))])
}

/// Current side of the canonical scenario: `M` removed, `N` newly obsolete.
#[allow(dead_code)]
pub fn scenario_current() -> ApiSurface {
    ApiSurface::new(vec![
        TypeSurface::new(BAR).with_method(MethodSurface::new("String", "N", &[]).obsolete())
    ])
}

/// A surface touching every member kind
#[allow(dead_code)]
pub fn rich_surface() -> ApiSurface {
    ApiSurface::new(vec![
        TypeSurface::new("Azure.Storage.BlobClient")
            .with_constructor(MethodSurface::constructor(&[]))
            .with_constructor(MethodSurface::constructor(&["Uri"]))
            .with_method(MethodSurface::new("Response", "Download", &[]))
            .with_method(MethodSurface::new("Response", "Download", &["String"]))
            .with_method(MethodSurface::new("String", "get_Name", &[]).accessor())
            .with_property(PropertySurface::new("String", "Name").read_only())
            .with_property(PropertySurface::new("Int32", "Timeout")),
        TypeSurface::new("Azure.Storage.BlobOptions")
            .with_property(PropertySurface::new("Boolean", "Retry")),
    ])
}

/// Config with a fixed release date so output is deterministic
#[allow(dead_code)]
pub fn fixed_config(date: &str) -> ChangelogConfig {
    ChangelogConfig {
        release_date: Some(date.to_string()),
        ..ChangelogConfig::default()
    }
}

/// Changelog in the layout most repositories use
#[allow(dead_code)]
pub const AZURE_CHANGELOG: &str = "# Release History

## 1.1.0-beta.1 (Unreleased)

### Features Added

- Added a new client option.

### Breaking Changes

### Bugs Fixed

### Other Changes

## 1.0.0 (2023-01-10)

### Features Added

- Initial release.
";
