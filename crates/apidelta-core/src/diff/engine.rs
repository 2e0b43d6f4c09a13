//! Surface comparison engine.
//!
//! The core entry point is [`compare_surfaces`], which walks a current and a
//! baseline [`ApiSurface`] and produces a [`ChangeSet`]. All four levels
//! (types, constructors, methods, properties) go through the same
//! [`compare_by_key`] kernel.

use crate::diff::model::{Accessor, Change, ChangeCategory, ChangeSet};
use crate::surface::model::{ApiSurface, MethodSurface, PropertySurface, TypeSurface};
use crate::{log_op_end, log_op_start};
use std::collections::HashMap;
use std::time::Instant;

/// Match two item lists by key and report the outcome through callbacks.
///
/// - every current item whose key exists in the baseline is a match:
///   `on_matched(acc, current, baseline)`
/// - every other current item: `on_added(acc, current)`, in current order
/// - every baseline item never matched: `on_removed(acc, baseline)`, in
///   baseline order, after all current items were visited
///
/// Keys must be unique within each list.
pub fn compare_by_key<'a, T, A, K, FA, FR, FM>(
    acc: &mut A,
    current: impl IntoIterator<Item = &'a T>,
    baseline: impl IntoIterator<Item = &'a T>,
    key_of: K,
    mut on_added: FA,
    mut on_removed: FR,
    mut on_matched: FM,
) where
    T: 'a,
    K: Fn(&T) -> String,
    FA: FnMut(&mut A, &'a T),
    FR: FnMut(&mut A, &'a T),
    FM: FnMut(&mut A, &'a T, &'a T),
{
    let mut remaining: Vec<Option<&'a T>> = Vec::new();
    let mut lookup: HashMap<String, usize> = HashMap::new();
    for item in baseline {
        lookup.insert(key_of(item), remaining.len());
        remaining.push(Some(item));
    }

    for item in current {
        match lookup.remove(&key_of(item)) {
            Some(slot) => {
                if let Some(base) = remaining[slot].take() {
                    on_matched(acc, item, base);
                }
            }
            None => on_added(acc, item),
        }
    }

    for base in remaining.into_iter().flatten() {
        on_removed(acc, base);
    }
}

fn type_change(ty: &TypeSurface, category: ChangeCategory) -> Change {
    Change::Type {
        type_name: ty.full_name.clone(),
        category,
    }
}

fn constructor_change(owner: &str, ctor: &MethodSurface, category: ChangeCategory) -> Change {
    Change::Constructor {
        type_name: owner.to_string(),
        signature: ctor.constructor_signature(),
        category,
    }
}

fn method_change(owner: &str, method: &MethodSurface, category: ChangeCategory) -> Change {
    Change::Method {
        type_name: owner.to_string(),
        signature: method.method_signature(),
        category,
    }
}

fn property_change(owner: &str, property: &PropertySurface, category: ChangeCategory) -> Change {
    Change::Property {
        type_name: owner.to_string(),
        signature: property.signature(),
        category,
    }
}

fn accessor_change(
    owner: &str,
    property: &PropertySurface,
    accessor: Accessor,
    category: ChangeCategory,
) -> Change {
    Change::PropertyAccessor {
        type_name: owner.to_string(),
        signature: property.signature(),
        accessor,
        category,
    }
}

fn record(changes: &mut ChangeSet, change: Change) {
    tracing::debug!(
        type_name = change.type_name(),
        category = %change.category(),
        kind = change.kind().label(),
        "api change"
    );
    changes.push(change);
}

/// Report one accessor's transition between two versions of a property.
///
/// Availability changes win over obsoletion; obsoletion is only reported
/// while the accessor exists on both sides.
fn compare_accessor(
    changes: &mut ChangeSet,
    owner: &str,
    current: &PropertySurface,
    accessor: Accessor,
    (was_available, is_available): (bool, bool),
    (was_obsolete, is_obsolete): (bool, bool),
) {
    if was_available != is_available {
        let category = if is_available {
            ChangeCategory::Added
        } else {
            ChangeCategory::Removed
        };
        record(changes, accessor_change(owner, current, accessor, category));
    } else if is_available && is_obsolete && !was_obsolete {
        record(
            changes,
            accessor_change(owner, current, accessor, ChangeCategory::Obsoleted),
        );
    }
}

fn compare_property_pair(
    changes: &mut ChangeSet,
    owner: &str,
    current: &PropertySurface,
    baseline: &PropertySurface,
) {
    if current.is_obsolete && !baseline.is_obsolete {
        record(
            changes,
            property_change(owner, current, ChangeCategory::Obsoleted),
        );
    }
    compare_accessor(
        changes,
        owner,
        current,
        Accessor::Get,
        (baseline.can_read, current.can_read),
        (baseline.getter_obsolete, current.getter_obsolete),
    );
    compare_accessor(
        changes,
        owner,
        current,
        Accessor::Set,
        (baseline.can_write, current.can_write),
        (baseline.setter_obsolete, current.setter_obsolete),
    );
}

/// Compare the members of a type present in both surfaces.
fn compare_type_pair(changes: &mut ChangeSet, current: &TypeSurface, baseline: &TypeSurface) {
    let owner = current.full_name.as_str();

    if current.is_obsolete && !baseline.is_obsolete {
        record(changes, type_change(current, ChangeCategory::Obsoleted));
    }

    compare_by_key(
        changes,
        &current.constructors,
        &baseline.constructors,
        |c| c.constructor_key(),
        |acc, c| record(acc, constructor_change(owner, c, ChangeCategory::Added)),
        |acc, c| record(acc, constructor_change(owner, c, ChangeCategory::Removed)),
        |acc, cur, base| {
            if cur.is_obsolete && !base.is_obsolete {
                record(acc, constructor_change(owner, cur, ChangeCategory::Obsoleted));
            }
        },
    );

    compare_by_key(
        changes,
        current.comparable_methods(),
        baseline.comparable_methods(),
        |m| m.method_key(),
        |acc, m| record(acc, method_change(owner, m, ChangeCategory::Added)),
        |acc, m| record(acc, method_change(owner, m, ChangeCategory::Removed)),
        |acc, cur, base| {
            if cur.is_obsolete && !base.is_obsolete {
                record(acc, method_change(owner, cur, ChangeCategory::Obsoleted));
            }
        },
    );

    compare_by_key(
        changes,
        &current.properties,
        &baseline.properties,
        |p| p.key(),
        |acc, p| record(acc, property_change(owner, p, ChangeCategory::Added)),
        |acc, p| record(acc, property_change(owner, p, ChangeCategory::Removed)),
        |acc, cur, base| compare_property_pair(acc, owner, cur, base),
    );
}

/// Compute the ordered change set between two API surfaces.
///
/// `current` is the new version, `baseline` the last released one. Both
/// surfaces must have unique keys per scope (see
/// [`crate::surface::validate_surface`]); the comparison itself cannot fail.
///
/// Order: types in current order (removed types last); within a matched
/// type, its obsoletion, then constructors, methods and properties, each
/// with removed members at the end of the group.
pub fn compare_surfaces(current: &ApiSurface, baseline: &ApiSurface) -> ChangeSet {
    let started = Instant::now();
    log_op_start!(
        "compare_surfaces",
        type_count = current.types.len(),
        baseline_type_count = baseline.types.len()
    );

    let mut changes = ChangeSet::new();
    compare_by_key(
        &mut changes,
        &current.types,
        &baseline.types,
        |t| t.key(),
        |acc, t| record(acc, type_change(t, ChangeCategory::Added)),
        |acc, t| record(acc, type_change(t, ChangeCategory::Removed)),
        compare_type_pair,
    );

    log_op_end!(
        "compare_surfaces",
        duration_ms = started.elapsed().as_millis() as u64,
        change_count = changes.len(),
        breaking_count = changes.breaking_changes().len()
    );
    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(methods: Vec<MethodSurface>) -> TypeSurface {
        let mut ty = TypeSurface::new("Azure.Foo.Bar");
        ty.methods = methods;
        ty
    }

    #[test]
    fn test_compare_by_key_orders_callbacks() {
        let current = vec!["b", "c", "d"];
        let baseline = vec!["a", "b", "e"];
        let mut log: Vec<String> = Vec::new();
        compare_by_key(
            &mut log,
            &current,
            &baseline,
            |s| s.to_string(),
            |acc, s| acc.push(format!("+{s}")),
            |acc, s| acc.push(format!("-{s}")),
            |acc, c, b| acc.push(format!("={c}{b}")),
        );
        assert_eq!(log, vec!["=bb", "+c", "+d", "-a", "-e"]);
    }

    #[test]
    fn test_identical_surfaces_yield_no_changes() {
        let surface = ApiSurface::new(vec![bar(vec![MethodSurface::new("String", "M", &[])])]);
        assert!(!compare_surfaces(&surface, &surface).has_change());
    }

    #[test]
    fn test_removed_and_obsoleted_method() {
        let baseline = ApiSurface::new(vec![bar(vec![
            MethodSurface::new("String", "M", &[]),
            MethodSurface::new("String", "N", &[]),
        ])]);
        let current = ApiSurface::new(vec![bar(vec![
            MethodSurface::new("String", "N", &[]).obsolete(),
        ])]);

        let changes = compare_surfaces(&current, &baseline);
        assert_eq!(
            changes.as_slice(),
            &[
                Change::Method {
                    type_name: "Azure.Foo.Bar".to_string(),
                    signature: "String N()".to_string(),
                    category: ChangeCategory::Obsoleted,
                },
                Change::Method {
                    type_name: "Azure.Foo.Bar".to_string(),
                    signature: "String M()".to_string(),
                    category: ChangeCategory::Removed,
                },
            ]
        );
    }

    #[test]
    fn test_leaving_obsoletion_is_silent() {
        let baseline = ApiSurface::new(vec![bar(vec![
            MethodSurface::new("String", "M", &[]).obsolete()
        ])]);
        let current = ApiSurface::new(vec![bar(vec![MethodSurface::new("String", "M", &[])])]);
        assert!(!compare_surfaces(&current, &baseline).has_change());
    }

    #[test]
    fn test_accessor_methods_are_ignored() {
        let baseline = ApiSurface::new(vec![bar(vec![
            MethodSurface::new("Int32", "get_Count", &[]).accessor()
        ])]);
        let current = ApiSurface::new(vec![bar(vec![])]);
        assert!(!compare_surfaces(&current, &baseline).has_change());
    }

    #[test]
    fn test_setter_removed_reported_as_accessor_change() {
        let baseline = ApiSurface::new(vec![
            TypeSurface::new("A.B").with_property(PropertySurface::new("Int32", "Count"))
        ]);
        let current = ApiSurface::new(vec![TypeSurface::new("A.B")
            .with_property(PropertySurface::new("Int32", "Count").read_only())]);
        let changes = compare_surfaces(&current, &baseline);
        assert_eq!(changes.len(), 1);
        assert_eq!(
            changes.as_slice()[0].description(),
            "Removed property method 'Set' for 'Int32 Count' in type A.B"
        );
    }

    #[test]
    fn test_getter_obsoleted_only_when_readable_on_both_sides() {
        let baseline = ApiSurface::new(vec![
            TypeSurface::new("A.B").with_property(PropertySurface::new("Int32", "Count"))
        ]);
        let current = ApiSurface::new(vec![TypeSurface::new("A.B")
            .with_property(PropertySurface::new("Int32", "Count").obsolete_getter())]);
        let changes = compare_surfaces(&current, &baseline);
        assert_eq!(
            changes.as_slice(),
            &[Change::PropertyAccessor {
                type_name: "A.B".to_string(),
                signature: "Int32 Count".to_string(),
                accessor: Accessor::Get,
                category: ChangeCategory::Obsoleted,
            }]
        );
    }

    #[test]
    fn test_added_type_does_not_expand_members() {
        let baseline = ApiSurface::default();
        let current = ApiSurface::new(vec![bar(vec![MethodSurface::new("String", "M", &[])])]);
        let changes = compare_surfaces(&current, &baseline);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes.as_slice()[0].description(), "Added type 'Azure.Foo.Bar'");
    }
}
