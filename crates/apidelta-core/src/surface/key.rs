//! Member identity keys and display signatures.
//!
//! A key identifies "the same member" across two versions. Keys depend only
//! on a member's own declaration, never on its position, so reordering
//! members never produces changes. Any signature edit yields a new key.

/// Name used for constructors in keys and signatures
pub const CONSTRUCTOR_NAME: &str = ".ctor";

/// Return type shown for constructors
const CONSTRUCTOR_RETURN_TYPE: &str = "Void";

fn parameter_list<S: AsRef<str>>(parameters: &[S]) -> String {
    parameters
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Key of a type: its fully qualified name
pub fn type_key(full_name: &str) -> String {
    full_name.to_string()
}

/// Key of a method: name plus ordered parameter types, e.g. `Get(String, Int32)`
pub fn method_key<S: AsRef<str>>(name: &str, parameters: &[S]) -> String {
    format!("{}({})", name, parameter_list(parameters))
}

/// Key of a constructor, e.g. `.ctor(String)`
pub fn constructor_key<S: AsRef<str>>(parameters: &[S]) -> String {
    method_key(CONSTRUCTOR_NAME, parameters)
}

/// Key of a property: name plus type, e.g. `Count: Int32`
pub fn property_key(name: &str, property_type: &str) -> String {
    format!("{}: {}", name, property_type)
}

/// Display signature of a method, e.g. `String M()`
pub fn method_signature<S: AsRef<str>>(return_type: &str, name: &str, parameters: &[S]) -> String {
    format!("{} {}({})", return_type, name, parameter_list(parameters))
}

/// Display signature of a constructor, e.g. `Void .ctor(String)`
pub fn constructor_signature<S: AsRef<str>>(parameters: &[S]) -> String {
    method_signature(CONSTRUCTOR_RETURN_TYPE, CONSTRUCTOR_NAME, parameters)
}

/// Display signature of a property, e.g. `Int32 Count`
pub fn property_signature(name: &str, property_type: &str) -> String {
    format!("{} {}", property_type, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_key_includes_ordered_parameters() {
        assert_eq!(method_key("Get", &["String", "Int32"]), "Get(String, Int32)");
        assert_ne!(
            method_key("Get", &["String", "Int32"]),
            method_key("Get", &["Int32", "String"])
        );
    }

    #[test]
    fn test_method_key_ignores_return_type() {
        let a = method_signature("String", "M", &[] as &[&str]);
        let b = method_signature("Int32", "M", &[] as &[&str]);
        assert_ne!(a, b);
        assert_eq!(a, "String M()");
        assert_eq!(method_key::<&str>("M", &[]), "M()");
    }

    #[test]
    fn test_added_parameter_changes_key() {
        assert_ne!(method_key("M", &["String"]), method_key("M", &["String", "Int32"]));
    }

    #[test]
    fn test_constructor_key_and_signature() {
        assert_eq!(constructor_key(&["String"]), ".ctor(String)");
        assert_eq!(constructor_signature::<&str>(&[]), "Void .ctor()");
    }

    #[test]
    fn test_property_key_distinguishes_type() {
        assert_ne!(property_key("Count", "Int32"), property_key("Count", "Int64"));
        assert_eq!(property_signature("Count", "Int32"), "Int32 Count");
    }

    #[test]
    fn test_type_key_is_full_name() {
        assert_eq!(type_key("Azure.Foo.Bar"), "Azure.Foo.Bar");
    }
}
