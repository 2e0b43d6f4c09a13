//! Surface model types.
//!
//! Member order is significant: it drives the discovery order of the
//! resulting change set. Identity is carried by keys, never by position.

use crate::surface::key;
use serde::{Deserialize, Serialize};

/// The public API surface of one library version.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiSurface {
    #[serde(default)]
    pub types: Vec<TypeSurface>,
}

/// One public type and its members.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeSurface {
    /// Fully qualified type name, e.g. `Azure.Foo.Bar`
    pub full_name: String,
    #[serde(default)]
    pub is_obsolete: bool,
    #[serde(default)]
    pub constructors: Vec<MethodSurface>,
    #[serde(default)]
    pub methods: Vec<MethodSurface>,
    #[serde(default)]
    pub properties: Vec<PropertySurface>,
}

/// A method or constructor.
///
/// For constructors `name` and `return_type` are ignored by the key and
/// signature functions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MethodSurface {
    pub name: String,
    #[serde(default = "default_return_type")]
    pub return_type: String,
    /// Parameter type names, in declaration order
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub is_obsolete: bool,
    /// Compiler-generated getter/setter; compared through its property instead
    #[serde(default)]
    pub is_property_accessor: bool,
}

fn default_return_type() -> String {
    "Void".to_string()
}

fn default_accessor() -> bool {
    true
}

/// A property with independently tracked accessors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropertySurface {
    pub name: String,
    pub property_type: String,
    #[serde(default = "default_accessor")]
    pub can_read: bool,
    #[serde(default = "default_accessor")]
    pub can_write: bool,
    #[serde(default)]
    pub is_obsolete: bool,
    #[serde(default)]
    pub getter_obsolete: bool,
    #[serde(default)]
    pub setter_obsolete: bool,
}

impl ApiSurface {
    pub fn new(types: Vec<TypeSurface>) -> Self {
        Self { types }
    }

    /// Look up a type by full name
    pub fn find_type(&self, full_name: &str) -> Option<&TypeSurface> {
        self.types.iter().find(|t| t.full_name == full_name)
    }
}

impl TypeSurface {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            is_obsolete: false,
            constructors: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn obsolete(mut self) -> Self {
        self.is_obsolete = true;
        self
    }

    pub fn with_constructor(mut self, ctor: MethodSurface) -> Self {
        self.constructors.push(ctor);
        self
    }

    pub fn with_method(mut self, method: MethodSurface) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_property(mut self, property: PropertySurface) -> Self {
        self.properties.push(property);
        self
    }

    /// Identity key of this type
    pub fn key(&self) -> String {
        key::type_key(&self.full_name)
    }

    /// Methods that take part in method comparison (accessors excluded)
    pub fn comparable_methods(&self) -> impl Iterator<Item = &MethodSurface> {
        self.methods.iter().filter(|m| !m.is_property_accessor)
    }
}

impl MethodSurface {
    pub fn new(
        return_type: impl Into<String>,
        name: impl Into<String>,
        parameters: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
            is_obsolete: false,
            is_property_accessor: false,
        }
    }

    /// A constructor taking the given parameter types
    pub fn constructor(parameters: &[&str]) -> Self {
        Self::new(default_return_type(), key::CONSTRUCTOR_NAME, parameters)
    }

    pub fn obsolete(mut self) -> Self {
        self.is_obsolete = true;
        self
    }

    pub fn accessor(mut self) -> Self {
        self.is_property_accessor = true;
        self
    }

    /// Identity key when compared as a method
    pub fn method_key(&self) -> String {
        key::method_key(&self.name, &self.parameters)
    }

    /// Identity key when compared as a constructor
    pub fn constructor_key(&self) -> String {
        key::constructor_key(&self.parameters)
    }

    /// Display signature when reported as a method
    pub fn method_signature(&self) -> String {
        key::method_signature(&self.return_type, &self.name, &self.parameters)
    }

    /// Display signature when reported as a constructor
    pub fn constructor_signature(&self) -> String {
        key::constructor_signature(&self.parameters)
    }
}

impl PropertySurface {
    /// A read/write property
    pub fn new(property_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            property_type: property_type.into(),
            can_read: true,
            can_write: true,
            is_obsolete: false,
            getter_obsolete: false,
            setter_obsolete: false,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.can_write = false;
        self
    }

    pub fn write_only(mut self) -> Self {
        self.can_read = false;
        self
    }

    pub fn obsolete(mut self) -> Self {
        self.is_obsolete = true;
        self
    }

    pub fn obsolete_getter(mut self) -> Self {
        self.getter_obsolete = true;
        self
    }

    pub fn obsolete_setter(mut self) -> Self {
        self.setter_obsolete = true;
        self
    }

    pub fn key(&self) -> String {
        key::property_key(&self.name, &self.property_type)
    }

    pub fn signature(&self) -> String {
        key::property_signature(&self.name, &self.property_type)
    }
}
