// Introspectable object model
//
// A loaded source file becomes a tree of owned `SourceObject`s. The documentation core never
// touches tree-sitter nodes; it only asks the capability questions in `Introspectable`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Concrete kind of a reflected object
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Module,
    Class,
    /// Parameterized pseudo-class such as `Alias = list[int]`
    GenericAlias,
    Function,
    /// Function defined in a class body
    Method,
    Variable,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Module => write!(f, "module"),
            ObjectKind::Class => write!(f, "type"),
            ObjectKind::GenericAlias => write!(f, "types.GenericAlias"),
            ObjectKind::Function | ObjectKind::Method => write!(f, "function"),
            ObjectKind::Variable => write!(f, "object"),
        }
    }
}

/// Optional module/class level metadata attributes (`__version__` and friends)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DunderAttribute {
    Version,
    Date,
    Author,
    Credits,
}

impl DunderAttribute {
    pub const ALL: [DunderAttribute; 4] = [
        DunderAttribute::Version,
        DunderAttribute::Date,
        DunderAttribute::Author,
        DunderAttribute::Credits,
    ];

    /// Attribute name as written in source
    pub fn attribute_name(&self) -> &'static str {
        match self {
            DunderAttribute::Version => "__version__",
            DunderAttribute::Date => "__date__",
            DunderAttribute::Author => "__author__",
            DunderAttribute::Credits => "__credits__",
        }
    }

    pub fn from_attribute_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|attribute| attribute.attribute_name() == name)
    }
}

/// Reflection capability required by the documentation core.
///
/// Every query answers "not present" with `None`; absence is never an error.
pub trait Introspectable {
    /// Concrete kind used by the classifier
    fn kind(&self) -> ObjectKind;

    /// Concrete runtime type name, used in classification errors
    fn type_name(&self) -> &str;

    fn name(&self) -> Option<&str>;

    /// Textual parameter list; `None` when the object is not callable
    fn signature(&self) -> Option<&str>;

    /// Doc text; `None` when the object carries no doc attribute at all
    fn doc(&self) -> Option<&str>;

    fn attribute(&self, attribute: DunderAttribute) -> Option<&str>;

    /// Declared sub-members in declaration order
    fn members(&self) -> &[Self]
    where
        Self: Sized;
}

/// An owned, reflected Python object produced by the code loader
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceObject {
    pub kind: ObjectKind,
    /// Name as it appears in code (file stem for modules)
    pub name: String,
    pub type_name: String,
    /// Cleaned docstring; empty for documentable objects without one
    pub doc: Option<String>,
    pub signature: Option<String>,
    pub attributes: BTreeMap<DunderAttribute, String>,
    pub decorators: Vec<String>,
    pub members: Vec<SourceObject>,
}

impl SourceObject {
    /// Find a direct member by name
    pub fn member(&self, name: &str) -> Option<&SourceObject> {
        self.members.iter().find(|member| member.name == name)
    }
}

impl Introspectable for SourceObject {
    fn kind(&self) -> ObjectKind {
        self.kind
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    fn attribute(&self, attribute: DunderAttribute) -> Option<&str> {
        self.attributes.get(&attribute).map(String::as_str)
    }

    fn members(&self) -> &[Self] {
        &self.members
    }
}
