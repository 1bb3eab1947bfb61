//! Read-only view of the framework metadata the schema is derived from.
//!
//! Type references are expected to be resolved already; the library only
//! walks them.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

pub const PROPERTY_BINDING_INFO: &str = "sap.ui.base.ManagedObject.PropertyBindingInfo";
pub const AGGREGATION_BINDING_INFO: &str = "sap.ui.base.ManagedObject.AggregationBindingInfo";
pub const SORTER_CLASS: &str = "sap.ui.model.Sorter";
pub const FILTER_CLASS: &str = "sap.ui.model.Filter";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeRef {
    Primitive { name: String },
    Class { name: String },
    Enum { name: String },
    Typedef { name: String },
    Array { of: Box<TypeRef> },
    Union { types: Vec<TypeRef> },
    Unresolved { name: String },
}

impl TypeRef {
    pub fn primitive(name: &str) -> Self {
        TypeRef::Primitive { name: name.to_string() }
    }

    pub fn class(name: &str) -> Self {
        TypeRef::Class { name: name.to_string() }
    }

    pub fn array(of: TypeRef) -> Self {
        TypeRef::Array { of: Box::new(of) }
    }

    /// Human readable rendering used in documentation, e.g. `string | sap.ui.model.Filter[]`.
    pub fn display_name(&self) -> String {
        match self {
            TypeRef::Primitive { name }
            | TypeRef::Class { name }
            | TypeRef::Enum { name }
            | TypeRef::Typedef { name }
            | TypeRef::Unresolved { name } => name.clone(),
            TypeRef::Array { of } => format!("{}[]", of.display_name()),
            TypeRef::Union { types } => types.iter().map(TypeRef::display_name).collect::<Vec<_>>().join(" | "),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Restricted,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Restricted => "restricted",
            Visibility::Private => "private",
        }
    }
}

/// A property declared on a typedef.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedefProperty {
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_ref: Option<TypeRef>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default = "default_optional")]
    pub optional: bool,
}

fn default_optional() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typedef {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<TypedefProperty>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_ref: Option<TypeRef>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub description: String,
    /// Properties of an object-typed parameter (e.g. the filter info object).
    #[serde(default)]
    pub parameter_properties: Vec<Parameter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constructor {
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub name: String,
    #[serde(default)]
    pub constructor: Option<Constructor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumType {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Snapshot of the framework metadata for one framework version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameworkMetadata {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    typedefs: Vec<Typedef>,
    #[serde(default)]
    classes: Vec<Class>,
    #[serde(default)]
    enums: Vec<EnumType>,
    #[serde(skip)]
    index: MetadataIndex,
}

#[derive(Debug, Clone, Default)]
struct MetadataIndex {
    typedefs: FxHashMap<String, usize>,
    classes: FxHashMap<String, usize>,
    enums: FxHashMap<String, usize>,
}

impl FrameworkMetadata {
    pub fn new(typedefs: Vec<Typedef>, classes: Vec<Class>, enums: Vec<EnumType>) -> Self {
        let mut model = Self {
            version: None,
            typedefs,
            classes,
            enums,
            index: MetadataIndex::default(),
        };
        model.reindex();
        model
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let mut model: FrameworkMetadata = serde_json::from_str(json)?;
        model.reindex();
        Ok(model)
    }

    /// Rebuild the name lookup tables; required after deserializing through serde directly.
    pub fn reindex(&mut self) {
        let mut index = MetadataIndex::default();
        for (i, t) in self.typedefs.iter().enumerate() {
            index.typedefs.insert(t.name.clone(), i);
        }
        for (i, c) in self.classes.iter().enumerate() {
            index.classes.insert(c.name.clone(), i);
        }
        for (i, e) in self.enums.iter().enumerate() {
            index.enums.insert(e.name.clone(), i);
        }
        self.index = index;
    }

    pub fn typedef(&self, name: &str) -> Option<&Typedef> {
        self.index.typedefs.get(name).and_then(|i| self.typedefs.get(*i))
    }

    pub fn class(&self, name: &str) -> Option<&Class> {
        self.index.classes.get(name).and_then(|i| self.classes.get(*i))
    }

    pub fn enum_type(&self, name: &str) -> Option<&EnumType> {
        self.index.enums.get(name).and_then(|i| self.enums.get(*i))
    }

    pub fn constructor_parameters(&self, class: &str) -> Option<&[Parameter]> {
        self.class(class)
            .and_then(|c| c.constructor.as_ref())
            .map(|ctor| ctor.parameters.as_slice())
            .filter(|params| !params.is_empty())
    }
}

/// An aggregation of the control whose attribute is being edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    pub name: String,
    /// Element type of the aggregation, e.g. `sap.ui.core.Item`.
    #[serde(default)]
    pub type_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_renders_arrays_and_unions() {
        let t = TypeRef::Union {
            types: vec![TypeRef::primitive("string"), TypeRef::array(TypeRef::class(FILTER_CLASS))],
        };
        assert_eq!(t.display_name(), "string | sap.ui.model.Filter[]");
    }

    #[test]
    fn lookup_after_json_load() {
        let json = r#"{
            "typedefs": [{ "name": "a.B", "properties": [{ "name": "path", "type": { "kind": "primitive", "name": "string" } }] }],
            "classes": [{ "name": "a.C", "constructor": { "parameters": [] } }],
            "enums": [{ "name": "a.E", "values": ["X"] }]
        }"#;
        let model = FrameworkMetadata::from_json(json).expect("valid metadata");
        let typedef = model.typedef("a.B").expect("typedef");
        assert!(typedef.properties[0].optional);
        assert!(model.class("a.C").is_some());
        // empty constructor parameter lists count as absent
        assert!(model.constructor_parameters("a.C").is_none());
        assert_eq!(model.enum_type("a.E").map(|e| e.values.len()), Some(1));
        assert!(model.typedef("missing").is_none());
    }
}
