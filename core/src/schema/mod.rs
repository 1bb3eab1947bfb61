//! Legal property names and value shapes of a binding info object.
//!
//! Two strategies feed the same data model: a closed table over the
//! recognized property names of the binding info typedefs, and constructor
//! introspection for the composite `sorter` / `filters` properties.

use anyhow::anyhow;
use serde::Serialize;

use crate::ast::Value;
use crate::context::{BindContext, QuoteStyle};
use crate::i18n::{MessageKey, Messages};
use crate::metadata::{Aggregation, Visibility};
use crate::range::{value_kind, ValueKind};

mod aggregation;
mod fallback;
mod introspect;
mod property;
#[cfg(test)]
mod tests;

pub use aggregation::AggregationBindingInfoName;
pub use property::PropertyBindingInfoName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyKind {
    String,
    Boolean,
    Object,
    Integer,
    Any,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Text(String),
}

impl Literal {
    /// Literal as the author writes it inside the binding.
    pub fn render(&self, quote: QuoteStyle) -> String {
        match self {
            Literal::Bool(b) => b.to_string(),
            Literal::Text(t) => quote.quote(t),
        }
    }

    /// Literal without quotes, as the parser reports primitive text.
    pub fn text(&self) -> String {
        match self {
            Literal::Bool(b) => b.to_string(),
            Literal::Text(t) => t.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PossibleValue {
    pub fixed: bool,
    pub values: Vec<Literal>,
}

impl PossibleValue {
    pub fn contains_text(&self, text: &str) -> bool {
        self.values.iter().any(|v| v.text() == text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dependent {
    pub name: String,
    #[serde(rename = "type")]
    pub types: Vec<PropertyType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyType {
    pub kind: PropertyKind,
    pub collection: bool,
    pub not_allowed_elements: Vec<String>,
    pub dependents: Vec<Dependent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possible_value: Option<PossibleValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub possible_elements: Vec<BindingInfoElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl PropertyType {
    pub fn new(kind: PropertyKind) -> Self {
        Self {
            kind,
            collection: false,
            not_allowed_elements: Vec::new(),
            dependents: Vec::new(),
            possible_value: None,
            possible_elements: Vec::new(),
            reference: None,
        }
    }

    pub fn collection(mut self) -> Self {
        self.collection = true;
        self
    }

    pub fn not_allowed(mut self, names: &[&str]) -> Self {
        self.not_allowed_elements = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn dependent(mut self, name: &str, types: Vec<PropertyType>) -> Self {
        self.dependents.push(Dependent {
            name: name.to_string(),
            types,
        });
        self
    }

    pub fn possible(mut self, fixed: bool, values: Vec<Literal>) -> Self {
        self.possible_value = Some(PossibleValue { fixed, values });
        self
    }

    pub fn elements(mut self, elements: Vec<BindingInfoElement>) -> Self {
        self.possible_elements = elements;
        self
    }

    pub fn reference(mut self, name: &str) -> Self {
        self.reference = Some(name.to_string());
        self
    }

    pub fn is_structural(&self) -> bool {
        self.kind == PropertyKind::Object || self.collection
    }

    fn kind_accepts(&self, kind: ValueKind) -> bool {
        matches!(
            (self.kind, kind),
            (PropertyKind::Any, _)
                | (PropertyKind::String, ValueKind::String)
                | (PropertyKind::Boolean, ValueKind::Boolean)
                | (PropertyKind::Integer, ValueKind::Integer)
                | (PropertyKind::Object, ValueKind::Object)
        )
    }

    /// Whether `value` has this shape. Collection items are checked separately
    /// through [`PropertyType::accepts_item`].
    pub fn accepts(&self, value: &Value) -> bool {
        let kind = value_kind(value);
        if self.collection {
            return kind == ValueKind::Array;
        }
        self.kind_accepts(kind)
    }

    pub fn accepts_item(&self, item: &Value) -> bool {
        self.collection && self.kind_accepts(value_kind(item))
    }

    /// Literal renderings listed in type mismatch messages, e.g. `{ }` or `' '`.
    pub fn renderings(&self, quote: QuoteStyle) -> Vec<String> {
        let single = match self.kind {
            PropertyKind::String => vec![quote.quote(" ")],
            PropertyKind::Boolean => vec!["true".to_string(), "false".to_string()],
            PropertyKind::Object => vec!["{ }".to_string()],
            PropertyKind::Integer => vec!["0".to_string()],
            PropertyKind::Any => Vec::new(),
        };
        if self.collection {
            single.into_iter().map(|s| format!("[{s}]")).collect()
        } else {
            single
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BindingInfoElement {
    pub name: String,
    #[serde(rename = "type")]
    pub types: Vec<PropertyType>,
    pub documentation: String,
    pub required: bool,
}

impl BindingInfoElement {
    pub fn new(name: &str, types: Vec<PropertyType>, documentation: String) -> Self {
        Self {
            name: name.to_string(),
            types: dedupe_types(types),
            documentation,
            required: false,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn not_allowed_elements(&self) -> impl Iterator<Item = &str> {
        self.types
            .iter()
            .flat_map(|t| t.not_allowed_elements.iter().map(String::as_str))
    }

    pub fn is_any_only(&self) -> bool {
        self.types.iter().all(|t| t.kind == PropertyKind::Any && !t.collection)
    }

    /// Usable either as a structured or as a primitive binding.
    pub fn is_dual_purpose(&self) -> bool {
        let structural = self.types.iter().any(PropertyType::is_structural);
        let primitive = self.types.iter().any(|t| !t.is_structural());
        structural && primitive
    }
}

/// Keep the first shape per `(kind, collection)` pair.
fn dedupe_types(types: Vec<PropertyType>) -> Vec<PropertyType> {
    let mut out: Vec<PropertyType> = Vec::with_capacity(types.len());
    for t in types {
        if !out.iter().any(|o| o.kind == t.kind && o.collection == t.collection) {
            out.push(t);
        }
    }
    out
}

pub fn find_element<'a>(schema: &'a [BindingInfoElement], name: &str) -> Option<&'a BindingInfoElement> {
    schema.iter().find(|e| e.name == name)
}

/// Nested element list of a structural shape, following `reference` markers
/// by name through `root`. Chains longer than `max_depth` are an error.
pub fn resolve_nested<'a>(
    root: &'a [BindingInfoElement],
    shape: &'a PropertyType,
    max_depth: usize,
) -> anyhow::Result<Option<&'a [BindingInfoElement]>> {
    let mut current = shape;
    for _ in 0..=max_depth {
        if !current.possible_elements.is_empty() {
            return Ok(Some(&current.possible_elements));
        }
        let Some(name) = current.reference.as_deref() else {
            return Ok(None);
        };
        let target = find_element(root, name).ok_or_else(|| anyhow!("unknown schema reference `{}`", name))?;
        let next = target
            .types
            .iter()
            .find(|t| t.kind == PropertyKind::Object && (!t.possible_elements.is_empty() || t.reference.is_some()));
        match next {
            Some(t) => current = t,
            None => return Ok(None),
        }
    }
    Err(anyhow!("schema reference chain exceeds depth {}", max_depth))
}

/// Markdown documentation shown in completion items and hover.
pub(crate) fn documentation(
    messages: &Messages,
    description: &str,
    type_name: Option<&str>,
    visibility: Visibility,
    optional: bool,
) -> String {
    let mut parts = Vec::with_capacity(4);
    if let Some(t) = type_name {
        parts.push(format!("**{}:** `{}`", messages.text(MessageKey::DocType, &[]), t));
    }
    if !description.trim().is_empty() {
        parts.push(format!(
            "**{}:** {}",
            messages.text(MessageKey::DocDescription, &[]),
            description.trim()
        ));
    }
    parts.push(format!(
        "**{}:** {}",
        messages.text(MessageKey::DocVisibility, &[]),
        visibility.as_str()
    ));
    parts.push(format!("**{}:** {}", messages.text(MessageKey::DocOptional, &[]), optional));
    parts.join("\n\n")
}

/// Legal binding info elements for `context`, scoped to `aggregation` when
/// its element type resolves to a class.
pub fn build_schema(context: &BindContext, aggregation: Option<&Aggregation>) -> Vec<BindingInfoElement> {
    let resolvable = aggregation
        .and_then(|a| a.type_name.as_deref())
        .is_some_and(|t| context.metadata.class(t).is_some());
    if resolvable {
        tracing::trace!("building aggregation binding info schema");
        aggregation::build(context)
    } else {
        tracing::trace!("building property binding info schema");
        property::build(context)
    }
}
