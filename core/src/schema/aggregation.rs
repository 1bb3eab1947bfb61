use crate::context::BindContext;
use crate::metadata::{AGGREGATION_BINDING_INFO, FILTER_CLASS, SORTER_CLASS, Typedef, TypedefProperty};

use super::introspect::composite_elements;
use super::property::boolean_type;
use super::{BindingInfoElement, PropertyKind, PropertyType, documentation, fallback};

/// Property names of the aggregation binding info typedef the builder knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationBindingInfoName {
    Path,
    Model,
    Template,
    TemplateShareable,
    Factory,
    Suspended,
    StartIndex,
    Length,
    Sorter,
    Filters,
    GroupHeaderFactory,
    Key,
    Parameters,
    Events,
}

impl AggregationBindingInfoName {
    pub fn from_name(name: &str) -> Option<Self> {
        use AggregationBindingInfoName::*;
        Some(match name {
            "path" => Path,
            "model" => Model,
            "template" => Template,
            "templateShareable" => TemplateShareable,
            "factory" => Factory,
            "suspended" => Suspended,
            "startIndex" => StartIndex,
            "length" => Length,
            "sorter" => Sorter,
            "filters" => Filters,
            "groupHeaderFactory" => GroupHeaderFactory,
            "key" => Key,
            "parameters" => Parameters,
            "events" => Events,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        use AggregationBindingInfoName::*;
        match self {
            Path => "path",
            Model => "model",
            Template => "template",
            TemplateShareable => "templateShareable",
            Factory => "factory",
            Suspended => "suspended",
            StartIndex => "startIndex",
            Length => "length",
            Sorter => "sorter",
            Filters => "filters",
            GroupHeaderFactory => "groupHeaderFactory",
            Key => "key",
            Parameters => "parameters",
            Events => "events",
        }
    }
}

/// A composite accepts one object or an array of them, both with the same nested elements.
fn composite_types(elements: Vec<BindingInfoElement>) -> Vec<PropertyType> {
    vec![
        PropertyType::new(PropertyKind::Object).elements(elements.clone()),
        PropertyType::new(PropertyKind::Object).collection().elements(elements),
    ]
}

fn property_types(context: &BindContext, name: AggregationBindingInfoName) -> Vec<PropertyType> {
    use AggregationBindingInfoName::*;
    match name {
        Path | Model | Factory | GroupHeaderFactory | Key => vec![PropertyType::new(PropertyKind::String)],
        Template | Parameters | Events => vec![PropertyType::new(PropertyKind::Object)],
        TemplateShareable | Suspended => vec![boolean_type()],
        StartIndex | Length => vec![PropertyType::new(PropertyKind::Integer)],
        Sorter => composite_types(composite_elements(context, SORTER_CLASS)),
        Filters => composite_types(composite_elements(context, FILTER_CLASS)),
    }
}

fn element_for(context: &BindContext, name: AggregationBindingInfoName, property: &TypedefProperty) -> BindingInfoElement {
    let type_name = property.type_ref.as_ref().map(|t| t.display_name());
    let doc = documentation(
        context.messages,
        &property.description,
        type_name.as_deref(),
        property.visibility,
        property.optional,
    );
    BindingInfoElement::new(name.as_str(), property_types(context, name), doc)
}

fn build_from_typedef(context: &BindContext, typedef: &Typedef) -> Vec<BindingInfoElement> {
    typedef
        .properties
        .iter()
        .filter_map(|p| match AggregationBindingInfoName::from_name(&p.name) {
            Some(name) => Some(element_for(context, name, p)),
            None => {
                tracing::trace!("dropping unrecognized aggregation binding info property `{}`", p.name);
                None
            }
        })
        .collect()
}

pub(crate) fn build(context: &BindContext) -> Vec<BindingInfoElement> {
    match context.metadata.typedef(AGGREGATION_BINDING_INFO) {
        Some(typedef) => build_from_typedef(context, typedef),
        None => {
            tracing::debug!("`{}` missing from metadata, using fallback table", AGGREGATION_BINDING_INFO);
            build_from_typedef(context, fallback::aggregation_binding_info())
        }
    }
}
