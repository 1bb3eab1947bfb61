use crate::context::BindContext;
use crate::metadata::{FILTER_CLASS, Parameter, SORTER_CLASS, TypeRef, Visibility};

use super::property::{boolean_type, literals};
use super::{BindingInfoElement, PropertyKind, PropertyType, documentation, fallback};

/// Canonical property name for a legacy constructor parameter name.
pub(crate) fn canonical_name(legacy: &str) -> &str {
    match legacy {
        "sPath" => "path",
        "bDescending" => "descending",
        "vGroup" => "group",
        "fnComparator" => "comparator",
        "fnTest" => "test",
        "vOperator" | "sOperator" => "operator",
        "oValue1" | "vValue1" => "value1",
        "oValue2" | "vValue2" => "value2",
        "sVariable" => "variable",
        "oCondition" => "condition",
        "aFilters" => "filters",
        "bAnd" => "and",
        "bCaseSensitive" => "caseSensitive",
        other => other,
    }
}

/// Value shapes accepted for a declared metadata type.
pub(crate) fn types_from_type_ref(context: &BindContext, type_ref: &TypeRef) -> Vec<PropertyType> {
    let mut out = Vec::new();
    collect_types(context, type_ref, false, &mut out);
    out
}

fn collect_types(context: &BindContext, type_ref: &TypeRef, collection: bool, out: &mut Vec<PropertyType>) {
    let shape = match type_ref {
        TypeRef::Primitive { name } => match name.as_str() {
            "string" | "function" => PropertyType::new(PropertyKind::String),
            "boolean" => boolean_type(),
            "int" | "integer" | "float" | "number" => PropertyType::new(PropertyKind::Integer),
            "object" => PropertyType::new(PropertyKind::Object),
            _ => PropertyType::new(PropertyKind::Any),
        },
        // Filters nest filters; point back at the `filters` schema instead of expanding it again.
        TypeRef::Class { name } if name == FILTER_CLASS => PropertyType::new(PropertyKind::Object).reference("filters"),
        TypeRef::Class { name } if name == SORTER_CLASS => PropertyType::new(PropertyKind::Object).reference("sorter"),
        TypeRef::Class { .. } | TypeRef::Typedef { .. } => PropertyType::new(PropertyKind::Object),
        TypeRef::Enum { name } => {
            let values: Vec<String> = match context.metadata.enum_type(name) {
                Some(e) => e.values.clone(),
                None => fallback::enum_values(name)
                    .map(|v| v.iter().map(|s| s.to_string()).collect())
                    .unwrap_or_default(),
            };
            if values.is_empty() {
                PropertyType::new(PropertyKind::String)
            } else {
                let refs: Vec<&str> = values.iter().map(String::as_str).collect();
                PropertyType::new(PropertyKind::String).possible(true, literals(&refs))
            }
        }
        TypeRef::Array { of } => {
            collect_types(context, of, true, out);
            return;
        }
        TypeRef::Union { types } => {
            for t in types {
                collect_types(context, t, collection, out);
            }
            return;
        }
        TypeRef::Unresolved { .. } => PropertyType::new(PropertyKind::Any),
    };
    out.push(if collection { shape.collection() } else { shape });
}

fn element_from_parameter(context: &BindContext, parameter: &Parameter) -> BindingInfoElement {
    let name = canonical_name(&parameter.name);
    let types = match &parameter.type_ref {
        Some(t) => types_from_type_ref(context, t),
        None => vec![PropertyType::new(PropertyKind::Any)],
    };
    let type_name = parameter.type_ref.as_ref().map(TypeRef::display_name);
    let doc = documentation(
        context.messages,
        &parameter.description,
        type_name.as_deref(),
        Visibility::Public,
        parameter.optional,
    );
    BindingInfoElement::new(name, types, doc).required(!parameter.optional)
}

/// Nested elements of a composite class derived from its constructor
/// parameters. Object parameters that describe their own properties (the
/// filter info object) contribute those properties instead of themselves.
pub(crate) fn elements_from_parameters(context: &BindContext, parameters: &[Parameter]) -> Vec<BindingInfoElement> {
    let mut elements: Vec<BindingInfoElement> = Vec::new();
    for parameter in parameters {
        let expanded: Vec<&Parameter> = if parameter.parameter_properties.is_empty() {
            vec![parameter]
        } else {
            parameter.parameter_properties.iter().collect()
        };
        for p in expanded {
            let element = element_from_parameter(context, p);
            if elements.iter().all(|e| e.name != element.name) {
                elements.push(element);
            }
        }
    }
    elements
}

/// Nested elements for `class`, from its constructor metadata or the built-in
/// shape when the metadata snapshot predates constructor descriptions.
pub(crate) fn composite_elements(context: &BindContext, class: &str) -> Vec<BindingInfoElement> {
    match context.metadata.constructor_parameters(class) {
        Some(params) => elements_from_parameters(context, params),
        None => {
            tracing::debug!("no constructor metadata for `{}`, using built-in shape", class);
            let params = if class == FILTER_CLASS {
                fallback::filter_parameters()
            } else {
                fallback::sorter_parameters()
            };
            elements_from_parameters(context, params)
        }
    }
}
