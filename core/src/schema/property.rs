use crate::context::BindContext;
use crate::metadata::{PROPERTY_BINDING_INFO, Typedef, TypedefProperty};

use super::{BindingInfoElement, Literal, PropertyKind, PropertyType, documentation, fallback};

pub(crate) const BINDING_MODES: [&str; 4] = [
    "sap.ui.model.BindingMode.Default",
    "sap.ui.model.BindingMode.OneTime",
    "sap.ui.model.BindingMode.OneWay",
    "sap.ui.model.BindingMode.TwoWay",
];

pub(crate) const TARGET_TYPES: [&str; 5] = ["any", "boolean", "float", "int", "string"];

pub(crate) const WELL_KNOWN_TYPES: [&str; 33] = [
    "sap.ui.model.type.Boolean",
    "sap.ui.model.type.Currency",
    "sap.ui.model.type.Date",
    "sap.ui.model.type.DateInterval",
    "sap.ui.model.type.DateTime",
    "sap.ui.model.type.DateTimeInterval",
    "sap.ui.model.type.FileSize",
    "sap.ui.model.type.Float",
    "sap.ui.model.type.Integer",
    "sap.ui.model.type.String",
    "sap.ui.model.type.Time",
    "sap.ui.model.type.TimeInterval",
    "sap.ui.model.type.Unit",
    "sap.ui.model.odata.type.Boolean",
    "sap.ui.model.odata.type.Byte",
    "sap.ui.model.odata.type.Currency",
    "sap.ui.model.odata.type.Date",
    "sap.ui.model.odata.type.DateTime",
    "sap.ui.model.odata.type.DateTimeOffset",
    "sap.ui.model.odata.type.DateTimeWithTimezone",
    "sap.ui.model.odata.type.Decimal",
    "sap.ui.model.odata.type.Double",
    "sap.ui.model.odata.type.Guid",
    "sap.ui.model.odata.type.Int16",
    "sap.ui.model.odata.type.Int32",
    "sap.ui.model.odata.type.Int64",
    "sap.ui.model.odata.type.SByte",
    "sap.ui.model.odata.type.Single",
    "sap.ui.model.odata.type.Stream",
    "sap.ui.model.odata.type.String",
    "sap.ui.model.odata.type.Time",
    "sap.ui.model.odata.type.TimeOfDay",
    "sap.ui.model.odata.type.Unit",
];

/// Property names of the property binding info typedef the builder knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyBindingInfoName {
    Path,
    Value,
    Model,
    Suspended,
    Formatter,
    UseRawValues,
    UseInternalValues,
    Type,
    TargetType,
    FormatOptions,
    Constraints,
    Mode,
    Parameters,
    Events,
    Parts,
}

impl PropertyBindingInfoName {
    pub fn from_name(name: &str) -> Option<Self> {
        use PropertyBindingInfoName::*;
        Some(match name {
            "path" => Path,
            "value" => Value,
            "model" => Model,
            "suspended" => Suspended,
            "formatter" => Formatter,
            "useRawValues" => UseRawValues,
            "useInternalValues" => UseInternalValues,
            "type" => Type,
            "targetType" => TargetType,
            "formatOptions" => FormatOptions,
            "constraints" => Constraints,
            "mode" => Mode,
            "parameters" => Parameters,
            "events" => Events,
            "parts" => Parts,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        use PropertyBindingInfoName::*;
        match self {
            Path => "path",
            Value => "value",
            Model => "model",
            Suspended => "suspended",
            Formatter => "formatter",
            UseRawValues => "useRawValues",
            UseInternalValues => "useInternalValues",
            Type => "type",
            TargetType => "targetType",
            FormatOptions => "formatOptions",
            Constraints => "constraints",
            Mode => "mode",
            Parameters => "parameters",
            Events => "events",
            Parts => "parts",
        }
    }
}

pub(crate) fn literals(values: &[&str]) -> Vec<Literal> {
    values.iter().map(|v| Literal::Text(v.to_string())).collect()
}

pub(crate) fn boolean_type() -> PropertyType {
    PropertyType::new(PropertyKind::Boolean).possible(true, vec![Literal::Bool(true), Literal::Bool(false)])
}

fn type_name_type() -> PropertyType {
    PropertyType::new(PropertyKind::String).possible(false, literals(&WELL_KNOWN_TYPES))
}

/// Value shapes for one recognized name. `parts` gets its nested object
/// elements filled in afterwards by [`build_from_typedef`].
fn property_types(name: PropertyBindingInfoName) -> Vec<PropertyType> {
    use PropertyBindingInfoName::*;
    match name {
        Path => vec![PropertyType::new(PropertyKind::String).not_allowed(&["value", "parts"])],
        Value => vec![PropertyType::new(PropertyKind::String).not_allowed(&["path", "parts"])],
        Model | Formatter => vec![PropertyType::new(PropertyKind::String)],
        Suspended | UseRawValues | UseInternalValues => vec![boolean_type()],
        Type => vec![PropertyType::new(PropertyKind::Object), type_name_type()],
        TargetType => vec![PropertyType::new(PropertyKind::String).possible(false, literals(&TARGET_TYPES))],
        FormatOptions | Constraints => {
            vec![PropertyType::new(PropertyKind::Object).dependent("type", vec![type_name_type()])]
        }
        Mode => vec![PropertyType::new(PropertyKind::String).possible(true, literals(&BINDING_MODES))],
        Parameters | Events => vec![PropertyType::new(PropertyKind::Object)],
        Parts => vec![
            PropertyType::new(PropertyKind::String)
                .collection()
                .not_allowed(&["path", "value"]),
            PropertyType::new(PropertyKind::Object)
                .collection()
                .not_allowed(&["path", "value"]),
        ],
    }
}

fn element_for(context: &BindContext, name: PropertyBindingInfoName, property: &TypedefProperty) -> BindingInfoElement {
    let type_name = property.type_ref.as_ref().map(|t| t.display_name());
    let doc = documentation(
        context.messages,
        &property.description,
        type_name.as_deref(),
        property.visibility,
        property.optional,
    );
    BindingInfoElement::new(name.as_str(), property_types(name), doc)
}

pub(crate) fn build_from_typedef(context: &BindContext, typedef: &Typedef) -> Vec<BindingInfoElement> {
    let mut elements: Vec<BindingInfoElement> = typedef
        .properties
        .iter()
        .filter_map(|p| {
            let Some(name) = PropertyBindingInfoName::from_name(&p.name) else {
                tracing::trace!("dropping unrecognized binding info property `{}`", p.name);
                return None;
            };
            Some(element_for(context, name, p))
        })
        .collect();

    // Objects inside `parts` accept every other property; nesting `parts`
    // itself is reported by the diagnostics.
    let nested: Vec<BindingInfoElement> = elements
        .iter()
        .filter(|e| e.name != PropertyBindingInfoName::Parts.as_str())
        .cloned()
        .collect();
    if let Some(parts) = elements
        .iter_mut()
        .find(|e| e.name == PropertyBindingInfoName::Parts.as_str())
    {
        for t in parts.types.iter_mut().filter(|t| t.kind == PropertyKind::Object) {
            t.possible_elements = nested.clone();
        }
    }
    elements
}

pub(crate) fn build(context: &BindContext) -> Vec<BindingInfoElement> {
    match context.metadata.typedef(PROPERTY_BINDING_INFO) {
        Some(typedef) => build_from_typedef(context, typedef),
        None => {
            tracing::debug!("`{}` missing from metadata, using fallback table", PROPERTY_BINDING_INFO);
            build_from_typedef(context, fallback::property_binding_info())
        }
    }
}
