//! Built-in metadata used when a framework release ships without the
//! binding info typedefs or the sorter/filter constructor descriptions.

use once_cell::sync::Lazy;

use crate::metadata::{
    AGGREGATION_BINDING_INFO, FILTER_CLASS, PROPERTY_BINDING_INFO, Parameter, SORTER_CLASS, TypeRef, Typedef,
    TypedefProperty, Visibility,
};

pub(crate) const FILTER_OPERATOR_ENUM: &str = "sap.ui.model.FilterOperator";

pub(crate) const FILTER_OPERATORS: [&str; 16] = [
    "All",
    "Any",
    "BT",
    "Contains",
    "EndsWith",
    "EQ",
    "GE",
    "GT",
    "LE",
    "LT",
    "NB",
    "NE",
    "NotContains",
    "NotEndsWith",
    "NotStartsWith",
    "StartsWith",
];

fn prop(name: &str, type_ref: TypeRef, description: &str) -> TypedefProperty {
    TypedefProperty {
        name: name.to_string(),
        type_ref: Some(type_ref),
        description: description.to_string(),
        visibility: Visibility::Public,
        optional: true,
    }
}

fn param(name: &str, type_ref: TypeRef, optional: bool, description: &str) -> Parameter {
    Parameter {
        name: name.to_string(),
        type_ref: Some(type_ref),
        optional,
        description: description.to_string(),
        parameter_properties: Vec::new(),
    }
}

fn string() -> TypeRef {
    TypeRef::primitive("string")
}

fn boolean() -> TypeRef {
    TypeRef::primitive("boolean")
}

fn object() -> TypeRef {
    TypeRef::primitive("object")
}

fn function() -> TypeRef {
    TypeRef::primitive("function")
}

static PROPERTY_BINDING_INFO_FALLBACK: Lazy<Typedef> = Lazy::new(|| Typedef {
    name: PROPERTY_BINDING_INFO.to_string(),
    properties: vec![
        prop("path", string(), "Path in the model to bind to, either an absolute path or relative to the binding context"),
        prop("value", string(), "Since 1.61, defines a static binding with the given value"),
        prop("model", string(), "Name of the model to bind against; when undefined or omitted, the default model is used"),
        prop("suspended", boolean(), "Whether the binding is initially suspended"),
        prop("formatter", function(), "Function to convert model data into a property value"),
        prop("useRawValues", boolean(), "Whether the parameters to the formatter function should be passed as raw values"),
        prop("useInternalValues", boolean(), "Whether the parameters to the formatter function should be passed as internal values"),
        prop(
            "type",
            TypeRef::Union {
                types: vec![TypeRef::class("sap.ui.model.Type"), string()],
            },
            "A type object or the name of a type class to create such a type object",
        ),
        prop("targetType", string(), "Target type to be used by the type when formatting model data"),
        prop("formatOptions", object(), "Format options to be used for the type; only taken into account when the type is specified by its name"),
        prop("constraints", object(), "Additional constraints to be used when constructing a type object from a type name"),
        prop("mode", TypeRef::Enum { name: "sap.ui.model.BindingMode".to_string() }, "Binding mode to be used for this property binding"),
        prop("parameters", object(), "Map of additional parameters for this binding"),
        prop("events", object(), "Map of event handler functions keyed by the name of the binding events"),
        prop(
            "parts",
            TypeRef::array(TypeRef::Union {
                types: vec![string(), TypeRef::Typedef { name: PROPERTY_BINDING_INFO.to_string() }],
            }),
            "Array of binding info objects for the parts of a composite binding",
        ),
    ],
});

static AGGREGATION_BINDING_INFO_FALLBACK: Lazy<Typedef> = Lazy::new(|| Typedef {
    name: AGGREGATION_BINDING_INFO.to_string(),
    properties: vec![
        prop("path", string(), "Path in the model to bind to"),
        prop("model", string(), "Name of the model to bind against"),
        prop("template", TypeRef::class("sap.ui.base.ManagedObject"), "The template to clone for each item in the aggregation"),
        prop("templateShareable", boolean(), "Whether the framework may assume that the template can be shared"),
        prop("factory", function(), "A factory function called to create an object for each item in the aggregation"),
        prop("suspended", boolean(), "Whether the binding is initially suspended"),
        prop("startIndex", TypeRef::primitive("int"), "First entry of the list to be created"),
        prop("length", TypeRef::primitive("int"), "Number of entries to be created"),
        prop(
            "sorter",
            TypeRef::Union {
                types: vec![TypeRef::class(SORTER_CLASS), TypeRef::array(TypeRef::class(SORTER_CLASS))],
            },
            "The initial sort order",
        ),
        prop(
            "filters",
            TypeRef::Union {
                types: vec![TypeRef::class(FILTER_CLASS), TypeRef::array(TypeRef::class(FILTER_CLASS))],
            },
            "The predefined filters for this aggregation",
        ),
        prop("groupHeaderFactory", function(), "A factory function to generate custom group visualization"),
        prop("key", string(), "Name of the key property or a function getting the context as only parameter"),
        prop("parameters", object(), "Map of additional parameters for this binding"),
        prop("events", object(), "Map of event handler functions keyed by the name of the binding events"),
    ],
});

static SORTER_PARAMETERS: Lazy<Vec<Parameter>> = Lazy::new(|| {
    vec![
        param("sPath", string(), false, "The binding path used for sorting"),
        param("bDescending", boolean(), true, "Whether the sort order should be descending"),
        param(
            "vGroup",
            TypeRef::Union {
                types: vec![boolean(), function()],
            },
            true,
            "Configure grouping of the content",
        ),
        param("fnComparator", function(), true, "A custom comparator function used for client-side sorting"),
    ]
});

static FILTER_PARAMETERS: Lazy<Vec<Parameter>> = Lazy::new(|| {
    let filter = TypeRef::class(FILTER_CLASS);
    vec![
        param("path", string(), true, "Binding path for this filter"),
        param("test", function(), true, "Function used to test each value"),
        param("comparator", function(), true, "Function used to compare two values for equality and order"),
        param(
            "operator",
            TypeRef::Enum {
                name: FILTER_OPERATOR_ENUM.to_string(),
            },
            true,
            "Operator used for the filter",
        ),
        param("value1", TypeRef::primitive("any"), true, "First value to use with the given filter operator"),
        param("value2", TypeRef::primitive("any"), true, "Second value to use with the given filter operator"),
        param("variable", string(), true, "Variable name used in lambda filters"),
        param("condition", filter.clone(), true, "Condition of a lambda filter"),
        param("filters", TypeRef::array(filter), true, "Filters to be combined with `and` or `or`"),
        param("and", boolean(), true, "Whether the combined filters are and-ed"),
        param("caseSensitive", boolean(), true, "Whether the string comparison is case sensitive"),
    ]
});

pub(crate) fn property_binding_info() -> &'static Typedef {
    &PROPERTY_BINDING_INFO_FALLBACK
}

pub(crate) fn aggregation_binding_info() -> &'static Typedef {
    &AGGREGATION_BINDING_INFO_FALLBACK
}

pub(crate) fn sorter_parameters() -> &'static [Parameter] {
    &SORTER_PARAMETERS
}

pub(crate) fn filter_parameters() -> &'static [Parameter] {
    &FILTER_PARAMETERS
}

pub(crate) fn enum_values(name: &str) -> Option<&'static [&'static str]> {
    match name {
        FILTER_OPERATOR_ENUM => Some(&FILTER_OPERATORS[..]),
        _ => None,
    }
}
