use super::*;
use crate::config::BindingConfig;
use crate::metadata::{
    AGGREGATION_BINDING_INFO, Class, Constructor, EnumType, FILTER_CLASS, FrameworkMetadata, PROPERTY_BINDING_INFO,
    Parameter, SORTER_CLASS, TypeRef, Typedef, TypedefProperty,
};

fn prop(name: &str, type_ref: TypeRef) -> TypedefProperty {
    TypedefProperty {
        name: name.to_string(),
        type_ref: Some(type_ref),
        description: format!("{name} docs"),
        visibility: Visibility::Public,
        optional: true,
    }
}

fn param(name: &str, type_ref: TypeRef, optional: bool) -> Parameter {
    Parameter {
        name: name.to_string(),
        type_ref: Some(type_ref),
        optional,
        description: String::new(),
        parameter_properties: Vec::new(),
    }
}

fn property_typedef() -> Typedef {
    Typedef {
        name: PROPERTY_BINDING_INFO.to_string(),
        properties: vec![
            prop("path", TypeRef::primitive("string")),
            prop("value", TypeRef::primitive("any")),
            prop("suspended", TypeRef::primitive("boolean")),
            prop("type", TypeRef::primitive("string")),
            prop("formatOptions", TypeRef::primitive("object")),
            prop("parts", TypeRef::array(TypeRef::primitive("string"))),
            prop("futureProperty", TypeRef::primitive("string")),
        ],
    }
}

fn list_metadata(with_constructors: bool) -> FrameworkMetadata {
    let sorter = Class {
        name: SORTER_CLASS.to_string(),
        constructor: with_constructors.then(|| Constructor {
            parameters: vec![
                param("sPath", TypeRef::primitive("string"), false),
                param("bDescending", TypeRef::primitive("boolean"), true),
                param("vCustom", TypeRef::primitive("string"), true),
            ],
        }),
    };
    let filter_info = Parameter {
        parameter_properties: vec![
            param("path", TypeRef::primitive("string"), true),
            param("operator", TypeRef::Enum { name: "sap.ui.model.FilterOperator".into() }, true),
            param(
                "filters",
                TypeRef::Union {
                    types: vec![TypeRef::primitive("string"), TypeRef::array(TypeRef::class(FILTER_CLASS))],
                },
                true,
            ),
        ],
        ..param("vFilterInfo", TypeRef::primitive("object"), false)
    };
    let filter = Class {
        name: FILTER_CLASS.to_string(),
        constructor: with_constructors.then(|| Constructor {
            parameters: vec![filter_info, param("vOperator", TypeRef::primitive("string"), true)],
        }),
    };
    let item = Class {
        name: "sap.ui.core.Item".to_string(),
        constructor: None,
    };
    FrameworkMetadata::new(
        vec![property_typedef()],
        vec![sorter, filter, item],
        vec![EnumType {
            name: "sap.ui.model.FilterOperator".to_string(),
            values: vec!["EQ".into(), "NE".into()],
        }],
    )
}

fn names(schema: &[BindingInfoElement]) -> Vec<&str> {
    schema.iter().map(|e| e.name.as_str()).collect()
}

#[test]
fn static_path_drops_unknown_names_and_keeps_order() {
    let metadata = FrameworkMetadata::new(vec![property_typedef()], vec![], vec![]);
    let config = BindingConfig::default();
    let ctx = BindContext::new(&metadata, "", &config);
    let schema = build_schema(&ctx, None);
    assert_eq!(names(&schema), ["path", "value", "suspended", "type", "formatOptions", "parts"]);

    let path = find_element(&schema, "path").unwrap();
    assert_eq!(path.types[0].not_allowed_elements, ["value", "parts"]);
    assert!(path.documentation.contains("path docs"));

    let suspended = find_element(&schema, "suspended").unwrap();
    let pv = suspended.types[0].possible_value.as_ref().unwrap();
    assert!(pv.fixed);
    assert_eq!(pv.values, [Literal::Bool(true), Literal::Bool(false)]);

    let ty = find_element(&schema, "type").unwrap();
    assert_eq!(ty.types.len(), 2);
    assert!(!ty.types[1].possible_value.as_ref().unwrap().fixed);

    let fo = find_element(&schema, "formatOptions").unwrap();
    assert_eq!(fo.types[0].dependents[0].name, "type");
}

#[test]
fn parts_objects_nest_every_other_property() {
    let metadata = FrameworkMetadata::new(vec![property_typedef()], vec![], vec![]);
    let config = BindingConfig::default();
    let ctx = BindContext::new(&metadata, "", &config);
    let schema = build_schema(&ctx, None);
    let parts = find_element(&schema, "parts").unwrap();
    assert!(parts.types.iter().all(|t| t.collection));
    let object = parts.types.iter().find(|t| t.kind == PropertyKind::Object).unwrap();
    let nested = names(&object.possible_elements);
    assert!(nested.contains(&"path"));
    assert!(!nested.contains(&"parts"));
}

#[test]
fn missing_typedef_uses_fallback_table() {
    let metadata = FrameworkMetadata::default();
    let config = BindingConfig::default();
    let ctx = BindContext::new(&metadata, "", &config);
    let schema = build_schema(&ctx, None);
    assert_eq!(schema.len(), 15);
    let mode = find_element(&schema, "mode").unwrap();
    assert!(mode.types[0].possible_value.as_ref().unwrap().fixed);
}

#[test]
fn unresolvable_aggregation_falls_back_to_property_schema() {
    let metadata = list_metadata(true);
    let config = BindingConfig::default();
    let ctx = BindContext::new(&metadata, "", &config);
    let aggregation = Aggregation {
        name: "items".into(),
        type_name: Some("sap.m.Unknown".into()),
    };
    let schema = build_schema(&ctx, Some(&aggregation));
    assert!(find_element(&schema, "sorter").is_none());
    assert!(find_element(&schema, "parts").is_some());
}

#[test]
fn aggregation_schema_introspects_sorter_and_filters() {
    let metadata = list_metadata(true);
    let config = BindingConfig::default();
    let ctx = BindContext::new(&metadata, "", &config);
    let aggregation = Aggregation {
        name: "items".into(),
        type_name: Some("sap.ui.core.Item".into()),
    };
    // no aggregation typedef in this snapshot, so the fallback table applies
    assert!(metadata.typedef(AGGREGATION_BINDING_INFO).is_none());
    let schema = build_schema(&ctx, Some(&aggregation));
    assert!(names(&schema).contains(&"startIndex"));

    let sorter = find_element(&schema, "sorter").unwrap();
    assert_eq!(sorter.types.len(), 2);
    let sorter_elements = &sorter.types[0].possible_elements;
    assert_eq!(names(sorter_elements), ["path", "descending", "vCustom"]);
    assert!(sorter_elements[0].required);
    assert!(!sorter_elements[1].required);

    let filters = find_element(&schema, "filters").unwrap();
    let filter_elements = &filters.types[1].possible_elements;
    assert_eq!(names(filter_elements), ["path", "operator", "filters"]);
    let operator = &filter_elements[1].types[0];
    assert_eq!(operator.possible_value.as_ref().unwrap().values.len(), 2);
    let nested = find_element(filter_elements, "filters").unwrap();
    let reference = nested.types.iter().find(|t| t.kind == PropertyKind::Object).unwrap();
    assert!(reference.collection);
    assert_eq!(reference.reference.as_deref(), Some("filters"));
    assert!(reference.possible_elements.is_empty());

    let resolved = resolve_nested(&schema, reference, 4).unwrap().unwrap();
    assert_eq!(names(resolved), ["path", "operator", "filters"]);
}

#[test]
fn missing_constructors_use_built_in_shapes() {
    let metadata = list_metadata(false);
    let config = BindingConfig::default();
    let ctx = BindContext::new(&metadata, "", &config);
    let aggregation = Aggregation {
        name: "items".into(),
        type_name: Some("sap.ui.core.Item".into()),
    };
    let schema = build_schema(&ctx, Some(&aggregation));
    let sorter = find_element(&schema, "sorter").unwrap();
    assert_eq!(names(&sorter.types[0].possible_elements), ["path", "descending", "group", "comparator"]);
    let filters = find_element(&schema, "filters").unwrap();
    let operator = find_element(&filters.types[0].possible_elements, "operator").unwrap();
    // the snapshot's enum wins over the built-in list
    assert_eq!(operator.types[0].possible_value.as_ref().unwrap().values.len(), 2);
}

#[test]
fn reference_chains_are_depth_guarded() {
    let looping = BindingInfoElement::new(
        "loop",
        vec![PropertyType::new(PropertyKind::Object).reference("loop")],
        String::new(),
    );
    let root = vec![looping];
    let shape = &root[0].types[0];
    assert!(resolve_nested(&root, shape, 3).is_err());

    let dangling = PropertyType::new(PropertyKind::Object).reference("nowhere");
    assert!(resolve_nested(&root, &dangling, 3).is_err());

    let plain = PropertyType::new(PropertyKind::Object);
    assert!(resolve_nested(&root, &plain, 3).unwrap().is_none());
}

#[test]
fn union_duplicates_collapse_per_kind() {
    let element = BindingInfoElement::new(
        "x",
        vec![
            PropertyType::new(PropertyKind::String),
            PropertyType::new(PropertyKind::String).collection(),
            PropertyType::new(PropertyKind::String).not_allowed(&["y"]),
        ],
        String::new(),
    );
    assert_eq!(element.types.len(), 2);
    assert!(element.types[0].not_allowed_elements.is_empty());
}

#[test]
fn renderings_for_mismatch_messages() {
    let q = QuoteStyle::Single;
    assert_eq!(PropertyType::new(PropertyKind::Object).renderings(q), ["{ }"]);
    assert_eq!(PropertyType::new(PropertyKind::String).collection().renderings(q), ["[' ']"]);
    assert!(PropertyType::new(PropertyKind::Any).renderings(q).is_empty());
}
