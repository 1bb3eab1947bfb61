//! Schema-driven checks: unknown properties, value shapes, dependencies,
//! exclusive combinations and mandatory properties.

use rustc_hash::FxHashSet;
use tower_lsp::lsp_types::Range;

use crate::ast::{PrimitiveValue, StructureValue, Value};
use crate::i18n::MessageKey;
use crate::schema::{BindingInfoElement, PossibleValue, PropertyType, find_element, resolve_nested};

use super::{IssueKind, Validator};

const PARTS: &str = "parts";

fn push_unique(list: &mut Vec<String>, items: impl IntoIterator<Item = String>) {
    for item in items {
        if !list.contains(&item) {
            list.push(item);
        }
    }
}

fn fixed_values(shape: &PropertyType) -> Option<&PossibleValue> {
    shape.possible_value.as_ref().filter(|pv| pv.fixed)
}

/// Keys named `parts` anywhere below `value`.
fn collect_nested_parts(value: &Value, out: &mut Vec<Range>) {
    match value {
        Value::Structure(s) => {
            for element in &s.elements {
                if let Some(key) = &element.key {
                    if key.text == PARTS {
                        out.push(key.range);
                    }
                }
                if let Some(v) = &element.value {
                    collect_nested_parts(v, out);
                }
            }
        }
        Value::Collection(c) => {
            for item in &c.elements {
                collect_nested_parts(item, out);
            }
        }
        Value::Primitive(_) => {}
    }
}

impl<'a> Validator<'a> {
    /// Skeleton and, when `schema` is known, semantic checks for one
    /// structure. `inside_parts` marks objects that are direct items of a
    /// `parts` collection.
    pub(super) fn check_structure(
        &mut self,
        structure: &StructureValue,
        schema: Option<&'a [BindingInfoElement]>,
        inside_parts: bool,
    ) -> anyhow::Result<()> {
        self.check_curly(structure);
        self.check_duplicates(structure);
        let items: Vec<Range> = structure.elements.iter().map(|e| e.range).collect();
        self.check_commas(&items, &structure.commas);

        for element in &structure.elements {
            let Some(key) = &element.key else {
                if let Some(value) = &element.value {
                    self.check_free_value(value)?;
                }
                continue;
            };
            let Some(colon) = &element.colon else {
                self.push(IssueKind::MissingColon, key.range, MessageKey::MissingColon, &[&key.text]);
                continue;
            };
            self.check_extra_colons(element, colon);
            let Some(value) = &element.value else {
                self.push(
                    IssueKind::MissingValue,
                    Range::new(key.range.start, colon.range.end),
                    MessageKey::MissingValue,
                    &[&key.text],
                );
                continue;
            };

            let Some(schema) = schema else {
                self.check_free_value(value)?;
                continue;
            };
            match find_element(schema, &key.text) {
                Some(definition) => self.check_value(definition, value)?,
                None => {
                    // nested `parts` are reported as recursion at the top level
                    if !(inside_parts && key.text == PARTS) {
                        self.push(
                            IssueKind::UnknownPropertyBindingInfo,
                            key.range,
                            MessageKey::UnknownProperty,
                            &[&key.text],
                        );
                    }
                    self.check_free_value(value)?;
                }
            }
        }

        if let Some(schema) = schema {
            self.check_dependents(structure, schema);
            self.check_mandatory(structure, schema);
        }
        Ok(())
    }

    fn nested_schema(&self, shape: &'a PropertyType) -> anyhow::Result<Option<&'a [BindingInfoElement]>> {
        resolve_nested(self.root, shape, self.context.config.max_reference_depth)
    }

    fn check_value(&mut self, definition: &'a BindingInfoElement, value: &Value) -> anyhow::Result<()> {
        match value {
            Value::Primitive(p) => {
                let accepting: Vec<&PropertyType> = definition.types.iter().filter(|t| t.accepts(value)).collect();
                if accepting.is_empty() {
                    self.mismatch(p.range, definition.types.iter());
                } else {
                    self.check_literal(p, &accepting);
                }
                Ok(())
            }
            Value::Structure(s) => match definition.types.iter().find(|t| t.accepts(value)) {
                Some(shape) => {
                    let nested = self.nested_schema(shape)?;
                    self.check_structure(s, nested, false)
                }
                None => {
                    self.mismatch(s.range, definition.types.iter());
                    self.check_structure(s, None, false)
                }
            },
            Value::Collection(c) => {
                let shapes: Vec<&'a PropertyType> = definition.types.iter().filter(|t| t.collection).collect();
                if shapes.is_empty() {
                    self.mismatch(c.range, definition.types.iter());
                    return self.check_free_value(value);
                }
                self.check_collection_skeleton(c);
                let inside_parts = definition.name == PARTS;
                for item in &c.elements {
                    let Some(shape) = shapes.iter().copied().find(|t| t.accepts_item(item)) else {
                        let singles: Vec<PropertyType> = shapes.iter().map(|t| PropertyType::new(t.kind)).collect();
                        self.mismatch(item.range(), singles.iter());
                        self.check_free_value(item)?;
                        continue;
                    };
                    match item {
                        Value::Structure(s) => {
                            let nested = self.nested_schema(shape)?;
                            self.check_structure(s, nested, inside_parts)?;
                        }
                        Value::Primitive(p) => self.check_literal(p, &[shape]),
                        Value::Collection(_) => self.check_free_value(item)?,
                    }
                }
                Ok(())
            }
        }
    }

    /// One MissMatchValue listing the renderings of every shape in `types`.
    fn mismatch<'t>(&mut self, range: Range, types: impl Iterator<Item = &'t PropertyType>) {
        let mut renderings = Vec::new();
        for t in types {
            push_unique(&mut renderings, t.renderings(self.context.quote));
        }
        // nothing to suggest for `any` shapes, which accept every value anyway
        if renderings.is_empty() {
            return;
        }
        let list = self.context.messages.join_alternatives(&renderings);
        self.push(IssueKind::MissMatchValue, range, MessageKey::AllowedValues, &[&list]);
    }

    /// A literal must be one of the fixed values when every accepting shape
    /// closes its value set.
    fn check_literal(&mut self, primitive: &PrimitiveValue, shapes: &[&PropertyType]) {
        let mut fixed = Vec::with_capacity(shapes.len());
        for shape in shapes {
            match fixed_values(shape) {
                Some(pv) => fixed.push(pv),
                None => return,
            }
        }
        if fixed.iter().any(|pv| pv.contains_text(&primitive.text)) {
            return;
        }
        let mut allowed = Vec::new();
        for pv in &fixed {
            push_unique(&mut allowed, pv.values.iter().map(|v| v.render(self.context.quote)));
        }
        let list = self.context.messages.join_alternatives(&allowed);
        self.push(IssueKind::MissMatchValue, primitive.range, MessageKey::AllowedValues, &[&list]);
    }

    fn check_dependents(&mut self, structure: &StructureValue, schema: &'a [BindingInfoElement]) {
        for element in &structure.elements {
            let Some(key) = &element.key else {
                continue;
            };
            let Some(definition) = find_element(schema, &key.text) else {
                continue;
            };
            let mut seen: FxHashSet<&str> = FxHashSet::default();
            for dependent in definition.types.iter().flat_map(|t| t.dependents.iter()) {
                if !seen.insert(dependent.name.as_str()) {
                    continue;
                }
                let Some(target) = structure.element_by_key(&dependent.name) else {
                    self.push(
                        IssueKind::RequiredDependency,
                        key.range,
                        MessageKey::RequiredDependency,
                        &[&dependent.name, &key.text],
                    );
                    continue;
                };
                let Some(Value::Primitive(actual)) = &target.value else {
                    continue;
                };
                let fixed: Vec<&PossibleValue> = dependent.types.iter().filter_map(fixed_values).collect();
                if fixed.is_empty() || fixed.iter().any(|pv| pv.contains_text(&actual.text)) {
                    continue;
                }
                let mut expected = Vec::new();
                for pv in &fixed {
                    push_unique(&mut expected, pv.values.iter().map(|v| v.render(self.context.quote)));
                }
                let list = self.context.messages.join_alternatives(&expected);
                self.push(
                    IssueKind::RequiredDependency,
                    key.range,
                    MessageKey::RequiredDependencyValue,
                    &[&dependent.name, &key.text, &list],
                );
            }
        }
    }

    /// Required elements of list binding composites. A required element that
    /// can also be written as a plain value is satisfied by any sibling.
    fn check_mandatory(&mut self, structure: &StructureValue, schema: &'a [BindingInfoElement]) {
        if !self.context.in_aggregation_scope() {
            return;
        }
        let has_keys = structure.elements.iter().any(|e| e.key.is_some());
        let anchor = structure.left_curly.as_ref().map_or(structure.range, |t| t.range);
        for definition in schema.iter().filter(|d| d.required) {
            if structure.element_by_key(&definition.name).is_some() {
                continue;
            }
            if definition.is_dual_purpose() && has_keys {
                continue;
            }
            self.push(
                IssueKind::MandatoryProperty,
                anchor,
                MessageKey::MandatoryProperty,
                &[&definition.name],
            );
        }
    }

    /// Mutually exclusive keys at the top level. Each offending key is
    /// flagged once, including partners whose own shape does not list the
    /// conflict.
    pub(super) fn check_not_allowed(&mut self, structure: &StructureValue, schema: &'a [BindingInfoElement]) {
        let keyed: Vec<(&str, Range)> = structure
            .elements
            .iter()
            .filter_map(|e| e.key.as_ref().map(|k| (k.text.as_str(), k.range)))
            .collect();

        let mut conflicts: Vec<Vec<&str>> = vec![Vec::new(); keyed.len()];
        for (i, (name, _)) in keyed.iter().enumerate() {
            let Some(definition) = find_element(schema, name) else {
                continue;
            };
            for excluded in definition.not_allowed_elements() {
                for (j, (candidate, _)) in keyed.iter().enumerate() {
                    if *candidate != excluded || candidate == name {
                        continue;
                    }
                    if !conflicts[i].contains(candidate) {
                        conflicts[i].push(candidate);
                    }
                    if !conflicts[j].contains(name) {
                        conflicts[j].push(name);
                    }
                }
            }
        }

        let mut flagged: FxHashSet<&str> = FxHashSet::default();
        for (i, (name, range)) in keyed.iter().enumerate() {
            if conflicts[i].is_empty() || !flagged.insert(name) {
                continue;
            }
            let partners: Vec<String> = conflicts[i].iter().map(|c| format!("`{c}`")).collect();
            let list = self.context.messages.join_alternatives(&partners);
            self.push(
                IssueKind::NotAllowedProperty,
                *range,
                MessageKey::NotAllowedProperty,
                &[name, &list],
            );
        }
    }

    /// `parts` may not appear anywhere inside a top-level `parts` collection.
    pub(super) fn check_recursive_parts(&mut self, structure: &StructureValue) {
        for element in &structure.elements {
            if element.key_text() != Some(PARTS) {
                continue;
            }
            let Some(Value::Collection(collection)) = &element.value else {
                continue;
            };
            let mut found = Vec::new();
            for item in &collection.elements {
                collect_nested_parts(item, &mut found);
            }
            for range in found {
                self.push(
                    IssueKind::RecursiveProperty,
                    range,
                    MessageKey::RecursiveProperty,
                    &[PARTS],
                );
            }
        }
    }
}
