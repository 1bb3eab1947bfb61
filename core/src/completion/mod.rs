//! Completion items for property binding info literals.

use rustc_hash::FxHashSet;
use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, CompletionTextEdit, Documentation, InsertTextFormat, MarkupContent,
    MarkupKind, Position, Range, TextEdit,
};

use crate::ast::{BindingKind, BindingTemplate, Key, StructureElement, Token, Value};
use crate::context::BindContext;
use crate::cursor::{CursorContext, Scope, classify, innermost_scope};
use crate::i18n::MessageKey;
use crate::range::{range_contains, range_strictly_contains};
use crate::schema::{BindingInfoElement, PropertyKind, build_schema, find_element};

mod snippet;

fn markdown(value: &str) -> Option<Documentation> {
    if value.is_empty() {
        return None;
    }
    Some(Documentation::MarkupContent(MarkupContent {
        kind: MarkupKind::Markdown,
        value: value.to_string(),
    }))
}

fn snippet_item(label: String, kind: CompletionItemKind, insert: String, replace: Option<Range>) -> CompletionItem {
    let (insert_text, text_edit) = match replace {
        Some(range) => (
            None,
            Some(CompletionTextEdit::Edit(TextEdit {
                range,
                new_text: insert,
            })),
        ),
        None => (Some(insert), None),
    };
    CompletionItem {
        label,
        kind: Some(kind),
        insert_text,
        text_edit,
        insert_text_format: Some(InsertTextFormat::SNIPPET),
        ..Default::default()
    }
}

fn key_item(context: &BindContext, element: &BindingInfoElement, insert: String, replace: Option<Range>) -> CompletionItem {
    let mut item = snippet_item(element.name.clone(), CompletionItemKind::PROPERTY, insert, replace);
    item.documentation = markdown(&element.documentation);
    item.detail = Some(context.messages.join_alternatives(&type_labels(element)));
    item
}

fn type_labels(element: &BindingInfoElement) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for t in &element.types {
        let base = match t.kind {
            PropertyKind::String => "string",
            PropertyKind::Boolean => "boolean",
            PropertyKind::Object => "object",
            PropertyKind::Integer => "integer",
            PropertyKind::Any => "any",
        };
        let label = if t.collection { format!("{base}[]") } else { base.to_string() };
        if !labels.contains(&label) {
            labels.push(label);
        }
    }
    labels
}

fn initial_items(context: &BindContext, schema: &[BindingInfoElement]) -> Vec<CompletionItem> {
    let mut binding = snippet_item(
        "{ }".to_string(),
        CompletionItemKind::SNIPPET,
        snippet::initial_binding(schema, context.quote),
        None,
    );
    binding.detail = Some(context.messages.text(MessageKey::PropertyBindingDetail, &[]));
    let mut expression = snippet_item("{= }".to_string(), CompletionItemKind::SNIPPET, "{= $0}".to_string(), None);
    expression.detail = Some(context.messages.text(MessageKey::ExpressionBindingDetail, &[]));
    let mut one_time = snippet_item("{:= }".to_string(), CompletionItemKind::SNIPPET, "{:= $0}".to_string(), None);
    one_time.detail = Some(context.messages.text(MessageKey::OneTimeExpressionDetail, &[]));
    vec![binding, expression, one_time]
}

/// `name: value` items for every element not yet used at this level.
fn key_value_items(context: &BindContext, schema: &[BindingInfoElement], used: &[&str]) -> Vec<CompletionItem> {
    schema
        .iter()
        .filter(|e| !used.contains(&e.name.as_str()))
        .map(|e| key_item(context, e, snippet::key_value(e, context.quote), None))
        .collect()
}

/// Quote the author wrapped the key in, if any.
fn written_quote(key: &Key) -> Option<char> {
    key.original_text
        .as_deref()
        .and_then(|raw| raw.chars().next())
        .filter(|c| *c == '\'' || *c == '"')
}

/// Replacement names for a key under the cursor, one per schema element
/// whether or not it is already used. A quoted key stays quoted; the value
/// is only added when the element has no colon yet.
fn key_items(context: &BindContext, schema: &[BindingInfoElement], element: &StructureElement) -> Vec<CompletionItem> {
    let Some(key) = &element.key else {
        return Vec::new();
    };
    let quote = written_quote(key);
    schema
        .iter()
        .map(|e| {
            let name = match quote {
                Some(q) => format!("{q}{}{q}", e.name),
                None => e.name.clone(),
            };
            let insert = if element.colon.is_some() {
                name
            } else {
                format!("{name}: {}", snippet::default_value(e, context.quote))
            };
            key_item(context, e, insert, Some(key.range))
        })
        .collect()
}

/// Literal values and stubs for `definition`. Inside a collection only item
/// shapes are offered; a primitive under the cursor is replaced.
fn value_items(
    context: &BindContext,
    definition: &BindingInfoElement,
    element: &StructureElement,
    position: Position,
    prefix: &str,
) -> Vec<CompletionItem> {
    let inside_collection =
        matches!(&element.value, Some(Value::Collection(c)) if range_strictly_contains(&c.range, position));
    let replace = match &element.value {
        Some(Value::Primitive(p)) => Some(p.range),
        _ => None,
    };

    let mut items: Vec<CompletionItem> = Vec::new();
    let mut push = |label: String, insert: String| {
        if !items.iter().any(|i| i.label == label) {
            let mut item = snippet_item(label, CompletionItemKind::VALUE, format!("{prefix}{insert}"), replace);
            item.detail = Some(definition.name.clone());
            items.push(item);
        }
    };

    for shape in &definition.types {
        if inside_collection && !shape.collection {
            continue;
        }
        let literals_apply = !shape.collection || inside_collection;
        let literals = shape.possible_value.as_ref().filter(|_| literals_apply);
        if let Some(pv) = literals {
            for value in &pv.values {
                let rendered = value.render(context.quote);
                push(rendered.clone(), rendered);
            }
        }
        let (kind, collection) = if inside_collection {
            (shape.kind, false)
        } else {
            (shape.kind, shape.collection)
        };
        // plain strings only get a stub when no literal list exists
        if literals.is_some() && !collection {
            continue;
        }
        if let Some((label, insert)) = snippet::stub(kind, collection, context.quote) {
            push(label, insert);
        }
    }
    items
}

fn definition_of<'s>(schema: &'s [BindingInfoElement], element: &StructureElement) -> Option<&'s BindingInfoElement> {
    element.key_text().and_then(|k| find_element(schema, k))
}

fn items_for_scope(context: &BindContext, scope: &Scope, spaces: &[Token], position: Position) -> Vec<CompletionItem> {
    let structure = scope.structure;
    let ctx = classify(position, structure, spaces, context.text, scope.inside_collection);
    tracing::trace!("completion context `{}`", ctx.label());
    let Some(schema) = scope.schema else {
        return Vec::new();
    };
    match ctx {
        CursorContext::Initial => initial_items(context, schema),
        CursorContext::Empty => key_value_items(context, schema, &[]),
        CursorContext::KeyValue(_) => key_value_items(context, schema, &structure.used_keys()),
        CursorContext::Key(element) => key_items(context, schema, element),
        CursorContext::Value(element) => match definition_of(schema, element) {
            Some(definition) => value_items(context, definition, element, position, ""),
            None => Vec::new(),
        },
        CursorContext::Colon(element) if element.value.is_none() => match definition_of(schema, element) {
            Some(definition) => {
                let prefix = if element.colon.is_some() { "" } else { ": " };
                value_items(context, definition, element, position, prefix)
            }
            None => Vec::new(),
        },
        CursorContext::Colon(_) | CursorContext::Unknown => Vec::new(),
    }
}

fn try_complete(context: &BindContext, template: &BindingTemplate, position: Position) -> anyhow::Result<Vec<CompletionItem>> {
    let schema = build_schema(context, context.aggregation);
    if context.text.trim().is_empty() {
        return Ok(initial_items(context, &schema));
    }

    let mut items = Vec::new();
    let mut seen: FxHashSet<String> = FxHashSet::default();
    for binding in &template.bindings {
        if binding.kind == BindingKind::Expression || !range_contains(&binding.structure.range, position) {
            continue;
        }
        let scope = innermost_scope(&binding.structure, &schema, position, context.config.max_reference_depth)?;
        for item in items_for_scope(context, &scope, &template.spaces, position) {
            if seen.insert(item.label.clone()) {
                items.push(item);
            }
        }
    }
    Ok(items)
}

/// Completion items at `context.position`. Internal failures yield an empty list.
pub fn complete(context: &BindContext, template: &BindingTemplate) -> Vec<CompletionItem> {
    if !context.config.completion_enabled {
        return Vec::new();
    }
    let Some(position) = context.position else {
        return Vec::new();
    };
    match try_complete(context, template, position) {
        Ok(items) => items,
        Err(err) => {
            tracing::debug!("binding completion aborted: {:#}", err);
            Vec::new()
        }
    }
}
