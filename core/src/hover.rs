//! Documentation for the binding info key under the cursor.

use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind, Position};

use crate::ast::{BindingKind, BindingTemplate};
use crate::context::BindContext;
use crate::cursor::{CursorContext, classify, innermost_scope};
use crate::range::range_contains;
use crate::schema::{build_schema, find_element};

fn try_hover(context: &BindContext, template: &BindingTemplate, position: Position) -> anyhow::Result<Option<Hover>> {
    let schema = build_schema(context, context.aggregation);
    for binding in &template.bindings {
        if binding.kind == BindingKind::Expression || !range_contains(&binding.structure.range, position) {
            continue;
        }
        let scope = innermost_scope(&binding.structure, &schema, position, context.config.max_reference_depth)?;
        let CursorContext::Key(element) = classify(
            position,
            scope.structure,
            &template.spaces,
            context.text,
            scope.inside_collection,
        ) else {
            continue;
        };
        let (Some(key), Some(nested)) = (&element.key, scope.schema) else {
            continue;
        };
        let Some(definition) = find_element(nested, &key.text) else {
            continue;
        };
        // `any` carries no type information worth showing
        if definition.is_any_only() {
            return Ok(None);
        }
        return Ok(Some(Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value: format!("`{}`\n\n{}", definition.name, definition.documentation),
            }),
            range: Some(key.range),
        }));
    }
    Ok(None)
}

pub fn hover(context: &BindContext, template: &BindingTemplate) -> Option<Hover> {
    let position = context.position?;
    match try_hover(context, template, position) {
        Ok(found) => found,
        Err(err) => {
            tracing::debug!("binding hover aborted: {:#}", err);
            None
        }
    }
}
