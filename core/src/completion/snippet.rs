//! Snippet text for inserted keys and values.

use crate::context::QuoteStyle;
use crate::schema::{BindingInfoElement, PropertyKind, PropertyType};

/// Choice entries escape `\`, `,` and `|`.
fn escape_choice(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | ',' | '|') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

pub(crate) fn choice(index: usize, options: &[String]) -> String {
    let escaped: Vec<String> = options.iter().map(|o| escape_choice(o)).collect();
    format!("${{{}|{}|}}", index, escaped.join(","))
}

fn shape_default(shape: &PropertyType, quote: QuoteStyle) -> String {
    if let Some(pv) = shape.possible_value.as_ref().filter(|pv| pv.fixed && !shape.collection) {
        let rendered: Vec<String> = pv.values.iter().map(|v| v.render(quote)).collect();
        return choice(1, &rendered);
    }
    let q = quote.as_char();
    match (shape.kind, shape.collection) {
        (PropertyKind::String, false) => format!("{q}$1{q}"),
        (PropertyKind::Boolean, false) => choice(1, &["true".to_string(), "false".to_string()]),
        (PropertyKind::Integer, false) => "${1:0}".to_string(),
        (PropertyKind::Object, false) => "{ $1 }".to_string(),
        (PropertyKind::Any, false) => "$1".to_string(),
        (PropertyKind::String, true) => format!("[{q}$1{q}]"),
        (PropertyKind::Object, true) => "[{ $1 }]".to_string(),
        (_, true) => "[$1]".to_string(),
    }
}

/// Placeholder inserted after `name: `. Several shapes become a choice of
/// their renderings.
pub(crate) fn default_value(element: &BindingInfoElement, quote: QuoteStyle) -> String {
    let shapes: Vec<&PropertyType> = element
        .types
        .iter()
        .filter(|t| t.kind != PropertyKind::Any || t.collection)
        .collect();
    match shapes.as_slice() {
        [] => "$1".to_string(),
        [only] => shape_default(only, quote),
        many => {
            let mut options: Vec<String> = Vec::new();
            for shape in many {
                for rendering in shape.renderings(quote) {
                    if !options.contains(&rendering) {
                        options.push(rendering);
                    }
                }
            }
            choice(1, &options)
        }
    }
}

pub(crate) fn key_value(element: &BindingInfoElement, quote: QuoteStyle) -> String {
    format!("{}: {}", element.name, default_value(element, quote))
}

/// `{ key: value }` skeleton offered while the attribute is still empty.
pub(crate) fn initial_binding(schema: &[BindingInfoElement], quote: QuoteStyle) -> String {
    let keys: Vec<String> = schema.iter().map(|e| e.name.clone()).collect();
    let values = vec![
        quote.quote(" "),
        "{ }".to_string(),
        format!("[{}]", quote.quote(" ")),
        "true".to_string(),
    ];
    format!("{{ {}: {} }}", choice(1, &keys), choice(2, &values))
}

/// Literal stub for one shape, e.g. `[{ }]`, with the snippet that inserts it.
pub(crate) fn stub(kind: PropertyKind, collection: bool, quote: QuoteStyle) -> Option<(String, String)> {
    let q = quote.as_char();
    let pair = match (kind, collection) {
        (PropertyKind::Object, false) => ("{ }".to_string(), "{ $0 }".to_string()),
        (PropertyKind::Object, true) => ("[{ }]".to_string(), "[{ $0 }]".to_string()),
        (PropertyKind::String, false) => (quote.quote(" "), format!("{q}$0{q}")),
        (PropertyKind::String, true) => (format!("[{}]", quote.quote(" ")), format!("[{q}$0{q}]")),
        (PropertyKind::Integer, false) => ("0".to_string(), "${0:0}".to_string()),
        (PropertyKind::Integer, true) | (PropertyKind::Boolean, true) | (PropertyKind::Any, true) => {
            ("[ ]".to_string(), "[$0]".to_string())
        }
        (PropertyKind::Boolean, false) | (PropertyKind::Any, false) => return None,
    };
    Some(pair)
}
