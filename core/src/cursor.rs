//! Classifies where the cursor sits inside one binding structure.

use tower_lsp::lsp_types::{Position, Range};

use crate::ast::{StructureElement, StructureValue, Token, Value};
use crate::range::{is_right_after, is_right_before, range_contains, range_strictly_contains};
use crate::schema::{BindingInfoElement, find_element, resolve_nested};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CursorContext<'a> {
    /// Nothing typed yet.
    Initial,
    /// `{ }` without elements.
    Empty,
    Key(&'a StructureElement),
    Value(&'a StructureElement),
    /// A new `key: value` pair is expected; carries the element the guess was anchored on.
    KeyValue(Option<&'a StructureElement>),
    Colon(&'a StructureElement),
    Unknown,
}

impl CursorContext<'_> {
    pub fn label(&self) -> &'static str {
        match self {
            CursorContext::Initial => "initial",
            CursorContext::Empty => "empty",
            CursorContext::Key(_) => "key",
            CursorContext::Value(_) => "value",
            CursorContext::KeyValue(_) => "key-value",
            CursorContext::Colon(_) => "colon",
            CursorContext::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Key,
    Colon,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// The whitespace follows the anchor.
    After,
    /// The whitespace precedes the anchor.
    Before,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Inferred {
    Colon,
    Value,
    KeyValue,
}

struct Rule {
    anchor: Anchor,
    direction: Direction,
    /// Only applies while the element has no colon yet.
    requires_missing_colon: bool,
    result: Inferred,
}

/// Heuristics for malformed input, tested top to bottom. "After key" comes
/// before "before key" so the boundary between two broken entries resolves
/// to the missing colon of the first one.
const WHITESPACE_RULES: &[Rule] = &[
    Rule {
        anchor: Anchor::Key,
        direction: Direction::After,
        requires_missing_colon: true,
        result: Inferred::Colon,
    },
    Rule {
        anchor: Anchor::Key,
        direction: Direction::Before,
        requires_missing_colon: false,
        result: Inferred::KeyValue,
    },
    Rule {
        anchor: Anchor::Colon,
        direction: Direction::After,
        requires_missing_colon: false,
        result: Inferred::Value,
    },
    Rule {
        anchor: Anchor::Value,
        direction: Direction::After,
        requires_missing_colon: false,
        result: Inferred::KeyValue,
    },
];

fn anchor_range(element: &StructureElement, anchor: Anchor) -> Option<Range> {
    match anchor {
        Anchor::Key => element.key.as_ref().map(|k| k.range),
        Anchor::Colon => element.colon.as_ref().map(|c| c.range),
        Anchor::Value => element.value.as_ref().map(|v| v.range()),
    }
}

fn apply_rule<'a>(rule: &Rule, space: &Range, elements: &'a [StructureElement]) -> Option<CursorContext<'a>> {
    for element in elements {
        if rule.requires_missing_colon && element.colon.is_some() {
            continue;
        }
        let Some(anchor) = anchor_range(element, rule.anchor) else {
            continue;
        };
        let adjacent = match rule.direction {
            Direction::After => is_right_after(&anchor, space),
            Direction::Before => is_right_before(&anchor, space),
        };
        if adjacent {
            return Some(match rule.result {
                Inferred::Colon => CursorContext::Colon(element),
                Inferred::Value => CursorContext::Value(element),
                Inferred::KeyValue => CursorContext::KeyValue(Some(element)),
            });
        }
    }
    None
}

fn direct_containment(position: Position, structure: &StructureValue) -> Option<CursorContext<'_>> {
    let element = structure
        .elements
        .iter()
        .find(|e| range_contains(&e.range, position))?;
    if element.key.as_ref().is_some_and(|k| range_contains(&k.range, position)) {
        return Some(CursorContext::Key(element));
    }
    if element.colon.as_ref().is_some_and(|c| range_contains(&c.range, position)) {
        return Some(CursorContext::Colon(element));
    }
    if element.value.as_ref().is_some_and(|v| range_contains(&v.range(), position)) {
        return Some(CursorContext::Value(element));
    }
    None
}

/// Map a cursor position to exactly one context. Never panics; `Unknown`
/// covers everything the rules cannot place.
pub fn classify<'a>(
    position: Position,
    structure: &'a StructureValue,
    spaces: &[Token],
    text: &str,
    inside_collection: bool,
) -> CursorContext<'a> {
    if text.trim().is_empty() && !inside_collection {
        return CursorContext::Initial;
    }
    if structure.elements.is_empty() {
        return CursorContext::Empty;
    }
    if let Some(ctx) = direct_containment(position, structure) {
        return ctx;
    }

    let space = spaces.iter().find(|s| range_contains(&s.range, position));
    if let Some(space) = space {
        for rule in WHITESPACE_RULES {
            if let Some(ctx) = apply_rule(rule, &space.range, &structure.elements) {
                return ctx;
            }
        }
    }

    let comma = structure.commas.iter().find(|c| {
        range_contains(&c.range, position) || space.is_some_and(|s| c.range.start == s.range.end)
    });
    if comma.is_some() {
        return CursorContext::KeyValue(None);
    }

    CursorContext::Unknown
}

/// Innermost structure around a cursor together with the element list that
/// describes it, if any.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'s, 'a> {
    pub structure: &'s StructureValue,
    pub schema: Option<&'a [BindingInfoElement]>,
    /// The structure is an item of a collection.
    pub inside_collection: bool,
}

/// Descend from a binding's top-level structure into the innermost nested
/// object that strictly contains `position`, resolving its schema on the way.
pub fn innermost_scope<'s, 'a>(
    structure: &'s StructureValue,
    root: &'a [BindingInfoElement],
    position: Position,
    max_depth: usize,
) -> anyhow::Result<Scope<'s, 'a>> {
    let mut scope = Scope {
        structure,
        schema: Some(root),
        inside_collection: false,
    };
    loop {
        let mut next = None;
        for element in &scope.structure.elements {
            let Some(value) = &element.value else {
                continue;
            };
            if !range_strictly_contains(&value.range(), position) {
                continue;
            }
            let definition = match (scope.schema, element.key_text()) {
                (Some(schema), Some(key)) => find_element(schema, key),
                _ => None,
            };
            match value {
                Value::Structure(s) => {
                    let shape = definition.and_then(|d| d.types.iter().find(|t| t.accepts(value)));
                    let schema = match shape {
                        Some(shape) => resolve_nested(root, shape, max_depth)?,
                        None => None,
                    };
                    next = Some(Scope {
                        structure: s,
                        schema,
                        inside_collection: false,
                    });
                }
                Value::Collection(c) => {
                    for item in &c.elements {
                        let Value::Structure(s) = item else {
                            continue;
                        };
                        if !range_strictly_contains(&s.range, position) {
                            continue;
                        }
                        let shape = definition.and_then(|d| d.types.iter().find(|t| t.accepts_item(item)));
                        let schema = match shape {
                            Some(shape) => resolve_nested(root, shape, max_depth)?,
                            None => None,
                        };
                        next = Some(Scope {
                            structure: s,
                            schema,
                            inside_collection: true,
                        });
                        break;
                    }
                }
                Value::Primitive(_) => {}
            }
            break;
        }
        match next {
            Some(inner) => scope = inner,
            None => return Ok(scope),
        }
    }
}
