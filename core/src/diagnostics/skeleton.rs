//! Structural checks that need no schema: brackets, colons, commas and
//! duplicate keys.

use rustc_hash::FxHashSet;
use tower_lsp::lsp_types::Range;

use crate::ast::{CollectionValue, StructureElement, StructureValue, Token, Value};
use crate::i18n::MessageKey;
use crate::range::{cover, range_contains_range};

use super::{IssueKind, Validator};

impl Validator<'_> {
    pub(super) fn check_curly(&mut self, structure: &StructureValue) {
        if structure.left_curly.is_none() {
            let anchor = structure.right_curly.as_ref().map_or(structure.range, |t| t.range);
            self.push(IssueKind::MissingBracket, anchor, MessageKey::MissingBracket, &["{"]);
        }
        if structure.right_curly.is_none() {
            let anchor = structure.left_curly.as_ref().map_or(structure.range, |t| t.range);
            self.push(IssueKind::MissingBracket, anchor, MessageKey::MissingBracket, &["}"]);
        }
    }

    pub(super) fn check_square(&mut self, collection: &CollectionValue) {
        if collection.left_square.is_none() {
            let anchor = collection.right_square.as_ref().map_or(collection.range, |t| t.range);
            self.push(IssueKind::MissingBracket, anchor, MessageKey::MissingBracket, &["["]);
        }
        if collection.right_square.is_none() {
            let anchor = collection.left_square.as_ref().map_or(collection.range, |t| t.range);
            self.push(IssueKind::MissingBracket, anchor, MessageKey::MissingBracket, &["]"]);
        }
    }

    /// Every repeated key after its first use.
    pub(super) fn check_duplicates(&mut self, structure: &StructureValue) {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for element in &structure.elements {
            let Some(key) = &element.key else {
                continue;
            };
            if !seen.insert(key.text.as_str()) {
                self.push(
                    IssueKind::DuplicateProperty,
                    key.range,
                    MessageKey::DuplicateProperty,
                    &[&key.text],
                );
            }
        }
    }

    /// Commas between consecutive `items` (exactly one expected) and after
    /// the last one (none expected).
    pub(super) fn check_commas(&mut self, items: &[Range], commas: &[Token]) {
        let Some(last) = items.last() else {
            if let (Some(first), Some(end)) = (commas.first(), commas.last()) {
                self.push(
                    IssueKind::TrailingComma,
                    cover(&first.range, &end.range),
                    MessageKey::TrailingComma,
                    &[],
                );
            }
            return;
        };

        for pair in items.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            let between: Vec<&Token> = commas
                .iter()
                .filter(|c| c.range.start >= prev.end && c.range.end <= next.start)
                .collect();
            match between.as_slice() {
                [] => self.push(
                    IssueKind::MissingComma,
                    Range::new(prev.end, next.start),
                    MessageKey::MissingComma,
                    &[],
                ),
                [_] => {}
                [_, second] => self.push(IssueKind::TooManyCommas, second.range, MessageKey::TooManyCommas, &[]),
                [_, second, .., end] => self.push(
                    IssueKind::TooManyCommas,
                    cover(&second.range, &end.range),
                    MessageKey::TooManyCommas,
                    &[],
                ),
            }
        }

        let trailing: Vec<&Token> = commas.iter().filter(|c| c.range.start >= last.end).collect();
        if let (Some(first), Some(end)) = (trailing.first(), trailing.last()) {
            self.push(
                IssueKind::TrailingComma,
                cover(&first.range, &end.range),
                MessageKey::TrailingComma,
                &[],
            );
        }
    }

    /// Colons the parser rejected between this element's colon and the end
    /// of the element, reported once per element.
    pub(super) fn check_extra_colons(&mut self, element: &StructureElement, colon: &Token) {
        let errors = self.parse_errors;
        let extras: Vec<Range> = errors
            .iter()
            .filter(|e| e.token.as_ref().is_some_and(|t| t.text == ":"))
            .filter(|e| e.range.start >= colon.range.end && range_contains_range(&element.range, &e.range))
            .map(|e| e.range)
            .collect();
        if let (Some(first), Some(last)) = (extras.first(), extras.last()) {
            self.push(IssueKind::TooManyColons, cover(first, last), MessageKey::TooManyColons, &[]);
        }
    }

    /// Skeleton checks for a value no schema describes.
    pub(super) fn check_free_value(&mut self, value: &Value) -> anyhow::Result<()> {
        match value {
            Value::Structure(s) => self.check_structure(s, None, false),
            Value::Collection(c) => {
                self.check_collection_skeleton(c);
                for item in &c.elements {
                    self.check_free_value(item)?;
                }
                Ok(())
            }
            Value::Primitive(_) => Ok(()),
        }
    }

    pub(super) fn check_collection_skeleton(&mut self, collection: &CollectionValue) {
        self.check_square(collection);
        let items: Vec<Range> = collection.elements.iter().map(Value::range).collect();
        self.check_commas(&items, &collection.commas);
    }
}
