//! Test helpers: a small tolerant parser for binding literals and the
//! metadata fixture.
#![allow(dead_code)]

use bindinfo_core::ast::{
    Binding, BindingKind, BindingTemplate, CollectionValue, Key, LexerError, ParseError, PrimitiveKind,
    PrimitiveValue, StructureElement, StructureValue, TemplateErrors, Token, Value,
};
use bindinfo_core::metadata::{Aggregation, FrameworkMetadata};
use tower_lsp::lsp_types::{Position, Range};

pub const METADATA_JSON: &str = include_str!("../fixtures/metadata.json");

pub fn metadata() -> FrameworkMetadata {
    FrameworkMetadata::from_json(METADATA_JSON).expect("metadata fixture")
}

/// Snapshot whose sorter requires a `group` that is either an object or a string.
pub fn grouping_metadata() -> FrameworkMetadata {
    FrameworkMetadata::from_json(include_str!("../fixtures/grouping_metadata.json")).expect("grouping fixture")
}

pub fn list_aggregation() -> Aggregation {
    Aggregation {
        name: "items".to_string(),
        type_name: Some("sap.m.ListItemBase".to_string()),
    }
}

/// Position of the first `|` marker in `marked`, and the text without it.
pub fn cursor(marked: &str) -> (String, Position) {
    let index = marked.find('|').expect("cursor marker");
    let before = &marked[..index];
    let line = before.matches('\n').count() as u32;
    let column = before.rsplit('\n').next().unwrap_or("").encode_utf16().count() as u32;
    let text = format!("{}{}", before, &marked[index + 1..]);
    (text, Position::new(line, column))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    LeftCurly,
    RightCurly,
    LeftSquare,
    RightSquare,
    Colon,
    Comma,
    Equals,
    Str,
    Num,
    Bool,
    Null,
    Ident,
    Space,
}

#[derive(Debug, Clone)]
struct Lexeme {
    kind: Kind,
    /// Unquoted for strings.
    text: String,
    raw: String,
    range: Range,
}

impl Lexeme {
    fn token(&self) -> Token {
        Token::new(self.raw.clone(), self.range)
    }
}

fn is_ident(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$' | '/' | '>' | '.' | '-')
}

fn lex(text: &str) -> (Vec<Lexeme>, Vec<LexerError>) {
    let chars: Vec<char> = text.chars().collect();
    let mut positions = Vec::with_capacity(chars.len() + 1);
    let (mut line, mut column) = (0u32, 0u32);
    for &c in &chars {
        positions.push(Position::new(line, column));
        if c == '\n' {
            line += 1;
            column = 0;
        } else {
            column += c.len_utf16() as u32;
        }
    }
    positions.push(Position::new(line, column));
    let span = |start: usize, end: usize| Range::new(positions[start], positions[end]);

    let mut lexemes = Vec::new();
    let mut errors = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let start = i;
        let c = chars[i];
        let kind = match c {
            c if c.is_whitespace() => {
                while i < chars.len() && chars[i].is_whitespace() {
                    i += 1;
                }
                Kind::Space
            }
            '{' | '}' | '[' | ']' | ':' | ',' | '=' => {
                i += 1;
                match c {
                    '{' => Kind::LeftCurly,
                    '}' => Kind::RightCurly,
                    '[' => Kind::LeftSquare,
                    ']' => Kind::RightSquare,
                    ':' => Kind::Colon,
                    ',' => Kind::Comma,
                    _ => Kind::Equals,
                }
            }
            '\'' | '"' => {
                i += 1;
                while i < chars.len() && chars[i] != c {
                    i += 1;
                }
                if i < chars.len() {
                    i += 1;
                }
                Kind::Str
            }
            c if c.is_ascii_digit() || (c == '-' && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit())) => {
                i += 1;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                Kind::Num
            }
            c if is_ident(c) => {
                while i < chars.len() && is_ident(chars[i]) {
                    i += 1;
                }
                match chars[start..i].iter().collect::<String>().as_str() {
                    "true" | "false" => Kind::Bool,
                    "null" => Kind::Null,
                    _ => Kind::Ident,
                }
            }
            _ => {
                i += 1;
                errors.push(LexerError {
                    text: c.to_string(),
                    range: span(start, i),
                    message: format!("unexpected character `{c}`"),
                });
                continue;
            }
        };
        let raw: String = chars[start..i].iter().collect();
        let text = if kind == Kind::Str {
            let inner: Vec<char> = raw.chars().collect();
            let closed = inner.len() >= 2 && inner[inner.len() - 1] == inner[0];
            let end = if closed { inner.len() - 1 } else { inner.len() };
            inner[1..end].iter().collect()
        } else {
            raw.clone()
        };
        lexemes.push(Lexeme {
            kind,
            text,
            raw,
            range: span(start, i),
        });
    }
    (lexemes, errors)
}

struct Parser {
    tokens: Vec<Lexeme>,
    pos: usize,
    errors: Vec<ParseError>,
}

impl Parser {
    fn peek(&self) -> Option<&Lexeme> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self, offset: usize) -> Option<Kind> {
        self.tokens.get(self.pos + offset).map(|t| t.kind)
    }

    fn bump(&mut self) -> Lexeme {
        let t = self.tokens[self.pos].clone();
        self.pos += 1;
        t
    }

    fn last_end(&self) -> Position {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(t) => t.range.end,
            None => Position::new(0, 0),
        }
    }

    fn unexpected(&mut self) {
        let t = self.bump();
        self.errors.push(ParseError {
            message: format!("unexpected `{}`", t.raw),
            range: t.range,
            token: Some(t.token()),
        });
    }

    fn is_expression_start(&self) -> bool {
        match (self.peek_kind(1), self.peek_kind(2)) {
            (Some(Kind::Equals), _) => true,
            (Some(Kind::Colon), Some(Kind::Equals)) => true,
            _ => false,
        }
    }

    fn expression(&mut self) -> StructureValue {
        let left = self.bump();
        let mut depth = 1;
        let mut right = None;
        while self.peek().is_some() {
            let t = self.bump();
            match t.kind {
                Kind::LeftCurly => depth += 1,
                Kind::RightCurly => {
                    depth -= 1;
                    if depth == 0 {
                        right = Some(t.token());
                        break;
                    }
                }
                _ => {}
            }
        }
        let end = right.as_ref().map_or_else(|| self.last_end(), |r: &Token| r.range.end);
        StructureValue {
            left_curly: Some(left.token()),
            right_curly: right,
            elements: Vec::new(),
            commas: Vec::new(),
            range: Range::new(left.range.start, end),
        }
    }

    fn structure(&mut self) -> StructureValue {
        let left = self.bump();
        let mut elements = Vec::new();
        let mut commas = Vec::new();
        let mut right = None;
        while let Some(kind) = self.peek_kind(0) {
            match kind {
                Kind::RightCurly => {
                    right = Some(self.bump().token());
                    break;
                }
                Kind::RightSquare => break,
                Kind::Comma => commas.push(self.bump().token()),
                Kind::Str | Kind::Ident | Kind::Num | Kind::Bool | Kind::Null => elements.push(self.element()),
                Kind::LeftCurly | Kind::LeftSquare => {
                    if let Some(value) = self.value() {
                        elements.push(StructureElement {
                            key: None,
                            colon: None,
                            range: value.range(),
                            value: Some(value),
                        });
                    }
                }
                Kind::Colon | Kind::Equals | Kind::Space => self.unexpected(),
            }
        }
        let end = right.as_ref().map_or_else(|| self.last_end(), |r: &Token| r.range.end);
        StructureValue {
            left_curly: Some(left.token()),
            right_curly: right,
            elements,
            commas,
            range: Range::new(left.range.start, end),
        }
    }

    fn element(&mut self) -> StructureElement {
        let k = self.bump();
        let key = Key {
            text: k.text.clone(),
            original_text: (k.kind == Kind::Str).then(|| k.raw.clone()),
            range: k.range,
        };
        let mut colon = None;
        let mut value = None;
        if self.peek_kind(0) == Some(Kind::Colon) {
            colon = Some(self.bump().token());
            while self.peek_kind(0) == Some(Kind::Colon) {
                self.unexpected();
            }
            value = self.value();
        }
        StructureElement {
            key: Some(key),
            colon,
            value,
            range: Range::new(k.range.start, self.last_end()),
        }
    }

    fn collection(&mut self) -> CollectionValue {
        let left = self.bump();
        let mut elements = Vec::new();
        let mut commas = Vec::new();
        let mut right = None;
        while let Some(kind) = self.peek_kind(0) {
            match kind {
                Kind::RightSquare => {
                    right = Some(self.bump().token());
                    break;
                }
                Kind::RightCurly => break,
                Kind::Comma => commas.push(self.bump().token()),
                Kind::LeftCurly | Kind::LeftSquare | Kind::Str | Kind::Num | Kind::Bool | Kind::Null => {
                    if let Some(v) = self.value() {
                        elements.push(v);
                    }
                }
                Kind::Colon | Kind::Equals | Kind::Ident | Kind::Space => self.unexpected(),
            }
        }
        let end = right.as_ref().map_or_else(|| self.last_end(), |r: &Token| r.range.end);
        CollectionValue {
            left_square: Some(left.token()),
            right_square: right,
            elements,
            commas,
            range: Range::new(left.range.start, end),
        }
    }

    fn value(&mut self) -> Option<Value> {
        let kind = self.peek_kind(0)?;
        let primitive = match kind {
            Kind::LeftCurly => return Some(Value::Structure(self.structure())),
            Kind::LeftSquare => return Some(Value::Collection(self.collection())),
            Kind::Str => PrimitiveKind::String,
            Kind::Num => PrimitiveKind::Number,
            Kind::Bool => PrimitiveKind::Boolean,
            Kind::Null => PrimitiveKind::Null,
            _ => return None,
        };
        let t = self.bump();
        Some(Value::Primitive(PrimitiveValue {
            kind: primitive,
            text: t.text,
            range: t.range,
        }))
    }
}

/// Parse every `{ ... }` literal in an attribute value. Text outside the
/// braces is skipped.
pub fn parse(text: &str) -> BindingTemplate {
    let (lexemes, lexer) = lex(text);
    let spaces: Vec<Token> = lexemes.iter().filter(|l| l.kind == Kind::Space).map(Lexeme::token).collect();
    let tokens: Vec<Lexeme> = lexemes.into_iter().filter(|l| l.kind != Kind::Space).collect();
    let mut parser = Parser {
        tokens,
        pos: 0,
        errors: Vec::new(),
    };
    let mut bindings = Vec::new();
    while let Some(kind) = parser.peek_kind(0) {
        if kind != Kind::LeftCurly {
            parser.pos += 1;
            continue;
        }
        let binding = if parser.is_expression_start() {
            Binding {
                kind: BindingKind::Expression,
                structure: parser.expression(),
            }
        } else {
            Binding {
                kind: BindingKind::PropertyBindingInfo,
                structure: parser.structure(),
            }
        };
        bindings.push(binding);
    }
    BindingTemplate {
        bindings,
        spaces,
        errors: TemplateErrors {
            lexer,
            parse: parser.errors,
        },
    }
}
