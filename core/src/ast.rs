//! Parsed binding literals as handed over by the tokenizer/parser.
//!
//! The library never builds or mutates these nodes; they arrive fully formed
//! (usually as JSON) together with the lexer and parser error lists.

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::Range;

/// A single lexical token with its source range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub range: Range,
}

impl Token {
    pub fn new(text: impl Into<String>, range: Range) -> Self {
        Self {
            text: text.into(),
            range,
        }
    }
}

/// Property name of a structure element. `text` is unquoted, `original_text`
/// keeps the quotes when the author wrote them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Key {
    pub text: String,
    #[serde(default)]
    pub original_text: Option<String>,
    pub range: Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrimitiveKind {
    String,
    Boolean,
    Number,
    Null,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveValue {
    pub kind: PrimitiveKind,
    /// Literal text without surrounding quotes.
    pub text: String,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureValue {
    #[serde(default)]
    pub left_curly: Option<Token>,
    #[serde(default)]
    pub right_curly: Option<Token>,
    #[serde(default)]
    pub elements: Vec<StructureElement>,
    #[serde(default)]
    pub commas: Vec<Token>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionValue {
    #[serde(default)]
    pub left_square: Option<Token>,
    #[serde(default)]
    pub right_square: Option<Token>,
    #[serde(default)]
    pub elements: Vec<Value>,
    #[serde(default)]
    pub commas: Vec<Token>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Value {
    Structure(StructureValue),
    Collection(CollectionValue),
    Primitive(PrimitiveValue),
}

impl Value {
    pub fn range(&self) -> Range {
        match self {
            Value::Structure(s) => s.range,
            Value::Collection(c) => c.range,
            Value::Primitive(p) => p.range,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureElement {
    #[serde(default)]
    pub key: Option<Key>,
    #[serde(default)]
    pub colon: Option<Token>,
    #[serde(default)]
    pub value: Option<Value>,
    pub range: Range,
}

impl StructureElement {
    pub fn key_text(&self) -> Option<&str> {
        self.key.as_ref().map(|k| k.text.as_str())
    }
}

impl StructureValue {
    /// Keys used at this nesting level, in document order.
    pub fn used_keys(&self) -> Vec<&str> {
        self.elements.iter().filter_map(StructureElement::key_text).collect()
    }

    pub fn element_by_key(&self, name: &str) -> Option<&StructureElement> {
        self.elements.iter().find(|e| e.key_text() == Some(name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexerError {
    pub text: String,
    pub range: Range,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseError {
    pub message: String,
    pub range: Range,
    /// The offending token when the parser could name one.
    #[serde(default)]
    pub token: Option<Token>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateErrors {
    #[serde(default)]
    pub lexer: Vec<LexerError>,
    #[serde(default)]
    pub parse: Vec<ParseError>,
}

/// Opener of an embedded literal: a plain `{` property binding info, or an
/// expression binding (`{=` / `{:=`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BindingKind {
    #[default]
    PropertyBindingInfo,
    Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    #[serde(default)]
    pub kind: BindingKind,
    pub structure: StructureValue,
}

/// Every binding literal found in one attribute value plus the shared
/// whitespace token list and accumulated errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BindingTemplate {
    #[serde(default)]
    pub bindings: Vec<Binding>,
    #[serde(default)]
    pub spaces: Vec<Token>,
    #[serde(default)]
    pub errors: TemplateErrors,
}
