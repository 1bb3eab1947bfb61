//! Message catalog. Callers construct one per host process and pass it in
//! through [`crate::context::BindContext`]; nothing here is global except the
//! built-in English default.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    MissingColon,
    TooManyColons,
    MissingValue,
    MissingComma,
    TooManyCommas,
    TrailingComma,
    MissingBracket,
    Syntax,
    UnknownChar,
    UnknownProperty,
    AllowedValues,
    NotAllowedProperty,
    DuplicateProperty,
    RequiredDependency,
    RequiredDependencyValue,
    RecursiveProperty,
    MandatoryProperty,
    Or,
    DocType,
    DocDescription,
    DocVisibility,
    DocOptional,
    PropertyBindingDetail,
    ExpressionBindingDetail,
    OneTimeExpressionDetail,
}

impl MessageKey {
    /// Stable identifier used as the key in catalog override files.
    pub fn id(&self) -> &'static str {
        match self {
            MessageKey::MissingColon => "MISSING_COLON",
            MessageKey::TooManyColons => "TOO_MANY_COLONS",
            MessageKey::MissingValue => "MISSING_VALUE",
            MessageKey::MissingComma => "MISSING_COMMA",
            MessageKey::TooManyCommas => "TOO_MANY_COMMAS",
            MessageKey::TrailingComma => "TRAILING_COMMA",
            MessageKey::MissingBracket => "MISSING_BRACKET",
            MessageKey::Syntax => "SYNTAX",
            MessageKey::UnknownChar => "UNKNOWN_CHAR",
            MessageKey::UnknownProperty => "UNKNOWN_PROPERTY_BINDING_INFO",
            MessageKey::AllowedValues => "ALLOWED_VALUES",
            MessageKey::NotAllowedProperty => "NOT_ALLOWED_PROPERTY",
            MessageKey::DuplicateProperty => "DUPLICATE_PROPERTY",
            MessageKey::RequiredDependency => "REQUIRED_DEPENDENCY",
            MessageKey::RequiredDependencyValue => "REQUIRED_DEPENDENCY_VALUE",
            MessageKey::RecursiveProperty => "RECURSIVE_PROPERTY",
            MessageKey::MandatoryProperty => "MANDATORY_PROPERTY",
            MessageKey::Or => "OR",
            MessageKey::DocType => "DOC_TYPE",
            MessageKey::DocDescription => "DOC_DESCRIPTION",
            MessageKey::DocVisibility => "DOC_VISIBILITY",
            MessageKey::DocOptional => "DOC_OPTIONAL",
            MessageKey::PropertyBindingDetail => "PROPERTY_BINDING_DETAIL",
            MessageKey::ExpressionBindingDetail => "EXPRESSION_BINDING_DETAIL",
            MessageKey::OneTimeExpressionDetail => "ONE_TIME_EXPRESSION_DETAIL",
        }
    }

    fn english(&self) -> &'static str {
        match self {
            MessageKey::MissingColon => "Expected colon after `{0}`",
            MessageKey::TooManyColons => "Too many colons",
            MessageKey::MissingValue => "Expected a value for `{0}`",
            MessageKey::MissingComma => "Missing comma",
            MessageKey::TooManyCommas => "Too many commas",
            MessageKey::TrailingComma => "Trailing comma",
            MessageKey::MissingBracket => "Expected `{0}`",
            MessageKey::Syntax => "Syntax error: {0}",
            MessageKey::UnknownChar => "Unknown character `{0}`",
            MessageKey::UnknownProperty => "Unknown property binding info `{0}`",
            MessageKey::AllowedValues => "Allowed values are {0}",
            MessageKey::NotAllowedProperty => "`{0}` is not allowed together with {1}",
            MessageKey::DuplicateProperty => "Duplicate property `{0}`",
            MessageKey::RequiredDependency => "`{1}` requires `{0}` to be defined",
            MessageKey::RequiredDependencyValue => "`{1}` is allowed only when `{0}` is defined as {2}",
            MessageKey::RecursiveProperty => "Recursive composite bindings are not allowed: `{0}` cannot be nested",
            MessageKey::MandatoryProperty => "Required property `{0}` is missing",
            MessageKey::Or => "or",
            MessageKey::DocType => "Type",
            MessageKey::DocDescription => "Description",
            MessageKey::DocVisibility => "Visibility",
            MessageKey::DocOptional => "Optional",
            MessageKey::PropertyBindingDetail => "property binding info",
            MessageKey::ExpressionBindingDetail => "expression binding",
            MessageKey::OneTimeExpressionDetail => "one-time expression binding",
        }
    }
}

static ENGLISH: Lazy<Messages> = Lazy::new(Messages::default);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Messages {
    overrides: FxHashMap<String, String>,
}

impl Messages {
    pub fn english() -> &'static Messages {
        &ENGLISH
    }

    /// Load a catalog of `{ "KEY_ID": "template" }` pairs. Missing keys fall back to English.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn text(&self, key: MessageKey, args: &[&str]) -> String {
        let template = self
            .overrides
            .get(key.id())
            .map(String::as_str)
            .unwrap_or_else(|| key.english());
        let mut out = template.to_string();
        for (i, arg) in args.iter().enumerate() {
            out = out.replace(&format!("{{{}}}", i), arg);
        }
        out
    }

    /// Join alternatives with the localized "or".
    pub fn join_alternatives(&self, items: &[String]) -> String {
        match items.len() {
            0 => String::new(),
            1 => items[0].clone(),
            _ => {
                let head = &items[..items.len() - 1];
                let last = &items[items.len() - 1];
                format!("{} {} {}", head.join(", "), self.text(MessageKey::Or, &[]), last)
            }
        }
    }
}
