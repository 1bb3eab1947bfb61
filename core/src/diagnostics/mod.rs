//! Range-anchored issues for property binding info literals.
//!
//! Each binding literal goes through a skeleton pass (colons, values, commas,
//! brackets, duplicates) and, where a schema applies, a semantic pass. Lexer
//! errors always surface; parser errors only when nothing more specific was
//! found.

use serde::Serialize;
use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString, Range};

use crate::ast::{Binding, BindingKind, BindingTemplate, ParseError, StructureValue};
use crate::context::BindContext;
use crate::i18n::MessageKey;
use crate::range::range_contains_range;
use crate::schema::{BindingInfoElement, build_schema, find_element};

mod semantic;
mod skeleton;

pub const DIAGNOSTIC_SOURCE: &str = "binding";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IssueKind {
    MissingColon,
    TooManyColons,
    MissingValue,
    MissingComma,
    TooManyCommas,
    TrailingComma,
    MissingBracket,
    Syntax,
    UnknownChar,
    UnknownPropertyBindingInfo,
    MissMatchValue,
    NotAllowedProperty,
    DuplicateProperty,
    RequiredDependency,
    RecursiveProperty,
    MandatoryProperty,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::MissingColon => "MissingColon",
            IssueKind::TooManyColons => "TooManyColons",
            IssueKind::MissingValue => "MissingValue",
            IssueKind::MissingComma => "MissingComma",
            IssueKind::TooManyCommas => "TooManyCommas",
            IssueKind::TrailingComma => "TrailingComma",
            IssueKind::MissingBracket => "MissingBracket",
            IssueKind::Syntax => "Syntax",
            IssueKind::UnknownChar => "UnknownChar",
            IssueKind::UnknownPropertyBindingInfo => "UnknownPropertyBindingInfo",
            IssueKind::MissMatchValue => "MissMatchValue",
            IssueKind::NotAllowedProperty => "NotAllowedProperty",
            IssueKind::DuplicateProperty => "DuplicateProperty",
            IssueKind::RequiredDependency => "RequiredDependency",
            IssueKind::RecursiveProperty => "RecursiveProperty",
            IssueKind::MandatoryProperty => "MandatoryProperty",
        }
    }

    /// Structural findings are informational, everything else is an error.
    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::MissingColon
            | IssueKind::TooManyColons
            | IssueKind::MissingValue
            | IssueKind::MissingComma
            | IssueKind::TooManyCommas
            | IssueKind::TrailingComma
            | IssueKind::MissingBracket => Severity::Info,
            _ => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BindingIssue {
    pub kind: IssueKind,
    pub range: Range,
    pub message: String,
    pub severity: Severity,
}

impl BindingIssue {
    pub fn new(kind: IssueKind, range: Range, message: String) -> Self {
        Self {
            kind,
            range,
            message,
            severity: kind.severity(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let severity = match self.severity {
            Severity::Error => DiagnosticSeverity::ERROR,
            Severity::Info => DiagnosticSeverity::INFORMATION,
        };
        Diagnostic::new(
            self.range,
            Some(severity),
            Some(NumberOrString::String(self.kind.as_str().to_string())),
            Some(DIAGNOSTIC_SOURCE.to_string()),
            self.message.clone(),
            None,
            None,
        )
    }
}

/// Walks one binding literal and collects its issues.
pub(crate) struct Validator<'a> {
    pub(crate) context: &'a BindContext<'a>,
    pub(crate) root: &'a [BindingInfoElement],
    pub(crate) parse_errors: &'a [ParseError],
    pub(crate) issues: Vec<BindingIssue>,
}

impl<'a> Validator<'a> {
    fn new(context: &'a BindContext<'a>, root: &'a [BindingInfoElement], parse_errors: &'a [ParseError]) -> Self {
        Self {
            context,
            root,
            parse_errors,
            issues: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, kind: IssueKind, range: Range, key: MessageKey, args: &[&str]) {
        let message = self.context.messages.text(key, args);
        self.issues.push(BindingIssue::new(kind, range, message));
    }

    fn validate_binding(mut self, binding: &StructureValue) -> anyhow::Result<Vec<BindingIssue>> {
        let root = self.root;
        self.check_structure(binding, Some(root), false)?;
        self.check_not_allowed(binding, root);
        self.check_recursive_parts(binding);
        Ok(self.issues)
    }
}

/// `{/path}`, `{model>path}` or `{name}`: a lone key without colon or value
/// that is not itself a binding info property.
fn is_simple_path_binding(structure: &StructureValue, schema: &[BindingInfoElement]) -> bool {
    match structure.elements.as_slice() {
        [only] => {
            only.colon.is_none()
                && only.value.is_none()
                && only.key.as_ref().is_some_and(|k| find_element(schema, &k.text).is_none())
        }
        _ => false,
    }
}

fn validate_one(
    context: &BindContext,
    template: &BindingTemplate,
    schema: &[BindingInfoElement],
    binding: &Binding,
) -> anyhow::Result<Vec<BindingIssue>> {
    let structure = &binding.structure;
    let mut issues = Vec::new();

    if !structure.elements.is_empty() {
        for err in template
            .errors
            .lexer
            .iter()
            .filter(|e| range_contains_range(&structure.range, &e.range))
        {
            let message = context.messages.text(MessageKey::UnknownChar, &[&err.text]);
            issues.push(BindingIssue::new(IssueKind::UnknownChar, err.range, message));
        }
    }

    let parse_errors: Vec<ParseError> = template
        .errors
        .parse
        .iter()
        .filter(|e| range_contains_range(&structure.range, &e.range))
        .cloned()
        .collect();
    let validator = Validator::new(context, schema, &parse_errors);
    issues.extend(validator.validate_binding(structure)?);

    if issues.is_empty() {
        if let Some(first) = parse_errors.first() {
            let message = context.messages.text(MessageKey::Syntax, &[&first.message]);
            issues.push(BindingIssue::new(IssueKind::Syntax, first.range, message));
        }
    }
    Ok(issues)
}

fn try_validate(context: &BindContext, template: &BindingTemplate) -> anyhow::Result<Vec<BindingIssue>> {
    let schema = build_schema(context, context.aggregation);
    let mut issues = Vec::new();
    for binding in &template.bindings {
        if binding.kind == BindingKind::Expression || is_simple_path_binding(&binding.structure, &schema) {
            continue;
        }
        issues.extend(validate_one(context, template, &schema, binding)?);
    }
    Ok(issues)
}

/// Issues for every binding literal in `template`, in document order per
/// binding. Internal failures yield an empty list.
pub fn validate(context: &BindContext, template: &BindingTemplate) -> Vec<BindingIssue> {
    if !context.config.validation_enabled {
        return Vec::new();
    }
    match try_validate(context, template) {
        Ok(mut issues) => {
            issues.truncate(context.config.max_issues);
            issues
        }
        Err(err) => {
            tracing::debug!("binding validation aborted: {:#}", err);
            Vec::new()
        }
    }
}

pub fn validate_to_diagnostics(context: &BindContext, template: &BindingTemplate) -> Vec<Diagnostic> {
    validate(context, template).iter().map(BindingIssue::to_diagnostic).collect()
}
