mod support;

use bindinfo_core::{BindContext, BindingConfig, BindingIssue, IssueKind, Messages, Severity, validate};
use tower_lsp::lsp_types::{Position, Range};

fn r(sc: u32, ec: u32) -> Range {
    Range::new(Position::new(0, sc), Position::new(0, ec))
}

fn issues(text: &str) -> Vec<BindingIssue> {
    let metadata = support::metadata();
    let config = BindingConfig::default();
    let template = support::parse(text);
    let ctx = BindContext::new(&metadata, text, &config);
    validate(&ctx, &template)
}

fn list_issues(text: &str) -> Vec<BindingIssue> {
    let metadata = support::metadata();
    let config = BindingConfig::default();
    let aggregation = support::list_aggregation();
    let template = support::parse(text);
    let ctx = BindContext::new(&metadata, text, &config).with_aggregation(&aggregation);
    validate(&ctx, &template)
}

fn kinds(issues: &[BindingIssue]) -> Vec<IssueKind> {
    issues.iter().map(|i| i.kind).collect()
}

#[test]
fn valid_bindings_produce_nothing() {
    assert!(issues("{ path: '/name', model: 'i18n', suspended: false }").is_empty());
    assert!(issues("{ parts: ['a', { path: 'b', type: 'sap.ui.model.type.Float' }] }").is_empty());
    assert!(issues("{ type: 'my.custom.Type', formatOptions: { style: 'short' } }").is_empty());
    assert!(issues("{}").is_empty());
}

#[test]
fn simple_paths_and_expressions_are_skipped() {
    assert!(issues("{/products}").is_empty());
    assert!(issues("{i18n>title}").is_empty());
    assert!(issues("{firstName} {lastName}").is_empty());
    assert!(issues("{= 1 + 2 }").is_empty());
}

#[test]
fn type_mismatch_lists_accepted_shapes() {
    let found = issues("{ type: 25 }");
    assert_eq!(kinds(&found), [IssueKind::MissMatchValue]);
    assert_eq!(found[0].range, r(8, 10));
    assert!(found[0].message.contains("{ }"));
    assert!(found[0].message.contains("' '"));
    assert_eq!(found[0].severity, Severity::Error);
}

#[test]
fn fixed_literals_are_enforced() {
    let found = issues("{ mode: 'Sometimes' }");
    assert_eq!(kinds(&found), [IssueKind::MissMatchValue]);
    assert!(found[0].message.contains("'sap.ui.model.BindingMode.OneWay'"));

    let found = issues("{ suspended: 'yes' }");
    assert_eq!(found[0].message, "Allowed values are true or false");
}

#[test]
fn exclusive_keys_are_flagged_once_each() {
    let found = issues("{ parts: [''], path: '', value: '' }");
    assert_eq!(kinds(&found), [IssueKind::NotAllowedProperty; 3]);
    assert_eq!(found[0].range, r(2, 7));
    assert_eq!(found[1].range, r(15, 19));
    assert_eq!(found[2].range, r(25, 30));
    assert_eq!(found[0].message, "`parts` is not allowed together with `path` or `value`");
}

#[test]
fn duplicated_keys_report_every_repeat() {
    let found = issues("{ path: 'a', path: 'b', path: 'c' }");
    assert_eq!(kinds(&found), [IssueKind::DuplicateProperty; 2]);
    assert_eq!(found[0].range, r(13, 17));
    assert_eq!(found[1].range, r(24, 28));
}

#[test]
fn format_options_require_a_type() {
    let found = issues("{ formatOptions: {} }");
    assert_eq!(kinds(&found), [IssueKind::RequiredDependency]);
    assert_eq!(found[0].range, r(2, 15));
    assert_eq!(found[0].message, "`formatOptions` requires `type` to be defined");
}

#[test]
fn nested_parts_are_recursive_not_unknown() {
    let found = issues("{ parts: [{ parts: [] }] }");
    assert_eq!(kinds(&found), [IssueKind::RecursiveProperty]);
    assert_eq!(found[0].range, r(12, 17));
}

#[test]
fn unknown_keys_are_reported() {
    let found = issues("{ pathh: 'a' }");
    assert_eq!(kinds(&found), [IssueKind::UnknownPropertyBindingInfo]);
    assert_eq!(found[0].message, "Unknown property binding info `pathh`");
}

#[test]
fn structural_problems() {
    let found = issues("{ path:: 'a' }");
    assert_eq!(kinds(&found), [IssueKind::TooManyColons]);
    assert_eq!(found[0].range, r(7, 8));

    let found = issues("{ path: 'a',,, model: 'm' }");
    assert_eq!(kinds(&found), [IssueKind::TooManyCommas]);
    assert_eq!(found[0].range, r(12, 14));

    let found = issues("{ path: 'a'");
    assert_eq!(kinds(&found), [IssueKind::MissingBracket]);
    assert_eq!(found[0].message, "Expected `}`");
    assert_eq!(found[0].range, r(0, 1));
    assert_eq!(found[0].severity, Severity::Info);

    let found = issues("{ parts: ['a' }");
    assert_eq!(kinds(&found), [IssueKind::MissingBracket]);
    assert_eq!(found[0].message, "Expected `]`");
}

#[test]
fn lexer_errors_win_over_syntax_errors() {
    let found = issues("{ path: 'a' # }");
    assert_eq!(kinds(&found), [IssueKind::UnknownChar]);
    assert_eq!(found[0].message, "Unknown character `#`");

    let found = issues("{ path: 'a' = }");
    assert_eq!(kinds(&found), [IssueKind::Syntax]);
    assert_eq!(found[0].range, r(12, 13));
}

#[test]
fn sorter_requires_a_path_in_list_scope() {
    let found = list_issues("{ path: '/items', sorter: { descending: true } }");
    assert_eq!(kinds(&found), [IssueKind::MandatoryProperty]);
    assert_eq!(found[0].range, r(26, 27));
    assert_eq!(found[0].message, "Required property `path` is missing");

    assert!(list_issues("{ path: '/items', sorter: [{ path: 'name' }, { path: 'age', descending: true }] }").is_empty());
}

#[test]
fn object_or_string_requirement_is_met_by_any_sibling() {
    let metadata = support::grouping_metadata();
    let config = BindingConfig::default();
    let aggregation = support::list_aggregation();
    let check = |text: &str| {
        let template = support::parse(text);
        let ctx = BindContext::new(&metadata, text, &config).with_aggregation(&aggregation);
        validate(&ctx, &template)
    };

    assert!(check("{ path: '/items', sorter: { path: 'name' } }").is_empty());
    assert!(check("{ path: '/items', sorter: { group: 'category' } }").is_empty());

    let found = check("{ path: '/items', sorter: { } }");
    assert_eq!(kinds(&found), [IssueKind::MandatoryProperty]);
    assert_eq!(found[0].range, r(26, 27));
    assert_eq!(found[0].message, "Required property `group` is missing");
}

#[test]
fn filters_follow_nested_references() {
    assert!(list_issues("{ path: '/items', filters: { filters: [{ path: 'b', operator: 'EQ', value1: 1 }] } }").is_empty());

    let found = list_issues("{ path: '/items', filters: [{ path: 'a', operator: 'XX' }] }");
    assert_eq!(kinds(&found), [IssueKind::MissMatchValue]);
    assert!(found[0].message.contains("'Contains'"));
}

#[test]
fn property_only_keys_are_unknown_in_list_scope() {
    let found = list_issues("{ path: '/items', parts: [] }");
    assert_eq!(kinds(&found), [IssueKind::UnknownPropertyBindingInfo]);
}

#[test]
fn messages_can_be_localized() {
    let metadata = support::metadata();
    let config = BindingConfig::default();
    let messages = Messages::from_json(r#"{ "DUPLICATE_PROPERTY": "Eigenschaft `{0}` doppelt" }"#).unwrap();
    let text = "{ path: 'a', path: 'b' }";
    let template = support::parse(text);
    let ctx = BindContext::new(&metadata, text, &config).with_messages(&messages);
    let found = validate(&ctx, &template);
    assert_eq!(found[0].message, "Eigenschaft `path` doppelt");
}
