//! Semantic layer for UI5 property binding info literals: the schema of legal
//! keys and values, cursor classification, diagnostics, completion and hover.
//!
//! Tokenizing and parsing happen upstream; every entry point takes an
//! already parsed [`ast::BindingTemplate`] plus a [`context::BindContext`].

pub mod ast;
pub mod completion;
pub mod config;
pub mod context;
pub mod cursor;
pub mod diagnostics;
pub mod hover;
pub mod i18n;
pub mod metadata;
pub mod range;
pub mod schema;

pub use completion::complete;
pub use config::BindingConfig;
pub use context::{BindContext, QuoteStyle};
pub use diagnostics::{BindingIssue, IssueKind, Severity, validate};
pub use hover::hover;
pub use i18n::Messages;
pub use metadata::{Aggregation, FrameworkMetadata};
