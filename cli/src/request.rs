use std::path::Path;

use anyhow::Context;
use bindinfo_core::ast::BindingTemplate;
use bindinfo_core::metadata::{Aggregation, FrameworkMetadata};
use bindinfo_core::range::offset_to_position;
use bindinfo_core::{BindContext, BindingConfig, Messages};
use ropey::Rope;
use serde::Deserialize;
use tower_lsp::lsp_types::Position;

/// One editor request: the attribute text, its parsed template and the
/// metadata snapshot to check it against.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Request {
    pub text: String,
    #[serde(default)]
    pub template: BindingTemplate,
    #[serde(default)]
    pub metadata: FrameworkMetadata,
    #[serde(default)]
    pub position: Option<Position>,
    /// Char offset into `text`; used when `position` is absent.
    #[serde(default)]
    pub offset: Option<usize>,
    #[serde(default)]
    pub attribute_delimiter: Option<char>,
    #[serde(default)]
    pub aggregation: Option<Aggregation>,
}

impl Request {
    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = crate::read_file_content(path)?;
        let mut request: Request =
            serde_json::from_str(&raw).with_context(|| format!("Invalid request in '{}'", path.display()))?;
        request.metadata.reindex();
        Ok(request)
    }

    pub(crate) fn cursor(&self) -> Option<Position> {
        self.position
            .or_else(|| self.offset.map(|o| offset_to_position(&Rope::from_str(&self.text), o)))
    }

    pub(crate) fn context<'a>(&'a self, config: &'a BindingConfig, messages: &'a Messages) -> BindContext<'a> {
        let mut ctx = BindContext::new(&self.metadata, &self.text, config).with_messages(messages);
        if let Some(position) = self.cursor() {
            ctx = ctx.with_position(position);
        }
        if let Some(aggregation) = &self.aggregation {
            ctx = ctx.with_aggregation(aggregation);
        }
        if let Some(delimiter) = self.attribute_delimiter {
            ctx = ctx.with_attribute_delimiter(delimiter);
        }
        ctx
    }
}
