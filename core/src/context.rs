use tower_lsp::lsp_types::Position;

use crate::config::BindingConfig;
use crate::i18n::Messages;
use crate::metadata::{Aggregation, FrameworkMetadata};

/// Quote character used for string literals inside a binding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuoteStyle {
    #[default]
    Single,
    Double,
}

impl QuoteStyle {
    /// Strings inside the binding use the quote the attribute itself does not.
    pub fn from_attribute_delimiter(delimiter: char) -> Self {
        match delimiter {
            '\'' => QuoteStyle::Double,
            _ => QuoteStyle::Single,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }

    pub fn quote(&self, text: &str) -> String {
        let q = self.as_char();
        format!("{q}{text}{q}")
    }
}

/// Ambient data for a single editor request.
#[derive(Debug, Clone, Copy)]
pub struct BindContext<'a> {
    pub metadata: &'a FrameworkMetadata,
    /// Raw attribute value the template was parsed from.
    pub text: &'a str,
    pub position: Option<Position>,
    pub aggregation: Option<&'a Aggregation>,
    pub quote: QuoteStyle,
    pub messages: &'a Messages,
    pub config: &'a BindingConfig,
}

impl<'a> BindContext<'a> {
    pub fn new(metadata: &'a FrameworkMetadata, text: &'a str, config: &'a BindingConfig) -> Self {
        Self {
            metadata,
            text,
            position: None,
            aggregation: None,
            quote: QuoteStyle::default(),
            messages: Messages::english(),
            config,
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_aggregation(mut self, aggregation: &'a Aggregation) -> Self {
        self.aggregation = Some(aggregation);
        self
    }

    pub fn with_attribute_delimiter(mut self, delimiter: char) -> Self {
        self.quote = QuoteStyle::from_attribute_delimiter(delimiter);
        self
    }

    pub fn with_messages(mut self, messages: &'a Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Aggregation scope is active when the aggregation's element type is a known class.
    pub fn in_aggregation_scope(&self) -> bool {
        self.aggregation
            .and_then(|a| a.type_name.as_deref())
            .is_some_and(|t| self.metadata.class(t).is_some())
    }
}
