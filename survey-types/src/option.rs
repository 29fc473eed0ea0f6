use crate::OptionId;

/// The display text of an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionText {
    /// Text shown verbatim.
    Plain(String),

    /// An HTML fragment that passed markup validation.
    Markup(String),
}

impl OptionText {
    /// Get the text as a string slice.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Markup(text) => text,
        }
    }

    /// Check if this text was accepted as markup.
    pub fn is_markup(&self) -> bool {
        matches!(self, Self::Markup(_))
    }
}

/// A single answer choice of a question.
///
/// Options are created through a [`Survey`](crate::Survey), which assigns the
/// id, and are immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyOption {
    id: OptionId,
    text: OptionText,
}

impl SurveyOption {
    pub(crate) fn new(id: impl Into<String>, text: OptionText) -> Self {
        Self {
            id: OptionId::new(id),
            text,
        }
    }

    /// Get the option id.
    pub fn id(&self) -> &OptionId {
        &self.id
    }

    /// Get the display text.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Get the display text together with how it was accepted.
    pub fn content(&self) -> &OptionText {
        &self.text
    }
}
