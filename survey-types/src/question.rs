use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::{BlockId, ConstraintId, Result, SurveyError, SurveyOption};

/// A single question in a survey.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Generated id, e.g. `"q_4"`.
    id: String,

    /// The prompt text shown to the respondent.
    text: String,

    /// The kind of question, with its kind-specific payload.
    kind: QuestionKind,

    /// Whether the respondent may submit after this question.
    breakoff: bool,

    /// The block that most recently received this question.
    block: Option<BlockId>,

    /// The branch map governing this question, if any.
    constraint: Option<ConstraintId>,
}

impl Question {
    pub(crate) fn new(id: String, text: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id,
            text: text.into(),
            kind,
            breakoff: true,
            block: None,
            constraint: None,
        }
    }

    /// Get the question id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the prompt text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the question kind.
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut QuestionKind {
        &mut self.kind
    }

    /// Get the fieldless kind tag.
    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }

    /// The options of this question; empty for free-text and instructions.
    pub fn options(&self) -> &[SurveyOption] {
        self.kind.choices().map(ChoiceQuestion::options).unwrap_or_default()
    }

    pub fn breakoff(&self) -> bool {
        self.breakoff
    }

    pub fn set_breakoff(&mut self, breakoff: bool) {
        self.breakoff = breakoff;
    }

    /// Whether options may be shown in random order.
    ///
    /// Always `false` for kinds without options.
    pub fn shuffle(&self) -> bool {
        self.kind.choices().is_some_and(ChoiceQuestion::shuffle)
    }

    /// Permit or forbid shuffling the options.
    pub fn set_shuffle(&mut self, shuffle: bool) -> Result<()> {
        let kind = self.question_type();
        let choices = self.kind.choices_mut().ok_or(SurveyError::KindMismatch {
            kind,
            operation: "shuffle options",
        })?;
        choices.shuffle = shuffle;
        Ok(())
    }

    /// Check if a constraint has been attached to this question.
    pub fn is_branching(&self) -> bool {
        self.constraint.is_some()
    }

    /// The block this question was last added to.
    pub fn block(&self) -> Option<BlockId> {
        self.block
    }

    pub(crate) fn set_block(&mut self, block: BlockId) {
        self.block = Some(block);
    }

    /// The constraint governing this question, if it branches.
    pub fn constraint(&self) -> Option<ConstraintId> {
        self.constraint
    }

    pub(crate) fn set_constraint(&mut self, constraint: ConstraintId) {
        self.constraint = Some(constraint);
    }
}

/// The kind of a question, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionType {
    /// Ordered, exclusive choice (rating scales).
    Likert,

    /// Select any number of options.
    Checkbox,

    /// Select exactly one option.
    OneOf,

    /// Free-form text entry.
    FreeText,

    /// Text shown to the respondent; nothing is collected.
    Instruction,
}

impl QuestionType {
    /// Check if option order is part of the question's meaning.
    pub fn is_ordered(self) -> bool {
        self == Self::Likert
    }

    /// Check if at most one option may be chosen.
    pub fn is_exclusive(self) -> bool {
        matches!(self, Self::Likert | Self::OneOf)
    }

    /// Check if questions of this kind carry options.
    pub fn has_options(self) -> bool {
        matches!(self, Self::Likert | Self::Checkbox | Self::OneOf)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Likert => "likert",
            Self::Checkbox => "checkbox",
            Self::OneOf => "oneof",
            Self::FreeText => "freetext",
            Self::Instruction => "instruction",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "likert" => Ok(Self::Likert),
            "checkbox" => Ok(Self::Checkbox),
            "oneof" => Ok(Self::OneOf),
            "freetext" => Ok(Self::FreeText),
            "instruction" | "instructional" => Ok(Self::Instruction),
            other => Err(SurveyError::UnknownKind(other.to_string())),
        }
    }
}

/// The kind of question, carrying what that kind needs.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    Likert(ChoiceQuestion),
    Checkbox(ChoiceQuestion),
    OneOf(ChoiceQuestion),
    FreeText(FreeTextQuestion),
    Instruction,
}

impl QuestionKind {
    /// Create an empty kind of the given type.
    pub fn new(question_type: QuestionType) -> Self {
        match question_type {
            QuestionType::Likert => Self::Likert(ChoiceQuestion::new()),
            QuestionType::Checkbox => Self::Checkbox(ChoiceQuestion::new()),
            QuestionType::OneOf => Self::OneOf(ChoiceQuestion::new()),
            QuestionType::FreeText => Self::FreeText(FreeTextQuestion::new()),
            QuestionType::Instruction => Self::Instruction,
        }
    }

    pub fn question_type(&self) -> QuestionType {
        match self {
            Self::Likert(_) => QuestionType::Likert,
            Self::Checkbox(_) => QuestionType::Checkbox,
            Self::OneOf(_) => QuestionType::OneOf,
            Self::FreeText(_) => QuestionType::FreeText,
            Self::Instruction => QuestionType::Instruction,
        }
    }

    /// The option list, for kinds that have one.
    pub fn choices(&self) -> Option<&ChoiceQuestion> {
        match self {
            Self::Likert(choices) | Self::Checkbox(choices) | Self::OneOf(choices) => Some(choices),
            Self::FreeText(_) | Self::Instruction => None,
        }
    }

    pub(crate) fn choices_mut(&mut self) -> Option<&mut ChoiceQuestion> {
        match self {
            Self::Likert(choices) | Self::Checkbox(choices) | Self::OneOf(choices) => Some(choices),
            Self::FreeText(_) | Self::Instruction => None,
        }
    }
}

impl From<QuestionType> for QuestionKind {
    fn from(question_type: QuestionType) -> Self {
        Self::new(question_type)
    }
}

/// Options of a likert, checkbox or oneof question.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceQuestion {
    options: Vec<SurveyOption>,
    shuffle: bool,
}

impl ChoiceQuestion {
    /// Create an empty option list that may be shuffled.
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
            shuffle: true,
        }
    }

    pub fn options(&self) -> &[SurveyOption] {
        &self.options
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub(crate) fn insert(&mut self, index: usize, option: SurveyOption) {
        self.options.insert(index, option);
    }
}

impl Default for ChoiceQuestion {
    fn default() -> Self {
        Self::new()
    }
}

/// How a free-text answer is constrained. A question has a default value or a
/// pattern, never both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FreeTextMode {
    #[default]
    Unconstrained,

    /// Pre-filled answer.
    Default(String),

    /// Regular expression the answer has to match.
    Pattern(String),
}

/// Configuration for a free-text question.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FreeTextQuestion {
    mode: FreeTextMode,
}

impl FreeTextQuestion {
    /// Create an unconstrained free-text question.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a default value.
    pub fn with_default(default: impl Into<String>) -> Self {
        Self {
            mode: FreeTextMode::Default(default.into()),
        }
    }

    /// Create with a validation pattern. The pattern must compile.
    pub fn with_pattern(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        Regex::new(&pattern)?;
        Ok(Self {
            mode: FreeTextMode::Pattern(pattern),
        })
    }

    /// Create from an optional default and an optional pattern.
    pub fn from_parts(default: Option<String>, pattern: Option<String>) -> Result<Self> {
        match (default, pattern) {
            (None, None) => Ok(Self::new()),
            (Some(default), None) => Ok(Self::with_default(default)),
            (None, Some(pattern)) => Self::with_pattern(pattern),
            (Some(_), Some(_)) => Err(SurveyError::KindMismatch {
                kind: QuestionType::FreeText,
                operation: "set both a default value and a validation pattern",
            }),
        }
    }

    pub fn mode(&self) -> &FreeTextMode {
        &self.mode
    }
}
