use crate::{BlockId, ConstraintId, PolicyRule, QuestionId, QuestionType};

/// Result type used throughout the crate.
pub type Result<T, E = SurveyError> = std::result::Result<T, E>;

/// Error type for survey construction, validation and serialization.
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// The operation does not apply to this kind of question.
    #[error("cannot {operation} on a {kind} question")]
    KindMismatch {
        kind: QuestionType,
        operation: &'static str,
    },

    /// A question kind string that is not recognised.
    #[error("unknown question kind `{0}` (expected likert, checkbox, oneof, freetext or instruction)")]
    UnknownKind(String),

    /// A branch assignment referenced an option the question does not have.
    #[error("question {question} does not contain option {option}")]
    NoSuchOption { question: String, option: String },

    /// An index outside the option list.
    #[error("index {index} is out of range for {len} options")]
    OutOfRange { index: usize, len: usize },

    /// Attaching the block would make it its own ancestor.
    #[error("attaching block {candidate} under {target} would create a cycle")]
    Cycle { target: String, candidate: String },

    /// The block already has a parent block or is already placed in the survey.
    #[error("block {block} is already nested under {parent}")]
    AlreadyNested { block: String, parent: String },

    /// The block is neither branch-one, branch-all nor branch-none.
    #[error("block {block} violates its branch policy: {rule}")]
    PolicyViolation { block: String, rule: PolicyRule },

    /// A branch points at a block that is not a top-level block of the survey.
    #[error("question {question} branches to {target}, which is not a top-level block of the survey")]
    BranchTargetNotInSurvey { question: String, target: String },

    /// A branch points at the enclosing top-level block or one before it.
    #[error("question {question} (\"{text}\") does not branch forward")]
    NonForwardBranch { question: String, text: String },

    /// The governed question is not reachable from any top-level block.
    #[error("branch question {question} is not placed in a top-level block of the survey")]
    BranchQuestionNotInSurvey { question: String },

    /// The question already has a branch map.
    #[error("question {question} already has a branch map")]
    AlreadyBranching { question: String },

    /// A free-text validation pattern that does not compile.
    #[error("invalid free-text pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Strict markup validation rejected an option.
    #[error("option markup is not a valid HTML fragment: {0}")]
    InvalidMarkup(#[from] anyhow::Error),

    /// A block handle from another survey.
    #[error("no block {0:?} in this survey")]
    UnknownBlock(BlockId),

    /// A question handle from another survey.
    #[error("no question {0:?} in this survey")]
    UnknownQuestion(QuestionId),

    /// A constraint handle from another survey.
    #[error("no constraint {0:?} in this survey")]
    UnknownConstraint(ConstraintId),

    /// Encoding or decoding the survey document failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SurveyError {
    /// Create a markup error from any error type.
    pub fn markup(err: impl Into<anyhow::Error>) -> Self {
        Self::InvalidMarkup(err.into())
    }

    /// Check if this error came out of survey validation rather than construction.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::PolicyViolation { .. }
                | Self::BranchTargetNotInSurvey { .. }
                | Self::NonForwardBranch { .. }
                | Self::BranchQuestionNotInSurvey { .. }
        )
    }
}
