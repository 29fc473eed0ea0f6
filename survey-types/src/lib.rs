//! Core types for building surveys with skip logic.
//!
//! This crate provides the structural model of a survey and the checks that
//! make it safe to hand to a survey runtime:
//! - `Survey` - Owns every question, block and constraint, and validates them
//! - `Question` and `QuestionKind` - Individual questions and their kinds
//! - `Block` - Ordered containers of questions and nested blocks
//! - `Constraint` and `BranchMap` - Per-option branch targets of one question
//! - `SurveyDocument` - The JSON document emitted by `Survey::jsonize`
//!
//! ```
//! use survey_types::{Content, QuestionType, Survey};
//!
//! let mut survey = Survey::new();
//! let question = survey.question(QuestionType::OneOf, "Continue?");
//! let yes = survey.add_option_text(question, "yes").unwrap();
//! survey.add_option_text(question, "no").unwrap();
//!
//! let intro = survey.block_of([Content::from(question)]).unwrap();
//! let details = survey.block();
//! survey.add_block(intro).unwrap();
//! survey.add_block(details).unwrap();
//!
//! let constraint = survey.constrain(question).unwrap();
//! survey.constraint_mut(constraint).unwrap().add_branch(&yes, details).unwrap();
//!
//! assert!(survey.jsonize().unwrap().contains("\"branchMap\""));
//! ```

mod id;
pub use id::{
    BLOCK_PREFIX, BlockId, CONSTRAINT_PREFIX, ConstraintId, IdGenerator, OPTION_PREFIX, OptionId,
    QUESTION_PREFIX, QuestionId, SURVEY_PREFIX,
};

mod option;
pub use option::{OptionText, SurveyOption};

mod markup;
pub use markup::{HtmlFragmentValidator, MarkupValidator};

mod question;
pub use question::{
    ChoiceQuestion, FreeTextMode, FreeTextQuestion, Question, QuestionKind, QuestionType,
};

mod block;
pub use block::{Block, BranchPolicy, Content};

mod constraint;
pub use constraint::{BranchMap, BranchTarget, CONTINUE_TOKEN, Constraint};

mod policy;
pub use policy::PolicyRule;

mod survey;
pub use survey::Survey;

mod document;
pub use document::{
    BlockDocument, BranchMapDocument, FreeTextValue, OptionDocument, QuestionDocument,
    SurveyDocument,
};

mod error;
pub use error::{Result, SurveyError};
