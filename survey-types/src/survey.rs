use std::fmt;

use tracing::debug;

use crate::id::IdGenerators;
use crate::{
    Block, BlockId, BranchTarget, Constraint, ConstraintId, Content, FreeTextQuestion,
    HtmlFragmentValidator, MarkupValidator, OptionId, OptionText, Question, QuestionId,
    QuestionKind, QuestionType, Result, SurveyError, SurveyOption,
};

/// The top-level structure of a survey: ordered top-level blocks plus the
/// branch constraints between them.
///
/// A `Survey` also owns every question, block and constraint created through
/// it. Entities refer to each other by handle ([`QuestionId`], [`BlockId`],
/// [`ConstraintId`]), so a block may be built up before it is placed in the
/// survey, and nested blocks point back at their parents without owning them.
pub struct Survey {
    id: String,

    /// Optional human-readable name.
    name: Option<String>,

    /// Whether respondents may submit before reaching the end.
    breakoff: bool,

    /// Top-level blocks in document order.
    blocks: Vec<BlockId>,

    /// Branch constraints in creation order.
    pub(crate) constraints: Vec<ConstraintId>,

    pub(crate) question_arena: Vec<Question>,
    pub(crate) block_arena: Vec<Block>,
    pub(crate) constraint_arena: Vec<Constraint>,
    pub(crate) ids: IdGenerators,

    markup: Box<dyn MarkupValidator>,
}

impl Survey {
    /// Create an empty survey with a generated id.
    pub fn new() -> Self {
        let mut ids = IdGenerators::default();
        Self {
            id: ids.survey.next_id(),
            name: None,
            breakoff: true,
            blocks: Vec::new(),
            constraints: Vec::new(),
            question_arena: Vec::new(),
            block_arena: Vec::new(),
            constraint_arena: Vec::new(),
            ids,
            markup: Box::new(HtmlFragmentValidator),
        }
    }

    /// Create an empty survey with a caller-supplied id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::new()
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Permit or forbid submitting early.
    pub fn with_breakoff(mut self, breakoff: bool) -> Self {
        self.breakoff = breakoff;
        self
    }

    /// Replace the validator used for markup options.
    pub fn with_markup_validator(mut self, validator: impl MarkupValidator + 'static) -> Self {
        self.markup = Box::new(validator);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn breakoff(&self) -> bool {
        self.breakoff
    }

    pub fn set_breakoff(&mut self, breakoff: bool) {
        self.breakoff = breakoff;
    }

    /// Top-level blocks in document order.
    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    /// Constraints in creation order.
    pub fn constraints(&self) -> &[ConstraintId] {
        &self.constraints
    }

    pub fn question_ref(&self, question: QuestionId) -> Result<&Question> {
        self.question_arena
            .get(question.0)
            .ok_or(SurveyError::UnknownQuestion(question))
    }

    pub fn question_mut(&mut self, question: QuestionId) -> Result<&mut Question> {
        self.question_arena
            .get_mut(question.0)
            .ok_or(SurveyError::UnknownQuestion(question))
    }

    pub fn block_ref(&self, block: BlockId) -> Result<&Block> {
        self.block_arena
            .get(block.0)
            .ok_or(SurveyError::UnknownBlock(block))
    }

    pub fn block_mut(&mut self, block: BlockId) -> Result<&mut Block> {
        self.block_arena
            .get_mut(block.0)
            .ok_or(SurveyError::UnknownBlock(block))
    }

    pub fn constraint_ref(&self, constraint: ConstraintId) -> Result<&Constraint> {
        self.constraint_arena
            .get(constraint.0)
            .ok_or(SurveyError::UnknownConstraint(constraint))
    }

    // === Options ===

    /// Create an option, keeping the text as markup when it validates and as
    /// plain text otherwise.
    pub fn option(&mut self, text: impl Into<String>) -> SurveyOption {
        let text = text.into();
        let content = match self.markup.validate(&text) {
            Ok(()) => OptionText::Markup(text),
            Err(err) => {
                debug!(error = %err, "option text is not valid markup, keeping it as plain text");
                OptionText::Plain(text)
            }
        };
        SurveyOption::new(self.ids.option.next_id(), content)
    }

    /// Create a plain-text option.
    pub fn text_option(&mut self, text: impl Into<String>) -> SurveyOption {
        SurveyOption::new(self.ids.option.next_id(), OptionText::Plain(text.into()))
    }

    /// Create a markup option, failing if the markup does not validate.
    pub fn html_option(&mut self, markup: impl Into<String>) -> Result<SurveyOption> {
        let markup = markup.into();
        self.markup.validate(&markup).map_err(SurveyError::markup)?;
        Ok(SurveyOption::new(
            self.ids.option.next_id(),
            OptionText::Markup(markup),
        ))
    }

    // === Questions ===

    /// Create a question of the given kind. Choice kinds start without options.
    pub fn question(&mut self, kind: impl Into<QuestionKind>, text: impl Into<String>) -> QuestionId {
        let id = QuestionId(self.question_arena.len());
        let question = Question::new(self.ids.question.next_id(), text, kind.into());
        self.question_arena.push(question);
        id
    }

    /// Create a question from a kind name such as `"oneof"`.
    pub fn question_of_type(&mut self, kind: &str, text: impl Into<String>) -> Result<QuestionId> {
        let kind: QuestionType = kind.parse()?;
        Ok(self.question(kind, text))
    }

    /// Create a free-text question with an optional default or pattern.
    pub fn free_text(
        &mut self,
        text: impl Into<String>,
        default: Option<String>,
        pattern: Option<String>,
    ) -> Result<QuestionId> {
        let kind = FreeTextQuestion::from_parts(default, pattern)?;
        Ok(self.question(QuestionKind::FreeText(kind), text))
    }

    /// Create an instructional question.
    pub fn instruction(&mut self, text: impl Into<String>) -> QuestionId {
        self.question(QuestionKind::Instruction, text)
    }

    /// Append an option to a choice question.
    pub fn add_option(&mut self, question: QuestionId, option: SurveyOption) -> Result<OptionId> {
        let len = self.choice_len(question)?;
        self.insert_options(question, len, vec![option])
    }

    /// Append an option built from text, see [`Survey::option`].
    pub fn add_option_text(
        &mut self,
        question: QuestionId,
        text: impl Into<String>,
    ) -> Result<OptionId> {
        let len = self.choice_len(question)?;
        let option = self.option(text);
        self.insert_options(question, len, vec![option])
    }

    /// Insert an option at `index`, padding with empty options when `index` is
    /// past the end.
    pub fn add_option_by_index(
        &mut self,
        question: QuestionId,
        index: usize,
        option: SurveyOption,
    ) -> Result<OptionId> {
        let len = self.choice_len(question)?;
        let mut options: Vec<SurveyOption> = (len..index)
            .map(|_| self.text_option(String::new()))
            .collect();
        options.push(option);
        self.insert_options(question, index.min(len), options)
    }

    fn choice_len(&self, question: QuestionId) -> Result<usize> {
        let entry = self.question_ref(question)?;
        entry
            .kind()
            .choices()
            .map(|choices| choices.len())
            .ok_or(SurveyError::KindMismatch {
                kind: entry.question_type(),
                operation: "add an option",
            })
    }

    /// Insert `options` consecutively starting at `index`, keeping any branch
    /// map aligned. Returns the id of the last option.
    fn insert_options(
        &mut self,
        question: QuestionId,
        index: usize,
        options: Vec<SurveyOption>,
    ) -> Result<OptionId> {
        let entry = self
            .question_arena
            .get_mut(question.0)
            .ok_or(SurveyError::UnknownQuestion(question))?;
        let kind = entry.question_type();
        let constraint = entry.constraint();
        let choices = entry
            .kind_mut()
            .choices_mut()
            .ok_or(SurveyError::KindMismatch {
                kind,
                operation: "add an option",
            })?;

        let mut last = None;
        for (offset, option) in options.into_iter().enumerate() {
            let id = option.id().clone();
            choices.insert(index + offset, option);
            if let Some(constraint) = constraint {
                self.constraint_arena[constraint.0].insert_option(index + offset, id.clone());
            }
            last = Some(id);
        }
        last.ok_or(SurveyError::OutOfRange {
            index,
            len: choices.len(),
        })
    }

    // === Top-level blocks ===

    /// Append a top-level block.
    pub fn add_block(&mut self, block: BlockId) -> Result<()> {
        let index = self.blocks.len();
        self.add_block_by_index(block, index)
    }

    /// Insert a top-level block at `index`; an index past the end appends.
    ///
    /// A block is placed at most once, and never when it is nested in another
    /// block.
    pub fn add_block_by_index(&mut self, block: BlockId, index: usize) -> Result<()> {
        let entry = self.block_ref(block)?;
        if let Some(parent) = entry.parent() {
            return Err(SurveyError::AlreadyNested {
                block: entry.id().to_string(),
                parent: self.block_ref(parent)?.id().to_string(),
            });
        }
        if self.blocks.contains(&block) {
            return Err(SurveyError::AlreadyNested {
                block: entry.id().to_string(),
                parent: self.id.clone(),
            });
        }

        debug!(block = %entry.id(), index, "placing top-level block");
        let index = index.min(self.blocks.len());
        self.blocks.insert(index, block);
        Ok(())
    }

    /// Check if `block` is in the top-level list.
    pub fn is_top_level(&self, block: BlockId) -> bool {
        self.blocks.contains(&block)
    }

    // === Validation ===

    /// Check that every block follows a branch policy and that every branch
    /// jumps forward to a top-level block of this survey.
    pub fn validate(&self) -> Result<()> {
        for &block in &self.blocks {
            let policy = self.valid_branch_number(block)?;
            debug!(block = %self.block_ref(block)?.id(), %policy, "top-level block policy");
        }

        for &constraint in &self.constraints {
            let constraint = self.constraint_ref(constraint)?;
            for target in constraint.targets().filter_map(BranchTarget::block) {
                if !self.blocks.contains(&target) {
                    return Err(SurveyError::BranchTargetNotInSurvey {
                        question: self.question_ref(constraint.question())?.id().to_string(),
                        target: self.block_ref(target)?.id().to_string(),
                    });
                }
            }
        }

        for &constraint in &self.constraints {
            let constraint = self.constraint_ref(constraint)?;
            if constraint.targets().all(|target| target == BranchTarget::Continue) {
                continue;
            }
            let question = self.question_ref(constraint.question())?;
            let origin = self.top_level_position(question)?;
            for target in constraint.targets().filter_map(BranchTarget::block) {
                let destination = self.blocks.iter().position(|&block| block == target);
                if destination.is_none_or(|destination| origin >= destination) {
                    return Err(SurveyError::NonForwardBranch {
                        question: question.id().to_string(),
                        text: question.text().to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Index in the top-level list of the block that ultimately encloses `question`.
    fn top_level_position(&self, question: &Question) -> Result<usize> {
        let not_placed = || SurveyError::BranchQuestionNotInSurvey {
            question: question.id().to_string(),
        };
        let block = question.block().ok_or_else(not_placed)?;
        let root = self.topmost_ancestor(block)?;
        self.blocks
            .iter()
            .position(|&top| top == root)
            .ok_or_else(not_placed)
    }
}

impl Default for Survey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Survey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Survey")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("breakoff", &self.breakoff)
            .field("blocks", &self.blocks)
            .field("constraints", &self.constraints)
            .field("questions", &self.question_arena.len())
            .finish_non_exhaustive()
    }
}

/// Indented outline of the placed blocks, their questions and options, with
/// branch targets next to the options that jump.
impl fmt::Display for Survey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Survey {}", self.id)?;
        if let Some(name) = &self.name {
            write!(f, " ({name})")?;
        }
        writeln!(f)?;
        for &block in &self.blocks {
            self.fmt_block(f, block, 1)?;
        }
        Ok(())
    }
}

impl Survey {
    fn fmt_block(&self, f: &mut fmt::Formatter<'_>, block: BlockId, depth: usize) -> fmt::Result {
        let entry = self.block_ref(block).map_err(|_| fmt::Error)?;
        let indent = "  ".repeat(depth);
        writeln!(f, "{indent}Block {}", entry.id())?;
        for content in entry.contents() {
            match *content {
                Content::Question(question) => self.fmt_question(f, question, depth + 1)?,
                Content::Block(subblock) => self.fmt_block(f, subblock, depth + 1)?,
            }
        }
        Ok(())
    }

    fn fmt_question(
        &self,
        f: &mut fmt::Formatter<'_>,
        question: QuestionId,
        depth: usize,
    ) -> fmt::Result {
        let entry = self.question_ref(question).map_err(|_| fmt::Error)?;
        let indent = "  ".repeat(depth);
        writeln!(
            f,
            "{indent}{} [{}] {}",
            entry.id(),
            entry.question_type(),
            entry.text()
        )?;

        let branches = match entry.constraint() {
            Some(constraint) => self
                .constraint_ref(constraint)
                .map_err(|_| fmt::Error)?
                .get_blocks(),
            None => Vec::new(),
        };
        for (index, option) in entry.options().iter().enumerate() {
            write!(f, "{indent}  {}: {}", option.id(), option.text())?;
            if let Some(BranchTarget::Block(target)) = branches.get(index) {
                let target = self.block_ref(*target).map_err(|_| fmt::Error)?;
                write!(f, " -> {}", target.id())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
