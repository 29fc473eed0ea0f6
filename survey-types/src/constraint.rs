use tracing::debug;

use crate::{BlockId, ConstraintId, OptionId, Question, QuestionId, Result, Survey, SurveyError};

/// Token the survey runtime reads as "go on to the next block".
pub const CONTINUE_TOKEN: &str = "NEXT";

/// Where a respondent goes after choosing an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BranchTarget {
    /// Proceed to the next block in document order.
    Continue,

    /// Jump to a top-level block.
    Block(BlockId),
}

impl BranchTarget {
    pub fn block(self) -> Option<BlockId> {
        match self {
            Self::Continue => None,
            Self::Block(block) => Some(block),
        }
    }
}

impl From<BlockId> for BranchTarget {
    fn from(block: BlockId) -> Self {
        Self::Block(block)
    }
}

/// The branch map of one question: a target for each of its options, in
/// option order.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    id: String,
    question: QuestionId,
    branches: Vec<(OptionId, BranchTarget)>,
}

impl Constraint {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The question this constraint governs.
    pub fn question(&self) -> QuestionId {
        self.question
    }

    /// Option ids paired with their targets.
    pub fn branches(&self) -> &[(OptionId, BranchTarget)] {
        &self.branches
    }

    /// Targets in option order, `Continue` included.
    pub fn get_blocks(&self) -> Vec<BranchTarget> {
        self.targets().collect()
    }

    pub fn targets(&self) -> impl Iterator<Item = BranchTarget> + '_ {
        self.branches.iter().map(|(_, target)| *target)
    }

    /// Keep the map aligned with an option inserted at `index`.
    pub(crate) fn insert_option(&mut self, index: usize, option: OptionId) {
        self.branches.insert(index, (option, BranchTarget::Continue));
    }
}

/// Mutable view of a constraint together with the question it governs.
///
/// Returned by [`Survey::constraint_mut`].
#[derive(Debug)]
pub struct BranchMap<'a> {
    constraint: &'a mut Constraint,
    question: &'a Question,
}

impl BranchMap<'_> {
    /// Branch from the option at `index`.
    pub fn add_branch_by_index(
        &mut self,
        index: usize,
        target: impl Into<BranchTarget>,
    ) -> Result<&mut Self> {
        let len = self.constraint.branches.len();
        if index >= len {
            return Err(SurveyError::OutOfRange { index, len });
        }
        self.set(index, target.into());
        Ok(self)
    }

    /// Branch from the given option of the governed question.
    pub fn add_branch(
        &mut self,
        option: &OptionId,
        target: impl Into<BranchTarget>,
    ) -> Result<&mut Self> {
        let index = self
            .constraint
            .branches
            .iter()
            .position(|(id, _)| id == option)
            .ok_or_else(|| SurveyError::NoSuchOption {
                question: self.question.id().to_string(),
                option: option.to_string(),
            })?;
        self.set(index, target.into());
        Ok(self)
    }

    /// Branch from the first option whose text is exactly `text`.
    pub fn add_branch_by_op_text(
        &mut self,
        text: &str,
        target: impl Into<BranchTarget>,
    ) -> Result<&mut Self> {
        let index = self
            .question
            .options()
            .iter()
            .position(|option| option.text() == text)
            .ok_or_else(|| SurveyError::NoSuchOption {
                question: self.question.id().to_string(),
                option: format!("\"{text}\""),
            })?;
        self.set(index, target.into());
        Ok(self)
    }

    /// Targets in option order, `Continue` included.
    pub fn get_blocks(&self) -> Vec<BranchTarget> {
        self.constraint.get_blocks()
    }

    fn set(&mut self, index: usize, target: BranchTarget) {
        let (option, slot) = &mut self.constraint.branches[index];
        debug!(constraint = %self.constraint.id, option = %option, ?target, "setting branch");
        *slot = target;
    }
}

impl Survey {
    /// Attach a branch map to `question`. Every option starts out as
    /// [`BranchTarget::Continue`].
    pub fn constrain(&mut self, question: QuestionId) -> Result<ConstraintId> {
        let id = ConstraintId(self.constraint_arena.len());
        let governed = self
            .question_arena
            .get_mut(question.0)
            .ok_or(SurveyError::UnknownQuestion(question))?;
        if governed.kind().choices().is_none() {
            return Err(SurveyError::KindMismatch {
                kind: governed.question_type(),
                operation: "attach a branch map",
            });
        }
        if governed.is_branching() {
            return Err(SurveyError::AlreadyBranching {
                question: governed.id().to_string(),
            });
        }

        let branches = governed
            .options()
            .iter()
            .map(|option| (option.id().clone(), BranchTarget::Continue))
            .collect();
        governed.set_constraint(id);

        let constraint = Constraint {
            id: self.ids.constraint.next_id(),
            question,
            branches,
        };
        debug!(constraint = %constraint.id, question = %governed.id(), "question now branches");
        self.constraint_arena.push(constraint);
        self.constraints.push(id);
        Ok(id)
    }

    /// Edit the branch targets of a constraint.
    pub fn constraint_mut(&mut self, constraint: ConstraintId) -> Result<BranchMap<'_>> {
        let constraint = self
            .constraint_arena
            .get_mut(constraint.0)
            .ok_or(SurveyError::UnknownConstraint(constraint))?;
        let question = self
            .question_arena
            .get(constraint.question.0)
            .ok_or(SurveyError::UnknownQuestion(constraint.question))?;
        Ok(BranchMap {
            constraint,
            question,
        })
    }
}
