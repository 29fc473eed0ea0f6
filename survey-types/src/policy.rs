//! Branch-policy classification of blocks.
//!
//! A block is classified bottom-up: its subblocks are classified first, then
//! the block's own questions decide between branch-one, branch-all and
//! branch-none. Anything else is a [`PolicyRule`] violation.

use std::collections::BTreeSet;
use std::fmt;

use tracing::{trace, warn};

use crate::{Block, BlockId, BranchPolicy, BranchTarget, Question, Result, Survey, SurveyError};

/// The rule a block broke when it fits none of the branch policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyRule {
    /// A branch-one block contains a branch-one subblock.
    NestedBranchOne,

    /// Questions of a branch-all block branch to different destinations.
    InconsistentBranchAll,

    /// A branch-all block contains subblocks.
    BranchAllWithSubblocks,

    /// More than one question branches, but not all of them.
    TooManyBranchQuestions,

    /// More than one immediate subblock is branch-one.
    MultipleBranchOneSubblocks,
}

impl fmt::Display for PolicyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NestedBranchOne => "a branch-one block cannot contain a branch-one subblock",
            Self::InconsistentBranchAll => "block branches to different destinations",
            Self::BranchAllWithSubblocks => "a branch-all block cannot contain subblocks",
            Self::TooManyBranchQuestions => "block contains too many branch questions",
            Self::MultipleBranchOneSubblocks => "block has too many branch-one subblocks",
        })
    }
}

impl Survey {
    /// Classify `block` and, recursively, everything nested in it.
    pub fn valid_branch_number(&self, block: BlockId) -> Result<BranchPolicy> {
        let entry = self.block_ref(block)?;
        let questions = entry
            .questions()
            .map(|question| self.question_ref(question))
            .collect::<Result<Vec<_>>>()?;
        let branching: Vec<&Question> = questions
            .iter()
            .copied()
            .filter(|question| question.is_branching())
            .collect();

        let policy = match branching.len() {
            0 => {
                let branch_one = self
                    .subblock_policies(entry)?
                    .into_iter()
                    .filter(|policy| *policy == BranchPolicy::BranchOne)
                    .count();
                if branch_one > 1 {
                    return Err(violation(entry, PolicyRule::MultipleBranchOneSubblocks));
                }
                BranchPolicy::BranchNone
            }
            1 => {
                if self
                    .subblock_policies(entry)?
                    .contains(&BranchPolicy::BranchOne)
                {
                    return Err(violation(entry, PolicyRule::NestedBranchOne));
                }
                BranchPolicy::BranchOne
            }
            n if n == questions.len() => {
                let expected = self.target_set(branching[0])?;
                for question in &branching[1..] {
                    if self.target_set(question)? != expected {
                        return Err(violation(entry, PolicyRule::InconsistentBranchAll));
                    }
                }
                if entry.subblocks().next().is_some() {
                    return Err(violation(entry, PolicyRule::BranchAllWithSubblocks));
                }
                BranchPolicy::BranchAll
            }
            _ => return Err(violation(entry, PolicyRule::TooManyBranchQuestions)),
        };

        trace!(block = %entry.id(), %policy, "classified block");
        Ok(policy)
    }

    fn subblock_policies(&self, block: &Block) -> Result<Vec<BranchPolicy>> {
        block
            .subblocks()
            .map(|subblock| self.valid_branch_number(subblock))
            .collect()
    }

    /// Distinct destinations of a branching question, `Continue` included.
    fn target_set(&self, question: &Question) -> Result<BTreeSet<BranchTarget>> {
        let Some(constraint) = question.constraint() else {
            return Ok(BTreeSet::new());
        };
        Ok(self.constraint_ref(constraint)?.targets().collect())
    }
}

fn violation(block: &Block, rule: PolicyRule) -> SurveyError {
    warn!(block = %block.id(), %rule, "branch policy violated");
    SurveyError::PolicyViolation {
        block: block.id().to_string(),
        rule,
    }
}
