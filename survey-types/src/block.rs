use std::fmt;

use tracing::debug;

use crate::{BlockId, QuestionId, Result, Survey, SurveyError};

/// One entry of a block: a question or a nested block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Content {
    Question(QuestionId),
    Block(BlockId),
}

impl From<QuestionId> for Content {
    fn from(question: QuestionId) -> Self {
        Self::Question(question)
    }
}

impl From<BlockId> for Content {
    fn from(block: BlockId) -> Self {
        Self::Block(block)
    }
}

/// An ordered container of questions and subblocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Generated id; nested blocks carry `parent.child`.
    id: String,

    contents: Vec<Content>,

    /// Whether the runtime may reorder this block among its siblings.
    randomize: bool,

    parent: Option<BlockId>,
}

impl Block {
    pub(crate) fn new(id: String) -> Self {
        Self {
            id,
            contents: Vec::new(),
            randomize: false,
            parent: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Questions and subblocks in source order.
    pub fn contents(&self) -> &[Content] {
        &self.contents
    }

    pub fn randomize(&self) -> bool {
        self.randomize
    }

    pub fn set_randomize(&mut self, randomize: bool) {
        self.randomize = randomize;
    }

    /// The enclosing block; `None` for top-level and detached blocks.
    pub fn parent(&self) -> Option<BlockId> {
        self.parent
    }

    /// Questions directly in this block, in order.
    pub fn questions(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.contents.iter().filter_map(|content| match content {
            Content::Question(question) => Some(*question),
            Content::Block(_) => None,
        })
    }

    /// Blocks directly in this block, in order.
    pub fn subblocks(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.contents.iter().filter_map(|content| match content {
            Content::Block(block) => Some(*block),
            Content::Question(_) => None,
        })
    }

    pub(crate) fn push(&mut self, content: Content) {
        self.contents.push(content);
    }
}

/// How a block is allowed to branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchPolicy {
    /// Exactly one question in the block branches.
    BranchOne,

    /// Every question branches, all to the same set of destinations.
    BranchAll,

    /// No question in the block itself branches.
    BranchNone,
}

impl fmt::Display for BranchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BranchOne => "branch-one",
            Self::BranchAll => "branch-all",
            Self::BranchNone => "branch-none",
        })
    }
}

impl Survey {
    /// Create an empty, detached block.
    pub fn block(&mut self) -> BlockId {
        let id = BlockId(self.block_arena.len());
        let block = Block::new(self.ids.block.next_id());
        self.block_arena.push(block);
        id
    }

    /// Create a block and add the given questions and subblocks to it in order.
    pub fn block_of(&mut self, contents: impl IntoIterator<Item = Content>) -> Result<BlockId> {
        let block = self.block();
        for content in contents {
            match content {
                Content::Question(question) => self.add_question(block, question)?,
                Content::Block(subblock) => self.add_subblock(block, subblock)?,
            }
        }
        Ok(block)
    }

    /// Append a question to a block and point the question back at it.
    pub fn add_question(&mut self, block: BlockId, question: QuestionId) -> Result<()> {
        let entry = self
            .block_arena
            .get_mut(block.0)
            .ok_or(SurveyError::UnknownBlock(block))?;
        let target = self
            .question_arena
            .get_mut(question.0)
            .ok_or(SurveyError::UnknownQuestion(question))?;
        target.set_block(block);
        entry.push(Content::Question(question));
        Ok(())
    }

    /// Attach `candidate` as the last subblock of `target`.
    ///
    /// Fails without touching the graph if `candidate` is already anywhere in
    /// the tree that contains `target`, if it already has a parent, or if it
    /// is a top-level block of the survey.
    pub fn add_subblock(&mut self, target: BlockId, candidate: BlockId) -> Result<()> {
        let target_block = self.block_ref(target)?;
        let candidate_block = self.block_ref(candidate)?;

        let root = self.topmost_ancestor(target)?;
        if self.all_subblocks(root)?.contains(&candidate) {
            return Err(SurveyError::Cycle {
                target: target_block.id().to_string(),
                candidate: candidate_block.id().to_string(),
            });
        }
        if let Some(parent) = candidate_block.parent() {
            return Err(SurveyError::AlreadyNested {
                block: candidate_block.id().to_string(),
                parent: self.block_ref(parent)?.id().to_string(),
            });
        }
        if self.is_top_level(candidate) {
            return Err(SurveyError::AlreadyNested {
                block: candidate_block.id().to_string(),
                parent: self.id().to_string(),
            });
        }

        let id = format!("{}.{}", target_block.id(), candidate_block.id());
        debug!(block = %id, parent = %target_block.id(), "attaching subblock");

        let candidate_block = &mut self.block_arena[candidate.0];
        candidate_block.parent = Some(target);
        candidate_block.id = id;
        self.block_arena[target.0].push(Content::Block(candidate));
        Ok(())
    }

    /// Questions directly in `block`.
    pub fn get_questions(&self, block: BlockId) -> Result<Vec<QuestionId>> {
        Ok(self.block_ref(block)?.questions().collect())
    }

    /// Subblocks directly in `block`.
    pub fn get_subblocks(&self, block: BlockId) -> Result<Vec<BlockId>> {
        Ok(self.block_ref(block)?.subblocks().collect())
    }

    /// Follow parent links up to the block that has no parent.
    pub fn topmost_ancestor(&self, block: BlockId) -> Result<BlockId> {
        let mut current = block;
        while let Some(parent) = self.block_ref(current)?.parent() {
            current = parent;
        }
        Ok(current)
    }

    /// `block` itself followed by every block nested in it, depth first.
    pub fn all_subblocks(&self, block: BlockId) -> Result<Vec<BlockId>> {
        let mut found = Vec::new();
        let mut pending = vec![block];
        while let Some(next) = pending.pop() {
            let entry = self.block_ref(next)?;
            found.push(next);
            let children: Vec<BlockId> = entry.subblocks().collect();
            pending.extend(children.into_iter().rev());
        }
        Ok(found)
    }
}
