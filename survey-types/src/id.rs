use std::fmt;

/// Prefix for option identifiers.
pub const OPTION_PREFIX: &str = "comp_";

/// Prefix for question identifiers.
pub const QUESTION_PREFIX: &str = "q_";

/// Prefix for block identifiers.
pub const BLOCK_PREFIX: &str = "b_";

/// Prefix for constraint identifiers.
pub const CONSTRAINT_PREFIX: &str = "c_";

/// Prefix for survey identifiers.
pub const SURVEY_PREFIX: &str = "s_";

/// Hands out identifiers of the form `prefix` followed by a counter.
///
/// Every call to [`IdGenerator::next_id`] returns an identifier this generator
/// has never returned before. Distinct generators may overlap; the prefix is what
/// tells entity kinds apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdGenerator {
    prefix: String,
    assigned: u64,
}

impl IdGenerator {
    /// Create a generator for the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            assigned: 0,
        }
    }

    /// The prefix every generated id starts with.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// How many ids this generator has handed out.
    pub fn assigned(&self) -> u64 {
        self.assigned
    }

    /// Produce the next identifier.
    pub fn next_id(&mut self) -> String {
        self.assigned += 1;
        format!("{}{}", self.prefix, self.assigned)
    }
}

/// One generator per entity kind, owned by a [`Survey`](crate::Survey).
#[derive(Debug, Clone)]
pub(crate) struct IdGenerators {
    pub(crate) option: IdGenerator,
    pub(crate) question: IdGenerator,
    pub(crate) block: IdGenerator,
    pub(crate) constraint: IdGenerator,
    pub(crate) survey: IdGenerator,
}

impl Default for IdGenerators {
    fn default() -> Self {
        Self {
            option: IdGenerator::new(OPTION_PREFIX),
            question: IdGenerator::new(QUESTION_PREFIX),
            block: IdGenerator::new(BLOCK_PREFIX),
            constraint: IdGenerator::new(CONSTRAINT_PREFIX),
            survey: IdGenerator::new(SURVEY_PREFIX),
        }
    }
}

/// The generated identifier of an option, e.g. `"comp_3"`.
///
/// Options are compared by identity, so two options with the same text are
/// still distinct.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionId(String);

impl OptionId {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle to a question stored in a [`Survey`](crate::Survey).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionId(pub(crate) usize);

/// Handle to a block stored in a [`Survey`](crate::Survey).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub(crate) usize);

/// Handle to a branch constraint stored in a [`Survey`](crate::Survey).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(pub(crate) usize);

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn ids_carry_prefix() {
        let mut ids = IdGenerator::new(QUESTION_PREFIX);
        assert_eq!(ids.next_id(), "q_1");
        assert_eq!(ids.next_id(), "q_2");
        assert_eq!(ids.assigned(), 2);
    }

    #[test]
    fn ids_are_pairwise_distinct() {
        let mut ids = IdGenerator::new(OPTION_PREFIX);
        let generated: HashSet<_> = (0..1000).map(|_| ids.next_id()).collect();
        assert_eq!(generated.len(), 1000);
        assert!(generated.iter().all(|id| id.starts_with("comp_")));
    }

    #[test]
    fn generators_are_independent() {
        let mut generators = IdGenerators::default();
        assert_eq!(generators.block.next_id(), "b_1");
        assert_eq!(generators.constraint.next_id(), "c_1");
        assert_eq!(generators.block.next_id(), "b_2");
        assert_eq!(generators.survey.prefix(), "s_");
    }
}
