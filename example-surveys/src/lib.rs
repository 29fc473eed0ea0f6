//! Ready-made surveys, valid and deliberately broken, for exercising
//! validation and serialization.

use survey_types::{QuestionId, QuestionType, Survey};

pub mod backwards_branching;
pub mod branch_to_subblock;
pub mod demographics;
pub mod feedback;
pub mod simple;
pub mod subblocks;
pub mod two_branches_one_block;

pub use backwards_branching::backwards_branching;
pub use branch_to_subblock::branch_to_subblock;
pub use demographics::demographics;
pub use feedback::feedback;
pub use simple::simple;
pub use subblocks::subblocks;
pub use two_branches_one_block::two_branches_one_block;

/// Create a single-select question with plain-text options.
pub fn oneof<S: AsRef<str>>(
    survey: &mut Survey,
    text: &str,
    options: impl IntoIterator<Item = S>,
) -> anyhow::Result<QuestionId> {
    let question = survey.question(QuestionType::OneOf, text);
    for option in options {
        let option = survey.text_option(option.as_ref());
        survey.add_option(question, option)?;
    }
    Ok(question)
}

/// Options `"1"` up to `"3"`.
pub(crate) fn one_to_three() -> impl Iterator<Item = String> {
    (1..=3).map(|n| n.to_string())
}
