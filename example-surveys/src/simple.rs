use survey_types::{Content, QuestionType, Survey};

use crate::{one_to_three, oneof};

/// Two top-level blocks; the first nests two subblocks and question 3 may
/// skip ahead to the last block.
pub fn simple() -> anyhow::Result<Survey> {
    let mut survey = Survey::new().with_name("Simple survey");

    let q1 = oneof(&mut survey, "Question 1", one_to_three())?;
    let q2 = oneof(&mut survey, "Question 2", one_to_three())?;
    let q3 = oneof(&mut survey, "Question 3", one_to_three())?;
    let q4 = survey.question(QuestionType::OneOf, "Question 4");

    let b1 = survey.block_of([Content::from(q1), Content::from(q2)])?;
    let b2 = survey.block_of([Content::from(q3)])?;
    let b4 = survey.block_of([Content::from(q4)])?;
    let b3 = survey.block_of([Content::from(b1), Content::from(b2)])?;

    survey.add_block(b3)?;
    survey.add_block(b4)?;

    let branch = survey.constrain(q3)?;
    survey.constraint_mut(branch)?.add_branch_by_index(0, b4)?;

    Ok(survey)
}
