use survey_types::{Content, QuestionType, Survey};

use crate::{one_to_three, oneof};

/// Question 3 branches into a nested block instead of a top-level one.
pub fn branch_to_subblock() -> anyhow::Result<Survey> {
    let mut survey = Survey::new().with_name("Branch to subblock");

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
    let mut map = survey.constraint_mut(branch)?;
    for index in 0..3 {
        map.add_branch_by_index(index, b1)?;
    }

    Ok(survey)
}
