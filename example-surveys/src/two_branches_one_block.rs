use survey_types::{Content, QuestionType, Survey};

use crate::oneof;

/// The first block has two branching questions out of three, which fits
/// neither branch-one nor branch-all.
pub fn two_branches_one_block() -> anyhow::Result<Survey> {
    let mut survey = Survey::new().with_name("Two branches in one block");

    let q1 = oneof(&mut survey, "Question 1", ["foo", "bar", "baz"])?;
    let q2 = oneof(&mut survey, "Question 2", ["boo", "far", "faz"])?;
    let q3 = oneof(&mut survey, "Question 3", ["eggs", "ham"])?;
    let block1 = survey.block_of([q1, q2, q3].map(Content::from))?;

    let q4 = oneof(&mut survey, "Question 4", ["oscar", "lucille", "george"])?;
    let q5 = oneof(&mut survey, "Question 5", ["maeby", "george"])?;
    let block2 = survey.block_of([Content::from(q4), Content::from(q5)])?;

    let q8 = oneof(&mut survey, "Question 8", ["lupe", "marky mark", "tony wonder"])?;
    let block3 = survey.block_of([Content::from(q8)])?;

    let q10 = survey.question(QuestionType::OneOf, "Her?");
    let block4 = survey.block_of([Content::from(q10)])?;

    for block in [block1, block2, block3, block4] {
        survey.add_block(block)?;
    }

    let breakfast = survey.constrain(q3)?;
    survey
        .constraint_mut(breakfast)?
        .add_branch_by_op_text("eggs", block2)?
        .add_branch_by_op_text("ham", block3)?;

    let second = survey.constrain(q1)?;
    survey
        .constraint_mut(second)?
        .add_branch_by_index(0, block4)?
        .add_branch_by_index(1, block3)?
        .add_branch_by_index(2, block3)?;

    Ok(survey)
}
