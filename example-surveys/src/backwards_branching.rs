use survey_types::{Content, QuestionType, Survey};

use crate::oneof;

/// Six blocks where question 7 in the second block branches back to the first.
///
/// Validation fails with a non-forward branch on question 7.
pub fn backwards_branching() -> anyhow::Result<Survey> {
    let mut survey = Survey::new().with_name("Backwards branching");

    let q1 = oneof(&mut survey, "Question 1", ["foo", "bar", "baz"])?;
    let q2 = oneof(&mut survey, "Question 2", ["boo", "far", "faz"])?;
    let q3 = oneof(&mut survey, "Question 3", ["eggs", "ham"])?;
    let block1 = survey.block_of([q1, q2, q3].map(Content::from))?;

    let q4 = oneof(&mut survey, "Question 4", ["oscar", "lucille", "george"])?;
    let q5 = oneof(&mut survey, "Question 5", ["maeby", "george"])?;
    let q6 = oneof(&mut survey, "Question 6", ["gob", "lindsay"])?;
    let q7 = oneof(&mut survey, "Question 7", ["anne veal", "gene parmesean"])?;
    let block2 = survey.block_of([q4, q5, q6, q7].map(Content::from))?;

    let q8 = oneof(&mut survey, "Question 8", ["lupe", "marky mark", "tony wonder"])?;
    let q9 = oneof(&mut survey, "Question 9", ["whooopsie", "daisy"])?;
    let block3 = survey.block_of([Content::from(q8), Content::from(q9)])?;

    let tail = [
        "Her?",
        "Would you mind telling us how this survey made you feel?",
        "Did someone say wonder?",
    ];
    let mut blocks = vec![block1, block2, block3];
    for text in tail {
        let question = survey.question(QuestionType::OneOf, text);
        blocks.push(survey.block_of([Content::from(question)])?);
    }
    for block in blocks {
        survey.add_block(block)?;
    }

    let breakfast = survey.constrain(q3)?;
    survey
        .constraint_mut(breakfast)?
        .add_branch_by_op_text("eggs", block2)?
        .add_branch_by_op_text("ham", block3)?;

    let backwards = survey.constrain(q7)?;
    survey
        .constraint_mut(backwards)?
        .add_branch_by_index(0, block1)?
        .add_branch_by_index(1, block1)?;

    Ok(survey)
}
