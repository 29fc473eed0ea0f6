use survey_types::{Content, Survey};

use crate::oneof;

/// Five top-level blocks nested up to three levels deep, without branching.
pub fn subblocks() -> anyhow::Result<Survey> {
    let mut survey = Survey::new().with_name("Nested blocks");

    let b1 = survey.block();
    let q1 = oneof(&mut survey, "Block 1a", ["a", "b"])?;
    survey.add_question(b1, q1)?;

    let q2 = oneof(&mut survey, "Block 1.1a", ["c", "d"])?;
    let q3 = oneof(&mut survey, "Block 1.1b", ["e", "f"])?;
    let b1_1 = survey.block_of([Content::from(q2), Content::from(q3)])?;
    survey.add_subblock(b1, b1_1)?;

    let q4 = oneof(&mut survey, "Block 1b", ["g"])?;
    survey.add_question(b1, q4)?;

    let q5 = oneof(&mut survey, "Block 1.2a", ["h"])?;
    let b1_2 = survey.block_of([Content::from(q5)])?;
    let q6 = oneof(&mut survey, "Block 1.2.1b", ["X", "Y"])?;
    let q7 = oneof(&mut survey, "Block 1.2.1a", ["j"])?;
    let q8 = oneof(&mut survey, "Block 1.2.2a", ["k"])?;
    let q9 = oneof(&mut survey, "Block 1.2.2b", ["l"])?;
    let q10 = oneof(&mut survey, "Block 1.2b", ["m"])?;
    let b1_2_1 = survey.block_of([Content::from(q6), Content::from(q7)])?;
    let b1_2_2 = survey.block_of([Content::from(q8), Content::from(q9)])?;
    survey.add_question(b1_2, q10)?;
    survey.add_subblock(b1_2, b1_2_1)?;
    survey.add_subblock(b1_2, b1_2_2)?;

    let q11 = oneof(&mut survey, "Block 1.3a", ["n"])?;
    let q12 = oneof(&mut survey, "Block 1.3b", ["o"])?;
    let q13 = oneof(&mut survey, "Block 1.3c", ["p"])?;
    let b1_3 = survey.block_of([q11, q12, q13].map(Content::from))?;
    survey.add_subblock(b1, b1_2)?;
    survey.add_subblock(b1, b1_3)?;

    let q14 = oneof(&mut survey, "Block 2a", ["q", "r"])?;
    let q15 = oneof(&mut survey, "Block 2c", ["s", "t"])?;
    let b2 = survey.block_of([Content::from(q14), Content::from(q15)])?;

    let q16 = oneof(&mut survey, "Block 3a", ["u", "v"])?;
    let b3 = survey.block_of([Content::from(q16)])?;

    let q17 = oneof(&mut survey, "Block 4a", ["w", "x", "y", "z"])?;
    let b4 = survey.block_of([Content::from(q17)])?;

    let q18 = oneof(&mut survey, "Block 5.1a", ["1", "2", "3"])?;
    let q19 = oneof(&mut survey, "Block 5.1b", ["3", "4"])?;
    let b5_1 = survey.block_of([Content::from(q18), Content::from(q19)])?;
    let q20 = oneof(&mut survey, "Block 5.2a", ["5", "6"])?;
    let q21 = oneof(&mut survey, "Block 5.2b", ["7", "8"])?;
    let b5_2 = survey.block_of([Content::from(q20), Content::from(q21)])?;
    let b5 = survey.block_of([Content::from(b5_1), Content::from(b5_2)])?;

    for block in [b1, b2, b3, b4, b5] {
        survey.add_block(block)?;
    }
    Ok(survey)
}
