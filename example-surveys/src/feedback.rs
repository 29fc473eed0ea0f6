use survey_types::{Content, QuestionType, Survey};

/// A short course-feedback form using every question kind.
///
/// Respondents who did not attend skip straight to the closing block. Both
/// rating questions branch to the closing block, making theirs a branch-all
/// block.
pub fn feedback() -> anyhow::Result<Survey> {
    let mut survey = Survey::with_id("course-feedback")
        .with_name("Course feedback")
        .with_breakoff(false);

    let welcome = survey.instruction("Thanks for taking a minute to tell us about the course.");
    let attended = survey.question_of_type("oneof", "Did you attend the course?")?;
    let yes = survey.add_option_text(attended, "Yes")?;
    survey.add_option_text(attended, "No")?;
    let intro = survey.block_of([Content::from(welcome), Content::from(attended)])?;

    let pace = survey.question(QuestionType::Likert, "How was the pace?");
    for text in ["Too slow", "About right", "Too fast"] {
        survey.add_option_text(pace, text)?;
    }
    let topics = survey.question(QuestionType::Checkbox, "Which topics were useful?");
    for text in ["<b>Ownership</b>", "Traits", "Async"] {
        survey.add_option_text(topics, text)?;
    }
    survey.question_mut(topics)?.set_shuffle(false)?;
    let ratings = survey.block_of([Content::from(pace), Content::from(topics)])?;

    let student_id = survey.free_text("Student number", None, Some("[0-9]{6}".into()))?;
    let comments = survey.free_text("Anything else?", Some("Nothing".into()), None)?;
    let email = survey.free_text("Email, if you want a reply", None, None)?;
    let closing = survey.block_of([student_id, comments, email].map(Content::from))?;

    survey.add_block(intro)?;
    survey.add_block(closing)?;
    survey.add_block_by_index(ratings, 1)?;

    let skip = survey.constrain(attended)?;
    survey
        .constraint_mut(skip)?
        .add_branch(&yes, ratings)?
        .add_branch_by_op_text("No", closing)?;

    for question in [pace, topics] {
        let constraint = survey.constrain(question)?;
        let mut map = survey.constraint_mut(constraint)?;
        for index in 0..3 {
            map.add_branch_by_index(index, closing)?;
        }
    }

    Ok(survey)
}
