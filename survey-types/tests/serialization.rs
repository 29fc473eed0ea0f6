//! Integration tests for the emitted survey document

use serde_json::Value;
use survey_types::{
    BranchTarget, Content, QuestionDocument, QuestionType, Survey, SurveyDocument, SurveyError,
};

/// Breakfast survey: question 3 sends `eggs` to the second block and `ham` to
/// the third.
fn breakfast(order: [usize; 3]) -> (Survey, [survey_types::BlockId; 3]) {
    let mut survey = Survey::new();
    let q1 = survey.question(QuestionType::OneOf, "Question 1");
    survey.add_option_text(q1, "foo").unwrap();
    let q3 = survey.question(QuestionType::OneOf, "Question 3");
    survey.add_option_text(q3, "eggs").unwrap();
    survey.add_option_text(q3, "ham").unwrap();

    let block1 = survey
        .block_of([Content::from(q1), Content::from(q3)])
        .unwrap();
    let block2 = survey.block();
    let block3 = survey.block();
    let blocks = [block1, block2, block3];
    for index in order {
        survey.add_block(blocks[index]).unwrap();
    }

    let constraint = survey.constrain(q3).unwrap();
    survey
        .constraint_mut(constraint)
        .unwrap()
        .add_branch_by_op_text("eggs", block2)
        .unwrap()
        .add_branch_by_op_text("ham", block3)
        .unwrap();
    (survey, blocks)
}

#[test]
fn test_round_trip_keeps_ids_kinds_and_targets() {
    let (survey, _) = breakfast([0, 1, 2]);
    let json = survey.jsonize().unwrap();
    let document = SurveyDocument::from_json(&json).unwrap();

    let ids: Vec<_> = document.survey.iter().map(|block| block.id.as_str()).collect();
    assert_eq!(ids, ["b_1", "b_2", "b_3"]);

    let questions = document.questions();
    assert!(
        questions
            .iter()
            .all(|question| question.question_type() == QuestionType::OneOf)
    );

    let branch_map = questions[1].branch_map().unwrap();
    assert_eq!(branch_map.get("comp_2"), Some("b_2"));
    assert_eq!(branch_map.get("comp_3"), Some("b_3"));

    assert_eq!(document, survey.to_document().unwrap());
}

#[test]
fn test_jsonize_is_idempotent() {
    let (survey, _) = breakfast([0, 1, 2]);
    assert_eq!(survey.jsonize().unwrap(), survey.jsonize().unwrap());
    assert_eq!(
        survey.jsonize_pretty().unwrap(),
        survey.jsonize_pretty().unwrap()
    );
}

#[test]
fn test_pretty_and_compact_agree() {
    let (survey, _) = breakfast([0, 1, 2]);
    let compact: Value = serde_json::from_str(&survey.jsonize().unwrap()).unwrap();
    let pretty: Value = serde_json::from_str(&survey.jsonize_pretty().unwrap()).unwrap();
    assert_eq!(compact, pretty);
}

#[test]
fn test_target_before_branch_question_is_rejected() {
    let (survey, _) = breakfast([2, 0, 1]);
    let err = survey.jsonize().unwrap_err();
    assert!(matches!(
        err,
        SurveyError::NonForwardBranch { ref question, ref text }
            if question == "q_2" && text == "Question 3"
    ));
}

#[test]
fn test_branch_back_to_own_block_is_rejected() {
    let (mut survey, [block1, ..]) = breakfast([0, 1, 2]);
    let constraint = survey.constraints()[0];
    survey
        .constraint_mut(constraint)
        .unwrap()
        .add_branch_by_index(0, block1)
        .unwrap()
        .add_branch_by_index(1, block1)
        .unwrap();

    let err = survey.validate().unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_resetting_to_continue_drops_the_jump() {
    let (mut survey, _) = breakfast([2, 0, 1]);
    let constraint = survey.constraints()[0];
    survey
        .constraint_mut(constraint)
        .unwrap()
        .add_branch_by_index(1, BranchTarget::Continue)
        .unwrap();

    let document = survey.to_document().unwrap();
    let question = document.questions()[1].clone();
    let QuestionDocument::Choice { branch_map, .. } = question else {
        panic!("expected a choice question");
    };
    let targets: Vec<_> = branch_map.unwrap().targets().map(str::to_string).collect();
    assert_eq!(targets, ["b_2", "NEXT"]);
}
