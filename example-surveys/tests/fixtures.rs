//! End-to-end checks of the example surveys

use example_surveys::{
    backwards_branching, branch_to_subblock, demographics, feedback, simple, subblocks,
    two_branches_one_block,
};
use serde_json::{Value, json};
use survey_types::{CONTINUE_TOKEN, PolicyRule, QuestionType, SurveyDocument, SurveyError};

#[test]
fn test_simple_survey_validates() {
    let survey = simple().unwrap();
    survey.validate().unwrap();

    let document = survey.to_document().unwrap();
    let ids: Vec<_> = document.survey.iter().map(|block| block.id.as_str()).collect();
    assert_eq!(ids, ["b_4", "b_3"]);

    let nested: Vec<_> = document.survey[0]
        .subblocks
        .iter()
        .map(|block| block.id.as_str())
        .collect();
    assert_eq!(nested, ["b_4.b_1", "b_4.b_2"]);

    let branching = document
        .questions()
        .into_iter()
        .find(|question| question.id() == "q_3")
        .unwrap();
    let targets: Vec<_> = branching.branch_map().unwrap().targets().collect();
    assert_eq!(targets, ["b_3", CONTINUE_TOKEN, CONTINUE_TOKEN]);
}

#[test]
fn test_subblocks_survey_validates() {
    let survey = subblocks().unwrap();
    let document = survey.to_document().unwrap();
    assert_eq!(document.survey.len(), 5);

    let first = &document.survey[0];
    let nested: Vec<_> = first.subblocks.iter().map(|block| block.id.as_str()).collect();
    assert_eq!(nested, ["b_1.b_2", "b_1.b_3", "b_1.b_6"]);
    assert_eq!(first.questions.len(), 2);

    // Grandchildren keep the id they got when their own parent was still detached.
    let grandchildren: Vec<_> = first.subblocks[1]
        .subblocks
        .iter()
        .map(|block| block.id.as_str())
        .collect();
    assert_eq!(grandchildren, ["b_3.b_4", "b_3.b_5"]);

    assert_eq!(document.questions().len(), 21);
}

#[test]
fn test_demographics_branch_map() {
    let survey = demographics().unwrap();
    let json = survey.jsonize().unwrap();
    let document = SurveyDocument::from_json(&json).unwrap();

    let country = document
        .questions()
        .into_iter()
        .find(|question| question.branch_map().is_some())
        .unwrap();
    assert_eq!(country.id(), "q_8");
    let targets: Vec<_> = country.branch_map().unwrap().targets().collect();
    assert_eq!(targets, ["b_2", "b_3", "b_3"]);
}

#[test]
fn test_backwards_branching_is_rejected() {
    let survey = backwards_branching().unwrap();
    match survey.validate() {
        Err(SurveyError::NonForwardBranch { question, text }) => {
            assert_eq!(question, "q_7");
            assert_eq!(text, "Question 7");
        }
        other => panic!("expected a non-forward branch, got {other:?}"),
    }
    assert!(survey.jsonize().is_err());
}

#[test]
fn test_two_branches_in_one_block_are_rejected() {
    let survey = two_branches_one_block().unwrap();
    let err = survey.validate().unwrap_err();
    assert!(matches!(
        err,
        SurveyError::PolicyViolation {
            ref block,
            rule: PolicyRule::TooManyBranchQuestions,
        } if block == "b_1"
    ));
}

#[test]
fn test_branch_to_subblock_is_rejected() {
    let survey = branch_to_subblock().unwrap();
    let err = survey.validate().unwrap_err();
    assert!(matches!(
        err,
        SurveyError::BranchTargetNotInSurvey { ref question, ref target }
            if question == "q_3" && target == "b_4.b_1"
    ));
}

#[test]
fn test_feedback_document() {
    let survey = feedback().unwrap();
    let value: Value = serde_json::from_str(&survey.jsonize().unwrap()).unwrap();

    assert_eq!(value["breakoff"], json!(false));
    let blocks = value["survey"].as_array().unwrap();
    let ids: Vec<_> = blocks.iter().map(|block| block["id"].clone()).collect();
    assert_eq!(ids, [json!("b_1"), json!("b_2"), json!("b_3")]);

    let welcome = &blocks[0]["questions"][0];
    assert_eq!(welcome.as_object().unwrap().len(), 3);
    assert_eq!(welcome["breakoff"], json!(true));

    let pace = &blocks[1]["questions"][0];
    assert_eq!(pace["ordered"], json!(true));
    assert_eq!(pace["randomize"], json!(false));
    let topics = &blocks[1]["questions"][1];
    assert_eq!(topics["exclusive"], json!(false));
    assert_eq!(topics["randomize"], json!(false));
    assert_eq!(topics["options"][0]["otext"], json!("<b>Ownership</b>"));

    let closing = blocks[2]["questions"].as_array().unwrap();
    assert_eq!(closing[0]["freetext"], json!("#{[0-9]{6}}"));
    assert_eq!(closing[1]["freetext"], json!("Nothing"));
    assert_eq!(closing[2]["freetext"], json!(true));
}

#[test]
fn test_feedback_kinds_survive_round_trip() {
    let survey = feedback().unwrap();
    let document = SurveyDocument::from_json(&survey.jsonize().unwrap()).unwrap();
    let kinds: Vec<_> = document
        .questions()
        .into_iter()
        .map(|question| question.question_type())
        .collect();
    assert_eq!(
        kinds,
        [
            QuestionType::Instruction,
            QuestionType::OneOf,
            QuestionType::Likert,
            QuestionType::Checkbox,
            QuestionType::FreeText,
            QuestionType::FreeText,
            QuestionType::FreeText,
        ]
    );
}
