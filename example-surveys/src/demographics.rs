use survey_types::{Content, QuestionId, Survey};

use crate::oneof;

/// A demographics questionnaire for crowd workers. The country question sends
/// US residents to a state question and everyone else past it.
pub fn demographics() -> anyhow::Result<Survey> {
    let mut survey = Survey::new().with_name("Worker demographics");

    let gender = oneof(&mut survey, "What is your gender?", ["Male", "Female", "Other"])?;
    let birth_year = oneof(
        &mut survey,
        "What is your year of birth?",
        (1950..1996).map(|year| year.to_string()),
    )?;
    let education = oneof(
        &mut survey,
        "Which of the following best describes your highest achieved education level?",
        [
            "Some High School",
            "High School Graduate",
            "Some College, no Degree",
            "Associates Degree",
            "Bachelors Degree",
            "Graduate Degree, Masters",
            "Graduate Degree, Doctorate",
        ],
    )?;
    let income = oneof(
        &mut survey,
        "What is the total income of your household?",
        [
            "Less than $10,000",
            "$10,000 - $14,999",
            "$15,000 - $24,999",
            "$25,000 - $39,499",
            "$40,500 - $59,999",
            "$60,000 - $74,999",
            "$75,000 - $99,999",
            "$100,000 - $149,999",
            "More than $150,000",
        ],
    )?;
    let marital = oneof(
        &mut survey,
        "What is your marital status?",
        [
            "Cohabitating",
            "Divorced",
            "Engaged",
            "Married",
            "Separated",
            "Single",
            "Widowed",
        ],
    )?;
    let children = oneof(
        &mut survey,
        "Do you have children?",
        [
            "No children",
            "Yes, 1 child",
            "Yes, 2 children",
            "Yes, 3 children",
            "Yes, 4 children",
        ],
    )?;
    let household = oneof(
        &mut survey,
        "How many members in your household?",
        (1..4).map(|n| n.to_string()),
    )?;
    let country = oneof(
        &mut survey,
        "In which country do you live?",
        ["United States", "India", "Other"],
    )?;
    let race = oneof(
        &mut survey,
        "Please indicate your race.",
        [
            "American Indian or Alaska Native",
            "Asian",
            "Black Latino",
            "Black or African American",
            "Native Hawaiian or Other Pacific Islander",
            "White Latino",
            "White",
            "2 or more races",
            "Unknown",
        ],
    )?;

    let state = oneof(
        &mut survey,
        "In which state do you live?",
        ["Massachusetts", "some other state (too many to list)"],
    )?;

    let work = work_questions(&mut survey)?;

    let about_you = survey.block_of(
        [
            gender, birth_year, education, income, marital, children, household, country, race,
        ]
        .map(Content::from),
    )?;
    let residence = survey.block_of([Content::from(state)])?;
    let working = survey.block_of(work.into_iter().map(Content::from))?;

    for block in [about_you, residence, working] {
        survey.add_block(block)?;
    }

    let branch = survey.constrain(country)?;
    survey
        .constraint_mut(branch)?
        .add_branch_by_index(0, residence)?
        .add_branch_by_index(1, working)?
        .add_branch_by_index(2, working)?;

    Ok(survey)
}

fn work_questions(survey: &mut Survey) -> anyhow::Result<Vec<QuestionId>> {
    Ok(vec![
        oneof(
            survey,
            "Why do you complete tasks in Mechanical Turk? Please check any of the following that applies:",
            [
                "Fruitful way to spend free time and get some cash (e.g., instead of watching TV).",
                "For primary income purposes (e.g., gas, bills, groceries, credit cards).",
                "For secondary income purposes, pocket change (for hobbies, gadgets, going out).",
                "To kill time.",
                "I find the tasks to be fun.",
                "I am currently unemployed, or have only a part time job.",
            ],
        )?,
        oneof(
            survey,
            "Has the recession affected your decision to participate on MTurk?",
            ["Yes", "No"],
        )?,
        oneof(
            survey,
            "Has the recession affected your level of participation on MTurk?",
            ["Yes", "No"],
        )?,
        oneof(
            survey,
            "For how long have you been working on Amazon Mechanical Turk?",
            [
                "< 6 mos.", "6mos-1yr", "1-2yrs", "2-3yrs", "3-5yrs", "5-7yrs", "7-9yrs",
                "9-15yrs", "15+",
            ],
        )?,
        oneof(
            survey,
            "How much do you earn per week on Mechanical Turk?",
            [
                "Less than $1 per week",
                "$1-$5 per week.",
                "$5-$10 per week.",
                "$10-$20 per week.",
                "$20-$50 per week.",
                "$50-$100 per week.",
                "$100-$200 per week.",
                "$200-$500 per week.",
                "More than $500 per week.",
            ],
        )?,
        oneof(
            survey,
            "How much time do you spend per week on Mechanical Turk?",
            [
                "Less than 1 hour per week.",
                "1-2 hours per week.",
                "2-4 hours per week.",
                "4-8 hours per week.",
                "8-20 hours per week.",
                "20-40 hours per week.",
                "More than 40 hours per week.",
            ],
        )?,
        oneof(
            survey,
            "How many HITs do you complete per week on Mechanical Turk?",
            [
                "Less than 1 HIT per week.",
                "1-5 HITs per week.",
                "5-10 HITs per week.",
                "10-20 HITs per week.",
                "20-50 HITs per week.",
                "50-100 HITs per week.",
                "100-200 HITs per week.",
                "200-500 HITs per week.",
                "500-1000 HITs per week.",
                "1000-5000 HITs per week.",
                "More than 5000 HITs per week.",
            ],
        )?,
    ])
}
