//! The JSON document handed to the survey runtime.
//!
//! [`Survey::to_document`] validates a survey and maps it onto these types;
//! [`SurveyDocument::from_json`] parses an emitted document back. Documents
//! refer to blocks and options by their string ids only.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::{
    BlockId, BranchTarget, CONTINUE_TOKEN, ConstraintId, FreeTextMode, Question, QuestionKind,
    QuestionType, Result, Survey,
};

/// The top-level document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyDocument {
    /// Top-level blocks in order.
    pub survey: Vec<BlockDocument>,
    pub breakoff: bool,
    #[serde(default)]
    pub correlation: serde_json::Map<String, serde_json::Value>,
    #[serde(rename = "otherValues", default)]
    pub other_values: serde_json::Map<String, serde_json::Value>,
}

impl SurveyDocument {
    /// Parse a document produced by [`Survey::jsonize`].
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Every question in the document, block by block, depth first.
    pub fn questions(&self) -> Vec<&QuestionDocument> {
        fn collect<'a>(block: &'a BlockDocument, found: &mut Vec<&'a QuestionDocument>) {
            found.extend(&block.questions);
            for subblock in &block.subblocks {
                collect(subblock, found);
            }
        }

        let mut found = Vec::new();
        for block in &self.survey {
            collect(block, &mut found);
        }
        found
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDocument {
    pub id: String,
    pub questions: Vec<QuestionDocument>,
    pub randomize: bool,
    pub subblocks: Vec<BlockDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDocument {
    pub id: String,
    pub otext: String,
}

/// A question, shaped by its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionDocument {
    Choice {
        id: String,
        qtext: String,
        breakoff: bool,
        options: Vec<OptionDocument>,
        randomize: bool,
        ordered: bool,
        exclusive: bool,
        #[serde(rename = "branchMap", default, skip_serializing_if = "Option::is_none")]
        branch_map: Option<BranchMapDocument>,
    },
    FreeText {
        id: String,
        qtext: String,
        breakoff: bool,
        freetext: FreeTextValue,
    },
    Instruction {
        id: String,
        qtext: String,
        breakoff: bool,
    },
}

impl QuestionDocument {
    pub fn id(&self) -> &str {
        match self {
            Self::Choice { id, .. } | Self::FreeText { id, .. } | Self::Instruction { id, .. } => {
                id
            }
        }
    }

    /// Recover the question kind from the `ordered`, `exclusive` and
    /// `freetext` fields.
    pub fn question_type(&self) -> QuestionType {
        match self {
            Self::Choice { ordered: true, .. } => QuestionType::Likert,
            Self::Choice {
                exclusive: true, ..
            } => QuestionType::OneOf,
            Self::Choice { .. } => QuestionType::Checkbox,
            Self::FreeText { .. } => QuestionType::FreeText,
            Self::Instruction { .. } => QuestionType::Instruction,
        }
    }

    pub fn branch_map(&self) -> Option<&BranchMapDocument> {
        match self {
            Self::Choice { branch_map, .. } => branch_map.as_ref(),
            Self::FreeText { .. } | Self::Instruction { .. } => None,
        }
    }
}

/// The `freetext` field: `true`, a default value, or `#{pattern}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FreeTextValue {
    Flag(bool),
    Text(String),
}

impl FreeTextValue {
    /// The validation pattern, if the value is a `#{...}` wrapper.
    pub fn pattern(&self) -> Option<&str> {
        match self {
            Self::Text(text) => text.strip_prefix("#{")?.strip_suffix('}'),
            Self::Flag(_) => None,
        }
    }
}

impl From<&FreeTextMode> for FreeTextValue {
    fn from(mode: &FreeTextMode) -> Self {
        match mode {
            FreeTextMode::Unconstrained => Self::Flag(true),
            FreeTextMode::Default(default) => Self::Text(default.clone()),
            FreeTextMode::Pattern(pattern) => Self::Text(format!("#{{{pattern}}}")),
        }
    }
}

/// Option id to target block id, in option order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchMapDocument(Vec<(String, String)>);

impl BranchMapDocument {
    pub fn entries(&self) -> &[(String, String)] {
        &self.0
    }

    /// The target recorded for `option`.
    pub fn get(&self, option: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(id, _)| id == option)
            .map(|(_, target)| target.as_str())
    }

    /// Target block ids in option order, continue tokens included.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(_, target)| target.as_str())
    }
}

impl Serialize for BranchMapDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (option, target) in &self.0 {
            map.serialize_entry(option, target)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for BranchMapDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = BranchMapDocument;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from option ids to block ids")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, String>()? {
                    entries.push(entry);
                }
                Ok(BranchMapDocument(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl Survey {
    /// Validate and build the wire document.
    pub fn to_document(&self) -> Result<SurveyDocument> {
        self.validate()?;
        let survey = self
            .blocks()
            .iter()
            .map(|&block| self.block_document(block))
            .collect::<Result<Vec<_>>>()?;
        debug!(survey = %self.id(), blocks = survey.len(), "built survey document");
        Ok(SurveyDocument {
            survey,
            breakoff: self.breakoff(),
            correlation: serde_json::Map::new(),
            other_values: serde_json::Map::new(),
        })
    }

    /// Validate and render the survey as compact JSON.
    pub fn jsonize(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_document()?)?)
    }

    /// Validate and render the survey as indented JSON.
    pub fn jsonize_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document()?)?)
    }

    fn block_document(&self, block: BlockId) -> Result<BlockDocument> {
        let entry = self.block_ref(block)?;
        Ok(BlockDocument {
            id: entry.id().to_string(),
            questions: entry
                .questions()
                .map(|question| self.question_document(self.question_ref(question)?))
                .collect::<Result<_>>()?,
            randomize: entry.randomize(),
            subblocks: entry
                .subblocks()
                .map(|subblock| self.block_document(subblock))
                .collect::<Result<_>>()?,
        })
    }

    fn question_document(&self, question: &Question) -> Result<QuestionDocument> {
        let id = question.id().to_string();
        let qtext = question.text().to_string();
        let breakoff = question.breakoff();

        let choices = match question.kind() {
            QuestionKind::Likert(choices)
            | QuestionKind::Checkbox(choices)
            | QuestionKind::OneOf(choices) => choices,
            QuestionKind::FreeText(free_text) => {
                return Ok(QuestionDocument::FreeText {
                    id,
                    qtext,
                    breakoff,
                    freetext: free_text.mode().into(),
                });
            }
            QuestionKind::Instruction => {
                return Ok(QuestionDocument::Instruction {
                    id,
                    qtext,
                    breakoff,
                });
            }
        };

        let kind = question.question_type();
        let branch_map = question
            .constraint()
            .map(|constraint| self.branch_map_document(constraint))
            .transpose()?;

        Ok(QuestionDocument::Choice {
            id,
            qtext,
            breakoff,
            options: choices
                .options()
                .iter()
                .map(|option| OptionDocument {
                    id: option.id().to_string(),
                    otext: option.text().to_string(),
                })
                .collect(),
            randomize: !kind.is_ordered() && choices.shuffle(),
            ordered: kind.is_ordered(),
            exclusive: kind.is_exclusive(),
            branch_map,
        })
    }

    fn branch_map_document(&self, constraint: ConstraintId) -> Result<BranchMapDocument> {
        let entries = self
            .constraint_ref(constraint)?
            .branches()
            .iter()
            .map(|(option, target)| {
                let target = match target {
                    BranchTarget::Continue => CONTINUE_TOKEN.to_string(),
                    BranchTarget::Block(block) => self.block_ref(*block)?.id().to_string(),
                };
                Ok((option.to_string(), target))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(BranchMapDocument(entries))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::{Content, SurveyError};

    #[test]
    fn likert_without_constraint() {
        let mut survey = Survey::new();
        let question = survey.question(QuestionType::Likert, "How much?");
        for text in ["little", "some", "lots"] {
            survey.add_option_text(question, text).unwrap();
        }
        let block = survey.block_of([Content::from(question)]).unwrap();
        survey.add_block(block).unwrap();

        let value: Value = serde_json::from_str(&survey.jsonize().unwrap()).unwrap();
        let question = &value["survey"][0]["questions"][0];
        assert_eq!(question["ordered"], json!(true));
        assert_eq!(question["exclusive"], json!(true));
        assert_eq!(question["randomize"], json!(false));
        assert_eq!(question["options"].as_array().unwrap().len(), 3);
        assert!(question.get("branchMap").is_none());
    }

    #[test]
    fn survey_envelope() {
        let mut survey = Survey::new().with_breakoff(false);
        let block = survey.block();
        survey.add_block(block).unwrap();

        let value: Value = serde_json::from_str(&survey.jsonize().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "survey": [{"id": "b_1", "questions": [], "randomize": false, "subblocks": []}],
                "breakoff": false,
                "correlation": {},
                "otherValues": {},
            })
        );
    }

    #[test]
    fn free_text_encodings() {
        assert_eq!(
            FreeTextValue::from(&FreeTextMode::Unconstrained),
            FreeTextValue::Flag(true)
        );
        assert_eq!(
            FreeTextValue::from(&FreeTextMode::Default("n/a".into())),
            FreeTextValue::Text("n/a".into())
        );

        let pattern = FreeTextValue::from(&FreeTextMode::Pattern("[0-9]+".into()));
        assert_eq!(pattern, FreeTextValue::Text("#{[0-9]+}".into()));
        assert_eq!(pattern.pattern(), Some("[0-9]+"));
        assert_eq!(FreeTextValue::Text("n/a".into()).pattern(), None);
    }

    #[test]
    fn branch_map_keeps_option_order() {
        let mut survey = Survey::new();
        let question = survey.question(QuestionType::OneOf, "Where?");
        let options: Vec<_> = ["z", "a", "m"]
            .into_iter()
            .map(|text| survey.add_option_text(question, text).unwrap())
            .collect();
        let first = survey.block_of([Content::from(question)]).unwrap();
        let second = survey.block();
        survey.add_block(first).unwrap();
        survey.add_block(second).unwrap();
        let constraint = survey.constrain(question).unwrap();
        survey
            .constraint_mut(constraint)
            .unwrap()
            .add_branch_by_index(1, second)
            .unwrap();

        let document = survey.to_document().unwrap();
        let branch_map = document.questions()[0].branch_map().unwrap();
        let keys: Vec<_> = branch_map.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            options.iter().map(|option| option.as_str()).collect::<Vec<_>>()
        );
        assert_eq!(
            branch_map.targets().collect::<Vec<_>>(),
            vec![CONTINUE_TOKEN, "b_2", CONTINUE_TOKEN]
        );
    }

    #[test]
    fn invalid_survey_is_not_emitted() {
        let mut survey = Survey::new();
        let question = survey.question(QuestionType::OneOf, "Back?");
        survey.add_option_text(question, "yes").unwrap();
        let block = survey.block_of([Content::from(question)]).unwrap();
        survey.add_block(block).unwrap();
        let constraint = survey.constrain(question).unwrap();
        survey
            .constraint_mut(constraint)
            .unwrap()
            .add_branch_by_index(0, block)
            .unwrap();

        assert!(matches!(
            survey.jsonize(),
            Err(SurveyError::NonForwardBranch { .. })
        ));
    }

    #[test]
    fn question_type_from_flags() {
        let json = r#"{"id": "q_1", "qtext": "", "breakoff": true, "options": [],
            "randomize": true, "ordered": false, "exclusive": false}"#;
        let question: QuestionDocument = serde_json::from_str(json).unwrap();
        assert_eq!(question.question_type(), QuestionType::Checkbox);

        let json = r##"{"id": "q_2", "qtext": "", "breakoff": true, "freetext": "#{.*}"}"##;
        let question: QuestionDocument = serde_json::from_str(json).unwrap();
        assert_eq!(question.question_type(), QuestionType::FreeText);

        let json = r#"{"id": "q_3", "qtext": "Read me", "breakoff": false}"#;
        let question: QuestionDocument = serde_json::from_str(json).unwrap();
        assert_eq!(question.question_type(), QuestionType::Instruction);
        assert_eq!(question.id(), "q_3");
    }
}
