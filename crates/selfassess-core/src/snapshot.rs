//! Persisted snapshot of an in-progress survey.
//!
//! The JSON shape is
//! `{ "answers": {"<question>": rating}, "currentSection": n, "sectionScores": {"<section>": n} }`.
//! Section scores are carried for display only; restoring recomputes them
//! from the answers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SurveyError;
use crate::model::{validate_answer, QuestionId, Rating, Section, QUESTIONS_PER_SECTION};

/// Serializable projection of the engine state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Question index to rating.
    #[serde(default)]
    pub answers: BTreeMap<u32, u32>,
    /// Section the survey is currently on.
    #[serde(alias = "currentPart")]
    pub current_section: u32,
    /// Cached per-section scores at the time of the snapshot.
    #[serde(default)]
    pub section_scores: BTreeMap<u32, u32>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            answers: BTreeMap::new(),
            current_section: Section::FIRST.number(),
            section_scores: Section::all().map(|s| (s.number(), 0)).collect(),
        }
    }
}

/// A snapshot that passed validation.
#[derive(Debug)]
pub(crate) struct ValidSnapshot {
    pub answers: Vec<(QuestionId, Rating)>,
    pub current: Section,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, SurveyError> {
        serde_json::to_string_pretty(self).map_err(|e| SurveyError::InvalidSnapshot(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SurveyError> {
        serde_json::from_str(json).map_err(|e| SurveyError::InvalidSnapshot(e.to_string()))
    }

    /// Validate every answer and the section pointer. Any bad entry rejects
    /// the whole snapshot. The pointer may only sit past sections that are
    /// fully answered, since advancing requires a complete section.
    pub(crate) fn validate(&self) -> Result<ValidSnapshot, SurveyError> {
        let answers = self
            .answers
            .iter()
            .map(|(&question, &value)| {
                validate_answer(question, value).map_err(|_| {
                    SurveyError::InvalidSnapshot(format!(
                        "answer {value} for question {question} is out of range"
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let current = Section::new(self.current_section).map_err(|_| {
            SurveyError::InvalidSnapshot(format!(
                "current section {} is out of range",
                self.current_section
            ))
        })?;

        for section in Section::all().take_while(|s| *s < current) {
            let answered = section
                .questions()
                .filter(|q| self.answers.contains_key(&q.number()))
                .count();
            if answered < QUESTIONS_PER_SECTION as usize {
                return Err(SurveyError::InvalidSnapshot(format!(
                    "current section {} is past incomplete {section}",
                    current.number()
                )));
            }
        }

        Ok(ValidSnapshot { answers, current })
    }
}
