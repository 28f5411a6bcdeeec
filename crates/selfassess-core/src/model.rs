//! Core data model types for selfassess.
//!
//! Questions are numbered 1 to 30 and grouped into five sections ("parts")
//! of six consecutive questions each. Every question takes a rating from 0
//! to 3.

use std::fmt;

use crate::error::SurveyError;

/// Number of questions in the survey.
pub const QUESTION_COUNT: u32 = 30;
/// Number of sections.
pub const SECTION_COUNT: u32 = 5;
/// Questions owned by each section.
pub const QUESTIONS_PER_SECTION: u32 = 6;
/// Highest rating a single question can take.
pub const MAX_RATING: u32 = 3;
/// Highest score a single section can reach.
pub const MAX_SECTION_SCORE: u32 = QUESTIONS_PER_SECTION * MAX_RATING;
/// Highest total score.
pub const MAX_TOTAL_SCORE: u32 = QUESTION_COUNT * MAX_RATING;

/// One of the five survey sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Section(u32);

impl Section {
    pub const FIRST: Section = Section(1);
    pub const LAST: Section = Section(SECTION_COUNT);

    pub fn new(number: u32) -> Result<Self, SurveyError> {
        if (1..=SECTION_COUNT).contains(&number) {
            Ok(Section(number))
        } else {
            Err(SurveyError::InvalidSection(number))
        }
    }

    /// The 1-based section number.
    pub fn number(self) -> u32 {
        self.0
    }

    /// Zero-based position, for indexing per-section arrays.
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    pub fn first_question(self) -> QuestionId {
        QuestionId((self.0 - 1) * QUESTIONS_PER_SECTION + 1)
    }

    pub fn last_question(self) -> QuestionId {
        QuestionId(self.0 * QUESTIONS_PER_SECTION)
    }

    /// The six questions owned by this section, in order.
    pub fn questions(self) -> impl Iterator<Item = QuestionId> {
        (self.first_question().0..=self.last_question().0).map(QuestionId)
    }

    pub fn next(self) -> Option<Section> {
        Section::new(self.0 + 1).ok()
    }

    pub fn prev(self) -> Option<Section> {
        Section::new(self.0.checked_sub(1)?).ok()
    }

    /// All sections in order.
    pub fn all() -> impl Iterator<Item = Section> {
        (1..=SECTION_COUNT).map(Section)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Part {}", self.0)
    }
}

/// A question index in `1..=30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionId(u32);

impl QuestionId {
    /// Returns `None` for indices outside `1..=30`.
    pub fn new(number: u32) -> Option<Self> {
        (1..=QUESTION_COUNT)
            .contains(&number)
            .then_some(QuestionId(number))
    }

    pub fn number(self) -> u32 {
        self.0
    }

    /// The section that owns this question.
    pub fn section(self) -> Section {
        Section((self.0 - 1) / QUESTIONS_PER_SECTION + 1)
    }

    /// All questions in order.
    pub fn all() -> impl Iterator<Item = QuestionId> {
        (1..=QUESTION_COUNT).map(QuestionId)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

/// A rating on the four-point scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    /// Returns `None` for values outside `0..=3`.
    pub fn new(value: u32) -> Option<Self> {
        (value <= MAX_RATING).then_some(Rating(value as u8))
    }

    pub fn value(self) -> u32 {
        u32::from(self.0)
    }
}

/// Inclusive `(first, last)` question range of a section.
pub fn section_range(section: u32) -> Result<(u32, u32), SurveyError> {
    let section = Section::new(section)?;
    Ok((
        section.first_question().number(),
        section.last_question().number(),
    ))
}

/// Validate a `(question, value)` pair coming from a caller.
pub fn validate_answer(question: u32, value: u32) -> Result<(QuestionId, Rating), SurveyError> {
    match (QuestionId::new(question), Rating::new(value)) {
        (Some(q), Some(r)) => Ok((q, r)),
        _ => Err(SurveyError::InvalidRating { question, value }),
    }
}
