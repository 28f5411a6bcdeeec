//! The survey engine.
//!
//! Owns the answer set, the current-section pointer and a per-section score
//! cache. The answer set is the source of truth; the cache is refreshed on
//! every write and rebuilt on restore.

use std::collections::BTreeMap;

use crate::error::SurveyError;
use crate::interpretation::interpret;
use crate::model::{
    validate_answer, QuestionId, Rating, Section, QUESTIONS_PER_SECTION, SECTION_COUNT,
};
use crate::report::{SectionBreakdown, SurveyResult};
use crate::snapshot::Snapshot;

const SECTIONS: usize = SECTION_COUNT as usize;

/// State machine for one survey session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyEngine {
    answers: BTreeMap<QuestionId, Rating>,
    current: Section,
    section_scores: [u32; SECTIONS],
}

impl Default for SurveyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SurveyEngine {
    /// A fresh survey: no answers, on part 1.
    pub fn new() -> Self {
        Self {
            answers: BTreeMap::new(),
            current: Section::FIRST,
            section_scores: [0; SECTIONS],
        }
    }

    /// Store (or overwrite) the rating for a question and return the updated
    /// score of the section that owns it.
    pub fn record_answer(&mut self, question: u32, value: u32) -> Result<u32, SurveyError> {
        let (question, rating) = validate_answer(question, value)?;
        self.answers.insert(question, rating);

        let section = question.section();
        let score = self.sum_section(section);
        self.section_scores[section.index()] = score;

        tracing::debug!(%question, value, %section, score, "recorded answer");
        Ok(score)
    }

    /// Rating recorded for a question, if any.
    pub fn answer(&self, question: u32) -> Option<u32> {
        let question = QuestionId::new(question)?;
        self.answers.get(&question).map(|r| r.value())
    }

    /// All recorded answers as `(question, rating)` pairs in question order.
    pub fn answers(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.answers.iter().map(|(q, r)| (q.number(), r.value()))
    }

    /// Sum of recorded ratings in a section; unanswered questions count 0.
    pub fn compute_section_score(&self, section: u32) -> Result<u32, SurveyError> {
        Ok(self.sum_section(Section::new(section)?))
    }

    /// `true` when every question in the section has a rating.
    pub fn is_section_complete(&self, section: u32) -> Result<bool, SurveyError> {
        let section = Section::new(section)?;
        Ok(self.answered_in(section) == QUESTIONS_PER_SECTION as usize)
    }

    /// Number of answered questions in a section.
    pub fn answered_count(&self, section: u32) -> Result<usize, SurveyError> {
        Ok(self.answered_in(Section::new(section)?))
    }

    /// Cached per-section scores, section 1 first.
    pub fn section_scores(&self) -> [u32; SECTIONS] {
        self.section_scores
    }

    pub fn current_section(&self) -> u32 {
        self.current.number()
    }

    /// Fraction of the survey reached, `current / 5`.
    pub fn progress_fraction(&self) -> f64 {
        f64::from(self.current.number()) / f64::from(SECTION_COUNT)
    }

    /// "Part N of 5".
    pub fn progress_label(&self) -> String {
        format!("{} of {}", self.current, SECTION_COUNT)
    }

    /// Move to the next section. The current section must be complete.
    pub fn advance_section(&mut self) -> Result<u32, SurveyError> {
        self.require_complete(self.current)?;
        let next = self.current.next().ok_or(SurveyError::Boundary {
            from: self.current.number(),
            to: i64::from(self.current.number()) + 1,
        })?;
        tracing::debug!(from = %self.current, to = %next, "advanced section");
        self.current = next;
        Ok(next.number())
    }

    /// Move to the previous section. Always allowed except from part 1.
    pub fn retreat_section(&mut self) -> Result<u32, SurveyError> {
        let prev = self.current.prev().ok_or(SurveyError::Boundary {
            from: self.current.number(),
            to: i64::from(self.current.number()) - 1,
        })?;
        tracing::debug!(from = %self.current, to = %prev, "retreated section");
        self.current = prev;
        Ok(prev.number())
    }

    /// Compute the total and its interpretation. Requires the last section
    /// to be complete; does not change state.
    pub fn finalize_and_interpret(&self) -> Result<SurveyResult, SurveyError> {
        self.require_complete(Section::LAST)?;

        let total: u32 = self.section_scores.iter().sum();
        let band = interpret(total).ok_or(SurveyError::ScoreOutOfRange(total))?;
        let sections = Section::all()
            .map(|s| SectionBreakdown::new(s.number(), self.section_scores[s.index()]))
            .collect();

        tracing::debug!(total, band = band.title, "finalized survey");
        Ok(SurveyResult::new(total, band, sections))
    }

    /// Clear every answer and return to part 1.
    pub fn reset(&mut self) {
        *self = Self::new();
        tracing::debug!("survey reset");
    }

    /// Project the current state into a snapshot.
    pub fn serialize(&self) -> Snapshot {
        Snapshot {
            answers: self.answers().collect(),
            current_section: self.current.number(),
            section_scores: Section::all()
                .map(|s| (s.number(), self.section_scores[s.index()]))
                .collect(),
        }
    }

    /// Replace the state with a snapshot. Section scores are recomputed from
    /// the restored answers; the snapshot's cached scores are ignored.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SurveyError> {
        let valid = snapshot.validate()?;

        let mut restored = Self {
            answers: valid.answers.into_iter().collect(),
            current: valid.current,
            section_scores: [0; SECTIONS],
        };
        for section in Section::all() {
            restored.section_scores[section.index()] = restored.sum_section(section);
        }

        for section in Section::all() {
            let cached = snapshot.section_scores.get(&section.number()).copied();
            let actual = restored.section_scores[section.index()];
            if cached.is_some_and(|c| c != actual) {
                tracing::debug!(%section, ?cached, actual, "stale section score in snapshot");
            }
        }

        *self = restored;
        Ok(())
    }

    fn sum_section(&self, section: Section) -> u32 {
        section
            .questions()
            .filter_map(|q| self.answers.get(&q))
            .map(|r| r.value())
            .sum()
    }

    fn answered_in(&self, section: Section) -> usize {
        section
            .questions()
            .filter(|q| self.answers.contains_key(q))
            .count()
    }

    fn require_complete(&self, section: Section) -> Result<(), SurveyError> {
        let answered = self.answered_in(section);
        let total = QUESTIONS_PER_SECTION as usize;
        if answered < total {
            return Err(SurveyError::IncompleteSection {
                section: section.number(),
                answered,
                total,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpretation::Classification;

    fn answer_section(engine: &mut SurveyEngine, section: u32, value: u32) {
        let (start, end) = crate::model::section_range(section).unwrap();
        for q in start..=end {
            engine.record_answer(q, value).unwrap();
        }
    }

    fn answer_all(value: u32) -> SurveyEngine {
        let mut engine = SurveyEngine::new();
        for section in 1..=5 {
            answer_section(&mut engine, section, value);
        }
        engine
    }

    #[test]
    fn record_returns_running_section_score() {
        let mut engine = SurveyEngine::new();
        assert_eq!(engine.record_answer(1, 2).unwrap(), 2);
        assert_eq!(engine.record_answer(2, 3).unwrap(), 5);
        assert_eq!(engine.record_answer(7, 1).unwrap(), 1);
        assert_eq!(engine.section_scores(), [5, 1, 0, 0, 0]);
    }

    #[test]
    fn rerecording_replaces_value() {
        let mut engine = SurveyEngine::new();
        engine.record_answer(4, 3).unwrap();
        assert_eq!(engine.record_answer(4, 1).unwrap(), 1);
        assert_eq!(engine.answer(4), Some(1));
        assert_eq!(engine.compute_section_score(1).unwrap(), 1);
    }

    #[test]
    fn invalid_answers_leave_state_untouched() {
        let mut engine = SurveyEngine::new();
        engine.record_answer(1, 2).unwrap();
        let before = engine.clone();

        assert!(matches!(
            engine.record_answer(0, 1),
            Err(SurveyError::InvalidRating { .. })
        ));
        assert!(matches!(
            engine.record_answer(31, 1),
            Err(SurveyError::InvalidRating { .. })
        ));
        assert!(matches!(
            engine.record_answer(1, 4),
            Err(SurveyError::InvalidRating { .. })
        ));
        assert_eq!(engine, before);
    }

    #[test]
    fn section_one_all_twos_scores_twelve() {
        let mut engine = SurveyEngine::new();
        answer_section(&mut engine, 1, 2);
        assert_eq!(engine.compute_section_score(1).unwrap(), 12);
        assert!(engine.is_section_complete(1).unwrap());
        assert!(!engine.is_section_complete(2).unwrap());
    }

    #[test]
    fn invalid_section_queries() {
        let engine = SurveyEngine::new();
        assert_eq!(
            engine.compute_section_score(6),
            Err(SurveyError::InvalidSection(6))
        );
        assert_eq!(
            engine.is_section_complete(0),
            Err(SurveyError::InvalidSection(0))
        );
    }

    #[test]
    fn advance_requires_complete_section() {
        let mut engine = SurveyEngine::new();
        for q in 1..=5 {
            engine.record_answer(q, 1).unwrap();
        }
        assert_eq!(
            engine.advance_section(),
            Err(SurveyError::IncompleteSection {
                section: 1,
                answered: 5,
                total: 6
            })
        );
        assert_eq!(engine.current_section(), 1);

        engine.record_answer(6, 0).unwrap();
        assert_eq!(engine.advance_section().unwrap(), 2);
        assert_eq!(engine.progress_label(), "Part 2 of 5");
    }

    #[test]
    fn retreat_has_no_completeness_gate() {
        let mut engine = SurveyEngine::new();
        answer_section(&mut engine, 1, 1);
        engine.advance_section().unwrap();
        assert_eq!(engine.retreat_section().unwrap(), 1);
        assert_eq!(
            engine.retreat_section(),
            Err(SurveyError::Boundary { from: 1, to: 0 })
        );
    }

    #[test]
    fn cannot_advance_past_last_section() {
        let mut engine = answer_all(1);
        for expected in 2..=5 {
            assert_eq!(engine.advance_section().unwrap(), expected);
        }
        assert_eq!(engine.progress_fraction(), 1.0);
        assert_eq!(
            engine.advance_section(),
            Err(SurveyError::Boundary { from: 5, to: 6 })
        );
        assert_eq!(engine.current_section(), 5);
    }

    #[test]
    fn finalize_requires_last_section() {
        let mut engine = SurveyEngine::new();
        answer_section(&mut engine, 1, 3);
        assert!(matches!(
            engine.finalize_and_interpret(),
            Err(SurveyError::IncompleteSection { section: 5, .. })
        ));
    }

    #[test]
    fn finalize_scenarios() {
        let low = answer_all(0).finalize_and_interpret().unwrap();
        assert_eq!(low.total_score, 0);
        assert_eq!(low.band_title, "Low indoctrination markers");

        let moderate = answer_all(1).finalize_and_interpret().unwrap();
        assert_eq!(moderate.total_score, 30);
        assert_eq!(moderate.band_title, "Moderate markers");
        assert_eq!(moderate.band_classification, Classification::Moderate);
        assert!(moderate.sections.iter().all(|s| s.score == 6));

        let severe = answer_all(3).finalize_and_interpret().unwrap();
        assert_eq!(severe.total_score, 90);
        assert_eq!(severe.band_title, "Severe markers");
        assert_eq!(severe.sections.len(), 5);
    }

    #[test]
    fn finalize_does_not_mutate() {
        let engine = answer_all(2);
        let before = engine.clone();
        let result = engine.finalize_and_interpret().unwrap();
        assert_eq!(result.total_score, 60);
        assert_eq!(engine, before);
    }

    #[test]
    fn reset_clears_everything() {
        let mut engine = answer_all(3);
        engine.advance_section().unwrap();
        engine.reset();
        assert_eq!(engine.current_section(), 1);
        assert_eq!(engine.answers().count(), 0);
        for s in 1..=5 {
            assert_eq!(engine.compute_section_score(s).unwrap(), 0);
            assert!(!engine.is_section_complete(s).unwrap());
        }
        assert_eq!(engine.section_scores(), [0; 5]);
    }

    #[test]
    fn serialize_restore_roundtrip() {
        let mut engine = SurveyEngine::new();
        answer_section(&mut engine, 1, 2);
        engine.record_answer(9, 3).unwrap();
        engine.advance_section().unwrap();

        let snapshot = engine.serialize();
        assert_eq!(snapshot.current_section, 2);
        assert_eq!(snapshot.section_scores.get(&1), Some(&12));

        let mut restored = SurveyEngine::new();
        restored.restore(&snapshot).unwrap();
        assert_eq!(restored, engine);
    }

    #[test]
    fn restore_recomputes_stale_scores() {
        let mut snapshot = Snapshot::default();
        snapshot.answers.insert(1, 3);
        snapshot.answers.insert(2, 3);
        snapshot.section_scores.insert(1, 99);

        let mut engine = SurveyEngine::new();
        engine.restore(&snapshot).unwrap();
        assert_eq!(engine.section_scores()[0], 6);
    }

    #[test]
    fn rejected_restore_keeps_state() {
        let mut engine = SurveyEngine::new();
        engine.record_answer(1, 1).unwrap();
        let before = engine.clone();

        let mut snapshot = Snapshot::default();
        snapshot.answers.insert(2, 2);
        snapshot.answers.insert(40, 1);
        assert!(matches!(
            engine.restore(&snapshot),
            Err(SurveyError::InvalidSnapshot(_))
        ));
        assert_eq!(engine, before);
    }
}
