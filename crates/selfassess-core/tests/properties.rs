//! Property tests for the survey engine.
//!
//! Drives the engine with arbitrary answer sequences and checks that scores,
//! gating and snapshots stay consistent with the recorded answers.

use std::collections::BTreeMap;

use proptest::prelude::*;

use selfassess_core::interpretation::{interpret, BANDS};
use selfassess_core::model::{section_range, MAX_TOTAL_SCORE};
use selfassess_core::SurveyEngine;

fn answers() -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec((1u32..=30, 0u32..=3), 0..80)
}

fn full_answers() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..=3, 30)
}

/// Last-write-wins model of the answer set.
fn model_of(answers: &[(u32, u32)]) -> BTreeMap<u32, u32> {
    answers.iter().copied().collect()
}

proptest! {
    #[test]
    fn write_then_read(answers in answers()) {
        let mut engine = SurveyEngine::new();
        for &(q, v) in &answers {
            engine.record_answer(q, v).unwrap();
            prop_assert_eq!(engine.answer(q), Some(v));
        }
        let expected = model_of(&answers);
        prop_assert_eq!(engine.answers().collect::<BTreeMap<_, _>>(), expected);
    }

    #[test]
    fn section_scores_match_answers(answers in answers()) {
        let mut engine = SurveyEngine::new();
        for &(q, v) in &answers {
            engine.record_answer(q, v).unwrap();
        }
        let expected = model_of(&answers);
        for s in 1..=5 {
            let (start, end) = section_range(s).unwrap();
            let sum: u32 = (start..=end).filter_map(|q| expected.get(&q)).sum();
            prop_assert_eq!(engine.compute_section_score(s).unwrap(), sum);
            prop_assert_eq!(engine.section_scores()[(s - 1) as usize], sum);

            let complete = (start..=end).all(|q| expected.contains_key(&q));
            prop_assert_eq!(engine.is_section_complete(s).unwrap(), complete);
        }
    }

    #[test]
    fn advance_fails_iff_incomplete(answers in answers()) {
        let mut engine = SurveyEngine::new();
        for &(q, v) in &answers {
            engine.record_answer(q, v).unwrap();
        }
        let complete = engine.is_section_complete(1).unwrap();
        let result = engine.advance_section();
        prop_assert_eq!(result.is_ok(), complete);
        prop_assert_eq!(engine.current_section(), if complete { 2 } else { 1 });
    }

    #[test]
    fn total_lies_in_its_band(values in full_answers()) {
        let mut engine = SurveyEngine::new();
        for (i, &v) in values.iter().enumerate() {
            engine.record_answer(i as u32 + 1, v).unwrap();
        }
        let result = engine.finalize_and_interpret().unwrap();
        let expected: u32 = values.iter().sum();
        prop_assert_eq!(result.total_score, expected);
        prop_assert!(result.total_score <= MAX_TOTAL_SCORE);
        prop_assert_eq!(
            result.sections.iter().map(|s| s.score).sum::<u32>(),
            result.total_score
        );

        let band = BANDS.iter().find(|b| b.title == result.band_title).unwrap();
        prop_assert!(band.contains(result.total_score));
    }

    #[test]
    fn snapshot_roundtrip(answers in answers(), forward in 0usize..5) {
        let mut engine = SurveyEngine::new();
        for &(q, v) in &answers {
            engine.record_answer(q, v).unwrap();
        }
        for _ in 0..forward {
            if engine.advance_section().is_err() {
                break;
            }
        }

        let json = engine.serialize().to_json().unwrap();
        let snapshot = selfassess_core::snapshot::Snapshot::from_json(&json).unwrap();
        let mut restored = SurveyEngine::new();
        restored.restore(&snapshot).unwrap();
        prop_assert_eq!(restored, engine);
    }
}

#[test]
fn every_score_has_exactly_one_band() {
    for score in 0..=MAX_TOTAL_SCORE {
        assert_eq!(BANDS.iter().filter(|b| b.contains(score)).count(), 1);
        assert!(interpret(score).is_some());
    }
}
