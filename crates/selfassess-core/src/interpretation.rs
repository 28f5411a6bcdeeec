//! Total-score interpretation bands.
//!
//! Five closed, contiguous ranges partition `0..=90`. Lookup is a linear
//! scan over the ordered table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::MAX_TOTAL_SCORE;

/// Qualitative classification of a band, used by renderers for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Low,
    Moderate,
    Significant,
    High,
    Severe,
}

impl Classification {
    /// Style class name (e.g. `score-low`).
    pub fn class_name(self) -> &'static str {
        match self {
            Classification::Low => "score-low",
            Classification::Moderate => "score-moderate",
            Classification::Significant => "score-significant",
            Classification::High => "score-high",
            Classification::Severe => "score-severe",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// A labelled, inclusive score range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub min: u32,
    pub max: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub classification: Classification,
}

impl Band {
    pub fn contains(&self, score: u32) -> bool {
        (self.min..=self.max).contains(&score)
    }
}

/// The interpretation table, ordered by `min`.
pub const BANDS: [Band; 5] = [
    Band {
        min: 0,
        max: 15,
        title: "Low indoctrination markers",
        description: "You appear to hold examined beliefs and maintain intellectual independence. Or you're not being honest with yourself.",
        classification: Classification::Low,
    },
    Band {
        min: 16,
        max: 35,
        title: "Moderate markers",
        description: "You have some inherited beliefs you haven't fully examined. This is normal — awareness is the first step.",
        classification: Classification::Moderate,
    },
    Band {
        min: 36,
        max: 55,
        title: "Significant markers",
        description: "Many of your political beliefs may be inherited rather than chosen. Consider seeking out perspectives that challenge your assumptions.",
        classification: Classification::Significant,
    },
    Band {
        min: 56,
        max: 75,
        title: "High markers",
        description: "Your worldview may be largely constructed by others. This isn't your fault — Lebanese society is designed to produce this — but breaking free requires active effort.",
        classification: Classification::High,
    },
    Band {
        min: 76,
        max: 90,
        title: "Severe markers",
        description: "You are likely operating within a closed ideological system. The fact that you took this test is a positive sign. Consider: what would it take to change your mind about anything?",
        classification: Classification::Severe,
    },
];

/// Find the band containing `score`. `None` only for scores above 90.
pub fn interpret(score: u32) -> Option<&'static Band> {
    BANDS.iter().find(|band| band.contains(score))
}

/// `true` when `bands` partition `0..=max_score` with no gaps or overlaps.
const fn partitions(bands: &[Band], max_score: u32) -> bool {
    let mut expected_min = 0;
    let mut i = 0;
    while i < bands.len() {
        let band = &bands[i];
        if band.min != expected_min || band.max < band.min {
            return false;
        }
        expected_min = band.max + 1;
        i += 1;
    }
    expected_min == max_score + 1
}

const _: () = assert!(
    partitions(&BANDS, MAX_TOTAL_SCORE),
    "interpretation bands must partition 0..=90"
);
