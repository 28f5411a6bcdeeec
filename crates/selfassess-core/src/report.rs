//! Final survey result with JSON persistence and text renderings.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::interpretation::{Band, Classification};
use crate::model::{MAX_SECTION_SCORE, MAX_TOTAL_SCORE};

/// Outcome of a completed survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResult {
    /// Sum of all section scores, `0..=90`.
    pub total_score: u32,
    /// Title of the matching interpretation band.
    pub band_title: String,
    /// Descriptive text of the matching band.
    pub band_description: String,
    /// Classification of the matching band.
    pub band_classification: Classification,
    /// Score of every section, in order.
    #[serde(rename = "perSectionBreakdown")]
    pub sections: Vec<SectionBreakdown>,
}

/// One section's contribution to the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionBreakdown {
    pub section: u32,
    pub score: u32,
    pub max_score: u32,
}

impl SectionBreakdown {
    pub fn new(section: u32, score: u32) -> Self {
        Self {
            section,
            score,
            max_score: MAX_SECTION_SCORE,
        }
    }

    /// Share of the section maximum, in percent.
    pub fn percentage(&self) -> f64 {
        f64::from(self.score) / f64::from(self.max_score) * 100.0
    }
}

impl SurveyResult {
    pub fn new(total_score: u32, band: &Band, sections: Vec<SectionBreakdown>) -> Self {
        Self {
            total_score,
            band_title: band.title.to_string(),
            band_description: band.description.to_string(),
            band_classification: band.classification,
            sections,
        }
    }

    /// Save the result as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize result")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write result to {}", path.display()))?;
        Ok(())
    }

    /// Load a result from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read result from {}", path.display()))?;
        let result: SurveyResult =
            serde_json::from_str(&content).context("failed to parse result JSON")?;
        Ok(result)
    }

    /// Plain-text rendering for terminals.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Total score: {}/{}", self.total_score, MAX_TOTAL_SCORE);
        let _ = writeln!(out, "{}", self.band_title);
        let _ = writeln!(out, "{}", self.band_description);
        let _ = writeln!(out);
        for s in &self.sections {
            let _ = writeln!(
                out,
                "  Part {}: {:>2}/{} {}",
                s.section,
                s.score,
                s.max_score,
                bar(s.percentage())
            );
        }
        out
    }

    /// Markdown rendering.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str("# Self-Assessment Result\n\n");
        let _ = writeln!(
            md,
            "**Total score:** {}/{}\n",
            self.total_score, MAX_TOTAL_SCORE
        );
        let _ = writeln!(md, "## {}\n", self.band_title);
        let _ = writeln!(md, "{}\n", self.band_description);
        md.push_str("| Part | Score | % |\n|------|-------|---|\n");
        for s in &self.sections {
            let _ = writeln!(
                md,
                "| {} | {}/{} | {:.0}% |",
                s.section,
                s.score,
                s.max_score,
                s.percentage()
            );
        }
        md
    }
}

fn bar(percentage: f64) -> String {
    const WIDTH: usize = 18;
    let filled = ((percentage / 100.0) * WIDTH as f64).round() as usize;
    let filled = filled.min(WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(WIDTH - filled))
}
