//! The `selfassess status` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use selfassess_core::model::{Section, MAX_SECTION_SCORE, QUESTIONS_PER_SECTION};

use super::open_session;
use crate::config::SelfassessConfig;

pub fn execute(config: &SelfassessConfig) -> Result<()> {
    let session = open_session(config);
    let engine = session.engine();

    println!(
        "{} ({:.0}%)",
        engine.progress_label(),
        engine.progress_fraction() * 100.0
    );

    let mut table = Table::new();
    table.set_header(vec!["Part", "Questions", "Answered", "Score", "Complete"]);

    let scores = engine.section_scores();
    for section in Section::all() {
        let n = section.number();
        let answered = engine.answered_count(n)?;
        let marker = if n == engine.current_section() { " <" } else { "" };
        table.add_row(vec![
            Cell::new(format!("{n}{marker}")),
            Cell::new(format!(
                "{}-{}",
                section.first_question().number(),
                section.last_question().number()
            )),
            Cell::new(format!("{answered}/{QUESTIONS_PER_SECTION}")),
            Cell::new(format!("{}/{MAX_SECTION_SCORE}", scores[section.index()])),
            Cell::new(if engine.is_section_complete(n)? { "yes" } else { "no" }),
        ]);
    }

    println!("{table}");
    Ok(())
}
