//! The `selfassess answer`, `next`, `back` and `reset` commands.

use anyhow::Result;

use selfassess_core::model::{QuestionId, MAX_SECTION_SCORE, SECTION_COUNT};

use super::{open_session, warn_unsaved};
use crate::config::SelfassessConfig;

pub fn answer(config: &SelfassessConfig, question: u32, value: u32) -> Result<()> {
    let mut session = open_session(config);
    let saved = session.record_answer(question, value)?;
    warn_unsaved(saved.persisted);

    if let Some(q) = QuestionId::new(question) {
        println!(
            "{q} = {value} ({} score: {}/{MAX_SECTION_SCORE})",
            q.section(),
            saved.value
        );
    }
    Ok(())
}

pub fn next(config: &SelfassessConfig) -> Result<()> {
    let mut session = open_session(config);
    let engine = session.engine();
    if engine.current_section() == SECTION_COUNT && engine.is_section_complete(SECTION_COUNT)? {
        println!("This is the last part. Run `selfassess results` to see your score.");
        return Ok(());
    }
    let saved = session.advance()?;
    warn_unsaved(saved.persisted);
    println!("{}", session.engine().progress_label());
    Ok(())
}

pub fn back(config: &SelfassessConfig) -> Result<()> {
    let mut session = open_session(config);
    let saved = session.retreat()?;
    warn_unsaved(saved.persisted);
    println!("{}", session.engine().progress_label());
    Ok(())
}

pub fn reset(config: &SelfassessConfig) -> Result<()> {
    let mut session = open_session(config);
    let saved = session.reset();
    warn_unsaved(saved.persisted);
    println!("Survey reset. {}", session.engine().progress_label());
    Ok(())
}
