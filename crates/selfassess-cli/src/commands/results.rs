//! The `selfassess results` command.

use std::path::PathBuf;

use anyhow::Result;

use super::open_session;
use crate::config::SelfassessConfig;

pub fn execute(config: &SelfassessConfig, format: &str, output: Option<PathBuf>) -> Result<()> {
    let session = open_session(config);
    let result = session.finalize()?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        "markdown" | "md" => println!("{}", result.to_markdown()),
        _ => print!("{}", result.to_text()),
    }

    if let Some(path) = output {
        result.save_json(&path)?;
        tracing::info!("result written to {}", path.display());
    }

    Ok(())
}
