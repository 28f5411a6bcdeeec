//! The `selfassess share` command.

use anyhow::Result;

use selfassess_core::share::ShareMessage;

use crate::config::SelfassessConfig;

pub fn execute(config: &SelfassessConfig, format: &str) -> Result<()> {
    let message = ShareMessage::new(config.share_url.as_str());

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&message)?),
        _ => println!("{}", message.clipboard_text()),
    }

    Ok(())
}
