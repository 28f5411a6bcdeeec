//! The `selfassess init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("selfassess.toml").exists() {
        println!("selfassess.toml already exists, skipping.");
    } else {
        std::fs::write("selfassess.toml", SAMPLE_CONFIG)?;
        println!("Created selfassess.toml");
    }

    println!("\nNext steps:");
    println!("  1. Rate each statement: selfassess answer <question> <0-3>");
    println!("  2. Move on when a part is done: selfassess next");
    println!("  3. After part 5: selfassess results");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# selfassess configuration

# Where in-progress answers are saved
state_dir = "./.selfassess"
storage_key = "lebanese-assessment-progress"

# Link included by `selfassess share`
share_url = "${SELFASSESS_SHARE_URL}"
"#;
