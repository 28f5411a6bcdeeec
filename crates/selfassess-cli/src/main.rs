//! selfassess CLI — answer the self-assessment from a terminal.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use selfassess_core::SurveyError;

mod commands;
mod config;

#[derive(Parser)]
#[command(
    name = "selfassess",
    version,
    about = "Self-assessment survey: 30 statements, 5 parts, one score"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding saved progress (overrides config)
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rate a statement (0 = not at all, 3 = completely)
    Answer {
        /// Question number, 1 to 30
        question: u32,

        /// Rating, 0 to 3
        value: u32,
    },

    /// Move to the next part (current part must be fully answered)
    Next,

    /// Move back to the previous part
    Back,

    /// Show scores and progress per part
    Status,

    /// Show the final score and its interpretation
    Results {
        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Also write the result as JSON to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Clear all answers and start over
    Reset,

    /// Print text for sharing the survey
    Share {
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create a starter config file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("selfassess=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = || load_config(cli.config.as_deref(), cli.state_dir.clone());

    let result = match cli.command {
        Commands::Answer { question, value } => {
            config().and_then(|c| commands::navigate::answer(&c, question, value))
        }
        Commands::Next => config().and_then(|c| commands::navigate::next(&c)),
        Commands::Back => config().and_then(|c| commands::navigate::back(&c)),
        Commands::Status => config().and_then(|c| commands::status::execute(&c)),
        Commands::Results { format, output } => {
            config().and_then(|c| commands::results::execute(&c, &format, output))
        }
        Commands::Reset => config().and_then(|c| commands::navigate::reset(&c)),
        Commands::Share { format } => {
            config().and_then(|c| commands::share::execute(&c, &format))
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        // Validation messages go to the person taking the survey as-is.
        match e.downcast_ref::<SurveyError>() {
            Some(err) if err.is_user_facing() => eprintln!("{err}"),
            _ => eprintln!("Error: {e:#}"),
        }
        process::exit(1);
    }
}

fn load_config(
    path: Option<&Path>,
    state_dir: Option<PathBuf>,
) -> anyhow::Result<config::SelfassessConfig> {
    let mut config = config::load_config_from(path)?;
    if let Some(dir) = state_dir {
        config.state_dir = dir;
    }
    Ok(config)
}
