use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use quiz_services::{
    ChannelAnswers, Console, DEFAULT_FILE_PATH, DEFAULT_TIME_LIMIT_SECS, QuizConfig, QuizSession,
    load_problems,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

/// Timed quiz over a CSV file of questions and answers.
#[derive(Debug, Parser)]
#[command(name = "quiz", version, about)]
struct Args {
    /// Path to the CSV file with the questions
    #[arg(long = "file-path", default_value = DEFAULT_FILE_PATH)]
    file_path: PathBuf,

    /// Time allowed to complete the quiz, in seconds
    #[arg(long = "time-limit", default_value_t = DEFAULT_TIME_LIMIT_SECS)]
    time_limit: u64,
}

impl Args {
    fn into_config(self) -> QuizConfig {
        QuizConfig::default()
            .with_file_path(self.file_path)
            .with_time_limit(Duration::from_secs(self.time_limit))
    }
}

fn init_tracing() {
    // Logs go to stderr; stdout carries the quiz itself.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(config: &QuizConfig, console: Console) -> Result<(), Box<dyn std::error::Error>> {
    // Load everything before touching the console so a bad file never shows a prompt.
    let mut rng = StdRng::from_os_rng();
    let problems = load_problems(config.file_path(), &mut rng)?;

    let input = ChannelAnswers::stdin()?;
    let outcome = QuizSession::from_config(problems, config)
        .run(input, console)
        .await?;
    tracing::debug!(reason = %outcome.reason, "exiting");
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    let config = Args::parse().into_config();

    if let Err(err) = run(&config, Console::stdout()).await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
