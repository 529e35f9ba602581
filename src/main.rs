//! Run a sample app headlessly and print its widget tree.
//!
//! ```text
//! snapview todo --ticks 60
//! snapview level --test-case drag.json --record out.json
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use snapview::data::Shared;
use snapview::record::{ActionLog, Player, RecordError, Recorder};
use snapview::samples::{level, todo};
use snapview::scheduler::Scheduler;
use snapview::testing::tree_to_string;
use snapview::{App, AppConfig};

#[derive(Parser, Debug)]
#[command(name = "snapview")]
#[command(about = "Run a sample app headlessly and print its widget tree", long_about = None)]
struct Cli {
    #[command(subcommand)]
    sample: Sample,
}

#[derive(Subcommand, Debug)]
enum Sample {
    /// Todo list with colour history
    Todo(RunArgs),

    /// Level designer with asynchronously loading sprites
    Level(RunArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Number of refresh ticks to run
    #[arg(long, default_value_t = 30)]
    ticks: u64,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = 33)]
    interval_ms: u64,

    /// Action log to replay
    #[arg(long)]
    test_case: Option<PathBuf>,

    /// Where to write the log of committed submissions
    #[arg(long)]
    record: Option<PathBuf>,
}

impl RunArgs {
    fn apply(&self, config: AppConfig) -> AppConfig {
        config.with_tick_interval(Duration::from_millis(self.interval_ms))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), RecordError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.sample {
        Sample::Todo(args) => {
            let app = todo::build_app(args.apply(todo::default_config()));
            run(app, &args).await
        }
        Sample::Level(args) => {
            let app = level::build_app(args.apply(level::default_config()));
            run(app, &args).await
        }
    }
}

async fn run<T>(mut app: App<T>, args: &RunArgs) -> Result<(), RecordError>
where
    T: Shared + PartialEq + Serialize + DeserializeOwned,
{
    if let Some(path) = &args.test_case {
        let log = ActionLog::<T>::load(path)?;
        info!(path = %path.display(), entries = log.len(), "replaying action log");
        app.replay(Player::new(log));
    }
    if let Some(path) = &args.record {
        app.start_recording(Recorder::to_file(path));
    }

    let scheduler = Scheduler::new();
    let ran = app.run(&scheduler, Some(args.ticks)).await;
    info!(ticks = ran, history = app.history().len(), "run finished");

    if let Some(recorder) = app.take_recorder() {
        let log = recorder.finish()?;
        info!(entries = log.len(), "action log saved");
    }
    println!("{}", tree_to_string(app.backend()));
    Ok(())
}
