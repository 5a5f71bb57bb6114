use clap::Parser;
use std::io;
use std::path::PathBuf;
use task_cli::config::Settings;
use task_cli::session::Session;
use task_cli::storage::JsonFileStorage;
use task_cli::ui::Ui;

/// Keeps track of todos, deadlines and events from the terminal.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Where tasks are saved, overriding the configured file
    #[arg(long)]
    data_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(data_file) = args.data_file {
        settings.data_file = data_file;
    }

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(settings.log_level())
        .init();

    let storage = JsonFileStorage::new(&settings.data_file);
    let mut session = Session::open(storage)?;
    let mut ui = Ui::new(io::stdout().lock(), settings.separator);
    session.run(io::stdin().lock(), &mut ui)
}
