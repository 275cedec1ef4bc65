mod app;
mod cli;
mod error;
mod input;
mod paths;
mod terminal;
mod text;
mod view;

use std::fs::{self, File};
use std::path::PathBuf;

use clap::Parser;
use coinboard_lib::BoardConfig;
use coinboard_lib::source::open_source;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::app::App;
use crate::cli::Args;
use crate::error::AppError;
use crate::terminal::Terminal;

async fn run(config: BoardConfig) -> Result<(), AppError> {
    let source = open_source(&config)?;
    let mut terminal = Terminal::new()?;
    let (app, rx) = App::new(source, &config);
    app.run(&mut terminal, rx).await
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    paths::rotate_logs();
    let log_path = paths::log_file().unwrap_or_else(|| PathBuf::from("coinboard-tui.log"));
    if let Some(dir) = log_path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let log_file = File::create(&log_path).expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let config = args.into_config();
    info!(
        "Starting coinboard with location {} (cache: {})",
        config.location, config.cache_initial_load
    );

    if let Err(e) = run(config).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
