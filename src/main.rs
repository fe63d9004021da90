#![allow(non_snake_case)]

mod cli;

use std::env;
use std::process;

use clap::Parser;
use interviewScheduler::config::AppConfig;
use interviewScheduler::store::InterviewStore;
use tracing_subscriber::EnvFilter;

fn main() {
    let (config, config_error) = match env::var("CONFIG_FILE") {
        Ok(path) => match AppConfig::from_file(&path) {
            Ok(config) => (config, None),
            Err(e) => (AppConfig::default(), Some(e)),
        },
        Err(_) => (AppConfig::default(), None),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "falling back to default configuration");
    }

    let args = cli::Cli::parse();
    let mut store = InterviewStore::open_in(config.db_location());
    let viewer_zone = config.viewer_zone();
    if let Err(e) = cli::cli(args, &mut store, &viewer_zone) {
        eprintln!("{}", e);
        process::exit(1);
    }
}
