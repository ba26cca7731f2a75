mod app;
mod cli;
mod config;
mod consts;
mod credentials;
mod error;
mod jira;
mod output;
mod session;
mod utils;
mod worklog;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;
use config::Config;

fn init_tracing(debug: bool) {
    // RUST_LOG wins; --debug turns on this crate's debug events; otherwise off
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| {
            if debug {
                EnvFilter::new("jiratime=debug")
            } else {
                EnvFilter::new("off")
            }
        });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config = Config::load();
    let cli = cli.with_config(&config);

    let code = match app::run(&cli, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            app::EXIT_REJECTED
        }
    };
    std::process::exit(code);
}
