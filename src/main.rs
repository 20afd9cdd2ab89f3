// tldr - terminal dashboard of GitHub repository activity.
// Entry point: configuration, logging, runtime, then the dashboard or a one-shot command.

mod activity;
mod api;
mod app;
mod cache;
mod cli;
mod config;
mod demo;
mod error;
mod errors;
mod logging;
mod search;
mod state;
mod ui;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use crate::api::RepoClient;
use crate::app::{App, Source};
use crate::cache::paths;
use crate::cli::{Backend, Cli};
use crate::config::Config;
use crate::error::Result;
use crate::errors::ErrorSlot;

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "tldr failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    logging::init(&config.log_level, paths::log_path().as_deref())?;
    info!(api_url = %config.api_url, demo = cli.demo, "starting tldr");

    let runtime = tokio::runtime::Runtime::new()?;
    let errors = ErrorSlot::new();

    let client = if cli.demo {
        None
    } else {
        Some(Arc::new(RepoClient::connect(
            &config.api_url,
            Arc::new(errors.clone()),
        )?))
    };

    match cli.command {
        None => {
            let source = match client {
                Some(client) => Source::Api(client),
                None => app::demo_source(),
            };
            let mut app = App::new(source, errors, runtime.handle().clone())
                .with_cache(paths::repos_path(), config.cache_ttl());

            let mut terminal = ratatui::init();
            let result = app.run(&mut terminal);
            ratatui::restore();
            result?;
        }
        Some(command) => {
            let backend = match client {
                Some(client) => Backend::Api(client),
                None => Backend::Demo,
            };
            let result = runtime.block_on(cli::execute(command, &backend));
            if let (Err(e), Some(reported)) = (&result, errors.current()) {
                eprintln!("{}", reported.msg);
                info!(error = %e, "command failed");
            }
            result?;
        }
    }

    Ok(())
}
