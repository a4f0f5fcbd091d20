//! Duel CLI - compare two stocks head to head.
//!
//! # Usage
//!
//! ```bash
//! # Coca-Cola vs PepsiCo from ./data
//! duel
//!
//! # Any two tickers, custom data directory
//! duel --data-dir prices --a-ticker KDP --a-name "Keurig Dr Pepper" --b-ticker PEP
//!
//! # Scorecard as JSON, no chart
//! duel --format json --no-chart
//!
//! # Everything from a config file
//! duel --config duel.toml
//! ```

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use duel_chart::ChartRenderer;
use duel_report::{
    ChartSink, ConsoleMode, ConsoleSink, JsonSink, Pipeline, SummaryFileSink,
};

mod cli;
mod config;
mod error;
mod logging;
mod output;

use cli::{Cli, OutputFormat};
use config::DuelConfig;
use output::{print_error, print_info, print_success};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let color = !cli.no_color
        && std::env::var_os("NO_COLOR").is_none()
        && std::io::stdout().is_terminal();
    colored::control::set_override(color);

    match run(&cli, color) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, color: bool) -> Result<()> {
    let mut config = DuelConfig::load(cli.config.as_deref())?;
    cli.apply_to(&mut config);
    config.validate()?;
    debug!(?config, "Resolved configuration");

    let (a, b) = config.inputs();
    let mut pipeline = Pipeline::new(a, b);

    let out = &config.output;
    if out.chart_enabled {
        let mut sink = ChartSink::new(&out.chart)
            .with_renderer(ChartRenderer::new(out.width, out.height));
        if let Some(title) = &out.title {
            sink = sink.with_title(title);
        }
        pipeline = pipeline.with_sink(sink);
    }
    pipeline = pipeline.with_sink(SummaryFileSink::new(&out.summary));

    let notices = cli.format == OutputFormat::Table && !cli.quiet;
    match cli.format {
        OutputFormat::Table if cli.quiet => {}
        OutputFormat::Table => {
            pipeline = pipeline.with_sink(ConsoleSink::stdout().with_color(color));
        }
        OutputFormat::Json => pipeline = pipeline.with_sink(JsonSink::stdout()),
        OutputFormat::Minimal => {
            pipeline =
                pipeline.with_sink(ConsoleSink::stdout().with_mode(ConsoleMode::VerdictOnly));
        }
    }

    let artifacts = pipeline.artifacts();
    pipeline.run().context("Comparison failed")?;

    if notices {
        println!();
        if !out.chart_enabled {
            print_info("Chart rendering disabled");
        }
        for path in artifacts {
            print_success(&format!("Saved {}", path.display()));
        }
    }
    Ok(())
}
