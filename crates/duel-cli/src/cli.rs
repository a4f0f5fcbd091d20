//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::config::DuelConfig;

/// Duel - Compare two stocks head to head
#[derive(Parser, Debug)]
#[command(name = "duel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Suppress the transcript and saved-file notices
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding <TICKER>_stock_price.csv and <TICKER>_stock_dividend.csv
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Ticker of the first security
    #[arg(long)]
    pub a_ticker: Option<String>,

    /// Display name of the first security
    #[arg(long)]
    pub a_name: Option<String>,

    /// Price file of the first security
    #[arg(long)]
    pub a_prices: Option<PathBuf>,

    /// Dividend file of the first security
    #[arg(long)]
    pub a_dividends: Option<PathBuf>,

    /// Ticker of the second security
    #[arg(long)]
    pub b_ticker: Option<String>,

    /// Display name of the second security
    #[arg(long)]
    pub b_name: Option<String>,

    /// Price file of the second security
    #[arg(long)]
    pub b_prices: Option<PathBuf>,

    /// Dividend file of the second security
    #[arg(long)]
    pub b_dividends: Option<PathBuf>,

    /// Chart PNG destination
    #[arg(long)]
    pub chart: Option<PathBuf>,

    /// Summary text destination
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Skip rendering the chart
    #[arg(long)]
    pub no_chart: bool,

    /// Chart width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Chart height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Chart title
    #[arg(long)]
    pub title: Option<String>,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored transcript with a metric table
    #[default]
    Table,
    /// JSON snapshot of the comparison
    Json,
    /// Verdict line only
    Minimal,
}

fn set<T>(target: &mut T, value: &Option<T>)
where
    T: Clone,
{
    if let Some(value) = value {
        *target = value.clone();
    }
}

fn set_some<T>(target: &mut Option<T>, value: &Option<T>)
where
    T: Clone,
{
    if value.is_some() {
        target.clone_from(value);
    }
}

impl Cli {
    /// Applies flags on top of `config`. A new ticker without a new name
    /// clears the configured name so the ticker is displayed instead.
    pub fn apply_to(&self, config: &mut DuelConfig) {
        set(&mut config.data_dir, &self.data_dir);

        let a = &mut config.series_a;
        if self.a_ticker.is_some() && self.a_name.is_none() {
            a.name = None;
        }
        set(&mut a.ticker, &self.a_ticker);
        set_some(&mut a.name, &self.a_name);
        set_some(&mut a.prices, &self.a_prices);
        set_some(&mut a.dividends, &self.a_dividends);

        let b = &mut config.series_b;
        if self.b_ticker.is_some() && self.b_name.is_none() {
            b.name = None;
        }
        set(&mut b.ticker, &self.b_ticker);
        set_some(&mut b.name, &self.b_name);
        set_some(&mut b.prices, &self.b_prices);
        set_some(&mut b.dividends, &self.b_dividends);

        let output = &mut config.output;
        set(&mut output.chart, &self.chart);
        set(&mut output.summary, &self.summary);
        set(&mut output.width, &self.width);
        set(&mut output.height, &self.height);
        set_some(&mut output.title, &self.title);
        if self.no_chart {
            output.chart_enabled = false;
        }
    }
}
