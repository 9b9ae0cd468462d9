use clap::{Parser, Subcommand};
use anyhow::Result;
use dotenvy::dotenv;

mod category;
mod config;
mod dash;
mod engagement;
mod headlines;
mod ordering;
mod output;
mod render;
mod session;
mod telemetry;

use config::{HubConfig, Overrides};
use output::config::OutputConfig;

#[derive(Parser)]
#[command(name = "hub", about = "Top 5 news per category from Google News RSS")]
struct Cli {
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,
    /// Strip and show article summaries
    #[arg(global = true, long, default_value_t = false)]
    summaries: bool,
    /// Add the "Stocks" category
    #[arg(global = true, long, default_value_t = false)]
    with_stocks: bool,
    #[arg(global = true, long)]
    timeout_secs: Option<u64>,
    /// Feed search endpoint, e.g. a local mirror
    #[arg(global = true, long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List categories and their search queries
    Categories(category::CategoriesCmd),
    /// Fetch headlines for one category or query
    Fetch(headlines::FetchCmd),
    /// Render one dashboard frame
    Render(render::RenderCmd),
    /// Interactive dashboard session
    Dash(dash::DashCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    // initialize logging/tracing (stderr). Respect RUST_LOG and HUB_LOG_FORMAT
    telemetry::config::init_tracing();

    let cfg = HubConfig::from_env().with_overrides(&Overrides {
        base_url: cli.base_url,
        timeout_secs: cli.timeout_secs,
        max_items: None,
        summaries: cli.summaries,
        with_stocks: cli.with_stocks,
    });
    let emitter = output::Emitter::new(OutputConfig::from_env().with_json_flag(cli.json));

    match cli.command {
        Commands::Categories(args) => category::run(&cfg, &emitter, args).await?,
        Commands::Fetch(args) => headlines::run(&cfg, &emitter, args).await?,
        Commands::Render(args) => render::run(&cfg, &emitter, args).await?,
        Commands::Dash(args) => dash::run(&cfg, &emitter, args).await?,
    }

    Ok(())
}
