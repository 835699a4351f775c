use clap::Args;
use pomo_core::report::{graph, TodaySummary};
use pomo_core::{Config, JsonStatStore, StatManager};

use crate::render::{render_graph, render_summary};

#[derive(Args)]
pub struct StatsArgs {
    /// Show the F/R ratio graph for recent days
    #[arg(short, long)]
    pub graph: bool,
    /// Days covered by the graph (default from config)
    #[arg(long, requires = "graph", value_parser = clap::value_parser!(u32).range(1..=31))]
    pub days: Option<u32>,
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: StatsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let manager = StatManager::new(JsonStatStore::open_default(&config)?);

    if args.graph {
        let days = args.days.unwrap_or(config.report.window_days);
        let window = manager.recent_window(days)?;
        let report = graph(&window, days as usize, &config.graph_settings());
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", render_graph(&report, days as usize, config.report.good_ratio));
        }
    } else {
        let stat = manager.today_stats()?;
        let summary = TodaySummary::from_stat(manager.today(), &stat, config.report.good_ratio);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print!("{}", render_summary(&summary));
        }
    }
    Ok(())
}
