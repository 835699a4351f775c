use clap::{Parser, Subcommand};
use pomo_core::SessionKind;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "pomo", version, about = "Become more productive right from the terminal")]
#[command(after_help = r#"EXAMPLES:
    pomo focus              # focus for the configured default (20 min)
    pomo rest 12 -q         # 12 minute break, no ding at the end
    pomo focus --stopwatch  # count up until Ctrl-C
    pomo stats              # today's totals
    pomo stats --graph      # F/R ratio graph for the past week

Set POMO_LOG=debug for diagnostics on stderr."#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a focus session
    Focus(commands::session::SessionArgs),
    /// Start a rest session
    Rest(commands::session::SessionArgs),
    /// Today's stats, or the F/R graph
    Stats(commands::stats::StatsArgs),
    /// Reset today's stats
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("POMO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Focus(args) => commands::session::run(SessionKind::Focus, args),
        Commands::Rest(args) => commands::session::run(SessionKind::Rest, args),
        Commands::Stats(args) => commands::stats::run(args),
        Commands::Clear { yes } => commands::clear::run(yes),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
