use clap::Args;
use pomo_core::storage::NotificationsConfig;
use pomo_core::{
    CancelToken, ClockState, Config, JsonStatStore, Notifier, SessionClock, SessionKind,
    SessionSpec, SilentNotifier, SleepTicker, StatManager,
};

use crate::render::{SessionPresenter, TerminalNotifier};

#[derive(Args)]
pub struct SessionArgs {
    /// Duration in minutes (default from config)
    #[arg(value_name = "MINUTES", value_parser = clap::value_parser!(u32).range(1..=999))]
    pub minutes: Option<u32>,
    /// Don't ding when the timer ends
    #[arg(short, long)]
    pub quiet: bool,
    /// Stopwatch mode (runs until Ctrl-C)
    #[arg(short, long, conflicts_with = "minutes")]
    pub stopwatch: bool,
}

pub fn run(kind: SessionKind, args: SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let spec = if args.stopwatch {
        SessionSpec::open_ended(kind)
    } else {
        let minutes = args.minutes.unwrap_or_else(|| config.default_minutes(kind));
        SessionSpec::timed_minutes(kind, minutes)?
    };

    let manager = StatManager::new(JsonStatStore::open_default(&config)?);
    // Surface an unusable store now rather than after the session.
    manager.today_stats()?;

    let token = CancelToken::new();
    let handler_token = token.clone();
    ctrlc::set_handler(move || handler_token.cancel())?;

    let mut presenter = SessionPresenter::new(std::io::stdout(), config.report.bar_width);
    let outcome = SessionClock::new(spec).run(&mut SleepTicker, &token, &mut presenter);
    drop(presenter);

    if let Some(stat) = manager.record(&outcome)? {
        tracing::info!(
            kind = %kind,
            elapsed_secs = outcome.elapsed_secs,
            focused = stat.total_time_focused,
            rested = stat.total_time_rested,
            "session recorded"
        );
    }

    if outcome.state == ClockState::Completed {
        notifier(args.quiet, &config.notifications).notify(kind);
    }
    Ok(())
}

fn notifier(quiet: bool, config: &NotificationsConfig) -> Box<dyn Notifier> {
    if quiet || !config.enabled {
        Box::new(SilentNotifier)
    } else {
        Box::new(TerminalNotifier::new(config.command.clone()))
    }
}
